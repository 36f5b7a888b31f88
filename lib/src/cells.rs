//! Cells in the cellular automaton.

use crate::{error::Error, states::State};

/// The coordinates of a cell.
///
/// `(x-coordinate, y-coordinate)`, both 0-indexed. `x` is the column,
/// increasing left to right; `y` is the row, increasing top to bottom.
pub type Coord = (usize, usize);

/// A cell in the cellular automaton.
///
/// A cell holds its current state and a pending next state.
/// `None` means that the state is unset.
///
/// The coordinates are fixed when the cell is created.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    x: usize,
    y: usize,
    state: Option<State>,
    next_state: Option<State>,
}

impl Cell {
    /// Creates a new cell with no pending next state.
    pub fn new(x: usize, y: usize, state: Option<State>) -> Self {
        Cell {
            x,
            y,
            state,
            next_state: None,
        }
    }

    /// The x-coordinate.
    #[inline]
    pub fn x(&self) -> usize {
        self.x
    }

    /// The y-coordinate.
    #[inline]
    pub fn y(&self) -> usize {
        self.y
    }

    /// Both coordinates, x first.
    #[inline]
    pub fn coordinates(&self) -> Coord {
        (self.x, self.y)
    }

    /// The current state.
    #[inline]
    pub fn state(&self) -> Option<&State> {
        self.state.as_ref()
    }

    /// The pending next state.
    #[inline]
    pub fn next_state(&self) -> Option<&State> {
        self.next_state.as_ref()
    }

    /// Sets the pending next state and returns it.
    ///
    /// `None` clears it.
    pub fn set_next_state(&mut self, next_state: Option<State>) -> Option<&State> {
        self.next_state = next_state;
        self.next_state.as_ref()
    }

    /// Whether a next state is pending.
    #[inline]
    pub fn has_next_state(&self) -> bool {
        self.next_state.is_some()
    }

    /// Moves the pending next state into the current state.
    ///
    /// Fails if no next state is pending.
    pub fn advance(&mut self) -> Result<&mut Self, Error> {
        let next_state = self
            .next_state
            .take()
            .ok_or(Error::NoNextState(self.coordinates()))?;
        self.state = Some(next_state);
        Ok(self)
    }
}
