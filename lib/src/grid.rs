//! The grid of cells.

use crate::{
    cells::{Cell, Coord},
    error::Error,
    rules::{Neighbourhood, NBHD},
    states::State,
};

/// A fixed-size rectangle of cells.
///
/// Cells are stored column by column: the cell at `(x, y)`
/// lives at index `x * rows + y`.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Grid {
    rows: usize,
    cols: usize,

    /// All the cells. Never resized or replaced after creation.
    cells: Box<[Cell]>,
}

impl Grid {
    /// Creates the cells from their initial states, given column by column.
    pub(crate) fn new(rows: usize, cols: usize, states: Vec<Option<State>>) -> Self {
        debug_assert_eq!(states.len(), rows * cols);
        let cells = states
            .into_iter()
            .enumerate()
            .map(|(i, state)| Cell::new(i / rows, i % rows, state))
            .collect();
        Grid { rows, cols, cells }
    }

    #[inline]
    pub(crate) fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub(crate) fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn index(&self, (x, y): Coord) -> Result<usize, Error> {
        if x < self.cols && y < self.rows {
            Ok(x * self.rows + y)
        } else {
            Err(Error::OutOfRange((x, y)))
        }
    }

    /// Finds the cell at `coord`.
    pub(crate) fn cell(&self, coord: Coord) -> Result<&Cell, Error> {
        let i = self.index(coord)?;
        Ok(&self.cells[i])
    }

    /// Finds the cell at `coord`, mutably.
    pub(crate) fn cell_mut(&mut self, coord: Coord) -> Result<&mut Cell, Error> {
        let i = self.index(coord)?;
        Ok(&mut self.cells[i])
    }

    /// Finds a cell by signed coordinates. `None` if it is outside the grid.
    fn find_cell(&self, x: isize, y: isize) -> Option<&Cell> {
        if x < 0 || y < 0 {
            return None;
        }
        self.cell((x as usize, y as usize)).ok()
    }

    /// The eight neighbors of the cell at `coord`, clockwise from the top.
    ///
    /// Neighbors outside the grid are `None`.
    pub(crate) fn neighbours(&self, coord: Coord) -> Result<[Option<&Cell>; 8], Error> {
        self.index(coord)?;
        let (x, y) = (coord.0 as isize, coord.1 as isize);
        let mut nbhd = [None; 8];
        for (n, (dx, dy)) in nbhd.iter_mut().zip(NBHD.iter()) {
            *n = self.find_cell(x + dx, y + dy);
        }
        Ok(nbhd)
    }

    /// The states of the eight neighbors of the cell at `coord`.
    pub(crate) fn neighbour_states(&self, coord: Coord) -> Result<Neighbourhood<'_>, Error> {
        Ok(self.neighbours(coord)?.map(|n| n.and_then(Cell::state)))
    }

    /// All cells, column by column.
    pub(crate) fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }
}
