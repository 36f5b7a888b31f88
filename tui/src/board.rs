//! Plaintext display of the grid.

use cagrid_lib::{render::Renderer, Coord, State};
use std::{
    cell::{Ref, RefCell},
    fmt::{self, Display, Formatter},
    rc::Rc,
};

/// One character per cell, row by row.
#[derive(Clone, Debug)]
pub(crate) struct Board {
    rows: usize,
    cols: usize,
    states: Vec<State>,
    chars: Vec<char>,
}

impl Board {
    pub(crate) fn new(rows: usize, cols: usize, states: Vec<State>) -> Self {
        Board {
            rows,
            cols,
            states,
            chars: vec!['?'; rows * cols],
        }
    }

    /// `.` for the first state, `o` for the second one if there are only two,
    /// and uppercase letters from `A` otherwise. `?` for anything else.
    fn symbol(&self, state: Option<&State>) -> char {
        let index = state.and_then(|state| self.states.iter().position(|s| s == state));
        match index {
            Some(0) => '.',
            Some(1) if self.states.len() == 2 => 'o',
            Some(i) if i <= 26 => (b'A' + (i - 1) as u8) as char,
            _ => '?',
        }
    }

    fn set(&mut self, (x, y): Coord, state: Option<&State>) {
        if x < self.cols && y < self.rows {
            self.chars[y * self.cols + x] = self.symbol(state);
        }
    }

    /// The rows of the board, top to bottom.
    pub(crate) fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.chars.chunks(self.cols.max(1)).map(|row| row.iter().collect())
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// A board that is also the renderer of an automaton.
#[derive(Clone, Debug)]
pub(crate) struct SharedBoard(Rc<RefCell<Board>>);

impl SharedBoard {
    pub(crate) fn new(rows: usize, cols: usize, states: Vec<State>) -> Self {
        SharedBoard(Rc::new(RefCell::new(Board::new(rows, cols, states))))
    }

    pub(crate) fn borrow(&self) -> Ref<'_, Board> {
        self.0.borrow()
    }
}

impl Renderer for SharedBoard {
    fn render(&mut self, coord: Coord, state: Option<&State>) {
        self.0.borrow_mut().set(coord, state);
    }
}
