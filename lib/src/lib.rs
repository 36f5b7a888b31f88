//! Two-dimensional cellular automata.
//!
//! An [`Automaton`] owns a fixed grid of [`Cell`]s, each holding a
//! [`State`]. Every [`step`](Automaton::step) computes the next state of every
//! cell from the current generation with a [`Rule`](rules::Rule), then
//! advances all cells at once and hands each of them to a
//! [`Renderer`](render::Renderer).

mod automaton;
mod cells;
mod config;
mod error;
mod grid;
mod options;
pub mod render;
pub mod rules;
mod states;
mod surface;
mod timer;

pub use automaton::Automaton;
pub use cells::{Cell, Coord};
pub use config::Config;
pub use error::{Error, ErrorKind};
pub use options::{InitialState, Options};
pub use states::{State, StateLike, Value};
pub use surface::Surface;
pub use timer::{Timer, DEFAULT_INTERVAL_MS};
