//! All kinds of errors in this crate.

use crate::{cells::Coord, states::Value};
use ca_rules::ParseRuleError;
use displaydoc::Display;
use thiserror::Error;

/// All kinds of errors in this crate.
#[derive(Clone, Debug, PartialEq, Display, Error)]
pub enum Error {
    /// The label of a state must be a non-empty string.
    EmptyLabel,
    /// Rows / columns should be positive.
    NonPositiveDimension,
    /// A grid with {0} rows and {1} columns is too large.
    GridTooLarge(usize, usize),
    /// The auto-step interval should be a positive number of milliseconds.
    NonPositiveInterval,
    /// At least 2 allowed states are required, got {0}.
    TooFewStates(usize),
    /// Allowed states contain more than one state with value {0}.
    DuplicateState(Value),
    /// A new state is required for every cell.
    MissingState,
    /// Initial state array has invalid dimensions.
    InitialStateShape,
    /// No allowed state has value {0}.
    UnknownValue(Value),
    /// Invalid rule: {0:?}.
    ParseRule(#[from] ParseRuleError),
    /// Cannot advance the cell at {0:?} while there is no next state defined.
    NoNextState(Coord),
    /// Surface {0:?} is already bound to another automaton.
    SurfaceBound(String),
    /// Cell coordinates {0:?} are out of range.
    OutOfRange(Coord),
}

/// The three families of errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input: wrong shape, wrong value, bad state set.
    InvalidArgument,
    /// The operation is not allowed in the current state of the object.
    IllegalState,
    /// Well-formed coordinates that fall outside the grid.
    Range,
}

impl Error {
    /// Which family the error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NoNextState(_) | Error::SurfaceBound(_) => ErrorKind::IllegalState,
            Error::OutOfRange(_) => ErrorKind::Range,
            _ => ErrorKind::InvalidArgument,
        }
    }
}
