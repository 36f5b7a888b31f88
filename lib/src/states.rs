//! Cell states.

use crate::error::Error;
use from_variants::FromVariants;
use std::fmt::{self, Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The primitive value carried by a [`State`].
///
/// Comparison is strict: `Number(1.0)` never equals `String("1")`
/// or `Bool(true)`, and `NaN` never equals itself.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    Bool(bool),
    Number(f64),
    String(String),
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

macro_rules! value_from_lossless {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Number(n.into())
                }
            }
        )*
    };
}

value_from_lossless!(i8, i16, i32, u8, u16, u32, f32);

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

/// One discrete condition a cell may hold: a value with a human readable label.
///
/// States are immutable once constructed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct State {
    value: Value,
    label: String,
}

impl State {
    /// Creates a new state. The label must not be empty.
    pub fn new<V: Into<Value>, L: Into<String>>(value: V, label: L) -> Result<Self, Error> {
        let label = label.into();
        if label.is_empty() {
            return Err(Error::EmptyLabel);
        }
        Ok(State {
            value: value.into(),
            label,
        })
    }

    /// Creates a state whose label is known to be non-empty.
    pub(crate) fn known<V: Into<Value>>(value: V, label: &str) -> Self {
        debug_assert!(!label.is_empty());
        State {
            value: value.into(),
            label: label.to_owned(),
        }
    }

    /// The underlying value.
    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The label.
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether `other` is a state with the same value and label.
    ///
    /// `None` never equals anything.
    #[inline]
    pub fn equals(&self, other: Option<&State>) -> bool {
        other.map_or(false, |other| self == other)
    }
}

/// `"<label> (<value>)"`.
impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.value)
    }
}

/// Anything that can be turned into a cell state:
/// either a full [`State`], or a raw [`Value`] to be looked up
/// among the allowed states of an automaton.
#[derive(Clone, Debug, PartialEq, FromVariants)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum StateLike {
    State(State),
    Value(Value),
}

impl StateLike {
    /// The value, whichever variant this is.
    pub fn value(&self) -> &Value {
        match self {
            StateLike::State(state) => state.value(),
            StateLike::Value(value) => value,
        }
    }
}

impl From<&State> for StateLike {
    fn from(state: &State) -> Self {
        StateLike::State(state.clone())
    }
}

macro_rules! state_like_from_primitive {
    ($($t:ty),*) => {
        $(
            impl From<$t> for StateLike {
                fn from(v: $t) -> Self {
                    StateLike::Value(v.into())
                }
            }
        )*
    };
}

state_like_from_primitive!(bool, f64, i8, i16, i32, u8, u16, u32, f32, &str, String);
