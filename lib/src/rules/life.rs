//! Totalistic Life-like rules.

use super::{count_alive, Neighbourhood, Rule};
use crate::{
    error::Error,
    states::{State, StateLike, Value},
};
use ca_rules::ParseLife;
use std::str::FromStr;

/// Totalistic Life-like rules, such as `B3/S23`.
///
/// Works with two states: [`Life::dead`] (value `false`) and
/// [`Life::alive`] (value `true`). Neighbors outside the grid,
/// or without a state, count as dead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Life {
    /// `b[n]`: whether a dead cell with `n` living neighbors is born.
    b: [bool; 9],
    /// `s[n]`: whether a living cell with `n` living neighbors survives.
    s: [bool; 9],
}

impl Life {
    /// Constructs a new rule from the `b` and `s` data.
    pub fn new(b: Vec<u8>, s: Vec<u8>) -> Self {
        let mut rule = Life {
            b: [false; 9],
            s: [false; 9],
        };
        for n in b.into_iter().filter(|&n| n <= 8) {
            rule.b[n as usize] = true;
        }
        for n in s.into_iter().filter(|&n| n <= 8) {
            rule.s[n as usize] = true;
        }
        rule
    }

    /// The Dead state.
    pub fn dead() -> State {
        State::known(false, "Dead")
    }

    /// The Alive state.
    pub fn alive() -> State {
        State::known(true, "Alive")
    }

    /// Dead and Alive, in that order.
    pub fn states() -> Vec<State> {
        vec![Self::dead(), Self::alive()]
    }

    /// Whether the rule contains `B0`.
    pub fn has_b0(&self) -> bool {
        self.b[0]
    }
}

/// A parser for the rule.
impl ParseLife for Life {
    fn from_bs(b: Vec<u8>, s: Vec<u8>) -> Self {
        Self::new(b, s)
    }
}

impl FromStr for Life {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let rule: Life = ParseLife::parse_rule(input)?;
        Ok(rule)
    }
}

impl Rule for Life {
    fn step(&mut self, state: Option<&State>, neighbours: &Neighbourhood<'_>) -> StateLike {
        let alive = Value::Bool(true);
        let count = count_alive(neighbours, &alive) as usize;
        let next = match state {
            Some(state) if state.value() == &alive => self.s[count],
            _ => self.b[count],
        };
        Value::Bool(next).into()
    }
}
