//! Generations rules.

use super::{count_alive, Neighbourhood, Rule};
use crate::{
    error::Error,
    states::{State, StateLike, Value},
};
use ca_rules::ParseLifeGen;
use std::str::FromStr;

/// Totalistic Life-like Generations rules, such as `B2/S/C3`.
///
/// States are numbered: `0` is dead, `1` is alive, and every number from `2`
/// up to `gen - 1` is a dying state. Only living cells count as
/// living neighbors. Anything that is not a known number counts as dead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LifeGen {
    b: [bool; 9],
    s: [bool; 9],
    /// Number of states.
    gen: usize,
}

impl LifeGen {
    /// Constructs a new rule from the `b` and `s` data
    /// and the number of states.
    pub fn new(b: Vec<u8>, s: Vec<u8>, gen: usize) -> Self {
        let mut rule = LifeGen {
            b: [false; 9],
            s: [false; 9],
            gen: gen.max(2),
        };
        for n in b.into_iter().filter(|&n| n <= 8) {
            rule.b[n as usize] = true;
        }
        for n in s.into_iter().filter(|&n| n <= 8) {
            rule.s[n as usize] = true;
        }
        rule
    }

    /// The number of states.
    pub fn gen(&self) -> usize {
        self.gen
    }

    /// All the states of the rule, dead first.
    pub fn states(&self) -> Vec<State> {
        (0..self.gen)
            .map(|i| match i {
                0 => State::known(0, "Dead"),
                1 => State::known(1, "Alive"),
                i => State::known(i as u32, &format!("Dying {}", i - 1)),
            })
            .collect()
    }

    /// The number of the state, `0` if it is not one of ours.
    fn index(&self, state: Option<&State>) -> usize {
        match state.map(State::value) {
            Some(&Value::Number(n)) if n >= 0.0 && n.fract() == 0.0 && (n as usize) < self.gen => {
                n as usize
            }
            _ => 0,
        }
    }
}

/// A parser for the rule.
impl ParseLifeGen for LifeGen {
    fn from_bsg(b: Vec<u8>, s: Vec<u8>, gen: usize) -> Self {
        Self::new(b, s, gen)
    }
}

impl FromStr for LifeGen {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let rule: LifeGen = ParseLifeGen::parse_rule(input)?;
        Ok(rule)
    }
}

impl Rule for LifeGen {
    fn step(&mut self, state: Option<&State>, neighbours: &Neighbourhood<'_>) -> StateLike {
        let count = count_alive(neighbours, &Value::Number(1.0)) as usize;
        let next = match self.index(state) {
            0 => self.b[count] as usize,
            1 if self.s[count] => 1,
            i => (i + 1) % self.gen,
        };
        Value::Number(next as f64).into()
    }
}
