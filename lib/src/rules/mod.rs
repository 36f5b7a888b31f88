//! Cellular automata rules.
//!
//! A rule computes the next state of a cell from its current state and the
//! states of its eight neighbors. Any closure with the right shape can be
//! turned into a rule with [`from_fn`]; [`Life`] and [`LifeGen`] implement
//! the usual Life-like and Generations rules.
//!
//! For the notations of rule strings, please see
//! [this article on LifeWiki](https://conwaylife.com/wiki/Rulestring).

mod generations;
mod life;

use crate::{
    error::Error,
    states::{State, StateLike, Value},
};
use educe::Educe;
pub use generations::LifeGen;
pub use life::Life;

/// The states of the eight neighbors of a cell.
///
/// Starts with the neighbor directly above the cell ("12 o'clock") and goes
/// clockwise: up, up-right, right, down-right, down, down-left, left, up-left.
///
/// `None` means that the neighbor is outside the grid, or has no state.
pub type Neighbourhood<'a> = [Option<&'a State>; 8];

/// Offsets `(dx, dy)` of the eight neighbors, in [`Neighbourhood`] order.
pub(crate) const NBHD: [(isize, isize); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// A cellular automaton rule.
pub trait Rule {
    /// Computes the next state of a cell.
    ///
    /// `state` is the current state of the cell, `None` if it has none.
    fn step(&mut self, state: Option<&State>, neighbours: &Neighbourhood<'_>) -> StateLike;
}

impl<R: Rule + ?Sized> Rule for Box<R> {
    fn step(&mut self, state: Option<&State>, neighbours: &Neighbourhood<'_>) -> StateLike {
        (**self).step(state, neighbours)
    }
}

/// A rule defined by a closure. See [`from_fn`].
#[derive(Educe)]
#[educe(Debug)]
pub struct FnRule<F> {
    #[educe(Debug(ignore))]
    f: F,
}

/// Turns a closure into a [`Rule`].
///
/// The closure may return anything convertible to a [`StateLike`]:
/// a [`State`], or a raw value which the automaton looks up among its
/// allowed states.
///
/// ```
/// use cagrid_lib::{rules, State};
///
/// let same = rules::from_fn(|state: Option<&State>, _| state.unwrap().clone());
/// ```
pub fn from_fn<F, S>(f: F) -> FnRule<F>
where
    F: FnMut(Option<&State>, &Neighbourhood<'_>) -> S,
    S: Into<StateLike>,
{
    FnRule { f }
}

impl<F, S> Rule for FnRule<F>
where
    F: FnMut(Option<&State>, &Neighbourhood<'_>) -> S,
    S: Into<StateLike>,
{
    fn step(&mut self, state: Option<&State>, neighbours: &Neighbourhood<'_>) -> StateLike {
        (self.f)(state, neighbours).into()
    }
}

/// Counts the neighbors whose value is `alive`.
pub(crate) fn count_alive(neighbours: &Neighbourhood<'_>, alive: &Value) -> u8 {
    neighbours
        .iter()
        .filter(|n| n.map_or(false, |s| s.value() == alive))
        .count() as u8
}

/// Parses a rule string.
///
/// Tries a Life-like rule first, then a Generations rule.
pub fn parse_rule(input: &str) -> Result<Box<dyn Rule>, Error> {
    if let Ok(rule) = input.parse::<Life>() {
        Ok(Box::new(rule))
    } else {
        let rule = input.parse::<LifeGen>()?;
        Ok(Box::new(rule))
    }
}

/// The states a parsed rule string works with.
pub fn rule_states(input: &str) -> Result<Vec<State>, Error> {
    if input.parse::<Life>().is_ok() {
        Ok(Life::states())
    } else {
        Ok(input.parse::<LifeGen>()?.states())
    }
}
