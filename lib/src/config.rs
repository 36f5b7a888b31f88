//! Automaton configuration.

use crate::{
    automaton::Automaton,
    error::Error,
    options::{InitialState, Options},
    render::Renderer,
    rules::{self, Rule},
    states::State,
    surface::Surface,
};
use educe::Educe;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Automaton configuration.
///
/// A plain description of an automaton running a rule given by a rule string,
/// starting from a random soup. The automaton will be generated from this
/// configuration.
#[derive(Clone, Debug, Educe, PartialEq)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Number of rows.
    #[educe(Default = 16)]
    pub rows: usize,

    /// Number of columns.
    #[educe(Default = 16)]
    pub cols: usize,

    /// The rule string of the cellular automaton.
    ///
    /// Life-like rules such as `B3/S23`, or Generations rules such as
    /// `B2/S/C3`.
    #[educe(Default = "B3/S23")]
    pub rule_string: String,

    /// The allowed states.
    ///
    /// `None` means the states of the rule: see [`Life::states`](rules::Life::states)
    /// and [`LifeGen::states`](rules::LifeGen::states).
    pub allowed_states: Option<Vec<State>>,

    /// Probability for a cell of the initial soup not to be in the first state.
    #[educe(Default = 0.5)]
    pub density: f64,

    /// The delay between automatic steps, in milliseconds.
    #[educe(Default = 500)]
    pub auto_step_interval_ms: u64,
}

impl Config {
    /// Sets up a new configuration with given size.
    pub fn new(rows: usize, cols: usize) -> Self {
        Config {
            rows,
            cols,
            ..Config::default()
        }
    }

    /// Sets the rule string.
    pub fn set_rule_string<S: ToString>(mut self, rule_string: S) -> Self {
        self.rule_string = rule_string.to_string();
        self
    }

    /// Sets the allowed states.
    pub fn set_allowed_states<T: Into<Option<Vec<State>>>>(mut self, allowed_states: T) -> Self {
        self.allowed_states = allowed_states.into();
        self
    }

    /// Sets the density of the initial soup.
    pub fn set_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    /// Sets the delay between automatic steps.
    pub fn set_auto_step_interval_ms(mut self, auto_step_interval_ms: u64) -> Self {
        self.auto_step_interval_ms = auto_step_interval_ms;
        self
    }

    /// Parses the rule string.
    pub fn rule(&self) -> Result<Box<dyn Rule>, Error> {
        rules::parse_rule(&self.rule_string)
    }

    /// The states the automaton will use.
    pub fn states(&self) -> Result<Vec<State>, Error> {
        match &self.allowed_states {
            Some(states) => Ok(states.clone()),
            None => rules::rule_states(&self.rule_string),
        }
    }

    /// A new random soup for this configuration.
    pub fn soup(&self) -> Result<InitialState, Error> {
        Ok(InitialState::random(self.states()?, self.density))
    }

    /// Checks that every state the rule can produce is allowed.
    fn check_states(&self, states: &[State]) -> Result<(), Error> {
        for state in rules::rule_states(&self.rule_string)? {
            if !states.iter().any(|s| s.value() == state.value()) {
                return Err(Error::UnknownValue(state.value().clone()));
            }
        }
        Ok(())
    }

    /// Creates a new automaton from the configuration, bound to `surface`.
    ///
    /// Returns an error if the rule string is invalid, or if the allowed
    /// states do not cover the states of the rule.
    pub fn automaton<R: Renderer + 'static>(
        &self,
        surface: &Surface,
        renderer: R,
    ) -> Result<Automaton, Error> {
        let rule = self.rule()?;
        let states = self.states()?;
        self.check_states(&states)?;
        let options = Options::default()
            .render(renderer)
            .initial_state(InitialState::random(states.clone(), self.density))
            .allowed_states(states)
            .auto_step_interval_ms(self.auto_step_interval_ms);
        Automaton::new(surface, self.rows, self.cols, rule, options)
    }
}
