//! Construction options and initial states.

use crate::{
    cells::Coord,
    render::{self, Renderer},
    states::{State, StateLike, Value},
};
use educe::Educe;
use rand::{seq::SliceRandom, Rng};

/// How to set the states of all cells at once.
///
/// Used when constructing an automaton and by
/// [`Automaton::set_state`](crate::Automaton::set_state).
#[derive(Educe)]
#[educe(Debug)]
pub enum InitialState {
    /// Every cell has no state.
    Empty,

    /// Every cell gets the same state.
    Uniform(StateLike),

    /// One state per cell, indexed `[x][y]`.
    ///
    /// The outer vector must have one entry per column,
    /// each inner vector one entry per row.
    Grid(Vec<Vec<StateLike>>),

    /// Called once per cell with its coordinates `(x, y)`.
    Generator(#[educe(Debug(ignore))] Box<dyn FnMut(usize, usize) -> StateLike>),
}

impl Default for InitialState {
    fn default() -> Self {
        InitialState::Empty
    }
}

impl InitialState {
    /// Builds a [`Generator`](InitialState::Generator) from a closure.
    pub fn generator<F, S>(mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> S + 'static,
        S: Into<StateLike>,
    {
        InitialState::Generator(Box::new(move |x, y| f(x, y).into()))
    }

    /// A random soup.
    ///
    /// Each cell gets the first state with probability `1 - density`,
    /// and otherwise one of the remaining states, uniformly.
    pub fn random(states: Vec<State>, density: f64) -> Self {
        Self::random_with_rng(states, density, rand::thread_rng())
    }

    /// A random soup using the given random number generator.
    ///
    /// See [`random`](InitialState::random).
    pub fn random_with_rng<R: Rng + 'static>(states: Vec<State>, density: f64, mut rng: R) -> Self {
        let density = if density.is_nan() {
            0.0
        } else {
            density.clamp(0.0, 1.0)
        };
        match states.split_first() {
            None => InitialState::Empty,
            Some((background, [])) => InitialState::Uniform(background.into()),
            Some((background, rest)) => {
                let background = background.clone();
                let rest = rest.to_vec();
                InitialState::generator(move |_, _| {
                    if rng.gen_bool(density) {
                        rest.choose(&mut rng).unwrap_or(&background).clone()
                    } else {
                        background.clone()
                    }
                })
            }
        }
    }
}

impl From<StateLike> for InitialState {
    fn from(state: StateLike) -> Self {
        InitialState::Uniform(state)
    }
}

impl From<State> for InitialState {
    fn from(state: State) -> Self {
        InitialState::Uniform(state.into())
    }
}

impl From<Value> for InitialState {
    fn from(value: Value) -> Self {
        InitialState::Uniform(value.into())
    }
}

macro_rules! initial_state_from_primitive {
    ($($t:ty),*) => {
        $(
            impl From<$t> for InitialState {
                fn from(v: $t) -> Self {
                    InitialState::Uniform(v.into())
                }
            }
        )*
    };
}

initial_state_from_primitive!(bool, f64, i8, i16, i32, u8, u16, u32, f32, &str, String);

impl<S: Into<StateLike>> From<Vec<Vec<S>>> for InitialState {
    fn from(columns: Vec<Vec<S>>) -> Self {
        InitialState::Grid(
            columns
                .into_iter()
                .map(|column| column.into_iter().map(Into::into).collect())
                .collect(),
        )
    }
}

/// Optional settings for [`Automaton::new`](crate::Automaton::new).
#[derive(Educe, Default)]
#[educe(Debug)]
pub struct Options {
    #[educe(Debug(ignore))]
    pub(crate) renderer: Option<Box<dyn Renderer>>,
    pub(crate) initial_state: InitialState,
    pub(crate) allowed_states: Option<Vec<State>>,
    pub(crate) auto_step_interval_ms: Option<u64>,
}

impl Options {
    /// Sets the renderer. Defaults to [`NoRender`](crate::render::NoRender).
    pub fn render<R: Renderer + 'static>(mut self, renderer: R) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    /// Sets a closure as the renderer.
    pub fn render_fn<F>(self, f: F) -> Self
    where
        F: FnMut(Coord, Option<&State>) + 'static,
    {
        self.render(render::from_fn(f))
    }

    /// Sets the initial state. By default every cell starts with no state.
    pub fn initial_state<S: Into<InitialState>>(mut self, initial_state: S) -> Self {
        self.initial_state = initial_state.into();
        self
    }

    /// Restricts cell states to the given set.
    ///
    /// At least two states with distinct values are required.
    pub fn allowed_states<I: IntoIterator<Item = State>>(mut self, states: I) -> Self {
        self.allowed_states = Some(states.into_iter().collect());
        self
    }

    /// Sets the delay between automatic steps. Defaults to 500 ms.
    pub fn auto_step_interval_ms(mut self, interval_ms: u64) -> Self {
        self.auto_step_interval_ms = Some(interval_ms);
        self
    }
}
