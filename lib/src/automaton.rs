//! The automaton.

use crate::{
    cells::Cell,
    error::Error,
    grid::Grid,
    options::{InitialState, Options},
    render::{NoRender, Renderer},
    rules::{Neighbourhood, Rule},
    states::{State, StateLike, Value},
    surface::{Binding, Surface},
    timer::{Timer, DEFAULT_INTERVAL_MS},
};
use educe::Educe;
use log::{debug, error, trace};
use std::{mem, time::Instant};

/// A two-dimensional cellular automaton.
///
/// The grid uses a zero-indexed coordinate system with the origin in the
/// top-left corner: `x` is the column, increasing from left to right, and
/// `y` is the row, increasing from top to bottom.
#[derive(Educe)]
#[educe(Debug)]
pub struct Automaton {
    grid: Grid,

    /// If set, every cell state must be one of these.
    ///
    /// Contains at least two states, and no two of them share a value.
    allowed_states: Option<Vec<State>>,

    #[educe(Debug(ignore))]
    rule: Box<dyn Rule>,

    #[educe(Debug(ignore))]
    renderer: Box<dyn Renderer>,

    /// Number of steps since construction or the last `set_state`.
    generation: u64,

    #[educe(Debug(ignore))]
    listeners: Vec<Box<dyn FnMut(u64)>>,

    timer: Timer,

    /// Keeps the target surface bound while the automaton lives.
    binding: Binding,
}

impl Automaton {
    /// Creates a new automaton on `surface`, with `rows` rows and
    /// `cols` columns.
    ///
    /// All arguments are validated before any cell is created. The renderer
    /// is then called once for every cell.
    ///
    /// Fails if the surface is already bound to another automaton.
    pub fn new<R: Rule + 'static>(
        surface: &Surface,
        rows: usize,
        cols: usize,
        rule: R,
        options: Options,
    ) -> Result<Self, Error> {
        if rows == 0 || cols == 0 {
            return Err(Error::NonPositiveDimension);
        }
        let max_cells = isize::MAX as usize / mem::size_of::<Cell>();
        if rows.checked_mul(cols).map_or(true, |n| n > max_cells) {
            return Err(Error::GridTooLarge(rows, cols));
        }
        let Options {
            renderer,
            initial_state,
            allowed_states,
            auto_step_interval_ms,
        } = options;
        if let Some(states) = &allowed_states {
            check_allowed_states(states)?;
        }
        let timer = Timer::new(auto_step_interval_ms.unwrap_or(DEFAULT_INTERVAL_MS))?;
        let states = resolve_all(allowed_states.as_deref(), rows, cols, initial_state)?;
        let binding = surface.bind()?;

        let mut automaton = Automaton {
            grid: Grid::new(rows, cols, states),
            allowed_states,
            rule: Box::new(rule),
            renderer: renderer.unwrap_or_else(|| Box::new(NoRender)),
            generation: 0,
            listeners: Vec::new(),
            timer,
            binding,
        };
        automaton.render_all();
        debug!(
            "Created a {}x{} automaton on surface {:?}",
            cols,
            rows,
            surface.name()
        );
        Ok(automaton)
    }

    /// The surface this automaton is bound to.
    pub fn surface(&self) -> &Surface {
        self.binding.surface()
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    /// `(cols, rows)`.
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.cols(), self.rows())
    }

    /// The allowed states, if the automaton has a restricted state set.
    pub fn allowed_states(&self) -> Option<&[State]> {
        self.allowed_states.as_deref()
    }

    /// Number of steps taken since construction or the last
    /// [`set_state`](Automaton::set_state).
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The cell at `(x, y)`.
    pub fn cell(&self, x: usize, y: usize) -> Result<&Cell, Error> {
        self.grid.cell((x, y))
    }

    /// Sets the pending state of the cell at `(x, y)` by hand.
    ///
    /// The state is resolved like any other: with an allowed state set, its
    /// value must be one of them. The next [`step`](Automaton::step)
    /// overwrites it.
    pub fn set_cell_next_state<S: Into<StateLike>>(
        &mut self,
        x: usize,
        y: usize,
        state: S,
    ) -> Result<&mut Self, Error> {
        let state = self.resolve(state)?;
        self.grid.cell_mut((x, y))?.set_next_state(Some(state));
        Ok(self)
    }

    /// Advances the cell at `(x, y)` to its pending state and renders it.
    ///
    /// Fails if no state is pending.
    pub fn advance_cell(&mut self, x: usize, y: usize) -> Result<&mut Self, Error> {
        let Automaton { grid, renderer, .. } = self;
        let cell = grid.cell_mut((x, y))?.advance()?;
        renderer.render(cell.coordinates(), cell.state());
        Ok(self)
    }

    /// The rule.
    pub fn rule_mut(&mut self) -> &mut dyn Rule {
        &mut *self.rule
    }

    /// The renderer.
    pub fn renderer_mut(&mut self) -> &mut dyn Renderer {
        &mut *self.renderer
    }

    /// The current state of the cell at `(x, y)`.
    pub fn cell_state(&self, x: usize, y: usize) -> Result<Option<&State>, Error> {
        Ok(self.cell(x, y)?.state())
    }

    /// All cells, column by column.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.grid.cells()
    }

    /// The eight neighbors of the cell at `(x, y)`, clockwise starting from
    /// the one directly above it. Neighbors outside the grid are `None`.
    pub fn cell_neighbours(&self, x: usize, y: usize) -> Result<[Option<&Cell>; 8], Error> {
        self.grid.neighbours((x, y))
    }

    /// The states of the eight neighbors of the cell at `(x, y)`, in the
    /// same order as [`cell_neighbours`](Automaton::cell_neighbours).
    ///
    /// An entry is `None` if the neighbor is outside the grid or has no state.
    pub fn cell_neighbour_states(&self, x: usize, y: usize) -> Result<Neighbourhood<'_>, Error> {
        self.grid.neighbour_states((x, y))
    }

    /// The first allowed state with the given value.
    ///
    /// `None` if there is no such state, or no allowed state set.
    pub fn state_from_value(&self, value: &Value) -> Option<&State> {
        state_from_value(self.allowed_states.as_deref()?, value)
    }

    /// Whether some allowed state has the same value as `state`.
    pub fn has_state<S: Into<StateLike>>(&self, state: S) -> bool {
        self.state_from_value(state.into().value()).is_some()
    }

    /// Turns anything state-like into a state this automaton accepts.
    ///
    /// With an allowed state set, the value is looked up there. Without one,
    /// a state is taken as is, and a raw value becomes a state labelled
    /// with the value itself.
    pub fn resolve<S: Into<StateLike>>(&self, state: S) -> Result<State, Error> {
        resolve(self.allowed_states.as_deref(), state.into())
    }

    /// Sets the states of all cells, re-renders them and resets the
    /// generation counter.
    ///
    /// Nothing changes if the new states are invalid.
    /// [`InitialState::Empty`] is rejected: cells cannot go back to having
    /// no state.
    pub fn set_state<S: Into<InitialState>>(&mut self, state: S) -> Result<&mut Self, Error> {
        let state = state.into();
        if let InitialState::Empty = state {
            return Err(Error::MissingState);
        }
        let states = resolve_all(
            self.allowed_states.as_deref(),
            self.rows(),
            self.cols(),
            state,
        )?;
        for (cell, state) in self.grid.cells_mut().zip(states) {
            cell.set_next_state(state);
            cell.advance()?;
        }
        self.render_all();
        self.generation = 0;
        debug!("State set, generation reset to 0");
        self.generation_change();
        Ok(self)
    }

    /// Steps the automaton forward by one generation.
    ///
    /// First computes the next state of every cell from the current states,
    /// then advances and re-renders every cell. If the rule returns a value
    /// that cannot be resolved, nothing changes.
    pub fn step(&mut self) -> Result<&mut Self, Error> {
        let Automaton {
            grid,
            allowed_states,
            rule,
            ..
        } = self;
        let mut next_states = Vec::with_capacity(grid.len());
        for cell in grid.cells() {
            let neighbours = grid.neighbour_states(cell.coordinates())?;
            let next_state = rule.step(cell.state(), &neighbours);
            next_states.push(resolve(allowed_states.as_deref(), next_state)?);
        }

        let Automaton { grid, renderer, .. } = self;
        for (cell, next_state) in grid.cells_mut().zip(next_states) {
            cell.set_next_state(Some(next_state));
            cell.advance()?;
            renderer.render(cell.coordinates(), cell.state());
        }

        self.generation += 1;
        trace!("Generation {}", self.generation);
        self.generation_change();
        Ok(self)
    }

    /// Registers a listener called after every [`step`](Automaton::step) and
    /// [`set_state`](Automaton::set_state) with the new generation number.
    pub fn on_generation_change<F: FnMut(u64) + 'static>(&mut self, listener: F) -> &mut Self {
        self.listeners.push(Box::new(listener));
        self
    }

    /// Calls all generation change listeners, in registration order.
    pub fn generation_change(&mut self) -> &mut Self {
        let generation = self.generation;
        for listener in self.listeners.iter_mut() {
            listener(generation);
        }
        self
    }

    /// Calls the renderer for every cell.
    pub fn render_all(&mut self) -> &mut Self {
        let Automaton { grid, renderer, .. } = self;
        for cell in grid.cells() {
            renderer.render(cell.coordinates(), cell.state());
        }
        self
    }

    /// A handle to the auto-step timer.
    ///
    /// Listeners can capture it to stop the automaton from a callback.
    pub fn timer(&self) -> Timer {
        self.timer.clone()
    }

    /// The delay between automatic steps, in milliseconds.
    pub fn auto_step_interval_ms(&self) -> u64 {
        self.timer.interval_ms()
    }

    /// Sets the delay between automatic steps. Must be positive.
    pub fn set_auto_step_interval_ms(&mut self, interval_ms: u64) -> Result<u64, Error> {
        self.timer.set_interval_ms(interval_ms)
    }

    /// Whether the automaton is stepping automatically.
    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    /// When the next automatic step is due.
    pub fn next_tick(&self) -> Option<Instant> {
        self.timer.next_tick()
    }

    /// Starts stepping automatically.
    ///
    /// Does nothing if already running. Otherwise sets the interval if one
    /// is given, steps once right away, and schedules the next step one
    /// interval later. The host must then call [`tick`](Automaton::tick)
    /// when [`next_tick`](Automaton::next_tick) is reached.
    pub fn start(&mut self, interval_ms: Option<u64>) -> Result<&mut Self, Error> {
        if self.timer.is_running() {
            return Ok(self);
        }
        if let Some(interval_ms) = interval_ms {
            self.timer.set_interval_ms(interval_ms)?;
        }
        debug!(
            "Starting auto-step every {} ms",
            self.timer.interval_ms()
        );
        self.timer.schedule(Instant::now());
        let timer = self.timer.clone();
        self.step().map_err(|e| {
            timer.stop();
            e
        })?;
        Ok(self)
    }

    /// Stops stepping automatically. Does nothing if not running.
    pub fn stop(&mut self) -> &mut Self {
        if self.timer.is_running() {
            debug!("Stopping auto-step at generation {}", self.generation);
        }
        self.timer.stop();
        self
    }

    /// Runs the scheduled automatic step if it is due at `now`.
    ///
    /// Returns whether a step was taken. The next step is scheduled one
    /// interval after `now`, using the interval as it is at this moment.
    ///
    /// If the step fails, the timer is stopped and the error returned.
    pub fn tick(&mut self, now: Instant) -> Result<bool, Error> {
        if !self.timer.is_due(now) {
            return Ok(false);
        }
        self.timer.schedule(now);
        let result = self.step().map(|_| ());
        match result {
            Ok(()) => Ok(true),
            Err(e) => {
                error!("Auto-step failed at generation {}: {}", self.generation, e);
                self.timer.stop();
                Err(e)
            }
        }
    }
}

/// Checks that there are at least two allowed states and no two share a value.
fn check_allowed_states(states: &[State]) -> Result<(), Error> {
    if states.len() < 2 {
        return Err(Error::TooFewStates(states.len()));
    }
    for (i, state) in states.iter().enumerate() {
        if states[..i].iter().any(|s| s.value() == state.value()) {
            return Err(Error::DuplicateState(state.value().clone()));
        }
    }
    Ok(())
}

fn state_from_value<'a>(allowed_states: &'a [State], value: &Value) -> Option<&'a State> {
    allowed_states.iter().find(|s| s.value() == value)
}

fn resolve(allowed_states: Option<&[State]>, state: StateLike) -> Result<State, Error> {
    match allowed_states {
        Some(allowed_states) => state_from_value(allowed_states, state.value())
            .cloned()
            .ok_or_else(|| Error::UnknownValue(state.value().clone())),
        None => match state {
            StateLike::State(state) => Ok(state),
            StateLike::Value(value) => {
                let label = value.to_string();
                State::new(value, label)
            }
        },
    }
}

/// Resolves an initial state into one state per cell, column by column.
fn resolve_all(
    allowed_states: Option<&[State]>,
    rows: usize,
    cols: usize,
    initial_state: InitialState,
) -> Result<Vec<Option<State>>, Error> {
    match initial_state {
        InitialState::Empty => Ok(vec![None; rows * cols]),
        InitialState::Uniform(state) => {
            let state = resolve(allowed_states, state)?;
            Ok(vec![Some(state); rows * cols])
        }
        InitialState::Grid(columns) => {
            if columns.len() != cols || columns.iter().any(|column| column.len() != rows) {
                return Err(Error::InitialStateShape);
            }
            columns
                .into_iter()
                .flatten()
                .map(|state| resolve(allowed_states, state).map(Some))
                .collect()
        }
        InitialState::Generator(mut f) => (0..cols)
            .flat_map(|x| (0..rows).map(move |y| (x, y)))
            .map(|(x, y)| resolve(allowed_states, f(x, y)).map(Some))
            .collect(),
    }
}

impl Drop for Automaton {
    fn drop(&mut self) {
        self.timer.stop();
    }
}
