//! The auto-step timer.
//!
//! The engine runs on the host's event loop, so the timer is only a deadline:
//! the host waits until [`Timer::next_tick`] and then calls
//! [`Automaton::tick`](crate::Automaton::tick).

use crate::error::Error;
use std::{
    cell::Cell,
    rc::Rc,
    time::{Duration, Instant},
};

/// Default delay between two automatic steps, in milliseconds.
pub const DEFAULT_INTERVAL_MS: u64 = 500;

#[derive(Debug)]
struct TimerInner {
    interval_ms: Cell<u64>,
    deadline: Cell<Option<Instant>>,
}

/// A handle to the auto-step timer of an automaton.
///
/// Clones share the same timer, so a handle captured by a
/// generation change listener can stop the automaton that called it.
#[derive(Clone, Debug)]
pub struct Timer {
    inner: Rc<TimerInner>,
}

impl Timer {
    pub(crate) fn new(interval_ms: u64) -> Result<Self, Error> {
        let timer = Timer {
            inner: Rc::new(TimerInner {
                interval_ms: Cell::new(DEFAULT_INTERVAL_MS),
                deadline: Cell::new(None),
            }),
        };
        timer.set_interval_ms(interval_ms)?;
        Ok(timer)
    }

    /// The delay between two automatic steps, in milliseconds.
    pub fn interval_ms(&self) -> u64 {
        self.inner.interval_ms.get()
    }

    /// Sets the delay between two automatic steps.
    ///
    /// A running timer picks up the new value when it schedules its next tick.
    pub fn set_interval_ms(&self, interval_ms: u64) -> Result<u64, Error> {
        if interval_ms == 0 {
            return Err(Error::NonPositiveInterval);
        }
        self.inner.interval_ms.set(interval_ms);
        Ok(interval_ms)
    }

    /// Whether a tick is scheduled.
    pub fn is_running(&self) -> bool {
        self.inner.deadline.get().is_some()
    }

    /// When the next tick is due, if the timer is running.
    pub fn next_tick(&self) -> Option<Instant> {
        self.inner.deadline.get()
    }

    /// Cancels the pending tick. Does nothing if the timer is not running.
    pub fn stop(&self) {
        self.inner.deadline.set(None);
    }

    /// Schedules the next tick one interval after `from`.
    pub(crate) fn schedule(&self, from: Instant) {
        let interval = Duration::from_millis(self.interval_ms());
        self.inner.deadline.set(Some(from + interval));
    }

    /// Whether the timer is running and its deadline has passed.
    pub(crate) fn is_due(&self, now: Instant) -> bool {
        self.inner
            .deadline
            .get()
            .map_or(false, |deadline| deadline <= now)
    }
}
