//! Session: one scheduler, one statistics store, one event loop.
//!
//! Front ends implement [`InputSource`] (ticks and button presses, in
//! arrival order) and [`ConfirmationPrompt`] (the yes/no question asked when
//! a countdown ends). Both are plain traits so tests can script them.

use std::path::Path;

use chrono::Utc;
use tracing::{debug, warn};

use crate::error::Result;
use crate::events::Event;
use crate::storage::{Config, StatisticsStore};
use crate::timer::{IntervalScheduler, Phase, SchedulerEvent};

/// Source of scheduler input. `None` ends the session.
pub trait InputSource {
    fn next_event(&mut self) -> Option<SchedulerEvent>;
}

/// Blocking yes/no prompt shown when a countdown reaches zero.
///
/// Returns `Some(true)` if the user counts the phase as completed,
/// `Some(false)` if not, and `None` if the prompt was left without an
/// answer. An unanswered prompt ends the session and records nothing.
pub trait ConfirmationPrompt {
    fn confirm(&mut self, phase: Phase) -> Option<bool>;
}

pub struct Session {
    scheduler: IntervalScheduler,
    store: StatisticsStore,
}

impl Session {
    pub fn new(scheduler: IntervalScheduler, store: StatisticsStore) -> Self {
        Self { scheduler, store }
    }

    /// Build a session from a loaded config.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the timer settings are invalid.
    pub fn open(config: &Config, config_path: &Path) -> Result<Self> {
        let scheduler = IntervalScheduler::new(config.scheduler_config()?);
        let store = StatisticsStore::load(config.track_path(config_path));
        Ok(Self::new(scheduler, store))
    }

    pub fn scheduler(&self) -> &IntervalScheduler {
        &self.scheduler
    }

    pub fn store(&self) -> &StatisticsStore {
        &self.store
    }

    /// Feed one input to the scheduler and record the statistics its
    /// events imply.
    ///
    /// A failed write does not stop the session: the counter stays
    /// incremented in memory and a `StatsPersistFailed` event is appended.
    pub fn dispatch(&mut self, input: SchedulerEvent) -> Vec<Event> {
        let mut events = self.scheduler.handle(input);
        let fields: Vec<_> = events.iter().filter_map(Event::stat_field).collect();
        for field in fields {
            debug!(%field, "recording statistic");
            if let Err(e) = self.store.increment(field) {
                warn!(%field, error = %e, "statistics not persisted");
                events.push(Event::StatsPersistFailed {
                    field,
                    message: e.to_string(),
                    at: Utc::now(),
                });
            }
        }
        events
    }

    /// Dispatch `input`, then resolve any confirmation it triggers.
    ///
    /// Events are passed to `observe` in order; the prompt is shown only
    /// after the `PhaseEnded` event has been observed.
    ///
    /// Returns `false` if the prompt went unanswered. The scheduler is then
    /// left awaiting confirmation and the session should stop.
    pub fn step<P, F>(&mut self, input: SchedulerEvent, prompt: &mut P, mut observe: F) -> bool
    where
        P: ConfirmationPrompt + ?Sized,
        F: FnMut(&Event),
    {
        let events = self.dispatch(input);
        let pending = events.iter().find_map(Event::awaiting_confirmation);
        events.iter().for_each(&mut observe);

        let Some(phase) = pending else {
            return true;
        };
        match prompt.confirm(phase) {
            Some(answer) => {
                self.dispatch(SchedulerEvent::ConfirmationResult(answer))
                    .iter()
                    .for_each(&mut observe);
                true
            }
            None => {
                debug!(%phase, "confirmation left unanswered, nothing recorded");
                false
            }
        }
    }

    /// Process input until the source is exhausted or a prompt goes
    /// unanswered.
    pub fn run<S, F>(&mut self, shell: &mut S, mut observe: F)
    where
        S: InputSource + ConfirmationPrompt,
        F: FnMut(&Event),
    {
        while let Some(input) = shell.next_event() {
            if !self.step(input, shell, &mut observe) {
                break;
            }
        }
        debug!("session finished");
    }
}
