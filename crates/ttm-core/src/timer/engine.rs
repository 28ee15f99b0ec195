//! Interval scheduler implementation.
//!
//! The scheduler is a tick-driven state machine. It does not use internal
//! threads or clocks - the caller feeds it [`SchedulerEvent`]s in arrival
//! order and receives the resulting [`Event`]s.
//!
//! ## State Transitions
//!
//! ```text
//! Standby -> Running(P) -> AwaitingConfirmation(P) -> Running(next) -> ...
//!               |
//!               +-- interrupt --> Standby
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut scheduler = IntervalScheduler::new(SchedulerConfig::default());
//! scheduler.handle(SchedulerEvent::SelectPhase(Phase::TaskPeriod));
//! // Once per second:
//! let events = scheduler.handle(SchedulerEvent::Tick);
//! ```

use std::time::Duration;

use chrono::Utc;
use tracing::debug;

use super::phase::Phase;
use super::schedule::SchedulerConfig;
use crate::events::Event;

/// Amount of countdown consumed by one tick.
pub const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Standby,
    Running(Phase),
    /// Countdown hit zero; waiting on the yes/no prompt.
    AwaitingConfirmation(Phase),
}

/// Input to the scheduler. Every front-end action maps onto one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerEvent {
    SelectPhase(Phase),
    Interrupt,
    Tick,
    ConfirmationResult(bool),
}

/// Work/break state machine.
#[derive(Debug, Clone)]
pub struct IntervalScheduler {
    config: SchedulerConfig,
    state: SchedulerState,
    remaining: Duration,
    consecutive_successes: u32,
}

impl IntervalScheduler {
    /// Create a scheduler in `Standby`.
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            state: SchedulerState::Standby,
            remaining: Duration::ZERO,
            consecutive_successes: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Phase of the active or pending countdown, `None` in standby.
    pub fn phase(&self) -> Option<Phase> {
        match self.state {
            SchedulerState::Standby => None,
            SchedulerState::Running(p) | SchedulerState::AwaitingConfirmation(p) => Some(p),
        }
    }

    /// True while a countdown is active.
    pub fn is_running(&self) -> bool {
        matches!(self.state, SchedulerState::Running(_))
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn consecutive_successes(&self) -> u32 {
        self.consecutive_successes
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            phase: self.phase(),
            awaiting_confirmation: matches!(self.state, SchedulerState::AwaitingConfirmation(_)),
            remaining_secs: self.remaining.as_secs(),
            consecutive_successes: self.consecutive_successes,
            periods_before_long: self.config.periods_before_long(),
            running: self.is_running(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Single transition function. Inputs that are not valid in the
    /// current state are ignored and produce no events.
    pub fn handle(&mut self, event: SchedulerEvent) -> Vec<Event> {
        match (self.state, event) {
            (SchedulerState::Standby, SchedulerEvent::SelectPhase(phase)) => {
                vec![self.start(phase)]
            }
            (SchedulerState::Running(phase), SchedulerEvent::Interrupt) => {
                vec![self.interrupt(phase)]
            }
            (SchedulerState::Running(phase), SchedulerEvent::Tick) => self.tick(phase),
            (SchedulerState::AwaitingConfirmation(phase), SchedulerEvent::ConfirmationResult(yes)) => {
                self.confirm(phase, yes)
            }
            (state, event) => {
                debug!(?state, ?event, "ignoring scheduler input");
                Vec::new()
            }
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn start(&mut self, phase: Phase) -> Event {
        self.state = SchedulerState::Running(phase);
        self.remaining = self.config.duration(phase);
        debug!(%phase, secs = self.remaining.as_secs(), "countdown started");
        Event::PhaseStarted {
            phase,
            duration_secs: self.remaining.as_secs(),
            consecutive_successes: self.consecutive_successes,
            at: Utc::now(),
        }
    }

    fn interrupt(&mut self, phase: Phase) -> Event {
        let remaining_secs = self.remaining.as_secs();
        self.state = SchedulerState::Standby;
        self.remaining = Duration::ZERO;
        self.consecutive_successes = 0;
        debug!(%phase, remaining_secs, "countdown interrupted");
        Event::Interrupted {
            phase,
            remaining_secs,
            at: Utc::now(),
        }
    }

    fn tick(&mut self, phase: Phase) -> Vec<Event> {
        self.remaining = self.remaining.saturating_sub(TICK);
        let ticked = Event::CountdownTicked {
            phase,
            remaining_secs: self.remaining.as_secs(),
            at: Utc::now(),
        };
        if !self.remaining.is_zero() {
            return vec![ticked];
        }
        // Leaving Running guarantees the zero transition fires once.
        self.state = SchedulerState::AwaitingConfirmation(phase);
        debug!(%phase, "countdown reached zero");
        vec![
            ticked,
            Event::PhaseEnded {
                phase,
                at: Utc::now(),
            },
        ]
    }

    fn confirm(&mut self, phase: Phase, success: bool) -> Vec<Event> {
        let confirmed = Event::PhaseConfirmed {
            phase,
            success,
            at: Utc::now(),
        };
        let next = match phase {
            Phase::TaskPeriod if success => {
                self.consecutive_successes += 1;
                if self.consecutive_successes >= self.config.periods_before_long() {
                    self.consecutive_successes = 0;
                    Phase::LongBreak
                } else {
                    Phase::ShortBreak
                }
            }
            Phase::TaskPeriod => {
                self.consecutive_successes = 0;
                Phase::ShortBreak
            }
            // Breaks always lead back to work, whatever the answer.
            Phase::ShortBreak | Phase::LongBreak => Phase::TaskPeriod,
        };
        vec![confirmed, self.start(next)]
    }
}
