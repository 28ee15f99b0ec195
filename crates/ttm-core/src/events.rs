use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::StatField;
use crate::timer::Phase;

/// Every scheduler transition produces one or more Events.
/// Front ends render them; the session turns them into statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    PhaseStarted {
        phase: Phase,
        duration_secs: u64,
        consecutive_successes: u32,
        at: DateTime<Utc>,
    },
    CountdownTicked {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// Countdown reached zero. The front end must ask the user whether the
    /// phase counts as completed.
    PhaseEnded {
        phase: Phase,
        at: DateTime<Utc>,
    },
    PhaseConfirmed {
        phase: Phase,
        success: bool,
        at: DateTime<Utc>,
    },
    Interrupted {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// A statistics update stayed in memory but could not be written.
    StatsPersistFailed {
        field: StatField,
        message: String,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        /// `None` in standby.
        phase: Option<Phase>,
        awaiting_confirmation: bool,
        remaining_secs: u64,
        consecutive_successes: u32,
        periods_before_long: u32,
        running: bool,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Statistics counter this event increments, if any.
    pub fn stat_field(&self) -> Option<StatField> {
        match self {
            Event::Interrupted { .. } => Some(StatField::Interrupts),
            Event::PhaseConfirmed { phase, success, .. } => Some(match (phase, success) {
                (Phase::TaskPeriod, true) => StatField::SuccessfulPeriods,
                (Phase::TaskPeriod, false) => StatField::Interrupts,
                (Phase::ShortBreak, _) => StatField::ShortBreaks,
                (Phase::LongBreak, _) => StatField::LongBreaks,
            }),
            _ => None,
        }
    }

    /// Phase awaiting a yes/no answer, for `PhaseEnded`.
    pub fn awaiting_confirmation(&self) -> Option<Phase> {
        match self {
            Event::PhaseEnded { phase, .. } => Some(*phase),
            _ => None,
        }
    }
}
