use std::time::Duration;

use super::phase::Phase;
use crate::error::ConfigError;

/// Validated durations and long-break threshold for the interval scheduler.
///
/// Fixed at construction. Every duration is non-zero and
/// `periods_before_long >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    task_period: Duration,
    short_break: Duration,
    long_break: Duration,
    periods_before_long: u32,
}

impl SchedulerConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if any duration is zero or
    /// `periods_before_long` is zero.
    pub fn new(
        task_period: Duration,
        short_break: Duration,
        long_break: Duration,
        periods_before_long: u32,
    ) -> Result<Self, ConfigError> {
        for (key, duration) in [
            ("task_period", task_period),
            ("short_break", short_break),
            ("long_break", long_break),
        ] {
            if duration.is_zero() {
                return Err(ConfigError::InvalidValue {
                    key: key.into(),
                    message: "duration must be positive".into(),
                });
            }
        }
        if periods_before_long < 1 {
            return Err(ConfigError::InvalidValue {
                key: "periods_before_long".into(),
                message: "must be at least 1".into(),
            });
        }
        Ok(Self {
            task_period,
            short_break,
            long_break,
            periods_before_long,
        })
    }

    /// Convenience constructor taking whole seconds.
    pub fn from_secs(
        task_period: u64,
        short_break: u64,
        long_break: u64,
        periods_before_long: u32,
    ) -> Result<Self, ConfigError> {
        Self::new(
            Duration::from_secs(task_period),
            Duration::from_secs(short_break),
            Duration::from_secs(long_break),
            periods_before_long,
        )
    }

    pub fn duration(&self, phase: Phase) -> Duration {
        match phase {
            Phase::TaskPeriod => self.task_period,
            Phase::ShortBreak => self.short_break,
            Phase::LongBreak => self.long_break,
        }
    }

    pub fn periods_before_long(&self) -> u32 {
        self.periods_before_long
    }
}

impl Default for SchedulerConfig {
    /// 25 minute tasks, 5 minute short breaks, 15 minute long breaks,
    /// a long break after every 4th task.
    fn default() -> Self {
        Self {
            task_period: Duration::from_secs(25 * 60),
            short_break: Duration::from_secs(5 * 60),
            long_break: Duration::from_secs(15 * 60),
            periods_before_long: 4,
        }
    }
}
