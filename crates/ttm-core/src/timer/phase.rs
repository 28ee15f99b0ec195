use serde::{Deserialize, Serialize};
use std::fmt;

/// Purpose of the active (or next) countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    TaskPeriod,
    ShortBreak,
    LongBreak,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::TaskPeriod, Phase::ShortBreak, Phase::LongBreak];

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::TaskPeriod => "task_period",
            Phase::ShortBreak => "short_break",
            Phase::LongBreak => "long_break",
        }
    }

    /// Human label used by front ends.
    pub fn label(self) -> &'static str {
        match self {
            Phase::TaskPeriod => "Task",
            Phase::ShortBreak => "Short Break",
            Phase::LongBreak => "Long Break",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render a number of seconds as `mm:ss`.
///
/// Minutes are not wrapped at the hour, so 75 minutes renders as `75:00`.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
