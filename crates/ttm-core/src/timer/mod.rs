mod engine;
mod phase;
mod schedule;

pub use engine::{IntervalScheduler, SchedulerEvent, SchedulerState, TICK};
pub use phase::{format_clock, Phase};
pub use schedule::SchedulerConfig;
