//! # ttm Core Library
//!
//! Core logic for the ttm interval timer: a front end (the `ttm` CLI, or any
//! windowed shell) forwards ticks and button presses, and this crate decides
//! which phase runs next and keeps the statistics file up to date.
//!
//! ## Architecture
//!
//! - **Interval Scheduler**: tick-driven state machine cycling through task
//!   periods, short breaks and long breaks
//! - **Statistics Store**: JSON counters with an append-only history,
//!   rewritten atomically on every change
//! - **Session**: event loop tying the two together behind injectable input
//!   and confirmation traits
//!
//! ## Key Components
//!
//! - [`IntervalScheduler`]: Core state machine
//! - [`StatisticsStore`]: Statistics persistence
//! - [`Config`]: Application configuration management
//! - [`Session`]: Event loop driving the scheduler

pub mod error;
pub mod events;
pub mod session;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, LoadError, PersistenceError};
pub use events::Event;
pub use session::{ConfirmationPrompt, InputSource, Session};
pub use storage::{Config, HistoryEntry, Record, StatField, StatisticsStore, Tally};
pub use timer::{
    format_clock, IntervalScheduler, Phase, SchedulerConfig, SchedulerEvent, SchedulerState, TICK,
};
