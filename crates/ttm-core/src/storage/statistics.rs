//! JSON-file statistics store.
//!
//! The record holds four monotonically increasing counters and an
//! append-only history with one `[timestamp, field]` entry per increment.
//! Every increment rewrites the whole file through a temporary file in the
//! same directory, so the canonical path never holds partial JSON.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::error::{LoadError, PersistenceError};

/// Counter in the statistics record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatField {
    Interrupts,
    ShortBreaks,
    LongBreaks,
    SuccessfulPeriods,
}

impl StatField {
    pub const ALL: [StatField; 4] = [
        StatField::Interrupts,
        StatField::ShortBreaks,
        StatField::LongBreaks,
        StatField::SuccessfulPeriods,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StatField::Interrupts => "interrupts",
            StatField::ShortBreaks => "short_breaks",
            StatField::LongBreaks => "long_breaks",
            StatField::SuccessfulPeriods => "successful_periods",
        }
    }
}

impl fmt::Display for StatField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One audit entry, serialized as a two-element array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry(#[serde(with = "timestamp")] pub NaiveDateTime, pub StatField);

impl HistoryEntry {
    pub fn at(&self) -> NaiveDateTime {
        self.0
    }

    pub fn field(&self) -> StatField {
        self.1
    }
}

/// Local wall-clock timestamps as `YYYY-MM-DD HH:MM:SS.ffffff`.
mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const WRITE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";
    const READ_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

    pub fn serialize<S: Serializer>(at: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&at.format(WRITE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        READ_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(&raw, fmt).ok())
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
    }
}

/// Per-field counts, used for totals and daily summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub interrupts: u64,
    pub short_breaks: u64,
    pub long_breaks: u64,
    pub successful_periods: u64,
}

impl Tally {
    fn bump(&mut self, field: StatField) {
        match field {
            StatField::Interrupts => self.interrupts += 1,
            StatField::ShortBreaks => self.short_breaks += 1,
            StatField::LongBreaks => self.long_breaks += 1,
            StatField::SuccessfulPeriods => self.successful_periods += 1,
        }
    }
}

/// The persisted statistics record.
///
/// Unknown or missing keys make the file invalid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Record {
    interrupts: u64,
    short_breaks: u64,
    long_breaks: u64,
    successful_periods: u64,
    history: Vec<HistoryEntry>,
}

impl Record {
    pub fn interrupts(&self) -> u64 {
        self.interrupts
    }

    pub fn short_breaks(&self) -> u64 {
        self.short_breaks
    }

    pub fn long_breaks(&self) -> u64 {
        self.long_breaks
    }

    pub fn successful_periods(&self) -> u64 {
        self.successful_periods
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn get(&self, field: StatField) -> u64 {
        match field {
            StatField::Interrupts => self.interrupts,
            StatField::ShortBreaks => self.short_breaks,
            StatField::LongBreaks => self.long_breaks,
            StatField::SuccessfulPeriods => self.successful_periods,
        }
    }

    pub fn totals(&self) -> Tally {
        Tally {
            interrupts: self.interrupts,
            short_breaks: self.short_breaks,
            long_breaks: self.long_breaks,
            successful_periods: self.successful_periods,
        }
    }

    /// Counts history entries recorded on `day`.
    pub fn tally_on(&self, day: NaiveDate) -> Tally {
        let mut tally = Tally::default();
        self.history
            .iter()
            .filter(|entry| entry.at().date() == day)
            .for_each(|entry| tally.bump(entry.field()));
        tally
    }

    fn bump(&mut self, field: StatField, at: NaiveDateTime) {
        let counter = match field {
            StatField::Interrupts => &mut self.interrupts,
            StatField::ShortBreaks => &mut self.short_breaks,
            StatField::LongBreaks => &mut self.long_breaks,
            StatField::SuccessfulPeriods => &mut self.successful_periods,
        };
        *counter += 1;
        self.history.push(HistoryEntry(at, field));
    }
}

/// Statistics bound to one file.
#[derive(Debug)]
pub struct StatisticsStore {
    path: PathBuf,
    record: Record,
}

impl StatisticsStore {
    /// Load the record at `path`, falling back to an empty record.
    ///
    /// A missing, unreadable or invalid file is logged and never returned
    /// as an error.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let record = match Self::read(&path) {
            Ok(record) => record,
            Err(LoadError::Read { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                info!(path = %path.display(), "no statistics file yet, starting from zero");
                Record::default()
            }
            Err(e) => {
                warn!(error = %e, "statistics file unusable, starting from zero");
                Record::default()
            }
        };
        Self { path, record }
    }

    /// Read and decode the record without any fallback.
    pub fn read(path: &Path) -> Result<Record, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| LoadError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Add one to `field`, append a history entry and rewrite the file.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the file could not be rewritten. The
    /// in-memory record keeps the increment either way.
    pub fn increment(&mut self, field: StatField) -> Result<(), PersistenceError> {
        self.increment_at(field, Local::now().naive_local())
    }

    /// [`increment`](Self::increment) with an explicit timestamp.
    pub fn increment_at(
        &mut self,
        field: StatField,
        at: NaiveDateTime,
    ) -> Result<(), PersistenceError> {
        // Truncate to what the file format keeps, so a reload is identical.
        self.record.bump(field, at.trunc_subsecs(6));
        self.save()
    }

    pub fn record_interrupt(&mut self) -> Result<(), PersistenceError> {
        self.increment(StatField::Interrupts)
    }

    pub fn record_short_break(&mut self) -> Result<(), PersistenceError> {
        self.increment(StatField::ShortBreaks)
    }

    pub fn record_long_break(&mut self) -> Result<(), PersistenceError> {
        self.increment(StatField::LongBreaks)
    }

    pub fn record_successful_period(&mut self) -> Result<(), PersistenceError> {
        self.increment(StatField::SuccessfulPeriods)
    }

    /// Atomically replace the file with the current record.
    ///
    /// The temporary file lives next to the target and is removed if any
    /// step fails.
    pub fn save(&self) -> Result<(), PersistenceError> {
        let bytes = serde_json::to_vec(&self.record)?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let write_err = |source: std::io::Error| PersistenceError::Write {
            path: self.path.clone(),
            source,
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(&bytes).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&self.path)
            .map_err(|e| PersistenceError::Replace {
                path: self.path.clone(),
                source: e.error,
            })?;
        info!(path = %self.path.display(), entries = self.record.history.len(), "statistics saved");
        Ok(())
    }
}
