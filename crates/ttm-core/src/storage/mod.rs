mod config;
mod statistics;

pub use config::Config;
pub use statistics::{HistoryEntry, Record, StatField, StatisticsStore, Tally};

use std::path::PathBuf;

/// Returns `~/.config/ttm[-dev]/` based on TTM_ENV.
///
/// Set TTM_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("TTM_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("ttm-dev")
    } else {
        base_dir.join("ttm")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
