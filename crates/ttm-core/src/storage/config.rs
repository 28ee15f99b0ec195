//! TOML-based application configuration.
//!
//! ```toml
//! task_period = 1500          # seconds
//! short_break = 300
//! long_break = 900
//! periods_before_long = 4
//! track_file = "stats.json"   # relative to this file's directory
//! size = [300, 200]           # window size, front ends only
//! ```
//!
//! The timer keys are required. A config file that exists but omits one of
//! them, or sets a zero duration, is rejected.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::timer::SchedulerConfig;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Task period length in seconds.
    pub task_period: u64,
    /// Short break length in seconds.
    pub short_break: u64,
    /// Long break length in seconds.
    pub long_break: u64,
    /// Successful task periods between long breaks.
    pub periods_before_long: u32,
    #[serde(default = "default_track_file")]
    pub track_file: PathBuf,
    #[serde(default = "default_size")]
    pub size: [u32; 2],
}

fn default_track_file() -> PathBuf {
    PathBuf::from("stats.json")
}

fn default_size() -> [u32; 2] {
    [300, 200]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            task_period: 25 * 60,
            short_break: 5 * 60,
            long_break: 15 * 60,
            periods_before_long: 4,
            track_file: default_track_file(),
            size: default_size(),
        }
    }
}

impl Config {
    /// `<data dir>/config.toml`.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/ttm"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load and validate the config at `path`.
    ///
    /// A missing file is created with the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if a value is
    /// invalid, or if the default file cannot be written.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let cfg = match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str::<Config>(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                cfg
            }
            Err(e) => {
                return Err(ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
        };
        cfg.scheduler_config()?;
        Ok(cfg)
    }

    /// Persist to disk, creating the parent directory if needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_err = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_err(e.to_string()))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| save_err(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| save_err(e.to_string()))?;
        Ok(())
    }

    /// Validated scheduler settings.
    pub fn scheduler_config(&self) -> Result<SchedulerConfig, ConfigError> {
        SchedulerConfig::from_secs(
            self.task_period,
            self.short_break,
            self.long_break,
            self.periods_before_long,
        )
    }

    /// Statistics file location. Relative paths resolve against the
    /// directory holding the config file.
    pub fn track_path(&self, config_path: &Path) -> PathBuf {
        if self.track_file.is_absolute() {
            return self.track_file.clone();
        }
        config_path
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(&self.track_file)
    }

    /// Get a config value as string.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        match json.get(key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key. The config is left untouched if the key
    /// is unknown or the result does not validate.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        let obj = json
            .as_object_mut()
            .ok_or_else(|| ConfigError::ParseFailed("config is not a table".into()))?;
        let existing = obj
            .get(key)
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let new_value = match existing {
            serde_json::Value::Number(_) => value
                .parse::<u64>()
                .map(|n| serde_json::Value::Number(n.into()))
                .map_err(|_| invalid(format!("cannot parse '{value}' as a non-negative integer")))?,
            serde_json::Value::Array(_) => {
                serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
            }
            _ => serde_json::Value::String(value.into()),
        };
        obj.insert(key.to_string(), new_value);

        let updated: Config = serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        updated.scheduler_config()?;
        *self = updated;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    use crate::timer::Phase;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn parses_minimal_file() {
        let parsed: Config = toml::from_str(
            "task_period = 60\nshort_break = 10\nlong_break = 30\nperiods_before_long = 2\n",
        )
        .unwrap();
        assert_eq!(parsed.track_file, PathBuf::from("stats.json"));
        assert_eq!(parsed.size, [300, 200]);
        let sched = parsed.scheduler_config().unwrap();
        assert_eq!(sched.duration(Phase::ShortBreak), Duration::from_secs(10));
    }

    #[test]
    fn missing_timer_key_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "task_period = 60\nshort_break = 10\nlong_break = 30\n").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::ParseFailed(_))
        ));
    }

    #[test]
    fn zero_duration_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "task_period = 0\nshort_break = 10\nlong_break = 30\nperiods_before_long = 2\n",
        )
        .unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
        assert_eq!(Config::load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn track_path_resolves_relative_to_config() {
        let cfg = Config::default();
        assert_eq!(
            cfg.track_path(Path::new("/etc/ttm/config.toml")),
            PathBuf::from("/etc/ttm/stats.json")
        );
        let absolute = Config {
            track_file: PathBuf::from("/var/lib/ttm.json"),
            ..Config::default()
        };
        assert_eq!(
            absolute.track_path(Path::new("/etc/ttm/config.toml")),
            PathBuf::from("/var/lib/ttm.json")
        );
    }

    #[test]
    fn get_returns_string_for_all_types() {
        let cfg = Config::default();
        assert_eq!(cfg.get("task_period").as_deref(), Some("1500"));
        assert_eq!(cfg.get("track_file").as_deref(), Some("stats.json"));
        assert_eq!(cfg.get("size").as_deref(), Some("[300,200]"));
        assert!(cfg.get("missing_key").is_none());
    }

    #[test]
    fn set_updates_number_array_and_string() {
        let mut cfg = Config::default();
        cfg.set("short_break", "120").unwrap();
        cfg.set("size", "[640, 480]").unwrap();
        cfg.set("track_file", "other.json").unwrap();
        assert_eq!(cfg.short_break, 120);
        assert_eq!(cfg.size, [640, 480]);
        assert_eq!(cfg.track_file, PathBuf::from("other.json"));
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("volume", "3"),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn set_rejects_invalid_values_without_mutating() {
        let mut cfg = Config::default();
        assert!(cfg.set("task_period", "soon").is_err());
        assert!(cfg.set("periods_before_long", "0").is_err());
        assert!(cfg.set("long_break", "-5").is_err());
        assert_eq!(cfg, Config::default());
    }
}
