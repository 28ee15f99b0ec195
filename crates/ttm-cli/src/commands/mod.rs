pub mod config;
pub mod stats;
pub mod timer;

use std::path::{Path, PathBuf};

use ttm_core::{Config, ConfigError};

/// Options shared by every subcommand.
pub struct Context {
    config_path: PathBuf,
}

impl Context {
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let config_path = match config_path {
            Some(path) => path,
            None => Config::default_path()?,
        };
        Ok(Self { config_path })
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn load_config(&self) -> Result<Config, ConfigError> {
        Config::load_from(&self.config_path)
    }
}
