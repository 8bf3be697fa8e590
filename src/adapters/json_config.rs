//! JSON file configuration adapter.
//!
//! Implements [`ConfigPort`] over an optional path.  No path means
//! defaults; a path that does not exist is `NotFound`, undecodable JSON
//! is `Corrupted`.  Every loaded value is validated before it is
//! returned.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use log::info;

use crate::app::ports::ConfigPort;
use crate::config::{AirlockConfig, ConfigError};

pub struct JsonConfigAdapter {
    path: Option<PathBuf>,
}

impl JsonConfigAdapter {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Decode and validate a JSON document.
    pub fn parse(text: &str) -> Result<AirlockConfig, ConfigError> {
        let config: AirlockConfig =
            serde_json::from_str(text).map_err(|_| ConfigError::Corrupted)?;
        config.validate()?;
        Ok(config)
    }
}

impl ConfigPort for JsonConfigAdapter {
    fn load(&self) -> Result<AirlockConfig, ConfigError> {
        let Some(path) = &self.path else {
            info!("Config: no file given, using defaults");
            return Ok(AirlockConfig::default());
        };

        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::NotFound,
            _ => ConfigError::IoError,
        })?;
        let config = Self::parse(&text)?;
        info!("Config loaded from {}", path.display());
        Ok(config)
    }
}
