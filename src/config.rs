//! Crate configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Tuning knobs for the radar core.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RadarConfig {
    /// Cap on moments kept per load; 0 disables the cap. The extraction
    /// pipeline emits newest-first, so the cap keeps the newest records.
    #[serde(default = "default_max_moments")]
    pub max_moments: usize,
    /// Contact database for [`crate::contacts::SqliteAddressBook`], if the
    /// embedder uses one.
    #[serde(default)]
    pub contacts_db: Option<PathBuf>,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            max_moments: default_max_moments(),
            contacts_db: None,
        }
    }
}

fn default_max_moments() -> usize {
    500
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse TOML config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl RadarConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}
