//! User configuration: defaults loaded from ~/.songsmith/config.yaml.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Errors from reading a config file that exists.
#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Yaml(serde_yaml::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Yaml(e) => write!(f, "invalid config: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(e: serde_yaml::Error) -> Self {
        ConfigError::Yaml(e)
    }
}

/// Defaults for songs rendered from the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SongsmithConfig {
    /// Directory output files land in.
    pub output_dir: PathBuf,
    pub default_bpm: u32,
    pub default_bars: u32,
    /// Fixed RNG seed. None = fresh entropy per run.
    pub seed: Option<u64>,
}

impl Default for SongsmithConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            default_bpm: 120,
            default_bars: 4,
            seed: None,
        }
    }
}

impl SongsmithConfig {
    /// The standard config path, if a home directory is known.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".songsmith").join("config.yaml"))
    }

    /// Load from the standard path, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load() -> Self {
        Self::default_path()
            .filter(|path| path.exists())
            .and_then(|path| match Self::load_from(&path) {
                Ok(config) => Some(config),
                Err(e) => {
                    log::warn!("ignoring {}: {e}", path.display());
                    None
                }
            })
            .unwrap_or_default()
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(&content)?)
    }
}
