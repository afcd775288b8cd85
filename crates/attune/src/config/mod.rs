use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AttuneError, Result};

/// Main configuration structure for Attune
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Tuning cadence configuration
    #[serde(default)]
    pub tuning: TuningConfig,
    /// State persistence configuration
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Tuning cadence configuration.
///
/// The cycle boundary is owned by the driver, not the learner core: the
/// core exposes `autotune()` and the driver decides when to call it.
#[derive(Debug, Clone, Deserialize)]
pub struct TuningConfig {
    /// Observations between autotune cycles
    #[serde(default = "default_autotune_interval")]
    pub autotune_interval: u32,
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self {
            autotune_interval: default_autotune_interval(),
        }
    }
}

fn default_autotune_interval() -> u32 {
    50
}

/// State persistence configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Base directory for state data
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// State snapshot file name within the data directory
    #[serde(default = "default_state_file")]
    pub state_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            state_file: default_state_file(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".attune"))
        .unwrap_or_else(|| PathBuf::from(".attune"))
}

fn default_state_file() -> String {
    "state.json".to_string()
}

impl StorageConfig {
    /// Full path to the state snapshot file.
    pub fn state_path(&self) -> PathBuf {
        self.data_dir.join(&self.state_file)
    }
}

impl Config {
    /// Load configuration from an explicit path, or search the default
    /// locations (`~/.attune/config.toml`, the platform config dir,
    /// `./config.toml`), falling back to defaults when none exists.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            tracing::info!("Loading config from: {}", path.display());
            return Self::from_file(path);
        }

        let default_paths = [
            dirs::home_dir().map(|h| h.join(".attune").join("config.toml")),
            dirs::config_dir().map(|c| c.join("attune").join("config.toml")),
            Some(PathBuf::from("config.toml")),
        ];

        for candidate in default_paths.iter().flatten() {
            if candidate.exists() {
                tracing::info!("Loading config from: {}", candidate.display());
                return Self::from_file(candidate);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AttuneError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        toml::from_str(&content)
            .map_err(|e| AttuneError::Config(format!("Failed to parse config: {e}")))
    }
}
