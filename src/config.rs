use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::controller::ControllerSettings;

const CONFIG_PATH: &str = "joytint.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
}

#[derive(Deserialize, Serialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub controller: ControllerSettings,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    pub repaint_interval_ms: u64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            title: String::from("Test Program"),
            repaint_interval_ms: 33,
        }
    }
}

impl Config {
    /// Load `joytint.toml` from the working directory, falling back to the
    /// defaults when it is absent or malformed.
    pub fn load() -> Self {
        match Self::read_file(CONFIG_PATH) {
            Ok(Some(config)) => {
                debug!("Loaded config from {}: {:?}", CONFIG_PATH, config);
                config
            }
            Ok(None) => {
                debug!("No config file at {}, using defaults", CONFIG_PATH);
                Self::default()
            }
            Err(e) => {
                warn!("Ignoring config file {}: {}", CONFIG_PATH, e);
                Self::default()
            }
        }
    }

    fn read_file(path: impl AsRef<Path>) -> Result<Option<Self>, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(path)?;
        Ok(Some(toml::from_str(&raw)?))
    }
}
