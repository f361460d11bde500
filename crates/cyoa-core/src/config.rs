//! Application configuration management.
//!
//! This module handles loading the launcher configuration,
//! which includes the content API endpoint, the default outcome type and
//! where the local store lives.
//!
//! Configuration is stored at `~/.config/cyoa/config.json`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_API_URI;
use crate::resolver::DEFAULT_OUTCOME_TYPE;

/// Application name used for config/store directory paths
const APP_NAME: &str = "cyoa";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// How long the startup connectivity probe waits for a TCP connection.
const DEFAULT_CONNECTIVITY_TIMEOUT_MS: u64 = 3000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_uri: String,
    pub default_outcome_type: String,
    /// No deadline on the game data request unless set
    pub request_timeout_secs: Option<u64>,
    pub connectivity_timeout_ms: u64,
    pub store_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_uri: DEFAULT_API_URI.to_string(),
            default_outcome_type: DEFAULT_OUTCOME_TYPE.to_string(),
            request_timeout_secs: None,
            connectivity_timeout_ms: DEFAULT_CONNECTIVITY_TIMEOUT_MS,
            store_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from an explicit path; a missing file gives the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory holding the local store, `~/.cache/cyoa` unless configured
    pub fn store_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.store_dir {
            return Ok(dir.clone());
        }
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn connectivity_timeout(&self) -> Duration {
        Duration::from_millis(self.connectivity_timeout_ms)
    }
}
