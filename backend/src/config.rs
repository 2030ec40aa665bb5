//! # Configuration
//!
//! Optional YAML file; every field falls back to its default when absent.
//!
//! ```yaml
//! year_window_back: 2
//! year_window_size: 10
//! log_filter: "info"
//! event_queue_bound: 64
//! event_broadcast_capacity: 256
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// How many years before the current one the year selector starts
    pub year_window_back: i32,
    /// Number of years offered by the year selector
    pub year_window_size: u32,
    /// Filter used when `RUST_LOG` is not set
    pub log_filter: String,
    /// Capacity of the runtime command channel
    pub event_queue_bound: usize,
    /// Capacity of the engine event broadcast channel
    pub event_broadcast_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            year_window_back: 2,
            year_window_size: 10,
            log_filter: "info".to_string(),
            event_queue_bound: 64,
            event_broadcast_capacity: 256,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AppConfig = serde_yaml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
