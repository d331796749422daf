//! Monitor and dashboard configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::capture::DEFAULT_MAX_EVENTS;
use crate::error::Result;

/// Retention configuration for an event monitor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MonitorConfig {
    /// Retention window; values below 1 are clamped at buffer construction
    pub max_events: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            max_events: DEFAULT_MAX_EVENTS,
        }
    }
}

impl MonitorConfig {
    /// Configuration with an explicit retention window
    pub fn with_max_events(max_events: usize) -> Self {
        Self { max_events }
    }
}

/// Dashboard settings, loadable from a TOML file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashConfig {
    /// Retention window for the event monitor panel
    pub max_events: usize,
    /// Redraw interval in milliseconds
    pub refresh_ms: u64,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            max_events: DEFAULT_MAX_EVENTS,
            refresh_ms: 250,
            log_level: "info".to_string(),
        }
    }
}

impl DashConfig {
    /// Load settings from a TOML file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}
