//! TOML-based planner configuration.
//!
//! Covers the tunable parts of the allocation protocol: the default and
//! minimum selection duration, the adjustment step, and the wall-clock
//! sampling interval. The slot grid itself (06:00-24:00, ten-minute
//! blocks) is fixed geometry and not configurable.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Planner configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Duration a fresh selection starts with, in minutes.
    #[serde(default = "default_duration_min")]
    pub default_duration_min: u32,
    /// Floor for duration adjustments, in minutes.
    #[serde(default = "default_min_duration_min")]
    pub min_duration_min: u32,
    /// Step used by duration +/- controls, in minutes.
    #[serde(default = "default_duration_step_min")]
    pub duration_step_min: u32,
    /// Wall-clock sampling interval for elapsed classification, in seconds.
    #[serde(default = "default_clock_sample_secs")]
    pub clock_sample_secs: u64,
}

fn default_duration_min() -> u32 {
    30
}
fn default_min_duration_min() -> u32 {
    10
}
fn default_duration_step_min() -> u32 {
    10
}
fn default_clock_sample_secs() -> u64 {
    60
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            default_duration_min: default_duration_min(),
            min_duration_min: default_min_duration_min(),
            duration_step_min: default_duration_step_min(),
            clock_sample_secs: default_clock_sample_secs(),
        }
    }
}

impl PlannerConfig {
    /// Load configuration from a TOML file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Save configuration to a TOML file.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let raw = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, raw).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
