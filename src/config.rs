//! Configuration management for session and calibration tuning
//!
//! This module provides runtime configuration loading from JSON files,
//! enabling tuning without recompilation. Tick pacing, dead-zone ratio
//! and debounce length can be adjusted via the config file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub session: SessionConfig,
    pub calibration: CalibrationConfig,
}

/// Polling loop pacing parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Sleep between ticks while the guided calibration is running (ms)
    pub calibration_tick_ms: u64,
    /// Sleep between ticks in normal operation (ms)
    pub run_tick_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            calibration_tick_ms: 50,
            run_tick_ms: 100,
        }
    }
}

/// Calibration procedure configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationConfig {
    /// Dead zone as a fraction of the calibrated per-axis range
    pub dead_zone_ratio: f32,
    /// Ticks after an accepted button edge during which edges are ignored
    pub debounce_ticks: u32,
    /// Emit a progress event every N accumulated samples
    pub progress_every_n_samples: u32,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            // 15% of (max - min), per axis
            dead_zone_ratio: 0.15,
            // 4 ticks = 200ms at the 50ms calibration tick
            debounce_ticks: 4,
            progress_every_n_samples: 5,
        }
    }
}

impl Default for AppConfig {
    /// Default configuration values (fallback if config file not found)
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            calibration: CalibrationConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// Loaded configuration, or the defaults if the file is missing or
    /// the JSON is invalid (logged as a warning, never fatal).
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.session.calibration_tick_ms, 50);
        assert_eq!(config.session.run_tick_ms, 100);
        assert!((config.calibration.dead_zone_ratio - 0.15).abs() < f32::EPSILON);
        assert_eq!(config.calibration.debounce_ticks, 4);
        assert_eq!(config.calibration.progress_every_n_samples, 5);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = AppConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(
            parsed.session.calibration_tick_ms,
            config.session.calibration_tick_ms
        );
        assert_eq!(
            parsed.calibration.debounce_ticks,
            config.calibration.debounce_ticks
        );
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let config = AppConfig::load_from_file("does/not/exist.json");
        assert_eq!(config.calibration.debounce_ticks, 4);
    }
}
