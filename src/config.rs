//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.

use serde::Deserialize;
use serde::de::Error;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub display: DisplayConfig,
    pub telemetry: TelemetryConfig,
}

/// Instrument display configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    #[serde(default = "default_refresh_rate_hz")]
    pub refresh_rate_hz: u32,

    #[serde(default = "default_readout_precision")]
    pub readout_precision: usize,

    #[serde(default = "default_coordinate_precision")]
    pub coordinate_precision: usize,
}

/// Telemetry record logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct TelemetryConfig {
    #[serde(default = "default_telemetry_enabled")]
    pub enabled: bool,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    #[serde(default = "default_max_records_per_file")]
    pub max_records_per_file: usize,

    #[serde(default = "default_max_files_to_keep")]
    pub max_files_to_keep: usize,
}

// Default value functions
fn default_width() -> u32 { 800 }
fn default_height() -> u32 { 600 }
fn default_refresh_rate_hz() -> u32 { 25 }
fn default_readout_precision() -> usize { 2 }
fn default_coordinate_precision() -> usize { 4 }

fn default_telemetry_enabled() -> bool { true }
fn default_log_dir() -> String { "./logs".to_string() }
fn default_max_records_per_file() -> usize { 10000 }
fn default_max_files_to_keep() -> usize { 10 }

impl Default for Config {
    fn default() -> Self {
        Self {
            display: DisplayConfig {
                width: default_width(),
                height: default_height(),
                refresh_rate_hz: default_refresh_rate_hz(),
                readout_precision: default_readout_precision(),
                coordinate_precision: default_coordinate_precision(),
            },
            telemetry: TelemetryConfig {
                enabled: default_telemetry_enabled(),
                log_dir: default_log_dir(),
                max_records_per_file: default_max_records_per_file(),
                max_files_to_keep: default_max_files_to_keep(),
            },
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// * `Result<Config>` - Loaded and validated configuration
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use nav_instrument::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Returns
    ///
    /// * `Result<()>` - Ok if valid, Err if invalid
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    fn validate(&self) -> Result<()> {
        // Validate viewport dimensions
        if self.display.width == 0 || self.display.height == 0 {
            return Err(crate::error::InstrumentError::Config(
                toml::de::Error::custom("display width and height must be greater than 0")
            ));
        }

        // Validate refresh rate
        if self.display.refresh_rate_hz == 0 || self.display.refresh_rate_hz > 120 {
            return Err(crate::error::InstrumentError::Config(
                toml::de::Error::custom("refresh_rate_hz must be between 1 and 120")
            ));
        }

        // Validate readout precisions
        if self.display.readout_precision > 9 {
            return Err(crate::error::InstrumentError::Config(
                toml::de::Error::custom("readout_precision must be between 0 and 9")
            ));
        }

        if self.display.coordinate_precision > 9 {
            return Err(crate::error::InstrumentError::Config(
                toml::de::Error::custom("coordinate_precision must be between 0 and 9")
            ));
        }

        // Validate telemetry record logging
        if self.telemetry.enabled && self.telemetry.log_dir.is_empty() {
            return Err(crate::error::InstrumentError::Config(
                toml::de::Error::custom("telemetry log_dir cannot be empty when enabled")
            ));
        }

        if self.telemetry.max_records_per_file == 0 {
            return Err(crate::error::InstrumentError::Config(
                toml::de::Error::custom("max_records_per_file must be greater than 0")
            ));
        }

        if self.telemetry.max_files_to_keep == 0 {
            return Err(crate::error::InstrumentError::Config(
                toml::de::Error::custom("max_files_to_keep must be greater than 0")
            ));
        }

        Ok(())
    }
}
