//! # Error Types
//!
//! Custom error types for Nav Instrument using `thiserror`.

use thiserror::Error;

/// Main error type for Nav Instrument
#[derive(Debug, Error)]
pub enum InstrumentError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Telemetry record serialization errors
    #[error("Telemetry record error: {0}")]
    TelemetryRecord(#[from] serde_json::Error),
}

/// Result type alias for Nav Instrument
pub type Result<T> = std::result::Result<T, InstrumentError>;
