//! # Telemetry Module
//!
//! Telemetry sample model and record logging.
//!
//! This module handles:
//! - The parsed `TelemetrySample` record delivered by the presenter
//! - Navigation mode decoding and human-readable descriptions
//! - Formatting displayed updates as JSONL (JSON Lines)
//! - Writing to rotating record files (max N records per file)
//! - Retaining only the last M files

pub mod logger;
pub mod sample;
