//! # Nav Instrument Library
//!
//! Compass-style instrument view for flight navigation telemetry.
//!
//! This library provides the presentation layer of a telemetry viewer: the
//! convergence trace buffer, toolkit-independent scene primitives for the yaw
//! instrument, the fixed-point text readout, and the presenter-facing view
//! surface with its control events.

pub mod config;
pub mod convergence;
pub mod error;
pub mod instrument;
pub mod telemetry;
pub mod view;
