//! # Instrument Module
//!
//! Compass-style instrument presentation built from telemetry.
//!
//! This module handles:
//! - Drawing-area geometry and polar projection
//! - Scene primitives: yaw scale, rotated airplane glyph, yaw needle
//! - The convergence trace polyline with closing/opening coloring
//! - Fixed-point text readout of the numeric telemetry fields

pub mod readout;
pub mod scene;
