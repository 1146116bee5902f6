//! # Telemetry Sample Types
//!
//! The parsed telemetry record handed to the view by the presenter, plus the
//! navigation mode enumeration carried inside it.
//!
//! Samples arrive already validated upstream; this layer treats every numeric
//! field as well-formed and never rejects one.

use serde::{Deserialize, Serialize};

/// Navigation mode reported by the flight controller.
///
/// Encoded on the wire as a small integer; any value outside 0-3 maps to
/// [`NavigationMode::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum NavigationMode {
    /// Position from GPS alone (0)
    GpsOnly,
    /// Fused GPS + inertial solution (1)
    Auto,
    /// Dead reckoning on the IMU alone (2)
    ImuOnly,
    /// Link binding in progress (3)
    Binding,
    /// Any unrecognized mode value
    Unknown,
}

impl NavigationMode {
    /// Human-readable description shown in the readout.
    pub fn description(&self) -> &'static str {
        match self {
            NavigationMode::GpsOnly => "GPS only",
            NavigationMode::Auto => "Auto",
            NavigationMode::ImuOnly => "IMU only",
            NavigationMode::Binding => "Binding",
            NavigationMode::Unknown => "Unknown",
        }
    }
}

impl Default for NavigationMode {
    fn default() -> Self {
        NavigationMode::Unknown
    }
}

impl From<i64> for NavigationMode {
    fn from(raw: i64) -> Self {
        match raw {
            0 => NavigationMode::GpsOnly,
            1 => NavigationMode::Auto,
            2 => NavigationMode::ImuOnly,
            3 => NavigationMode::Binding,
            _ => NavigationMode::Unknown,
        }
    }
}

impl From<NavigationMode> for i64 {
    fn from(mode: NavigationMode) -> Self {
        match mode {
            NavigationMode::GpsOnly => 0,
            NavigationMode::Auto => 1,
            NavigationMode::ImuOnly => 2,
            NavigationMode::Binding => 3,
            NavigationMode::Unknown => -1,
        }
    }
}

/// One parsed flight/navigation telemetry record.
///
/// The view receives two of these per update: the current sample driving the
/// airplane glyph and needle, and a convergence sample feeding the trace
/// buffer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    /// Aircraft yaw in degrees, wraps at 360
    pub yaw: f32,

    /// Heading relative to magnetic north in degrees, wraps at 360
    pub magnetic_yaw: f32,

    /// Course direction in degrees
    pub direction: f32,

    /// Distance to the ground control station in meters
    pub gcs_distance: f32,

    /// Sample timestamp in milliseconds
    pub time: i64,

    /// Navigation mode reported by the flight controller
    pub navigation_mode: NavigationMode,

    /// Indicated airspeed in m/s
    pub air_speed: f32,

    /// Signed closing rate: positive = approaching, negative = receding
    pub convergence_speed: f32,

    /// Unitless factor scaling the trace point distance from center
    pub convergence_ratio: f32,

    /// Latitude in degrees
    pub latitude: f64,

    /// Longitude in degrees
    pub longitude: f64,

    /// Sequence identifier; negative marks a placeholder, not a real sample
    pub packet_id: i64,

    /// Whether this sample is eligible for the convergence trace
    pub is_convergence_data_exist: bool,
}

impl Default for TelemetrySample {
    /// Placeholder sample used when no convergence data has arrived yet.
    fn default() -> Self {
        Self {
            yaw: 0.0,
            magnetic_yaw: 0.0,
            direction: 0.0,
            gcs_distance: 0.0,
            time: 0,
            navigation_mode: NavigationMode::Unknown,
            air_speed: 0.0,
            convergence_speed: 0.0,
            convergence_ratio: 0.0,
            latitude: 0.0,
            longitude: 0.0,
            packet_id: -1,
            is_convergence_data_exist: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_mode_from_raw() {
        assert_eq!(NavigationMode::from(0), NavigationMode::GpsOnly);
        assert_eq!(NavigationMode::from(1), NavigationMode::Auto);
        assert_eq!(NavigationMode::from(2), NavigationMode::ImuOnly);
        assert_eq!(NavigationMode::from(3), NavigationMode::Binding);
        assert_eq!(NavigationMode::from(4), NavigationMode::Unknown);
        assert_eq!(NavigationMode::from(-7), NavigationMode::Unknown);
    }

    #[test]
    fn test_navigation_mode_descriptions() {
        assert_eq!(NavigationMode::GpsOnly.description(), "GPS only");
        assert_eq!(NavigationMode::Auto.description(), "Auto");
        assert_eq!(NavigationMode::ImuOnly.description(), "IMU only");
        assert_eq!(NavigationMode::Binding.description(), "Binding");
        assert_eq!(NavigationMode::Unknown.description(), "Unknown");
    }

    #[test]
    fn test_navigation_mode_serde_uses_raw_integer() {
        let json = serde_json::to_string(&NavigationMode::ImuOnly).unwrap();
        assert_eq!(json, "2");

        let mode: NavigationMode = serde_json::from_str("3").unwrap();
        assert_eq!(mode, NavigationMode::Binding);

        // Out-of-range values decode to Unknown rather than failing
        let mode: NavigationMode = serde_json::from_str("99").unwrap();
        assert_eq!(mode, NavigationMode::Unknown);
    }

    #[test]
    fn test_default_sample_is_placeholder() {
        let sample = TelemetrySample::default();

        assert_eq!(sample.packet_id, -1, "Placeholder must not look like a real sample");
        assert_eq!(sample.navigation_mode, NavigationMode::Unknown);
        assert!(!sample.is_convergence_data_exist);
        assert_eq!(sample.yaw, 0.0);
        assert_eq!(sample.latitude, 0.0);
    }
}
