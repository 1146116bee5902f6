//! # Telemetry Readout
//!
//! Text readout of the numeric telemetry fields.
//!
//! Every line pairs the current sample with the latest convergence sample as
//! `"<current> | <convergence>"`. When no convergence data has arrived yet the
//! second column shows the placeholder sample.

use crate::convergence::ConvergenceBuffer;
use crate::telemetry::sample::TelemetrySample;

/// Minimum printed width of a fixed-point readout field
const FIELD_WIDTH: usize = 5;

/// Formats a current/convergence pair of fixed-point values.
///
/// Each value is zero-padded to a minimum width of five characters at the
/// given precision, e.g. `03.50 | 12.25`.
pub fn format_pair(current: f64, convergence: f64, precision: usize) -> String {
    format!(
        "{:0width$.prec$} | {:0width$.prec$}",
        current,
        convergence,
        width = FIELD_WIDTH,
        prec = precision
    )
}

/// Formats a current/convergence pair of integer values.
pub fn format_pair_int(current: i64, convergence: i64) -> String {
    format!("{} | {}", current, convergence)
}

/// One formatted line per telemetry field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readout {
    pub yaw: String,
    pub magnetic_yaw: String,
    pub direction: String,
    pub gcs_distance: String,
    pub time: String,
    pub navigation_mode: String,
    pub air_speed: String,
    pub convergence_speed: String,
    pub convergence_ratio: String,
    pub latitude: String,
    pub longitude: String,
    pub packet_id: String,
}

impl Readout {
    /// Builds the readout for the current sample and the latest buffered
    /// convergence sample.
    ///
    /// # Arguments
    ///
    /// * `current` - Sample shown in the first column
    /// * `trace` - Convergence buffer; its latest sample fills the second
    ///   column, or the placeholder sample when the buffer is empty
    /// * `precision` - Fixed-point digits for most fields
    /// * `coordinate_precision` - Fixed-point digits for latitude/longitude
    pub fn build(
        current: &TelemetrySample,
        trace: &ConvergenceBuffer,
        precision: usize,
        coordinate_precision: usize,
    ) -> Self {
        let convergence = trace.latest().copied().unwrap_or_default();

        Self {
            yaw: format_pair(current.yaw as f64, convergence.yaw as f64, precision),
            magnetic_yaw: format_pair(
                current.magnetic_yaw as f64,
                convergence.magnetic_yaw as f64,
                precision,
            ),
            direction: format_pair(current.direction as f64, convergence.direction as f64, precision),
            gcs_distance: format_pair(
                current.gcs_distance as f64,
                convergence.gcs_distance as f64,
                precision,
            ),
            time: format_pair_int(current.time, convergence.time),
            navigation_mode: format!(
                "{} | {}",
                current.navigation_mode.description(),
                convergence.navigation_mode.description()
            ),
            air_speed: format_pair(current.air_speed as f64, convergence.air_speed as f64, precision),
            convergence_speed: format_pair(
                current.convergence_speed as f64,
                convergence.convergence_speed as f64,
                precision,
            ),
            convergence_ratio: format_pair(
                current.convergence_ratio as f64,
                convergence.convergence_ratio as f64,
                precision,
            ),
            latitude: format_pair(current.latitude, convergence.latitude, coordinate_precision),
            longitude: format_pair(current.longitude, convergence.longitude, coordinate_precision),
            packet_id: format_pair_int(current.packet_id, convergence.packet_id),
        }
    }

    /// Labeled lines in display order, for logging or rendering.
    pub fn lines(&self) -> [(&'static str, &str); 12] {
        [
            ("yaw", self.yaw.as_str()),
            ("magnetic yaw", self.magnetic_yaw.as_str()),
            ("direction", self.direction.as_str()),
            ("gcs distance", self.gcs_distance.as_str()),
            ("time", self.time.as_str()),
            ("navigation mode", self.navigation_mode.as_str()),
            ("air speed", self.air_speed.as_str()),
            ("convergence speed", self.convergence_speed.as_str()),
            ("convergence ratio", self.convergence_ratio.as_str()),
            ("latitude", self.latitude.as_str()),
            ("longitude", self.longitude.as_str()),
            ("packet id", self.packet_id.as_str()),
        ]
    }
}
