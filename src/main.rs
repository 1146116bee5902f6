//! # Nav Instrument
//!
//! Compass-style instrument view for flight navigation telemetry.
//!
//! This binary drives the instrument view with a deterministic synthetic
//! flight so the presentation layer can be exercised without a telemetry
//! source attached: the heading sweeps through a turn, then settles, and the
//! convergence trace grows and drains accordingly.

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::time::{interval, Duration};
use tracing::{debug, info};
use tracing_subscriber;

mod config;
mod convergence;
mod error;
mod instrument;
mod telemetry;
mod view;

use config::Config;
use telemetry::logger::TelemetryLogger;
use telemetry::sample::{NavigationMode, TelemetrySample};
use view::{InstrumentView, TelemetryView, ViewEvent};

/// Configuration file consulted at startup
const CONFIG_PATH: &str = "config/default.toml";

/// Number of frames between readout log lines
const READOUT_LOG_INTERVAL_FRAMES: u64 = 100;

/// Frame count of the initial heading sweep in the synthetic flight
const SWEEP_FRAMES: u64 = 600;

/// Main entry point for the Nav Instrument demo driver
///
/// # Control Flow
///
/// 1. **Initialization**
///    - Set up logging with tracing subscriber
///    - Load configuration, falling back to defaults when absent
///    - Create the view, its control-event channel, and the record logger
///
/// 2. **Main Loop**
///    - Feed one synthetic telemetry update per tick at the configured
///      refresh rate
///    - Rebuild the scene and log a readout line every
///      `READOUT_LOG_INTERVAL_FRAMES` frames
///    - Handle Ctrl+C for graceful shutdown
///
/// 3. **Graceful Shutdown**
///    - Emit the stop-playback control event
///    - Log the total frame count
///    - Clean exit
///
/// # Errors
///
/// Returns error if the telemetry record logger cannot create its directory.
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into())
        )
        .init();

    info!("Nav Instrument v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = match Config::load(CONFIG_PATH) {
        Ok(config) => config,
        Err(e) => {
            info!("No usable config at {} ({}), using defaults", CONFIG_PATH, e);
            Config::default()
        }
    };

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<ViewEvent>();
    let mut view = InstrumentView::new(event_tx);

    // The presenter would sit on the other end of this channel; the demo
    // just logs whatever the view reports.
    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            info!("Control event: {:?}", event);
        }
    });

    let mut logger = if config.telemetry.enabled {
        Some(TelemetryLogger::new(
            &config.telemetry.log_dir,
            config.telemetry.max_records_per_file,
            config.telemetry.max_files_to_keep,
        )?)
    } else {
        None
    };

    let period_ms = 1000 / config.display.refresh_rate_hz;
    let mut frame_interval = interval(Duration::from_millis(period_ms as u64));

    info!(
        "Driving instrument at {}Hz ({}x{} viewport)",
        config.display.refresh_rate_hz, config.display.width, config.display.height
    );
    info!("Press Ctrl+C to exit");

    view.start_playing();

    let mut frame: u64 = 0;

    loop {
        tokio::select! {
            _ = frame_interval.tick() => {
                let (current, convergence) = synthetic_samples(frame);
                view.show_telemetry(current, convergence);
                view.show_progress(((frame / 10) % 101) as u8);

                if let Some(logger) = logger.as_mut() {
                    if let Err(e) = logger.append(&current, &convergence) {
                        debug!("Failed to append telemetry record: {}", e);
                    }
                }

                if frame % READOUT_LOG_INTERVAL_FRAMES == 0 {
                    let scene = view.scene(
                        config.display.width as f32,
                        config.display.height as f32,
                    );
                    let readout = view.readout(
                        config.display.readout_precision,
                        config.display.coordinate_precision,
                    );
                    info!(
                        "yaw {} | mag yaw {} | conv speed {} | trace {} samples, {} segments",
                        readout.yaw,
                        readout.magnetic_yaw,
                        readout.convergence_speed,
                        view.trace().len(),
                        scene.trace.len(),
                    );
                }

                frame += 1;
            }

            // Handle Ctrl+C for graceful shutdown
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                view.stop_playing();
                info!("Total frames shown: {}", frame);
                break;
            }
        }
    }

    Ok(())
}

/// One frame of the synthetic flight.
///
/// The magnetic heading sweeps steadily for the first [`SWEEP_FRAMES`]
/// frames, then holds with a light wobble inside the settle threshold, which
/// first grows and then caps the convergence trace. The convergence speed
/// slowly alternates sign so the trace shows both closing and opening
/// stretches.
fn synthetic_samples(frame: u64) -> (TelemetrySample, TelemetrySample) {
    let heading = if frame < SWEEP_FRAMES {
        (frame as f32 * 0.6) % 360.0
    } else {
        (3.0 * (frame as f32 * 0.05).sin()).rem_euclid(360.0)
    };

    let current = TelemetrySample {
        yaw: (frame as f32 * 0.9) % 360.0,
        magnetic_yaw: heading,
        direction: heading,
        gcs_distance: 1200.0 - (frame as f32 * 0.5).min(900.0),
        time: frame as i64 * 40,
        navigation_mode: NavigationMode::Auto,
        air_speed: 23.5,
        convergence_speed: (frame as f32 * 0.02).sin(),
        convergence_ratio: 0.2 + 0.6 * (frame as f32 * 0.01).sin().abs(),
        latitude: 55.751 + frame as f64 * 1e-6,
        longitude: 37.617 + frame as f64 * 1e-6,
        packet_id: frame as i64,
        is_convergence_data_exist: true,
    };

    (current, current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readout_log_interval_constant() {
        // At the default 25Hz, 100 frames = one readout line every 4 seconds
        let seconds = READOUT_LOG_INTERVAL_FRAMES as f64 / 25.0;
        assert_eq!(seconds, 4.0);
    }

    #[test]
    fn test_synthetic_heading_stays_in_range() {
        for frame in 0..2000 {
            let (current, _) = synthetic_samples(frame);
            assert!(
                (0.0..360.0).contains(&current.magnetic_yaw),
                "Frame {} produced heading {}",
                frame,
                current.magnetic_yaw
            );
        }
    }

    #[test]
    fn test_synthetic_samples_are_trace_eligible() {
        let (current, convergence) = synthetic_samples(17);
        assert!(convergence.is_convergence_data_exist);
        assert_eq!(convergence.packet_id, 17);
        assert_eq!(current.time, 17 * 40);
    }

    #[test]
    fn test_synthetic_heading_settles_after_sweep() {
        // Post-sweep headings wobble within a few degrees of north, so the
        // trace buffer caps instead of growing without bound.
        let (a, _) = synthetic_samples(SWEEP_FRAMES + 10);
        let (b, _) = synthetic_samples(SWEEP_FRAMES + 500);

        let gap = (a.magnetic_yaw - b.magnetic_yaw).abs();
        let wrapped = 360.0 - gap;
        assert!(gap.min(wrapped) < 15.0);
    }
}
