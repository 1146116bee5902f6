//! # Instrument View
//!
//! View state for the instrument window.
//!
//! This module handles:
//! - Holding the current sample and the convergence trace buffer
//! - Control enablement (load / start / stop) and the progress value
//! - Forwarding user-triggered control events to the presenter
//! - Building the per-frame [`Scene`] and [`Readout`]
//!
//! All state lives on the caller's task; the only cross-task edge is the
//! outgoing control-event channel.

use std::path::PathBuf;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::convergence::ConvergenceBuffer;
use crate::instrument::readout::Readout;
use crate::instrument::scene::Scene;
use crate::telemetry::sample::TelemetrySample;

/// User-triggered control events forwarded to the presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// The user picked a telemetry file to load
    FileSelected(PathBuf),
    /// The user requested playback start
    StartPlaying,
    /// The user requested playback stop
    StopPlaying,
}

/// Enablement of the three window controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    pub file_loading: bool,
    pub playing: bool,
    pub stopping: bool,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            file_loading: true,
            playing: true,
            stopping: true,
        }
    }
}

/// Presenter-facing surface of the instrument view.
///
/// The presenter drives the view exclusively through this trait, which keeps
/// it testable against a mock view.
pub trait TelemetryView {
    /// Stores the current sample and feeds the convergence sample into the
    /// trace buffer. The caller rebuilds scene and readout afterwards.
    fn show_telemetry(&mut self, telemetry: TelemetrySample, convergence: TelemetrySample);

    /// Updates the playback progress display (clamped to 0-100).
    fn show_progress(&mut self, progress: u8);

    /// Enables or disables the load-file control.
    fn set_file_loading_enabled(&mut self, enabled: bool);

    /// Enables or disables the start-playback control.
    fn set_playing_enabled(&mut self, enabled: bool);

    /// Enables or disables the stop-playback control.
    fn set_stopping_enabled(&mut self, enabled: bool);
}

/// The instrument window's view state.
#[derive(Debug)]
pub struct InstrumentView {
    current: TelemetrySample,
    trace: ConvergenceBuffer,
    controls: ControlState,
    progress: u8,
    events: mpsc::UnboundedSender<ViewEvent>,
}

impl InstrumentView {
    /// Creates a view that reports control events on the given sender.
    #[must_use]
    pub fn new(events: mpsc::UnboundedSender<ViewEvent>) -> Self {
        Self {
            current: TelemetrySample::default(),
            trace: ConvergenceBuffer::new(),
            controls: ControlState::default(),
            progress: 0,
            events,
        }
    }

    /// Creates a view together with the receiving end of its event channel.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ViewEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    /// The sample currently shown on the instrument.
    pub fn current(&self) -> &TelemetrySample {
        &self.current
    }

    /// The convergence trace buffer.
    pub fn trace(&self) -> &ConvergenceBuffer {
        &self.trace
    }

    /// Current control enablement.
    pub fn controls(&self) -> ControlState {
        self.controls
    }

    /// Current playback progress (0-100).
    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Builds the instrument scene for the given viewport.
    pub fn scene(&self, viewport_width: f32, viewport_height: f32) -> Scene {
        Scene::build(&self.current, &self.trace, viewport_width, viewport_height)
    }

    /// Builds the text readout at the given precisions.
    pub fn readout(&self, precision: usize, coordinate_precision: usize) -> Readout {
        Readout::build(&self.current, &self.trace, precision, coordinate_precision)
    }

    /// User picked a file; forwards [`ViewEvent::FileSelected`] while the
    /// load control is enabled.
    pub fn select_file(&self, path: PathBuf) {
        if !self.controls.file_loading {
            debug!("Ignoring file selection, load control is disabled");
            return;
        }
        self.emit(ViewEvent::FileSelected(path));
    }

    /// User pressed start; forwards [`ViewEvent::StartPlaying`] while the
    /// start control is enabled.
    pub fn start_playing(&self) {
        if !self.controls.playing {
            debug!("Ignoring start request, start control is disabled");
            return;
        }
        self.emit(ViewEvent::StartPlaying);
    }

    /// User pressed stop; forwards [`ViewEvent::StopPlaying`] while the stop
    /// control is enabled.
    pub fn stop_playing(&self) {
        if !self.controls.stopping {
            debug!("Ignoring stop request, stop control is disabled");
            return;
        }
        self.emit(ViewEvent::StopPlaying);
    }

    fn emit(&self, event: ViewEvent) {
        if self.events.send(event).is_err() {
            warn!("Dropping control event, presenter side is closed");
        }
    }
}

impl TelemetryView for InstrumentView {
    fn show_telemetry(&mut self, telemetry: TelemetrySample, convergence: TelemetrySample) {
        self.current = telemetry;
        self.trace.update(convergence);
    }

    fn show_progress(&mut self, progress: u8) {
        self.progress = progress.min(100);
    }

    fn set_file_loading_enabled(&mut self, enabled: bool) {
        self.controls.file_loading = enabled;
    }

    fn set_playing_enabled(&mut self, enabled: bool) {
        self.controls.playing = enabled;
    }

    fn set_stopping_enabled(&mut self, enabled: bool) {
        self.controls.stopping = enabled;
    }
}
