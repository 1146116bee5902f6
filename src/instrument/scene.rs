//! # Instrument Scene
//!
//! Toolkit-independent draw primitives for the compass instrument.
//!
//! A [`Scene`] is rebuilt after every telemetry update and describes exactly
//! what a renderer should put on screen: the yaw scale sprite centered on the
//! drawing area, the airplane glyph rotated by the current yaw, a needle at
//! `yaw - 90` degrees, and the convergence trace polyline. The scene carries
//! no invariants of its own; it matches whatever data it is given.

use crate::convergence::ConvergenceBuffer;
use crate::telemetry::sample::TelemetrySample;

/// Stroke width in pixels for the needle and trace polyline
pub const STROKE_WIDTH: f32 = 2.0;

/// A point in screen coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// An axis-aligned rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Center point of the rectangle.
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }
}

/// A straight line segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub from: Point,
    pub to: Point,
}

/// Color class of a trace segment, derived from the convergence speed sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceColor {
    /// Positive convergence speed: the aircraft is closing (drawn green)
    Closing,
    /// Zero or negative convergence speed: opening (drawn red)
    Opening,
}

/// One colored segment of the convergence trace polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceSegment {
    pub line: Line,
    pub color: TraceColor,
}

/// Everything a renderer needs for one frame of the instrument.
#[derive(Debug, Clone)]
pub struct Scene {
    /// Square drawing area the instrument occupies
    pub area: Rect,
    /// Rotation of the airplane glyph about the area center, in degrees
    pub airplane_rotation_deg: f32,
    /// Yaw needle from the center to the scale edge
    pub needle: Line,
    /// Convergence trace polyline, oldest segment first
    pub trace: Vec<TraceSegment>,
}

impl Scene {
    /// Builds the scene for one telemetry frame.
    ///
    /// # Arguments
    ///
    /// * `current` - Sample driving the airplane glyph and needle
    /// * `trace` - Buffered convergence samples for the polyline
    /// * `viewport_width` - Width of the window client area in pixels
    /// * `viewport_height` - Height of the window client area in pixels
    pub fn build(
        current: &TelemetrySample,
        trace: &ConvergenceBuffer,
        viewport_width: f32,
        viewport_height: f32,
    ) -> Self {
        let area = drawing_area(viewport_width, viewport_height);
        let center = area.center();
        let radius = area.width / 2.0;

        let needle_angle = current.yaw - 90.0;
        let needle = Line {
            from: center,
            to: polar_point(center, needle_angle, radius),
        };

        Self {
            area,
            airplane_rotation_deg: current.yaw,
            needle,
            trace: build_trace(center, radius, trace),
        }
    }
}

/// Largest square centered in the viewport.
///
/// The instrument always renders into a square; the shorter viewport side
/// wins and the square is centered on the viewport midpoint.
pub fn drawing_area(viewport_width: f32, viewport_height: f32) -> Rect {
    let side = viewport_width.min(viewport_height);
    Rect {
        x: (viewport_width - side) / 2.0,
        y: (viewport_height - side) / 2.0,
        width: side,
        height: side,
    }
}

/// Projects a polar coordinate onto the screen.
///
/// Angles are in degrees; 0 points along +x and angles advance clockwise on
/// screen because y grows downward.
pub fn polar_point(center: Point, angle_deg: f32, length: f32) -> Point {
    let radians = angle_deg.to_radians();
    Point {
        x: center.x + radians.cos() * length,
        y: center.y + radians.sin() * length,
    }
}

/// Builds the convergence trace polyline.
///
/// Empty until the buffer holds at least two samples. The polyline starts at
/// the instrument center and visits the polar point of every buffered sample
/// in arrival order, at distance `convergence_ratio * radius`. The pen starts
/// green and flips only when the sign of the convergence speed changes along
/// the sequence.
pub fn build_trace(center: Point, radius: f32, buffer: &ConvergenceBuffer) -> Vec<TraceSegment> {
    if buffer.len() < 2 {
        return Vec::new();
    }

    let mut segments = Vec::with_capacity(buffer.len());
    let mut previous_point = center;
    let mut previous_closing = true;
    let mut color = TraceColor::Closing;

    for sample in buffer.iter() {
        let length = sample.convergence_ratio * radius;
        let end = polar_point(center, sample.magnetic_yaw, length);

        let closing = sample.convergence_speed > 0.0;
        if closing != previous_closing {
            color = if closing {
                TraceColor::Closing
            } else {
                TraceColor::Opening
            };
        }
        previous_closing = closing;

        segments.push(TraceSegment {
            line: Line {
                from: previous_point,
                to: end,
            },
            color,
        });
        previous_point = end;
    }

    segments
}
