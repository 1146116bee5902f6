//! # Convergence Trace Buffer
//!
//! Rolling buffer of recent telemetry samples backing the historical
//! convergence trace on the instrument.
//!
//! The buffer is soft-bounded: once it holds more than [`TRACE_SOFT_CAPACITY`]
//! samples, each update evaluates a single front eviction, and the eviction is
//! gated on heading stability rather than capacity. While the aircraft is
//! actively turning, the oldest and newest magnetic-yaw readings stay far
//! apart and the trace keeps growing; once the heading settles to within
//! [`HEADING_THRESHOLD_DEG`] (wrap-aware), the buffer drains back down one
//! sample per update. This is not a fixed-size ring buffer and must not be
//! replaced with one; the two behave differently during sustained turns.

use std::collections::VecDeque;

use tracing::debug;

use crate::telemetry::sample::TelemetrySample;

/// Buffer size above which front eviction is evaluated
pub const TRACE_SOFT_CAPACITY: usize = 20;

/// Angular gap in degrees under which two headings count as settled
pub const HEADING_THRESHOLD_DEG: f32 = 15.0;

/// Wrap-aware test for whether two headings lie within the settle threshold.
///
/// Tries the direct difference first; if that fails, retries across the
/// 0/360 boundary (e.g. 358 and 2 are 4 degrees apart, not 356).
fn headings_settled(a_deg: f32, b_deg: f32) -> bool {
    let delta = (a_deg - b_deg).abs();
    if delta < HEADING_THRESHOLD_DEG {
        return true;
    }
    let (less, more) = if a_deg < b_deg { (a_deg, b_deg) } else { (b_deg, a_deg) };
    (less + 360.0) - more < HEADING_THRESHOLD_DEG
}

/// Ordered history of convergence-eligible telemetry samples.
///
/// Insertion order is arrival order. Created empty at window construction and
/// never explicitly cleared; it lives as long as the view does.
#[derive(Debug, Clone, Default)]
pub struct ConvergenceBuffer {
    samples: VecDeque<TelemetrySample>,
}

impl ConvergenceBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            samples: VecDeque::new(),
        }
    }

    /// Applies one telemetry update to the buffer.
    ///
    /// Samples without convergence data are ignored entirely (no append, no
    /// eviction). Eligible samples with a non-negative `packet_id` are
    /// appended; placeholder samples (`packet_id < 0`) are not, though
    /// eviction is still evaluated if the buffer is already over capacity.
    /// At most one element is evicted per call, and only when the oldest and
    /// newest headings have settled.
    pub fn update(&mut self, sample: TelemetrySample) {
        if !sample.is_convergence_data_exist {
            return;
        }

        if sample.packet_id >= 0 {
            self.samples.push_back(sample);
        }

        if self.samples.len() > TRACE_SOFT_CAPACITY {
            let settled = match (self.samples.front(), self.samples.back()) {
                (Some(oldest), Some(newest)) => {
                    headings_settled(oldest.magnetic_yaw, newest.magnetic_yaw)
                }
                _ => false,
            };

            if settled {
                self.samples.pop_front();
                debug!("Heading settled, evicted oldest trace sample ({} retained)", self.samples.len());
            }
        }
    }

    /// Number of samples currently held.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The oldest buffered sample, if any.
    pub fn oldest(&self) -> Option<&TelemetrySample> {
        self.samples.front()
    }

    /// The most recently appended sample, if any.
    pub fn latest(&self) -> Option<&TelemetrySample> {
        self.samples.back()
    }

    /// Iterates the samples oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &TelemetrySample> {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Convergence-eligible sample with the given heading and sequence id.
    fn trace_sample(magnetic_yaw: f32, packet_id: i64) -> TelemetrySample {
        TelemetrySample {
            magnetic_yaw,
            packet_id,
            is_convergence_data_exist: true,
            ..TelemetrySample::default()
        }
    }

    /// Fills a buffer with `count` samples at the given heading.
    fn filled_buffer(count: usize, magnetic_yaw: f32) -> ConvergenceBuffer {
        let mut buffer = ConvergenceBuffer::new();
        for id in 0..count {
            buffer.update(trace_sample(magnetic_yaw, id as i64));
        }
        buffer
    }

    #[test]
    fn test_ineligible_sample_leaves_buffer_unchanged() {
        let mut buffer = filled_buffer(5, 100.0);

        let mut sample = trace_sample(100.0, 6);
        sample.is_convergence_data_exist = false;
        buffer.update(sample);

        assert_eq!(buffer.len(), 5);
    }

    #[test]
    fn test_negative_packet_id_not_appended() {
        let mut buffer = filled_buffer(5, 100.0);

        buffer.update(trace_sample(100.0, -1));

        assert_eq!(buffer.len(), 5);
    }

    #[test]
    fn test_eligible_sample_appends_exactly_one() {
        let mut buffer = filled_buffer(5, 100.0);

        buffer.update(trace_sample(100.0, 6));

        assert_eq!(buffer.len(), 6);
        assert_eq!(buffer.latest().unwrap().packet_id, 6);
    }

    #[test]
    fn test_no_eviction_at_soft_capacity() {
        // 20 samples at an identical heading: over-capacity check does not
        // fire until the buffer exceeds 20.
        let buffer = filled_buffer(TRACE_SOFT_CAPACITY, 100.0);
        assert_eq!(buffer.len(), TRACE_SOFT_CAPACITY);
    }

    #[test]
    fn test_settled_heading_evicts_front() {
        // Oldest at 10 degrees, newest at 20: gap of 10 < 15, so the 21st
        // sample triggers a front eviction and the net size stays at 20.
        let mut buffer = ConvergenceBuffer::new();
        buffer.update(trace_sample(10.0, 0));
        for id in 1..=TRACE_SOFT_CAPACITY as i64 {
            buffer.update(trace_sample(20.0, id));
        }

        assert_eq!(buffer.len(), TRACE_SOFT_CAPACITY);
        assert_eq!(buffer.oldest().unwrap().packet_id, 1);
    }

    #[test]
    fn test_turning_heading_grows_past_capacity() {
        // Oldest at 0, newest at 180: the heading is changing, so nothing is
        // evicted and the buffer keeps growing past the soft capacity.
        let mut buffer = ConvergenceBuffer::new();
        for id in 0..30 {
            buffer.update(trace_sample((id * 6) as f32, id));
        }

        assert_eq!(buffer.len(), 30);
    }

    #[test]
    fn test_steady_heading_caps_at_soft_capacity() {
        // Constant heading: every over-capacity append immediately sheds the
        // front sample, so the buffer holds steady at the soft capacity.
        let buffer = filled_buffer(60, 100.0);

        assert_eq!(buffer.len(), TRACE_SOFT_CAPACITY);
        assert_eq!(buffer.oldest().unwrap().packet_id, 40);
        assert_eq!(buffer.latest().unwrap().packet_id, 59);
    }

    #[test]
    fn test_net_growth_at_most_one_per_update() {
        // Mixed sequence of turns and holds: no single update may grow the
        // buffer by more than one or shrink it by more than one.
        let mut buffer = ConvergenceBuffer::new();
        let mut len = 0usize;
        for id in 0..200 {
            let heading = if id % 50 < 25 { (id * 9) as f32 % 360.0 } else { 45.0 };
            buffer.update(trace_sample(heading, id));
            let grew = buffer.len() as i64 - len as i64;
            assert!((-1..=1).contains(&grew), "Net change of {} at update {}", grew, id);
            len = buffer.len();
        }
    }

    #[test]
    fn test_eviction_evaluated_for_placeholder_when_over_capacity() {
        // Grow past capacity during a turn, then deliver a placeholder whose
        // packet id is negative: nothing is appended, but the settled check
        // still runs against the existing front/back pair.
        let mut buffer = ConvergenceBuffer::new();
        for id in 0..25 {
            buffer.update(trace_sample((id * 8) as f32, id));
        }
        assert_eq!(buffer.len(), 25);

        // front = 0 deg, back = 192 deg: not settled, placeholder changes nothing
        buffer.update(trace_sample(10.0, -5));
        assert_eq!(buffer.len(), 25);
    }

    #[test]
    fn test_wraparound_gap_just_at_threshold_keeps_sample() {
        // front 350, back 5: direct delta 345, wrap check 365 - 350 = 15,
        // which is not strictly below the threshold, so no eviction.
        let mut buffer = ConvergenceBuffer::new();
        buffer.update(trace_sample(350.0, 0));
        for id in 1..=TRACE_SOFT_CAPACITY as i64 {
            buffer.update(trace_sample(5.0, id));
        }

        assert_eq!(buffer.len(), TRACE_SOFT_CAPACITY + 1);
        assert_eq!(buffer.oldest().unwrap().packet_id, 0);
    }

    #[test]
    fn test_wraparound_gap_below_threshold_evicts() {
        // front 358, back 2: wrap check 362 - 358 = 4 < 15, eviction occurs.
        let mut buffer = ConvergenceBuffer::new();
        buffer.update(trace_sample(358.0, 0));
        for id in 1..TRACE_SOFT_CAPACITY as i64 {
            buffer.update(trace_sample(180.0, id));
        }
        buffer.update(trace_sample(2.0, TRACE_SOFT_CAPACITY as i64));

        assert_eq!(buffer.len(), TRACE_SOFT_CAPACITY);
        assert_eq!(buffer.oldest().unwrap().packet_id, 1);
    }

    #[test]
    fn test_headings_settled_direct() {
        assert!(headings_settled(10.0, 20.0));
        assert!(headings_settled(20.0, 10.0));
        assert!(headings_settled(100.0, 100.0));
        assert!(!headings_settled(10.0, 25.0)); // exactly 15 is not settled
        assert!(!headings_settled(0.0, 180.0));
    }

    #[test]
    fn test_headings_settled_across_wrap() {
        assert!(headings_settled(358.0, 2.0));
        assert!(headings_settled(2.0, 358.0));
        assert!(!headings_settled(350.0, 5.0)); // wrap gap is exactly 15
        assert!(!headings_settled(340.0, 20.0));
    }

    #[test]
    fn test_iteration_is_oldest_first() {
        let mut buffer = ConvergenceBuffer::new();
        for id in 0..4 {
            buffer.update(trace_sample(90.0, id));
        }

        let ids: Vec<i64> = buffer.iter().map(|s| s.packet_id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }
}
