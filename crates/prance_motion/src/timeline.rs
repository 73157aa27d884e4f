//! Timeline evaluation
//!
//! A timeline is an ordered list of segments played back to back. It is
//! evaluated as a pure function of elapsed time: nothing is remembered
//! between calls, so scrubbers and live previews can share one freely.

use serde::{Deserialize, Serialize};

use crate::error::{MotionError, Result};
use crate::pose::Pose;
use crate::segment::{CurveInput, Segment};

/// Where a playhead falls inside a timeline
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveSegment {
    pub index: usize,
    /// Timeline time at which the segment starts (ms)
    pub start_ms: f64,
    /// Raw progress through the segment, in [0, 1)
    pub local_progress: f32,
    /// Progress after the segment's easing
    pub eased_progress: f32,
    /// Horizontal displacement left behind by completed segments
    pub drift: f32,
}

/// Ordered, caller-owned list of segments
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeline {
    pub segments: Vec<Segment>,
}

impl From<Vec<Segment>> for Timeline {
    fn from(segments: Vec<Segment>) -> Self {
        Self { segments }
    }
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: append a segment
    pub fn then(mut self, segment: Segment) -> Self {
        self.segments.push(segment);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Sum of segment durations (ms)
    pub fn total_duration_ms(&self) -> u64 {
        total_duration_ms(&self.segments)
    }

    pub fn locate(&self, t_ms: f64) -> Option<ActiveSegment> {
        locate(&self.segments, t_ms)
    }

    pub fn evaluate(&self, t_ms: f64) -> Pose {
        evaluate(&self.segments, t_ms)
    }

    /// Every segment must have a duration and sane parameters
    pub fn validate(&self) -> Result<()> {
        for (index, segment) in self.segments.iter().enumerate() {
            if segment.duration_ms == 0 {
                return Err(MotionError::ZeroDuration { index });
            }
            segment.action.validate()?;
        }
        Ok(())
    }
}

/// Sum of segment durations (ms)
pub fn total_duration_ms(segments: &[Segment]) -> u64 {
    segments.iter().map(|s| u64::from(s.duration_ms)).sum()
}

/// Find the segment active at `t_ms`.
///
/// Returns `None` before the start, at or after the end, and for an
/// empty list. Zero-length segments are never active.
pub fn locate(segments: &[Segment], t_ms: f64) -> Option<ActiveSegment> {
    if t_ms.is_nan() || t_ms < 0.0 {
        return None;
    }

    let mut start = 0.0_f64;
    let mut drift = 0.0_f32;
    for (index, segment) in segments.iter().enumerate() {
        let duration = f64::from(segment.duration_ms);
        let end = start + duration;
        if end > t_ms {
            let local = (((t_ms - start) / duration) as f32).clamp(0.0, 1.0);
            // Stay strictly below 1.0 so the segment never reports completion
            let local = if local >= 1.0 { 1.0 - f32::EPSILON } else { local };
            return Some(ActiveSegment {
                index,
                start_ms: start,
                local_progress: local,
                eased_progress: segment.easing.apply(local),
                drift,
            });
        }
        drift += segment.action.drift();
        start = end;
    }
    None
}

/// Pose at `t_ms` into the timeline.
///
/// Outside the timeline this is the identity pose, so every `t` at or past
/// the end evaluates to the same value.
pub fn evaluate(segments: &[Segment], t_ms: f64) -> Pose {
    let Some(active) = locate(segments, t_ms) else {
        return Pose::identity();
    };

    let segment = &segments[active.index];
    let mut pose = segment.action.sample(CurveInput {
        progress: active.eased_progress,
        local_ms: t_ms - active.start_ms,
        seed: jitter_seed(active.index, t_ms),
    });
    pose.x += active.drift;
    for ghost in pose.trail.iter_mut() {
        ghost.x += active.drift;
    }
    pose
}

/// Stable seed over the segment index and the bit pattern of the playhead.
fn jitter_seed(index: usize, t_ms: f64) -> u64 {
    let mut h: u64 = 0xcbf2_9ce4_8422_2325;
    for word in [index as u64, t_ms.to_bits()] {
        h ^= word;
        h = h.wrapping_mul(0x0000_0100_0000_01b3);
    }
    h
}

/// A playhead over an owned timeline
#[derive(Clone, Debug)]
pub struct TimelinePlayer {
    timeline: Timeline,
    playhead_ms: f64,
    playing: bool,
    loop_count: i32, // -1 for infinite
    current_loop: i32,
}

impl TimelinePlayer {
    pub fn new(timeline: Timeline) -> Self {
        Self {
            timeline,
            playhead_ms: 0.0,
            playing: false,
            loop_count: 1,
            current_loop: 0,
        }
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn start(&mut self) {
        self.playhead_ms = 0.0;
        self.current_loop = 0;
        self.playing = true;
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }

    /// Number of plays; -1 loops forever
    pub fn set_loop(&mut self, count: i32) {
        self.loop_count = count;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn playhead_ms(&self) -> f64 {
        self.playhead_ms
    }

    pub fn current_loop(&self) -> i32 {
        self.current_loop
    }

    /// Jump the playhead, clamped to the timeline
    pub fn seek(&mut self, t_ms: f64) {
        let total = self.timeline.total_duration_ms() as f64;
        self.playhead_ms = if t_ms.is_nan() { 0.0 } else { t_ms.clamp(0.0, total) };
    }

    /// Advance the playhead
    pub fn tick(&mut self, dt_ms: f32) {
        if !self.playing {
            return;
        }

        let total = self.timeline.total_duration_ms() as f64;
        self.playhead_ms += f64::from(dt_ms.max(0.0));

        if self.playhead_ms >= total {
            if total > 0.0
                && (self.loop_count == -1 || self.current_loop < self.loop_count - 1)
            {
                self.playhead_ms = self.playhead_ms.rem_euclid(total);
                self.current_loop += 1;
            } else {
                self.playhead_ms = total;
                self.playing = false;
            }
        }
    }

    /// Pose at the playhead
    pub fn pose(&self) -> Pose {
        self.timeline.evaluate(self.playhead_ms)
    }
}
