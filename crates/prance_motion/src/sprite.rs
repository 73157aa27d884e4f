//! Sprite frame sequencing
//!
//! Picks which frame of an actor's sprite library is active. Three drive
//! modes exist and the first usable one wins:
//!
//! 1. a prescribed cyclic order (`frame_order` + `frame_durations`), as the
//!    canonical presets use
//! 2. an explicit list of timed frames, looping or clamping at the end
//! 3. the first frame of the library, held forever
//!
//! A blink overlay, when present, runs on its own timer and overrides the
//! base selection while it is active.

use serde::{Deserialize, Serialize};

use crate::error::{check_param, MotionError, Result};

/// Identifier of a frame in the host's sprite library
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameId(pub String);

impl FrameId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FrameId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for FrameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One frame of an explicit sequence
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimedFrame {
    pub id: FrameId,
    pub duration_ms: f32,
}

impl TimedFrame {
    pub fn new(id: impl Into<String>, duration_ms: f32) -> Self {
        Self {
            id: FrameId::new(id),
            duration_ms,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Ordered frames with their own durations
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExplicitSequence {
    pub frames: Vec<TimedFrame>,
    /// Wrap to the first frame at the end; otherwise hold the last one
    #[serde(default = "default_true")]
    pub looping: bool,
}

/// Prescribed cyclic order over the sprite library.
///
/// `frame_order[i]` is a library index shown for `frame_durations[i]` ms.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CyclicOrder {
    pub frame_order: Vec<usize>,
    pub frame_durations: Vec<f32>,
}

/// Periodic blink laid over the base sequence
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlinkOverlay {
    /// Eyes-open time per cycle (ms)
    pub interval_ms: f32,
    /// Eyes-closed time per cycle (ms)
    pub duration_ms: f32,
    /// Library index shown while blinking
    pub blink_frame: usize,
    /// Library index shown between blinks
    #[serde(default)]
    pub default_frame: usize,
}

/// Sprite library plus the sequencing rules applied to it
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpriteSequence {
    /// The actor's sprite library
    #[serde(default)]
    pub frames: Vec<FrameId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explicit: Option<ExplicitSequence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cyclic: Option<CyclicOrder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blink: Option<BlinkOverlay>,
}

/// Which rule is driving frame selection
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriveMode {
    Cyclic,
    Explicit,
    Static,
}

/// Playback position within a sprite sequence
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpriteCursor {
    /// Index into the active drive mode's frame list
    pub index: usize,
    /// Playback clock value when the active frame began; unset until the first tick
    pub frame_started_ms: Option<f64>,
    /// Playback time summed from tick deltas, never from host timestamps
    pub clock_ms: f64,
}

impl SpriteSequence {
    /// A library with no sequencing; always shows the first frame
    pub fn still(frames: Vec<FrameId>) -> Self {
        Self {
            frames,
            ..Default::default()
        }
    }

    /// Builder: drive from an explicit timed list
    pub fn with_explicit(mut self, frames: Vec<TimedFrame>, looping: bool) -> Self {
        self.explicit = Some(ExplicitSequence { frames, looping });
        self
    }

    /// Builder: drive from a prescribed cyclic order
    pub fn with_cyclic(mut self, frame_order: Vec<usize>, frame_durations: Vec<f32>) -> Self {
        self.cyclic = Some(CyclicOrder {
            frame_order,
            frame_durations,
        });
        self
    }

    /// Builder: add a blink overlay
    pub fn with_blink(mut self, blink: BlinkOverlay) -> Self {
        self.blink = Some(blink);
        self
    }

    fn cyclic_usable(&self) -> Option<&CyclicOrder> {
        self.cyclic.as_ref().filter(|c| {
            !c.frame_order.is_empty()
                && c.frame_order.len() == c.frame_durations.len()
                && c.frame_order.iter().all(|&i| i < self.frames.len())
        })
    }

    fn explicit_usable(&self) -> Option<&ExplicitSequence> {
        self.explicit.as_ref().filter(|e| !e.frames.is_empty())
    }

    fn blink_usable(&self) -> Option<&BlinkOverlay> {
        self.blink.as_ref().filter(|b| {
            b.interval_ms + b.duration_ms > 0.0
                && b.blink_frame < self.frames.len()
                && b.default_frame < self.frames.len()
        })
    }

    /// The drive mode in effect, after skipping unusable configuration
    pub fn drive_mode(&self) -> DriveMode {
        if self.cyclic_usable().is_some() {
            DriveMode::Cyclic
        } else if self.explicit_usable().is_some() {
            DriveMode::Explicit
        } else {
            DriveMode::Static
        }
    }

    /// Whether some configured rule was skipped because it is malformed
    pub fn is_degraded(&self) -> bool {
        (self.cyclic.is_some() && self.cyclic_usable().is_none())
            || (self.explicit.is_some() && self.explicit_usable().is_none())
            || (self.blink.is_some() && self.blink_usable().is_none())
    }

    /// Advance the cursor for one tick.
    ///
    /// The active frame changes at most once per call, when it has been
    /// shown for at least its duration. Only `dt_ms` moves playback, so a
    /// paused or clamped host gap never skips frames.
    pub fn advance(&self, cursor: &mut SpriteCursor, dt_ms: f32) {
        cursor.clock_ms += f64::from(dt_ms.max(0.0));
        let now_ms = cursor.clock_ms;

        let started = match cursor.frame_started_ms {
            Some(started) => started,
            None => {
                cursor.frame_started_ms = Some(now_ms);
                return;
            }
        };

        match self.drive_mode() {
            DriveMode::Cyclic => {
                let Some(cyclic) = self.cyclic_usable() else {
                    return;
                };
                let len = cyclic.frame_order.len();
                let index = cursor.index % len;
                if now_ms - started >= f64::from(cyclic.frame_durations[index]) {
                    cursor.index = (index + 1) % len;
                    cursor.frame_started_ms = Some(now_ms);
                }
            }
            DriveMode::Explicit => {
                let Some(explicit) = self.explicit_usable() else {
                    return;
                };
                let last = explicit.frames.len() - 1;
                let index = cursor.index.min(last);
                if now_ms - started >= f64::from(explicit.frames[index].duration_ms) {
                    cursor.index = if index < last {
                        index + 1
                    } else if explicit.looping {
                        0
                    } else {
                        last
                    };
                    cursor.frame_started_ms = Some(now_ms);
                }
            }
            DriveMode::Static => {
                cursor.index = 0;
            }
        }
    }

    /// Base frame for a cursor, before the blink overlay
    fn base_frame(&self, index: usize) -> Option<&FrameId> {
        match self.drive_mode() {
            DriveMode::Cyclic => {
                let cyclic = self.cyclic_usable()?;
                let slot = cyclic.frame_order[index % cyclic.frame_order.len()];
                self.frames.get(slot)
            }
            DriveMode::Explicit => {
                let explicit = self.explicit_usable()?;
                let last = explicit.frames.len() - 1;
                Some(&explicit.frames[index.min(last)].id)
            }
            DriveMode::Static => self.frames.first(),
        }
    }

    /// Blink override for a given blink timer, if the overlay is active
    fn blink_frame(&self, blink_timer_ms: f64) -> Option<&FrameId> {
        let blink = self.blink_usable()?;
        let period = f64::from(blink.interval_ms) + f64::from(blink.duration_ms);
        let cycle = blink_timer_ms.rem_euclid(period);
        let slot = if cycle < f64::from(blink.interval_ms) {
            blink.default_frame
        } else {
            blink.blink_frame
        };
        self.frames.get(slot)
    }

    /// The frame to draw for a cursor
    pub fn resolve(&self, cursor: &SpriteCursor) -> Option<&FrameId> {
        self.blink_frame(cursor.clock_ms)
            .or_else(|| self.base_frame(cursor.index))
    }

    /// Frame shown `elapsed_ms` after playback started, without a cursor.
    ///
    /// Matches what per-tick advancing converges to with small ticks.
    pub fn frame_at(&self, elapsed_ms: f64) -> Option<&FrameId> {
        let elapsed = elapsed_ms.max(0.0);
        if let Some(frame) = self.blink_frame(elapsed) {
            return Some(frame);
        }
        let index = match self.drive_mode() {
            DriveMode::Cyclic => {
                let cyclic = self.cyclic_usable()?;
                index_at(&cyclic.frame_durations, elapsed, true)
            }
            DriveMode::Explicit => {
                let explicit = self.explicit_usable()?;
                let durations: Vec<f32> = explicit.frames.iter().map(|f| f.duration_ms).collect();
                index_at(&durations, elapsed, explicit.looping)
            }
            DriveMode::Static => 0,
        };
        self.base_frame(index)
    }

    /// Range sanity: non-negative durations, in-range indices, non-empty lists
    pub fn validate(&self) -> Result<()> {
        if let Some(explicit) = &self.explicit {
            if explicit.frames.is_empty() {
                return Err(MotionError::EmptySequence);
            }
            for frame in &explicit.frames {
                check_param("frame duration_ms", frame.duration_ms)?;
            }
        }
        if let Some(cyclic) = &self.cyclic {
            if cyclic.frame_order.len() != cyclic.frame_durations.len() {
                return Err(MotionError::LengthMismatch {
                    order: cyclic.frame_order.len(),
                    durations: cyclic.frame_durations.len(),
                });
            }
            for &index in &cyclic.frame_order {
                if index >= self.frames.len() {
                    return Err(MotionError::FrameOutOfRange {
                        context: "prescribed",
                        index,
                        len: self.frames.len(),
                    });
                }
            }
            for &duration in &cyclic.frame_durations {
                check_param("frame_durations", duration)?;
            }
        }
        if let Some(blink) = &self.blink {
            check_param("blink interval_ms", blink.interval_ms)?;
            check_param("blink duration_ms", blink.duration_ms)?;
            for index in [blink.blink_frame, blink.default_frame] {
                if index >= self.frames.len() {
                    return Err(MotionError::FrameOutOfRange {
                        context: "blink",
                        index,
                        len: self.frames.len(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Index of the frame active `elapsed` ms into a list of durations.
fn index_at(durations: &[f32], elapsed: f64, looping: bool) -> usize {
    let last = durations.len().saturating_sub(1);
    let total: f64 = durations.iter().map(|&d| f64::from(d.max(0.0))).sum();
    if total <= 0.0 {
        return 0;
    }
    let t = if looping {
        elapsed.rem_euclid(total)
    } else if elapsed >= total {
        return last;
    } else {
        elapsed
    };

    let mut acc = 0.0;
    for (i, &duration) in durations.iter().enumerate() {
        acc += f64::from(duration.max(0.0));
        if t < acc {
            return i;
        }
    }
    last
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library(n: usize) -> Vec<FrameId> {
        (0..n).map(|i| FrameId::new(format!("f{i}"))).collect()
    }

    fn run(seq: &SpriteSequence, until_ms: f64, step_ms: f32) -> SpriteCursor {
        let mut cursor = SpriteCursor::default();
        let mut now = 0.0;
        seq.advance(&mut cursor, 0.0);
        while now < until_ms {
            now += f64::from(step_ms);
            seq.advance(&mut cursor, step_ms);
        }
        cursor
    }

    #[test]
    fn test_explicit_clamps_without_loop() {
        let seq = SpriteSequence::still(library(3)).with_explicit(
            vec![
                TimedFrame::new("a", 100.0),
                TimedFrame::new("b", 100.0),
                TimedFrame::new("c", 100.0),
            ],
            false,
        );
        let cursor = run(&seq, 1000.0, 10.0);
        assert_eq!(cursor.index, 2);
        assert_eq!(seq.resolve(&cursor), Some(&FrameId::new("c")));
        assert_eq!(seq.frame_at(1000.0), Some(&FrameId::new("c")));
    }

    #[test]
    fn test_explicit_wraps_with_loop() {
        let seq = SpriteSequence::still(library(3)).with_explicit(
            vec![
                TimedFrame::new("a", 100.0),
                TimedFrame::new("b", 100.0),
                TimedFrame::new("c", 100.0),
            ],
            true,
        );
        let cursor = run(&seq, 1000.0, 10.0);
        assert_eq!(cursor.index, 1);
        assert_eq!(seq.frame_at(1000.0), Some(&FrameId::new("b")));
    }

    #[test]
    fn test_cyclic_beats_explicit() {
        let seq = SpriteSequence::still(library(3))
            .with_explicit(vec![TimedFrame::new("x", 100.0)], true)
            .with_cyclic(vec![2, 0], vec![50.0, 50.0]);
        assert_eq!(seq.drive_mode(), DriveMode::Cyclic);
        let cursor = SpriteCursor::default();
        assert_eq!(seq.resolve(&cursor), Some(&FrameId::new("f2")));
        assert_eq!(seq.frame_at(60.0), Some(&FrameId::new("f0")));
        assert_eq!(seq.frame_at(110.0), Some(&FrameId::new("f2")));
    }

    #[test]
    fn test_out_of_range_cyclic_falls_back() {
        let seq = SpriteSequence::still(library(2)).with_cyclic(vec![0, 7], vec![50.0, 50.0]);
        assert_eq!(seq.drive_mode(), DriveMode::Static);
        assert!(seq.is_degraded());
        assert!(seq.validate().is_err());
        let cursor = run(&seq, 500.0, 16.0);
        assert_eq!(seq.resolve(&cursor), Some(&FrameId::new("f0")));
    }

    #[test]
    fn test_empty_library_resolves_nothing() {
        let seq = SpriteSequence::default();
        assert_eq!(seq.resolve(&SpriteCursor::default()), None);
        assert_eq!(seq.frame_at(10.0), None);
    }

    #[test]
    fn test_blink_overrides_base() {
        let seq = SpriteSequence::still(library(3))
            .with_cyclic(vec![1, 2], vec![40.0, 40.0])
            .with_blink(BlinkOverlay {
                interval_ms: 900.0,
                duration_ms: 100.0,
                blink_frame: 2,
                default_frame: 0,
            });
        assert_eq!(seq.frame_at(100.0), Some(&FrameId::new("f0")));
        assert_eq!(seq.frame_at(950.0), Some(&FrameId::new("f2")));
        assert_eq!(seq.frame_at(1050.0), Some(&FrameId::new("f0")));

        let cursor = run(&seq, 920.0, 10.0);
        assert_eq!(seq.resolve(&cursor), Some(&FrameId::new("f2")));
    }

    #[test]
    fn test_first_tick_only_baselines() {
        let seq = SpriteSequence::still(library(2)).with_cyclic(vec![0, 1], vec![10.0, 10.0]);
        let mut cursor = SpriteCursor::default();
        seq.advance(&mut cursor, 16.0);
        assert_eq!(cursor.index, 0);
        assert_eq!(cursor.frame_started_ms, Some(16.0));
        seq.advance(&mut cursor, 16.0);
        assert_eq!(cursor.index, 1);
    }

    #[test]
    fn test_playback_follows_deltas_only() {
        let seq = SpriteSequence::default()
            .with_explicit(vec![TimedFrame::new("a", 1000.0), TimedFrame::new("b", 1000.0)], true);
        let mut cursor = SpriteCursor::default();
        seq.advance(&mut cursor, 0.0);
        seq.advance(&mut cursor, 16.0);
        seq.advance(&mut cursor, 16.0);
        assert_eq!(cursor.clock_ms, 32.0);
        assert_eq!(seq.resolve(&cursor), Some(&FrameId::new("a")));
        seq.advance(&mut cursor, -500.0);
        assert_eq!(cursor.clock_ms, 32.0);
    }

    #[test]
    fn test_validate_length_mismatch() {
        let seq = SpriteSequence::still(library(2)).with_cyclic(vec![0, 1], vec![10.0]);
        assert_eq!(
            seq.validate(),
            Err(MotionError::LengthMismatch {
                order: 2,
                durations: 1
            })
        );
    }
}
