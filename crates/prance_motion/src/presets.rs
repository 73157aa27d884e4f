//! Canonical presets for the showcase
//!
//! Ready-made behaviors, sprite sequences and timelines that an editor can
//! offer as starting points.

use crate::behavior::{
    BehaviorConfig, BounceParams, FlipParams, FloatParams, JumpParams, PatrolParams, ProwlParams,
    RollParams, StalkerParams,
};
use crate::easing::Easing;
use crate::geometry::Direction;
use crate::segment::Segment;
use crate::sprite::{BlinkOverlay, FrameId, SpriteSequence};
use crate::timeline::Timeline;

/// Pre-built behaviors
pub struct BehaviorPreset;

impl BehaviorPreset {
    pub const NAMES: [&'static str; 8] = [
        "wander", "bouncy", "hover", "hopper", "acrobat", "lurker", "roller", "prowler",
    ];

    /// Look a preset up by name
    pub fn by_name(name: &str) -> Option<BehaviorConfig> {
        Some(match name {
            "wander" => Self::wander(),
            "bouncy" => Self::bouncy(),
            "hover" => Self::hover(),
            "hopper" => Self::hopper(),
            "acrobat" => Self::acrobat(),
            "lurker" => Self::lurker(),
            "roller" => Self::roller(),
            "prowler" => Self::prowler(),
            _ => return None,
        })
    }

    /// Slow stroll that turns to face the way it walks
    pub fn wander() -> BehaviorConfig {
        BehaviorConfig::Patrol(PatrolParams::new(40.0, 240.0))
    }

    pub fn bouncy() -> BehaviorConfig {
        BehaviorConfig::Bounce(BounceParams {
            speed: 70.0,
            patrol_width: 260.0,
            bounce_height: 30.0,
            frequency: 4.0,
            ..Default::default()
        })
    }

    pub fn hover() -> BehaviorConfig {
        BehaviorConfig::Float(FloatParams { float_amount: 12.0 })
    }

    pub fn hopper() -> BehaviorConfig {
        BehaviorConfig::Jump(JumpParams {
            bounce_height: 70.0,
            jump_interval: 1200.0,
        })
    }

    pub fn acrobat() -> BehaviorConfig {
        BehaviorConfig::Flip(FlipParams {
            speed: 60.0,
            patrol_width: 220.0,
            amplitude: 25.0,
        })
    }

    pub fn lurker() -> BehaviorConfig {
        BehaviorConfig::Stalker(StalkerParams {
            speed: 90.0,
            direction: Direction::Backward,
            hide_time: 2500.0,
            chase_speed: 240.0,
        })
    }

    pub fn roller() -> BehaviorConfig {
        BehaviorConfig::Roll(RollParams {
            speed: 90.0,
            patrol_width: 300.0,
            direction: Direction::Forward,
        })
    }

    pub fn prowler() -> BehaviorConfig {
        BehaviorConfig::Prowl(ProwlParams {
            speed: 45.0,
            patrol_width: 260.0,
        })
    }
}

/// Default blink timing: eyes open 2.8 s, closed 150 ms
pub const BLINK_INTERVAL_MS: f32 = 2800.0;
pub const BLINK_DURATION_MS: f32 = 150.0;

/// Pre-built sprite sequences using prescribed cyclic orders
pub struct SpritePreset;

impl SpritePreset {
    /// Hold the open-eyed frame and blink periodically
    pub fn idle_blink(open: FrameId, closed: FrameId) -> SpriteSequence {
        SpriteSequence::still(vec![open, closed])
            .with_cyclic(vec![0], vec![1000.0])
            .with_blink(BlinkOverlay {
                interval_ms: BLINK_INTERVAL_MS,
                duration_ms: BLINK_DURATION_MS,
                blink_frame: 1,
                default_frame: 0,
            })
    }

    /// Step through every frame at an even pace, forever
    pub fn walk_cycle(frames: Vec<FrameId>, frame_ms: f32) -> SpriteSequence {
        let order: Vec<usize> = (0..frames.len()).collect();
        let durations = vec![frame_ms; frames.len()];
        SpriteSequence::still(frames).with_cyclic(order, durations)
    }

    /// Two-frame breathing loop that lingers on the rest pose
    pub fn breathe(rest: FrameId, inhale: FrameId) -> SpriteSequence {
        SpriteSequence::still(vec![rest, inhale]).with_cyclic(vec![0, 1, 0], vec![600.0, 400.0, 200.0])
    }
}

/// Pre-built timelines
pub struct TimelinePreset;

impl TimelinePreset {
    pub const NAMES: [&'static str; 3] = ["hop", "combo", "knockback"];

    pub fn by_name(name: &str) -> Option<Timeline> {
        Some(match name {
            "hop" => Self::hop(),
            "combo" => Self::combo(),
            "knockback" => Self::knockback(),
            _ => return None,
        })
    }

    /// Jump forward, land, settle
    pub fn hop() -> Timeline {
        Timeline::new()
            .then(Segment::jump(500, 100.0, 60.0).ease(Easing::EaseOut))
            .then(Segment::land(150))
            .then(Segment::idle(600))
    }

    /// Wind up, strike, dodge the counter, strike again
    pub fn combo() -> Timeline {
        Timeline::new()
            .then(Segment::idle(400))
            .then(Segment::attack(300, 50.0).ease(Easing::EaseInOut))
            .then(Segment::dodge(350, 70.0).ease(Easing::EaseOut))
            .then(Segment::attack(300, 60.0).ease(Easing::EaseInOut))
            .then(Segment::spin(400, 360.0).ease(Easing::Elastic))
    }

    /// Take a hit, get knocked down, bounce back up
    pub fn knockback() -> Timeline {
        Timeline::new()
            .then(Segment::hit(300, 12.0))
            .then(Segment::fall(300, 40.0).ease(Easing::EaseIn))
            .then(Segment::bounce(600, 30.0, -40.0, 2).ease(Easing::Bounce))
            .then(Segment::land(150))
    }
}
