//! Timed action segments
//!
//! A segment is one block of a timeline: an action with its own
//! parameters, a duration and an easing curve. Curves here map eased
//! progress onto a pose; the timeline decides which segment is active and
//! adds drift from earlier segments.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use crate::easing::Easing;
use crate::error::{check_finite, check_param, Result};
use crate::pose::{Color, Pose, Trail, TrailGhost};

/// Tint during an attack's wind-up
pub const ATTACK_WINDUP_COLOR: Color = Color::rgb(1.0, 0.85, 0.4);

/// Tint during an attack's strike
pub const ATTACK_STRIKE_COLOR: Color = Color::rgb(1.0, 0.3, 0.2);

/// Tint while reeling from a hit
pub const HIT_COLOR: Color = Color::rgb(1.0, 0.2, 0.2);

/// Length of one hit flicker half-period (ms)
pub const HIT_FLICKER_MS: f64 = 60.0;

/// Progress lag between consecutive dodge ghosts
const TRAIL_LAG: f32 = 0.06;

fn default_height() -> f32 {
    100.0
}

fn default_flip_height() -> f32 {
    60.0
}

fn default_hop_height() -> f32 {
    60.0
}

fn default_float_height() -> f32 {
    40.0
}

fn default_rotation() -> f32 {
    360.0
}

fn default_bounce_count() -> u32 {
    3
}

fn default_roll_speed() -> f32 {
    1.0
}

fn default_attack_distance() -> f32 {
    40.0
}

fn default_dodge_distance() -> f32 {
    60.0
}

fn default_intensity() -> f32 {
    10.0
}

/// Arc up and back down, optionally travelling
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct JumpAction {
    #[serde(default = "default_height")]
    pub height: f32,
    #[serde(default)]
    pub distance: f32,
}

/// Linear drop, optionally tumbling (rotation in degrees)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FallAction {
    #[serde(default = "default_height")]
    pub height: f32,
    #[serde(default)]
    pub rotation: f32,
}

/// Full somersault over an arc
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlipAction {
    #[serde(default = "default_flip_height")]
    pub height: f32,
}

/// Rotation in place (degrees)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpinAction {
    #[serde(default = "default_rotation")]
    pub rotation: f32,
}

/// Several hops packed into one segment
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BounceAction {
    #[serde(default = "default_hop_height")]
    pub height: f32,
    #[serde(default)]
    pub distance: f32,
    #[serde(default = "default_bounce_count")]
    pub bounce_count: u32,
}

/// Lift off and hover with a shimmer
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FloatAction {
    #[serde(default = "default_float_height")]
    pub height: f32,
    #[serde(default)]
    pub distance: f32,
}

/// Travel while turning full circles
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RollAction {
    #[serde(default)]
    pub distance: f32,
    /// Full turns per segment
    #[serde(default = "default_roll_speed")]
    pub speed: f32,
}

/// Lunge forward and back
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttackAction {
    #[serde(default = "default_attack_distance")]
    pub distance: f32,
}

/// Duck backward leaving afterimages
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DodgeAction {
    #[serde(default = "default_dodge_distance")]
    pub distance: f32,
}

/// Shake that dies out over the segment
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HitAction {
    #[serde(default = "default_intensity")]
    pub intensity: f32,
}

/// What a segment does
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
    Jump(JumpAction),
    Fall(FallAction),
    Land,
    Idle,
    Flip(FlipAction),
    Spin(SpinAction),
    Bounce(BounceAction),
    Float(FloatAction),
    Roll(RollAction),
    Attack(AttackAction),
    Dodge(DodgeAction),
    Hit(HitAction),
}

/// Everything a curve needs besides its own parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveInput {
    /// Eased progress
    pub progress: f32,
    /// Milliseconds since the segment began
    pub local_ms: f64,
    /// Seed for per-evaluation jitter
    pub seed: u64,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Jump(_) => "jump",
            Action::Fall(_) => "fall",
            Action::Land => "land",
            Action::Idle => "idle",
            Action::Flip(_) => "flip",
            Action::Spin(_) => "spin",
            Action::Bounce(_) => "bounce",
            Action::Float(_) => "float",
            Action::Roll(_) => "roll",
            Action::Attack(_) => "attack",
            Action::Dodge(_) => "dodge",
            Action::Hit(_) => "hit",
        }
    }

    /// Horizontal displacement this action leaves behind once complete.
    ///
    /// Only travelling actions carry forward; the rest return to where
    /// they started.
    pub fn drift(&self) -> f32 {
        match self {
            Action::Jump(a) => a.distance,
            Action::Bounce(a) => a.distance,
            Action::Float(a) => a.distance,
            Action::Roll(a) => a.distance,
            _ => 0.0,
        }
    }

    /// Pose at eased progress `input.progress`, before drift
    pub fn sample(&self, input: CurveInput) -> Pose {
        let p = input.progress;
        let arc = (PI * p).sin();
        let pose = Pose::identity();

        match self {
            Action::Jump(a) => pose.with_offset(a.distance * p, -a.height * arc),
            Action::Fall(a) => pose
                .with_offset(0.0, a.height * p)
                .with_rotation((a.rotation * p).to_radians()),
            Action::Land => pose.with_scale_xy(1.0 + 0.2 * arc, 1.0 - 0.2 * arc),
            Action::Idle => {
                let breath = (2.0 * PI * p).sin();
                pose.with_offset(0.0, 2.0 * breath)
                    .with_scale_xy(1.0, 1.0 + 0.02 * breath)
            }
            Action::Flip(a) => pose
                .with_offset(0.0, -a.height * arc)
                .with_rotation((360.0 * p).to_radians()),
            Action::Spin(a) => pose.with_rotation((a.rotation * p).to_radians()),
            Action::Bounce(a) => {
                let hop = (p * a.bounce_count as f32).rem_euclid(1.0);
                pose.with_offset(a.distance * p, -a.height * (PI * hop).sin().abs())
            }
            Action::Float(a) => pose
                .with_offset(a.distance * p, -a.height + 10.0 * (4.0 * PI * p).sin())
                .with_opacity(0.7 + 0.3 * (2.0 * PI * p).sin()),
            Action::Roll(a) => pose
                .with_offset(a.distance * p, 0.0)
                .with_rotation((360.0 * p * a.speed).to_radians()),
            Action::Attack(a) => {
                let color = if p > 0.5 {
                    ATTACK_STRIKE_COLOR
                } else {
                    ATTACK_WINDUP_COLOR
                };
                pose.with_offset(a.distance * arc, 0.0)
                    .with_scale_xy(1.0 + 0.3 * arc, 1.0)
                    .with_color(color)
            }
            Action::Dodge(a) => {
                let mut pose = pose
                    .with_offset(-a.distance * arc, 0.0)
                    .with_rotation((-20.0 * arc).to_radians());
                pose.trail = dodge_trail(a.distance, p);
                pose
            }
            Action::Hit(a) => {
                let amplitude = a.intensity * (1.0 - p);
                let mut rng = SmallRng::seed_from_u64(input.seed);
                let dx = rng.gen_range(-1.0f32..=1.0) * amplitude;
                let dy = rng.gen_range(-1.0f32..=1.0) * amplitude;
                let flicker = (input.local_ms / HIT_FLICKER_MS) as u64 % 2 == 1;
                pose.with_offset(dx, dy)
                    .with_color(HIT_COLOR)
                    .with_opacity(if flicker { 0.5 } else { 1.0 })
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Action::Jump(a) => {
                check_param("height", a.height)?;
                check_finite("distance", a.distance)
            }
            Action::Fall(a) => {
                check_param("height", a.height)?;
                check_finite("rotation", a.rotation)
            }
            Action::Land | Action::Idle => Ok(()),
            Action::Flip(a) => check_param("height", a.height),
            Action::Spin(a) => check_finite("rotation", a.rotation),
            Action::Bounce(a) => {
                check_param("height", a.height)?;
                check_finite("distance", a.distance)
            }
            Action::Float(a) => {
                check_param("height", a.height)?;
                check_finite("distance", a.distance)
            }
            Action::Roll(a) => {
                check_finite("distance", a.distance)?;
                check_param("speed", a.speed)
            }
            Action::Attack(a) => check_finite("distance", a.distance),
            Action::Dodge(a) => check_finite("distance", a.distance),
            Action::Hit(a) => check_param("intensity", a.intensity),
        }
    }
}

/// Afterimages at slightly earlier progress, fading with age.
fn dodge_trail(distance: f32, p: f32) -> Trail {
    (1..=3)
        .map(|i| {
            let earlier = (p - TRAIL_LAG * i as f32).max(0.0);
            TrailGhost {
                x: -distance * (PI * earlier).sin(),
                y: 0.0,
                opacity: 0.45 * (1.0 - i as f32 / 4.0),
            }
        })
        .collect()
}

/// One timed block of a timeline
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(rename = "duration", alias = "duration_ms")]
    pub duration_ms: u32,
    #[serde(default)]
    pub easing: Easing,
    #[serde(flatten)]
    pub action: Action,
}

impl Segment {
    pub fn new(action: Action, duration_ms: u32) -> Self {
        Self {
            duration_ms,
            easing: Easing::Linear,
            action,
        }
    }

    /// Builder: set easing
    pub fn ease(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn jump(duration_ms: u32, height: f32, distance: f32) -> Self {
        Self::new(Action::Jump(JumpAction { height, distance }), duration_ms)
    }

    pub fn fall(duration_ms: u32, height: f32) -> Self {
        Self::new(
            Action::Fall(FallAction {
                height,
                rotation: 0.0,
            }),
            duration_ms,
        )
    }

    pub fn land(duration_ms: u32) -> Self {
        Self::new(Action::Land, duration_ms)
    }

    pub fn idle(duration_ms: u32) -> Self {
        Self::new(Action::Idle, duration_ms)
    }

    pub fn flip(duration_ms: u32, height: f32) -> Self {
        Self::new(Action::Flip(FlipAction { height }), duration_ms)
    }

    pub fn spin(duration_ms: u32, degrees: f32) -> Self {
        Self::new(Action::Spin(SpinAction { rotation: degrees }), duration_ms)
    }

    pub fn bounce(duration_ms: u32, height: f32, distance: f32, bounce_count: u32) -> Self {
        Self::new(
            Action::Bounce(BounceAction {
                height,
                distance,
                bounce_count,
            }),
            duration_ms,
        )
    }

    pub fn float(duration_ms: u32, height: f32, distance: f32) -> Self {
        Self::new(Action::Float(FloatAction { height, distance }), duration_ms)
    }

    pub fn roll(duration_ms: u32, distance: f32, speed: f32) -> Self {
        Self::new(Action::Roll(RollAction { distance, speed }), duration_ms)
    }

    pub fn attack(duration_ms: u32, distance: f32) -> Self {
        Self::new(Action::Attack(AttackAction { distance }), duration_ms)
    }

    pub fn dodge(duration_ms: u32, distance: f32) -> Self {
        Self::new(Action::Dodge(DodgeAction { distance }), duration_ms)
    }

    pub fn hit(duration_ms: u32, intensity: f32) -> Self {
        Self::new(Action::Hit(HitAction { intensity }), duration_ms)
    }
}
