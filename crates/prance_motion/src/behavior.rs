//! Behavior configurations
//!
//! A behavior is a continuous, looping motion pattern driven by delta-time.
//! Each variant carries only the parameters it reads; serde defaults fill
//! anything an author leaves out.

use serde::{Deserialize, Serialize};

use crate::error::{check_param, Result};
use crate::geometry::Direction;

/// Discriminant of a [`BehaviorConfig`], used to decide when state resets
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BehaviorKind {
    None,
    Patrol,
    Bounce,
    Float,
    Jump,
    Flip,
    Stalker,
    Roll,
    Prowl,
}

impl BehaviorKind {
    pub fn name(self) -> &'static str {
        match self {
            BehaviorKind::None => "none",
            BehaviorKind::Patrol => "patrol",
            BehaviorKind::Bounce => "bounce",
            BehaviorKind::Float => "float",
            BehaviorKind::Jump => "jump",
            BehaviorKind::Flip => "flip",
            BehaviorKind::Stalker => "stalker",
            BehaviorKind::Roll => "roll",
            BehaviorKind::Prowl => "prowl",
        }
    }
}

/// Behavior configuration for one actor
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BehaviorConfig {
    /// Stands still
    #[default]
    None,
    /// Walks back and forth around the anchor
    Patrol(PatrolParams),
    /// Patrols while hopping
    Bounce(BounceParams),
    /// Hovers up and down in place
    Float(FloatParams),
    /// Hops periodically in place
    Jump(JumpParams),
    /// Somersaults along a figure path
    Flip(FlipParams),
    /// Hides, dashes out, then slinks back
    Stalker(StalkerParams),
    /// Rolls back and forth like a wheel
    Roll(RollParams),
    /// Paces smoothly with a slight bob
    Prowl(ProwlParams),
}

impl BehaviorConfig {
    pub fn kind(&self) -> BehaviorKind {
        match self {
            BehaviorConfig::None => BehaviorKind::None,
            BehaviorConfig::Patrol(_) => BehaviorKind::Patrol,
            BehaviorConfig::Bounce(_) => BehaviorKind::Bounce,
            BehaviorConfig::Float(_) => BehaviorKind::Float,
            BehaviorConfig::Jump(_) => BehaviorKind::Jump,
            BehaviorConfig::Flip(_) => BehaviorKind::Flip,
            BehaviorConfig::Stalker(_) => BehaviorKind::Stalker,
            BehaviorConfig::Roll(_) => BehaviorKind::Roll,
            BehaviorConfig::Prowl(_) => BehaviorKind::Prowl,
        }
    }

    /// Starting direction of travel, for behaviors that have one
    pub fn initial_direction(&self) -> Direction {
        match self {
            BehaviorConfig::Patrol(p) => p.direction,
            BehaviorConfig::Bounce(p) => p.direction,
            BehaviorConfig::Stalker(p) => p.direction,
            BehaviorConfig::Roll(p) => p.direction,
            _ => Direction::Forward,
        }
    }

    /// Whether the sprite mirrors itself to face its direction of travel
    pub fn flips_on_turn(&self) -> bool {
        match self {
            BehaviorConfig::Patrol(p) => p.flip_on_turn,
            BehaviorConfig::Bounce(p) => p.flip_on_turn,
            BehaviorConfig::Stalker(_) | BehaviorConfig::Prowl(_) => true,
            _ => false,
        }
    }

    /// Check every parameter is finite and non-negative
    pub fn validate(&self) -> Result<()> {
        match self {
            BehaviorConfig::None => Ok(()),
            BehaviorConfig::Patrol(p) => p.validate(),
            BehaviorConfig::Bounce(p) => {
                p.patrol().validate()?;
                check_param("bounce_height", p.bounce_height)?;
                check_param("frequency", p.frequency)
            }
            BehaviorConfig::Float(p) => check_param("float_amount", p.float_amount),
            BehaviorConfig::Jump(p) => {
                check_param("bounce_height", p.bounce_height)?;
                check_param("jump_interval", p.jump_interval)
            }
            BehaviorConfig::Flip(p) => {
                check_param("speed", p.speed)?;
                check_param("patrol_width", p.patrol_width)?;
                check_param("amplitude", p.amplitude)
            }
            BehaviorConfig::Stalker(p) => {
                check_param("speed", p.speed)?;
                check_param("hide_time", p.hide_time)?;
                check_param("chase_speed", p.chase_speed)
            }
            BehaviorConfig::Roll(p) => p.patrol().validate(),
            BehaviorConfig::Prowl(p) => {
                check_param("speed", p.speed)?;
                check_param("patrol_width", p.patrol_width)
            }
        }
    }
}

fn default_speed() -> f32 {
    60.0
}

fn default_patrol_width() -> f32 {
    200.0
}

fn default_true() -> bool {
    true
}

/// Back-and-forth walk around the anchor
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatrolParams {
    /// Pixels per second
    #[serde(default = "default_speed")]
    pub speed: f32,
    /// Full width of the walk; the actor stays within half of it either side
    #[serde(default = "default_patrol_width")]
    pub patrol_width: f32,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default = "default_true")]
    pub flip_on_turn: bool,
}

impl Default for PatrolParams {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            patrol_width: default_patrol_width(),
            direction: Direction::Forward,
            flip_on_turn: true,
        }
    }
}

impl PatrolParams {
    pub fn new(speed: f32, patrol_width: f32) -> Self {
        Self {
            speed,
            patrol_width,
            ..Default::default()
        }
    }

    /// Builder: set starting direction
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Builder: set whether the sprite mirrors on each turn
    pub fn with_flip_on_turn(mut self, flip: bool) -> Self {
        self.flip_on_turn = flip;
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_param("speed", self.speed)?;
        check_param("patrol_width", self.patrol_width)
    }
}

fn default_bounce_height() -> f32 {
    40.0
}

fn default_frequency() -> f32 {
    3.0
}

/// Patrol plus a continuous hop
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BounceParams {
    #[serde(default = "default_speed")]
    pub speed: f32,
    #[serde(default = "default_patrol_width")]
    pub patrol_width: f32,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default = "default_true")]
    pub flip_on_turn: bool,
    /// Peak height of each hop in pixels
    #[serde(default = "default_bounce_height")]
    pub bounce_height: f32,
    /// Phase multiplier; a non-positive value keeps the actor grounded
    #[serde(default = "default_frequency")]
    pub frequency: f32,
}

impl Default for BounceParams {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            patrol_width: default_patrol_width(),
            direction: Direction::Forward,
            flip_on_turn: true,
            bounce_height: default_bounce_height(),
            frequency: default_frequency(),
        }
    }
}

impl BounceParams {
    /// The horizontal part of the behavior
    pub fn patrol(&self) -> PatrolParams {
        PatrolParams {
            speed: self.speed,
            patrol_width: self.patrol_width,
            direction: self.direction,
            flip_on_turn: self.flip_on_turn,
        }
    }
}

fn default_float_amount() -> f32 {
    10.0
}

/// Vertical hover in place
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FloatParams {
    #[serde(default = "default_float_amount")]
    pub float_amount: f32,
}

impl Default for FloatParams {
    fn default() -> Self {
        Self {
            float_amount: default_float_amount(),
        }
    }
}

fn default_jump_height() -> f32 {
    60.0
}

fn default_jump_interval() -> f32 {
    1500.0
}

/// Periodic hop; airborne for the first half of every interval
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct JumpParams {
    #[serde(default = "default_jump_height")]
    pub bounce_height: f32,
    /// Cycle length in milliseconds; non-positive disables jumping
    #[serde(default = "default_jump_interval")]
    pub jump_interval: f32,
}

impl Default for JumpParams {
    fn default() -> Self {
        Self {
            bounce_height: default_jump_height(),
            jump_interval: default_jump_interval(),
        }
    }
}

fn default_flip_speed() -> f32 {
    50.0
}

fn default_amplitude() -> f32 {
    20.0
}

/// Figure path with continuous somersault
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlipParams {
    #[serde(default = "default_flip_speed")]
    pub speed: f32,
    #[serde(default = "default_patrol_width")]
    pub patrol_width: f32,
    #[serde(default = "default_amplitude")]
    pub amplitude: f32,
}

impl Default for FlipParams {
    fn default() -> Self {
        Self {
            speed: default_flip_speed(),
            patrol_width: default_patrol_width(),
            amplitude: default_amplitude(),
        }
    }
}

fn default_stalker_speed() -> f32 {
    80.0
}

fn default_hide_time() -> f32 {
    2000.0
}

fn default_chase_speed() -> f32 {
    200.0
}

/// Hidden -> Chasing -> Retreating cycle
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StalkerParams {
    /// Retreat speed in pixels per second
    #[serde(default = "default_stalker_speed")]
    pub speed: f32,
    #[serde(default)]
    pub direction: Direction,
    /// Milliseconds spent hidden before each dash
    #[serde(default = "default_hide_time")]
    pub hide_time: f32,
    /// Dash speed in pixels per second
    #[serde(default = "default_chase_speed")]
    pub chase_speed: f32,
}

impl Default for StalkerParams {
    fn default() -> Self {
        Self {
            speed: default_stalker_speed(),
            direction: Direction::Forward,
            hide_time: default_hide_time(),
            chase_speed: default_chase_speed(),
        }
    }
}

fn default_roll_speed() -> f32 {
    80.0
}

/// Patrol with wheel-like spin
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RollParams {
    #[serde(default = "default_roll_speed")]
    pub speed: f32,
    #[serde(default = "default_patrol_width")]
    pub patrol_width: f32,
    #[serde(default)]
    pub direction: Direction,
}

impl Default for RollParams {
    fn default() -> Self {
        Self {
            speed: default_roll_speed(),
            patrol_width: default_patrol_width(),
            direction: Direction::Forward,
        }
    }
}

impl RollParams {
    /// The horizontal part of the behavior; a rolling actor never mirrors
    pub fn patrol(&self) -> PatrolParams {
        PatrolParams {
            speed: self.speed,
            patrol_width: self.patrol_width,
            direction: self.direction,
            flip_on_turn: false,
        }
    }
}

fn default_prowl_speed() -> f32 {
    50.0
}

/// Smooth pacing with a small bob
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProwlParams {
    #[serde(default = "default_prowl_speed")]
    pub speed: f32,
    #[serde(default = "default_patrol_width")]
    pub patrol_width: f32,
}

impl Default for ProwlParams {
    fn default() -> Self {
        Self {
            speed: default_prowl_speed(),
            patrol_width: default_patrol_width(),
        }
    }
}
