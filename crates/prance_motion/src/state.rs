//! Per-actor mutable simulation state

use serde::{Deserialize, Serialize};

use crate::behavior::BehaviorConfig;
use crate::geometry::{needs_flip, ActorGeometry, Direction};
use crate::sprite::SpriteCursor;

/// Stalker cycle phase
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StalkerPhase {
    #[default]
    Hidden,
    Chasing,
    Retreating,
}

/// Hidden state advanced by the integrator every tick.
///
/// Owned by exactly one actor. Positions are absolute canvas coordinates;
/// the pose reports them relative to the anchor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BehaviorState {
    pub x: f32,
    pub y: f32,
    pub baseline_y: f32,
    pub direction: Direction,
    pub flipped: bool,
    /// Radians; bounded for Bounce, unbounded for Flip and Roll
    pub rotation: f32,
    /// Seconds
    pub bounce_phase: f32,
    /// Seconds
    pub float_phase: f32,
    /// Milliseconds
    pub jump_timer: f32,
    /// Milliseconds spent in the current stalker phase
    pub stalker_timer: f32,
    pub stalker: StalkerPhase,
    /// Milliseconds of simulated time; frozen while the host is paused
    pub elapsed_ms: f64,
    pub sprite: SpriteCursor,
}

impl BehaviorState {
    /// Fresh state for an actor about to run `config`
    pub fn new(config: &BehaviorConfig, geometry: &ActorGeometry) -> Self {
        let direction = config.initial_direction();
        let flipped = config.flips_on_turn() && needs_flip(geometry.facing, direction);
        Self {
            x: geometry.anchor.x,
            y: geometry.anchor.y,
            baseline_y: geometry.anchor.y,
            direction,
            flipped,
            rotation: 0.0,
            bounce_phase: 0.0,
            float_phase: 0.0,
            jump_timer: 0.0,
            stalker_timer: 0.0,
            stalker: StalkerPhase::Hidden,
            elapsed_ms: 0.0,
            sprite: SpriteCursor::default(),
        }
    }

    /// Horizontal offset from the anchor
    pub fn offset_x(&self, geometry: &ActorGeometry) -> f32 {
        self.x - geometry.anchor.x
    }

    /// Vertical offset from the baseline; negative is up
    pub fn offset_y(&self) -> f32 {
        self.y - self.baseline_y
    }

    /// Whether every numeric field is finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.rotation.is_finite()
            && self.bounce_phase.is_finite()
            && self.float_phase.is_finite()
            && self.jump_timer.is_finite()
            && self.stalker_timer.is_finite()
            && self.elapsed_ms.is_finite()
    }
}
