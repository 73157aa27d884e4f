//! Actors
//!
//! An actor bundles host geometry, a behavior, the state that behavior
//! advances, and an optional sprite sequence. Actors never see each other.

use serde::Serialize;

use crate::behavior::BehaviorConfig;
use crate::geometry::ActorGeometry;
use crate::integrator::{state_pose, step, Tick};
use crate::pose::Pose;
use crate::sprite::{FrameId, SpriteCursor, SpriteSequence};
use crate::state::BehaviorState;

/// Everything the renderer needs for one actor this tick
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ActorSnapshot {
    pub name: String,
    pub pose: Pose,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame: Option<FrameId>,
}

/// A single animated character
#[derive(Clone, Debug)]
pub struct Actor {
    name: String,
    geometry: ActorGeometry,
    behavior: BehaviorConfig,
    state: BehaviorState,
    sprite: Option<SpriteSequence>,
}

impl Actor {
    pub fn new(name: impl Into<String>, geometry: ActorGeometry, behavior: BehaviorConfig) -> Self {
        let state = BehaviorState::new(&behavior, &geometry);
        Self {
            name: name.into(),
            geometry,
            behavior,
            state,
            sprite: None,
        }
    }

    /// Builder: attach a sprite sequence
    pub fn with_sprite(mut self, sprite: SpriteSequence) -> Self {
        self.set_sprite(Some(sprite));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn geometry(&self) -> &ActorGeometry {
        &self.geometry
    }

    pub fn behavior(&self) -> &BehaviorConfig {
        &self.behavior
    }

    pub fn state(&self) -> &BehaviorState {
        &self.state
    }

    pub fn sprite(&self) -> Option<&SpriteSequence> {
        self.sprite.as_ref()
    }

    /// Swap the behavior. State survives parameter edits but starts over
    /// when the behavior type changes.
    pub fn set_behavior(&mut self, behavior: BehaviorConfig) {
        if behavior.kind() != self.behavior.kind() {
            tracing::debug!(
                actor = %self.name,
                from = self.behavior.kind().name(),
                to = behavior.kind().name(),
                "behavior type changed, resetting state"
            );
            self.state = BehaviorState::new(&behavior, &self.geometry);
        }
        self.behavior = behavior;
    }

    /// Move the actor. Behaviors pick up the new anchor on their next tick.
    pub fn set_geometry(&mut self, geometry: ActorGeometry) {
        let dy = geometry.anchor.y - self.geometry.anchor.y;
        self.state.baseline_y += dy;
        self.state.y += dy;
        self.geometry = geometry;
    }

    /// Replace the sprite sequence and restart frame playback
    pub fn set_sprite(&mut self, sprite: Option<SpriteSequence>) {
        if let Some(seq) = &sprite {
            if seq.is_degraded() {
                tracing::warn!(
                    actor = %self.name,
                    mode = ?seq.drive_mode(),
                    "sprite sequence is malformed, falling back"
                );
            }
        }
        self.state.sprite = SpriteCursor::default();
        self.sprite = sprite;
    }

    /// Start the current behavior over from the anchor
    pub fn reset(&mut self) {
        self.state = BehaviorState::new(&self.behavior, &self.geometry);
    }

    /// Advance behavior and sprite playback by one tick
    pub fn tick(&mut self, tick: Tick) {
        step(&self.behavior, &mut self.state, &self.geometry, tick);
        if let Some(sprite) = &self.sprite {
            sprite.advance(&mut self.state.sprite, tick.dt_ms);
        }
    }

    /// Whether the state is still numerically sound
    pub fn is_healthy(&self) -> bool {
        self.state.is_finite()
    }

    pub fn pose(&self) -> Pose {
        state_pose(&self.state, &self.geometry)
    }

    pub fn frame(&self) -> Option<&FrameId> {
        self.sprite.as_ref()?.resolve(&self.state.sprite)
    }

    pub fn snapshot(&self) -> ActorSnapshot {
        ActorSnapshot {
            name: self.name.clone(),
            pose: self.pose(),
            frame: self.frame().cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::{FloatParams, PatrolParams};
    use crate::sprite::TimedFrame;

    #[test]
    fn test_parameter_edit_keeps_state() {
        let mut actor = Actor::new(
            "cat",
            ActorGeometry::at(0.0, 0.0),
            BehaviorConfig::Patrol(PatrolParams::new(100.0, 400.0)),
        );
        actor.tick(Tick::new(500.0, 500.0));
        assert_eq!(actor.state().x, 50.0);

        actor.set_behavior(BehaviorConfig::Patrol(PatrolParams::new(10.0, 400.0)));
        assert_eq!(actor.state().x, 50.0);

        actor.set_behavior(BehaviorConfig::Float(FloatParams::default()));
        assert_eq!(actor.state().x, 0.0);
    }

    #[test]
    fn test_moving_anchor_shifts_baseline() {
        let mut actor = Actor::new(
            "ghost",
            ActorGeometry::at(0.0, 100.0),
            BehaviorConfig::Float(FloatParams::default()),
        );
        actor.tick(Tick::new(300.0, 300.0));
        let before = actor.pose();
        actor.set_geometry(ActorGeometry::at(0.0, 250.0));
        assert_eq!(actor.state().baseline_y, 250.0);
        assert!((actor.pose().y - before.y).abs() < 1e-4);
    }

    #[test]
    fn test_snapshot_carries_frame() {
        let sprite = SpriteSequence::default()
            .with_explicit(vec![TimedFrame::new("a", 50.0), TimedFrame::new("b", 50.0)], true);
        let mut actor = Actor::new("dog", ActorGeometry::at(0.0, 0.0), BehaviorConfig::None)
            .with_sprite(sprite);
        actor.tick(Tick::new(0.0, 0.0));
        actor.tick(Tick::new(60.0, 60.0));
        let snapshot = actor.snapshot();
        assert_eq!(snapshot.name, "dog");
        assert_eq!(snapshot.frame, Some(FrameId::new("b")));
        assert!(snapshot.pose.is_identity());
    }
}
