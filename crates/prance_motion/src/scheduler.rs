//! Motion scheduler
//!
//! Owns every actor and steps them once per host frame. The host either
//! hands in `(dt_ms, now_ms)` directly or lets the frame clock derive the
//! delta from successive timestamps.

use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

use crate::actor::{Actor, ActorSnapshot};
use crate::integrator::Tick;

new_key_type! {
    pub struct ActorId;
}

fn default_max_delta_ms() -> f32 {
    100.0
}

fn default_true() -> bool {
    true
}

/// Engine tunables
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Cap on a single tick's delta; keeps a stalled host from teleporting actors
    #[serde(default = "default_max_delta_ms")]
    pub max_delta_ms: f32,
    /// Reset an actor whose state went non-finite instead of letting it spread
    #[serde(default = "default_true")]
    pub isolate_faults: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_delta_ms: default_max_delta_ms(),
            isolate_faults: true,
        }
    }
}

/// Turns host timestamps into deltas, re-baselining across pauses
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameClock {
    last_ms: Option<f64>,
    paused: bool,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta since the previous frame; `None` while paused or on the first frame
    pub fn delta(&mut self, now_ms: f64) -> Option<f32> {
        if self.paused {
            return None;
        }
        let last = self.last_ms.replace(now_ms)?;
        Some((now_ms - last).max(0.0) as f32)
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume; the next delta is measured from `now_ms`, not from before the pause
    pub fn resume(&mut self, now_ms: f64) {
        self.paused = false;
        self.last_ms = Some(now_ms);
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

/// The scheduler that ticks all actors
pub struct MotionScheduler {
    actors: SlotMap<ActorId, Actor>,
    clock: FrameClock,
    config: SchedulerConfig,
}

impl MotionScheduler {
    pub fn new() -> Self {
        Self::with_config(SchedulerConfig::default())
    }

    pub fn with_config(config: SchedulerConfig) -> Self {
        Self {
            actors: SlotMap::with_key(),
            clock: FrameClock::new(),
            config,
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn add_actor(&mut self, actor: Actor) -> ActorId {
        self.actors.insert(actor)
    }

    pub fn get_actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(id)
    }

    pub fn get_actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(id)
    }

    pub fn remove_actor(&mut self, id: ActorId) -> Option<Actor> {
        self.actors.remove(id)
    }

    /// Find an actor by name
    pub fn find(&self, name: &str) -> Option<ActorId> {
        self.actors
            .iter()
            .find(|(_, actor)| actor.name() == name)
            .map(|(id, _)| id)
    }

    /// Tick every actor with an explicit delta
    pub fn tick(&mut self, dt_ms: f32, now_ms: f64) {
        let dt_ms = if dt_ms > self.config.max_delta_ms {
            tracing::trace!(dt_ms, max = self.config.max_delta_ms, "clamping frame delta");
            self.config.max_delta_ms
        } else {
            dt_ms.max(0.0)
        };
        let tick = Tick::new(dt_ms, now_ms);

        for (id, actor) in self.actors.iter_mut() {
            actor.tick(tick);
            if self.config.isolate_faults && !actor.is_healthy() {
                tracing::warn!(
                    actor = %actor.name(),
                    ?id,
                    "actor state became non-finite, resetting"
                );
                actor.reset();
            }
        }
    }

    /// Tick from a host timestamp; the first call only establishes the baseline
    pub fn tick_at(&mut self, now_ms: f64) {
        if self.clock.is_paused() {
            return;
        }
        let dt_ms = self.clock.delta(now_ms).unwrap_or(0.0);
        self.tick(dt_ms, now_ms);
    }

    pub fn pause(&mut self) {
        tracing::debug!("motion scheduler paused");
        self.clock.pause();
    }

    pub fn resume(&mut self, now_ms: f64) {
        tracing::debug!(now_ms, "motion scheduler resumed");
        self.clock.resume(now_ms);
    }

    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    /// Snapshot of every actor, in key order
    pub fn snapshots(&self) -> Vec<(ActorId, ActorSnapshot)> {
        self.actors
            .iter()
            .map(|(id, actor)| (id, actor.snapshot()))
            .collect()
    }

    /// Iterate over all actors (immutable)
    pub fn actors_iter(&self) -> impl Iterator<Item = (ActorId, &Actor)> {
        self.actors.iter()
    }

    /// Iterate over all actors (mutable)
    pub fn actors_iter_mut(&mut self) -> impl Iterator<Item = (ActorId, &mut Actor)> {
        self.actors.iter_mut()
    }

    /// Get the number of actors in the scheduler
    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }
}

impl Default for MotionScheduler {
    fn default() -> Self {
        Self::new()
    }
}
