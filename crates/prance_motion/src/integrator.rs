//! Stateful per-tick integrator
//!
//! [`step`] advances one actor's [`BehaviorState`] by a single tick. It is
//! total: degenerate parameters produce a stationary or grounded actor,
//! never a panic.

use crate::behavior::{
    BehaviorConfig, BounceParams, FlipParams, FloatParams, JumpParams, PatrolParams, ProwlParams,
    RollParams, StalkerParams,
};
use crate::geometry::{needs_flip, ActorGeometry, Direction};
use crate::kinematics::{
    bounce_offset, flip_offset, float_offset, jump_offset, patrol_advance, prowl_bob,
    prowl_direction, prowl_offset_x, roll_radius, PatrolStep, AIRBORNE_SPIN_RATE,
    AIRBORNE_THRESHOLD, CHASE_WINDOW_MS, FLIP_SPIN_RATE, GROUND_ROTATION_DAMPING,
    RETREAT_SNAP_DISTANCE,
};
use crate::pose::Pose;
use crate::state::{BehaviorState, StalkerPhase};

/// Largest tilt (radians) a bouncing actor reaches mid-air
pub const BOUNCE_MAX_TILT: f32 = 0.5;

/// Timing for one scheduler cycle
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tick {
    /// Milliseconds since the previous tick
    pub dt_ms: f32,
    /// Host clock in milliseconds
    pub now_ms: f64,
}

impl Tick {
    pub fn new(dt_ms: f32, now_ms: f64) -> Self {
        Self { dt_ms, now_ms }
    }

    /// Delta in seconds; negative deltas count as zero
    pub fn dt_s(&self) -> f32 {
        self.dt_ms.max(0.0) / 1000.0
    }
}

/// Advance `state` by one tick of `config`.
pub fn step(config: &BehaviorConfig, state: &mut BehaviorState, geometry: &ActorGeometry, tick: Tick) {
    if matches!(config, BehaviorConfig::None) {
        return;
    }

    let dt_ms = tick.dt_ms.max(0.0);
    state.elapsed_ms += f64::from(dt_ms);

    match config {
        BehaviorConfig::None => {}
        BehaviorConfig::Patrol(p) => step_patrol(p, state, geometry, tick),
        BehaviorConfig::Bounce(p) => step_bounce(p, state, geometry, tick),
        BehaviorConfig::Float(p) => step_float(p, state, tick),
        BehaviorConfig::Jump(p) => step_jump(p, state, tick),
        BehaviorConfig::Flip(p) => step_flip(p, state, geometry, tick),
        BehaviorConfig::Stalker(p) => step_stalker(p, state, geometry, tick),
        BehaviorConfig::Roll(p) => step_roll(p, state, geometry, tick),
        BehaviorConfig::Prowl(p) => step_prowl(p, state, geometry),
    }
}

/// Pose described by a behavior state, relative to the actor's anchor
pub fn state_pose(state: &BehaviorState, geometry: &ActorGeometry) -> Pose {
    Pose::identity()
        .with_offset(state.offset_x(geometry), state.offset_y())
        .with_rotation(state.rotation)
        .with_flipped(state.flipped)
}

fn apply_patrol(
    state: &mut BehaviorState,
    step: PatrolStep,
    flip_on_turn: bool,
    geometry: &ActorGeometry,
) {
    state.x = step.x;
    state.direction = step.direction;
    if step.turned && flip_on_turn {
        state.flipped = needs_flip(geometry.facing, step.direction);
    }
}

fn step_patrol(p: &PatrolParams, state: &mut BehaviorState, geometry: &ActorGeometry, tick: Tick) {
    let step = patrol_advance(p, geometry.anchor.x, state.x, state.direction, tick.dt_s());
    apply_patrol(state, step, p.flip_on_turn, geometry);
}

fn step_bounce(p: &BounceParams, state: &mut BehaviorState, geometry: &ActorGeometry, tick: Tick) {
    let dt_s = tick.dt_s();
    let patrol = p.patrol();
    let step = patrol_advance(&patrol, geometry.anchor.x, state.x, state.direction, dt_s);
    apply_patrol(state, step, patrol.flip_on_turn, geometry);

    state.bounce_phase += dt_s;
    let offset = bounce_offset(p.bounce_height, state.bounce_phase, p.frequency);
    state.y = state.baseline_y + offset;

    if offset.abs() > AIRBORNE_THRESHOLD {
        state.rotation = (state.rotation + AIRBORNE_SPIN_RATE * state.direction.sign() * dt_s)
            .clamp(-BOUNCE_MAX_TILT, BOUNCE_MAX_TILT);
    } else {
        state.rotation *= GROUND_ROTATION_DAMPING;
    }
}

fn step_float(p: &FloatParams, state: &mut BehaviorState, tick: Tick) {
    state.float_phase += tick.dt_s();
    state.y = state.baseline_y + float_offset(p.float_amount, state.float_phase);
}

fn step_jump(p: &JumpParams, state: &mut BehaviorState, tick: Tick) {
    state.jump_timer += tick.dt_ms.max(0.0);
    if p.jump_interval > 0.0 {
        state.jump_timer = state.jump_timer.rem_euclid(p.jump_interval);
    }
    state.y = state.baseline_y + jump_offset(p.bounce_height, state.jump_timer, p.jump_interval);
}

fn step_flip(p: &FlipParams, state: &mut BehaviorState, geometry: &ActorGeometry, tick: Tick) {
    let t_s = state.elapsed_ms / 1000.0;
    let (dx, dy) = flip_offset(p, t_s);
    state.x = geometry.anchor.x + dx;
    state.y = state.baseline_y + dy;
    state.rotation += FLIP_SPIN_RATE * tick.dt_s();
}

fn step_stalker(p: &StalkerParams, state: &mut BehaviorState, geometry: &ActorGeometry, tick: Tick) {
    let dt_s = tick.dt_s();
    state.stalker_timer += tick.dt_ms.max(0.0);

    match state.stalker {
        StalkerPhase::Hidden => {
            if state.stalker_timer >= p.hide_time {
                state.stalker = StalkerPhase::Chasing;
                state.stalker_timer -= p.hide_time;
                tracing::debug!(now_ms = tick.now_ms, "stalker: hidden -> chasing");
            }
        }
        StalkerPhase::Chasing => {
            state.x += p.chase_speed * state.direction.sign() * dt_s;
            if state.stalker_timer >= CHASE_WINDOW_MS {
                state.stalker = StalkerPhase::Retreating;
                state.stalker_timer -= CHASE_WINDOW_MS;
                state.direction = state.direction.reversed();
                tracing::debug!(now_ms = tick.now_ms, "stalker: chasing -> retreating");
            }
        }
        StalkerPhase::Retreating => {
            let home = geometry.anchor.x;
            let remaining = home - state.x;
            let travel = p.speed * dt_s;
            if p.speed <= 0.0 || travel >= remaining.abs() {
                state.x = home;
            } else {
                state.x += travel * remaining.signum();
            }
            if (home - state.x).abs() <= RETREAT_SNAP_DISTANCE {
                state.x = home;
                state.stalker = StalkerPhase::Hidden;
                state.stalker_timer = 0.0;
                tracing::debug!(now_ms = tick.now_ms, "stalker: retreating -> hidden");
            }
            if let Some(direction) = Direction::from_delta(remaining) {
                state.direction = direction;
            }
        }
    }

    state.flipped = needs_flip(geometry.facing, state.direction);
}

fn step_roll(p: &RollParams, state: &mut BehaviorState, geometry: &ActorGeometry, tick: Tick) {
    let patrol = p.patrol();
    let before = state.x;
    let step = patrol_advance(&patrol, geometry.anchor.x, state.x, state.direction, tick.dt_s());
    apply_patrol(state, step, false, geometry);
    state.rotation += (state.x - before) / roll_radius(&geometry.size);
}

fn step_prowl(p: &ProwlParams, state: &mut BehaviorState, geometry: &ActorGeometry) {
    let t_s = state.elapsed_ms / 1000.0;
    state.x = geometry.anchor.x + prowl_offset_x(p, t_s);
    state.y = state.baseline_y + prowl_bob(t_s);
    if let Some(direction) = prowl_direction(p, t_s) {
        state.direction = direction;
        state.flipped = needs_flip(geometry.facing, direction);
    }
}
