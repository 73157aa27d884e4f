//! Behavior kinematics
//!
//! Pure curves used by the integrator. Nothing here owns state: each
//! function maps phases, timers or elapsed time onto an offset, and the
//! integrator decides what to accumulate.

use std::f32::consts::{PI, TAU};

use crate::behavior::{FlipParams, PatrolParams, ProwlParams};
use crate::geometry::{Direction, Size};

/// Vertical offset magnitude (px) above which a bouncing actor counts as airborne
pub const AIRBORNE_THRESHOLD: f32 = 1.0;

/// Rotation multiplier applied every grounded tick while bouncing
pub const GROUND_ROTATION_DAMPING: f32 = 0.9;

/// Tumble rate (rad/s) while a bouncing actor is airborne
pub const AIRBORNE_SPIN_RATE: f32 = 4.0;

/// Somersault rate (rad/s) for the flip behavior
pub const FLIP_SPIN_RATE: f32 = TAU;

/// How long a stalker dashes before turning back (ms)
pub const CHASE_WINDOW_MS: f32 = 1000.0;

/// Distance (px) at which a retreating stalker snaps home
pub const RETREAT_SNAP_DISTANCE: f32 = 5.0;

/// Look-back window (s) used to estimate prowl velocity
pub const PROWL_LOOKBACK_S: f64 = 0.1;

/// Result of one horizontal patrol step
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PatrolStep {
    pub x: f32,
    pub direction: Direction,
    /// The step hit a boundary and reversed
    pub turned: bool,
}

/// Inclusive walk limits around `anchor_x`
pub fn patrol_bounds(anchor_x: f32, patrol_width: f32) -> (f32, f32) {
    let half = patrol_width.max(0.0) / 2.0;
    (anchor_x - half, anchor_x + half)
}

/// Advance a patrol by `dt_s` seconds, clamping onto and turning at the limits.
///
/// A zero width pins the actor to the anchor.
pub fn patrol_advance(
    params: &PatrolParams,
    anchor_x: f32,
    x: f32,
    direction: Direction,
    dt_s: f32,
) -> PatrolStep {
    if params.patrol_width <= 0.0 {
        return PatrolStep {
            x: anchor_x,
            direction,
            turned: false,
        };
    }

    let (min_x, max_x) = patrol_bounds(anchor_x, params.patrol_width);
    let next = x + params.speed * direction.sign() * dt_s;

    if next >= max_x && direction == Direction::Forward {
        PatrolStep {
            x: max_x,
            direction: Direction::Backward,
            turned: true,
        }
    } else if next <= min_x && direction == Direction::Backward {
        PatrolStep {
            x: min_x,
            direction: Direction::Forward,
            turned: true,
        }
    } else {
        PatrolStep {
            x: next.clamp(min_x, max_x),
            direction,
            turned: false,
        }
    }
}

/// Hop height for a bouncing actor; never below the baseline
pub fn bounce_offset(bounce_height: f32, phase_s: f32, frequency: f32) -> f32 {
    if frequency <= 0.0 {
        return 0.0;
    }
    -bounce_height * (phase_s * frequency).sin().abs()
}

/// Hover offset for a floating actor
pub fn float_offset(float_amount: f32, phase_s: f32) -> f32 {
    float_amount * (phase_s * 2.0).sin()
}

/// Hop height for a periodic jumper.
///
/// The first half of every interval is a single arc; the second half is
/// spent on the ground.
pub fn jump_offset(bounce_height: f32, timer_ms: f32, jump_interval: f32) -> f32 {
    if jump_interval <= 0.0 {
        return 0.0;
    }
    let fraction = timer_ms.rem_euclid(jump_interval) / jump_interval;
    if fraction < 0.5 {
        let progress = fraction * 2.0;
        -bounce_height * (PI * progress).sin()
    } else {
        0.0
    }
}

/// Offset from the anchor along the flip figure path at `t_s` seconds
pub fn flip_offset(params: &FlipParams, t_s: f64) -> (f32, f32) {
    let speed = f64::from(params.speed);
    let dx = (t_s * speed / 50.0).sin() as f32 * params.patrol_width / 2.0;
    let dy = (t_s * speed / 25.0 * 2.0).sin() as f32 * params.amplitude;
    (dx, dy)
}

/// Horizontal offset from the anchor for a prowling actor at `t_s` seconds
pub fn prowl_offset_x(params: &ProwlParams, t_s: f64) -> f32 {
    (t_s * f64::from(params.speed) / 100.0).sin() as f32 * params.patrol_width / 2.0
}

/// Small vertical bob for a prowling actor at `t_s` seconds
pub fn prowl_bob(t_s: f64) -> f32 {
    (t_s * 4.0).sin() as f32 * 5.0
}

/// Direction a prowler is moving at `t_s`, from a backward finite difference
pub fn prowl_direction(params: &ProwlParams, t_s: f64) -> Option<Direction> {
    let now = prowl_offset_x(params, t_s);
    let before = prowl_offset_x(params, t_s - PROWL_LOOKBACK_S);
    Direction::from_delta(now - before)
}

/// Effective wheel radius for a rolling actor
pub fn roll_radius(size: &Size) -> f32 {
    (size.width.min(size.height) / 2.0).max(1.0)
}
