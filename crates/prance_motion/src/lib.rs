//! Prance Motion Engine
//!
//! Computes the visual pose of 2D actors from their behavior configuration
//! or from a timeline of timed actions, and picks the active sprite frame.
//!
//! # Features
//!
//! - **Behaviors**: Looping motion (patrol, bounce, float, jump, flip,
//!   stalker, roll, prowl) integrated per tick from a delta time
//! - **Timelines**: Ordered action segments evaluated as a pure function
//!   of elapsed time, with easing and carry-forward drift
//! - **Sprite Sequencing**: Explicit, cyclic and blink-overlaid frame
//!   selection
//! - **Scheduler**: Steps every actor once per host frame, re-baselining
//!   across pauses
//!
//! # Example
//!
//! ```rust
//! use prance_motion::{Actor, ActorGeometry, BehaviorConfig, MotionScheduler, PatrolParams};
//!
//! let mut scheduler = MotionScheduler::new();
//! let id = scheduler.add_actor(Actor::new(
//!     "cat",
//!     ActorGeometry::at(500.0, 300.0),
//!     BehaviorConfig::Patrol(PatrolParams::new(50.0, 200.0)),
//! ));
//!
//! scheduler.tick(16.0, 16.0);
//! let pose = scheduler.get_actor(id).unwrap().pose();
//! assert!(pose.x > 0.0);
//! ```

pub mod actor;
pub mod behavior;
pub mod easing;
pub mod error;
pub mod geometry;
pub mod integrator;
pub mod kinematics;
pub mod pose;
pub mod presets;
pub mod scheduler;
pub mod segment;
pub mod sprite;
pub mod state;
pub mod timeline;

pub use actor::{Actor, ActorSnapshot};
pub use behavior::{
    BehaviorConfig, BehaviorKind, BounceParams, FlipParams, FloatParams, JumpParams, PatrolParams,
    ProwlParams, RollParams, StalkerParams,
};
pub use easing::Easing;
pub use error::{MotionError, Result};
pub use geometry::{ActorGeometry, Direction, Facing, Point, Size};
pub use integrator::{step, Tick};
pub use pose::{Color, Pose, TrailGhost};
pub use presets::{BehaviorPreset, SpritePreset, TimelinePreset};
pub use scheduler::{ActorId, FrameClock, MotionScheduler, SchedulerConfig};
pub use segment::{Action, Segment};
pub use sprite::{BlinkOverlay, DriveMode, FrameId, SpriteCursor, SpriteSequence, TimedFrame};
pub use state::{BehaviorState, StalkerPhase};
pub use timeline::{evaluate, ActiveSegment, Timeline, TimelinePlayer};
