//! Behavioral properties of the motion engine
//!
//! These tests drive the public API the way a host would: build actors,
//! tick them at display rate, and evaluate timelines at arbitrary
//! playheads.

use prance_motion::{
    evaluate, Actor, ActorGeometry, BehaviorConfig, BehaviorState, BounceParams, Direction,
    FrameId, JumpParams, PatrolParams, RollParams, Segment, SpriteCursor, SpriteSequence,
    StalkerParams, StalkerPhase, Tick, Timeline, TimelinePreset, TimedFrame,
};

const FRAME_MS: f32 = 16.0;

/// Tick a lone behavior for `total_ms`, calling `inspect` after every tick
fn drive(
    config: &BehaviorConfig,
    geometry: &ActorGeometry,
    total_ms: f32,
    mut inspect: impl FnMut(&BehaviorState),
) -> BehaviorState {
    let mut state = BehaviorState::new(config, geometry);
    let mut now = 0.0_f64;
    let ticks = (total_ms / FRAME_MS) as u32;
    for _ in 0..ticks {
        now += f64::from(FRAME_MS);
        prance_motion::step(config, &mut state, geometry, Tick::new(FRAME_MS, now));
        inspect(&state);
    }
    state
}

#[test]
fn test_patrolling_behaviors_stay_within_bounds() {
    let geometry = ActorGeometry::at(300.0, 200.0).with_size(48.0, 48.0);
    let configs = [
        BehaviorConfig::Patrol(PatrolParams::new(180.0, 150.0)),
        BehaviorConfig::Bounce(BounceParams {
            speed: 220.0,
            patrol_width: 90.0,
            direction: Direction::Backward,
            ..Default::default()
        }),
        BehaviorConfig::Roll(RollParams {
            speed: 400.0,
            patrol_width: 120.0,
            direction: Direction::Forward,
        }),
    ];

    for config in &configs {
        let width = match config {
            BehaviorConfig::Patrol(p) => p.patrol_width,
            BehaviorConfig::Bounce(p) => p.patrol_width,
            BehaviorConfig::Roll(p) => p.patrol_width,
            _ => unreachable!(),
        };
        let (min, max) = (300.0 - width / 2.0, 300.0 + width / 2.0);
        drive(config, &geometry, 20_000.0, |state| {
            assert!(
                state.x >= min && state.x <= max,
                "{:?} escaped to {}",
                config.kind(),
                state.x
            );
        });
    }
}

#[test]
fn test_zero_width_patrol_is_stationary() {
    let geometry = ActorGeometry::at(75.0, 0.0);
    let config = BehaviorConfig::Patrol(PatrolParams::new(100.0, 0.0));
    drive(&config, &geometry, 2_000.0, |state| {
        assert_eq!(state.x, 75.0);
    });
}

#[test]
fn test_hops_never_sink_below_baseline() {
    let geometry = ActorGeometry::at(0.0, 400.0);
    let bounce = BehaviorConfig::Bounce(BounceParams {
        bounce_height: 35.0,
        frequency: 5.0,
        ..Default::default()
    });
    let jump = BehaviorConfig::Jump(JumpParams {
        bounce_height: 80.0,
        jump_interval: 700.0,
    });

    for (config, height) in [(&bounce, 35.0_f32), (&jump, 80.0_f32)] {
        let mut highest = 0.0_f32;
        drive(config, &geometry, 10_000.0, |state| {
            let offset = state.offset_y();
            assert!(offset <= 0.0, "sank to {offset}");
            assert!(offset >= -height - 1e-3, "overshot to {offset}");
            highest = highest.min(offset);
        });
        assert!(highest < -height * 0.9, "never left the ground");
    }
}

#[test]
fn test_disabled_jump_interval_keeps_actor_grounded() {
    let geometry = ActorGeometry::at(0.0, 0.0);
    for interval in [0.0, -250.0] {
        let config = BehaviorConfig::Jump(JumpParams {
            bounce_height: 50.0,
            jump_interval: interval,
        });
        drive(&config, &geometry, 3_000.0, |state| {
            assert_eq!(state.offset_y(), 0.0);
        });
    }
}

#[test]
fn test_patrol_scenario_turns_at_600() {
    let geometry = ActorGeometry::at(500.0, 0.0);
    let config = BehaviorConfig::Patrol(PatrolParams::new(50.0, 200.0));

    let mut reached_edge = false;
    let mut previous = 500.0_f32;
    let state = drive(&config, &geometry, 5_000.0, |state| {
        assert!(state.x <= 600.0 && state.x >= 400.0);
        if reached_edge {
            assert!(state.x < previous, "kept moving right after the turn");
            assert_eq!(state.direction, Direction::Backward);
        }
        if state.x == 600.0 {
            reached_edge = true;
        }
        previous = state.x;
    });

    assert!(reached_edge);
    assert!(state.x < 600.0);
}

#[test]
fn test_stalker_cycle() {
    let geometry = ActorGeometry::at(250.0, 0.0);
    let params = StalkerParams {
        speed: 80.0,
        direction: Direction::Forward,
        hide_time: 2_000.0,
        chase_speed: 200.0,
    };
    let config = BehaviorConfig::Stalker(params);
    let mut state = BehaviorState::new(&config, &geometry);
    assert_eq!(state.stalker, StalkerPhase::Hidden);

    let mut elapsed = 0.0_f32;
    let mut saw_chase = false;
    while elapsed < params.hide_time + 1_000.0 {
        elapsed += FRAME_MS;
        let tick = Tick::new(FRAME_MS, f64::from(elapsed));
        prance_motion::step(&config, &mut state, &geometry, tick);
        saw_chase |= state.stalker == StalkerPhase::Chasing;
    }
    assert!(saw_chase);
    assert_eq!(state.stalker, StalkerPhase::Retreating);
    assert!(state.x > 250.0 + 5.0);
    assert_eq!(state.direction, Direction::Backward);

    let mut guard = 0;
    while state.stalker == StalkerPhase::Retreating {
        elapsed += FRAME_MS;
        let tick = Tick::new(FRAME_MS, f64::from(elapsed));
        prance_motion::step(&config, &mut state, &geometry, tick);
        guard += 1;
        assert!(guard < 10_000, "stalker never made it home");
    }
    assert_eq!(state.stalker, StalkerPhase::Hidden);
    assert_eq!(state.x, 250.0);
}

#[test]
fn test_timeline_is_deterministic() {
    for name in TimelinePreset::NAMES {
        let timeline = TimelinePreset::by_name(name).unwrap();
        let total = timeline.total_duration_ms() as f64;
        let mut t = 0.0;
        while t < total {
            let a = timeline.evaluate(t);
            let b = timeline.evaluate(t);
            assert_eq!(a, b, "{name} at {t}");
            assert_eq!(a.x.to_bits(), b.x.to_bits());
            assert_eq!(a.y.to_bits(), b.y.to_bits());
            t += 7.3;
        }
    }
}

#[test]
fn test_timeline_boundary_is_idempotent() {
    for name in TimelinePreset::NAMES {
        let timeline = TimelinePreset::by_name(name).unwrap();
        let total = timeline.total_duration_ms() as f64;
        let at_end = timeline.evaluate(total);
        let long_after = timeline.evaluate(total + 98_765.4);
        assert_eq!(at_end, long_after);
        assert!(at_end.is_identity());
        assert!(timeline.evaluate(-50.0).is_identity());
    }
    assert!(evaluate(&[], 0.0).is_identity());
}

#[test]
fn test_timeline_scenario() {
    let segments: Vec<Segment> = serde_json::from_str(
        r#"[
            {"type":"jump","duration":500,"height":100,"easing":"linear"},
            {"type":"fall","duration":400,"height":100}
        ]"#,
    )
    .unwrap();
    let timeline = Timeline::from(segments);

    let active = timeline.locate(250.0).unwrap();
    assert_eq!(active.index, 0);
    assert_eq!(active.local_progress, 0.5);
    let pose = timeline.evaluate(250.0);
    assert!((pose.y + 100.0).abs() < 1e-3);

    let active = timeline.locate(600.0).unwrap();
    assert_eq!(active.index, 1);
    assert_eq!(active.local_progress, 0.25);
    assert!((timeline.evaluate(600.0).y - 25.0).abs() < 1e-4);
}

#[test]
fn test_carry_forward_drift_shows_in_later_segments() {
    let timeline = Timeline::new()
        .then(Segment::jump(300, 50.0, 40.0))
        .then(Segment::bounce(300, 20.0, 25.0, 2))
        .then(Segment::spin(300, 180.0))
        .then(Segment::dodge(300, 30.0));
    // Spin starts from the 65 px left behind by jump and bounce
    assert_eq!(timeline.evaluate(650.0).x, 65.0);
    // Dodge trails carry the drift too
    let dodge = timeline.evaluate(1050.0);
    for ghost in &dodge.trail {
        assert!(ghost.x > dodge.x && ghost.x <= 65.0);
    }
}

fn three_frames(looping: bool) -> SpriteSequence {
    SpriteSequence::default().with_explicit(
        vec![
            TimedFrame::new("a", 100.0),
            TimedFrame::new("b", 100.0),
            TimedFrame::new("c", 100.0),
        ],
        looping,
    )
}

#[test]
fn test_frame_clamp_versus_loop() {
    let clamped = three_frames(false);
    let looping = three_frames(true);

    assert_eq!(clamped.frame_at(1000.0), Some(&FrameId::new("c")));
    assert_eq!(looping.frame_at(1000.0), Some(&FrameId::new("b")));

    let mut cursor = SpriteCursor::default();
    let mut wrapped = false;
    let mut seen_last = false;
    let mut now = 0.0_f64;
    looping.advance(&mut cursor, 0.0);
    let mut clamp_cursor = SpriteCursor::default();
    clamped.advance(&mut clamp_cursor, 0.0);
    while now < 1000.0 {
        now += f64::from(FRAME_MS);
        looping.advance(&mut cursor, FRAME_MS);
        clamped.advance(&mut clamp_cursor, FRAME_MS);
        seen_last |= cursor.index == 2;
        wrapped |= seen_last && cursor.index == 0;
    }
    assert!(wrapped);
    assert_eq!(clamp_cursor.index, 2);
    assert_eq!(clamped.resolve(&clamp_cursor), Some(&FrameId::new("c")));
}

#[test]
fn test_actor_pose_and_frame_together() {
    let mut actor = Actor::new(
        "fox",
        ActorGeometry::at(100.0, 100.0),
        BehaviorConfig::Patrol(PatrolParams::new(100.0, 400.0)),
    )
    .with_sprite(three_frames(true));

    let mut now = 0.0;
    for _ in 0..25 {
        now += f64::from(FRAME_MS);
        actor.tick(Tick::new(FRAME_MS, now));
    }
    let snapshot = actor.snapshot();
    assert!((snapshot.pose.x - 40.0).abs() < 1e-3);
    // Baseline at 16 ms, then b at 128 ms and c at 240 ms
    assert_eq!(snapshot.frame, Some(FrameId::new("c")));
}
