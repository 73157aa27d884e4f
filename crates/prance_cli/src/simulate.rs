//! Headless scene playback

use anyhow::{Context, Result};
use prance_motion::{ActorSnapshot, MotionScheduler};
use serde::Serialize;
use std::io::Write;

use crate::config::{RunConfig, SceneConfig};

/// One emitted line of output
#[derive(Debug, Serialize)]
pub struct FrameRecord {
    pub t_ms: f64,
    pub actors: Vec<ActorSnapshot>,
}

/// Run the scene at a fixed step and write one JSON line per sampled tick.
///
/// Returns the number of lines written.
pub fn run_scene<W: Write>(scene: &SceneConfig, run: RunConfig, out: &mut W) -> Result<usize> {
    let mut scheduler = scene.build_scheduler()?;
    let step_ms = run.step_ms;
    let every = run.sample_every.max(1);
    let ticks = (run.duration_ms / f64::from(step_ms)).floor() as u64;

    tracing::info!(
        scene = %scene.scene.name,
        actors = scheduler.actor_count(),
        ticks,
        step_ms,
        "running scene"
    );

    // Zero-length first tick establishes sprite baselines
    scheduler.tick(0.0, 0.0);
    write_frame(out, 0.0, &scheduler)?;
    let mut written = 1;

    for i in 1..=ticks {
        let now = i as f64 * f64::from(step_ms);
        scheduler.tick(step_ms, now);
        if i % u64::from(every) == 0 {
            write_frame(out, now, &scheduler)?;
            written += 1;
        }
    }

    tracing::debug!(written, "scene finished");
    Ok(written)
}

fn write_frame<W: Write>(out: &mut W, t_ms: f64, scheduler: &MotionScheduler) -> Result<()> {
    let record = FrameRecord {
        t_ms,
        actors: scheduler.snapshots().into_iter().map(|(_, s)| s).collect(),
    };
    serde_json::to_writer(&mut *out, &record).context("Failed to encode frame")?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn lines(output: &[u8]) -> Vec<Value> {
        std::str::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_emits_every_nth_tick() {
        let scene = SceneConfig::new("demo");
        let run = RunConfig {
            duration_ms: 160.0,
            step_ms: 16.0,
            sample_every: 5,
        };
        let mut out = Vec::new();
        let written = run_scene(&scene, run, &mut out).unwrap();
        assert_eq!(written, 3);

        let frames = lines(&out);
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[1]["t_ms"], 80.0);
        assert_eq!(frames[2]["t_ms"], 160.0);
        assert_eq!(frames[2]["actors"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_walker_moves_and_animates() {
        let scene = SceneConfig::new("demo");
        let run = RunConfig {
            duration_ms: 500.0,
            step_ms: 10.0,
            sample_every: 50,
        };
        let mut out = Vec::new();
        run_scene(&scene, run, &mut out).unwrap();
        let frames = lines(&out);

        let walker = |frame: &Value| {
            frame["actors"]
                .as_array()
                .unwrap()
                .iter()
                .find(|a| a["name"] == "walker")
                .cloned()
                .unwrap()
        };
        let start = walker(&frames[0]);
        let end = walker(&frames[1]);
        assert_eq!(start["pose"]["x"], 0.0);
        assert!(end["pose"]["x"].as_f64().unwrap() > 0.0);
        assert_eq!(start["frame"], "walk_0");
        assert_ne!(end["frame"], Value::Null);
    }
}
