//! Timeline sampling

use anyhow::{Context, Result};
use prance_motion::{Pose, Timeline, TimelinePreset};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::config::SceneConfig;

/// Pose of a timeline at one playhead
#[derive(Debug, Serialize)]
pub struct SampleRecord {
    pub t_ms: f64,
    /// Active segment, absent outside the timeline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f32>,
    pub pose: Pose,
}

/// Resolve a timeline from a JSON file, a scene file, or a preset name
pub fn load_timeline(source: &str, name: Option<&str>) -> Result<Timeline> {
    let path = Path::new(source);
    if !path.exists() {
        if let Some(timeline) = TimelinePreset::by_name(source) {
            tracing::debug!(preset = source, "sampling timeline preset");
            return Ok(timeline);
        }
        anyhow::bail!(
            "No timeline file or preset named '{}'. Presets: {}",
            source,
            TimelinePreset::NAMES.join(", ")
        );
    }

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let timeline: Timeline = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(timeline)
    } else {
        SceneConfig::load_from_path(path)?.timeline(name)
    }
}

/// Evaluate `timeline` at each playhead
pub fn sample(timeline: &Timeline, at: &[f64]) -> Vec<SampleRecord> {
    at.iter()
        .map(|&t_ms| {
            let active = timeline.locate(t_ms);
            SampleRecord {
                t_ms,
                segment: active.as_ref().map(|a| a.index),
                progress: active.as_ref().map(|a| a.local_progress),
                pose: timeline.evaluate(t_ms),
            }
        })
        .collect()
}

/// Write samples as JSON lines
pub fn write_samples<W: Write>(records: &[SampleRecord], out: &mut W) -> Result<()> {
    for record in records {
        serde_json::to_writer(&mut *out, record).context("Failed to encode sample")?;
        writeln!(out)?;
    }
    Ok(())
}
