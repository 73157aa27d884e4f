//! Scene file handling

use anyhow::{Context, Result};
use prance_motion::{
    Actor, ActorGeometry, BehaviorConfig, BehaviorPreset, MotionScheduler, SchedulerConfig,
    Segment, SpritePreset, SpriteSequence, Timeline, TimelinePreset,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File name looked up when a directory is given
pub const SCENE_FILE: &str = "prance.toml";

/// Top-level scene description (prance.toml)
#[derive(Debug, Deserialize, Serialize)]
pub struct SceneConfig {
    pub scene: SceneMeta,
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub engine: SchedulerConfig,
    #[serde(default)]
    pub actors: Vec<ActorConfig>,
    #[serde(default)]
    pub timelines: Vec<TimelineConfig>,
}

/// Scene metadata
#[derive(Debug, Deserialize, Serialize)]
pub struct SceneMeta {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Headless run settings
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct RunConfig {
    /// Simulated time to run for
    #[serde(default = "default_duration_ms")]
    pub duration_ms: f64,
    /// Fixed step between ticks
    #[serde(default = "default_step_ms")]
    pub step_ms: f32,
    /// Emit every Nth tick
    #[serde(default = "default_sample_every")]
    pub sample_every: u32,
}

fn default_duration_ms() -> f64 {
    3000.0
}

fn default_step_ms() -> f32 {
    16.0
}

fn default_sample_every() -> u32 {
    1
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
            step_ms: default_step_ms(),
            sample_every: default_sample_every(),
        }
    }
}

/// One actor in the scene
#[derive(Debug, Deserialize, Serialize)]
pub struct ActorConfig {
    pub name: String,
    #[serde(default)]
    pub geometry: ActorGeometry,
    /// Explicit behavior; wins over `preset`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub behavior: Option<BehaviorConfig>,
    /// Named behavior preset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprite: Option<SpriteSequence>,
}

impl ActorConfig {
    /// The behavior this actor runs
    pub fn resolve_behavior(&self) -> Result<BehaviorConfig> {
        if let Some(behavior) = &self.behavior {
            return Ok(behavior.clone());
        }
        match &self.preset {
            Some(name) => BehaviorPreset::by_name(name).with_context(|| {
                format!(
                    "Unknown behavior preset '{}' for actor '{}'. Run `prance presets` to list them.",
                    name, self.name
                )
            }),
            None => Ok(BehaviorConfig::None),
        }
    }

    /// Build the runtime actor
    pub fn build(&self) -> Result<Actor> {
        let mut actor = Actor::new(self.name.clone(), self.geometry, self.resolve_behavior()?);
        if let Some(sprite) = &self.sprite {
            actor = actor.with_sprite(sprite.clone());
        }
        Ok(actor)
    }
}

/// A named timeline
#[derive(Debug, Deserialize, Serialize)]
pub struct TimelineConfig {
    pub name: String,
    #[serde(default)]
    pub segments: Vec<Segment>,
}

impl SceneConfig {
    /// Load a scene from a file, or from `prance.toml` inside a directory
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let scene_path = if path.is_dir() {
            path.join(SCENE_FILE)
        } else {
            path.to_path_buf()
        };

        if !scene_path.exists() {
            anyhow::bail!(
                "No scene found at {}. Run `prance init` to create one.",
                scene_path.display()
            );
        }

        let content = fs::read_to_string(&scene_path)
            .with_context(|| format!("Failed to read {}", scene_path.display()))?;

        Self::from_toml(&content).with_context(|| format!("Failed to parse {}", scene_path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// A small scene showing off a few presets
    pub fn new(name: &str) -> Self {
        let actor = |name: &str, x: f32, preset: &str, sprite: Option<SpriteSequence>| ActorConfig {
            name: name.to_string(),
            geometry: ActorGeometry::at(x, 300.0),
            behavior: None,
            preset: Some(preset.to_string()),
            sprite,
        };

        Self {
            scene: SceneMeta {
                name: name.to_string(),
                description: None,
            },
            run: RunConfig::default(),
            engine: SchedulerConfig::default(),
            actors: vec![
                actor(
                    "walker",
                    200.0,
                    "wander",
                    Some(SpritePreset::walk_cycle(
                        vec!["walk_0".into(), "walk_1".into(), "walk_2".into(), "walk_3".into()],
                        120.0,
                    )),
                ),
                actor("bouncer", 500.0, "bouncy", None),
                actor(
                    "lurker",
                    800.0,
                    "lurker",
                    Some(SpritePreset::idle_blink("eyes_open".into(), "eyes_closed".into())),
                ),
            ],
            timelines: vec![TimelineConfig {
                name: "hop".to_string(),
                segments: TimelinePreset::hop().segments,
            }],
        }
    }

    /// Check every actor and timeline for range problems
    pub fn validate(&self) -> Result<()> {
        if !self.run.step_ms.is_finite() || self.run.step_ms <= 0.0 {
            anyhow::bail!("run.step_ms must be positive (got {})", self.run.step_ms);
        }
        for actor in &self.actors {
            actor
                .geometry
                .validate()
                .with_context(|| format!("Invalid geometry for actor '{}'", actor.name))?;
            actor
                .resolve_behavior()?
                .validate()
                .with_context(|| format!("Invalid behavior for actor '{}'", actor.name))?;
            if let Some(sprite) = &actor.sprite {
                sprite
                    .validate()
                    .with_context(|| format!("Invalid sprite for actor '{}'", actor.name))?;
            }
        }
        for timeline in &self.timelines {
            Timeline::from(timeline.segments.clone())
                .validate()
                .with_context(|| format!("Invalid timeline '{}'", timeline.name))?;
        }
        Ok(())
    }

    /// Build a scheduler holding every actor in the scene
    pub fn build_scheduler(&self) -> Result<MotionScheduler> {
        let mut scheduler = MotionScheduler::with_config(self.engine);
        for actor in &self.actors {
            scheduler.add_actor(actor.build()?);
        }
        Ok(scheduler)
    }

    /// Look up a timeline by name, or take the first one
    pub fn timeline(&self, name: Option<&str>) -> Result<Timeline> {
        let found = match name {
            Some(name) => self.timelines.iter().find(|t| t.name == name),
            None => self.timelines.first(),
        };
        match found {
            Some(config) => Ok(Timeline::from(config.segments.clone())),
            None => match name {
                Some(name) => anyhow::bail!("No timeline named '{}' in scene '{}'", name, self.scene.name),
                None => anyhow::bail!("Scene '{}' has no timelines", self.scene.name),
            },
        }
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize scene")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use prance_motion::{BehaviorKind, Direction, PatrolParams};

    #[test]
    fn test_defaults_fill_omitted_sections() {
        let scene = SceneConfig::from_toml(
            r#"
            [scene]
            name = "empty"
            "#,
        )
        .unwrap();
        assert_eq!(scene.run.step_ms, 16.0);
        assert_eq!(scene.run.sample_every, 1);
        assert_eq!(scene.engine, SchedulerConfig::default());
        assert!(scene.actors.is_empty());
    }

    #[test]
    fn test_parse_actors_and_timelines() {
        let scene = SceneConfig::from_toml(
            r#"
            [scene]
            name = "yard"

            [run]
            duration_ms = 1000.0
            step_ms = 10.0

            [[actors]]
            name = "cat"
            geometry = { anchor = { x = 100.0, y = 50.0 } }
            behavior = { type = "patrol", speed = 30.0, direction = "left" }

            [[actors]]
            name = "frog"
            preset = "hopper"

            [[timelines]]
            name = "leap"

            [[timelines.segments]]
            type = "jump"
            duration = 500
            height = 100.0

            [[timelines.segments]]
            type = "land"
            duration = 100
            "#,
        )
        .unwrap();

        assert_eq!(scene.run.duration_ms, 1000.0);
        assert_eq!(
            scene.actors[0].resolve_behavior().unwrap(),
            BehaviorConfig::Patrol(PatrolParams::new(30.0, 200.0).with_direction(Direction::Backward))
        );
        assert_eq!(
            scene.actors[1].resolve_behavior().unwrap().kind(),
            BehaviorKind::Jump
        );
        let leap = scene.timeline(Some("leap")).unwrap();
        assert_eq!(leap.total_duration_ms(), 600);
        assert!(scene.validate().is_ok());
    }

    #[test]
    fn test_unknown_preset_is_an_error() {
        let actor = ActorConfig {
            name: "ghost".to_string(),
            geometry: ActorGeometry::default(),
            behavior: None,
            preset: Some("teleport".to_string()),
            sprite: None,
        };
        let err = actor.resolve_behavior().unwrap_err();
        assert!(err.to_string().contains("teleport"));
    }

    #[test]
    fn test_sample_scene_round_trips() {
        let scene = SceneConfig::new("demo");
        assert!(scene.validate().is_ok());
        let text = scene.to_toml().unwrap();
        let back = SceneConfig::from_toml(&text).unwrap();
        assert_eq!(back.scene.name, "demo");
        assert_eq!(back.actors.len(), 3);
        assert_eq!(back.actors[0].sprite, scene.actors[0].sprite);
        assert_eq!(back.timeline(None).unwrap(), TimelinePreset::hop());
    }

    #[test]
    fn test_missing_timeline() {
        let scene = SceneConfig::new("demo");
        assert!(scene.timeline(Some("nope")).is_err());
        assert_eq!(scene.build_scheduler().unwrap().actor_count(), 3);
    }

    #[test]
    fn test_invalid_step_is_rejected() {
        let mut scene = SceneConfig::new("demo");
        scene.run.step_ms = 0.0;
        assert!(scene.validate().is_err());
    }
}
