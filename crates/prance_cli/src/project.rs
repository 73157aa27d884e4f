//! Scene scaffolding

use anyhow::{Context, Result};
use prance_motion::TimelinePreset;
use std::fs;
use std::path::Path;

use crate::config::{SceneConfig, SCENE_FILE};

/// Create a new scene directory with a sample prance.toml
pub fn create_scene(path: &Path, name: &str) -> Result<()> {
    let scene_path = path.join(SCENE_FILE);
    if scene_path.exists() {
        anyhow::bail!("{} already exists", scene_path.display());
    }

    fs::create_dir_all(path.join("timelines"))
        .with_context(|| format!("Failed to create {}", path.display()))?;

    let scene = SceneConfig::new(name);
    fs::write(&scene_path, scene.to_toml()?)?;

    // Standalone timeline for `prance sample`
    let combo = serde_json::to_string_pretty(&TimelinePreset::combo())
        .context("Failed to serialize timeline")?;
    fs::write(path.join("timelines/combo.json"), combo)?;

    fs::write(
        path.join("README.md"),
        format!(
            r#"# {}

A Prance motion scene.

## Run

```bash
prance simulate {} > frames.jsonl
```

## Sample a timeline

```bash
prance sample timelines/combo.json --at 0 --at 500 --at 1200
prance sample {} --timeline hop --at 250
```

## Layout

```
{}/
├── {}          # Actors, behaviors, sprites and named timelines
└── timelines/
    └── combo.json       # A standalone segment list
```
"#,
            name, SCENE_FILE, SCENE_FILE, name, SCENE_FILE
        ),
    )?;

    tracing::info!(path = %path.display(), "created scene '{}'", name);
    Ok(())
}
