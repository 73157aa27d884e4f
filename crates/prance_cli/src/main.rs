//! Prance CLI
//!
//! Headless driver for the Prance motion engine:
//! - `simulate` runs a scene at a fixed step and prints poses as JSON lines
//! - `sample` evaluates a timeline at chosen playheads
//! - `init` scaffolds a new scene
//! - `presets` lists the built-in behaviors, sprites and timelines
//!
//! Logs go to stderr so stdout stays machine-readable.

mod config;
mod project;
mod sample;
mod simulate;

use anyhow::Result;
use clap::{Parser, Subcommand};
use prance_motion::{BehaviorPreset, TimelinePreset};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::SceneConfig;

#[derive(Parser, Debug)]
#[command(name = "prance")]
#[command(about = "Procedural motion for 2D actors, headless")]
#[command(version)]
struct Cli {
    /// Log engine internals (behavior resets, stalker transitions)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a scene and print every actor's pose as JSON lines
    Simulate {
        /// Scene file, or a directory containing prance.toml
        #[arg(default_value = ".")]
        scene: PathBuf,

        /// Override [run].duration_ms
        #[arg(long)]
        duration_ms: Option<f64>,

        /// Override [run].step_ms
        #[arg(long)]
        step_ms: Option<f32>,
    },

    /// Evaluate a timeline at one or more playheads
    Sample {
        /// Timeline JSON, scene TOML, or a timeline preset name
        source: String,

        /// Playhead in milliseconds (repeatable)
        #[arg(long = "at", required = true, num_args = 1.., allow_negative_numbers = true)]
        at: Vec<f64>,

        /// Timeline to pick from a scene file
        #[arg(long)]
        timeline: Option<String>,
    },

    /// Create a new scene
    Init {
        /// Directory to create the scene in
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Scene name (defaults to the directory name)
        #[arg(long)]
        name: Option<String>,
    },

    /// List built-in presets
    Presets,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Simulate {
            scene,
            duration_ms,
            step_ms,
        } => cmd_simulate(scene, duration_ms, step_ms),
        Commands::Sample {
            source,
            at,
            timeline,
        } => cmd_sample(&source, &at, timeline.as_deref()),
        Commands::Init { path, name } => cmd_init(path, name),
        Commands::Presets => cmd_presets(),
    }
}

fn cmd_simulate(path: PathBuf, duration_ms: Option<f64>, step_ms: Option<f32>) -> Result<()> {
    let mut scene = SceneConfig::load_from_path(&path)?;
    if let Some(duration_ms) = duration_ms {
        scene.run.duration_ms = duration_ms;
    }
    if let Some(step_ms) = step_ms {
        scene.run.step_ms = step_ms;
    }
    scene.validate()?;

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let written = simulate::run_scene(&scene, scene.run, &mut out)?;
    out.flush()?;

    tracing::info!(frames = written, "done");
    Ok(())
}

fn cmd_sample(source: &str, at: &[f64], timeline: Option<&str>) -> Result<()> {
    let timeline = sample::load_timeline(source, timeline)?;
    if let Err(err) = timeline.validate() {
        tracing::warn!("timeline has problems, sampling anyway: {}", err);
    }

    let records = sample::sample(&timeline, at);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    sample::write_samples(&records, &mut out)?;
    Ok(())
}

fn cmd_init(path: PathBuf, name: Option<String>) -> Result<()> {
    let name = name.unwrap_or_else(|| {
        let resolved = path.canonicalize().unwrap_or_else(|_| path.clone());
        resolved
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("prance-scene")
            .to_string()
    });

    project::create_scene(&path, &name)?;

    println!("Created scene '{}' in {}", name, path.display());
    println!();
    println!("Next steps:");
    println!("  prance simulate {}", path.display());
    Ok(())
}

fn cmd_presets() -> Result<()> {
    println!("Behaviors:");
    for name in BehaviorPreset::NAMES {
        if let Some(config) = BehaviorPreset::by_name(name) {
            println!("  {:<10} {}", name, config.kind().name());
        }
    }

    println!();
    println!("Sprites:");
    println!("  idle_blink   hold one frame, blink every few seconds");
    println!("  walk_cycle   step through every frame at an even pace");
    println!("  breathe      two-frame rest/inhale loop");

    println!();
    println!("Timelines:");
    for name in TimelinePreset::NAMES {
        if let Some(timeline) = TimelinePreset::by_name(name) {
            println!(
                "  {:<10} {} segments, {} ms",
                name,
                timeline.segments.len(),
                timeline.total_duration_ms()
            );
        }
    }
    Ok(())
}
