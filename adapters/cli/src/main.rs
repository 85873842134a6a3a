#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Lane Defence headless.

mod placement;
mod session;
mod settings;

use std::{path::PathBuf, time::Duration};

use anyhow::{bail, Context, Result};
use clap::Parser;
use lane_defence_core::{SimulationConfig, WELCOME_BANNER};
use lane_defence_simulation::Simulation;
use tracing_subscriber::EnvFilter;

use placement::TowerOrder;
use session::SessionPlan;
use settings::Settings;

/// Runs Lane Defence without a renderer and prints a summary.
#[derive(Debug, Parser)]
#[command(name = "lane-defence", version)]
struct Args {
    /// TOML settings file patching the built-in configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of waves to play.
    #[arg(long, default_value_t = 3)]
    waves: u32,

    /// Tower to build before the first wave, as `kind:column,row`. Repeatable.
    #[arg(long = "tower", value_name = "KIND:COLUMN,ROW")]
    towers: Vec<TowerOrder>,

    /// Simulated frame length in milliseconds.
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,

    /// Upper bound on simulated frames.
    #[arg(long, default_value_t = 200_000)]
    max_frames: u64,

    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, default_value = "lane_defence=info")]
    log: String,
}

/// Entry point for the Lane Defence command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log))
        .with_context(|| format!("invalid log filter `{}`", args.log))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if args.frame_ms == 0 {
        bail!("--frame-ms must be at least 1");
    }

    let config = match &args.config {
        Some(path) => Settings::load(path)?.into_config()?,
        None => SimulationConfig::default(),
    };
    let mut simulation = Simulation::new(config).context("invalid simulation configuration")?;

    println!("{WELCOME_BANNER}");
    let summary = session::play(
        &mut simulation,
        &args.towers,
        SessionPlan {
            waves: args.waves,
            frame: Duration::from_millis(args.frame_ms),
            max_frames: args.max_frames,
        },
    );
    println!("{summary}");
    Ok(())
}
