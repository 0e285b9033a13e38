//! Vantage Sim - run a gameplay scenario without a window
//!
//! Usage:
//!   vantage-sim <scenario.toml> [--frames N] [--dt SECONDS] [--json]

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use vantage_sim::{Runner, Scenario};

#[derive(Parser)]
#[command(name = "vantage-sim")]
#[command(about = "Vantage sandbox - replay a scripted scenario through the first-person controller")]
struct Args {
    /// Path to scenario file
    scenario: PathBuf,

    /// Override the number of frames to run
    #[arg(long)]
    frames: Option<u64>,

    /// Override the fixed frame delta in seconds
    #[arg(long)]
    dt: Option<f64>,

    /// Print the report as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let args = Args::parse();

    let mut scenario = Scenario::load(&args.scenario)
        .with_context(|| format!("Failed to load scenario {}", args.scenario.display()))?;
    if let Some(frames) = args.frames {
        scenario.scenario.frames = frames;
    }
    if let Some(dt) = args.dt {
        scenario.scenario.dt = dt;
        scenario.validate().context("Invalid --dt")?;
    }

    let runner = Runner::new(scenario).context("Failed to build sandbox")?;
    let report = runner.run().context("Scenario run failed")?;

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.summary());
    }

    Ok(())
}
