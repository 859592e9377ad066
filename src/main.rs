//! handcast - a gesture-driven 3D pointer interaction demo
//!
//! Headless executable: loads config, builds the demo scene, and runs a
//! scripted hand-tracking session against it.

mod config;
mod demo;

use anyhow::Result;
use config::HandcastConfig;
use demo::{default_script, DemoSession};
use handcast_testkit::{JsonlSink, RunMetadata, ScriptedHand};
use std::{env, path::PathBuf};
use tracing::info;

/// Parsed command-line options.
#[derive(Debug, Default)]
struct CliOptions {
    config: Option<PathBuf>,
    script: Option<PathBuf>,
    event_log: Option<PathBuf>,
    run_meta: Option<PathBuf>,
    ticks: Option<u64>,
    seed: Option<u64>,
    help: bool,
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Self {
        let mut options = Self::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => options.config = args.next().map(PathBuf::from),
                "--script" => options.script = args.next().map(PathBuf::from),
                "--event-log" => options.event_log = args.next().map(PathBuf::from),
                "--run-meta" => options.run_meta = args.next().map(PathBuf::from),
                "--ticks" => {
                    options.ticks = args.next().and_then(|value| match value.parse() {
                        Ok(ticks) => Some(ticks),
                        Err(_) => {
                            tracing::error!("--ticks expects a number, got {value}");
                            None
                        }
                    })
                }
                "--seed" => {
                    options.seed = args.next().and_then(|value| match value.parse() {
                        Ok(seed) => Some(seed),
                        Err(_) => {
                            tracing::error!("--seed expects a number, got {value}");
                            None
                        }
                    })
                }
                "--help" | "-h" => options.help = true,
                other => tracing::warn!("ignoring unknown argument {other}"),
            }
        }
        options
    }
}

fn print_usage() {
    println!(
        "handcast v{}\n\n\
         USAGE: handcast [OPTIONS]\n\n\
         OPTIONS:\n\
           --config <path>     Config file (default: config/handcast.toml)\n\
           --script <path>     Hand-motion script JSON (default: built-in round)\n\
           --ticks <n>         Frames to simulate (default: 1200)\n\
           --seed <n>          Session RNG seed (default: 7)\n\
           --event-log <path>  Write NDJSON event records here\n\
           --run-meta <path>   Write run metadata JSON here\n\
           -h, --help          Show this help",
        env!("CARGO_PKG_VERSION")
    );
}

fn main() -> Result<()> {
    // Initialize tracing with INFO level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = CliOptions::parse(env::args().skip(1));
    if cli.help {
        print_usage();
        return Ok(());
    }

    info!("Starting handcast v{}", env!("CARGO_PKG_VERSION"));

    let config = match &cli.config {
        Some(path) => HandcastConfig::load_from_path(path),
        None => HandcastConfig::load(),
    };

    let mut tracker: ScriptedHand = match &cli.script {
        Some(path) => ScriptedHand::from_path(path)?,
        None => default_script(&config),
    };

    let mut sink = match &cli.event_log {
        Some(path) => Some(JsonlSink::create(path)?),
        None => None,
    };

    let ticks = cli.ticks.unwrap_or(1200);
    let seed = cli.seed.unwrap_or(7);

    let mut session = DemoSession::new(config, seed);
    session.run(&mut tracker, ticks, &mut sink)?;

    if let Some(path) = &cli.run_meta {
        RunMetadata::new(seed, ticks).write_to(path)?;
    }

    Ok(())
}
