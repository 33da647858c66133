//! voxmotion replay harness
//!
//! Builds a small world, spawns a scripted player and runs it through the
//! physics driver, logging the player's state every tick.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p voxmotion-replay -- [OPTIONS]
//! ```
//!
//! ## Options
//!
//! - `--ticks <N>`: Number of ticks to simulate (default: 200)
//! - `--version <VERSION>`: Game version whose rules apply (default: 1.20.4)
//! - `--scenario <NAME>`: flat, terrain, pool, ladder or glide (default: flat)
//! - `--seed <N>`: Terrain seed for noise scenarios (default: 42)
//! - `-h, --help`: Print help message
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Set log level (e.g., info, debug, trace)

mod scenario;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use voxmotion_data::{FeatureTable, Registry};
use voxmotion_entity::{Body, PhysicsDriver};

use crate::scenario::Scenario;

/// Block, item and effect ids shared by every supported version.
const REGISTRY_JSON: &str = include_str!("../data/registry.json");

#[derive(Debug, Clone)]
struct ReplayArgs {
    ticks: u32,
    version: String,
    scenario: Scenario,
    seed: u32,
}

impl Default for ReplayArgs {
    fn default() -> Self {
        Self {
            ticks: 200,
            version: "1.20.4".to_owned(),
            scenario: Scenario::Flat,
            seed: 42,
        }
    }
}

impl ReplayArgs {
    /// Parse replay options from command line arguments.
    fn from_args() -> anyhow::Result<Self> {
        let mut parsed = Self::default();
        let args: Vec<String> = std::env::args().collect();

        let mut i = 1;
        while i < args.len() {
            let value = args.get(i + 1);
            match (args[i].as_str(), value) {
                ("--ticks", Some(v)) => {
                    parsed.ticks = v.parse().context("--ticks expects a number")?;
                    i += 1;
                }
                ("--version", Some(v)) => {
                    parsed.version.clone_from(v);
                    i += 1;
                }
                ("--scenario", Some(v)) => {
                    parsed.scenario = v.parse()?;
                    i += 1;
                }
                ("--seed", Some(v)) => {
                    parsed.seed = v.parse().context("--seed expects a number")?;
                    i += 1;
                }
                (flag, _) => warn!(flag, "Ignoring unrecognised argument"),
            }
            i += 1;
        }

        Ok(parsed)
    }
}

fn load_registry(version: &str) -> anyhow::Result<Registry> {
    let mut doc: serde_json::Value = serde_json::from_str(REGISTRY_JSON)?;
    doc["version"] = serde_json::Value::from(version);
    let features = FeatureTable::builtin()?;
    Ok(Registry::from_json(&doc.to_string(), features)?)
}

fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "-h" || arg == "--help") {
        print_help();
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = ReplayArgs::from_args()?;
    let registry = load_registry(&args.version)
        .with_context(|| format!("loading registry for {}", args.version))?;
    let driver = PhysicsDriver::new(&registry)?;
    let mut setup = args.scenario.build(&registry, args.seed)?;

    info!(
        version = %registry.version(),
        scenario = ?args.scenario,
        ticks = args.ticks,
        "Starting replay"
    );

    let mut skipped = 0;
    for tick in 0..args.ticks {
        setup.script(tick)?;
        let report = driver.tick(&mut setup.entities, &setup.world);
        skipped += report.skipped;

        let body = setup.entities.get::<&Body>(setup.player)?;
        info!(
            tick,
            x = format_args!("{:.4}", body.position.x),
            y = format_args!("{:.4}", body.position.y),
            z = format_args!("{:.4}", body.position.z),
            on_ground = body.contacts.on_ground,
            in_water = body.contacts.in_water,
            elytra = body.elytra_flying,
            "Tick"
        );
    }

    if skipped > 0 {
        warn!(skipped, "Player left the loaded world");
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        "voxmotion replay harness

USAGE:
    cargo run -p voxmotion-replay -- [OPTIONS]

OPTIONS:
    --ticks <N>             Number of ticks to simulate (default: 200)
    --version <VERSION>     Game version whose rules apply (default: 1.20.4)
    --scenario <NAME>       flat, terrain, pool, ladder or glide (default: flat)
    --seed <N>              Terrain seed for noise scenarios (default: 42)
    -h, --help              Print this help message

EXAMPLES:
    # Sprint-jump across a flat floor
    cargo run -p voxmotion-replay

    # Swim with pre-1.13 liquid rules
    cargo run -p voxmotion-replay -- --scenario pool --version 1.12.2

    # Glide over a different landscape
    cargo run -p voxmotion-replay -- --scenario glide --seed 7 --ticks 400

ENVIRONMENT:
    RUST_LOG                Log filter (default: info)"
    );
}
