use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use roomgen::{
    DungeonSeed, LocalSession, PlacementPlan, PlacementSource, RoomConfiguration, generate_room,
    load_room_config,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod sweep;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the placement plan one seed produces for a room file
    Plan {
        /// Room configuration file (.toml or .json)
        #[arg(short, long)]
        config: PathBuf,
        /// Dungeon seed shared by every peer
        #[arg(short, long, allow_negative_numbers = true)]
        seed: i32,
        /// Emit the plan as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Run one authority and several observers in-process and compare plans
    Session {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long, allow_negative_numbers = true)]
        seed: i32,
        #[arg(short, long, default_value_t = 2)]
        observers: usize,
    },
    /// Regenerate a range of seeds and check determinism and layout stability
    Sweep {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long, default_value_t = 100)]
        seeds: u32,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        start: i32,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    match Args::parse().command {
        Command::Plan { config, seed, json } => plan(&config, DungeonSeed(seed), json),
        Command::Session { config, seed, observers } => {
            session(&config, DungeonSeed(seed), observers)
        }
        Command::Sweep { config, seeds, start } => sweep_seeds(&config, start, seeds),
    }
}

fn load(path: &Path) -> Result<RoomConfiguration> {
    let config = load_room_config(path)
        .with_context(|| format!("Failed to load room configuration: {}", path.display()))?;
    info!(
        path = %path.display(),
        tile_size = config.tile_size(),
        grid_x = config.grid_size_x(),
        grid_y = config.grid_size_y(),
        "loaded room configuration"
    );
    Ok(config)
}

fn plan(path: &Path, seed: DungeonSeed, json: bool) -> Result<()> {
    let config = load(path)?;
    let plan = generate_room(seed, Some(&config));

    if json {
        let text = serde_json::to_string_pretty(&plan).context("Failed to serialize plan")?;
        println!("{text}");
        let fingerprint = format!("{:016x}", plan.fingerprint());
        info!(%fingerprint, entries = plan.len(), "plan fingerprint");
        return Ok(());
    }

    print_plan(&plan);
    println!("Room Seed: {}", seed.derive_room_seed());
    println!("Entries: {}", plan.len());
    println!("Plan Fingerprint: {:016x}", plan.fingerprint());
    Ok(())
}

fn print_plan(plan: &PlacementPlan) {
    println!(
        "{:<10} {:<14} {:>10} {:>10} {:>10} {:>6}  asset",
        "source", "type", "x", "y", "z", "yaw"
    );
    for entry in plan {
        let source = match entry.source {
            PlacementSource::Cell(coord) => format!("({},{})", coord.x, coord.y),
            PlacementSource::Slot(index) => format!("slot {index}"),
        };
        let kind = format!("{:?}", entry.element_type);
        let position = entry.transform.position;
        println!(
            "{:<10} {:<14} {:>10.1} {:>10.1} {:>10.1} {:>6.0}  {}",
            source,
            kind,
            position.x,
            position.y,
            position.z,
            entry.transform.yaw_degrees,
            entry.asset,
        );
    }
}

fn session(path: &Path, seed: DungeonSeed, observers: usize) -> Result<()> {
    let config = Arc::new(load(path)?);
    let mut session = LocalSession::new(Some(config), observers);

    session.start_generation(seed).context("Authority failed to start generation")?;
    let delivered = session.pump();
    info!(%seed, delivered, "seed propagated to observers");

    for (index, fingerprint) in session.fingerprints().iter().enumerate() {
        let peer = if index == 0 { "authority".to_string() } else { format!("observer {index}") };
        println!("{peer:<12} {fingerprint:016x}");
    }

    if !session.in_sync() {
        bail!("Observers diverged from the authority for seed {seed}");
    }
    println!("All {} peers in sync.", session.observer_count() + 1);
    Ok(())
}

fn sweep_seeds(path: &Path, start: i32, seeds: u32) -> Result<()> {
    let config = load(path)?;
    let report = sweep::run_sweep(&config, start, seeds);

    println!("Seeds Checked: {}", report.seeds_checked);
    println!("Entries Per Plan: {}", report.entries_per_plan);
    for (source, (seen, pool)) in &report.coverage {
        println!("{source:?}: {seen}/{pool} candidates selected");
    }

    if !report.passed() {
        for failure in &report.failures {
            eprintln!("{failure}");
        }
        bail!("Sweep found {} failure(s)", report.failures.len());
    }
    println!("Sweep passed.");
    Ok(())
}
