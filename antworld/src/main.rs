use std::path::PathBuf;

use anyhow::Result;
use antworld::config::load_config;
use antworld::simulation::World;
use clap::Parser;
use tracing::info;

/// Command-line arguments for the headless ant world.
#[derive(Parser)]
#[command(name = "antworld", version, about = "Stigmergic ant colony simulation")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of ticks to run.
    #[arg(short, long, default_value_t = 1000)]
    ticks: u64,

    /// Seed overriding the configured one.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Log per-species statistics every N ticks, 0 to disable.
    #[arg(long, default_value_t = 100)]
    report_every: u64,

    /// Print the final world snapshot as JSON instead of a summary table.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(seed) = cli.seed {
        config.rng_seed = Some(seed);
    }

    let mut world = World::new(config)?;
    info!(
        seed = world.seed(),
        width = world.grid().width,
        height = world.grid().height,
        ticks = cli.ticks,
        "Starting simulation"
    );

    for _ in 0..cli.ticks {
        world.step();
        if cli.report_every > 0 && world.tick() % cli.report_every == 0 {
            report(&world);
        }
        if world.is_extinct() {
            info!(tick = world.tick(), "Every colony has died out");
            break;
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&world.snapshot())?);
    } else {
        print_summary(&world);
    }
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn report(world: &World) {
    for stats in world.species_stats() {
        info!(
            tick = world.tick(),
            species = stats.species,
            workers = stats.workers,
            queens = stats.queens,
            anthills = stats.anthills,
            stored_food = stats.stored_food,
            food_collected = stats.food_collected,
            "species report"
        );
    }
}

fn print_summary(world: &World) {
    println!("tick {} (seed {})", world.tick(), world.seed());
    println!(
        "{:>8} {:>8} {:>7} {:>9} {:>12} {:>15}",
        "species", "workers", "queens", "anthills", "stored food", "food collected"
    );
    for stats in world.species_stats() {
        println!(
            "{:>8} {:>8} {:>7} {:>9} {:>12.1} {:>15.1}",
            stats.species,
            stats.workers,
            stats.queens,
            stats.anthills,
            stats.stored_food,
            stats.food_collected
        );
    }
}
