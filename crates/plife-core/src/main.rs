//! Particle Life Simulation
//!
//! Runs the simulation headless and writes JSON snapshots and a JSONL tick
//! summary stream for a renderer or analysis tool to pick up.

use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use plife_core::config::{default_config_toml, SimulationConfig, DEFAULT_CONFIG_PATH};
use plife_core::events::SummaryLogger;
use plife_core::output::{write_current_state, write_snapshot_to_dir, SnapshotGenerator};
use plife_core::setup::get_spawn_summary;
use plife_core::{SimError, Simulation};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "particle_life")]
#[command(about = "A headless particle-life simulation")]
struct Args {
    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 1000)]
    ticks: u64,

    /// Path to a TOML config file (defaults are used when omitted and
    /// particle_life.toml is absent)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Interval between population snapshots (in ticks, 0 disables)
    #[arg(long, default_value_t = 100)]
    snapshot_interval: u64,

    /// Output directory for snapshots and tick summaries
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Print the default configuration file and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", default_config_toml());
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(args: &Args) -> Result<SimulationConfig, SimError> {
    match &args.config {
        Some(path) => Ok(SimulationConfig::load(path)?),
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                Ok(SimulationConfig::load(default_path)?)
            } else {
                Ok(SimulationConfig::default())
            }
        }
    }
}

fn run(args: &Args) -> Result<(), SimError> {
    let config = load_config(args)?;

    println!("Particle Life");
    println!("=============");
    println!("Seed: {}", args.seed);
    println!("Ticks: {}", args.ticks);
    println!("Snapshot interval: {}", args.snapshot_interval);
    println!("Update mode: {:?}", config.stepping.update_mode);
    println!();

    // Ensure output directories exist
    fs::create_dir_all(args.output_dir.join("snapshots")).unwrap_or_else(|e| {
        eprintln!("Warning: Could not create output directories: {}", e);
    });

    println!("Initializing population...");
    let mut sim = Simulation::new(config, args.seed)?;
    let summary = get_spawn_summary(sim.world_mut());
    println!("  Spawned {} particles", summary.total_particles);
    for (name, count) in &summary.by_type {
        println!("    {}: {}", name, count);
    }

    let mut logger = SummaryLogger::new(args.output_dir.join("ticks.jsonl"))?;
    let mut generator = SnapshotGenerator::new(args.snapshot_interval);

    write_outputs(&mut sim, &mut generator, "simulation_start", args);

    println!();
    println!("Starting simulation...");
    println!();

    for _ in 0..args.ticks {
        let summary = sim.advance();
        let tick = summary.tick;

        if let Err(e) = logger.log(&summary) {
            eprintln!("Warning: Could not log tick {}: {}", tick, e);
        }

        if generator.should_snapshot(tick) {
            write_outputs(&mut sim, &mut generator, "periodic", args);
        }

        // Print progress every 100 ticks
        if tick % 100 == 0 {
            println!(
                "Tick {} / {} - moving {} / {} (mean speed {:.3})",
                tick,
                args.ticks,
                summary.moving,
                summary.particle_count,
                summary.mean_speed
            );
        }
    }

    // Skip the final snapshot when the last periodic one already covered it
    if generator.last_snapshot_tick() != Some(sim.tick()) {
        write_outputs(&mut sim, &mut generator, "simulation_end", args);
    }
    logger.flush()?;

    println!();
    println!("Simulation complete. Ran {} ticks.", sim.tick());
    println!("Generated {} snapshots.", generator.snapshot_count());
    Ok(())
}

/// Snapshot failures are reported but do not stop the run
fn write_outputs(
    sim: &mut Simulation,
    generator: &mut SnapshotGenerator,
    triggered_by: &str,
    args: &Args,
) {
    let snapshot = sim.snapshot(triggered_by);
    if let Err(e) = write_snapshot_to_dir(&args.output_dir, &snapshot) {
        eprintln!("Warning: Could not write snapshot at tick {}: {}", snapshot.tick, e);
    }
    if let Err(e) = write_current_state(&args.output_dir, &snapshot) {
        eprintln!("Warning: Could not write current state at tick {}: {}", snapshot.tick, e);
    }
    generator.mark_snapshot(snapshot.tick);
}
