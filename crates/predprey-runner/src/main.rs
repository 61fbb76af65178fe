//! Command-line driver for the hexagonal predator-prey simulation.

mod telemetry;

use anyhow::{Context, Result};
use predprey_core::SimulationConfig;
use predprey_world::{render, Simulation, Snapshot};
use std::io::Write;
use tracing::info;

fn main() -> Result<()> {
    telemetry::init_telemetry()?;

    let config = load_config()?;
    info!(
        rows = config.world.rows,
        cols = config.world.cols,
        num_prey = config.population.num_prey,
        num_predators = config.population.num_predators,
        num_steps = config.num_steps,
        "Starting predator-prey runner"
    );

    let mut simulation = match &config.resume_from {
        Some(path) => {
            let snapshot = Snapshot::load(path)
                .with_context(|| format!("Failed to load snapshot {}", path))?;
            Simulation::from_snapshot(config.clone(), snapshot)?
        }
        None => Simulation::new(config.clone())?,
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut write_error = None;

    simulation.run(|step, grid| {
        if !config.render || write_error.is_some() {
            return;
        }
        if let Err(e) = write!(out, "Step {}:\n{}", step, render(grid)) {
            write_error = Some(e);
        }
    });

    if let Some(e) = write_error {
        return Err(e).context("Failed to write grid to stdout");
    }
    out.flush()?;

    if let Some(path) = &config.snapshot_path {
        simulation
            .snapshot()
            .save(path)
            .with_context(|| format!("Failed to write snapshot {}", path))?;
    }

    Ok(())
}

/// Defaults, then the JSON file named by `PREDPREY_CONFIG`, then
/// `PREDPREY_SEED` and `PREDPREY_STEPS` overrides
fn load_config() -> Result<SimulationConfig> {
    let mut config = match std::env::var("PREDPREY_CONFIG") {
        Ok(path) => {
            info!("Loading configuration from {}", path);
            SimulationConfig::from_json_file(&path)
                .with_context(|| format!("Failed to load config from {}", path))?
        }
        Err(_) => SimulationConfig::default(),
    };

    if let Ok(seed) = std::env::var("PREDPREY_SEED") {
        config.seed = Some(
            seed.parse()
                .with_context(|| format!("PREDPREY_SEED is not a number: {}", seed))?,
        );
    }

    if let Ok(steps) = std::env::var("PREDPREY_STEPS") {
        config.num_steps = steps
            .parse()
            .with_context(|| format!("PREDPREY_STEPS is not a number: {}", steps))?;
    }

    config.validate()?;
    Ok(config)
}
