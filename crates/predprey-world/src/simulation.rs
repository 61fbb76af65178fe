//! Simulation driver: owns the committed grid and the random stream.

use crate::grid::Grid;
use crate::snapshot::Snapshot;
use crate::stepper::step_grid;
use predprey_core::{Census, Result, RunSummary, SimulationConfig, StepEvents};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, event, info, instrument, Level};

/// Result of a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    /// Number of steps completed, including this one
    pub step: u64,
    pub events: StepEvents,
    pub census: Census,
}

pub struct Simulation {
    grid: Grid,
    config: SimulationConfig,
    rng: ChaCha8Rng,
    seed: u64,
    step_count: u64,
    summary: RunSummary,
}

impl Simulation {
    /// Seed a fresh grid from the configuration
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let grid = Grid::from_config(&config.world, &config.population, &mut rng);

        info!(
            seed = seed,
            rows = grid.rows(),
            cols = grid.cols(),
            "Seeded initial grid"
        );

        Ok(Self::assemble(config, grid, rng, seed, 0))
    }

    /// Run over a caller-supplied grid
    pub fn with_grid(config: SimulationConfig, grid: Grid, seed: u64) -> Result<Self> {
        config.validate()?;
        grid.validate()?;
        let rng = ChaCha8Rng::seed_from_u64(seed);
        Ok(Self::assemble(config, grid, rng, seed, 0))
    }

    /// Continue a run from a snapshot.
    ///
    /// Generator state is not stored, so the stream is re-derived from the
    /// snapshot's seed and step count.
    pub fn from_snapshot(config: SimulationConfig, snapshot: Snapshot) -> Result<Self> {
        config.validate()?;
        snapshot.grid.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(snapshot.seed);
        rng.set_stream(snapshot.step);

        info!(
            seed = snapshot.seed,
            step = snapshot.step,
            rows = snapshot.grid.rows(),
            cols = snapshot.grid.cols(),
            "Resuming from snapshot"
        );

        Ok(Self::assemble(
            config,
            snapshot.grid,
            rng,
            snapshot.seed,
            snapshot.step,
        ))
    }

    fn assemble(
        config: SimulationConfig,
        grid: Grid,
        rng: ChaCha8Rng,
        seed: u64,
        step_count: u64,
    ) -> Self {
        let summary = RunSummary::new(seed, grid.census());
        Self {
            grid,
            config,
            rng,
            seed,
            step_count,
            summary,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Advance the committed grid by one step
    pub fn step(&mut self) -> StepReport {
        let (next, events) = step_grid(&self.grid, &mut self.rng);
        self.grid = next;
        self.step_count += 1;

        let census = self.grid.census();
        let newly_extinct = census.is_extinct() && self.summary.extinct_at.is_none();
        self.summary.record(self.step_count, events, census);

        if newly_extinct {
            info!(
                event = "extinction",
                step = self.step_count,
                "No organisms left on the grid"
            );
        }

        StepReport {
            step: self.step_count,
            events,
            census,
        }
    }

    /// Run the configured number of steps.
    ///
    /// `observer` sees the grid before each step together with the number of
    /// that step.
    #[instrument(skip(self, observer), fields(num_steps = self.config.num_steps, seed = self.seed))]
    pub fn run<F>(&mut self, mut observer: F) -> RunSummary
    where
        F: FnMut(u64, &Grid),
    {
        let initial = self.grid.census();
        info!(
            prey = initial.prey,
            predators = initial.predators,
            "Starting simulation for {} steps",
            self.config.num_steps
        );

        for _ in 0..self.config.num_steps {
            observer(self.step_count + 1, &self.grid);
            let report = self.step();

            if report.step % self.config.log_interval == 0 {
                self.emit_population_metrics(&report);
            }

            if self.config.stop_when_extinct && report.census.is_extinct() {
                info!(step = report.step, "Stopping early, population extinct");
                break;
            }
        }

        self.emit_run_summary();
        self.summary.clone()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.step_count, self.seed, self.grid.clone())
    }

    fn emit_population_metrics(&self, report: &StepReport) {
        let census = report.census;
        let events = report.events;

        debug!(
            event = "population_metrics",
            step = report.step,
            prey = census.prey,
            predators = census.predators,
            avg_predator_energy = census.avg_predator_energy(),
            prey_births = events.prey_births,
            predator_births = events.predator_births,
            hunts = events.hunts,
            starvations = events.starvations,
            "Population metrics snapshot"
        );

        event!(
            Level::DEBUG,
            gauge_name = "prey_population",
            gauge_value = census.prey,
            step = report.step,
            "Prey gauge"
        );

        event!(
            Level::DEBUG,
            gauge_name = "predator_population",
            gauge_value = census.predators,
            step = report.step,
            "Predator gauge"
        );
    }

    fn emit_run_summary(&self) {
        let summary = &self.summary;
        info!(
            event = "run_summary",
            seed = summary.seed,
            steps_run = summary.steps_run,
            final_prey = summary.final_census.prey,
            final_predators = summary.final_census.predators,
            peak_prey = summary.peak_prey,
            peak_predators = summary.peak_predators,
            prey_births = summary.totals.prey_births,
            predator_births = summary.totals.predator_births,
            hunts = summary.totals.hunts,
            starvations = summary.totals.starvations,
            extinct_at = ?summary.extinct_at,
            "Simulation complete"
        );
    }
}
