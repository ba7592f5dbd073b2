//! Simulation facade
//!
//! Owns the ECS world and the step schedule. Hosts create one, call
//! [`Simulation::advance`] once per tick, and read particle state back.

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ExecutorKind;
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use plife_events::{PopulationSnapshot, TickSummary};

use crate::components::matrix::InteractionMatrix;
use crate::components::particle::{ParticleId, ParticleState, TypeRegistry};
use crate::components::world::{RunSeed, SimulationClock};
use crate::config::{ConfigError, SimulationConfig};
use crate::output::generate_snapshot;
use crate::setup::{self, build_type_templates};
use crate::systems::step::{advance_particles, collect_population, integrate_positions, StepStats};
use crate::SimRng;

/// A running particle-life simulation
pub struct Simulation {
    world: World,
    schedule: Schedule,
}

impl Simulation {
    /// Validate `config`, then build templates, a random matrix and the
    /// initial population from `seed`.
    pub fn new(config: SimulationConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut world = World::new();
        let mut rng = SmallRng::seed_from_u64(seed);
        setup::initialize(&mut world, config, &mut rng);

        Ok(Self::assemble(world, rng, seed))
    }

    /// Like [`Simulation::new`] but with a hand-authored matrix.
    ///
    /// The matrix must cover exactly the configured types.
    pub fn with_matrix(
        config: SimulationConfig,
        matrix: InteractionMatrix,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if matrix.type_count() != config.type_count() {
            return Err(ConfigError::Invalid(format!(
                "matrix covers {} types but {} are configured",
                matrix.type_count(),
                config.type_count()
            )));
        }

        let mut world = World::new();
        let mut rng = SmallRng::seed_from_u64(seed);
        let registry = build_type_templates(&config, &mut rng);
        setup::initialize_with_matrix(&mut world, config, registry, matrix, &mut rng);

        Ok(Self::assemble(world, rng, seed))
    }

    fn assemble(mut world: World, rng: SmallRng, seed: u64) -> Self {
        world.insert_resource(SimRng(rng));
        world.insert_resource(RunSeed(seed));

        let mut schedule = Schedule::default();
        // Single-threaded keeps runs reproducible
        schedule.set_executor_kind(ExecutorKind::SingleThreaded);
        schedule.add_systems((advance_particles, integrate_positions).chain());

        Self { world, schedule }
    }

    /// Run one tick and return its summary.
    pub fn advance(&mut self) -> TickSummary {
        self.schedule.run(&mut self.world);
        self.world.resource_mut::<SimulationClock>().advance_tick();

        let tick = self.tick();
        let summary = self.world.resource::<StepStats>().to_summary(tick);
        tracing::debug!(
            tick,
            moving = summary.moving,
            stopped = summary.stopped,
            unaffected = summary.unaffected,
            wrapped = summary.wrapped,
            "tick complete"
        );
        summary
    }

    /// Run `ticks` ticks, returning the last summary.
    pub fn run(&mut self, ticks: u64) -> Option<TickSummary> {
        let mut last = None;
        for _ in 0..ticks {
            last = Some(self.advance());
        }
        last
    }

    /// Ticks completed so far
    pub fn tick(&self) -> u64 {
        self.world.resource::<SimulationClock>().current_tick
    }

    pub fn seed(&self) -> u64 {
        self.world.resource::<RunSeed>().0
    }

    pub fn config(&self) -> &SimulationConfig {
        self.world.resource::<SimulationConfig>()
    }

    pub fn matrix(&self) -> &InteractionMatrix {
        self.world.resource::<InteractionMatrix>()
    }

    pub fn types(&self) -> &TypeRegistry {
        self.world.resource::<TypeRegistry>()
    }

    /// Outcome counts of the most recent tick
    pub fn last_stats(&self) -> &StepStats {
        self.world.resource::<StepStats>()
    }

    /// Every particle's current state, in spawn order.
    pub fn particles(&mut self) -> Vec<ParticleState> {
        collect_population(&mut self.world)
    }

    pub fn particle_count(&mut self) -> usize {
        let mut query = self.world.query::<&ParticleId>();
        query.iter(&self.world).count()
    }

    /// Spawn `amount` more particles at random positions with random types.
    pub fn spawn_particles(&mut self, amount: usize) -> usize {
        // Take the RNG out to avoid borrow conflicts
        let Some(mut sim_rng) = self.world.remove_resource::<SimRng>() else {
            return 0;
        };
        let spawned = setup::spawn_random_particles(&mut self.world, amount, &mut sim_rng.0);
        self.world.insert_resource(sim_rng);
        spawned
    }

    /// Spawn one resting particle of `kind` at `position`.
    ///
    /// Panics if `kind` is not a configured type.
    pub fn spawn_particle(&mut self, kind: usize, position: Vec2) -> ParticleId {
        setup::spawn_particle(&mut self.world, kind, position)
    }

    /// Capture the population for output.
    pub fn snapshot(&mut self, triggered_by: &str) -> PopulationSnapshot {
        generate_snapshot(&mut self.world, triggered_by)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
