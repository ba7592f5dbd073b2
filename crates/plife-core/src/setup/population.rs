//! Population Setup
//!
//! Initializes a run and spawns particles at random positions.

use bevy_ecs::prelude::*;
use glam::Vec2;
use rand::Rng;

use crate::components::matrix::InteractionMatrix;
use crate::components::particle::{ParticleId, ParticleIdAllocator, ParticleKind, TypeRegistry};
use crate::components::world::SimulationClock;
use crate::config::SimulationConfig;
use crate::systems::step::StepStats;

use super::templates::build_type_templates;

/// Build templates, generate the matrix, and spawn the initial population.
///
/// Random draws happen in a fixed order: effect radii, then the matrix, then
/// particles, so a seed fully determines the starting state.
pub fn initialize<R: Rng>(world: &mut World, config: SimulationConfig, rng: &mut R) {
    let registry = build_type_templates(&config, rng);
    let matrix = InteractionMatrix::generate(
        rng,
        config.type_count(),
        config.forces.min_pull,
        config.forces.max_pull,
    );
    initialize_with_matrix(world, config, registry, matrix, rng);
}

/// Same as [`initialize`] with a caller-supplied matrix and templates.
pub fn initialize_with_matrix<R: Rng>(
    world: &mut World,
    config: SimulationConfig,
    registry: TypeRegistry,
    matrix: InteractionMatrix,
    rng: &mut R,
) {
    let amount = config.population.initial_particle_amount;

    world.insert_resource(SimulationClock::new());
    world.insert_resource(StepStats::default());
    world.insert_resource(ParticleIdAllocator::new());
    world.insert_resource(matrix);
    world.insert_resource(registry);
    world.insert_resource(config);

    spawn_random_particles(world, amount, rng);

    tracing::info!(
        particles = amount,
        types = world.resource::<TypeRegistry>().len(),
        "initialized population"
    );
}

/// Spawn `amount` particles at uniform random positions, each copying a
/// uniformly chosen type template. Returns the number spawned.
pub fn spawn_random_particles<R: Rng>(world: &mut World, amount: usize, rng: &mut R) -> usize {
    let type_count = world.resource::<TypeRegistry>().len();
    if type_count == 0 {
        return 0;
    }

    let bounds = world.resource::<SimulationConfig>().bounds;

    for _ in 0..amount {
        let position = bounds.random_point(rng);
        let kind = rng.gen_range(0..type_count);
        spawn_particle(world, kind, position);
    }

    amount
}

/// Spawn one resting particle of `kind` at `position`.
///
/// Panics if `kind` is not a registered type.
pub fn spawn_particle(world: &mut World, kind: usize, position: Vec2) -> ParticleId {
    let id = world.resource_mut::<ParticleIdAllocator>().next_id();
    let bundle = world
        .resource::<TypeRegistry>()
        .get(kind)
        .map(|template| template.instantiate(id, position))
        .unwrap_or_else(|| panic!("particle type {} is not registered", kind));
    world.spawn(bundle);
    id
}

/// Summary of spawned particles
pub struct SpawnSummary {
    pub total_particles: usize,
    pub by_type: Vec<(String, usize)>,
}

/// Get a summary of spawned particles per type
pub fn get_spawn_summary(world: &mut World) -> SpawnSummary {
    let names: Vec<String> = world
        .resource::<TypeRegistry>()
        .iter()
        .map(|t| t.name.clone())
        .collect();
    let mut counts = vec![0usize; names.len()];

    let mut query = world.query::<&ParticleKind>();
    for kind in query.iter(world) {
        counts[kind.0] += 1;
    }

    SpawnSummary {
        total_particles: counts.iter().sum(),
        by_type: names.into_iter().zip(counts).collect(),
    }
}
