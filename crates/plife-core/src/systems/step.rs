//! Simulation Step
//!
//! One tick: aggregate forces for every particle, wrap its position, then
//! turn the net force into a heading and a friction-gated velocity. Motion
//! integration runs as a separate system afterwards.

use bevy_ecs::prelude::*;
use glam::Vec2;

use plife_events::TickSummary;

use crate::components::matrix::InteractionMatrix;
use crate::components::particle::{
    CounterpartRow, DefaultPull, EffectRadius, Heading, ParticleId, ParticleKind, ParticleState,
    Position, Velocity,
};
use crate::config::{SimulationConfig, UpdateMode};
use crate::systems::force::{aggregate, decompose};

/// What the velocity rule decided for one particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionUpdate {
    /// Net force was exactly zero; heading and velocity keep their values
    Unaffected,
    /// Net force did not beat friction; the particle stops dead
    Stopped { heading: f32 },
    /// Net force beat friction
    Moving { heading: f32, velocity: Vec2 },
}

impl MotionUpdate {
    pub fn apply(self, heading: &mut f32, velocity: &mut Vec2) {
        match self {
            MotionUpdate::Unaffected => {}
            MotionUpdate::Stopped { heading: h } => {
                *heading = h;
                *velocity = Vec2::ZERO;
            }
            MotionUpdate::Moving {
                heading: h,
                velocity: v,
            } => {
                *heading = h;
                *velocity = v;
            }
        }
    }
}

/// Magnitude of the net force
#[inline]
pub fn final_pull(force: Vec2) -> f32 {
    (force.x.powi(2) + force.y.powi(2)).sqrt()
}

/// Speed left after subtracting a friction vector pointing along `heading`.
pub fn friction_adjusted_speed(force: Vec2, heading: f32, friction: f32) -> f32 {
    let friction_y = friction * heading.to_radians().sin();
    let friction_x = friction * (90.0 - heading).to_radians().sin();
    ((force.x - friction_x).powi(2) + (force.y - friction_y).powi(2)).sqrt()
}

/// Unit vector for a heading in degrees, in the same sine form as the force
/// decomposition
#[inline]
pub fn heading_vector(heading: f32) -> Vec2 {
    decompose(1.0, heading)
}

/// Apply the velocity rule to a net force.
pub fn resolve_motion(force: Vec2, friction: f32) -> MotionUpdate {
    if force.x == 0.0 && force.y == 0.0 {
        return MotionUpdate::Unaffected;
    }

    let heading = force.y.atan2(force.x).to_degrees();

    if final_pull(force) > friction {
        let speed = friction_adjusted_speed(force, heading, friction);
        MotionUpdate::Moving {
            heading,
            velocity: heading_vector(heading) * speed,
        }
    } else {
        MotionUpdate::Stopped { heading }
    }
}

/// Resource: outcome counts for the most recent tick
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct StepStats {
    pub particle_count: usize,
    pub moving: usize,
    pub stopped: usize,
    pub unaffected: usize,
    pub wrapped: usize,
    pub mean_speed: f32,
}

impl StepStats {
    fn record(&mut self, update: &MotionUpdate) {
        match update {
            MotionUpdate::Unaffected => self.unaffected += 1,
            MotionUpdate::Stopped { .. } => self.stopped += 1,
            MotionUpdate::Moving { .. } => self.moving += 1,
        }
    }

    pub fn to_summary(&self, tick: u64) -> TickSummary {
        TickSummary {
            tick,
            particle_count: self.particle_count,
            moving: self.moving,
            stopped: self.stopped,
            unaffected: self.unaffected,
            wrapped: self.wrapped,
            mean_speed: self.mean_speed,
        }
    }
}

/// Advance every particle in `population` by one tick.
///
/// `population` must be in iteration order (ascending id). In
/// [`UpdateMode::Synchronous`] every particle reads a frozen copy of the
/// pre-tick population. In [`UpdateMode::Sequential`] particles are updated
/// in place, so later particles see the wrapped positions of earlier ones.
pub fn step_population(
    matrix: &InteractionMatrix,
    config: &SimulationConfig,
    population: &mut [ParticleState],
) -> StepStats {
    let mut stats = StepStats {
        particle_count: population.len(),
        ..Default::default()
    };

    let frozen = match config.stepping.update_mode {
        UpdateMode::Synchronous => Some(population.to_vec()),
        UpdateMode::Sequential => None,
    };

    for i in 0..population.len() {
        let force = match &frozen {
            Some(snapshot) => aggregate(matrix, &snapshot[i], snapshot),
            None => aggregate(matrix, &population[i], population),
        };

        let particle = &mut population[i];

        let wrapped = config.bounds.wrap(particle.position);
        if wrapped != particle.position {
            stats.wrapped += 1;
            particle.position = wrapped;
        }

        let update = resolve_motion(force, config.forces.friction);
        update.apply(&mut particle.heading, &mut particle.velocity);
        stats.record(&update);
    }

    if !population.is_empty() {
        let total: f32 = population.iter().map(ParticleState::speed).sum();
        stats.mean_speed = total / population.len() as f32;
    }

    stats
}

/// Query over every particle component
type ParticleQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static ParticleId,
        &'static ParticleKind,
        &'static CounterpartRow,
        &'static EffectRadius,
        &'static DefaultPull,
        &'static mut Position,
        &'static mut Heading,
        &'static mut Velocity,
    ),
>;

type ParticleItem<'a> = (
    &'a ParticleId,
    &'a ParticleKind,
    &'a CounterpartRow,
    &'a EffectRadius,
    &'a DefaultPull,
    &'a Position,
    &'a Heading,
    &'a Velocity,
);

fn to_state(
    (id, kind, row, radius, pull, position, heading, velocity): ParticleItem,
) -> ParticleState {
    ParticleState {
        id: *id,
        kind: kind.0,
        row: row.0.clone(),
        position: position.0,
        heading: heading.0,
        velocity: velocity.0,
        effect_radius: radius.0,
        default_pull: pull.0,
    }
}

/// Copy the population out of the world, sorted by id.
pub fn collect_population(world: &mut World) -> Vec<ParticleState> {
    let mut query = world.query::<(
        &ParticleId,
        &ParticleKind,
        &CounterpartRow,
        &EffectRadius,
        &DefaultPull,
        &Position,
        &Heading,
        &Velocity,
    )>();

    let mut population: Vec<ParticleState> = query.iter(world).map(to_state).collect();
    population.sort_by_key(|p| p.id);
    population
}

/// System: force aggregation, wrap, and velocity update for every particle
pub fn advance_particles(
    matrix: Res<InteractionMatrix>,
    config: Res<SimulationConfig>,
    mut stats: ResMut<StepStats>,
    mut particles: ParticleQuery,
) {
    let mut entries: Vec<(Entity, ParticleState)> = particles
        .iter()
        .map(|(entity, id, kind, row, radius, pull, position, heading, velocity)| {
            (
                entity,
                to_state((id, kind, row, radius, pull, position, heading, velocity)),
            )
        })
        .collect();
    entries.sort_by_key(|(_, p)| p.id);

    let (entities, mut population): (Vec<Entity>, Vec<ParticleState>) =
        entries.into_iter().unzip();

    *stats = step_population(&matrix, &config, &mut population);

    for (entity, next) in entities.into_iter().zip(population) {
        if let Ok((_, _, _, _, _, _, mut position, mut heading, mut velocity)) =
            particles.get_mut(entity)
        {
            position.0 = next.position;
            heading.0 = next.heading;
            velocity.0 = next.velocity;
        }
    }
}

/// System: move every particle by `velocity * time_step`
///
/// Wrapping is left to the next tick's step.
pub fn integrate_positions(
    config: Res<SimulationConfig>,
    mut query: Query<(&Velocity, &mut Position)>,
) {
    let dt = config.stepping.time_step;
    if dt == 0.0 {
        return;
    }

    for (velocity, mut position) in query.iter_mut() {
        position.0 += velocity.0 * dt;
    }
}
