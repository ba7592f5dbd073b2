//! Particle Life Simulation Engine Library
//!
//! Typed particles push and pull each other through an asymmetric interaction
//! matrix inside a wrapping rectangle. Particles are ECS entities; the matrix,
//! configuration and random source are resources; one tick is one run of the
//! step schedule.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::Rng;

pub mod components;
pub mod config;
pub mod error;
pub mod events;
pub mod output;
pub mod setup;
pub mod simulation;
pub mod systems;

pub use components::*;
pub use config::{ConfigError, SimulationConfig, UpdateMode};
pub use error::{MatrixError, OutputError, SimError};
pub use simulation::Simulation;
pub use systems::boundary::Bounds;

/// Seeded random number generator resource
#[derive(Resource)]
pub struct SimRng(pub SmallRng);

/// Uniform sample from the inclusive range `[min, max]`.
///
/// Callers guarantee `min <= max`; equal bounds return `min`.
pub fn sample_uniform<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    rng.gen_range(min..=max)
}
