//! ECS Components
//!
//! Particle components, the interaction matrix, and run-wide resources.

pub mod matrix;
pub mod particle;
pub mod world;

pub use matrix::*;
pub use particle::*;
pub use world::*;
