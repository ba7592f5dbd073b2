//! ECS Systems
//!
//! Force model, boundary wrap and the per-tick step.

pub mod boundary;
pub mod force;
pub mod step;

// Re-export commonly used systems
pub use boundary::Bounds;
pub use force::{aggregate, decompose, pairwise_components, within_reach};
pub use step::{
    advance_particles, collect_population, integrate_positions, resolve_motion, step_population,
    MotionUpdate, StepStats,
};
