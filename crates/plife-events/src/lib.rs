//! Shared snapshot and summary types for the particle-life simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! The core crate produces them; renderers and analysis tools consume them.

pub mod snapshot;
pub mod summary;

// Re-export snapshot types
pub use snapshot::{
    generate_snapshot_id, BoundsSnapshot, MatrixSnapshot, ParticleSnapshot, PopulationSnapshot,
    TypeSnapshot,
};

// Re-export summary types
pub use summary::TickSummary;
