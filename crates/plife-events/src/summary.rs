//! Tick summaries
//!
//! One line of the `ticks.jsonl` stream written by the simulation host.

use serde::{Deserialize, Serialize};

/// Aggregate outcome of a single simulation tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickSummary {
    pub tick: u64,
    pub particle_count: usize,
    /// Particles whose velocity was set to a non-zero value
    pub moving: usize,
    /// Particles halted by the friction gate
    pub stopped: usize,
    /// Particles that felt exactly zero net force
    pub unaffected: usize,
    /// Particles teleported across a domain edge
    pub wrapped: usize,
    pub mean_speed: f32,
}

impl TickSummary {
    /// Fraction of the population that is moving after this tick
    pub fn moving_fraction(&self) -> f32 {
        if self.particle_count == 0 {
            return 0.0;
        }
        self.moving as f32 / self.particle_count as f32
    }
}
