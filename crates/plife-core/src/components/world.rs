//! Run-wide Resources
//!
//! Tick counter and seed shared by every system.

use bevy_ecs::prelude::*;

/// Global simulation clock resource
#[derive(Resource, Debug, Clone, Default)]
pub struct SimulationClock {
    pub current_tick: u64,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to the next tick
    pub fn advance_tick(&mut self) {
        self.current_tick += 1;
    }
}

/// Seed the run was started with, kept for snapshot output
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSeed(pub u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_advances() {
        let mut clock = SimulationClock::new();
        assert_eq!(clock.current_tick, 0);
        clock.advance_tick();
        clock.advance_tick();
        assert_eq!(clock.current_tick, 2);
    }
}
