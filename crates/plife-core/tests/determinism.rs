//! Determinism verification tests
//!
//! The same seed and configuration must reproduce a run exactly.

use plife_core::{Simulation, SimulationConfig, UpdateMode};

fn config(amount: usize, mode: UpdateMode) -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.population.initial_particle_amount = amount;
    config.stepping.update_mode = mode;
    config
}

/// Same seed, same matrix, templates and starting population
#[test]
fn test_initial_state_determinism() {
    let mut first = Simulation::new(config(120, UpdateMode::Synchronous), 42).unwrap();
    let mut second = Simulation::new(config(120, UpdateMode::Synchronous), 42).unwrap();

    assert_eq!(first.matrix(), second.matrix());

    let radii_first: Vec<f32> = first.types().iter().map(|t| t.effect_radius).collect();
    let radii_second: Vec<f32> = second.types().iter().map(|t| t.effect_radius).collect();
    assert_eq!(radii_first, radii_second);

    assert_eq!(
        first.snapshot("simulation_start").particles,
        second.snapshot("simulation_start").particles
    );
}

/// Test that trajectories stay identical across many ticks
#[test]
fn test_trajectory_determinism() {
    for mode in [UpdateMode::Synchronous, UpdateMode::Sequential] {
        let mut first = Simulation::new(config(80, mode), 7).unwrap();
        let mut second = Simulation::new(config(80, mode), 7).unwrap();

        let summaries_first: Vec<_> = (0..50).map(|_| first.advance()).collect();
        let summaries_second: Vec<_> = (0..50).map(|_| second.advance()).collect();
        assert_eq!(summaries_first, summaries_second);

        let end_first = first.snapshot("simulation_end");
        let end_second = second.snapshot("simulation_end");
        assert_eq!(end_first.particles, end_second.particles, "mode {:?} diverged", mode);
    }
}

/// Test that different seeds produce different runs
#[test]
fn test_different_seeds_differ() {
    let mut first = Simulation::new(config(50, UpdateMode::Synchronous), 42).unwrap();
    let mut second = Simulation::new(config(50, UpdateMode::Synchronous), 43).unwrap();

    assert_ne!(first.matrix(), second.matrix());
    assert_ne!(
        first.snapshot("simulation_start").particles,
        second.snapshot("simulation_start").particles
    );
}

/// Runtime spawning draws from the run's own generator
#[test]
fn test_runtime_spawn_determinism() {
    let mut first = Simulation::new(config(20, UpdateMode::Synchronous), 99).unwrap();
    let mut second = Simulation::new(config(20, UpdateMode::Synchronous), 99).unwrap();

    first.run(5);
    second.run(5);
    first.spawn_particles(10);
    second.spawn_particles(10);
    first.run(5);
    second.run(5);

    assert_eq!(first.particles().len(), 30);
    assert_eq!(
        first.snapshot("periodic").particles,
        second.snapshot("periodic").particles
    );
}
