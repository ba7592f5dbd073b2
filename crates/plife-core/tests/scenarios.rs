//! Hand-built scenarios run through the public facade.

use glam::Vec2;
use plife_core::config::TypeTemplateConfig;
use plife_core::{InteractionMatrix, Simulation, SimulationConfig};

/// Two types, no friction, no motion integration, radius 10 everywhere
fn two_type_config() -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.population.initial_particle_amount = 0;
    config.forces.friction = 0.0;
    config.forces.min_effect_radius = 10.0;
    config.forces.max_effect_radius = 10.0;
    config.stepping.time_step = 0.0;
    config.types = vec![
        TypeTemplateConfig::new("pusher", 0.0),
        TypeTemplateConfig::new("puller", 0.0),
    ];
    config
}

fn asymmetric_matrix() -> InteractionMatrix {
    InteractionMatrix::from_rows(vec![vec![0.0, 5.0], vec![-3.0, 0.0]]).unwrap()
}

#[test]
fn test_asymmetric_pair() {
    let mut sim = Simulation::with_matrix(two_type_config(), asymmetric_matrix(), 1).unwrap();
    let a = sim.spawn_particle(0, Vec2::new(0.0, 0.0));
    let b = sim.spawn_particle(1, Vec2::new(1.0, 0.0));

    let summary = sim.advance();
    assert_eq!(summary.moving, 2);

    let particles = sim.particles();
    let pa = particles.iter().find(|p| p.id == a).unwrap();
    let pb = particles.iter().find(|p| p.id == b).unwrap();

    // A pushes B away with 5 / 1
    assert!(pb.heading.abs() < 1e-3);
    assert!((pb.speed() - 5.0).abs() < 1e-4);

    // B's negative coefficient drags A towards it
    assert!(pa.heading.abs() < 1e-3);
    assert!((pa.speed() - 3.0).abs() < 1e-4);
    assert!(pa.velocity.x > 0.0);

    // Nothing moved: time_step is zero
    assert_eq!(pa.position, Vec2::new(0.0, 0.0));
    assert_eq!(pb.position, Vec2::new(1.0, 0.0));
}

#[test]
fn test_lone_particle_never_moves() {
    let mut config = two_type_config();
    config.stepping.time_step = 0.02;
    let mut sim = Simulation::with_matrix(config, asymmetric_matrix(), 1).unwrap();
    sim.spawn_particle(1, Vec2::new(3.0, -2.0));

    for _ in 0..10 {
        let summary = sim.advance();
        assert_eq!(summary.unaffected, 1);
        assert_eq!(summary.moving, 0);
    }

    let particles = sim.particles();
    assert_eq!(particles[0].position, Vec2::new(3.0, -2.0));
    assert_eq!(particles[0].velocity, Vec2::ZERO);
    assert_eq!(particles[0].heading, 0.0);
}

#[test]
fn test_zero_coefficients_leave_state_untouched() {
    let zero = InteractionMatrix::from_rows(vec![vec![0.0, 0.0], vec![0.0, 0.0]]).unwrap();
    let mut sim = Simulation::with_matrix(two_type_config(), zero, 1).unwrap();
    sim.spawn_particle(0, Vec2::new(0.0, 0.0));
    sim.spawn_particle(1, Vec2::new(2.0, 0.0));

    let summary = sim.advance();
    assert_eq!(summary.unaffected, 2);
    assert_eq!(summary.mean_speed, 0.0);
}

#[test]
fn test_far_apart_particles_ignore_each_other() {
    let mut sim = Simulation::with_matrix(two_type_config(), asymmetric_matrix(), 1).unwrap();
    sim.spawn_particle(0, Vec2::new(-15.0, 0.0));
    sim.spawn_particle(1, Vec2::new(15.0, 0.0));

    // 30 apart, beyond the radius of 10; wrapping does not shorten distances
    let summary = sim.advance();
    assert_eq!(summary.unaffected, 2);
}

#[test]
fn test_escaped_particle_wraps_next_tick() {
    let mut config = two_type_config();
    config.bounds = plife_core::Bounds::new(0.0, 0.0, 10.0, 10.0);
    let mut sim = Simulation::with_matrix(config, asymmetric_matrix(), 1).unwrap();
    sim.spawn_particle(0, Vec2::new(-0.5, 4.0));

    let summary = sim.advance();
    assert_eq!(summary.wrapped, 1);
    assert_eq!(sim.particles()[0].position, Vec2::new(10.0, 4.0));
}

#[test]
fn test_friction_stops_weak_pulls() {
    let mut config = two_type_config();
    config.forces.friction = 10.0;
    let mut sim = Simulation::with_matrix(config, asymmetric_matrix(), 1).unwrap();
    sim.spawn_particle(0, Vec2::new(0.0, 0.0));
    sim.spawn_particle(1, Vec2::new(1.0, 0.0));

    let summary = sim.advance();
    assert_eq!(summary.stopped, 2);
    assert!(sim.particles().iter().all(|p| p.velocity == Vec2::ZERO));
}
