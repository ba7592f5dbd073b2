//! Force Model
//!
//! Brute-force pairwise forces. Each influencer within its own effect radius
//! of the target contributes `coefficient / distance` along the bearing from
//! the influencer to the target.

use glam::Vec2;

use crate::components::matrix::InteractionMatrix;
use crate::components::particle::ParticleState;

/// Split `magnitude` at `angle_degrees` into `(x, y)`.
///
/// The x component is `magnitude * sin(90° - angle)`, not `cos(angle)`. The
/// two agree mathematically but not bit-for-bit, and trajectories are
/// reproduced with the sine form.
#[inline]
pub fn decompose(magnitude: f32, angle_degrees: f32) -> Vec2 {
    let y = magnitude * angle_degrees.to_radians().sin();
    let x = magnitude * (90.0 - angle_degrees).to_radians().sin();
    Vec2::new(x, y)
}

/// Force `source` exerts on `target`.
pub fn pairwise_components(
    matrix: &InteractionMatrix,
    source: &ParticleState,
    target: &ParticleState,
) -> Vec2 {
    let coefficient = matrix.lookup(source.kind, source.column_for(target.kind));
    let mut magnitude = coefficient / source.distance_to(target);

    // Coincident particles divide by zero
    if magnitude.is_nan() || magnitude.is_infinite() {
        tracing::trace!(
            source = source.id.0,
            target = target.id.0,
            "degenerate distance, using default pull {}",
            source.default_pull
        );
        magnitude = source.default_pull;
    }

    let delta = target.position - source.position;
    let bearing = delta.y.atan2(delta.x).to_degrees();

    decompose(magnitude, bearing)
}

/// Whether `source` reaches `target`. The cutoff is hard and uses the
/// source's radius.
#[inline]
pub fn within_reach(source: &ParticleState, target: &ParticleState) -> bool {
    source.distance_to(target) <= source.effect_radius
}

/// Net force on `target` from every other particle that reaches it.
///
/// Particles out of reach are skipped without evaluating their contribution.
pub fn aggregate(
    matrix: &InteractionMatrix,
    target: &ParticleState,
    population: &[ParticleState],
) -> Vec2 {
    let mut force = Vec2::ZERO;

    for source in population {
        if source.id == target.id || !within_reach(source, target) {
            continue;
        }
        force += pairwise_components(matrix, source, target);
    }

    force
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::particle::{CounterpartRow, ParticleId};

    fn particle(id: u32, kind: usize, x: f32, y: f32, effect_radius: f32) -> ParticleState {
        ParticleState {
            id: ParticleId(id),
            kind,
            row: CounterpartRow::identity(2).0,
            position: Vec2::new(x, y),
            heading: 0.0,
            velocity: Vec2::ZERO,
            effect_radius,
            default_pull: 0.7,
        }
    }

    fn matrix() -> InteractionMatrix {
        InteractionMatrix::from_rows(vec![vec![1.0, 5.0], vec![-3.0, 2.0]]).unwrap()
    }

    #[test]
    fn test_decompose_uses_sine_shape() {
        let v = decompose(2.0, 30.0);
        assert_eq!(v.y, 2.0 * 30.0_f32.to_radians().sin());
        assert_eq!(v.x, 2.0 * 60.0_f32.to_radians().sin());
        assert!((v.length() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_pairwise_along_bearing() {
        let m = matrix();
        let source = particle(0, 0, 0.0, 0.0, 10.0);
        let target = particle(1, 1, 0.0, 2.0, 10.0);

        // 5.0 / 2.0 pushed along +y
        let force = pairwise_components(&m, &source, &target);
        assert!(force.x.abs() < 1e-5);
        assert!((force.y - 2.5).abs() < 1e-5);
    }

    #[test]
    fn test_pairwise_is_directional() {
        let m = matrix();
        let a = particle(0, 0, 0.0, 0.0, 10.0);
        let b = particle(1, 1, 1.0, 0.0, 10.0);

        // a on b uses lookup(0, 1) = 5, b on a uses lookup(1, 0) = -3
        let on_b = pairwise_components(&m, &a, &b);
        let on_a = pairwise_components(&m, &b, &a);
        assert!((on_b.x - 5.0).abs() < 1e-5);
        assert!((on_a.x - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_zero_distance_uses_default_pull() {
        let m = matrix();
        let source = particle(0, 0, 1.0, 1.0, 10.0);
        let target = particle(1, 1, 1.0, 1.0, 10.0);

        let force = pairwise_components(&m, &source, &target);
        assert!(force.x.is_finite() && force.y.is_finite());
        // atan2(0, 0) == 0, so the whole default pull lands on x
        assert!((force.x - 0.7).abs() < 1e-6);
        assert_eq!(force.y, 0.0);
    }

    #[test]
    fn test_zero_coefficient_at_zero_distance_uses_default_pull() {
        let m = InteractionMatrix::from_rows(vec![vec![0.0, 0.0], vec![0.0, 0.0]]).unwrap();
        let source = particle(0, 0, 0.0, 0.0, 10.0);
        let target = particle(1, 0, 0.0, 0.0, 10.0);

        let force = pairwise_components(&m, &source, &target);
        assert!((force.x - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_cutoff_is_hard() {
        let m = matrix();
        let target = particle(1, 1, 0.0, 0.0, 10.0);

        let just_outside = particle(0, 0, 1.0 + 1e-4, 0.0, 1.0);
        assert_eq!(aggregate(&m, &target, &[just_outside, target.clone()]), Vec2::ZERO);

        let on_edge = particle(0, 0, 1.0, 0.0, 1.0);
        assert_ne!(aggregate(&m, &target, &[on_edge, target.clone()]), Vec2::ZERO);
    }

    #[test]
    fn test_cutoff_uses_source_radius() {
        let m = matrix();
        // The target's own large radius does not matter
        let target = particle(1, 1, 0.0, 0.0, 100.0);
        let source = particle(0, 0, 3.0, 0.0, 2.0);
        assert!(!within_reach(&source, &target));
        assert!(within_reach(&target, &source));
        assert_eq!(aggregate(&m, &target, &[source]), Vec2::ZERO);
    }

    #[test]
    fn test_aggregate_skips_self() {
        let m = matrix();
        let alone = particle(0, 0, 0.0, 0.0, 10.0);
        assert_eq!(aggregate(&m, &alone, &[alone.clone()]), Vec2::ZERO);
    }

    #[test]
    fn test_aggregate_sums_contributions() {
        let m = matrix();
        let target = particle(2, 1, 0.0, 0.0, 10.0);
        let left = particle(0, 0, -1.0, 0.0, 10.0);
        let right = particle(1, 0, 1.0, 0.0, 10.0);

        // Equal and opposite pushes cancel on x
        let force = aggregate(&m, &target, &[left, right, target.clone()]);
        assert!(force.x.abs() < 1e-4);
        assert!(force.y.abs() < 1e-4);
    }
}
