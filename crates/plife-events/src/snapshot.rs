//! Snapshot Types
//!
//! Serialization structs for population snapshots.
//!
//! A snapshot captures everything a presentation collaborator needs to draw
//! one tick: the domain rectangle, the type palette, the interaction matrix
//! and every particle's position, heading and velocity.

use serde::{Deserialize, Serialize};

/// Generates a snapshot ID for the given tick.
pub fn generate_snapshot_id(tick: u64) -> String {
    format!("snap_{:06}", tick)
}

/// Domain rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundsSnapshot {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

/// One particle type template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSnapshot {
    pub kind: usize,
    pub name: String,
    pub effect_radius: f32,
    pub default_pull: f32,
    #[serde(default)]
    pub color: [f32; 3],
}

/// Row-major interaction coefficients, `rows[source][target]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatrixSnapshot {
    pub rows: Vec<Vec<f32>>,
}

impl MatrixSnapshot {
    /// Number of particle types covered by the matrix
    pub fn type_count(&self) -> usize {
        self.rows.len()
    }
}

/// Per-particle state at snapshot time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleSnapshot {
    pub id: u32,
    pub kind: usize,
    pub position: [f32; 2],
    /// Degrees, counter-clockwise from +x
    pub heading: f32,
    pub velocity: [f32; 2],
}

impl ParticleSnapshot {
    pub fn speed(&self) -> f32 {
        (self.velocity[0] * self.velocity[0] + self.velocity[1] * self.velocity[1]).sqrt()
    }
}

/// Full population snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationSnapshot {
    pub snapshot_id: String,
    pub tick: u64,
    pub seed: u64,
    pub triggered_by: String,
    pub bounds: BoundsSnapshot,
    #[serde(default)]
    pub types: Vec<TypeSnapshot>,
    #[serde(default)]
    pub matrix: MatrixSnapshot,
    #[serde(default)]
    pub particles: Vec<ParticleSnapshot>,
}

impl PopulationSnapshot {
    /// Count particles of each type, indexed by type id
    pub fn population_by_type(&self) -> Vec<usize> {
        let mut counts = vec![0; self.types.len()];
        for particle in &self.particles {
            if let Some(count) = counts.get_mut(particle.kind) {
                *count += 1;
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_snapshot() -> PopulationSnapshot {
        PopulationSnapshot {
            snapshot_id: generate_snapshot_id(12),
            tick: 12,
            seed: 42,
            triggered_by: "periodic".to_string(),
            bounds: BoundsSnapshot {
                min_x: -10.0,
                min_y: -5.0,
                max_x: 10.0,
                max_y: 5.0,
            },
            types: vec![
                TypeSnapshot {
                    kind: 0,
                    name: "red".to_string(),
                    effect_radius: 2.5,
                    default_pull: 0.3,
                    color: [1.0, 0.3, 0.3],
                },
                TypeSnapshot {
                    kind: 1,
                    name: "green".to_string(),
                    effect_radius: 3.0,
                    default_pull: -0.2,
                    color: [0.3, 1.0, 0.3],
                },
            ],
            matrix: MatrixSnapshot {
                rows: vec![vec![0.5, -0.25], vec![1.0, 0.0]],
            },
            particles: vec![
                ParticleSnapshot {
                    id: 0,
                    kind: 1,
                    position: [1.0, 2.0],
                    heading: 90.0,
                    velocity: [0.0, 3.0],
                },
                ParticleSnapshot {
                    id: 1,
                    kind: 1,
                    position: [-4.0, 0.5],
                    heading: 0.0,
                    velocity: [0.0, 0.0],
                },
            ],
        }
    }

    #[test]
    fn test_snapshot_id_format() {
        assert_eq!(generate_snapshot_id(0), "snap_000000");
        assert_eq!(generate_snapshot_id(1500), "snap_001500");
    }

    #[test]
    fn test_snapshot_json_shape() {
        let snapshot = sample_snapshot();
        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["snapshot_id"], "snap_000012");
        assert_eq!(json["matrix"]["rows"][0][1], -0.25);
        assert_eq!(json["particles"][0]["position"][1], 2.0);
        assert_eq!(json["types"][1]["name"], "green");
    }

    #[test]
    fn test_snapshot_missing_optional_sections() {
        let json = r#"{
            "snapshot_id": "snap_000000",
            "tick": 0,
            "seed": 7,
            "triggered_by": "simulation_start",
            "bounds": { "min_x": 0.0, "min_y": 0.0, "max_x": 1.0, "max_y": 1.0 }
        }"#;

        let snapshot: PopulationSnapshot = serde_json::from_str(json).unwrap();
        assert!(snapshot.particles.is_empty());
        assert_eq!(snapshot.matrix.type_count(), 0);
    }

    #[test]
    fn test_population_by_type() {
        let snapshot = sample_snapshot();
        assert_eq!(snapshot.population_by_type(), vec![0, 2]);
    }

    #[test]
    fn test_particle_speed() {
        let snapshot = sample_snapshot();
        assert_eq!(snapshot.particles[0].speed(), 3.0);
        assert_eq!(snapshot.particles[1].speed(), 0.0);
    }
}
