//! Snapshot Generation
//!
//! Builds population snapshots from the world and writes them as JSON.

use bevy_ecs::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use plife_events::{
    generate_snapshot_id, BoundsSnapshot, MatrixSnapshot, ParticleSnapshot, PopulationSnapshot,
    TypeSnapshot,
};

use crate::components::matrix::InteractionMatrix;
use crate::components::particle::TypeRegistry;
use crate::components::world::{RunSeed, SimulationClock};
use crate::config::SimulationConfig;
use crate::error::OutputError;
use crate::systems::step::collect_population;

/// Resource to track snapshot generation
#[derive(Resource, Debug)]
pub struct SnapshotGenerator {
    snapshot_interval: u64,
    snapshots_written: u64,
    last_snapshot_tick: Option<u64>,
}

impl SnapshotGenerator {
    pub fn new(snapshot_interval: u64) -> Self {
        Self {
            snapshot_interval,
            snapshots_written: 0,
            last_snapshot_tick: None,
        }
    }

    /// Tick 0 always snapshots; an interval of 0 disables periodic snapshots.
    pub fn should_snapshot(&self, current_tick: u64) -> bool {
        if self.last_snapshot_tick == Some(current_tick) {
            return false;
        }
        current_tick == 0
            || (self.snapshot_interval > 0 && current_tick % self.snapshot_interval == 0)
    }

    pub fn mark_snapshot(&mut self, tick: u64) {
        self.last_snapshot_tick = Some(tick);
        self.snapshots_written += 1;
    }

    pub fn last_snapshot_tick(&self) -> Option<u64> {
        self.last_snapshot_tick
    }

    pub fn snapshot_count(&self) -> u64 {
        self.snapshots_written
    }
}

/// Capture the current population.
pub fn generate_snapshot(world: &mut World, triggered_by: &str) -> PopulationSnapshot {
    let tick = world
        .get_resource::<SimulationClock>()
        .map(|clock| clock.current_tick)
        .unwrap_or(0);
    let seed = world.get_resource::<RunSeed>().map(|s| s.0).unwrap_or(0);

    let bounds = world.resource::<SimulationConfig>().bounds;
    let types = world
        .resource::<TypeRegistry>()
        .iter()
        .map(|t| TypeSnapshot {
            kind: t.kind,
            name: t.name.clone(),
            effect_radius: t.effect_radius,
            default_pull: t.default_pull,
            color: t.color,
        })
        .collect();
    let matrix = MatrixSnapshot {
        rows: world.resource::<InteractionMatrix>().rows().to_vec(),
    };

    let particles = collect_population(world)
        .into_iter()
        .map(|p| ParticleSnapshot {
            id: p.id.0,
            kind: p.kind,
            position: p.position.to_array(),
            heading: p.heading,
            velocity: p.velocity.to_array(),
        })
        .collect();

    PopulationSnapshot {
        snapshot_id: generate_snapshot_id(tick),
        tick,
        seed,
        triggered_by: triggered_by.to_string(),
        bounds: BoundsSnapshot {
            min_x: bounds.min_x,
            min_y: bounds.min_y,
            max_x: bounds.max_x,
            max_y: bounds.max_y,
        },
        types,
        matrix,
        particles,
    }
}

/// Write a snapshot as pretty JSON
pub fn write_snapshot(snapshot: &PopulationSnapshot, path: impl AsRef<Path>) -> Result<(), OutputError> {
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json)?;
    Ok(())
}

/// Write to `<output_dir>/snapshots/<snapshot_id>.json`
pub fn write_snapshot_to_dir(
    output_dir: impl AsRef<Path>,
    snapshot: &PopulationSnapshot,
) -> Result<PathBuf, OutputError> {
    let dir = output_dir.as_ref().join("snapshots");
    fs::create_dir_all(&dir)?;
    let path = dir.join(format!("{}.json", snapshot.snapshot_id));
    write_snapshot(snapshot, &path)?;
    Ok(path)
}

/// Overwrite `<output_dir>/current_state.json`
pub fn write_current_state(
    output_dir: impl AsRef<Path>,
    snapshot: &PopulationSnapshot,
) -> Result<(), OutputError> {
    write_snapshot(snapshot, output_dir.as_ref().join("current_state.json"))
}
