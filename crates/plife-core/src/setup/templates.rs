//! Type Templates
//!
//! Turns the configured type list into templates with sampled effect radii.

use rand::Rng;

use crate::components::particle::{CounterpartRow, TypeRegistry, TypeTemplate};
use crate::config::SimulationConfig;
use crate::sample_uniform;

/// Build one template per configured type.
///
/// Each type draws a single effect radius that all its instances share, and
/// gets the identity counterpart row.
pub fn build_type_templates<R: Rng>(config: &SimulationConfig, rng: &mut R) -> TypeRegistry {
    let type_count = config.type_count();
    let forces = &config.forces;

    let templates = config
        .types
        .iter()
        .enumerate()
        .map(|(kind, authored)| TypeTemplate {
            kind,
            name: authored.name.clone(),
            effect_radius: sample_uniform(rng, forces.min_effect_radius, forces.max_effect_radius),
            default_pull: authored.default_pull,
            color: authored.color,
            row: CounterpartRow::identity(type_count),
        })
        .collect();

    TypeRegistry::new(templates)
}
