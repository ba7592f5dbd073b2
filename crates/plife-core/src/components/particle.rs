//! Particle Components
//!
//! Per-particle components, the plain `ParticleState` record the force model
//! works on, and the per-type templates particles are stamped from.

use bevy_ecs::prelude::*;
use glam::Vec2;
use std::sync::Arc;

/// Component: Spawn-order identity, also the fixed iteration order
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParticleId(pub u32);

/// Component: Particle type id, `0..T`
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParticleKind(pub usize);

/// Component: Position in world units
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Position(pub Vec2);

/// Component: Heading in degrees, counter-clockwise from +x
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Heading(pub f32);

/// Component: Velocity in world units per second
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity(pub Vec2);

/// Component: Distance within which this particle exerts force
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct EffectRadius(pub f32);

/// Component: Fallback pull when the matrix magnitude degenerates
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct DefaultPull(pub f32);

/// Component: Maps a counterpart's type to the matrix column used against it.
///
/// Shared between every particle stamped from the same template.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct CounterpartRow(pub Arc<[usize]>);

impl CounterpartRow {
    /// `column_for(k) == k` for every type
    pub fn identity(type_count: usize) -> Self {
        Self((0..type_count).collect())
    }

    #[inline]
    pub fn column_for(&self, other_kind: usize) -> usize {
        self.0[other_kind]
    }
}

/// Everything needed to spawn one particle
#[derive(Bundle, Debug, Clone)]
pub struct ParticleBundle {
    pub id: ParticleId,
    pub kind: ParticleKind,
    pub position: Position,
    pub heading: Heading,
    pub velocity: Velocity,
    pub effect_radius: EffectRadius,
    pub default_pull: DefaultPull,
    pub row: CounterpartRow,
}

/// Plain per-particle record.
///
/// The step system copies components into these, runs the force model over
/// the slice, and writes the results back.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleState {
    pub id: ParticleId,
    pub kind: usize,
    pub row: Arc<[usize]>,
    pub position: Vec2,
    pub heading: f32,
    pub velocity: Vec2,
    pub effect_radius: f32,
    pub default_pull: f32,
}

impl ParticleState {
    /// Matrix column this particle uses against `other_kind`
    #[inline]
    pub fn column_for(&self, other_kind: usize) -> usize {
        self.row[other_kind]
    }

    pub fn distance_to(&self, other: &ParticleState) -> f32 {
        self.position.distance(other.position)
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

/// One particle type: the values every instance of it copies.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeTemplate {
    pub kind: usize,
    pub name: String,
    pub effect_radius: f32,
    pub default_pull: f32,
    pub color: [f32; 3],
    pub row: CounterpartRow,
}

impl TypeTemplate {
    /// Stamp out a resting particle of this type
    pub fn instantiate(&self, id: ParticleId, position: Vec2) -> ParticleBundle {
        ParticleBundle {
            id,
            kind: ParticleKind(self.kind),
            position: Position(position),
            heading: Heading(0.0),
            velocity: Velocity(Vec2::ZERO),
            effect_radius: EffectRadius(self.effect_radius),
            default_pull: DefaultPull(self.default_pull),
            row: self.row.clone(),
        }
    }
}

/// Resource: all type templates, indexed by type id
#[derive(Resource, Debug, Clone, Default)]
pub struct TypeRegistry {
    templates: Vec<TypeTemplate>,
}

impl TypeRegistry {
    pub fn new(templates: Vec<TypeTemplate>) -> Self {
        Self { templates }
    }

    pub fn get(&self, kind: usize) -> Option<&TypeTemplate> {
        self.templates.get(kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeTemplate> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Resource: hands out spawn-order ids
#[derive(Resource, Debug, Default)]
pub struct ParticleIdAllocator {
    next: u32,
}

impl ParticleIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> ParticleId {
        let id = ParticleId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far
    pub fn allocated(&self) -> u32 {
        self.next
    }
}
