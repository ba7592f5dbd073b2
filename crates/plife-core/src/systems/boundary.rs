//! Boundary Policy
//!
//! The domain is a rectangle with toroidal topology. Leaving one edge
//! teleports a particle to the opposite edge; nothing else changes.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::sample_uniform;

/// Domain rectangle, inclusive on every edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min_x: -20.0,
            min_y: -12.0,
            max_x: 20.0,
            max_y: 12.0,
        }
    }
}

impl Bounds {
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Wrap each axis independently. Only strict excursions wrap, so a
    /// position sitting exactly on an edge is returned unchanged.
    pub fn wrap(&self, position: Vec2) -> Vec2 {
        Vec2::new(
            wrap_axis(position.x, self.min_x, self.max_x),
            wrap_axis(position.y, self.min_y, self.max_y),
        )
    }

    pub fn contains(&self, position: Vec2) -> bool {
        (self.min_x..=self.max_x).contains(&position.x)
            && (self.min_y..=self.max_y).contains(&position.y)
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    /// Uniform random point inside the rectangle; x is drawn before y.
    pub fn random_point<R: Rng>(&self, rng: &mut R) -> Vec2 {
        let x = sample_uniform(rng, self.min_x, self.max_x);
        let y = sample_uniform(rng, self.min_y, self.max_y);
        Vec2::new(x, y)
    }
}

/// Below the minimum snaps to the maximum, above the maximum snaps to the
/// minimum.
#[inline]
pub fn wrap_axis(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        max
    } else if value > max {
        min
    } else {
        value
    }
}
