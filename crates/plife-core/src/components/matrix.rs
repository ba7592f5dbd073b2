//! Interaction Matrix
//!
//! A square table of signed pull coefficients, indexed
//! `[source_type][target_type]`. Generated once per run and read-only after.

use bevy_ecs::prelude::*;
use rand::Rng;

use crate::error::MatrixError;
use crate::sample_uniform;

/// Resource: per-type-pair pull coefficients.
///
/// `lookup(i, j)` is the pull a particle of type `i` exerts on a particle of
/// type `j`. Entries are sampled independently, so the matrix is generally
/// asymmetric.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct InteractionMatrix {
    rows: Vec<Vec<f32>>,
}

impl InteractionMatrix {
    /// Sample every cell uniformly from `[min_pull, max_pull]`, row by row.
    pub fn generate<R: Rng>(rng: &mut R, type_count: usize, min_pull: f32, max_pull: f32) -> Self {
        let rows = (0..type_count)
            .map(|_| {
                (0..type_count)
                    .map(|_| sample_uniform(rng, min_pull, max_pull))
                    .collect()
            })
            .collect();

        Self { rows }
    }

    /// Build a matrix from hand-authored rows.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self, MatrixError> {
        if rows.is_empty() {
            return Err(MatrixError::Empty);
        }
        let expected = rows.len();
        if let Some((row, values)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(MatrixError::NotSquare {
                row,
                len: values.len(),
                expected,
            });
        }
        Ok(Self { rows })
    }

    /// Coefficient for `(source_type, target_type)`.
    ///
    /// Panics if either index is out of range; type ids are assigned
    /// internally and never come from outside.
    #[inline]
    pub fn lookup(&self, source_type: usize, target_type: usize) -> f32 {
        self.rows[source_type][target_type]
    }

    /// Number of particle types (T)
    pub fn type_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, source_type: usize) -> &[f32] {
        &self.rows[source_type]
    }

    pub fn rows(&self) -> &[Vec<f32>] {
        &self.rows
    }
}
