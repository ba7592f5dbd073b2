//! World Setup
//!
//! Type templates, interaction matrix generation, and particle spawning.

pub mod population;
pub mod templates;

pub use population::*;
pub use templates::*;
