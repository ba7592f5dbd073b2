//! Output Generation
//!
//! Population snapshots for renderers and offline analysis.

pub mod snapshot;

pub use snapshot::*;
