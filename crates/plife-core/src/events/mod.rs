//! Tick summary stream
//!
//! Append-only JSONL output of per-tick step outcomes.

pub mod logger;

pub use logger::*;
