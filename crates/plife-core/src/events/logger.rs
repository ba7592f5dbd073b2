//! Summary Logger
//!
//! Append-only JSONL tick summary logging.

use bevy_ecs::prelude::*;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use plife_events::TickSummary;

use crate::error::OutputError;

/// Resource for logging tick summaries to a JSONL file
#[derive(Resource)]
pub struct SummaryLogger {
    writer: Option<BufWriter<File>>,
    line_count: u64,
}

impl SummaryLogger {
    /// Create a new logger writing to the specified path
    pub fn new(path: impl AsRef<Path>) -> Result<Self, OutputError> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            writer: Some(BufWriter::new(file)),
            line_count: 0,
        })
    }

    /// Create a logger that discards summaries (for testing)
    pub fn null() -> Self {
        Self {
            writer: None,
            line_count: 0,
        }
    }

    /// Number of summaries logged so far
    pub fn line_count(&self) -> u64 {
        self.line_count
    }

    /// Log one summary line
    pub fn log(&mut self, summary: &TickSummary) -> Result<(), OutputError> {
        self.line_count += 1;
        if let Some(ref mut writer) = self.writer {
            let json = serde_json::to_string(summary)?;
            writeln!(writer, "{}", json)?;
        }
        Ok(())
    }

    /// Flush the buffer to disk
    pub fn flush(&mut self) -> Result<(), OutputError> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for SummaryLogger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!("failed to flush summary logger: {}", e);
        }
    }
}
