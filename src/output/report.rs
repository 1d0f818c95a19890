//! Pattern match report persistence
//!
//! The report is a JSON object keyed by global sentence index, each value an
//! array of `{upos, text, children}` trees.

use crate::pipeline::PatternMatchReport;
use crate::storage::{StorageError, StorageResult};
use std::fs;
use std::path::Path;

/// Writes the report as pretty-printed JSON
///
/// # Arguments
///
/// * `report` - The report to write
/// * `path` - Destination file; its parent directory must exist
pub fn save_report(report: &PatternMatchReport, path: &Path) -> StorageResult<()> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json).map_err(|e| StorageError::io(path, e))?;
    tracing::info!("Pattern report written to {}", path.display());
    Ok(())
}

/// Reads a report written by [`save_report`]
pub fn load_report(path: &Path) -> StorageResult<PatternMatchReport> {
    let json = fs::read_to_string(path).map_err(|e| StorageError::io(path, e))?;
    Ok(serde_json::from_str(&json)?)
}
