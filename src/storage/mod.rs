//! Storage module for persisting corpus artifacts
//!
//! This module handles all file operations for the corpus, including:
//! - Preparing the corpus directory before a scrape
//! - Artifact naming (`{id}_raw.txt`, `{id}_meta.json`, ...)
//! - Writing and reading raw text, metadata, cleaned text and CoNLL-U

mod fs;
mod layout;
mod traits;

pub use fs::{prepare_environment, FileStorage};
pub use layout::{parse_artifact_name, ArtifactKind};
pub use traits::{Storage, StorageError, StorageResult};

/// File name of the pattern search report inside the corpus directory
pub const PATTERN_REPORT_FILE: &str = "pattern_search.json";
