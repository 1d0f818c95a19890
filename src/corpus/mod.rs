//! Corpus directory loading
//!
//! This module validates a directory of persisted articles and loads it into
//! memory, keyed by article id.

mod manager;

pub use manager::CorpusManager;
