//! Analyzer capability used by the annotation stage

use crate::conllu::{ConlluDocument, ConlluError};
use thiserror::Error;

/// Errors raised by analyzer backends
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("Analyzer bootstrap failed: {0}")]
    Bootstrap(String),

    #[error("Analyzer request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Analyzer service returned HTTP {status}: {message}")]
    Service { status: u16, message: String },

    #[error("Analyzer process failed: {0}")]
    Process(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Analyzer produced malformed CoNLL-U: {0}")]
    Conllu(#[from] ConlluError),
}

/// A dependency parser turning plain texts into CoNLL-U documents
///
/// Implementations must return one document per input text, in input order.
/// Callers still check the count, since a remote backend may not honor it.
pub trait ConlluAnalyzer {
    /// Annotates a batch of texts
    fn analyze(&self, texts: &[String]) -> Result<Vec<ConlluDocument>, AnalyzerError>;
}
