//! Storage traits and error types
//!
//! This module defines the trait interface for artifact storage backends and
//! associated error types.

use crate::article::{Article, ArticleMeta};
use crate::conllu::{ConlluDocument, ConlluError};
use crate::storage::ArtifactKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Artifact not found: {0}")]
    MissingArtifact(PathBuf),

    #[error("Artifact is empty: {0}")]
    EmptyArtifact(PathBuf),

    #[error("Article {id} has no {kind:?} content to write")]
    MissingContent { id: usize, kind: ArtifactKind },

    #[error("Malformed CoNLL-U in {path}: {source}")]
    Conllu {
        path: PathBuf,
        #[source]
        source: ConlluError,
    },
}

impl StorageError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::MissingArtifact(path.to_path_buf())
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for artifact storage backends
///
/// Each article owns up to four artifacts keyed by its id. Writes replace any
/// previous artifact of the same kind.
pub trait Storage {
    /// Directory holding the artifacts
    fn root(&self) -> &Path;

    /// Path of the `kind` artifact of article `id`
    fn artifact_path(&self, id: usize, kind: ArtifactKind) -> PathBuf {
        self.root().join(kind.file_name(id))
    }

    // ===== Writes =====

    /// Writes the body text as `{id}_raw.txt`
    fn save_raw(&self, article: &Article) -> StorageResult<()>;

    /// Writes the metadata record as `{id}_meta.json`
    fn save_meta(&self, article: &Article) -> StorageResult<()>;

    /// Writes the cleaned text as `{id}_cleaned.txt`
    ///
    /// Fails with [`StorageError::MissingContent`] when the article has not
    /// been cleaned.
    fn save_cleaned(&self, article: &Article) -> StorageResult<()>;

    /// Writes the annotation as `{id}_udpipe_conllu.conllu`
    fn save_conllu(&self, article: &Article) -> StorageResult<()>;

    // ===== Reads =====

    /// Reads `{id}_raw.txt`
    fn load_raw(&self, id: usize) -> StorageResult<String>;

    /// Reads and parses `{id}_meta.json`
    fn load_meta(&self, id: usize) -> StorageResult<ArticleMeta>;

    /// Reads and parses `{id}_udpipe_conllu.conllu`
    ///
    /// A file without any sentence is [`StorageError::EmptyArtifact`].
    fn load_conllu(&self, id: usize) -> StorageResult<ConlluDocument>;

    /// True when the `kind` artifact of article `id` exists
    fn has_artifact(&self, id: usize, kind: ArtifactKind) -> bool {
        self.artifact_path(id, kind).is_file()
    }
}
