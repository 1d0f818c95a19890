//! File-system storage implementation
//!
//! Artifacts are plain files in a single flat directory. Text is written as
//! UTF-8; metadata is pretty-printed JSON with non-ASCII characters kept.

use crate::article::{Article, ArticleMeta};
use crate::conllu::ConlluDocument;
use crate::storage::{ArtifactKind, Storage, StorageError, StorageResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Storage backed by a corpus directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Opens storage over an existing directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Recreates `root` as an empty directory and opens storage over it
    ///
    /// # Returns
    ///
    /// * `Ok(FileStorage)` - Storage over a fresh directory
    /// * `Err(StorageError)` - The directory could not be removed or created
    pub fn prepare(root: impl Into<PathBuf>) -> StorageResult<Self> {
        let root = root.into();
        prepare_environment(&root)?;
        Ok(Self::new(root))
    }

    fn write(&self, id: usize, kind: ArtifactKind, contents: &str) -> StorageResult<()> {
        let path = self.artifact_path(id, kind);
        fs::write(&path, contents).map_err(|e| StorageError::io(&path, e))?;
        tracing::debug!("Wrote {}", path.display());
        Ok(())
    }

    fn read(&self, id: usize, kind: ArtifactKind) -> StorageResult<String> {
        let path = self.artifact_path(id, kind);
        fs::read_to_string(&path).map_err(|e| StorageError::io(&path, e))
    }
}

impl Storage for FileStorage {
    fn root(&self) -> &Path {
        &self.root
    }

    fn save_raw(&self, article: &Article) -> StorageResult<()> {
        self.write(article.id, ArtifactKind::Raw, &article.text)
    }

    fn save_meta(&self, article: &Article) -> StorageResult<()> {
        let json = serde_json::to_string_pretty(&article.meta())?;
        self.write(article.id, ArtifactKind::Meta, &json)
    }

    fn save_cleaned(&self, article: &Article) -> StorageResult<()> {
        let cleaned = article
            .cleaned_text
            .as_deref()
            .ok_or(StorageError::MissingContent {
                id: article.id,
                kind: ArtifactKind::Cleaned,
            })?;
        self.write(article.id, ArtifactKind::Cleaned, cleaned)
    }

    fn save_conllu(&self, article: &Article) -> StorageResult<()> {
        let document = article
            .conllu
            .as_ref()
            .ok_or(StorageError::MissingContent {
                id: article.id,
                kind: ArtifactKind::UdpipeConllu,
            })?;
        self.write(article.id, ArtifactKind::UdpipeConllu, &document.to_string())
    }

    fn load_raw(&self, id: usize) -> StorageResult<String> {
        self.read(id, ArtifactKind::Raw)
    }

    fn load_meta(&self, id: usize) -> StorageResult<ArticleMeta> {
        let json = self.read(id, ArtifactKind::Meta)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn load_conllu(&self, id: usize) -> StorageResult<ConlluDocument> {
        let path = self.artifact_path(id, ArtifactKind::UdpipeConllu);
        let text = self.read(id, ArtifactKind::UdpipeConllu)?;
        let document = ConlluDocument::parse(&text).map_err(|source| StorageError::Conllu {
            path: path.clone(),
            source,
        })?;
        if document.is_empty() {
            return Err(StorageError::EmptyArtifact(path));
        }
        Ok(document)
    }
}

/// Ensures `path` exists as an empty directory
///
/// Any previous directory at `path` is removed with its contents.
pub fn prepare_environment(path: &Path) -> StorageResult<()> {
    if path.exists() {
        fs::remove_dir_all(path).map_err(|e| StorageError::io(path, e))?;
    }
    fs::create_dir_all(path).map_err(|e| StorageError::io(path, e))?;
    tracing::info!("Prepared corpus directory {}", path.display());
    Ok(())
}
