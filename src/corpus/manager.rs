//! Corpus manager - directory validation and scanning

use crate::article::{Article, ArticleMeta};
use crate::storage::{parse_artifact_name, ArtifactKind};
use crate::{CorpusError, CorpusResult};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// An artifact found in the corpus directory
#[derive(Debug, Clone)]
struct ArtifactEntry {
    prefix: String,
    id: usize,
    kind: ArtifactKind,
    path: PathBuf,
}

/// In-memory view of a corpus directory
///
/// Construction validates the directory and loads every article; a manager
/// never holds a partial corpus.
#[derive(Debug)]
pub struct CorpusManager {
    path: PathBuf,
    articles: BTreeMap<usize, Article>,
}

impl CorpusManager {
    /// Validates and scans the corpus directory at `path`
    ///
    /// # Returns
    ///
    /// * `Ok(CorpusManager)` - All articles were loaded
    /// * `Err(CorpusError)` - The directory failed validation or could not be read
    pub fn new(path: impl Into<PathBuf>) -> CorpusResult<Self> {
        let path = path.into();
        let entries = validate_dataset(&path)?;
        let articles = scan_dataset(&entries)?;

        tracing::info!("Loaded {} articles from {}", articles.len(), path.display());
        Ok(Self { path, articles })
    }

    /// Corpus directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Articles keyed by id, in ascending id order
    pub fn get_articles(&self) -> &BTreeMap<usize, Article> {
        &self.articles
    }

    /// Mutable access for the annotation stages
    pub fn get_articles_mut(&mut self) -> &mut BTreeMap<usize, Article> {
        &mut self.articles
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

/// Lists artifacts in `path`, sorted by file name
fn list_artifacts(path: &Path) -> CorpusResult<Vec<ArtifactEntry>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if let Some((prefix, id, kind)) = parse_artifact_name(name) {
            entries.push(ArtifactEntry {
                prefix: prefix.to_string(),
                id,
                kind,
                path: entry.path(),
            });
        }
    }
    entries.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    Ok(entries)
}

fn validate_dataset(path: &Path) -> CorpusResult<Vec<ArtifactEntry>> {
    if !path.exists() {
        return Err(CorpusError::MissingDirectory(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(CorpusError::NotADirectory(path.to_path_buf()));
    }

    let entries = list_artifacts(path)?;
    let of_kind = |kind: ArtifactKind| -> Vec<&ArtifactEntry> {
        entries.iter().filter(|entry| entry.kind == kind).collect()
    };
    let raws = of_kind(ArtifactKind::Raw);
    let metas = of_kind(ArtifactKind::Meta);

    if raws.is_empty() || metas.is_empty() {
        return Err(CorpusError::EmptyDirectory(path.to_path_buf()));
    }

    if raws.len() != metas.len() {
        let unmatched = raws
            .iter()
            .find(|raw| !metas.iter().any(|meta| meta.prefix == raw.prefix))
            .or_else(|| {
                metas
                    .iter()
                    .find(|meta| !raws.iter().any(|raw| raw.prefix == meta.prefix))
            })
            .map(|entry| entry.path.clone())
            .unwrap_or_else(|| path.to_path_buf());

        return Err(CorpusError::InconsistentDataset {
            artifact: unmatched,
            reason: format!(
                "found {} raw and {} meta artifacts",
                raws.len(),
                metas.len()
            ),
        });
    }

    for entry in raws.iter().chain(metas.iter()) {
        if fs::metadata(&entry.path)?.len() == 0 {
            return Err(CorpusError::InconsistentDataset {
                artifact: entry.path.clone(),
                reason: "artifact is empty".to_string(),
            });
        }
    }

    Ok(entries)
}

fn scan_dataset(entries: &[ArtifactEntry]) -> CorpusResult<BTreeMap<usize, Article>> {
    let mut articles = BTreeMap::new();

    for raw in entries.iter().filter(|entry| entry.kind == ArtifactKind::Raw) {
        if articles.contains_key(&raw.id) {
            tracing::warn!(
                "Skipping {}: article {} already loaded",
                raw.path.display(),
                raw.id
            );
            continue;
        }

        let mut article = Article::new(raw.id, "");
        article.text = fs::read_to_string(&raw.path)?;

        let meta = entries
            .iter()
            .find(|entry| entry.kind == ArtifactKind::Meta && entry.prefix == raw.prefix);
        if let Some(meta) = meta {
            article.apply_meta(load_meta(&meta.path)?);
        } else {
            tracing::debug!("No metadata for article {}", raw.id);
        }

        articles.insert(raw.id, article);
    }

    Ok(articles)
}

fn load_meta(path: &Path) -> CorpusResult<ArticleMeta> {
    let json = fs::read_to_string(path)?;
    serde_json::from_str(&json).map_err(|e| CorpusError::InconsistentDataset {
        artifact: path.to_path_buf(),
        reason: format!("unreadable metadata: {}", e),
    })
}
