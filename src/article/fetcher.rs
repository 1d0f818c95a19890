//! Article fetcher - downloads one article page and persists it

use super::{extract_article, Article};
use crate::crawler::{FetchResult, HttpFetcher};
use crate::storage::Storage;
use crate::HarvestError;

/// Fetches article pages and writes their raw text and metadata artifacts
pub struct ArticleFetcher<'a> {
    fetcher: &'a HttpFetcher,
    storage: &'a dyn Storage,
}

impl<'a> ArticleFetcher<'a> {
    /// Creates a fetcher writing into `storage`
    pub fn new(fetcher: &'a HttpFetcher, storage: &'a dyn Storage) -> Self {
        Self { fetcher, storage }
    }

    /// Fetches and parses a single article
    ///
    /// # Arguments
    ///
    /// * `url` - The article URL
    /// * `article_id` - Id assigned by the caller, starting at 1
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Article))` - The article was parsed and both artifacts were written
    /// * `Ok(None)` - The page could not be fetched; nothing was written
    /// * `Err(HarvestError)` - Writing an artifact failed
    pub fn parse(&self, url: &str, article_id: usize) -> Result<Option<Article>, HarvestError> {
        let body = match self.fetcher.fetch(url) {
            FetchResult::Success { body, .. } => body,
            FetchResult::HttpError { status_code } => {
                tracing::warn!("Article {} at {} returned HTTP {}", article_id, url, status_code);
                return Ok(None);
            }
            FetchResult::NetworkError { error, kind } => {
                tracing::warn!("Article {} at {} unreachable ({:?}): {}", article_id, url, kind, error);
                return Ok(None);
            }
        };

        let article = extract_article(&body, url, article_id);
        self.storage.save_raw(&article)?;
        self.storage.save_meta(&article)?;

        tracing::info!("Saved article {}: {}", article_id, article.title);
        Ok(Some(article))
    }
}
