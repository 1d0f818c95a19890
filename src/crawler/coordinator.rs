//! Crawler coordinator - seed iteration and URL collection
//!
//! The crawler visits seed pages in configuration order, collects article
//! links in discovery order and guarantees a fixed-size result whenever at
//! least one article was found.

use crate::config::CrawlConfig;
use crate::crawler::fetcher::{FetchResult, HttpFetcher};
use crate::crawler::parser::extract_article_links;
use crate::HarvestError;
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// Discovers article URLs from the configured seed pages
pub struct Crawler {
    config: CrawlConfig,
    fetcher: HttpFetcher,
}

impl Crawler {
    /// Creates a crawler with the default request pause
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to crawl
    /// * `Err(HarvestError)` - The HTTP client could not be built
    pub fn new(config: &CrawlConfig) -> Result<Self, HarvestError> {
        Ok(Self {
            config: config.clone(),
            fetcher: HttpFetcher::new(config)?,
        })
    }

    /// Replaces the pause enforced after each request
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.fetcher = self.fetcher.with_delay(delay);
        self
    }

    /// The HTTP fetcher, shared with article fetching so the pause keeps applying
    pub fn fetcher(&self) -> &HttpFetcher {
        &self.fetcher
    }

    /// Seed pages in crawl order
    pub fn get_search_urls(&self) -> &[String] {
        self.config.seed_urls()
    }

    /// Collects exactly `total_articles` article URLs
    ///
    /// # Algorithm
    ///
    /// 1. Fetch each seed once; failed seeds are logged and skipped
    /// 2. Append unseen article links in discovery order
    /// 3. Stop as soon as the target count is reached, even mid-seed
    /// 4. If seeds run out with a non-empty but short result, repeat the
    ///    last URL until the target count is reached
    ///
    /// Returns an empty list when no article link was found at all.
    pub fn find_articles(&self) -> Vec<String> {
        let target = self.config.total_articles();
        let mut seen: HashSet<String> = HashSet::new();
        let mut urls: Vec<String> = Vec::with_capacity(target);

        'seeds: for seed in self.get_search_urls() {
            if urls.len() >= target {
                break;
            }

            let base_url = match Url::parse(seed) {
                Ok(url) => url,
                Err(e) => {
                    tracing::warn!("Skipping seed {}: {}", seed, e);
                    continue;
                }
            };

            let body = match self.fetcher.fetch(seed) {
                FetchResult::Success { body, .. } => body,
                FetchResult::HttpError { status_code } => {
                    tracing::warn!("Seed {} returned HTTP {}", seed, status_code);
                    continue;
                }
                FetchResult::NetworkError { error, kind } => {
                    tracing::warn!("Seed {} unreachable ({:?}): {}", seed, kind, error);
                    continue;
                }
            };

            let links = extract_article_links(&body, &base_url);
            tracing::debug!("Seed {} yielded {} article links", seed, links.len());

            for link in links {
                let link = String::from(link);
                if seen.insert(link.clone()) {
                    urls.push(link);
                    if urls.len() >= target {
                        break 'seeds;
                    }
                }
            }
        }

        pad_to_target(&mut urls, target);

        tracing::info!("Crawler collected {} article URLs", urls.len());
        urls
    }
}

/// Repeats the last URL until `urls` holds `target` entries
///
/// Leaves an empty list untouched.
pub fn pad_to_target(urls: &mut Vec<String>, target: usize) {
    let Some(last) = urls.last().cloned() else {
        return;
    };

    if urls.len() < target {
        tracing::info!(
            "Found {} of {} article URLs, padding with {}",
            urls.len(),
            target,
            last
        );
        urls.resize(target, last);
    }
}
