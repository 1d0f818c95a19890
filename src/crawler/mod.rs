//! Crawler module for web page fetching and link discovery
//!
//! This module contains the core crawling logic, including:
//! - Blocking HTTP fetching with failure classification
//! - HTML parsing and article link extraction
//! - The fixed pause after every request
//! - Seed iteration with the fixed-size result guarantee

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use coordinator::{pad_to_target, Crawler};
pub use fetcher::{build_http_client, fetch_url, FetchResult, HttpFetcher, NetworkErrorKind};
pub use parser::extract_article_links;
pub use scheduler::{Throttle, DEFAULT_REQUEST_DELAY};

use crate::article::ArticleFetcher;
use crate::config::CrawlConfig;
use crate::output::ScrapeStatistics;
use crate::storage::Storage;
use crate::HarvestError;
use std::collections::HashSet;
use std::time::Duration;

/// Runs URL discovery for a validated configuration
///
/// This is the main entry point for the discovery stage: it builds the HTTP
/// client, visits every seed and returns the fixed-size URL list.
///
/// # Returns
///
/// * `Ok(Vec<String>)` - Discovered article URLs (possibly empty)
/// * `Err(HarvestError)` - The HTTP client could not be built
pub fn crawl(config: &CrawlConfig) -> Result<Vec<String>, HarvestError> {
    Ok(Crawler::new(config)?.find_articles())
}

/// Discovers article URLs and fetches every one into `storage`
///
/// Ids are assigned from 1 in URL order, so a padded URL list fetches the
/// repeated article under each of its ids. Failed fetches are counted and
/// skipped; their ids stay unused.
///
/// # Arguments
///
/// * `config` - The validated crawl configuration
/// * `storage` - Destination of the raw and meta artifacts
/// * `delay` - Pause after every HTTP request
///
/// # Returns
///
/// * `Ok(ScrapeStatistics)` - Counters for the run
/// * `Err(HarvestError)` - The HTTP client could not be built or an artifact not written
pub fn harvest(
    config: &CrawlConfig,
    storage: &dyn Storage,
    delay: Duration,
) -> Result<ScrapeStatistics, HarvestError> {
    let crawler = Crawler::new(config)?.with_delay(delay);
    let urls = crawler.find_articles();

    let mut stats = ScrapeStatistics {
        target_articles: config.total_articles(),
        urls_collected: urls.len(),
        unique_urls: urls.iter().collect::<HashSet<_>>().len(),
        ..ScrapeStatistics::default()
    };

    if urls.is_empty() {
        tracing::warn!("No article links found on any seed page");
        return Ok(stats);
    }

    let fetcher = ArticleFetcher::new(crawler.fetcher(), storage);
    for (i, url) in urls.iter().enumerate() {
        match fetcher.parse(url, i + 1)? {
            Some(_) => stats.articles_saved += 1,
            None => stats.fetch_failures += 1,
        }
    }

    tracing::info!(
        "Saved {} of {} articles into {}",
        stats.articles_saved,
        stats.urls_collected,
        storage.root().display()
    );
    Ok(stats)
}
