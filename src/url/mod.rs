//! URL handling module for Treebank-Harvest
//!
//! This module provides link resolution, normalization for URL-level
//! deduplication, and recognition of article page URLs.

mod matcher;
mod normalize;

// Re-export main functions
pub use matcher::{is_article_url, matches_article_segment};
pub use normalize::{normalize_url, resolve_link};

use url::Url;

/// Resolves `href` against `base_url` and keeps it only if it is an article link
///
/// # Examples
///
/// ```
/// use treebank_harvest::url::article_link;
/// use url::Url;
///
/// let base = Url::parse("https://mordovia-news.ru/news/").unwrap();
/// assert!(article_link("/news-1-2.html", &base).is_some());
/// assert!(article_link("/about.html", &base).is_none());
/// ```
pub fn article_link(href: &str, base_url: &Url) -> Option<Url> {
    resolve_link(href, base_url).filter(is_article_url)
}
