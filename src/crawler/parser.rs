//! HTML parser for link discovery on seed pages
//!
//! Only `<a href>` targets are considered; every target is resolved against
//! the seed page URL and kept when it has the article-link shape.

use crate::url::article_link;
use scraper::{Html, Selector};
use url::Url;

/// Extracts all article links from a seed page, in document order
///
/// Duplicates are kept; deduplication across seeds is the crawler's job.
///
/// # Example
///
/// ```
/// use treebank_harvest::crawler::extract_article_links;
/// use url::Url;
///
/// let html = r#"<a href="/news-1-10.html">A</a><a href="/about.html">About</a>"#;
/// let base = Url::parse("https://mordovia-news.ru/news/").unwrap();
/// let links = extract_article_links(html, &base);
/// assert_eq!(links.len(), 1);
/// assert_eq!(links[0].as_str(), "https://mordovia-news.ru/news-1-10.html");
/// ```
pub fn extract_article_links(html: &str, base_url: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);

    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| article_link(href, base_url))
        .collect()
}
