use std::collections::BTreeMap;
use std::time::Duration;

/// Validated crawl configuration
///
/// Instances are only produced by the validator, so every field is known to
/// satisfy its contract. Fields are read-only after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlConfig {
    pub(crate) seed_urls: Vec<String>,
    pub(crate) headers: BTreeMap<String, String>,
    pub(crate) total_articles: usize,
    pub(crate) encoding: String,
    pub(crate) timeout: u64,
    pub(crate) verify_certificate: bool,
    pub(crate) headless_mode: bool,
}

impl CrawlConfig {
    /// Seed pages to discover article links from, in crawl order
    pub fn seed_urls(&self) -> &[String] {
        &self.seed_urls
    }

    /// Headers sent with every request
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Number of article URLs the crawler must produce
    pub fn total_articles(&self) -> usize {
        self.total_articles
    }

    /// Default charset for decoding response bodies
    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    /// Per-request timeout in seconds (0 disables the timeout)
    pub fn timeout_secs(&self) -> u64 {
        self.timeout
    }

    /// Per-request timeout, `None` when disabled
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout > 0).then(|| Duration::from_secs(self.timeout))
    }

    pub fn verify_certificate(&self) -> bool {
        self.verify_certificate
    }

    pub fn headless_mode(&self) -> bool {
        self.headless_mode
    }
}

/// Field names of the on-disk config record
pub mod fields {
    pub const SEED_URLS: &str = "seed_urls";
    pub const HEADERS: &str = "headers";
    pub const TOTAL_ARTICLES: &str = "total_articles_to_find_and_parse";
    pub const ENCODING: &str = "encoding";
    pub const TIMEOUT: &str = "timeout";
    pub const VERIFY_CERTIFICATE: &str = "should_verify_certificate";
    pub const HEADLESS_MODE: &str = "headless_mode";
}
