//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler and the article
//! fetcher, including:
//! - Building a blocking HTTP client from the crawl configuration
//! - GET requests with configured headers, timeout and certificate policy
//! - Classifying failures (status vs. transport)
//! - The fixed pause after every request

use crate::config::CrawlConfig;
use crate::crawler::scheduler::Throttle;
use crate::HarvestError;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// HTTP status code
        status_code: u16,
        /// Decoded page body
        body: String,
    },

    /// Server answered with a non-2xx status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Transport failure (timeout, connection refused, TLS, body read)
    NetworkError {
        /// Error description
        error: String,
        /// Failure class
        kind: NetworkErrorKind,
    },
}

/// Classification of transport failures
///
/// All kinds are handled identically by callers; the class only feeds logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkErrorKind {
    Timeout,
    Connect,
    Other,
}

impl FetchResult {
    /// Returns true if the page body is available
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Blocking HTTP client shared by the crawler and the article fetcher
///
/// Every call to [`HttpFetcher::fetch`] is followed by the throttle pause,
/// whatever its outcome.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    encoding: String,
    throttle: Throttle,
}

impl HttpFetcher {
    /// Builds a fetcher from a validated configuration with the default pause
    pub fn new(config: &CrawlConfig) -> Result<Self, HarvestError> {
        Ok(Self {
            client: build_http_client(config)?,
            encoding: config.encoding().to_string(),
            throttle: Throttle::default(),
        })
    }

    /// Replaces the pause enforced after each request
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.throttle = Throttle::new(delay);
        self
    }

    /// Fetches a URL once, then pauses
    pub fn fetch(&self, url: &str) -> FetchResult {
        let result = fetch_url(&self.client, url, &self.encoding);
        self.throttle.pause();
        result
    }
}

/// Builds a blocking HTTP client with the configured request policy
///
/// # Arguments
///
/// * `config` - The validated crawl configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(HarvestError)` - A header could not be encoded or the client failed to build
pub fn build_http_client(config: &CrawlConfig) -> Result<Client, HarvestError> {
    let mut headers = HeaderMap::new();
    for (name, value) in config.headers() {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| HarvestError::InvalidHeader {
                name: name.clone(),
                message: e.to_string(),
            })?;
        let header_value =
            HeaderValue::from_str(value).map_err(|e| HarvestError::InvalidHeader {
                name: name.clone(),
                message: e.to_string(),
            })?;
        headers.insert(header_name, header_value);
    }

    if config.headless_mode() {
        tracing::debug!("Headless mode requested; pages are fetched over plain HTTP");
    }

    let client = Client::builder()
        .default_headers(headers)
        .timeout(config.timeout())
        .danger_accept_invalid_certs(!config.verify_certificate())
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

/// Fetches a URL with a single GET request
///
/// No retries: a non-2xx status or a transport failure is reported as-is and
/// left to the caller to log and skip.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
/// * `encoding` - Charset used when the response does not declare one
pub fn fetch_url(client: &Client, url: &str, encoding: &str) -> FetchResult {
    let response = match client.get(url).send() {
        Ok(response) => response,
        Err(e) => return classify_transport_error(e),
    };

    let status = response.status();
    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    match response.text_with_charset(encoding) {
        Ok(body) => FetchResult::Success {
            status_code: status.as_u16(),
            body,
        },
        Err(e) => classify_transport_error(e),
    }
}

fn classify_transport_error(e: reqwest::Error) -> FetchResult {
    let kind = if e.is_timeout() {
        NetworkErrorKind::Timeout
    } else if e.is_connect() {
        NetworkErrorKind::Connect
    } else {
        NetworkErrorKind::Other
    };

    FetchResult::NetworkError {
        error: e.to_string(),
        kind,
    }
}
