use crate::config::types::{fields, CrawlConfig};
use crate::ConfigError;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use url::Url;

/// Upper bound for `total_articles_to_find_and_parse`
pub const NUM_ARTICLES_UPPER_LIMIT: u64 = 150;

/// Inclusive timeout bounds, in seconds
pub const TIMEOUT_LOWER_LIMIT: i64 = 0;
pub const TIMEOUT_UPPER_LIMIT: i64 = 60;

/// Validates a raw config record and extracts a [`CrawlConfig`]
///
/// Fields are checked in a fixed order and the first violation is returned:
/// seed URLs, article count (type before range), headers, encoding, timeout,
/// then the two boolean flags. A missing field counts as a wrongly typed one.
pub fn validate(record: &Value) -> Result<CrawlConfig, ConfigError> {
    let empty = Map::new();
    let object = record.as_object().unwrap_or(&empty);
    let field = |name: &str| object.get(name).unwrap_or(&Value::Null);

    let seed_urls = validate_seed_urls(field(fields::SEED_URLS))?;
    let total_articles = validate_article_count(field(fields::TOTAL_ARTICLES))?;
    let headers = validate_headers(field(fields::HEADERS))?;
    let encoding = validate_encoding(field(fields::ENCODING))?;
    let timeout = validate_timeout(field(fields::TIMEOUT))?;
    let verify_certificate = validate_flag(fields::VERIFY_CERTIFICATE, field(fields::VERIFY_CERTIFICATE))?;
    let headless_mode = validate_flag(fields::HEADLESS_MODE, field(fields::HEADLESS_MODE))?;

    Ok(CrawlConfig {
        seed_urls,
        headers,
        total_articles,
        encoding,
        timeout,
        verify_certificate,
        headless_mode,
    })
}

/// Validates seed URLs: non-empty list of absolute http(s) URLs with a host
fn validate_seed_urls(value: &Value) -> Result<Vec<String>, ConfigError> {
    let items = value.as_array().ok_or_else(|| {
        ConfigError::InvalidSeedUrl(format!("seed_urls must be a list of strings, got {}", value))
    })?;

    if items.is_empty() {
        return Err(ConfigError::InvalidSeedUrl(
            "seed_urls cannot be empty".to_string(),
        ));
    }

    let mut seeds = Vec::with_capacity(items.len());
    for item in items {
        let seed = item.as_str().ok_or_else(|| {
            ConfigError::InvalidSeedUrl(format!("seed URL must be a string, got {}", item))
        })?;

        let url = Url::parse(seed)
            .map_err(|e| ConfigError::InvalidSeedUrl(format!("'{}': {}", seed, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidSeedUrl(format!(
                "'{}' must use http or https",
                seed
            )));
        }

        if url.host_str().map_or(true, str::is_empty) {
            return Err(ConfigError::InvalidSeedUrl(format!(
                "'{}' has no host",
                seed
            )));
        }

        seeds.push(seed.to_string());
    }

    Ok(seeds)
}

/// Validates the article count; positivity is checked before the range
fn validate_article_count(value: &Value) -> Result<usize, ConfigError> {
    // Booleans and floats are not integers even when JSON would coerce them
    let count = match value {
        Value::Number(n) => n.as_i64().map(i128::from).or_else(|| n.as_u64().map(i128::from)),
        _ => None,
    }
    .ok_or_else(|| {
        ConfigError::InvalidArticleCount(format!("must be an integer, got {}", value))
    })?;

    if count <= 0 {
        return Err(ConfigError::InvalidArticleCount(format!(
            "must be positive, got {}",
            count
        )));
    }

    if count > i128::from(NUM_ARTICLES_UPPER_LIMIT) {
        return Err(ConfigError::ArticleCountOutOfRange(format!(
            "must be between 1 and {}, got {}",
            NUM_ARTICLES_UPPER_LIMIT, count
        )));
    }

    Ok(count as usize)
}

/// Validates headers: a mapping from header names to string values
fn validate_headers(value: &Value) -> Result<BTreeMap<String, String>, ConfigError> {
    let object = value.as_object().ok_or_else(|| {
        ConfigError::InvalidHeaders(format!("headers must be a mapping, got {}", value))
    })?;

    object
        .iter()
        .map(|(name, header)| {
            header
                .as_str()
                .map(|v| (name.clone(), v.to_string()))
                .ok_or_else(|| {
                    ConfigError::InvalidHeaders(format!(
                        "value of header '{}' must be a string, got {}",
                        name, header
                    ))
                })
        })
        .collect()
}

fn validate_encoding(value: &Value) -> Result<String, ConfigError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ConfigError::InvalidEncoding(format!("must be a string, got {}", value)))
}

fn validate_timeout(value: &Value) -> Result<u64, ConfigError> {
    let timeout = match value {
        Value::Number(n) => n.as_i64(),
        _ => None,
    }
    .ok_or_else(|| ConfigError::InvalidTimeout(format!("must be an integer, got {}", value)))?;

    if !(TIMEOUT_LOWER_LIMIT..=TIMEOUT_UPPER_LIMIT).contains(&timeout) {
        return Err(ConfigError::InvalidTimeout(format!(
            "must be between {} and {} seconds, got {}",
            TIMEOUT_LOWER_LIMIT, TIMEOUT_UPPER_LIMIT, timeout
        )));
    }

    Ok(timeout as u64)
}

/// Both boolean flags share one error kind; the message names the field
fn validate_flag(name: &str, value: &Value) -> Result<bool, ConfigError> {
    value
        .as_bool()
        .ok_or_else(|| ConfigError::InvalidFlag(format!("{} must be a boolean, got {}", name, value)))
}
