use crate::config::types::CrawlConfig;
use crate::config::validation::validate;
use crate::ConfigError;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and validates a crawl configuration file
///
/// The file is read as JSON unless its extension is `.toml`; either way the
/// content is turned into a JSON value and passed through the validator.
///
/// # Arguments
///
/// * `path` - Path to the configuration file
///
/// # Returns
///
/// * `Ok(CrawlConfig)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use treebank_harvest::config::load_config;
///
/// let config = load_config(Path::new("scraper_config.json")).unwrap();
/// println!("Articles to collect: {}", config.total_articles());
/// ```
pub fn load_config(path: &Path) -> Result<CrawlConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let record = parse_record(path, &content)?;
    validate(&record)
}

/// Parses raw file content into a JSON value based on the file extension
fn parse_record(path: &Path, content: &str) -> Result<Value, ConfigError> {
    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    if is_toml {
        let table: toml::Value = toml::from_str(content)?;
        Ok(serde_json::to_value(table)?)
    } else {
        Ok(serde_json::from_str(content)?)
    }
}

/// Hex-encoded SHA-256 digest of the configuration text
///
/// Logged at the start of each scrape run so a corpus can be traced back to
/// the configuration that produced it.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    Ok(digest(&std::fs::read_to_string(path)?))
}

fn digest(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}

/// Loads a configuration together with the digest of the exact text validated
pub fn load_config_with_hash(path: &Path) -> Result<(CrawlConfig, String), ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config = validate(&parse_record(path, &content)?)?;
    Ok((config, digest(&content)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    fn create_temp_config(content: &str, suffix: &str) -> NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    const JSON_CONFIG: &str = r#"{
        "seed_urls": ["https://mordovia-news.ru/news/"],
        "headers": {"User-Agent": "Mozilla/5.0", "Accept-Language": "ru-RU,ru;q=0.9"},
        "total_articles_to_find_and_parse": 5,
        "encoding": "utf-8",
        "timeout": 15,
        "should_verify_certificate": true,
        "headless_mode": false
    }"#;

    #[test]
    fn test_load_valid_json_config() {
        let file = create_temp_config(JSON_CONFIG, ".json");
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.seed_urls(), ["https://mordovia-news.ru/news/"]);
        assert_eq!(config.total_articles(), 5);
        assert_eq!(config.headers().len(), 2);
        assert_eq!(config.timeout_secs(), 15);
    }

    #[test]
    fn test_load_valid_toml_config() {
        let config_content = r#"
seed_urls = ["https://mordovia-news.ru/news/"]
total_articles_to_find_and_parse = 3
encoding = "utf-8"
timeout = 5
should_verify_certificate = false
headless_mode = false

[headers]
User-Agent = "Mozilla/5.0"
"#;

        let file = create_temp_config(config_content, ".toml");
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.total_articles(), 3);
        assert!(!config.verify_certificate());
        assert_eq!(config.headers().get("User-Agent").unwrap(), "Mozilla/5.0");
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/config.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_json() {
        let file = create_temp_config("this is not valid JSON {{{", ".json");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let content = JSON_CONFIG.replace("\"timeout\": 15", "\"timeout\": 120");
        let file = create_temp_config(&content, ".json");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::InvalidTimeout(_))));
    }

    #[test]
    fn test_hash_matches_loaded_content() {
        let file = create_temp_config(JSON_CONFIG, ".json");
        let (config, hash) = load_config_with_hash(file.path()).unwrap();

        assert_eq!(config.total_articles(), 5);
        assert_eq!(hash, compute_config_hash(file.path()).unwrap());
        assert_eq!(hash.len(), 64);
    }

    #[test]
    fn test_hash_tracks_whitespace_changes() {
        let reformatted = JSON_CONFIG.replace('\n', " ");
        assert_ne!(digest(JSON_CONFIG), digest(&reformatted));
        assert_eq!(
            digest(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
