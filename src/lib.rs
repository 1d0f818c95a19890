//! Treebank-Harvest: a news corpus harvester with dependency-pattern search
//!
//! This crate crawls a news site for article links, extracts and persists each
//! article, runs the corpus through a dependency parser into CoNLL-U, and
//! searches the resulting syntax trees for structural patterns.

pub mod article;
pub mod config;
pub mod conllu;
pub mod corpus;
pub mod crawler;
pub mod output;
pub mod pipeline;
pub mod storage;
pub mod url;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Treebank-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Corpus error: {0}")]
    Corpus(#[from] CorpusError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Analyzer error: {0}")]
    Analyzer(#[from] pipeline::AnalyzerError),

    #[error("CoNLL-U error: {0}")]
    Conllu(#[from] conllu::ConlluError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid header '{name}': {message}")]
    InvalidHeader { name: String, message: String },

    #[error("Invalid search pattern '{0}': expected ROOT,relation,CHILD")]
    InvalidPattern(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
///
/// One variant per validated field; validation stops at the first failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid seed URL: {0}")]
    InvalidSeedUrl(String),

    #[error("Invalid number of articles: {0}")]
    InvalidArticleCount(String),

    #[error("Number of articles out of range: {0}")]
    ArticleCountOutOfRange(String),

    #[error("Invalid headers: {0}")]
    InvalidHeaders(String),

    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    #[error("Invalid timeout: {0}")]
    InvalidTimeout(String),

    #[error("Invalid flag: {0}")]
    InvalidFlag(String),
}

/// Corpus directory validation errors
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("Corpus directory does not exist: {0}")]
    MissingDirectory(PathBuf),

    #[error("Corpus path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Corpus directory has no raw or meta artifacts: {0}")]
    EmptyDirectory(PathBuf),

    #[error("Inconsistent dataset at {artifact}: {reason}")]
    InconsistentDataset { artifact: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Treebank-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for corpus operations
pub type CorpusResult<T> = std::result::Result<T, CorpusError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use article::Article;
pub use config::CrawlConfig;
pub use corpus::CorpusManager;
pub use crawler::Crawler;
pub use pipeline::{PatternSearchPipeline, SyntacticPattern, TextProcessingPipeline};
