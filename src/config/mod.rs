//! Configuration module for Treebank-Harvest
//!
//! This module handles loading and validating crawl configuration records.
//!
//! # Example
//!
//! ```no_run
//! use treebank_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scraper_config.json")).unwrap();
//! println!("Crawler will collect {} articles", config.total_articles());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{fields, CrawlConfig};

// Re-export parser and validation functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::{validate, NUM_ARTICLES_UPPER_LIMIT, TIMEOUT_LOWER_LIMIT, TIMEOUT_UPPER_LIMIT};
