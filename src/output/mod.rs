//! Output module for reports and run statistics
//!
//! This module handles:
//! - Writing and reading the pattern match report
//! - Printing scrape, annotation and search summaries

mod report;
pub mod stats;

pub use report::{load_report, save_report};
pub use stats::{print_annotation_summary, print_report_summary, print_statistics, ScrapeStatistics};
