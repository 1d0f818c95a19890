//! Run statistics
//!
//! Counters collected while scraping and annotating, and their console
//! rendering.

use crate::pipeline::{AnnotationSummary, PatternMatchReport};

/// Outcome of a scrape run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapeStatistics {
    /// Configured article count
    pub target_articles: usize,

    /// URLs returned by the crawler, padding included
    pub urls_collected: usize,

    /// Distinct URLs among them
    pub unique_urls: usize,

    /// Articles whose raw and meta artifacts were written
    pub articles_saved: usize,

    /// URLs that could not be fetched
    pub fetch_failures: usize,
}

impl ScrapeStatistics {
    /// Share of collected URLs that produced an article, in percent
    pub fn success_rate(&self) -> f64 {
        if self.urls_collected == 0 {
            0.0
        } else {
            (self.articles_saved as f64 / self.urls_collected as f64) * 100.0
        }
    }
}

/// Prints scrape statistics to stdout
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &ScrapeStatistics) {
    println!("=== Scrape Statistics ===\n");

    println!("Overview:");
    println!("  Target articles: {}", stats.target_articles);
    println!("  URLs collected: {}", stats.urls_collected);
    println!("  Unique URLs: {}", stats.unique_urls);
    println!("  Fetch failures: {}", stats.fetch_failures);
    println!();

    println!(
        "Success Rate: {:.1}% ({} / {} articles saved)",
        stats.success_rate(),
        stats.articles_saved,
        stats.urls_collected
    );
}

/// Prints annotation counts to stdout
pub fn print_annotation_summary(summary: &AnnotationSummary, total: usize) {
    println!("=== Annotation ===\n");
    println!("  Articles: {}", total);
    println!("  Cleaned: {}", summary.cleaned);
    println!("  Annotated: {}", summary.annotated);
}

/// Prints per-sentence match counts to stdout, skipping sentences without matches
pub fn print_report_summary(report: &PatternMatchReport) {
    let matched: Vec<_> = report
        .iter()
        .filter(|(_, matches)| !matches.is_empty())
        .collect();

    println!("=== Pattern Search ===\n");
    println!("  Sentences searched: {}", report.len());
    println!("  Sentences with matches: {}", matched.len());
    for (index, matches) in matched {
        println!("  - sentence {}: {} match(es)", index, matches.len());
    }
}
