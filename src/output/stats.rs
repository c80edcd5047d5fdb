//! Statistics derived from a finished crawl
//!
//! This module provides functionality for summarizing a crawl report
//! and displaying the result.

use crate::output::{CrawlReport, PageOutcome};
use std::collections::HashSet;

/// Crawl statistics summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// Pages fetched successfully
    pub pages_fetched: u64,

    /// Fetches that returned an error
    pub fetch_failures: u64,

    /// Tasks that stopped because no depth was left
    pub depth_exhausted: u64,

    /// Tasks that stopped because their page was already claimed
    pub already_visited: u64,

    /// Links found on fetched pages, duplicates included
    pub total_links: u64,

    /// Distinct identifiers seen by any task
    pub unique_pages: u64,

    /// Tasks registered during the crawl
    pub tasks_started: u64,

    /// Largest number of tasks active at once
    pub peak_active: u64,

    /// Wall-clock duration in milliseconds
    pub elapsed_ms: i64,
}

impl CrawlStatistics {
    /// Summarizes a crawl report
    pub fn from_report(report: &CrawlReport) -> Self {
        let mut stats = Self {
            pages_fetched: 0,
            fetch_failures: 0,
            depth_exhausted: 0,
            already_visited: 0,
            total_links: 0,
            unique_pages: 0,
            tasks_started: report.tasks_started as u64,
            peak_active: report.peak_active as u64,
            elapsed_ms: report.elapsed().num_milliseconds(),
        };

        let mut seen = HashSet::new();
        for outcome in &report.outcomes {
            seen.insert(outcome.page_id());
            match outcome {
                PageOutcome::Fetched { links, .. } => {
                    stats.pages_fetched += 1;
                    stats.total_links += links.len() as u64;
                }
                PageOutcome::Failed { .. } => stats.fetch_failures += 1,
                PageOutcome::DepthExhausted { .. } => stats.depth_exhausted += 1,
                PageOutcome::AlreadyVisited { .. } => stats.already_visited += 1,
            }
        }
        stats.unique_pages = seen.len() as u64;

        stats
    }

    /// Share of issued fetches that succeeded, in percent
    pub fn success_rate(&self) -> f64 {
        let fetches = self.pages_fetched + self.fetch_failures;
        if fetches > 0 {
            (self.pages_fetched as f64 / fetches as f64) * 100.0
        } else {
            0.0
        }
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Unique pages seen: {}", stats.unique_pages);
    println!("  Total links found: {}", stats.total_links);
    println!("  Elapsed: {}ms", stats.elapsed_ms);
    println!();

    println!("Tasks:");
    println!("  Started: {}", stats.tasks_started);
    println!("  Peak active: {}", stats.peak_active);
    println!("  Fetched: {}", stats.pages_fetched);
    println!("  Fetch failed: {}", stats.fetch_failures);
    println!("  Depth exhausted: {}", stats.depth_exhausted);
    println!("  Already visited: {}", stats.already_visited);
    println!();

    println!(
        "Success Rate: {:.1}% ({} / {} fetches succeeded)",
        stats.success_rate(),
        stats.pages_fetched,
        stats.pages_fetched + stats.fetch_failures
    );
}
