//! Output module for crawl reports
//!
//! This module handles:
//! - Recording what every crawl task did (`PageOutcome`, `CrawlReport`)
//! - Printing the per-page lines of a finished crawl
//! - Summarizing a crawl as statistics

mod report;
pub mod stats;

pub use report::{CrawlReport, PageOutcome};
pub use stats::{print_statistics, CrawlStatistics};

/// Renders the per-page lines of a report, in recording order
///
/// Fetched pages render as `found: <id> "<body>"`, failures as the error text.
/// Skipped tasks produce no line.
pub fn report_lines(report: &CrawlReport) -> Vec<String> {
    report
        .outcomes
        .iter()
        .filter_map(|outcome| match outcome {
            PageOutcome::Fetched { id, body, .. } => Some(format!("found: {} {:?}", id, body)),
            PageOutcome::Failed { error, .. } => Some(error.to_string()),
            PageOutcome::DepthExhausted { .. } | PageOutcome::AlreadyVisited { .. } => None,
        })
        .collect()
}

/// Prints the per-page lines of a report to stdout
pub fn print_report(report: &CrawlReport) {
    for line in report_lines(report) {
        println!("{}", line);
    }
}
