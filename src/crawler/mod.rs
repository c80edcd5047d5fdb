//! Crawler module for concurrent link discovery
//!
//! This module contains the core crawling logic:
//! - One spawned task per discovered link, without a concurrency limit
//! - De-duplication through a shared visited set
//! - Completion detection through a shared active task counter

mod coordinator;

pub use coordinator::Crawler;

use crate::fetcher::Fetcher;
use crate::output::CrawlReport;

/// Runs a complete crawl with fresh shared state
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Create a new visited set and task counter
/// 2. Fetch the seed and fan out one task per link, down to `max_depth`
/// 3. Wait until every spawned task has finished
/// 4. Return the recorded outcomes
///
/// Must be called from within a tokio runtime.
///
/// # Arguments
///
/// * `seed` - Identifier of the first page
/// * `max_depth` - Remaining link hops; zero or less fetches nothing
/// * `fetcher` - Source of page content
pub async fn crawl<F>(seed: &str, max_depth: i64, fetcher: F) -> CrawlReport
where
    F: Fetcher + 'static,
{
    Crawler::new(fetcher).run(seed, max_depth).await
}
