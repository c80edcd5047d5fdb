//! Fanout-Crawler: a concurrent link crawler over pluggable fetchers
//!
//! This crate crawls a link graph from a seed page up to a depth bound,
//! spawning one task per discovered link, skipping pages that were already
//! visited, and waiting for every spawned task to finish before reporting.

pub mod config;
pub mod crawler;
pub mod fetcher;
pub mod output;
pub mod state;

use thiserror::Error;

/// Opaque identifier of a fetchable page (a URL in the demo data)
pub type PageId = String;

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Errors reported by a [`fetcher::Fetcher`]
///
/// A fetch error only ends the branch of the crawl that issued it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("not found: {0}")]
    NotFound(PageId),

    #[error("unavailable: {id}: {reason}")]
    Unavailable { id: PageId, reason: String },
}

impl FetchError {
    /// The page the failed fetch was issued for
    pub fn page_id(&self) -> &str {
        match self {
            Self::NotFound(id) => id,
            Self::Unavailable { id, .. } => id,
        }
    }
}

/// Result type alias for a single fetch
pub type FetchOutcome = std::result::Result<fetcher::FetchResult, FetchError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, Crawler};
pub use fetcher::{FakeFetcher, FetchResult, Fetcher};
pub use output::{CrawlReport, CrawlStatistics, PageOutcome};
pub use state::{ActiveTaskCounter, TaskGuard, VisitedSet};
