//! Crawl outcomes and the report assembled from them

use crate::{FetchError, PageId};
use chrono::{DateTime, Utc};

/// What a single crawl task did with its page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// The page was fetched and its links were handed to child tasks
    Fetched {
        id: PageId,
        /// Remaining depth when the page was fetched
        depth: i64,
        body: String,
        links: Vec<PageId>,
    },

    /// The fetch failed; the branch ends here
    Failed {
        id: PageId,
        depth: i64,
        error: FetchError,
    },

    /// No depth left; the page was neither fetched nor marked visited
    DepthExhausted { id: PageId },

    /// Another task already claimed the page
    AlreadyVisited { id: PageId, depth: i64 },
}

impl PageOutcome {
    /// The page this outcome is about
    pub fn page_id(&self) -> &str {
        match self {
            Self::Fetched { id, .. }
            | Self::Failed { id, .. }
            | Self::DepthExhausted { id }
            | Self::AlreadyVisited { id, .. } => id,
        }
    }

    /// Returns true if this outcome issued a fetch, successful or not
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetched { .. } | Self::Failed { .. })
    }
}

/// Everything recorded by one finished crawl
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Page the crawl started from
    pub seed: PageId,

    /// Depth bound the crawl started with
    pub max_depth: i64,

    /// Task outcomes, in the order the tasks recorded them
    pub outcomes: Vec<PageOutcome>,

    /// Number of tasks registered during the crawl
    pub tasks_started: usize,

    /// Largest number of tasks active at once
    pub peak_active: usize,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CrawlReport {
    /// Identifiers of successfully fetched pages, sorted
    pub fn fetched_ids(&self) -> Vec<&str> {
        let mut ids: Vec<_> = self
            .outcomes
            .iter()
            .filter(|o| matches!(o, PageOutcome::Fetched { .. }))
            .map(PageOutcome::page_id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Identifiers whose fetch failed, sorted
    pub fn failed_ids(&self) -> Vec<&str> {
        let mut ids: Vec<_> = self
            .outcomes
            .iter()
            .filter(|o| matches!(o, PageOutcome::Failed { .. }))
            .map(PageOutcome::page_id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Fetch errors, in recording order
    pub fn errors(&self) -> impl Iterator<Item = &FetchError> {
        self.outcomes.iter().filter_map(|o| match o {
            PageOutcome::Failed { error, .. } => Some(error),
            _ => None,
        })
    }

    /// How many fetches, successful or not, were issued for `id`
    pub fn fetch_count(&self, id: &str) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.is_fetch() && o.page_id() == id)
            .count()
    }

    /// Wall-clock duration of the crawl
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}
