//! In-memory fetcher serving canned pages

use crate::config::Config;
use crate::fetcher::{FetchResult, Fetcher};
use crate::{FetchError, FetchOutcome, PageId};
use async_trait::async_trait;
use std::collections::HashMap;

/// Fetcher backed by a fixed table of pages
///
/// Identifiers missing from the table fail with [`FetchError::NotFound`].
#[derive(Debug, Clone, Default)]
pub struct FakeFetcher {
    pages: HashMap<PageId, FetchResult>,
}

impl FakeFetcher {
    /// Creates an empty fetcher; every fetch fails
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the page table described by a configuration
    pub fn from_config(config: &Config) -> Self {
        let pages = config
            .pages
            .iter()
            .map(|entry| {
                (
                    entry.id.clone(),
                    FetchResult::new(entry.body.clone(), entry.links.clone()),
                )
            })
            .collect();

        Self { pages }
    }

    /// The built-in demo site rooted at `https://golang.org/`
    pub fn golang() -> Self {
        Self::from_config(&Config::builtin())
    }

    /// Adds (or replaces) a page
    pub fn with_page(mut self, id: &str, body: &str, links: &[&str]) -> Self {
        self.pages.insert(
            id.to_string(),
            FetchResult::new(body, links.iter().map(|l| l.to_string()).collect()),
        );
        self
    }

    /// Number of pages in the table
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Returns true if the table has no pages
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Returns true if `id` would be served
    pub fn contains(&self, id: &str) -> bool {
        self.pages.contains_key(id)
    }
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch(&self, id: &str) -> FetchOutcome {
        self.pages
            .get(id)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(id.to_string()))
    }
}
