//! Fetcher trait and the page content it returns

use crate::{FetchOutcome, PageId};
use async_trait::async_trait;
use std::sync::Arc;

/// Content and outbound links of a fetched page
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FetchResult {
    /// Page body
    pub body: String,

    /// Linked page identifiers, in page order
    pub links: Vec<PageId>,
}

impl FetchResult {
    /// Creates a result from a body and its links
    pub fn new(body: impl Into<String>, links: Vec<PageId>) -> Self {
        Self {
            body: body.into(),
            links,
        }
    }
}

/// Source of page content for the crawler
///
/// Implementations are shared by every concurrent crawl task, so they must be
/// `Send + Sync`. A returned error ends only the branch that requested the page.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches the body and outbound links of `id`
    async fn fetch(&self, id: &str) -> FetchOutcome;
}

#[async_trait]
impl<F: Fetcher + ?Sized> Fetcher for Arc<F> {
    async fn fetch(&self, id: &str) -> FetchOutcome {
        (**self).fetch(id).await
    }
}

#[async_trait]
impl<F: Fetcher + ?Sized> Fetcher for Box<F> {
    async fn fetch(&self, id: &str) -> FetchOutcome {
        (**self).fetch(id).await
    }
}
