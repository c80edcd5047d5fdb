//! Set of page identifiers already claimed by a crawl task
use crate::PageId;
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

/// Shared set of visited pages
///
/// Membership check and insertion happen under one lock, so two tasks racing
/// on the same page can never both see it as unvisited.
#[derive(Debug, Default)]
pub struct VisitedSet {
    pages: Mutex<HashSet<PageId>>,
}

impl VisitedSet {
    /// Creates an empty set
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<PageId>> {
        // A panicking task cannot leave the set half-updated
        self.pages.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Claims `id` for the caller
    ///
    /// # Returns
    ///
    /// * `true` - The page was unvisited and is now marked
    /// * `false` - Another task already claimed the page
    pub fn try_mark(&self, id: &str) -> bool {
        let mut pages = self.lock();
        if pages.contains(id) {
            return false;
        }
        pages.insert(id.to_string())
    }

    /// Returns true if `id` has been claimed
    pub fn contains(&self, id: &str) -> bool {
        self.lock().contains(id)
    }

    /// Number of claimed pages
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if no page has been claimed
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Sorted copy of the claimed pages
    pub fn snapshot(&self) -> Vec<PageId> {
        let mut pages: Vec<_> = self.lock().iter().cloned().collect();
        pages.sort();
        pages
    }
}
