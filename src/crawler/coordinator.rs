//! Crawler coordinator - task fan-out and completion tracking
//!
//! Every page visit runs as its own tokio task. A task is registered in the
//! active task counter by whoever spawns it, before the spawn, so the counter
//! cannot reach zero while a child is queued but not yet running.

use crate::fetcher::Fetcher;
use crate::output::{CrawlReport, PageOutcome};
use crate::state::{ActiveTaskCounter, TaskGuard, VisitedSet};
use crate::PageId;
use chrono::Utc;
use std::sync::{Arc, Mutex};

/// State shared by every task of a crawler
struct CrawlContext<F> {
    fetcher: F,
    visited: VisitedSet,
    counter: Arc<ActiveTaskCounter>,
    outcomes: Mutex<Vec<PageOutcome>>,
}

impl<F> CrawlContext<F> {
    fn record(&self, outcome: PageOutcome) {
        self.outcomes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(outcome);
    }

    fn drain(&self) -> Vec<PageOutcome> {
        std::mem::take(&mut *self.outcomes.lock().unwrap_or_else(|e| e.into_inner()))
    }
}

/// Concurrent crawler over a [`Fetcher`]
///
/// The visited set lives as long as the crawler, so running it again on a
/// page it already fetched is a no-op. Use [`crate::crawl`] for a one-off
/// crawl with fresh state.
pub struct Crawler<F> {
    ctx: Arc<CrawlContext<F>>,
}

impl<F> Crawler<F>
where
    F: Fetcher + 'static,
{
    /// Creates a crawler with an empty visited set
    pub fn new(fetcher: F) -> Self {
        Self {
            ctx: Arc::new(CrawlContext {
                fetcher,
                visited: VisitedSet::new(),
                counter: Arc::new(ActiveTaskCounter::new()),
                outcomes: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Pages claimed by this crawler so far
    pub fn visited(&self) -> &VisitedSet {
        &self.ctx.visited
    }

    /// The crawler's active task counter
    pub fn counter(&self) -> &ActiveTaskCounter {
        &self.ctx.counter
    }

    /// Crawls from `seed` and waits for every spawned task to finish
    ///
    /// Must be called from within a tokio runtime. Runs on the same crawler
    /// should not overlap: each run drains every outcome recorded so far.
    pub async fn run(&self, seed: &str, max_depth: i64) -> CrawlReport {
        let started_at = Utc::now();
        let started_before = self.ctx.counter.started();
        self.ctx.counter.reset_peak();

        tracing::info!("Starting crawl from {} (max depth {})", seed, max_depth);

        spawn_visit(&self.ctx, seed.to_string(), max_depth);
        self.ctx.counter.wait_idle().await;

        let outcomes = self.ctx.drain();
        let tasks_started = self.ctx.counter.started() - started_before;

        tracing::info!(
            "Crawl from {} finished: {} outcomes from {} tasks",
            seed,
            outcomes.len(),
            tasks_started
        );

        CrawlReport {
            seed: seed.to_string(),
            max_depth,
            outcomes,
            tasks_started,
            peak_active: self.ctx.counter.peak(),
            started_at,
            finished_at: Utc::now(),
        }
    }
}

/// Registers a visit task and spawns it onto the runtime
fn spawn_visit<F>(ctx: &Arc<CrawlContext<F>>, id: PageId, depth: i64)
where
    F: Fetcher + 'static,
{
    let guard = ctx.counter.enter();
    tracing::trace!("Spawning task for {} (depth {})", id, depth);
    tokio::spawn(visit(Arc::clone(ctx), id, depth, guard));
}

/// Visits one page
///
/// The guard is held for the whole body and released on every return path.
async fn visit<F>(ctx: Arc<CrawlContext<F>>, id: PageId, depth: i64, _guard: TaskGuard)
where
    F: Fetcher + 'static,
{
    // Depth is checked first: an exhausted page is never marked visited
    if depth <= 0 {
        tracing::trace!("Depth exhausted at {}", id);
        ctx.record(PageOutcome::DepthExhausted { id });
        return;
    }

    if !ctx.visited.try_mark(&id) {
        tracing::debug!("Already visited {}", id);
        ctx.record(PageOutcome::AlreadyVisited { id, depth });
        return;
    }

    let fetched = ctx.fetcher.fetch(&id).await;
    match fetched {
        Ok(page) => {
            tracing::info!("found: {} {:?}", id, page.body);

            for link in &page.links {
                spawn_visit(&ctx, link.clone(), depth - 1);
            }

            ctx.record(PageOutcome::Fetched {
                id,
                depth,
                body: page.body,
                links: page.links,
            });
        }
        Err(error) => {
            tracing::warn!("{}", error);
            ctx.record(PageOutcome::Failed { id, depth, error });
        }
    }
}
