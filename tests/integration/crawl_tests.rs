//! Integration tests for the crawler
//!
//! These tests wrap in-memory fetchers to count, delay and fail fetches, and
//! run full crawls through the public API.

use async_trait::async_trait;
use fanout_crawler::config::parse_config;
use fanout_crawler::output::report_lines;
use fanout_crawler::{
    crawl, CrawlStatistics, Crawler, FakeFetcher, FetchError, FetchOutcome, Fetcher, PageOutcome,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Wraps a fetcher and counts the fetches issued per page
struct CountingFetcher<F> {
    inner: F,
    calls: Mutex<HashMap<String, usize>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    delay: Duration,
}

impl<F: Fetcher> CountingFetcher<F> {
    fn new(inner: F) -> Self {
        Self::with_delay(inner, Duration::ZERO)
    }

    fn with_delay(inner: F, delay: Duration) -> Self {
        Self {
            inner,
            calls: Mutex::new(HashMap::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            delay,
        }
    }

    fn calls(&self, id: &str) -> usize {
        self.calls.lock().unwrap().get(id).copied().unwrap_or(0)
    }

    fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl<F: Fetcher> Fetcher for CountingFetcher<F> {
    async fn fetch(&self, id: &str) -> FetchOutcome {
        *self.calls.lock().unwrap().entry(id.to_string()).or_insert(0) += 1;

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.inner.fetch(id).await
    }
}

/// Fails every page listed in `broken` with a collaborator-defined error
struct FlakyFetcher {
    inner: FakeFetcher,
    broken: Vec<&'static str>,
}

#[async_trait]
impl Fetcher for FlakyFetcher {
    async fn fetch(&self, id: &str) -> FetchOutcome {
        if self.broken.contains(&id) {
            return Err(FetchError::Unavailable {
                id: id.to_string(),
                reason: "connection reset".to_string(),
            });
        }
        self.inner.fetch(id).await
    }
}

/// Holds back the pages listed in `slow` before delegating
struct SlowPagesFetcher {
    inner: FakeFetcher,
    slow: Vec<&'static str>,
    delay: Duration,
}

#[async_trait]
impl Fetcher for SlowPagesFetcher {
    async fn fetch(&self, id: &str) -> FetchOutcome {
        if self.slow.contains(&id) {
            tokio::time::sleep(self.delay).await;
        }
        self.inner.fetch(id).await
    }
}

fn abc_site() -> FakeFetcher {
    FakeFetcher::new()
        .with_page("A", "Page A", &["B", "C"])
        .with_page("B", "Page B", &["A", "C"])
        .with_page("C", "Page C", &[])
        .with_page("D", "Page D", &["A"])
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_cyclic_graph_fetches_each_page_once() {
    let fetcher = Arc::new(CountingFetcher::new(abc_site()));

    let report = crawl("A", 4, Arc::clone(&fetcher)).await;

    assert_eq!(fetcher.calls("A"), 1);
    assert_eq!(fetcher.calls("B"), 1);
    assert_eq!(fetcher.calls("C"), 1);
    assert_eq!(fetcher.calls("D"), 0);
    assert_eq!(report.fetched_ids(), vec!["A", "B", "C"]);
    assert!(report.failed_ids().is_empty());
}

#[tokio::test]
async fn test_zero_depth_performs_no_fetch() {
    let fetcher = Arc::new(CountingFetcher::new(abc_site()));
    let crawler = Crawler::new(Arc::clone(&fetcher));

    let report = crawler.run("A", 0).await;

    assert_eq!(fetcher.total_calls(), 0);
    assert_eq!(report.tasks_started, 1);
    assert_eq!(crawler.counter().active(), 0);
    assert_eq!(crawler.counter().started(), 1);
}

#[tokio::test]
async fn test_visited_page_is_not_refetched() {
    let fetcher = Arc::new(CountingFetcher::new(abc_site()));
    let crawler = Crawler::new(Arc::clone(&fetcher));
    crawler.visited().try_mark("C");

    let report = crawler.run("C", 4).await;

    assert_eq!(fetcher.total_calls(), 0);
    assert!(matches!(
        report.outcomes.as_slice(),
        [PageOutcome::AlreadyVisited { id, .. }] if id == "C"
    ));
}

#[tokio::test]
async fn test_unknown_seed_reports_single_error() {
    let fetcher = Arc::new(CountingFetcher::new(abc_site()));

    let report = crawl("nowhere", 4, Arc::clone(&fetcher)).await;

    assert_eq!(fetcher.total_calls(), 1);
    assert_eq!(report.tasks_started, 1);
    assert_eq!(
        report.errors().cloned().collect::<Vec<_>>(),
        vec![FetchError::NotFound("nowhere".to_string())]
    );
    assert_eq!(report_lines(&report), vec!["not found: nowhere"]);
}

#[tokio::test]
async fn test_depth_one_fetches_only_seed() {
    let fetcher = Arc::new(CountingFetcher::new(
        FakeFetcher::new()
            .with_page("A", "Page A", &["B"])
            .with_page("B", "Page B", &["C"]),
    ));

    let report = crawl("A", 1, Arc::clone(&fetcher)).await;

    assert_eq!(fetcher.calls("A"), 1);
    assert_eq!(fetcher.calls("B"), 0);
    assert_eq!(fetcher.calls("C"), 0);
    assert_eq!(report.fetched_ids(), vec!["A"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_failed_branch_does_not_stop_siblings() {
    let fetcher = FlakyFetcher {
        inner: FakeFetcher::new()
            .with_page("root", "Root", &["left", "right"])
            .with_page("left", "Left", &["left-child"])
            .with_page("right", "Right", &["right-child"])
            .with_page("left-child", "Left child", &[])
            .with_page("right-child", "Right child", &[]),
        broken: vec!["left"],
    };

    let report = crawl("root", 5, fetcher).await;

    assert_eq!(report.fetched_ids(), vec!["right", "right-child", "root"]);
    assert_eq!(report.failed_ids(), vec!["left"]);
    assert_eq!(report.fetch_count("left-child"), 0);
    assert_eq!(
        report.errors().map(|e| e.to_string()).collect::<Vec<_>>(),
        vec!["unavailable: left: connection reset"]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_siblings_fetch_concurrently() {
    let mut site = FakeFetcher::new();
    let children: Vec<String> = (0..8).map(|i| format!("child-{}", i)).collect();
    let child_refs: Vec<&str> = children.iter().map(String::as_str).collect();
    site = site.with_page("hub", "Hub", &child_refs);
    for child in &child_refs {
        site = site.with_page(child, "Leaf", &[]);
    }

    let fetcher = Arc::new(CountingFetcher::with_delay(site, Duration::from_millis(50)));

    let report = tokio::time::timeout(
        Duration::from_secs(10),
        crawl("hub", 2, Arc::clone(&fetcher)),
    )
    .await
    .expect("crawl did not finish");

    assert_eq!(report.fetched_ids().len(), 9);
    assert_eq!(report.tasks_started, 9);
    assert!(
        fetcher.max_in_flight.load(Ordering::SeqCst) > 1,
        "sibling fetches never overlapped"
    );
    assert!(report.peak_active > 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_dense_cycle_terminates() {
    // Every page links to every page, itself included
    let ids: Vec<String> = (0..12).map(|i| format!("p{}", i)).collect();
    let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
    let mut site = FakeFetcher::new();
    for id in &refs {
        site = site.with_page(id, "Dense", &refs);
    }
    let fetcher = Arc::new(CountingFetcher::new(site));

    let report = tokio::time::timeout(
        Duration::from_secs(10),
        crawl("p0", 6, Arc::clone(&fetcher)),
    )
    .await
    .expect("crawl did not finish");

    assert_eq!(report.fetched_ids().len(), 12);
    for id in &refs {
        assert_eq!(fetcher.calls(id), 1, "{} fetched more than once", id);
    }

    let stats = CrawlStatistics::from_report(&report);
    assert_eq!(stats.pages_fetched, 12);
    assert_eq!(stats.total_links, 144);
    assert_eq!(stats.tasks_started, report.tasks_started as u64);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_crawl_from_config() {
    let config = parse_config(
        r#"
[crawler]
seed = "https://golang.org/"
max-depth = 4

[[page]]
id = "https://golang.org/"
body = "The Go Programming Language"
links = ["https://golang.org/pkg/", "https://golang.org/cmd/"]

[[page]]
id = "https://golang.org/pkg/"
body = "Packages"
links = ["https://golang.org/"]
"#,
    )
    .expect("valid config");

    let fetcher = FakeFetcher::from_config(&config);
    let report = crawl(&config.crawler.seed, config.crawler.max_depth, fetcher).await;

    let mut lines = report_lines(&report);
    lines.sort();
    assert_eq!(
        lines,
        vec![
            "found: https://golang.org/ \"The Go Programming Language\"",
            "found: https://golang.org/pkg/ \"Packages\"",
            "not found: https://golang.org/cmd/",
        ]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_depth_exhausted_page_is_fetched_through_shorter_path() {
    // root -> long -> mid -> target reaches target with no depth left;
    // root -> short -> target reaches it with one hop to spare, later
    let fetcher = SlowPagesFetcher {
        inner: FakeFetcher::new()
            .with_page("root", "Root", &["long", "short"])
            .with_page("long", "Long", &["mid"])
            .with_page("mid", "Mid", &["target"])
            .with_page("short", "Short", &["target"])
            .with_page("target", "Target", &[]),
        slow: vec!["short"],
        delay: Duration::from_millis(100),
    };
    let crawler = Crawler::new(fetcher);

    let report = crawler.run("root", 3).await;

    let exhausted_at = report
        .outcomes
        .iter()
        .position(|o| matches!(o, PageOutcome::DepthExhausted { id } if id == "target"))
        .expect("target was never reached at depth 0");
    let fetched_at = report
        .outcomes
        .iter()
        .position(|o| matches!(o, PageOutcome::Fetched { id, depth: 1, .. } if id == "target"))
        .expect("target was never fetched through the short path");

    assert!(exhausted_at < fetched_at);
    assert_eq!(report.fetch_count("target"), 1);
    assert_eq!(
        report.fetched_ids(),
        vec!["long", "mid", "root", "short", "target"]
    );
    assert!(crawler.visited().contains("target"));
}
