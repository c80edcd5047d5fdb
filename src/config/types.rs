use crate::PageId;
use serde::Deserialize;

/// Seed page used by the built-in demo site
pub const BUILTIN_SEED: &str = "https://golang.org/";

/// Depth used by the built-in demo crawl
pub const BUILTIN_MAX_DEPTH: i64 = 4;

/// Main configuration structure for a crawl
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,

    /// The page table served by the in-memory fetcher
    #[serde(default, rename = "page")]
    pub pages: Vec<PageEntry>,
}

/// Where the crawl starts and how deep it goes
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Identifier of the first page to fetch
    pub seed: PageId,

    /// Remaining link hops; zero or less fetches nothing
    #[serde(rename = "max-depth")]
    pub max_depth: i64,
}

/// One canned page of the in-memory site
#[derive(Debug, Clone, Deserialize)]
pub struct PageEntry {
    /// Identifier the page is served under
    pub id: PageId,

    /// Page content
    #[serde(default)]
    pub body: String,

    /// Outbound links, in page order
    #[serde(default)]
    pub links: Vec<PageId>,
}

impl PageEntry {
    fn new(id: &str, body: &str, links: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            body: body.to_string(),
            links: links.iter().map(|l| l.to_string()).collect(),
        }
    }
}

impl Config {
    /// The demo site crawled when no configuration file is given
    ///
    /// `https://golang.org/cmd/` is linked from two pages but has no entry,
    /// so the crawl always reports one missing page.
    pub fn builtin() -> Self {
        Self {
            crawler: CrawlerConfig {
                seed: BUILTIN_SEED.to_string(),
                max_depth: BUILTIN_MAX_DEPTH,
            },
            pages: vec![
                PageEntry::new(
                    "https://golang.org/",
                    "The Go Programming Language",
                    &["https://golang.org/pkg/", "https://golang.org/cmd/"],
                ),
                PageEntry::new(
                    "https://golang.org/pkg/",
                    "Packages",
                    &[
                        "https://golang.org/",
                        "https://golang.org/cmd/",
                        "https://golang.org/pkg/fmt/",
                        "https://golang.org/pkg/os/",
                    ],
                ),
                PageEntry::new(
                    "https://golang.org/pkg/fmt/",
                    "Package fmt",
                    &["https://golang.org/", "https://golang.org/pkg/"],
                ),
                PageEntry::new(
                    "https://golang.org/pkg/os/",
                    "Package os",
                    &["https://golang.org/", "https://golang.org/pkg/"],
                ),
            ],
        }
    }
}
