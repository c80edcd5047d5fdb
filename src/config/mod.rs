//! Configuration module for Fanout-Crawler
//!
//! This module handles loading, parsing, and validating TOML crawl descriptions:
//! the seed page, the depth bound and the page table served by the in-memory
//! fetcher.
//!
//! # Example
//!
//! ```no_run
//! use fanout_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("site.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, PageEntry, BUILTIN_MAX_DEPTH, BUILTIN_SEED};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
