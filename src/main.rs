//! Fanout-Crawler main entry point
//!
//! This is the command-line interface for the Fanout-Crawler.

use clap::Parser;
use fanout_crawler::config::{load_config_with_hash, Config};
use fanout_crawler::output::{print_report, print_statistics, CrawlStatistics};
use fanout_crawler::{crawl, FakeFetcher};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Fanout-Crawler: a concurrent link crawler
///
/// Crawls an in-memory site from its seed page, one task per discovered link,
/// and prints every page it found. Without a configuration file the built-in
/// demo site rooted at https://golang.org/ is crawled to depth 4.
#[derive(Parser, Debug)]
#[command(name = "fanout-crawler")]
#[command(version = "1.0.0")]
#[command(about = "A concurrent link crawler", long_about = None)]
struct Cli {
    /// Path to a TOML site description (seed, depth and page table)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Print crawl statistics after the page list
    #[arg(long)]
    stats: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => {
            tracing::info!("No configuration given, using the built-in site");
            Config::builtin()
        }
    };

    let fetcher = FakeFetcher::from_config(&config);
    tracing::info!("Site has {} pages", fetcher.len());

    let report = crawl(&config.crawler.seed, config.crawler.max_depth, fetcher).await;

    print_report(&report);

    if cli.stats {
        println!();
        print_statistics(&CrawlStatistics::from_report(&report));
    }

    Ok(())
}

/// Picks the tracing filter directive for a verbosity level
///
/// Fetch errors are already part of the printed report, so the crate's own
/// `warn` lines only show up from `-v` on.
fn log_filter(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        // Only show errors
        return "error";
    }

    match verbose {
        0 => "fanout_crawler=error,warn",
        1 => "fanout_crawler=info,warn",
        2 => "fanout_crawler=debug,info",
        _ => "trace",
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_filter(verbose, quiet)))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}
