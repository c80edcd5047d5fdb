use crate::config::types::{Config, CrawlerConfig, PageEntry};
use crate::ConfigError;
use std::collections::HashSet;

/// Largest depth bound accepted in either direction
const MAX_DEPTH_MAGNITUDE: i64 = 1000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_pages(&config.pages)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.seed.is_empty() {
        return Err(ConfigError::Validation("seed cannot be empty".to_string()));
    }

    // Non-positive depths are legal and crawl nothing
    if config.max_depth.abs() > MAX_DEPTH_MAGNITUDE {
        return Err(ConfigError::Validation(format!(
            "max_depth must be between -{} and {}, got {}",
            MAX_DEPTH_MAGNITUDE, MAX_DEPTH_MAGNITUDE, config.max_depth
        )));
    }

    Ok(())
}

/// Validates the page table
///
/// Links may point at identifiers with no entry; those surface as
/// "not found" fetch errors during the crawl.
fn validate_pages(pages: &[PageEntry]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for page in pages {
        if page.id.is_empty() {
            return Err(ConfigError::Validation(
                "page id cannot be empty".to_string(),
            ));
        }

        if !seen.insert(page.id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate page id '{}'",
                page.id
            )));
        }

        if page.links.iter().any(|link| link.is_empty()) {
            return Err(ConfigError::Validation(format!(
                "page '{}' has an empty link",
                page.id
            )));
        }
    }

    Ok(())
}
