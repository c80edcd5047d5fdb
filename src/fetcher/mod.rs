//! Page fetching
//!
//! The crawler only talks to pages through the [`Fetcher`] trait. The crate
//! ships one implementation, [`FakeFetcher`], which serves a canned page table
//! from memory.

mod fake;
mod traits;

pub use fake::FakeFetcher;
pub use traits::{FetchResult, Fetcher};
