//! State module for tracking crawl progress
//!
//! This module provides the state shared by every task of one crawl.
//!
//! # Components
//!
//! - `VisitedSet`: Pages already claimed by a task, checked and marked atomically
//! - `ActiveTaskCounter`: In-flight task count used to detect crawl completion
//! - `TaskGuard`: RAII registration of one task in the counter

mod counter;
mod visited;

// Re-export main types
pub use counter::{ActiveTaskCounter, TaskGuard};
pub use visited::VisitedSet;
