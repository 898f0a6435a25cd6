//! State module for tracking crawl progress
//!
//! This module records what happened to each page a crawl job visited.
//!
//! # Components
//!
//! - `PageOutcome`: the terminal result of a single fetch (processed, dead link, unreachable, ...)
//! - `PageVisit`: one visited URL with its outcome and email yield

mod page_state;

// Re-export main types
pub use page_state::{PageOutcome, PageVisit};
