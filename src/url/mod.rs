//! URL handling module for Contact-Harvest
//!
//! This module provides site scoping (which hosts belong to a crawl job) and
//! URL canonicalization for frontier deduplication.

mod domain;
mod normalize;

// Re-export main functions
pub use domain::{extract_domain, SiteScope};
pub use normalize::canonicalize_url;

pub(crate) use normalize::strip_fragment_and_query;
