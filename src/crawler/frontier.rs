//! Frontier management for a single crawl job
//!
//! This module handles:
//! - Two-level priority queueing (contact/careers-looking URLs first)
//! - First-discovered ordering within each level
//! - Deduplication against queued and visited URLs
//! - Keeping every queued URL inside the job's site

use crate::url::SiteScope;
use std::collections::{HashSet, VecDeque};
use url::Url;

/// Path/query fragments that suggest a page lists contact or hiring addresses
pub const PRIORITY_KEYWORDS: &[&str] = &[
    "contact",
    "career",
    "job",
    "join",
    "team",
    "about",
    "hiring",
    "recruit",
    "work",
    "opportunity",
    "hr",
    "human-resources",
    "employment",
    "apply",
];

/// Queue level of a frontier URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    /// Path or query contains a relevance keyword
    High,
    /// Everything else
    Low,
}

impl Priority {
    /// Computes the priority of a URL from its path and query
    pub fn of(url: &Url) -> Self {
        let mut haystack = url.path().to_lowercase();
        if let Some(query) = url.query() {
            haystack.push('?');
            haystack.push_str(&query.to_lowercase());
        }

        if PRIORITY_KEYWORDS
            .iter()
            .any(|keyword| haystack.contains(keyword))
        {
            Self::High
        } else {
            Self::Low
        }
    }
}

/// Frontier and visited set of one crawl job
///
/// Invariants:
/// - No URL is both queued and visited
/// - No URL outside the job's site is ever queued
/// - Within a priority level, URLs leave in the order they were first enqueued
#[derive(Debug)]
pub struct Frontier {
    /// The site this frontier is confined to
    scope: SiteScope,

    /// High priority URLs, FIFO
    high: VecDeque<Url>,

    /// Low priority URLs, FIFO
    low: VecDeque<Url>,

    /// URLs currently waiting in either queue
    queued: HashSet<String>,

    /// URLs already handed out and fetched; never shrinks
    visited: HashSet<String>,
}

impl Frontier {
    /// Creates an empty frontier confined to the given site
    pub fn new(scope: SiteScope) -> Self {
        Self {
            scope,
            high: VecDeque::new(),
            low: VecDeque::new(),
            queued: HashSet::new(),
            visited: HashSet::new(),
        }
    }

    /// Adds a URL to the frontier
    ///
    /// # Returns
    ///
    /// * `true` - The URL was queued
    /// * `false` - The URL was out of scope, already queued, or already visited
    pub fn enqueue(&mut self, url: Url) -> bool {
        if !self.scope.contains(&url) {
            tracing::trace!("Dropping out-of-scope URL {}", url);
            return false;
        }

        let key = url.as_str().to_string();
        if self.visited.contains(&key) || self.queued.contains(&key) {
            return false;
        }

        let priority = Priority::of(&url);
        tracing::trace!("Queueing {} ({:?})", url, priority);

        self.queued.insert(key);
        match priority {
            Priority::High => self.high.push_back(url),
            Priority::Low => self.low.push_back(url),
        }

        true
    }

    /// Adds several URLs, returning how many were newly queued
    pub fn enqueue_all<I>(&mut self, urls: I) -> usize
    where
        I: IntoIterator<Item = Url>,
    {
        urls.into_iter().filter(|url| self.enqueue(url.clone())).count()
    }

    /// Takes the next URL to fetch
    ///
    /// High priority URLs always come before low priority ones. Entries that
    /// were marked visited while queued are dropped silently.
    pub fn select_next(&mut self) -> Option<Url> {
        while let Some(url) = self.high.pop_front().or_else(|| self.low.pop_front()) {
            if self.queued.remove(url.as_str()) && !self.visited.contains(url.as_str()) {
                return Some(url);
            }
        }

        None
    }

    /// Records a URL as fetched
    ///
    /// # Returns
    ///
    /// * `true` - The URL was newly marked
    /// * `false` - The URL had already been visited
    pub fn mark_visited(&mut self, url: &Url) -> bool {
        self.queued.remove(url.as_str());
        self.visited.insert(url.as_str().to_string())
    }

    /// Returns the number of URLs waiting to be fetched
    pub fn len(&self) -> usize {
        self.queued.len()
    }

    /// Returns whether no URL is waiting
    pub fn is_empty(&self) -> bool {
        self.queued.is_empty()
    }

    /// Returns the number of URLs fetched so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Returns the site this frontier is confined to
    pub fn scope(&self) -> &SiteScope {
        &self.scope
    }
}
