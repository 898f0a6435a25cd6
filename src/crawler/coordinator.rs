//! Crawler coordinator - single-site crawl orchestration
//!
//! This module contains the crawl loop for one company site:
//! - Seeding the frontier from the job's seed URL
//! - Coordinating fetching, signal collection and link enqueueing
//! - Applying the page budget, early-stop rule and optional deadline
//! - Classifying the aggregated addresses into the final result

use crate::classify::{classify, Tier};
use crate::config::CrawlerConfig;
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::collect_signals;
use crate::crawler::{fetch_url, FetchResult};
use crate::extract::EmailAddress;
use crate::state::PageVisit;
use crate::url::{canonicalize_url, SiteScope};
use reqwest::Client;
use serde::Serialize;
use std::collections::BTreeSet;
use tokio::time::Instant;
use url::Url;

/// Default number of pages fetched per site
pub const DEFAULT_PAGE_BUDGET: u32 = 10;

/// One site crawl request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlJob {
    /// Starting URL, typically the company homepage
    pub seed_url: String,

    /// Company name; the seed host is used when absent
    pub company_name: Option<String>,

    /// Maximum number of pages fetched for this site
    pub page_budget: u32,
}

impl CrawlJob {
    /// Creates a job with no company name and the default page budget
    pub fn new(seed_url: impl Into<String>) -> Self {
        Self {
            seed_url: seed_url.into(),
            company_name: None,
            page_budget: DEFAULT_PAGE_BUDGET,
        }
    }

    /// Sets the company name reported in the result
    pub fn with_company(mut self, name: impl Into<String>) -> Self {
        self.company_name = Some(name.into());
        self
    }

    /// Sets the maximum number of pages fetched for this site
    pub fn with_page_budget(mut self, page_budget: u32) -> Self {
        self.page_budget = page_budget;
        self
    }

    /// Returns the company name, falling back to the seed host
    pub fn display_name(&self) -> String {
        if let Some(name) = &self.company_name {
            return name.clone();
        }

        Url::parse(self.seed_url.trim())
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
            .unwrap_or_else(|| self.seed_url.clone())
    }
}

/// Outcome of one site crawl
#[derive(Debug, Clone, Serialize)]
pub struct CrawlResult {
    pub company_name: String,
    pub seed_url: String,

    /// Addresses of the selected tier, deduplicated and sorted
    pub final_emails: Vec<EmailAddress>,

    /// Pages fetched and processed successfully
    pub pages_scraped: u32,

    /// Pages visited, including failed fetches
    pub pages_attempted: u32,

    pub tier: Tier,

    /// Every visited page in visit order
    pub pages: Vec<PageVisit>,
}

impl CrawlResult {
    /// Builds the result for a job that never fetched anything
    pub(crate) fn empty(job: &CrawlJob) -> Self {
        Self {
            company_name: job.display_name(),
            seed_url: job.seed_url.clone(),
            final_emails: Vec::new(),
            pages_scraped: 0,
            pages_attempted: 0,
            tier: Tier::None,
            pages: Vec::new(),
        }
    }

    /// Returns whether any address was selected
    pub fn has_emails(&self) -> bool {
        !self.final_emails.is_empty()
    }
}

/// Why the crawl loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StopReason {
    FrontierExhausted,
    BudgetReached,
    EarlyStop,
    DeadlineExceeded,
}

/// Crawl state of a single job
///
/// Owns the frontier, visited set and aggregated addresses; nothing is
/// shared between jobs.
pub struct Coordinator<'a> {
    client: &'a Client,
    job: &'a CrawlJob,
    config: &'a CrawlerConfig,
    frontier: Frontier,
    emails: BTreeSet<EmailAddress>,
    pages: Vec<PageVisit>,
    pages_scraped: u32,
    pages_attempted: u32,
    deadline: Option<Instant>,
}

impl<'a> Coordinator<'a> {
    /// Creates a coordinator with the seed URL queued
    ///
    /// # Returns
    ///
    /// * `Some(Coordinator)` - Seed URL is a crawlable http(s) URL
    /// * `None` - Seed URL cannot be crawled
    pub fn new(client: &'a Client, job: &'a CrawlJob, config: &'a CrawlerConfig) -> Option<Self> {
        let seed = match canonicalize_url(&job.seed_url) {
            Ok(seed) => seed,
            Err(e) => {
                tracing::warn!("Invalid seed URL {}: {}", job.seed_url, e);
                return None;
            }
        };

        let scope = SiteScope::from_url(&seed)?;
        let mut frontier = Frontier::new(scope);
        frontier.enqueue(seed);

        Some(Self {
            client,
            job,
            config,
            frontier,
            emails: BTreeSet::new(),
            pages: Vec::new(),
            pages_scraped: 0,
            pages_attempted: 0,
            deadline: config.job_deadline().map(|d| Instant::now() + d),
        })
    }

    /// Runs the crawl loop to completion and classifies the result
    pub async fn run(mut self) -> CrawlResult {
        tracing::info!(
            "Crawling {} ({}), budget {} pages",
            self.job.display_name(),
            self.frontier.scope(),
            self.job.page_budget
        );

        let reason = loop {
            if let Some(reason) = self.stop_reason() {
                break reason;
            }

            let Some(url) = self.frontier.select_next() else {
                break StopReason::FrontierExhausted;
            };

            if !self.frontier.mark_visited(&url) {
                continue;
            }

            self.visit(url).await;
        };

        tracing::debug!(
            "Stopped crawling {}: {:?} after {} pages ({} still queued)",
            self.frontier.scope(),
            reason,
            self.frontier.visited_count(),
            self.frontier.len()
        );

        self.finish()
    }

    fn stop_reason(&self) -> Option<StopReason> {
        if self.pages_attempted >= self.job.page_budget {
            return Some(StopReason::BudgetReached);
        }

        if !self.emails.is_empty() && self.pages_attempted >= self.config.early_stop_pages {
            return Some(StopReason::EarlyStop);
        }

        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                tracing::warn!(
                    "Deadline exceeded for {}, keeping partial results",
                    self.frontier.scope()
                );
                return Some(StopReason::DeadlineExceeded);
            }
        }

        None
    }

    /// Fetches one URL and merges its signals
    async fn visit(&mut self, url: Url) {
        self.pages_attempted += 1;
        tracing::debug!("Fetching page {}: {}", self.pages_attempted, url);

        let fetch_result = fetch_url(self.client, &url).await;
        let outcome = fetch_result.outcome();

        let emails_found = match fetch_result {
            FetchResult::Success { body, .. } => {
                let signals = collect_signals(&url, &body, self.frontier.scope());
                let found = signals.emails.len();
                let queued = self.frontier.enqueue_all(signals.links);

                tracing::debug!(
                    "{}: {} addresses, {} new links ({} queued)",
                    url,
                    found,
                    queued,
                    self.frontier.len()
                );

                self.emails.extend(signals.emails);
                self.pages_scraped += 1;
                found
            }

            FetchResult::ContentMismatch { content_type } => {
                tracing::debug!("Skipping {}: content type {}", url, content_type);
                0
            }

            FetchResult::HttpError { status_code, .. } => {
                tracing::warn!("HTTP {} for {}", status_code, url);
                0
            }

            FetchResult::NetworkError { error, .. } => {
                tracing::warn!("Failed to fetch {}: {}", url, error);
                0
            }
        };

        self.pages.push(PageVisit {
            url: url.to_string(),
            outcome,
            emails_found,
        });
    }

    fn finish(self) -> CrawlResult {
        let (tier, final_emails) = classify(&self.emails);

        tracing::info!(
            "Finished {}: {} pages scraped, {} addresses, tier {}",
            self.job.display_name(),
            self.pages_scraped,
            final_emails.len(),
            tier
        );

        CrawlResult {
            company_name: self.job.display_name(),
            seed_url: self.job.seed_url.clone(),
            final_emails,
            pages_scraped: self.pages_scraped,
            pages_attempted: self.pages_attempted,
            tier,
            pages: self.pages,
        }
    }
}

/// Crawls one site and returns its classified addresses
///
/// Never fails: an invalid or unreachable seed yields a result with zero
/// pages scraped and tier `none`.
///
/// # Example
///
/// ```no_run
/// use contact_harvest::config::{CrawlerConfig, UserAgentConfig};
/// use contact_harvest::crawler::{build_http_client, run_job, CrawlJob};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = CrawlerConfig::default();
/// let client = build_http_client(&UserAgentConfig::default(), config.request_timeout())?;
/// let job = CrawlJob::new("https://acme.com/").with_company("Acme");
/// let result = run_job(&client, &job, &config).await;
/// println!("{}: {:?}", result.tier, result.final_emails);
/// # Ok(())
/// # }
/// ```
pub async fn run_job(client: &Client, job: &CrawlJob, config: &CrawlerConfig) -> CrawlResult {
    match Coordinator::new(client, job, config) {
        Some(coordinator) => coordinator.run().await,
        None => CrawlResult::empty(job),
    }
}
