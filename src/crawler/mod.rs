//! Crawler module for site crawling and signal collection
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching and response classification
//! - Email and link collection from fetched pages
//! - Keyword-prioritized frontier management
//! - Single-site crawl coordination and the multi-company runner

mod batch;
mod coordinator;
mod fetcher;
mod frontier;
mod parser;

pub use batch::run_batch;
pub use coordinator::{run_job, Coordinator, CrawlJob, CrawlResult, DEFAULT_PAGE_BUDGET};
pub use fetcher::{build_http_client, fetch_url, FetchResult};
pub use frontier::{Frontier, Priority, PRIORITY_KEYWORDS};
pub use parser::{collect_signals, PageSignals};

use crate::config::Config;
use crate::HarvestError;

/// Builds one crawl job per configured company
///
/// Every job gets the configured page budget.
pub fn jobs_from_config(config: &Config) -> Vec<CrawlJob> {
    config
        .company
        .iter()
        .map(|entry| {
            let job = CrawlJob::new(entry.url.clone()).with_page_budget(config.crawler.page_budget);
            match &entry.name {
                Some(name) => job.with_company(name.clone()),
                None => job,
            }
        })
        .collect()
}

/// Runs a complete batch
///
/// This is the main entry point for a harvest. It will:
/// 1. Build the HTTP client from the user agent and timeout settings
/// 2. Crawl every job, one site at a time or host-parallel
/// 3. Return one result per job, in input order
///
/// # Arguments
///
/// * `config` - The loaded configuration
/// * `jobs` - The sites to crawl
///
/// # Returns
///
/// * `Ok(Vec<CrawlResult>)` - One result per job
/// * `Err(HarvestError)` - The HTTP client could not be built
pub async fn harvest(config: &Config, jobs: Vec<CrawlJob>) -> Result<Vec<CrawlResult>, HarvestError> {
    let client = build_http_client(&config.user_agent, config.crawler.request_timeout())?;
    Ok(run_batch(&client, jobs, &config.crawler).await)
}
