//! Multi-company runner
//!
//! Runs one crawl job per company and returns results in input order.
//! Jobs for the same host never overlap, and consecutive jobs on one
//! sequence are separated by the courtesy delay.

use crate::config::CrawlerConfig;
use crate::crawler::coordinator::{run_job, CrawlJob, CrawlResult};
use crate::url::SiteScope;
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use url::Url;

/// Crawls every job and returns one result per job, in input order
///
/// With `max_concurrent_sites == 1` the jobs run strictly one after another.
/// Otherwise jobs are grouped by seed host; each group runs sequentially
/// and at most `max_concurrent_sites` groups are in flight at once.
pub async fn run_batch(
    client: &Client,
    jobs: Vec<CrawlJob>,
    config: &CrawlerConfig,
) -> Vec<CrawlResult> {
    tracing::info!(
        "Starting batch of {} sites ({} at a time)",
        jobs.len(),
        config.max_concurrent_sites.max(1)
    );

    if config.max_concurrent_sites <= 1 {
        return run_sequence(client, &jobs, config).await;
    }

    let total = jobs.len();
    let groups = group_by_host(jobs);
    let semaphore = Arc::new(Semaphore::new(config.max_concurrent_sites as usize));
    let config = Arc::new(config.clone());

    let mut handles = Vec::with_capacity(groups.len());
    for group in groups {
        let client = client.clone();
        let config = Arc::clone(&config);
        let semaphore = Arc::clone(&semaphore);
        let (indices, jobs): (Vec<usize>, Vec<CrawlJob>) = group.into_iter().unzip();
        let fallback = jobs.clone();

        let handle = tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await.ok();
            run_sequence(&client, &jobs, &config).await
        });

        handles.push((indices, fallback, handle));
    }

    let mut slots: Vec<Option<CrawlResult>> = (0..total).map(|_| None).collect();
    for (indices, jobs, handle) in handles {
        let results = match handle.await {
            Ok(results) => results,
            Err(e) => {
                tracing::error!("Crawl task failed: {}", e);
                jobs.iter().map(CrawlResult::empty).collect()
            }
        };

        for (index, result) in indices.into_iter().zip(results) {
            slots[index] = Some(result);
        }
    }

    slots.into_iter().flatten().collect()
}

/// Runs jobs one after another with the courtesy delay between them
async fn run_sequence(
    client: &Client,
    jobs: &[CrawlJob],
    config: &CrawlerConfig,
) -> Vec<CrawlResult> {
    let mut results = Vec::with_capacity(jobs.len());

    for (i, job) in jobs.iter().enumerate() {
        if i > 0 && !config.courtesy_delay().is_zero() {
            tokio::time::sleep(config.courtesy_delay()).await;
        }

        results.push(run_job(client, job, config).await);
    }

    results
}

/// Groups jobs by seed host, keeping each job's input index
///
/// Groups are ordered by first appearance; unparseable seeds get a group
/// of their own keyed by the raw seed.
fn group_by_host(jobs: Vec<CrawlJob>) -> Vec<Vec<(usize, CrawlJob)>> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Vec<(usize, CrawlJob)>> = Vec::new();

    for (index, job) in jobs.into_iter().enumerate() {
        let key = Url::parse(job.seed_url.trim())
            .ok()
            .and_then(|url| SiteScope::from_url(&url))
            .map(|scope| scope.host().to_string())
            .unwrap_or_else(|| job.seed_url.clone());

        let position = *positions.entry(key).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[position].push((index, job));
    }

    groups
}
