//! Contact-Harvest main entry point
//!
//! This is the command-line interface for the Contact-Harvest crawler.

use anyhow::{bail, Context};
use clap::Parser;
use contact_harvest::config::{load_config_with_hash, Config};
use contact_harvest::crawler::{harvest, jobs_from_config, CrawlJob};
use contact_harvest::output::{print_statistics, write_outputs, BatchReport};
use contact_harvest::url::canonicalize_url;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Contact-Harvest: find the careers and contact addresses of companies
///
/// Contact-Harvest crawls each configured company website from its seed URL,
/// visits the pages most likely to list contact addresses first, and
/// writes the addresses it finds to a JSON results file.
#[derive(Parser, Debug)]
#[command(name = "contact-harvest")]
#[command(version = "1.0.0")]
#[command(about = "Finds careers and contact email addresses on company websites", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,

    /// Additional seed URL to crawl (repeatable)
    #[arg(long = "url", value_name = "URL")]
    urls: Vec<String>,

    /// Override the per-site page budget
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    page_budget: Option<u32>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if let Some(page_budget) = cli.page_budget {
        config.crawler.page_budget = page_budget;
    }

    let jobs = build_jobs(&config, &cli.urls)?;
    if jobs.is_empty() {
        bail!("No companies to crawl: add [[company]] entries or pass --url");
    }

    if cli.dry_run {
        handle_dry_run(&config, &jobs);
    } else {
        handle_harvest(&config, jobs, config_hash, cli.quiet).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("contact_harvest=info,warn"),
            1 => EnvFilter::new("contact_harvest=debug,info"),
            2 => EnvFilter::new("contact_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Combines configured companies with ad-hoc `--url` seeds
fn build_jobs(config: &Config, urls: &[String]) -> anyhow::Result<Vec<CrawlJob>> {
    let mut jobs = jobs_from_config(config);

    for url in urls {
        canonicalize_url(url).with_context(|| format!("Invalid --url value '{}'", url))?;
        jobs.push(CrawlJob::new(url.clone()).with_page_budget(config.crawler.page_budget));
    }

    Ok(jobs)
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config, jobs: &[CrawlJob]) {
    println!("=== Contact-Harvest Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Page budget: {}", config.crawler.page_budget);
    println!("  Early stop after: {} pages", config.crawler.early_stop_pages);
    println!("  Request timeout: {}s", config.crawler.request_timeout);
    println!("  Courtesy delay: {}ms", config.crawler.courtesy_delay);
    println!(
        "  Max concurrent sites: {}",
        config.crawler.max_concurrent_sites
    );
    match config.crawler.job_deadline {
        Some(seconds) => println!("  Job deadline: {}s", seconds),
        None => println!("  Job deadline: none"),
    }

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.value);

    println!("\nOutput:");
    println!("  Results: {}", config.output.results_path);
    if let Some(summary_path) = &config.output.summary_path {
        println!("  Summary: {}", summary_path);
    }

    println!("\nCompanies ({}):", jobs.len());
    for job in jobs {
        println!("  - {} ({})", job.display_name(), job.seed_url);
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would crawl {} sites", jobs.len());
}

/// Handles the main harvest operation
async fn handle_harvest(
    config: &Config,
    jobs: Vec<CrawlJob>,
    config_hash: String,
    quiet: bool,
) -> anyhow::Result<()> {
    tracing::info!("Harvesting {} sites", jobs.len());

    let results = harvest(config, jobs).await.context("Harvest failed")?;
    let report = BatchReport::new(&results, Some(config_hash));

    write_outputs(&report, &config.output).context("Failed to write results")?;

    if !quiet {
        print_statistics(&report);
    }

    tracing::info!(
        "Harvest completed: {} of {} companies with emails",
        report.companies_with_emails,
        report.total_companies_scraped
    );

    Ok(())
}
