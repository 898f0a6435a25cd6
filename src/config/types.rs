use serde::Deserialize;
use std::time::Duration;

/// Desktop browser identity sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Main configuration structure for Contact-Harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub company: Vec<CompanyEntry>,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of pages visited per site
    #[serde(rename = "page-budget")]
    pub page_budget: u32,

    /// Stop a site early once this many pages were visited and any email was found
    #[serde(rename = "early-stop-pages")]
    pub early_stop_pages: u32,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,

    /// Pause between consecutive sites (milliseconds)
    #[serde(rename = "courtesy-delay")]
    pub courtesy_delay: u64,

    /// Number of distinct hosts crawled at once
    #[serde(rename = "max-concurrent-sites")]
    pub max_concurrent_sites: u32,

    /// Wall-clock limit per site (seconds); partial results are kept on expiry
    #[serde(rename = "job-deadline")]
    pub job_deadline: Option<u64>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            page_budget: 10,
            early_stop_pages: 5,
            request_timeout: 20,
            courtesy_delay: 1000,
            max_concurrent_sites: 1,
            job_deadline: None,
        }
    }
}

impl CrawlerConfig {
    /// Per-request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Courtesy delay as a Duration
    pub fn courtesy_delay(&self) -> Duration {
        Duration::from_millis(self.courtesy_delay)
    }

    /// Per-site deadline as a Duration, if configured
    pub fn job_deadline(&self) -> Option<Duration> {
        self.job_deadline.map(Duration::from_secs)
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Full User-Agent header value
    #[serde(default = "default_user_agent")]
    pub value: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            value: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the JSON results file
    #[serde(rename = "results-path")]
    pub results_path: String,

    /// Path to the markdown summary file
    #[serde(rename = "summary-path", default)]
    pub summary_path: Option<String>,
}

/// One organization to crawl
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyEntry {
    /// Display name; defaults to the seed host
    #[serde(default)]
    pub name: Option<String>,

    /// Seed URL, typically the homepage
    pub url: String,
}
