use crate::config::types::{CompanyEntry, Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Upper bound on hosts crawled at once
const MAX_CONCURRENT_SITES: u32 = 32;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    validate_companies(&config.company)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.page_budget < 1 {
        return Err(ConfigError::Validation(format!(
            "page_budget must be >= 1, got {}",
            config.page_budget
        )));
    }

    if config.early_stop_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "early_stop_pages must be >= 1, got {}",
            config.early_stop_pages
        )));
    }

    if config.request_timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout must be >= 1s, got {}s",
            config.request_timeout
        )));
    }

    if config.max_concurrent_sites < 1 || config.max_concurrent_sites > MAX_CONCURRENT_SITES {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_sites must be between 1 and {}, got {}",
            MAX_CONCURRENT_SITES, config.max_concurrent_sites
        )));
    }

    if config.job_deadline == Some(0) {
        return Err(ConfigError::Validation(
            "job_deadline must be >= 1s when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.value.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent value cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.results_path.is_empty() {
        return Err(ConfigError::Validation(
            "results_path cannot be empty".to_string(),
        ));
    }

    if config.summary_path.as_deref() == Some("") {
        return Err(ConfigError::Validation(
            "summary_path cannot be empty when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates company entries
fn validate_companies(companies: &[CompanyEntry]) -> Result<(), ConfigError> {
    for entry in companies {
        if let Some(name) = &entry.name {
            if name.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "Company name for '{}' cannot be empty",
                    entry.url
                )));
            }
        }

        validate_seed_url(&entry.url)?;
    }

    Ok(())
}

/// Validates a seed URL: must parse, use HTTP(S), and carry a host
fn validate_seed_url(seed: &str) -> Result<(), ConfigError> {
    let url = Url::parse(seed)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", seed, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "Seed URL '{}' must use HTTP or HTTPS scheme",
            seed
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "Seed URL '{}' has no host",
            seed
        )));
    }

    Ok(())
}
