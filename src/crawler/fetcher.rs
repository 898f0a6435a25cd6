//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with a browser user agent and request timeout
//! - GET requests to fetch page content (redirects followed by the client)
//! - Error classification into page outcomes
//!
//! No failure here is fatal to a crawl job: every non-success result is a
//! zero-signal page for the coordinator.

use crate::config::UserAgentConfig;
use crate::state::PageOutcome;
use reqwest::{header::CONTENT_TYPE, redirect::Policy, Client, StatusCode};
use std::time::Duration;
use url::Url;

/// Maximum redirect hops followed per request
const MAX_REDIRECTS: usize = 10;

/// Upper bound on the TCP/TLS connect phase
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// Page is not text (Content-Type mismatch)
    ContentMismatch {
        /// The actual Content-Type received
        content_type: String,
    },

    /// HTTP error status
    HttpError {
        /// The HTTP status code
        status_code: u16,
        /// The page outcome this error maps to
        outcome: PageOutcome,
    },

    /// Network error (connection refused, timeout, redirect loop, etc.)
    NetworkError {
        /// Error description
        error: String,
        /// The page outcome this error maps to
        outcome: PageOutcome,
    },
}

impl FetchResult {
    /// Returns the page outcome this fetch result maps to
    pub fn outcome(&self) -> PageOutcome {
        match self {
            Self::Success { .. } => PageOutcome::Processed,
            Self::ContentMismatch { .. } => PageOutcome::ContentMismatch,
            Self::HttpError { outcome, .. } | Self::NetworkError { outcome, .. } => *outcome,
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Total per-request timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use contact_harvest::config::UserAgentConfig;
/// use contact_harvest::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(20)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.value.as_str())
        .timeout(timeout)
        .connect_timeout(timeout.min(CONNECT_TIMEOUT))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the response
///
/// # Classification
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx with text content | Success |
/// | 2xx with non-text Content-Type | ContentMismatch |
/// | HTTP 404 / 410 | HttpError → DeadLink |
/// | Other non-2xx | HttpError → HttpError(status) |
/// | Timeout / connection error | NetworkError → Unreachable |
/// | Redirect loop, body read error | NetworkError → Failed |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
pub async fn fetch_url(client: &Client, url: &Url) -> FetchResult {
    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(e) => return classify_transport_error(e),
    };

    let status = response.status();
    let final_url = response.url().to_string();

    if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
            outcome: PageOutcome::DeadLink,
        };
    }

    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
            outcome: PageOutcome::HttpError(status.as_u16()),
        };
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_lowercase();

    if !is_text_content(&content_type) {
        return FetchResult::ContentMismatch { content_type };
    }

    match response.text().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            body,
        },
        Err(e) => FetchResult::NetworkError {
            error: e.to_string(),
            outcome: PageOutcome::Failed,
        },
    }
}

/// Missing Content-Type is treated as text; servers omit it often enough
fn is_text_content(content_type: &str) -> bool {
    content_type.is_empty()
        || content_type.contains("html")
        || content_type.contains("text")
        || content_type.contains("xml")
}

fn classify_transport_error(e: reqwest::Error) -> FetchResult {
    if e.is_timeout() {
        FetchResult::NetworkError {
            error: "Request timeout".to_string(),
            outcome: PageOutcome::Unreachable,
        }
    } else if e.is_connect() {
        FetchResult::NetworkError {
            error: format!("Connection failed: {}", e),
            outcome: PageOutcome::Unreachable,
        }
    } else {
        FetchResult::NetworkError {
            error: e.to_string(),
            outcome: PageOutcome::Failed,
        }
    }
}
