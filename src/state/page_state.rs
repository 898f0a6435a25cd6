/// Page outcome definitions for a single crawl job
///
/// Every URL taken off the frontier ends in exactly one of these outcomes.
/// Only `Processed` pages contribute emails and links.
use serde::Serialize;
use std::fmt;

/// Represents the terminal outcome of visiting a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "status")]
pub enum PageOutcome {
    // ===== Terminal Success States =====
    /// Page was successfully fetched and scanned
    Processed,

    // ===== Terminal Error States =====
    /// Page returned HTTP 404 or 410
    DeadLink,

    /// Page returned another non-success status
    HttpError(u16),

    /// Page could not be reached (timeout, connection refused, DNS failure, TLS error)
    Unreachable,

    /// Page declared a non-text Content-Type
    ContentMismatch,

    /// Page fetch failed for other reasons (body read error, redirect loop, ...)
    Failed,
}

impl PageOutcome {
    /// Returns true if this represents a successful fetch
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Processed)
    }

    /// Returns true if this represents an error state
    pub fn is_error(&self) -> bool {
        !self.is_success()
    }

    /// Returns a stable lowercase label for reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::DeadLink => "dead_link",
            Self::HttpError(_) => "http_error",
            Self::Unreachable => "unreachable",
            Self::ContentMismatch => "content_mismatch",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for PageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HttpError(status) => write!(f, "http_error ({})", status),
            other => f.write_str(other.label()),
        }
    }
}

/// A single visited URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageVisit {
    /// The canonical URL that was requested
    pub url: String,

    /// What happened when it was fetched
    pub outcome: PageOutcome,

    /// Number of valid addresses found on this page (zero unless processed)
    pub emails_found: usize,
}
