//! Batch report types
//!
//! This module defines the report written after a batch of site crawls and
//! the errors that can occur while persisting it.

use crate::classify::Tier;
use crate::crawler::CrawlResult;
use crate::extract::EmailAddress;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Selected addresses of one company
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyEmails {
    pub company_name: String,
    pub url: String,
    pub emails: Vec<EmailAddress>,
    pub tier: Tier,
    pub pages_scraped: u32,
}

impl From<&CrawlResult> for CompanyEmails {
    fn from(result: &CrawlResult) -> Self {
        Self {
            company_name: result.company_name.clone(),
            url: result.seed_url.clone(),
            emails: result.final_emails.clone(),
            tier: result.tier,
            pages_scraped: result.pages_scraped,
        }
    }
}

/// Summary of a whole batch, as persisted to the results file
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub generated_at: DateTime<Utc>,

    /// SHA-256 of the config file, if the batch came from one
    pub config_hash: Option<String>,

    pub total_companies_scraped: usize,
    pub companies_with_emails: usize,

    /// Length of `all_emails`
    pub total_emails_found: usize,

    /// One entry per company, in input order
    pub companies: Vec<CompanyEmails>,

    /// Every selected address across companies, first appearance wins
    pub all_emails: Vec<EmailAddress>,
}

impl BatchReport {
    /// Builds a report from batch results
    pub fn new(results: &[CrawlResult], config_hash: Option<String>) -> Self {
        let companies: Vec<CompanyEmails> = results.iter().map(CompanyEmails::from).collect();

        let mut seen = HashSet::new();
        let all_emails: Vec<EmailAddress> = companies
            .iter()
            .flat_map(|company| company.emails.iter())
            .filter(|email| seen.insert(email.as_str().to_string()))
            .cloned()
            .collect();

        Self {
            generated_at: Utc::now(),
            config_hash,
            total_companies_scraped: companies.len(),
            companies_with_emails: companies.iter().filter(|c| !c.emails.is_empty()).count(),
            total_emails_found: all_emails.len(),
            companies,
            all_emails,
        }
    }

    /// Percentage of companies with at least one address
    pub fn hit_rate(&self) -> f64 {
        if self.total_companies_scraped == 0 {
            0.0
        } else {
            (self.companies_with_emails as f64 / self.total_companies_scraped as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, emails: &[&str], tier: Tier) -> CrawlResult {
        CrawlResult {
            company_name: name.to_string(),
            seed_url: format!("https://{}.com/", name.to_lowercase()),
            final_emails: emails
                .iter()
                .map(|e| EmailAddress::parse(e).unwrap())
                .collect(),
            pages_scraped: 3,
            pages_attempted: 4,
            tier,
            pages: Vec::new(),
        }
    }

    #[test]
    fn test_report_totals() {
        let results = vec![
            result("Acme", &["jobs@acme.com"], Tier::Career),
            result("Globex", &[], Tier::None),
            result("Initech", &["info@initech.com", "help@initech.com"], Tier::Contact),
        ];

        let report = BatchReport::new(&results, Some("abc123".to_string()));
        assert_eq!(report.total_companies_scraped, 3);
        assert_eq!(report.companies_with_emails, 2);
        assert_eq!(report.total_emails_found, 3);
        assert_eq!(report.companies[1].company_name, "Globex");
        assert_eq!(report.companies[0].url, "https://acme.com/");
        assert!((report.hit_rate() - 66.666).abs() < 0.01);
    }

    #[test]
    fn test_all_emails_deduplicated_in_order() {
        let results = vec![
            result("Acme", &["jobs@acme.com", "hr@acme.com"], Tier::Career),
            result("Acme2", &["jobs@acme.com"], Tier::Career),
        ];

        let report = BatchReport::new(&results, None);
        let all: Vec<_> = report.all_emails.iter().map(EmailAddress::as_str).collect();
        assert_eq!(all, vec!["jobs@acme.com", "hr@acme.com"]);
        assert_eq!(report.total_emails_found, 2);
    }

    #[test]
    fn test_empty_report() {
        let report = BatchReport::new(&[], None);
        assert_eq!(report.total_companies_scraped, 0);
        assert_eq!(report.hit_rate(), 0.0);
        assert!(report.all_emails.is_empty());
    }

    #[test]
    fn test_report_serialization() {
        let report = BatchReport::new(&[result("Acme", &["jobs@acme.com"], Tier::Career)], None);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["companies"][0]["tier"], "career");
        assert_eq!(json["companies"][0]["emails"][0], "jobs@acme.com");
        assert_eq!(json["all_emails"][0], "jobs@acme.com");
        assert!(json["config_hash"].is_null());
    }
}
