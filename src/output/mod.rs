//! Output module for batch reports
//!
//! This module handles:
//! - Building the batch report from crawl results
//! - Writing the JSON results file
//! - Generating the markdown summary
//! - Printing console statistics

mod json;
mod markdown;
mod report;
pub mod stats;

pub use json::write_json_report;
pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use report::{BatchReport, CompanyEmails, OutputError, OutputResult};
pub use stats::print_statistics;

use crate::config::OutputConfig;
use std::path::Path;

/// Writes every configured output for a batch
///
/// The JSON results file is always written; the markdown summary only when
/// a summary path is configured.
pub fn write_outputs(report: &BatchReport, config: &OutputConfig) -> OutputResult<()> {
    write_json_report(report, Path::new(&config.results_path))?;

    if let Some(summary_path) = &config.summary_path {
        generate_markdown_summary(report, Path::new(summary_path))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_outputs_both_files() {
        let dir = TempDir::new().unwrap();
        let config = OutputConfig {
            results_path: dir.path().join("out.json").to_string_lossy().into_owned(),
            summary_path: Some(dir.path().join("out.md").to_string_lossy().into_owned()),
        };

        write_outputs(&BatchReport::new(&[], None), &config).unwrap();
        assert!(dir.path().join("out.json").exists());
        assert!(dir.path().join("out.md").exists());
    }

    #[test]
    fn test_write_outputs_without_summary() {
        let dir = TempDir::new().unwrap();
        let config = OutputConfig {
            results_path: dir.path().join("out.json").to_string_lossy().into_owned(),
            summary_path: None,
        };

        write_outputs(&BatchReport::new(&[], None), &config).unwrap();
        assert!(dir.path().join("out.json").exists());
        assert!(!dir.path().join("out.md").exists());
    }
}
