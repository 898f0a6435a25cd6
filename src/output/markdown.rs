//! Markdown summary generation
//!
//! This module generates a human-readable markdown summary of a batch,
//! including totals, per-company addresses and the combined address list.

use crate::output::report::{BatchReport, OutputResult};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Generates a markdown summary file from a batch report
///
/// # Arguments
///
/// * `report` - The batch report
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote markdown summary
/// * `Err(OutputError)` - Failed to write summary
pub fn generate_markdown_summary(report: &BatchReport, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_summary(report);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    tracing::info!("Saved summary to {}", output_path.display());
    Ok(())
}

/// Formats a batch report as markdown
pub fn format_markdown_summary(report: &BatchReport) -> String {
    let mut md = String::new();

    md.push_str("# Contact Harvest Summary\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!(
        "- **Generated**: {}\n",
        report.generated_at.to_rfc3339()
    ));
    if let Some(hash) = &report.config_hash {
        md.push_str(&format!("- **Config Hash**: {}\n", hash));
    }
    md.push('\n');

    // Overall statistics
    md.push_str("## Overall Statistics\n\n");
    md.push_str(&format!(
        "- **Companies Scraped**: {}\n",
        report.total_companies_scraped
    ));
    md.push_str(&format!(
        "- **Companies with Emails**: {}\n",
        report.companies_with_emails
    ));
    md.push_str(&format!(
        "- **Total Emails Found**: {}\n",
        report.total_emails_found
    ));
    md.push_str(&format!("- **Hit Rate**: {:.2}%\n\n", report.hit_rate()));

    // Per-company table
    if !report.companies.is_empty() {
        md.push_str("## Companies\n\n");
        md.push_str("| Company | URL | Tier | Pages | Emails |\n");
        md.push_str("|---------|-----|------|-------|--------|\n");

        for company in &report.companies {
            let emails = if company.emails.is_empty() {
                "-".to_string()
            } else {
                company
                    .emails
                    .iter()
                    .map(|e| e.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            };

            md.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                escape_cell(&company.company_name),
                company.url,
                company.tier,
                company.pages_scraped,
                emails
            ));
        }
        md.push('\n');
    }

    if !report.all_emails.is_empty() {
        md.push_str("## All Emails\n\n");
        for (i, email) in report.all_emails.iter().enumerate() {
            md.push_str(&format!("{}. {}\n", i + 1, email));
        }
        md.push('\n');
    }

    md
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
