//! Console statistics for a finished batch

use crate::classify::Tier;
use crate::output::report::BatchReport;
use std::collections::BTreeMap;

const RULE: &str = "======================================================================";

/// Counts companies per selected tier
pub fn tier_breakdown(report: &BatchReport) -> BTreeMap<&'static str, usize> {
    let mut counts = BTreeMap::new();
    for company in &report.companies {
        *counts.entry(company.tier.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `report` - The batch report to display
pub fn print_statistics(report: &BatchReport) {
    println!("\n{}", RULE);
    println!("EMAIL SCRAPING RESULTS");
    println!("{}", RULE);
    println!("Total Companies Scraped: {}", report.total_companies_scraped);
    println!("Companies with Emails Found: {}", report.companies_with_emails);
    println!("Total Emails Found: {}", report.total_emails_found);
    println!();

    println!("Companies by Tier:");
    for (tier, count) in tier_breakdown(report) {
        println!("  {}: {}", tier, count);
    }

    println!("\n{}", RULE);
    println!("COMPANY EMAILS");
    println!("{}", RULE);
    for company in &report.companies {
        if company.tier == Tier::None {
            println!("\n{}: No emails found", company.company_name);
            continue;
        }

        println!("\n{} ({}):", company.company_name, company.tier);
        for email in &company.emails {
            println!("   - {}", email);
        }
    }

    println!("\n{}", RULE);
    println!("ALL EMAILS LIST");
    println!("{}", RULE);
    for (i, email) in report.all_emails.iter().enumerate() {
        println!("{}. {}", i + 1, email);
    }

    println!(
        "\nHit Rate: {:.1}% ({} / {} companies with emails)",
        report.hit_rate(),
        report.companies_with_emails,
        report.total_companies_scraped
    );
}
