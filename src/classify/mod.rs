//! Result classification for aggregated email sets
//!
//! At the end of a crawl job the aggregated addresses are tiered by intent
//! and only the first non-empty tier is returned:
//! 1. Career (recruiting, HR, talent)
//! 2. Contact (general inboxes)
//! 3. All (whatever was found)
//! 4. None (nothing was found)

use crate::extract::EmailAddress;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Keywords marking a recruiting or HR mailbox
pub const CAREER_KEYWORDS: &[&str] = &[
    "career", "job", "recruit", "hr", "human", "talent", "hiring",
];

/// Keywords marking a general contact mailbox
pub const CONTACT_KEYWORDS: &[&str] = &["contact", "info", "hello", "support", "help"];

/// Priority class of the final email selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Addresses whose local part or domain mentions careers/recruiting
    Career,
    /// Addresses whose local part or domain mentions general contact
    Contact,
    /// Every address found, because no keyword tier matched
    All,
    /// Nothing was found
    None,
}

impl Tier {
    /// Returns the lowercase name of this tier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Career => "career",
            Self::Contact => "contact",
            Self::All => "all",
            Self::None => "none",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies an aggregated email set and returns the selected tier
///
/// Keywords are matched as substrings of the local part or the domain.
/// The returned sequence is in the set's (lexicographic) order.
///
/// # Examples
///
/// ```
/// use contact_harvest::classify::{classify, Tier};
/// use contact_harvest::extract::extract_emails;
///
/// let emails = extract_emails("jobs@acme.com info@acme.com");
/// let (tier, selected) = classify(&emails);
/// assert_eq!(tier, Tier::Career);
/// assert_eq!(selected, vec!["jobs@acme.com"]);
/// ```
pub fn classify(emails: &BTreeSet<EmailAddress>) -> (Tier, Vec<EmailAddress>) {
    if emails.is_empty() {
        return (Tier::None, Vec::new());
    }

    let career = matching(emails, CAREER_KEYWORDS);
    if !career.is_empty() {
        return (Tier::Career, career);
    }

    let contact = matching(emails, CONTACT_KEYWORDS);
    if !contact.is_empty() {
        return (Tier::Contact, contact);
    }

    (Tier::All, emails.iter().cloned().collect())
}

fn matching(emails: &BTreeSet<EmailAddress>, keywords: &[&str]) -> Vec<EmailAddress> {
    emails
        .iter()
        .filter(|email| {
            keywords.iter().any(|keyword| {
                email.local_part().contains(keyword) || email.domain().contains(keyword)
            })
        })
        .cloned()
        .collect()
}
