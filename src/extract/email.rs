use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Shortest address accepted (e.g. `a@b.co`)
const MIN_EMAIL_LEN: usize = 6;

/// RFC 5321 path limit
const MAX_EMAIL_LEN: usize = 254;

/// RFC 5321 local-part limit
const MAX_LOCAL_LEN: usize = 64;

/// Fragments that mark template, vendor, or schema addresses rather than
/// business contacts. Matched anywhere in the address.
const EXCLUDED_FRAGMENTS: &[&str] = &[
    "example.com",
    "test.com",
    "domain.com",
    "email.com",
    "yourcompany",
    "company.com",
    "youremail",
    "placeholder",
    "sampleemail",
    "wixpress.com",
    "sentry.io",
    "w3.org",
    "schema.org",
    "xmlns.com",
    "xmlsoap.org",
];

/// Local-part prefixes of unattended mailboxes
const NO_REPLY_PREFIXES: &[&str] = &["noreply", "no-reply", "donotreply"];

/// Asset filenames such as `logo@2x.png` match the address grammar
const ASSET_SUFFIXES: &[&str] = &[
    ".png", ".jpg", ".jpeg", ".gif", ".svg", ".webp", ".css", ".js",
];

/// Full-token pattern: dot-atom local part, dot-separated domain labels.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?",
    )
    .expect("email pattern is a valid regex")
});

/// Second-pass structural check applied to already-lowercased candidates.
static STRICT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9][a-z0-9._-]*@[a-z0-9][a-z0-9.-]*\.[a-z]{2,}$")
        .expect("strict email pattern is a valid regex")
});

/// A normalized (lowercase, trimmed) candidate address that passed validation
///
/// Validity is structural only; nothing here checks that the mailbox exists.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Normalizes and validates a single candidate string
    ///
    /// # Validation Rules
    ///
    /// Applied in order after lowercasing and trimming:
    /// 1. Total length within 6..=254
    /// 2. Local part (before the first `@`) within 1..=64
    /// 3. Domain has at least two labels and a TLD of 2+ characters
    /// 4. No placeholder/vendor fragment anywhere in the address, and no
    ///    image/stylesheet/script filename suffix
    /// 5. Local part does not start with a no-reply prefix
    /// 6. Matches the strict structural pattern
    ///
    /// # Returns
    ///
    /// * `Some(EmailAddress)` - The candidate survived every rule
    /// * `None` - The candidate was rejected
    ///
    /// # Examples
    ///
    /// ```
    /// use contact_harvest::extract::EmailAddress;
    ///
    /// assert_eq!(EmailAddress::parse(" Jobs@Acme.COM ").unwrap().as_str(), "jobs@acme.com");
    /// assert!(EmailAddress::parse("noreply@acme.com").is_none());
    /// assert!(EmailAddress::parse("user@example.com").is_none());
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        let email = raw.trim().to_lowercase();

        if email.len() < MIN_EMAIL_LEN || email.len() > MAX_EMAIL_LEN {
            return None;
        }

        let (local, domain) = email.split_once('@')?;
        if local.is_empty() || local.len() > MAX_LOCAL_LEN {
            return None;
        }

        let labels: Vec<&str> = domain.split('.').collect();
        if labels.len() < 2 || labels.last().map_or(true, |tld| tld.len() < 2) {
            return None;
        }

        if EXCLUDED_FRAGMENTS
            .iter()
            .any(|fragment| email.contains(fragment))
        {
            return None;
        }

        if ASSET_SUFFIXES.iter().any(|suffix| email.ends_with(suffix)) {
            return None;
        }

        if NO_REPLY_PREFIXES
            .iter()
            .any(|prefix| local.starts_with(prefix))
        {
            return None;
        }

        if !STRICT_PATTERN.is_match(&email) {
            return None;
        }

        Some(Self(email))
    }

    /// Returns the address as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the part before the `@`
    pub fn local_part(&self) -> &str {
        self.0.split_once('@').map(|(local, _)| local).unwrap_or("")
    }

    /// Returns the part after the `@`
    pub fn domain(&self) -> &str {
        self.0.split_once('@').map(|(_, domain)| domain).unwrap_or("")
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for EmailAddress {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for EmailAddress {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Extracts every valid candidate address from a block of text
///
/// Pure function: the same text always yields the same set. The set is
/// ordered lexicographically.
///
/// # Arguments
///
/// * `text` - Any text: visible page text, raw HTML, attribute values, script bodies
///
/// # Returns
///
/// The set of addresses that survived [`EmailAddress::parse`]
pub fn extract_emails(text: &str) -> BTreeSet<EmailAddress> {
    EMAIL_PATTERN
        .find_iter(text)
        .filter_map(|m| EmailAddress::parse(m.as_str()))
        .collect()
}
