use crate::extract::email::{extract_emails, EmailAddress};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

/// `local [at] domain [dot] tld`, with `(at)`/`(dot)` accepted interchangeably.
/// The domain group may itself contain literal dots.
static OBFUSCATED_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)([a-z0-9._-]+)\s*(?:\[at\]|\(at\))\s*([a-z0-9.-]+)\s*(?:\[dot\]|\(dot\))\s*([a-z]{2,})",
    )
    .expect("obfuscation pattern is a valid regex")
});

/// Rewrites human-obfuscated addresses into canonical `local@domain.tld` form
///
/// Text that does not match the obfuscated shape is left untouched, so the
/// output can be handed straight to [`extract_emails`].
///
/// # Examples
///
/// ```
/// use contact_harvest::extract::decode_obfuscated;
///
/// assert_eq!(decode_obfuscated("jane [at] acme [dot] com"), "jane@acme.com");
/// assert_eq!(decode_obfuscated("Sales (AT) mail.acme (DOT) io"), "Sales@mail.acme.io");
/// ```
pub fn decode_obfuscated(raw: &str) -> String {
    OBFUSCATED_PATTERN
        .replace_all(raw, "${1}@${2}.${3}")
        .into_owned()
}

/// Finds obfuscated addresses and validates each reconstruction
///
/// Every reconstructed address goes through the same validation as any
/// other candidate; decoding never bypasses it.
pub fn extract_obfuscated(raw: &str) -> BTreeSet<EmailAddress> {
    OBFUSCATED_PATTERN
        .captures_iter(raw)
        .flat_map(|caps| {
            let candidate = format!(
                "{}@{}.{}",
                caps[1].trim(),
                caps[2].trim(),
                caps[3].trim()
            );
            extract_emails(&candidate)
        })
        .collect()
}
