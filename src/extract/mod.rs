//! Email extraction module
//!
//! This module turns arbitrary text into validated candidate addresses:
//! - `email`: the single validation law every call site goes through
//! - `obfuscation`: rewrites `name [at] domain [dot] tld` style text
//!
//! # Example
//!
//! ```
//! use contact_harvest::extract::{extract_emails, extract_obfuscated};
//!
//! let found = extract_emails("Write to Jobs@Acme.com or noreply@acme.com");
//! assert_eq!(found.len(), 1);
//!
//! let decoded = extract_obfuscated("jane [at] acme [dot] com");
//! assert!(decoded.iter().any(|email| email == "jane@acme.com"));
//! ```

mod email;
mod obfuscation;

pub use email::{extract_emails, EmailAddress};
pub use obfuscation::{decode_obfuscated, extract_obfuscated};
