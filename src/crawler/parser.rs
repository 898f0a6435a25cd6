//! Page signal collection
//!
//! This module scans one fetched page for contact addresses and same-site links.
//! Addresses are gathered from every place sites tend to hide them:
//! - Entity-decoded raw HTML
//! - Visible text
//! - `mailto:` targets and any attribute value containing `@`
//! - Inline scripts (after reversing `@` / `\x40` style escapes)
//! - `<meta content="...">`
//! - Obfuscated `name [at] domain [dot] tld` text
//!
//! All sources go through the same validation in [`crate::extract`].

use crate::extract::{extract_emails, extract_obfuscated, EmailAddress};
use crate::url::{strip_fragment_and_query, SiteScope};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Node, Selector};
use std::collections::{BTreeSet, HashSet};
use url::Url;

static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("anchor selector is valid"));
static ANY_ELEMENT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("*").expect("universal selector is valid"));
static SCRIPT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("script").expect("script selector is valid"));
static META_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("meta[content]").expect("meta selector is valid"));

static ESCAPED_AT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\\u0040|\\x40").expect("escaped @ pattern is valid"));
static ESCAPED_DOT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\\u002e|\\x2e").expect("escaped . pattern is valid"));

/// Elements whose text is never rendered
const HIDDEN_TEXT_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Signals extracted from a single page
#[derive(Debug, Clone, Default)]
pub struct PageSignals {
    /// Every valid address found on the page
    pub emails: BTreeSet<EmailAddress>,

    /// Same-site links, canonicalized, in first-seen document order
    pub links: Vec<Url>,
}

/// Collects email candidates and same-site links from one page
///
/// # Arguments
///
/// * `page_url` - The URL that was requested; relative links resolve against it
/// * `html` - The page body
/// * `scope` - The crawl job's site; links outside it are dropped
///
/// # Example
///
/// ```
/// use contact_harvest::crawler::collect_signals;
/// use contact_harvest::url::SiteScope;
/// use url::Url;
///
/// let page = Url::parse("https://acme.com/").unwrap();
/// let scope = SiteScope::from_url(&page).unwrap();
/// let html = r#"<a href="mailto:jobs@acme.com">Jobs</a> <a href="/team">Team</a>"#;
///
/// let signals = collect_signals(&page, html, &scope);
/// assert!(signals.emails.iter().any(|e| e == "jobs@acme.com"));
/// assert_eq!(signals.links[0].as_str(), "https://acme.com/team");
/// ```
pub fn collect_signals(page_url: &Url, html: &str, scope: &SiteScope) -> PageSignals {
    let mut emails = BTreeSet::new();

    let decoded_html = html_escape::decode_html_entities(html);
    emails.extend(extract_emails(&decoded_html));

    let document = Html::parse_document(html);

    emails.extend(extract_emails(&visible_text(&document)));

    for element in document.select(&ANCHOR_SELECTOR) {
        if let Some(target) = element.value().attr("href").and_then(mailto_target) {
            emails.extend(extract_emails(target));
        }
    }

    // href, data-email, data-contact, title, ... anything carrying an @
    for element in document.select(&ANY_ELEMENT_SELECTOR) {
        for (_, value) in element.value().attrs() {
            if value.contains('@') {
                emails.extend(extract_emails(value));
            }
        }
    }

    for script in document.select(&SCRIPT_SELECTOR) {
        let body: String = script.text().collect();
        let unescaped = unescape_script(&body);
        if unescaped.contains('@') {
            emails.extend(extract_emails(&unescaped));
        }
    }

    for meta in document.select(&META_SELECTOR) {
        if let Some(content) = meta.value().attr("content") {
            if content.contains('@') {
                emails.extend(extract_emails(content));
            }
        }
    }

    emails.extend(extract_obfuscated(&decoded_html));

    let links = extract_links(&document, page_url, scope);

    tracing::trace!(
        "Collected {} emails and {} links from {}",
        emails.len(),
        links.len(),
        page_url
    );

    PageSignals { emails, links }
}

/// Concatenates rendered text nodes, separated by single spaces
fn visible_text(document: &Html) -> String {
    let mut pieces = Vec::new();

    for node in document.root_element().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let hidden = node
            .parent()
            .and_then(|parent| parent.value().as_element().map(|e| e.name()))
            .map_or(false, |name| HIDDEN_TEXT_ELEMENTS.contains(&name));
        if hidden {
            continue;
        }

        let trimmed = text.trim();
        if !trimmed.is_empty() {
            pieces.push(trimmed);
        }
    }

    pieces.join(" ")
}

/// Returns the address part of a `mailto:` href, without its query suffix
fn mailto_target(href: &str) -> Option<&str> {
    let start = href.to_ascii_lowercase().find("mailto:")? + "mailto:".len();
    let target = &href[start..];
    let end = target.find(|c: char| c == '?' || c == '&').unwrap_or(target.len());
    Some(target[..end].trim())
}

/// Reverses the escapes scripts use to hide `@` and `.`
fn unescape_script(body: &str) -> String {
    let body = ESCAPED_AT.replace_all(body, "@");
    ESCAPED_DOT.replace_all(&body, ".").into_owned()
}

/// Extracts same-site links in document order, canonicalized and deduplicated
fn extract_links(document: &Html, page_url: &Url, scope: &SiteScope) -> Vec<Url> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&ANCHOR_SELECTOR) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let Some(url) = resolve_link(href, page_url) else {
            continue;
        };

        if !scope.contains(&url) {
            continue;
        }

        if seen.insert(url.as_str().to_string()) {
            links.push(url);
        }
    }

    links
}

/// Resolves a link href to a canonical absolute URL
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Fragment-only links
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lower = href.to_ascii_lowercase();
    if lower.starts_with("javascript:")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
        || lower.starts_with("data:")
    {
        return None;
    }

    let mut absolute_url = base_url.join(href).ok()?;
    if absolute_url.scheme() != "http" && absolute_url.scheme() != "https" {
        return None;
    }

    strip_fragment_and_query(&mut absolute_url);
    Some(absolute_url)
}
