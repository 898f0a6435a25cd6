use crate::UrlError;
use url::Url;

/// Canonicalizes a URL for frontier membership checks
///
/// # Canonicalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Accept only HTTP and HTTPS
/// 3. Require a host
/// 4. Remove the fragment (everything after #)
/// 5. Remove the query string
///
/// Host lowercasing and dot-segment removal come from the URL parser.
///
/// # Examples
///
/// ```
/// use contact_harvest::url::canonicalize_url;
///
/// let url = canonicalize_url("https://ACME.com/jobs/?team=eng#open").unwrap();
/// assert_eq!(url.as_str(), "https://acme.com/jobs/");
/// ```
pub fn canonicalize_url(url_str: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingDomain);
    }

    strip_fragment_and_query(&mut url);

    Ok(url)
}

/// Removes the fragment and query components in place
pub(crate) fn strip_fragment_and_query(url: &mut Url) {
    url.set_fragment(None);
    url.set_query(None);
}
