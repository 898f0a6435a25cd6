use std::fmt;
use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// If the URL has no host (which shouldn't happen for valid HTTP(S) URLs), it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use contact_harvest::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// The set of URLs a crawl job may visit: one host, plus its port when one
/// is written out
///
/// Built from the seed URL. The scheme does not matter, so `http://acme.com/`
/// and `https://acme.com/` are the same site. Subdomains and `www.` variants
/// are distinct sites; a link to `blog.acme.com` from `acme.com` is out of scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SiteScope {
    host: String,
    port: Option<u16>,
}

impl SiteScope {
    /// Creates the scope of the given seed URL
    ///
    /// Returns None if the URL has no host.
    pub fn from_url(seed: &Url) -> Option<Self> {
        Some(Self {
            host: extract_domain(seed)?,
            port: seed.port(),
        })
    }

    /// Returns true if the URL belongs to this site
    pub fn contains(&self, url: &Url) -> bool {
        extract_domain(url).as_deref() == Some(self.host.as_str())
            && url.port() == self.port
    }

    /// Returns the lowercase host of this site
    pub fn host(&self) -> &str {
        &self.host
    }
}

impl fmt::Display for SiteScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.host())
    }
}
