//! URL helpers for CheckLink
//!
//! Links are compared and deduplicated with fragments stripped, and the
//! crawler only expands pages whose host matches the language version's
//! base host.

use crate::UrlError;
use url::Url;

/// Parses a URL string and validates that it is usable as a crawl target
///
/// Only HTTP(S) URLs with a host are accepted.
pub fn parse_target(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}

/// Strips the fragment identifier from a URL
///
/// `https://example.com/page#section` and `https://example.com/page` point
/// at the same document, so the visited set works on fragment-free URLs.
pub fn strip_fragment(mut url: Url) -> Url {
    url.set_fragment(None);
    url
}

/// Returns true if both URLs have the same host
///
/// Hosts are already lowercased by the `url` crate, so a plain comparison
/// suffices. URLs without a host never match anything.
pub fn same_host(a: &Url, b: &Url) -> bool {
    match (a.host_str(), b.host_str()) {
        (Some(ha), Some(hb)) => ha == hb,
        _ => false,
    }
}
