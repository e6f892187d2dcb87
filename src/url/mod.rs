//! URL handling module for Metaharvest
//!
//! This module provides seed URL parsing, network location extraction used by
//! the crawler's domain restriction, and link resolution.

mod location;
mod resolve;

use crate::UrlError;
use url::Url;

// Re-export main functions
pub use location::{network_location, same_location};
pub use resolve::resolve_link;

/// Parses a URL string and checks that it can be fetched over HTTP(S)
///
/// # Arguments
///
/// * `url_str` - The URL string to parse
///
/// # Returns
///
/// * `Ok(Url)` - A URL with an `http` or `https` scheme and a host
/// * `Err(UrlError)` - The string is not a fetchable URL
///
/// # Examples
///
/// ```
/// use metaharvest::url::parse_http_url;
///
/// assert!(parse_http_url("https://data.example.org/set").is_ok());
/// assert!(parse_http_url("ftp://data.example.org/set").is_err());
/// assert!(parse_http_url("not a url").is_err());
/// ```
pub fn parse_http_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}
