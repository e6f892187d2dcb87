use url::Url;

/// Returns the network location (`host` or `host:port`) of a URL
///
/// The port is only included when the URL spells it out and it differs from
/// the scheme's default, so `https://example.com:443/` and
/// `https://example.com/` share a location. Hosts are already lowercased by
/// the URL parser.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use metaharvest::url::network_location;
///
/// let url = Url::parse("https://Example.COM/path").unwrap();
/// assert_eq!(network_location(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(network_location(&url), Some("127.0.0.1:8080".to_string()));
/// ```
pub fn network_location(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host.to_string()),
    }
}

/// Returns true when both URLs have the same network location
///
/// Comparison is exact: `blog.example.com` and `example.com` are different
/// locations.
pub fn same_location(a: &Url, b: &Url) -> bool {
    match (network_location(a), network_location(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
