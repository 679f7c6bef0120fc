use url::Url;

/// Extracts the network location (`host[:port]`) of a URL string
///
/// The port is only included when it differs from the scheme default.
/// Malformed URLs, and URLs without a host (`mailto:`, `javascript:`, ...),
/// yield an empty string instead of an error.
///
/// # Examples
///
/// ```
/// use lead_audit::url::extract_netloc;
///
/// assert_eq!(extract_netloc("https://example.com/path"), "example.com");
/// assert_eq!(extract_netloc("http://example.com:8080/"), "example.com:8080");
/// assert_eq!(extract_netloc("mailto:info@example.com"), "");
/// assert_eq!(extract_netloc("http://[broken"), "");
/// ```
pub fn extract_netloc(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => netloc_of(&parsed),
        Err(_) => String::new(),
    }
}

/// Network location of an already parsed URL
pub(crate) fn netloc_of(url: &Url) -> String {
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{}:{}", host, port),
        (Some(host), None) => host.to_string(),
        (None, _) => String::new(),
    }
}
