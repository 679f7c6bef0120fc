//! URL handling module for Lead-Audit
//!
//! This module resolves hrefs found on an audited page and classifies them as
//! internal (same site) or external.

mod domain;

pub use domain::extract_netloc;

use url::Url;

/// A link resolved against the page it was found on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    /// The absolute form of the href
    pub absolute_url: String,

    /// Whether the link stays on the audited site
    pub is_internal: bool,
}

impl ResolvedLink {
    /// Returns true if the resolved link uses an HTTP(S) scheme
    pub fn is_http(&self) -> bool {
        self.absolute_url.starts_with("http://") || self.absolute_url.starts_with("https://")
    }
}

/// Resolves an href against a base URL and classifies it
///
/// Resolution follows standard relative-URL rules (scheme-relative,
/// path-relative, query and fragment references). If either the base or the
/// href cannot be parsed the href is kept as written.
///
/// A link is internal when its network location equals the base's, or when it
/// has no network location at all (fragments, `mailto:`, malformed links).
/// Ambiguous links are therefore kept rather than excluded.
///
/// # Examples
///
/// ```
/// use lead_audit::url::resolve_and_classify;
///
/// let link = resolve_and_classify("http://a.com/x", "/y");
/// assert_eq!(link.absolute_url, "http://a.com/y");
/// assert!(link.is_internal);
///
/// let link = resolve_and_classify("http://a.com/x", "http://b.com/z");
/// assert!(!link.is_internal);
/// ```
pub fn resolve_and_classify(base_url: &str, href: &str) -> ResolvedLink {
    let base = Url::parse(base_url).ok();

    let absolute_url = base
        .as_ref()
        .and_then(|base| base.join(href.trim()).ok())
        .map(|joined| joined.to_string())
        .unwrap_or_else(|| href.to_string());

    let base_netloc = base.as_ref().map(domain::netloc_of).unwrap_or_default();
    let link_netloc = extract_netloc(&absolute_url);

    ResolvedLink {
        is_internal: link_netloc.is_empty() || link_netloc == base_netloc,
        absolute_url,
    }
}
