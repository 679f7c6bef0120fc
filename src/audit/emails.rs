use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")
        .expect("email pattern is a valid regex")
});

/// Scans text for email-like substrings
///
/// Matches are returned exactly as written (no case folding) and
/// deduplicated. The set is ordered, which keeps exports stable between runs.
///
/// # Examples
///
/// ```
/// use lead_audit::extract_emails;
///
/// let emails = extract_emails("Write to info@example.com or info@example.com");
/// assert_eq!(emails.len(), 1);
/// assert!(extract_emails("").is_empty());
/// ```
pub fn extract_emails(text: &str) -> BTreeSet<String> {
    EMAIL_REGEX
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}
