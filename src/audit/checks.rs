//! The three site checks
//!
//! Everything here is synchronous and free of I/O. The link check is split
//! in two: [`sample_internal_links`] picks the links to probe and
//! [`summarize_broken_links`] turns the probe results into an outcome.

use crate::audit::verdict::CheckOutcome;
use crate::crawler::{AttrFilter, HtmlDocument};
use crate::url::resolve_and_classify;

/// Flags a page whose load time is strictly above the threshold
///
/// # Examples
///
/// ```
/// use lead_audit::audit::check_load_time;
///
/// let slow = check_load_time(3.01, 3.0);
/// assert!(slow.issue_detected);
/// assert_eq!(slow.details, "Load time: 3.01s");
///
/// let fast = check_load_time(2.99, 3.0);
/// assert!(!fast.issue_detected);
/// assert_eq!(fast.details, "Load time: 2.99s (OK)");
/// ```
pub fn check_load_time(elapsed_seconds: f64, threshold_seconds: f64) -> CheckOutcome {
    let issue_detected = elapsed_seconds > threshold_seconds;
    let details = if issue_detected {
        format!("Load time: {:.2}s", elapsed_seconds)
    } else {
        format!("Load time: {:.2}s (OK)", elapsed_seconds)
    };

    CheckOutcome {
        issue_detected,
        details,
    }
}

/// Checks for a non-empty `<title>` and meta description
///
/// Any text counts, whitespace included; only an absent or empty value is
/// missing.
/// The description is read from the first `meta[name=description]`; only
/// when there is none does `meta[property=og:description]` count instead.
pub fn check_seo_tags(doc: &HtmlDocument) -> CheckOutcome {
    let has_title = doc
        .find_first("title", &AttrFilter::Any)
        .is_some_and(|title| !title.text().is_empty());

    let description = doc
        .find_first("meta", &AttrFilter::Equals("name", "description"))
        .or_else(|| doc.find_first("meta", &AttrFilter::Equals("property", "og:description")));
    let has_description = description
        .and_then(|meta| meta.attr("content"))
        .is_some_and(|content| !content.is_empty());

    let mut missing = Vec::new();
    if !has_title {
        missing.push("Missing Title");
    }
    if !has_description {
        missing.push("Missing Meta Description");
    }

    if missing.is_empty() {
        CheckOutcome {
            issue_detected: false,
            details: "SEO Tags Present".to_string(),
        }
    } else {
        CheckOutcome {
            issue_detected: true,
            details: missing.join(", "),
        }
    }
}

/// Picks the internal HTTP(S) links to probe, in document order
///
/// Every `<a href>` is resolved against `base_url`; only internal links with
/// an HTTP(S) scheme qualify, and scanning stops after `limit` of them.
/// Duplicates are kept, so a link repeated on the page is probed each time.
pub fn sample_internal_links(doc: &HtmlDocument, base_url: &str, limit: usize) -> Vec<String> {
    doc.find_all("a", &AttrFilter::Present("href"))
        .into_iter()
        .filter_map(|anchor| anchor.attr("href"))
        .map(|href| resolve_and_classify(base_url, href))
        .filter(|link| link.is_internal && link.is_http())
        .take(limit)
        .map(|link| link.absolute_url)
        .collect()
}

/// Builds the link-check outcome from the number of broken links found
pub fn summarize_broken_links(broken: usize) -> CheckOutcome {
    if broken > 0 {
        CheckOutcome {
            issue_detected: true,
            details: format!("Found {} broken links", broken),
        }
    } else {
        CheckOutcome {
            issue_detected: false,
            details: "No broken links found in sample".to_string(),
        }
    }
}

/// Returns true if a link-check status counts as broken
pub fn is_broken_status(status_code: u16) -> bool {
    status_code >= 400
}
