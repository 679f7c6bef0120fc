//! Candidate discovery
//!
//! Turns a free-text query into a bounded list of sites to audit. A failed
//! or empty search never ends the run: a fixed set of placeholder sites is
//! returned instead so the rest of the pipeline can still be exercised.

mod duckduckgo;

pub use duckduckgo::DuckDuckGoHtml;

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by a search provider
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Search request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Search returned HTTP {0}")]
    Status(u16),

    #[error("Could not read search results: {0}")]
    Parse(String),
}

/// A raw search result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub href: String,
    pub body: String,
}

/// A business website awaiting audit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteCandidate {
    pub name: String,
    pub url: String,
}

impl SiteCandidate {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// The candidates found for a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    pub candidates: Vec<SiteCandidate>,

    /// True when the search failed or was empty and placeholders were used
    pub used_fallback: bool,
}

/// A text search backend
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &str;

    /// Runs a search and returns at most `max_results` hits, in rank order
    async fn search(&self, query: &str, max_results: usize)
        -> Result<Vec<SearchHit>, DiscoveryError>;
}

/// Sites audited when the search yields nothing
pub fn placeholder_candidates() -> Vec<SiteCandidate> {
    vec![
        SiteCandidate::new("Example Business A", "http://example.com"),
        SiteCandidate::new("Example Business B", "http://example.org"),
        SiteCandidate::new("Google", "https://www.google.com"),
        SiteCandidate::new("Python", "https://www.python.org"),
    ]
}

/// Discovers candidate sites for a query
///
/// Hits without an href are skipped and the list is capped at
/// `max_results`. Provider errors and empty result sets both fall back to
/// [`placeholder_candidates`].
pub async fn discover(
    provider: &dyn SearchProvider,
    query: &str,
    max_results: usize,
) -> Discovery {
    discover_with_fallback(provider, query, max_results, &placeholder_candidates()).await
}

/// Like [`discover`], but falls back to the given sites instead
pub async fn discover_with_fallback(
    provider: &dyn SearchProvider,
    query: &str,
    max_results: usize,
    fallback: &[SiteCandidate],
) -> Discovery {
    let hits = match provider.search(query, max_results).await {
        Ok(hits) => hits,
        Err(e) => {
            tracing::error!("Error during search with {}: {}", provider.name(), e);
            Vec::new()
        }
    };

    let candidates: Vec<SiteCandidate> = hits
        .into_iter()
        .filter(|hit| !hit.href.is_empty())
        .take(max_results)
        .map(|hit| SiteCandidate::new(hit.title, hit.href))
        .collect();

    if candidates.is_empty() {
        tracing::warn!(
            "Search returned no results for '{}'; using placeholder data",
            query
        );
        return Discovery {
            candidates: fallback.to_vec(),
            used_fallback: true,
        };
    }

    tracing::info!("Found {} websites for '{}'", candidates.len(), query);
    Discovery {
        candidates,
        used_fallback: false,
    }
}
