//! Output handler traits and types
//!
//! This module defines the trait interface for output handlers and the
//! result row that every handler receives.

use crate::audit::AuditVerdict;
use crate::discovery::SiteCandidate;
use crate::output::stats::RunSummary;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to format output: {0}")]
    Format(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Column headers, in export order
pub const RESULT_COLUMNS: [&str; 7] = [
    "Business Name",
    "Website URL",
    "Issue Detected",
    "Details",
    "Email Found",
    "Niche",
    "Region",
];

/// One audited site, as shown in the table and exported to CSV
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub business_name: String,
    pub website_url: String,
    /// Rendered as `"Yes"` or `"No"`
    pub issue_detected: bool,
    pub details: String,
    /// Unique emails joined with `", "`
    pub email_found: String,
    pub niche: String,
    pub region: String,
}

impl ResultRow {
    /// Builds the row for a candidate from its verdict
    pub fn from_verdict(
        candidate: &SiteCandidate,
        verdict: &AuditVerdict,
        niche: &str,
        region: &str,
    ) -> Self {
        Self {
            business_name: candidate.name.clone(),
            website_url: candidate.url.clone(),
            issue_detected: verdict.issue_detected,
            details: verdict.details.clone(),
            email_found: verdict
                .emails
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            niche: niche.to_string(),
            region: region.to_string(),
        }
    }

    /// Field values in [`RESULT_COLUMNS`] order
    pub fn fields(&self) -> [&str; 7] {
        [
            self.business_name.as_str(),
            self.website_url.as_str(),
            if self.issue_detected { "Yes" } else { "No" },
            self.details.as_str(),
            self.email_found.as_str(),
            self.niche.as_str(),
            self.region.as_str(),
        ]
    }
}

/// Trait for output handlers
///
/// Handlers are driven by the coordinator in a fixed order: one
/// `on_discovery`, then `on_progress` and `record_rows` for each candidate,
/// then `finalize`.
pub trait OutputHandler {
    /// Called once the candidate list is known
    ///
    /// # Arguments
    ///
    /// * `query` - The search query
    /// * `candidates` - Sites about to be audited
    /// * `used_fallback` - Whether placeholder sites replaced the search results
    fn on_discovery(
        &mut self,
        query: &str,
        candidates: &[SiteCandidate],
        used_fallback: bool,
    ) -> OutputResult<()>;

    /// Called before each site is audited (`index` is 1-based)
    fn on_progress(&mut self, index: usize, total: usize, url: &str) -> OutputResult<()>;

    /// Called after every audit with all rows produced so far
    fn record_rows(&mut self, rows: &[ResultRow]) -> OutputResult<()>;

    /// Called once the run has finished
    fn finalize(&mut self, summary: &RunSummary) -> OutputResult<()>;
}
