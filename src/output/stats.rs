//! Run statistics
//!
//! Aggregates the rows of a finished run into a summary and prints it.

use crate::output::traits::ResultRow;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

/// Summary of a completed audit run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Search query the candidates came from
    pub query: String,

    /// Issue type label
    pub issue: String,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,

    /// Number of sites audited (one row each)
    pub sites_audited: usize,

    /// Rows with `Issue Detected = Yes`
    pub issues_detected: usize,

    /// Rows whose audit failed
    pub audit_errors: usize,

    /// Rows with at least one email
    pub sites_with_emails: usize,

    /// Unique emails across all rows
    pub unique_emails: usize,

    /// Whether placeholder sites were audited instead of search results
    pub used_fallback: bool,
}

impl RunSummary {
    /// Builds a summary from the rows of a run
    pub fn from_rows(
        query: &str,
        issue: &str,
        rows: &[ResultRow],
        used_fallback: bool,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        let unique: BTreeSet<&str> = rows
            .iter()
            .flat_map(|row| row.email_found.split(", "))
            .filter(|email| !email.is_empty())
            .collect();

        Self {
            query: query.to_string(),
            issue: issue.to_string(),
            started_at,
            finished_at,
            sites_audited: rows.len(),
            issues_detected: rows.iter().filter(|r| r.issue_detected).count(),
            audit_errors: rows.iter().filter(|r| r.details.starts_with("Error:")).count(),
            sites_with_emails: rows.iter().filter(|r| !r.email_found.is_empty()).count(),
            unique_emails: unique.len(),
            used_fallback,
        }
    }

    /// Run duration in seconds
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }

    /// Share of audited sites with the issue, as a percentage
    pub fn issue_rate(&self) -> f64 {
        if self.sites_audited == 0 {
            return 0.0;
        }
        (self.issues_detected as f64 / self.sites_audited as f64) * 100.0
    }
}

/// Formats a run summary for the terminal
pub fn format_summary(summary: &RunSummary) -> String {
    let mut out = String::new();

    out.push_str("=== Audit Summary ===\n\n");
    out.push_str(&format!("Query: {}\n", summary.query));
    out.push_str(&format!("Issue: {}\n", summary.issue));
    if summary.used_fallback {
        out.push_str("Candidates: placeholder data (search returned no results)\n");
    }
    out.push_str(&format!(
        "Started: {}\n",
        summary.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(&format!(
        "Duration: {} seconds\n\n",
        summary.duration_seconds()
    ));

    out.push_str(&format!("  Sites audited: {}\n", summary.sites_audited));
    out.push_str(&format!(
        "  Issues detected: {} ({:.1}%)\n",
        summary.issues_detected,
        summary.issue_rate()
    ));
    out.push_str(&format!("  Audit errors: {}\n", summary.audit_errors));
    out.push_str(&format!(
        "  Sites with emails: {}\n",
        summary.sites_with_emails
    ));
    out.push_str(&format!("  Unique emails: {}\n", summary.unique_emails));

    out
}
