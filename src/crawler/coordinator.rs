//! Run coordinator - main audit orchestration logic
//!
//! This module contains the main run loop, which:
//! - Builds the search query and discovers candidate sites
//! - Audits each candidate in turn, pausing between sites
//! - Accumulates one result row per candidate, in discovery order
//! - Feeds progress and the growing table to an output handler

use crate::audit::{IssueType, SiteAuditor};
use crate::config::Config;
use crate::crawler::Fetcher;
use crate::discovery::{
    discover_with_fallback, placeholder_candidates, DuckDuckGoHtml, SearchProvider, SiteCandidate,
};
use crate::output::{OutputHandler, OutputResult, ResultRow, RunSummary};
use crate::AuditError;
use chrono::Utc;
use std::time::Duration;

/// The user's input for a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub niche: String,
    pub region: String,
    pub issue: IssueType,
}

impl RunRequest {
    /// Validates the user's input
    ///
    /// Niche and region are both required; blank values are rejected.
    pub fn new(
        niche: impl Into<String>,
        region: impl Into<String>,
        issue: IssueType,
    ) -> Result<Self, AuditError> {
        let niche = niche.into().trim().to_string();
        let region = region.into().trim().to_string();

        if niche.is_empty() || region.is_empty() {
            return Err(AuditError::InvalidInput(
                "Please enter both Niche and Region.".to_string(),
            ));
        }

        Ok(Self {
            niche,
            region,
            issue,
        })
    }

    /// The free-text search query for this request
    pub fn query(&self) -> String {
        format!("{} in {}", self.niche, self.region)
    }
}

/// Everything a run produced
#[derive(Debug, Clone)]
pub struct RunReport {
    pub rows: Vec<ResultRow>,
    pub summary: RunSummary,
}

/// Main run coordinator structure
pub struct Coordinator {
    auditor: SiteAuditor,
    provider: Box<dyn SearchProvider>,
    fallback: Vec<SiteCandidate>,
    max_results: usize,
    politeness_delay: Duration,
}

impl Coordinator {
    /// Creates a coordinator backed by DuckDuckGo search
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(AuditError)` - The HTTP clients could not be built
    pub fn new(config: &Config) -> Result<Self, AuditError> {
        let provider = DuckDuckGoHtml::new(&config.http, &config.discovery)?;
        Self::with_provider(config, Box::new(provider))
    }

    /// Creates a coordinator with a custom search provider
    pub fn with_provider(
        config: &Config,
        provider: Box<dyn SearchProvider>,
    ) -> Result<Self, AuditError> {
        let fetcher = Fetcher::new(&config.http)?;

        Ok(Self {
            auditor: SiteAuditor::new(fetcher, config.audit.clone()),
            provider,
            fallback: placeholder_candidates(),
            max_results: config.discovery.max_results,
            politeness_delay: config.run.politeness_delay(),
        })
    }

    /// Replaces the sites audited when the search yields nothing
    pub fn with_fallback_candidates(mut self, fallback: Vec<SiteCandidate>) -> Self {
        self.fallback = fallback;
        self
    }

    /// Runs discovery and audits every candidate
    ///
    /// The run always completes: search failures fall back to placeholder
    /// sites, audit failures become error rows, and output handler failures
    /// are logged and ignored.
    pub async fn run(&self, request: &RunRequest, output: &mut dyn OutputHandler) -> RunReport {
        let started_at = Utc::now();
        let query = request.query();
        tracing::info!("Searching for: {}", query);

        let discovery = discover_with_fallback(
            self.provider.as_ref(),
            &query,
            self.max_results,
            &self.fallback,
        )
        .await;
        let total = discovery.candidates.len();
        report(output.on_discovery(&query, &discovery.candidates, discovery.used_fallback));

        let mut rows = Vec::with_capacity(total);

        for (i, candidate) in discovery.candidates.iter().enumerate() {
            if i > 0 && !self.politeness_delay.is_zero() {
                tokio::time::sleep(self.politeness_delay).await;
            }

            tracing::info!("Auditing ({}/{}): {}", i + 1, total, candidate.url);
            report(output.on_progress(i + 1, total, &candidate.url));

            let verdict = self.auditor.audit(&candidate.url, request.issue).await;
            rows.push(ResultRow::from_verdict(
                candidate,
                &verdict,
                &request.niche,
                &request.region,
            ));

            report(output.record_rows(&rows));
        }

        let summary = RunSummary::from_rows(
            &query,
            request.issue.label(),
            &rows,
            discovery.used_fallback,
            started_at,
            Utc::now(),
        );
        tracing::info!(
            "Audit complete: {} sites, {} with issues, {} errors",
            summary.sites_audited,
            summary.issues_detected,
            summary.audit_errors
        );
        report(output.finalize(&summary));

        RunReport { rows, summary }
    }
}

fn report(result: OutputResult<()>) {
    if let Err(e) = result {
        tracing::warn!("Output handler error: {}", e);
    }
}
