//! Site auditing
//!
//! A [`SiteAuditor`] fetches one page, harvests the emails in its visible
//! text and evaluates a single [`IssueType`] against it. Auditing never
//! fails from the caller's point of view: every failure is folded into a
//! verdict whose details start with `Error:`.

mod checks;
mod emails;
mod verdict;

pub use checks::{
    check_load_time, check_seo_tags, is_broken_status, sample_internal_links,
    summarize_broken_links,
};
pub use emails::extract_emails;
pub use verdict::{AuditVerdict, CheckOutcome, IssueType};

use crate::config::AuditConfig;
use crate::crawler::{Fetcher, HtmlDocument};
use crate::AuditError;

/// Work left after the page has been parsed
enum PendingCheck {
    Done(CheckOutcome),
    ProbeLinks(Vec<String>),
}

/// Audits individual sites for a single issue type
#[derive(Debug, Clone)]
pub struct SiteAuditor {
    fetcher: Fetcher,
    config: AuditConfig,
}

impl SiteAuditor {
    /// Creates an auditor using the given fetcher and thresholds
    pub fn new(fetcher: Fetcher, config: AuditConfig) -> Self {
        Self { fetcher, config }
    }

    /// Audits a site, converting any failure into an error verdict
    pub async fn audit(&self, url: &str, issue: IssueType) -> AuditVerdict {
        match self.try_audit(url, issue).await {
            Ok(verdict) => verdict,
            Err(e) => {
                tracing::warn!("Audit of {} failed: {}", url, e);
                AuditVerdict::failed(&e)
            }
        }
    }

    /// Audits a site, returning the failure reason on error
    ///
    /// # Flow
    ///
    /// 1. Fetch the page once (timed)
    /// 2. Parse it and extract emails from the visible text
    /// 3. Run the check selected by `issue`
    ///
    /// Link probes never fail the audit; an unreachable link counts as broken.
    pub async fn try_audit(&self, url: &str, issue: IssueType) -> Result<AuditVerdict, AuditError> {
        let page = self.fetcher.fetch(url).await?;

        // The parsed document is not Send, so it must be dropped before
        // any link probes are awaited.
        let (emails, pending) = {
            let doc = HtmlDocument::parse(&page.body);
            let emails = extract_emails(&doc.text());

            let pending = match issue {
                IssueType::SlowPageLoad => PendingCheck::Done(check_load_time(
                    page.elapsed_seconds(),
                    self.config.slow_threshold_secs,
                )),
                IssueType::MissingSeoMetaTags => PendingCheck::Done(check_seo_tags(&doc)),
                IssueType::BrokenLinks => PendingCheck::ProbeLinks(sample_internal_links(
                    &doc,
                    url,
                    self.config.max_link_checks,
                )),
            };

            (emails, pending)
        };

        let outcome = match pending {
            PendingCheck::Done(outcome) => outcome,
            PendingCheck::ProbeLinks(links) => {
                let broken = self.count_broken_links(&links).await;
                summarize_broken_links(broken)
            }
        };

        tracing::debug!(
            "Audited {} for '{}': detected={}, {} email(s)",
            url,
            issue,
            outcome.issue_detected,
            emails.len()
        );

        Ok(outcome.into_verdict(emails))
    }

    /// Probes each link in turn and counts the broken ones
    async fn count_broken_links(&self, links: &[String]) -> usize {
        let mut broken = 0;

        for link in links {
            match self.fetcher.check_link(link).await {
                Ok(status) if is_broken_status(status) => {
                    tracing::debug!("Broken link {} ({})", link, status);
                    broken += 1;
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!("Broken link {}: {}", link, e);
                    broken += 1;
                }
            }
        }

        broken
    }
}
