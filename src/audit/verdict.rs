use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// The quality signal evaluated for every site in a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum IssueType {
    /// Homepage took longer than the threshold to load
    SlowPageLoad,
    /// Title or meta description is missing
    MissingSeoMetaTags,
    /// A sample of internal links contains failing targets
    BrokenLinks,
}

impl IssueType {
    pub const ALL: [IssueType; 3] = [
        IssueType::SlowPageLoad,
        IssueType::MissingSeoMetaTags,
        IssueType::BrokenLinks,
    ];

    /// Human-readable label, as shown in the issue picker
    pub fn label(&self) -> &'static str {
        match self {
            Self::SlowPageLoad => "Slow Page Load",
            Self::MissingSeoMetaTags => "Missing SEO Meta Tags",
            Self::BrokenLinks => "Broken Links/404s",
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for IssueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|issue| issue.label() == s)
            .ok_or_else(|| format!("Unknown issue type: '{}'", s))
    }
}

/// Outcome of auditing one site for one issue type
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuditVerdict {
    /// Whether the selected issue was found
    pub issue_detected: bool,

    /// Explanation of the result, or `Error: <message>` on failure
    pub details: String,

    /// Email addresses found in the page's visible text
    pub emails: BTreeSet<String>,
}

impl AuditVerdict {
    /// Verdict for a site that could not be audited
    pub fn failed(error: &impl fmt::Display) -> Self {
        Self {
            issue_detected: false,
            details: format!("Error: {}", error),
            emails: BTreeSet::new(),
        }
    }
}

/// Result of a single check, before emails are attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub issue_detected: bool,
    pub details: String,
}

impl CheckOutcome {
    pub(crate) fn into_verdict(self, emails: BTreeSet<String>) -> AuditVerdict {
        AuditVerdict {
            issue_detected: self.issue_detected,
            details: self.details,
            emails,
        }
    }
}
