//! Lead-Audit: a website lead finder and auditor
//!
//! This crate discovers candidate business websites for a niche/region query,
//! fetches each homepage once, evaluates a single quality signal (load time,
//! SEO metadata or broken internal links) and harvests contact emails.

pub mod audit;
pub mod config;
pub mod crawler;
pub mod discovery;
pub mod output;
pub mod url;

use thiserror::Error;

pub use crawler::{FetchError, LinkCheckError};
pub use discovery::DiscoveryError;
pub use output::OutputError;

/// Main error type for Lead-Audit operations
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("{0}")]
    InvalidInput(String),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Lead-Audit operations
pub type Result<T> = std::result::Result<T, AuditError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use audit::{extract_emails, AuditVerdict, IssueType, SiteAuditor};
pub use config::Config;
pub use crawler::{Coordinator, Fetcher, RunRequest};
pub use discovery::{discover, SiteCandidate};
pub use output::ResultRow;
pub use self::url::{resolve_and_classify, ResolvedLink};
