//! HTTP fetcher implementation
//!
//! This module handles all outbound requests made while auditing a site:
//! - Building the HTTP client with the configured user agent
//! - Timed GET requests for the audited page
//! - HEAD requests used to sample internal links for breakage
//! - Error classification
//!
//! There are no retries. Each call issues exactly one request (plus any
//! redirects the server answers with) and reports the outcome.

use crate::config::HttpConfig;
use reqwest::Client;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Failure to load the audited page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {source}")]
    Connect { url: String, source: reqwest::Error },

    #[error("HTTP error for {url}: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("Failed to read body from {url}: {source}")]
    Body { url: String, source: reqwest::Error },
}

/// Failure to check a single link
#[derive(Debug, Error)]
pub enum LinkCheckError {
    #[error("Link check timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {source}")]
    Connect { url: String, source: reqwest::Error },

    #[error("HTTP error for {url}: {source}")]
    Transport { url: String, source: reqwest::Error },
}

/// A page fetched for auditing
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: String,

    /// HTTP status code
    pub status_code: u16,

    /// Page body content
    pub body: String,

    /// Wall-clock time for the full request/response cycle
    pub elapsed: Duration,
}

impl FetchedPage {
    /// Elapsed load time in seconds
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Builds an HTTP client with proper configuration
///
/// Redirects are followed with reqwest's default policy. The page timeout
/// bounds every request made with the client; link checks narrow it per
/// request.
///
/// # Example
///
/// ```no_run
/// use lead_audit::config::HttpConfig;
/// use lead_audit::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.page_timeout())
        .connect_timeout(config.page_timeout())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Issues the page GET and link HEAD requests for the auditor
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    page_timeout: Duration,
    link_timeout: Duration,
}

impl Fetcher {
    /// Creates a fetcher from the HTTP configuration
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
            page_timeout: config.page_timeout(),
            link_timeout: config.link_timeout(),
        })
    }

    /// Fetches a page and measures how long the full cycle took
    ///
    /// Any HTTP status is accepted: an error page is still a page whose
    /// load time and markup can be audited. Only transport-level failures
    /// (bad URL, DNS, refused connection, timeout, unreadable body) fail.
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let parsed = url::Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let start = Instant::now();

        let response = self
            .client
            .get(parsed)
            .timeout(self.page_timeout)
            .send()
            .await
            .map_err(|e| classify_fetch_error(url, e))?;

        let status_code = response.status().as_u16();
        let final_url = response.url().to_string();

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Body {
                    url: url.to_string(),
                    source: e,
                }
            }
        })?;

        let elapsed = start.elapsed();
        tracing::debug!(
            "Fetched {} ({}) in {:.2}s",
            final_url,
            status_code,
            elapsed.as_secs_f64()
        );

        Ok(FetchedPage {
            final_url,
            status_code,
            body,
            elapsed,
        })
    }

    /// Sends a HEAD request to a link and returns its final status code
    ///
    /// Redirects are followed, so the status is that of the final hop.
    pub async fn check_link(&self, url: &str) -> Result<u16, LinkCheckError> {
        let response = self
            .client
            .head(url)
            .timeout(self.link_timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LinkCheckError::Timeout {
                        url: url.to_string(),
                    }
                } else if e.is_connect() {
                    LinkCheckError::Connect {
                        url: url.to_string(),
                        source: e,
                    }
                } else {
                    LinkCheckError::Transport {
                        url: url.to_string(),
                        source: e,
                    }
                }
            })?;

        Ok(response.status().as_u16())
    }
}

fn classify_fetch_error(url: &str, e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if e.is_connect() {
        FetchError::Connect {
            url: url.to_string(),
            source: e,
        }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            source: e,
        }
    }
}
