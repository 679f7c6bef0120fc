//! Crawler module for page fetching and run coordination
//!
//! This module contains the plumbing around the audit itself:
//! - HTTP fetching of pages and link probes
//! - HTML parsing into a queryable document
//! - The sequential run loop over discovered sites

mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::{Coordinator, RunReport, RunRequest};
pub use fetcher::{build_http_client, FetchError, FetchedPage, Fetcher, LinkCheckError};
pub use parser::{AttrFilter, HtmlDocument, HtmlElement};

use crate::config::{validate, Config};
use crate::output::OutputHandler;
use crate::AuditError;

/// Runs a complete audit with the default search provider
///
/// This is the main entry point for a run. It will:
/// 1. Validate the configuration
/// 2. Build the HTTP clients
/// 3. Discover candidate sites for the request's query
/// 4. Audit each site and stream rows to `output`
///
/// # Returns
///
/// * `Ok(RunReport)` - The rows and summary of the run
/// * `Err(AuditError)` - The run could not be started
pub async fn run_audit(
    config: &Config,
    request: &RunRequest,
    output: &mut dyn OutputHandler,
) -> Result<RunReport, AuditError> {
    validate(config)?;
    let coordinator = Coordinator::new(config)?;
    Ok(coordinator.run(request, output).await)
}
