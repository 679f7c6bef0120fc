//! Configuration module for Lead-Audit
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional; a missing file section falls back to the built-in defaults.
//!
//! # Example
//!
//! ```no_run
//! use lead_audit::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("lead-audit.toml")).unwrap();
//! println!("Page timeout: {}s", config.http.page_timeout_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    AuditConfig, Config, DiscoveryConfig, HttpConfig, OutputConfig, RunConfig,
    DEFAULT_SEARCH_ENDPOINT, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
