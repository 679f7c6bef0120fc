use crate::config::types::{
    AuditConfig, Config, DiscoveryConfig, HttpConfig, OutputConfig, RunConfig,
};
use crate::ConfigError;
use url::Url;

const MAX_TIMEOUT_SECS: u64 = 120;
const MAX_LINK_CHECKS: usize = 100;
const MAX_RESULTS: usize = 100;
const MAX_POLITENESS_DELAY_MS: u64 = 60_000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_http_config(&config.http)?;
    validate_audit_config(&config.audit)?;
    validate_discovery_config(&config.discovery)?;
    validate_run_config(&config.run)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    validate_timeout("page_timeout_secs", config.page_timeout_secs)?;
    validate_timeout("link_timeout_secs", config.link_timeout_secs)?;

    Ok(())
}

fn validate_timeout(name: &str, secs: u64) -> Result<(), ConfigError> {
    if secs < 1 || secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::Validation(format!(
            "{} must be between 1 and {}, got {}",
            name, MAX_TIMEOUT_SECS, secs
        )));
    }
    Ok(())
}

/// Validates audit thresholds
fn validate_audit_config(config: &AuditConfig) -> Result<(), ConfigError> {
    if !config.slow_threshold_secs.is_finite() || config.slow_threshold_secs <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "slow_threshold_secs must be a positive number, got {}",
            config.slow_threshold_secs
        )));
    }

    if config.max_link_checks < 1 || config.max_link_checks > MAX_LINK_CHECKS {
        return Err(ConfigError::Validation(format!(
            "max_link_checks must be between 1 and {}, got {}",
            MAX_LINK_CHECKS, config.max_link_checks
        )));
    }

    Ok(())
}

/// Validates discovery configuration
fn validate_discovery_config(config: &DiscoveryConfig) -> Result<(), ConfigError> {
    if config.max_results < 1 || config.max_results > MAX_RESULTS {
        return Err(ConfigError::Validation(format!(
            "max_results must be between 1 and {}, got {}",
            MAX_RESULTS, config.max_results
        )));
    }

    let endpoint = Url::parse(&config.endpoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid endpoint: {}", e)))?;

    if endpoint.scheme() != "http" && endpoint.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Endpoint '{}' must use HTTP or HTTPS",
            config.endpoint
        )));
    }

    Ok(())
}

/// Validates run pacing
fn validate_run_config(config: &RunConfig) -> Result<(), ConfigError> {
    if config.politeness_delay_ms > MAX_POLITENESS_DELAY_MS {
        return Err(ConfigError::Validation(format!(
            "politeness_delay_ms must be <= {}, got {}",
            MAX_POLITENESS_DELAY_MS, config.politeness_delay_ms
        )));
    }
    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.csv_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "csv_path cannot be empty".to_string(),
        ));
    }
    Ok(())
}
