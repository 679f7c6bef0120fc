use serde::Deserialize;
use std::time::Duration;

/// Browser-like user agent sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// DuckDuckGo HTML search endpoint
pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://html.duckduckgo.com/html/";

/// Main configuration structure for Lead-Audit
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub audit: AuditConfig,
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// HTTP client configuration shared by the page fetcher and link checker
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User-Agent header value
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Timeout for the homepage GET (seconds)
    #[serde(rename = "page-timeout-secs")]
    pub page_timeout_secs: u64,

    /// Timeout for each link HEAD check (seconds)
    #[serde(rename = "link-timeout-secs")]
    pub link_timeout_secs: u64,
}

impl HttpConfig {
    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs)
    }

    pub fn link_timeout(&self) -> Duration {
        Duration::from_secs(self.link_timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            page_timeout_secs: 10,
            link_timeout_secs: 5,
        }
    }
}

/// Thresholds used by the site checks
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Load times strictly above this many seconds are flagged as slow
    #[serde(rename = "slow-threshold-secs")]
    pub slow_threshold_secs: f64,

    /// Maximum number of internal links checked per site
    #[serde(rename = "max-link-checks")]
    pub max_link_checks: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            slow_threshold_secs: 3.0,
            max_link_checks: 10,
        }
    }
}

/// Search discovery configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Maximum number of search results to audit
    #[serde(rename = "max-results")]
    pub max_results: usize,

    /// Search endpoint URL
    pub endpoint: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            max_results: 20,
            endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
        }
    }
}

/// Run pacing configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Pause between consecutive site audits (milliseconds)
    #[serde(rename = "politeness-delay-ms")]
    pub politeness_delay_ms: u64,
}

impl RunConfig {
    pub fn politeness_delay(&self) -> Duration {
        Duration::from_millis(self.politeness_delay_ms)
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            politeness_delay_ms: 1000,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the CSV export
    #[serde(rename = "csv-path")]
    pub csv_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: crate::output::CSV_FILE_NAME.to_string(),
        }
    }
}
