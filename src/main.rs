//! Lead-Audit main entry point
//!
//! This is the command-line interface for the Lead-Audit website auditor.

use anyhow::Context;
use clap::Parser;
use lead_audit::config::{load_config_with_hash, validate, Config};
use lead_audit::crawler::{run_audit, RunRequest};
use lead_audit::output::{export_csv, TerminalOutput};
use lead_audit::IssueType;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Lead-Audit: find business websites and audit them for a quality issue
///
/// Searches for businesses matching a niche and region, checks each site for
/// the selected issue, collects contact emails and exports the results as CSV.
#[derive(Parser, Debug)]
#[command(name = "lead-audit")]
#[command(version)]
#[command(about = "Lead generation and website audit tool", long_about = None)]
struct Cli {
    /// Target niche (e.g. "Dentists")
    #[arg(long)]
    niche: String,

    /// Target region (e.g. "London")
    #[arg(long)]
    region: String,

    /// Issue to detect
    #[arg(long, value_enum, default_value_t = IssueType::SlowPageLoad)]
    issue: IssueType,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// CSV export path (overrides the config file)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Maximum number of search results to audit (overrides the config file)
    #[arg(long)]
    max_results: Option<usize>,

    /// Validate input and config and show what would be audited
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let request = RunRequest::new(&cli.niche, &cli.region, cli.issue)?;

    let (mut config, config_hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };

    if let Some(max_results) = cli.max_results {
        config.discovery.max_results = max_results;
    }
    if let Some(output) = &cli.output {
        config.output.csv_path = output.display().to_string();
    }
    validate(&config).context("Invalid configuration")?;

    if cli.dry_run {
        handle_dry_run(&config, &request, config_hash.as_deref());
        return Ok(());
    }

    handle_run(&config, &request).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so the table on stdout stays readable.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("lead_audit=info,warn"),
            1 => EnvFilter::new("lead_audit=debug,info"),
            2 => EnvFilter::new("lead_audit=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows what would be audited
fn handle_dry_run(config: &Config, request: &RunRequest, config_hash: Option<&str>) {
    println!("=== Lead-Audit Dry Run ===\n");

    println!("Request:");
    println!("  Query: {}", request.query());
    println!("  Issue: {}", request.issue);

    println!("\nDiscovery:");
    println!("  Endpoint: {}", config.discovery.endpoint);
    println!("  Max results: {}", config.discovery.max_results);

    println!("\nHTTP:");
    println!("  User agent: {}", config.http.user_agent);
    println!("  Page timeout: {}s", config.http.page_timeout_secs);
    println!("  Link timeout: {}s", config.http.link_timeout_secs);

    println!("\nAudit:");
    println!("  Slow threshold: {:.2}s", config.audit.slow_threshold_secs);
    println!("  Max link checks: {}", config.audit.max_link_checks);
    println!("  Politeness delay: {}ms", config.run.politeness_delay_ms);

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);
    match config_hash {
        Some(hash) => println!("  Config hash: {}", hash),
        None => println!("  Config: built-in defaults"),
    }

    println!("\n✓ Input and configuration are valid");
}

/// Handles the main audit run and CSV export
async fn handle_run(config: &Config, request: &RunRequest) -> anyhow::Result<()> {
    tracing::info!(
        "Starting audit for '{}' ({})",
        request.query(),
        request.issue
    );

    let mut output = TerminalOutput::stdout();
    let report = run_audit(config, request, &mut output).await?;

    if report.rows.is_empty() {
        tracing::warn!("No websites audited; nothing to export");
        return Ok(());
    }

    let csv_path = Path::new(&config.output.csv_path);
    export_csv(&report.rows, csv_path)
        .with_context(|| format!("Failed to write {}", csv_path.display()))?;
    println!("\nResults saved to: {}", csv_path.display());

    Ok(())
}
