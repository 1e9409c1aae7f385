//! Shared utilities for CLI commands
//!
//! Logging setup, layered configuration loading with CLI overrides, and the
//! run summary reported at the end of a command.

use crate::Result;
use crate::cli::args::CommonArgs;
use crate::config::Config;
use colored::*;
use std::time::Duration;
use tracing::{debug, info};

/// Totals reported at the end of a command
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Position updates handled
    pub positions_processed: usize,
    /// Refreshes that reached the sink
    pub refreshes: usize,
    /// Position updates skipped by the throttle
    pub throttled: usize,
    /// Refresh attempts that failed to fetch the inventory
    pub fetch_failures: usize,
    /// Ranked records handed to the sink, summed over refreshes
    pub records_rendered: usize,
    pub elapsed: Duration,
}

impl RunSummary {
    /// Print a short human-readable summary to stderr
    pub fn print(&self) {
        eprintln!();
        eprintln!("{}", "Summary".bright_green().bold());
        eprintln!("  Positions processed: {}", self.positions_processed);
        eprintln!("  Refreshes:           {}", self.refreshes);
        eprintln!("  Throttled updates:   {}", self.throttled);
        if self.fetch_failures > 0 {
            eprintln!(
                "  Fetch failures:      {}",
                self.fetch_failures.to_string().red().bold()
            );
        }
        eprintln!("  Records rendered:    {}", self.records_rendered);
        eprintln!("  Elapsed:             {:.2?}", self.elapsed);
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &CommonArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("plant_proximity={}", log_level)));

    let layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr);

    // A second initialisation (e.g. in tests) is harmless
    let _ = if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer.compact())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer.with_timer(fmt::time::uptime()))
            .try_init()
    };

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration with layered approach and apply CLI overrides
pub fn load_configuration(args: &CommonArgs) -> Result<Config> {
    let default_config_path = if args.config_file.is_none() {
        Config::default_config_path().ok()
    } else {
        None
    };

    let config_file = match &args.config_file {
        Some(path) => Some(path.as_path()),
        None => default_config_path
            .as_ref()
            .filter(|path| path.exists())
            .map(|path| path.as_path()),
    };

    if let Some(config_path) = config_file {
        info!("Using config file: {}", config_path.display());
    } else {
        debug!("No config file found, using defaults and environment variables");
    }

    let mut config = Config::load_layered(config_file)?;
    apply_cli_overrides(&mut config, args);
    config.validate()?;

    debug!("Loaded configuration: {:?}", config);
    Ok(config)
}

/// Apply command-line values on top of the loaded configuration
pub fn apply_cli_overrides(config: &mut Config, args: &CommonArgs) {
    if let Some(source) = &args.source {
        config.source = source.clone();
    }
    if let Some(radius) = args.radius_meters {
        config.radius_meters = radius;
    }
    if let Some(limit) = args.limit {
        config.result_limit = limit;
    }
    if let Some(delimiter) = args.delimiter {
        config.delimiter = delimiter;
    }
}

/// Current wall-clock time in milliseconds since the epoch
pub fn now_ms() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
}
