//! Command-line entry point for the club simulator.
//!
//! ```text
//! club-runner [--config <PATH>] [--format text|json] <INPUT>
//! ```
//!
//! The report goes to stdout; logs and diagnostics go to stderr. Any error
//! exits with status 1.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use club_core::{ConfigError, DEFAULT_SETTINGS_FILE, LoggingConfig, ReportFormat, Settings};
use club_runner::cli::Cli;
use club_runner::run_file;

/// Application entry point.
///
/// Loads settings, initializes logging, runs the day, and prints the
/// report.
///
/// # Errors
///
/// Returns an error if the settings, the input file, or any event is
/// invalid, or if the report cannot be written.
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(cli.config.as_deref()).context("failed to load settings")?;
    init_logging(&settings.logging);

    let format = cli.format.unwrap_or(settings.report.format);
    info!(input = %cli.input.display(), ?format, "club-runner starting");

    let report = run_file(&cli.input)?;

    let mut stdout = std::io::stdout().lock();
    match format {
        ReportFormat::Text => write!(stdout, "{report}")?,
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut stdout, &report)?;
            writeln!(stdout)?;
        }
    }
    stdout.flush()?;
    Ok(())
}

/// Load settings from `--config`, else from `club-config.yaml` if it
/// exists, else defaults. Environment overrides apply in every case.
fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    if let Some(path) = path {
        return Settings::from_file(path);
    }

    let default_path = Path::new(DEFAULT_SETTINGS_FILE);
    if default_path.exists() {
        return Settings::from_file(default_path);
    }

    let mut settings = Settings::default();
    settings.apply_overrides(|key| std::env::var(key).ok())?;
    Ok(settings)
}

/// Install the global subscriber. `RUST_LOG` takes precedence over the
/// configured level.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
