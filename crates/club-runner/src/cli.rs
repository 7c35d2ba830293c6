//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use club_core::ReportFormat;

/// Simulate one day of a computer club and print the day report.
#[derive(Debug, Parser)]
#[command(name = "club-runner", version)]
#[command(about = "Simulate one day of a computer club", long_about = None)]
pub struct Cli {
    /// Input file: table count, opening hours, hourly rate, then events
    pub input: PathBuf,

    /// Settings file (defaults to `club-config.yaml` if present)
    #[arg(long, env = "CLUB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Report format, overrides the settings file: text or json
    #[arg(long)]
    pub format: Option<ReportFormat>,
}
