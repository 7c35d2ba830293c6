//! Club state machine, configuration, and day report for the club simulator.
//!
//! This crate owns the single-day simulation: events go in one at a time,
//! the club updates its tables and waiting queue, and every outcome lands
//! in an append-only log that the report replays at closing.
//!
//! # Modules
//!
//! - [`club`] -- The [`Club`] state machine: arrival, seating, waiting,
//!   leaving, automatic seating from the queue, and end-of-day eviction.
//! - [`config`] -- Day parameters ([`ClubConfig`]) and process settings
//!   loaded from `club-config.yaml`.
//! - [`error`] -- Fatal protocol errors.
//! - [`report`] -- The [`DayReport`] rendered as text or JSON.
//!
//! # Example
//!
//! ```
//! use club_core::{Club, ClubConfig};
//!
//! let config = ClubConfig::new(1, "09:00".parse()?, "19:00".parse()?, 10)?;
//! let mut club = Club::new(config);
//! club.process_event("09:10".parse()?, 1, &["alice"])?;
//! club.process_event("09:15".parse()?, 2, &["alice", "1"])?;
//! club.process_event("10:20".parse()?, 4, &["alice"])?;
//! club.end_day()?;
//!
//! let report = club.report();
//! assert_eq!(report.tables[0].to_string(), "1 20 01:05");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod club;
pub mod config;
pub mod error;
pub mod report;

pub use club::{Club, EventOutcome, Presence};
pub use config::{
    ClubConfig, ConfigError, DEFAULT_SETTINGS_FILE, LoggingConfig, MAX_TABLES, ReportConfig,
    ReportFormat, Settings,
};
pub use error::ClubError;
pub use report::{DayReport, TableSummary};
