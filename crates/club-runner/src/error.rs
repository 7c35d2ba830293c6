//! Error types for the runner.
//!
//! [`InputError`] covers the text format of the input file. [`RunnerError`]
//! is what a whole run can fail with: the file, its format, or a protocol
//! violation reported by the club, each tied to the offending line.

use std::path::PathBuf;

use club_core::{ClubError, ConfigError};
use club_types::ClockError;

/// The input file does not follow the expected format.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// The file ends before the three header lines.
    #[error("not enough input data: missing {field}")]
    MissingHeader {
        /// Header field that was expected next.
        field: &'static str,
    },

    /// The first header line is not a positive integer.
    #[error("invalid table count {value:?}")]
    TableCount {
        /// The offending line.
        value: String,
    },

    /// The second header line is not `HH:MM HH:MM`.
    #[error("invalid opening hours {value:?}")]
    Hours {
        /// The offending line.
        value: String,
    },

    /// The third header line is not a positive integer.
    #[error("invalid hourly rate {value:?}")]
    HourlyRate {
        /// The offending line.
        value: String,
    },

    /// The header values do not form a valid club.
    #[error(transparent)]
    Club {
        /// The validation failure.
        #[from]
        source: ConfigError,
    },

    /// An event line does not start with a valid time.
    #[error("error in line {line}: invalid time: {source}")]
    EventTime {
        /// One-based line number.
        line: usize,
        /// The time parse failure.
        source: ClockError,
    },

    /// An event line has no id, or the id is not a number.
    #[error("error in line {line}: invalid event id {value:?}")]
    EventId {
        /// One-based line number.
        line: usize,
        /// The offending token, empty if missing.
        value: String,
    },
}

/// Errors that end a run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Failed to read the input file.
    #[error("could not open file {}: {source}", path.display())]
    Io {
        /// Path that was requested.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The input file is malformed.
    #[error(transparent)]
    Input {
        /// The format error.
        #[from]
        source: InputError,
    },

    /// The club refused an event as a protocol violation.
    #[error("error in line {line}: {source} ({text:?})")]
    Event {
        /// One-based line number.
        line: usize,
        /// The event line as read.
        text: String,
        /// The protocol error.
        source: ClubError,
    },

    /// Closing the day failed.
    #[error("failed to close the day: {source}")]
    Closing {
        /// The underlying error.
        source: ClubError,
    },
}
