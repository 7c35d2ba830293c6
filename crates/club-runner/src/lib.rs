//! Input file adapter and runner for the club simulator.
//!
//! Reads the day description from a text file, feeds the events into a
//! [`club_core::Club`], and hands back the day report.
//!
//! # Modules
//!
//! - [`cli`] -- Command-line arguments for the `club-runner` binary.
//! - [`error`] -- [`InputError`] and [`RunnerError`].
//! - [`input`] -- Header and event line parsing.
//! - [`run`] -- [`run_text`] and [`run_file`].

pub mod cli;
pub mod error;
pub mod input;
pub mod run;

pub use error::{InputError, RunnerError};
pub use run::{run_file, run_text};
