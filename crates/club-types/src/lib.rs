//! Shared type definitions for the club simulator.
//!
//! This crate is the single source of truth for the values that cross crate
//! boundaries: times of day, elapsed durations, client events, rejection
//! tags, and the records of the day log.
//!
//! # Modules
//!
//! - [`clock`] -- [`Clock`] time of day and [`Elapsed`] minute counts
//! - [`event`] -- Event kinds, typed client events, rejections, log records

pub mod clock;
pub mod event;

// Re-export all public types at crate root for convenience.
pub use clock::{Clock, ClockError, Elapsed, MINUTES_PER_DAY, MINUTES_PER_HOUR};
pub use event::{ClientEvent, EventError, EventKind, LogRecord, Rejection, TableNumber};
