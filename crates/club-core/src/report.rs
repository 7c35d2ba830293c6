//! End-of-day report.
//!
//! The text form is the club's console output: opening time, every log
//! line in order, closing time, then one `<table> <revenue> <HH:MM>` line per
//! table. The same data serializes to JSON for machine consumers.

use core::fmt;

use serde::Serialize;

use club_ledger::{Table, TableLedger};
use club_types::{Clock, Elapsed, LogRecord, TableNumber};

use crate::config::ClubConfig;

/// Takings and usage of one table over the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    /// Table number.
    pub table: TableNumber,
    /// Total billed, in currency units.
    pub revenue: u64,
    /// Total occupied minutes, unrounded.
    pub busy: Elapsed,
}

impl From<&Table> for TableSummary {
    fn from(table: &Table) -> Self {
        Self {
            table: table.number(),
            revenue: table.revenue(),
            busy: table.busy_time(),
        }
    }
}

impl fmt::Display for TableSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.table, self.revenue, self.busy)
    }
}

/// Snapshot of a club day, ready for output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayReport {
    /// Opening time.
    pub open: Clock,
    /// Day log in order.
    pub events: Vec<LogRecord>,
    /// Closing time.
    pub close: Clock,
    /// One entry per table, in table order.
    pub tables: Vec<TableSummary>,
}

impl DayReport {
    /// Read the report out of a club's state. Does not mutate anything.
    pub fn build(config: &ClubConfig, log: &[LogRecord], ledger: &TableLedger) -> Self {
        Self {
            open: config.open(),
            events: log.to_vec(),
            close: config.close(),
            tables: ledger.iter().map(TableSummary::from).collect(),
        }
    }

    /// Sum of all table revenues. Saturates instead of overflowing.
    pub fn total_revenue(&self) -> u64 {
        self.tables
            .iter()
            .fold(0_u64, |acc, t| acc.saturating_add(t.revenue))
    }

    /// Output lines, in order.
    pub fn lines(&self) -> Vec<String> {
        std::iter::once(self.open.to_string())
            .chain(self.events.iter().map(ToString::to_string))
            .chain(std::iter::once(self.close.to_string()))
            .chain(self.tables.iter().map(ToString::to_string))
            .collect()
    }
}

impl fmt::Display for DayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
