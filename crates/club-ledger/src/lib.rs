//! Table ledger and billing for the club simulator.
//!
//! Every table in the club is tracked through this ledger: who sits there,
//! since when, how much the table has earned, and how long it has been busy.
//! Revenue and busy time only ever grow; they survive any number of
//! occupants during the day.
//!
//! # Architecture
//!
//! The ledger crate provides three modules:
//!
//! - [`table`] -- The [`Table`] record and the [`ClosedSession`] receipt.
//! - [`ledger`] -- The [`TableLedger`]: the numbered set of tables with
//!   seating and release operations.
//! - [`billing`] -- Hourly charge computation.
//!
//! # Billing Rule
//!
//! A session is billed per started hour:
//!
//! ```text
//! charge = ceil(elapsed_minutes / 60) * hourly_rate
//! ```
//!
//! Busy time accumulates the raw minutes, unrounded. The ledger never
//! panics; overflow is reported as [`LedgerError::Overflow`].
//!
//! # Usage
//!
//! ```
//! use club_ledger::TableLedger;
//! use club_types::{Clock, TableNumber};
//!
//! let mut ledger = TableLedger::new(2, 10);
//! let one = TableNumber::new(1);
//! let nine: Clock = "09:00".parse()?;
//! let half_past: Clock = "09:31".parse()?;
//!
//! ledger.seat(one, "alice", nine)?;
//! let session = ledger.release(one, half_past)?;
//!
//! assert_eq!(session.map(|s| s.charge), Some(10));
//! assert_eq!(ledger.get(one)?.revenue(), 10);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod billing;
pub mod ledger;
pub mod table;

// Re-export primary types at crate root.
pub use billing::charge_for;
pub use ledger::TableLedger;
pub use table::{ClosedSession, Table};

use club_types::TableNumber;

/// Errors that can occur when operating on the ledger.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// The table number is outside `1..=table_count`.
    #[error("table {table} out of range 1..={count}")]
    TableOutOfRange {
        /// The requested table.
        table: TableNumber,
        /// Number of tables in the club.
        count: u32,
    },

    /// A revenue or charge computation overflowed.
    #[error("billing overflow on table {table}")]
    Overflow {
        /// The table being billed.
        table: TableNumber,
    },
}
