//! The numbered set of tables in the club.
//!
//! [`TableLedger`] owns every [`Table`] and is the only way to change one.
//! Table numbers are one-based and validated on every access; an
//! out-of-range number is a [`LedgerError::TableOutOfRange`], never a panic.

use club_types::{Clock, TableNumber};

use crate::LedgerError;
use crate::table::{ClosedSession, Table};

/// All tables of the club and the rate they are billed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLedger {
    /// Tables in number order; `tables[i]` is table `i + 1`.
    tables: Vec<Table>,
    /// Price of one started hour.
    hourly_rate: u64,
}

impl TableLedger {
    /// Create `count` free tables numbered `1..=count`.
    pub fn new(count: u32, hourly_rate: u64) -> Self {
        let tables = (1..=count).map(|n| Table::new(TableNumber::new(n))).collect();
        Self {
            tables,
            hourly_rate,
        }
    }

    /// Number of tables.
    pub fn count(&self) -> u32 {
        u32::try_from(self.tables.len()).unwrap_or(u32::MAX)
    }

    /// Price of one started hour.
    pub const fn hourly_rate(&self) -> u64 {
        self.hourly_rate
    }

    /// Iterate over all tables in number order.
    pub fn iter(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter()
    }

    /// Look up a table.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::TableOutOfRange`] if `number` is not a table.
    pub fn get(&self, number: TableNumber) -> Result<&Table, LedgerError> {
        let idx = self.index_of(number)?;
        self.tables.get(idx).ok_or(LedgerError::TableOutOfRange {
            table: number,
            count: self.count(),
        })
    }

    /// Whether at least one table is free.
    pub fn has_free_table(&self) -> bool {
        self.tables.iter().any(|t| !t.is_occupied())
    }

    /// Number of occupied tables.
    pub fn occupied_count(&self) -> usize {
        self.tables.iter().filter(|t| t.is_occupied()).count()
    }

    /// Seat `client` at `number` from `time`.
    ///
    /// Any session already running on that table is replaced without being
    /// billed; callers release the table first when billing matters.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::TableOutOfRange`] if `number` is not a table.
    pub fn seat(&mut self, number: TableNumber, client: &str, time: Clock) -> Result<(), LedgerError> {
        self.get_mut(number)?.occupy(client, time);
        Ok(())
    }

    /// End the session on `number` at `time`, billing it.
    ///
    /// Returns `Ok(None)` if the table was already free.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::TableOutOfRange`] if `number` is not a table,
    /// or [`LedgerError::Overflow`] if billing overflows.
    pub fn release(
        &mut self,
        number: TableNumber,
        time: Clock,
    ) -> Result<Option<ClosedSession>, LedgerError> {
        let rate = self.hourly_rate;
        self.get_mut(number)?.close_session(time, rate)
    }

    fn get_mut(&mut self, number: TableNumber) -> Result<&mut Table, LedgerError> {
        let idx = self.index_of(number)?;
        let count = self.count();
        self.tables.get_mut(idx).ok_or(LedgerError::TableOutOfRange {
            table: number,
            count,
        })
    }

    /// Convert a one-based table number to a vector index.
    fn index_of(&self, number: TableNumber) -> Result<usize, LedgerError> {
        let out_of_range = || LedgerError::TableOutOfRange {
            table: number,
            count: self.count(),
        };
        let zero_based = number.get().checked_sub(1).ok_or_else(out_of_range)?;
        let idx = usize::try_from(zero_based).map_err(|_err| out_of_range())?;
        if idx < self.tables.len() {
            Ok(idx)
        } else {
            Err(out_of_range())
        }
    }
}
