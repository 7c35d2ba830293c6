//! A single table and the receipt produced when its session ends.

use tracing::debug;

use club_types::{Clock, Elapsed, TableNumber};

use crate::{LedgerError, billing};

/// State of one table over the day.
///
/// Occupancy toggles as clients come and go; `revenue` and `busy` only
/// accumulate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// One-based table number.
    number: TableNumber,
    /// Client currently at the table, if any.
    occupant: Option<String>,
    /// When the current session started. Meaningless while free.
    session_start: Clock,
    /// Total billed for the day, in currency units.
    revenue: u64,
    /// Total occupied time for the day, unrounded.
    busy: Elapsed,
}

/// Receipt for a session that has just been closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosedSession {
    /// Table the session was on.
    pub table: TableNumber,
    /// Client who occupied the table.
    pub client: String,
    /// Session start.
    pub started: Clock,
    /// Session end.
    pub ended: Clock,
    /// Raw session length.
    pub elapsed: Elapsed,
    /// Amount billed for the session.
    pub charge: u64,
}

impl Table {
    /// A free table with nothing earned yet.
    pub const fn new(number: TableNumber) -> Self {
        Self {
            number,
            occupant: None,
            session_start: Clock::MIDNIGHT,
            revenue: 0,
            busy: Elapsed::ZERO,
        }
    }

    /// Table number.
    pub const fn number(&self) -> TableNumber {
        self.number
    }

    /// Whether someone is sitting here.
    pub const fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// Name of the current occupant.
    pub fn occupant(&self) -> Option<&str> {
        self.occupant.as_deref()
    }

    /// Start of the current session, if occupied.
    pub const fn session_start(&self) -> Option<Clock> {
        if self.occupant.is_some() {
            Some(self.session_start)
        } else {
            None
        }
    }

    /// Total revenue so far.
    pub const fn revenue(&self) -> u64 {
        self.revenue
    }

    /// Total busy time so far.
    pub const fn busy_time(&self) -> Elapsed {
        self.busy
    }

    /// Start a session for `client` at `time`, replacing any current one.
    pub(crate) fn occupy(&mut self, client: &str, time: Clock) {
        self.occupant = Some(client.to_owned());
        self.session_start = time;
    }

    /// End the current session at `time`, billing it at `hourly_rate`.
    ///
    /// Returns `Ok(None)` if the table was free.
    pub(crate) fn close_session(
        &mut self,
        time: Clock,
        hourly_rate: u64,
    ) -> Result<Option<ClosedSession>, LedgerError> {
        let Some(client) = self.occupant.as_deref() else {
            return Ok(None);
        };

        let elapsed = time.elapsed_since(self.session_start);
        let charge = billing::charge_for(self.number, elapsed, hourly_rate)?;
        let revenue = self
            .revenue
            .checked_add(charge)
            .ok_or(LedgerError::Overflow { table: self.number })?;

        debug!(
            table = self.number.get(),
            client,
            started = %self.session_start,
            ended = %time,
            minutes = elapsed.minutes(),
            charge,
            "session closed"
        );

        self.revenue = revenue;
        self.busy += elapsed;
        let client = self.occupant.take().unwrap_or_default();

        Ok(Some(ClosedSession {
            table: self.number,
            client,
            started: self.session_start,
            ended: time,
            elapsed,
            charge,
        }))
    }
}
