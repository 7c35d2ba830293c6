//! Fatal errors raised by the club state machine.
//!
//! Only protocol violations end up here. Domain rejections (unknown client,
//! taken seat, closed club, ...) are not errors: they are reported as
//! [`EventOutcome::Rejected`] and recorded in the log.
//!
//! [`EventOutcome::Rejected`]: crate::club::EventOutcome::Rejected

use club_ledger::LedgerError;
use club_types::EventError;

/// A protocol violation that aborts the run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClubError {
    /// Unknown event id, wrong argument count, or unparsable table number.
    #[error("malformed event: {source}")]
    MalformedEvent {
        /// The underlying decoding error.
        #[from]
        source: EventError,
    },

    /// Table number out of range, or billing overflow.
    #[error("ledger error: {source}")]
    Ledger {
        /// The underlying ledger error.
        #[from]
        source: LedgerError,
    },
}
