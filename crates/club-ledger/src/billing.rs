//! Hourly billing.

use club_types::{Elapsed, TableNumber};

use crate::LedgerError;

/// Charge for a session of `elapsed` minutes at `hourly_rate` per started
/// hour.
///
/// # Errors
///
/// Returns [`LedgerError::Overflow`] if the product does not fit in `u64`.
pub fn charge_for(
    table: TableNumber,
    elapsed: Elapsed,
    hourly_rate: u64,
) -> Result<u64, LedgerError> {
    elapsed
        .billable_hours()
        .checked_mul(hourly_rate)
        .ok_or(LedgerError::Overflow { table })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const TABLE: TableNumber = TableNumber::new(1);

    fn charge(minutes: u64, rate: u64) -> u64 {
        charge_for(TABLE, Elapsed::from_minutes(minutes), rate).unwrap()
    }

    #[test]
    fn whole_hours_bill_exactly() {
        for k in 0..5 {
            assert_eq!(charge(60 * k, 10), 10 * k);
        }
    }

    #[test]
    fn partial_hours_round_up() {
        for k in 0..5 {
            for extra in [1, 30, 59] {
                assert_eq!(charge(60 * k + extra, 10), 10 * (k + 1));
            }
        }
    }

    #[test]
    fn overflow_is_reported() {
        let result = charge_for(TABLE, Elapsed::from_minutes(120), u64::MAX);
        assert_eq!(result, Err(LedgerError::Overflow { table: TABLE }));
    }
}
