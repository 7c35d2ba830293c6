//! Wall-clock time of day and elapsed durations for the club simulator.
//!
//! [`Clock`] is a minute-resolution time of day in `[00:00, 24:00)`. It is
//! what every event carries and what the club's opening hours are made of.
//! Arithmetic between two clocks wraps around midnight, which is only
//! meaningful for same-day offsets.
//!
//! [`Elapsed`] is a plain minute count that never wraps. Billing and busy
//! time are accumulated as [`Elapsed`] values so a table occupied for more
//! than a day's worth of minutes across sessions still reports correctly.
//!
//! # Design Principles
//!
//! - A [`Clock`] is always normalized into range at construction.
//! - Durations are derived with saturating subtraction; events arrive in
//!   non-decreasing time order, so a negative span never occurs in practice.
//! - Text form is strict zero-padded `HH:MM` in both directions.

use core::fmt;
use core::ops::{Add, AddAssign, Sub};
use core::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Minutes in one hour.
pub const MINUTES_PER_HOUR: u64 = 60;

/// Minutes in one day; every [`Clock`] value is below this.
pub const MINUTES_PER_DAY: u32 = 1440;

/// Errors that can occur when building a [`Clock`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClockError {
    /// Hour or minute component out of range (hour 0-23, minute 0-59).
    #[error("invalid time: {input}")]
    InvalidTime {
        /// The offending input, as given.
        input: String,
    },

    /// Text does not have the `HH:MM` shape.
    #[error("malformed time {input:?}: expected HH:MM")]
    Malformed {
        /// The offending input, as given.
        input: String,
    },
}

/// A time of day with minute resolution.
///
/// Ordering and equality compare the total number of minutes since
/// midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Clock {
    /// Minutes since midnight, always `< MINUTES_PER_DAY`.
    minutes: u32,
}

impl Clock {
    /// Midnight, `00:00`.
    pub const MIDNIGHT: Self = Self { minutes: 0 };

    /// Create a clock from an hour (0-23) and a minute (0-59).
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidTime`] if either component is out of
    /// range.
    pub fn new(hour: u32, minute: u32) -> Result<Self, ClockError> {
        if hour >= 24 || minute >= 60 {
            return Err(ClockError::InvalidTime {
                input: format!("{hour:02}:{minute:02}"),
            });
        }
        let minutes = hour
            .checked_mul(60)
            .and_then(|h| h.checked_add(minute))
            .ok_or_else(|| ClockError::InvalidTime {
                input: format!("{hour:02}:{minute:02}"),
            })?;
        Ok(Self { minutes })
    }

    /// Create a clock from any minute offset, wrapping into the day.
    ///
    /// Negative offsets wrap forward, so `-1` is `23:59`.
    pub fn from_minutes(total: i64) -> Self {
        let day = i64::from(MINUTES_PER_DAY);
        let wrapped = total.checked_rem_euclid(day).unwrap_or(0);
        Self {
            minutes: u32::try_from(wrapped).unwrap_or(0),
        }
    }

    /// Minutes since midnight.
    pub const fn total_minutes(self) -> u32 {
        self.minutes
    }

    /// Hour component (0-23).
    pub const fn hour(self) -> u32 {
        self.minutes / 60
    }

    /// Minute component (0-59).
    pub const fn minute(self) -> u32 {
        self.minutes % 60
    }

    /// Minutes elapsed from `start` until `self`.
    ///
    /// Does not wrap around midnight: if `start` is later than `self` the
    /// result saturates at zero.
    pub fn elapsed_since(self, start: Self) -> Elapsed {
        Elapsed::from_minutes(u64::from(self.minutes.saturating_sub(start.minutes)))
    }
}

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for Clock {
    type Err = ClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        let well_formed = bytes.len() == 5
            && bytes.iter().enumerate().all(|(i, b)| {
                if i == 2 {
                    *b == b':'
                } else {
                    b.is_ascii_digit()
                }
            });
        if !well_formed {
            return Err(ClockError::Malformed {
                input: s.to_owned(),
            });
        }

        let parsed = NaiveTime::parse_from_str(s, "%H:%M").map_err(|_err| {
            ClockError::InvalidTime {
                input: s.to_owned(),
            }
        })?;
        Self::new(parsed.hour(), parsed.minute())
    }
}

impl TryFrom<String> for Clock {
    type Error = ClockError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Clock> for String {
    fn from(clock: Clock) -> Self {
        clock.to_string()
    }
}

impl Add for Clock {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_minutes(i64::from(self.minutes).saturating_add(i64::from(rhs.minutes)))
    }
}

impl Sub for Clock {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::from_minutes(i64::from(self.minutes).saturating_sub(i64::from(rhs.minutes)))
    }
}

/// A non-negative number of elapsed minutes.
///
/// Unlike [`Clock`], an [`Elapsed`] never wraps: it is used for session
/// lengths and for total busy time accumulated over a whole day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Elapsed(u64);

impl Elapsed {
    /// No time at all.
    pub const ZERO: Self = Self(0);

    /// Wrap a raw minute count.
    pub const fn from_minutes(minutes: u64) -> Self {
        Self(minutes)
    }

    /// The raw minute count.
    pub const fn minutes(self) -> u64 {
        self.0
    }

    /// Whole hours billed for this span: any started hour counts in full.
    ///
    /// `0` minutes bill `0` hours, `1..=60` bill `1`, `61..=120` bill `2`.
    pub const fn billable_hours(self) -> u64 {
        self.0.div_ceil(MINUTES_PER_HOUR)
    }
}

impl fmt::Display for Elapsed {
    /// `HH:MM` with an unbounded hour component (`25:07` is valid).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.0.checked_div(MINUTES_PER_HOUR).unwrap_or(0);
        let minutes = self.0.checked_rem(MINUTES_PER_HOUR).unwrap_or(0);
        write!(f, "{hours:02}:{minutes:02}")
    }
}

impl Add for Elapsed {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Elapsed {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}
