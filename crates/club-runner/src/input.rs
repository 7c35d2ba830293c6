//! Input file format.
//!
//! ```text
//! 3              <- table count
//! 09:00 19:00    <- opening and closing time
//! 10             <- price of one started hour
//! 08:48 1 client1
//! 09:41 2 client1 1
//! ...
//! ```
//!
//! Blank lines are ignored everywhere. Event lines are split on whitespace:
//! a time, a numeric event id, then the arguments. Line numbers in errors
//! are one-based and count blank lines.

use club_core::ClubConfig;
use club_types::Clock;

use crate::error::InputError;

/// One event line, tokenized but not yet interpreted by the club.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLine<'a> {
    /// One-based line number in the file.
    pub line: usize,
    /// The line as read, without surrounding whitespace.
    pub text: &'a str,
    /// Event time.
    pub time: Clock,
    /// Numeric event id.
    pub id: u32,
    /// Remaining tokens.
    pub args: Vec<&'a str>,
}

/// A parsed header plus the not yet tokenized event lines.
#[derive(Debug, Clone)]
pub struct Document<'a> {
    /// Day parameters from the header.
    pub config: ClubConfig,
    body: Vec<(usize, &'a str)>,
}

impl<'a> Document<'a> {
    /// Parse the header and collect the event lines.
    ///
    /// Event lines are only tokenized when iterated with
    /// [`Document::events`], so a broken line further down does not mask a
    /// protocol error reported earlier.
    pub fn parse(text: &'a str) -> Result<Self, InputError> {
        let mut lines = numbered_lines(text);

        let tables = next_header(&mut lines, "table count")?;
        let tables = parse_positive::<u32>(tables).ok_or_else(|| InputError::TableCount {
            value: tables.to_owned(),
        })?;

        let hours = next_header(&mut lines, "opening hours")?;
        let (open, close) = parse_hours(hours).ok_or_else(|| InputError::Hours {
            value: hours.to_owned(),
        })?;

        let rate = next_header(&mut lines, "hourly rate")?;
        let rate = parse_positive::<u64>(rate).ok_or_else(|| InputError::HourlyRate {
            value: rate.to_owned(),
        })?;

        let config = ClubConfig::new(tables, open, close, rate)?;
        Ok(Self {
            config,
            body: lines.collect(),
        })
    }

    /// Number of event lines.
    pub fn event_count(&self) -> usize {
        self.body.len()
    }

    /// Tokenize the event lines in file order.
    pub fn events(&self) -> impl Iterator<Item = Result<EventLine<'a>, InputError>> {
        self.body
            .iter()
            .map(|&(line, text)| parse_event_line(line, text))
    }
}

/// Tokenize one event line.
pub fn parse_event_line(line: usize, text: &str) -> Result<EventLine<'_>, InputError> {
    let mut tokens = text.split_whitespace();

    let time = tokens
        .next()
        .unwrap_or_default()
        .parse::<Clock>()
        .map_err(|source| InputError::EventTime { line, source })?;

    let id_token = tokens.next().unwrap_or_default();
    let id = id_token.parse::<u32>().map_err(|_err| InputError::EventId {
        line,
        value: id_token.to_owned(),
    })?;

    Ok(EventLine {
        line,
        text: text.trim(),
        time,
        id,
        args: tokens.collect(),
    })
}

/// Non-blank lines with their one-based numbers.
fn numbered_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| (idx.saturating_add(1), line))
}

fn next_header<'a>(
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
    field: &'static str,
) -> Result<&'a str, InputError> {
    lines
        .next()
        .map(|(_, line)| line.trim())
        .ok_or(InputError::MissingHeader { field })
}

fn parse_positive<T>(value: &str) -> Option<T>
where
    T: std::str::FromStr + Default + PartialEq,
{
    value.parse::<T>().ok().filter(|n| *n != T::default())
}

fn parse_hours(value: &str) -> Option<(Clock, Clock)> {
    let mut parts = value.split_whitespace();
    let open = parts.next()?.parse().ok()?;
    let close = parts.next()?.parse().ok()?;
    parts.next().is_none().then_some((open, close))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use club_core::ConfigError;

    const SAMPLE: &str = "3\n09:00 19:00\n10\n08:48 1 client1\n\n09:41 2 client1 1\n";

    #[test]
    fn parses_header() {
        let doc = Document::parse(SAMPLE).unwrap();
        assert_eq!(doc.config.tables(), 3);
        assert_eq!(doc.config.open().to_string(), "09:00");
        assert_eq!(doc.config.close().to_string(), "19:00");
        assert_eq!(doc.config.hourly_rate(), 10);
        assert_eq!(doc.event_count(), 2);
    }

    #[test]
    fn event_lines_keep_file_numbers() {
        let doc = Document::parse(SAMPLE).unwrap();
        let events: Vec<EventLine<'_>> = doc.events().map(Result::unwrap).collect();
        assert_eq!(events[0].line, 4);
        assert_eq!(events[0].id, 1);
        assert_eq!(events[0].args, vec!["client1"]);
        assert_eq!(events[1].line, 6);
        assert_eq!(events[1].text, "09:41 2 client1 1");
        assert_eq!(events[1].args, vec!["client1", "1"]);
    }

    #[test]
    fn blank_lines_in_header_are_skipped() {
        let doc = Document::parse("\n2\n\n10:00 12:00\n  \n5\n").unwrap();
        assert_eq!(doc.config.tables(), 2);
        assert_eq!(doc.config.hourly_rate(), 5);
        assert_eq!(doc.event_count(), 0);
    }

    #[test]
    fn short_header_is_rejected() {
        assert!(matches!(
            Document::parse("3\n09:00 19:00\n"),
            Err(InputError::MissingHeader { field: "hourly rate" })
        ));
        assert!(matches!(
            Document::parse(""),
            Err(InputError::MissingHeader { field: "table count" })
        ));
    }

    #[test]
    fn bad_header_values_are_rejected() {
        assert!(matches!(
            Document::parse("0\n09:00 19:00\n10\n"),
            Err(InputError::TableCount { .. })
        ));
        assert!(matches!(
            Document::parse("three\n09:00 19:00\n10\n"),
            Err(InputError::TableCount { .. })
        ));
        assert!(matches!(
            Document::parse("4000000000\n09:00 19:00\n10\n"),
            Err(InputError::Club {
                source: ConfigError::TooManyTables { tables: 4_000_000_000, .. }
            })
        ));
        assert!(matches!(
            Document::parse("3\n09:00\n10\n"),
            Err(InputError::Hours { .. })
        ));
        assert!(matches!(
            Document::parse("3\n9:00 19:00\n10\n"),
            Err(InputError::Hours { .. })
        ));
        assert!(matches!(
            Document::parse("3\n09:00 19:00 20:00\n10\n"),
            Err(InputError::Hours { .. })
        ));
        assert!(matches!(
            Document::parse("3\n09:00 19:00\n-5\n"),
            Err(InputError::HourlyRate { .. })
        ));
        assert!(matches!(
            Document::parse("3\n19:00 09:00\n10\n"),
            Err(InputError::Club {
                source: ConfigError::ClosesBeforeOpening { .. }
            })
        ));
    }

    #[test]
    fn bad_event_lines_carry_their_number() {
        assert!(matches!(
            parse_event_line(7, "24:00 1 a"),
            Err(InputError::EventTime { line: 7, .. })
        ));
        assert!(matches!(
            parse_event_line(8, "10:00"),
            Err(InputError::EventId { line: 8, .. })
        ));
        let err = parse_event_line(9, "10:00 x a").unwrap_err();
        assert_eq!(err.to_string(), "error in line 9: invalid event id \"x\"");
    }

    #[test]
    fn event_without_arguments_is_tokenized() {
        let event = parse_event_line(4, "  10:00 4  ").unwrap();
        assert_eq!(event.id, 4);
        assert!(event.args.is_empty());
        assert_eq!(event.text, "10:00 4");
    }
}
