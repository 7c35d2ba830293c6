//! Event vocabulary: incoming client events, rejections, and log records.
//!
//! Events travel on the wire as `HH:MM <id> <args...>`. Ids 1-4 are sent by
//! clients; ids 11-13 are produced by the club itself. This module owns the
//! mapping between the numeric ids and typed values, and the text rendering
//! of every line that ends up in the day log.

use core::fmt;

use serde::Serialize;

use crate::clock::Clock;

// ---------------------------------------------------------------------------
// Event kinds
// ---------------------------------------------------------------------------

/// Numeric event identifiers as they appear in the input and the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum EventKind {
    /// A client walks in (id 1).
    Arrive,
    /// A client takes a table (id 2).
    Sit,
    /// A client asks to wait for a table (id 3).
    Wait,
    /// A client leaves (id 4).
    Leave,
    /// The club removed a client (id 11).
    Left,
    /// The club seated a client from the queue (id 12).
    Seated,
    /// The club rejected an event (id 13).
    Error,
}

impl EventKind {
    /// Wire id of this kind.
    pub const fn id(self) -> u32 {
        match self {
            Self::Arrive => 1,
            Self::Sit => 2,
            Self::Wait => 3,
            Self::Leave => 4,
            Self::Left => 11,
            Self::Seated => 12,
            Self::Error => 13,
        }
    }

    /// Look up a kind by wire id.
    pub const fn from_id(id: u32) -> Option<Self> {
        match id {
            1 => Some(Self::Arrive),
            2 => Some(Self::Sit),
            3 => Some(Self::Wait),
            4 => Some(Self::Leave),
            11 => Some(Self::Left),
            12 => Some(Self::Seated),
            13 => Some(Self::Error),
            _ => None,
        }
    }

    /// Whether clients may send this kind (ids 1-4).
    pub const fn is_external(self) -> bool {
        matches!(self, Self::Arrive | Self::Sit | Self::Wait | Self::Leave)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

// ---------------------------------------------------------------------------
// Table numbers
// ---------------------------------------------------------------------------

/// One-based table number.
///
/// The value is not checked against the club's table count here; the ledger
/// does that when the number is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TableNumber(u32);

impl TableNumber {
    /// Wrap a raw table number.
    pub const fn new(number: u32) -> Self {
        Self(number)
    }

    /// The raw table number.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TableNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Client events
// ---------------------------------------------------------------------------

/// Protocol violations found while decoding an event.
///
/// These are fatal: the input stream is expected to be well-formed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventError {
    /// The id is not one of the client event kinds (1-4).
    #[error("unknown event id {id}")]
    UnknownKind {
        /// The offending id.
        id: u32,
    },

    /// Wrong number of arguments for the event kind.
    #[error("event {kind} expects {expected} argument(s), got {actual}")]
    Arity {
        /// The event kind being decoded.
        kind: EventKind,
        /// Number of arguments the kind takes.
        expected: usize,
        /// Number of arguments supplied.
        actual: usize,
    },

    /// The table argument is not a non-negative integer.
    #[error("invalid table number {value:?}")]
    InvalidTable {
        /// The offending argument.
        value: String,
    },
}

/// A typed client event (ids 1-4).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    /// The client walks in.
    Arrive {
        /// Client name.
        client: String,
    },
    /// The client takes a table.
    Sit {
        /// Client name.
        client: String,
        /// Requested table.
        table: TableNumber,
    },
    /// The client asks to wait for a free table.
    Wait {
        /// Client name.
        client: String,
    },
    /// The client leaves.
    Leave {
        /// Client name.
        client: String,
    },
}

impl ClientEvent {
    /// Decode an event from its wire id and argument list.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::UnknownKind`] for ids other than 1-4,
    /// [`EventError::Arity`] for a wrong argument count, and
    /// [`EventError::InvalidTable`] if the table argument of a `Sit` is not
    /// a number.
    pub fn parse<S: AsRef<str>>(id: u32, args: &[S]) -> Result<Self, EventError> {
        let kind = EventKind::from_id(id)
            .filter(|kind| kind.is_external())
            .ok_or(EventError::UnknownKind { id })?;

        let expected = if kind == EventKind::Sit { 2 } else { 1 };
        if args.len() != expected {
            return Err(EventError::Arity {
                kind,
                expected,
                actual: args.len(),
            });
        }

        let mut args = args.iter().map(|arg| arg.as_ref().to_owned());
        let client = args.next().unwrap_or_default();

        match kind {
            EventKind::Arrive => Ok(Self::Arrive { client }),
            EventKind::Wait => Ok(Self::Wait { client }),
            EventKind::Leave => Ok(Self::Leave { client }),
            _ => {
                let raw = args.next().unwrap_or_default();
                let table = raw
                    .parse::<u32>()
                    .map_err(|_err| EventError::InvalidTable { value: raw.clone() })?;
                Ok(Self::Sit {
                    client,
                    table: TableNumber::new(table),
                })
            }
        }
    }

    /// Kind of this event.
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Arrive { .. } => EventKind::Arrive,
            Self::Sit { .. } => EventKind::Sit,
            Self::Wait { .. } => EventKind::Wait,
            Self::Leave { .. } => EventKind::Leave,
        }
    }

    /// Name of the client the event is about.
    pub fn client(&self) -> &str {
        match self {
            Self::Arrive { client }
            | Self::Sit { client, .. }
            | Self::Wait { client }
            | Self::Leave { client } => client,
        }
    }

    /// Arguments in wire order, as echoed to the log.
    pub fn args(&self) -> Vec<String> {
        match self {
            Self::Sit { client, table } => vec![client.clone(), table.to_string()],
            other => vec![other.client().to_owned()],
        }
    }
}

// ---------------------------------------------------------------------------
// Rejections
// ---------------------------------------------------------------------------

/// Why the club turned down a client event.
///
/// Rejections are ordinary outcomes: they are written to the log as an
/// id-13 line and processing continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Rejection {
    /// The club is closed at the event time.
    OutOfHours,
    /// The client is already inside.
    AlreadyPresent,
    /// The client is not inside.
    UnknownClient,
    /// The requested table is taken by someone else.
    SeatTaken,
    /// A table is free, so there is nothing to wait for.
    CanWaitElsewhere,
}

impl Rejection {
    /// Tag written after the id in the log line.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::OutOfHours => "OutOfHours",
            Self::AlreadyPresent => "AlreadyPresent",
            Self::UnknownClient => "UnknownClient",
            Self::SeatTaken => "SeatTaken",
            Self::CanWaitElsewhere => "CanWaitElsewhere",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// ---------------------------------------------------------------------------
// Log records
// ---------------------------------------------------------------------------

/// One line of the day log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "record", rename_all = "snake_case")]
pub enum LogRecord {
    /// Echo of a client event as it was received.
    Incoming {
        /// Event time.
        time: Clock,
        /// Event kind.
        kind: EventKind,
        /// Arguments as received.
        args: Vec<String>,
    },
    /// The club removed a client (queue overflow or closing time).
    Left {
        /// Time of removal.
        time: Clock,
        /// Client name.
        client: String,
    },
    /// The club seated the head of the queue at a freed table.
    Seated {
        /// Time of seating.
        time: Clock,
        /// Client name.
        client: String,
        /// Table the client now occupies.
        table: TableNumber,
    },
    /// A client event was rejected.
    Error {
        /// Time of the rejected event.
        time: Clock,
        /// Reason for the rejection.
        rejection: Rejection,
    },
}

impl LogRecord {
    /// Time stamp of the line.
    pub const fn time(&self) -> Clock {
        match self {
            Self::Incoming { time, .. }
            | Self::Left { time, .. }
            | Self::Seated { time, .. }
            | Self::Error { time, .. } => *time,
        }
    }

    /// Wire kind of the line.
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Incoming { kind, .. } => *kind,
            Self::Left { .. } => EventKind::Left,
            Self::Seated { .. } => EventKind::Seated,
            Self::Error { .. } => EventKind::Error,
        }
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.time(), self.kind())?;
        match self {
            Self::Incoming { args, .. } => {
                for arg in args {
                    write!(f, " {arg}")?;
                }
                Ok(())
            }
            Self::Left { client, .. } => write!(f, " {client}"),
            Self::Seated { client, table, .. } => write!(f, " {client} {table}"),
            Self::Error { rejection, .. } => write!(f, " {rejection}"),
        }
    }
}
