//! The club state machine: one day of clients, tables, and a waiting queue.
//!
//! Events are fed in one at a time, in non-decreasing time order. Each
//! event is first checked against the opening hours, then echoed to the
//! log, then applied. Applying an event can append further lines: a
//! rejection (id 13), a forced departure (id 11), or an automatic seating
//! from the queue (id 12).
//!
//! # Client states
//!
//! A client known to the club is in exactly one of three states:
//!
//! - [`Presence::Arrived`] -- inside, neither seated nor queued.
//! - [`Presence::Waiting`] -- in the waiting queue, exactly once.
//! - [`Presence::Seated`] -- the occupant of exactly one table.
//!
//! # Release
//!
//! Whenever a table is vacated (a client leaves, moves to another table, or
//! the day ends) the session is billed and the head of the waiting queue,
//! if any, takes the table at the same instant.

use std::collections::{BTreeMap, VecDeque};

use tracing::{debug, info, warn};

use club_ledger::{Table, TableLedger};
use club_types::{ClientEvent, Clock, LogRecord, Rejection, TableNumber};

use crate::config::ClubConfig;
use crate::error::ClubError;
use crate::report::DayReport;

/// Where a known client currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Inside the club, not seated and not queued.
    Arrived,
    /// In the waiting queue.
    Waiting,
    /// Sitting at a table.
    Seated(TableNumber),
}

/// Result of a client event that did not violate the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// The event was applied.
    Accepted,
    /// The event was rejected and an id-13 line was logged.
    Rejected(Rejection),
    /// The queue was full; the client was sent away with an id-11 line.
    TurnedAway,
}

/// One day of the club.
#[derive(Debug, Clone)]
pub struct Club {
    /// Day parameters.
    config: ClubConfig,
    /// Table occupancy and takings.
    ledger: TableLedger,
    /// Every client currently inside, by name.
    clients: BTreeMap<String, Presence>,
    /// Clients waiting for a table, first in line at the front.
    queue: VecDeque<String>,
    /// Day log, append-only.
    log: Vec<LogRecord>,
}

impl Club {
    /// Open a club with all tables free.
    pub fn new(config: ClubConfig) -> Self {
        Self {
            ledger: TableLedger::new(config.tables(), config.hourly_rate()),
            config,
            clients: BTreeMap::new(),
            queue: VecDeque::new(),
            log: Vec::new(),
        }
    }

    /// Day parameters.
    pub const fn config(&self) -> &ClubConfig {
        &self.config
    }

    /// Whether the club is open at `time`.
    pub fn is_open_at(&self, time: Clock) -> bool {
        self.config.is_open_at(time)
    }

    /// Where `client` is, if inside.
    pub fn presence(&self, client: &str) -> Option<Presence> {
        self.clients.get(client).copied()
    }

    /// Names of the clients inside, sorted.
    pub fn clients(&self) -> impl Iterator<Item = &str> {
        self.clients.keys().map(String::as_str)
    }

    /// Waiting queue, first in line first.
    pub fn waiting(&self) -> impl Iterator<Item = &str> {
        self.queue.iter().map(String::as_str)
    }

    /// Look up a table.
    pub fn table(&self, number: TableNumber) -> Option<&Table> {
        self.ledger.get(number).ok()
    }

    /// All tables in number order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.ledger.iter()
    }

    /// The day log so far.
    pub fn log(&self) -> &[LogRecord] {
        &self.log
    }

    /// Process a raw event: wire id plus argument list.
    ///
    /// The arguments are echoed to the log exactly as given.
    ///
    /// # Errors
    ///
    /// Returns [`ClubError::MalformedEvent`] for an unknown id, a wrong
    /// argument count, or a non-numeric table, and [`ClubError::Ledger`]
    /// for a table number out of range. Nothing is logged in either case.
    pub fn process_event<S: AsRef<str>>(
        &mut self,
        time: Clock,
        id: u32,
        args: &[S],
    ) -> Result<EventOutcome, ClubError> {
        let event = ClientEvent::parse(id, args)?;
        let echo = args.iter().map(|arg| arg.as_ref().to_owned()).collect();
        self.dispatch(time, &event, echo)
    }

    /// Process an already decoded client event.
    ///
    /// # Errors
    ///
    /// Same as [`Club::process_event`], minus the decoding errors.
    pub fn apply(&mut self, time: Clock, event: &ClientEvent) -> Result<EventOutcome, ClubError> {
        self.dispatch(time, event, event.args())
    }

    /// Close the day.
    ///
    /// Every client still inside is handled in name order: a seated client's
    /// table is released at closing time, then an id-11 line is logged for
    /// the client. Releasing a table still seats the next waiting client
    /// for the remaining zero minutes, even one already logged as gone.
    /// Tables still held after the eviction pass are freed at closing
    /// without further log lines, so afterwards no client, queue entry, or
    /// occupied table survives.
    ///
    /// # Errors
    ///
    /// Returns [`ClubError::Ledger`] if billing a final session overflows.
    pub fn end_day(&mut self) -> Result<(), ClubError> {
        let close = self.config.close();
        let remaining: Vec<String> = self.clients.keys().cloned().collect();
        debug!(
            close = %close,
            clients = remaining.len(),
            occupied = self.ledger.occupied_count(),
            waiting = self.queue.len(),
            "closing"
        );

        for client in remaining {
            if let Some(Presence::Seated(table)) = self.presence(&client) {
                self.release(table, close)?;
            }
            self.log.push(LogRecord::Left { time: close, client });
        }

        self.clients.clear();
        self.queue.clear();

        // A waiter evicted before the table they inherit is released ends
        // up seated with no index entry.
        let stranded: Vec<TableNumber> = self
            .ledger
            .iter()
            .filter(|t| t.is_occupied())
            .map(Table::number)
            .collect();
        for table in stranded {
            self.ledger.release(table, close)?;
        }

        info!(
            close = %close,
            log_lines = self.log.len(),
            revenue = self.ledger.iter().map(Table::revenue).sum::<u64>(),
            "day closed"
        );
        Ok(())
    }

    /// Build the day report from the current state.
    pub fn report(&self) -> DayReport {
        DayReport::build(&self.config, &self.log, &self.ledger)
    }

    // -----------------------------------------------------------------------
    // Dispatch
    // -----------------------------------------------------------------------

    fn dispatch(
        &mut self,
        time: Clock,
        event: &ClientEvent,
        echo: Vec<String>,
    ) -> Result<EventOutcome, ClubError> {
        let incoming = LogRecord::Incoming {
            time,
            kind: event.kind(),
            args: echo,
        };

        if !self.is_open_at(time) {
            self.log.push(incoming);
            return Ok(self.reject(time, event.client(), Rejection::OutOfHours));
        }

        if let ClientEvent::Sit { table, .. } = event {
            // Protocol check: runs before the echo so a fatal event leaves
            // no trace in the log.
            self.ledger.get(*table)?;
        }

        self.log.push(incoming);

        match event {
            ClientEvent::Arrive { client } => Ok(self.arrive(time, client)),
            ClientEvent::Sit { client, table } => self.sit(time, client, *table),
            ClientEvent::Wait { client } => Ok(self.wait(time, client)),
            ClientEvent::Leave { client } => self.leave(time, client),
        }
    }

    fn arrive(&mut self, time: Clock, client: &str) -> EventOutcome {
        if self.clients.contains_key(client) {
            return self.reject(time, client, Rejection::AlreadyPresent);
        }
        // Same rule as the dispatch gate, checked again at the boundary.
        if !self.is_open_at(time) {
            return self.reject(time, client, Rejection::OutOfHours);
        }

        self.clients.insert(client.to_owned(), Presence::Arrived);
        debug!(client, time = %time, "client arrived");
        EventOutcome::Accepted
    }

    fn sit(&mut self, time: Clock, client: &str, table: TableNumber) -> Result<EventOutcome, ClubError> {
        let Some(presence) = self.presence(client) else {
            return Ok(self.reject(time, client, Rejection::UnknownClient));
        };

        let taken_by_other = self
            .ledger
            .get(table)?
            .occupant()
            .is_some_and(|occupant| occupant != client);
        if taken_by_other {
            return Ok(self.reject(time, client, Rejection::SeatTaken));
        }

        match presence {
            Presence::Seated(previous) if previous != table => self.release(previous, time)?,
            Presence::Waiting => self.queue.retain(|name| name != client),
            Presence::Seated(_) | Presence::Arrived => {}
        }

        self.ledger.seat(table, client, time)?;
        self.clients.insert(client.to_owned(), Presence::Seated(table));
        debug!(client, table = table.get(), time = %time, "client seated");
        Ok(EventOutcome::Accepted)
    }

    fn wait(&mut self, time: Clock, client: &str) -> EventOutcome {
        let Some(presence) = self.presence(client) else {
            return self.reject(time, client, Rejection::UnknownClient);
        };
        if self.ledger.has_free_table() {
            return self.reject(time, client, Rejection::CanWaitElsewhere);
        }
        if presence != Presence::Arrived {
            // Already holds a table or a place in line.
            return EventOutcome::Accepted;
        }

        let capacity = usize::try_from(self.config.tables()).unwrap_or(usize::MAX);
        if self.queue.len() >= capacity {
            self.clients.remove(client);
            self.log.push(LogRecord::Left {
                time,
                client: client.to_owned(),
            });
            debug!(client, time = %time, queue = self.queue.len(), "queue full, client turned away");
            return EventOutcome::TurnedAway;
        }

        self.queue.push_back(client.to_owned());
        self.clients.insert(client.to_owned(), Presence::Waiting);
        debug!(client, time = %time, position = self.queue.len(), "client queued");
        EventOutcome::Accepted
    }

    fn leave(&mut self, time: Clock, client: &str) -> Result<EventOutcome, ClubError> {
        let Some(presence) = self.presence(client) else {
            return Ok(self.reject(time, client, Rejection::UnknownClient));
        };

        match presence {
            Presence::Seated(table) => self.release(table, time)?,
            Presence::Waiting => {
                self.queue.retain(|name| name != client);
                self.clients.remove(client);
            }
            Presence::Arrived => {
                self.clients.remove(client);
            }
        }
        debug!(client, time = %time, "client left");
        Ok(EventOutcome::Accepted)
    }

    /// Bill and free `table`, then hand it to the head of the queue.
    fn release(&mut self, table: TableNumber, time: Clock) -> Result<(), ClubError> {
        let Some(session) = self.ledger.release(table, time)? else {
            return Ok(());
        };
        debug!(
            client = session.client.as_str(),
            table = table.get(),
            started = %session.started,
            ended = %session.ended,
            charge = session.charge,
            "table released"
        );
        self.clients.remove(&session.client);

        if let Some(next) = self.queue.pop_front() {
            self.ledger.seat(table, &next, time)?;
            self.clients.insert(next.clone(), Presence::Seated(table));
            debug!(client = next.as_str(), table = table.get(), time = %time, "seated from queue");
            self.log.push(LogRecord::Seated {
                time,
                client: next,
                table,
            });
        }
        Ok(())
    }

    fn reject(&mut self, time: Clock, client: &str, rejection: Rejection) -> EventOutcome {
        warn!(client, time = %time, rejection = %rejection, "event rejected");
        self.log.push(LogRecord::Error { time, rejection });
        EventOutcome::Rejected(rejection)
    }
}
