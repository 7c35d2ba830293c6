//! Drive one club day from an input document.

use std::path::Path;

use tracing::{debug, info, warn};

use club_core::{Club, DayReport, EventOutcome};

use crate::error::RunnerError;
use crate::input::Document;

/// Run a whole day from the text of an input file.
///
/// Events are applied in file order. The first format or protocol error
/// stops the run; nothing is reported for a partial day.
pub fn run_text(text: &str) -> Result<DayReport, RunnerError> {
    let document = Document::parse(text)?;
    let config = document.config;
    info!(
        tables = config.tables(),
        open = %config.open(),
        close = %config.close(),
        hourly_rate = config.hourly_rate(),
        events = document.event_count(),
        "club opened"
    );

    let mut club = Club::new(config);
    let mut last_time = None;
    let mut rejected: usize = 0;

    for event in document.events() {
        let event = event?;

        if last_time.is_some_and(|last| event.time < last) {
            warn!(line = event.line, time = %event.time, "event is earlier than the previous one");
        }
        last_time = Some(event.time);

        let outcome = club
            .process_event(event.time, event.id, &event.args)
            .map_err(|source| RunnerError::Event {
                line: event.line,
                text: event.text.to_owned(),
                source,
            })?;

        if outcome != EventOutcome::Accepted {
            rejected = rejected.saturating_add(1);
        }
        debug!(line = event.line, ?outcome, "event processed");
    }

    club.end_day()
        .map_err(|source| RunnerError::Closing { source })?;

    let report = club.report();
    info!(
        log_lines = report.events.len(),
        rejected,
        revenue = report.total_revenue(),
        "report ready"
    );
    Ok(report)
}

/// Run a whole day from an input file on disk.
pub fn run_file(path: &Path) -> Result<DayReport, RunnerError> {
    let text = std::fs::read_to_string(path).map_err(|source| RunnerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    run_text(&text)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use crate::error::InputError;

    #[test]
    fn empty_day_reports_only_hours_and_tables() {
        let report = run_text("2\n09:00 18:00\n15\n").unwrap();
        assert_eq!(
            report.lines(),
            vec!["09:00", "18:00", "1 0 00:00", "2 0 00:00"]
        );
    }

    #[test]
    fn protocol_error_names_the_line() {
        let text = "1\n09:00 18:00\n15\n09:10 1 a\n\n09:20 2 a 2\n";
        let err = run_text(text).unwrap_err();
        assert!(matches!(err, RunnerError::Event { line: 6, .. }));
        assert!(err.to_string().starts_with("error in line 6: "));
    }

    #[test]
    fn first_error_wins() {
        // Line 4 is a protocol error, line 5 a format error.
        let text = "1\n09:00 18:00\n15\n09:10 9 a\nbroken\n";
        assert!(matches!(
            run_text(text),
            Err(RunnerError::Event { line: 4, .. })
        ));

        let text = "1\n09:00 18:00\n15\nbroken\n09:10 9 a\n";
        assert!(matches!(
            run_text(text),
            Err(RunnerError::Input {
                source: InputError::EventTime { line: 4, .. }
            })
        ));
    }

    #[test]
    fn missing_file_is_reported_with_its_path() {
        let err = run_file(Path::new("no/such/input.txt")).unwrap_err();
        assert!(matches!(err, RunnerError::Io { .. }));
        assert!(err.to_string().contains("no/such/input.txt"));
    }
}
