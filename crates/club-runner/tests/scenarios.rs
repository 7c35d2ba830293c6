//! End-to-end runs: input text in, report lines out.

#![allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    clippy::panic
)]

use std::io::Write;

use club_runner::{RunnerError, run_file, run_text};

fn report_lines(input: &str) -> Vec<String> {
    run_text(input).unwrap().lines()
}

fn contains(lines: &[String], line: &str) -> bool {
    lines.iter().any(|l| l == line)
}

const FULL_DAY: &str = "\
3
09:00 19:00
10
08:48 1 client1
09:41 1 client1
09:48 1 client2
09:52 3 client1
09:54 2 client1 1
10:25 2 client2 2
10:58 1 client3
10:59 2 client3 3
11:30 1 client4
11:35 2 client4 2
11:45 3 client4
12:33 4 client1
12:43 4 client2
15:52 4 client4
";

#[test]
fn full_day_report() {
    let expected = vec![
        "09:00",
        "08:48 1 client1",
        "08:48 13 OutOfHours",
        "09:41 1 client1",
        "09:48 1 client2",
        "09:52 3 client1",
        "09:52 13 CanWaitElsewhere",
        "09:54 2 client1 1",
        "10:25 2 client2 2",
        "10:58 1 client3",
        "10:59 2 client3 3",
        "11:30 1 client4",
        "11:35 2 client4 2",
        "11:35 13 SeatTaken",
        "11:45 3 client4",
        "12:33 4 client1",
        "12:33 12 client4 1",
        "12:43 4 client2",
        "15:52 4 client4",
        "19:00 11 client3",
        "19:00",
        "1 70 05:58",
        "2 30 02:18",
        "3 90 08:01",
    ];
    assert_eq!(report_lines(FULL_DAY), expected);
}

#[test]
fn sitting_is_logged_without_error() {
    let lines = report_lines("2\n08:00 20:00\n10\n09:00 1 A\n09:30 2 A 1\n");
    assert!(contains(&lines, "09:30 2 A 1"));
    assert!(!lines.iter().any(|l| l.contains(" 13 ")));
}

#[test]
fn occupied_table_is_refused() {
    let lines = report_lines(
        "2\n08:00 20:00\n10\n09:00 1 A\n09:30 2 A 1\n10:00 1 B\n10:30 2 B 1\n",
    );
    assert!(contains(&lines, "10:30 13 SeatTaken"));
}

#[test]
fn whole_hours_bill_exactly() {
    let lines = report_lines("1\n08:00 20:00\n10\n09:00 1 A\n09:00 2 A 1\n11:00 4 A\n");
    assert_eq!(lines.last().unwrap(), "1 20 02:00");
}

#[test]
fn partial_hour_rounds_up() {
    let lines = report_lines("1\n08:00 20:00\n10\n09:00 1 A\n09:00 2 A 1\n09:30 4 A\n");
    assert_eq!(lines.last().unwrap(), "1 10 00:30");
}

#[test]
fn departure_seats_the_next_waiter() {
    let lines = report_lines(
        "1\n08:00 20:00\n10\n09:00 1 A\n09:00 2 A 1\n10:00 1 B\n10:00 3 B\n11:00 4 A\n",
    );
    let leave = lines.iter().position(|l| l == "11:00 4 A").unwrap();
    assert_eq!(lines[leave + 1], "11:00 12 B 1");
}

#[test]
fn overflow_of_the_queue_sends_client_away() {
    let lines = report_lines(
        "1\n08:00 20:00\n10\n\
         09:00 1 Client1\n09:00 2 Client1 1\n\
         09:30 1 Client2\n09:45 3 Client2\n\
         10:00 1 Client3\n10:00 3 Client3\n",
    );
    assert!(!lines.iter().any(|l| l.starts_with("09:45 13")));
    assert!(contains(&lines, "10:00 11 Client3"));
}

#[test]
fn closing_evicts_in_name_order() {
    let lines = report_lines(
        "2\n08:00 20:00\n10\n\
         09:00 1 zed\n09:00 2 zed 1\n\
         10:00 1 amy\n10:00 2 amy 2\n\
         11:00 1 bob\n",
    );
    let tail: Vec<&str> = lines.iter().map(String::as_str).skip(lines.len() - 6).collect();
    assert_eq!(
        tail,
        vec![
            "20:00 11 amy",
            "20:00 11 bob",
            "20:00 11 zed",
            "20:00",
            "1 110 11:00",
            "2 100 10:00",
        ]
    );
}

#[test]
fn events_outside_hours_echo_every_argument() {
    let lines = report_lines("1\n08:00 20:00\n10\n07:00 1 A\n20:00 2 A 1\n");
    assert_eq!(
        lines,
        vec![
            "08:00",
            "07:00 1 A",
            "07:00 13 OutOfHours",
            "20:00 2 A 1",
            "20:00 13 OutOfHours",
            "20:00",
            "1 0 00:00",
        ]
    );
}

#[test]
fn protocol_errors_abort_with_line_number() {
    let cases = [
        ("1\n08:00 20:00\n10\n09:00 99 A\n", 4),
        ("1\n08:00 20:00\n10\n09:00 1 A extra\n", 4),
        ("1\n08:00 20:00\n10\n09:00 1 A\n\n09:00 2 A 2\n", 6),
        ("1\n08:00 20:00\n10\n09:00 1 A\n09:00 2 A x\n", 5),
        ("1\n08:00 20:00\n10\n09:00 11 A\n", 4),
    ];
    for (input, expected_line) in cases {
        match run_text(input) {
            Err(RunnerError::Event { line, .. }) => assert_eq!(line, expected_line, "{input:?}"),
            other => panic!("expected protocol error for {input:?}, got {other:?}"),
        }
    }
}

#[test]
fn json_report_has_the_same_content() {
    let report = run_text("1\n08:00 20:00\n10\n09:00 1 A\n09:00 2 A 1\n09:30 4 A\n").unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["open"], "08:00");
    assert_eq!(json["close"], "20:00");
    assert_eq!(json["events"].as_array().unwrap().len(), 3);
    assert_eq!(json["events"][1]["record"], "incoming");
    assert_eq!(json["events"][1]["args"][1], "1");
    assert_eq!(json["tables"][0]["revenue"], 10);
    assert_eq!(json["tables"][0]["busy"], 30);
}

#[test]
fn runs_from_a_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(FULL_DAY.as_bytes()).unwrap();
    file.flush().unwrap();

    let report = run_file(file.path()).unwrap();
    assert_eq!(report.tables.len(), 3);
    assert_eq!(report.total_revenue(), 190);
    assert_eq!(report.lines(), report_lines(FULL_DAY));
}
