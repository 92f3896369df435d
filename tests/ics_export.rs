// Integration tests for the iCalendar encoder.
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use horaire::config::EncodeOptions;
use horaire::ics::SemesterRange;
use horaire::model::{Group, Session, Weekday};
use pretty_assertions::assert_eq;

fn session(day: Weekday, start: &str, duration_minutes: u32, title: &str) -> Session {
    Session {
        day,
        start: NaiveTime::parse_from_str(start, "%H:%M").unwrap(),
        duration_minutes,
        title: title.to_string(),
        location: "B-201".to_string(),
        description: "Dr. Ada".to_string(),
    }
}

fn group(events: Vec<Session>) -> Group {
    Group {
        id: "3A".to_string(),
        label: "3A (3rd Year CS)".to_string(),
        parent_group: "3rd Year CS".to_string(),
        events,
    }
}

fn semester() -> SemesterRange {
    SemesterRange {
        start: NaiveDate::from_ymd_opt(2026, 1, 19).unwrap(), // a Monday
        end: NaiveDate::from_ymd_opt(2026, 5, 30).unwrap(),
    }
}

#[test]
fn first_occurrence_lands_on_the_session_weekday() {
    let g = group(vec![session(Weekday::Wednesday, "14:00", 90, "Networks")]);
    let ics = g.to_ics(&semester(), &EncodeOptions::default()).unwrap();

    assert!(ics.contains("DTSTART:20260121T140000"), "{ics}");
    assert!(ics.contains("DTEND:20260121T153000"), "{ics}");
}

#[test]
fn range_start_on_the_session_weekday_is_used_as_is() {
    let g = group(vec![session(Weekday::Monday, "09:00", 60, "Algorithms")]);
    let ics = g.to_ics(&semester(), &EncodeOptions::default()).unwrap();

    assert!(ics.contains("DTSTART:20260119T090000"), "{ics}");
}

#[test]
fn recurrence_terminus_is_end_of_day_on_the_range_end() {
    let g = group(vec![session(Weekday::Wednesday, "14:00", 90, "Networks")]);
    let ics = g.to_ics(&semester(), &EncodeOptions::default()).unwrap();
    assert!(ics.contains("RRULE:FREQ=WEEKLY;UNTIL=20260530T235900"), "{ics}");

    // The terminus only depends on the end date, not on its weekday.
    let wednesday_end = SemesterRange {
        start: NaiveDate::from_ymd_opt(2026, 1, 19).unwrap(),
        end: NaiveDate::from_ymd_opt(2026, 6, 3).unwrap(),
    };
    let ics = g.to_ics(&wednesday_end, &EncodeOptions::default()).unwrap();
    assert!(ics.contains("RRULE:FREQ=WEEKLY;UNTIL=20260603T235900"), "{ics}");
}

#[test]
fn inverted_range_is_rejected_before_encoding() {
    let g = group(vec![session(Weekday::Wednesday, "14:00", 90, "Networks")]);
    let inverted = SemesterRange {
        start: NaiveDate::from_ymd_opt(2026, 5, 30).unwrap(),
        end: NaiveDate::from_ymd_opt(2026, 1, 19).unwrap(),
    };
    assert!(g.to_ics(&inverted, &EncodeOptions::default()).is_err());
}

fn unescape(value: &str) -> String {
    let mut out = String::new();
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

#[test]
fn summary_escaping_round_trips() {
    let title = "Math, Advanced; path C:\\temp and a\nsecond line";
    let g = group(vec![session(Weekday::Monday, "09:00", 60, title)]);
    let ics = g.to_ics(&semester(), &EncodeOptions::default()).unwrap();

    let summary = ics
        .lines()
        .find_map(|l| l.strip_prefix("SUMMARY:"))
        .expect("SUMMARY line");
    assert!(!summary.contains('\n'));
    assert_eq!(unescape(summary), title);
}

#[test]
fn empty_location_and_description_lines_are_omitted() {
    let mut bare = session(Weekday::Monday, "09:00", 60, "Algorithms");
    bare.location = String::new();
    bare.description = String::new();
    let ics = group(vec![bare])
        .to_ics(&semester(), &EncodeOptions::default())
        .unwrap();

    assert!(!ics.contains("LOCATION:"));
    assert!(!ics.contains("DESCRIPTION:"));
}

#[test]
fn document_structure_and_property_order() {
    let g = group(vec![session(Weekday::Wednesday, "14:00", 90, "Networks")]);
    let generated = Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).unwrap();
    let ics = g
        .to_ics_at(&semester(), &EncodeOptions::default(), generated)
        .unwrap();

    let lines: Vec<&str> = ics.split("\r\n").collect();
    assert_eq!(
        lines,
        vec![
            "BEGIN:VCALENDAR",
            "VERSION:2.0",
            "PRODID:-//Horaire//Timetable Export//EN",
            "BEGIN:VEVENT",
            "UID:3A-Wednesday-14:00-0@horaire",
            "DTSTAMP:20260110T120000Z",
            "SUMMARY:Networks",
            "DTSTART:20260121T140000",
            "DTEND:20260121T153000",
            "RRULE:FREQ=WEEKLY;UNTIL=20260530T235900",
            "LOCATION:B-201",
            "DESCRIPTION:Dr. Ada",
            "END:VEVENT",
            "END:VCALENDAR",
            "",
        ]
    );
}

#[test]
fn uids_are_stable_and_unique_within_one_export() {
    let g = group(vec![
        session(Weekday::Monday, "09:00", 60, "Algorithms"),
        session(Weekday::Monday, "11:00", 60, "Compilers"),
    ]);
    let ics = g.to_ics(&semester(), &EncodeOptions::default()).unwrap();

    assert!(ics.contains("UID:3A-Monday-09:00-0@horaire"));
    assert!(ics.contains("UID:3A-Monday-11:00-1@horaire"));
}

#[test]
fn same_inputs_give_byte_identical_output() {
    let g = group(vec![
        session(Weekday::Monday, "09:00", 60, "Algorithms"),
        session(Weekday::Friday, "10:00", 120, "Lab"),
    ]);
    let generated = Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).unwrap();
    let first = g
        .to_ics_at(&semester(), &EncodeOptions::default(), generated)
        .unwrap();
    let second = g
        .to_ics_at(&semester(), &EncodeOptions::default(), generated)
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn one_event_block_per_session() {
    let g = group(vec![
        session(Weekday::Monday, "09:00", 60, "Algorithms"),
        session(Weekday::Tuesday, "09:00", 180, "Physics"),
        session(Weekday::Friday, "10:00", 120, "Lab"),
    ]);
    let ics = g.to_ics(&semester(), &EncodeOptions::default()).unwrap();

    assert_eq!(ics.matches("BEGIN:VEVENT").count(), 3);
    assert_eq!(ics.matches("END:VEVENT").count(), 3);
    assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
    assert!(ics.ends_with("END:VCALENDAR\r\n"));
}
