// File: ./src/ics.rs
// Encodes one group's sessions as a VCALENDAR document with weekly RRULEs.
use crate::config::EncodeOptions;
use crate::model::item::Group;
use crate::model::week::Weekday;
use anyhow::{Result, bail};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};

/// Floating local date-time stamp, no zone suffix.
const DT_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Inclusive semester bounds for the weekly recurrence window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SemesterRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Group {
    /// Serializes this group's sessions as a standalone iCalendar document.
    ///
    /// Every session becomes one VEVENT anchored at its first occurrence on or
    /// after `range.start`, repeating weekly until end-of-day on `range.end`.
    /// Output is CRLF-joined and ends with a trailing blank line. Same group
    /// and range give byte-identical output modulo the DTSTAMP field.
    pub fn to_ics(&self, range: &SemesterRange, options: &EncodeOptions) -> Result<String> {
        self.to_ics_at(range, options, Utc::now())
    }

    /// Like [`Group::to_ics`] with the generation instant supplied by the
    /// caller, so re-exports can be reproduced exactly.
    pub fn to_ics_at(
        &self,
        range: &SemesterRange,
        options: &EncodeOptions,
        generated: DateTime<Utc>,
    ) -> Result<String> {
        // Refused up front, before any date arithmetic.
        if range.start > range.end {
            bail!(
                "semester range ends ({}) before it starts ({})",
                range.end,
                range.start
            );
        }

        let dtstamp = generated.format("%Y%m%dT%H%M%SZ").to_string();
        // 23:59 on the last day keeps the boundary week's occurrence.
        let until = range
            .end
            .and_time(NaiveTime::from_hms_opt(23, 59, 0).unwrap())
            .format(DT_FORMAT)
            .to_string();

        let mut lines: Vec<String> = Vec::with_capacity(self.events.len() * 10 + 5);
        lines.push("BEGIN:VCALENDAR".to_string());
        lines.push("VERSION:2.0".to_string());
        lines.push(format!("PRODID:{}", options.prodid));

        for (index, session) in self.events.iter().enumerate() {
            let first = first_occurrence(range.start, session.day);
            let start = first.and_time(session.start);
            let end = start + Duration::minutes(i64::from(session.duration_minutes));

            lines.push("BEGIN:VEVENT".to_string());
            lines.push(format!(
                "UID:{}-{}-{}-{}@{}",
                self.id,
                session.day,
                session.start.format("%H:%M"),
                index,
                options.uid_namespace
            ));
            lines.push(format!("DTSTAMP:{dtstamp}"));
            lines.push(format!("SUMMARY:{}", escape_text(&session.title)));
            lines.push(format!("DTSTART:{}", start.format(DT_FORMAT)));
            lines.push(format!("DTEND:{}", end.format(DT_FORMAT)));
            lines.push(format!("RRULE:FREQ=WEEKLY;UNTIL={until}"));
            if !session.location.is_empty() {
                lines.push(format!("LOCATION:{}", escape_text(&session.location)));
            }
            if !session.description.is_empty() {
                lines.push(format!("DESCRIPTION:{}", escape_text(&session.description)));
            }
            lines.push("END:VEVENT".to_string());
        }

        lines.push("END:VCALENDAR".to_string());
        lines.push(String::new());
        Ok(lines.join("\r\n"))
    }
}

/// First date on or after `from` falling on `day`, by the linear forward scan
/// over the calendar numbering. Never more than seven steps.
fn first_occurrence(from: NaiveDate, day: Weekday) -> NaiveDate {
    let mut date = from;
    for _ in 0..7 {
        if date.weekday().num_days_from_sunday() == day.sunday_index() {
            break;
        }
        date = date.succ_opt().expect("semester date out of calendar range");
    }
    date
}

/// RFC 5545 TEXT escaping. Backslash goes first so the escapes introduced for
/// the other three characters are not escaped again.
pub fn escape_text(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_handles_each_special_character() {
        assert_eq!(escape_text("a,b"), "a\\,b");
        assert_eq!(escape_text("a;b"), "a\\;b");
        assert_eq!(escape_text("a\\b"), "a\\\\b");
        assert_eq!(escape_text("a\nb"), "a\\nb");
        assert_eq!(escape_text("plain"), "plain");
    }

    #[test]
    fn escape_does_not_double_escape() {
        // A backslash followed by a comma must produce two independent
        // escapes, not an escaped escape sequence.
        assert_eq!(escape_text("\\,"), "\\\\\\,");
    }

    #[test]
    fn first_occurrence_scans_forward_only() {
        let monday = NaiveDate::from_ymd_opt(2026, 1, 19).unwrap();
        assert_eq!(
            first_occurrence(monday, Weekday::Monday),
            NaiveDate::from_ymd_opt(2026, 1, 19).unwrap()
        );
        assert_eq!(
            first_occurrence(monday, Weekday::Wednesday),
            NaiveDate::from_ymd_opt(2026, 1, 21).unwrap()
        );
        // Sunday is after Saturday in the scan even though its calendar
        // number is 0.
        assert_eq!(
            first_occurrence(monday, Weekday::Sunday),
            NaiveDate::from_ymd_opt(2026, 1, 25).unwrap()
        );
    }
}
