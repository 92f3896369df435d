// File: ./src/parse/grid.rs
use crate::config::ParseOptions;
use crate::model::week::Weekday;
use crate::parse::{direct_cells, direct_rows, has_class, inline_text, span_attr};
use chrono::NaiveTime;
use scraper::ElementRef;

/// One newly starting cell on the reconstructed day/time grid.
#[derive(Debug, Clone, Copy)]
pub struct RawSlot<'a> {
    pub day: Weekday,
    pub start: NaiveTime,
    pub duration_minutes: u32,
    pub cell: ElementRef<'a>,
}

/// Walks one schedule table and emits every newly starting day cell.
///
/// The markup only materializes a cell for columns not covered by an earlier
/// `rowspan`, so the grid cannot be random-accessed at (row, col). Instead
/// `active_span` keeps, per day column, how many upcoming rows are still
/// covered: a column with a live span consumes no physical cell and emits
/// nothing; every other column consumes the next cell in the row. A row that
/// runs out of physical cells before the open columns do is ragged input and
/// the leftover columns are skipped silently.
pub fn walk_table<'a>(table: ElementRef<'a>, options: &ParseOptions) -> Vec<RawSlot<'a>> {
    let days = day_headers(table);
    if days.iter().all(Option::is_none) {
        log::warn!("schedule table has no recognizable day headers");
        return Vec::new();
    }

    let mut active_span = vec![0u32; days.len()];
    let mut slots = Vec::new();

    for row in direct_rows(table) {
        let cells = direct_cells(row);
        let Some(header) = cells.first().filter(|c| has_class(**c, "yAxis")) else {
            continue; // label or day-header row, not a body row
        };
        let start = parse_slot_time(&inline_text(*header));
        if start.is_none() {
            log::warn!(
                "row header {:?} is not a time of day; row emits nothing",
                inline_text(*header)
            );
        }

        // The span ledger must advance even when the row emits nothing,
        // otherwise later rows read stale occupancy.
        let mut body = cells[1..].iter();
        for (day_index, remaining) in active_span.iter_mut().enumerate() {
            if *remaining > 0 {
                *remaining -= 1;
                continue; // covered by a multi-row cell from an earlier row
            }
            let Some(cell) = body.next() else {
                continue; // ragged row: open column with no physical cell
            };
            let rows = span_attr(*cell, "rowspan");
            if rows > 1 {
                *remaining = rows - 1;
            }
            if let (Some(start), Some(day)) = (start, days[day_index]) {
                slots.push(RawSlot {
                    day,
                    start,
                    duration_minutes: rows * options.slot_minutes,
                    cell: *cell,
                });
            }
        }
    }
    slots
}

/// Day columns in header order. An unparseable header keeps its column slot
/// (as `None`) so the columns to its right stay aligned.
fn day_headers(table: ElementRef) -> Vec<Option<Weekday>> {
    let mut days = Vec::new();
    for row in direct_rows(table) {
        let cells = direct_cells(row);
        if cells.iter().any(|c| has_class(*c, "yAxis")) {
            break; // body begins, header region is over
        }
        for cell in cells {
            if has_class(cell, "xAxis") {
                days.push(Weekday::parse_header(&inline_text(cell)));
            }
        }
    }
    days
}

/// Leading "HH:MM" of a row header like "07:00" or "7:00 - 8:00".
fn parse_slot_time(text: &str) -> Option<NaiveTime> {
    let token = text
        .trim()
        .split(|c: char| c.is_whitespace() || c == '-')
        .next()?;
    NaiveTime::parse_from_str(token, "%H:%M").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_time_accepts_common_header_shapes() {
        let t = |s| NaiveTime::parse_from_str(s, "%H:%M").unwrap();
        assert_eq!(parse_slot_time("07:00"), Some(t("07:00")));
        assert_eq!(parse_slot_time("7:00"), Some(t("07:00")));
        assert_eq!(parse_slot_time(" 14:00 - 15:00 "), Some(t("14:00")));
        assert_eq!(parse_slot_time("noon"), None);
        assert_eq!(parse_slot_time(""), None);
    }
}
