// File: ./src/model/week.rs
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Day of the week as printed in a schedule table's column headers.
///
/// Two numbering schemes coexist on purpose and must never be unified:
/// [`Weekday::monday_index`] orders the display week (Monday first), used when
/// sorting sessions for merging; [`Weekday::sunday_index`] is the calendar
/// day-numbering (Sunday first), used for first-occurrence date arithmetic.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, Display,
)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Monday=0 … Sunday=6. Display/merge comparison order.
    pub fn monday_index(self) -> u32 {
        match self {
            Weekday::Monday => 0,
            Weekday::Tuesday => 1,
            Weekday::Wednesday => 2,
            Weekday::Thursday => 3,
            Weekday::Friday => 4,
            Weekday::Saturday => 5,
            Weekday::Sunday => 6,
        }
    }

    /// Sunday=0 … Saturday=6. Matches `chrono`'s `num_days_from_sunday`.
    pub fn sunday_index(self) -> u32 {
        match self {
            Weekday::Sunday => 0,
            Weekday::Monday => 1,
            Weekday::Tuesday => 2,
            Weekday::Wednesday => 3,
            Weekday::Thursday => 4,
            Weekday::Friday => 5,
            Weekday::Saturday => 6,
        }
    }

    /// Parses a column-header label leniently: case-insensitive, full names or
    /// any prefix of at least three letters ("Mon", "monday", "MONDAY ").
    pub fn parse_header(text: &str) -> Option<Weekday> {
        let prefix: String = text.trim().to_lowercase().chars().take(3).collect();
        let day = match prefix.as_str() {
            "mon" => Weekday::Monday,
            "tue" => Weekday::Tuesday,
            "wed" => Weekday::Wednesday,
            "thu" => Weekday::Thursday,
            "fri" => Weekday::Friday,
            "sat" => Weekday::Saturday,
            "sun" => Weekday::Sunday,
            _ => return None,
        };
        Some(day)
    }
}
