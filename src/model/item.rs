// File: ./src/model/item.rs
use crate::model::week::Weekday;
use chrono::{DateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// One scheduled weekly meeting of a group: a slot on the reconstructed grid.
///
/// `start` is a local wall-clock time; the dataset serializes it as "HH:MM".
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub day: Weekday,
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    pub duration_minutes: u32,
    pub title: String,
    pub location: String,
    pub description: String,
}

impl Session {
    /// Minutes since midnight of the session start.
    pub fn start_minutes(&self) -> u32 {
        self.start.hour() * 60 + self.start.minute()
    }

    /// Minutes since midnight of the session end.
    pub fn end_minutes(&self) -> u32 {
        self.start_minutes() + self.duration_minutes
    }
}

/// A named cohort: either a whole class or one of its subgroups.
///
/// `id` is unique across the whole parsed dataset. For a subgroup,
/// `parent_group` names the table the subgroup was extracted from and `label`
/// reads `"{id} ({parent_group})"`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub label: String,
    pub parent_group: String,
    pub events: Vec<Session>,
}

/// The canonical output of one parse run. Immutable after assembly;
/// re-running the parse fully replaces it.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableDataset {
    pub generated_at: DateTime<Utc>,
    pub groups: Vec<Group>,
}

impl TimetableDataset {
    pub fn find_group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }
}

/// Serde helper keeping session start times in the dataset's "HH:MM" shape.
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&text, FORMAT).map_err(serde::de::Error::custom)
    }
}
