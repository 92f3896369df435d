// File: ./src/config.rs
// Explicit configuration values for parsing and encoding.
use serde::{Deserialize, Serialize};

fn default_table_id_prefix() -> String {
    "timetable".to_string()
}

// One grid row is one hour in every export observed so far. A different slot
// granularity is a configuration change, never derived from the document.
fn default_slot_minutes() -> u32 {
    60
}

fn default_prodid() -> String {
    "-//Horaire//Timetable Export//EN".to_string()
}

fn default_uid_namespace() -> String {
    "horaire".to_string()
}

/// Knobs for document parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Schedule tables are the ones whose `id` attribute starts with this.
    #[serde(default = "default_table_id_prefix")]
    pub table_id_prefix: String,

    /// Minutes of wall-clock time covered by one grid row.
    #[serde(default = "default_slot_minutes")]
    pub slot_minutes: u32,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            table_id_prefix: default_table_id_prefix(),
            slot_minutes: default_slot_minutes(),
        }
    }
}

/// Knobs for iCalendar output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodeOptions {
    /// PRODID line of the emitted calendar.
    #[serde(default = "default_prodid")]
    pub prodid: String,

    /// Suffix after the `@` of every generated UID.
    #[serde(default = "default_uid_namespace")]
    pub uid_namespace: String,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            prodid: default_prodid(),
            uid_namespace: default_uid_namespace(),
        }
    }
}
