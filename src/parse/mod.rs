// File: ./src/parse/mod.rs
//! Reconstruction of timetable data from the published HTML export.
pub mod cell;
pub mod grid;

use crate::config::ParseOptions;
use crate::model::item::{Group, Session, TimetableDataset};
use crate::model::merge::coalesce;
use chrono::Utc;
use indexmap::IndexMap;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;

const UNKNOWN_LABEL: &str = "Unknown";

/// Parses one whole document into the canonical dataset.
///
/// Best effort by design: the exports are externally authored, so a malformed
/// table degrades to defaults instead of failing the remaining tables.
pub fn parse_document(html: &str, options: &ParseOptions) -> TimetableDataset {
    let document = Html::parse_document(html);

    let mut groups = Vec::new();
    match Selector::parse(&format!("table[id^=\"{}\"]", options.table_id_prefix)) {
        Ok(selector) => {
            for table in document.select(&selector) {
                assemble_table(table, options, &mut groups);
            }
        }
        Err(err) => log::error!(
            "invalid table id prefix {:?}: {err}",
            options.table_id_prefix
        ),
    }
    dedupe_group_ids(&mut groups);

    log::debug!("parsed {} group(s)", groups.len());
    TimetableDataset {
        generated_at: Utc::now(),
        groups,
    }
}

/// Builds the output groups of one schedule table.
///
/// Shared sessions belong to every group the table produces; a subgroup's own
/// sessions only to that subgroup. A table without any detail cell is a single
/// group named by its header label.
fn assemble_table(table: ElementRef, options: &ParseOptions, groups: &mut Vec<Group>) {
    let main_group = main_group_label(table);
    let mut shared: Vec<Session> = Vec::new();
    let mut subgroups: IndexMap<String, Vec<Session>> = IndexMap::new();

    for slot in grid::walk_table(table, options) {
        match cell::interpret(slot.cell) {
            cell::CellKind::Shared(entry) => shared.push(Session {
                day: slot.day,
                start: slot.start,
                duration_minutes: slot.duration_minutes,
                title: entry.title,
                location: entry.location,
                description: entry.lecturers,
            }),
            cell::CellKind::Detail(entries) => {
                for entry in entries {
                    let description = entry.description();
                    subgroups
                        .entry(entry.subgroup.clone())
                        .or_default()
                        .push(Session {
                            day: slot.day,
                            start: slot.start,
                            duration_minutes: slot.duration_minutes,
                            title: entry.title,
                            location: entry.location,
                            description,
                        });
                }
            }
        }
    }

    log::debug!(
        "table {:?}: {} shared session(s), {} subgroup(s)",
        main_group,
        shared.len(),
        subgroups.len()
    );

    if subgroups.is_empty() {
        groups.push(Group {
            id: main_group.clone(),
            label: main_group.clone(),
            parent_group: main_group,
            events: coalesce(shared),
        });
        return;
    }

    for (subgroup_id, own) in subgroups {
        let mut events = shared.clone();
        events.extend(own);
        groups.push(Group {
            id: subgroup_id.clone(),
            label: format!("{subgroup_id} ({main_group})"),
            parent_group: main_group.clone(),
            events: coalesce(events),
        });
    }
}

/// The table's main-group label: the text of its multi-column header cell.
/// Falls back to "Unknown" so one malformed table cannot abort the parse.
fn main_group_label(table: ElementRef) -> String {
    for row in direct_rows(table) {
        let cells = direct_cells(row);
        if cells.iter().any(|c| has_class(*c, "yAxis")) {
            break; // body reached without finding a label
        }
        for cell in cells {
            if span_attr(cell, "colspan") > 1 && !has_class(cell, "xAxis") {
                let text = inline_text(cell);
                if !text.is_empty() {
                    return text;
                }
            }
        }
    }
    log::warn!("schedule table without a main-group header cell");
    UNKNOWN_LABEL.to_string()
}

/// Group ids must be pairwise distinct across the dataset; colliding ids (two
/// malformed tables both falling back to "Unknown", say) get a numeric suffix
/// in document order. Labels keep the un-suffixed form.
fn dedupe_group_ids(groups: &mut [Group]) {
    let mut seen: HashSet<String> = HashSet::new();
    for group in groups.iter_mut() {
        if seen.insert(group.id.clone()) {
            continue;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{}-{}", group.id, n);
            if seen.insert(candidate.clone()) {
                log::warn!("duplicate group id {:?} renamed to {:?}", group.id, candidate);
                group.id = candidate;
                break;
            }
            n += 1;
        }
    }
}

// --- DOM HELPERS ---
// Tables may nest (detail cells embed their own table), so row and cell
// lookups must stay on direct children rather than selecting descendants.

/// Direct child rows of a table: `<tr>` directly under it or under its
/// thead/tbody/tfoot, never rows of a nested table.
pub(crate) fn direct_rows(table: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    let mut rows = Vec::new();
    for child in table.children() {
        let Some(element) = ElementRef::wrap(child) else {
            continue;
        };
        match element.value().name() {
            "tr" => rows.push(element),
            "thead" | "tbody" | "tfoot" => {
                for inner in element.children() {
                    if let Some(row) = ElementRef::wrap(inner)
                        && row.value().name() == "tr"
                    {
                        rows.push(row);
                    }
                }
            }
            _ => {}
        }
    }
    rows
}

/// Direct `<td>`/`<th>` children of a row.
pub(crate) fn direct_cells(row: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| matches!(cell.value().name(), "td" | "th"))
        .collect()
}

pub(crate) fn has_class(element: ElementRef, class: &str) -> bool {
    element
        .value()
        .attr("class")
        .is_some_and(|v| v.split_whitespace().any(|c| c == class))
}

/// Reads a cell's `rowspan`/`colspan` attribute, defaulting to 1.
pub(crate) fn span_attr(cell: ElementRef, name: &str) -> u32 {
    cell.value()
        .attr(name)
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(1)
}

/// Whitespace-collapsed text of one element, as a single line.
pub(crate) fn inline_text(element: ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
