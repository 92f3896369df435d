// File: ./src/parse/cell.rs
use crate::parse::{direct_cells, direct_rows, inline_text};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

static DETAIL_TABLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table.detailed").expect("static selector"));

const FALLBACK_TITLE: &str = "Session";

/// A cell that applies to the whole group at its slot.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SharedEntry {
    pub title: String,
    pub lecturers: String,
    pub location: String,
}

/// One subgroup's column of a nested breakdown table.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DetailEntry {
    pub subgroup: String,
    pub title: String,
    pub lecturers: String,
    pub location: String,
}

impl DetailEntry {
    /// Session description carrying the subgroup attribution.
    pub fn description(&self) -> String {
        format!("{}\nGroup {}", self.lecturers, self.subgroup)
    }
}

/// The two shapes a day cell can take.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum CellKind {
    Shared(SharedEntry),
    Detail(Vec<DetailEntry>),
}

/// Classifies one day cell: a nested `table.detailed` makes it a per-subgroup
/// breakdown, anything else is free text for the whole group.
pub fn interpret(cell: ElementRef) -> CellKind {
    if let Some(detail) = cell.select(&DETAIL_TABLE).next() {
        return CellKind::Detail(transpose_detail(detail));
    }

    let mut lines = cell_lines(cell).into_iter();
    CellKind::Shared(SharedEntry {
        title: lines.next().unwrap_or_else(|| FALLBACK_TITLE.to_string()),
        lecturers: lines.next().unwrap_or_default(),
        location: lines.next().unwrap_or_default(),
    })
}

/// The embedded table is authored row-major (row 0 = subgroup ids, row 1 =
/// titles, row 2 = lecturers, row 3 = locations) while subgroup identity runs
/// column-major, so each cell lands at its row's position inside the bucket
/// of its column.
fn transpose_detail(table: ElementRef) -> Vec<DetailEntry> {
    let mut columns: Vec<Vec<String>> = Vec::new();
    for (field_index, row) in direct_rows(table).into_iter().enumerate() {
        for (column_index, cell) in direct_cells(row).into_iter().enumerate() {
            if columns.len() <= column_index {
                columns.resize_with(column_index + 1, Vec::new);
            }
            let column = &mut columns[column_index];
            if column.len() <= field_index {
                column.resize(field_index + 1, String::new());
            }
            column[field_index] = inline_text(cell);
        }
    }

    columns
        .into_iter()
        .filter_map(|fields| {
            let field = |i: usize| fields.get(i).cloned().unwrap_or_default();
            let subgroup = field(0);
            if subgroup.is_empty() {
                log::warn!("detail column without a subgroup identifier; skipped");
                return None;
            }
            let title = field(1);
            Some(DetailEntry {
                subgroup,
                title: if title.is_empty() {
                    FALLBACK_TITLE.to_string()
                } else {
                    title
                },
                lecturers: field(2),
                location: field(3),
            })
        })
        .collect()
}

/// Visible text lines of a shared cell. `<br>` separates lines; blank lines
/// and placeholder markers ("no session" dashes) are dropped.
fn cell_lines(cell: ElementRef) -> Vec<String> {
    let mut flat = String::new();
    for node in cell.descendants() {
        if let Some(element) = node.value().as_element() {
            if element.name() == "br" {
                flat.push('\n');
            }
        } else if let Some(text) = node.value().as_text() {
            flat.push_str(text);
        }
    }
    flat.lines().filter_map(clean_line).collect()
}

fn clean_line(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.chars().all(|c| matches!(c, '-' | '–' | '—')) {
        return None;
    }
    Some(trimmed.to_string())
}
