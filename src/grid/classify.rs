//! Heading/body classification.
//!
//! Whether a cell is a heading cell is a function of its resolved position and
//! the table's `heading_rows`/`heading_columns` counters. It is never stored.

use super::GridEntry;
use crate::model::Table;
use serde::Serialize;
use std::ops::Range;

/// Kind of a cell as derived from its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    /// Rendered as a header cell
    Heading,
    /// Rendered as a body cell
    Body,
}

/// Classify a resolved cell.
pub fn cell_kind(entry: &GridEntry, heading_rows: usize, heading_columns: usize) -> CellKind {
    if entry.anchor_row < heading_rows || entry.column < heading_columns {
        CellKind::Heading
    } else {
        CellKind::Body
    }
}

/// Rows belonging to the header section.
pub fn heading_section(table: &Table) -> Range<usize> {
    0..table.heading_rows.min(table.row_count())
}

/// Rows belonging to the body section.
pub fn body_section(table: &Table) -> Range<usize> {
    table.heading_rows.min(table.row_count())..table.row_count()
}
