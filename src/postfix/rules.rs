//! Violation detection.
//!
//! Each rule inspects a table (resolving its grid as needed) and returns the
//! corrections that fix every violation of its kind, in application order.
//! Rules never look at how the table got into its state, which is what makes
//! the repair pass order-independent.

use super::Correction;
use crate::grid::{resolve_grid, GridEntry};
use crate::model::{Attribute, Table};
use std::collections::BTreeMap;

/// A repair rule: name plus detection function.
pub(crate) type Rule = (&'static str, fn(&Table) -> Vec<Correction>);

/// Rules in the order they run within one pass.
pub(crate) const RULES: &[Rule] = &[
    ("normalize-spans", normalize_spans),
    ("remove-empty-rows", remove_empty_rows),
    ("clamp-rowspans", clamp_rowspans),
    ("clamp-heading-rows", clamp_heading_rows),
    ("split-heading-spans", split_heading_spans),
    ("truncate-colliding-colspans", truncate_colliding_colspans),
    ("pad-short-rows", pad_short_rows),
    ("clamp-heading-columns", clamp_heading_columns),
];

/// Spans of 0 become 1.
pub(crate) fn normalize_spans(table: &Table) -> Vec<Correction> {
    let mut corrections = Vec::new();
    for (row, r) in table.rows.iter().enumerate() {
        for (cell, c) in r.cells.iter().enumerate() {
            if c.rowspan == 0 {
                corrections.push(Correction::set_span(row, cell, Attribute::Rowspan, 1));
            }
            if c.colspan == 0 {
                corrections.push(Correction::set_span(row, cell, Attribute::Colspan, 1));
            }
        }
    }
    corrections
}

/// Rows without literal cells are removed; cells spanning across them shrink.
pub(crate) fn remove_empty_rows(table: &Table) -> Vec<Correction> {
    let empty: Vec<usize> = table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, r)| r.is_empty())
        .map(|(i, _)| i)
        .collect();

    if empty.len() == table.rows.len() {
        return vec![Correction::RemoveTable];
    }
    if empty.is_empty() {
        return Vec::new();
    }

    let grid = resolve_grid(table);
    let mut corrections: Vec<Correction> = grid
        .anchors()
        .filter_map(|e| {
            let covered = empty
                .iter()
                .filter(|&&r| r > e.anchor_row && r < e.end_row())
                .count();
            (covered > 0).then(|| {
                Correction::set_span(e.anchor_row, e.cell_index, Attribute::Rowspan, e.rowspan - covered)
            })
        })
        .collect();

    let removed_headings = empty.iter().filter(|&&r| r < table.heading_rows).count();
    if removed_headings > 0 {
        corrections.push(Correction::SetHeading {
            attribute: Attribute::HeadingRows,
            value: table.heading_rows - removed_headings,
        });
    }

    corrections.extend(empty.iter().rev().map(|&row| Correction::RemoveRow { row }));
    corrections
}

/// Rowspans reaching past the last row are clamped.
pub(crate) fn clamp_rowspans(table: &Table) -> Vec<Correction> {
    let rows = table.row_count();
    resolve_grid(table)
        .anchors()
        .filter(|e| e.end_row() > rows)
        .map(|e| Correction::set_span(e.anchor_row, e.cell_index, Attribute::Rowspan, rows - e.anchor_row))
        .collect()
}

/// `heading_rows` is clamped to the number of rows.
pub(crate) fn clamp_heading_rows(table: &Table) -> Vec<Correction> {
    if table.heading_rows > table.row_count() {
        vec![Correction::SetHeading {
            attribute: Attribute::HeadingRows,
            value: table.row_count(),
        }]
    } else {
        Vec::new()
    }
}

/// Cells crossing the heading-row boundary are cut at the boundary.
///
/// The cell keeps its content and stops at the boundary; a new empty cell with
/// the same colspan covers the remaining rows on the other side.
pub(crate) fn split_heading_spans(table: &Table) -> Vec<Correction> {
    let boundary = table.heading_rows;
    if boundary == 0 || boundary >= table.row_count() {
        return Vec::new();
    }

    let grid = resolve_grid(table);
    let mut crossing: Vec<&GridEntry> = grid
        .anchors()
        .filter(|e| e.anchor_row < boundary && e.end_row() > boundary)
        .collect();
    crossing.sort_by_key(|e| (e.column, e.anchor_row, e.cell_index));

    let mut corrections: Vec<Correction> = crossing
        .iter()
        .map(|e| {
            Correction::set_span(e.anchor_row, e.cell_index, Attribute::Rowspan, boundary - e.anchor_row)
        })
        .collect();
    corrections.extend(crossing.iter().enumerate().map(|(inserted, e)| {
        Correction::InsertCell {
            row: boundary,
            index: grid.insertion_index(boundary, e.column) + inserted,
            rowspan: e.end_row() - boundary,
            colspan: e.colspan,
        }
    }));
    corrections
}

/// Literal cells running into a span carried from an earlier row are narrowed.
pub(crate) fn truncate_colliding_colspans(table: &Table) -> Vec<Correction> {
    let grid = resolve_grid(table);
    let mut corrections = Vec::new();

    for entries in grid.rows() {
        for anchor in entries.iter().filter(|e| e.is_anchor()) {
            let blocked = entries
                .iter()
                .filter(|other| other.column > anchor.column && other.column < anchor.end_column())
                .map(|other| other.column)
                .min();
            if let Some(column) = blocked {
                corrections.push(Correction::set_span(
                    anchor.anchor_row,
                    anchor.cell_index,
                    Attribute::Colspan,
                    column - anchor.column,
                ));
            }
        }
    }
    corrections
}

/// Rows narrower than the grid receive empty 1x1 cells at their end.
pub(crate) fn pad_short_rows(table: &Table) -> Vec<Correction> {
    let grid = resolve_grid(table);
    let mut missing: BTreeMap<usize, usize> = BTreeMap::new();
    for row in 0..grid.row_count() {
        let gaps = grid.gaps(row).len();
        if gaps > 0 {
            missing.insert(row, gaps);
        }
    }

    missing
        .into_iter()
        .flat_map(|(row, count)| {
            let start = table.rows[row].cells.len();
            (0..count).map(move |k| Correction::InsertCell {
                row,
                index: start + k,
                rowspan: 1,
                colspan: 1,
            })
        })
        .collect()
}

/// `heading_columns` is clamped to the grid width.
pub(crate) fn clamp_heading_columns(table: &Table) -> Vec<Correction> {
    let width = resolve_grid(table).width();
    if table.heading_columns > width {
        vec![Correction::SetHeading {
            attribute: Attribute::HeadingColumns,
            value: width,
        }]
    } else {
        Vec::new()
    }
}
