//! Table mutations shared by the structural commands.
//!
//! Every helper resolves the grid once up front, computes the full set of
//! primitive mutations from it and then applies them in an order that keeps
//! literal indices valid.

use crate::engine::Writer;
use crate::error::{Error, Result};
use crate::grid::{resolve_grid, GridEntry, ResolvedGrid};
use crate::model::{
    Attribute, CellPath, NodePath, ParentPath, RowPath, TableCell, TableRow,
};
use std::cmp::Reverse;

/// Grid and heading counters of a table, read through the writer.
pub(crate) fn snapshot(writer: &Writer<'_>, table: usize) -> Result<(ResolvedGrid, usize, usize)> {
    let t = writer.table(table)?;
    Ok((resolve_grid(t), t.heading_rows, t.heading_columns))
}

/// Cell node at a path.
pub(crate) fn cell_at<'w>(writer: &'w Writer<'_>, path: CellPath) -> Result<&'w TableCell> {
    writer
        .document()
        .cell(path)
        .ok_or_else(|| Error::InvalidPath(NodePath::Cell(path).to_string()))
}

/// Insert `count` empty rows before row `at`.
///
/// Cells spanning across the insertion point grow instead of receiving new
/// cells. Inserting inside the heading section grows it.
pub(crate) fn insert_rows(writer: &mut Writer<'_>, table: usize, at: usize, count: usize) -> Result<()> {
    let (grid, heading_rows, _) = snapshot(writer, table)?;

    let spanning: Vec<GridEntry> = grid
        .entries(at)
        .iter()
        .filter(|e| e.anchor_row < at)
        .copied()
        .collect();
    let cells = (0..grid.width())
        .filter(|&c| !spanning.iter().any(|e| (e.column..e.end_column()).contains(&c)))
        .count();

    for e in &spanning {
        writer.set_attribute(e.cell_path(table), Attribute::Rowspan, e.rowspan + count)?;
    }
    for _ in 0..count {
        let row = TableRow::new((0..cells).map(|_| TableCell::empty()).collect());
        writer.insert_node(ParentPath::Table(table), at, row)?;
    }
    if at < heading_rows {
        writer.set_attribute(NodePath::Block(table), Attribute::HeadingRows, heading_rows + count)?;
    }
    Ok(())
}

/// Insert `count` empty columns before grid column `at`.
///
/// Cells spanning across the insertion point grow instead of receiving new
/// cells. Inserting inside the heading columns grows them.
pub(crate) fn insert_columns(
    writer: &mut Writer<'_>,
    table: usize,
    at: usize,
    count: usize,
) -> Result<()> {
    let (grid, _, heading_columns) = snapshot(writer, table)?;

    let mut widen = Vec::new();
    let mut inserts = Vec::new();
    for (row, entries) in grid.rows().iter().enumerate() {
        match entries.iter().find(|e| e.column < at && at < e.end_column()) {
            // Spanned entries grow through their anchor row.
            Some(e) if e.is_anchor() => widen.push(*e),
            Some(_) => {}
            None => inserts.push((row, grid.insertion_index(row, at))),
        }
    }

    for e in widen {
        writer.set_attribute(e.cell_path(table), Attribute::Colspan, e.colspan + count)?;
    }
    for (row, index) in inserts {
        for _ in 0..count {
            writer.insert_node(ParentPath::Row(RowPath::new(table, row)), index, TableCell::empty())?;
        }
    }
    if at < heading_columns {
        writer.set_attribute(
            NodePath::Block(table),
            Attribute::HeadingColumns,
            heading_columns + count,
        )?;
    }
    Ok(())
}

/// Remove grid rows `first..=last`.
///
/// Cells reaching into the range from above lose the removed rows. Cells
/// starting inside the range and reaching below it move, content included, to
/// the first row after the range at the same column.
pub(crate) fn remove_rows(writer: &mut Writer<'_>, table: usize, first: usize, last: usize) -> Result<()> {
    let (grid, heading_rows, _) = snapshot(writer, table)?;
    let after = last + 1;

    let mut moved: Vec<(usize, TableCell)> = Vec::new();
    for e in grid.anchors() {
        if e.anchor_row < first && e.end_row() > first {
            let overlap = e.end_row().min(after) - first;
            writer.set_attribute(e.cell_path(table), Attribute::Rowspan, e.rowspan - overlap)?;
        } else if (first..=last).contains(&e.anchor_row) && e.end_row() > after {
            let cell = cell_at(writer, e.cell_path(table))?.clone();
            moved.push((e.column, cell.rowspan(e.end_row() - after)));
        }
    }

    moved.sort_by_key(|(column, _)| *column);
    for (k, (column, cell)) in moved.into_iter().enumerate() {
        let index = grid.insertion_index(after, column) + k;
        writer.insert_node(ParentPath::Row(RowPath::new(table, after)), index, cell)?;
    }

    for row in (first..=last).rev() {
        writer.remove_node(RowPath::new(table, row))?;
    }

    let removed_headings = (first..=last).filter(|&r| r < heading_rows).count();
    if removed_headings > 0 {
        writer.set_attribute(
            NodePath::Block(table),
            Attribute::HeadingRows,
            heading_rows - removed_headings,
        )?;
    }
    Ok(())
}

/// Remove grid columns `first..=last`.
///
/// Cells entirely inside the range are removed; cells straddling it shrink.
pub(crate) fn remove_columns(
    writer: &mut Writer<'_>,
    table: usize,
    first: usize,
    last: usize,
) -> Result<()> {
    let (grid, _, heading_columns) = snapshot(writer, table)?;
    let after = last + 1;

    let mut removals = Vec::new();
    for e in grid.anchors() {
        let overlap = e.end_column().min(after).saturating_sub(e.column.max(first));
        if overlap == 0 {
            continue;
        }
        if overlap == e.colspan {
            removals.push(e.cell_path(table));
        } else {
            writer.set_attribute(e.cell_path(table), Attribute::Colspan, e.colspan - overlap)?;
        }
    }

    removals.sort_by_key(|&p| Reverse(p));
    for path in removals {
        writer.remove_node(path)?;
    }

    let removed_headings = (first..=last).filter(|&c| c < heading_columns).count();
    if removed_headings > 0 {
        writer.set_attribute(
            NodePath::Block(table),
            Attribute::HeadingColumns,
            heading_columns - removed_headings,
        )?;
    }
    Ok(())
}

/// Fold the content of `from` into `to`.
///
/// Empty source content is dropped; an empty target is replaced rather than
/// appended to.
pub(crate) fn merge_content(writer: &mut Writer<'_>, from: CellPath, to: CellPath) -> Result<()> {
    if cell_at(writer, from)?.is_empty() {
        return Ok(());
    }
    if cell_at(writer, to)?.is_empty() {
        writer.take_content(to)?;
    }
    writer.move_content(from, to)
}
