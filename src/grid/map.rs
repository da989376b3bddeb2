//! Grid resolution: maps a table's row/cell tree onto absolute coordinates.

use crate::model::{CellPath, Table};
use serde::Serialize;

/// Whether a grid entry is the cell's own row or a row it spans into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// The cell is a literal child of this row
    Anchor,
    /// The cell belongs to an earlier row and its rowspan carries it here
    Spanned,
}

/// One cell as seen from one grid row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GridEntry {
    /// Grid row this entry was produced for
    pub row: usize,
    /// Resolved column of the cell's left edge
    pub column: usize,
    /// Row where the cell is a literal child
    pub anchor_row: usize,
    /// Literal index of the cell in its anchor row
    pub cell_index: usize,
    /// Rows covered by the cell (never 0)
    pub rowspan: usize,
    /// Columns covered by the cell (never 0)
    pub colspan: usize,
    /// Anchor or spanned
    pub kind: EntryKind,
}

impl GridEntry {
    /// Check if this entry is the cell's literal row.
    pub fn is_anchor(&self) -> bool {
        self.kind == EntryKind::Anchor
    }

    /// First column past the cell.
    pub fn end_column(&self) -> usize {
        self.column + self.colspan
    }

    /// First row past the cell.
    pub fn end_row(&self) -> usize {
        self.anchor_row + self.rowspan
    }

    /// Check if the cell's rectangle covers a coordinate.
    pub fn covers(&self, row: usize, column: usize) -> bool {
        (self.anchor_row..self.end_row()).contains(&row)
            && (self.column..self.end_column()).contains(&column)
    }

    /// Path of the literal cell node inside the table at block `table`.
    pub fn cell_path(&self, table: usize) -> CellPath {
        CellPath::new(table, self.anchor_row, self.cell_index)
    }
}

/// The fully resolved grid of a table.
///
/// Transient by nature: it borrows nothing from the table and must be
/// recomputed after any mutation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ResolvedGrid {
    rows: Vec<Vec<GridEntry>>,
    width: usize,
}

/// A span from an earlier row that still covers upcoming rows.
#[derive(Debug, Clone, Copy)]
struct PendingSpan {
    column: usize,
    colspan: usize,
    rowspan: usize,
    anchor_row: usize,
    cell_index: usize,
}

impl PendingSpan {
    fn entry_at(&self, row: usize) -> GridEntry {
        GridEntry {
            row,
            column: self.column,
            anchor_row: self.anchor_row,
            cell_index: self.cell_index,
            rowspan: self.rowspan,
            colspan: self.colspan,
            kind: EntryKind::Spanned,
        }
    }

    fn end_row(&self) -> usize {
        self.anchor_row + self.rowspan
    }
}

/// Resolve a table into grid coordinates.
///
/// Rows are walked top to bottom with a column cursor. Before each literal
/// cell is placed, spans carried from earlier rows that start at or behind the
/// cursor are skipped. Carried spans left over after the last literal cell
/// extend the row to the right. Malformed tables resolve best-effort: missing
/// coordinates are reported by [`ResolvedGrid::gaps`], collisions show up as
/// overlapping entries.
pub fn resolve_grid(table: &Table) -> ResolvedGrid {
    let mut rows: Vec<Vec<GridEntry>> = Vec::with_capacity(table.rows.len());
    let mut pending: Vec<PendingSpan> = Vec::new();

    for (row_index, row) in table.rows.iter().enumerate() {
        let mut entries = Vec::with_capacity(row.cells.len() + pending.len());
        let mut carried = pending.iter().peekable();
        let mut cursor = 0;

        for (cell_index, cell) in row.cells.iter().enumerate() {
            while let Some(span) = carried.next_if(|s| s.column <= cursor) {
                entries.push(span.entry_at(row_index));
                cursor = cursor.max(span.column + span.colspan);
            }

            let colspan = cell.colspan.max(1);
            entries.push(GridEntry {
                row: row_index,
                column: cursor,
                anchor_row: row_index,
                cell_index,
                rowspan: cell.rowspan.max(1),
                colspan,
                kind: EntryKind::Anchor,
            });
            cursor += colspan;
        }
        entries.extend(carried.map(|span| span.entry_at(row_index)));
        entries.sort_by_key(|e| e.column);

        pending.retain(|s| s.end_row() > row_index + 1);
        pending.extend(
            entries
                .iter()
                .filter(|e| e.is_anchor() && e.rowspan > 1)
                .map(|e| PendingSpan {
                    column: e.column,
                    colspan: e.colspan,
                    rowspan: e.rowspan,
                    anchor_row: e.anchor_row,
                    cell_index: e.cell_index,
                }),
        );
        pending.sort_by_key(|s| (s.column, s.anchor_row));

        rows.push(entries);
    }

    let width = rows
        .iter()
        .map(|entries| row_width(entries))
        .max()
        .unwrap_or(0);

    ResolvedGrid { rows, width }
}

fn row_width(entries: &[GridEntry]) -> usize {
    entries.iter().map(GridEntry::end_column).max().unwrap_or(0)
}

impl ResolvedGrid {
    /// Grid width: the maximum occupied width over all rows.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of grid rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Occupied width of a single row.
    pub fn row_width(&self, row: usize) -> usize {
        self.rows.get(row).map(|e| row_width(e)).unwrap_or(0)
    }

    /// Entries of a row, ordered by column.
    pub fn entries(&self, row: usize) -> &[GridEntry] {
        self.rows.get(row).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All rows of entries.
    pub fn rows(&self) -> &[Vec<GridEntry>] {
        &self.rows
    }

    /// Entry covering a coordinate.
    pub fn entry_at(&self, row: usize, column: usize) -> Option<&GridEntry> {
        self.entries(row)
            .iter()
            .find(|e| (e.column..e.end_column()).contains(&column))
    }

    /// Anchor entry of the literal cell at `cell_index` in `row`.
    pub fn anchor_of(&self, row: usize, cell_index: usize) -> Option<&GridEntry> {
        self.entries(row)
            .iter()
            .find(|e| e.is_anchor() && e.cell_index == cell_index)
    }

    /// All anchor entries in row-major order.
    pub fn anchors(&self) -> impl Iterator<Item = &GridEntry> {
        self.rows.iter().flatten().filter(|e| e.is_anchor())
    }

    /// Literal child index at which a cell placed at `column` belongs in `row`.
    pub fn insertion_index(&self, row: usize, column: usize) -> usize {
        self.entries(row)
            .iter()
            .filter(|e| e.is_anchor() && e.column < column)
            .count()
    }

    /// Columns of `row` inside the grid width that no cell covers.
    pub fn gaps(&self, row: usize) -> Vec<usize> {
        let entries = self.entries(row);
        (0..self.width)
            .filter(|&c| !entries.iter().any(|e| (e.column..e.end_column()).contains(&c)))
            .collect()
    }

    /// Coordinates covered by more than one cell, row-major.
    pub fn overlaps(&self) -> Vec<(usize, usize)> {
        let mut result = Vec::new();
        for (row, entries) in self.rows.iter().enumerate() {
            let width = row_width(entries);
            for column in 0..width {
                let covering = entries
                    .iter()
                    .filter(|e| (e.column..e.end_column()).contains(&column))
                    .count();
                if covering > 1 {
                    result.push((row, column));
                }
            }
        }
        result
    }

    /// Check that every coordinate is covered by exactly one cell.
    pub fn is_regular(&self) -> bool {
        self.rows.iter().all(|entries| {
            let mut cursor = 0;
            for entry in entries {
                if entry.column != cursor {
                    return false;
                }
                cursor = entry.end_column();
            }
            cursor == self.width
        })
    }
}
