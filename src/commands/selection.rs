//! Command targets.

use crate::grid::{resolve_grid, GridEntry, ResolvedGrid};
use crate::model::{CellPath, Document};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Where the caret is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "at", rename_all = "snake_case")]
pub enum Position {
    /// Between blocks, at a root offset
    Root(usize),
    /// Inside a non-table block
    Block(usize),
    /// Inside a table cell
    Cell(CellPath),
}

/// The current selection: a caret plus an optional multi-cell selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Caret position
    pub focus: Position,

    /// Explicitly selected cells (empty = just the caret)
    #[serde(default)]
    pub cells: Vec<CellPath>,
}

impl Default for Selection {
    fn default() -> Self {
        Self::root(0)
    }
}

impl Selection {
    /// Caret at a root offset.
    pub fn root(offset: usize) -> Self {
        Self {
            focus: Position::Root(offset),
            cells: Vec::new(),
        }
    }

    /// Caret inside a block.
    pub fn in_block(index: usize) -> Self {
        Self {
            focus: Position::Block(index),
            cells: Vec::new(),
        }
    }

    /// Caret inside a cell.
    pub fn in_cell(path: CellPath) -> Self {
        Self {
            focus: Position::Cell(path),
            cells: Vec::new(),
        }
    }

    /// Multi-cell selection; the caret goes to the first cell.
    pub fn with_cells(cells: Vec<CellPath>) -> Self {
        let focus = cells
            .first()
            .map(|&p| Position::Cell(p))
            .unwrap_or(Position::Root(0));
        Self { focus, cells }
    }

    /// Cell holding the caret.
    pub fn focus_cell(&self) -> Option<CellPath> {
        match self.focus {
            Position::Cell(path) => Some(path),
            _ => None,
        }
    }

    /// Check if the caret is inside a table.
    pub fn is_in_table(&self) -> bool {
        self.focus_cell().is_some()
    }

    /// Move the caret to the cell covering a grid coordinate.
    ///
    /// Coordinates outside the grid are clamped to its last row/column.
    pub fn place(&mut self, document: &Document, table: usize, row: usize, column: usize) {
        self.cells.clear();
        let target = document.table(table).ok().and_then(|t| {
            let grid = resolve_grid(t);
            let row = row.min(grid.row_count().checked_sub(1)?);
            let column = column.min(grid.width().checked_sub(1)?);
            grid.entry_at(row, column).map(|e| e.cell_path(table))
        });
        self.focus = Position::Cell(target.unwrap_or(CellPath::new(table, row, 0)));
        self.normalize(document);
    }

    /// Make every path valid for the given document.
    ///
    /// Invalid selected cells are dropped. An invalid caret is clamped into
    /// its table, or placed between blocks when the table is gone.
    pub fn normalize(&mut self, document: &Document) {
        self.cells.retain(|&p| document.cell(p).is_some());
        let blocks = document.block_count();

        self.focus = match self.focus {
            Position::Cell(path) if document.cell(path).is_none() => {
                clamp_cell(document, path).unwrap_or(Position::Root(path.table.min(blocks)))
            }
            Position::Block(index) if index >= blocks => Position::Root(blocks),
            Position::Root(offset) if offset > blocks => Position::Root(blocks),
            focus => focus,
        };
    }
}

fn clamp_cell(document: &Document, path: CellPath) -> Option<Position> {
    let table = document.table(path.table).ok()?;
    let row = path.row.min(table.row_count().checked_sub(1)?);
    let cells = table.rows[row].cells.len();
    let cell = path.cell.min(cells.checked_sub(1)?);
    Some(Position::Cell(CellPath::new(path.table, row, cell)))
}

/// The cells a command operates on, resolved against their table's grid.
#[derive(Debug, Clone)]
pub(crate) struct SelectedCells {
    /// Block index of the table
    pub table: usize,
    /// Heading rows of the table
    pub heading_rows: usize,
    /// Heading columns of the table
    pub heading_columns: usize,
    /// Grid of the table
    pub grid: ResolvedGrid,
    /// Anchor entry of the caret cell
    pub focus: GridEntry,
    /// Anchor entries of all affected cells, row-major
    pub entries: Vec<GridEntry>,
}

impl SelectedCells {
    /// Resolve a selection; `None` when the caret is not in a valid cell.
    pub fn resolve(document: &Document, selection: &Selection) -> Option<Self> {
        let path = selection.focus_cell()?;
        let table = document.table(path.table).ok()?;
        let grid = resolve_grid(table);
        let focus = *grid.anchor_of(path.row, path.cell)?;

        let mut entries: Vec<GridEntry> = selection
            .cells
            .iter()
            .filter(|p| p.table == path.table)
            .filter_map(|p| grid.anchor_of(p.row, p.cell).copied())
            .collect();
        if entries.is_empty() {
            entries.push(focus);
        }
        entries.sort_by_key(|e| (e.anchor_row, e.column));
        entries.dedup();

        Some(Self {
            table: path.table,
            heading_rows: table.heading_rows,
            heading_columns: table.heading_columns,
            grid,
            focus,
            entries,
        })
    }

    /// Grid rows covered by the affected cells.
    ///
    /// Spans reaching past the last row are cut at the grid edge.
    pub fn rows(&self) -> RangeInclusive<usize> {
        let first = self.entries.iter().map(|e| e.anchor_row).min().unwrap_or(0);
        let last = self.entries.iter().map(|e| e.end_row()).max().unwrap_or(1);
        first..=last.min(self.grid.row_count()).max(first + 1) - 1
    }

    /// Grid columns covered by the affected cells.
    pub fn columns(&self) -> RangeInclusive<usize> {
        let first = self.entries.iter().map(|e| e.column).min().unwrap_or(0);
        let last = self.entries.iter().map(|e| e.end_column()).max().unwrap_or(1);
        first..=last.min(self.grid.width()).max(first + 1) - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Paragraph, Table, TableCell, TableRow};

    fn doc() -> Document {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("intro"));
        // 00 (cs 2) | 02
        // 10 | 11   | 12
        doc.add_table(Table::from_rows(vec![
            TableRow::new(vec![TableCell::text("00").colspan(2), TableCell::text("02")]),
            TableRow::from_strings(["10", "11", "12"]),
        ]));
        doc
    }

    #[test]
    fn test_place_uses_grid_coordinates() {
        let doc = doc();
        let mut selection = Selection::root(0);

        selection.place(&doc, 1, 0, 1);
        assert_eq!(selection.focus, Position::Cell(CellPath::new(1, 0, 0)));

        selection.place(&doc, 1, 9, 9);
        assert_eq!(selection.focus, Position::Cell(CellPath::new(1, 1, 2)));
    }

    #[test]
    fn test_normalize_clamps_focus() {
        let doc = doc();

        let mut selection = Selection::in_cell(CellPath::new(1, 0, 5));
        selection.normalize(&doc);
        assert_eq!(selection.focus, Position::Cell(CellPath::new(1, 0, 1)));

        let mut selection = Selection::in_cell(CellPath::new(4, 0, 0));
        selection.normalize(&doc);
        assert_eq!(selection.focus, Position::Root(2));

        let mut selection = Selection::with_cells(vec![CellPath::new(1, 0, 0), CellPath::new(1, 3, 0)]);
        selection.normalize(&doc);
        assert_eq!(selection.cells, vec![CellPath::new(1, 0, 0)]);
    }

    #[test]
    fn test_selected_cells_ranges() {
        let doc = doc();
        let selection = Selection::with_cells(vec![CellPath::new(1, 1, 1), CellPath::new(1, 0, 0)]);
        let selected = SelectedCells::resolve(&doc, &selection).unwrap();

        assert_eq!(selected.entries.len(), 2);
        assert_eq!(selected.entries[0].cell_index, 0);
        assert_eq!(selected.rows(), 0..=1);
        assert_eq!(selected.columns(), 0..=1);
        assert_eq!(selected.focus.anchor_row, 1);
    }

    #[test]
    fn test_overflowing_rowspan_stays_inside_grid() {
        let mut doc = Document::new();
        doc.add_table(Table::from_rows(vec![
            TableRow::new(vec![TableCell::text("A").rowspan(3), TableCell::text("B")]),
            TableRow::from_strings(["C"]),
        ]));
        let selected =
            SelectedCells::resolve(&doc, &Selection::in_cell(CellPath::new(0, 0, 0))).unwrap();

        assert_eq!(selected.rows(), 0..=1);
        assert_eq!(selected.columns(), 0..=0);
    }

    #[test]
    fn test_selection_outside_table() {
        let doc = doc();
        assert!(SelectedCells::resolve(&doc, &Selection::in_block(0)).is_none());
        assert!(SelectedCells::resolve(&doc, &Selection::in_cell(CellPath::new(0, 0, 0))).is_none());
        assert!(!Selection::root(1).is_in_table());
    }
}
