//! Table types.

use super::Paragraph;
use crate::grid::resolve_grid;
use serde::{Deserialize, Serialize};

/// A table structure.
///
/// Rows own their cells; a cell's grid position is never stored and must be
/// derived with [`resolve_grid`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Rows in the table
    pub rows: Vec<TableRow>,

    /// Number of leading rows rendered as header (0 = no header)
    #[serde(default)]
    pub heading_rows: usize,

    /// Number of leading columns rendered as header (0 = no header)
    #[serde(default)]
    pub heading_columns: usize,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from rows.
    pub fn from_rows(rows: Vec<TableRow>) -> Self {
        Self {
            rows,
            ..Self::new()
        }
    }

    /// Create a `rows` x `columns` table of empty cells.
    pub fn uniform(rows: usize, columns: usize) -> Self {
        Self::from_rows(
            (0..rows)
                .map(|_| TableRow::new((0..columns).map(|_| TableCell::empty()).collect()))
                .collect(),
        )
    }

    /// Set heading rows and return self.
    pub fn with_heading_rows(mut self, rows: usize) -> Self {
        self.heading_rows = rows;
        self
    }

    /// Set heading columns and return self.
    pub fn with_heading_columns(mut self, columns: usize) -> Self {
        self.heading_columns = columns;
        self
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of grid columns, accounting for spans.
    pub fn column_count(&self) -> usize {
        resolve_grid(self).width()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a cell by row and literal index.
    pub fn cell(&self, row: usize, index: usize) -> Option<&TableCell> {
        self.rows.get(row).and_then(|r| r.cells.get(index))
    }

    /// Get a mutable cell by row and literal index.
    pub fn cell_mut(&mut self, row: usize, index: usize) -> Option<&mut TableCell> {
        self.rows.get_mut(row).and_then(|r| r.cells.get_mut(index))
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<TableCell>,
}

impl TableRow {
    /// Create a new row with cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { cells }
    }

    /// Create a row from text values.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(values.into_iter().map(TableCell::text).collect())
    }

    /// Check if the row has no literal cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get plain text representation.
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.plain_text())
            .collect::<Vec<_>>()
            .join("\t")
    }
}

/// A table cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell content (paragraphs)
    pub content: Vec<Paragraph>,

    /// Number of rows this cell spans
    #[serde(default = "default_span")]
    pub rowspan: usize,

    /// Number of columns this cell spans
    #[serde(default = "default_span")]
    pub colspan: usize,
}

fn default_span() -> usize {
    1
}

impl TableCell {
    /// Create a new cell with text content.
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            return Self::empty();
        }
        Self::with_content(vec![Paragraph::with_text(text)])
    }

    /// Create an empty cell.
    pub fn empty() -> Self {
        Self::with_content(Vec::new())
    }

    /// Create a cell with multiple paragraphs.
    pub fn with_content(content: Vec<Paragraph>) -> Self {
        Self {
            content,
            rowspan: 1,
            colspan: 1,
        }
    }

    /// Set colspan and return self.
    pub fn colspan(mut self, span: usize) -> Self {
        self.colspan = span;
        self
    }

    /// Set rowspan and return self.
    pub fn rowspan(mut self, span: usize) -> Self {
        self.rowspan = span;
        self
    }

    /// Get plain text content.
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .map(|p| p.plain_text())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Check if the cell is empty.
    pub fn is_empty(&self) -> bool {
        self.content.iter().all(Paragraph::is_empty)
    }

    /// Check if this cell spans multiple rows or columns.
    pub fn is_merged(&self) -> bool {
        self.rowspan > 1 || self.colspan > 1
    }
}
