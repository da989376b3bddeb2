//! Filtered iteration over a resolved grid.

use super::{GridEntry, ResolvedGrid};

/// Options for walking a resolved grid.
#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    /// First row to visit
    pub start_row: usize,

    /// Last row to visit (inclusive, None = last row of the table)
    pub end_row: Option<usize>,

    /// Only visit entries covering this column
    pub column: Option<usize>,

    /// Also visit entries carried into a row by a rowspan
    pub include_spanned: bool,
}

impl WalkOptions {
    /// Create new walk options visiting every anchor entry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the walk to rows `start..=end`.
    pub fn rows(mut self, start: usize, end: usize) -> Self {
        self.start_row = start;
        self.end_row = Some(end);
        self
    }

    /// Restrict the walk to a single row.
    pub fn row(self, row: usize) -> Self {
        self.rows(row, row)
    }

    /// Restrict the walk to entries covering a column.
    pub fn column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }

    /// Include spanned entries.
    pub fn include_spanned(mut self) -> Self {
        self.include_spanned = true;
        self
    }
}

/// Iterator returned by [`ResolvedGrid::walk`].
pub struct GridWalker<'a> {
    grid: &'a ResolvedGrid,
    options: WalkOptions,
    row: usize,
    index: usize,
}

impl<'a> Iterator for GridWalker<'a> {
    type Item = &'a GridEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let grid = self.grid;
        let last_row = self
            .options
            .end_row
            .unwrap_or(usize::MAX)
            .min(grid.row_count().saturating_sub(1));

        while self.row <= last_row && self.row < grid.row_count() {
            let entries = grid.entries(self.row);
            while let Some(entry) = entries.get(self.index) {
                self.index += 1;
                if self.accepts(entry) {
                    return Some(entry);
                }
            }
            self.row += 1;
            self.index = 0;
        }
        None
    }
}

impl GridWalker<'_> {
    fn accepts(&self, entry: &GridEntry) -> bool {
        if !entry.is_anchor() && !self.options.include_spanned {
            return false;
        }
        match self.options.column {
            Some(column) => (entry.column..entry.end_column()).contains(&column),
            None => true,
        }
    }
}

impl ResolvedGrid {
    /// Walk the grid row by row, left to right.
    pub fn walk(&self, options: WalkOptions) -> GridWalker<'_> {
        GridWalker {
            grid: self,
            row: options.start_row,
            index: 0,
            options,
        }
    }
}
