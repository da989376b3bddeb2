//! Command options.

/// Options passed to [`TableCommand::execute`](super::TableCommand::execute).
///
/// Each command reads only the fields it understands:
/// `insert-table` reads `rows`/`columns`, row and column insertion read
/// `count` as the number of rows/columns to insert, and the heading commands
/// read `count` as the absolute number of heading rows/columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOptions {
    /// Rows of a new table (None = 2)
    pub rows: Option<usize>,

    /// Columns of a new table (None = 2)
    pub columns: Option<usize>,

    /// Command-specific count
    pub count: Option<usize>,
}

impl CommandOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of rows.
    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = Some(rows);
        self
    }

    /// Set the number of columns.
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Set the count.
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    /// Count for insertions: at least 1.
    pub(crate) fn insert_count(&self) -> usize {
        self.count.unwrap_or(1).max(1)
    }
}
