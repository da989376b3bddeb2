//! Insert table command.

use super::{disabled, CommandOptions, Position, Selection, TableCommand};
use crate::engine::Model;
use crate::error::Result;
use crate::model::{Block, CellPath, Document, ParentPath, Table};

/// Rows of a new table when not given.
pub const DEFAULT_TABLE_ROWS: usize = 2;

/// Columns of a new table when not given.
pub const DEFAULT_TABLE_COLUMNS: usize = 2;

/// Inserts a `rows` x `columns` table of empty cells.
///
/// Enabled whenever the caret is not inside a table cell. With the caret
/// between blocks the table goes at that offset; inside a block it goes right
/// after that block. The caret moves to the first cell of the new table.
#[derive(Debug, Clone, Default)]
pub struct InsertTableCommand;

impl InsertTableCommand {
    /// Create the command.
    pub fn new() -> Self {
        Self
    }

    fn insertion_index(document: &Document, selection: &Selection) -> Option<usize> {
        match selection.focus {
            Position::Root(offset) if offset <= document.block_count() => Some(offset),
            Position::Block(index) if index < document.block_count() => Some(index + 1),
            _ => None,
        }
    }
}

impl TableCommand for InsertTableCommand {
    fn name(&self) -> &str {
        "insert-table"
    }

    fn is_enabled(&self, document: &Document, selection: &Selection) -> bool {
        Self::insertion_index(document, selection).is_some()
    }

    fn execute(
        &self,
        model: &mut Model,
        selection: &mut Selection,
        options: &CommandOptions,
    ) -> Result<()> {
        let index =
            Self::insertion_index(model.document(), selection).ok_or_else(|| disabled(self))?;
        let rows = options.rows.filter(|&n| n > 0).unwrap_or(DEFAULT_TABLE_ROWS);
        let columns = options
            .columns
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_TABLE_COLUMNS);

        model.change(|writer| {
            writer.insert_node(
                ParentPath::Root,
                index,
                Block::Table(Table::uniform(rows, columns)),
            )
        })?;

        *selection = Selection::in_cell(CellPath::new(index, 0, 0));
        selection.normalize(model.document());
        Ok(())
    }
}
