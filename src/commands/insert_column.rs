//! Insert column commands.

use super::utils::insert_columns;
use super::{selected_cells, CommandOptions, SelectedCells, Selection, TableCommand};
use crate::engine::Model;
use crate::error::Result;
use crate::model::Document;

/// Where new columns go relative to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnOrder {
    /// Before the first selected column
    Before,
    /// After the last column covered by the selection
    After,
}

/// Inserts `count` (default 1) empty columns next to the selected cells.
#[derive(Debug, Clone)]
pub struct InsertColumnCommand {
    order: ColumnOrder,
}

impl InsertColumnCommand {
    /// Create the command for one side.
    pub fn new(order: ColumnOrder) -> Self {
        Self { order }
    }
}

impl TableCommand for InsertColumnCommand {
    fn name(&self) -> &str {
        match self.order {
            ColumnOrder::Before => "insert-table-column-before",
            ColumnOrder::After => "insert-table-column-after",
        }
    }

    fn is_enabled(&self, document: &Document, selection: &Selection) -> bool {
        SelectedCells::resolve(document, selection).is_some()
    }

    fn execute(
        &self,
        model: &mut Model,
        selection: &mut Selection,
        options: &CommandOptions,
    ) -> Result<()> {
        let selected = selected_cells(self, model.document(), selection)?;
        let count = options.insert_count();
        let columns = selected.columns();
        let at = match self.order {
            ColumnOrder::Before => *columns.start(),
            ColumnOrder::After => columns.end() + 1,
        };

        model.change(|writer| insert_columns(writer, selected.table, at, count))?;

        let focus = selected.focus;
        let column = if focus.column >= at {
            focus.column + count
        } else {
            focus.column
        };
        selection.place(model.document(), selected.table, focus.anchor_row, column);
        Ok(())
    }
}
