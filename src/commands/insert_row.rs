//! Insert row commands.

use super::utils::insert_rows;
use super::{selected_cells, CommandOptions, SelectedCells, Selection, TableCommand};
use crate::engine::Model;
use crate::error::Result;
use crate::model::Document;

/// Where new rows go relative to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOrder {
    /// Before the first selected row
    Above,
    /// After the last row covered by the selection
    Below,
}

/// Inserts `count` (default 1) empty rows next to the selected cells.
#[derive(Debug, Clone)]
pub struct InsertRowCommand {
    order: RowOrder,
}

impl InsertRowCommand {
    /// Create the command for one side.
    pub fn new(order: RowOrder) -> Self {
        Self { order }
    }
}

impl TableCommand for InsertRowCommand {
    fn name(&self) -> &str {
        match self.order {
            RowOrder::Above => "insert-table-row-above",
            RowOrder::Below => "insert-table-row-below",
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
        let rows = selected.rows();
        let at = match self.order {
            RowOrder::Above => *rows.start(),
            RowOrder::Below => rows.end() + 1,
        };

        model.change(|writer| insert_rows(writer, selected.table, at, count))?;

        let focus = selected.focus;
        let row = if focus.anchor_row >= at {
            focus.anchor_row + count
        } else {
            focus.anchor_row
        };
        selection.place(model.document(), selected.table, row, focus.column);
        Ok(())
    }
}
