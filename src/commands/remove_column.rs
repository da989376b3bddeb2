//! Remove column command.

use super::utils::remove_columns;
use super::{selected_cells, CommandOptions, SelectedCells, Selection, TableCommand};
use crate::engine::Model;
use crate::error::Result;
use crate::model::Document;

/// Removes every grid column covered by the selected cells.
///
/// Disabled when that would remove all columns of the table.
#[derive(Debug, Clone, Default)]
pub struct RemoveColumnCommand;

impl RemoveColumnCommand {
    /// Create the command.
    pub fn new() -> Self {
        Self
    }
}

impl TableCommand for RemoveColumnCommand {
    fn name(&self) -> &str {
        "remove-table-column"
    }

    fn is_enabled(&self, document: &Document, selection: &Selection) -> bool {
        SelectedCells::resolve(document, selection).is_some_and(|selected| {
            let columns = selected.columns();
            *columns.start() > 0 || columns.end() + 1 < selected.grid.width()
        })
    }

    fn execute(
        &self,
        model: &mut Model,
        selection: &mut Selection,
        _options: &CommandOptions,
    ) -> Result<()> {
        let selected = selected_cells(self, model.document(), selection)?;
        let columns = selected.columns();
        let (first, last) = (*columns.start(), *columns.end());

        model.change(|writer| remove_columns(writer, selected.table, first, last))?;

        selection.place(model.document(), selected.table, selected.focus.anchor_row, first);
        Ok(())
    }
}
