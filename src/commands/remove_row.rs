//! Remove row command.

use super::utils::remove_rows;
use super::{selected_cells, CommandOptions, SelectedCells, Selection, TableCommand};
use crate::engine::Model;
use crate::error::Result;
use crate::model::Document;

/// Removes every row covered by the selected cells.
///
/// Disabled when that would remove all rows of the table.
#[derive(Debug, Clone, Default)]
pub struct RemoveRowCommand;

impl RemoveRowCommand {
    /// Create the command.
    pub fn new() -> Self {
        Self
    }
}

impl TableCommand for RemoveRowCommand {
    fn name(&self) -> &str {
        "remove-table-row"
    }

    fn is_enabled(&self, document: &Document, selection: &Selection) -> bool {
        SelectedCells::resolve(document, selection).is_some_and(|selected| {
            let rows = selected.rows();
            *rows.start() > 0 || rows.end() + 1 < selected.grid.row_count()
        })
    }

    fn execute(
        &self,
        model: &mut Model,
        selection: &mut Selection,
        _options: &CommandOptions,
    ) -> Result<()> {
        let selected = selected_cells(self, model.document(), selection)?;
        let rows = selected.rows();
        let (first, last) = (*rows.start(), *rows.end());

        model.change(|writer| remove_rows(writer, selected.table, first, last))?;

        selection.place(model.document(), selected.table, first, selected.focus.column);
        Ok(())
    }
}
