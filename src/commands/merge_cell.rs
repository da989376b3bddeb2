//! Directional merge commands.

use super::utils::merge_content;
use super::{disabled, selected_cells, CommandOptions, SelectedCells, Selection, TableCommand};
use crate::engine::Model;
use crate::error::Result;
use crate::grid::GridEntry;
use crate::model::{Attribute, Document};

/// Neighbor to merge the caret cell with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeDirection {
    /// The cell above
    Up,
    /// The cell below
    Down,
    /// The cell to the left
    Left,
    /// The cell to the right
    Right,
}

impl MergeDirection {
    fn is_horizontal(self) -> bool {
        matches!(self, MergeDirection::Left | MergeDirection::Right)
    }
}

/// Merges the caret cell with its neighbor in one direction.
///
/// The neighbor must share the caret cell's full edge so that the union is a
/// rectangle. Vertical merges across the heading-row boundary are disabled.
/// The top-left cell of the pair survives and receives the other cell's
/// content.
#[derive(Debug, Clone)]
pub struct MergeCellCommand {
    direction: MergeDirection,
}

impl MergeCellCommand {
    /// Create the command for one direction.
    pub fn new(direction: MergeDirection) -> Self {
        Self { direction }
    }

    fn neighbor(&self, selected: &SelectedCells) -> Option<GridEntry> {
        let cell = selected.focus;
        let grid = &selected.grid;

        let other = match self.direction {
            MergeDirection::Right => grid.entry_at(cell.anchor_row, cell.end_column())?,
            MergeDirection::Left => grid.entry_at(cell.anchor_row, cell.column.checked_sub(1)?)?,
            MergeDirection::Down => grid.entry_at(cell.end_row(), cell.column)?,
            MergeDirection::Up => grid.entry_at(cell.anchor_row.checked_sub(1)?, cell.column)?,
        };

        let adjacent = match self.direction {
            MergeDirection::Right => other.column == cell.end_column(),
            MergeDirection::Left => other.end_column() == cell.column,
            MergeDirection::Down => other.anchor_row == cell.end_row(),
            MergeDirection::Up => other.end_row() == cell.anchor_row,
        };
        let same_edge = if self.direction.is_horizontal() {
            other.anchor_row == cell.anchor_row && other.rowspan == cell.rowspan
        } else {
            other.column == cell.column && other.colspan == cell.colspan
        };
        let boundary = selected.heading_rows;
        let crosses_heading = boundary > 0
            && match self.direction {
                MergeDirection::Down => cell.end_row() == boundary,
                MergeDirection::Up => cell.anchor_row == boundary,
                _ => false,
            };

        (adjacent && same_edge && !crosses_heading).then_some(*other)
    }
}

impl TableCommand for MergeCellCommand {
    fn name(&self) -> &str {
        match self.direction {
            MergeDirection::Up => "merge-table-cell-up",
            MergeDirection::Down => "merge-table-cell-down",
            MergeDirection::Left => "merge-table-cell-left",
            MergeDirection::Right => "merge-table-cell-right",
        }
    }

    fn is_enabled(&self, document: &Document, selection: &Selection) -> bool {
        SelectedCells::resolve(document, selection)
            .and_then(|selected| self.neighbor(&selected))
            .is_some()
    }

    fn execute(
        &self,
        model: &mut Model,
        selection: &mut Selection,
        _options: &CommandOptions,
    ) -> Result<()> {
        let selected = selected_cells(self, model.document(), selection)?;
        let other = self.neighbor(&selected).ok_or_else(|| disabled(self))?;
        let (survivor, absorbed) = match self.direction {
            MergeDirection::Right | MergeDirection::Down => (selected.focus, other),
            MergeDirection::Left | MergeDirection::Up => (other, selected.focus),
        };
        let table = selected.table;
        let horizontal = self.direction.is_horizontal();

        model.change(|writer| {
            let target = survivor.cell_path(table);
            merge_content(writer, absorbed.cell_path(table), target)?;
            if horizontal {
                writer.set_attribute(target, Attribute::Colspan, survivor.colspan + absorbed.colspan)?;
            } else {
                writer.set_attribute(target, Attribute::Rowspan, survivor.rowspan + absorbed.rowspan)?;
            }
            writer.remove_node(absorbed.cell_path(table)).map(|_| ())
        })?;

        selection.place(model.document(), table, survivor.anchor_row, survivor.column);
        Ok(())
    }
}
