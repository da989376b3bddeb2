//! Heading rows/columns commands.

use super::{selected_cells, CommandOptions, SelectedCells, Selection, TableCommand};
use crate::engine::Model;
use crate::error::Result;
use crate::model::{Attribute, Document, NodePath};

/// Which heading counter a command sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingAxis {
    /// `headingRows`
    Rows,
    /// `headingColumns`
    Columns,
}

/// Sets the number of heading rows or columns of the caret's table.
///
/// With `count` the counter is set to that value. Without it the command
/// toggles: when the selection is in the heading section the boundary moves
/// up to the first selected row (column), otherwise it moves down past the
/// last one. Only the attribute is written; the repair pass splits cells that
/// end up crossing the boundary.
#[derive(Debug, Clone)]
pub struct SetHeadingCommand {
    axis: HeadingAxis,
}

impl SetHeadingCommand {
    /// Create the command for one axis.
    pub fn new(axis: HeadingAxis) -> Self {
        Self { axis }
    }

    fn attribute(&self) -> Attribute {
        match self.axis {
            HeadingAxis::Rows => Attribute::HeadingRows,
            HeadingAxis::Columns => Attribute::HeadingColumns,
        }
    }

    /// Current counter, first and last selected index along the axis.
    fn bounds(&self, selected: &SelectedCells) -> (usize, usize, usize) {
        match self.axis {
            HeadingAxis::Rows => {
                let rows = selected.rows();
                (selected.heading_rows, *rows.start(), *rows.end())
            }
            HeadingAxis::Columns => {
                let columns = selected.columns();
                (selected.heading_columns, *columns.start(), *columns.end())
            }
        }
    }
}

impl TableCommand for SetHeadingCommand {
    fn name(&self) -> &str {
        match self.axis {
            HeadingAxis::Rows => "set-table-heading-rows",
            HeadingAxis::Columns => "set-table-heading-columns",
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
        let value = options.count.unwrap_or_else(|| {
            let (current, first, last) = self.bounds(&selected);
            if first < current {
                first
            } else {
                last + 1
            }
        });
        let table = selected.table;
        let attribute = self.attribute();

        model.change(|writer| writer.set_attribute(NodePath::Block(table), attribute, value))?;

        let focus = selected.focus;
        selection.place(model.document(), table, focus.anchor_row, focus.column);
        Ok(())
    }

    /// Whether the selection starts inside the heading section.
    fn value(&self, document: &Document, selection: &Selection) -> Option<bool> {
        let selected = SelectedCells::resolve(document, selection)?;
        let (current, first, _) = self.bounds(&selected);
        Some(first < current)
    }
}
