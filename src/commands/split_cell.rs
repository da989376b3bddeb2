//! Split cell commands.

use super::{selected_cells, CommandOptions, SelectedCells, Selection, TableCommand};
use crate::engine::{Model, Writer};
use crate::error::Result;
use crate::grid::WalkOptions;
use crate::model::{Attribute, Document, NodePath, ParentPath, RowPath, TableCell, TableRow};

/// Axis along which the caret cell is cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitDirection {
    /// Cut into a left and a right part
    Vertically,
    /// Cut into a top and a bottom part
    Horizontally,
}

/// Splits the caret cell in two.
///
/// A spanning cell keeps the first half of its span (rounded down) and a new
/// empty cell takes the rest. A cell spanning a single column (row) makes room
/// first: every other cell covering that column (row) grows by one, so the
/// rest of the table looks unchanged.
#[derive(Debug, Clone)]
pub struct SplitCellCommand {
    direction: SplitDirection,
}

impl SplitCellCommand {
    /// Create the command for one axis.
    pub fn new(direction: SplitDirection) -> Self {
        Self { direction }
    }
}

impl TableCommand for SplitCellCommand {
    fn name(&self) -> &str {
        match self.direction {
            SplitDirection::Vertically => "split-table-cell-vertically",
            SplitDirection::Horizontally => "split-table-cell-horizontally",
        }
    }

    fn is_enabled(&self, document: &Document, selection: &Selection) -> bool {
        SelectedCells::resolve(document, selection).is_some()
    }

    fn execute(
        &self,
        model: &mut Model,
        selection: &mut Selection,
        _options: &CommandOptions,
    ) -> Result<()> {
        let selected = selected_cells(self, model.document(), selection)?;
        let direction = self.direction;

        model.change(|writer| match direction {
            SplitDirection::Vertically => split_vertically(writer, &selected),
            SplitDirection::Horizontally => split_horizontally(writer, &selected),
        })?;

        let focus = selected.focus;
        selection.place(model.document(), selected.table, focus.anchor_row, focus.column);
        Ok(())
    }
}

fn split_vertically(writer: &mut Writer<'_>, selected: &SelectedCells) -> Result<()> {
    let cell = selected.focus;
    let table = selected.table;
    let path = cell.cell_path(table);
    let parent = ParentPath::Row(path.row_path());

    if cell.colspan > 1 {
        let kept = cell.colspan / 2;
        writer.set_attribute(path, Attribute::Colspan, kept)?;
        let rest = TableCell::empty().rowspan(cell.rowspan).colspan(cell.colspan - kept);
        return writer.insert_node(parent, path.cell + 1, rest);
    }

    for other in selected
        .grid
        .walk(WalkOptions::new().column(cell.column))
        .filter(|e| e.cell_path(table) != path)
    {
        writer.set_attribute(other.cell_path(table), Attribute::Colspan, other.colspan + 1)?;
    }
    writer.insert_node(parent, path.cell + 1, TableCell::empty().rowspan(cell.rowspan))?;

    if cell.column < selected.heading_columns {
        writer.set_attribute(
            NodePath::Block(table),
            Attribute::HeadingColumns,
            selected.heading_columns + 1,
        )?;
    }
    Ok(())
}

fn split_horizontally(writer: &mut Writer<'_>, selected: &SelectedCells) -> Result<()> {
    let cell = selected.focus;
    let table = selected.table;
    let path = cell.cell_path(table);

    if cell.rowspan > 1 {
        let kept = cell.rowspan / 2;
        let row = cell.anchor_row + kept;
        writer.set_attribute(path, Attribute::Rowspan, kept)?;
        let rest = TableCell::empty().rowspan(cell.rowspan - kept).colspan(cell.colspan);
        return writer.insert_node(
            ParentPath::Row(RowPath::new(table, row)),
            selected.grid.insertion_index(row, cell.column),
            rest,
        );
    }

    let row = cell.anchor_row;
    for other in selected
        .grid
        .walk(WalkOptions::new().row(row).include_spanned())
        .filter(|e| e.cell_path(table) != path)
    {
        writer.set_attribute(other.cell_path(table), Attribute::Rowspan, other.rowspan + 1)?;
    }
    writer.insert_node(
        ParentPath::Table(table),
        row + 1,
        TableRow::new(vec![TableCell::empty().colspan(cell.colspan)]),
    )?;

    if row < selected.heading_rows {
        writer.set_attribute(
            NodePath::Block(table),
            Attribute::HeadingRows,
            selected.heading_rows + 1,
        )?;
    }
    Ok(())
}
