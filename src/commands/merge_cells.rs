//! Multi-cell merge command.

use super::utils::merge_content;
use super::{selected_cells, CommandOptions, SelectedCells, Selection, TableCommand};
use crate::engine::Model;
use crate::error::Result;
use crate::model::{Attribute, CellPath, Document};
use std::cmp::Reverse;

/// Merges all selected cells into the top-left one.
///
/// Enabled when at least two cells are selected, together they cover their
/// bounding rectangle exactly, and they lie on one side of the heading-row
/// boundary. Content is folded in row-major order.
#[derive(Debug, Clone, Default)]
pub struct MergeCellsCommand;

impl MergeCellsCommand {
    /// Create the command.
    pub fn new() -> Self {
        Self
    }

    fn can_merge(selected: &SelectedCells) -> bool {
        if selected.entries.len() < 2 {
            return false;
        }
        let rows = selected.rows();
        let columns = selected.columns();
        let bounding = rows.clone().count() * columns.count();
        let covered: usize = selected.entries.iter().map(|e| e.rowspan * e.colspan).sum();

        let boundary = selected.heading_rows;
        let same_section = (*rows.start() < boundary) == (*rows.end() < boundary);

        covered == bounding && same_section
    }
}

impl TableCommand for MergeCellsCommand {
    fn name(&self) -> &str {
        "merge-table-cells"
    }

    fn is_enabled(&self, document: &Document, selection: &Selection) -> bool {
        SelectedCells::resolve(document, selection).is_some_and(|s| Self::can_merge(&s))
    }

    fn execute(
        &self,
        model: &mut Model,
        selection: &mut Selection,
        _options: &CommandOptions,
    ) -> Result<()> {
        let selected = selected_cells(self, model.document(), selection)?;
        let table = selected.table;
        let survivor = selected.entries[0];
        let rowspan = selected.rows().count();
        let colspan = selected.columns().count();
        let mut absorbed: Vec<CellPath> = selected.entries[1..]
            .iter()
            .map(|e| e.cell_path(table))
            .collect();

        model.change(|writer| {
            let target = survivor.cell_path(table);
            for &path in &absorbed {
                merge_content(writer, path, target)?;
            }
            writer.set_attribute(target, Attribute::Rowspan, rowspan)?;
            writer.set_attribute(target, Attribute::Colspan, colspan)?;

            absorbed.sort_by_key(|&p| Reverse(p));
            for path in absorbed {
                writer.remove_node(path)?;
            }
            Ok(())
        })?;

        selection.place(model.document(), table, survivor.anchor_row, survivor.column);
        Ok(())
    }
}
