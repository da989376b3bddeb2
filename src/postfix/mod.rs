//! Table repair pass.
//!
//! Brings any table back to a well-formed state: every row has at least one
//! literal cell, every grid coordinate is covered by exactly one cell, no span
//! reaches past the table, no cell crosses the heading-row boundary and the
//! heading counts fit the table. The pass is a deterministic fixed point over
//! an ordered rule list; each rule sees a freshly resolved grid.
//!
//! Use [`TablePostFixer`] to run the pass after every transaction, or
//! [`repair_table`] to repair a detached table.

mod options;
mod rules;

pub use options::{RepairOptions, DEFAULT_MAX_PASSES};

use crate::engine::{ChangeSet, PostFixer, Writer};
use crate::error::Result;
use crate::model::{
    Attribute, Block, CellPath, Document, NodePath, ParentPath, RowPath, Table, TableCell,
};
use serde::Serialize;
use std::fmt;

/// A single corrective mutation emitted by a repair rule.
///
/// Row and cell indices are relative to the table being repaired and valid at
/// the moment the correction is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Correction {
    /// Set `rowspan` or `colspan` of a cell
    SetSpan {
        row: usize,
        cell: usize,
        attribute: Attribute,
        value: usize,
    },
    /// Set `headingRows` or `headingColumns` of the table
    SetHeading { attribute: Attribute, value: usize },
    /// Insert an empty cell
    InsertCell {
        row: usize,
        index: usize,
        rowspan: usize,
        colspan: usize,
    },
    /// Remove a row
    RemoveRow { row: usize },
    /// Remove the whole table
    RemoveTable,
}

impl Correction {
    /// Shorthand for [`Correction::SetSpan`].
    pub fn set_span(row: usize, cell: usize, attribute: Attribute, value: usize) -> Self {
        Self::SetSpan {
            row,
            cell,
            attribute,
            value,
        }
    }

    fn apply(&self, writer: &mut Writer<'_>, table: usize) -> Result<()> {
        match *self {
            Self::SetSpan {
                row,
                cell,
                attribute,
                value,
            } => writer.set_attribute(CellPath::new(table, row, cell), attribute, value),
            Self::SetHeading { attribute, value } => {
                writer.set_attribute(NodePath::Block(table), attribute, value)
            }
            Self::InsertCell {
                row,
                index,
                rowspan,
                colspan,
            } => writer.insert_node(
                ParentPath::Row(RowPath::new(table, row)),
                index,
                TableCell::empty().rowspan(rowspan).colspan(colspan),
            ),
            Self::RemoveRow { row } => writer.remove_node(RowPath::new(table, row)).map(|_| ()),
            Self::RemoveTable => writer.remove_node(NodePath::Block(table)).map(|_| ()),
        }
    }
}

impl fmt::Display for Correction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetSpan {
                row,
                cell,
                attribute,
                value,
            } => write!(f, "set {} of cell [{}, {}] to {}", attribute.name(), row, cell, value),
            Self::SetHeading { attribute, value } => {
                write!(f, "set {} to {}", attribute.name(), value)
            }
            Self::InsertCell {
                row,
                index,
                rowspan,
                colspan,
            } => write!(
                f,
                "insert {}x{} cell at [{}, {}]",
                rowspan, colspan, row, index
            ),
            Self::RemoveRow { row } => write!(f, "remove row {}", row),
            Self::RemoveTable => write!(f, "remove table"),
        }
    }
}

/// What a repair run did to one table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepairReport {
    /// Number of rule passes run
    pub passes: usize,
    /// Corrections in the order they were applied
    pub corrections: Vec<Correction>,
    /// The table was removed from the document
    pub removed: bool,
    /// A pass found nothing to correct
    pub settled: bool,
}

impl RepairReport {
    /// Check if the table was modified.
    pub fn is_changed(&self) -> bool {
        !self.corrections.is_empty()
    }
}

/// Result of repairing a detached table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepairOutcome {
    /// The table was already well-formed
    Unchanged,
    /// The repaired table
    Repaired(Table),
    /// The table had no cells left and must be dropped
    Removed,
}

/// Repair the table at block index `table` through the writer.
pub fn fix_table(
    writer: &mut Writer<'_>,
    table: usize,
    options: &RepairOptions,
) -> Result<RepairReport> {
    let mut report = RepairReport::default();

    while report.passes < options.max_passes {
        report.passes += 1;
        let mut fixed = false;

        for (name, rule) in rules::RULES {
            let corrections = rule(writer.table(table)?);
            if corrections.is_empty() {
                continue;
            }
            fixed = true;
            for correction in &corrections {
                log::debug!("Table {}: {} ({})", table, correction, name);
                correction.apply(writer, table)?;
            }
            let removed = corrections.contains(&Correction::RemoveTable);
            report.corrections.extend(corrections);
            if removed {
                report.removed = true;
                return Ok(report);
            }
        }

        if !fixed {
            report.settled = true;
            return Ok(report);
        }
    }

    log::warn!(
        "Table {} still malformed after {} repair passes",
        table,
        options.max_passes
    );
    Ok(report)
}

/// Repair a detached table.
pub fn repair_table(table: &Table, options: &RepairOptions) -> Result<RepairOutcome> {
    let mut document = Document::from_blocks(vec![Block::Table(table.clone())]);
    let report = {
        let mut writer = Writer::new(&mut document);
        fix_table(&mut writer, 0, options)?
    };

    if report.removed {
        return Ok(RepairOutcome::Removed);
    }
    if !report.is_changed() {
        return Ok(RepairOutcome::Unchanged);
    }
    match document.blocks.pop() {
        Some(Block::Table(table)) => Ok(RepairOutcome::Repaired(table)),
        _ => Ok(RepairOutcome::Removed),
    }
}

/// Post-fixer running the repair pass over every changed table.
#[derive(Debug, Clone, Default)]
pub struct TablePostFixer {
    options: RepairOptions,
}

impl TablePostFixer {
    /// Create a post-fixer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a post-fixer with custom options.
    pub fn with_options(options: RepairOptions) -> Self {
        Self { options }
    }
}

impl PostFixer for TablePostFixer {
    fn name(&self) -> &str {
        "table-repair"
    }

    fn fix(&self, writer: &mut Writer<'_>, changed: &ChangeSet) -> Result<bool> {
        let mut fixed = false;
        // Highest index first: removing a table leaves lower indices valid.
        for &index in changed.iter().rev() {
            let is_table = writer
                .document()
                .blocks
                .get(index)
                .and_then(Block::as_table)
                .is_some();
            if !is_table {
                continue;
            }
            fixed |= fix_table(writer, index, &self.options)?.is_changed();
        }
        Ok(fixed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Model;
    use crate::model::{Paragraph, TableRow};
    use std::sync::Arc;

    fn repaired(table: &Table) -> Table {
        match repair_table(table, &RepairOptions::default()).unwrap() {
            RepairOutcome::Repaired(table) => table,
            other => panic!("expected repaired table, got {:?}", other),
        }
    }

    #[test]
    fn test_well_formed_table_unchanged() {
        let table = Table::from_rows(vec![
            TableRow::new(vec![TableCell::text("00").colspan(2)]),
            TableRow::from_strings(["10", "11"]),
        ])
        .with_heading_rows(1);
        assert_eq!(
            repair_table(&table, &RepairOptions::default()).unwrap(),
            RepairOutcome::Unchanged
        );
    }

    #[test]
    fn test_short_row_padded() {
        let table = Table::from_rows(vec![
            TableRow::from_strings(["00"]),
            TableRow::from_strings(["10", "11", "12"]),
        ]);
        let fixed = repaired(&table);

        assert_eq!(fixed.rows[0].cells.len(), 3);
        assert!(fixed.rows[0].cells[1].is_empty());
        assert!(fixed.rows[0].cells[2].is_empty());
        assert_eq!(fixed.rows[1], table.rows[1]);
    }

    #[test]
    fn test_heading_boundary_split() {
        // 00 (rs 3) | 01
        //           | 11
        //           | 21
        let table = Table::from_rows(vec![
            TableRow::new(vec![TableCell::text("00").rowspan(3), TableCell::text("01")]),
            TableRow::from_strings(["11"]),
            TableRow::from_strings(["21"]),
        ])
        .with_heading_rows(2);
        let fixed = repaired(&table);

        assert_eq!(fixed.rows[0].cells[0].rowspan, 2);
        assert_eq!(fixed.rows[0].cells[0].plain_text(), "00");
        assert_eq!(fixed.rows[2].cells.len(), 2);
        assert!(fixed.rows[2].cells[0].is_empty());
        assert_eq!(fixed.rows[2].cells[1].plain_text(), "21");
    }

    #[test]
    fn test_rowless_table_removed() {
        let table = Table::from_rows(vec![TableRow::default()]);
        assert_eq!(
            repair_table(&table, &RepairOptions::default()).unwrap(),
            RepairOutcome::Removed
        );
    }

    #[test]
    fn test_repair_is_idempotent() {
        let table = Table::from_rows(vec![
            TableRow::new(vec![TableCell::text("00").rowspan(9).colspan(0)]),
            TableRow::default(),
            TableRow::from_strings(["20", "21", "22"]),
        ])
        .with_heading_rows(1)
        .with_heading_columns(7);
        let fixed = repaired(&table);

        assert_eq!(
            repair_table(&fixed, &RepairOptions::default()).unwrap(),
            RepairOutcome::Unchanged
        );
        assert_eq!(fixed.row_count(), 2);
        assert_eq!(fixed.heading_columns, 4);
    }

    #[test]
    fn test_report_records_corrections() {
        let mut doc = Document::from_blocks(vec![Block::Table(Table::from_rows(vec![
            TableRow::from_strings(["00"]),
            TableRow::from_strings(["10", "11"]),
        ]))]);
        let mut writer = Writer::new(&mut doc);
        let report = fix_table(&mut writer, 0, &RepairOptions::default()).unwrap();

        assert_eq!(
            report.corrections,
            vec![Correction::InsertCell {
                row: 0,
                index: 1,
                rowspan: 1,
                colspan: 1
            }]
        );
        assert_eq!(report.passes, 2);
        assert!(report.settled);
        assert_eq!(
            report.corrections[0].to_string(),
            "insert 1x1 cell at [0, 1]"
        );
    }

    #[test]
    fn test_pass_limit_reported() {
        let mut doc = Document::from_blocks(vec![Block::Table(Table::from_rows(vec![
            TableRow::from_strings(["00"]),
            TableRow::from_strings(["10", "11"]),
        ]))]);
        let mut writer = Writer::new(&mut doc);
        let report = fix_table(&mut writer, 0, &RepairOptions::new().with_max_passes(1)).unwrap();

        assert_eq!(report.passes, 1);
        assert!(!report.settled);
        assert!(report.is_changed());
    }

    #[test]
    fn test_post_fixer_repairs_after_transaction() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("before"));
        doc.add_table(Table::uniform(2, 2));
        doc.add_table(Table::uniform(1, 1));
        let mut model = Model::new(doc).with_post_fixer(Arc::new(TablePostFixer::new()));

        model
            .change(|w| {
                w.remove_node(CellPath::new(1, 1, 1))?;
                w.remove_node(CellPath::new(2, 0, 0)).map(|_| ())
            })
            .unwrap();

        let doc = model.document();
        assert_eq!(doc.block_count(), 2);
        assert_eq!(doc.table(1).unwrap().rows[1].cells.len(), 2);
    }
}
