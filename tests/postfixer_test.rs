//! Integration tests for the table repair pass.

use docgrid::postfix::{fix_table, Correction};
use docgrid::{
    repair_table, resolve_grid, Attribute, CellPath, Document, Model, NodePath, ParentPath,
    RepairOptions, RepairOutcome, RowPath, Table, TableCell, TablePostFixer, TableRow, Writer,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn texts(table: &Table) -> Vec<Vec<String>> {
    table
        .rows
        .iter()
        .map(|r| r.cells.iter().map(|c| c.plain_text()).collect())
        .collect()
}

fn spans(table: &Table) -> Vec<Vec<(usize, usize)>> {
    table
        .rows
        .iter()
        .map(|r| r.cells.iter().map(|c| (c.rowspan, c.colspan)).collect())
        .collect()
}

fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
    data.iter()
        .map(|r| r.iter().map(|s| s.to_string()).collect())
        .collect()
}

/// Apply two edits as separate transactions, as a local edit followed by one
/// received from another client.
fn apply_in_turn<L, E>(table: Table, local: L, external: E) -> Document
where
    L: FnOnce(&mut Writer<'_>) -> docgrid::Result<()>,
    E: FnOnce(&mut Writer<'_>) -> docgrid::Result<()>,
{
    let mut doc = Document::new();
    doc.add_table(table);
    let mut model = Model::new(doc).with_post_fixer(Arc::new(TablePostFixer::new()));
    model.change(local).unwrap();
    model.change(external).unwrap();
    model.into_document()
}

fn insert_empty_cells(writer: &mut Writer<'_>, index: usize, rows: &[usize]) -> docgrid::Result<()> {
    for &row in rows {
        writer.insert_node(ParentPath::Row(RowPath::new(0, row)), index, TableCell::empty())?;
    }
    Ok(())
}

fn table_2x2() -> Table {
    Table::from_rows(vec![
        TableRow::from_strings(["00", "01"]),
        TableRow::from_strings(["10", "11"]),
    ])
}

/// Insert a table through a model with the repair pass installed.
fn insert(table: Table) -> Document {
    let mut model = Model::new(Document::new()).with_post_fixer(Arc::new(TablePostFixer::new()));
    model
        .change(|writer| writer.insert_node(ParentPath::Root, 0, table))
        .unwrap();
    model.into_document()
}

#[test]
fn test_pads_rows_shorter_than_longest_row() {
    let doc = insert(Table::from_rows(vec![
        TableRow::from_strings(["00"]),
        TableRow::from_strings(["10", "11", "12"]),
        TableRow::from_strings(["20", "21"]),
    ]));

    let table = doc.table(0).unwrap();
    assert_eq!(
        texts(table),
        rows(&[&["00", "", ""], &["10", "11", "12"], &["20", "21", ""]])
    );
}

#[test]
fn test_pads_rows_around_rowspan() {
    let doc = insert(Table::from_rows(vec![
        TableRow::new(vec![TableCell::text("00"), TableCell::text("01").rowspan(2)]),
        TableRow::new(vec![TableCell::text("10"), TableCell::text("12").colspan(2)]),
        TableRow::from_strings(["20", "21"]),
    ]));

    let table = doc.table(0).unwrap();
    assert_eq!(
        texts(table),
        rows(&[&["00", "01", "", ""], &["10", "12"], &["20", "21", "", ""]])
    );
    assert_eq!(table.rows[0].cells[1].rowspan, 2);
    assert_eq!(table.rows[1].cells[1].colspan, 2);
    assert!(resolve_grid(table).is_regular());
}

#[test]
fn test_pads_rows_under_wide_cell() {
    let doc = insert(Table::from_rows(vec![
        TableRow::new(vec![TableCell::text("00").colspan(6)]),
        TableRow::new(vec![
            TableCell::text("10").rowspan(2),
            TableCell::text("11"),
            TableCell::text("12").colspan(3),
        ]),
        TableRow::from_strings(["21", "22"]),
    ]));

    let table = doc.table(0).unwrap();
    assert_eq!(
        texts(table),
        rows(&[&["00"], &["10", "11", "12", ""], &["21", "22", "", "", ""]])
    );
}

#[test]
fn test_clamps_rowspans_in_body() {
    let doc = insert(
        Table::from_rows(vec![
            TableRow::from_strings(["00", "01", "02"]),
            TableRow::new(vec![
                TableCell::text("10").rowspan(2),
                TableCell::text("11").rowspan(3),
                TableCell::text("12"),
            ]),
            TableRow::new(vec![TableCell::text("22").rowspan(8)]),
        ])
        .with_heading_rows(1),
    );

    let table = doc.table(0).unwrap();
    assert_eq!(
        spans(table),
        vec![
            vec![(1, 1), (1, 1), (1, 1)],
            vec![(2, 1), (2, 1), (1, 1)],
            vec![(1, 1)],
        ]
    );
    assert_eq!(table.heading_rows, 1);
}

/// The crossing cell keeps its heading rows; the remaining rows get a new
/// empty cell instead of only clamping the rowspan.
#[test]
fn test_splits_spans_crossing_heading_boundary() {
    // 00 (rs 2) | 01 (rs 3) | 02
    //           |           | 12 (rs 8)
    // 20 | 21 | 22
    let doc = insert(
        Table::from_rows(vec![
            TableRow::new(vec![
                TableCell::text("00").rowspan(2),
                TableCell::text("01").rowspan(3),
                TableCell::text("02"),
            ]),
            TableRow::new(vec![TableCell::text("12").rowspan(8)]),
            TableRow::from_strings(["20", "21", "22"]),
        ])
        .with_heading_rows(2),
    );

    let table = doc.table(0).unwrap();
    assert_eq!(table.rows[0].cells[0].rowspan, 2);
    assert_eq!(table.rows[0].cells[1].rowspan, 2);
    assert_eq!(table.rows[1].cells[0].rowspan, 1);
    assert_eq!(
        texts(table),
        rows(&[
            &["00", "01", "02", "", ""],
            &["12", "", ""],
            &["20", "", "", "21", "22"],
        ])
    );
    assert_eq!(table.heading_rows, 2);
    assert!(resolve_grid(table).is_regular());
}

#[test]
fn test_heading_counts_clamped() {
    let doc = insert(
        Table::uniform(2, 2)
            .with_heading_rows(5)
            .with_heading_columns(3),
    );

    let table = doc.table(0).unwrap();
    assert_eq!(table.heading_rows, 2);
    assert_eq!(table.heading_columns, 2);
}

#[test]
fn test_table_without_cells_is_removed() {
    let mut doc = Document::new();
    doc.add_table(Table::uniform(1, 1));
    let mut model = Model::new(doc).with_post_fixer(Arc::new(TablePostFixer::new()));

    model
        .change(|writer| writer.remove_node(CellPath::new(0, 0, 0)).map(|_| ()))
        .unwrap();

    assert!(model.document().is_empty());
}

#[test]
fn test_empty_row_removed_and_spans_shrunk() {
    let table = Table::from_rows(vec![
        TableRow::new(vec![TableCell::text("00").rowspan(3), TableCell::text("01")]),
        TableRow::default(),
        TableRow::from_strings(["21"]),
    ]);

    let repaired = match repair_table(&table, &RepairOptions::default()).unwrap() {
        RepairOutcome::Repaired(table) => table,
        other => panic!("unexpected outcome {:?}", other),
    };
    assert_eq!(repaired.row_count(), 2);
    assert_eq!(repaired.rows[0].cells[0].rowspan, 2);
    assert_eq!(texts(&repaired), rows(&[&["00", "01"], &["21"]]));
}

#[test]
fn test_valid_table_is_unchanged() {
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
fn test_fix_table_reports_corrections() {
    let mut doc = Document::new();
    doc.add_table(Table::from_rows(vec![
        TableRow::from_strings(["00"]),
        TableRow::from_strings(["10", "11"]),
    ]));
    let mut model = Model::new(doc);

    let report = model
        .change(|writer| fix_table(writer, 0, &RepairOptions::default()))
        .unwrap();

    assert!(report.settled);
    assert!(!report.removed);
    assert_eq!(report.passes, 2);
    assert_eq!(
        report.corrections,
        vec![Correction::InsertCell {
            row: 0,
            index: 1,
            rowspan: 1,
            colspan: 1
        }]
    );
}

#[test]
fn test_collaborative_column_removal_is_padded() {
    // One client removed column 1 while another inserted a full row.
    let mut doc = Document::new();
    doc.add_table(Table::from_rows(vec![
        TableRow::from_strings(["00", "01"]),
        TableRow::from_strings(["10", "11"]),
    ]));
    let mut model = Model::new(doc).with_post_fixer(Arc::new(TablePostFixer::new()));

    model
        .change(|writer| {
            writer.remove_node(CellPath::new(0, 0, 1))?;
            writer.remove_node(CellPath::new(0, 1, 1))?;
            writer.insert_node(ParentPath::Table(0), 1, TableRow::from_strings(["a", "b"]))
        })
        .unwrap();

    assert_eq!(
        texts(model.document().table(0).unwrap()),
        rows(&[&["00", ""], &["a", "b"], &["10", ""]])
    );
}

#[test]
fn test_collaborative_colspan_change_truncated() {
    // 00 (cs 3) widened to 4 while a cell was inserted in the next row.
    let mut doc = Document::new();
    doc.add_table(Table::from_rows(vec![
        TableRow::new(vec![TableCell::text("00").colspan(3)]),
        TableRow::from_strings(["10", "11", "12"]),
    ]));
    let mut model = Model::new(doc).with_post_fixer(Arc::new(TablePostFixer::new()));

    model
        .change(|writer| {
            writer.set_attribute(CellPath::new(0, 0, 0), Attribute::Colspan, 4)?;
            writer.insert_node(ParentPath::Row(docgrid::RowPath::new(0, 1)), 2, TableCell::empty())
        })
        .unwrap();

    let table = model.document().table(0).unwrap();
    assert_eq!(texts(table), rows(&[&["00"], &["10", "11", "", "12"]]));
    assert_eq!(table.rows[0].cells[0].colspan, 4);
    assert!(resolve_grid(table).is_regular());
}

#[test]
fn test_repair_only_touches_changed_tables() {
    let mut doc = Document::new();
    doc.add_paragraph(docgrid::Paragraph::with_text("intro"));
    doc.add_table(Table::from_rows(vec![
        TableRow::from_strings(["00"]),
        TableRow::from_strings(["10", "11"]),
    ]));
    doc.add_table(Table::from_rows(vec![
        TableRow::from_strings(["x"]),
        TableRow::from_strings(["y", "z"]),
    ]));
    let mut model = Model::new(doc).with_post_fixer(Arc::new(TablePostFixer::new()));

    model
        .change(|writer| writer.set_attribute(NodePath::Block(1), Attribute::HeadingRows, 1))
        .unwrap();

    let doc = model.document();
    assert_eq!(doc.table(1).unwrap().rows[0].cells.len(), 2);
    assert_eq!(doc.table(2).unwrap().rows[0].cells.len(), 1);
}

#[test]
fn test_collaborative_row_then_column_insert() {
    let doc = apply_in_turn(
        table_2x2(),
        |writer| writer.insert_node(ParentPath::Table(0), 1, TableRow::from_strings(["a", "b"])),
        |writer| insert_empty_cells(writer, 1, &[0, 2]),
    );

    assert_eq!(
        texts(doc.table(0).unwrap()),
        rows(&[&["00", "", "01"], &["a", "b", ""], &["10", "", "11"]])
    );
}

#[test]
fn test_collaborative_column_then_row_insert() {
    let doc = apply_in_turn(
        table_2x2(),
        |writer| insert_empty_cells(writer, 1, &[0, 1]),
        |writer| writer.insert_node(ParentPath::Table(0), 1, TableRow::from_strings(["a", "b"])),
    );

    assert_eq!(
        texts(doc.table(0).unwrap()),
        rows(&[&["00", "", "01"], &["a", "b", ""], &["10", "", "11"]])
    );
}

fn wide_heading_table() -> Table {
    Table::from_rows(vec![
        TableRow::new(vec![TableCell::text("00").colspan(3)]),
        TableRow::from_strings(["10", "11", "12"]),
    ])
}

#[test]
fn test_collaborative_column_inserts_under_wide_cell() {
    for (first, second) in [(2, 1), (1, 3)] {
        let doc = apply_in_turn(
            wide_heading_table(),
            |writer| {
                writer.set_attribute(CellPath::new(0, 0, 0), Attribute::Colspan, 4)?;
                insert_empty_cells(writer, first, &[1])
            },
            |writer| {
                writer.set_attribute(CellPath::new(0, 0, 0), Attribute::Colspan, 4)?;
                insert_empty_cells(writer, second, &[1])
            },
        );

        let table = doc.table(0).unwrap();
        assert_eq!(
            texts(table),
            rows(&[&["00", ""], &["10", "", "11", "", "12"]]),
            "inserts at {} then {}",
            first,
            second
        );
        assert_eq!(table.rows[0].cells[0].colspan, 4);
        assert!(resolve_grid(table).is_regular());
    }
}

/// 11 | 12 (rs 2) | 13
/// 21 |           | 23
/// 31 | 32        | 33
fn rowspan_in_middle() -> Table {
    Table::from_rows(vec![
        TableRow::new(vec![
            TableCell::text("11"),
            TableCell::text("12").rowspan(2),
            TableCell::text("13"),
        ]),
        TableRow::from_strings(["21", "23"]),
        TableRow::from_strings(["31", "32", "33"]),
    ])
}

fn set_heading_row(writer: &mut Writer<'_>) -> docgrid::Result<()> {
    writer.set_attribute(NodePath::Block(0), Attribute::HeadingRows, 1)?;
    writer.set_attribute(CellPath::new(0, 0, 1), Attribute::Rowspan, 1)
}

#[test]
fn test_collaborative_heading_rows_then_row_removal() {
    let doc = apply_in_turn(
        rowspan_in_middle(),
        |writer| {
            set_heading_row(writer)?;
            writer.insert_node(ParentPath::Row(RowPath::new(0, 1)), 1, TableCell::empty())
        },
        |writer| writer.remove_node(RowPath::new(0, 1)).map(|_| ()),
    );

    let table = doc.table(0).unwrap();
    assert_eq!(texts(table), rows(&[&["11", "12", "13"], &["31", "32", "33"]]));
    assert_eq!(table.rows[0].cells[1].rowspan, 1);
    assert_eq!(table.heading_rows, 1);
}

#[test]
fn test_collaborative_row_removal_then_heading_rows() {
    let doc = apply_in_turn(
        rowspan_in_middle(),
        |writer| writer.remove_node(RowPath::new(0, 1)).map(|_| ()),
        set_heading_row,
    );

    let table = doc.table(0).unwrap();
    assert_eq!(
        texts(table),
        rows(&[&["11", "12", "13", ""], &["31", "32", "33", ""]])
    );
    assert_eq!(table.rows[0].cells[1].rowspan, 1);
    assert_eq!(table.heading_rows, 1);
}
