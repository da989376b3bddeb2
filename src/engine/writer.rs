//! Primitive tree mutations.

use super::ChangeSet;
use crate::error::{Error, Result};
use crate::model::{
    Attribute, Block, CellPath, Document, Node, NodePath, ParentPath, Paragraph, Table,
    TableCell, TableRow,
};

/// Mutation handle passed to transaction closures and post-fixers.
///
/// Every primitive is applied immediately and is visible to subsequent reads
/// through [`Writer::document`]. The writer records which tables were touched
/// so the post-fixer hook knows what to inspect.
pub struct Writer<'a> {
    document: &'a mut Document,
    changed: ChangeSet,
}

impl<'a> Writer<'a> {
    pub(crate) fn new(document: &'a mut Document) -> Self {
        Self {
            document,
            changed: ChangeSet::new(),
        }
    }

    /// Current state of the document.
    pub fn document(&self) -> &Document {
        self.document
    }

    /// Table at a block index.
    pub fn table(&self, index: usize) -> Result<&Table> {
        self.document.table(index)
    }

    /// Block indices of tables touched since the last drain.
    pub fn changed_tables(&self) -> &ChangeSet {
        &self.changed
    }

    /// Mark a table as changed without mutating it, so the post-fixers
    /// inspect it.
    pub fn touch_table(&mut self, index: usize) -> Result<()> {
        self.document.table(index)?;
        self.changed.insert(index);
        Ok(())
    }

    pub(crate) fn take_changes(&mut self) -> ChangeSet {
        std::mem::take(&mut self.changed)
    }

    /// Insert a node as the child at `index` of `parent`.
    pub fn insert_node(
        &mut self,
        parent: ParentPath,
        index: usize,
        node: impl Into<Node>,
    ) -> Result<()> {
        let node = node.into();
        match (parent, node) {
            (ParentPath::Root, Node::Block(block)) => {
                check_index(index, self.document.blocks.len(), parent)?;
                let is_table = matches!(block, Block::Table(_));
                self.document.blocks.insert(index, block);
                self.shift_after_insert(index);
                if is_table {
                    self.changed.insert(index);
                }
            }
            (ParentPath::Table(table), Node::Row(row)) => {
                let rows = &mut self.document.table_mut(table)?.rows;
                check_index(index, rows.len(), parent)?;
                rows.insert(index, row);
                self.changed.insert(table);
            }
            (ParentPath::Row(path), Node::Cell(cell)) => {
                let cells = &mut self.row_mut(path.table, path.row)?.cells;
                check_index(index, cells.len(), parent)?;
                cells.insert(index, cell);
                self.changed.insert(path.table);
            }
            (parent, node) => {
                return Err(Error::UnexpectedNode {
                    expected: expected_child(parent),
                    found: node.kind(),
                })
            }
        }
        Ok(())
    }

    /// Remove a node and return it.
    pub fn remove_node(&mut self, path: impl Into<NodePath>) -> Result<Node> {
        let path = path.into();
        let node = match path {
            NodePath::Block(index) => {
                if index >= self.document.blocks.len() {
                    return Err(Error::InvalidPath(path.to_string()));
                }
                let block = self.document.blocks.remove(index);
                self.shift_after_remove(index);
                Node::Block(block)
            }
            NodePath::Row(p) => {
                let rows = &mut self.document.table_mut(p.table)?.rows;
                if p.row >= rows.len() {
                    return Err(Error::InvalidPath(path.to_string()));
                }
                let row = rows.remove(p.row);
                self.changed.insert(p.table);
                Node::Row(row)
            }
            NodePath::Cell(p) => {
                let cells = &mut self.row_mut(p.table, p.row)?.cells;
                if p.cell >= cells.len() {
                    return Err(Error::InvalidPath(path.to_string()));
                }
                let cell = cells.remove(p.cell);
                self.changed.insert(p.table);
                Node::Cell(cell)
            }
        };
        Ok(node)
    }

    /// Move a node to the child position `index` of `parent`.
    ///
    /// `index` is interpreted after the node has been detached from its
    /// current position.
    pub fn move_node(
        &mut self,
        from: impl Into<NodePath>,
        parent: ParentPath,
        index: usize,
    ) -> Result<()> {
        let from = from.into();
        if expected_child(parent) != path_kind(&from) {
            return Err(Error::UnexpectedNode {
                expected: expected_child(parent),
                found: path_kind(&from),
            });
        }
        let node = self.remove_node(from)?;
        self.insert_node(parent, index, node)
    }

    /// Set a structural attribute.
    pub fn set_attribute(
        &mut self,
        path: impl Into<NodePath>,
        attribute: Attribute,
        value: usize,
    ) -> Result<()> {
        let path = path.into();
        match path {
            NodePath::Block(index) if attribute.is_table_attribute() => {
                let table = self.document.table_mut(index)?;
                match attribute {
                    Attribute::HeadingRows => table.heading_rows = value,
                    _ => table.heading_columns = value,
                }
                self.changed.insert(index);
            }
            NodePath::Cell(p) if !attribute.is_table_attribute() => {
                let cell = self.cell_mut(p)?;
                match attribute {
                    Attribute::Rowspan => cell.rowspan = value,
                    _ => cell.colspan = value,
                }
                self.changed.insert(p.table);
            }
            _ => {
                return Err(Error::InvalidAttribute {
                    attribute: attribute.name(),
                    node: path_kind(&path),
                })
            }
        }
        Ok(())
    }

    /// Reset a structural attribute to its default value.
    pub fn remove_attribute(&mut self, path: impl Into<NodePath>, attribute: Attribute) -> Result<()> {
        self.set_attribute(path, attribute, attribute.default_value())
    }

    /// Append the content of one cell to another, leaving the source empty.
    pub fn move_content(&mut self, from: CellPath, to: CellPath) -> Result<()> {
        if from == to {
            return Ok(());
        }
        // Validate the target before detaching anything.
        self.cell_mut(to)?;
        let content = self.take_content(from)?;
        self.cell_mut(to)?.content.extend(content);
        self.changed.insert(to.table);
        Ok(())
    }

    /// Detach the content of a cell, leaving it empty.
    pub fn take_content(&mut self, path: CellPath) -> Result<Vec<Paragraph>> {
        let content = std::mem::take(&mut self.cell_mut(path)?.content);
        self.changed.insert(path.table);
        Ok(content)
    }

    fn row_mut(&mut self, table: usize, row: usize) -> Result<&mut TableRow> {
        self.document
            .table_mut(table)?
            .rows
            .get_mut(row)
            .ok_or_else(|| Error::InvalidPath(format!("[{}, {}]", table, row)))
    }

    fn cell_mut(&mut self, path: CellPath) -> Result<&mut TableCell> {
        self.row_mut(path.table, path.row)?
            .cells
            .get_mut(path.cell)
            .ok_or_else(|| Error::InvalidPath(NodePath::Cell(path).to_string()))
    }

    fn shift_after_insert(&mut self, index: usize) {
        self.changed = self
            .changed
            .iter()
            .map(|&t| if t >= index { t + 1 } else { t })
            .collect();
    }

    fn shift_after_remove(&mut self, index: usize) {
        self.changed = self
            .changed
            .iter()
            .filter(|&&t| t != index)
            .map(|&t| if t > index { t - 1 } else { t })
            .collect();
    }
}

fn check_index(index: usize, len: usize, parent: ParentPath) -> Result<()> {
    if index > len {
        return Err(Error::InvalidPath(format!("{} offset {}", parent, index)));
    }
    Ok(())
}

fn expected_child(parent: ParentPath) -> &'static str {
    match parent {
        ParentPath::Root => "block",
        ParentPath::Table(_) => "row",
        ParentPath::Row(_) => "cell",
    }
}

fn path_kind(path: &NodePath) -> &'static str {
    match path {
        NodePath::Block(_) => "block",
        NodePath::Row(_) => "row",
        NodePath::Cell(_) => "cell",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RowPath;

    fn doc() -> Document {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("intro"));
        doc.add_table(Table::from_rows(vec![
            TableRow::from_strings(["00", "01"]),
            TableRow::from_strings(["10", "11"]),
        ]));
        doc
    }

    #[test]
    fn test_insert_and_remove_cell() {
        let mut doc = doc();
        let mut writer = Writer::new(&mut doc);

        writer
            .insert_node(ParentPath::Row(RowPath::new(1, 0)), 1, TableCell::text("x"))
            .unwrap();
        assert_eq!(writer.document().table(1).unwrap().rows[0].plain_text(), "00\tx\t01");

        let removed = writer.remove_node(CellPath::new(1, 0, 0)).unwrap();
        assert_eq!(removed, Node::Cell(TableCell::text("00")));
        assert!(writer.changed_tables().contains(&1));
    }

    #[test]
    fn test_kind_mismatch() {
        let mut doc = doc();
        let mut writer = Writer::new(&mut doc);

        let err = writer
            .insert_node(ParentPath::Table(1), 0, TableCell::empty())
            .unwrap_err();
        assert_eq!(
            err,
            Error::UnexpectedNode {
                expected: "row",
                found: "cell"
            }
        );
        assert!(matches!(
            writer.insert_node(ParentPath::Table(0), 0, TableRow::default()),
            Err(Error::NotATable(0))
        ));
    }

    #[test]
    fn test_invalid_paths() {
        let mut doc = doc();
        let mut writer = Writer::new(&mut doc);

        assert!(matches!(
            writer.remove_node(CellPath::new(1, 0, 5)),
            Err(Error::InvalidPath(_))
        ));
        assert!(matches!(
            writer.insert_node(ParentPath::Table(1), 9, TableRow::default()),
            Err(Error::InvalidPath(_))
        ));
    }

    #[test]
    fn test_attributes() {
        let mut doc = doc();
        let mut writer = Writer::new(&mut doc);

        writer
            .set_attribute(NodePath::Block(1), Attribute::HeadingRows, 1)
            .unwrap();
        writer
            .set_attribute(CellPath::new(1, 0, 0), Attribute::Colspan, 2)
            .unwrap();
        assert_eq!(writer.table(1).unwrap().heading_rows, 1);
        assert_eq!(writer.table(1).unwrap().rows[0].cells[0].colspan, 2);

        writer
            .remove_attribute(CellPath::new(1, 0, 0), Attribute::Colspan)
            .unwrap();
        assert_eq!(writer.table(1).unwrap().rows[0].cells[0].colspan, 1);

        let err = writer
            .set_attribute(CellPath::new(1, 0, 0), Attribute::HeadingRows, 1)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidAttribute { .. }));
    }

    #[test]
    fn test_move_node_between_rows() {
        let mut doc = doc();
        let mut writer = Writer::new(&mut doc);

        writer
            .move_node(CellPath::new(1, 0, 1), ParentPath::Row(RowPath::new(1, 1)), 0)
            .unwrap();
        let table = writer.table(1).unwrap();
        assert_eq!(table.rows[0].plain_text(), "00");
        assert_eq!(table.rows[1].plain_text(), "01\t10\t11");

        let err = writer
            .move_node(CellPath::new(1, 0, 0), ParentPath::Table(1), 0)
            .unwrap_err();
        assert!(matches!(err, Error::UnexpectedNode { .. }));
    }

    #[test]
    fn test_move_content() {
        let mut doc = doc();
        let mut writer = Writer::new(&mut doc);

        writer
            .move_content(CellPath::new(1, 0, 1), CellPath::new(1, 0, 0))
            .unwrap();
        let table = writer.table(1).unwrap();
        assert_eq!(table.rows[0].cells[0].plain_text(), "00 01");
        assert!(table.rows[0].cells[1].is_empty());

        let taken = writer.take_content(CellPath::new(1, 1, 0)).unwrap();
        assert_eq!(taken, vec![Paragraph::with_text("10")]);
        assert!(writer.table(1).unwrap().rows[1].cells[0].is_empty());
    }

    #[test]
    fn test_block_shift_tracking() {
        let mut doc = doc();
        let mut writer = Writer::new(&mut doc);

        writer
            .set_attribute(NodePath::Block(1), Attribute::HeadingRows, 1)
            .unwrap();
        writer
            .insert_node(ParentPath::Root, 0, Block::Paragraph(Paragraph::new()))
            .unwrap();
        assert!(writer.changed_tables().contains(&2));

        writer.remove_node(NodePath::Block(2)).unwrap();
        assert!(writer.changed_tables().is_empty());

        writer
            .insert_node(ParentPath::Root, 1, Block::Table(Table::uniform(1, 1)))
            .unwrap();
        assert_eq!(writer.take_changes().into_iter().collect::<Vec<_>>(), vec![1]);
    }
}
