//! Addressing of nodes inside a document.
//!
//! Paths are plain indices. They are only meaningful for the document state
//! they were computed against and must be recomputed after every transaction.

use super::{Block, Paragraph, Table, TableCell, TableRow};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Path of a row: table block index plus row index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RowPath {
    /// Index of the table among the document blocks
    pub table: usize,
    /// Index of the row among the table's rows
    pub row: usize,
}

impl RowPath {
    /// Create a new row path.
    pub fn new(table: usize, row: usize) -> Self {
        Self { table, row }
    }

    /// Path of the cell at `cell` inside this row.
    pub fn cell(self, cell: usize) -> CellPath {
        CellPath::new(self.table, self.row, cell)
    }
}

/// Path of a cell: table block index, row index, literal cell index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellPath {
    /// Index of the table among the document blocks
    pub table: usize,
    /// Index of the row among the table's rows
    pub row: usize,
    /// Literal index of the cell among the row's cells
    pub cell: usize,
}

impl CellPath {
    /// Create a new cell path.
    pub fn new(table: usize, row: usize, cell: usize) -> Self {
        Self { table, row, cell }
    }

    /// Path of the row holding this cell.
    pub fn row_path(self) -> RowPath {
        RowPath::new(self.table, self.row)
    }
}

/// Path of any addressable node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodePath {
    /// A top-level block
    Block(usize),
    /// A table row
    Row(RowPath),
    /// A table cell
    Cell(CellPath),
}

impl NodePath {
    /// Parent of the node.
    pub fn parent(&self) -> ParentPath {
        match *self {
            NodePath::Block(_) => ParentPath::Root,
            NodePath::Row(p) => ParentPath::Table(p.table),
            NodePath::Cell(p) => ParentPath::Row(p.row_path()),
        }
    }

    /// Index of the node among its siblings.
    pub fn index(&self) -> usize {
        match *self {
            NodePath::Block(i) => i,
            NodePath::Row(p) => p.row,
            NodePath::Cell(p) => p.cell,
        }
    }

    /// Index of the top-level block containing the node.
    pub fn block(&self) -> usize {
        match *self {
            NodePath::Block(i) => i,
            NodePath::Row(p) => p.table,
            NodePath::Cell(p) => p.table,
        }
    }
}

impl From<RowPath> for NodePath {
    fn from(path: RowPath) -> Self {
        NodePath::Row(path)
    }
}

impl From<CellPath> for NodePath {
    fn from(path: CellPath) -> Self {
        NodePath::Cell(path)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodePath::Block(i) => write!(f, "[{}]", i),
            NodePath::Row(p) => write!(f, "[{}, {}]", p.table, p.row),
            NodePath::Cell(p) => write!(f, "[{}, {}, {}]", p.table, p.row, p.cell),
        }
    }
}

/// Path of a node that can hold children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParentPath {
    /// The document root (holds blocks)
    Root,
    /// A table block (holds rows)
    Table(usize),
    /// A table row (holds cells)
    Row(RowPath),
}

impl ParentPath {
    /// Path of the child at `index`.
    pub fn child(self, index: usize) -> NodePath {
        match self {
            ParentPath::Root => NodePath::Block(index),
            ParentPath::Table(table) => NodePath::Row(RowPath::new(table, index)),
            ParentPath::Row(row) => NodePath::Cell(row.cell(index)),
        }
    }
}

impl fmt::Display for ParentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParentPath::Root => write!(f, "root"),
            ParentPath::Table(t) => write!(f, "table [{}]", t),
            ParentPath::Row(p) => write!(f, "row [{}, {}]", p.table, p.row),
        }
    }
}

/// An owned node, as inserted into or removed from the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Node {
    /// A top-level block
    Block(Block),
    /// A table row
    Row(TableRow),
    /// A table cell
    Cell(TableCell),
}

impl Node {
    /// Human-readable node kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Block(block) => block.kind(),
            Node::Row(_) => "row",
            Node::Cell(_) => "cell",
        }
    }
}

impl From<Block> for Node {
    fn from(block: Block) -> Self {
        Node::Block(block)
    }
}

impl From<Table> for Node {
    fn from(table: Table) -> Self {
        Node::Block(Block::Table(table))
    }
}

impl From<Paragraph> for Node {
    fn from(paragraph: Paragraph) -> Self {
        Node::Block(Block::Paragraph(paragraph))
    }
}

impl From<TableRow> for Node {
    fn from(row: TableRow) -> Self {
        Node::Row(row)
    }
}

impl From<TableCell> for Node {
    fn from(cell: TableCell) -> Self {
        Node::Cell(cell)
    }
}

/// Structural attributes understood by the table engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Attribute {
    /// Table: number of heading rows
    HeadingRows,
    /// Table: number of heading columns
    HeadingColumns,
    /// Cell: number of rows spanned
    Rowspan,
    /// Cell: number of columns spanned
    Colspan,
}

impl Attribute {
    /// Attribute name as used in the data model.
    pub fn name(&self) -> &'static str {
        match self {
            Attribute::HeadingRows => "headingRows",
            Attribute::HeadingColumns => "headingColumns",
            Attribute::Rowspan => "rowspan",
            Attribute::Colspan => "colspan",
        }
    }

    /// Value the attribute takes when absent.
    pub fn default_value(&self) -> usize {
        match self {
            Attribute::HeadingRows | Attribute::HeadingColumns => 0,
            Attribute::Rowspan | Attribute::Colspan => 1,
        }
    }

    /// Whether the attribute belongs on tables (as opposed to cells).
    pub fn is_table_attribute(&self) -> bool {
        matches!(self, Attribute::HeadingRows | Attribute::HeadingColumns)
    }
}
