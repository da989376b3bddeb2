//! Document model types.
//!
//! This module defines the tree the table engine reads and writes: a document
//! of blocks, where a table block owns rows and rows own cells. Structural
//! attributes (`rowspan`, `colspan`, `headingRows`, `headingColumns`) live on
//! the nodes; grid coordinates never do.

mod document;
mod paragraph;
mod path;
mod table;

pub use document::{Block, Document};
pub use paragraph::{Alignment, Paragraph, TextRun, TextStyle};
pub use path::{Attribute, CellPath, Node, NodePath, ParentPath, RowPath};
pub use table::{Table, TableCell, TableRow};
