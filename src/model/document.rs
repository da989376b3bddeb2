//! Document-level types.

use super::{CellPath, Paragraph, RowPath, Table, TableCell, TableRow};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A hierarchical document: an ordered list of blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Top-level content blocks
    pub blocks: Vec<Block>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from blocks.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Add a block to the document.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Add a paragraph to the document.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.blocks.push(Block::Paragraph(paragraph));
    }

    /// Add a table to the document.
    pub fn add_table(&mut self, table: Table) {
        self.blocks.push(Block::Table(table));
    }

    /// Get the number of blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the document has any blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Get the table at a block index.
    pub fn table(&self, index: usize) -> Result<&Table> {
        match self.blocks.get(index) {
            Some(Block::Table(table)) => Ok(table),
            Some(_) => Err(Error::NotATable(index)),
            None => Err(Error::InvalidPath(format!("[{}]", index))),
        }
    }

    /// Get the table at a block index mutably.
    pub fn table_mut(&mut self, index: usize) -> Result<&mut Table> {
        match self.blocks.get_mut(index) {
            Some(Block::Table(table)) => Ok(table),
            Some(_) => Err(Error::NotATable(index)),
            None => Err(Error::InvalidPath(format!("[{}]", index))),
        }
    }

    /// Iterate over all tables with their block indices.
    pub fn tables(&self) -> impl Iterator<Item = (usize, &Table)> {
        self.blocks.iter().enumerate().filter_map(|(i, b)| match b {
            Block::Table(t) => Some((i, t)),
            Block::Paragraph(_) => None,
        })
    }

    /// Get a row by path.
    pub fn row(&self, path: RowPath) -> Option<&TableRow> {
        self.table(path.table).ok()?.rows.get(path.row)
    }

    /// Get a cell by path.
    pub fn cell(&self, path: CellPath) -> Option<&TableCell> {
        self.table(path.table).ok()?.cell(path.row, path.cell)
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|block| match block {
                Block::Paragraph(p) => p.plain_text(),
                Block::Table(t) => t.plain_text(),
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// A top-level content block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A paragraph of text
    Paragraph(Paragraph),

    /// A table
    Table(Table),
}

impl Block {
    /// Human-readable block kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::Table(_) => "table",
        }
    }

    /// Get the table if this block is one.
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Block::Table(t) => Some(t),
            Block::Paragraph(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_new() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.block_count(), 0);
    }

    #[test]
    fn test_table_lookup() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("intro"));
        doc.add_table(Table::uniform(1, 2));

        assert!(matches!(doc.table(0), Err(Error::NotATable(0))));
        assert!(matches!(doc.table(5), Err(Error::InvalidPath(_))));
        assert_eq!(doc.table(1).unwrap().column_count(), 2);
        assert_eq!(doc.tables().count(), 1);
        assert!(doc.cell(CellPath::new(1, 0, 1)).is_some());
        assert!(doc.cell(CellPath::new(1, 0, 2)).is_none());
        assert!(doc.row(RowPath::new(0, 0)).is_none());
    }

    #[test]
    fn test_plain_text() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("a"));
        doc.add_table(Table::from_rows(vec![TableRow::from_strings(["b", "c"])]));
        assert_eq!(doc.plain_text(), "a\n\nb\tc");
    }
}
