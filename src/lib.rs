//! # docgrid
//!
//! Table structure engine for hierarchical documents.
//!
//! Tables are stored as rows of literal cells with `rowspan`/`colspan`
//! attributes and `heading_rows`/`heading_columns` counters. This crate
//! resolves that tree into an absolute grid, repairs malformed tables after
//! every change, provides structural editing commands and converts tables to
//! HTML and JSON.
//!
//! ## Quick Start
//!
//! ```
//! use docgrid::{CellPath, CommandOptions, Document, Table, TableEditor};
//!
//! fn main() -> docgrid::Result<()> {
//!     let mut doc = Document::new();
//!     doc.add_table(Table::uniform(2, 2));
//!
//!     let mut editor = TableEditor::new(doc);
//!     editor.select_cell(CellPath::new(0, 0, 0));
//!     editor.execute("merge-table-cell-right", &CommandOptions::new())?;
//!     editor.execute("set-table-heading-rows", &CommandOptions::new().with_count(1))?;
//!
//!     let html = editor.to_html(&docgrid::render::HtmlOptions::default())?;
//!     assert!(html.contains("<th colspan=\"2\">"));
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`model`]: documents, tables, paths and attributes
//! - [`engine`]: transactions, writer primitives and the post-fixer hook
//! - [`grid`]: grid resolution, walking and heading classification
//! - [`postfix`]: the table repair pass
//! - [`commands`]: structural commands and their registry
//! - [`render`]: HTML and JSON converters

pub mod commands;
pub mod engine;
pub mod error;
pub mod grid;
pub mod model;
pub mod postfix;
pub mod render;

// Re-export commonly used types
pub use commands::{CommandOptions, CommandRegistry, Position, Selection, TableCommand};
pub use engine::{Model, PostFixer, Writer};
pub use error::{Error, Result};
pub use grid::{resolve_grid, CellKind, GridEntry, GridWalker, ResolvedGrid, WalkOptions};
pub use model::{
    Alignment, Attribute, Block, CellPath, Document, NodePath, Paragraph, ParentPath, RowPath,
    Table, TableCell, TableRow, TextRun, TextStyle,
};
pub use postfix::{repair_table, RepairOptions, RepairOutcome, RepairReport, TablePostFixer};

use std::sync::Arc;

/// A document with the table repair pass installed, a selection and the
/// built-in commands.
///
/// # Example
///
/// ```
/// use docgrid::{CellPath, CommandOptions, Document, Table, TableEditor};
///
/// let mut doc = Document::new();
/// doc.add_table(Table::uniform(2, 2));
/// let mut editor = TableEditor::new(doc);
/// editor.select_cell(CellPath::new(0, 1, 1));
///
/// assert!(editor.is_enabled("remove-table-row")?);
/// editor.execute("remove-table-row", &CommandOptions::new())?;
/// assert_eq!(editor.document().table(0)?.row_count(), 1);
/// # Ok::<(), docgrid::Error>(())
/// ```
#[derive(Debug)]
pub struct TableEditor {
    model: Model,
    selection: Selection,
    registry: CommandRegistry,
}

impl TableEditor {
    /// Create an editor with default repair options.
    ///
    /// Every table in the document is repaired up front, so commands only
    /// ever see well-formed tables.
    pub fn new(document: Document) -> Self {
        Self::with_repair_options(document, RepairOptions::default())
    }

    /// Create an editor with custom repair options.
    pub fn with_repair_options(document: Document, options: RepairOptions) -> Self {
        let model = Model::new(document)
            .with_post_fixer(Arc::new(TablePostFixer::with_options(options)));
        let mut editor = Self {
            model,
            selection: Selection::root(0),
            registry: CommandRegistry::with_defaults(),
        };
        if let Err(e) = editor.repair_all() {
            log::warn!("Initial table repair failed: {}", e);
        }
        editor
    }

    /// Register an additional command.
    pub fn register_command(&mut self, command: Arc<dyn TableCommand>) {
        self.registry.register(command);
    }

    /// The current document.
    pub fn document(&self) -> &Document {
        self.model.document()
    }

    /// Consume the editor and return the document.
    pub fn into_document(self) -> Document {
        self.model.into_document()
    }

    /// The command registry.
    pub fn commands(&self) -> &CommandRegistry {
        &self.registry
    }

    /// The current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Replace the selection. It is normalized against the document.
    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
        self.selection.normalize(self.model.document());
    }

    /// Put the caret in a cell.
    pub fn select_cell(&mut self, path: CellPath) {
        self.set_selection(Selection::in_cell(path));
    }

    /// Select several cells; the first one holds the caret.
    pub fn select_cells(&mut self, paths: Vec<CellPath>) {
        self.set_selection(Selection::with_cells(paths));
    }

    /// Check whether a command is enabled for the current selection.
    pub fn is_enabled(&self, name: &str) -> Result<bool> {
        self.registry
            .is_enabled(name, self.model.document(), &self.selection)
    }

    /// The toggle state a command reports for the current selection.
    pub fn value(&self, name: &str) -> Result<Option<bool>> {
        let command = self
            .registry
            .get(name)
            .ok_or_else(|| Error::UnknownCommand(name.to_string()))?;
        Ok(command.value(self.model.document(), &self.selection))
    }

    /// Execute a command by name.
    ///
    /// A disabled command returns [`Error::CommandDisabled`] and leaves the
    /// document untouched.
    pub fn execute(&mut self, name: &str, options: &CommandOptions) -> Result<()> {
        self.registry
            .execute(name, &mut self.model, &mut self.selection, options)?;
        self.selection.normalize(self.model.document());
        Ok(())
    }

    /// Run a custom transaction; the repair pass runs afterwards.
    pub fn change<R, F>(&mut self, f: F) -> Result<R>
    where
        F: FnOnce(&mut Writer<'_>) -> Result<R>,
    {
        let result = self.model.change(f)?;
        self.selection.normalize(self.model.document());
        Ok(result)
    }

    /// Repair every table in the document.
    pub fn repair_all(&mut self) -> Result<()> {
        let tables: Vec<usize> = self.model.document().tables().map(|(i, _)| i).collect();
        if tables.is_empty() {
            return Ok(());
        }
        self.change(|writer| {
            for index in tables {
                writer.touch_table(index)?;
            }
            Ok(())
        })
    }

    /// Convert the document to HTML.
    pub fn to_html(&self, options: &render::HtmlOptions) -> Result<String> {
        render::to_html(self.model.document(), options)
    }

    /// Convert the document to JSON.
    pub fn to_json(&self, format: render::JsonFormat) -> Result<String> {
        render::to_json(self.model.document(), format)
    }
}
