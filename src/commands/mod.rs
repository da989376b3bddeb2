//! Structural table commands.
//!
//! Every command computes its enablement from the document and selection
//! before doing anything; a disabled command never mutates. Enabled commands
//! run inside a single [`Model::change`] transaction, so the repair pass sees
//! the whole edit at once, and afterwards move the selection to a sensible
//! cell of the edited table.
//!
//! # Example
//!
//! ```
//! use docgrid::commands::{CommandOptions, CommandRegistry, Selection};
//! use docgrid::engine::Model;
//! use docgrid::model::{CellPath, Document, Table};
//!
//! let mut doc = Document::new();
//! doc.add_table(Table::uniform(2, 2));
//! let mut model = Model::new(doc);
//! let mut selection = Selection::in_cell(CellPath::new(0, 0, 0));
//!
//! let registry = CommandRegistry::with_defaults();
//! registry.execute("insert-table-row-below", &mut model, &mut selection, &CommandOptions::new())?;
//! assert_eq!(model.document().table(0)?.row_count(), 3);
//! # Ok::<(), docgrid::Error>(())
//! ```

mod insert_column;
mod insert_row;
mod insert_table;
mod merge_cell;
mod merge_cells;
mod options;
mod remove_column;
mod remove_row;
mod selection;
mod set_heading;
mod split_cell;
mod utils;

pub use insert_column::{ColumnOrder, InsertColumnCommand};
pub use insert_row::{InsertRowCommand, RowOrder};
pub use insert_table::{InsertTableCommand, DEFAULT_TABLE_COLUMNS, DEFAULT_TABLE_ROWS};
pub use merge_cell::{MergeCellCommand, MergeDirection};
pub use merge_cells::MergeCellsCommand;
pub use options::CommandOptions;
pub use remove_column::RemoveColumnCommand;
pub use remove_row::RemoveRowCommand;
pub use selection::{Position, Selection};
pub use set_heading::{HeadingAxis, SetHeadingCommand};
pub use split_cell::{SplitCellCommand, SplitDirection};

pub(crate) use selection::SelectedCells;

use crate::engine::Model;
use crate::error::{Error, Result};
use crate::model::Document;
use std::collections::HashMap;
use std::sync::Arc;

/// A structural edit on a table.
pub trait TableCommand: Send + Sync {
    /// Name under which the command is registered.
    fn name(&self) -> &str;

    /// Check whether the command can run for this selection.
    fn is_enabled(&self, document: &Document, selection: &Selection) -> bool;

    /// Run the command.
    ///
    /// Returns [`Error::CommandDisabled`] without touching the model when
    /// [`TableCommand::is_enabled`] is false.
    fn execute(
        &self,
        model: &mut Model,
        selection: &mut Selection,
        options: &CommandOptions,
    ) -> Result<()>;

    /// Current state of toggle-like commands (e.g. whether the caret is in a
    /// heading row).
    fn value(&self, _document: &Document, _selection: &Selection) -> Option<bool> {
        None
    }
}

/// Check enablement and resolve the selected cells.
pub(crate) fn selected_cells(
    command: &dyn TableCommand,
    document: &Document,
    selection: &Selection,
) -> Result<SelectedCells> {
    if !command.is_enabled(document, selection) {
        return Err(disabled(command));
    }
    SelectedCells::resolve(document, selection).ok_or_else(|| disabled(command))
}

pub(crate) fn disabled(command: &dyn TableCommand) -> Error {
    Error::CommandDisabled(command.name().to_string())
}

/// Registry of table commands, keyed by name.
pub struct CommandRegistry {
    commands: HashMap<String, Arc<dyn TableCommand>>,
}

impl CommandRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Create a registry with every built-in command.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(InsertTableCommand::new()));
        registry.register(Arc::new(InsertRowCommand::new(RowOrder::Above)));
        registry.register(Arc::new(InsertRowCommand::new(RowOrder::Below)));
        registry.register(Arc::new(InsertColumnCommand::new(ColumnOrder::Before)));
        registry.register(Arc::new(InsertColumnCommand::new(ColumnOrder::After)));
        registry.register(Arc::new(RemoveRowCommand::new()));
        registry.register(Arc::new(RemoveColumnCommand::new()));
        registry.register(Arc::new(SplitCellCommand::new(SplitDirection::Vertically)));
        registry.register(Arc::new(SplitCellCommand::new(SplitDirection::Horizontally)));
        registry.register(Arc::new(MergeCellCommand::new(MergeDirection::Up)));
        registry.register(Arc::new(MergeCellCommand::new(MergeDirection::Down)));
        registry.register(Arc::new(MergeCellCommand::new(MergeDirection::Left)));
        registry.register(Arc::new(MergeCellCommand::new(MergeDirection::Right)));
        registry.register(Arc::new(MergeCellsCommand::new()));
        registry.register(Arc::new(SetHeadingCommand::new(HeadingAxis::Rows)));
        registry.register(Arc::new(SetHeadingCommand::new(HeadingAxis::Columns)));
        registry
    }

    /// Register a command, replacing any command with the same name.
    pub fn register(&mut self, command: Arc<dyn TableCommand>) {
        self.commands.insert(command.name().to_string(), command);
    }

    /// Get a command by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn TableCommand>> {
        self.commands.get(name).cloned()
    }

    /// Check if a command is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Names of all registered commands, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Check whether a command is enabled.
    pub fn is_enabled(&self, name: &str, document: &Document, selection: &Selection) -> Result<bool> {
        Ok(self.command(name)?.is_enabled(document, selection))
    }

    /// Execute a command by name.
    pub fn execute(
        &self,
        name: &str,
        model: &mut Model,
        selection: &mut Selection,
        options: &CommandOptions,
    ) -> Result<()> {
        let command = self.command(name)?;
        log::debug!("Executing '{}' at {:?}", name, selection.focus);
        command.execute(model, selection, options)
    }

    fn command(&self, name: &str) -> Result<&Arc<dyn TableCommand>> {
        self.commands
            .get(name)
            .ok_or_else(|| Error::UnknownCommand(name.to_string()))
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.names())
            .finish()
    }
}
