//! Error types for docgrid library.

use thiserror::Error;

/// Result type alias for docgrid operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while editing a document.
///
/// Malformed tables are never an error: the repair pass fixes them silently.
/// Every variant here signals a contract violation by the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A path does not point at an existing node.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// A node of the wrong kind was found or supplied.
    #[error("Unexpected node: expected {expected}, found {found}")]
    UnexpectedNode {
        /// Kind of node the operation requires
        expected: &'static str,
        /// Kind of node actually present
        found: &'static str,
    },

    /// An attribute was applied to a node kind that does not carry it.
    #[error("Attribute {attribute} is not valid on {node}")]
    InvalidAttribute {
        /// Attribute name
        attribute: &'static str,
        /// Node kind
        node: &'static str,
    },

    /// The block at the given index is not a table.
    #[error("Block {0} is not a table")]
    NotATable(usize),

    /// A command was executed while disabled.
    #[error("Command is disabled: {0}")]
    CommandDisabled(String),

    /// No command is registered under the given name.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Error during rendering (HTML, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
