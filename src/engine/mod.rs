//! Transactions over a document.
//!
//! All mutations happen inside [`Model::change`]. A transaction is atomic: if
//! the closure fails, the document is restored to its previous state. After a
//! successful closure the registered [`PostFixer`]s run over the tables the
//! transaction touched, until none of them reports a change.
//!
//! # Example
//!
//! ```
//! use docgrid::engine::Model;
//! use docgrid::model::{Document, ParentPath, RowPath, Table, TableCell};
//!
//! let mut doc = Document::new();
//! doc.add_table(Table::uniform(2, 2));
//!
//! let mut model = Model::new(doc);
//! model.change(|writer| {
//!     writer.insert_node(ParentPath::Row(RowPath::new(0, 0)), 2, TableCell::text("x"))
//! })?;
//! assert_eq!(model.document().table(0)?.rows[0].cells.len(), 3);
//! # Ok::<(), docgrid::Error>(())
//! ```

mod writer;

pub use writer::Writer;

use crate::error::Result;
use crate::model::Document;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Block indices of the tables touched by a transaction.
pub type ChangeSet = BTreeSet<usize>;

/// Default bound on post-fixer rounds per transaction.
pub const DEFAULT_MAX_FIXER_ROUNDS: usize = 8;

/// Hook invoked after every transaction with the set of changed tables.
///
/// Implementations mutate through the writer and return whether they changed
/// anything. Changes made by a fixer trigger another round.
pub trait PostFixer: Send + Sync {
    /// Name of this fixer, for logging.
    fn name(&self) -> &str;

    /// Inspect the changed tables and repair them.
    fn fix(&self, writer: &mut Writer<'_>, changed: &ChangeSet) -> Result<bool>;
}

/// A document together with its post-transaction hooks.
pub struct Model {
    document: Document,
    post_fixers: Vec<Arc<dyn PostFixer>>,
    max_fixer_rounds: usize,
}

impl Model {
    /// Create a model without post-fixers.
    pub fn new(document: Document) -> Self {
        Self {
            document,
            post_fixers: Vec::new(),
            max_fixer_rounds: DEFAULT_MAX_FIXER_ROUNDS,
        }
    }

    /// Register a post-fixer and return self.
    pub fn with_post_fixer(mut self, fixer: Arc<dyn PostFixer>) -> Self {
        self.register_post_fixer(fixer);
        self
    }

    /// Set the round bound and return self.
    pub fn with_max_fixer_rounds(mut self, rounds: usize) -> Self {
        self.max_fixer_rounds = rounds.max(1);
        self
    }

    /// Register a post-fixer.
    pub fn register_post_fixer(&mut self, fixer: Arc<dyn PostFixer>) {
        self.post_fixers.push(fixer);
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Consume the model and return the document.
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Run a transaction.
    ///
    /// On error the document is left exactly as it was before the call.
    pub fn change<R, F>(&mut self, f: F) -> Result<R>
    where
        F: FnOnce(&mut Writer<'_>) -> Result<R>,
    {
        let snapshot = self.document.clone();
        let result = {
            let mut writer = Writer::new(&mut self.document);
            f(&mut writer).and_then(|value| {
                run_post_fixers(&self.post_fixers, &mut writer, self.max_fixer_rounds)?;
                Ok(value)
            })
        };
        if result.is_err() {
            self.document = snapshot;
        }
        result
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("document", &self.document)
            .field(
                "post_fixers",
                &self.post_fixers.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .field("max_fixer_rounds", &self.max_fixer_rounds)
            .finish()
    }
}

fn run_post_fixers(
    fixers: &[Arc<dyn PostFixer>],
    writer: &mut Writer<'_>,
    max_rounds: usize,
) -> Result<()> {
    let mut changed = writer.take_changes();
    let mut round = 0;

    while !changed.is_empty() && !fixers.is_empty() {
        if round == max_rounds {
            log::warn!(
                "Post-fixers did not settle after {} rounds, tables {:?} left as is",
                max_rounds,
                changed
            );
            break;
        }
        round += 1;

        let mut fixed = false;
        for fixer in fixers {
            if fixer.fix(writer, &changed)? {
                log::debug!("Post-fixer '{}' changed tables {:?}", fixer.name(), changed);
                fixed = true;
            }
        }
        changed = writer.take_changes();
        if !fixed {
            break;
        }
    }
    Ok(())
}
