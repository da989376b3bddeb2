//! Grid resolution for tables.
//!
//! A table is stored as rows of literal cells; spans make the literal index of
//! a cell differ from its column. This module resolves the tree into absolute
//! `(row, column)` coordinates and provides the queries the repair pass, the
//! structural commands and the HTML converter build on.

mod classify;
mod map;
mod walker;

pub use classify::{body_section, cell_kind, heading_section, CellKind};
pub use map::{resolve_grid, EntryKind, GridEntry, ResolvedGrid};
pub use walker::{GridWalker, WalkOptions};
