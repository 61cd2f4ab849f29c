//! State diffs and undo/redo history for Cella grids.
//!
//! [`GridDiff`] describes which cells became occupied or free between two
//! snapshots. It carries no owner information, so it cannot rebuild a
//! grid; [`apply_diff`] always fails with [`DiffError::Unsupported`].
//! Undo and redo therefore run over whole snapshots held by
//! [`StateHistory`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod diff;
pub mod history;

pub use diff::{apply_diff, compute_diff, invert_diff, DiffError, GridDiff};
pub use history::StateHistory;
