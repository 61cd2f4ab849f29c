//! Core types for the Cella occupancy engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the Cella workspace:
//! cells, object identifiers, bounds, footprints, the immutable
//! [`GridState`] snapshot, its portable stable hash, and error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod footprint;
pub mod grid;
pub mod hash;
pub mod id;

pub use error::{HistoryError, PlacementError};
pub use footprint::{footprint, rect_footprint, Footprint};
pub use grid::GridState;
pub use hash::{FNV_OFFSET, FNV_PRIME};
pub use id::{Bounds, Cell, ObjectId};
