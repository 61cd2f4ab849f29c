//! Collision detection, validation, and immutable placement.
//!
//! The placement pipeline is `validate → collision check → new state`:
//!
//! - [`validation`] rejects malformed requests (blank id, empty
//!   footprint, out-of-bounds cells)
//! - [`collision`] is a pure set-intersection predicate
//! - [`placement`] composes both and returns a fresh [`GridState`]
//!
//! Nothing in this crate mutates an existing [`GridState`].
//!
//! [`GridState`]: cella_core::GridState

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod collision;
pub mod placement;
pub mod validation;

pub use collision::{check_overlap, conflicting_cells, detect_collision};
pub use placement::{move_object, place_multiple, place_object, remove_object};
pub use validation::{validate_cell_coordinates, validate_footprint_shape, validate_placement};
