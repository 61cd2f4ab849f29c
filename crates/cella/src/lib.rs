//! Cella: a spatial-occupancy engine for procedural layout and level generation.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Cella sub-crates. For most users, adding `cella` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use cella::prelude::*;
//!
//! let mut engine = Engine::new();
//!
//! // A 3-cell wall and a pillar touching its end.
//! engine.place("wall", &footprint([(0, 0, 0), (1, 0, 0), (2, 0, 0)]), None).unwrap();
//! engine.place("pillar", &footprint([(3, 0, 0)]), None).unwrap();
//!
//! // Overlaps are rejected and leave the state unchanged.
//! let before = engine.state().stable_hash();
//! assert!(engine.place("crate", &footprint([(1, 0, 0)]), None).is_err());
//! assert_eq!(engine.state().stable_hash(), before);
//!
//! let graph = build_structural_graph(&engine.state());
//! assert!(is_connected(&graph, "wall", "pillar"));
//!
//! engine.undo().unwrap();
//! assert!(!engine.is_occupied(Cell::new(3, 0, 0)));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `cella-core` | Cells, ids, bounds, footprints, `GridState`, errors |
//! | [`place`] | `cella-place` | Collision, validation, pure placement operations |
//! | [`history`] | `cella-history` | State diffs and the undo/redo timeline |
//! | [`analysis`] | `cella-analysis` | Room detection and the structural graph |
//! | [`engine`] | `cella-engine` | Stateful engine, commands, batches, export |
//! | [`replay`] | `cella-replay` | Deterministic command logs and verification |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and errors (`cella-core`).
///
/// Contains [`types::Cell`], [`types::ObjectId`], [`types::Footprint`],
/// and the immutable [`types::GridState`] snapshot with its stable hash.
pub use cella_core as types;

/// Pure placement operations (`cella-place`).
///
/// Every function takes a [`types::GridState`] and returns a new one;
/// the input is never modified.
pub use cella_place as place;

/// Diffs and bounded undo/redo history (`cella-history`).
pub use cella_history as history;

/// Read-only grid analysis (`cella-analysis`).
///
/// [`analysis::detect_rooms`] for enclosed regions,
/// [`analysis::build_structural_graph`] for object contact.
pub use cella_analysis as analysis;

/// The stateful engine (`cella-engine`).
///
/// [`engine::Engine`] wraps a current state and optional history, and
/// drives JSON command batches through [`engine::run_batch`].
pub use cella_engine as engine;

/// Deterministic replay recording and verification (`cella-replay`).
///
/// Record batches with [`replay::ReplayWriter`], replay and verify
/// determinism with [`replay::ReplayReader`].
pub use cella_replay as replay;

/// Common imports for typical Cella usage.
///
/// ```rust
/// use cella::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use cella_core::{footprint, rect_footprint, Bounds, Cell, Footprint, GridState, ObjectId};

    // Errors
    pub use cella_core::{HistoryError, PlacementError};

    // Placement
    pub use cella_place::{detect_collision, move_object, place_object, remove_object};

    // Analysis
    pub use cella_analysis::{build_structural_graph, detect_rooms, is_connected, Room};

    // Engine
    pub use cella_engine::{run_batch, Command, Engine, EngineConfig, EngineError};
}
