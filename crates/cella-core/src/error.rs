//! Error types for the Cella engine.
//!
//! Organized by subsystem: placement (validation, collision, lookup)
//! and history navigation. All errors are recoverable; none leaves any
//! existing [`GridState`](crate::GridState) modified.

use std::error::Error;
use std::fmt;

use crate::id::{Bounds, Cell, ObjectId};

/// Errors from validating or applying a placement, removal, or move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlacementError {
    /// The object id is empty or whitespace only.
    EmptyIdentifier,
    /// The footprint contains no cells.
    EmptyFootprint,
    /// A footprint cell lies outside the supplied bounds.
    OutOfBounds {
        /// The first offending cell, in footprint order.
        cell: Cell,
        /// The bounds that were violated.
        bounds: Bounds,
    },
    /// The footprint has fewer cells than required.
    FootprintTooSmall {
        /// Actual cell count.
        size: usize,
        /// Required minimum.
        min: usize,
    },
    /// The footprint has more cells than allowed.
    FootprintTooLarge {
        /// Actual cell count.
        size: usize,
        /// Allowed maximum.
        max: usize,
    },
    /// A cell has a negative coordinate where none are allowed.
    NegativeCoordinate {
        /// The offending cell.
        cell: Cell,
    },
    /// The target footprint overlaps occupied cells.
    Collision {
        /// The object being placed.
        object_id: ObjectId,
        /// Occupied cells inside the footprint, sorted.
        conflicts: Vec<Cell>,
    },
    /// No cell is owned by the referenced object.
    ObjectNotFound {
        /// The missing object.
        object_id: ObjectId,
    },
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyIdentifier => write!(f, "object id cannot be empty"),
            Self::EmptyFootprint => write!(f, "footprint cannot be empty"),
            Self::OutOfBounds { cell, bounds } => {
                write!(f, "cell {cell} is out of bounds {bounds}")
            }
            Self::FootprintTooSmall { size, min } => {
                write!(f, "footprint too small: {size} cells (minimum {min})")
            }
            Self::FootprintTooLarge { size, max } => {
                write!(f, "footprint too large: {size} cells (maximum {max})")
            }
            Self::NegativeCoordinate { cell } => {
                write!(f, "negative coordinates not allowed: {cell}")
            }
            Self::Collision {
                object_id,
                conflicts,
            } => {
                write!(
                    f,
                    "collision: object '{object_id}' overlaps {} occupied cell(s)",
                    conflicts.len()
                )?;
                if let Some(first) = conflicts.first() {
                    write!(f, ", first at {first}")?;
                }
                Ok(())
            }
            Self::ObjectNotFound { object_id } => {
                write!(f, "object '{object_id}' not found in grid")
            }
        }
    }
}

impl Error for PlacementError {}

/// Errors from undo/redo history navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryError {
    /// Undo requested at the earliest entry.
    NoPreviousState,
    /// Redo requested at the latest entry.
    NoNextState,
    /// Current state requested before anything was pushed.
    EmptyHistory,
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPreviousState => write!(f, "cannot undo: no previous state"),
            Self::NoNextState => write!(f, "cannot redo: no next state"),
            Self::EmptyHistory => write!(f, "history is empty"),
        }
    }
}

impl Error for HistoryError {}
