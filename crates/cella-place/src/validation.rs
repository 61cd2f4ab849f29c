//! Input validation for placement requests.
//!
//! Validation never looks at occupancy; collision is checked separately
//! by [`collision`](crate::collision). Nothing here mutates a grid.

use cella_core::{Bounds, Cell, Footprint, PlacementError};

/// Check that a placement request is well-formed.
///
/// Fails with [`PlacementError::EmptyIdentifier`] for a blank id,
/// [`PlacementError::EmptyFootprint`] for an empty footprint, and
/// [`PlacementError::OutOfBounds`] naming the first offending cell (in
/// footprint order) when `bounds` is supplied.
///
/// Only the request itself is checked. Occupancy, including cells
/// claimed earlier in the same batch, is the collision check's job.
pub fn validate_placement(
    object_id: &str,
    footprint: &Footprint,
    bounds: Option<Bounds>,
) -> Result<(), PlacementError> {
    if object_id.trim().is_empty() {
        return Err(PlacementError::EmptyIdentifier);
    }
    if footprint.is_empty() {
        return Err(PlacementError::EmptyFootprint);
    }
    if let Some(bounds) = bounds {
        if let Some(cell) = footprint.iter().find(|c| !bounds.contains(**c)) {
            return Err(PlacementError::OutOfBounds {
                cell: *cell,
                bounds,
            });
        }
    }
    Ok(())
}

/// Check the cardinality of a footprint against `min_size` and an
/// optional `max_size`.
pub fn validate_footprint_shape(
    footprint: &Footprint,
    min_size: usize,
    max_size: Option<usize>,
) -> Result<(), PlacementError> {
    let size = footprint.len();
    if size < min_size {
        return Err(PlacementError::FootprintTooSmall {
            size,
            min: min_size,
        });
    }
    match max_size {
        Some(max) if size > max => Err(PlacementError::FootprintTooLarge { size, max }),
        _ => Ok(()),
    }
}

/// Reject cells with a negative coordinate unless `allow_negative` is set.
pub fn validate_cell_coordinates(cell: Cell, allow_negative: bool) -> Result<(), PlacementError> {
    if !allow_negative && cell.has_negative() {
        return Err(PlacementError::NegativeCoordinate { cell });
    }
    Ok(())
}
