//! Immutable placement transitions.
//!
//! Every function takes a [`GridState`] by reference and returns a new
//! one. On failure the input is untouched and no intermediate state
//! escapes. The new grid shares storage with the input, so each call
//! costs in proportion to the cells it touches, not to the grid.

use cella_core::{Bounds, Footprint, GridState, ObjectId, PlacementError};

use crate::collision::conflicting_cells;
use crate::validation::validate_placement;

/// Place `object_id` on every cell of `footprint`.
///
/// Runs [`validate_placement`] and then a collision check against
/// `grid`. Fails with [`PlacementError::Collision`] listing every
/// occupied cell of the footprint.
///
/// # Examples
///
/// ```
/// use cella_core::{footprint, GridState, PlacementError};
/// use cella_place::place_object;
///
/// let empty = GridState::empty();
/// let grid = place_object("a", &footprint([(0, 0, 0)]), &empty, None).unwrap();
/// assert_eq!(grid.size(), 1);
/// assert!(empty.is_empty());
///
/// let err = place_object("b", &footprint([(0, 0, 0)]), &grid, None).unwrap_err();
/// assert!(matches!(err, PlacementError::Collision { .. }));
/// ```
pub fn place_object(
    object_id: impl Into<ObjectId>,
    footprint: &Footprint,
    grid: &GridState,
    bounds: Option<Bounds>,
) -> Result<GridState, PlacementError> {
    let object_id = object_id.into();
    check_free(&object_id, footprint, grid, bounds)?;
    Ok(grid.with_object(&object_id, footprint))
}

/// Remove every cell owned by `object_id`.
///
/// Fails with [`PlacementError::ObjectNotFound`] if the id owns no cell.
pub fn remove_object(object_id: &str, grid: &GridState) -> Result<GridState, PlacementError> {
    if !grid.contains_object(object_id) {
        return Err(PlacementError::ObjectNotFound {
            object_id: ObjectId::from(object_id),
        });
    }
    Ok(grid.without_object(object_id))
}

/// Move `object_id` to `new_footprint`.
///
/// Equivalent to [`remove_object`] followed by [`place_object`], so the
/// object's own old cells never count as a collision. Overlap with any
/// other object fails exactly as `place_object` would.
pub fn move_object(
    object_id: &str,
    new_footprint: &Footprint,
    grid: &GridState,
    bounds: Option<Bounds>,
) -> Result<GridState, PlacementError> {
    let without = remove_object(object_id, grid)?;
    place_object(object_id, new_footprint, &without, bounds)
}

/// Place several objects in list order, each seeing the ones before it.
///
/// Atomic: the first failing item aborts the whole batch and its error is
/// returned.
pub fn place_multiple(
    placements: &[(ObjectId, Footprint)],
    grid: &GridState,
    bounds: Option<Bounds>,
) -> Result<GridState, PlacementError> {
    let mut next = grid.clone();
    for (object_id, footprint) in placements {
        check_free(object_id, footprint, &next, bounds)?;
        next = next.with_object(object_id, footprint);
    }
    Ok(next)
}

/// Validate the request, then fail if any footprint cell is taken.
fn check_free(
    object_id: &ObjectId,
    footprint: &Footprint,
    grid: &GridState,
    bounds: Option<Bounds>,
) -> Result<(), PlacementError> {
    validate_placement(object_id.as_str(), footprint, bounds)?;

    let conflicts = conflicting_cells(footprint, grid);
    if !conflicts.is_empty() {
        return Err(PlacementError::Collision {
            object_id: object_id.clone(),
            conflicts,
        });
    }
    Ok(())
}
