//! Pure collision detection.
//!
//! Two footprints collide when they share at least one cell. There is no
//! geometry here: no bounding boxes, no meshes, only set intersection.

use cella_core::{Cell, Footprint, GridState};

/// Whether any cell of `footprint` is already occupied in `grid`.
///
/// O(|footprint| · log n). An empty footprint never collides.
///
/// # Examples
///
/// ```
/// use cella_core::{footprint, GridState};
/// use cella_place::detect_collision;
///
/// let grid = GridState::from_cells([((0, 0, 0), "wall")]);
/// assert!(detect_collision(&footprint([(0, 0, 0), (1, 0, 0)]), &grid));
/// assert!(!detect_collision(&footprint([(2, 0, 0)]), &grid));
/// ```
pub fn detect_collision(footprint: &Footprint, grid: &GridState) -> bool {
    footprint.iter().any(|c| grid.is_occupied(*c))
}

/// Whether two footprints share a cell. Symmetric.
pub fn check_overlap(a: &Footprint, b: &Footprint) -> bool {
    !a.is_disjoint(b)
}

/// The occupied cells of `footprint`, sorted.
///
/// Empty exactly when [`detect_collision`] is false.
pub fn conflicting_cells(footprint: &Footprint, grid: &GridState) -> Vec<Cell> {
    let mut out: Vec<Cell> = footprint
        .iter()
        .copied()
        .filter(|c| grid.is_occupied(*c))
        .collect();
    out.sort_unstable();
    out
}
