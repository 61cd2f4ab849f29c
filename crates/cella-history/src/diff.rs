//! Cell-level differences between two grid snapshots.

use std::error::Error;
use std::fmt;

use cella_core::{Footprint, GridState};

/// Cells that became occupied (`added`) or free (`removed`) between two
/// snapshots.
///
/// A cell that stays occupied but changes owner appears in neither set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GridDiff {
    /// Occupied in the new state only.
    pub added: Footprint,
    /// Occupied in the old state only.
    pub removed: Footprint,
}

impl GridDiff {
    /// Whether both sets are empty.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Total number of changed cells.
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len()
    }
}

/// Errors from diff operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiffError {
    /// The diff lacks owner ids and cannot reconstruct a grid.
    Unsupported,
}

impl fmt::Display for DiffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported => write!(
                f,
                "apply_diff is unsupported: diffs carry no object ids, use full snapshots"
            ),
        }
    }
}

impl Error for DiffError {}

/// Compute the diff from `old` to `new`. O(|old| + |new|).
///
/// # Examples
///
/// ```
/// use cella_core::{Cell, GridState};
/// use cella_history::compute_diff;
///
/// let old = GridState::from_cells([((0, 0, 0), "a")]);
/// let new = GridState::from_cells([((1, 0, 0), "a")]);
/// let d = compute_diff(&old, &new);
/// assert!(d.added.contains(&Cell::new(1, 0, 0)));
/// assert!(d.removed.contains(&Cell::new(0, 0, 0)));
/// ```
pub fn compute_diff(old: &GridState, new: &GridState) -> GridDiff {
    let added = new
        .cells()
        .map(|(c, _)| c)
        .filter(|c| !old.is_occupied(*c))
        .collect();
    let removed = old
        .cells()
        .map(|(c, _)| c)
        .filter(|c| !new.is_occupied(*c))
        .collect();
    GridDiff { added, removed }
}

/// Swap `added` and `removed`.
pub fn invert_diff(diff: &GridDiff) -> GridDiff {
    GridDiff {
        added: diff.removed.clone(),
        removed: diff.added.clone(),
    }
}

/// Not supported: a cell-only diff cannot say who owned a removed cell.
///
/// Always returns [`DiffError::Unsupported`]. Keep full snapshots in a
/// [`StateHistory`](crate::StateHistory) instead.
pub fn apply_diff(_diff: &GridDiff, _grid: &GridState) -> Result<GridState, DiffError> {
    Err(DiffError::Unsupported)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cella_core::{footprint, Cell, ObjectId};
    use cella_test_utils::{grid_with, single, wall_line};
    use proptest::prelude::*;

    #[test]
    fn identical_states_have_empty_diff() {
        let g = grid_with(&[("a", wall_line(0, 0, 0, 3))]);
        let d = compute_diff(&g, &g.clone());
        assert!(d.is_empty());
        assert_eq!(d.len(), 0);
    }

    #[test]
    fn owner_change_is_invisible() {
        let a = grid_with(&[("a", single(0, 0, 0))]);
        let b = grid_with(&[("b", single(0, 0, 0))]);
        assert!(compute_diff(&a, &b).is_empty());
    }

    #[test]
    fn added_and_removed() {
        let old = grid_with(&[("a", wall_line(0, 0, 0, 2))]);
        let new = grid_with(&[("a", wall_line(1, 0, 0, 2))]);
        let d = compute_diff(&old, &new);
        assert_eq!(d.added, footprint([(2, 0, 0)]));
        assert_eq!(d.removed, footprint([(0, 0, 0)]));
        assert_eq!(d.len(), 2);
    }

    #[test]
    fn apply_is_unsupported() {
        let g = GridState::empty();
        assert_eq!(
            apply_diff(&GridDiff::default(), &g),
            Err(DiffError::Unsupported)
        );
        assert!(DiffError::Unsupported.to_string().contains("unsupported"));
    }

    fn arb_grid() -> impl Strategy<Value = GridState> {
        prop::collection::vec(((0i32..5, 0i32..5, 0i32..2), 0u8..3), 0..15).prop_map(|pairs| {
            GridState::from_cells(
                pairs
                    .into_iter()
                    .map(|(c, id)| (Cell::from(c), ObjectId::from(format!("o{id}")))),
            )
        })
    }

    proptest! {
        #[test]
        fn diffs_are_mutual_inverses(a in arb_grid(), b in arb_grid()) {
            let ab = compute_diff(&a, &b);
            let ba = compute_diff(&b, &a);
            prop_assert_eq!(&ab.added, &ba.removed);
            prop_assert_eq!(&ab.removed, &ba.added);
            prop_assert_eq!(invert_diff(&ab), ba);
        }

        #[test]
        fn double_inversion_is_identity(a in arb_grid(), b in arb_grid()) {
            let d = compute_diff(&a, &b);
            prop_assert_eq!(invert_diff(&invert_diff(&d)), d);
        }

        #[test]
        fn diff_sets_are_disjoint(a in arb_grid(), b in arb_grid()) {
            let d = compute_diff(&a, &b);
            prop_assert!(d.added.is_disjoint(&d.removed));
        }
    }
}
