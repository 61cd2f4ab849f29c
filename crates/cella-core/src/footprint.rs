//! Footprints: the set of cells one object occupies.

use std::ops::Range;

use indexmap::IndexSet;

use crate::id::Cell;

/// A set of cells with O(1) membership and caller-defined iteration order.
///
/// Iteration follows insertion order, so anything reported "first" about a
/// footprint (e.g. the offending cell of an out-of-bounds placement) is
/// deterministic.
pub type Footprint = IndexSet<Cell>;

/// Collect anything convertible into cells into a [`Footprint`].
///
/// Duplicate cells collapse into one.
///
/// # Examples
///
/// ```
/// use cella_core::{footprint, Cell};
///
/// let fp = footprint([(0, 0, 0), (1, 0, 0), (0, 0, 0)]);
/// assert_eq!(fp.len(), 2);
/// assert!(fp.contains(&Cell::new(1, 0, 0)));
/// ```
pub fn footprint<I, C>(cells: I) -> Footprint
where
    I: IntoIterator<Item = C>,
    C: Into<Cell>,
{
    cells.into_iter().map(Into::into).collect()
}

/// A filled rectangle on level `z`, row by row.
pub fn rect_footprint(x: Range<i32>, y: Range<i32>, z: i32) -> Footprint {
    let mut out = Footprint::new();
    for yy in y {
        for xx in x.clone() {
            out.insert(Cell::new(xx, yy, z));
        }
    }
    out
}
