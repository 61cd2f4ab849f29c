//! Test fixtures for Cella development.
//!
//! Small builders for the grid layouts that recur across the workspace's
//! tests and benchmarks: single cells, wall lines, walled rooms, and
//! grids assembled from `(id, cells)` lists.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use cella_core::{Cell, Footprint, GridState, ObjectId};

/// A one-cell footprint.
pub fn single(x: i32, y: i32, z: i32) -> Footprint {
    std::iter::once(Cell::new(x, y, z)).collect()
}

/// A horizontal run of `len` cells starting at `(x, y, z)` along +x.
pub fn wall_line(x: i32, y: i32, z: i32, len: i32) -> Footprint {
    (0..len).map(|i| Cell::new(x + i, y, z)).collect()
}

/// The outer ring of a `w`×`h` rectangle whose corner is `(x0, y0)`.
///
/// The ring encloses `(w - 2) * (h - 2)` empty cells. A 3×3 ring is the
/// eight cells around `(x0 + 1, y0 + 1)`.
pub fn walled_room(x0: i32, y0: i32, w: i32, h: i32, z: i32) -> Footprint {
    let mut out = Footprint::new();
    for x in x0..x0 + w {
        out.insert(Cell::new(x, y0, z));
        out.insert(Cell::new(x, y0 + h - 1, z));
    }
    for y in y0..y0 + h {
        out.insert(Cell::new(x0, y, z));
        out.insert(Cell::new(x0 + w - 1, y, z));
    }
    out
}

/// Build a grid from `(id, footprint)` entries. Later entries win on overlap.
pub fn grid_with(entries: &[(&str, Footprint)]) -> GridState {
    let mut pairs: Vec<(Cell, ObjectId)> = Vec::new();
    for (id, fp) in entries {
        let id = ObjectId::from(*id);
        pairs.extend(fp.iter().map(|c| (*c, id.clone())));
    }
    GridState::from_cells(pairs)
}

/// A grid where every ring cell belongs to one object named `id`.
pub fn room_grid(id: &str, x0: i32, y0: i32, w: i32, h: i32, z: i32) -> GridState {
    grid_with(&[(id, walled_room(x0, y0, w, h, z))])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_3x3_has_eight_cells() {
        let ring = walled_room(0, 0, 3, 3, 0);
        assert_eq!(ring.len(), 8);
        assert!(!ring.contains(&Cell::new(1, 1, 0)));
    }

    #[test]
    fn ring_5x4_perimeter() {
        assert_eq!(walled_room(2, 2, 5, 4, 1).len(), 2 * 5 + 2 * 4 - 4);
    }

    #[test]
    fn wall_line_is_contiguous() {
        let w = wall_line(1, 2, 0, 4);
        assert_eq!(w.len(), 4);
        assert!(w.contains(&Cell::new(4, 2, 0)));
    }

    #[test]
    fn grid_with_assigns_ids() {
        let g = grid_with(&[("a", single(0, 0, 0)), ("b", single(1, 0, 0))]);
        assert_eq!(g.size(), 2);
        assert_eq!(g.object_ids().len(), 2);
    }
}
