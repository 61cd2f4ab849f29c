//! Benchmark workloads for the Cella occupancy engine.
//!
//! Deterministic generators shared by the criterion benches:
//!
//! - [`placement_plan`]: `n` non-overlapping objects in scattered order
//! - [`room_grid`]: a square floor divided into walled rooms
//! - [`dense_grid`]: every cell of a square owned by its own object

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use cella_core::{rect_footprint, Cell, Footprint, GridState, ObjectId};

/// `n` single-row objects of length 1 to 3, laid out on distinct rows and
/// visited in an order derived from `seed`.
///
/// Rows never share cells, so every placement in the plan succeeds.
pub fn placement_plan(n: usize, seed: u64) -> Vec<(ObjectId, Footprint)> {
    let mut order: Vec<usize> = (0..n).collect();
    // Deterministic Fisher-Yates with an LCG step.
    let mut state = seed;
    for i in (1..n).rev() {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let j = (state >> 33) as usize % (i + 1);
        order.swap(i, j);
    }
    order
        .into_iter()
        .map(|i| {
            let len = 1 + (i % 3) as i32;
            let row = i as i32;
            (
                ObjectId::from(format!("obj_{i}")),
                rect_footprint(0..len, row..row + 1, 0),
            )
        })
        .collect()
}

/// A `side`×`side` floor on level 0 split into rooms of `room`×`room`
/// interior cells by one-cell walls. Each wall line is its own object.
pub fn room_grid(side: i32, room: i32) -> GridState {
    let pitch = room + 1;
    let mut pairs: Vec<(Cell, ObjectId)> = Vec::new();
    for k in (0..side).step_by(pitch.max(1) as usize) {
        let vertical = ObjectId::from(format!("v{k}"));
        let horizontal = ObjectId::from(format!("h{k}"));
        for t in 0..side {
            pairs.push((Cell::new(k, t, 0), vertical.clone()));
            pairs.push((Cell::new(t, k, 0), horizontal.clone()));
        }
    }
    GridState::from_cells(pairs)
}

/// A `side`×`side` level where every cell is a distinct object.
pub fn dense_grid(side: i32) -> GridState {
    GridState::from_cells(
        (0..side)
            .flat_map(|x| (0..side).map(move |y| Cell::new(x, y, 0)))
            .map(|c| (c, ObjectId::from(format!("c{}_{}", c.x, c.y)))),
    )
}
