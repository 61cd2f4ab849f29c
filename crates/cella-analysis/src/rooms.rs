//! Room detection by 4-connected flood fill.
//!
//! A room is a maximal region of empty cells on one z-level, connected
//! through shared edges (never diagonally, never across levels). The
//! search universe is the rectangle `[0, max_x) x [0, max_y)`.

use std::collections::VecDeque;
use std::error::Error;
use std::fmt;

use cella_core::{Cell, Footprint, GridState};
use smallvec::SmallVec;

/// Minimum room size used when the caller has no preference.
pub const DEFAULT_MIN_ROOM_SIZE: usize = 4;

/// Largest universe, in cells, that [`detect_rooms`] will scan.
///
/// The scan keeps one flag per cell of `[0, max_x) x [0, max_y)`, so the
/// area is capped rather than the number of occupied cells. 2^24 cells
/// is a 4096×4096 level.
pub const MAX_SCAN_CELLS: u64 = 1 << 24;

/// Side length of the square universe used for a level with no
/// occupied cells.
const EMPTY_LEVEL_EXTENT: i32 = 10;

/// One connected empty region on a single level.
///
/// Equality compares cell sets, so iteration order never matters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Room {
    cells: Footprint,
    z: i32,
}

impl Room {
    /// The room's cells in discovery order.
    pub fn cells(&self) -> &Footprint {
        &self.cells
    }

    /// Consume the room, returning its cells.
    pub fn into_cells(self) -> Footprint {
        self.cells
    }

    /// The level this room lies on.
    pub fn z(&self) -> i32 {
        self.z
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false for rooms produced by [`detect_rooms`].
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `cell` belongs to this room.
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// The smallest cell in `Cell` order.
    pub fn min_cell(&self) -> Option<Cell> {
        self.cells.iter().min().copied()
    }
}

/// Errors from [`detect_rooms`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoomError {
    /// The universe to scan exceeds [`MAX_SCAN_CELLS`].
    AreaTooLarge {
        /// Exclusive x limit of the universe.
        max_x: i32,
        /// Exclusive y limit of the universe.
        max_y: i32,
    },
}

impl fmt::Display for RoomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AreaTooLarge { max_x, max_y } => write!(
                f,
                "room scan area {max_x}x{max_y} exceeds the limit of {MAX_SCAN_CELLS} cells"
            ),
        }
    }
}

impl Error for RoomError {}

/// Aggregate sizes over a list of rooms. All zero for no rooms.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RoomStats {
    /// Number of rooms.
    pub room_count: usize,
    /// Sum of room sizes.
    pub total_cells: usize,
    /// Mean room size.
    pub avg_room_size: f64,
    /// Smallest room size.
    pub min_room_size: usize,
    /// Largest room size.
    pub max_room_size: usize,
}

/// Detect rooms on level `z_level`.
///
/// `bounds` is `(max_x, max_y)`. When absent it is derived as two more
/// than the largest occupied x and y on the level, or 10×10 for an empty
/// level. Regions smaller than `min_size` are dropped, as are regions
/// touching the outer ring of the universe when
/// `exclude_boundary_touching` is set.
///
/// Rooms are returned ordered by their smallest cell. Fails with
/// [`RoomError::AreaTooLarge`] when the universe is larger than
/// [`MAX_SCAN_CELLS`], which a single far-away occupied cell can cause
/// under derived bounds.
///
/// # Examples
///
/// ```
/// use cella_core::{Cell, GridState};
/// use cella_analysis::detect_rooms;
///
/// let ring = [(0, 0), (1, 0), (2, 0), (0, 1), (2, 1), (0, 2), (1, 2), (2, 2)];
/// let grid = GridState::from_cells(ring.iter().map(|&(x, y)| ((x, y, 0), "wall")));
///
/// let rooms = detect_rooms(&grid, 0, 1, false, Some((3, 3))).unwrap();
/// assert_eq!(rooms.len(), 1);
/// assert!(rooms[0].contains(Cell::new(1, 1, 0)));
/// ```
pub fn detect_rooms(
    grid: &GridState,
    z_level: i32,
    min_size: usize,
    exclude_boundary_touching: bool,
    bounds: Option<(i32, i32)>,
) -> Result<Vec<Room>, RoomError> {
    let (max_x, max_y) = bounds.unwrap_or_else(|| auto_bounds(grid, z_level));
    if max_x <= 0 || max_y <= 0 {
        return Ok(Vec::new());
    }
    if (max_x as u64) * (max_y as u64) > MAX_SCAN_CELLS {
        return Err(RoomError::AreaTooLarge { max_x, max_y });
    }

    let width = max_y as usize;
    let idx = |c: Cell| (c.x as usize) * width + (c.y as usize);
    let in_range = |c: Cell| (0..max_x).contains(&c.x) && (0..max_y).contains(&c.y);

    // `blocked` marks occupied cells and cells already claimed by a region.
    let mut blocked = vec![false; (max_x as usize) * width];
    for (cell, _) in grid.cells() {
        if cell.z == z_level && in_range(cell) {
            blocked[idx(cell)] = true;
        }
    }

    let mut rooms = Vec::new();
    let mut queue = VecDeque::new();

    // Row-major scan in `Cell` order: each seed is its region's minimum.
    for x in 0..max_x {
        for y in 0..max_y {
            let seed = Cell::new(x, y, z_level);
            if blocked[idx(seed)] {
                continue;
            }

            let mut region = Footprint::new();
            let mut touches_boundary = false;
            blocked[idx(seed)] = true;
            queue.push_back(seed);

            while let Some(cell) = queue.pop_front() {
                touches_boundary |=
                    cell.x == 0 || cell.y == 0 || cell.x == max_x - 1 || cell.y == max_y - 1;
                region.insert(cell);

                let next: SmallVec<[Cell; 4]> = cell
                    .planar_neighbours()
                    .into_iter()
                    .filter(|n| in_range(*n))
                    .collect();
                for n in next {
                    let i = idx(n);
                    if !blocked[i] {
                        blocked[i] = true;
                        queue.push_back(n);
                    }
                }
            }

            if region.len() < min_size || (exclude_boundary_touching && touches_boundary) {
                continue;
            }
            rooms.push(Room {
                cells: region,
                z: z_level,
            });
        }
    }
    Ok(rooms)
}

fn auto_bounds(grid: &GridState, z_level: i32) -> (i32, i32) {
    grid.cells()
        .map(|(c, _)| c)
        .filter(|c| c.z == z_level)
        .fold(None, |acc: Option<(i32, i32)>, c| match acc {
            None => Some((c.x, c.y)),
            Some((mx, my)) => Some((mx.max(c.x), my.max(c.y))),
        })
        .map(|(mx, my)| (mx.saturating_add(2), my.saturating_add(2)))
        .unwrap_or((EMPTY_LEVEL_EXTENT, EMPTY_LEVEL_EXTENT))
}

/// Summarise room sizes.
pub fn get_room_stats(rooms: &[Room]) -> RoomStats {
    if rooms.is_empty() {
        return RoomStats::default();
    }
    let sizes = rooms.iter().map(Room::len);
    let total_cells: usize = sizes.clone().sum();
    RoomStats {
        room_count: rooms.len(),
        total_cells,
        avg_room_size: total_cells as f64 / rooms.len() as f64,
        min_room_size: sizes.clone().min().unwrap_or(0),
        max_room_size: sizes.max().unwrap_or(0),
    }
}

/// The first room containing `cell`, if any.
pub fn find_room_at_cell(cell: Cell, rooms: &[Room]) -> Option<&Room> {
    rooms.iter().find(|r| r.contains(cell))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cella_core::footprint;
    use cella_test_utils::{grid_with, room_grid, wall_line, walled_room};

    #[test]
    fn far_cell_exceeds_scan_limit() {
        let grid = GridState::from_cells([((100_000, 100_000, 0), "pin")]);
        assert_eq!(
            detect_rooms(&grid, 0, 1, false, None),
            Err(RoomError::AreaTooLarge {
                max_x: 100_002,
                max_y: 100_002,
            })
        );
    }

    #[test]
    fn extreme_coordinates_fail_without_allocating() {
        let grid = GridState::from_cells([((i32::MAX, 0, 0), "pin")]);
        assert!(matches!(
            detect_rooms(&grid, 0, 1, false, None),
            Err(RoomError::AreaTooLarge { max_x: i32::MAX, .. })
        ));
    }

    #[test]
    fn explicit_bounds_checked_against_limit() {
        let grid = GridState::empty();
        assert!(detect_rooms(&grid, 0, 1, false, Some((4097, 4096))).is_err());
        // Other levels do not count towards the derived bounds.
        let grid = GridState::from_cells([((100_000, 0, 5), "pin"), ((1, 1, 0), "post")]);
        assert_eq!(detect_rooms(&grid, 0, 1, false, None).unwrap().len(), 1);
    }

    #[test]
    fn ring_of_eight_encloses_one_cell() {
        let grid = room_grid("wall", 0, 0, 3, 3, 0);
        let rooms = detect_rooms(&grid, 0, 1, false, Some((3, 3))).unwrap();
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].cells(), &footprint([(1, 1, 0)]));
        assert_eq!(rooms[0].z(), 0);
    }

    #[test]
    fn ring_room_touching_nothing_survives_boundary_filter() {
        let grid = room_grid("wall", 0, 0, 3, 3, 0);
        let rooms = detect_rooms(&grid, 0, 1, true, Some((3, 3))).unwrap();
        assert_eq!(rooms.len(), 1);
    }

    #[test]
    fn auto_bounds_include_outside_region() {
        // Auto bounds (4, 4): the outer L-shaped strip starts at (0, 3).
        let grid = room_grid("wall", 0, 0, 3, 3, 0);
        let rooms = detect_rooms(&grid, 0, 1, false, None).unwrap();
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].len(), 7);
        assert_eq!(rooms[0].min_cell(), Some(Cell::new(0, 3, 0)));
        assert_eq!(rooms[1].cells(), &footprint([(1, 1, 0)]));

        let enclosed = detect_rooms(&grid, 0, 1, true, None).unwrap();
        assert_eq!(enclosed.len(), 1);
        assert!(enclosed[0].contains(Cell::new(1, 1, 0)));
    }

    #[test]
    fn min_size_filters_small_regions() {
        let grid = room_grid("wall", 0, 0, 3, 3, 0);
        assert!(detect_rooms(&grid, 0, DEFAULT_MIN_ROOM_SIZE, true, None).unwrap().is_empty());
    }

    #[test]
    fn larger_room_interior() {
        let grid = room_grid("wall", 1, 1, 6, 5, 0);
        let rooms = detect_rooms(&grid, 0, DEFAULT_MIN_ROOM_SIZE, true, None).unwrap();
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].len(), 4 * 3);
        assert_eq!(rooms[0].min_cell(), Some(Cell::new(2, 2, 0)));
    }

    #[test]
    fn empty_level_uses_default_extent() {
        let rooms = detect_rooms(&GridState::empty(), 0, 1, false, None).unwrap();
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].len(), 100);
        assert!(detect_rooms(&GridState::empty(), 0, 1, true, None).unwrap().is_empty());
    }

    #[test]
    fn levels_are_independent() {
        let grid = room_grid("wall", 0, 0, 3, 3, 1);
        let rooms = detect_rooms(&grid, 1, 1, false, Some((3, 3))).unwrap();
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].z(), 1);
        // Level 0 has no walls at all.
        let ground = detect_rooms(&grid, 0, 1, false, Some((3, 3))).unwrap();
        assert_eq!(ground.len(), 1);
        assert_eq!(ground[0].len(), 9);
    }

    #[test]
    fn diagonal_gap_does_not_connect() {
        // Two 1-cell pockets touching only at a corner stay separate.
        let walls = footprint([
            (1, 0, 0),
            (0, 1, 0),
            (2, 1, 0),
            (1, 2, 0),
            (3, 2, 0),
            (2, 3, 0),
        ]);
        let grid = grid_with(&[("w", walls)]);
        let rooms = detect_rooms(&grid, 0, 1, false, Some((4, 4))).unwrap();
        let a = find_room_at_cell(Cell::new(1, 1, 0), &rooms).unwrap();
        let b = find_room_at_cell(Cell::new(2, 2, 0), &rooms).unwrap();
        assert_ne!(a, b);
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn rooms_sorted_by_smallest_cell() {
        let grid = grid_with(&[
            ("r1", walled_room(6, 0, 4, 4, 0)),
            ("r2", walled_room(0, 0, 4, 4, 0)),
        ]);
        let rooms = detect_rooms(&grid, 0, 1, true, None).unwrap();
        assert_eq!(rooms.len(), 2);
        assert!(rooms[0].min_cell() < rooms[1].min_cell());
        assert_eq!(rooms[0].min_cell(), Some(Cell::new(1, 1, 0)));
    }

    #[test]
    fn nonpositive_bounds_yield_nothing() {
        let grid = grid_with(&[("w", wall_line(0, 0, 0, 3))]);
        assert!(detect_rooms(&grid, 0, 1, false, Some((0, 5))).unwrap().is_empty());
    }

    #[test]
    fn detection_is_deterministic() {
        let grid = grid_with(&[
            ("a", walled_room(0, 0, 5, 5, 0)),
            ("b", wall_line(0, 7, 0, 9)),
        ]);
        let first = detect_rooms(&grid, 0, 1, false, None).unwrap();
        let second = detect_rooms(&grid, 0, 1, false, None).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn stats() {
        assert_eq!(get_room_stats(&[]), RoomStats::default());

        let grid = grid_with(&[
            ("a", walled_room(0, 0, 3, 3, 0)),
            ("b", walled_room(4, 0, 4, 4, 0)),
        ]);
        let rooms = detect_rooms(&grid, 0, 1, true, None).unwrap();
        let stats = get_room_stats(&rooms);
        assert_eq!(stats.room_count, 2);
        assert_eq!(stats.total_cells, 5);
        assert_eq!(stats.min_room_size, 1);
        assert_eq!(stats.max_room_size, 4);
        assert!((stats.avg_room_size - 2.5).abs() < 1e-12);
    }

    #[test]
    fn room_at_missing_cell() {
        let grid = room_grid("wall", 0, 0, 3, 3, 0);
        let rooms = detect_rooms(&grid, 0, 1, false, Some((3, 3))).unwrap();
        assert!(find_room_at_cell(Cell::new(0, 0, 0), &rooms).is_none());
    }
}
