//! Cell coordinates, object identifiers, and placement bounds.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// An integer-coordinate unit of grid space.
///
/// Cells carry no physical size; callers decide how a unit maps to
/// world length. Ordering is lexicographic on `(x, y, z)`, which is the
/// canonical order used by [`GridState::stable_hash`](crate::GridState::stable_hash).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
    /// Z coordinate (level).
    pub z: i32,
}

impl Cell {
    /// Create a cell from its three coordinates.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The four orthogonal neighbours on the same level: `+x, -x, +y, -y`.
    ///
    /// Diagonal and vertical neighbours are never included.
    ///
    /// # Examples
    ///
    /// ```
    /// use cella_core::Cell;
    ///
    /// let n = Cell::new(1, 1, 0).planar_neighbours();
    /// assert!(n.contains(&Cell::new(2, 1, 0)));
    /// assert!(n.contains(&Cell::new(1, 0, 0)));
    /// assert!(!n.contains(&Cell::new(1, 1, 1)));
    /// ```
    pub fn planar_neighbours(&self) -> [Cell; 4] {
        let Self { x, y, z } = *self;
        [
            Cell::new(x.wrapping_add(1), y, z),
            Cell::new(x.wrapping_sub(1), y, z),
            Cell::new(x, y.wrapping_add(1), z),
            Cell::new(x, y.wrapping_sub(1), z),
        ]
    }

    /// Whether any coordinate is negative.
    pub fn has_negative(&self) -> bool {
        self.x < 0 || self.y < 0 || self.z < 0
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl From<(i32, i32, i32)> for Cell {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self { x, y, z }
    }
}

impl From<[i32; 3]> for Cell {
    fn from([x, y, z]: [i32; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Cell> for [i32; 3] {
    fn from(c: Cell) -> Self {
        [c.x, c.y, c.z]
    }
}

/// Opaque identifier of a logical placed object.
///
/// Many cells may share one id (the object's footprint). Backed by a
/// shared `Arc<str>`, so cloning never copies the string. Hashing,
/// equality and ordering match the underlying `str`, which lets maps
/// keyed by `ObjectId` be queried with a plain `&str`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(Arc<str>);

impl ObjectId {
    /// Create an identifier from anything string-like.
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(s: &str) -> Self {
        Self(Arc::from(s))
    }
}

impl From<String> for ObjectId {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl From<&String> for ObjectId {
    fn from(s: &String) -> Self {
        Self(Arc::from(s.as_str()))
    }
}

impl From<&ObjectId> for ObjectId {
    fn from(id: &ObjectId) -> Self {
        id.clone()
    }
}

impl Borrow<str> for ObjectId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ObjectId {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for ObjectId {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

/// Exclusive upper limits for placement: a cell is inside when
/// `0 <= x < max_x`, `0 <= y < max_y` and `0 <= z < max_z`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Bounds {
    /// Exclusive x limit.
    pub max_x: i32,
    /// Exclusive y limit.
    pub max_y: i32,
    /// Exclusive z limit.
    pub max_z: i32,
}

impl Bounds {
    /// Create bounds from the three exclusive limits.
    pub const fn new(max_x: i32, max_y: i32, max_z: i32) -> Self {
        Self {
            max_x,
            max_y,
            max_z,
        }
    }

    /// Whether `cell` lies inside these bounds.
    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.max_x).contains(&cell.x)
            && (0..self.max_y).contains(&cell.y)
            && (0..self.max_z).contains(&cell.z)
    }

    /// Whether some axis admits no cell at all.
    pub fn is_empty(&self) -> bool {
        self.max_x <= 0 || self.max_y <= 0 || self.max_z <= 0
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[0, {}) x [0, {}) x [0, {})",
            self.max_x, self.max_y, self.max_z
        )
    }
}

impl From<(i32, i32, i32)> for Bounds {
    fn from((max_x, max_y, max_z): (i32, i32, i32)) -> Self {
        Self::new(max_x, max_y, max_z)
    }
}
