//! The immutable occupancy snapshot.

use std::fmt;
use std::hash::{Hash, Hasher};

use im::{OrdMap, OrdSet};
use indexmap::IndexSet;

use crate::footprint::Footprint;
use crate::hash::pairs_hash;
use crate::id::{Cell, ObjectId};

/// Immutable mapping from [`Cell`] to the [`ObjectId`] occupying it.
///
/// A cell maps to at most one object; an object may own many cells.
/// No method mutates a `GridState`: [`with_object`](Self::with_object)
/// and [`without_object`](Self::without_object) build a new snapshot
/// that shares all untouched structure with the old one. Cloning is
/// O(1) and snapshots can be shared freely across threads.
///
/// Equality compares the cell→id pairs and ignores construction order.
///
/// # Examples
///
/// ```
/// use cella_core::{Cell, GridState};
///
/// let grid = GridState::empty();
/// assert!(!grid.is_occupied(Cell::new(0, 0, 0)));
/// assert_eq!(grid.get_object(Cell::new(0, 0, 0)), None);
///
/// let grid = GridState::from_cells([((0, 0, 0), "wall"), ((1, 0, 0), "wall")]);
/// assert_eq!(grid.size(), 2);
/// assert_eq!(grid.object_ids().len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct GridState {
    // Ordered by `Cell`, which is the canonical order of the stable hash.
    cells: OrdMap<Cell, ObjectId>,
    // Reverse index kept in step with `cells`; no entry holds an empty set.
    owners: OrdMap<ObjectId, OrdSet<Cell>>,
}

impl GridState {
    /// An empty grid.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a grid from `(cell, id)` pairs. Later pairs win on duplicate cells.
    pub fn from_cells<I, C, O>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (C, O)>,
        C: Into<Cell>,
        O: Into<ObjectId>,
    {
        let mut grid = Self::default();
        for (cell, id) in pairs {
            grid.claim(cell.into(), id.into());
        }
        grid
    }

    // ── Persistent updates ──────────────────────────────────────

    /// A new grid with every cell of `footprint` owned by `object_id`.
    ///
    /// Cells already owned by another object change hands; callers that
    /// must not overwrite check for collisions first. Costs
    /// O(|footprint| · log n); `self` is untouched.
    pub fn with_object(&self, object_id: &ObjectId, footprint: &Footprint) -> Self {
        let mut next = self.clone();
        for cell in footprint {
            next.claim(*cell, object_id.clone());
        }
        next
    }

    /// A new grid without any cell owned by `object_id`.
    ///
    /// Costs O(k · log n) for an object of k cells. An unknown id gives
    /// back an equal grid.
    pub fn without_object(&self, object_id: &str) -> Self {
        let mut next = self.clone();
        if let Some(owned) = next.owners.remove(object_id) {
            for cell in owned.iter() {
                next.cells.remove(cell);
            }
        }
        next
    }

    // Owner sets are taken out of the index before editing so that an
    // unshared set is updated in place instead of path-copied.
    fn claim(&mut self, cell: Cell, id: ObjectId) {
        if let Some(prev) = self.cells.insert(cell, id.clone()) {
            if prev != id {
                self.release(&prev, cell);
            }
        }
        let mut owned = self.owners.remove(&id).unwrap_or_default();
        owned.insert(cell);
        self.owners.insert(id, owned);
    }

    fn release(&mut self, id: &ObjectId, cell: Cell) {
        if let Some(mut owned) = self.owners.remove(id) {
            owned.remove(&cell);
            if !owned.is_empty() {
                self.owners.insert(id.clone(), owned);
            }
        }
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Whether `cell` is occupied.
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.cells.contains_key(&cell)
    }

    /// The object occupying `cell`, if any.
    pub fn get_object(&self, cell: Cell) -> Option<&ObjectId> {
        self.cells.get(&cell)
    }

    /// All occupied cells, in `Cell` order.
    pub fn all_cells(&self) -> Footprint {
        self.cells.keys().copied().collect()
    }

    /// All distinct object ids, sorted.
    pub fn object_ids(&self) -> IndexSet<ObjectId> {
        self.owners.keys().cloned().collect()
    }

    /// Number of distinct object ids.
    pub fn object_count(&self) -> usize {
        self.owners.len()
    }

    /// Whether any cell is owned by `id`.
    pub fn contains_object(&self, id: &str) -> bool {
        self.owners.contains_key(id)
    }

    /// The footprint currently owned by `id` (empty if absent).
    pub fn cells_of(&self, id: &str) -> Footprint {
        self.owners
            .get(id)
            .map(|owned| owned.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Iterate over every `(cell, id)` pair in `Cell` order.
    pub fn cells(&self) -> impl Iterator<Item = (Cell, &ObjectId)> + '_ {
        self.cells.iter().map(|(c, o)| (*c, o))
    }

    /// Number of occupied cells.
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Number of occupied cells. Same as [`size`](Self::size).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cell is occupied.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    // ── Deterministic hash ──────────────────────────────────────

    /// A hash that depends only on the cell→id pairs.
    ///
    /// Pairs are folded through FNV-1a 64 in `Cell` order, so equal
    /// grids hash equally regardless of insertion order, process, or
    /// platform. The empty grid hashes to [`FNV_OFFSET`](crate::FNV_OFFSET).
    pub fn stable_hash(&self) -> u64 {
        pairs_hash(self.cells.iter())
    }
}

impl PartialEq for GridState {
    fn eq(&self, other: &Self) -> bool {
        self.cells.ptr_eq(&other.cells) || self.cells == other.cells
    }
}

impl Eq for GridState {}

impl Hash for GridState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.stable_hash());
    }
}

impl fmt::Debug for GridState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridState")
            .field("cells", &self.cells.len())
            .field("objects", &self.owners.len())
            .finish()
    }
}

impl<C: Into<Cell>, O: Into<ObjectId>> FromIterator<(C, O)> for GridState {
    fn from_iter<I: IntoIterator<Item = (C, O)>>(iter: I) -> Self {
        Self::from_cells(iter)
    }
}
