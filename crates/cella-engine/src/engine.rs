//! The stateful engine wrapper.
//!
//! [`Engine`] is a small state machine: one current [`GridState`] plus an
//! optional [`StateHistory`]. Whether history exists is fixed at
//! construction. Each successful mutation replaces the current state and
//! pushes it; a failed one leaves both untouched.
//!
//! The engine has no internal locking. Snapshots returned from it are
//! immutable and may be shared across threads, but writes to one engine
//! must be serialized by the caller.

use cella_core::{Bounds, Cell, Footprint, GridState, ObjectId};
use cella_history::StateHistory;
use cella_place::{move_object, place_multiple, place_object, remove_object};

use crate::command::Command;
use crate::config::{ConfigError, EngineConfig};
use crate::error::EngineError;

/// Cursor summary of an engine's history.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HistoryStats {
    /// Retained snapshots.
    pub size: usize,
    /// Index of the current snapshot.
    pub cursor: usize,
    /// Whether undo would succeed.
    pub can_undo: bool,
    /// Whether redo would succeed.
    pub can_redo: bool,
}

/// Point-in-time summary returned by [`Engine::get_stats`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineStats {
    /// Occupied cells in the current state.
    pub occupied_cells: usize,
    /// Distinct object ids in the current state.
    pub unique_objects: usize,
    /// [`GridState::stable_hash`] of the current state.
    pub state_hash: u64,
    /// `None` when history is disabled.
    pub history: Option<HistoryStats>,
}

/// Current grid plus optional undo/redo history.
///
/// # Examples
///
/// ```
/// use cella_core::{footprint, Cell};
/// use cella_engine::{Engine, EngineError};
///
/// let mut engine = Engine::new();
/// engine.place("a", &footprint([(0, 0, 0)]), None).unwrap();
///
/// let err = engine.place("b", &footprint([(0, 0, 0)]), None).unwrap_err();
/// assert!(matches!(err, EngineError::Placement(_)));
/// assert_eq!(engine.get_object(Cell::new(0, 0, 0)).unwrap(), "a");
///
/// engine.undo().unwrap();
/// assert!(!engine.is_occupied(Cell::new(0, 0, 0)));
/// ```
#[derive(Clone, Debug)]
pub struct Engine {
    current: GridState,
    history: Option<StateHistory>,
    bounds: Option<Bounds>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// An empty engine with unbounded history.
    pub fn new() -> Self {
        Self::build(EngineConfig::default())
    }

    /// An empty engine without history. `undo`/`redo` always fail with
    /// [`EngineError::HistoryDisabled`].
    pub fn without_history() -> Self {
        Self::build(EngineConfig {
            history: false,
            ..EngineConfig::default()
        })
    }

    /// Validate `config` and build an engine from it.
    ///
    /// The initial state is pushed as the first history entry, so a fresh
    /// engine cannot undo.
    pub fn with_config(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EngineConfig) -> Self {
        let history = config.history.then(|| {
            let mut h = match config.max_history {
                Some(cap) => StateHistory::with_capacity(cap),
                None => StateHistory::new(),
            };
            h.push(config.initial_state.clone());
            h
        });
        Self {
            current: config.initial_state,
            history,
            bounds: config.bounds,
        }
    }

    /// The current snapshot.
    pub fn state(&self) -> GridState {
        self.current.clone()
    }

    /// Whether undo/redo are tracked.
    pub fn history_enabled(&self) -> bool {
        self.history.is_some()
    }

    /// Default bounds from the configuration.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    fn commit(&mut self, state: GridState) -> GridState {
        if let Some(h) = self.history.as_mut() {
            if h.push(state.clone()).is_some() {
                log::trace!("history full, evicted oldest snapshot");
            }
        }
        self.current = state.clone();
        state
    }

    // ── Mutations ──────────────────────────────────────────────────

    /// Place an object. `bounds` falls back to the configured default.
    pub fn place(
        &mut self,
        object_id: impl Into<ObjectId>,
        footprint: &Footprint,
        bounds: Option<Bounds>,
    ) -> Result<GridState, EngineError> {
        let object_id = object_id.into();
        let next = place_object(
            object_id.clone(),
            footprint,
            &self.current,
            bounds.or(self.bounds),
        )?;
        log::debug!(
            "placed '{object_id}' on {} cell(s), grid now {} cell(s)",
            footprint.len(),
            next.size()
        );
        Ok(self.commit(next))
    }

    /// Remove every cell owned by `object_id`.
    pub fn remove(&mut self, object_id: &str) -> Result<GridState, EngineError> {
        let next = remove_object(object_id, &self.current)?;
        log::debug!("removed '{object_id}', grid now {} cell(s)", next.size());
        Ok(self.commit(next))
    }

    /// Move an object to a new footprint. Its own old cells never block
    /// the move.
    pub fn move_object(
        &mut self,
        object_id: &str,
        new_footprint: &Footprint,
        bounds: Option<Bounds>,
    ) -> Result<GridState, EngineError> {
        let next = move_object(
            object_id,
            new_footprint,
            &self.current,
            bounds.or(self.bounds),
        )?;
        log::debug!("moved '{object_id}' to {} cell(s)", new_footprint.len());
        Ok(self.commit(next))
    }

    /// Place several objects as one step: all succeed and one history
    /// entry is pushed, or nothing changes.
    pub fn place_multiple(
        &mut self,
        placements: &[(ObjectId, Footprint)],
        bounds: Option<Bounds>,
    ) -> Result<GridState, EngineError> {
        let next = place_multiple(placements, &self.current, bounds.or(self.bounds))?;
        log::debug!(
            "placed {} object(s), grid now {} cell(s)",
            placements.len(),
            next.size()
        );
        Ok(self.commit(next))
    }

    /// Replace the current state with an empty grid. Undoable.
    pub fn reset(&mut self) -> GridState {
        log::debug!("reset ({} cell(s) cleared)", self.current.size());
        self.commit(GridState::empty())
    }

    /// Replace the current state wholesale. Undoable.
    pub fn load_state(&mut self, state: GridState) -> GridState {
        log::debug!("loaded state with {} cell(s)", state.size());
        self.commit(state)
    }

    // ── History ────────────────────────────────────────────────────

    /// Step back to the previous snapshot.
    pub fn undo(&mut self) -> Result<GridState, EngineError> {
        let h = self.history.as_mut().ok_or(EngineError::HistoryDisabled)?;
        let state = h.undo()?;
        log::trace!("undo -> {:?}", h.cursor());
        self.current = state.clone();
        Ok(state)
    }

    /// Step forward to the next snapshot.
    pub fn redo(&mut self) -> Result<GridState, EngineError> {
        let h = self.history.as_mut().ok_or(EngineError::HistoryDisabled)?;
        let state = h.redo()?;
        log::trace!("redo -> {:?}", h.cursor());
        self.current = state.clone();
        Ok(state)
    }

    /// Whether [`undo`](Self::undo) would succeed.
    pub fn can_undo(&self) -> bool {
        self.history.as_ref().is_some_and(StateHistory::can_undo)
    }

    /// Whether [`redo`](Self::redo) would succeed.
    pub fn can_redo(&self) -> bool {
        self.history.as_ref().is_some_and(StateHistory::can_redo)
    }

    /// Forget all history, keeping the current state as the only entry.
    /// No-op without history.
    pub fn clear_history(&mut self) {
        if let Some(h) = self.history.as_mut() {
            h.clear();
            h.push(self.current.clone());
            log::trace!("history cleared");
        }
    }

    // ── Dispatch ───────────────────────────────────────────────────

    /// Execute one command against the engine.
    pub fn apply(&mut self, command: &Command) -> Result<GridState, EngineError> {
        match command {
            Command::Place { id, footprint } => self.place(id, footprint, None),
            Command::Remove { id } => self.remove(id.as_str()),
            Command::Move { id, footprint } => self.move_object(id.as_str(), footprint, None),
            Command::Undo => self.undo(),
            Command::Redo => self.redo(),
            Command::Reset => Ok(self.reset()),
        }
    }

    // ── Queries ────────────────────────────────────────────────────

    /// Whether `cell` is occupied in the current state.
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.current.is_occupied(cell)
    }

    /// Owner of `cell` in the current state.
    pub fn get_object(&self, cell: Cell) -> Option<&ObjectId> {
        self.current.get_object(cell)
    }

    /// Summary of the current state and history.
    pub fn get_stats(&self) -> EngineStats {
        EngineStats {
            occupied_cells: self.current.size(),
            unique_objects: self.current.object_count(),
            state_hash: self.current.stable_hash(),
            history: self.history.as_ref().map(|h| HistoryStats {
                size: h.size(),
                cursor: h.cursor().unwrap_or(0),
                can_undo: h.can_undo(),
                can_redo: h.can_redo(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cella_core::{footprint, HistoryError, PlacementError};
    use cella_test_utils::{grid_with, single, wall_line};

    #[test]
    fn fresh_engine_cannot_navigate() {
        let mut e = Engine::new();
        assert!(!e.can_undo());
        assert!(!e.can_redo());
        assert_eq!(
            e.undo(),
            Err(EngineError::History(HistoryError::NoPreviousState))
        );
        assert_eq!(e.redo(), Err(EngineError::History(HistoryError::NoNextState)));
    }

    #[test]
    fn disabled_history() {
        let mut e = Engine::without_history();
        e.place("a", &single(0, 0, 0), None).unwrap();
        assert!(!e.history_enabled());
        assert!(!e.can_undo());
        assert_eq!(e.undo(), Err(EngineError::HistoryDisabled));
        assert_eq!(e.redo(), Err(EngineError::HistoryDisabled));
        assert_eq!(e.get_stats().history, None);
        e.clear_history();
        assert_eq!(e.state().size(), 1);
    }

    #[test]
    fn failed_place_leaves_state() {
        let mut e = Engine::new();
        e.place("a", &single(0, 0, 0), None).unwrap();
        let before = e.get_stats();
        assert!(e.place("b", &single(0, 0, 0), None).is_err());
        assert!(e.place("", &single(5, 0, 0), None).is_err());
        assert_eq!(e.get_stats(), before);
    }

    #[test]
    fn configured_bounds_apply_by_default() {
        let mut e = Engine::with_config(EngineConfig {
            bounds: Some(Bounds::new(4, 4, 1)),
            ..EngineConfig::default()
        })
        .unwrap();
        assert!(matches!(
            e.place("a", &single(4, 0, 0), None),
            Err(EngineError::Placement(PlacementError::OutOfBounds { .. }))
        ));
        // Explicit bounds override the default.
        e.place("a", &single(4, 0, 0), Some(Bounds::new(8, 8, 1))).unwrap();
        assert!(e.move_object("a", &single(5, 0, 0), None).is_err());
    }

    #[test]
    fn invalid_config_rejected() {
        let err = Engine::with_config(EngineConfig {
            max_history: Some(0),
            ..EngineConfig::default()
        })
        .unwrap_err();
        assert_eq!(err, ConfigError::HistoryLimitZero);
    }

    #[test]
    fn initial_state_is_first_entry() {
        let seed = grid_with(&[("w", wall_line(0, 0, 0, 3))]);
        let mut e = Engine::with_config(EngineConfig {
            initial_state: seed.clone(),
            ..EngineConfig::default()
        })
        .unwrap();
        e.remove("w").unwrap();
        assert_eq!(e.undo().unwrap(), seed);
        assert!(!e.can_undo());
    }

    #[test]
    fn reset_and_load_are_undoable() {
        let mut e = Engine::new();
        e.place("a", &single(0, 0, 0), None).unwrap();
        e.reset();
        assert_eq!(e.state().size(), 0);
        e.undo().unwrap();
        assert!(e.is_occupied(Cell::new(0, 0, 0)));

        let other = grid_with(&[("z", single(3, 3, 0))]);
        e.load_state(other.clone());
        assert_eq!(e.state(), other);
        e.undo().unwrap();
        assert_eq!(e.get_object(Cell::new(0, 0, 0)).unwrap(), "a");
    }

    #[test]
    fn place_multiple_is_one_entry() {
        let mut e = Engine::new();
        let items = vec![
            (ObjectId::from("a"), single(0, 0, 0)),
            (ObjectId::from("b"), single(1, 0, 0)),
        ];
        e.place_multiple(&items, None).unwrap();
        assert_eq!(e.get_stats().history.unwrap().size, 2);
        e.undo().unwrap();
        assert!(e.state().is_empty());
    }

    #[test]
    fn place_multiple_failure_is_atomic() {
        let mut e = Engine::new();
        let items = vec![
            (ObjectId::from("a"), single(0, 0, 0)),
            (ObjectId::from("b"), single(0, 0, 0)),
        ];
        assert!(e.place_multiple(&items, None).is_err());
        assert!(e.state().is_empty());
        assert!(!e.can_undo());
    }

    #[test]
    fn new_mutation_drops_redo() {
        let mut e = Engine::new();
        e.place("a", &single(0, 0, 0), None).unwrap();
        e.undo().unwrap();
        assert!(e.can_redo());
        e.place("b", &single(1, 0, 0), None).unwrap();
        assert!(!e.can_redo());
    }

    #[test]
    fn max_history_caps_undo_depth() {
        let mut e = Engine::with_config(EngineConfig {
            max_history: Some(3),
            ..EngineConfig::default()
        })
        .unwrap();
        for x in 0..5 {
            e.place(format!("o{x}"), &single(x, 0, 0), None).unwrap();
        }
        let stats = e.get_stats().history.unwrap();
        assert_eq!(stats.size, 3);
        assert_eq!(stats.cursor, 2);
        e.undo().unwrap();
        e.undo().unwrap();
        assert!(!e.can_undo());
        assert_eq!(e.state().size(), 3);
    }

    #[test]
    fn clear_history_keeps_current() {
        let mut e = Engine::new();
        e.place("a", &single(0, 0, 0), None).unwrap();
        e.place("b", &single(1, 0, 0), None).unwrap();
        e.clear_history();
        assert!(!e.can_undo());
        assert_eq!(e.state().size(), 2);
        assert_eq!(e.get_stats().history.unwrap().size, 1);
    }

    #[test]
    fn apply_dispatches_every_variant() {
        let mut e = Engine::new();
        let fp = footprint([(0, 0, 0), (1, 0, 0)]);
        e.apply(&Command::Place {
            id: ObjectId::from("a"),
            footprint: fp,
        })
        .unwrap();
        e.apply(&Command::Move {
            id: ObjectId::from("a"),
            footprint: wall_line(1, 0, 0, 2),
        })
        .unwrap();
        assert!(e.is_occupied(Cell::new(2, 0, 0)));
        e.apply(&Command::Undo).unwrap();
        assert!(e.is_occupied(Cell::new(0, 0, 0)));
        e.apply(&Command::Redo).unwrap();
        e.apply(&Command::Remove {
            id: ObjectId::from("a"),
        })
        .unwrap();
        assert!(e.state().is_empty());
        e.apply(&Command::Undo).unwrap();
        e.apply(&Command::Reset).unwrap();
        assert!(e.state().is_empty());
    }

    #[test]
    fn stats_report_counts_and_hash() {
        let mut e = Engine::new();
        e.place("a", &wall_line(0, 0, 0, 3), None).unwrap();
        e.place("b", &single(0, 1, 0), None).unwrap();
        let stats = e.get_stats();
        assert_eq!(stats.occupied_cells, 4);
        assert_eq!(stats.unique_objects, 2);
        assert_eq!(stats.state_hash, e.state().stable_hash());
        assert_eq!(
            stats.history,
            Some(HistoryStats {
                size: 3,
                cursor: 2,
                can_undo: true,
                can_redo: false,
            })
        );
    }
}
