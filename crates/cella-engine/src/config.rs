//! Engine configuration and validation.
//!
//! [`EngineConfig`] is the input to
//! [`Engine::with_config`](crate::Engine::with_config), which calls
//! [`validate()`](EngineConfig::validate) before building anything.

use std::error::Error;
use std::fmt;

use cella_core::{Bounds, GridState};

// ── EngineConfig ───────────────────────────────────────────────────

/// Construction parameters for an [`Engine`](crate::Engine).
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Track undo/redo history for the lifetime of the engine. Default: true.
    pub history: bool,
    /// Retain at most this many snapshots, evicting the oldest.
    /// `None` = unbounded. Ignored when `history` is false.
    pub max_history: Option<usize>,
    /// Bounds applied to `place` and `move_object` calls that pass none.
    pub bounds: Option<Bounds>,
    /// Starting state. Default: empty grid.
    pub initial_state: GridState,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history: true,
            max_history: None,
            bounds: None,
            initial_state: GridState::empty(),
        }
    }
}

impl EngineConfig {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_history == Some(0) {
            return Err(ConfigError::HistoryLimitZero);
        }
        if let Some(bounds) = self.bounds {
            if bounds.is_empty() {
                return Err(ConfigError::EmptyBounds { bounds });
            }
        }
        Ok(())
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected by [`EngineConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `max_history` was `Some(0)`.
    HistoryLimitZero,
    /// Default bounds admit no cell.
    EmptyBounds {
        /// The configured bounds.
        bounds: Bounds,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HistoryLimitZero => write!(f, "max_history must be at least 1"),
            Self::EmptyBounds { bounds } => {
                write!(f, "bounds {bounds} admit no cell")
            }
        }
    }
}

impl Error for ConfigError {}
