//! Engine-level error type.

use std::error::Error;
use std::fmt;

use cella_core::{HistoryError, PlacementError};

/// Errors returned by [`Engine`](crate::Engine) operations and command
/// conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// Validation, collision, or lookup failure from placement.
    Placement(PlacementError),
    /// Undo/redo navigation failure.
    History(HistoryError),
    /// Undo or redo on an engine built without history.
    HistoryDisabled,
    /// A command record is missing a field its action needs, or could
    /// not be parsed.
    InvalidCommand {
        /// What was wrong.
        reason: String,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Placement(e) => write!(f, "placement failed: {e}"),
            Self::History(e) => write!(f, "{e}"),
            Self::HistoryDisabled => write!(f, "history tracking is disabled"),
            Self::InvalidCommand { reason } => write!(f, "invalid command: {reason}"),
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Placement(e) => Some(e),
            Self::History(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PlacementError> for EngineError {
    fn from(e: PlacementError) -> Self {
        Self::Placement(e)
    }
}

impl From<HistoryError> for EngineError {
    fn from(e: HistoryError) -> Self {
        Self::History(e)
    }
}
