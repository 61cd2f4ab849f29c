//! Closed command set and its JSON record form.
//!
//! External drivers send records like
//! `{"action": "place", "id": "wall_01", "footprint": [[0, 0, 0]]}`.
//! Records are converted once into [`Command`] and dispatched by
//! exhaustive `match` in [`Engine::apply`](crate::Engine::apply).

use cella_core::{Cell, Footprint, ObjectId};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// One engine operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Place an object on a footprint.
    Place {
        /// Object to place.
        id: ObjectId,
        /// Cells to claim.
        footprint: Footprint,
    },
    /// Remove every cell of an object.
    Remove {
        /// Object to remove.
        id: ObjectId,
    },
    /// Move an object to a new footprint.
    Move {
        /// Object to move.
        id: ObjectId,
        /// Destination cells.
        footprint: Footprint,
    },
    /// Step history back.
    Undo,
    /// Step history forward.
    Redo,
    /// Clear the grid.
    Reset,
}

impl Command {
    /// The record action for this command.
    pub fn action(&self) -> Action {
        match self {
            Self::Place { .. } => Action::Place,
            Self::Remove { .. } => Action::Remove,
            Self::Move { .. } => Action::Move,
            Self::Undo => Action::Undo,
            Self::Redo => Action::Redo,
            Self::Reset => Action::Reset,
        }
    }
}

/// The `action` field of a [`CommandRecord`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// `"place"`
    Place,
    /// `"remove"`
    Remove,
    /// `"move"`
    Move,
    /// `"undo"`
    Undo,
    /// `"redo"`
    Redo,
    /// `"reset"`
    Reset,
}

impl Action {
    /// Lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Place => "place",
            Self::Remove => "remove",
            Self::Move => "move",
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::Reset => "reset",
        }
    }
}

/// Loosely-typed wire form of a [`Command`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    /// What to do.
    pub action: Action,
    /// Target object; required for place, remove and move.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// `[x, y, z]` triples; required for place and move.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footprint: Option<Vec<[i32; 3]>>,
}

impl CommandRecord {
    fn require_id(&self) -> Result<ObjectId, EngineError> {
        self.id
            .as_deref()
            .map(ObjectId::from)
            .ok_or_else(|| EngineError::InvalidCommand {
                reason: format!("'{}' requires an id", self.action.as_str()),
            })
    }

    fn require_footprint(&self) -> Result<Footprint, EngineError> {
        self.footprint
            .as_ref()
            .map(|cells| cells.iter().copied().map(Cell::from).collect())
            .ok_or_else(|| EngineError::InvalidCommand {
                reason: format!("'{}' requires a footprint", self.action.as_str()),
            })
    }
}

impl TryFrom<CommandRecord> for Command {
    type Error = EngineError;

    fn try_from(record: CommandRecord) -> Result<Self, Self::Error> {
        Ok(match record.action {
            Action::Place => Command::Place {
                id: record.require_id()?,
                footprint: record.require_footprint()?,
            },
            Action::Remove => Command::Remove {
                id: record.require_id()?,
            },
            Action::Move => Command::Move {
                id: record.require_id()?,
                footprint: record.require_footprint()?,
            },
            Action::Undo => Command::Undo,
            Action::Redo => Command::Redo,
            Action::Reset => Command::Reset,
        })
    }
}

impl From<&Command> for CommandRecord {
    fn from(command: &Command) -> Self {
        let (id, footprint) = match command {
            Command::Place { id, footprint } | Command::Move { id, footprint } => (
                Some(id.to_string()),
                Some(footprint.iter().map(|c| <[i32; 3]>::from(*c)).collect()),
            ),
            Command::Remove { id } => (Some(id.to_string()), None),
            Command::Undo | Command::Redo | Command::Reset => (None, None),
        };
        Self {
            action: command.action(),
            id,
            footprint,
        }
    }
}

/// Parse a JSON array of command records.
///
/// Malformed JSON and records missing required fields both fail with
/// [`EngineError::InvalidCommand`]; the index of the bad record is
/// included in the reason.
///
/// # Examples
///
/// ```
/// use cella_engine::{parse_commands, Command};
///
/// let cmds = parse_commands(r#"[
///     {"action": "place", "id": "a", "footprint": [[0, 0, 0]]},
///     {"action": "undo"}
/// ]"#).unwrap();
/// assert_eq!(cmds.len(), 2);
/// assert_eq!(cmds[1], Command::Undo);
/// ```
pub fn parse_commands(json: &str) -> Result<Vec<Command>, EngineError> {
    let records: Vec<CommandRecord> =
        serde_json::from_str(json).map_err(|e| EngineError::InvalidCommand {
            reason: e.to_string(),
        })?;
    records
        .into_iter()
        .enumerate()
        .map(|(i, r)| {
            Command::try_from(r).map_err(|e| match e {
                EngineError::InvalidCommand { reason } => EngineError::InvalidCommand {
                    reason: format!("record {i}: {reason}"),
                },
                other => other,
            })
        })
        .collect()
}
