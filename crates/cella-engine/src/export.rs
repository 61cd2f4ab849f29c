//! Flat state export: `"x,y,z" -> object id`.
//!
//! The format keeps one id per cell, so objects survive a round trip,
//! but two distinct objects that share an id string cannot be told
//! apart.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;

use cella_core::{Cell, GridState, ObjectId};

/// Errors from [`import_state_json`] and [`parse_cell_key`].
#[derive(Debug)]
pub enum ExportError {
    /// The text is not a JSON object of strings.
    Json(serde_json::Error),
    /// A key is not three comma-separated integers.
    MalformedKey {
        /// The offending key.
        key: String,
    },
    /// A cell maps to an empty or whitespace-only id.
    BlankId {
        /// Key of the offending cell.
        key: String,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(e) => write!(f, "invalid state JSON: {e}"),
            Self::MalformedKey { key } => {
                write!(f, "malformed cell key '{key}' (expected \"x,y,z\")")
            }
            Self::BlankId { key } => write!(f, "cell '{key}' has an empty object id"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Map every occupied cell's `"x,y,z"` key to its owner.
pub fn export_state(grid: &GridState) -> BTreeMap<String, ObjectId> {
    grid.cells()
        .map(|(c, id)| (format!("{},{},{}", c.x, c.y, c.z), id.clone()))
        .collect()
}

/// [`export_state`] as pretty-printed JSON.
pub fn export_state_json(grid: &GridState) -> Result<String, ExportError> {
    let state = export_state(grid);
    let flat: BTreeMap<String, &str> = state
        .iter()
        .map(|(k, v)| (k.clone(), v.as_str()))
        .collect();
    Ok(serde_json::to_string_pretty(&flat)?)
}

/// Parse `"x,y,z"` or `"(x, y, z)"` into a cell.
pub fn parse_cell_key(key: &str) -> Result<Cell, ExportError> {
    let malformed = || ExportError::MalformedKey {
        key: key.to_string(),
    };
    let trimmed = key.trim();
    let inner = trimmed
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .unwrap_or(trimmed);

    let mut parts = inner.split(',').map(|p| p.trim().parse::<i32>());
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(Ok(x)), Some(Ok(y)), Some(Ok(z)), None) => Ok(Cell::new(x, y, z)),
        _ => Err(malformed()),
    }
}

/// Rebuild a grid from exported JSON.
///
/// # Examples
///
/// ```
/// use cella_core::Cell;
/// use cella_engine::import_state_json;
///
/// let grid = import_state_json(r#"{"0,0,0": "a", "(1, 0, 0)": "a"}"#).unwrap();
/// assert_eq!(grid.cells_of("a").len(), 2);
/// assert!(grid.is_occupied(Cell::new(1, 0, 0)));
/// ```
pub fn import_state_json(json: &str) -> Result<GridState, ExportError> {
    let flat: BTreeMap<String, String> = serde_json::from_str(json)?;
    let mut pairs = Vec::with_capacity(flat.len());
    for (key, id) in flat {
        let cell = parse_cell_key(&key)?;
        let id = ObjectId::from(id);
        if id.is_blank() {
            return Err(ExportError::BlankId { key });
        }
        pairs.push((cell, id));
    }
    let grid = GridState::from_cells(pairs);
    log::debug!("imported {} cell(s)", grid.size());
    Ok(grid)
}
