//! Data types for replay recording and playback.

use cella_engine::{Command, Engine};

/// Header written once at the start of a log.
///
/// # Examples
///
/// ```
/// use cella_engine::Engine;
/// use cella_replay::ReplayHeader;
///
/// let header = ReplayHeader::for_engine(&Engine::new());
/// assert_eq!(header.initial_hash, cella_core::FNV_OFFSET);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayHeader {
    /// Version of the crate that wrote the log.
    pub engine_version: String,
    /// Stable hash of the engine's state before the first frame.
    pub initial_hash: u64,
}

impl ReplayHeader {
    /// Header describing `engine` as it is now.
    pub fn for_engine(engine: &Engine) -> Self {
        Self {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            initial_hash: engine.state().stable_hash(),
        }
    }
}

/// One recorded command and the resulting state hash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Zero-based position in the command stream.
    pub step: u64,
    /// The command applied.
    pub command: Command,
    /// Stable hash of the grid after the command, whether or not it
    /// succeeded.
    pub state_hash: u64,
}
