//! Error types for the replay log.

use std::fmt;
use std::io;

/// Errors from recording, reading, or replaying a log.
#[derive(Debug)]
pub enum ReplayError {
    /// An I/O error occurred during read or write.
    Io(io::Error),
    /// The stream does not start with `b"CELL"`.
    InvalidMagic,
    /// The format version is not supported by this build.
    UnsupportedVersion {
        /// The version found in the stream.
        found: u8,
    },
    /// A frame could not be decoded (truncated or corrupt data).
    MalformedFrame {
        /// What went wrong.
        detail: String,
    },
    /// A command tag byte is not recognized.
    UnknownCommandTag {
        /// The unrecognized tag.
        tag: u8,
    },
    /// The engine's starting state differs from the one recorded.
    InitialStateMismatch {
        /// Hash from the log header.
        recorded: u64,
        /// Hash of the engine's current state.
        current: u64,
    },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidMagic => write!(f, "invalid magic bytes (expected b\"CELL\")"),
            Self::UnsupportedVersion { found } => {
                write!(f, "unsupported format version {found}")
            }
            Self::MalformedFrame { detail } => write!(f, "malformed frame: {detail}"),
            Self::UnknownCommandTag { tag } => write!(f, "unknown command tag {tag}"),
            Self::InitialStateMismatch { recorded, current } => write!(
                f,
                "initial state mismatch: recorded={recorded:#018x}, current={current:#018x}"
            ),
        }
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ReplayError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
