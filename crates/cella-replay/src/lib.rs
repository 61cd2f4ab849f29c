//! Command logging and determinism replay for the Cella engine.
//!
//! Records the commands applied to an [`Engine`](cella_engine::Engine)
//! together with the grid's stable hash after each one, then re-applies
//! them to a fresh engine and reports the first step whose hash differs.
//!
//! # Architecture
//!
//! - [`ReplayWriter`] records frames to any `Write` sink
//! - [`ReplayReader`] plays back frames from any `Read` source
//! - [`record_batch`] runs a batch and records it in one pass
//! - [`replay_and_compare`] verifies a log against an engine
//! - All I/O uses a small hand-written binary codec
//!
//! # Format
//!
//! ```text
//! [MAGIC "CELL"] [VERSION u8] [engine_version str] [initial_hash u64]
//! [Frame 1] [Frame 2] ... [Frame N]
//! ```
//!
//! Each frame holds the step number, one encoded command, and the
//! FNV-1a stable hash of the grid after that command.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod compare;
pub mod error;
pub mod reader;
pub mod record;
pub mod types;
pub mod writer;

pub use compare::{replay_and_compare, Divergence};
pub use error::ReplayError;
pub use reader::{FrameIter, ReplayReader};
pub use record::record_batch;
pub use types::{Frame, ReplayHeader};
pub use writer::ReplayWriter;

/// Magic bytes at the start of every replay log.
pub const MAGIC: [u8; 4] = *b"CELL";

/// Current binary format version.
pub const FORMAT_VERSION: u8 = 1;
