//! Stateful engine over immutable Cella grids.
//!
//! [`Engine`] owns one current [`GridState`](cella_core::GridState) and,
//! when enabled, a snapshot history. Every mutation goes through the pure
//! placement functions and replaces the current state only on success.
//!
//! Around it sit the integration pieces: a closed [`Command`] enum with
//! its JSON record form, a batch driver that logs and skips failures, and
//! a flat `"x,y,z" -> id` state export.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod batch;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;

pub use batch::{run_batch, BatchReport};
pub use command::{parse_commands, Action, Command, CommandRecord};
pub use config::{ConfigError, EngineConfig};
pub use engine::{Engine, EngineStats, HistoryStats};
pub use error::EngineError;
pub use export::{
    export_state, export_state_json, import_state_json, parse_cell_key, ExportError,
};
