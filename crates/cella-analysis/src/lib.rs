//! Read-only analysis over Cella grid snapshots.
//!
//! - [`rooms`]: flood-fill detection of enclosed empty regions per level
//! - [`graph`]: undirected contact graph between placed objects
//!
//! Results are computed fresh on every call and never cached.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod graph;
pub mod rooms;

pub use graph::{
    build_structural_graph, find_connected_components, find_neighbors, get_graph_stats,
    get_object_degree, is_connected, GraphStats, StructuralGraph,
};
pub use rooms::{
    detect_rooms, find_room_at_cell, get_room_stats, Room, RoomError, RoomStats,
    DEFAULT_MIN_ROOM_SIZE, MAX_SCAN_CELLS,
};
