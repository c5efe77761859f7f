//! Sholo Guti game logic.
//!
//! Sholo Guti is a two-player capture game on a graph-shaped board: a 5x5
//! grid with a triangular extension on each end, 37 points in all. Pieces
//! slide along edges and capture by jumping an adjacent opponent onto the
//! empty point directly beyond it.
//!
//! # Architecture
//!
//! - **BoardGraph**: the fixed nodes and adjacency of the board
//! - **MoveGenerator**: slides, jumps and capture availability
//! - **TurnEngine**: selection, forced captures, capture chains, undo
//! - **Snapshot**: occupancy plus turn, for undo, saving and syncing
//!
//! # Example
//!
//! ```
//! use sholo_core::{Interaction, NodeId, Player, TurnEngine};
//!
//! let mut engine = TurnEngine::new();
//! engine.interact(NodeId::new(2, 1));
//! let result = engine.interact(NodeId::new(2, 2));
//! assert!(result.is_commit());
//! assert_eq!(engine.current_player(), Player::Blue);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod engine;
mod error;
mod graph;
pub mod invariants;
mod layout;
mod movegen;
mod occupancy;
mod snapshot;
mod types;

pub use engine::{Interaction, Selection, TurnEngine};
pub use error::{SnapshotError, SnapshotErrorKind};
pub use graph::{BoardGraph, RENDER_SUPPRESSED, is_render_suppressed};
pub use layout::{PIECES_PER_SIDE, starting_occupancy};
pub use movegen::MoveGenerator;
pub use occupancy::Occupancy;
pub use snapshot::{Snapshot, UndoStack};
pub use types::{Move, NodeId, NodeIdParseError, Player};
