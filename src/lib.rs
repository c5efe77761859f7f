//! Sholo Guti application library.
//!
//! Builds on [`sholo_core`] with what a playable game needs around the
//! rules: configuration, a save slot, a client session that keeps two
//! players in sync, and a relay that pairs them in rooms.
//!
//! # Architecture
//!
//! - **Config**: TOML settings with defaults
//! - **Store**: the single-file save slot
//! - **Client**: turn gating and state sharing for one player
//! - **Rooms / Relay**: two-seat rooms over WebSocket
//! - **Play**: hot-seat terminal game
//!
//! # Example
//!
//! ```
//! use sholo_guti::{ClientSession, NodeId, TurnEngine};
//!
//! let mut session = ClientSession::new(TurnEngine::new());
//! session.interact(NodeId::new(2, 1));
//! let outcome = session.interact(NodeId::new(2, 2));
//! assert!(outcome.is_commit());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
mod client;
mod config;
pub mod play;
mod protocol;
pub mod relay;
mod rooms;
mod store;

pub use client::ClientSession;
pub use config::{AppConfig, ConfigError};
pub use protocol::{ClientMessage, ServerMessage};
pub use rooms::{
    Outbox, ParticipantId, ROOM_CODE_ALPHABET, ROOM_CODE_LEN, RoomError, RoomRegistry,
};
pub use store::{SaveSlot, StoreError};

pub use sholo_core::{
    BoardGraph, Interaction, Move, MoveGenerator, NodeId, Occupancy, Player, Selection,
    Snapshot, SnapshotError, TurnEngine,
};
