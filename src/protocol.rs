//! Messages exchanged between clients and the room relay.
//!
//! Every message is a JSON object tagged by `type`.

use serde::{Deserialize, Serialize};
use sholo_core::{Player, Snapshot};

/// Client to relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMessage {
    /// Open a new room and wait for a second player.
    CreateRoom {
        /// Display name of the host.
        #[serde(default)]
        name: Option<String>,
    },
    /// Join an existing room by code.
    JoinRoom {
        /// Room code.
        room: String,
        /// Display name of the guest.
        #[serde(default)]
        name: Option<String>,
    },
    /// Publish the sender's full game state to the room.
    State {
        /// Room code.
        room: String,
        /// The sender's state.
        state: Snapshot,
    },
}

/// Relay to client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMessage {
    /// The room was opened; the sender is its host.
    RoomCreated {
        /// Room code to share with the second player.
        room: String,
    },
    /// The sender joined the room.
    RoomJoined {
        /// Room code.
        room: String,
        /// Assigned color, when already known.
        color: Option<Player>,
    },
    /// A second player joined the host's room.
    PeerJoined {
        /// The newcomer's display name.
        name: Option<String>,
    },
    /// The color this participant plays.
    ColorAssigned {
        /// Assigned color.
        color: Player,
    },
    /// Which color moves first.
    StartTurn {
        /// The first player.
        turn: Player,
    },
    /// Display names of both participants.
    #[serde(rename_all = "camelCase")]
    Names {
        /// Host's name.
        host_name: String,
        /// Guest's name.
        guest_name: String,
    },
    /// The peer's full game state.
    State {
        /// Replacement state.
        state: Snapshot,
    },
    /// A request could not be served.
    RoomError {
        /// Human-readable reason.
        message: String,
    },
}
