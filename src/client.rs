//! One player's side of a networked game.
//!
//! A [`ClientSession`] wraps a [`TurnEngine`] with everything the relay
//! needs: the assigned color, the room code, and a queue of outgoing state
//! messages produced by committed changes.

use crate::protocol::{ClientMessage, ServerMessage};
use crate::store::SaveSlot;
use sholo_core::{Interaction, NodeId, Player, Snapshot, TurnEngine};
use tracing::{debug, info, instrument, warn};

/// A local engine plus its link to a room.
#[derive(Debug)]
pub struct ClientSession {
    engine: TurnEngine,
    name: Option<String>,
    color: Option<Player>,
    room: Option<String>,
    opponent_name: Option<String>,
    awaiting_state: bool,
    last_error: Option<String>,
    slot: Option<SaveSlot>,
    outgoing: Vec<ClientMessage>,
}

impl ClientSession {
    /// Creates an offline session around `engine`.
    pub fn new(engine: TurnEngine) -> Self {
        Self {
            engine,
            name: None,
            color: None,
            room: None,
            opponent_name: None,
            awaiting_state: false,
            last_error: None,
            slot: None,
            outgoing: Vec::new(),
        }
    }

    /// Persists every committed change to `slot`.
    pub fn with_slot(mut self, slot: SaveSlot) -> Self {
        self.slot = Some(slot);
        self
    }

    /// Sets the display name sent with room requests.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The wrapped engine.
    pub fn engine(&self) -> &TurnEngine {
        &self.engine
    }

    /// Color assigned by the relay, if any.
    pub fn color(&self) -> Option<Player> {
        self.color
    }

    /// Room this session sits in, if any.
    pub fn room(&self) -> Option<&str> {
        self.room.as_deref()
    }

    /// The other player's display name, once known.
    pub fn opponent_name(&self) -> Option<&str> {
        self.opponent_name.as_deref()
    }

    /// Whether a joiner is still waiting for the host's state.
    pub fn is_awaiting_state(&self) -> bool {
        self.awaiting_state
    }

    /// Most recent `room-error` text.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// True when this side may act. Offline sessions always may.
    pub fn is_my_turn(&self) -> bool {
        self.color
            .is_none_or(|color| color == self.engine.current_player())
    }

    /// Request to open a room.
    pub fn create_room_request(&self) -> ClientMessage {
        ClientMessage::CreateRoom {
            name: self.name.clone(),
        }
    }

    /// Request to join `room`.
    pub fn join_room_request(&self, room: impl Into<String>) -> ClientMessage {
        ClientMessage::JoinRoom {
            room: room.into(),
            name: self.name.clone(),
        }
    }

    /// Takes every message queued since the last call.
    pub fn drain_outgoing(&mut self) -> Vec<ClientMessage> {
        std::mem::take(&mut self.outgoing)
    }

    /// Forwards a click to the engine when it is this side's turn.
    #[instrument(skip(self))]
    pub fn interact(&mut self, node: NodeId) -> Interaction {
        if !self.is_my_turn() {
            debug!(current = %self.engine.current_player(), "Not this side's turn");
            return Interaction::Ignored;
        }
        let outcome = self.engine.interact(node);
        if outcome.is_commit() {
            self.publish();
        }
        outcome
    }

    /// Undoes the last committed move and shares the result.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> bool {
        let undone = self.engine.undo();
        if undone {
            self.publish();
        }
        undone
    }

    /// Starts a fresh game and shares it.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.engine.reset();
        self.publish();
    }

    /// Toggles the forced-capture rule locally.
    pub fn set_forced_capture(&mut self, enabled: bool) {
        self.engine.set_forced_capture(enabled);
    }

    /// Applies one message from the relay.
    #[instrument(skip(self, message))]
    pub fn handle(&mut self, message: ServerMessage) {
        match message {
            ServerMessage::RoomCreated { room } => {
                info!(%room, "Hosting room");
                self.room = Some(room);
                self.color = None;
                self.awaiting_state = false;
                self.reset();
            }
            ServerMessage::RoomJoined { room, color } => {
                info!(%room, "Joined room");
                self.room = Some(room);
                if color.is_some() {
                    self.color = color;
                }
                self.awaiting_state = true;
            }
            ServerMessage::PeerJoined { name } => {
                info!(peer = ?name, "Peer joined");
                self.opponent_name = name;
            }
            ServerMessage::ColorAssigned { color } => {
                info!(%color, "Color assigned");
                self.color = Some(color);
            }
            ServerMessage::StartTurn { turn } => {
                debug!(%turn, "First turn dealt");
                self.engine.set_current_player(turn);
                self.save();
            }
            ServerMessage::Names {
                host_name,
                guest_name,
            } => {
                let opponent = if self.name.as_deref() == Some(host_name.as_str()) {
                    guest_name
                } else {
                    host_name
                };
                self.opponent_name = Some(opponent);
            }
            ServerMessage::State { state } => {
                self.awaiting_state = false;
                if !self.engine.restore_or_reset(&state) {
                    warn!("Peer state rejected, board reset");
                }
                self.save();
            }
            ServerMessage::RoomError { message } => {
                warn!(%message, "Room error");
                self.last_error = Some(message);
            }
        }
    }

    fn save(&self) {
        if let Some(slot) = &self.slot {
            slot.save_quietly(&self.engine.snapshot());
        }
    }

    fn publish(&mut self) {
        let snapshot: Snapshot = self.engine.snapshot();
        if let Some(slot) = &self.slot {
            slot.save_quietly(&snapshot);
        }
        if let Some(room) = &self.room {
            self.outgoing.push(ClientMessage::State {
                room: room.clone(),
                state: snapshot,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offline_session_queues_nothing() {
        let mut session = ClientSession::new(TurnEngine::new());
        session.interact(NodeId::new(0, 1));
        let outcome = session.interact(NodeId::new(0, 2));
        assert!(outcome.is_commit());
        assert!(session.drain_outgoing().is_empty());
    }

    #[test]
    fn test_wrong_color_is_ignored() {
        let mut session = ClientSession::new(TurnEngine::new());
        session.handle(ServerMessage::ColorAssigned { color: Player::Blue });
        assert_eq!(session.interact(NodeId::new(0, 1)), Interaction::Ignored);
        assert!(session.engine().selection().is_none());
    }
}
