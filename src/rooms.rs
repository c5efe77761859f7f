//! Two-seat rooms that pair players and pass game state between them.
//!
//! The registry never interprets a state beyond storing the latest one per
//! room. Each participant owns an outbound channel; the transport drains it.

use crate::protocol::{ClientMessage, ServerMessage};
use derive_more::{Display, Error};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sholo_core::{Player, Snapshot};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, instrument, warn};

/// Connection-scoped identifier handed out by [`RoomRegistry::connect`].
pub type ParticipantId = u64;

/// Where a participant's outbound messages go.
pub type Outbox = UnboundedSender<ServerMessage>;

/// Characters room codes are drawn from. Ambiguous glyphs are left out.
pub const ROOM_CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Length of a room code.
pub const ROOM_CODE_LEN: usize = 6;

const DEFAULT_HOST_NAME: &str = "Player 1";
const DEFAULT_GUEST_NAME: &str = "Player 2";

/// Reasons a room request is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum RoomError {
    /// No room with that code.
    #[display("Room not found")]
    NotFound,
    /// Both seats are taken.
    #[display("Room full")]
    Full,
    /// The sender does not sit in that room.
    #[display("Not a member of this room")]
    NotMember,
}

#[derive(Debug)]
struct Room {
    host: ParticipantId,
    host_name: String,
    guest: Option<ParticipantId>,
    guest_name: Option<String>,
    state: Option<Snapshot>,
}

impl Room {
    fn seats(&self, participant: ParticipantId) -> bool {
        self.host == participant || self.guest == Some(participant)
    }

    fn peer_of(&self, participant: ParticipantId) -> Option<ParticipantId> {
        if self.host == participant {
            self.guest
        } else if self.guest == Some(participant) {
            Some(self.host)
        } else {
            None
        }
    }
}

#[derive(Debug)]
struct Registry {
    rooms: HashMap<String, Room>,
    outboxes: HashMap<ParticipantId, Outbox>,
    next_participant: ParticipantId,
    rng: StdRng,
}

impl Registry {
    fn send(&self, participant: ParticipantId, message: ServerMessage) {
        match self.outboxes.get(&participant) {
            Some(outbox) => {
                if outbox.send(message).is_err() {
                    debug!(participant, "Outbox closed, dropping message");
                }
            }
            None => debug!(participant, "No outbox for participant"),
        }
    }

    fn fresh_code(&mut self) -> String {
        loop {
            let code: String = (0..ROOM_CODE_LEN)
                .map(|_| {
                    let index = self.rng.gen_range(0..ROOM_CODE_ALPHABET.len());
                    char::from(ROOM_CODE_ALPHABET[index])
                })
                .collect();
            if !self.rooms.contains_key(&code) {
                return code;
            }
            debug!(%code, "Room code collision, drawing again");
        }
    }

    fn random_player(&mut self) -> Player {
        if self.rng.gen_bool(0.5) {
            Player::Red
        } else {
            Player::Blue
        }
    }
}

/// Shared table of open rooms and connected participants.
#[derive(Debug, Clone)]
pub struct RoomRegistry {
    inner: Arc<Mutex<Registry>>,
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomRegistry {
    /// Creates an empty registry seeded from system entropy.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating room registry");
        Self::with_rng(StdRng::from_entropy())
    }

    /// Creates an empty registry with a fixed seed, for reproducible draws.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Registry {
                rooms: HashMap::new(),
                outboxes: HashMap::new(),
                next_participant: 1,
                rng,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a new connection and returns its identifier.
    #[instrument(skip_all)]
    pub fn connect(&self, outbox: Outbox) -> ParticipantId {
        let mut registry = self.lock();
        let participant = registry.next_participant;
        registry.next_participant += 1;
        registry.outboxes.insert(participant, outbox);
        info!(participant, "Participant connected");
        participant
    }

    /// Number of open rooms.
    pub fn room_count(&self) -> usize {
        self.lock().rooms.len()
    }

    /// Whether a room with this code is open.
    pub fn has_room(&self, room: &str) -> bool {
        self.lock().rooms.contains_key(room)
    }

    /// Latest state stored for a room.
    pub fn stored_state(&self, room: &str) -> Option<Snapshot> {
        self.lock().rooms.get(room).and_then(|r| r.state.clone())
    }

    /// Dispatches one client message. Refusals are reported back to the
    /// sender as `room-error`.
    #[instrument(skip(self, message))]
    pub fn handle(&self, participant: ParticipantId, message: ClientMessage) {
        let result = match message {
            ClientMessage::CreateRoom { name } => {
                self.create_room(participant, name);
                Ok(())
            }
            ClientMessage::JoinRoom { room, name } => self.join_room(participant, &room, name),
            ClientMessage::State { room, state } => self.relay_state(participant, &room, state),
        };
        if let Err(e) = result {
            warn!(participant, error = %e, "Room request refused");
            self.send_to(
                participant,
                ServerMessage::RoomError {
                    message: e.to_string(),
                },
            );
        }
    }

    /// Queues a message for one participant.
    pub fn send_to(&self, participant: ParticipantId, message: ServerMessage) {
        self.lock().send(participant, message);
    }

    /// Opens a room with `participant` as host and returns its code.
    #[instrument(skip(self))]
    pub fn create_room(&self, participant: ParticipantId, name: Option<String>) -> String {
        let mut registry = self.lock();
        let code = registry.fresh_code();
        registry.rooms.insert(
            code.clone(),
            Room {
                host: participant,
                host_name: name.unwrap_or_else(|| DEFAULT_HOST_NAME.to_string()),
                guest: None,
                guest_name: None,
                state: None,
            },
        );
        info!(participant, room = %code, "Room created");
        registry.send(participant, ServerMessage::RoomCreated { room: code.clone() });
        code
    }

    /// Seats `participant` as the guest of `room`, replays the stored state
    /// to the newcomer, then deals colors and the first turn.
    #[instrument(skip(self))]
    pub fn join_room(
        &self,
        participant: ParticipantId,
        room: &str,
        name: Option<String>,
    ) -> Result<(), RoomError> {
        let mut registry = self.lock();
        let entry = registry.rooms.get_mut(room).ok_or(RoomError::NotFound)?;
        if entry.guest.is_some_and(|guest| guest != participant) {
            return Err(RoomError::Full);
        }
        let guest_name = name.unwrap_or_else(|| DEFAULT_GUEST_NAME.to_string());
        entry.guest = Some(participant);
        entry.guest_name = Some(guest_name.clone());
        let host = entry.host;
        let host_name = entry.host_name.clone();
        let stored = entry.state.clone();

        let host_color = registry.random_player();
        let first_turn = registry.random_player();
        info!(
            room,
            host,
            guest = participant,
            %host_color,
            %first_turn,
            "Guest joined room"
        );

        registry.send(
            participant,
            ServerMessage::RoomJoined {
                room: room.to_string(),
                color: None,
            },
        );
        if let Some(state) = stored {
            debug!(room, "Replaying stored state to guest");
            registry.send(participant, ServerMessage::State { state });
        }
        registry.send(
            host,
            ServerMessage::PeerJoined {
                name: Some(guest_name.clone()),
            },
        );
        registry.send(host, ServerMessage::ColorAssigned { color: host_color });
        registry.send(
            participant,
            ServerMessage::ColorAssigned {
                color: host_color.opponent(),
            },
        );
        for seat in [host, participant] {
            registry.send(seat, ServerMessage::StartTurn { turn: first_turn });
            registry.send(
                seat,
                ServerMessage::Names {
                    host_name: host_name.clone(),
                    guest_name: guest_name.clone(),
                },
            );
        }
        Ok(())
    }

    /// Stores `state` as the room's latest and forwards it to the other
    /// seat. The last state received wins.
    #[instrument(skip(self, state))]
    pub fn relay_state(
        &self,
        participant: ParticipantId,
        room: &str,
        state: Snapshot,
    ) -> Result<(), RoomError> {
        let mut registry = self.lock();
        let entry = registry.rooms.get_mut(room).ok_or(RoomError::NotFound)?;
        if !entry.seats(participant) {
            return Err(RoomError::NotMember);
        }
        entry.state = Some(state.clone());
        let peer = entry.peer_of(participant);
        debug!(room, participant, ?peer, "Relaying state");
        if let Some(peer) = peer {
            registry.send(peer, ServerMessage::State { state });
        }
        Ok(())
    }

    /// Drops a connection. Every room it sat in is closed and the remaining
    /// participant is told.
    #[instrument(skip(self))]
    pub fn disconnect(&self, participant: ParticipantId) {
        let mut registry = self.lock();
        registry.outboxes.remove(&participant);
        let closing: Vec<String> = registry
            .rooms
            .iter()
            .filter(|(_, room)| room.seats(participant))
            .map(|(code, _)| code.clone())
            .collect();
        for code in closing {
            if let Some(room) = registry.rooms.remove(&code) {
                info!(participant, room = %code, "Closing room");
                if let Some(peer) = room.peer_of(participant) {
                    registry.send(
                        peer,
                        ServerMessage::RoomError {
                            message: "Host left".to_string(),
                        },
                    );
                }
            }
        }
        info!(participant, "Participant disconnected");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

    fn drain(rx: &mut UnboundedReceiver<ServerMessage>) -> Vec<ServerMessage> {
        let mut out = Vec::new();
        while let Ok(message) = rx.try_recv() {
            out.push(message);
        }
        out
    }

    #[test]
    fn test_room_codes_use_alphabet() {
        let registry = RoomRegistry::with_seed(7);
        let (tx, _rx) = unbounded_channel();
        let host = registry.connect(tx);
        for _ in 0..20 {
            let code = registry.create_room(host, None);
            assert_eq!(code.len(), ROOM_CODE_LEN);
            assert!(code.bytes().all(|b| ROOM_CODE_ALPHABET.contains(&b)));
        }
        assert_eq!(registry.room_count(), 20);
    }

    #[test]
    fn test_create_room_notifies_host() {
        let registry = RoomRegistry::with_seed(1);
        let (tx, mut rx) = unbounded_channel();
        let host = registry.connect(tx);
        let code = registry.create_room(host, Some("Ana".to_string()));
        assert_eq!(drain(&mut rx), vec![ServerMessage::RoomCreated { room: code }]);
    }

    #[test]
    fn test_handle_reports_unknown_room() {
        let registry = RoomRegistry::with_seed(1);
        let (tx, mut rx) = unbounded_channel();
        let guest = registry.connect(tx);
        registry.handle(
            guest,
            ClientMessage::JoinRoom {
                room: "NOPE22".to_string(),
                name: None,
            },
        );
        assert_eq!(
            drain(&mut rx),
            vec![ServerMessage::RoomError {
                message: "Room not found".to_string()
            }]
        );
    }
}
