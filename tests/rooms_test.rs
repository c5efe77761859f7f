//! Two client sessions paired through the room registry.

use sholo_guti::{
    ClientMessage, ClientSession, Interaction, NodeId, ParticipantId, Player, RoomRegistry,
    ServerMessage, Snapshot, TurnEngine,
};
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

struct Seat {
    id: ParticipantId,
    inbox: UnboundedReceiver<ServerMessage>,
    session: ClientSession,
}

impl Seat {
    fn connect(registry: &RoomRegistry, name: &str) -> Self {
        let (tx, inbox) = unbounded_channel();
        Self {
            id: registry.connect(tx),
            inbox,
            session: ClientSession::new(TurnEngine::new()).with_name(name),
        }
    }

    fn received(&mut self) -> Vec<ServerMessage> {
        let mut out = Vec::new();
        while let Ok(message) = self.inbox.try_recv() {
            out.push(message);
        }
        out
    }
}

/// Delivers queued traffic both ways until nothing moves.
fn pump(registry: &RoomRegistry, seats: &mut [&mut Seat]) {
    loop {
        let mut moved = false;
        for seat in seats.iter_mut() {
            for message in seat.received() {
                seat.session.handle(message);
                moved = true;
            }
            for message in seat.session.drain_outgoing() {
                registry.handle(seat.id, message);
                moved = true;
            }
        }
        if !moved {
            break;
        }
    }
}

fn paired(seed: u64) -> (RoomRegistry, Seat, Seat, String) {
    let registry = RoomRegistry::with_seed(seed);
    let mut host = Seat::connect(&registry, "Host");
    let mut guest = Seat::connect(&registry, "Guest");

    registry.handle(host.id, host.session.create_room_request());
    pump(&registry, &mut [&mut host]);
    let code = host.session.room().expect("host has a room").to_string();

    registry.handle(guest.id, guest.session.join_room_request(code.clone()));
    pump(&registry, &mut [&mut host, &mut guest]);
    (registry, host, guest, code)
}

fn opening(player: Player) -> (NodeId, NodeId) {
    match player {
        Player::Red => (NodeId::new(0, 1), NodeId::new(0, 2)),
        Player::Blue => (NodeId::new(0, 3), NodeId::new(0, 2)),
    }
}

#[test]
fn test_join_deals_opposite_colors_and_same_turn() {
    let (registry, host, guest, code) = paired(11);

    let host_color = host.session.color().expect("host color");
    let guest_color = guest.session.color().expect("guest color");
    assert_eq!(guest_color, host_color.opponent());
    assert_eq!(
        host.session.engine().current_player(),
        guest.session.engine().current_player()
    );
    assert_eq!(guest.session.room(), Some(code.as_str()));
    assert!(!guest.session.is_awaiting_state());
    assert_eq!(host.session.opponent_name(), Some("Guest"));
    assert_eq!(guest.session.opponent_name(), Some("Host"));
    assert!(registry.has_room(&code));
}

#[test]
fn test_move_reaches_the_peer() {
    let (registry, mut host, mut guest, code) = paired(3);
    let turn = host.session.engine().current_player();
    let (mover, waiter) = if host.session.color() == Some(turn) {
        (&mut host, &mut guest)
    } else {
        (&mut guest, &mut host)
    };

    let (from, to) = opening(turn);
    assert_eq!(waiter.session.interact(from), Interaction::Ignored);
    mover.session.interact(from);
    assert!(mover.session.interact(to).is_commit());
    pump(&registry, &mut [mover, waiter]);

    assert_eq!(host.session.engine().snapshot(), guest.session.engine().snapshot());
    assert_eq!(host.session.engine().current_player(), turn.opponent());
    assert_eq!(
        registry.stored_state(&code),
        Some(host.session.engine().snapshot())
    );
}

#[test]
fn test_undo_is_shared() {
    let (registry, mut host, mut guest, _) = paired(5);
    let turn = host.session.engine().current_player();
    let before = host.session.engine().snapshot();
    let (mover, waiter) = if host.session.color() == Some(turn) {
        (&mut host, &mut guest)
    } else {
        (&mut guest, &mut host)
    };

    let (from, to) = opening(turn);
    mover.session.interact(from);
    mover.session.interact(to);
    pump(&registry, &mut [&mut *mover, &mut *waiter]);

    assert!(mover.session.undo());
    pump(&registry, &mut [mover, waiter]);
    assert_eq!(host.session.engine().snapshot(), before);
    assert_eq!(guest.session.engine().snapshot(), before);
}

#[test]
fn test_third_player_is_refused() {
    let (registry, _host, _guest, code) = paired(8);
    let mut late = Seat::connect(&registry, "Late");
    registry.handle(late.id, late.session.join_room_request(code));
    assert_eq!(
        late.received(),
        vec![ServerMessage::RoomError {
            message: "Room full".to_string()
        }]
    );
}

#[test]
fn test_disconnect_closes_room_and_warns_peer() {
    let (registry, host, mut guest, code) = paired(2);
    registry.disconnect(host.id);
    assert!(!registry.has_room(&code));
    assert_eq!(registry.room_count(), 0);
    assert_eq!(
        guest.received(),
        vec![ServerMessage::RoomError {
            message: "Host left".to_string()
        }]
    );
}

#[test]
fn test_last_state_wins() {
    let registry = RoomRegistry::with_seed(4);
    let (tx, _rx) = unbounded_channel();
    let host = registry.connect(tx);
    let code = registry.create_room(host, None);

    let first = Snapshot::new(vec![(NodeId::new(2, 2), Player::Red)], Player::Blue);
    let second = Snapshot::new(vec![(NodeId::new(1, 1), Player::Blue)], Player::Red);
    for state in [first, second.clone()] {
        registry.handle(
            host,
            ClientMessage::State {
                room: code.clone(),
                state,
            },
        );
    }
    assert_eq!(registry.stored_state(&code), Some(second));
}

#[test]
fn test_state_from_outsider_is_refused() {
    let registry = RoomRegistry::with_seed(4);
    let (host_tx, _host_rx) = unbounded_channel();
    let (outsider_tx, mut outsider_rx) = unbounded_channel();
    let host = registry.connect(host_tx);
    let outsider = registry.connect(outsider_tx);
    let code = registry.create_room(host, None);

    registry.handle(
        outsider,
        ClientMessage::State {
            room: code.clone(),
            state: TurnEngine::new().snapshot(),
        },
    );
    assert_eq!(registry.stored_state(&code), None);
    assert!(matches!(
        outsider_rx.try_recv(),
        Ok(ServerMessage::RoomError { .. })
    ));
}

#[test]
fn test_malformed_peer_state_resets_board() {
    let mut session = ClientSession::new(TurnEngine::new());
    session.interact(NodeId::new(0, 1));
    session.interact(NodeId::new(0, 2));

    let json = r#"{"pieces":[["9,9","red"]],"currentPlayer":"blue"}"#;
    let bogus = Snapshot::from_json(json).expect("well-formed JSON");
    session.handle(ServerMessage::State { state: bogus });

    assert_eq!(session.engine().snapshot(), TurnEngine::new().snapshot());
    assert!(session.drain_outgoing().is_empty());
}
