//! Snapshots of game state for undo, persistence and transport.

use crate::error::{SnapshotError, SnapshotErrorKind};
use crate::graph::BoardGraph;
use crate::layout::PIECES_PER_SIDE;
use crate::occupancy::Occupancy;
use crate::types::{NodeId, Player};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strum::IntoEnumIterator;
use tracing::{instrument, warn};

/// Occupancy plus whose turn it is.
///
/// Serializes as `{"pieces": [["x,y", "red"], ...], "currentPlayer": "red"}`,
/// the shape exchanged with the save slot and the room relay. Both fields
/// are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pieces: Vec<(NodeId, Player)>,
    current_player: Player,
}

impl Snapshot {
    /// Creates a snapshot from explicit pieces.
    pub fn new(pieces: Vec<(NodeId, Player)>, current_player: Player) -> Self {
        Self {
            pieces,
            current_player,
        }
    }

    /// Copies `occupancy` into an independent snapshot.
    pub fn of(occupancy: &Occupancy, current_player: Player) -> Self {
        Self::new(occupancy.iter().collect(), current_player)
    }

    /// The pieces, in the order given.
    pub fn pieces(&self) -> &[(NodeId, Player)] {
        &self.pieces
    }

    /// Whose turn it is.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Checks the snapshot against `graph` and builds its occupancy.
    ///
    /// # Errors
    ///
    /// Fails if a piece sits off the board, a node is listed twice, or a side
    /// has more than sixteen pieces.
    #[instrument(skip_all, fields(pieces = self.pieces.len()))]
    pub fn validate(&self, graph: &BoardGraph) -> Result<Occupancy, SnapshotError> {
        let mut seen = BTreeSet::new();
        for &(node, _) in &self.pieces {
            if !graph.contains(node) {
                warn!(%node, "Snapshot piece off the board");
                return Err(SnapshotError::new(SnapshotErrorKind::UnknownNode(node)));
            }
            if !seen.insert(node) {
                warn!(%node, "Snapshot lists node twice");
                return Err(SnapshotError::new(SnapshotErrorKind::DuplicateNode(node)));
            }
        }

        let occupancy: Occupancy = self.pieces.iter().copied().collect();
        for player in Player::iter() {
            let count = occupancy.count(player);
            if count > PIECES_PER_SIDE {
                warn!(%player, count, "Snapshot exceeds piece limit");
                return Err(SnapshotError::new(SnapshotErrorKind::TooManyPieces(count)));
            }
        }
        Ok(occupancy)
    }

    /// Parses the JSON wire form.
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotErrorKind::Parse`] error for invalid JSON or
    /// missing fields.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Renders the JSON wire form.
    pub fn to_json(&self) -> String {
        // Node ids and players always encode.
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Last-in, first-out stack of snapshots taken before each committed move.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UndoStack {
    entries: Vec<Snapshot>,
}

impl UndoStack {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a snapshot.
    pub fn push(&mut self, snapshot: Snapshot) {
        self.entries.push(snapshot);
    }

    /// Pops the most recent snapshot.
    pub fn pop(&mut self) -> Option<Snapshot> {
        self.entries.pop()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there is nothing to undo.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
