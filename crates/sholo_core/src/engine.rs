//! The turn engine: selection, forced captures, capture chains and undo.
//!
//! One owned value holds the whole game. Callers feed it clicks through
//! [`TurnEngine::interact`] and react to the returned [`Interaction`]; a
//! committed move is the cue to redraw, persist and broadcast.

use crate::error::SnapshotError;
use crate::graph::BoardGraph;
use crate::invariants::{EngineInvariants, InvariantSet};
use crate::layout::starting_occupancy;
use crate::movegen::MoveGenerator;
use crate::occupancy::Occupancy;
use crate::snapshot::{Snapshot, UndoStack};
use crate::types::{Move, NodeId, Player};
use tracing::{debug, info, instrument, warn};

/// A selected piece and the moves it was offered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    node: NodeId,
    moves: Vec<Move>,
}

impl Selection {
    fn new(node: NodeId, moves: Vec<Move>) -> Self {
        Self { node, moves }
    }

    /// The selected node.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Moves available from it when it was selected.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    fn find(&self, to: NodeId) -> Option<Move> {
        self.moves.iter().copied().find(|m| m.to == to)
    }
}

/// What a call to [`TurnEngine::interact`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    /// Nothing changed.
    Ignored,
    /// A piece of the player to move was selected.
    Selected {
        /// The selected node.
        node: NodeId,
        /// Moves offered from it.
        moves: Vec<Move>,
    },
    /// A move was committed and the turn passed.
    Moved {
        /// Where the piece came from.
        from: NodeId,
        /// The move played.
        played: Move,
        /// The player now to move.
        next_player: Player,
    },
    /// A capture was committed and the same piece must keep jumping.
    ChainContinues {
        /// Where the piece came from.
        from: NodeId,
        /// The capture played.
        played: Move,
        /// Further captures from the landing node.
        moves: Vec<Move>,
    },
}

impl Interaction {
    /// True if the interaction changed the board.
    pub fn is_commit(&self) -> bool {
        matches!(
            self,
            Interaction::Moved { .. } | Interaction::ChainContinues { .. }
        )
    }
}

/// Complete, single-owner game state.
#[derive(Debug, Clone)]
pub struct TurnEngine {
    pub(crate) graph: BoardGraph,
    pub(crate) occupancy: Occupancy,
    pub(crate) current_player: Player,
    pub(crate) selection: Option<Selection>,
    pub(crate) forced_capture: bool,
    pub(crate) undo: UndoStack,
}

impl TurnEngine {
    /// Creates a game in the starting position with Red to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            graph: BoardGraph::new(),
            occupancy: starting_occupancy(),
            current_player: Player::Red,
            selection: None,
            forced_capture: false,
            undo: UndoStack::new(),
        }
    }

    /// Creates a game from a snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] if the snapshot does not fit the board.
    #[instrument(skip(snapshot))]
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self, SnapshotError> {
        let mut engine = Self::new();
        engine.restore(snapshot)?;
        Ok(engine)
    }

    // ─────────────────────────────────────────────────────────────
    //  Read access
    // ─────────────────────────────────────────────────────────────

    /// The board graph.
    pub fn graph(&self) -> &BoardGraph {
        &self.graph
    }

    /// Current piece placement.
    pub fn occupancy(&self) -> &Occupancy {
        &self.occupancy
    }

    /// The player to move.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// The current selection, if any.
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Moves offered for the current selection; empty when idle.
    pub fn legal_moves(&self) -> &[Move] {
        self.selection
            .as_ref()
            .map(|selection| selection.moves.as_slice())
            .unwrap_or_default()
    }

    /// Whether forced-capture mode is on.
    pub fn forced_capture(&self) -> bool {
        self.forced_capture
    }

    /// True if there is a move to undo.
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Number of undoable move legs.
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Number of pieces `player` has left.
    pub fn piece_count(&self, player: Player) -> usize {
        self.occupancy.count(player)
    }

    /// The winner, once one side has lost every piece.
    pub fn winner(&self) -> Option<Player> {
        match (self.piece_count(Player::Red), self.piece_count(Player::Blue)) {
            (0, blue) if blue > 0 => Some(Player::Blue),
            (red, 0) if red > 0 => Some(Player::Red),
            _ => None,
        }
    }

    /// A move generator over the live position.
    pub fn generator(&self) -> MoveGenerator<'_> {
        MoveGenerator::new(&self.graph, &self.occupancy)
    }

    /// Copies occupancy and turn into an independent snapshot.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of(&self.occupancy, self.current_player)
    }

    // ─────────────────────────────────────────────────────────────
    //  Mutation
    // ─────────────────────────────────────────────────────────────

    /// Handles a click on `node`.
    ///
    /// Clicking one of your own pieces selects it, replacing any earlier
    /// selection. With forced capture on and a capture available anywhere,
    /// only pieces that can capture are selectable, and they are offered
    /// their captures only. Clicking the destination of an offered move
    /// commits it. Anything else is ignored.
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn interact(&mut self, node: NodeId) -> Interaction {
        if self.occupancy.get(node) == Some(self.current_player) {
            return self.select(node);
        }

        let Some(selection) = &self.selection else {
            debug!("Click ignored: nothing selected");
            return Interaction::Ignored;
        };
        let from = selection.node;
        let Some(played) = selection.find(node) else {
            debug!(selected = %from, "Click ignored: not an offered destination");
            return Interaction::Ignored;
        };

        self.commit(from, played)
    }

    fn select(&mut self, node: NodeId) -> Interaction {
        let generator = self.generator();
        let moves = if self.forced_capture && generator.has_any_capture(self.current_player) {
            let captures = generator.capture_moves(node);
            if captures.is_empty() {
                debug!(%node, "Selection refused: a capture is mandatory elsewhere");
                return Interaction::Ignored;
            }
            captures
        } else {
            generator.legal_moves(node)
        };

        debug!(%node, moves = moves.len(), "Piece selected");
        self.selection = Some(Selection::new(node, moves.clone()));
        Interaction::Selected { node, moves }
    }

    fn commit(&mut self, from: NodeId, played: Move) -> Interaction {
        let before = self.snapshot();
        self.undo.push(before);

        let player = self.current_player;
        self.occupancy.place(played.to, player);
        self.occupancy.remove(from);
        if let Some(captured) = played.capture {
            self.occupancy.remove(captured);
        }

        if played.is_capture() {
            let next = self.generator().capture_moves(played.to);
            if !next.is_empty() {
                info!(%from, to = %played.to, further = next.len(), "Capture chain continues");
                self.selection = Some(Selection::new(played.to, next.clone()));
                self.debug_check_invariants();
                return Interaction::ChainContinues {
                    from,
                    played,
                    moves: next,
                };
            }
        }

        self.selection = None;
        self.current_player = player.opponent();
        info!(%from, to = %played.to, capture = played.is_capture(), next = %self.current_player, "Move committed");
        self.debug_check_invariants();
        Interaction::Moved {
            from,
            played,
            next_player: self.current_player,
        }
    }

    /// Starts a new game: fresh board, starting position, Red to move, no
    /// selection and no undo history. Forced-capture mode is kept.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.graph = BoardGraph::new();
        self.occupancy = starting_occupancy();
        self.current_player = Player::Red;
        self.selection = None;
        self.undo.clear();
        info!("Game reset");
    }

    /// Steps back one committed move leg. Returns false if there was nothing
    /// to undo.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.undo.pop() else {
            debug!("Nothing to undo");
            return false;
        };
        self.occupancy = previous.pieces().iter().copied().collect();
        self.current_player = previous.current_player();
        self.selection = None;
        info!(remaining = self.undo.len(), player = %self.current_player, "Undid move");
        true
    }

    /// Turns forced-capture mode on or off.
    #[instrument(skip(self))]
    pub fn set_forced_capture(&mut self, enabled: bool) {
        self.forced_capture = enabled;
    }

    /// Hands the turn to `player`, dropping any selection.
    #[instrument(skip(self))]
    pub fn set_current_player(&mut self, player: Player) {
        self.current_player = player;
        self.selection = None;
    }

    /// Replaces occupancy and turn with `snapshot` as a fresh baseline:
    /// selection and undo history are cleared.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] and leaves the game untouched if the
    /// snapshot does not fit the board.
    #[instrument(skip_all)]
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        let occupancy = snapshot.validate(&self.graph)?;
        self.occupancy = occupancy;
        self.current_player = snapshot.current_player();
        self.selection = None;
        self.undo.clear();
        debug!(pieces = self.occupancy.len(), player = %self.current_player, "State restored");
        Ok(())
    }

    /// Restores `snapshot`, or resets the game if it is malformed. Returns
    /// true if the snapshot was used.
    pub fn restore_or_reset(&mut self, snapshot: &Snapshot) -> bool {
        match self.restore(snapshot) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Falling back to a new game");
                self.reset();
                false
            }
        }
    }

    fn debug_check_invariants(&self) {
        debug_assert!(
            EngineInvariants::check_all(self).is_ok(),
            "Engine invariants violated: {:?}",
            EngineInvariants::check_all(self)
        );
    }
}

impl Default for TurnEngine {
    fn default() -> Self {
        Self::new()
    }
}
