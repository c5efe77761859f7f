//! Legal move and capture generation.

use crate::graph::BoardGraph;
use crate::occupancy::Occupancy;
use crate::types::{Move, NodeId, Player};
use tracing::{instrument, trace};

/// Computes legal moves against a board graph and an occupancy.
///
/// Borrowed views only; build a fresh generator after the occupancy changes.
#[derive(Debug, Clone, Copy)]
pub struct MoveGenerator<'a> {
    graph: &'a BoardGraph,
    occupancy: &'a Occupancy,
}

impl<'a> MoveGenerator<'a> {
    /// Creates a generator over `graph` and `occupancy`.
    pub fn new(graph: &'a BoardGraph, occupancy: &'a Occupancy) -> Self {
        Self { graph, occupancy }
    }

    /// Every slide and jump available to the piece on `from`.
    ///
    /// Empty if `from` is vacant. A jump over neighbour `mid` lands on the
    /// point one step further along the same line, and requires that point
    /// to be a vacant node joined to `mid` by an edge. Coordinates lining up
    /// is not enough.
    #[instrument(skip(self))]
    pub fn legal_moves(&self, from: NodeId) -> Vec<Move> {
        let Some(owner) = self.occupancy.get(from) else {
            return Vec::new();
        };

        let mut moves = Vec::new();
        for mid in self.graph.neighbors(from) {
            match self.occupancy.get(mid) {
                None => moves.push(Move::slide(mid)),
                Some(other) if other != owner => {
                    if let Some(landing) = self.landing(from, mid) {
                        moves.push(Move::jump(landing, mid));
                    }
                }
                Some(_) => {}
            }
        }

        trace!(count = moves.len(), "Generated moves");
        moves
    }

    fn landing(&self, from: NodeId, mid: NodeId) -> Option<NodeId> {
        let landing = mid.reflect_from(from)?;
        let open = self.graph.contains(landing)
            && self.occupancy.is_vacant(landing)
            && self.graph.has_edge(mid, landing);
        open.then_some(landing)
    }

    /// The jumps among [`Self::legal_moves`].
    pub fn capture_moves(&self, from: NodeId) -> Vec<Move> {
        self.legal_moves(from)
            .into_iter()
            .filter(Move::is_capture)
            .collect()
    }

    /// True if any of `player`'s pieces has a jump available.
    #[instrument(skip(self))]
    pub fn has_any_capture(&self, player: Player) -> bool {
        self.occupancy
            .pieces_of(player)
            .any(|node| !self.capture_moves(node).is_empty())
    }

    /// `player`'s pieces that can jump right now, in node order.
    pub fn capturing_pieces(&self, player: Player) -> Vec<NodeId> {
        self.occupancy
            .pieces_of(player)
            .filter(|node| !self.capture_moves(*node).is_empty())
            .collect()
    }

    /// True if `player` has no move at all.
    pub fn is_blocked(&self, player: Player) -> bool {
        self.occupancy
            .pieces_of(player)
            .all(|node| self.legal_moves(node).is_empty())
    }
}
