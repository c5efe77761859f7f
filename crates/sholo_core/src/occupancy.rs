//! Which player's piece stands on which node.

use crate::types::{NodeId, Player};
use std::collections::BTreeMap;

/// Partial map from node to the player whose piece stands there.
///
/// Iteration is ordered by node id, so snapshots built from it are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Occupancy {
    pieces: BTreeMap<NodeId, Player>,
}

impl Occupancy {
    /// Creates an empty occupancy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the player on `node`, if any.
    pub fn get(&self, node: NodeId) -> Option<Player> {
        self.pieces.get(&node).copied()
    }

    /// True if no piece stands on `node`.
    pub fn is_vacant(&self, node: NodeId) -> bool {
        !self.pieces.contains_key(&node)
    }

    /// Puts `player`'s piece on `node`, returning whatever stood there.
    pub fn place(&mut self, node: NodeId, player: Player) -> Option<Player> {
        self.pieces.insert(node, player)
    }

    /// Clears `node`, returning the piece that stood there.
    pub fn remove(&mut self, node: NodeId) -> Option<Player> {
        self.pieces.remove(&node)
    }

    /// All occupied nodes with their owners, in node order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Player)> + '_ {
        self.pieces.iter().map(|(node, player)| (*node, *player))
    }

    /// Nodes occupied by `player`, in node order.
    pub fn pieces_of(&self, player: Player) -> impl Iterator<Item = NodeId> + '_ {
        self.iter()
            .filter(move |(_, owner)| *owner == player)
            .map(|(node, _)| node)
    }

    /// Number of pieces `player` has on the board.
    pub fn count(&self, player: Player) -> usize {
        self.pieces_of(player).count()
    }

    /// Total number of pieces on the board.
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// True if the board has no pieces.
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

impl FromIterator<(NodeId, Player)> for Occupancy {
    fn from_iter<T: IntoIterator<Item = (NodeId, Player)>>(iter: T) -> Self {
        Self {
            pieces: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_and_remove() {
        let mut occupancy = Occupancy::new();
        let node = NodeId::new(2, 2);
        assert!(occupancy.is_vacant(node));

        assert_eq!(occupancy.place(node, Player::Red), None);
        assert_eq!(occupancy.get(node), Some(Player::Red));
        assert_eq!(occupancy.place(node, Player::Blue), Some(Player::Red));

        assert_eq!(occupancy.remove(node), Some(Player::Blue));
        assert!(occupancy.is_empty());
    }

    #[test]
    fn test_counts_per_player() {
        let occupancy: Occupancy = [
            (NodeId::new(0, 0), Player::Red),
            (NodeId::new(1, 0), Player::Red),
            (NodeId::new(0, 4), Player::Blue),
        ]
        .into_iter()
        .collect();

        assert_eq!(occupancy.count(Player::Red), 2);
        assert_eq!(occupancy.count(Player::Blue), 1);
        assert_eq!(occupancy.len(), 3);
        assert_eq!(
            occupancy.pieces_of(Player::Blue).collect::<Vec<_>>(),
            vec![NodeId::new(0, 4)]
        );
    }
}
