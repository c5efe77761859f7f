//! Core domain types for Sholo Guti.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Player in the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    /// Red (moves first, starts on the top half).
    Red,
    /// Blue (starts on the bottom half).
    Blue,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::Red => Player::Blue,
            Player::Blue => Player::Red,
        }
    }
}

/// Identity of a board point: its integer coordinate.
///
/// Coordinates are not contiguous. The 5x5 grid spans `x, y ∈ [0, 4]` and the
/// two triangular extensions sit on rows `-2, -1` and `5, 6`.
///
/// The textual form `"x,y"` is used both for display and for serialization.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize,
)]
#[display("{x},{y}")]
#[serde(try_from = "String", into = "String")]
pub struct NodeId {
    x: i8,
    y: i8,
}

impl NodeId {
    /// Creates a node id from coordinates.
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate.
    pub const fn x(self) -> i8 {
        self.x
    }

    /// Vertical coordinate (grows downwards, towards Blue's side).
    pub const fn y(self) -> i8 {
        self.y
    }

    /// The point one further step along the line `from -> self`.
    ///
    /// This is where a piece jumping from `from` over `self` would land.
    /// Returns `None` if the coordinate leaves the `i8` range.
    pub fn reflect_from(self, from: NodeId) -> Option<NodeId> {
        let dx = self.x.checked_sub(from.x)?;
        let dy = self.y.checked_sub(from.y)?;
        Some(NodeId::new(self.x.checked_add(dx)?, self.y.checked_add(dy)?))
    }

    /// Mirrors the point across the grid's middle row (`y = 2`).
    pub const fn mirrored(self) -> Self {
        Self::new(self.x, 4 - self.y)
    }
}

impl From<(i8, i8)> for NodeId {
    fn from((x, y): (i8, i8)) -> Self {
        Self::new(x, y)
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.to_string()
    }
}

/// Failure to parse a `"x,y"` node id.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid node id {input:?}: expected \"x,y\"")]
pub struct NodeIdParseError {
    /// The rejected input.
    pub input: String,
}

impl FromStr for NodeId {
    type Err = NodeIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || NodeIdParseError {
            input: s.to_string(),
        };
        let (x, y) = s.trim().split_once(',').ok_or_else(err)?;
        let x = x.trim().parse::<i8>().map_err(|_| err())?;
        let y = y.trim().parse::<i8>().map_err(|_| err())?;
        Ok(NodeId::new(x, y))
    }
}

impl TryFrom<String> for NodeId {
    type Error = NodeIdParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A move from the selected node.
///
/// A move with no `capture` is a simple slide along an edge; otherwise it is a
/// jump that removes the opponent piece at `capture`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Destination node.
    pub to: NodeId,
    /// Node of the captured piece, for jumps.
    pub capture: Option<NodeId>,
}

impl Move {
    /// A simple slide to an adjacent empty node.
    pub fn slide(to: NodeId) -> Self {
        Self { to, capture: None }
    }

    /// A jump landing on `to` that captures the piece at `capture`.
    pub fn jump(to: NodeId, capture: NodeId) -> Self {
        Self {
            to,
            capture: Some(capture),
        }
    }

    /// True if this move captures a piece.
    pub fn is_capture(&self) -> bool {
        self.capture.is_some()
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.capture {
            Some(captured) => write!(f, "-> {} (captures {})", self.to, captured),
            None => write!(f, "-> {}", self.to),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_parse_and_display() {
        let id: NodeId = "2,-1".parse().unwrap();
        assert_eq!(id, NodeId::new(2, -1));
        assert_eq!(id.to_string(), "2,-1");
        assert_eq!(" 4 , 6 ".parse::<NodeId>().unwrap(), NodeId::new(4, 6));
    }

    #[test]
    fn test_node_id_parse_rejects_garbage() {
        assert!("".parse::<NodeId>().is_err());
        assert!("3".parse::<NodeId>().is_err());
        assert!("a,b".parse::<NodeId>().is_err());
        assert!("1,2,3".parse::<NodeId>().is_err());
        assert!("300,0".parse::<NodeId>().is_err());
    }

    #[test]
    fn test_reflect_continues_the_step() {
        let from = NodeId::new(0, 0);
        let mid = NodeId::new(1, 1);
        assert_eq!(mid.reflect_from(from), Some(NodeId::new(2, 2)));

        let from = NodeId::new(2, 0);
        let mid = NodeId::new(2, -1);
        assert_eq!(mid.reflect_from(from), Some(NodeId::new(2, -2)));
    }

    #[test]
    fn test_reflect_overflow_is_none() {
        let from = NodeId::new(0, 0);
        let mid = NodeId::new(100, 0);
        assert_eq!(mid.reflect_from(from), None);
    }

    #[test]
    fn test_mirror_swaps_halves() {
        assert_eq!(NodeId::new(0, -2).mirrored(), NodeId::new(0, 6));
        assert_eq!(NodeId::new(3, -1).mirrored(), NodeId::new(3, 5));
        assert_eq!(NodeId::new(1, 2).mirrored(), NodeId::new(1, 2));
    }

    #[test]
    fn test_player_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Player::Red).unwrap(), "\"red\"");
        assert_eq!(
            serde_json::from_str::<Player>("\"blue\"").unwrap(),
            Player::Blue
        );
        assert_eq!(Player::Red.opponent(), Player::Blue);
    }

    #[test]
    fn test_node_id_serializes_as_string() {
        let json = serde_json::to_string(&NodeId::new(3, 5)).unwrap();
        assert_eq!(json, "\"3,5\"");
        let back: NodeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, NodeId::new(3, 5));
        assert!(serde_json::from_str::<NodeId>("\"nope\"").is_err());
    }

    #[test]
    fn test_move_display() {
        let slide = Move::slide(NodeId::new(2, 2));
        assert_eq!(slide.to_string(), "-> 2,2");
        let jump = Move::jump(NodeId::new(2, 2), NodeId::new(1, 1));
        assert_eq!(jump.to_string(), "-> 2,2 (captures 1,1)");
        assert!(jump.is_capture());
        assert!(!slide.is_capture());
    }
}
