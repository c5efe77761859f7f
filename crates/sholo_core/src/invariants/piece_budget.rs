//! Piece budget invariant: captures only ever remove pieces.

use super::Invariant;
use crate::layout::PIECES_PER_SIDE;
use crate::{Player, TurnEngine};

/// Invariant: neither side has more than sixteen pieces.
pub struct PieceBudget;

impl Invariant<TurnEngine> for PieceBudget {
    fn holds(engine: &TurnEngine) -> bool {
        engine.piece_count(Player::Red) <= PIECES_PER_SIDE
            && engine.piece_count(Player::Blue) <= PIECES_PER_SIDE
    }

    fn description() -> &'static str {
        "Each side has at most sixteen pieces"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NodeId;

    #[test]
    fn test_full_board_holds() {
        assert!(PieceBudget::holds(&TurnEngine::new()));
    }

    #[test]
    fn test_seventeenth_piece_violates() {
        let mut engine = TurnEngine::new();
        engine.occupancy.place(NodeId::new(2, 2), Player::Red);
        assert!(!PieceBudget::holds(&engine));
    }
}
