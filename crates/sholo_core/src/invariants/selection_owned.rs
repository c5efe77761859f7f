//! Selection invariant: only the player to move has a selected piece.

use super::Invariant;
use crate::TurnEngine;

/// Invariant: a selected node holds a piece of the current player.
pub struct SelectionOwned;

impl Invariant<TurnEngine> for SelectionOwned {
    fn holds(engine: &TurnEngine) -> bool {
        match engine.selection() {
            None => true,
            Some(selection) => {
                engine.occupancy().get(selection.node()) == Some(engine.current_player())
            }
        }
    }

    fn description() -> &'static str {
        "The selected piece belongs to the player to move"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NodeId;

    #[test]
    fn test_idle_holds() {
        assert!(SelectionOwned::holds(&TurnEngine::new()));
    }

    #[test]
    fn test_selected_own_piece_holds() {
        let mut engine = TurnEngine::new();
        engine.interact(NodeId::new(2, 1));
        assert!(engine.selection().is_some());
        assert!(SelectionOwned::holds(&engine));
    }

    #[test]
    fn test_selected_piece_removed_violates() {
        let mut engine = TurnEngine::new();
        engine.interact(NodeId::new(2, 1));
        engine.occupancy.remove(NodeId::new(2, 1));
        assert!(!SelectionOwned::holds(&engine));
    }
}
