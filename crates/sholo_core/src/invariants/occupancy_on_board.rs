//! Occupancy invariant: pieces only stand on board nodes.

use super::Invariant;
use crate::TurnEngine;

/// Invariant: every occupied node exists in the board graph.
pub struct OccupancyOnBoard;

impl Invariant<TurnEngine> for OccupancyOnBoard {
    fn holds(engine: &TurnEngine) -> bool {
        engine
            .occupancy()
            .iter()
            .all(|(node, _)| engine.graph().contains(node))
    }

    fn description() -> &'static str {
        "Every piece stands on a board node"
    }
}
