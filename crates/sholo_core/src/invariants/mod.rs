//! First-class invariants for the turn engine.
//!
//! Invariants are logical properties that must hold after every transition.
//! The engine asserts them in debug builds and they can be tested on their own.

mod occupancy_on_board;
mod piece_budget;
mod selection_owned;

pub use occupancy_on_board::OccupancyOnBoard;
pub use piece_budget::PieceBudget;
pub use selection_owned::SelectionOwned;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = match <(I1, I2) as InvariantSet<S>>::check_all(state) {
            Ok(()) => Vec::new(),
            Err(violations) => violations,
        };

        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Every engine invariant as a composable set.
pub type EngineInvariants = (OccupancyOnBoard, SelectionOwned, PieceBudget);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NodeId, Player, Snapshot, TurnEngine};

    #[test]
    fn test_invariant_set_holds_for_new_game() {
        let engine = TurnEngine::new();
        assert!(EngineInvariants::check_all(&engine).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves() {
        let mut engine = TurnEngine::new();
        engine.interact(NodeId::new(2, 1));
        engine.interact(NodeId::new(2, 2));
        engine.interact(NodeId::new(2, 3));
        assert!(EngineInvariants::check_all(&engine).is_ok());
    }

    #[test]
    fn test_two_invariants_as_set() {
        let engine = TurnEngine::new();
        type TwoInvariants = (OccupancyOnBoard, PieceBudget);
        assert!(TwoInvariants::check_all(&engine).is_ok());
    }

    #[test]
    fn test_violations_are_collected() {
        let mut engine = TurnEngine::new();
        engine.interact(NodeId::new(2, 1));
        // Hand the turn to Blue while Red's piece is still selected.
        engine.current_player = Player::Blue;
        let violations = EngineInvariants::check_all(&engine).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].description, SelectionOwned::description());

        let restored = TurnEngine::from_snapshot(&Snapshot::new(vec![], Player::Red)).unwrap();
        assert!(EngineInvariants::check_all(&restored).is_ok());
    }
}
