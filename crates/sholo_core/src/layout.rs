//! Canonical starting position.

use crate::occupancy::Occupancy;
use crate::types::{NodeId, Player};

/// Number of pieces each side starts with.
pub const PIECES_PER_SIDE: usize = 16;

/// Red's starting nodes: the whole top extension plus grid rows 0 and 1.
/// Blue starts on the mirror image of these.
const RED_START: [(i8, i8); PIECES_PER_SIDE] = [
    (0, -2),
    (2, -2),
    (4, -2),
    (1, -1),
    (2, -1),
    (3, -1),
    (0, 0),
    (1, 0),
    (2, 0),
    (3, 0),
    (4, 0),
    (0, 1),
    (1, 1),
    (2, 1),
    (3, 1),
    (4, 1),
];

/// Occupancy at the start of a game. Row `y = 2` is empty.
pub fn starting_occupancy() -> Occupancy {
    RED_START
        .into_iter()
        .map(NodeId::from)
        .flat_map(|red| [(red, Player::Red), (red.mirrored(), Player::Blue)])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sixteen_each_middle_row_empty() {
        let occupancy = starting_occupancy();
        assert_eq!(occupancy.count(Player::Red), PIECES_PER_SIDE);
        assert_eq!(occupancy.count(Player::Blue), PIECES_PER_SIDE);
        for x in 0..=4 {
            assert!(occupancy.is_vacant(NodeId::new(x, 2)));
        }
    }

    #[test]
    fn test_blue_mirrors_red() {
        let occupancy = starting_occupancy();
        assert_eq!(occupancy.get(NodeId::new(0, -2)), Some(Player::Red));
        assert_eq!(occupancy.get(NodeId::new(0, 6)), Some(Player::Blue));
        assert_eq!(occupancy.get(NodeId::new(2, 1)), Some(Player::Red));
        assert_eq!(occupancy.get(NodeId::new(2, 3)), Some(Player::Blue));
    }
}
