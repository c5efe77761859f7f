//! The board graph: a 5x5 grid with a triangular extension on each end.
//!
//! The top half is described once and mirrored across row `y = 2` to obtain
//! the bottom half. Construction is deterministic, so two graphs built with
//! [`BoardGraph::new`] are always equal.

use crate::types::NodeId;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, instrument};

type Pair = ((i8, i8), (i8, i8));

/// Nodes of the top triangular extension: rows `-2` and `-1`.
const TOP_EXTENSION: [(i8, i8); 6] = [(0, -2), (2, -2), (4, -2), (1, -1), (2, -1), (3, -1)];

/// Nodes of the bottom triangular extension: rows `5` and `6`.
const BOTTOM_EXTENSION: [(i8, i8); 6] = [(1, 5), (2, 5), (3, 5), (0, 6), (2, 6), (4, 6)];

/// Diagonal chains running from the grid's side columns out to the top
/// extension's far corners.
const SOFT_DIAGONALS: [[(i8, i8); 5]; 2] = [
    [(0, 2), (1, 1), (2, 0), (3, -1), (4, -2)],
    [(4, 2), (3, 1), (2, 0), (1, -1), (0, -2)],
];

/// Direct corner-to-corner links from the middle row to the top corners.
const LONG_DIAGONALS: [Pair; 2] = [((4, 2), (0, -2)), ((0, 2), (4, -2))];

/// Lattice inside the top extension.
const EXTENSION_EDGES: [Pair; 9] = [
    ((0, -2), (2, -2)),
    ((2, -2), (4, -2)),
    ((1, -1), (2, -1)),
    ((2, -1), (3, -1)),
    ((0, -2), (1, -1)),
    ((2, -2), (1, -1)),
    ((2, -2), (2, -1)),
    ((2, -2), (3, -1)),
    ((4, -2), (3, -1)),
];

/// Edges removed once everything else is in place: the corner diagonals and
/// the two outer verticals between the extension and row 0.
const CUT_EDGES: [Pair; 6] = [
    ((0, 0), (1, -1)),
    ((1, -1), (2, -2)),
    ((4, 0), (3, -1)),
    ((3, -1), (2, -2)),
    ((1, -1), (1, 0)),
    ((3, -1), (3, 0)),
];

/// Node pairs the board drawing leaves out.
///
/// Only rendering consults this table. Most entries are not edges at all,
/// and the ones that are still count for movement and capture.
pub const RENDER_SUPPRESSED: [Pair; 16] = [
    ((0, 0), (1, -1)),
    ((1, -1), (2, -2)),
    ((4, 0), (3, -1)),
    ((3, -1), (2, -2)),
    ((1, 0), (2, -1)),
    ((2, -1), (4, -2)),
    ((3, 0), (2, -1)),
    ((2, -1), (0, -2)),
    ((0, 4), (1, 5)),
    ((1, 5), (2, 6)),
    ((4, 4), (3, 5)),
    ((3, 5), (2, 6)),
    ((1, 4), (2, 5)),
    ((2, 5), (3, 6)),
    ((3, 4), (2, 5)),
    ((2, 5), (1, 6)),
];

/// Immutable node and adjacency set of the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardGraph {
    nodes: Vec<NodeId>,
    adjacency: BTreeMap<NodeId, BTreeSet<NodeId>>,
}

impl BoardGraph {
    /// Builds the canonical Sholo Guti board.
    #[instrument]
    pub fn new() -> Self {
        let mut graph = Self {
            nodes: Vec::with_capacity(37),
            adjacency: BTreeMap::new(),
        };

        for y in 0..=4 {
            for x in 0..=4 {
                graph.add_node(NodeId::new(x, y));
            }
        }
        for coord in TOP_EXTENSION.into_iter().chain(BOTTOM_EXTENSION) {
            graph.add_node(coord.into());
        }

        graph.add_grid_edges();

        for mirror in [false, true] {
            graph.add_extension_half(mirror);
        }
        for mirror in [false, true] {
            for (a, b) in CUT_EDGES {
                graph.remove_edge(oriented(a, mirror), oriented(b, mirror));
            }
        }

        debug!(
            nodes = graph.nodes.len(),
            edges = graph.edge_count(),
            "Board graph built"
        );
        graph
    }

    fn add_node(&mut self, id: NodeId) {
        if self.adjacency.insert(id, BTreeSet::new()).is_none() {
            self.nodes.push(id);
        }
    }

    fn add_edge(&mut self, a: NodeId, b: NodeId) {
        if !self.contains(a) || !self.contains(b) || a == b {
            return;
        }
        self.adjacency.entry(a).or_default().insert(b);
        self.adjacency.entry(b).or_default().insert(a);
    }

    fn remove_edge(&mut self, a: NodeId, b: NodeId) {
        if let Some(set) = self.adjacency.get_mut(&a) {
            set.remove(&b);
        }
        if let Some(set) = self.adjacency.get_mut(&b) {
            set.remove(&a);
        }
    }

    /// Orthogonal neighbours plus the two full diagonals of the grid.
    fn add_grid_edges(&mut self) {
        for y in 0..=4 {
            for x in 0..=4 {
                let here = NodeId::new(x, y);
                if x < 4 {
                    self.add_edge(here, NodeId::new(x + 1, y));
                }
                if y < 4 {
                    self.add_edge(here, NodeId::new(x, y + 1));
                }
            }
        }
        for i in 0..4 {
            self.add_edge(NodeId::new(i, i), NodeId::new(i + 1, i + 1));
            self.add_edge(NodeId::new(4 - i, i), NodeId::new(3 - i, i + 1));
        }
    }

    /// Soft diagonals, long diagonals, the extension lattice and its links to
    /// the nearest grid row, for the top half or its mirror.
    fn add_extension_half(&mut self, mirror: bool) {
        for chain in SOFT_DIAGONALS {
            for pair in chain.windows(2) {
                self.add_edge(oriented(pair[0], mirror), oriented(pair[1], mirror));
            }
        }
        for (a, b) in LONG_DIAGONALS.into_iter().chain(EXTENSION_EDGES) {
            self.add_edge(oriented(a, mirror), oriented(b, mirror));
        }
        for x in 1..=3 {
            let inner = oriented((x, -1), mirror);
            for dx in [0, -1, 1] {
                self.add_edge(inner, oriented((x + dx, 0), mirror));
            }
        }
    }

    /// All nodes in construction order: grid row by row, then the top and
    /// bottom extensions.
    pub fn all_nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// The node at `(x, y)`, if the board has one there.
    pub fn node_at(&self, x: i8, y: i8) -> Option<NodeId> {
        let id = NodeId::new(x, y);
        self.contains(id).then_some(id)
    }

    /// True if `id` is a board node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.adjacency.contains_key(&id)
    }

    /// Nodes adjacent to `id`; empty for unknown nodes.
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency.get(&id).into_iter().flatten().copied()
    }

    /// True if `a` and `b` are joined by an edge.
    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.adjacency.get(&a).is_some_and(|set| set.contains(&b))
    }

    /// Every edge once, as `(smaller, larger)` pairs in order.
    pub fn edges(&self) -> Vec<(NodeId, NodeId)> {
        self.adjacency
            .iter()
            .flat_map(|(a, set)| set.iter().filter(move |b| a < *b).map(move |b| (*a, *b)))
            .collect()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// Edges a board drawing should stroke: [`Self::edges`] minus the
    /// render-suppressed pairs.
    pub fn drawable_edges(&self) -> Vec<(NodeId, NodeId)> {
        self.edges()
            .into_iter()
            .filter(|(a, b)| !is_render_suppressed(*a, *b))
            .collect()
    }
}

impl Default for BoardGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// True if the drawing of the board omits a line between `a` and `b`.
pub fn is_render_suppressed(a: NodeId, b: NodeId) -> bool {
    RENDER_SUPPRESSED.iter().any(|&(p, q)| {
        let (p, q) = (NodeId::from(p), NodeId::from(q));
        (p == a && q == b) || (p == b && q == a)
    })
}

fn oriented(coord: (i8, i8), mirror: bool) -> NodeId {
    let id = NodeId::from(coord);
    if mirror { id.mirrored() } else { id }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(x: i8, y: i8) -> NodeId {
        NodeId::new(x, y)
    }

    #[test]
    fn test_node_and_edge_counts() {
        let graph = BoardGraph::new();
        assert_eq!(graph.all_nodes().len(), 37);
        assert_eq!(graph.edge_count(), 84);
        assert_eq!(graph.edges().len(), 84);
    }

    #[test]
    fn test_grid_and_diagonals_present() {
        let graph = BoardGraph::new();
        assert!(graph.has_edge(n(2, 1), n(2, 2)));
        assert!(graph.has_edge(n(0, 0), n(1, 1)));
        assert!(graph.has_edge(n(1, 1), n(2, 2)));
        assert!(graph.has_edge(n(1, 3), n(0, 4)));
        // Diagonals off the two main lines are not part of the grid.
        assert!(!graph.has_edge(n(1, 0), n(0, 1)));
    }

    #[test]
    fn test_corner_cuts_removed_on_both_halves() {
        let graph = BoardGraph::new();
        for (a, b) in CUT_EDGES {
            let (a, b) = (NodeId::from(a), NodeId::from(b));
            assert!(!graph.has_edge(a, b), "{a} - {b} should be cut");
            assert!(!graph.has_edge(a.mirrored(), b.mirrored()));
        }
    }

    #[test]
    fn test_extension_links() {
        let graph = BoardGraph::new();
        assert!(graph.has_edge(n(2, -1), n(2, 0)));
        assert!(graph.has_edge(n(1, -1), n(2, 0)));
        assert!(graph.has_edge(n(2, -2), n(2, -1)));
        assert!(graph.has_edge(n(4, 2), n(0, -2)));
        assert!(graph.has_edge(n(4, 2), n(0, 6)));
        assert!(graph.has_edge(n(2, 5), n(2, 4)));
        assert!(graph.has_edge(n(3, 5), n(4, 6)));
    }

    #[test]
    fn test_node_at() {
        let graph = BoardGraph::new();
        assert_eq!(graph.node_at(2, -2), Some(n(2, -2)));
        assert_eq!(graph.node_at(1, -2), None);
        assert_eq!(graph.node_at(5, 0), None);
    }

    #[test]
    fn test_suppressed_edges_still_adjacent() {
        let graph = BoardGraph::new();
        assert!(is_render_suppressed(n(2, -1), n(1, 0)));
        assert!(graph.has_edge(n(1, 0), n(2, -1)));
        assert!(!graph.drawable_edges().contains(&(n(1, 0), n(2, -1))));
        assert_eq!(graph.drawable_edges().len(), 80);
    }
}
