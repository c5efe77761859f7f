//! Errors raised at the engine's API boundary.

use crate::types::NodeId;
use derive_more::{Display, Error};

/// Why a snapshot could not be restored.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum SnapshotErrorKind {
    /// The snapshot places a piece on a point that is not on the board.
    #[display("node {} is not on the board", _0)]
    UnknownNode(NodeId),
    /// The snapshot lists the same node twice.
    #[display("node {} appears more than once", _0)]
    DuplicateNode(NodeId),
    /// One side has more pieces than the game starts with.
    #[display("{} pieces for one side exceeds the limit", _0)]
    TooManyPieces(usize),
    /// The serialized form is missing fields or is not valid JSON.
    #[display("unparsable snapshot: {}", _0)]
    Parse(String),
}

/// A snapshot that is structurally invalid for this board.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Malformed state: {}", kind)]
pub struct SnapshotError {
    /// What was wrong.
    #[error(not(source))]
    pub kind: SnapshotErrorKind,
}

impl SnapshotError {
    /// Creates a new snapshot error.
    pub fn new(kind: SnapshotErrorKind) -> Self {
        Self { kind }
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(SnapshotErrorKind::Parse(err.to_string()))
    }
}
