//! Edge records and traversal direction.
//!
//! Edges are stored in decode order; that order is also the index space for
//! the engine's per-edge use counters. A well-formed record keeps its
//! endpoints in ascending order (`a < b`) — the decoder trusts this rather
//! than enforcing it, and `Graph::validate` checks it.

use serde::{Deserialize, Serialize};

use super::vertex::VertexId;

/// The most edges a level may declare. Same one-byte limit as vertices.
pub const MAX_EDGES: usize = 127;

/// Edge identifier. Edge indices are 0-based, in decode order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub u8);

impl EdgeId {
    /// Create a new edge ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw edge index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "edge {}", self.0)
    }
}

/// Which way an edge may be walked.
///
/// Wire codes: 0 = `Undirected`, 1 = `AToB`, 2 = `BToA`. Any other code is
/// rejected by the decoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Traversable both ways.
    Undirected,
    /// Only from endpoint `a` to endpoint `b`.
    AToB,
    /// Only from endpoint `b` to endpoint `a`.
    BToA,
}

impl Direction {
    /// Parse a wire code. Returns `None` for unknown codes.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Direction::Undirected),
            1 => Some(Direction::AToB),
            2 => Some(Direction::BToA),
            _ => None,
        }
    }

    /// The wire code for this direction.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Direction::Undirected => 0,
            Direction::AToB => 1,
            Direction::BToA => 2,
        }
    }

    /// The direction with its endpoints swapped.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Direction::Undirected => Direction::Undirected,
            Direction::AToB => Direction::BToA,
            Direction::BToA => Direction::AToB,
        }
    }
}

/// An edge between two vertices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Dense id, assigned in decode order.
    pub id: EdgeId,

    /// First endpoint. Trusted to be the smaller index.
    pub a: VertexId,

    /// Second endpoint. Trusted to be the larger index.
    pub b: VertexId,

    /// Which way the edge may be walked.
    pub direction: Direction,
}

impl Edge {
    /// Whether the edge can be walked from `a` towards `b`.
    #[must_use]
    pub const fn traversable_a_to_b(&self) -> bool {
        !matches!(self.direction, Direction::BToA)
    }

    /// Whether the edge can be walked from `b` towards `a`.
    #[must_use]
    pub const fn traversable_b_to_a(&self) -> bool {
        !matches!(self.direction, Direction::AToB)
    }
}

/// Normalize an unordered endpoint pair to the `(min, max)` key used when
/// looking up the edge record between two adjacent path entries.
#[must_use]
pub fn endpoint_key(x: VertexId, y: VertexId) -> (VertexId, VertexId) {
    if x.0 <= y.0 {
        (x, y)
    } else {
        (y, x)
    }
}
