//! Error types for graph decoding and validation.

use thiserror::Error;

use super::edge::EdgeId;
use super::vertex::VertexId;

/// Result type alias for graph loading and validation.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Failures while decoding or validating a level graph.
///
/// `Truncated` and `InvalidDirection` come from `Graph::decode` and mean the
/// byte stream itself is malformed. The remaining variants come from
/// `Graph::validate` (run automatically by `GraphBuilder::build`), which
/// checks structure the positional decoder deliberately does not.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
    #[error("level data truncated at offset {offset}: {needed} more byte(s) declared than present")]
    Truncated { offset: usize, needed: usize },

    #[error("{edge} has unknown direction code {code}")]
    InvalidDirection { edge: EdgeId, code: u8 },

    #[error("{count} vertices exceed the format limit of 127")]
    VertexLimit { count: usize },

    #[error("{count} edges exceed the format limit of 127")]
    EdgeLimit { count: usize },

    #[error("{edge} endpoint {vertex} is out of range")]
    EdgeOutOfRange { edge: EdgeId, vertex: VertexId },

    #[error("{edge} endpoints are not stored in ascending order")]
    UnorderedEdge { edge: EdgeId },

    #[error("more than one start vertex ({first} and {second})")]
    DuplicateStart { first: VertexId, second: VertexId },

    #[error("more than one end vertex ({first} and {second})")]
    DuplicateEnd { first: VertexId, second: VertexId },

    #[error("{vertex} is flagged as both start and end")]
    StartEndOverlap { vertex: VertexId },
}
