//! Graph model and binary level codec.
//!
//! Everything here is immutable after load: `Graph::decode` (or
//! `GraphBuilder`) produces a `Graph` once per level, and the path engine
//! derives its mutable working tables from it.

pub mod edge;
pub mod error;
pub mod model;
pub mod vertex;

mod codec;

pub use edge::{endpoint_key, Direction, Edge, EdgeId, MAX_EDGES};
pub use error::{GraphError, Result};
pub use model::{Graph, GraphBuilder};
pub use vertex::{Vertex, VertexId, VertexMap, MAX_VERTICES};
