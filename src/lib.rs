//! # hamiltrail
//!
//! A Hamiltonian-trail puzzle engine: the player draws a path through a
//! small graph, visiting every vertex the required number of times (once or
//! twice), respecting directed edges, and keeping a running energy tally
//! non-negative. The puzzle is solved exactly when every required visit has
//! been made.
//!
//! ## Design Principles
//!
//! 1. **Core only**: no rendering, hit testing, navigation, or persistence.
//!    Hosts supply level bytes, forward move/undo/reset requests, and
//!    observe two callbacks (energy changed, solved).
//!
//! 2. **Immutable graph, mutable engine**: a level decodes once into a
//!    `Graph` that is never touched again; each `PathEngine` derives its own
//!    working tables from it. Engines hand out O(1) snapshots, never shared
//!    mutable storage.
//!
//! 3. **Illegal moves are not errors**: rejection is an expected, constant
//!    part of play. `attempt_move` returns a legality flag and leaves state
//!    untouched; only malformed level bytes produce a `GraphError`.
//!
//! ## Modules
//!
//! - `graph`: vertices, edges, the immutable `Graph`, the binary level
//!   codec, builder and validation helpers
//! - `engine`: `PathEngine` (path, visit budgets, energy, solved latch) and
//!   the `EngineListener` callback trait
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use hamiltrail::{Direction, Graph, PathEngine};
//!
//! let mut builder = Graph::builder();
//! let start = builder.add_vertex(0, 0, 0);
//! let mid = builder.add_vertex(0, 0, 2);
//! let end = builder.add_vertex(0, 0, 0);
//! builder.mark_start(start);
//! builder.mark_end(end);
//! builder.add_edge(start, mid, Direction::Undirected);
//! builder.add_edge(mid, end, Direction::Undirected);
//!
//! let mut engine = PathEngine::new(Arc::new(builder.build().unwrap()));
//! assert!(engine.attempt_move(mid));
//! assert!(engine.attempt_move(end));
//! assert!(engine.is_solved());
//! ```

pub mod engine;
pub mod graph;

// Re-export commonly used types
pub use crate::graph::{
    Direction, Edge, EdgeId, Graph, GraphBuilder, GraphError, Result, Vertex, VertexId, VertexMap,
};

pub use crate::engine::{EngineListener, PathEngine};
