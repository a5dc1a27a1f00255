//! The immutable graph value and its construction/validation helpers.
//!
//! A `Graph` is produced once per level load — by `Graph::decode` for asset
//! bytes or by `GraphBuilder` for programmatic construction — and never
//! mutated afterwards. Engines derive their working tables from it, so a
//! single decoded graph can safely back any number of engine instances.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::edge::{Direction, Edge, EdgeId, MAX_EDGES};
use super::error::{GraphError, Result};
use super::vertex::{Vertex, VertexId, MAX_VERTICES};

/// An immutable puzzle graph: vertices ordered by id, edges in decode order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
}

impl Graph {
    pub(crate) fn from_parts(vertices: Vec<Vertex>, edges: Vec<Edge>) -> Self {
        Self { vertices, edges }
    }

    /// Start building a graph programmatically.
    #[must_use]
    pub fn builder() -> GraphBuilder {
        GraphBuilder::new()
    }

    // === Accessors ===

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All vertices, ordered by id.
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// All edges, in decode order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Look up a vertex by id.
    #[must_use]
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.index())
    }

    /// Look up an edge by id.
    #[must_use]
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index())
    }

    /// Whether `id` names a vertex of this graph.
    #[must_use]
    pub fn contains(&self, id: VertexId) -> bool {
        id.index() < self.vertices.len()
    }

    /// The declared start vertex, if any.
    ///
    /// Unvalidated data may flag several vertices; the last one wins.
    #[must_use]
    pub fn start(&self) -> Option<VertexId> {
        self.vertices.iter().filter(|v| v.is_start).next_back().map(|v| v.id)
    }

    /// The declared end vertex, if any. Last flagged vertex wins.
    #[must_use]
    pub fn end(&self) -> Option<VertexId> {
        self.vertices.iter().filter(|v| v.is_end).next_back().map(|v| v.id)
    }

    /// Total number of visits the puzzle requires across all vertices.
    #[must_use]
    pub fn required_visits_total(&self) -> u32 {
        self.vertices.iter().map(|v| u32::from(v.required_visits())).sum()
    }

    // === Validation ===

    /// Structural validation of decoded data.
    ///
    /// `decode` is purely positional; this is the strict pass for hosts that
    /// do not trust their asset pipeline. Checks format limits, edge
    /// endpoint range and ordering, and start/end flag uniqueness. A graph
    /// that fails this check may still be loadable, but an edge the checks
    /// reject is unreachable at best and panics the engine at worst.
    pub fn validate(&self) -> Result<()> {
        if self.vertices.len() > MAX_VERTICES {
            return Err(GraphError::VertexLimit { count: self.vertices.len() });
        }
        if self.edges.len() > MAX_EDGES {
            return Err(GraphError::EdgeLimit { count: self.edges.len() });
        }

        for edge in &self.edges {
            for endpoint in [edge.a, edge.b] {
                if !self.contains(endpoint) {
                    return Err(GraphError::EdgeOutOfRange { edge: edge.id, vertex: endpoint });
                }
            }
            if edge.a.0 >= edge.b.0 {
                return Err(GraphError::UnorderedEdge { edge: edge.id });
            }
        }

        let mut start = None;
        let mut end = None;
        for vertex in &self.vertices {
            if vertex.is_start && vertex.is_end {
                return Err(GraphError::StartEndOverlap { vertex: vertex.id });
            }
            if vertex.is_start {
                if let Some(first) = start {
                    return Err(GraphError::DuplicateStart { first, second: vertex.id });
                }
                start = Some(vertex.id);
            }
            if vertex.is_end {
                if let Some(first) = end {
                    return Err(GraphError::DuplicateEnd { first, second: vertex.id });
                }
                end = Some(vertex.id);
            }
        }

        Ok(())
    }

    /// Whether every vertex is reachable from every other, ignoring edge
    /// direction. Diagnostic helper for level tooling; the engine never
    /// consults it. Empty graphs count as connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        let n = self.vertices.len();
        if n <= 1 {
            return true;
        }

        let mut neighbors = vec![Vec::new(); n];
        for edge in &self.edges {
            if self.contains(edge.a) && self.contains(edge.b) {
                neighbors[edge.a.index()].push(edge.b.index());
                neighbors[edge.b.index()].push(edge.a.index());
            }
        }

        let mut visited = vec![false; n];
        let mut queue = VecDeque::new();
        visited[0] = true;
        queue.push_back(0);
        let mut reached = 1;

        while let Some(current) = queue.pop_front() {
            for &next in &neighbors[current] {
                if !visited[next] {
                    visited[next] = true;
                    reached += 1;
                    queue.push_back(next);
                }
            }
        }

        reached == n
    }
}

/// Programmatic graph construction.
///
/// Mirrors how levels are authored: add vertices, toggle their flags, then
/// connect them. `add_edge` normalizes endpoints so the stored record always
/// has `a < b`, flipping a directed edge's direction to compensate.
/// `build` runs `Graph::validate` so a builder cannot produce a graph the
/// strict checks would reject.
///
/// ## Example
///
/// ```
/// use hamiltrail::graph::{Direction, Graph};
///
/// let mut builder = Graph::builder();
/// let a = builder.add_vertex(0, 0, 0);
/// let b = builder.add_vertex(i32::MAX, i32::MAX, 2);
/// builder.mark_start(a);
/// builder.add_edge(a, b, Direction::Undirected);
///
/// let graph = builder.build().unwrap();
/// assert_eq!(graph.start(), Some(a));
/// assert_eq!(graph.required_visits_total(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct GraphBuilder {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
}

impl GraphBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a vertex with no flags set. Returns its id.
    pub fn add_vertex(&mut self, x: i32, y: i32, energy: i8) -> VertexId {
        let id = VertexId::new(self.vertices.len() as u8);
        self.vertices.push(Vertex {
            id,
            x,
            y,
            energy,
            is_start: false,
            is_end: false,
            double_visit: false,
        });
        id
    }

    /// Flag `vertex` as the start of the trail.
    ///
    /// Panics if the vertex has not been added.
    pub fn mark_start(&mut self, vertex: VertexId) {
        self.vertices[vertex.index()].is_start = true;
    }

    /// Flag `vertex` as the end of the trail.
    ///
    /// Panics if the vertex has not been added.
    pub fn mark_end(&mut self, vertex: VertexId) {
        self.vertices[vertex.index()].is_end = true;
    }

    /// Flag `vertex` as requiring two visits.
    ///
    /// Panics if the vertex has not been added.
    pub fn mark_double_visit(&mut self, vertex: VertexId) {
        self.vertices[vertex.index()].double_visit = true;
    }

    /// Append an edge between two vertices. Returns its id.
    ///
    /// Endpoints are stored in ascending order; if the call passes them the
    /// other way round, the direction flips along with them so the walkable
    /// orientation is preserved.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId, direction: Direction) -> EdgeId {
        let id = EdgeId::new(self.edges.len() as u8);
        let (a, b, direction) = if from.0 <= to.0 {
            (from, to, direction)
        } else {
            (to, from, direction.reversed())
        };
        self.edges.push(Edge { id, a, b, direction });
        id
    }

    /// Finish construction, running the strict structural checks.
    pub fn build(self) -> Result<Graph> {
        let graph = Graph::from_parts(self.vertices, self.edges);
        graph.validate()?;
        Ok(graph)
    }
}
