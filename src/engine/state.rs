//! Path-construction state machine.
//!
//! ## PathEngine
//!
//! Owns all mutable puzzle state for one loaded level:
//! - the current path (a tail-only stack, full history kept for rendering)
//! - remaining visit budgets per vertex
//! - the remaining-move counter (0 means solved)
//! - the running energy total
//! - per-edge use counters (drive highlighting, not legality)
//!
//! `attempt_move` is the sole legality-checked entry point; `undo` and
//! `reset` are its exact inverses. All three are synchronous and
//! non-blocking, and the host is expected to serialize calls — the engine
//! has no internal locking because its algorithm has no parallelism.
//!
//! ## Invariants
//!
//! After every completed mutation:
//! - `remaining_moves == Σ remaining_visits`
//! - `energy >= 0`
//! - a declared start vertex is always present at the bottom of the path

use std::sync::Arc;

use im::Vector;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::graph::{endpoint_key, EdgeId, Graph, Result, VertexId, VertexMap};

use super::listener::EngineListener;

/// Outgoing adjacency per vertex, with directed edges already resolved.
type Adjacency = VertexMap<SmallVec<[VertexId; 4]>>;

/// The move/undo/reset protocol over one immutable graph.
///
/// A `PathEngine` is created per level load and discarded on the next load;
/// it has no persistence of its own. The graph is shared read-only, so any
/// number of engines can run over the same decoded level.
pub struct PathEngine {
    graph: Arc<Graph>,

    // === Derived once from the graph ===
    access: Adjacency,
    edge_index: FxHashMap<(VertexId, VertexId), EdgeId>,
    energy_delta: VertexMap<i32>,
    start: Option<VertexId>,
    end: Option<VertexId>,

    // === Mutable puzzle state ===
    path: Vector<VertexId>,
    remaining_visits: VertexMap<u8>,
    edge_use: Vec<u32>,
    remaining_moves: u32,
    energy: i32,
    solved: bool,

    listener: Option<Box<dyn EngineListener>>,
}

impl PathEngine {
    /// Build an engine over a decoded graph.
    ///
    /// Derives the working tables, then — if the graph declares a start
    /// vertex — commits it immediately, bypassing legality checks. This is
    /// the only move that may happen on an empty path in a start-carrying
    /// graph; afterwards the path is never empty except transiently inside
    /// `reset`. No callbacks fire here: the listener is attached afterwards.
    #[must_use]
    pub fn new(graph: Arc<Graph>) -> Self {
        let n = graph.vertex_count();

        let mut access: Adjacency = VertexMap::with_default(n);
        let mut edge_index = FxHashMap::default();
        for edge in graph.edges() {
            if edge.traversable_b_to_a() {
                access[edge.b].push(edge.a);
            }
            if edge.traversable_a_to_b() {
                access[edge.a].push(edge.b);
            }
            // First record between a pair wins; later duplicates are
            // unreachable by the normalized lookup.
            edge_index.entry((edge.a, edge.b)).or_insert(edge.id);
        }

        let vertices = graph.vertices();
        let energy_delta = VertexMap::new(n, |v| i32::from(vertices[v.index()].energy));
        let remaining_visits = VertexMap::new(n, |v| vertices[v.index()].required_visits());
        let remaining_moves = graph.required_visits_total();

        let mut engine = Self {
            edge_use: vec![0; graph.edge_count()],
            start: graph.start(),
            end: graph.end(),
            access,
            edge_index,
            energy_delta,
            path: Vector::new(),
            remaining_visits,
            remaining_moves,
            energy: 0,
            solved: remaining_moves == 0,
            listener: None,
            graph,
        };

        if let Some(start) = engine.start {
            engine.commit(start);
        }
        engine
    }

    /// Decode a level and build an engine over it in one step.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self::new(Arc::new(Graph::decode(bytes)?)))
    }

    // === Host protocol ===

    /// Attach the host's listener, replacing any previous one.
    pub fn set_listener(&mut self, listener: Box<dyn EngineListener>) {
        self.listener = Some(listener);
    }

    /// Detach the listener.
    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    /// Try to extend the path to `target`.
    ///
    /// Returns whether the move was committed. An illegal move is not an
    /// error: nothing changes, no callback fires, and the host may react to
    /// the `false` (a rejection sound, say). Always `false` once solved or
    /// for a target outside the graph.
    pub fn attempt_move(&mut self, target: VertexId) -> bool {
        if self.solved || !self.graph.contains(target) {
            return false;
        }

        let legal = match self.path.last() {
            None => self.legal_as_first(target),
            Some(&last) => self.legal_from(last, target),
        };
        if !legal {
            tracing::trace!("rejected move to {}", target);
            return false;
        }

        let energy_before = self.energy;
        self.commit(target);
        self.emit_energy_if_changed(energy_before);
        if self.solved {
            if let Some(listener) = self.listener.as_mut() {
                listener.on_solved();
            }
        }
        true
    }

    /// Remove the most recent path entry.
    ///
    /// Returns whether anything was undone. A no-op when solved (the engine
    /// is terminal until `reset`) and when the path is at its minimum
    /// length: one entry with a pinned declared start, zero without.
    pub fn undo(&mut self) -> bool {
        if self.solved {
            return false;
        }
        let pinned = usize::from(self.start.is_some());
        if self.path.len() <= pinned {
            return false;
        }

        let energy_before = self.energy;
        self.revert_last();
        self.emit_energy_if_changed(energy_before);
        true
    }

    /// Unwind the whole path and re-seed the declared start, if any.
    ///
    /// Clears the solved latch. Fires at most one `on_energy_changed`, for
    /// the net change.
    pub fn reset(&mut self) {
        let energy_before = self.energy;
        self.solved = false;
        while !self.path.is_empty() {
            self.revert_last();
        }
        if let Some(start) = self.start {
            self.commit(start);
        }
        self.emit_energy_if_changed(energy_before);
        tracing::debug!("path reset, {} move(s) required", self.remaining_moves);
    }

    // === Legality ===

    /// First move of a start-less graph. The end vertex is blocked unless it
    /// is truly the final required move or itself still needs more than one
    /// visit; the energy floor applies from the very first vertex.
    fn legal_as_first(&self, target: VertexId) -> bool {
        self.energy_delta[target] >= 0
            && (self.remaining_moves == 1
                || self.remaining_visits[target] > 1
                || Some(target) != self.end)
    }

    /// Chained move from the current tail. Note the end-vertex rule here has
    /// no double-visit escape clause; the asymmetry with `legal_as_first`
    /// is intentional and load-bearing for shipped levels.
    fn legal_from(&self, last: VertexId, target: VertexId) -> bool {
        self.access[last].contains(&target)
            && self.remaining_visits[target] > 0
            && (self.remaining_moves == 1 || Some(target) != self.end)
            && self.energy + self.energy_delta[target] >= 0
    }

    /// Whether a single step from `from` to `to` is permitted by the edge
    /// set and directions, ignoring all other legality rules.
    #[must_use]
    pub fn can_traverse(&self, from: VertexId, to: VertexId) -> bool {
        self.graph.contains(from) && self.graph.contains(to) && self.access[from].contains(&to)
    }

    // === Mutation primitives ===

    /// Append `target` to the path and update every table.
    ///
    /// Legality must already have been established (or deliberately waived,
    /// for the start auto-placement). Panics if the path is non-empty and
    /// the graph holds no edge record for the step — `can_traverse` said
    /// yes, so the level data itself is broken in a way `decode` does not
    /// catch, and recovery would hide corrupted state.
    fn commit(&mut self, target: VertexId) {
        if let Some(&last) = self.path.last() {
            let edge = self
                .edge_index
                .get(&endpoint_key(last, target))
                .copied()
                .unwrap_or_else(|| {
                    panic!("graph has no edge record between {last} and {target}")
                });
            self.edge_use[edge.index()] += 1;
        }
        self.path.push_back(target);
        self.remaining_visits[target] -= 1;
        self.remaining_moves -= 1;
        self.energy += self.energy_delta[target];
        tracing::debug!(
            "moved to {}, energy {}, {} visit(s) left",
            target,
            self.energy,
            self.remaining_moves
        );
        if self.remaining_moves == 0 {
            self.solved = true;
            tracing::debug!("puzzle solved");
        }
    }

    /// Exact inverse of `commit` for the current tail entry.
    fn revert_last(&mut self) {
        let target = self
            .path
            .pop_back()
            .expect("revert_last called on an empty path");
        self.remaining_visits[target] += 1;
        self.remaining_moves += 1;
        self.energy -= self.energy_delta[target];
        if let Some(&last) = self.path.last() {
            let edge = self
                .edge_index
                .get(&endpoint_key(last, target))
                .copied()
                .unwrap_or_else(|| {
                    panic!("graph has no edge record between {last} and {target}")
                });
            self.edge_use[edge.index()] -= 1;
        }
        tracing::debug!("undid visit to {}, energy {}", target, self.energy);
    }

    fn emit_energy_if_changed(&mut self, energy_before: i32) {
        let energy = self.energy;
        if energy == energy_before {
            return;
        }
        if let Some(listener) = self.listener.as_mut() {
            listener.on_energy_changed(energy);
        }
    }

    // === Read-only queries ===

    /// The graph this engine runs over.
    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Snapshot of the current path, oldest entry first.
    ///
    /// O(1): the backing structure is persistent, so the snapshot shares
    /// storage with the live path without exposing it to mutation.
    #[must_use]
    pub fn path(&self) -> Vector<VertexId> {
        self.path.clone()
    }

    /// The vertex at the tip of the path.
    #[must_use]
    pub fn current(&self) -> Option<VertexId> {
        self.path.last().copied()
    }

    /// The running energy total.
    #[must_use]
    pub fn energy(&self) -> i32 {
        self.energy
    }

    /// Visits still owed across all vertices. 0 means solved.
    #[must_use]
    pub fn remaining_moves(&self) -> u32 {
        self.remaining_moves
    }

    /// Visits still owed by one vertex, in 0..=2.
    #[must_use]
    pub fn remaining_visits(&self, vertex: VertexId) -> u8 {
        self.remaining_visits[vertex]
    }

    /// How many times `edge` currently appears between consecutive path
    /// entries.
    #[must_use]
    pub fn edge_use_count(&self, edge: EdgeId) -> u32 {
        self.edge_use[edge.index()]
    }

    /// Use counts for every edge, indexed by edge id.
    #[must_use]
    pub fn edge_use_counts(&self) -> &[u32] {
        &self.edge_use
    }

    /// Whether every required visit has been made.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.solved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Direction;

    fn engine(graph: Graph) -> PathEngine {
        PathEngine::new(Arc::new(graph))
    }

    #[test]
    fn test_empty_graph_is_trivially_solved() {
        let e = engine(Graph::builder().build().unwrap());

        assert!(e.is_solved());
        assert_eq!(e.remaining_moves(), 0);
        assert_eq!(e.energy(), 0);
        assert!(e.path().is_empty());
    }

    #[test]
    fn test_construction_places_declared_start() {
        let mut builder = Graph::builder();
        let a = builder.add_vertex(0, 0, 3);
        let b = builder.add_vertex(0, 0, 0);
        builder.mark_start(a);
        builder.add_edge(a, b, Direction::Undirected);
        let e = engine(builder.build().unwrap());

        assert_eq!(e.current(), Some(a));
        assert_eq!(e.remaining_visits(a), 0);
        assert_eq!(e.remaining_moves(), 1);
        assert_eq!(e.energy(), 3);
        assert!(!e.is_solved());
    }

    #[test]
    fn test_construction_without_start_leaves_path_empty() {
        let mut builder = Graph::builder();
        builder.add_vertex(0, 0, 0);
        let e = engine(builder.build().unwrap());

        assert!(e.path().is_empty());
        assert_eq!(e.remaining_moves(), 1);
    }

    #[test]
    fn test_directed_adjacency() {
        let mut builder = Graph::builder();
        let a = builder.add_vertex(0, 0, 0);
        let b = builder.add_vertex(0, 0, 0);
        let c = builder.add_vertex(0, 0, 0);
        builder.add_edge(a, b, Direction::AToB);
        builder.add_edge(b, c, Direction::BToA);
        let e = engine(builder.build().unwrap());

        assert!(e.can_traverse(a, b));
        assert!(!e.can_traverse(b, a));
        assert!(!e.can_traverse(b, c));
        assert!(e.can_traverse(c, b));
        assert!(!e.can_traverse(a, c));
    }

    #[test]
    fn test_can_traverse_out_of_range_is_false() {
        let mut builder = Graph::builder();
        let a = builder.add_vertex(0, 0, 0);
        let e = engine(builder.build().unwrap());

        assert!(!e.can_traverse(a, VertexId::new(9)));
        assert!(!e.can_traverse(VertexId::new(9), a));
    }

    #[test]
    fn test_double_visit_budget() {
        let mut builder = Graph::builder();
        let a = builder.add_vertex(0, 0, 0);
        builder.mark_double_visit(a);
        let e = engine(builder.build().unwrap());

        assert_eq!(e.remaining_visits(a), 2);
        assert_eq!(e.remaining_moves(), 2);
    }

    #[test]
    #[should_panic(expected = "no edge record")]
    fn test_missing_edge_record_is_fatal() {
        // An edge stored with descending endpoints is unreachable by the
        // normalized lookup even though adjacency allows the step.
        let a = VertexId::new(0);
        let b = VertexId::new(1);
        let vertices = vec![
            crate::graph::Vertex {
                id: a,
                x: 0,
                y: 0,
                energy: 0,
                is_start: false,
                is_end: false,
                double_visit: false,
            },
            crate::graph::Vertex {
                id: b,
                x: 0,
                y: 0,
                energy: 0,
                is_start: false,
                is_end: false,
                double_visit: false,
            },
        ];
        let edges = vec![crate::graph::Edge {
            id: EdgeId::new(0),
            a: b,
            b: a,
            direction: Direction::Undirected,
        }];
        let graph = Graph::from_parts(vertices, edges);
        assert!(graph.validate().is_err());

        let mut e = engine(graph);
        assert!(e.attempt_move(a));
        e.attempt_move(b);
    }
}
