//! Vertex identification and per-vertex data storage.
//!
//! ## VertexId
//!
//! Type-safe vertex identifier. Ids are dense and 0-based, assigned in
//! decode order, so they double as indices into per-vertex tables.
//!
//! ## VertexMap
//!
//! Efficient per-vertex data storage backed by `Vec` for O(1) access.
//! Supports iteration and indexing by `VertexId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// The most vertices a level may declare.
///
/// The level format stores the vertex count in a single byte that is read
/// as a signed value downstream, so 127 is the usable maximum.
pub const MAX_VERTICES: usize = 127;

/// Vertex identifier.
///
/// Vertex indices are 0-based: the first decoded vertex is `VertexId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VertexId(pub u8);

impl VertexId {
    /// Create a new vertex ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw vertex index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all vertex IDs of a graph with `vertex_count` vertices.
    ///
    /// ```
    /// use hamiltrail::graph::VertexId;
    ///
    /// let ids: Vec<_> = VertexId::all(3).collect();
    /// assert_eq!(ids, vec![VertexId::new(0), VertexId::new(1), VertexId::new(2)]);
    /// ```
    pub fn all(vertex_count: usize) -> impl Iterator<Item = VertexId> {
        (0..vertex_count as u8).map(VertexId)
    }
}

impl std::fmt::Display for VertexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "vertex {}", self.0)
    }
}

/// A puzzle vertex.
///
/// Positions are fixed-point fractions of the board: the numerator is stored
/// and the denominator is `i32::MAX`, so a renderer maps a vertex to pixels
/// as `width * x / i32::MAX`. The core attaches no further meaning to them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vertex {
    /// Dense id, assigned in decode order.
    pub id: VertexId,

    /// Horizontal position numerator, in `0..=i32::MAX`.
    pub x: i32,

    /// Vertical position numerator, in `0..=i32::MAX`.
    pub y: i32,

    /// Energy delta applied each time the vertex is entered.
    pub energy: i8,

    /// The trail begins here. At most one per well-formed graph.
    pub is_start: bool,

    /// The trail must finish here. At most one per well-formed graph.
    pub is_end: bool,

    /// Vertex must be visited twice before the puzzle can end.
    pub double_visit: bool,
}

impl Vertex {
    /// Number of visits this vertex requires: 2 if `double_visit`, else 1.
    #[must_use]
    pub const fn required_visits(&self) -> u8 {
        if self.double_visit {
            2
        } else {
            1
        }
    }

    /// Horizontal position as a fraction in [0, 1].
    #[must_use]
    pub fn x_fraction(&self) -> f64 {
        self.x as f64 / i32::MAX as f64
    }

    /// Vertical position as a fraction in [0, 1].
    #[must_use]
    pub fn y_fraction(&self) -> f64 {
        self.y as f64 / i32::MAX as f64
    }
}

/// Per-vertex data storage with O(1) access.
///
/// Backed by a `Vec<T>` with one entry per vertex.
/// Use `VertexMap::new()` to create with a factory function,
/// or `VertexMap::with_value()` to initialize all entries to the same value.
///
/// ## Example
///
/// ```
/// use hamiltrail::graph::{VertexId, VertexMap};
///
/// let mut visits: VertexMap<u8> = VertexMap::with_value(3, 1);
///
/// assert_eq!(visits[VertexId::new(0)], 1);
///
/// visits[VertexId::new(1)] = 2;
/// assert_eq!(visits[VertexId::new(1)], 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexMap<T> {
    data: Vec<T>,
}

impl<T> VertexMap<T> {
    /// Create a new VertexMap with values from a factory function.
    ///
    /// The factory receives the `VertexId` for each vertex. An empty map is
    /// legal: a level with zero vertices is a valid (trivially solved) level.
    pub fn new(vertex_count: usize, factory: impl Fn(VertexId) -> T) -> Self {
        assert!(
            vertex_count <= MAX_VERTICES,
            "At most {MAX_VERTICES} vertices supported"
        );

        let data = (0..vertex_count as u8).map(|i| factory(VertexId(i))).collect();

        Self { data }
    }

    /// Create a new VertexMap with all entries set to the same value.
    pub fn with_value(vertex_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(vertex_count, |_| value.clone())
    }

    /// Create a new VertexMap with default values.
    pub fn with_default(vertex_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(vertex_count, |_| T::default())
    }

    /// Get the number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a vertex's data.
    #[must_use]
    pub fn get(&self, vertex: VertexId) -> &T {
        &self.data[vertex.index()]
    }

    /// Get a mutable reference to a vertex's data.
    pub fn get_mut(&mut self, vertex: VertexId) -> &mut T {
        &mut self.data[vertex.index()]
    }

    /// Iterate over (VertexId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (VertexId(i as u8), v))
    }

    /// Iterate over all vertex IDs.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> {
        (0..self.data.len() as u8).map(VertexId)
    }
}

impl<T> Index<VertexId> for VertexMap<T> {
    type Output = T;

    fn index(&self, vertex: VertexId) -> &Self::Output {
        self.get(vertex)
    }
}

impl<T> IndexMut<VertexId> for VertexMap<T> {
    fn index_mut(&mut self, vertex: VertexId) -> &mut Self::Output {
        self.get_mut(vertex)
    }
}
