//! Graph model consumed by the stepping engine.
//!
//! A graph is fixed at construction: a vertex count and an ordered edge
//! list. The edge order matters - the engine examines edges exactly in
//! this order, and the visualizer's "edge j of E" display depends on it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Signed edge weight / distance value.
pub type Weight = i64;

/// Sentinel for "no path known yet".
///
/// Reserved maximum, distinct from any real distance. Renderers
/// conventionally draw it as the infinity symbol.
pub const INFINITY: Weight = Weight::MAX;

/// A directed, weighted edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Source vertex id
    pub source: usize,

    /// Target vertex id
    pub target: usize,

    /// Signed weight (negative weights are the whole point)
    pub weight: Weight,
}

impl Edge {
    /// Creates an edge `source -> target` with the given weight.
    pub fn new(source: usize, target: usize, weight: Weight) -> Self {
        Self {
            source,
            target,
            weight,
        }
    }
}

/// Errors detected when constructing a [`Graph`].
///
/// These are the only checked preconditions in the library; there is no
/// recovery path - callers treat construction failure as fatal for that
/// engine instance.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The source vertex 0 must exist
    #[error("graph must have at least one vertex")]
    Empty,

    /// Declared edge count disagrees with the edge list
    #[error("edge count mismatch: declared {declared}, edge list has {actual}")]
    EdgeCountMismatch { declared: usize, actual: usize },

    /// An edge references a vertex id outside `[0, vertex_count)`
    #[error("edge {index} references vertex {vertex} outside 0..{vertex_count}")]
    VertexOutOfRange {
        index: usize,
        vertex: usize,
        vertex_count: usize,
    },
}

/// An immutable directed graph with `V` vertices (ids `0..V`) and an
/// ordered edge sequence.
#[derive(Debug, Clone, Serialize)]
pub struct Graph {
    vertex_count: usize,
    edges: Vec<Edge>,
}

impl Graph {
    /// Validates and constructs a graph.
    ///
    /// `edge_count` is accepted separately (and checked against
    /// `edges.len()`) because callers historically carried `V` and `E`
    /// alongside the edge list; a mismatch is always a caller bug.
    pub fn new(
        edges: Vec<Edge>,
        vertex_count: usize,
        edge_count: usize,
    ) -> Result<Self, GraphError> {
        if vertex_count == 0 {
            return Err(GraphError::Empty);
        }
        if edge_count != edges.len() {
            return Err(GraphError::EdgeCountMismatch {
                declared: edge_count,
                actual: edges.len(),
            });
        }
        for (index, edge) in edges.iter().enumerate() {
            for vertex in [edge.source, edge.target] {
                if vertex >= vertex_count {
                    return Err(GraphError::VertexOutOfRange {
                        index,
                        vertex,
                        vertex_count,
                    });
                }
            }
        }
        Ok(Self {
            vertex_count,
            edges,
        })
    }

    /// Number of vertices `V`.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Number of edges `E`.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// The ordered edge sequence.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The edge at index `j`, if any.
    pub fn edge(&self, j: usize) -> Option<Edge> {
        self.edges.get(j).copied()
    }
}
