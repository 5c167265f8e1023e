//! Fluent API for filling any graph backend.

use crate::types::{GraphResult, MarkerValue, VertexValue, Weight};

use super::Graph;

/// Fluent builder collecting vertices, edges and marks.
///
/// Nothing is validated until [`GraphBuilder::build_into`], which applies
/// everything through the [`Graph`] contract in insertion order.
#[derive(Debug, Clone)]
pub struct GraphBuilder<V, M = String> {
    vertices: Vec<V>,
    edges: Vec<(V, V, Weight)>,
    marks: Vec<(V, M)>,
}

impl<V: VertexValue, M: MarkerValue> GraphBuilder<V, M> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
            marks: Vec::new(),
        }
    }

    /// Add a vertex.
    pub fn vertex(&mut self, vertex: V) -> &mut Self {
        self.vertices.push(vertex);
        self
    }

    /// Add a weighted edge. Missing endpoints are created at build time.
    pub fn edge(&mut self, source: V, destination: V, weight: Weight) -> &mut Self {
        self.edges.push((source, destination, weight));
        self
    }

    /// Tag a vertex with a marker. The vertex is created at build time if needed.
    pub fn mark(&mut self, vertex: V, marker: M) -> &mut Self {
        self.marks.push((vertex, marker));
        self
    }

    /// Number of edges collected so far.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Apply everything to `graph` and return it.
    ///
    /// Vertices already in `graph` are kept as they are; a repeated edge
    /// keeps the last weight given.
    pub fn build_into<G: Graph<V, M>>(self, mut graph: G) -> GraphResult<G> {
        graph.add_all(self.vertices);
        for (source, destination, weight) in self.edges {
            graph.add_if_absent(source.clone());
            graph.add_if_absent(destination.clone());
            graph.add_edge(&source, &destination, weight)?;
        }
        for (vertex, marker) in self.marks {
            graph.add_if_absent(vertex.clone());
            graph.mark(&vertex, &marker)?;
        }
        Ok(graph)
    }
}

impl<V: VertexValue, M: MarkerValue> Default for GraphBuilder<V, M> {
    fn default() -> Self {
        Self::new()
    }
}
