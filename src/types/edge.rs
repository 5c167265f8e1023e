//! The core edge struct.

use serde::Serialize;

use super::{VertexValue, Weight};

/// A weighted relationship from `source` to `destination`.
///
/// Edges are immutable snapshots; changing a weight goes through
/// [`Graph::add_edge`](crate::graph::Graph::add_edge).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Edge<V> {
    source: V,
    destination: V,
    weight: Weight,
}

impl<V: VertexValue> Edge<V> {
    /// Create a new edge.
    pub fn new(source: V, destination: V, weight: Weight) -> Self {
        Self {
            source,
            destination,
            weight,
        }
    }

    /// Origin of the edge.
    pub fn source(&self) -> &V {
        &self.source
    }

    /// Target of the edge.
    pub fn destination(&self) -> &V {
        &self.destination
    }

    /// Weight carried by the edge.
    pub fn weight(&self) -> Weight {
        self.weight
    }

    /// The same edge pointing the other way.
    pub fn reversed(&self) -> Self {
        Self {
            source: self.destination.clone(),
            destination: self.source.clone(),
            weight: self.weight,
        }
    }

    /// Split into `(source, destination, weight)`.
    pub fn into_parts(self) -> (V, V, Weight) {
        (self.source, self.destination, self.weight)
    }
}

impl<V: std::fmt::Display> std::fmt::Display for Edge<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {} ({})", self.source, self.destination, self.weight)
    }
}

/// Sum of the weights along a path of edges, saturating at the bounds of
/// [`Weight`] the same way Dijkstra accumulates distances.
pub fn path_weight<V>(path: &[Edge<V>]) -> Weight {
    path.iter().map(|e| e.weight).fold(0, Weight::saturating_add)
}
