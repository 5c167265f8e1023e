//! Directed map-of-maps backend.

use std::collections::{HashMap, HashSet};

use crate::types::{Edge, GraphError, GraphResult, MarkerValue, VertexValue, Weight};

use super::cache::GraphState;
use super::Graph;

/// Directed graph stored as vertex -> (neighbour -> weight).
///
/// Same shape as [`ListGraph`](super::ListGraph) but with hashed edge
/// lookup: edge queries and updates are near O(1) at the cost of one map per
/// vertex. Incoming-edge queries probe every vertex's map.
#[derive(Debug, Clone)]
pub struct MapGraph<V, M = String> {
    adjacency: HashMap<V, HashMap<V, Weight>>,
    edge_count: usize,
    state: GraphState<V, M>,
}

impl<V: VertexValue, M: MarkerValue> MapGraph<V, M> {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty graph with room for `capacity` vertices.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            adjacency: HashMap::with_capacity(capacity),
            edge_count: 0,
            state: GraphState::new(),
        }
    }

    fn out_map(&self, vertex: &V) -> GraphResult<&HashMap<V, Weight>> {
        self.adjacency
            .get(vertex)
            .ok_or_else(|| GraphError::not_found(vertex))
    }

    fn drop_in_edges(&mut self, vertex: &V) {
        let mut removed = 0;
        for targets in self.adjacency.values_mut() {
            if targets.remove(vertex).is_some() {
                removed += 1;
            }
        }
        self.edge_count -= removed;
    }

    fn drop_out_edges(&mut self, vertex: &V) {
        if let Some(targets) = self.adjacency.get_mut(vertex) {
            self.edge_count -= targets.len();
            targets.clear();
        }
    }
}

impl<V: VertexValue, M: MarkerValue> Default for MapGraph<V, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: VertexValue, M: MarkerValue> Graph<V, M> for MapGraph<V, M> {
    fn is_directed(&self) -> bool {
        true
    }

    fn empty_like(&self) -> Self {
        Self::new()
    }

    fn state(&self) -> &GraphState<V, M> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut GraphState<V, M> {
        &mut self.state
    }

    fn contains(&self, vertex: &V) -> bool {
        self.adjacency.contains_key(vertex)
    }

    fn vertices(&self) -> HashSet<V> {
        self.adjacency.keys().cloned().collect()
    }

    fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn add(&mut self, vertex: V) {
        if self.contains(&vertex) {
            self.drop_out_edges(&vertex);
            self.drop_in_edges(&vertex);
            self.state.forget(&vertex);
        } else {
            self.adjacency.insert(vertex, HashMap::new());
            self.state.invalidate();
        }
    }

    fn add_if_absent(&mut self, vertex: V) -> bool {
        if self.contains(&vertex) {
            return false;
        }
        self.adjacency.insert(vertex, HashMap::new());
        self.state.invalidate();
        true
    }

    fn remove(&mut self, vertex: &V) -> GraphResult<()> {
        self.ensure_contains(vertex)?;
        self.drop_out_edges(vertex);
        self.adjacency.remove(vertex);
        self.drop_in_edges(vertex);
        self.state.forget(vertex);
        Ok(())
    }

    fn remove_all(&mut self) {
        self.adjacency.clear();
        self.edge_count = 0;
        self.state.clear();
    }

    fn add_edge(
        &mut self,
        source: &V,
        destination: &V,
        weight: Weight,
    ) -> GraphResult<Option<Weight>> {
        self.ensure_contains(source)?;
        self.ensure_contains(destination)?;
        let targets = self
            .adjacency
            .get_mut(source)
            .ok_or_else(|| GraphError::not_found(source))?;
        let previous = targets.insert(destination.clone(), weight);
        if previous.is_none() {
            self.edge_count += 1;
        }
        self.state.invalidate();
        Ok(previous)
    }

    fn weight(&self, source: &V, destination: &V) -> GraphResult<Option<Weight>> {
        let targets = self.out_map(source)?;
        self.ensure_contains(destination)?;
        Ok(targets.get(destination).copied())
    }

    fn remove_edge(&mut self, source: &V, destination: &V) -> GraphResult<Option<Weight>> {
        self.ensure_contains(source)?;
        self.ensure_contains(destination)?;
        let targets = self
            .adjacency
            .get_mut(source)
            .ok_or_else(|| GraphError::not_found(source))?;
        let removed = targets.remove(destination);
        if removed.is_some() {
            self.edge_count -= 1;
        }
        self.state.invalidate();
        Ok(removed)
    }

    fn remove_all_out_edges(&mut self, vertex: &V) -> GraphResult<()> {
        self.ensure_contains(vertex)?;
        self.drop_out_edges(vertex);
        self.state.invalidate();
        Ok(())
    }

    fn remove_all_in_edges(&mut self, vertex: &V) -> GraphResult<()> {
        self.ensure_contains(vertex)?;
        self.drop_in_edges(vertex);
        self.state.invalidate();
        Ok(())
    }

    fn remove_all_edges(&mut self) {
        for targets in self.adjacency.values_mut() {
            targets.clear();
        }
        self.edge_count = 0;
        self.state.invalidate();
    }

    fn edges(&self) -> Vec<Edge<V>> {
        self.adjacency
            .iter()
            .flat_map(|(source, targets)| {
                targets
                    .iter()
                    .map(move |(t, w)| Edge::new(source.clone(), t.clone(), *w))
            })
            .collect()
    }

    fn edges_out(&self, vertex: &V) -> GraphResult<Vec<Edge<V>>> {
        Ok(self
            .out_map(vertex)?
            .iter()
            .map(|(t, w)| Edge::new(vertex.clone(), t.clone(), *w))
            .collect())
    }

    fn edges_in(&self, vertex: &V) -> GraphResult<Vec<Edge<V>>> {
        self.ensure_contains(vertex)?;
        Ok(self
            .adjacency
            .iter()
            .filter_map(|(source, targets)| {
                targets
                    .get(vertex)
                    .map(|w| Edge::new(source.clone(), vertex.clone(), *w))
            })
            .collect())
    }
}
