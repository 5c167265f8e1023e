//! Directed adjacency-list backend.

use std::collections::{HashMap, HashSet};

use crate::types::{Edge, GraphError, GraphResult, MarkerValue, VertexValue, Weight};

use super::cache::GraphState;
use super::Graph;

/// Directed graph stored as vertex -> list of `(neighbour, weight)`.
///
/// Vertex insertion is amortized O(1); edge lookup, update and removal are
/// O(out-degree). There is no reverse index, so incoming-edge queries scan
/// every list.
#[derive(Debug, Clone)]
pub struct ListGraph<V, M = String> {
    adjacency: HashMap<V, Vec<(V, Weight)>>,
    edge_count: usize,
    state: GraphState<V, M>,
}

impl<V: VertexValue, M: MarkerValue> ListGraph<V, M> {
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

    fn check_pair(&self, source: &V, destination: &V) -> GraphResult<()> {
        self.ensure_contains(source)?;
        self.ensure_contains(destination)
    }

    /// Drop every edge entering `vertex`; returns how many were removed.
    fn drop_in_edges(&mut self, vertex: &V) -> usize {
        let mut removed = 0;
        for list in self.adjacency.values_mut() {
            let before = list.len();
            list.retain(|(n, _)| n != vertex);
            removed += before - list.len();
        }
        self.edge_count -= removed;
        removed
    }

    fn drop_out_edges(&mut self, vertex: &V) -> usize {
        let removed = self
            .adjacency
            .get_mut(vertex)
            .map(|list| std::mem::take(list).len())
            .unwrap_or(0);
        self.edge_count -= removed;
        removed
    }
}

impl<V: VertexValue, M: MarkerValue> Default for ListGraph<V, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: VertexValue, M: MarkerValue> Graph<V, M> for ListGraph<V, M> {
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
            self.adjacency.insert(vertex, Vec::new());
            self.state.invalidate();
        }
    }

    fn add_if_absent(&mut self, vertex: V) -> bool {
        if self.contains(&vertex) {
            return false;
        }
        self.adjacency.insert(vertex, Vec::new());
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
        self.check_pair(source, destination)?;
        let list = self
            .adjacency
            .get_mut(source)
            .ok_or_else(|| GraphError::not_found(source))?;
        let previous = match list.iter_mut().find(|(n, _)| n == destination) {
            Some((_, w)) => Some(std::mem::replace(w, weight)),
            None => {
                list.push((destination.clone(), weight));
                self.edge_count += 1;
                None
            }
        };
        self.state.invalidate();
        Ok(previous)
    }

    fn weight(&self, source: &V, destination: &V) -> GraphResult<Option<Weight>> {
        self.check_pair(source, destination)?;
        Ok(self
            .adjacency
            .get(source)
            .and_then(|list| list.iter().find(|(n, _)| n == destination))
            .map(|(_, w)| *w))
    }

    fn remove_edge(&mut self, source: &V, destination: &V) -> GraphResult<Option<Weight>> {
        self.check_pair(source, destination)?;
        let removed = self.adjacency.get_mut(source).and_then(|list| {
            let pos = list.iter().position(|(n, _)| n == destination)?;
            Some(list.remove(pos).1)
        });
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
        for list in self.adjacency.values_mut() {
            list.clear();
        }
        self.edge_count = 0;
        self.state.invalidate();
    }

    fn edges(&self) -> Vec<Edge<V>> {
        self.adjacency
            .iter()
            .flat_map(|(source, list)| {
                list.iter()
                    .map(move |(n, w)| Edge::new(source.clone(), n.clone(), *w))
            })
            .collect()
    }

    fn edges_out(&self, vertex: &V) -> GraphResult<Vec<Edge<V>>> {
        let list = self
            .adjacency
            .get(vertex)
            .ok_or_else(|| GraphError::not_found(vertex))?;
        Ok(list
            .iter()
            .map(|(n, w)| Edge::new(vertex.clone(), n.clone(), *w))
            .collect())
    }

    fn edges_in(&self, vertex: &V) -> GraphResult<Vec<Edge<V>>> {
        self.ensure_contains(vertex)?;
        Ok(self
            .adjacency
            .iter()
            .flat_map(|(source, list)| {
                list.iter()
                    .filter(|(n, _)| n == vertex)
                    .map(move |(_, w)| Edge::new(source.clone(), vertex.clone(), *w))
            })
            .collect())
    }
}
