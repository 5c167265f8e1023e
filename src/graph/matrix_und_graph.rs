//! Undirected dense-matrix backend storing only the lower triangle.

use std::collections::{HashMap, HashSet};

use crate::types::{Edge, GraphError, GraphResult, MarkerValue, VertexValue, Weight};

use super::cache::GraphState;
use super::Graph;

/// Undirected graph stored as a packed lower-triangular weight matrix.
///
/// Cell `(i, j)` with `i >= j` lives at `i * (i + 1) / 2 + j`; every query
/// orders its pair first, so `(a, b)` and `(b, a)` are the same edge. Rows
/// are contiguous, so adding a vertex appends one row. Removing one rebuilds
/// the triangle in O(n²). As in [`MatrixGraph`](super::MatrixGraph), presence
/// is tracked apart from the weight.
#[derive(Debug, Clone)]
pub struct MatrixUndGraph<V, M = String> {
    index: HashMap<V, usize>,
    vertices: Vec<V>,
    triangle: Vec<Option<Weight>>,
    edge_count: usize,
    state: GraphState<V, M>,
}

fn packed(a: usize, b: usize) -> usize {
    let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
    hi * (hi + 1) / 2 + lo
}

impl<V: VertexValue, M: MarkerValue> MatrixUndGraph<V, M> {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty graph with room for `capacity` vertices.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index: HashMap::with_capacity(capacity),
            vertices: Vec::with_capacity(capacity),
            triangle: Vec::with_capacity(capacity * (capacity + 1) / 2),
            edge_count: 0,
            state: GraphState::new(),
        }
    }

    fn slot(&self, vertex: &V) -> GraphResult<usize> {
        self.index
            .get(vertex)
            .copied()
            .ok_or_else(|| GraphError::not_found(vertex))
    }

    fn cell(&self, a: usize, b: usize) -> Option<Weight> {
        self.triangle.get(packed(a, b)).copied().flatten()
    }

    fn set_cell(&mut self, a: usize, b: usize, value: Option<Weight>) -> Option<Weight> {
        let previous = match self.triangle.get_mut(packed(a, b)) {
            Some(cell) => std::mem::replace(cell, value),
            None => None,
        };
        match (previous.is_some(), value.is_some()) {
            (false, true) => self.edge_count += 1,
            (true, false) => self.edge_count -= 1,
            _ => {}
        }
        previous
    }

    fn insert_vertex(&mut self, vertex: V) {
        let row = self.vertices.len();
        self.triangle.extend(std::iter::repeat(None).take(row + 1));
        self.index.insert(vertex.clone(), row);
        self.vertices.push(vertex);
    }

    fn clear_incident(&mut self, slot: usize) {
        for other in 0..self.vertices.len() {
            self.set_cell(slot, other, None);
        }
    }

    fn neighbours(&self, vertex: &V) -> GraphResult<Vec<(V, Weight)>> {
        let slot = self.slot(vertex)?;
        Ok(self
            .vertices
            .iter()
            .enumerate()
            .filter_map(|(other, v)| self.cell(slot, other).map(|w| (v.clone(), w)))
            .collect())
    }
}

impl<V: VertexValue, M: MarkerValue> Default for MatrixUndGraph<V, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: VertexValue, M: MarkerValue> Graph<V, M> for MatrixUndGraph<V, M> {
    fn is_directed(&self) -> bool {
        false
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
        self.index.contains_key(vertex)
    }

    fn vertices(&self) -> HashSet<V> {
        self.vertices.iter().cloned().collect()
    }

    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn add(&mut self, vertex: V) {
        match self.index.get(&vertex).copied() {
            Some(slot) => {
                self.clear_incident(slot);
                self.state.forget(&vertex);
            }
            None => {
                self.insert_vertex(vertex);
                self.state.invalidate();
            }
        }
    }

    fn add_if_absent(&mut self, vertex: V) -> bool {
        if self.contains(&vertex) {
            return false;
        }
        self.insert_vertex(vertex);
        self.state.invalidate();
        true
    }

    fn remove(&mut self, vertex: &V) -> GraphResult<()> {
        let removed = self.slot(vertex)?;
        self.clear_incident(removed);

        let n = self.vertices.len();
        let mut triangle = Vec::with_capacity((n - 1) * n / 2);
        for row in (0..n).filter(|&r| r != removed) {
            for col in (0..=row).filter(|&c| c != removed) {
                triangle.push(self.cell(row, col));
            }
        }
        self.triangle = triangle;

        let gone = self.vertices.remove(removed);
        self.index.remove(&gone);
        for (i, v) in self.vertices.iter().enumerate().skip(removed) {
            self.index.insert(v.clone(), i);
        }
        self.state.forget(vertex);
        Ok(())
    }

    fn remove_all(&mut self) {
        self.index.clear();
        self.vertices.clear();
        self.triangle.clear();
        self.edge_count = 0;
        self.state.clear();
    }

    fn add_edge(
        &mut self,
        source: &V,
        destination: &V,
        weight: Weight,
    ) -> GraphResult<Option<Weight>> {
        let a = self.slot(source)?;
        let b = self.slot(destination)?;
        let previous = self.set_cell(a, b, Some(weight));
        self.state.invalidate();
        Ok(previous)
    }

    fn weight(&self, source: &V, destination: &V) -> GraphResult<Option<Weight>> {
        let a = self.slot(source)?;
        let b = self.slot(destination)?;
        Ok(self.cell(a, b))
    }

    fn remove_edge(&mut self, source: &V, destination: &V) -> GraphResult<Option<Weight>> {
        let a = self.slot(source)?;
        let b = self.slot(destination)?;
        let previous = self.set_cell(a, b, None);
        self.state.invalidate();
        Ok(previous)
    }

    fn remove_all_out_edges(&mut self, vertex: &V) -> GraphResult<()> {
        let slot = self.slot(vertex)?;
        self.clear_incident(slot);
        self.state.invalidate();
        Ok(())
    }

    fn remove_all_in_edges(&mut self, vertex: &V) -> GraphResult<()> {
        self.remove_all_out_edges(vertex)
    }

    fn remove_all_edges(&mut self) {
        self.triangle.iter_mut().for_each(|cell| *cell = None);
        self.edge_count = 0;
        self.state.invalidate();
    }

    fn edges(&self) -> Vec<Edge<V>> {
        let mut edges = Vec::with_capacity(self.edge_count * 2);
        for (row, a) in self.vertices.iter().enumerate() {
            for (col, b) in self.vertices.iter().enumerate().take(row + 1) {
                if let Some(weight) = self.cell(row, col) {
                    edges.push(Edge::new(a.clone(), b.clone(), weight));
                    if row != col {
                        edges.push(Edge::new(b.clone(), a.clone(), weight));
                    }
                }
            }
        }
        edges
    }

    fn edges_out(&self, vertex: &V) -> GraphResult<Vec<Edge<V>>> {
        Ok(self
            .neighbours(vertex)?
            .into_iter()
            .map(|(other, w)| Edge::new(vertex.clone(), other, w))
            .collect())
    }

    fn edges_in(&self, vertex: &V) -> GraphResult<Vec<Edge<V>>> {
        Ok(self
            .neighbours(vertex)?
            .into_iter()
            .map(|(other, w)| Edge::new(other, vertex.clone(), w))
            .collect())
    }
}
