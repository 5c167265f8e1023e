//! Directed dense-matrix backend with vertex index remapping.

use std::collections::{HashMap, HashSet};

use crate::types::{Edge, GraphError, GraphResult, MarkerValue, VertexValue, Weight};

use super::cache::GraphState;
use super::Graph;

/// Directed graph stored as an N×N weight matrix.
///
/// Each vertex owns a dense index into a row-major `capacity × capacity`
/// matrix. Cells hold `Option<Weight>`: presence is tracked apart from the
/// weight, so a zero-weight edge is an ordinary edge.
///
/// - Edge query and update: O(1).
/// - Vertex add: amortized O(1), the matrix doubles its capacity when full.
/// - Vertex removal: O(n²), the matrix is compacted and every vertex above
///   the removed index is renumbered.
/// - Space: O(capacity²) regardless of edge count.
#[derive(Debug, Clone)]
pub struct MatrixGraph<V, M = String> {
    index: HashMap<V, usize>,
    vertices: Vec<V>,
    matrix: Vec<Option<Weight>>,
    capacity: usize,
    edge_count: usize,
    state: GraphState<V, M>,
}

impl<V: VertexValue, M: MarkerValue> MatrixGraph<V, M> {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty graph whose matrix already fits `capacity` vertices.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index: HashMap::with_capacity(capacity),
            vertices: Vec::with_capacity(capacity),
            matrix: vec![None; capacity * capacity],
            capacity,
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

    fn cell(&self, row: usize, col: usize) -> Option<Weight> {
        self.matrix
            .get(row * self.capacity + col)
            .copied()
            .flatten()
    }

    fn set_cell(&mut self, row: usize, col: usize, value: Option<Weight>) -> Option<Weight> {
        let previous = match self.matrix.get_mut(row * self.capacity + col) {
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

    fn grow(&mut self) {
        let new_capacity = (self.capacity * 2).max(4);
        let mut matrix = vec![None; new_capacity * new_capacity];
        let n = self.vertices.len();
        for row in 0..n {
            for col in 0..n {
                matrix[row * new_capacity + col] = self.cell(row, col);
            }
        }
        self.matrix = matrix;
        self.capacity = new_capacity;
    }

    fn insert_vertex(&mut self, vertex: V) {
        if self.vertices.len() == self.capacity {
            self.grow();
        }
        self.index.insert(vertex.clone(), self.vertices.len());
        self.vertices.push(vertex);
    }

    fn clear_row(&mut self, row: usize) {
        for col in 0..self.vertices.len() {
            self.set_cell(row, col, None);
        }
    }

    fn clear_col(&mut self, col: usize) {
        for row in 0..self.vertices.len() {
            self.set_cell(row, col, None);
        }
    }

    /// Remove the vertex at `removed`, shifting every later row and column
    /// one step towards the origin.
    fn compact(&mut self, removed: usize) {
        self.clear_row(removed);
        self.clear_col(removed);

        let n = self.vertices.len();
        let cap = self.capacity;
        // Sources are never behind their destinations in row-major order, so
        // a forward sweep never reads a cell it already overwrote.
        for row in 0..n.saturating_sub(1) {
            let src_row = if row >= removed { row + 1 } else { row };
            for col in 0..n.saturating_sub(1) {
                let src_col = if col >= removed { col + 1 } else { col };
                self.matrix[row * cap + col] = self.matrix[src_row * cap + src_col];
            }
        }
        if n > 0 {
            let last = n - 1;
            for i in 0..n {
                self.matrix[last * cap + i] = None;
                self.matrix[i * cap + last] = None;
            }
        }

        let gone = self.vertices.remove(removed);
        self.index.remove(&gone);
        for (i, vertex) in self.vertices.iter().enumerate().skip(removed) {
            self.index.insert(vertex.clone(), i);
        }
    }
}

impl<V: VertexValue, M: MarkerValue> Default for MatrixGraph<V, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: VertexValue, M: MarkerValue> Graph<V, M> for MatrixGraph<V, M> {
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
                self.clear_row(slot);
                self.clear_col(slot);
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
        let slot = self.slot(vertex)?;
        self.compact(slot);
        self.state.forget(vertex);
        Ok(())
    }

    fn remove_all(&mut self) {
        self.index.clear();
        self.vertices.clear();
        self.matrix = Vec::new();
        self.capacity = 0;
        self.edge_count = 0;
        self.state.clear();
    }

    fn add_edge(
        &mut self,
        source: &V,
        destination: &V,
        weight: Weight,
    ) -> GraphResult<Option<Weight>> {
        let row = self.slot(source)?;
        let col = self.slot(destination)?;
        let previous = self.set_cell(row, col, Some(weight));
        self.state.invalidate();
        Ok(previous)
    }

    fn weight(&self, source: &V, destination: &V) -> GraphResult<Option<Weight>> {
        let row = self.slot(source)?;
        let col = self.slot(destination)?;
        Ok(self.cell(row, col))
    }

    fn remove_edge(&mut self, source: &V, destination: &V) -> GraphResult<Option<Weight>> {
        let row = self.slot(source)?;
        let col = self.slot(destination)?;
        let previous = self.set_cell(row, col, None);
        self.state.invalidate();
        Ok(previous)
    }

    fn remove_all_out_edges(&mut self, vertex: &V) -> GraphResult<()> {
        let row = self.slot(vertex)?;
        self.clear_row(row);
        self.state.invalidate();
        Ok(())
    }

    fn remove_all_in_edges(&mut self, vertex: &V) -> GraphResult<()> {
        let col = self.slot(vertex)?;
        self.clear_col(col);
        self.state.invalidate();
        Ok(())
    }

    fn remove_all_edges(&mut self) {
        self.matrix.iter_mut().for_each(|cell| *cell = None);
        self.edge_count = 0;
        self.state.invalidate();
    }

    fn edges(&self) -> Vec<Edge<V>> {
        let mut edges = Vec::with_capacity(self.edge_count);
        for (row, source) in self.vertices.iter().enumerate() {
            for (col, destination) in self.vertices.iter().enumerate() {
                if let Some(weight) = self.cell(row, col) {
                    edges.push(Edge::new(source.clone(), destination.clone(), weight));
                }
            }
        }
        edges
    }

    fn edges_out(&self, vertex: &V) -> GraphResult<Vec<Edge<V>>> {
        let row = self.slot(vertex)?;
        Ok(self
            .vertices
            .iter()
            .enumerate()
            .filter_map(|(col, destination)| {
                self.cell(row, col)
                    .map(|w| Edge::new(vertex.clone(), destination.clone(), w))
            })
            .collect())
    }

    fn edges_in(&self, vertex: &V) -> GraphResult<Vec<Edge<V>>> {
        let col = self.slot(vertex)?;
        Ok(self
            .vertices
            .iter()
            .enumerate()
            .filter_map(|(row, source)| {
                self.cell(row, col)
                    .map(|w| Edge::new(source.clone(), vertex.clone(), w))
            })
            .collect())
    }
}
