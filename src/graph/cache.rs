//! Per-graph state shared by every backend: marker index and analysis cache.

use std::cell::RefCell;
use std::collections::HashMap;

use log::debug;

use crate::index::MarkerIndex;
use crate::types::{GraphResult, MarkerValue, VertexValue};
use crate::visit::{Components, ShortestPaths};

/// Lazily computed analyses, dropped on every structural mutation.
///
/// Lookups go through `&self` so that read-only graph queries can fill the
/// cache; invalidation needs `&mut self`, which every mutating graph method
/// already holds.
#[derive(Debug)]
pub struct AnalysisCache<V> {
    components: RefCell<Option<Components<V>>>,
    shortest_paths: RefCell<HashMap<V, ShortestPaths<V>>>,
}

impl<V: VertexValue> AnalysisCache<V> {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            components: RefCell::new(None),
            shortest_paths: RefCell::new(HashMap::new()),
        }
    }

    /// Cached components, computing them with `compute` on a miss.
    pub fn components_or_insert_with<F>(&self, compute: F) -> Components<V>
    where
        F: FnOnce() -> Components<V>,
    {
        if let Some(cached) = self.components.borrow().as_ref() {
            return cached.clone();
        }
        debug!("Computing strongly connected components");
        let fresh = compute();
        *self.components.borrow_mut() = Some(fresh.clone());
        fresh
    }

    /// Cached shortest paths from `source`, computing them with `compute` on a miss.
    pub fn shortest_paths_or_try_insert_with<F>(
        &self,
        source: &V,
        compute: F,
    ) -> GraphResult<ShortestPaths<V>>
    where
        F: FnOnce() -> GraphResult<ShortestPaths<V>>,
    {
        if let Some(cached) = self.shortest_paths.borrow().get(source) {
            return Ok(cached.clone());
        }
        debug!("Computing shortest paths from {:?}", source);
        let fresh = compute()?;
        self.shortest_paths
            .borrow_mut()
            .insert(source.clone(), fresh.clone());
        Ok(fresh)
    }

    /// Whether anything is cached.
    pub fn is_empty(&self) -> bool {
        self.components.borrow().is_none() && self.shortest_paths.borrow().is_empty()
    }

    /// Drop every cached analysis.
    pub fn invalidate(&mut self) {
        let components = self.components.get_mut();
        let paths = self.shortest_paths.get_mut();
        if components.is_some() || !paths.is_empty() {
            debug!(
                "Invalidating analysis cache ({} shortest-path trees)",
                paths.len()
            );
        }
        *components = None;
        paths.clear();
    }
}

impl<V: VertexValue> Default for AnalysisCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

// A copy of a graph starts with a cold cache.
impl<V> Clone for AnalysisCache<V> {
    fn clone(&self) -> Self {
        Self {
            components: RefCell::new(None),
            shortest_paths: RefCell::new(HashMap::new()),
        }
    }
}

/// Everything a backend owns besides its edge storage.
#[derive(Debug, Clone)]
pub struct GraphState<V, M> {
    markers: MarkerIndex<V, M>,
    cache: AnalysisCache<V>,
}

impl<V: VertexValue, M: MarkerValue> GraphState<V, M> {
    /// Create empty state.
    pub fn new() -> Self {
        Self {
            markers: MarkerIndex::new(),
            cache: AnalysisCache::new(),
        }
    }

    /// The marker index.
    pub fn markers(&self) -> &MarkerIndex<V, M> {
        &self.markers
    }

    /// Mutable access to the marker index.
    pub fn markers_mut(&mut self) -> &mut MarkerIndex<V, M> {
        &mut self.markers
    }

    /// The analysis cache.
    pub fn cache(&self) -> &AnalysisCache<V> {
        &self.cache
    }

    /// Record a structural change.
    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }

    /// Record that `vertex` left the graph (or was replaced).
    pub fn forget(&mut self, vertex: &V) {
        self.markers.unmark_vertex(vertex);
        self.cache.invalidate();
    }

    /// Reset to empty.
    pub fn clear(&mut self) {
        self.markers.clear();
        self.cache.invalidate();
    }
}

impl<V: VertexValue, M: MarkerValue> Default for GraphState<V, M> {
    fn default() -> Self {
        Self::new()
    }
}
