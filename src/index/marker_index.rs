//! Index of markers: a many-to-many relation between vertices and tags.

use std::collections::{HashMap, HashSet};

use crate::types::{MarkerValue, VertexValue};

/// Two-way map between markers and the vertices carrying them.
///
/// Neither side ever holds an empty set: removing the last vertex from a
/// marker drops the marker, and vice versa.
#[derive(Debug, Clone)]
pub struct MarkerIndex<V, M> {
    by_marker: HashMap<M, HashSet<V>>,
    by_vertex: HashMap<V, HashSet<M>>,
}

impl<V: VertexValue, M: MarkerValue> MarkerIndex<V, M> {
    /// Create a new, empty marker index.
    pub fn new() -> Self {
        Self {
            by_marker: HashMap::new(),
            by_vertex: HashMap::new(),
        }
    }

    /// Tag `vertex` with `marker`. Returns `false` if it already carried it.
    pub fn mark(&mut self, vertex: &V, marker: &M) -> bool {
        let added = self
            .by_vertex
            .entry(vertex.clone())
            .or_default()
            .insert(marker.clone());
        self.by_marker
            .entry(marker.clone())
            .or_default()
            .insert(vertex.clone());
        added
    }

    /// Remove `marker` from `vertex`. Returns whether anything changed.
    pub fn unmark(&mut self, vertex: &V, marker: &M) -> bool {
        let removed = remove_pair(&mut self.by_vertex, vertex, marker);
        remove_pair(&mut self.by_marker, marker, vertex);
        removed
    }

    /// Remove every marker from `vertex`.
    pub fn unmark_vertex(&mut self, vertex: &V) {
        if let Some(markers) = self.by_vertex.remove(vertex) {
            for marker in markers {
                remove_pair(&mut self.by_marker, &marker, vertex);
            }
        }
    }

    /// Remove `marker` from every vertex.
    pub fn unmark_all_with(&mut self, marker: &M) {
        if let Some(vertices) = self.by_marker.remove(marker) {
            for vertex in vertices {
                remove_pair(&mut self.by_vertex, &vertex, marker);
            }
        }
    }

    /// Markers carried by `vertex`.
    pub fn marks_of(&self, vertex: &V) -> HashSet<M> {
        self.by_vertex.get(vertex).cloned().unwrap_or_default()
    }

    /// Vertices carrying `marker`.
    pub fn marked_with(&self, marker: &M) -> HashSet<V> {
        self.by_marker.get(marker).cloned().unwrap_or_default()
    }

    /// Whether `vertex` carries at least one marker.
    pub fn is_marked(&self, vertex: &V) -> bool {
        self.by_vertex.contains_key(vertex)
    }

    /// Every marker in use.
    pub fn markers(&self) -> HashSet<M> {
        self.by_marker.keys().cloned().collect()
    }

    /// Clear the index.
    pub fn clear(&mut self) {
        self.by_marker.clear();
        self.by_vertex.clear();
    }

    /// Number of (vertex, marker) pairs.
    pub fn len(&self) -> usize {
        self.by_vertex.values().map(|m| m.len()).sum()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.by_vertex.is_empty()
    }
}

impl<V: VertexValue, M: MarkerValue> Default for MarkerIndex<V, M> {
    fn default() -> Self {
        Self::new()
    }
}

fn remove_pair<K, T>(map: &mut HashMap<K, HashSet<T>>, key: &K, value: &T) -> bool
where
    K: std::hash::Hash + Eq,
    T: std::hash::Hash + Eq,
{
    let Some(set) = map.get_mut(key) else {
        return false;
    };
    let removed = set.remove(value);
    if set.is_empty() {
        map.remove(key);
    }
    removed
}
