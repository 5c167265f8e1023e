//! Per-traversal bookkeeping shared by every visit strategy.

use std::collections::HashMap;

use serde::Serialize;

use super::VertexValue;

/// Snapshot of what a traversal recorded for one vertex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VertexInfo<V> {
    /// The vertex this record describes.
    pub vertex: V,
    /// The vertex it was reached from. `None` for a root.
    pub parent: Option<V>,
    /// Tick at which the vertex was first seen.
    pub discovery_time: Option<u64>,
    /// Tick at which the vertex was visited.
    pub visit_time: Option<u64>,
}

#[derive(Debug, Clone)]
struct Entry<V> {
    parent: Option<V>,
    discovery_time: Option<u64>,
    visit_time: Option<u64>,
}

impl<V> Default for Entry<V> {
    fn default() -> Self {
        Self {
            parent: None,
            discovery_time: None,
            visit_time: None,
        }
    }
}

/// Discovery/visit timestamps and parent pointers for one traversal.
///
/// A single counter ticks on every discovery and every visit, so the two
/// kinds of event are totally ordered across the whole traversal. Each event
/// happens at most once per vertex and a parent, once set, never changes.
#[derive(Debug, Clone)]
pub struct VisitInfo<V> {
    source: Option<V>,
    entries: HashMap<V, Entry<V>>,
    time: u64,
}

impl<V: VertexValue> VisitInfo<V> {
    /// Create an empty record for a traversal rooted at `source`.
    pub fn new(source: Option<V>) -> Self {
        Self {
            source,
            entries: HashMap::new(),
            time: 0,
        }
    }

    /// The root the traversal was started from, if any.
    pub fn source(&self) -> Option<&V> {
        self.source.as_ref()
    }

    fn tick(&mut self) -> u64 {
        let now = self.time;
        self.time += 1;
        now
    }

    /// Record the discovery of `vertex`. Returns `false` if it was already discovered.
    pub fn set_discovered(&mut self, vertex: &V) -> bool {
        if self.is_discovered(vertex) {
            return false;
        }
        let now = self.tick();
        self.entries
            .entry(vertex.clone())
            .or_default()
            .discovery_time = Some(now);
        true
    }

    /// Record the visit of `vertex`, discovering it first if needed.
    /// Returns `false` if it was already visited.
    pub fn set_visited(&mut self, vertex: &V) -> bool {
        if self.is_visited(vertex) {
            return false;
        }
        self.set_discovered(vertex);
        let now = self.tick();
        self.entries.entry(vertex.clone()).or_default().visit_time = Some(now);
        true
    }

    /// Set the parent of `vertex` unless one is already recorded.
    pub fn set_parent(&mut self, vertex: &V, parent: &V) -> bool {
        let entry = self.entries.entry(vertex.clone()).or_default();
        if entry.parent.is_some() {
            return false;
        }
        entry.parent = Some(parent.clone());
        true
    }

    /// Whether `vertex` has been discovered.
    pub fn is_discovered(&self, vertex: &V) -> bool {
        self.discovery_time(vertex).is_some()
    }

    /// Whether `vertex` has been visited.
    pub fn is_visited(&self, vertex: &V) -> bool {
        self.visit_time(vertex).is_some()
    }

    /// Tick at which `vertex` was discovered.
    pub fn discovery_time(&self, vertex: &V) -> Option<u64> {
        self.entries.get(vertex).and_then(|e| e.discovery_time)
    }

    /// Tick at which `vertex` was visited.
    pub fn visit_time(&self, vertex: &V) -> Option<u64> {
        self.entries.get(vertex).and_then(|e| e.visit_time)
    }

    /// Parent of `vertex` in the traversal tree.
    pub fn parent(&self, vertex: &V) -> Option<&V> {
        self.entries.get(vertex).and_then(|e| e.parent.as_ref())
    }

    /// Everything recorded for `vertex`.
    pub fn entry(&self, vertex: &V) -> Option<VertexInfo<V>> {
        self.entries.get(vertex).map(|e| VertexInfo {
            vertex: vertex.clone(),
            parent: e.parent.clone(),
            discovery_time: e.discovery_time,
            visit_time: e.visit_time,
        })
    }

    /// All vertices the traversal touched.
    pub fn vertices(&self) -> Vec<V> {
        self.entries.keys().cloned().collect()
    }

    /// Discovered vertices, in discovery order.
    pub fn discovered_order(&self) -> Vec<V> {
        self.ordered_by(|e| e.discovery_time)
    }

    /// Visited vertices, in visit order.
    pub fn visited_order(&self) -> Vec<V> {
        self.ordered_by(|e| e.visit_time)
    }

    fn ordered_by(&self, key: impl Fn(&Entry<V>) -> Option<u64>) -> Vec<V> {
        let mut timed: Vec<(u64, &V)> = self
            .entries
            .iter()
            .filter_map(|(v, e)| key(e).map(|t| (t, v)))
            .collect();
        timed.sort_unstable_by_key(|(t, _)| *t);
        timed.into_iter().map(|(_, v)| v.clone()).collect()
    }

    /// Chain of vertices from the root of `vertex`'s tree down to `vertex`.
    ///
    /// Empty if the traversal never reached `vertex`.
    pub fn path_to(&self, vertex: &V) -> Vec<V> {
        if !self.entries.contains_key(vertex) {
            return Vec::new();
        }
        let mut path = vec![vertex.clone()];
        let mut current = vertex;
        while let Some(parent) = self.parent(current) {
            // set_parent is public, so a hand-built record may contain a cycle.
            if path.len() > self.entries.len() {
                break;
            }
            path.push(parent.clone());
            current = parent;
        }
        path.reverse();
        path
    }
}
