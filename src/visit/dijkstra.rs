//! Single-source shortest paths.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use log::trace;

use crate::graph::Graph;
use crate::types::{Edge, GraphError, GraphResult, MarkerValue, VertexValue, VisitInfo, Weight};

use super::{OnVisit, VisitStrategy, Visited};

/// Dijkstra's algorithm over a binary heap.
///
/// Edge weights must be non-negative. This is not checked: with a negative
/// weight the returned paths are silently wrong rather than an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dijkstra;

/// Shortest-path tree from one source.
#[derive(Debug, Clone)]
pub struct ShortestPaths<V> {
    info: VisitInfo<V>,
    distances: HashMap<V, Weight>,
    paths: HashMap<V, Vec<Edge<V>>>,
}

impl<V: VertexValue> ShortestPaths<V> {
    /// Edge path from the source to every reachable vertex. The source maps to an empty path.
    pub fn paths(&self) -> &HashMap<V, Vec<Edge<V>>> {
        &self.paths
    }

    /// Consume into the path map.
    pub fn into_paths(self) -> HashMap<V, Vec<Edge<V>>> {
        self.paths
    }

    /// Edge path to `destination`, if reachable.
    pub fn path_to(&self, destination: &V) -> Option<&[Edge<V>]> {
        self.paths.get(destination).map(Vec::as_slice)
    }

    /// Total weight of the shortest path to `destination`, if reachable.
    pub fn distance_to(&self, destination: &V) -> Option<Weight> {
        self.distances.get(destination).copied()
    }

    /// Whether `destination` is reachable from the source.
    pub fn is_reachable(&self, destination: &V) -> bool {
        self.paths.contains_key(destination)
    }
}

impl<V> Visited<V> for ShortestPaths<V> {
    fn info(&self) -> &VisitInfo<V> {
        &self.info
    }
}

impl<V: VertexValue> VisitStrategy<V> for Dijkstra {
    type Output = ShortestPaths<V>;

    /// # Errors
    ///
    /// `NullReference` without a source, `VertexNotFound` if the source is absent.
    fn visit<M, G>(
        &self,
        graph: &G,
        source: Option<&V>,
        on_visit: OnVisit<'_, V>,
    ) -> GraphResult<ShortestPaths<V>>
    where
        M: MarkerValue,
        G: Graph<V, M> + ?Sized,
    {
        let source = source.ok_or(GraphError::NullReference("source"))?;
        if !graph.contains(source) {
            return Err(GraphError::not_found(source));
        }
        trace!("Dijkstra from {:?}", source);

        let mut info = VisitInfo::new(Some(source.clone()));
        // The heap orders on (distance, slot) so vertices need no ordering of their own.
        let mut slots: Vec<V> = Vec::new();
        let mut heap: BinaryHeap<Reverse<(Weight, usize)>> = BinaryHeap::new();
        let mut distances: HashMap<V, Weight> = HashMap::new();
        let mut via: HashMap<V, Edge<V>> = HashMap::new();
        let mut settled: Vec<V> = Vec::new();

        distances.insert(source.clone(), 0);
        info.set_discovered(source);
        slots.push(source.clone());
        heap.push(Reverse((0, 0)));

        while let Some(Reverse((dist, slot))) = heap.pop() {
            let Some(current) = slots.get(slot).cloned() else {
                continue;
            };
            if info.is_visited(&current) {
                continue;
            }
            if distances.get(&current).is_some_and(|&best| dist > best) {
                continue;
            }

            if let Some(edge) = via.get(&current) {
                info.set_parent(&current, edge.source());
            }
            info.set_visited(&current);
            on_visit(&current)?;
            settled.push(current.clone());

            for edge in graph.edges_out(&current)? {
                let next = edge.destination();
                if info.is_visited(next) {
                    continue;
                }
                let candidate = dist.saturating_add(edge.weight());
                let improves = distances.get(next).map_or(true, |&old| candidate < old);
                if improves {
                    distances.insert(next.clone(), candidate);
                    info.set_discovered(next);
                    heap.push(Reverse((candidate, slots.len())));
                    slots.push(next.clone());
                    via.insert(next.clone(), edge);
                }
            }
        }

        // Settled order guarantees every parent's path is built before its children's.
        let mut paths: HashMap<V, Vec<Edge<V>>> = HashMap::with_capacity(settled.len());
        for vertex in &settled {
            let path = match via.get(vertex) {
                None => Vec::new(),
                Some(edge) => {
                    let mut path = paths.get(edge.source()).cloned().unwrap_or_default();
                    path.push(edge.clone());
                    path
                }
            };
            paths.insert(vertex.clone(), path);
        }
        distances.retain(|v, _| paths.contains_key(v));

        Ok(ShortestPaths {
            info,
            distances,
            paths,
        })
    }
}
