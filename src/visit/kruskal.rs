//! Kruskal's minimum spanning tree.

use log::trace;

use crate::collections::UnionFind;
use crate::graph::Graph;
use crate::types::{Edge, GraphResult, MarkerValue, VertexValue, VisitInfo};

use super::prim::{require_undirected, SpanningTree};
use super::{OnVisit, VisitStrategy};

/// Sorted-edge MST on an undirected graph.
///
/// Edges are taken in ascending weight order and accepted only when they join
/// two different components. Stops once a single component remains or the
/// edges run out, so a disconnected graph yields a forest. The source
/// argument is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct Kruskal;

impl<V: VertexValue> VisitStrategy<V> for Kruskal {
    type Output = SpanningTree<V>;

    /// # Errors
    ///
    /// `Unsupported` on a directed graph.
    fn visit<M, G>(
        &self,
        graph: &G,
        _source: Option<&V>,
        on_visit: OnVisit<'_, V>,
    ) -> GraphResult<SpanningTree<V>>
    where
        M: MarkerValue,
        G: Graph<V, M> + ?Sized,
    {
        require_undirected(graph, "Kruskal")?;

        let vertices = graph.vertices();
        let mut edges = graph.edges();
        edges.sort_by_key(Edge::weight);
        trace!(
            "Kruskal over {} vertices, {} candidate edges",
            vertices.len(),
            edges.len()
        );

        let mut sets = UnionFind::with_capacity(vertices.len());
        sets.make_set_all(vertices.iter().cloned());

        let mut info = VisitInfo::new(None);
        let mut tree: Vec<Edge<V>> = Vec::new();
        for edge in edges {
            if sets.size() <= 1 {
                break;
            }
            if !sets.union(edge.source(), edge.destination())? {
                continue;
            }

            let (source, destination) = (edge.source(), edge.destination());
            let source_is_new = !info.is_visited(source);
            let destination_is_new = !info.is_visited(destination);
            if destination_is_new {
                info.set_parent(destination, source);
            } else if source_is_new {
                info.set_parent(source, destination);
            }
            for (vertex, is_new) in [(source, source_is_new), (destination, destination_is_new)] {
                if is_new {
                    info.set_visited(vertex);
                    on_visit(vertex)?;
                }
            }
            tree.push(edge);
        }

        // Isolated vertices still belong to the forest.
        for vertex in &vertices {
            if info.set_visited(vertex) {
                on_visit(vertex)?;
            }
        }

        Ok(SpanningTree { info, edges: tree })
    }
}
