//! Prim's minimum spanning tree.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use log::trace;

use crate::graph::Graph;
use crate::types::{
    path_weight, Edge, GraphError, GraphResult, MarkerValue, VertexValue, VisitInfo, Weight,
};

use super::{OnVisit, VisitStrategy, Visited};

/// Greedy frontier expansion on an undirected graph.
///
/// Grows the tree from `source`, or from every unspanned vertex in turn when
/// no source is given; a disconnected graph yields a spanning forest.
#[derive(Debug, Clone, Copy, Default)]
pub struct Prim;

/// Edges of a minimum spanning tree or forest.
#[derive(Debug, Clone)]
pub struct SpanningTree<V> {
    pub(crate) info: VisitInfo<V>,
    pub(crate) edges: Vec<Edge<V>>,
}

impl<V: VertexValue> SpanningTree<V> {
    /// Tree edges, in the order the algorithm accepted them.
    pub fn edges(&self) -> &[Edge<V>] {
        &self.edges
    }

    /// Consume into the edge list.
    pub fn into_edges(self) -> Vec<Edge<V>> {
        self.edges
    }

    /// Sum of the tree's edge weights.
    pub fn total_weight(&self) -> Weight {
        path_weight(&self.edges)
    }
}

impl<V> Visited<V> for SpanningTree<V> {
    fn info(&self) -> &VisitInfo<V> {
        &self.info
    }
}

pub(crate) fn require_undirected<V, M, G>(graph: &G, algorithm: &str) -> GraphResult<()>
where
    V: VertexValue,
    M: MarkerValue,
    G: Graph<V, M> + ?Sized,
{
    if graph.is_directed() {
        return Err(GraphError::Unsupported(format!(
            "{} needs an undirected graph",
            algorithm
        )));
    }
    Ok(())
}

impl<V: VertexValue> VisitStrategy<V> for Prim {
    type Output = SpanningTree<V>;

    /// # Errors
    ///
    /// `Unsupported` on a directed graph, `VertexNotFound` if the source is absent.
    fn visit<M, G>(
        &self,
        graph: &G,
        source: Option<&V>,
        on_visit: OnVisit<'_, V>,
    ) -> GraphResult<SpanningTree<V>>
    where
        M: MarkerValue,
        G: Graph<V, M> + ?Sized,
    {
        require_undirected(graph, "Prim")?;
        let roots: Vec<V> = match source {
            Some(s) if !graph.contains(s) => return Err(GraphError::not_found(s)),
            Some(s) => vec![s.clone()],
            None => graph.vertices().into_iter().collect(),
        };
        trace!("Prim over {} root(s)", roots.len());

        let mut info = VisitInfo::new(source.cloned());
        let mut tree: Vec<Edge<V>> = Vec::new();
        // Candidate edges are parked in `frontier`; the heap orders their slots by weight.
        let mut frontier: Vec<Edge<V>> = Vec::new();
        let mut heap: BinaryHeap<Reverse<(Weight, usize)>> = BinaryHeap::new();

        for root in roots {
            if info.is_visited(&root) {
                continue;
            }
            info.set_visited(&root);
            on_visit(&root)?;
            offer(graph, &root, &mut info, &mut frontier, &mut heap)?;

            while let Some(Reverse((_, slot))) = heap.pop() {
                let Some(edge) = frontier.get(slot).cloned() else {
                    continue;
                };
                let next = edge.destination();
                if info.is_visited(next) {
                    continue;
                }
                info.set_parent(next, edge.source());
                info.set_visited(next);
                on_visit(next)?;
                offer(graph, next, &mut info, &mut frontier, &mut heap)?;
                tree.push(edge);
            }
        }

        Ok(SpanningTree { info, edges: tree })
    }
}

fn offer<V, M, G>(
    graph: &G,
    from: &V,
    info: &mut VisitInfo<V>,
    frontier: &mut Vec<Edge<V>>,
    heap: &mut BinaryHeap<Reverse<(Weight, usize)>>,
) -> GraphResult<()>
where
    V: VertexValue,
    M: MarkerValue,
    G: Graph<V, M> + ?Sized,
{
    for edge in graph.edges_out(from)? {
        if info.is_visited(edge.destination()) {
            continue;
        }
        info.set_discovered(edge.destination());
        heap.push(Reverse((edge.weight(), frontier.len())));
        frontier.push(edge);
    }
    Ok(())
}
