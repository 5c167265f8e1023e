//! The graph contract every storage backend implements.
//!
//! Backends supply storage primitives; everything derived from them
//! (degrees, markers, subgraphs, transposition, cached analyses, visits)
//! is written once here as provided methods.

use std::collections::{HashMap, HashSet, VecDeque};
use std::convert::Infallible;

use crate::types::{Edge, GraphError, GraphResult, MarkerValue, VertexValue, Weight};
use crate::visit::tarjan::strongly_connected;
use crate::visit::{
    Components, Dijkstra, Kruskal, MstAlgorithm, Prim, ShortestPaths, VisitStrategy,
};

use super::cache::GraphState;
use super::vertex::Vertex;

/// Mutation, query and analysis surface shared by all backends.
///
/// # Invariants
///
/// - Every method that changes vertices, edges or weights clears the cached
///   analyses (through [`GraphState::invalidate`]) before returning.
/// - Marker changes never touch the cache.
/// - Missing edges are reported as `None`, never as an error; a missing
///   vertex is always `VertexNotFound`.
pub trait Graph<V: VertexValue, M: MarkerValue> {
    // ==================== Storage primitives ====================

    /// Whether `(a, b)` and `(b, a)` are distinct edges.
    fn is_directed(&self) -> bool;

    /// A new, empty graph with the same backend.
    fn empty_like(&self) -> Self
    where
        Self: Sized;

    /// Marker index and analysis cache.
    fn state(&self) -> &GraphState<V, M>;

    /// Mutable marker index and analysis cache.
    fn state_mut(&mut self) -> &mut GraphState<V, M>;

    /// Whether `vertex` is a member of the graph.
    fn contains(&self, vertex: &V) -> bool;

    /// Every vertex.
    fn vertices(&self) -> HashSet<V>;

    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// Number of edges. An undirected edge counts once.
    fn edge_count(&self) -> usize;

    /// Insert `vertex`. If it is already present it is replaced: it keeps its
    /// place but loses every incident edge and every mark.
    fn add(&mut self, vertex: V);

    /// Insert `vertex` only if missing. Returns whether it was inserted.
    fn add_if_absent(&mut self, vertex: V) -> bool;

    /// Remove `vertex`, its incident edges and its marks.
    ///
    /// # Errors
    ///
    /// `VertexNotFound` if absent.
    fn remove(&mut self, vertex: &V) -> GraphResult<()>;

    /// Remove every vertex, edge and mark.
    fn remove_all(&mut self);

    /// Insert or overwrite the edge `source -> destination`.
    /// Returns the previous weight, if there was an edge.
    ///
    /// # Errors
    ///
    /// `VertexNotFound` if either endpoint is absent.
    fn add_edge(&mut self, source: &V, destination: &V, weight: Weight)
        -> GraphResult<Option<Weight>>;

    /// Weight of `source -> destination`, `None` if there is no such edge.
    ///
    /// # Errors
    ///
    /// `VertexNotFound` if either endpoint is absent.
    fn weight(&self, source: &V, destination: &V) -> GraphResult<Option<Weight>>;

    /// Remove `source -> destination`. Returns the removed weight.
    ///
    /// # Errors
    ///
    /// `VertexNotFound` if either endpoint is absent.
    fn remove_edge(&mut self, source: &V, destination: &V) -> GraphResult<Option<Weight>>;

    /// Remove every edge leaving `vertex`.
    ///
    /// # Errors
    ///
    /// `VertexNotFound` if absent.
    fn remove_all_out_edges(&mut self, vertex: &V) -> GraphResult<()>;

    /// Remove every edge entering `vertex`.
    ///
    /// # Errors
    ///
    /// `VertexNotFound` if absent.
    fn remove_all_in_edges(&mut self, vertex: &V) -> GraphResult<()>;

    /// Remove every edge, keeping all vertices.
    fn remove_all_edges(&mut self);

    /// Every edge. Undirected graphs report both orientations of each edge.
    fn edges(&self) -> Vec<Edge<V>>;

    /// Edges leaving `vertex`.
    ///
    /// # Errors
    ///
    /// `VertexNotFound` if absent.
    fn edges_out(&self, vertex: &V) -> GraphResult<Vec<Edge<V>>>;

    /// Edges entering `vertex`.
    ///
    /// # Errors
    ///
    /// `VertexNotFound` if absent.
    fn edges_in(&self, vertex: &V) -> GraphResult<Vec<Edge<V>>>;

    // ==================== Derived queries ====================

    /// Insert every vertex of `vertices` that is not yet present.
    fn add_all<I>(&mut self, vertices: I)
    where
        I: IntoIterator<Item = V>,
        Self: Sized,
    {
        for vertex in vertices {
            self.add_if_absent(vertex);
        }
    }

    /// Whether the edge `source -> destination` exists.
    ///
    /// # Errors
    ///
    /// `VertexNotFound` if either endpoint is absent.
    fn contains_edge(&self, source: &V, destination: &V) -> GraphResult<bool> {
        Ok(self.weight(source, destination)?.is_some())
    }

    /// Remove every edge touching `vertex`, keeping the vertex.
    ///
    /// # Errors
    ///
    /// `VertexNotFound` if absent.
    fn remove_all_edges_of(&mut self, vertex: &V) -> GraphResult<()> {
        self.remove_all_out_edges(vertex)?;
        self.remove_all_in_edges(vertex)
    }

    /// Destinations of the edges leaving `vertex`.
    ///
    /// # Errors
    ///
    /// `VertexNotFound` if absent.
    fn children(&self, vertex: &V) -> GraphResult<Vec<V>> {
        Ok(self
            .edges_out(vertex)?
            .into_iter()
            .map(|e| e.into_parts().1)
            .collect())
    }

    /// Sources of the edges entering `vertex`.
    ///
    /// # Errors
    ///
    /// `VertexNotFound` if absent.
    fn ancestors(&self, vertex: &V) -> GraphResult<Vec<V>> {
        Ok(self
            .edges_in(vertex)?
            .into_iter()
            .map(|e| e.into_parts().0)
            .collect())
    }

    /// Number of edges entering `vertex`.
    ///
    /// # Errors
    ///
    /// `VertexNotFound` if absent.
    fn degree_in(&self, vertex: &V) -> GraphResult<usize> {
        Ok(self.edges_in(vertex)?.len())
    }

    /// Number of edges leaving `vertex`.
    ///
    /// # Errors
    ///
    /// `VertexNotFound` if absent.
    fn degree_out(&self, vertex: &V) -> GraphResult<usize> {
        Ok(self.edges_out(vertex)?.len())
    }

    /// Number of edges touching `vertex`.
    ///
    /// # Errors
    ///
    /// `VertexNotFound` if absent.
    fn degree(&self, vertex: &V) -> GraphResult<usize> {
        if self.is_directed() {
            Ok(self.degree_in(vertex)? + self.degree_out(vertex)?)
        } else {
            self.degree_out(vertex)
        }
    }

    /// Handle bound to `vertex` that re-checks membership on every call.
    ///
    /// # Errors
    ///
    /// `VertexNotFound` if absent.
    fn vertex(&mut self, vertex: &V) -> GraphResult<Vertex<'_, V, M, Self>> {
        if !self.contains(vertex) {
            return Err(GraphError::not_found(vertex));
        }
        Ok(Vertex::new(self, vertex.clone()))
    }

    // ==================== Markers ====================

    /// Tag `vertex` with `marker`.
    ///
    /// # Errors
    ///
    /// `VertexNotFound` if absent.
    fn mark(&mut self, vertex: &V, marker: &M) -> GraphResult<()> {
        self.ensure_contains(vertex)?;
        self.state_mut().markers_mut().mark(vertex, marker);
        Ok(())
    }

    /// Remove `marker` from `vertex`. No-op if it was not marked.
    ///
    /// # Errors
    ///
    /// `VertexNotFound` if absent.
    fn unmark(&mut self, vertex: &V, marker: &M) -> GraphResult<()> {
        self.ensure_contains(vertex)?;
        self.state_mut().markers_mut().unmark(vertex, marker);
        Ok(())
    }

    /// Remove every marker from `vertex`.
    ///
    /// # Errors
    ///
    /// `VertexNotFound` if absent.
    fn unmark_vertex(&mut self, vertex: &V) -> GraphResult<()> {
        self.ensure_contains(vertex)?;
        self.state_mut().markers_mut().unmark_vertex(vertex);
        Ok(())
    }

    /// Remove every marker from every vertex.
    fn unmark_all(&mut self) {
        self.state_mut().markers_mut().clear();
    }

    /// Remove `marker` from every vertex carrying it.
    fn unmark_all_with(&mut self, marker: &M) {
        self.state_mut().markers_mut().unmark_all_with(marker);
    }

    /// Markers carried by `vertex`.
    ///
    /// # Errors
    ///
    /// `VertexNotFound` if absent.
    fn marks_of(&self, vertex: &V) -> GraphResult<HashSet<M>> {
        self.ensure_contains(vertex)?;
        Ok(self.state().markers().marks_of(vertex))
    }

    /// Vertices carrying `marker`. Empty for an unknown marker.
    fn marked_with(&self, marker: &M) -> HashSet<V> {
        self.state().markers().marked_with(marker)
    }

    /// Every marker in use.
    fn markers(&self) -> HashSet<M> {
        self.state().markers().markers()
    }

    /// `Ok` if `vertex` is a member, `VertexNotFound` otherwise.
    ///
    /// # Errors
    ///
    /// `VertexNotFound` if absent.
    fn ensure_contains(&self, vertex: &V) -> GraphResult<()> {
        if self.contains(vertex) {
            Ok(())
        } else {
            Err(GraphError::not_found(vertex))
        }
    }

    // ==================== Derived graphs ====================

    /// Induced subgraph of the vertices reachable from `source` in at most
    /// `depth` hops along outgoing edges. Depth 0 keeps only `source`.
    ///
    /// # Errors
    ///
    /// `VertexNotFound` if `source` is absent.
    fn sub_graph(&self, source: &V, depth: usize) -> GraphResult<Self>
    where
        Self: Sized,
    {
        self.ensure_contains(source)?;
        let mut kept: HashSet<V> = HashSet::from([source.clone()]);
        let mut frontier: VecDeque<(V, usize)> = VecDeque::from([(source.clone(), 0)]);
        while let Some((current, hops)) = frontier.pop_front() {
            if hops >= depth {
                continue;
            }
            for child in self.children(&current)? {
                if kept.insert(child.clone()) {
                    frontier.push_back((child, hops + 1));
                }
            }
        }
        induced(self, &kept)
    }

    /// Induced subgraph of the vertices carrying any of `markers`.
    /// With no markers, selects the vertices that carry no marker at all.
    ///
    /// # Errors
    ///
    /// Never in practice; the signature follows the other derived graphs.
    fn sub_graph_marked(&self, markers: &[M]) -> GraphResult<Self>
    where
        Self: Sized,
    {
        let index = self.state().markers();
        let kept: HashSet<V> = if markers.is_empty() {
            self.vertices()
                .into_iter()
                .filter(|v| !index.is_marked(v))
                .collect()
        } else {
            markers.iter().flat_map(|m| index.marked_with(m)).collect()
        };
        induced(self, &kept)
    }

    /// Same vertices and marks, every edge reversed with its weight.
    ///
    /// # Errors
    ///
    /// Never in practice; the signature follows the other derived graphs.
    fn transpose(&self) -> GraphResult<Self>
    where
        Self: Sized,
    {
        let mut transposed = self.empty_like();
        transposed.add_all(self.vertices());
        for edge in self.edges() {
            let (source, destination, weight) = edge.into_parts();
            transposed.add_edge(&destination, &source, weight)?;
        }
        copy_marks(self, &mut transposed, &self.vertices())?;
        Ok(transposed)
    }

    // ==================== Cached analyses ====================

    /// Strongly connected components with a topological order, from the cache.
    fn components(&self) -> Components<V> {
        self.state().cache().components_or_insert_with(|| {
            match strongly_connected::<V, M, Self, Infallible>(self, &mut |_: &V| Ok::<(), Infallible>(())) {
                Ok(components) => components,
                Err(never) => match never {},
            }
        })
    }

    /// Partition of the vertices into strongly connected components.
    ///
    /// Undirected backends store every edge in both orientations, so the
    /// components are exactly their connected components.
    fn strongly_connected_components(&self) -> Vec<HashSet<V>> {
        self.components().into_components()
    }

    /// Whether the graph has a cycle, i.e. fewer components than vertices.
    ///
    /// Self-loops leave the component count unchanged and are not reported.
    fn is_cyclic(&self) -> bool {
        self.components().len() != self.vertex_count()
    }

    /// Negation of [`Graph::is_cyclic`].
    fn is_dag(&self) -> bool {
        !self.is_cyclic()
    }

    /// Vertices ordered so that for every edge `u -> v`, `u` comes first.
    ///
    /// # Errors
    ///
    /// `Unsupported` if the graph is cyclic.
    fn topological_sort(&self) -> GraphResult<Vec<V>> {
        let components = self.components();
        if components.len() != self.vertex_count() {
            return Err(GraphError::Unsupported(
                "topological sort of a cyclic graph".to_string(),
            ));
        }
        Ok(components.topological_order().to_vec())
    }

    /// Shortest-path tree from `source`, from the cache.
    ///
    /// Weights must be non-negative; negative weights give wrong paths
    /// without an error.
    ///
    /// # Errors
    ///
    /// `VertexNotFound` if `source` is absent.
    fn shortest_paths(&self, source: &V) -> GraphResult<ShortestPaths<V>> {
        self.ensure_contains(source)?;
        self.state()
            .cache()
            .shortest_paths_or_try_insert_with(source, || {
                Dijkstra.visit::<M, Self>(self, Some(source), &mut |_: &V| -> GraphResult<()> { Ok(()) })
            })
    }

    /// Edge path from `source` to every reachable vertex (`source` maps to
    /// an empty path). Same non-negative weight precondition as
    /// [`Graph::shortest_paths`].
    ///
    /// # Errors
    ///
    /// `VertexNotFound` if `source` is absent.
    fn distance(&self, source: &V) -> GraphResult<HashMap<V, Vec<Edge<V>>>> {
        Ok(self.shortest_paths(source)?.into_paths())
    }

    /// Edge path from `source` to `destination`.
    ///
    /// # Errors
    ///
    /// `VertexNotFound` if either is absent, `Unsupported` if
    /// `destination` is unreachable.
    fn distance_to(&self, source: &V, destination: &V) -> GraphResult<Vec<Edge<V>>> {
        self.ensure_contains(source)?;
        self.ensure_contains(destination)?;
        self.distance(source)?.remove(destination).ok_or_else(|| {
            GraphError::Unsupported(format!(
                "{:?} is not reachable from {:?}",
                destination, source
            ))
        })
    }

    /// Minimum spanning tree (or forest) edges.
    ///
    /// # Errors
    ///
    /// `Unsupported` on a directed graph.
    fn minimum_spanning_tree(&self, algorithm: MstAlgorithm) -> GraphResult<Vec<Edge<V>>> {
        let mut noop = |_: &V| -> GraphResult<()> { Ok(()) };
        let tree = match algorithm {
            MstAlgorithm::Prim => Prim.visit::<M, Self>(self, None, &mut noop)?,
            MstAlgorithm::Kruskal => Kruskal.visit::<M, Self>(self, None, &mut noop)?,
        };
        Ok(tree.into_edges())
    }

    /// Run `strategy` from `source`, calling `on_visit` for each visited vertex.
    ///
    /// An error returned by `on_visit` stops the traversal and is returned
    /// unchanged.
    ///
    /// # Errors
    ///
    /// `VertexNotFound` if `source` is given but absent, the strategy's own
    /// errors, and whatever `on_visit` returns.
    fn visit<S, F>(&self, source: Option<&V>, strategy: &S, mut on_visit: F) -> GraphResult<S::Output>
    where
        S: VisitStrategy<V>,
        F: FnMut(&V) -> GraphResult<()>,
    {
        if let Some(source) = source {
            self.ensure_contains(source)?;
        }
        strategy.visit::<M, Self>(self, source, &mut on_visit)
    }
}

/// Copy of `graph` restricted to `kept`: vertices, edges with both endpoints
/// kept, and the kept vertices' marks.
fn induced<V, M, G>(graph: &G, kept: &HashSet<V>) -> GraphResult<G>
where
    V: VertexValue,
    M: MarkerValue,
    G: Graph<V, M>,
{
    let mut result = graph.empty_like();
    result.add_all(kept.iter().cloned());
    for edge in graph.edges() {
        if kept.contains(edge.source()) && kept.contains(edge.destination()) {
            result.add_edge(edge.source(), edge.destination(), edge.weight())?;
        }
    }
    copy_marks(graph, &mut result, kept)?;
    Ok(result)
}

fn copy_marks<V, M, G>(from: &G, to: &mut G, vertices: &HashSet<V>) -> GraphResult<()>
where
    V: VertexValue,
    M: MarkerValue,
    G: Graph<V, M>,
{
    for vertex in vertices {
        for marker in from.state().markers().marks_of(vertex) {
            to.mark(vertex, &marker)?;
        }
    }
    Ok(())
}
