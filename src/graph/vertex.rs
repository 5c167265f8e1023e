//! Vertex handle: a vertex value bound to the graph it lives in.

use std::collections::HashSet;
use std::marker::PhantomData;

use crate::types::{Edge, GraphError, GraphResult, MarkerValue, VertexValue, Weight};
use crate::visit::VisitStrategy;

use super::Graph;

/// Borrowing handle on one vertex of a graph.
///
/// The handle never assumes its vertex is still present: every call checks
/// `graph.contains(value)` first and fails with `Unsupported` once the vertex
/// has been removed, until it is added back (see [`Vertex::add_if_absent`]).
pub struct Vertex<'g, V, M, G: ?Sized> {
    graph: &'g mut G,
    value: V,
    _marker: PhantomData<fn() -> M>,
}

impl<'g, V, M, G> Vertex<'g, V, M, G>
where
    V: VertexValue,
    M: MarkerValue,
    G: Graph<V, M> + ?Sized,
{
    pub(crate) fn new(graph: &'g mut G, value: V) -> Self {
        Self {
            graph,
            value,
            _marker: PhantomData,
        }
    }

    /// The vertex value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Whether the vertex is still a member of its graph.
    pub fn is_still_contained(&self) -> bool {
        self.graph.contains(&self.value)
    }

    fn ensure_live(&self) -> GraphResult<()> {
        if self.is_still_contained() {
            Ok(())
        } else {
            Err(GraphError::Unsupported(format!(
                "vertex {:?} is no longer in its graph",
                self.value
            )))
        }
    }

    /// Put the vertex back into the graph if it was removed.
    pub fn add_if_absent(&mut self) -> bool {
        self.graph.add_if_absent(self.value.clone())
    }

    /// Remove the vertex from the graph.
    ///
    /// # Errors
    ///
    /// `Unsupported` if already removed.
    pub fn remove(&mut self) -> GraphResult<()> {
        self.ensure_live()?;
        self.graph.remove(&self.value)
    }

    /// Tag the vertex with `marker`.
    ///
    /// # Errors
    ///
    /// `Unsupported` if the vertex was removed.
    pub fn mark(&mut self, marker: &M) -> GraphResult<()> {
        self.ensure_live()?;
        self.graph.mark(&self.value, marker)
    }

    /// Remove `marker` from the vertex.
    ///
    /// # Errors
    ///
    /// `Unsupported` if the vertex was removed.
    pub fn unmark(&mut self, marker: &M) -> GraphResult<()> {
        self.ensure_live()?;
        self.graph.unmark(&self.value, marker)
    }

    /// Remove every marker from the vertex.
    ///
    /// # Errors
    ///
    /// `Unsupported` if the vertex was removed.
    pub fn unmark_all(&mut self) -> GraphResult<()> {
        self.ensure_live()?;
        self.graph.unmark_vertex(&self.value)
    }

    /// Markers on the vertex.
    ///
    /// # Errors
    ///
    /// `Unsupported` if the vertex was removed.
    pub fn marks(&self) -> GraphResult<HashSet<M>> {
        self.ensure_live()?;
        self.graph.marks_of(&self.value)
    }

    /// Destinations of the outgoing edges.
    ///
    /// # Errors
    ///
    /// `Unsupported` if the vertex was removed.
    pub fn children(&self) -> GraphResult<Vec<V>> {
        self.ensure_live()?;
        self.graph.children(&self.value)
    }

    /// Sources of the incoming edges.
    ///
    /// # Errors
    ///
    /// `Unsupported` if the vertex was removed.
    pub fn ancestors(&self) -> GraphResult<Vec<V>> {
        self.ensure_live()?;
        self.graph.ancestors(&self.value)
    }

    /// Outgoing edges.
    ///
    /// # Errors
    ///
    /// `Unsupported` if the vertex was removed.
    pub fn edges_out(&self) -> GraphResult<Vec<Edge<V>>> {
        self.ensure_live()?;
        self.graph.edges_out(&self.value)
    }

    /// Incoming edges.
    ///
    /// # Errors
    ///
    /// `Unsupported` if the vertex was removed.
    pub fn edges_in(&self) -> GraphResult<Vec<Edge<V>>> {
        self.ensure_live()?;
        self.graph.edges_in(&self.value)
    }

    /// Add or overwrite the edge to `child`.
    ///
    /// # Errors
    ///
    /// `Unsupported` if the vertex was removed, `VertexNotFound` if `child` is absent.
    pub fn add_child(&mut self, child: &V, weight: Weight) -> GraphResult<Option<Weight>> {
        self.ensure_live()?;
        self.graph.add_edge(&self.value, child, weight)
    }

    /// Remove the edge to `child`.
    ///
    /// # Errors
    ///
    /// `Unsupported` if the vertex was removed, `VertexNotFound` if `child` is absent.
    pub fn remove_child(&mut self, child: &V) -> GraphResult<Option<Weight>> {
        self.ensure_live()?;
        self.graph.remove_edge(&self.value, child)
    }

    /// Number of incoming edges.
    ///
    /// # Errors
    ///
    /// `Unsupported` if the vertex was removed.
    pub fn degree_in(&self) -> GraphResult<usize> {
        self.ensure_live()?;
        self.graph.degree_in(&self.value)
    }

    /// Number of outgoing edges.
    ///
    /// # Errors
    ///
    /// `Unsupported` if the vertex was removed.
    pub fn degree_out(&self) -> GraphResult<usize> {
        self.ensure_live()?;
        self.graph.degree_out(&self.value)
    }

    /// Run `strategy` from this vertex.
    ///
    /// # Errors
    ///
    /// `Unsupported` if the vertex was removed, plus whatever the strategy
    /// or `on_visit` return.
    pub fn visit<S, F>(&self, strategy: &S, mut on_visit: F) -> GraphResult<S::Output>
    where
        S: VisitStrategy<V>,
        F: FnMut(&V) -> GraphResult<()>,
    {
        self.ensure_live()?;
        strategy.visit::<M, G>(&*self.graph, Some(&self.value), &mut on_visit)
    }
}

impl<V: std::fmt::Debug, M, G: ?Sized> std::fmt::Debug for Vertex<'_, V, M, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Vertex").field(&self.value).finish()
    }
}
