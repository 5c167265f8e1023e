//! Visit strategies: graph algorithms sharing one bookkeeping protocol.
//!
//! Every strategy walks a [`Graph`] through its public contract, records
//! discovery/visit ticks and parents in a [`VisitInfo`], calls the visit
//! callback once per visited vertex and returns an algorithm-specific output.
//! Strategies hold no state between invocations.

pub mod bfs;
pub mod dfs;
pub mod dijkstra;
pub mod kruskal;
pub mod prim;
pub mod tarjan;

use crate::graph::Graph;
use crate::types::{GraphResult, MarkerValue, VertexValue, VisitInfo};

pub use bfs::Bfs;
pub use dfs::Dfs;
pub use dijkstra::{Dijkstra, ShortestPaths};
pub use kruskal::Kruskal;
pub use prim::{Prim, SpanningTree};
pub use tarjan::{Components, Tarjan};

/// Callback invoked once per vertex at visit time.
pub type OnVisit<'a, V> = &'a mut dyn FnMut(&V) -> GraphResult<()>;

/// The result of a traversal: always carries the traversal's [`VisitInfo`].
pub trait Visited<V> {
    /// Bookkeeping recorded during the traversal.
    fn info(&self) -> &VisitInfo<V>;
}

impl<V> Visited<V> for VisitInfo<V> {
    fn info(&self) -> &VisitInfo<V> {
        self
    }
}

/// A graph algorithm that can be driven through [`Graph::visit`].
pub trait VisitStrategy<V: VertexValue> {
    /// Algorithm-specific result.
    type Output: Visited<V>;

    /// Run the algorithm on `graph`.
    ///
    /// `on_visit` runs when a vertex is visited; an error it returns aborts
    /// the traversal and is returned unchanged.
    ///
    /// # Errors
    ///
    /// Whatever `on_visit` returns, plus the strategy's own preconditions
    /// (see each implementation).
    fn visit<M, G>(
        &self,
        graph: &G,
        source: Option<&V>,
        on_visit: OnVisit<'_, V>,
    ) -> GraphResult<Self::Output>
    where
        M: MarkerValue,
        G: Graph<V, M> + ?Sized;
}

/// Which algorithm builds a minimum spanning tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MstAlgorithm {
    /// Greedy frontier expansion.
    Prim,
    /// Sorted edges plus Union-Find.
    Kruskal,
}

impl MstAlgorithm {
    /// Parse an algorithm from its name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "prim" => Some(Self::Prim),
            "kruskal" => Some(Self::Kruskal),
            _ => None,
        }
    }
}
