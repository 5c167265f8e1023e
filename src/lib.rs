//! graphkit: in-memory graphs with interchangeable storage backends.
//!
//! Every backend (adjacency list, map of maps, dense matrix, packed
//! undirected matrix) implements one [`Graph`] contract. Analyses such as
//! strongly connected components, topological order and shortest paths are
//! computed lazily by pluggable visit strategies and cached per graph until
//! the next structural mutation.

pub mod cli;
pub mod collections;
pub mod graph;
pub mod index;
pub mod types;
pub mod visit;

// Re-export commonly used types at the crate root
pub use collections::UnionFind;
pub use graph::{
    Graph, GraphBuilder, GraphState, ListGraph, MapGraph, MatrixGraph, MatrixUndGraph, Vertex,
};
pub use index::MarkerIndex;
pub use types::{
    path_weight, Edge, GraphError, GraphResult, MarkerValue, VertexInfo, VertexValue, VisitInfo,
    Weight,
};
pub use visit::{
    Bfs, Components, Dfs, Dijkstra, Kruskal, MstAlgorithm, Prim, ShortestPaths, SpanningTree,
    Tarjan, VisitStrategy, Visited,
};
