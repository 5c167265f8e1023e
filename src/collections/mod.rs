//! Support data structures used by the graph algorithms.

pub mod union_find;

pub use union_find::UnionFind;
