//! Indexes kept alongside the graph storage.

pub mod marker_index;

pub use marker_index::MarkerIndex;
