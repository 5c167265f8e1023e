//! All data types for the graphkit library.

pub mod edge;
pub mod error;
pub mod visit_info;

use std::fmt::Debug;
use std::hash::Hash;

pub use edge::{path_weight, Edge};
pub use error::{GraphError, GraphResult};
pub use visit_info::{VertexInfo, VisitInfo};

/// Edge weight. Any value is storable; Dijkstra requires non-negative weights.
///
/// Path totals saturate at `i64::MAX`, so paths whose true totals both exceed
/// it compare equal and either may be reported as the shortest.
pub type Weight = i64;

/// Bound for values usable as vertices.
pub trait VertexValue: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> VertexValue for T {}

/// Bound for values usable as markers.
pub trait MarkerValue: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> MarkerValue for T {}
