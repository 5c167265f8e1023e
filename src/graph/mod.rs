//! In-memory graphs: the shared contract and its storage backends.

pub mod builder;
pub mod cache;
pub mod contract;
pub mod list_graph;
pub mod map_graph;
pub mod matrix_graph;
pub mod matrix_und_graph;
pub mod vertex;

pub use builder::GraphBuilder;
pub use cache::{AnalysisCache, GraphState};
pub use contract::Graph;
pub use list_graph::ListGraph;
pub use map_graph::MapGraph;
pub use matrix_graph::MatrixGraph;
pub use matrix_und_graph::MatrixUndGraph;
pub use vertex::Vertex;
