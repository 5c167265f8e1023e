//! Error types for the graphkit library.

use thiserror::Error;

/// All errors that can occur in the graphkit library.
#[derive(Error, Debug)]
pub enum GraphError {
    /// A required argument was absent.
    #[error("Required argument missing: {0}")]
    NullReference(&'static str),

    /// Vertex is not a member of the graph.
    #[error("Vertex {0} not found")]
    VertexNotFound(String),

    /// The operation is well-formed but does not apply to the current state.
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// An argument is not acceptable for the structure it was passed to.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A visit callback aborted the traversal with its own error.
    #[error("Visit aborted: {0}")]
    Callback(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl GraphError {
    /// Build a `VertexNotFound` error from any debuggable vertex value.
    pub fn not_found<V: std::fmt::Debug + ?Sized>(vertex: &V) -> Self {
        Self::VertexNotFound(format!("{:?}", vertex))
    }

    /// Wrap a caller error raised inside a visit callback.
    pub fn callback<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Callback(err.into())
    }
}

/// Convenience result type for graphkit operations.
pub type GraphResult<T> = Result<T, GraphError>;
