//! Breadth-first search.

use std::collections::VecDeque;

use log::trace;

use crate::graph::Graph;
use crate::types::{GraphError, GraphResult, MarkerValue, VertexValue, VisitInfo};

use super::{OnVisit, VisitStrategy};

/// Queue-based traversal from a source vertex.
///
/// A vertex is discovered when enqueued and visited when dequeued.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bfs;

impl<V: VertexValue> VisitStrategy<V> for Bfs {
    type Output = VisitInfo<V>;

    /// # Errors
    ///
    /// `Unsupported` without a source, `VertexNotFound` if the source is absent.
    fn visit<M, G>(
        &self,
        graph: &G,
        source: Option<&V>,
        on_visit: OnVisit<'_, V>,
    ) -> GraphResult<VisitInfo<V>>
    where
        M: MarkerValue,
        G: Graph<V, M> + ?Sized,
    {
        let source = source.ok_or_else(|| {
            GraphError::Unsupported("breadth-first search needs a source vertex".to_string())
        })?;
        if !graph.contains(source) {
            return Err(GraphError::not_found(source));
        }
        trace!("BFS from {:?}", source);

        let mut info = VisitInfo::new(Some(source.clone()));
        let mut queue: VecDeque<V> = VecDeque::new();
        info.set_discovered(source);
        queue.push_back(source.clone());

        while let Some(current) = queue.pop_front() {
            info.set_visited(&current);
            on_visit(&current)?;

            for child in graph.children(&current)? {
                if info.set_discovered(&child) {
                    info.set_parent(&child, &current);
                    queue.push_back(child);
                }
            }
        }

        Ok(info)
    }
}
