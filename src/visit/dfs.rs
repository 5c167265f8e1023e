//! Depth-first search with an explicit stack.

use log::trace;

use crate::graph::Graph;
use crate::types::{GraphError, GraphResult, MarkerValue, VertexValue, VisitInfo};

use super::{OnVisit, VisitStrategy};

/// Iterative depth-first traversal.
///
/// A vertex is discovered on first sight and visited when the search
/// backtracks out of it (post-order). Without a source every vertex is
/// covered, yielding a DFS forest.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dfs;

impl<V: VertexValue> VisitStrategy<V> for Dfs {
    type Output = VisitInfo<V>;

    /// # Errors
    ///
    /// `VertexNotFound` if the source is absent.
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
        let roots: Vec<V> = match source {
            Some(s) if !graph.contains(s) => return Err(GraphError::not_found(s)),
            Some(s) => vec![s.clone()],
            None => graph.vertices().into_iter().collect(),
        };
        trace!("DFS over {} root(s)", roots.len());

        let mut info = VisitInfo::new(source.cloned());
        for root in roots {
            if !info.set_discovered(&root) {
                continue;
            }
            let mut stack = vec![(root.clone(), graph.children(&root)?.into_iter())];

            loop {
                let step = match stack.last_mut() {
                    None => break,
                    Some((vertex, children)) => children.next().map(|c| (vertex.clone(), c)),
                };
                match step {
                    Some((parent, child)) => {
                        if info.set_discovered(&child) {
                            info.set_parent(&child, &parent);
                            let grandchildren = graph.children(&child)?.into_iter();
                            stack.push((child, grandchildren));
                        }
                    }
                    None => {
                        if let Some((vertex, _)) = stack.pop() {
                            info.set_visited(&vertex);
                            on_visit(&vertex)?;
                        }
                    }
                }
            }
        }

        Ok(info)
    }
}
