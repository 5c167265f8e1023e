//! Tarjan's strongly connected components, with topological order.

use std::collections::{HashMap, HashSet};

use log::trace;

use crate::graph::Graph;
use crate::types::{GraphResult, MarkerValue, VertexValue, VisitInfo};

use super::{OnVisit, VisitStrategy, Visited};

/// Iterative index/lowlink/stack SCC algorithm.
///
/// Whole-graph: the source argument is ignored. The topological order it
/// emits is only meaningful when every component is a single vertex.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tarjan;

/// Strongly connected components plus a topological order of the graph.
#[derive(Debug, Clone)]
pub struct Components<V> {
    info: VisitInfo<V>,
    components: Vec<HashSet<V>>,
    topological_order: Vec<V>,
}

impl<V: VertexValue> Components<V> {
    /// The components, a partition of all vertices.
    pub fn components(&self) -> &[HashSet<V>] {
        &self.components
    }

    /// Consume into the component list.
    pub fn into_components(self) -> Vec<HashSet<V>> {
        self.components
    }

    /// Vertices ordered so that every edge points forward. Valid only when acyclic.
    pub fn topological_order(&self) -> &[V] {
        &self.topological_order
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the graph had no vertices.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Whether every component is a single vertex.
    pub fn is_acyclic(&self) -> bool {
        self.components.len() == self.topological_order.len()
    }
}

impl<V> Visited<V> for Components<V> {
    fn info(&self) -> &VisitInfo<V> {
        &self.info
    }
}

impl<V: VertexValue> VisitStrategy<V> for Tarjan {
    type Output = Components<V>;

    fn visit<M, G>(
        &self,
        graph: &G,
        _source: Option<&V>,
        on_visit: OnVisit<'_, V>,
    ) -> GraphResult<Components<V>>
    where
        M: MarkerValue,
        G: Graph<V, M> + ?Sized,
    {
        strongly_connected(graph, on_visit)
    }
}

/// Run Tarjan over `graph`, generic in the callback's error so that the
/// graph's own cached analyses can run it with an infallible callback.
pub(crate) fn strongly_connected<V, M, G, E>(
    graph: &G,
    on_visit: &mut dyn FnMut(&V) -> Result<(), E>,
) -> Result<Components<V>, E>
where
    V: VertexValue,
    M: MarkerValue,
    G: Graph<V, M> + ?Sized,
{
    let vertices: Vec<V> = graph.vertices().into_iter().collect();
    let slot_of: HashMap<&V, usize> = vertices.iter().enumerate().map(|(i, v)| (v, i)).collect();
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); vertices.len()];
    for edge in graph.edges() {
        if let (Some(&from), Some(&to)) = (
            slot_of.get(edge.source()),
            slot_of.get(edge.destination()),
        ) {
            adjacency[from].push(to);
        }
    }
    trace!(
        "Tarjan over {} vertices, {} arcs",
        vertices.len(),
        adjacency.iter().map(Vec::len).sum::<usize>()
    );

    let n = vertices.len();
    let mut info = VisitInfo::new(None);
    let mut index: Vec<Option<usize>> = vec![None; n];
    let mut lowlink: Vec<usize> = vec![0; n];
    let mut on_stack: Vec<bool> = vec![false; n];
    let mut stack: Vec<usize> = Vec::new();
    let mut next_index = 0;
    let mut components: Vec<HashSet<V>> = Vec::new();
    let mut finished: Vec<usize> = Vec::with_capacity(n);

    for root in 0..n {
        if index[root].is_some() {
            continue;
        }
        index[root] = Some(next_index);
        lowlink[root] = next_index;
        next_index += 1;
        stack.push(root);
        on_stack[root] = true;
        info.set_discovered(&vertices[root]);

        // (vertex, position of the next neighbour to explore)
        let mut frames: Vec<(usize, usize)> = vec![(root, 0)];
        while let Some(frame) = frames.last_mut() {
            let v = frame.0;
            if let Some(&w) = adjacency[v].get(frame.1) {
                frame.1 += 1;
                match index[w] {
                    None => {
                        index[w] = Some(next_index);
                        lowlink[w] = next_index;
                        next_index += 1;
                        stack.push(w);
                        on_stack[w] = true;
                        info.set_discovered(&vertices[w]);
                        info.set_parent(&vertices[w], &vertices[v]);
                        frames.push((w, 0));
                    }
                    Some(w_index) if on_stack[w] => {
                        lowlink[v] = lowlink[v].min(w_index);
                    }
                    Some(_) => {}
                }
                continue;
            }

            frames.pop();
            if let Some(&(parent, _)) = frames.last() {
                lowlink[parent] = lowlink[parent].min(lowlink[v]);
            }
            if Some(lowlink[v]) == index[v] {
                let mut component = HashSet::new();
                while let Some(w) = stack.pop() {
                    on_stack[w] = false;
                    component.insert(vertices[w].clone());
                    finished.push(w);
                    if w == v {
                        break;
                    }
                }
                components.push(component);
            }
            info.set_visited(&vertices[v]);
            on_visit(&vertices[v])?;
        }
    }

    // Components pop sinks first, so the reverse is a topological order.
    let topological_order = finished
        .into_iter()
        .rev()
        .map(|i| vertices[i].clone())
        .collect();

    Ok(Components {
        info,
        components,
        topological_order,
    })
}
