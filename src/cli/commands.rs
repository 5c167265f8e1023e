//! CLI command implementations.
//!
//! Every command is generic over the backend and only talks to it through
//! the [`Graph`] contract, so the same code serves all of them.

use serde::Serialize;

use crate::graph::{Graph, GraphBuilder};
use crate::types::{path_weight, Edge, GraphError, GraphResult, VertexInfo, VisitInfo, Weight};
use crate::visit::{Bfs, Dfs, Dijkstra, MstAlgorithm, Tarjan, Visited};

/// Parse an edge argument of the form `source:destination[:weight]`.
/// The weight defaults to 1.
pub fn parse_edge(raw: &str) -> GraphResult<(String, String, Weight)> {
    let parts: Vec<&str> = raw.split(':').collect();
    let (source, destination, weight) = match parts.as_slice() {
        [s, d] => (*s, *d, 1),
        [s, d, w] => {
            let weight = w.trim().parse::<Weight>().map_err(|_| {
                GraphError::InvalidArgument(format!("invalid weight {:?} in edge {:?}", w, raw))
            })?;
            (*s, *d, weight)
        }
        _ => {
            return Err(GraphError::InvalidArgument(format!(
                "edge {:?} is not source:destination[:weight]",
                raw
            )))
        }
    };
    let (source, destination) = (source.trim(), destination.trim());
    if source.is_empty() || destination.is_empty() {
        return Err(GraphError::InvalidArgument(format!(
            "edge {:?} has an empty endpoint",
            raw
        )));
    }
    Ok((source.to_string(), destination.to_string(), weight))
}

/// Fill `graph` with the given vertices and `a:b:w` edges.
pub fn load<G: Graph<String, String>>(
    graph: G,
    vertices: &[String],
    edges: &[String],
) -> GraphResult<G> {
    let mut builder: GraphBuilder<String, String> = GraphBuilder::new();
    for vertex in vertices {
        builder.vertex(vertex.clone());
    }
    for raw in edges {
        let (source, destination, weight) = parse_edge(raw)?;
        builder.edge(source, destination, weight);
    }
    builder.build_into(graph)
}

fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_default()
    );
}

fn sorted(mut vertices: Vec<String>) -> Vec<String> {
    vertices.sort();
    vertices
}

#[derive(Serialize)]
struct Summary<'a> {
    backend: &'a str,
    directed: bool,
    vertices: usize,
    edges: usize,
    components: usize,
    cyclic: bool,
}

/// Display size and shape of the graph.
pub fn cmd_info<G: Graph<String, String>>(
    graph: &G,
    backend: &str,
    json: bool,
) -> GraphResult<()> {
    let summary = Summary {
        backend,
        directed: graph.is_directed(),
        vertices: graph.vertex_count(),
        edges: graph.edge_count(),
        components: graph.strongly_connected_components().len(),
        cyclic: graph.is_cyclic(),
    };

    if json {
        print_json(&summary);
    } else {
        println!("Backend: {}", summary.backend);
        println!("Directed: {}", summary.directed);
        println!("Vertices: {}", summary.vertices);
        println!("Edges: {}", summary.edges);
        println!("Components: {}", summary.components);
        println!("Cyclic: {}", summary.cyclic);
    }
    Ok(())
}

/// List the strongly connected components, largest first.
pub fn cmd_scc<G: Graph<String, String>>(graph: &G, json: bool) -> GraphResult<()> {
    let mut components: Vec<Vec<String>> = graph
        .strongly_connected_components()
        .into_iter()
        .map(|c| sorted(c.into_iter().collect()))
        .collect();
    components.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    if json {
        print_json(&components);
    } else {
        for (i, component) in components.iter().enumerate() {
            println!("[{}] {}", i, component.join(" "));
        }
        println!("\n{} components", components.len());
    }
    Ok(())
}

/// Print a topological order. Fails on a cyclic graph.
pub fn cmd_topo<G: Graph<String, String>>(graph: &G, json: bool) -> GraphResult<()> {
    let order = graph.topological_sort()?;
    if json {
        print_json(&order);
    } else {
        println!("{}", order.join(" "));
    }
    Ok(())
}

#[derive(Serialize)]
struct PathReport<'a> {
    source: &'a str,
    destination: &'a str,
    total_weight: Weight,
    edges: &'a [Edge<String>],
}

/// Shortest path between two vertices.
pub fn cmd_path<G: Graph<String, String>>(
    graph: &G,
    source: &str,
    destination: &str,
    json: bool,
) -> GraphResult<()> {
    let path = graph.distance_to(&source.to_string(), &destination.to_string())?;
    let report = PathReport {
        source,
        destination,
        total_weight: path_weight(&path),
        edges: &path,
    };

    if json {
        print_json(&report);
    } else {
        println!(
            "Shortest path {} -> {} (weight {}):",
            source, destination, report.total_weight
        );
        for edge in &path {
            println!("  {}", edge);
        }
    }
    Ok(())
}

fn run_strategy<G: Graph<String, String>>(
    graph: &G,
    strategy: &str,
    source: Option<&String>,
) -> GraphResult<VisitInfo<String>> {
    let mut noop = |_: &String| -> GraphResult<()> { Ok(()) };
    match strategy.to_lowercase().as_str() {
        "bfs" => graph.visit(source, &Bfs, &mut noop),
        "dfs" => graph.visit(source, &Dfs, &mut noop),
        "dijkstra" => Ok(graph.visit(source, &Dijkstra, &mut noop)?.info().clone()),
        "tarjan" => Ok(graph.visit(source, &Tarjan, &mut noop)?.info().clone()),
        other => Err(GraphError::InvalidArgument(format!(
            "unknown strategy {:?} (expected bfs, dfs, dijkstra or tarjan)",
            other
        ))),
    }
}

/// Run a traversal and print the vertices in visit order.
pub fn cmd_visit<G: Graph<String, String>>(
    graph: &G,
    strategy: &str,
    source: Option<&str>,
    json: bool,
) -> GraphResult<()> {
    let source = source.map(str::to_string);
    let info = run_strategy(graph, strategy, source.as_ref())?;
    let visited: Vec<VertexInfo<String>> = info
        .visited_order()
        .iter()
        .filter_map(|v| info.entry(v))
        .collect();

    if json {
        print_json(&visited);
    } else {
        for entry in &visited {
            match &entry.parent {
                Some(parent) => println!("{} (from {})", entry.vertex, parent),
                None => println!("{}", entry.vertex),
            }
        }
        println!("\n{} visited", visited.len());
    }
    Ok(())
}

/// Minimum spanning tree or forest of an undirected graph.
pub fn cmd_mst<G: Graph<String, String>>(
    graph: &G,
    algorithm: &str,
    json: bool,
) -> GraphResult<()> {
    let algorithm = MstAlgorithm::from_name(algorithm).ok_or_else(|| {
        GraphError::InvalidArgument(format!(
            "unknown algorithm {:?} (expected prim or kruskal)",
            algorithm
        ))
    })?;
    let edges = graph.minimum_spanning_tree(algorithm)?;
    let total = path_weight(&edges);

    if json {
        print_json(&serde_json::json!({
            "algorithm": format!("{:?}", algorithm).to_lowercase(),
            "total_weight": total,
            "edges": edges,
        }));
    } else {
        for edge in &edges {
            println!("  {}", edge);
        }
        println!("\n{} edges, total weight {}", edges.len(), total);
    }
    Ok(())
}
