//! CLI entry point for the `gk` command-line tool.

use std::process;

use clap::{Parser, Subcommand};

use graphkit::cli::commands;
use graphkit::graph::{Graph, ListGraph, MapGraph, MatrixGraph, MatrixUndGraph};
use graphkit::{GraphError, GraphResult};

#[derive(Parser)]
#[command(
    name = "gk",
    about = "graphkit CLI: build a graph from the command line and analyse it"
)]
struct Cli {
    /// Storage backend: list, map, matrix or matrix-und (undirected)
    #[arg(long, default_value = "list")]
    backend: String,

    /// Edge as source:destination[:weight], weight defaults to 1 (repeatable)
    #[arg(long = "edge", short = 'e')]
    edges: Vec<String>,

    /// Extra vertex with no edges (repeatable)
    #[arg(long = "vertex")]
    vertices: Vec<String>,

    /// Output format: "text" (default) or "json"
    #[arg(long, default_value = "text")]
    format: String,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Vertex and edge counts, component count and cyclicity
    Info,
    /// Strongly connected components
    Scc,
    /// Topological order of a DAG
    Topo,
    /// Shortest path between two vertices
    Path {
        /// Start vertex
        source: String,
        /// End vertex
        destination: String,
    },
    /// Run a traversal and list the vertices in visit order
    Visit {
        /// Strategy: bfs, dfs, dijkstra or tarjan
        strategy: String,
        /// Start vertex (dfs and tarjan accept none)
        #[arg(long)]
        from: Option<String>,
    },
    /// Minimum spanning tree (undirected backend only)
    Mst {
        /// Algorithm: prim or kruskal
        #[arg(long, default_value = "kruskal")]
        algorithm: String,
    },
}

fn run<G: Graph<String, String>>(graph: G, cli: &Cli) -> GraphResult<()> {
    let graph = commands::load(graph, &cli.vertices, &cli.edges)?;
    let json = cli.format == "json";

    match &cli.command {
        Commands::Info => commands::cmd_info(&graph, &cli.backend, json),
        Commands::Scc => commands::cmd_scc(&graph, json),
        Commands::Topo => commands::cmd_topo(&graph, json),
        Commands::Path {
            source,
            destination,
        } => commands::cmd_path(&graph, source, destination, json),
        Commands::Visit { strategy, from } => {
            commands::cmd_visit(&graph, strategy, from.as_deref(), json)
        }
        Commands::Mst { algorithm } => commands::cmd_mst(&graph, algorithm, json),
    }
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::init();
    }

    let result = match cli.backend.as_str() {
        "list" => run(ListGraph::<String, String>::new(), &cli),
        "map" => run(MapGraph::<String, String>::new(), &cli),
        "matrix" => run(MatrixGraph::<String, String>::new(), &cli),
        "matrix-und" => run(MatrixUndGraph::<String, String>::new(), &cli),
        other => {
            eprintln!("Invalid backend: {}", other);
            process::exit(3);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let code = match &e {
            GraphError::NullReference(_) | GraphError::InvalidArgument(_) => 3,
            GraphError::VertexNotFound(_) => 4,
            GraphError::Unsupported(_) => 5,
            GraphError::Callback(_) => 1,
        };
        process::exit(code);
    }
}
