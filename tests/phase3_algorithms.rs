//! Phase 3 tests: visit strategies and the analyses built on them.

use std::collections::{HashMap, HashSet};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use graphkit::graph::{Graph, GraphBuilder, ListGraph, MapGraph, MatrixGraph, MatrixUndGraph};
use graphkit::types::{path_weight, Edge, GraphError, Weight};
use graphkit::visit::{Bfs, Dfs, Dijkstra, Kruskal, MstAlgorithm, Prim, Tarjan, Visited};

fn build<G: Graph<u32, String> + Default>(edges: &[(u32, u32, Weight)]) -> G {
    let mut builder: GraphBuilder<u32, String> = GraphBuilder::new();
    for &(s, d, w) in edges {
        builder.edge(s, d, w);
    }
    builder.build_into(G::default()).unwrap()
}

fn component_set(components: Vec<HashSet<u32>>) -> HashSet<Vec<u32>> {
    components
        .into_iter()
        .map(|c| {
            let mut members: Vec<u32> = c.into_iter().collect();
            members.sort();
            members
        })
        .collect()
}

fn positions(order: &[u32]) -> HashMap<u32, usize> {
    order.iter().enumerate().map(|(i, v)| (*v, i)).collect()
}

fn noop(_: &u32) -> graphkit::GraphResult<()> {
    Ok(())
}

const CYCLIC_SIX: &[(u32, u32, Weight)] = &[
    (1, 2, 1),
    (1, 3, 1),
    (2, 5, 4),
    (5, 3, 6),
    (5, 4, 3),
    (4, 6, 5),
    (6, 2, 2),
];

const WEIGHTED_DAG: &[(u32, u32, Weight)] = &[
    (1, 2, 1),
    (1, 3, 10),
    (2, 5, 4),
    (5, 3, 3),
    (5, 4, 3),
    (4, 6, 5),
];

/// Undirected graph with a known minimum spanning tree weight of 37.
const WEIGHTED_UNDIRECTED: &[(u32, u32, Weight)] = &[
    (0, 1, 4),
    (0, 7, 8),
    (1, 2, 8),
    (1, 7, 11),
    (2, 3, 7),
    (2, 5, 4),
    (2, 8, 2),
    (3, 4, 9),
    (3, 5, 14),
    (4, 5, 10),
    (5, 6, 2),
    (6, 7, 1),
    (6, 8, 6),
    (7, 8, 7),
];

// ==================== Shared Algorithm Checks ====================

fn check_scc_cyclic<G: Graph<u32, String> + Default>() {
    let g: G = build(CYCLIC_SIX);
    assert!(g.is_cyclic());
    assert!(!g.is_dag());
    assert_eq!(
        component_set(g.strongly_connected_components()),
        HashSet::from([vec![2, 4, 5, 6], vec![1], vec![3]])
    );
    assert!(matches!(
        g.topological_sort(),
        Err(GraphError::Unsupported(_))
    ));
}

fn check_topological_order<G: Graph<u32, String> + Default>() {
    let acyclic: Vec<_> = CYCLIC_SIX
        .iter()
        .copied()
        .filter(|&(s, d, _)| (s, d) != (6, 2))
        .collect();
    let g: G = build(&acyclic);
    assert!(g.is_dag());
    assert_eq!(g.strongly_connected_components().len(), 6);

    let order = g.topological_sort().unwrap();
    assert_eq!(order.len(), 6);
    let at = positions(&order);
    for &(s, d, _) in &acyclic {
        assert!(at[&s] < at[&d], "{} should precede {} in {:?}", s, d, order);
    }
    assert_eq!(order[0], 1);
}

fn check_shortest_paths<G: Graph<u32, String> + Default>() {
    let mut g: G = build(WEIGHTED_DAG);
    g.add(7);

    let path = g.distance_to(&1, &3).unwrap();
    assert_eq!(
        path,
        vec![Edge::new(1, 2, 1), Edge::new(2, 5, 4), Edge::new(5, 3, 3)]
    );
    assert_eq!(path_weight(&path), 8);

    let all = g.distance(&1).unwrap();
    assert!(all[&1].is_empty());
    assert_eq!(path_weight(&all[&4]), 8);
    assert_eq!(path_weight(&all[&6]), 13);
    assert!(!all.contains_key(&7));
    assert_eq!(all.len(), 6);

    let tree = g.shortest_paths(&1).unwrap();
    assert_eq!(tree.distance_to(&6), Some(13));
    assert!(!tree.is_reachable(&7));
    assert_eq!(tree.info().parent(&3), Some(&5));
    assert_eq!(tree.info().path_to(&3), vec![1, 2, 5, 3]);

    assert!(matches!(
        g.distance_to(&1, &7),
        Err(GraphError::Unsupported(_))
    ));
    assert!(matches!(
        g.distance_to(&1, &99),
        Err(GraphError::VertexNotFound(_))
    ));
    assert!(matches!(
        g.distance(&99),
        Err(GraphError::VertexNotFound(_))
    ));
}

fn check_zero_weight_shortest_path<G: Graph<u32, String> + Default>() {
    let g: G = build(&[(1, 2, 0), (2, 3, 0), (1, 3, 1)]);
    let path = g.distance_to(&1, &3).unwrap();
    assert_eq!(path_weight(&path), 0);
    assert_eq!(path.len(), 2);
}

fn check_bfs<G: Graph<u32, String> + Default>() {
    let mut g: G = build(&[(1, 2, 1), (1, 3, 1), (2, 4, 1), (3, 4, 1), (4, 5, 1)]);
    g.add(6);

    let mut visited = Vec::new();
    let info = g
        .visit(Some(&1), &Bfs, |v| {
            visited.push(*v);
            Ok(())
        })
        .unwrap();

    assert_eq!(visited.len(), 5);
    assert_eq!(visited[0], 1);
    assert_eq!(visited[4], 5);
    assert_eq!(info.visited_order(), visited);
    assert_eq!(info.source(), Some(&1));
    assert!(!info.is_discovered(&6));
    assert_eq!(info.parent(&1), None);
    assert_eq!(info.parent(&5), Some(&4));
    assert!(matches!(info.parent(&4), Some(&2) | Some(&3)));

    for v in &visited {
        assert!(info.discovery_time(v).unwrap() < info.visit_time(v).unwrap());
    }
}

fn check_dfs<G: Graph<u32, String> + Default>() {
    let mut g: G = build(&[(1, 2, 1), (2, 3, 1), (3, 4, 1)]);
    g.add(9);

    let info = g.visit(Some(&1), &Dfs, noop).unwrap();
    assert_eq!(info.visited_order(), vec![4, 3, 2, 1]);
    assert_eq!(info.discovered_order(), vec![1, 2, 3, 4]);
    assert_eq!(info.path_to(&4), vec![1, 2, 3, 4]);
    assert!(!info.is_discovered(&9));

    let forest = g.visit(None, &Dfs, noop).unwrap();
    assert_eq!(forest.source(), None);
    let covered: HashSet<u32> = forest.visited_order().into_iter().collect();
    assert_eq!(covered, g.vertices());
    assert_eq!(forest.visited_order().len(), 5);
}

fn check_tarjan_visit<G: Graph<u32, String> + Default>() {
    let g: G = build(CYCLIC_SIX);
    let mut calls = 0;
    let result = g
        .visit(None, &Tarjan, |_| {
            calls += 1;
            Ok(())
        })
        .unwrap();
    assert_eq!(calls, 6);
    assert_eq!(result.len(), 3);
    assert!(!result.is_acyclic());
    assert_eq!(result.info().visited_order().len(), 6);
}

fn check_callback_abort<G: Graph<u32, String> + Default>() {
    let g: G = build(&[(1, 2, 1), (2, 3, 1), (3, 4, 1), (4, 5, 1)]);

    let mut seen = 0;
    let err = g
        .visit(Some(&1), &Bfs, |_| {
            seen += 1;
            if seen == 2 {
                Err(GraphError::callback("enough"))
            } else {
                Ok(())
            }
        })
        .unwrap_err();
    assert_eq!(seen, 2);
    assert!(matches!(err, GraphError::Callback(_)));
    assert_eq!(err.to_string(), "Visit aborted: enough");

    // A GraphError raised by the callback comes back unchanged.
    let err = g
        .visit(Some(&1), &Dijkstra, |v| {
            if *v == 3 {
                Err(GraphError::InvalidArgument("three".to_string()))
            } else {
                Ok(())
            }
        })
        .unwrap_err();
    assert!(matches!(err, GraphError::InvalidArgument(ref m) if m == "three"));
}

fn check_strategy_preconditions<G: Graph<u32, String> + Default>() {
    let g: G = build(WEIGHTED_DAG);
    assert!(matches!(
        g.visit(None, &Bfs, noop),
        Err(GraphError::Unsupported(_))
    ));
    assert!(matches!(
        g.visit(None, &Dijkstra, noop),
        Err(GraphError::NullReference(_))
    ));
    assert!(matches!(
        g.visit(Some(&42), &Dfs, noop),
        Err(GraphError::VertexNotFound(_))
    ));
    assert!(matches!(
        g.visit(Some(&1), &Prim, noop),
        Err(GraphError::Unsupported(_))
    ));
    assert!(matches!(
        g.visit(None, &Kruskal, noop),
        Err(GraphError::Unsupported(_))
    ));
    assert!(matches!(
        g.minimum_spanning_tree(MstAlgorithm::Prim),
        Err(GraphError::Unsupported(_))
    ));
}

fn check_self_loop_is_not_a_cycle<G: Graph<u32, String> + Default>() {
    let g: G = build(&[(1, 1, 1), (1, 2, 1)]);
    assert!(!g.is_cyclic());
    assert_eq!(g.topological_sort().unwrap(), vec![1, 2]);
}

fn check_random_cycle_rule<G: Graph<u32, String> + Default>() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..30 {
        let n = rng.gen_range(1..12u32);
        let mut g = G::default();
        g.add_all(0..n);
        for _ in 0..rng.gen_range(0..(n * 2)) {
            let (a, b) = (rng.gen_range(0..n), rng.gen_range(0..n));
            if a != b {
                g.add_edge(&a, &b, rng.gen_range(0..10)).unwrap();
            }
        }

        let components = g.strongly_connected_components();
        let covered: usize = components.iter().map(HashSet::len).sum();
        assert_eq!(covered, g.vertex_count());
        assert_eq!(g.is_cyclic(), components.len() != g.vertex_count());
    }
}

fn check_random_dag_order<G: Graph<u32, String> + Default>() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..30 {
        let n = rng.gen_range(2..15u32);
        let mut g = G::default();
        g.add_all(0..n);
        for _ in 0..(n * 2) {
            let a = rng.gen_range(0..n - 1);
            let b = rng.gen_range(a + 1..n);
            g.add_edge(&b, &a, 1).unwrap();
        }

        assert!(g.is_dag());
        let order = g.topological_sort().unwrap();
        let at = positions(&order);
        for edge in g.edges() {
            assert!(at[edge.source()] < at[edge.destination()]);
        }
    }
}

macro_rules! directed_algorithm_tests {
    ($($name:ident => $backend:ty),* $(,)?) => {
        $(
            mod $name {
                use super::*;

                #[test]
                fn test_scc_on_cyclic_graph() {
                    check_scc_cyclic::<$backend>();
                }

                #[test]
                fn test_topological_order() {
                    check_topological_order::<$backend>();
                }

                #[test]
                fn test_shortest_paths() {
                    check_shortest_paths::<$backend>();
                }

                #[test]
                fn test_zero_weight_shortest_path() {
                    check_zero_weight_shortest_path::<$backend>();
                }

                #[test]
                fn test_bfs() {
                    check_bfs::<$backend>();
                }

                #[test]
                fn test_dfs() {
                    check_dfs::<$backend>();
                }

                #[test]
                fn test_tarjan_visit() {
                    check_tarjan_visit::<$backend>();
                }

                #[test]
                fn test_callback_abort() {
                    check_callback_abort::<$backend>();
                }

                #[test]
                fn test_strategy_preconditions() {
                    check_strategy_preconditions::<$backend>();
                }

                #[test]
                fn test_self_loop_is_not_a_cycle() {
                    check_self_loop_is_not_a_cycle::<$backend>();
                }

                #[test]
                fn test_random_cycle_rule() {
                    check_random_cycle_rule::<$backend>();
                }

                #[test]
                fn test_random_dag_order() {
                    check_random_dag_order::<$backend>();
                }
            }
        )*
    };
}

directed_algorithm_tests! {
    list_algorithms => ListGraph<u32>,
    map_algorithms => MapGraph<u32>,
    matrix_algorithms => MatrixGraph<u32>,
}

#[test]
fn test_shortest_path_with_extreme_weight() {
    let g: ListGraph<u32> = build(&[(1, 2, Weight::MAX), (2, 3, 1)]);

    let paths = g.shortest_paths(&1).unwrap();
    assert_eq!(paths.distance_to(&3), Some(Weight::MAX));
    let path = g.distance_to(&1, &3).unwrap();
    assert_eq!(path.len(), 2);
    assert_eq!(path_weight(&path), Weight::MAX);
}

#[test]
fn test_distance_to_names_source_first() {
    let g: MapGraph<u32> = build(WEIGHTED_DAG);
    match g.distance_to(&98, &99) {
        Err(GraphError::VertexNotFound(name)) => assert_eq!(name, "98"),
        other => panic!("expected VertexNotFound, got {:?}", other),
    }
    match g.distance_to(&1, &99) {
        Err(GraphError::VertexNotFound(name)) => assert_eq!(name, "99"),
        other => panic!("expected VertexNotFound, got {:?}", other),
    }
}

// ==================== Undirected Algorithm Tests ====================

fn undirected(edges: &[(u32, u32, Weight)]) -> MatrixUndGraph<u32> {
    build(edges)
}

#[test]
fn test_prim_and_kruskal_agree() {
    let g = undirected(WEIGHTED_UNDIRECTED);

    let prim = g.minimum_spanning_tree(MstAlgorithm::Prim).unwrap();
    let kruskal = g.minimum_spanning_tree(MstAlgorithm::Kruskal).unwrap();
    assert_eq!(prim.len(), 8);
    assert_eq!(kruskal.len(), 8);
    assert_eq!(path_weight(&prim), 37);
    assert_eq!(path_weight(&kruskal), 37);
}

#[test]
fn test_mst_total_with_extreme_weight() {
    let g = undirected(&[(1, 2, Weight::MAX), (2, 3, 1)]);
    for algorithm in [MstAlgorithm::Prim, MstAlgorithm::Kruskal] {
        let tree = g.minimum_spanning_tree(algorithm).unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(path_weight(&tree), Weight::MAX);
    }
    let spanning = g.visit(None, &Kruskal, |_| Ok(())).unwrap();
    assert_eq!(spanning.total_weight(), Weight::MAX);
}

#[test]
fn test_mst_edges_span_the_graph() {
    let g = undirected(WEIGHTED_UNDIRECTED);
    for algorithm in [MstAlgorithm::Prim, MstAlgorithm::Kruskal] {
        let tree = g.minimum_spanning_tree(algorithm).unwrap();
        let mut touched: HashSet<u32> = HashSet::new();
        for edge in &tree {
            assert_eq!(
                g.weight(edge.source(), edge.destination()).unwrap(),
                Some(edge.weight())
            );
            touched.insert(*edge.source());
            touched.insert(*edge.destination());
        }
        assert_eq!(touched, g.vertices());
    }
}

#[test]
fn test_mst_on_disconnected_graph_is_a_forest() {
    let mut g = undirected(&[(1, 2, 3), (2, 3, 1), (1, 3, 5), (10, 11, 2)]);
    g.add(20);

    let kruskal = g.visit(None, &Kruskal, noop).unwrap();
    assert_eq!(kruskal.edges().len(), 3);
    assert_eq!(kruskal.total_weight(), 6);
    assert!(kruskal.info().is_visited(&20));
    assert_eq!(kruskal.info().visited_order().len(), 6);

    let prim = g.visit(None, &Prim, noop).unwrap();
    assert_eq!(prim.total_weight(), 6);
    assert_eq!(prim.info().visited_order().len(), 6);
}

#[test]
fn test_prim_from_source_spans_its_component() {
    let g = undirected(&[(1, 2, 3), (2, 3, 1), (1, 3, 5), (10, 11, 2)]);
    let mut order = Vec::new();
    let tree = g
        .visit(Some(&1), &Prim, |v| {
            order.push(*v);
            Ok(())
        })
        .unwrap();

    assert_eq!(order, vec![1, 2, 3]);
    assert_eq!(tree.total_weight(), 4);
    assert_eq!(tree.info().parent(&3), Some(&2));
    assert!(!tree.info().is_visited(&10));
}

#[test]
fn test_undirected_components_are_connected_components() {
    let mut g = undirected(&[(1, 2, 1), (3, 2, 1), (4, 5, 1)]);
    g.add(6);
    assert_eq!(
        component_set(g.strongly_connected_components()),
        HashSet::from([vec![1, 2, 3], vec![4, 5], vec![6]])
    );
    assert!(g.is_cyclic());
}

#[test]
fn test_undirected_shortest_path_goes_both_ways() {
    let g = undirected(&[(1, 2, 2), (2, 3, 2), (1, 3, 7)]);
    let forward = g.distance_to(&1, &3).unwrap();
    let backward = g.distance_to(&3, &1).unwrap();
    assert_eq!(path_weight(&forward), 4);
    assert_eq!(path_weight(&backward), 4);
    assert_eq!(backward[0], Edge::new(3, 2, 2));
}

#[test]
fn test_bfs_on_undirected_graph_reaches_everything_connected() {
    let g = undirected(&[(1, 2, 1), (2, 3, 1), (4, 3, 1)]);
    let info = g.visit(Some(&4), &Bfs, noop).unwrap();
    assert_eq!(info.visited_order(), vec![4, 3, 2, 1]);
}
