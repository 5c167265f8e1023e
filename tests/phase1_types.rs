//! Phase 1 tests: value types and support structures.

use std::collections::HashSet;

use graphkit::collections::UnionFind;
use graphkit::index::MarkerIndex;
use graphkit::types::{path_weight, Edge, GraphError, VertexInfo, VisitInfo};

// ==================== Edge Tests ====================

#[test]
fn test_edge_accessors() {
    let edge = Edge::new("a", "b", 3);
    assert_eq!(*edge.source(), "a");
    assert_eq!(*edge.destination(), "b");
    assert_eq!(edge.weight(), 3);
}

#[test]
fn test_edge_reversed_keeps_weight() {
    let edge = Edge::new(1u32, 2u32, -7);
    let back = edge.reversed();
    assert_eq!(*back.source(), 2);
    assert_eq!(*back.destination(), 1);
    assert_eq!(back.weight(), -7);
    assert_eq!(back.reversed(), edge);
}

#[test]
fn test_edge_into_parts() {
    let (s, d, w) = Edge::new("x".to_string(), "y".to_string(), 0).into_parts();
    assert_eq!(s, "x");
    assert_eq!(d, "y");
    assert_eq!(w, 0);
}

#[test]
fn test_edge_equality_includes_weight() {
    assert_eq!(Edge::new("a", "b", 1), Edge::new("a", "b", 1));
    assert_ne!(Edge::new("a", "b", 1), Edge::new("a", "b", 2));
    assert_ne!(Edge::new("a", "b", 1), Edge::new("b", "a", 1));
}

#[test]
fn test_edge_display() {
    assert_eq!(Edge::new("a", "b", 3).to_string(), "a -> b (3)");
}

#[test]
fn test_edge_serializes_to_json() {
    let value = serde_json::to_value(Edge::new("a", "b", 3)).unwrap();
    assert_eq!(
        value,
        serde_json::json!({"source": "a", "destination": "b", "weight": 3})
    );
}

#[test]
fn test_path_weight() {
    let path = vec![Edge::new(1, 2, 1), Edge::new(2, 5, 4), Edge::new(5, 3, 3)];
    assert_eq!(path_weight(&path), 8);
    assert_eq!(path_weight::<i32>(&[]), 0);
}

#[test]
fn test_path_weight_saturates() {
    let path = vec![Edge::new(1, 2, i64::MAX), Edge::new(2, 3, 1)];
    assert_eq!(path_weight(&path), i64::MAX);
    let path = vec![Edge::new(1, 2, i64::MIN), Edge::new(2, 3, -1)];
    assert_eq!(path_weight(&path), i64::MIN);
}

// ==================== VisitInfo Tests ====================

#[test]
fn test_visit_info_single_clock() {
    let mut info = VisitInfo::new(Some("a"));
    assert_eq!(info.source(), Some(&"a"));

    assert!(info.set_discovered(&"a"));
    assert!(!info.set_discovered(&"a"));
    assert_eq!(info.discovery_time(&"a"), Some(0));

    // Visiting an undiscovered vertex discovers it first.
    assert!(info.set_visited(&"b"));
    assert_eq!(info.discovery_time(&"b"), Some(1));
    assert_eq!(info.visit_time(&"b"), Some(2));
    assert!(!info.set_visited(&"b"));

    assert!(info.set_visited(&"a"));
    assert_eq!(info.visit_time(&"a"), Some(3));
}

#[test]
fn test_visit_info_parent_first_writer_wins() {
    let mut info = VisitInfo::new(Some("a"));
    info.set_discovered(&"a");
    info.set_discovered(&"b");
    assert!(info.set_parent(&"b", &"a"));
    assert!(!info.set_parent(&"b", &"c"));
    assert_eq!(info.parent(&"b"), Some(&"a"));
    assert_eq!(info.parent(&"a"), None);
}

#[test]
fn test_visit_info_orders() {
    let mut info = VisitInfo::new(None);
    for v in [3, 1, 2] {
        info.set_discovered(&v);
    }
    for v in [2, 3] {
        info.set_visited(&v);
    }

    assert_eq!(info.discovered_order(), vec![3, 1, 2]);
    assert_eq!(info.visited_order(), vec![2, 3]);
    assert!(info.is_discovered(&1));
    assert!(!info.is_visited(&1));

    let touched: HashSet<i32> = info.vertices().into_iter().collect();
    assert_eq!(touched, HashSet::from([1, 2, 3]));
}

#[test]
fn test_visit_info_path_to() {
    let mut info = VisitInfo::new(Some("r"));
    for v in ["r", "m", "leaf"] {
        info.set_discovered(&v);
    }
    info.set_parent(&"m", &"r");
    info.set_parent(&"leaf", &"m");

    assert_eq!(info.path_to(&"leaf"), vec!["r", "m", "leaf"]);
    assert_eq!(info.path_to(&"r"), vec!["r"]);
    assert!(info.path_to(&"nowhere").is_empty());
}

#[test]
fn test_visit_info_path_to_terminates_on_parent_cycle() {
    let mut info = VisitInfo::new(None);
    info.set_parent(&1, &2);
    info.set_parent(&2, &1);
    let path = info.path_to(&1);
    assert!(path.len() <= 3);
    assert_eq!(path.last(), Some(&1));
}

#[test]
fn test_visit_info_entry_snapshot() {
    let mut info = VisitInfo::new(Some("a"));
    info.set_discovered(&"a");
    info.set_visited(&"b");
    info.set_parent(&"b", &"a");

    assert_eq!(
        info.entry(&"b"),
        Some(VertexInfo {
            vertex: "b",
            parent: Some("a"),
            discovery_time: Some(1),
            visit_time: Some(2),
        })
    );
    assert_eq!(info.entry(&"z"), None);
}

// ==================== Union-Find Tests ====================

#[test]
fn test_union_find_two_pairs() {
    let mut sets = UnionFind::new();
    sets.make_set_all(0..4);
    assert_eq!(sets.size(), 4);

    assert!(sets.union(&0, &1).unwrap());
    assert!(sets.union(&2, &3).unwrap());

    assert_eq!(sets.find(&0), sets.find(&1));
    assert_eq!(sets.find(&2), sets.find(&3));
    assert_ne!(sets.find(&0), sets.find(&2));
    assert_eq!(sets.size(), 2);
    assert_eq!(sets.len(), 4);
}

#[test]
fn test_union_find_union_same_set_is_false() {
    let mut sets = UnionFind::new();
    sets.make_set_all(["a", "b", "c"]);
    assert!(sets.union(&"a", &"b").unwrap());
    assert!(sets.union(&"b", &"c").unwrap());
    assert!(!sets.union(&"a", &"c").unwrap());
    assert!(sets.connected(&"a", &"c"));
    assert_eq!(sets.size(), 1);
}

#[test]
fn test_union_find_make_set_idempotent() {
    let mut sets = UnionFind::new();
    sets.make_set(7);
    sets.make_set(8);
    sets.union(&7, &8).unwrap();
    sets.make_set(7);
    assert_eq!(sets.size(), 1);
    assert_eq!(sets.len(), 2);
    assert!(sets.connected(&7, &8));
}

#[test]
fn test_union_find_unknown_element() {
    let mut sets: UnionFind<u32> = UnionFind::new();
    assert!(sets.is_empty());
    sets.make_set(1);
    assert!(matches!(
        sets.union(&1, &99),
        Err(GraphError::InvalidArgument(_))
    ));
    assert_eq!(sets.find(&99), None);
    assert!(!sets.connected(&1, &99));
    assert!(!sets.contains(&99));
    assert!(sets.contains(&1));
}

#[test]
fn test_union_find_long_chain() {
    let mut sets = UnionFind::with_capacity(1000);
    sets.make_set_all(0..1000);
    for i in 1..1000 {
        sets.union(&(i - 1), &i).unwrap();
    }
    assert_eq!(sets.size(), 1);
    let root = sets.find(&0);
    assert!((0..1000).all(|i| sets.find(&i) == root));
}

// ==================== Marker Index Tests ====================

#[test]
fn test_marker_index_many_to_many() {
    let mut index: MarkerIndex<&str, &str> = MarkerIndex::new();
    assert!(index.mark(&"a", &"red"));
    assert!(!index.mark(&"a", &"red"));
    index.mark(&"a", &"blue");
    index.mark(&"b", &"red");

    assert_eq!(index.marks_of(&"a"), HashSet::from(["red", "blue"]));
    assert_eq!(index.marked_with(&"red"), HashSet::from(["a", "b"]));
    assert_eq!(index.len(), 3);
}

#[test]
fn test_marker_index_drops_empty_sets() {
    let mut index: MarkerIndex<&str, &str> = MarkerIndex::new();
    index.mark(&"a", &"red");
    index.mark(&"b", &"red");
    index.mark(&"b", &"blue");

    index.unmark_all_with(&"red");
    assert_eq!(index.markers(), HashSet::from(["blue"]));
    assert!(!index.is_marked(&"a"));

    index.unmark_vertex(&"b");
    assert!(index.markers().is_empty());
    assert!(index.is_empty());
}

#[test]
fn test_marker_index_unmark_absent_is_noop() {
    let mut index: MarkerIndex<u8, u8> = MarkerIndex::new();
    assert!(!index.unmark(&1, &1));
    index.mark(&1, &2);
    assert!(!index.unmark(&1, &3));
    assert!(index.unmark(&1, &2));
    assert!(index.is_empty());
}

// ==================== Error Tests ====================

#[test]
fn test_error_messages() {
    assert_eq!(
        GraphError::not_found(&"v").to_string(),
        "Vertex \"v\" not found"
    );
    assert_eq!(
        GraphError::NullReference("source").to_string(),
        "Required argument missing: source"
    );
    let wrapped = GraphError::callback("stop here");
    assert_eq!(wrapped.to_string(), "Visit aborted: stop here");
}
