use dynamic_orientation::graphs::{BoundedArbGraph, Forest, ForestOrientation};

#[test]
fn test_forest_rejects_cycles() {
    let mut f = Forest::new(4);
    assert!(f.insert_edge(0, 1));
    assert!(f.insert_edge(1, 2));
    assert!(f.insert_edge(2, 3));
    // cycle-closing and duplicate insertions fail
    assert!(!f.insert_edge(0, 3));
    assert!(!f.insert_edge(2, 1));
    assert!(!f.insert_edge(1, 1));
    assert_eq!(f.edge_count(), 3);
    f.delete_edge(2, 1);
    assert!(f.insert_edge(0, 3));
    assert_eq!(f.edge_count(), 3);
}

#[test]
fn test_forest_indexing() {
    let mut f = Forest::new(6);
    f.insert_edge(4, 5);
    f.insert_edge(1, 0);
    f.insert_edge(2, 5);
    // edges come out canonicalised and in a stable sorted order
    assert_eq!(f.get_edge(0), (0, 1));
    assert_eq!(f.get_edge(1), (2, 5));
    assert_eq!(f.get_edge(2), (4, 5));
    assert_eq!(f.all_edges(), vec![(0, 1), (2, 5), (4, 5)]);
    assert!(f.is_adjacent(5, 4));
    f.delete_edge(5, 2);
    assert!(!f.is_adjacent(2, 5));
    assert_eq!(f.get_edge(1), (4, 5));
}

#[test]
fn test_forest_delete_absent_is_noop() {
    let mut f = Forest::new(3);
    f.insert_edge(0, 1);
    f.delete_edge(1, 2);
    assert_eq!(f.edge_count(), 1);
}

#[test]
#[should_panic(expected = "out of range")]
fn test_forest_edge_index_out_of_range() {
    let mut f = Forest::new(3);
    f.insert_edge(0, 1);
    f.get_edge(1);
}

#[test]
fn test_bounded_arb_graph_disjoint_forests() {
    let mut g = BoundedArbGraph::new(4, 2);
    assert!(g.insert_edge(0, 0, 1));
    // the same edge is rejected by every forest while present
    assert!(!g.insert_edge(1, 0, 1));
    assert!(!g.insert_edge(0, 0, 1));
    // a triangle fits into two forests
    assert!(g.insert_edge(0, 1, 2));
    assert!(!g.insert_edge(0, 0, 2));
    assert!(g.insert_edge(1, 0, 2));
    assert_eq!(g.edge_count(), 3);

    g.delete_edge(1, 0);
    assert_eq!(g.edge_count(), 2);
    assert!(!g.is_adjacent(0, 1));
    assert!(g.is_adjacent(0, 2));
}

#[test]
fn test_bounded_arb_graph_flat_indexing() {
    let mut g = BoundedArbGraph::new(5, 2);
    g.insert_edge(0, 0, 1);
    g.insert_edge(0, 1, 2);
    g.insert_edge(1, 0, 2);
    g.insert_edge(1, 2, 3);
    // forest 0 edges first, then forest 1, each block sorted
    assert_eq!(g.get_edge(0), (0, 1));
    assert_eq!(g.get_edge(1), (1, 2));
    assert_eq!(g.get_edge(2), (0, 2));
    assert_eq!(g.get_edge(3), (2, 3));
}

#[test]
#[should_panic(expected = "out of range")]
fn test_bounded_arb_graph_index_out_of_range() {
    let g = BoundedArbGraph::new(3, 1);
    g.get_edge(0);
}

#[test]
fn test_orientation_bookkeeping() {
    let mut o = ForestOrientation::new(5);
    o.orient_edge(0, 1);
    o.orient_edge(0, 2);
    o.orient_edge(3, 0);
    assert_eq!(o.outdegree(0), 2);
    assert_eq!(o.outdegree(3), 1);
    assert_eq!(o.max_outdegree(), 2);
    assert!(o.is_oriented(0, 1));
    assert!(!o.is_oriented(1, 0));
    assert!(o.contains(1, 0));
    assert_eq!(o.out_neighbours(0), vec![1, 2]);
    assert_eq!(o.in_neighbours(0), vec![3]);

    o.flip_edge(0, 1);
    assert_eq!(o.outdegree(0), 1);
    assert_eq!(o.outdegree(1), 1);
    assert!(o.is_oriented(1, 0));
    assert_eq!(o.in_neighbours(0), vec![1, 3]);

    o.remove_edge(3, 0);
    assert_eq!(o.outdegree(3), 0);
    assert!(!o.contains(0, 3));
    assert_eq!(o.all_edges(), vec![(0, 2), (1, 0)]);
}

#[test]
#[should_panic(expected = "already oriented")]
fn test_orientation_double_insert() {
    let mut o = ForestOrientation::new(3);
    o.orient_edge(0, 1);
    o.orient_edge(1, 0);
}

#[test]
#[should_panic(expected = "not oriented")]
fn test_orientation_remove_absent() {
    let mut o = ForestOrientation::new(3);
    o.remove_edge(0, 1);
}

#[test]
fn test_forest_dot_output() {
    let mut f = Forest::new(3);
    f.insert_edge(0, 1);
    f.insert_edge(1, 2);
    let mut out = Vec::new();
    f.write_dot(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(
        text,
        "graph {\n  node [margin=0 shape=circle style=filled]\n  0 -- 1\n  1 -- 2\n}\n"
    );
}

#[test]
fn test_bounded_arb_graph_dot_output() {
    let mut g = BoundedArbGraph::new(3, 2);
    g.insert_edge(0, 0, 1);
    g.insert_edge(1, 1, 2);
    let mut out = Vec::new();
    g.write_dot(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("graph {\n"));
    assert!(text.contains("  edge [penwidth=5]\n"));
    assert!(text.contains("  edge [color=navy]\n  0 -- 1\n"));
    assert!(text.contains("  edge [color=red]\n  1 -- 2\n"));
}

#[test]
fn test_orientation_dot_output() {
    let mut o = ForestOrientation::new(3);
    o.orient_edge(2, 0);
    o.orient_edge(0, 1);
    let mut out = Vec::new();
    o.write_dot(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(
        text,
        "digraph {\n  node [margin=0 shape=circle style=filled]\n  0 -> 1\n  2 -> 0\n}\n"
    );
}
