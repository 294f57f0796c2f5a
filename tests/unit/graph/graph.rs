use super::*;
use serde_json::json;

#[test]
fn ring_connects_neighbours_and_wraps() {
    let g = Graph::ring(5);
    assert_eq!(g.nodes(), ["0", "1", "2", "3", "4"]);
    assert_eq!(g.edge_count(), 5);
    assert!(g.has_edge("4", "0"));
    assert!(g.has_edge("1", "0"));
    assert!(!g.has_edge("0", "2"));
}

#[test]
fn degenerate_rings() {
    assert_eq!(Graph::ring(0).node_count(), 0);
    assert_eq!(Graph::ring(1).edge_count(), 0);
    assert_eq!(Graph::ring(2).edge_count(), 1);
}

#[test]
fn duplicate_nodes_and_edges_collapse() {
    let mut g = Graph::new();
    assert!(g.add_node("a"));
    assert!(!g.add_node("a"));
    g.add_node("b");
    g.add_edge("a", "b").unwrap();
    g.add_edge("b", "a").unwrap();
    assert_eq!(g.node_count(), 2);
    assert_eq!(g.edge_count(), 1);
}

#[test]
fn unknown_edge_endpoint_is_a_config_error() {
    let mut g = Graph::new();
    g.add_node("a");
    assert!(g.add_edge("a", "z").unwrap_err().is_config());
}

#[test]
fn parses_integer_and_string_node_ids() {
    let g: Graph = serde_json::from_value(json!({
        "nodes": [0, 1, "hub"],
        "edges": [[0, "hub"], ["1", "hub"]]
    }))
    .unwrap();
    assert_eq!(g.nodes(), ["0", "1", "hub"]);
    assert!(g.has_edge("hub", "0"));
    assert_eq!(g.index_of("hub"), Some(2));

    let bad = serde_json::from_value::<Graph>(json!({"nodes": [0], "edges": [[0, 1]]}));
    assert!(bad.is_err());
}

#[test]
fn serializes_back_to_the_same_shape() {
    let g = Graph::ring(3);
    let v = serde_json::to_value(&g).unwrap();
    assert_eq!(v["nodes"], json!(["0", "1", "2"]));
    let back: Graph = serde_json::from_value(v).unwrap();
    assert_eq!(back, g);
}
