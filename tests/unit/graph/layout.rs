use super::*;
use serde_json::json;

#[test]
fn force_directed_is_deterministic_and_covers_every_node() {
    let g = Graph::ring(8);
    let a = Layout::force_directed(&g);
    let b = Layout::force_directed(&g);
    assert_eq!(a, b);
    assert_eq!(a.len(), 8);
    a.check_covers(&g).unwrap();
}

#[test]
fn force_directed_separates_nodes() {
    let g = Graph::ring(6);
    let l = Layout::force_directed(&g);
    let p0 = l.get("0").unwrap();
    let p3 = l.get("3").unwrap();
    assert!((p0 - p3).hypot() > 1.0);
}

#[test]
fn force_directed_on_empty_graph_is_empty() {
    assert!(Layout::force_directed(&Graph::new()).is_empty());
}

#[test]
fn missing_node_is_a_config_error() {
    let g = Graph::ring(3);
    let mut l = Layout::new();
    l.insert("0", Point::new(0.0, 0.0));
    l.insert("1", Point::new(1.0, 0.0));
    let err = l.check_covers(&g).unwrap_err();
    assert!(err.is_config());
    assert!(err.to_string().contains("\"2\""));
}

#[test]
fn project_fills_target_and_flips_y() {
    let mut g = Graph::new();
    g.add_node("a");
    g.add_node("b");
    let mut l = Layout::new();
    l.insert("a", Point::new(-1.0, -1.0));
    l.insert("b", Point::new(1.0, 1.0));

    let px = l.project(&g, Rect::new(10.0, 20.0, 110.0, 220.0)).unwrap();
    assert_eq!(px[0], Point::new(10.0, 220.0));
    assert_eq!(px[1], Point::new(110.0, 20.0));
}

#[test]
fn project_centres_degenerate_axes() {
    let mut g = Graph::new();
    g.add_node("only");
    let mut l = Layout::new();
    l.insert("only", Point::new(5.0, 5.0));
    let px = l.project(&g, Rect::new(0.0, 0.0, 100.0, 50.0)).unwrap();
    assert_eq!(px, vec![Point::new(50.0, 25.0)]);
}

#[test]
fn layout_json_uses_coordinate_pairs() {
    let l: Layout = serde_json::from_value(json!({"0": [0.5, -1.0]})).unwrap();
    assert_eq!(l.get("0"), Some(Point::new(0.5, -1.0)));
    assert_eq!(serde_json::to_value(&l).unwrap(), json!({"0": [0.5, -1.0]}));
}
