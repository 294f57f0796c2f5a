use super::*;

#[test]
fn later_values_overwrite_and_unmentioned_keys_persist() {
    let mut t = StatusTracker::new();
    t.update(&Snapshot::new(0, [("A", 1i64)]));
    t.update(&Snapshot::new(1, [("B", 2i64)]));
    t.update(&Snapshot::new(2, [("A", 3i64)]));

    let expected: StatusMap = [
        ("A".to_owned(), StateValue::Int(3)),
        ("B".to_owned(), StateValue::Int(2)),
    ]
    .into_iter()
    .collect();
    assert_eq!(t.current(), &expected);
    assert_eq!(t.updates(), 3);
}

#[test]
fn empty_snapshot_changes_nothing() {
    let mut t = StatusTracker::new();
    t.update(&Snapshot::new(0, [("A", "Infected")]));
    t.update(&Snapshot::default());
    assert_eq!(t.get("A"), Some(&StateValue::from("Infected")));
    assert_eq!(t.current().len(), 1);
}

#[test]
fn never_mentioned_nodes_stay_absent() {
    let mut t = StatusTracker::new();
    t.update(&Snapshot::new(0, [("0", "Infected")]));
    assert!(t.get("1").is_none());
}

#[test]
fn baseline_seeds_every_node() {
    let nodes: Vec<NodeId> = vec!["0".into(), "1".into(), "2".into()];
    let mut t = StatusTracker::with_baseline(&StateValue::from("Susceptible"), &nodes);
    t.update(&Snapshot::new(0, [("1", "Infected")]));
    assert_eq!(t.get("0"), Some(&StateValue::from("Susceptible")));
    assert_eq!(t.get("1"), Some(&StateValue::from("Infected")));
    assert_eq!(t.get("2"), Some(&StateValue::from("Susceptible")));
}
