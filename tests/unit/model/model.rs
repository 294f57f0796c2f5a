use super::*;
use serde_json::json;

#[test]
fn state_values_decode_by_json_type() {
    let s: StatusMap = serde_json::from_value(json!({"a": 1, "b": 0.25, "c": "Infected"})).unwrap();
    assert_eq!(s["a"], StateValue::Int(1));
    assert_eq!(s["b"], StateValue::Scalar(0.25));
    assert_eq!(s["c"], StateValue::Code("Infected".to_owned()));
}

#[test]
fn code_keys_unify_ints_and_strings() {
    assert_eq!(StateValue::Int(2).code_key().unwrap(), "2");
    assert_eq!(StateValue::from("2").code_key().unwrap(), "2");
    assert!(StateValue::Scalar(0.5).code_key().unwrap_err().is_config());
}

#[test]
fn scalar_accepts_numbers_only() {
    assert_eq!(StateValue::Int(1).scalar().unwrap(), 1.0);
    assert_eq!(StateValue::Scalar(0.3).scalar().unwrap(), 0.3);
    assert!(StateValue::from("x").scalar().unwrap_err().is_config());
}

#[test]
fn recorded_model_replays_prefix() {
    let mut m = RecordedModel::new(ModelKind::Categorical)
        .with_status("Susceptible", 0)
        .with_status("Infected", 1);
    assert!(m.initial_status().is_none());
    m.set_initial_status(StatusMap::new());
    m.push_iteration(Snapshot::new(0, [("0", 1i64)]).status);
    m.push_iteration(Snapshot::new(0, [("2", 1i64)]).status);

    let its = m.iteration_bunch(2).unwrap();
    assert_eq!(its.len(), 2);
    assert_eq!(its[1].iteration, 1);
    assert_eq!(its[1].status["2"], StateValue::Int(1));

    assert_eq!(m.iteration_bunch(1).unwrap().len(), 1);
    assert!(m.iteration_bunch(3).unwrap_err().is_config());
}

#[test]
fn recorded_model_parses_from_json() {
    let m = RecordedModel::from_json_value(json!({
        "kind": "categorical",
        "statuses": {"Susceptible": 0, "Infected": 1},
        "initial_status": {"0": 1},
        "iterations": [
            {"iteration": 0, "status": {"0": 1, "1": 0}},
            {"iteration": 1, "status": {}}
        ]
    }))
    .unwrap();
    assert_eq!(m.kind(), ModelKind::Categorical);
    assert_eq!(m.available_statuses()["Infected"], StateValue::Int(1));
    assert!(m.initial_status().is_some());
    assert_eq!(m.iterations.len(), 2);
}
