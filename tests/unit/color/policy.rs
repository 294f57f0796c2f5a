use super::*;

fn sir_statuses() -> BTreeMap<String, StateValue> {
    [
        ("Susceptible".to_owned(), StateValue::Int(0)),
        ("Infected".to_owned(), StateValue::Int(1)),
        ("Removed".to_owned(), StateValue::Int(2)),
    ]
    .into_iter()
    .collect()
}

#[test]
fn discrete_lookup_uses_model_codes() {
    let cfg = ColorConfig::default();
    let policy = ColorPolicy::for_model(ModelKind::Categorical, &sir_statuses(), &cfg).unwrap();
    assert_eq!(
        policy.color_for(&StateValue::Int(1)).unwrap(),
        Rgba8::rgb(0xe4, 0x1a, 0x1c)
    );
    assert_eq!(
        policy.color_for(&StateValue::from("0")).unwrap(),
        Rgba8::rgb(0x37, 0x7e, 0xb8)
    );
}

#[test]
fn discrete_miss_is_a_config_error_never_a_fallback() {
    let cfg = ColorConfig::default();
    let policy = ColorPolicy::for_model(ModelKind::Categorical, &sir_statuses(), &cfg).unwrap();
    for miss in [StateValue::Int(7), StateValue::from("Exposed")] {
        let err = policy.color_for(&miss).unwrap_err();
        assert!(err.is_config(), "{err}");
    }
}

#[test]
fn missing_label_color_is_rejected_at_construction() {
    let mut statuses = sir_statuses();
    statuses.insert("Exposed".to_owned(), StateValue::Int(3));
    let err = DiscretePalette::new(&statuses, &ColorConfig::default().colors).unwrap_err();
    assert!(err.to_string().contains("Exposed"));
}

#[test]
fn edge_color_defaults_to_gray() {
    let mut colors = ColorConfig::default().colors;
    colors.remove(EDGE_KEY);
    let palette = DiscretePalette::new(&sir_statuses(), &colors).unwrap();
    assert_eq!(ColorPolicy::Discrete(palette).edge_color(), DEFAULT_EDGE_COLOR);
}

#[test]
fn legend_is_in_code_order() {
    let cfg = ColorConfig::default();
    let policy = ColorPolicy::for_model(ModelKind::Categorical, &sir_statuses(), &cfg).unwrap();
    let labels: Vec<&str> = policy.legend().iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, ["Susceptible", "Infected", "Removed"]);
}

#[test]
fn duplicate_codes_are_rejected() {
    let mut statuses = sir_statuses();
    statuses.insert("Removed".to_owned(), StateValue::Int(1));
    assert!(DiscretePalette::new(&statuses, &ColorConfig::default().colors).is_err());
}

#[test]
fn gradient_endpoints_are_exact_and_midpoint_is_channelwise() {
    let c0 = Rgba8::rgb(10, 200, 40);
    let c1 = Rgba8::rgb(250, 0, 100);
    let g = Gradient::new(vec![c0, c1]).unwrap();
    assert_eq!(g.color_at(0.0).unwrap(), c0);
    assert_eq!(g.color_at(1.0).unwrap(), c1);
    assert_eq!(g.color_at(0.5).unwrap(), Rgba8::rgb(130, 100, 70));
}

#[test]
fn gradient_rejects_out_of_range_values() {
    let g = Gradient::new(vec![Rgba8::rgb(0, 0, 0), Rgba8::rgb(255, 255, 255)]).unwrap();
    for v in [-0.01, 1.01, f64::NAN, f64::INFINITY] {
        assert!(g.color_at(v).unwrap_err().is_config());
    }
}

#[test]
fn gradient_locates_band_among_several_stops() {
    let g = Gradient::new(vec![
        Rgba8::rgb(0, 0, 0),
        Rgba8::rgb(200, 0, 0),
        Rgba8::rgb(200, 200, 0),
    ])
    .unwrap();
    assert_eq!(g.color_at(0.5).unwrap(), Rgba8::rgb(200, 0, 0));
    assert_eq!(g.color_at(0.25).unwrap(), Rgba8::rgb(100, 0, 0));
    assert_eq!(g.color_at(0.75).unwrap(), Rgba8::rgb(200, 100, 0));
}

#[test]
fn gradient_needs_two_stops() {
    assert!(Gradient::new(vec![Rgba8::rgb(1, 2, 3)]).is_err());
}

#[test]
fn continuous_policy_rejects_codes() {
    let policy =
        ColorPolicy::for_model(ModelKind::Continuous, &BTreeMap::new(), &ColorConfig::default())
            .unwrap();
    assert!(policy.color_for(&StateValue::from("Infected")).is_err());
    assert!(policy.color_for(&StateValue::Scalar(0.3)).is_ok());
    assert!(policy.legend().is_empty());
}
