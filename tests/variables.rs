use rule_lp::{variable, Model, ModelError, ObjectiveDirection, VarKind};

#[test]
fn bounds_round_trip() {
    let specs = [
        ("a", (Some(-1.5), Some(2.), VarKind::Continuous)),
        ("b", (None, Some(7.), VarKind::Integer)),
        ("c", (Some(3.), None, VarKind::Continuous)),
        ("d", (None, None, VarKind::Continuous)),
        ("e", (Some(4.), Some(4.), VarKind::Integer)),
    ];
    let mut model = Model::default();
    model.define_vars(specs).unwrap();
    for (name, (lower, upper, kind)) in specs {
        let var = model.variable(name).unwrap();
        assert_eq!((var.lower(), var.upper(), var.kind()), (lower, upper, kind));
    }
}

#[test]
fn binary_always_spans_zero_one() {
    let mut model = Model::default();
    model
        .define_vars([
            ("b1", (None, None, VarKind::Binary)),
            ("b2", (Some(5.), Some(2.), VarKind::Binary)),
            ("b3", (Some(0.), Some(1.), VarKind::Binary)),
        ])
        .unwrap();
    for var in model.variables() {
        assert_eq!((var.lower(), var.upper()), (Some(0.), Some(1.)));
    }
}

#[test]
fn kinds_parse_from_text() {
    let mut model = Model::default();
    let kind: VarKind = "Integer".parse().unwrap();
    model.define_var("n", variable().kind(kind).clamp(0, 9)).unwrap();
    assert_eq!(model.variable("n").unwrap().kind(), VarKind::Integer);
    assert!(matches!(
        "complex".parse::<VarKind>(),
        Err(ModelError::InvalidVariableSpec { .. })
    ));
}

#[test]
fn rejected_definitions_leave_the_model_untouched() {
    let mut model = Model::default();
    model.define_var("x", variable().min(0)).unwrap();
    model
        .set_objective([("x", 1.)], ObjectiveDirection::Maximisation)
        .unwrap();

    let err = model
        .define_vars([("y", variable()), ("z", variable().clamp(2, 1))])
        .unwrap_err();
    assert!(matches!(err, ModelError::InvalidVariableSpec { ref name, .. } if name == "z"));
    assert!(model.define_var("x", variable()).is_err());

    assert_eq!(model.variables().len(), 1);
    assert!(model.variable("y").is_none());
    assert_eq!(model.objective().unwrap().expression().coefficient("x"), 1.);
}

#[test]
fn unknown_names_are_rejected() {
    let mut model = Model::default();
    model.define_var("x", variable()).unwrap();
    assert_eq!(
        model.set_objective([("x3", 1.)], ObjectiveDirection::Maximisation),
        Err(ModelError::UnknownVariable("x3".into()))
    );
    assert!(model.objective().is_none());
    assert_eq!(
        model.add_constraints([(vec![("x", 1.), ("x3", 1.)], "<=", 10.)]),
        Err(ModelError::UnknownVariable("x3".into()))
    );
    assert!(model.constraints().is_empty());
}
