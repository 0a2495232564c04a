#![cfg(feature = "microlp")]

use float_eq::assert_float_eq;
use rule_lp::{variable, Model, ObjectiveDirection, Operator};

const BIG_NUM: usize = 1000; // <- Set this higher to test how the builder and the solver scale

fn names() -> Vec<String> {
    (0..BIG_NUM).map(|i| format!("v{}", i)).collect()
}

#[test]
fn solve_large_problem() {
    let names = names();
    let min = -((BIG_NUM / 2) as f64);
    let max = (BIG_NUM / 2 - 1) as f64;
    let mut model = Model::default();
    model
        .define_vars(names.iter().map(|n| (n.as_str(), variable().min(min).max(max))))
        .unwrap();
    model
        .set_objective(
            names.iter().map(|n| (n.as_str(), 1.)),
            ObjectiveDirection::Maximisation,
        )
        .unwrap();
    // v[i] + 1 <= v[i + 1]
    model
        .add_constraints(
            names
                .windows(2)
                .map(|vs| (vec![(vs[0].as_str(), 1.), (vs[1].as_str(), -1.)], Operator::Le, -1.)),
        )
        .unwrap();
    model.solve().unwrap();
    let values = model.values().unwrap();
    for (i, name) in names.iter().enumerate() {
        assert_float_eq!(values[name], min + i as f64, abs <= 1e-8);
    }
}

#[test]
fn add_10_000_constraints() {
    let mut model = Model::default();
    model.define_vars([("a", variable()), ("b", variable())]).unwrap();
    for _ in 0..10_000 {
        model
            .add_constraints([(vec![("a", 1.), ("b", -1.)], "<=", 1.)])
            .unwrap();
    }
    assert_eq!(model.constraints().len(), 10_000);
}
