use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use rule_lp::{variable, Model, ObjectiveDirection, Operator};

fn names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("x{}", i)).collect()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let names_100k = names(100_000);
    c.bench_function("define 100_000 variables and a dense objective", |b| {
        b.iter(|| {
            let mut model = Model::default();
            model
                .define_vars(names_100k.iter().map(|n| (n.as_str(), variable().min(0))))
                .unwrap();
            model
                .set_objective(
                    names_100k.iter().map(|n| (n.as_str(), black_box(2.))),
                    ObjectiveDirection::Minimisation,
                )
                .unwrap();
            model
        })
    });

    let names_1k = names(1_000);
    c.bench_function("solving chained problem with 1000 variables", |b| {
        b.iter(|| {
            let mut model = Model::default();
            model
                .define_vars(names_1k.iter().map(|n| (n.as_str(), variable().clamp(0, 1_000))))
                .unwrap();
            model
                .set_objective(
                    names_1k.iter().map(|n| (n.as_str(), 1.)),
                    ObjectiveDirection::Minimisation,
                )
                .unwrap();
            model
                .add_constraints(names_1k.windows(2).map(|vs| {
                    (vec![(vs[1].as_str(), 1.), (vs[0].as_str(), -1.)], Operator::Ge, 1.)
                }))
                .unwrap();
            model.solve().unwrap()
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
