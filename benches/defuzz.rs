//! Benchmarks for defuzzification over growing universe resolutions

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fuzzy_toolbox::{Defuzzification, FuzzySet, Universe};

fn defuzzification_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("defuzzify");

    for points in [200, 2_000, 20_000] {
        let universe = Universe::linspace(0., 10., points).unwrap();
        let warm = FuzzySet::triangular(&universe, 2., 5., 8.).unwrap();
        let hot = FuzzySet::gaussian(&universe, 7., 1.).unwrap();
        let output = warm.union(&hot).unwrap();

        for method in [
            Defuzzification::Centroid,
            Defuzzification::Bisector,
            Defuzzification::MeanOfMaximum,
            Defuzzification::LambdaCut { alpha: 0.5 },
        ] {
            group.bench_with_input(BenchmarkId::new(method.name(), points), &output, |b, set| {
                b.iter(|| black_box(set.defuzzify(method)))
            });
        }
    }

    group.finish();
}

fn set_operations_benchmark(c: &mut Criterion) {
    let universe = Universe::linspace(0., 10., 2_000).unwrap();
    let a = FuzzySet::triangular(&universe, 2., 5., 8.).unwrap();
    let b = FuzzySet::bell(&universe, 2., 2., 6.).unwrap();

    c.bench_function("algebraic_sum_2000", |bench| {
        bench.iter(|| black_box(a.algebraic_sum(&b)))
    });

    c.bench_function("zadeh_implication_2000", |bench| {
        bench.iter(|| black_box(a.zadeh_implication(&b)))
    });
}

criterion_group!(benches, defuzzification_benchmark, set_operations_benchmark);
criterion_main!(benches);
