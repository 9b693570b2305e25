use alike_diff::{CompareConfig, LeniencyMode, MatchStrategy, StructuralComparator};
use alike_value::{Record, Value};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn people(n: usize, reversed: bool) -> Value {
    let mut items: Vec<Value> = (0..n)
        .map(|i| {
            Value::record(
                Record::new("Person")
                    .field("id", i as i64)
                    .field("name", format!("person-{i}"))
                    .field("score", (i % 7) as i64),
            )
        })
        .collect();
    if reversed {
        items.reverse();
    }
    Value::list(items)
}

fn bench_unordered(c: &mut Criterion) {
    let mut group = c.benchmark_group("unordered");
    for n in [8usize, 32, 64] {
        let expected = people(n, false);
        let actual = people(n, true);
        for (label, strategy) in [
            ("greedy", MatchStrategy::Greedy),
            ("optimal", MatchStrategy::optimal()),
        ] {
            let comparator = StructuralComparator::new(
                CompareConfig::default()
                    .with_mode(LeniencyMode::LenientOrder)
                    .with_strategy(strategy),
            );
            group.bench_with_input(BenchmarkId::new(label, n), &n, |b, _| {
                b.iter(|| comparator.compare(black_box(&expected), black_box(&actual)))
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_unordered);
criterion_main!(benches);
