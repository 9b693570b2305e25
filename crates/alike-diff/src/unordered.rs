//! Best-match comparison of unordered collections.
//!
//! Every expected element is compared against every actual element. Each
//! pair gets a score (0 for an exact match, otherwise the number of leaf
//! divergences plus a penalty for differing identity members), and the
//! configured [`MatchStrategy`](crate::MatchStrategy) picks the pairing.

use alike_value::Value;
use tracing::warn;

use crate::comparator::compare_values;
use crate::config::CompareConfig;
use crate::context::ComparisonContext;
use crate::difference::{BestMatch, Difference, UnorderedCollectionDifference};
use crate::error::CompareResult;
use crate::matching;
use crate::path::PathSegment;

pub(crate) fn compare(
    ctx: &mut ComparisonContext<'_>,
    expected: &Value,
    actual: &Value,
) -> CompareResult<Option<Difference>> {
    let expected_items = expected.elements().map_err(|e| ctx.introspection(e))?;
    let actual_items = actual.elements().map_err(|e| ctx.introspection(e))?;
    let (n, m) = (expected_items.len(), actual_items.len());

    let pairs = n.saturating_mul(m);
    if pairs > ctx.config().unordered_warn_pairs {
        warn!(
            path = %ctx.path(),
            expected_len = n,
            actual_len = m,
            pairs,
            "large unordered comparison"
        );
    }

    let mut matrix: Vec<Vec<Option<Difference>>> = Vec::with_capacity(n);
    for (i, e) in expected_items.iter().enumerate() {
        let row = ctx.descend(PathSegment::Index(i), |ctx| {
            actual_items
                .iter()
                .map(|a| compare_values(ctx, e, a))
                .collect::<CompareResult<Vec<_>>>()
        })?;
        matrix.push(row);
    }

    let scores: Vec<Vec<usize>> = matrix
        .iter()
        .map(|row| row.iter().map(|d| score(ctx.config(), d.as_ref())).collect())
        .collect();
    let best = BestMatch::from_pairs(n, m, matching::assign(ctx.config().strategy, &scores));

    let matched: Vec<(usize, usize)> = best.pairs().collect();
    let mut diff = UnorderedCollectionDifference::new(
        expected.clone(),
        actual.clone(),
        ctx.path().clone(),
        best,
        expected_items,
        actual_items,
    );
    for (i, j) in matched {
        if let Some(nested) = matrix[i][j].take() {
            diff.insert_element((i, j), nested);
        }
    }

    Ok((!diff.is_exact()).then_some(Difference::Unordered(diff)))
}

/// Cost of pairing two elements whose comparison produced `diff`.
pub(crate) fn score(config: &CompareConfig, diff: Option<&Difference>) -> usize {
    let Some(diff) = diff else {
        return 0;
    };
    let identity_misses = diff.as_composite().map_or(0, |c| {
        c.field_differences()
            .iter()
            .filter(|(name, _)| config.identity_fields.contains(name))
            .count()
    });
    diff.leaf_count()
        .saturating_add(identity_misses.saturating_mul(config.identity_weight))
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use alike_value::Record;
    use tracing_subscriber::fmt::MakeWriter;

    use crate::comparator::StructuralComparator;
    use crate::config::{LeniencyMode, MatchStrategy};
    use crate::path::FieldPath;

    use super::*;

    fn row(fields: [i64; 4]) -> Value {
        let [f1, f2, f3, f4] = fields;
        Value::record(
            Record::new("Row")
                .field("f1", f1)
                .field("f2", f2)
                .field("f3", f3)
                .field("f4", f4),
        )
    }

    fn person(id: i64, name: &str, city: &str) -> Value {
        Value::record(
            Record::new("Person")
                .field("id", id)
                .field("name", name)
                .field("city", city),
        )
    }

    fn unordered(config: CompareConfig) -> StructuralComparator {
        StructuralComparator::new(config.with_mode(LeniencyMode::LenientOrder))
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for LogBuffer {
        type Writer = LogBuffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn logged_while(f: impl FnOnce()) -> String {
        let buffer = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(buffer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn exact_matches_are_not_reused() {
        let e = Value::list(["A", "B"]);
        let a = Value::list(["A"]);
        let d = unordered(CompareConfig::default()).compare(&e, &a).unwrap().unwrap();
        let u = d.as_unordered().unwrap();
        assert_eq!(u.best_match().actual_for(0), Some(0));
        assert_eq!(u.best_match().actual_for(1), None);
        assert!(u.element_difference(0, 0).is_none());
        assert!(u.unmatched_actual().is_empty());

        let flat = d.mismatches();
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].path, FieldPath::root().index(1));
        assert!(matches!(flat[0].actual, Value::Missing));
    }

    #[test]
    fn unexpected_actual_elements() {
        let e = Value::list([1]);
        let a = Value::list([2, 1]);
        let d = unordered(CompareConfig::default()).compare(&e, &a).unwrap().unwrap();
        let u = d.as_unordered().unwrap();
        assert_eq!(u.best_match().as_slice(), &[Some(1)]);
        assert_eq!(u.unmatched_actual().len(), 1);
        assert_eq!(u.unmatched_actual()[0].0, 0);
    }

    #[test]
    fn inexact_pair_keeps_nested_difference() {
        let e = Value::list([person(1, "ann", "Oslo"), person(2, "bob", "Rome")]);
        let a = Value::list([person(2, "bob", "Rome"), person(1, "ann", "Bergen")]);
        let d = unordered(CompareConfig::default()).compare(&e, &a).unwrap().unwrap();
        let u = d.as_unordered().unwrap();

        assert_eq!(u.best_match().as_slice(), &[Some(1), Some(0)]);
        let nested = u.element_difference(0, 1).unwrap();
        assert_eq!(nested.path(), &FieldPath::root().index(0));
        let city = nested.as_composite().unwrap().field("city").unwrap();
        assert_eq!(city.path().to_string(), "[0].city");
        assert_eq!(d.leaf_count(), 1);
    }

    #[test]
    fn identity_fields_steer_the_match() {
        // Element 0 resembles actual 1 on everything except its id.
        let e = Value::list([person(1, "ann", "Oslo")]);
        let a = Value::list([person(1, "zed", "Rome"), person(9, "ann", "Oslo")]);

        let plain = unordered(CompareConfig::default()).compare(&e, &a).unwrap().unwrap();
        assert_eq!(plain.as_unordered().unwrap().best_match().actual_for(0), Some(1));

        let keyed = unordered(CompareConfig::default().with_identity_fields(["id"]))
            .compare(&e, &a)
            .unwrap()
            .unwrap();
        assert_eq!(keyed.as_unordered().unwrap().best_match().actual_for(0), Some(0));
    }

    #[test]
    fn optimal_strategy_finds_lower_total_score() {
        let e = Value::list([row([0, 0, 0, 5]), row([7, 7, 0, 0])]);
        let a = Value::list([row([0, 0, 0, 0]), row([0, 0, 1, 1])]);

        let greedy = unordered(CompareConfig::default()).compare(&e, &a).unwrap().unwrap();
        assert_eq!(greedy.as_unordered().unwrap().best_match().as_slice(), &[Some(0), Some(1)]);
        assert_eq!(greedy.leaf_count(), 5);

        let optimal = unordered(CompareConfig::default().with_strategy(MatchStrategy::optimal()))
            .compare(&e, &a)
            .unwrap()
            .unwrap();
        assert_eq!(optimal.as_unordered().unwrap().best_match().as_slice(), &[Some(1), Some(0)]);
        assert_eq!(optimal.leaf_count(), 4);
    }

    #[test]
    fn score_counts_identity_penalty() {
        let config = CompareConfig::default().with_identity_fields(["id"]).with_identity_weight(5);
        let d = StructuralComparator::default()
            .compare(&person(1, "a", "x"), &person(2, "b", "x"))
            .unwrap();
        assert_eq!(score(&config, d.as_ref()), 2 + 5);
        assert_eq!(score(&config, None), 0);
    }

    #[test]
    fn huge_identity_weight_saturates() {
        let e = Value::list([person(1, "a", "x")]);
        let a = Value::list([person(2, "b", "x")]);
        let base = CompareConfig::default()
            .with_identity_fields(["id"])
            .with_identity_weight(usize::MAX);

        let d = StructuralComparator::default()
            .compare(&person(1, "a", "x"), &person(2, "b", "x"))
            .unwrap();
        assert_eq!(score(&base, d.as_ref()), usize::MAX);

        for strategy in [MatchStrategy::Greedy, MatchStrategy::optimal()] {
            let d = unordered(base.clone().with_strategy(strategy))
                .compare(&e, &a)
                .unwrap()
                .unwrap();
            assert_eq!(d.as_unordered().unwrap().best_match().actual_for(0), Some(0));
            assert_eq!(d.leaf_count(), 2);
        }
    }

    #[test]
    fn huge_identity_weight_from_toml() {
        let config = CompareConfig::from_toml(
            "identity_fields = [\"id\"]\n\
             identity_weight = 9223372036854775807\n\
             modes = [\"lenient_order\"]\n\
             [strategy]\n\
             strategy = \"optimal\"\n\
             max_len = 64\n",
        )
        .unwrap();
        let e = Value::list([person(1, "a", "x"), person(2, "b", "y")]);
        let a = Value::list([person(3, "b", "y"), person(4, "a", "x")]);
        let d = StructuralComparator::new(config).compare(&e, &a).unwrap().unwrap();
        let best = d.as_unordered().unwrap().best_match();
        assert!(best.as_slice().iter().all(Option::is_some));
    }

    #[test]
    fn large_comparisons_are_logged() {
        let e = Value::list([1, 2, 3]);
        let a = Value::list([3, 2, 1]);

        let quiet = logged_while(|| {
            assert!(unordered(CompareConfig::default()).compare(&e, &a).unwrap().is_none());
        });
        assert!(!quiet.contains("large unordered comparison"));

        let mut config = CompareConfig::default();
        config.unordered_warn_pairs = 8;
        let loud = logged_while(|| {
            assert!(unordered(config).compare(&e, &a).unwrap().is_none());
        });
        assert!(loud.contains("large unordered comparison"));
        assert!(loud.contains("pairs=9"));
    }

    #[test]
    fn nested_collections_under_lenient_order() {
        let e = Value::list([Value::list([1, 2]), Value::list([3])]);
        let a = Value::list([Value::list([3]), Value::list([2, 1])]);
        assert!(unordered(CompareConfig::default()).compare(&e, &a).unwrap().is_none());
        assert!(StructuralComparator::default().compare(&e, &a).unwrap().is_some());
    }
}
