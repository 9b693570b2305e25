//! Key-wise comparison of mappings.

use alike_value::Value;

use crate::comparator::compare_values;
use crate::context::ComparisonContext;
use crate::difference::{Difference, MappingDifference};
use crate::error::CompareResult;
use crate::path::PathSegment;

/// Compare two mappings, treating the expected keys as authoritative.
///
/// Keys only the expected side has are compared against
/// [`Value::Missing`]. When the maps differ in size and no shared key
/// differs, those per-key results are left out and the difference stays
/// scoped at the map itself.
pub(crate) fn compare(
    ctx: &mut ComparisonContext<'_>,
    expected: &Value,
    actual: &Value,
) -> CompareResult<Option<Difference>> {
    let expected_entries = expected.entries().map_err(|e| ctx.introspection(e))?;
    let actual_entries = actual.entries().map_err(|e| ctx.introspection(e))?;

    let mut diff = MappingDifference::new(expected.clone(), actual.clone(), ctx.path().clone());
    let mut missing = Vec::new();
    for (key, e) in &expected_entries {
        let segment = PathSegment::Key(key.clone());
        match actual_entries.get(key) {
            Some(a) => {
                if let Some(nested) = ctx.descend(segment, |ctx| compare_values(ctx, e, a))? {
                    diff.insert_value(key.clone(), nested);
                }
            }
            None => {
                if let Some(nested) =
                    ctx.descend(segment, |ctx| compare_values(ctx, e, &Value::Missing))?
                {
                    diff.insert_expected_only(key.clone(), e.clone());
                    missing.push((key.clone(), nested));
                }
            }
        }
    }
    for (key, a) in &actual_entries {
        if !expected_entries.contains_key(key) {
            diff.insert_actual_only(key.clone(), a.clone());
        }
    }

    if diff.has_value_differences() || expected_entries.len() == actual_entries.len() {
        for (key, nested) in missing {
            diff.insert_value(key, nested);
        }
    }

    Ok((!diff.is_empty()).then_some(Difference::Mapping(diff)))
}

#[cfg(test)]
mod tests {
    use alike_value::Key;

    use crate::comparator::StructuralComparator;
    use crate::config::{CompareConfig, LeniencyMode};

    use super::*;

    #[test]
    fn actual_only_keys_are_reported() {
        let d = StructuralComparator::default()
            .compare(&Value::map([("a", 1)]), &Value::map([("a", 1), ("b", 2)]))
            .unwrap()
            .unwrap();
        let m = d.as_mapping().unwrap();
        assert!(m.value_differences().is_empty());
        assert_eq!(m.actual_only_keys().into_iter().collect::<Vec<_>>(), vec![Key::from("b")]);
        assert!(d.path().is_root());
    }

    #[test]
    fn shared_key_difference_attributes_missing_keys() {
        let e = Value::map([("a", 1), ("b", 2), ("c", 3)]);
        let a = Value::map([("a", 9), ("b", 2)]);
        let d = StructuralComparator::default().compare(&e, &a).unwrap().unwrap();
        let m = d.as_mapping().unwrap();
        let keys: Vec<String> = m.value_differences().keys().map(ToString::to_string).collect();
        assert_eq!(keys, vec!["a", "c"]);
        assert_eq!(d.leaf_count(), 2);
    }

    #[test]
    fn ignore_defaults_skips_missing_default_keys() {
        let e = Value::map([("a", 1), ("b", 0)]);
        let a = Value::map([("a", 1)]);
        let lenient = StructuralComparator::new(
            CompareConfig::default().with_mode(LeniencyMode::IgnoreDefaults),
        );
        assert!(lenient.compare(&e, &a).unwrap().is_none());
        assert!(StructuralComparator::default().compare(&e, &a).unwrap().is_some());
    }

    #[test]
    fn non_string_keys() {
        let e = Value::map([(1i64, "x"), (2i64, "y")]);
        let a = Value::map([(1i64, "x"), (2i64, "z")]);
        let d = StructuralComparator::default().compare(&e, &a).unwrap().unwrap();
        assert_eq!(d.mismatches()[0].path.to_string(), "[2]");
    }
}
