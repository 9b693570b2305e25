//! Member-wise comparison of composites.

use alike_value::Value;

use crate::comparator::compare_values;
use crate::context::ComparisonContext;
use crate::difference::{CompositeDifference, Difference};
use crate::error::CompareResult;
use crate::path::PathSegment;

/// Compare the expected composite's members against the same-named members
/// of the actual one.
///
/// Only the expected side's members are enumerated. A member the actual side
/// lacks is compared against [`Value::Missing`]. The two sides need not share
/// a type name.
pub(crate) fn compare(
    ctx: &mut ComparisonContext<'_>,
    expected: &Value,
    actual: &Value,
) -> CompareResult<Option<Difference>> {
    let expected_record = expected.to_record().map_err(|e| ctx.introspection(e))?;
    let actual_record = actual.to_record().map_err(|e| ctx.introspection(e))?;

    let mut diff = CompositeDifference::new(expected.clone(), actual.clone(), ctx.path().clone());
    for (name, expected_member) in expected_record.fields() {
        let actual_member = actual_record.get(name).cloned().unwrap_or(Value::Missing);
        let nested = ctx.descend(PathSegment::Field(name.clone()), |ctx| {
            compare_values(ctx, expected_member, &actual_member)
        })?;
        if let Some(nested) = nested {
            diff.push(name.clone(), nested);
        }
    }

    Ok((!diff.is_empty()).then_some(Difference::Composite(diff)))
}

#[cfg(test)]
mod tests {
    use alike_value::Record;

    use crate::comparator::StructuralComparator;
    use crate::path::FieldPath;

    use super::*;

    #[test]
    fn nested_paths_and_order() {
        let address = |street: &str| Value::record(Record::new("Address").field("street", street));
        let e = Value::record(
            Record::new("User")
                .field("b", 1)
                .field("address", address("Main"))
                .field("a", 2),
        );
        let a = Value::record(
            Record::new("User")
                .field("a", 3)
                .field("address", address("High"))
                .field("b", 9),
        );

        let d = StructuralComparator::default().compare(&e, &a).unwrap().unwrap();
        let names: Vec<&str> = d
            .as_composite()
            .unwrap()
            .field_differences()
            .iter()
            .map(|(n, _)| n.as_str())
            .collect();
        assert_eq!(names, vec!["b", "address", "a"]);

        let street = d.find(&FieldPath::root().field("address").field("street")).unwrap();
        assert_eq!(street.actual().as_str(), Some("High"));
        assert_eq!(d.leaf_count(), 3);
    }

    #[test]
    fn inherited_members_are_compared() {
        let base = Record::new("Base").field("id", 1);
        let e = Value::record(Record::new("Child").extend_from(&base).field("name", "x"));
        let a = Value::record(Record::new("Child").field("id", 2).field("name", "x"));

        let d = StructuralComparator::default().compare(&e, &a).unwrap().unwrap();
        assert_eq!(d.mismatches()[0].path.to_string(), "id");
    }
}
