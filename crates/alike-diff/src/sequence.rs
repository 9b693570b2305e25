//! Positional comparison of ordered sequences.

use alike_value::Value;

use crate::comparator::compare_values;
use crate::context::ComparisonContext;
use crate::difference::{Difference, SequenceDifference};
use crate::error::CompareResult;
use crate::path::PathSegment;

/// Pair elements by index up to the shorter length; record the tail of the
/// longer side as one-sided elements.
pub(crate) fn compare(
    ctx: &mut ComparisonContext<'_>,
    expected: &Value,
    actual: &Value,
) -> CompareResult<Option<Difference>> {
    let expected_items = expected.elements().map_err(|e| ctx.introspection(e))?;
    let actual_items = actual.elements().map_err(|e| ctx.introspection(e))?;
    let shared = expected_items.len().min(actual_items.len());

    let mut diff = SequenceDifference::new(expected.clone(), actual.clone(), ctx.path().clone());
    for (i, (e, a)) in expected_items.iter().zip(&actual_items).enumerate() {
        if let Some(nested) = ctx.descend(PathSegment::Index(i), |ctx| compare_values(ctx, e, a))? {
            diff.insert_element(i, nested);
        }
    }
    for (i, e) in expected_items.into_iter().enumerate().skip(shared) {
        diff.insert_expected_only(i, e);
    }
    for (i, a) in actual_items.into_iter().enumerate().skip(shared) {
        diff.insert_actual_only(i, a);
    }

    Ok((!diff.is_empty()).then_some(Difference::Sequence(diff)))
}
