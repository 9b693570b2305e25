//! The recursive structural comparator.
//!
//! [`StructuralComparator`] is the entry point. Every nested comparison goes
//! through [`compare_values`], which handles leniency, node identity, cycle
//! detection and null handling, then classifies both sides and dispatches to
//! the comparator for their kind.

use alike_value::{classify, Describe, Kind, Value};
use tracing::{debug, trace};

use crate::config::{CompareConfig, LeniencyMode};
use crate::context::ComparisonContext;
use crate::difference::{Difference, LeafDifference};
use crate::error::CompareResult;
use crate::{composite, mapping, sequence, unordered};

/// Compares two values and explains every point where they diverge.
///
/// Stateless between calls: each [`compare`](Self::compare) runs with a
/// fresh [`ComparisonContext`], so one comparator may be shared across
/// threads.
#[derive(Clone, Debug, Default)]
pub struct StructuralComparator {
    config: CompareConfig,
}

impl StructuralComparator {
    /// Create a comparator with `config`.
    pub fn new(config: CompareConfig) -> Self {
        Self { config }
    }

    /// The configuration every comparison runs with.
    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    /// Compare two values.
    ///
    /// Returns `Ok(None)` when they are equal under the configured leniency
    /// modes.
    pub fn compare(
        &self,
        expected: &Value,
        actual: &Value,
    ) -> CompareResult<Option<Difference>> {
        let mut ctx = ComparisonContext::new(&self.config);
        compare_values(&mut ctx, expected, actual)
    }

    /// Describe both sides and compare them.
    pub fn compare_described<E, A>(
        &self,
        expected: &E,
        actual: &A,
    ) -> CompareResult<Option<Difference>>
    where
        E: Describe + ?Sized,
        A: Describe + ?Sized,
    {
        self.compare(&expected.describe(), &actual.describe())
    }
}

/// Describe and compare two values with `config`.
pub fn compare<E, A>(
    expected: &E,
    actual: &A,
    config: &CompareConfig,
) -> CompareResult<Option<Difference>>
where
    E: Describe + ?Sized,
    A: Describe + ?Sized,
{
    let mut ctx = ComparisonContext::new(config);
    compare_values(&mut ctx, &expected.describe(), &actual.describe())
}

/// Compare two values at the context's current path.
pub(crate) fn compare_values(
    ctx: &mut ComparisonContext<'_>,
    expected: &Value,
    actual: &Value,
) -> CompareResult<Option<Difference>> {
    if ctx.config().has(LeniencyMode::IgnoreDefaults)
        && expected.is_default().map_err(|e| ctx.introspection(e))?
    {
        return Ok(None);
    }
    if expected.ptr_eq(actual) {
        return Ok(None);
    }

    let pair = expected.node_id().zip(actual.node_id());
    if let Some(pair) = pair {
        if ctx.is_active(pair) {
            debug!(
                path = %ctx.path(),
                depth = ctx.depth(),
                "cycle detected; treating pair as equal"
            );
            return Ok(None);
        }
    }

    ctx.enter(pair, |ctx| dispatch(ctx, expected, actual))
}

fn dispatch(
    ctx: &mut ComparisonContext<'_>,
    expected: &Value,
    actual: &Value,
) -> CompareResult<Option<Difference>> {
    match (expected, actual) {
        (Value::Null, Value::Null) | (Value::Missing, Value::Missing) => return Ok(None),
        (e, a) if e.is_null() || a.is_null() => return Ok(Some(leaf(ctx, expected, actual))),
        _ => {}
    }

    let expected_kind = classify(expected);
    let actual_kind = classify(actual);
    trace!(path = %ctx.path(), ?expected_kind, ?actual_kind, "dispatch");

    if !expected_kind.is_compatible_with(actual_kind) {
        return Ok(Some(leaf(ctx, expected, actual)));
    }

    match expected_kind {
        Kind::Composite => composite::compare(ctx, expected, actual),
        Kind::Mapping => mapping::compare(ctx, expected, actual),
        Kind::Sequence | Kind::UnorderedCollection => {
            let unordered = ctx.config().has(LeniencyMode::LenientOrder)
                || expected_kind == Kind::UnorderedCollection
                || actual_kind == Kind::UnorderedCollection;
            if unordered {
                unordered::compare(ctx, expected, actual)
            } else {
                sequence::compare(ctx, expected, actual)
            }
        }
        Kind::Leaf => Ok(compare_leaves(ctx, expected, actual)),
        Kind::Null => Ok(None),
    }
}

fn compare_leaves(
    ctx: &ComparisonContext<'_>,
    expected: &Value,
    actual: &Value,
) -> Option<Difference> {
    let (Some(e), Some(a)) = (expected.as_scalar(), actual.as_scalar()) else {
        return Some(leaf(ctx, expected, actual));
    };

    let equal = match (e.as_temporal(), a.as_temporal()) {
        (Some(et), Some(at)) if ctx.config().has(LeniencyMode::LenientDates) => {
            ctx.config().temporal_rule.accepts(et, at)
        }
        _ => e.same_value(a),
    };
    (!equal).then(|| leaf(ctx, expected, actual))
}

/// A leaf difference at the current path.
pub(crate) fn leaf(ctx: &ComparisonContext<'_>, expected: &Value, actual: &Value) -> Difference {
    Difference::Leaf(LeafDifference::new(
        expected.clone(),
        actual.clone(),
        ctx.path().clone(),
    ))
}
