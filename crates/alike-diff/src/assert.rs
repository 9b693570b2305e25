//! Assertion helpers for tests.
//!
//! ```
//! use alike_diff::{assert_lenient_eq, assert_reflection_eq, LeniencyMode};
//!
//! assert_reflection_eq!(vec![1, 2, 3], vec![1, 2, 3]);
//! assert_reflection_eq!(vec![1, 2, 3], vec![3, 2, 1], LeniencyMode::LenientOrder);
//! assert_lenient_eq!(vec![1, 2, 3], vec![3, 1, 2]);
//! ```

use alike_value::Describe;

use crate::comparator::compare;
use crate::config::CompareConfig;
use crate::difference::Difference;
use crate::error::AssertionError;
use crate::report::{DifferenceFormatter, FlatFormatter};

/// Compare `expected` and `actual`; fail with a rendered report if they
/// differ.
pub fn check<E, A>(expected: &E, actual: &A, config: &CompareConfig) -> Result<(), AssertionError>
where
    E: Describe + ?Sized,
    A: Describe + ?Sized,
{
    match compare(expected, actual, config)? {
        None => Ok(()),
        Some(difference) => Err(mismatch(difference)),
    }
}

/// Resolve the dotted `property` path on `actual` and compare the result
/// with `expected`.
///
/// When `actual` is a list or set, the property is taken from every
/// element, so `expected` should be the collection of those properties.
pub fn check_property<E, A>(
    property: &str,
    expected: &E,
    actual: &A,
    config: &CompareConfig,
) -> Result<(), AssertionError>
where
    E: Describe + ?Sized,
    A: Describe + ?Sized,
{
    let resolved = actual
        .describe()
        .property(property)
        .map_err(|source| AssertionError::Property {
            property: property.to_string(),
            source,
        })?;
    check(expected, &resolved, config)
}

fn mismatch(difference: Difference) -> AssertionError {
    let report = FlatFormatter::default().format(&difference);
    let count = difference.leaf_count();
    let message = format!(
        "expected and actual values differ ({count} mismatch{}):\n{report}",
        if count == 1 { "" } else { "es" }
    );
    AssertionError::Mismatch {
        message,
        difference: Box::new(difference),
    }
}

/// Assert that two values are structurally equal, optionally under the
/// given [`LeniencyMode`](crate::LeniencyMode)s.
#[macro_export]
macro_rules! assert_reflection_eq {
    ($expected:expr, $actual:expr $(, $mode:expr)* $(,)?) => {{
        let config = $crate::CompareConfig::default().with_modes(vec![$($mode),*]);
        if let Err(err) = $crate::assert::check(&$expected, &$actual, &config) {
            panic!("{}", err);
        }
    }};
}

/// Assert equality ignoring element order and default expected values.
#[macro_export]
macro_rules! assert_lenient_eq {
    ($expected:expr, $actual:expr $(,)?) => {{
        let config = $crate::CompareConfig::lenient();
        if let Err(err) = $crate::assert::check(&$expected, &$actual, &config) {
            panic!("{}", err);
        }
    }};
}

/// Assert that a property of `actual` leniently equals `expected`.
#[macro_export]
macro_rules! assert_property_lenient_eq {
    ($property:expr, $expected:expr, $actual:expr $(,)?) => {{
        let config = $crate::CompareConfig::lenient();
        if let Err(err) = $crate::assert::check_property($property, &$expected, &$actual, &config) {
            panic!("{}", err);
        }
    }};
}
