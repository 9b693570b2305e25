//! Error types for the comparison engine.
//!
//! Value mismatches are never errors; they are reported as a
//! [`Difference`](crate::Difference). These errors mean a comparison could not
//! be carried out at all.

use alike_value::ValueError;

use crate::difference::Difference;
use crate::path::FieldPath;

/// Errors that can occur during a comparison.
#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    /// A value could not be read while comparing.
    #[error("cannot read value at {path}: {source}")]
    Introspection {
        path: FieldPath,
        #[source]
        source: ValueError,
    },

    /// The comparison configuration is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The requested operation is not supported for this configuration.
    #[error("unsupported: {0}")]
    Unsupported(String),
}

/// Convenience alias for comparison results.
pub type CompareResult<T> = Result<T, CompareError>;

/// Why an assertion helper failed.
#[derive(Debug, thiserror::Error)]
pub enum AssertionError {
    /// The values were compared and differ.
    #[error("{message}")]
    Mismatch {
        message: String,
        difference: Box<Difference>,
    },

    /// A property path could not be resolved on the actual value.
    #[error("cannot resolve property '{property}': {source}")]
    Property {
        property: String,
        #[source]
        source: ValueError,
    },

    /// The comparison itself failed.
    #[error(transparent)]
    Compare(#[from] CompareError),
}

impl AssertionError {
    /// The difference behind a failed assertion, if the values were compared.
    pub fn difference(&self) -> Option<&Difference> {
        match self {
            Self::Mismatch { difference, .. } => Some(difference.as_ref()),
            _ => None,
        }
    }
}
