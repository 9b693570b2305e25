//! Structural classification of values.

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// The structural kind of a value, decided once and then matched on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    /// Absent: `Null` or `Missing`.
    Null,
    /// Compared by value equality.
    Leaf,
    /// Ordered, indexed elements.
    Sequence,
    /// Elements without positional identity.
    UnorderedCollection,
    /// Key-based lookup.
    Mapping,
    /// Enumerable named members.
    Composite,
}

/// Classify a value by the capability it exposes.
///
/// Never fails. Anything that offers no structural access is a leaf.
pub fn classify(value: &Value) -> Kind {
    match value {
        Value::Null | Value::Missing => Kind::Null,
        Value::Scalar(_) => Kind::Leaf,
        Value::List(_) => Kind::Sequence,
        Value::Set(_) => Kind::UnorderedCollection,
        Value::Map(_) => Kind::Mapping,
        Value::Record(_) => Kind::Composite,
    }
}

impl Kind {
    /// Sequences and unordered collections.
    pub fn is_collection(self) -> bool {
        matches!(self, Self::Sequence | Self::UnorderedCollection)
    }

    /// Returns `true` if values of the two kinds can be compared structurally.
    ///
    /// Identical kinds are compatible, and any two collections are (a sequence
    /// against an unordered collection is compared without regard to order).
    pub fn is_compatible_with(self, other: Self) -> bool {
        self == other || (self.is_collection() && other.is_collection())
    }
}
