//! The `Describe` capability: turning Rust values into [`Value`] graphs.
//!
//! Standard library containers map onto the matching structural shape
//! (`Vec` is a sequence, `HashSet` an unordered collection, `HashMap` a
//! mapping). User types opt in with [`describe_record!`](crate::describe_record)
//! and [`describe_enum!`](crate::describe_enum), or by implementing the trait
//! by hand.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::key::{Key, ToKey};
use crate::scalar::Scalar;
use crate::temporal::Temporal;
use crate::value::Value;

/// Types that can describe their structure as a [`Value`].
pub trait Describe {
    fn describe(&self) -> Value;
}

impl Describe for Value {
    fn describe(&self) -> Value {
        self.clone()
    }
}

impl<T: Describe + ?Sized> Describe for &T {
    fn describe(&self) -> Value {
        (**self).describe()
    }
}

impl<T: Describe + ?Sized> Describe for Box<T> {
    fn describe(&self) -> Value {
        (**self).describe()
    }
}

impl<T: Describe + ?Sized> Describe for Rc<T> {
    fn describe(&self) -> Value {
        (**self).describe()
    }
}

impl<T: Describe + ?Sized> Describe for Arc<T> {
    fn describe(&self) -> Value {
        (**self).describe()
    }
}

impl<T: Describe> Describe for Option<T> {
    fn describe(&self) -> Value {
        self.as_ref().map_or(Value::Null, Describe::describe)
    }
}

impl Describe for () {
    fn describe(&self) -> Value {
        Value::Null
    }
}

macro_rules! describe_scalar {
    ($($source:ty),+) => {
        $(
            impl Describe for $source {
                fn describe(&self) -> Value {
                    Value::Scalar(Scalar::from(self.clone()))
                }
            }
        )+
    };
}

describe_scalar!(
    bool, char, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, String
);

impl Describe for str {
    fn describe(&self) -> Value {
        Value::from(self)
    }
}

impl Describe for Scalar {
    fn describe(&self) -> Value {
        Value::Scalar(self.clone())
    }
}

impl Describe for Temporal {
    fn describe(&self) -> Value {
        Value::from(*self)
    }
}

impl Describe for Key {
    fn describe(&self) -> Value {
        self.to_value()
    }
}

// ---------------------------------------------------------------
// Temporal leaves
// ---------------------------------------------------------------

impl Describe for DateTime<Utc> {
    fn describe(&self) -> Value {
        Value::from(Temporal::Instant(*self))
    }
}

impl Describe for DateTime<FixedOffset> {
    fn describe(&self) -> Value {
        Value::from(Temporal::Instant(self.with_timezone(&Utc)))
    }
}

impl Describe for NaiveDate {
    fn describe(&self) -> Value {
        Value::from(Temporal::Date(*self))
    }
}

impl Describe for NaiveTime {
    fn describe(&self) -> Value {
        Value::from(Temporal::Time(*self))
    }
}

impl Describe for NaiveDateTime {
    fn describe(&self) -> Value {
        Value::from(Temporal::Local(*self))
    }
}

// ---------------------------------------------------------------
// Collections
// ---------------------------------------------------------------

impl<T: Describe> Describe for [T] {
    fn describe(&self) -> Value {
        Value::list(self.iter().map(Describe::describe))
    }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn describe(&self) -> Value {
        self.as_slice().describe()
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn describe(&self) -> Value {
        self.as_slice().describe()
    }
}

impl<T: Describe> Describe for VecDeque<T> {
    fn describe(&self) -> Value {
        Value::list(self.iter().map(Describe::describe))
    }
}

impl<A: Describe, B: Describe> Describe for (A, B) {
    fn describe(&self) -> Value {
        Value::list([self.0.describe(), self.1.describe()])
    }
}

impl<T: Describe, S> Describe for HashSet<T, S> {
    fn describe(&self) -> Value {
        Value::set(self.iter().map(Describe::describe))
    }
}

impl<T: Describe> Describe for BTreeSet<T> {
    fn describe(&self) -> Value {
        Value::set(self.iter().map(Describe::describe))
    }
}

impl<K: ToKey, V: Describe, S> Describe for HashMap<K, V, S> {
    fn describe(&self) -> Value {
        Value::map(self.iter().map(|(k, v)| (k.to_key(), v.describe())))
    }
}

impl<K: ToKey, V: Describe> Describe for BTreeMap<K, V> {
    fn describe(&self) -> Value {
        Value::map(self.iter().map(|(k, v)| (k.to_key(), v.describe())))
    }
}

// ---------------------------------------------------------------
// JSON documents
// ---------------------------------------------------------------

impl Describe for serde_json::Value {
    fn describe(&self) -> Value {
        use serde_json::Value as Json;
        match self {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::from(*b),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::from(i)
                } else if let Some(u) = n.as_u64() {
                    Value::from(u)
                } else {
                    Value::from(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Json::String(s) => Value::from(s.as_str()),
            Json::Array(items) => Value::list(items.iter().map(Describe::describe)),
            Json::Object(map) => {
                Value::map(map.iter().map(|(k, v)| (Key::Str(k.clone()), v.describe())))
            }
        }
    }
}

// ---------------------------------------------------------------
// Adapter macros
// ---------------------------------------------------------------

/// Implement [`Describe`] for a struct by listing its members.
///
/// ```
/// use alike_value::{describe_record, Describe, Kind, classify};
///
/// struct User { id: u32, name: String }
/// describe_record!(User { id, name });
///
/// let v = User { id: 1, name: "ann".into() }.describe();
/// assert_eq!(classify(&v), Kind::Composite);
/// ```
#[macro_export]
macro_rules! describe_record {
    ($ty:ident { $($field:ident),* $(,)? }) => {
        impl $crate::Describe for $ty {
            fn describe(&self) -> $crate::Value {
                $crate::Value::record(
                    $crate::Record::new(stringify!($ty))
                        $(.field(stringify!($field), $crate::Describe::describe(&self.$field)))*
                )
            }
        }
    };
}

/// Implement [`Describe`] for a fieldless enum; values become variant leaves.
#[macro_export]
macro_rules! describe_enum {
    ($ty:ident { $($variant:ident),* $(,)? }) => {
        impl $crate::Describe for $ty {
            fn describe(&self) -> $crate::Value {
                let variant = match self {
                    $($ty::$variant => stringify!($variant),)*
                };
                $crate::Value::Scalar($crate::Scalar::Variant {
                    type_name: stringify!($ty).to_string(),
                    variant: variant.to_string(),
                })
            }
        }
    };
}
