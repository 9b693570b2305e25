//! The dynamic value graph compared by the engine.
//!
//! A [`Value`] is a cheap-to-clone handle. Leaves are stored inline; lists,
//! sets, maps and records live in shared [`Node`]s so that graphs may share
//! substructure and contain cycles.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{ValueError, ValueResult};
use crate::key::Key;
use crate::node::{Node, NodeId};
use crate::record::Record;
use crate::scalar::Scalar;
use crate::temporal::Temporal;

/// A runtime value.
#[derive(Clone)]
pub enum Value {
    /// An absent value.
    Null,
    /// Placeholder for a member or key that does not exist on one side.
    Missing,
    Scalar(Scalar),
    /// An ordered sequence with positional identity.
    List(Node<Vec<Value>>),
    /// An unordered collection.
    Set(Node<Vec<Value>>),
    /// A keyed mapping.
    Map(Node<BTreeMap<Key, Value>>),
    /// A composite with named members.
    Record(Node<Record>),
}

impl Value {
    /// Create an ordered sequence.
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::List(Node::new(items.into_iter().map(Into::into).collect()))
    }

    /// Create an unordered collection.
    pub fn set<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::Set(Node::new(items.into_iter().map(Into::into).collect()))
    }

    /// Create a mapping from key-value entries.
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Key>,
        V: Into<Value>,
    {
        Self::Map(Node::new(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ))
    }

    /// Wrap a record as a composite value.
    pub fn record(record: Record) -> Self {
        Self::Record(Node::new(record))
    }

    /// A leaf compared by its textual form only.
    pub fn opaque(text: impl Into<String>) -> Self {
        Self::Scalar(Scalar::Opaque(text.into()))
    }

    /// Identity of the underlying node, for structured values.
    pub fn node_id(&self) -> Option<NodeId> {
        match self {
            Self::List(n) | Self::Set(n) => Some(n.id()),
            Self::Map(n) => Some(n.id()),
            Self::Record(n) => Some(n.id()),
            Self::Null | Self::Missing | Self::Scalar(_) => None,
        }
    }

    /// Returns `true` if both handles point at the same node.
    ///
    /// Leaves have no identity and are never pointer-equal.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self.node_id(), other.node_id()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Short name of the value's shape, for messages.
    pub fn type_label(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Missing => "missing",
            Self::Scalar(s) => s.type_label(),
            Self::List(_) => "list",
            Self::Set(_) => "set",
            Self::Map(_) => "map",
            Self::Record(_) => "record",
        }
    }

    /// Returns `true` for `Null` and `Missing`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null | Self::Missing)
    }

    /// Returns `true` if the value is its type's default: null, zero, `false`,
    /// the empty string, or an empty collection. Records are never defaults.
    pub fn is_default(&self) -> ValueResult<bool> {
        Ok(match self {
            Self::Null | Self::Missing => true,
            Self::Scalar(s) => s.is_default(),
            Self::List(n) | Self::Set(n) => n.read()?.is_empty(),
            Self::Map(n) => n.read()?.is_empty(),
            Self::Record(_) => false,
        })
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().and_then(Scalar::as_str)
    }

    pub fn as_temporal(&self) -> Option<&Temporal> {
        self.as_scalar().and_then(Scalar::as_temporal)
    }

    /// Clone out the elements of a list or set.
    pub fn elements(&self) -> ValueResult<Vec<Value>> {
        match self {
            Self::List(n) | Self::Set(n) => n.snapshot(),
            other => Err(ValueError::NotAList {
                found: other.type_label(),
            }),
        }
    }

    /// Clone out the entries of a map.
    pub fn entries(&self) -> ValueResult<BTreeMap<Key, Value>> {
        match self {
            Self::Map(n) => n.snapshot(),
            other => Err(ValueError::NotAMap {
                found: other.type_label(),
            }),
        }
    }

    /// Clone out the record behind a record value.
    pub fn to_record(&self) -> ValueResult<Record> {
        match self {
            Self::Record(n) => n.snapshot(),
            other => Err(ValueError::NotARecord {
                found: other.type_label(),
            }),
        }
    }

    /// Set a member on a record in place. Visible through every handle.
    pub fn set_field(&self, name: impl Into<String>, value: impl Into<Value>) -> ValueResult<()> {
        match self {
            Self::Record(n) => {
                n.write()?.set(name, value);
                Ok(())
            }
            other => Err(ValueError::NotARecord {
                found: other.type_label(),
            }),
        }
    }

    /// Append an element to a list or set in place.
    pub fn push(&self, value: impl Into<Value>) -> ValueResult<()> {
        match self {
            Self::List(n) | Self::Set(n) => {
                n.write()?.push(value.into());
                Ok(())
            }
            other => Err(ValueError::NotAList {
                found: other.type_label(),
            }),
        }
    }

    /// Insert an entry into a map in place, returning the previous value.
    pub fn insert(
        &self,
        key: impl Into<Key>,
        value: impl Into<Value>,
    ) -> ValueResult<Option<Value>> {
        match self {
            Self::Map(n) => Ok(n.write()?.insert(key.into(), value.into())),
            other => Err(ValueError::NotAMap {
                found: other.type_label(),
            }),
        }
    }
}

// ---------------------------------------------------------------
// Display
// ---------------------------------------------------------------

/// Writes values depth-first, printing `<cycle>` for a node that is already
/// being written further up the stack.
struct Writer {
    stack: Vec<NodeId>,
}

impl Writer {
    fn write(&mut self, f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
        if let Some(id) = value.node_id() {
            if self.stack.contains(&id) {
                return f.write_str("<cycle>");
            }
            self.stack.push(id);
            let result = self.write_node(f, value);
            self.stack.pop();
            return result;
        }
        match value {
            Value::Null => f.write_str("null"),
            Value::Missing => f.write_str("<missing>"),
            Value::Scalar(s) => write!(f, "{s}"),
            _ => Ok(()),
        }
    }

    fn write_node(&mut self, f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
        match value {
            Value::List(n) => match n.snapshot() {
                Ok(items) => self.write_seq(f, "[", &items, "]"),
                Err(_) => f.write_str("<poisoned>"),
            },
            Value::Set(n) => match n.snapshot() {
                Ok(items) => self.write_seq(f, "{", &items, "}"),
                Err(_) => f.write_str("<poisoned>"),
            },
            Value::Map(n) => match n.snapshot() {
                Ok(entries) => {
                    f.write_str("{")?;
                    for (i, (k, v)) in entries.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{}: ", k.to_value())?;
                        self.write(f, v)?;
                    }
                    f.write_str("}")
                }
                Err(_) => f.write_str("<poisoned>"),
            },
            Value::Record(n) => match n.snapshot() {
                Ok(record) => {
                    write!(f, "{} {{", record.type_name())?;
                    for (i, (name, v)) in record.fields().iter().enumerate() {
                        f.write_str(if i > 0 { ", " } else { " " })?;
                        write!(f, "{name}: ")?;
                        self.write(f, v)?;
                    }
                    f.write_str(if record.is_empty() { "}" } else { " }" })
                }
                Err(_) => f.write_str("<poisoned>"),
            },
            _ => Ok(()),
        }
    }

    fn write_seq(
        &mut self,
        f: &mut fmt::Formatter<'_>,
        open: &str,
        items: &[Value],
        close: &str,
    ) -> fmt::Result {
        f.write_str(open)?;
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            self.write(f, item)?;
        }
        f.write_str(close)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Writer { stack: Vec::new() }.write(f, self)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value({self})")
    }
}

// ---------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------

impl From<Scalar> for Value {
    fn from(v: Scalar) -> Self {
        Self::Scalar(v)
    }
}

impl From<Temporal> for Value {
    fn from(v: Temporal) -> Self {
        Self::Scalar(Scalar::Temporal(v))
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Self::record(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

macro_rules! value_from_scalar {
    ($($source:ty),+) => {
        $(
            impl From<$source> for Value {
                fn from(v: $source) -> Self {
                    Self::Scalar(Scalar::from(v))
                }
            }
        )+
    };
}

value_from_scalar!(
    bool, char, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, &str, String
);
