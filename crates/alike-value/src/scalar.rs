use std::fmt;

use serde::{Deserialize, Serialize};

use crate::temporal::Temporal;

/// A leaf value: anything that does not decompose further.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Char(char),
    Str(String),
    /// A fieldless enum value.
    Variant { type_name: String, variant: String },
    Temporal(Temporal),
    /// A value with no structural description, compared by its text.
    Opaque(String),
}

#[derive(Clone, Copy)]
enum Number {
    Int(i128),
    Float(f64),
}

impl Scalar {
    /// Short, human-readable name of the scalar's type.
    pub fn type_label(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) | Self::UInt(_) => "integer",
            Self::Float(_) => "float",
            Self::Char(_) => "char",
            Self::Str(_) => "string",
            Self::Variant { .. } => "variant",
            Self::Temporal(_) => "temporal",
            Self::Opaque(_) => "opaque",
        }
    }

    /// Returns `true` for the zero value of the scalar's type.
    ///
    /// Variants, temporal and opaque values have no default.
    pub fn is_default(&self) -> bool {
        match self {
            Self::Bool(b) => !b,
            Self::Int(n) => *n == 0,
            Self::UInt(n) => *n == 0,
            Self::Float(x) => *x == 0.0,
            Self::Char(c) => *c == '\0',
            Self::Str(s) => s.is_empty(),
            Self::Variant { .. } | Self::Temporal(_) | Self::Opaque(_) => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_temporal(&self) -> Option<&Temporal> {
        match self {
            Self::Temporal(t) => Some(t),
            _ => None,
        }
    }

    fn as_number(&self) -> Option<Number> {
        match self {
            Self::Int(n) => Some(Number::Int(i128::from(*n))),
            Self::UInt(n) => Some(Number::Int(i128::from(*n))),
            Self::Float(x) => Some(Number::Float(*x)),
            _ => None,
        }
    }

    /// Value equality for leaves.
    ///
    /// Numbers compare by mathematical value regardless of representation,
    /// and `NaN` equals `NaN`. Everything else uses structural equality.
    pub fn same_value(&self, other: &Self) -> bool {
        match (self.as_number(), other.as_number()) {
            (Some(a), Some(b)) => numbers_equal(a, b),
            (None, None) => self == other,
            _ => false,
        }
    }
}

fn numbers_equal(a: Number, b: Number) -> bool {
    match (a, b) {
        (Number::Int(x), Number::Int(y)) => x == y,
        (Number::Float(x), Number::Float(y)) => x == y || (x.is_nan() && y.is_nan()),
        (Number::Int(i), Number::Float(f)) | (Number::Float(f), Number::Int(i)) => {
            f.fract() == 0.0 && f as i128 == i
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::UInt(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Char(c) => write!(f, "{c:?}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::Variant { type_name, variant } => write!(f, "{type_name}::{variant}"),
            Self::Temporal(t) => write!(f, "{t}"),
            Self::Opaque(text) => write!(f, "{text}"),
        }
    }
}

macro_rules! scalar_from {
    ($variant:ident as $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for Scalar {
                fn from(v: $source) -> Self {
                    Self::$variant(<$target>::from(v))
                }
            }
        )+
    };
}

scalar_from!(Int as i64: i8, i16, i32, i64);
scalar_from!(UInt as u64: u8, u16, u32, u64);
scalar_from!(Float as f64: f32, f64);

impl From<isize> for Scalar {
    fn from(v: isize) -> Self {
        Self::Int(v as i64)
    }
}

impl From<usize> for Scalar {
    fn from(v: usize) -> Self {
        Self::UInt(v as u64)
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<char> for Scalar {
    fn from(v: char) -> Self {
        Self::Char(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Temporal> for Scalar {
    fn from(v: Temporal) -> Self {
        Self::Temporal(v)
    }
}
