use std::fmt;

use serde::{Deserialize, Serialize};

use crate::scalar::Scalar;
use crate::value::Value;

/// A mapping key.
///
/// Keys are ordered so map entries iterate deterministically. Integer keys of
/// different signedness are distinct keys.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Key {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Char(char),
    Str(String),
}

impl Key {
    /// The key as text, if it is a string key.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The key as a leaf value.
    pub fn to_value(&self) -> Value {
        let scalar = match self {
            Self::Bool(b) => Scalar::Bool(*b),
            Self::Int(n) => Scalar::Int(*n),
            Self::UInt(n) => Scalar::UInt(*n),
            Self::Char(c) => Scalar::Char(*c),
            Self::Str(s) => Scalar::Str(s.clone()),
        };
        Value::Scalar(scalar)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::UInt(n) => write!(f, "{n}"),
            Self::Char(c) => write!(f, "{c:?}"),
            Self::Str(s) => write!(f, "{s}"),
        }
    }
}

/// Types usable as mapping keys.
pub trait ToKey {
    fn to_key(&self) -> Key;
}

impl<T: ToKey + ?Sized> ToKey for &T {
    fn to_key(&self) -> Key {
        (**self).to_key()
    }
}

impl ToKey for Key {
    fn to_key(&self) -> Key {
        self.clone()
    }
}

impl ToKey for str {
    fn to_key(&self) -> Key {
        Key::Str(self.to_string())
    }
}

impl ToKey for String {
    fn to_key(&self) -> Key {
        Key::Str(self.clone())
    }
}

impl ToKey for bool {
    fn to_key(&self) -> Key {
        Key::Bool(*self)
    }
}

impl ToKey for char {
    fn to_key(&self) -> Key {
        Key::Char(*self)
    }
}

macro_rules! int_keys {
    ($variant:ident as $target:ty: $($source:ty),+) => {
        $(
            impl ToKey for $source {
                fn to_key(&self) -> Key {
                    Key::$variant(*self as $target)
                }
            }
        )+
    };
}

int_keys!(Int as i64: i8, i16, i32, i64, isize);
int_keys!(UInt as u64: u8, u16, u32, u64, usize);

impl<T: ToKey + ?Sized> From<&T> for Key {
    fn from(v: &T) -> Self {
        v.to_key()
    }
}

impl From<String> for Key {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<i64> for Key {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Key {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u64> for Key {
    fn from(v: u64) -> Self {
        Self::UInt(v)
    }
}

impl From<bool> for Key {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<char> for Key {
    fn from(v: char) -> Self {
        Self::Char(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_keys_display_bare() {
        assert_eq!(Key::from("key 2").to_string(), "key 2");
        assert_eq!(Key::from('k').to_string(), "'k'");
    }

    #[test]
    fn signedness_makes_distinct_keys() {
        assert_ne!(Key::from(1i64), Key::from(1u64));
        assert_eq!(7u16.to_key(), Key::UInt(7));
        assert_eq!((-7i8).to_key(), Key::Int(-7));
    }

    #[test]
    fn keys_are_ordered() {
        let mut keys = vec![Key::from("b"), Key::from("a"), Key::from("c")];
        keys.sort();
        assert_eq!(keys, vec![Key::from("a"), Key::from("b"), Key::from("c")]);
    }
}
