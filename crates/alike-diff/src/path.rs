//! Field paths: where a difference sits relative to the comparison root.

use std::fmt;

use alike_value::Key;
use serde::{Deserialize, Serialize};

/// One step from a value to a nested value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PathSegment {
    /// A named member of a composite.
    Field(String),
    /// A position in a sequence (or the expected-side position in an
    /// unordered collection).
    Index(usize),
    /// A mapping key.
    Key(Key),
}

/// Ordered path segments from the comparison root.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// The empty path.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// A new path with `segment` appended.
    pub fn child(&self, segment: PathSegment) -> Self {
        let mut path = self.clone();
        path.push(segment);
        path
    }

    /// Builder-style: append a field segment.
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.push(PathSegment::Field(name.into()));
        self
    }

    /// Builder-style: append an index segment.
    pub fn index(mut self, index: usize) -> Self {
        self.push(PathSegment::Index(index));
        self
    }

    /// Builder-style: append a key segment.
    pub fn key(mut self, key: impl Into<Key>) -> Self {
        self.push(PathSegment::Key(key.into()));
        self
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }

    /// Returns `true` if `prefix` is a (non-strict) prefix of this path.
    pub fn starts_with(&self, prefix: &FieldPath) -> bool {
        self.segments.starts_with(&prefix.segments)
    }

    /// Parse a dotted member path (`address.street`) into field segments.
    pub fn from_dotted(path: &str) -> Self {
        path.split('.')
            .filter(|s| !s.is_empty())
            .map(|s| PathSegment::Field(s.to_string()))
            .collect()
    }
}

impl FromIterator<PathSegment> for FieldPath {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<PathSegment>> for FieldPath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(name)?;
                }
                PathSegment::Key(Key::Str(key)) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                }
                PathSegment::Key(key) => write!(f, "[{key}]")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(FieldPath::root().to_string(), "<root>");
        assert_eq!(FieldPath::root().field("string2").to_string(), "string2");
        assert_eq!(FieldPath::root().key("key 2").to_string(), "key 2");
        assert_eq!(
            FieldPath::root().field("items").index(3).field("name").to_string(),
            "items[3].name"
        );
        assert_eq!(
            FieldPath::root().field("lookup").key("key 2").to_string(),
            "lookup.key 2"
        );
        assert_eq!(FieldPath::root().field("ids").key(7i64).to_string(), "ids[7]");
    }

    #[test]
    fn prefixes() {
        let parent = FieldPath::root().field("a");
        let child = parent.child(PathSegment::Index(0));
        assert!(child.starts_with(&parent));
        assert!(child.starts_with(&FieldPath::root()));
        assert!(!parent.starts_with(&child));
    }

    #[test]
    fn push_and_pop() {
        let mut path = FieldPath::root();
        path.push(PathSegment::Field("a".into()));
        path.push(PathSegment::Index(1));
        assert_eq!(path.len(), 2);
        assert_eq!(path.pop(), Some(PathSegment::Index(1)));
        assert_eq!(path, FieldPath::root().field("a"));
    }

    #[test]
    fn dotted() {
        assert_eq!(
            FieldPath::from_dotted("address.street"),
            FieldPath::root().field("address").field("street")
        );
    }

    #[test]
    fn serde_roundtrip() {
        let path = FieldPath::root().field("a").index(2).key("k");
        let json = serde_json::to_string(&path).unwrap();
        let parsed: FieldPath = serde_json::from_str(&json).unwrap();
        assert_eq!(path, parsed);
    }
}
