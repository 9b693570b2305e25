//! The difference tree produced by a comparison.
//!
//! A `None` comparison result means "equal under the active leniency modes".
//! A `Some(Difference)` is a read-only tree built bottom-up during a single
//! comparison: every node carries the expected value, the actual value and
//! the field path at which the two diverge, plus kind-specific children.
//!
//! # Invariants
//!
//! - Nested differences stored in any node are never "equal" placeholders.
//! - For a sequence difference, indexes below the shorter length are either
//!   in `element_differences` or equal on both sides; indexes at or beyond it
//!   appear in exactly one of the two "only" sets.
//! - For an unordered difference, the best match is a partial bijection.

use std::collections::{BTreeMap, BTreeSet};

use alike_value::{Key, Value};
use serde::{Deserialize, Serialize};

use crate::path::{FieldPath, PathSegment};

/// A node of the difference tree.
#[derive(Clone, Debug)]
pub enum Difference {
    Leaf(LeafDifference),
    Composite(CompositeDifference),
    Sequence(SequenceDifference),
    Mapping(MappingDifference),
    Unordered(UnorderedCollectionDifference),
}

/// One leaf-level divergence, flattened out of the tree.
#[derive(Clone, Debug)]
pub struct Mismatch {
    pub path: FieldPath,
    pub expected: Value,
    pub actual: Value,
}

impl Difference {
    /// The expected value at this point.
    pub fn expected(&self) -> &Value {
        &self.header().expected
    }

    /// The actual value at this point.
    pub fn actual(&self) -> &Value {
        &self.header().actual
    }

    /// Where this difference sits relative to the comparison root.
    pub fn path(&self) -> &FieldPath {
        &self.header().path
    }

    /// Short name of the difference kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Leaf(_) => "leaf",
            Self::Composite(_) => "composite",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
            Self::Unordered(_) => "unordered",
        }
    }

    fn header(&self) -> &Header {
        match self {
            Self::Leaf(d) => &d.header,
            Self::Composite(d) => &d.header,
            Self::Sequence(d) => &d.header,
            Self::Mapping(d) => &d.header,
            Self::Unordered(d) => &d.header,
        }
    }

    /// The leaf difference, if this is one.
    pub fn as_leaf(&self) -> Option<&LeafDifference> {
        match self {
            Self::Leaf(d) => Some(d),
            _ => None,
        }
    }

    /// The composite difference, if this is one.
    pub fn as_composite(&self) -> Option<&CompositeDifference> {
        match self {
            Self::Composite(d) => Some(d),
            _ => None,
        }
    }

    /// The sequence difference, if this is one.
    pub fn as_sequence(&self) -> Option<&SequenceDifference> {
        match self {
            Self::Sequence(d) => Some(d),
            _ => None,
        }
    }

    /// The mapping difference, if this is one.
    pub fn as_mapping(&self) -> Option<&MappingDifference> {
        match self {
            Self::Mapping(d) => Some(d),
            _ => None,
        }
    }

    /// The unordered collection difference, if this is one.
    pub fn as_unordered(&self) -> Option<&UnorderedCollectionDifference> {
        match self {
            Self::Unordered(d) => Some(d),
            _ => None,
        }
    }

    /// Direct nested differences, in a stable order.
    pub fn children(&self) -> Vec<&Difference> {
        match self {
            Self::Leaf(_) => Vec::new(),
            Self::Composite(d) => d.field_differences.iter().map(|(_, n)| n).collect(),
            Self::Sequence(d) => d.element_differences.values().collect(),
            Self::Mapping(d) => d.value_differences.values().collect(),
            Self::Unordered(d) => d.element_differences.values().collect(),
        }
    }

    /// Number of leaf-level divergences in this subtree.
    ///
    /// One-sided elements and keys count once each. Never zero.
    pub fn leaf_count(&self) -> usize {
        let nested: usize = self.children().iter().map(|d| d.leaf_count()).sum();
        let one_sided = match self {
            Self::Leaf(_) => return 1,
            Self::Composite(_) => 0,
            Self::Sequence(d) => d.expected_only.len() + d.actual_only.len(),
            Self::Mapping(d) => d.unattributed_expected_keys().count() + d.actual_only.len(),
            Self::Unordered(d) => {
                d.best_match.unmatched_expected().len() + d.best_match.unmatched_actual().len()
            }
        };
        (nested + one_sided).max(1)
    }

    /// Find the difference stamped with exactly `path` in this subtree.
    pub fn find(&self, path: &FieldPath) -> Option<&Difference> {
        if self.path() == path {
            return Some(self);
        }
        self.children()
            .into_iter()
            .filter(|child| path.starts_with(child.path()))
            .find_map(|child| child.find(path))
    }

    /// Flatten the tree into one entry per leaf divergence, depth-first.
    ///
    /// Elements and keys present on only one side are reported against
    /// [`Value::Missing`] on the other side. A mapping whose only divergence
    /// is its size yields one entry per one-sided key.
    pub fn mismatches(&self) -> Vec<Mismatch> {
        let mut out = Vec::new();
        self.collect_mismatches(&mut out);
        out
    }

    fn collect_mismatches(&self, out: &mut Vec<Mismatch>) {
        for child in self.children() {
            child.collect_mismatches(out);
        }
        let path = self.path();
        match self {
            Self::Leaf(d) => out.push(Mismatch {
                path: path.clone(),
                expected: d.header.expected.clone(),
                actual: d.header.actual.clone(),
            }),
            Self::Composite(_) => {}
            Self::Sequence(d) => {
                for (i, v) in &d.expected_only {
                    out.push(one_sided(path.child(PathSegment::Index(*i)), v, true));
                }
                for (i, v) in &d.actual_only {
                    out.push(one_sided(path.child(PathSegment::Index(*i)), v, false));
                }
            }
            Self::Mapping(d) => {
                for key in d.unattributed_expected_keys() {
                    let v = &d.expected_only[key];
                    out.push(one_sided(path.child(PathSegment::Key(key.clone())), v, true));
                }
                for (key, v) in &d.actual_only {
                    out.push(one_sided(path.child(PathSegment::Key(key.clone())), v, false));
                }
            }
            Self::Unordered(d) => {
                for i in d.best_match.unmatched_expected() {
                    let v = &d.expected_elements[i];
                    out.push(one_sided(path.child(PathSegment::Index(i)), v, true));
                }
                for j in d.best_match.unmatched_actual() {
                    let v = &d.actual_elements[j];
                    out.push(one_sided(path.child(PathSegment::Index(j)), v, false));
                }
            }
        }
    }
}

fn one_sided(path: FieldPath, value: &Value, expected_side: bool) -> Mismatch {
    let (expected, actual) = if expected_side {
        (value.clone(), Value::Missing)
    } else {
        (Value::Missing, value.clone())
    };
    Mismatch {
        path,
        expected,
        actual,
    }
}

#[derive(Clone, Debug)]
struct Header {
    expected: Value,
    actual: Value,
    path: FieldPath,
}

impl Header {
    fn new(expected: Value, actual: Value, path: FieldPath) -> Self {
        Self {
            expected,
            actual,
            path,
        }
    }
}

// ---------------------------------------------------------------
// Leaf
// ---------------------------------------------------------------

/// The two values differ and neither decomposes further, or their kinds are
/// not structurally comparable.
#[derive(Clone, Debug)]
pub struct LeafDifference {
    header: Header,
}

impl LeafDifference {
    /// Create a leaf difference at `path`.
    pub fn new(expected: Value, actual: Value, path: FieldPath) -> Self {
        Self {
            header: Header::new(expected, actual, path),
        }
    }

    /// The expected leaf.
    pub fn expected(&self) -> &Value {
        &self.header.expected
    }

    /// The actual leaf.
    pub fn actual(&self) -> &Value {
        &self.header.actual
    }

    /// Where this leaf sits.
    pub fn path(&self) -> &FieldPath {
        &self.header.path
    }
}

// ---------------------------------------------------------------
// Composite
// ---------------------------------------------------------------

/// Member-wise differences between two composites.
#[derive(Clone, Debug)]
pub struct CompositeDifference {
    header: Header,
    field_differences: Vec<(String, Difference)>,
}

impl CompositeDifference {
    pub(crate) fn new(expected: Value, actual: Value, path: FieldPath) -> Self {
        Self {
            header: Header::new(expected, actual, path),
            field_differences: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, name: String, difference: Difference) {
        self.field_differences.push((name, difference));
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.field_differences.is_empty()
    }

    /// Differing members in the expected side's declaration order.
    pub fn field_differences(&self) -> &[(String, Difference)] {
        &self.field_differences
    }

    pub fn field(&self, name: &str) -> Option<&Difference> {
        self.field_differences
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, d)| d)
    }
}

// ---------------------------------------------------------------
// Sequence
// ---------------------------------------------------------------

/// Positional differences between two ordered sequences.
#[derive(Clone, Debug)]
pub struct SequenceDifference {
    header: Header,
    element_differences: BTreeMap<usize, Difference>,
    expected_only: BTreeMap<usize, Value>,
    actual_only: BTreeMap<usize, Value>,
}

impl SequenceDifference {
    pub(crate) fn new(expected: Value, actual: Value, path: FieldPath) -> Self {
        Self {
            header: Header::new(expected, actual, path),
            element_differences: BTreeMap::new(),
            expected_only: BTreeMap::new(),
            actual_only: BTreeMap::new(),
        }
    }

    pub(crate) fn insert_element(&mut self, index: usize, difference: Difference) {
        self.element_differences.insert(index, difference);
    }

    pub(crate) fn insert_expected_only(&mut self, index: usize, value: Value) {
        self.expected_only.insert(index, value);
    }

    pub(crate) fn insert_actual_only(&mut self, index: usize, value: Value) {
        self.actual_only.insert(index, value);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.element_differences.is_empty()
            && self.expected_only.is_empty()
            && self.actual_only.is_empty()
    }

    /// Differences for indexes present on both sides.
    pub fn element_differences(&self) -> &BTreeMap<usize, Difference> {
        &self.element_differences
    }

    /// Indexes that exist only in the expected sequence.
    pub fn expected_only_indexes(&self) -> BTreeSet<usize> {
        self.expected_only.keys().copied().collect()
    }

    /// Indexes that exist only in the actual sequence.
    pub fn actual_only_indexes(&self) -> BTreeSet<usize> {
        self.actual_only.keys().copied().collect()
    }

    pub fn expected_only_element(&self, index: usize) -> Option<&Value> {
        self.expected_only.get(&index)
    }

    pub fn actual_only_element(&self, index: usize) -> Option<&Value> {
        self.actual_only.get(&index)
    }
}

// ---------------------------------------------------------------
// Mapping
// ---------------------------------------------------------------

/// Key-wise differences between two mappings.
#[derive(Clone, Debug)]
pub struct MappingDifference {
    header: Header,
    value_differences: BTreeMap<Key, Difference>,
    expected_only: BTreeMap<Key, Value>,
    actual_only: BTreeMap<Key, Value>,
}

impl MappingDifference {
    pub(crate) fn new(expected: Value, actual: Value, path: FieldPath) -> Self {
        Self {
            header: Header::new(expected, actual, path),
            value_differences: BTreeMap::new(),
            expected_only: BTreeMap::new(),
            actual_only: BTreeMap::new(),
        }
    }

    pub(crate) fn insert_value(&mut self, key: Key, difference: Difference) {
        self.value_differences.insert(key, difference);
    }

    pub(crate) fn insert_expected_only(&mut self, key: Key, value: Value) {
        self.expected_only.insert(key, value);
    }

    pub(crate) fn insert_actual_only(&mut self, key: Key, value: Value) {
        self.actual_only.insert(key, value);
    }

    pub(crate) fn has_value_differences(&self) -> bool {
        !self.value_differences.is_empty()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.value_differences.is_empty()
            && self.expected_only.is_empty()
            && self.actual_only.is_empty()
    }

    /// Nested differences keyed by mapping key. Includes expected-only keys
    /// compared against a missing value, unless the mapping differs only in
    /// size.
    pub fn value_differences(&self) -> &BTreeMap<Key, Difference> {
        &self.value_differences
    }

    pub fn value_difference(&self, key: &Key) -> Option<&Difference> {
        self.value_differences.get(key)
    }

    /// Keys present only in the expected mapping.
    pub fn expected_only_keys(&self) -> BTreeSet<Key> {
        self.expected_only.keys().cloned().collect()
    }

    /// Keys present only in the actual mapping.
    pub fn actual_only_keys(&self) -> BTreeSet<Key> {
        self.actual_only.keys().cloned().collect()
    }

    /// Expected-only keys with no entry in `value_differences`.
    fn unattributed_expected_keys(&self) -> impl Iterator<Item = &Key> {
        self.expected_only
            .keys()
            .filter(|k| !self.value_differences.contains_key(*k))
    }
}

// ---------------------------------------------------------------
// Unordered collection
// ---------------------------------------------------------------

/// Pairing between expected and actual elements of two unordered collections.
///
/// A partial bijection: every expected index maps to at most one actual
/// index and vice versa. `None` marks an expected element with no
/// counterpart.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestMatch {
    expected_to_actual: Vec<Option<usize>>,
    actual_to_expected: Vec<Option<usize>>,
}

impl BestMatch {
    /// Build from matched `(expected, actual)` pairs. Pairs that would break
    /// the bijection or fall out of range are ignored.
    pub fn from_pairs<I>(expected_len: usize, actual_len: usize, pairs: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut expected_to_actual = vec![None; expected_len];
        let mut actual_to_expected = vec![None; actual_len];
        for (i, j) in pairs {
            if i < expected_len
                && j < actual_len
                && expected_to_actual[i].is_none()
                && actual_to_expected[j].is_none()
            {
                expected_to_actual[i] = Some(j);
                actual_to_expected[j] = Some(i);
            }
        }
        Self {
            expected_to_actual,
            actual_to_expected,
        }
    }

    /// The actual index matched to `expected_index`, if any.
    pub fn actual_for(&self, expected_index: usize) -> Option<usize> {
        self.expected_to_actual.get(expected_index).copied().flatten()
    }

    /// The expected index matched to `actual_index`, if any.
    pub fn expected_for(&self, actual_index: usize) -> Option<usize> {
        self.actual_to_expected.get(actual_index).copied().flatten()
    }

    /// The full expected-to-actual map, indexed by expected position.
    pub fn as_slice(&self) -> &[Option<usize>] {
        &self.expected_to_actual
    }

    /// Matched pairs in expected-index order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.expected_to_actual
            .iter()
            .enumerate()
            .filter_map(|(i, j)| j.map(|j| (i, j)))
    }

    /// Expected elements with no counterpart.
    pub fn unmatched_expected(&self) -> Vec<usize> {
        unmatched(&self.expected_to_actual)
    }

    /// Actual elements no expected element was paired with.
    pub fn unmatched_actual(&self) -> Vec<usize> {
        unmatched(&self.actual_to_expected)
    }

    /// Returns `true` if every element on both sides is matched.
    pub fn is_complete(&self) -> bool {
        self.expected_to_actual.iter().all(Option::is_some)
            && self.actual_to_expected.iter().all(Option::is_some)
    }
}

fn unmatched(side: &[Option<usize>]) -> Vec<usize> {
    side.iter()
        .enumerate()
        .filter(|(_, m)| m.is_none())
        .map(|(i, _)| i)
        .collect()
}

/// Best-match differences between two unordered collections.
#[derive(Clone, Debug)]
pub struct UnorderedCollectionDifference {
    header: Header,
    best_match: BestMatch,
    element_differences: BTreeMap<(usize, usize), Difference>,
    expected_elements: Vec<Value>,
    actual_elements: Vec<Value>,
}

impl UnorderedCollectionDifference {
    pub(crate) fn new(
        expected: Value,
        actual: Value,
        path: FieldPath,
        best_match: BestMatch,
        expected_elements: Vec<Value>,
        actual_elements: Vec<Value>,
    ) -> Self {
        Self {
            header: Header::new(expected, actual, path),
            best_match,
            element_differences: BTreeMap::new(),
            expected_elements,
            actual_elements,
        }
    }

    pub(crate) fn insert_element(&mut self, pair: (usize, usize), difference: Difference) {
        self.element_differences.insert(pair, difference);
    }

    /// Returns `true` if every element is matched exactly on both sides.
    pub(crate) fn is_exact(&self) -> bool {
        self.best_match.is_complete() && self.element_differences.is_empty()
    }

    pub fn best_match(&self) -> &BestMatch {
        &self.best_match
    }

    /// The nested difference for a matched pair; `None` when the pair matched
    /// exactly or was not matched at all.
    pub fn element_difference(
        &self,
        expected_index: usize,
        actual_index: usize,
    ) -> Option<&Difference> {
        if self.best_match.actual_for(expected_index) != Some(actual_index) {
            return None;
        }
        self.element_differences.get(&(expected_index, actual_index))
    }

    /// Nested differences for all inexactly matched pairs.
    pub fn element_differences(&self) -> &BTreeMap<(usize, usize), Difference> {
        &self.element_differences
    }

    /// Expected elements that have no counterpart in the actual collection.
    pub fn unmatched_expected(&self) -> Vec<(usize, &Value)> {
        self.best_match
            .unmatched_expected()
            .into_iter()
            .map(|i| (i, &self.expected_elements[i]))
            .collect()
    }

    /// Actual elements that were not paired with any expected element.
    pub fn unmatched_actual(&self) -> Vec<(usize, &Value)> {
        self.best_match
            .unmatched_actual()
            .into_iter()
            .map(|j| (j, &self.actual_elements[j]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(path: FieldPath, e: &str, a: &str) -> Difference {
        Difference::Leaf(LeafDifference::new(Value::from(e), Value::from(a), path))
    }

    #[test]
    fn best_match_is_a_partial_bijection() {
        let m = BestMatch::from_pairs(3, 2, [(0, 1), (1, 1), (2, 0), (5, 0)]);
        assert_eq!(m.as_slice(), &[Some(1), None, Some(0)]);
        assert_eq!(m.expected_for(1), Some(0));
        assert_eq!(m.unmatched_expected(), vec![1]);
        assert!(m.unmatched_actual().is_empty());
        assert!(!m.is_complete());
        assert_eq!(m.pairs().collect::<Vec<_>>(), vec![(0, 1), (2, 0)]);
    }

    #[test]
    fn composite_leaf_count_and_find() {
        let root = FieldPath::root();
        let mut c = CompositeDifference::new(Value::Null, Value::Null, root.clone());
        c.push("a".into(), leaf(root.clone().field("a"), "1", "2"));
        c.push("b".into(), leaf(root.clone().field("b"), "x", "y"));
        let d = Difference::Composite(c);

        assert_eq!(d.leaf_count(), 2);
        assert_eq!(d.kind_name(), "composite");
        let found = d.find(&FieldPath::root().field("b")).unwrap();
        assert_eq!(found.expected().as_str(), Some("x"));
        assert!(d.find(&FieldPath::root().field("zzz")).is_none());
        assert_eq!(d.as_composite().unwrap().field("a").unwrap().actual().as_str(), Some("2"));
    }

    #[test]
    fn sequence_one_sided_elements_flatten_against_missing() {
        let mut s = SequenceDifference::new(Value::Null, Value::Null, FieldPath::root());
        s.insert_expected_only(2, Value::from("c"));
        let d = Difference::Sequence(s);

        assert_eq!(d.leaf_count(), 1);
        let flat = d.mismatches();
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].path, FieldPath::root().index(2));
        assert_eq!(flat[0].expected.as_str(), Some("c"));
        assert!(matches!(flat[0].actual, Value::Missing));
    }

    #[test]
    fn mapping_size_only_difference_counts_each_key_once() {
        let mut m = MappingDifference::new(Value::Null, Value::Null, FieldPath::root());
        m.insert_expected_only(Key::from("k3"), Value::from("v3"));
        let d = Difference::Mapping(m);
        assert_eq!(d.leaf_count(), 1);
        assert_eq!(d.mismatches()[0].path, FieldPath::root().key("k3"));

        let mut m = MappingDifference::new(Value::Null, Value::Null, FieldPath::root());
        m.insert_expected_only(Key::from("k3"), Value::from("v3"));
        m.insert_value(Key::from("k3"), leaf(FieldPath::root().key("k3"), "v3", ""));
        assert_eq!(Difference::Mapping(m).leaf_count(), 1);
    }

    #[test]
    fn unordered_element_difference_requires_matched_pair() {
        let best = BestMatch::from_pairs(2, 2, [(0, 1), (1, 0)]);
        let mut u = UnorderedCollectionDifference::new(
            Value::Null,
            Value::Null,
            FieldPath::root(),
            best,
            vec![Value::from("a"), Value::from("b")],
            vec![Value::from("b"), Value::from("x")],
        );
        u.insert_element((1, 0), leaf(FieldPath::root().index(1), "b", "x"));

        assert!(u.element_difference(0, 1).is_none());
        assert!(u.element_difference(1, 0).is_some());
        assert!(u.element_difference(1, 1).is_none());
        assert!(!u.is_exact());
    }
}
