//! Deep structural comparison engine for test assertions.
//!
//! Decides whether two independently built values are "equal enough" and,
//! when they are not, explains every point of divergence as a navigable
//! [`Difference`] tree. Traversal is cycle-safe, leniency modes can be
//! combined freely, and unordered collections are paired by best match.
//!
//! # Quick Start
//!
//! ```rust
//! use alike_diff::{CompareConfig, LeniencyMode, StructuralComparator};
//! use alike_value::Value;
//!
//! let comparator = StructuralComparator::new(
//!     CompareConfig::default().with_mode(LeniencyMode::LenientOrder),
//! );
//! let expected = Value::list(["a", "b"]);
//! assert!(comparator.compare(&expected, &Value::list(["b", "a"])).unwrap().is_none());
//!
//! let diff = comparator.compare(&expected, &Value::list(["a"])).unwrap().unwrap();
//! assert_eq!(diff.leaf_count(), 1);
//! ```
//!
//! # Key Types
//!
//! - [`StructuralComparator`] / [`compare`] -- Recursive comparison entry points
//! - [`CompareConfig`] / [`LeniencyMode`] -- Leniency configuration
//! - [`TemporalRule`] / [`MatchStrategy`] -- Temporal and matching policies
//! - [`Difference`] and its kinds -- The difference tree
//! - [`FieldPath`] / [`PathSegment`] -- Where a difference sits
//! - [`ComparisonContext`] -- Per-call cycle guard and path state
//! - [`DifferenceFormatter`] / [`FlatFormatter`] -- Minimal report rendering

pub mod assert;
pub mod comparator;
mod composite;
pub mod config;
pub mod context;
pub mod difference;
pub mod error;
mod mapping;
pub mod matching;
pub mod path;
pub mod report;
mod sequence;
mod unordered;

// Re-exports for convenience.
pub use assert::{check, check_property};
pub use comparator::{compare, StructuralComparator};
pub use config::{CompareConfig, LeniencyMode, MatchStrategy, TemporalPredicate, TemporalRule};
pub use context::ComparisonContext;
pub use difference::{
    BestMatch, CompositeDifference, Difference, LeafDifference, MappingDifference, Mismatch,
    SequenceDifference, UnorderedCollectionDifference,
};
pub use error::{AssertionError, CompareError, CompareResult};
pub use path::{FieldPath, PathSegment};
pub use report::{DifferenceFormatter, FlatFormatter, MismatchRow};
