//! Flat rendering of a difference tree.
//!
//! Rich presentation is left to callers; this module provides the
//! [`DifferenceFormatter`] seam and a one-line-per-mismatch implementation
//! used by the assertion helpers and the CLI.

use serde::{Deserialize, Serialize};

use crate::difference::{Difference, Mismatch};
use crate::path::FieldPath;

/// Renders a difference tree for humans.
pub trait DifferenceFormatter {
    fn format(&self, difference: &Difference) -> String;
}

/// One line per leaf divergence: `path: expected X, actual Y`.
#[derive(Clone, Copy, Debug)]
pub struct FlatFormatter {
    limit: Option<usize>,
}

impl Default for FlatFormatter {
    fn default() -> Self {
        Self { limit: Some(50) }
    }
}

impl FlatFormatter {
    /// Show at most `limit` lines, then a count of the rest.
    pub fn with_limit(limit: usize) -> Self {
        Self { limit: Some(limit) }
    }

    pub fn unlimited() -> Self {
        Self { limit: None }
    }
}

impl DifferenceFormatter for FlatFormatter {
    fn format(&self, difference: &Difference) -> String {
        let mismatches = difference.mismatches();
        let shown = self.limit.map_or(mismatches.len(), |l| l.min(mismatches.len()));

        let mut lines: Vec<String> = mismatches[..shown].iter().map(line).collect();
        if shown < mismatches.len() {
            lines.push(format!("... and {} more", mismatches.len() - shown));
        }
        lines.join("\n")
    }
}

fn line(m: &Mismatch) -> String {
    format!("{}: expected {}, actual {}", m.path, m.expected, m.actual)
}

/// A serializable view of one [`Mismatch`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MismatchRow {
    pub path: FieldPath,
    /// The path as displayed, e.g. `items[3].name`.
    pub location: String,
    pub expected: String,
    pub actual: String,
}

impl From<&Mismatch> for MismatchRow {
    fn from(m: &Mismatch) -> Self {
        Self {
            path: m.path.clone(),
            location: m.path.to_string(),
            expected: m.expected.to_string(),
            actual: m.actual.to_string(),
        }
    }
}

/// Flatten a difference into serializable rows.
pub fn rows(difference: &Difference) -> Vec<MismatchRow> {
    difference.mismatches().iter().map(MismatchRow::from).collect()
}
