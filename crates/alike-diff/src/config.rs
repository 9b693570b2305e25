//! Leniency configuration for a comparison.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use alike_value::{Temporal, TimeUnit};
use serde::{Deserialize, Serialize};

use crate::error::{CompareError, CompareResult};

/// An independent relaxation of strict structural equality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeniencyMode {
    /// Skip comparison wherever the expected value is its type's default.
    IgnoreDefaults,
    /// Compare sequences as unordered collections.
    LenientOrder,
    /// Compare temporal leaves with the configured [`TemporalRule`].
    LenientDates,
}

/// A caller-supplied temporal equality check.
#[derive(Clone)]
pub struct TemporalPredicate(Arc<dyn Fn(&Temporal, &Temporal) -> bool + Send + Sync>);

impl TemporalPredicate {
    /// Wrap a closure as a predicate.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Temporal, &Temporal) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Returns `true` if the predicate accepts the pair.
    pub fn test(&self, expected: &Temporal, actual: &Temporal) -> bool {
        (self.0)(expected, actual)
    }
}

impl fmt::Debug for TemporalPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TemporalPredicate(..)")
    }
}

/// How temporal leaves compare when [`LeniencyMode::LenientDates`] is on.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum TemporalRule {
    /// Any two temporal values are equal; only presence matters.
    #[default]
    PresenceOnly,
    /// Equal when on the same axis and at most `millis` apart.
    Within { millis: i64 },
    /// Equal when both fall into the same `unit` bucket.
    TruncateTo { unit: TimeUnit },
    /// Equal when the predicate says so.
    #[serde(skip)]
    Custom(TemporalPredicate),
}

impl TemporalRule {
    /// A rule backed by a closure.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&Temporal, &Temporal) -> bool + Send + Sync + 'static,
    {
        Self::Custom(TemporalPredicate::new(f))
    }

    /// Returns `true` if the rule considers the two values equal.
    pub fn accepts(&self, expected: &Temporal, actual: &Temporal) -> bool {
        match self {
            Self::PresenceOnly => true,
            Self::Within { millis } => expected
                .distance_millis(actual)
                .is_some_and(|d| d <= *millis),
            Self::TruncateTo { unit } => expected.truncated_eq(actual, *unit),
            Self::Custom(predicate) => predicate.test(expected, actual),
        }
    }
}

/// Assignment strategy for unordered collections.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Lowest-score pairs first; fast, not always globally optimal.
    #[default]
    Greedy,
    /// Minimum total score, for collections of at most `max_len` elements.
    /// Larger collections fall back to greedy.
    Optimal { max_len: usize },
}

impl MatchStrategy {
    /// Optimal matching for collections of up to 64 elements.
    pub const fn optimal() -> Self {
        Self::Optimal { max_len: 64 }
    }
}

/// Configuration for one or more comparisons.
///
/// The default is strict: no leniency modes, greedy matching.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Active leniency modes.
    pub modes: BTreeSet<LeniencyMode>,
    /// Member names that identify an element when scoring unordered matches.
    pub identity_fields: BTreeSet<String>,
    /// Extra score for each differing identity member.
    pub identity_weight: usize,
    /// Pairwise comparisons above which an unordered comparison is logged
    /// as expensive.
    pub unordered_warn_pairs: usize,
    pub temporal_rule: TemporalRule,
    pub strategy: MatchStrategy,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            modes: BTreeSet::new(),
            identity_fields: BTreeSet::new(),
            identity_weight: 10,
            unordered_warn_pairs: 10_000,
            temporal_rule: TemporalRule::default(),
            strategy: MatchStrategy::default(),
        }
    }
}

impl CompareConfig {
    /// No leniency at all.
    pub fn strict() -> Self {
        Self::default()
    }

    /// Ignore defaults and element order.
    pub fn lenient() -> Self {
        Self::default().with_modes([LeniencyMode::IgnoreDefaults, LeniencyMode::LenientOrder])
    }

    /// Add leniency modes.
    pub fn with_modes<I: IntoIterator<Item = LeniencyMode>>(mut self, modes: I) -> Self {
        self.modes.extend(modes);
        self
    }

    /// Add one leniency mode.
    pub fn with_mode(mut self, mode: LeniencyMode) -> Self {
        self.modes.insert(mode);
        self
    }

    /// Set the rule used under [`LeniencyMode::LenientDates`].
    pub fn with_temporal_rule(mut self, rule: TemporalRule) -> Self {
        self.temporal_rule = rule;
        self
    }

    /// Set the unordered matching strategy.
    pub fn with_strategy(mut self, strategy: MatchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Add member names that identify an element.
    pub fn with_identity_fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.identity_fields.extend(names.into_iter().map(Into::into));
        self
    }

    /// Set the penalty per differing identity member.
    ///
    /// Scores saturate, so any weight is accepted.
    pub fn with_identity_weight(mut self, weight: usize) -> Self {
        self.identity_weight = weight;
        self
    }

    /// Returns `true` if `mode` is active.
    pub fn has(&self, mode: LeniencyMode) -> bool {
        self.modes.contains(&mode)
    }

    /// Parse a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml(text: &str) -> CompareResult<Self> {
        toml::from_str(text).map_err(|e| CompareError::Config(e.to_string()))
    }

    /// Render this configuration as TOML.
    ///
    /// Fails for a [`TemporalRule::Custom`] rule, which has no textual form.
    pub fn to_toml(&self) -> CompareResult<String> {
        if matches!(self.temporal_rule, TemporalRule::Custom(_)) {
            return Err(CompareError::Unsupported(
                "a custom temporal rule cannot be serialized".into(),
            ));
        }
        toml::to_string(self).map_err(|e| CompareError::Config(e.to_string()))
    }
}
