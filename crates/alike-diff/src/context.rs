//! Per-call comparison state.

use alike_value::{NodeId, ValueError};

use crate::config::CompareConfig;
use crate::error::CompareError;
use crate::path::{FieldPath, PathSegment};

/// Mutable state for one top-level comparison.
///
/// Holds the stack of `(expected, actual)` node pairs currently being
/// compared, the active configuration, and the path of the current position.
/// A context is created for each top-level call and never shared.
#[derive(Debug)]
pub struct ComparisonContext<'c> {
    config: &'c CompareConfig,
    active: Vec<(NodeId, NodeId)>,
    path: FieldPath,
}

impl<'c> ComparisonContext<'c> {
    /// Create an empty context at the root path.
    pub fn new(config: &'c CompareConfig) -> Self {
        Self {
            config,
            active: Vec::new(),
            path: FieldPath::root(),
        }
    }

    /// The configuration of this comparison.
    pub fn config(&self) -> &'c CompareConfig {
        self.config
    }

    /// The path of the values currently being compared.
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Returns `true` if the pair is already on the active stack.
    pub fn is_active(&self, pair: (NodeId, NodeId)) -> bool {
        self.active.contains(&pair)
    }

    /// Number of node pairs on the active stack.
    pub fn depth(&self) -> usize {
        self.active.len()
    }

    /// Run `f` with `pair` pushed on the active stack.
    ///
    /// The pair is popped when `f` returns, whatever it returns. A `None`
    /// pair (leaves have no identity) leaves the stack untouched.
    pub fn enter<T>(
        &mut self,
        pair: Option<(NodeId, NodeId)>,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let Some(pair) = pair else {
            return f(self);
        };
        self.active.push(pair);
        let out = f(self);
        self.active.pop();
        out
    }

    /// Run `f` with `segment` appended to the current path.
    pub fn descend<T>(&mut self, segment: PathSegment, f: impl FnOnce(&mut Self) -> T) -> T {
        self.path.push(segment);
        let out = f(self);
        self.path.pop();
        out
    }

    /// An introspection error at the current path.
    pub fn introspection(&self, source: ValueError) -> CompareError {
        CompareError::Introspection {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alike_value::Value;

    #[test]
    fn enter_pops_on_every_return() {
        let config = CompareConfig::default();
        let mut ctx = ComparisonContext::new(&config);
        let a = Value::list([1]);
        let b = Value::list([2]);
        let pair = a.node_id().zip(b.node_id()).unwrap();

        let result: Result<(), &str> = ctx.enter(Some(pair), |ctx| {
            assert!(ctx.is_active(pair));
            assert_eq!(ctx.depth(), 1);
            Err::<(), _>("early")?;
            Ok(())
        });
        assert!(result.is_err());
        assert_eq!(ctx.depth(), 0);
        assert!(!ctx.is_active(pair));

        ctx.enter(None, |ctx| assert_eq!(ctx.depth(), 0));
    }

    #[test]
    fn descend_restores_path() {
        let config = CompareConfig::default();
        let mut ctx = ComparisonContext::new(&config);
        ctx.descend(PathSegment::Field("a".into()), |ctx| {
            ctx.descend(PathSegment::Index(1), |ctx| {
                assert_eq!(ctx.path().to_string(), "a[1]");
            });
            assert_eq!(ctx.path().to_string(), "a");
        });
        assert!(ctx.path().is_root());
    }

    #[test]
    fn introspection_error_carries_path() {
        let config = CompareConfig::default();
        let mut ctx = ComparisonContext::new(&config);
        let err = ctx.descend(PathSegment::Field("x".into()), |ctx| {
            ctx.introspection(ValueError::Poisoned)
        });
        assert!(matches!(
            err,
            CompareError::Introspection { ref path, source: ValueError::Poisoned }
                if path.to_string() == "x"
        ));
    }
}
