//! The engine bundled with Oasis, built on [`oasis_parser`] and [`oasis_compute`].

use oasis_compute::{
    render,
    symbolic::{simplify_with, step_collector::StepCount, Expr},
    MarkupFormat,
};
use oasis_parser::{parser::{ast::Expr as AstExpr, Parser}, preprocess};
use std::collections::HashMap;
use super::{ComputationError, Engine, RawHandle};

impl From<oasis_compute::Error> for ComputationError {
    fn from(err: oasis_compute::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Configuration of an [`OasisEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// The markup produced by [`Engine::render`].
    pub format: MarkupFormat,

    /// The number of passes the simplifier may run before giving up on an expression.
    pub max_passes: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            format: MarkupFormat::MathMl,
            max_passes: oasis_compute::symbolic::simplify::DEFAULT_MAX_PASSES,
        }
    }
}

/// An [`Engine`] that keeps its expressions in a table keyed by handle.
///
/// Handles are allocated in increasing order and never reused.
#[derive(Debug)]
pub struct OasisEngine {
    config: EngineConfig,
    exprs: HashMap<u32, Expr>,
    next_id: u32,
}

impl Default for OasisEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl OasisEngine {
    /// Creates an engine with no live expressions.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            exprs: HashMap::new(),
            next_id: 1,
        }
    }

    /// Returns the configuration of the engine.
    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// Returns the expression behind a live handle.
    pub fn expr(&self, handle: RawHandle) -> Option<&Expr> {
        self.exprs.get(&handle.0)
    }

    /// Returns the number of live expressions.
    pub fn live_count(&self) -> usize {
        self.exprs.len()
    }

    /// Stores the expression under a fresh handle. Returns [`None`] once every handle has been
    /// used.
    fn insert(&mut self, expr: Expr) -> Option<RawHandle> {
        let id = self.next_id;
        self.next_id = id.checked_add(1)?;
        self.exprs.insert(id, expr);
        Some(RawHandle(id))
    }
}

impl Engine for OasisEngine {
    fn normalize(&self, raw: &str) -> String {
        preprocess(raw)
    }

    fn parse(&mut self, normalized: &str) -> RawHandle {
        match Parser::new(normalized).try_parse_full::<AstExpr>() {
            Ok(ast) => {
                let handle = self.insert(Expr::from(ast)).unwrap_or(RawHandle::NONE);
                tracing::trace!(handle = handle.0, input = normalized, "parsed expression");
                handle
            },
            Err(err) => {
                tracing::debug!(error = %err, input = normalized, "failed to parse expression");
                RawHandle::NONE
            },
        }
    }

    fn render(&self, handle: RawHandle) -> String {
        match self.exprs.get(&handle.0) {
            Some(expr) => render(expr, self.config.format),
            None => {
                tracing::warn!(handle = handle.0, "render of an unknown handle");
                String::new()
            },
        }
    }

    fn simplify(&mut self, handle: RawHandle) -> Result<RawHandle, ComputationError> {
        let expr = self.exprs.get(&handle.0)
            .ok_or_else(|| ComputationError::new("the expression no longer exists"))?;

        let mut steps = StepCount::default();
        let simplified = simplify_with(expr, self.config.max_passes, &mut steps)?;
        tracing::debug!(handle = handle.0, steps = steps.0, "simplified expression");

        self.insert(simplified)
            .ok_or_else(|| ComputationError::new("too many expressions have been created"))
    }

    fn release(&mut self, handle: RawHandle) {
        if self.exprs.remove(&handle.0).is_some() {
            tracing::trace!(handle = handle.0, "released expression");
        } else {
            tracing::warn!(handle = handle.0, "release of an unknown handle");
        }
    }

    fn live_handles(&self) -> Option<usize> {
        Some(self.live_count())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn text_engine() -> OasisEngine {
        OasisEngine::new(EngineConfig { format: MarkupFormat::Text, ..Default::default() })
    }

    #[test]
    fn parse_and_render() {
        let mut engine = text_engine();
        let normalized = engine.normalize("2x + 3x");
        let handle = engine.parse(&normalized);
        assert!(!handle.is_none());
        assert_eq!(engine.render(handle), "2x+3x");
        assert_eq!(engine.live_count(), 1);
    }

    #[test]
    fn parse_failure_is_sentinel() {
        let mut engine = text_engine();
        assert_eq!(engine.parse("2*x+"), RawHandle::NONE);
        assert_eq!(engine.parse(""), RawHandle::NONE);
        assert_eq!(engine.live_count(), 0);
    }

    #[test]
    fn simplify_creates_new_handle() {
        let mut engine = text_engine();
        let handle = engine.parse("2*x+3*x");
        let simplified = engine.simplify(handle).unwrap();
        assert_ne!(handle, simplified);
        assert_eq!(engine.render(simplified), "5x");
        assert_eq!(engine.render(handle), "2x+3x");
        assert_eq!(engine.live_handles(), Some(2));
    }

    #[test]
    fn computation_errors() {
        let mut engine = text_engine();
        let handle = engine.parse("1/0");
        assert_eq!(engine.simplify(handle), Err(ComputationError::new("division by zero")));
        assert_eq!(engine.live_count(), 1);
    }

    #[test]
    fn pass_limit_is_configurable() {
        let mut engine = OasisEngine::new(EngineConfig { format: MarkupFormat::Text, max_passes: 1 });
        let handle = engine.parse("(x+1)^8");
        assert!(engine.simplify(handle).is_err());
    }

    #[test]
    fn oversized_expansion_is_an_error() {
        let mut engine = text_engine();
        let handle = engine.parse("(a+b+c+d+e+f+g+h)^8");
        assert_eq!(
            engine.simplify(handle),
            Err(ComputationError::new("expanding this expression would produce more than 1024 terms")),
        );
        assert_eq!(engine.live_count(), 1);
    }

    #[test]
    fn handles_are_not_reused() {
        let mut engine = text_engine();
        let first = engine.parse("x");
        engine.release(first);
        let second = engine.parse("x");
        assert!(second > first);

        // releasing twice only logs
        engine.release(first);
        assert_eq!(engine.live_count(), 1);
    }

    #[test]
    fn mathml_by_default() {
        let mut engine = OasisEngine::default();
        let handle = engine.parse("x");
        assert_eq!(
            engine.render(handle),
            "<math xmlns=\"http://www.w3.org/1998/Math/MathML\"><mi>x</mi></math>",
        );
    }
}
