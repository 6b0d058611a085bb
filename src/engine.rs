use tracing::debug;

use crate::{
    compiler::CompiledExpr,
    error::EvalError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
    registry::Registry,
};

/// Tree-walking backend.
///
/// Evaluates the parsed tree directly and supports every construct of both
/// grammars, including nested arrays and short-circuit logic.
pub mod interpreted;

/// Vectorised backend.
///
/// Lowers the tree into a flat postfix program and runs it once per row of
/// its array operands, in parallel for large inputs.
pub mod accelerated;

/// A runtime dependency an engine needs before it can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dependency {
    /// Name of the dependency.
    pub name:      &'static str,
    /// Whether this build provides it.
    pub available: bool,
    /// How to make it available.
    pub hint:      &'static str,
}

/// A backend that executes compiled expressions.
///
/// Engines are registered once in a [`crate::registry::Registry`] and shared
/// by every evaluation, so they hold no per-call state.
pub trait Engine: Send + Sync {
    /// The registry identifier of this engine.
    fn name(&self) -> &'static str;

    /// The runtime dependency the engine needs, if any.
    fn dependency(&self) -> Option<Dependency> {
        None
    }

    /// Computes the value of a compiled expression.
    fn evaluate(&self, compiled: &CompiledExpr<'_>) -> EvalResult<Value>;
}

impl std::fmt::Debug for dyn Engine + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Engine").field(&self.name()).finish()
    }
}

/// Runs a compiled expression on the engine it was compiled for.
///
/// The backend is looked up in `registry` by the identifier tagged onto
/// `compiled`, and its own failure is passed through unchanged.
///
/// # Errors
/// - `EvalError::Configuration` or `EvalError::DependencyMissing` when the
///   tagged engine is not usable in `registry`.
/// - `EvalError::Engine` wrapping the engine's `RuntimeError`.
pub fn execute(registry: &Registry, compiled: &CompiledExpr<'_>) -> Result<Value, EvalError> {
    let engine = registry.engine(compiled.engine())?;
    debug!(engine = engine.name(), expr = %compiled.tree(), "executing");

    engine.evaluate(compiled)
          .map_err(|source| EvalError::Engine { engine: engine.name().to_string(),
                                                source })
}
