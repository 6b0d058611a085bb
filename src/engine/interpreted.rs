use crate::{
    compiler::CompiledExpr,
    engine::Engine,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
};

/// Identifier of the tree-walking engine.
pub const INTERPRETED: &str = "interpreted";

/// Evaluates the expression tree node by node.
#[derive(Debug, Clone, Copy, Default)]
pub struct Interpreted;

impl Engine for Interpreted {
    fn name(&self) -> &'static str {
        INTERPRETED
    }

    fn evaluate(&self, compiled: &CompiledExpr<'_>) -> EvalResult<Value> {
        Evaluator::new(compiled.terms(), compiled.division()).eval(compiled.tree())
    }
}
