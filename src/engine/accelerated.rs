use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::trace;

use crate::{
    ast::{BinaryOperator, Expr, UnaryOperator},
    compiler::CompiledExpr,
    engine::{Dependency, Engine},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Division, EvalResult, Evaluator},
        value::core::Value,
    },
};

/// Identifier of the vectorised engine.
pub const ACCELERATED: &str = "accelerated";

/// Row count from which rows are spread over the rayon pool.
pub const PARALLEL_THRESHOLD: usize = 4096;

/// One step of a postfix program.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Instr {
    /// Pushes the operand with this index.
    Push(usize),
    /// Pops one value and pushes the result.
    Unary(UnaryOperator, usize),
    /// Pops two values (right on top) and pushes the result.
    Binary(BinaryOperator, usize),
}

/// An input of the program: the same value on every row, or one value per
/// row.
#[derive(Debug, Clone, PartialEq)]
enum Operand {
    Scalar(Value),
    Column(Arc<Vec<Value>>),
}

/// A compiled expression flattened into postfix order.
#[derive(Debug, Default)]
struct Program {
    instrs:   Vec<Instr>,
    operands: Vec<Operand>,
    /// Length shared by every column operand, `None` without columns.
    rows:     Option<usize>,
}

impl Program {
    /// Lowers `expr` into postfix instructions.
    ///
    /// Array literals and index expressions are computed here, once, by the
    /// tree evaluator; what remains per row is scalar arithmetic.
    fn lower(&mut self, expr: &Expr, compiled: &CompiledExpr<'_>) -> EvalResult<()> {
        match expr {
            Expr::Literal { value, .. } => self.push_operand(value.into(), expr.position()),
            Expr::Name { name, pos } => {
                let value = compiled.terms()
                                    .get(name)
                                    .cloned()
                                    .ok_or_else(|| RuntimeError::UnknownVariable { name: name.clone(),
                                                                                   pos:  *pos, })?;
                self.push_operand(value, *pos)
            },
            Expr::UnaryOp { op: UnaryOperator::Not, pos, .. } => {
                Err(RuntimeError::UnsupportedOperator { op:  "not".to_string(),
                                                        pos: *pos, })
            },
            Expr::UnaryOp { op, expr, pos } => {
                self.lower(expr, compiled)?;
                self.instrs.push(Instr::Unary(*op, *pos));
                Ok(())
            },
            Expr::BinaryOp { op: op @ (BinaryOperator::FloorDiv
                                       | BinaryOperator::And
                                       | BinaryOperator::Or),
                             pos,
                             .. } => Err(RuntimeError::UnsupportedOperator { op:  op.to_string(),
                                                                             pos: *pos, }),
            Expr::BinaryOp { left, op, right, pos } => {
                self.lower(left, compiled)?;
                self.lower(right, compiled)?;
                self.instrs.push(Instr::Binary(*op, *pos));
                Ok(())
            },
            Expr::ArrayLiteral { pos, .. } | Expr::Index { pos, .. } => {
                let value = Evaluator::new(compiled.terms(), compiled.division()).eval(expr)?;
                self.push_operand(value, *pos)
            },
        }
    }

    /// Adds an operand and the instruction that pushes it.
    ///
    /// Columns must be flat and share one length.
    fn push_operand(&mut self, value: Value, pos: usize) -> EvalResult<()> {
        let operand = match value {
            Value::Array(items) => {
                if items.iter().any(|item| !item.is_scalar()) {
                    return Err(RuntimeError::TypeError { details: "nested arrays are not supported by the accelerated engine".to_string(),
                                                         pos });
                }
                match self.rows {
                    Some(rows) if rows != items.len() => {
                        return Err(RuntimeError::ShapeMismatch { left: rows,
                                                                 right: items.len(),
                                                                 pos });
                    },
                    _ => self.rows = Some(items.len()),
                }
                Operand::Column(items)
            },
            scalar => Operand::Scalar(scalar),
        };

        self.instrs.push(Instr::Push(self.operands.len()));
        self.operands.push(operand);
        Ok(())
    }

    /// Runs the program for one row (`None` when there are no columns).
    fn run(&self, row: Option<usize>, division: Division) -> EvalResult<Value> {
        let mut stack: Vec<Value> = Vec::with_capacity(self.instrs.len());

        for instr in &self.instrs {
            match *instr {
                Instr::Push(index) => stack.push(self.operand_at(index, row)),
                Instr::Unary(op, pos) => {
                    let value = pop(&mut stack, pos)?;
                    stack.push(Evaluator::eval_unary(op, &value, pos)?);
                },
                Instr::Binary(op, pos) => {
                    let right = pop(&mut stack, pos)?;
                    let left = pop(&mut stack, pos)?;
                    stack.push(Evaluator::eval_binary(op, &left, &right, division, pos)?);
                },
            }
        }

        pop(&mut stack, 0)
    }

    fn operand_at(&self, index: usize, row: Option<usize>) -> Value {
        match (&self.operands[index], row) {
            (Operand::Column(items), Some(row)) => items[row].clone(),
            (Operand::Column(items), None) => Value::Array(Arc::clone(items)),
            (Operand::Scalar(value), _) => value.clone(),
        }
    }
}

fn pop(stack: &mut Vec<Value>, pos: usize) -> EvalResult<Value> {
    stack.pop().ok_or_else(|| RuntimeError::TypeError { details: "malformed postfix program".to_string(),
                                                        pos })
}

/// Runs expressions as flat postfix programs over scalar and column
/// operands.
///
/// Without array operands the program runs once and yields a scalar. With
/// array operands (all one-dimensional, all the same length) it runs once
/// per row and yields an array; from `threshold` rows on, rows are evaluated
/// on the rayon pool.
///
/// Needs the `parallel` feature; without it the engine stays registered but
/// cannot be selected.
#[derive(Debug, Clone, Copy)]
pub struct Accelerated {
    threshold: usize,
}

impl Default for Accelerated {
    fn default() -> Self {
        Self { threshold: PARALLEL_THRESHOLD }
    }
}

impl Accelerated {
    /// An engine that parallelises from `threshold` rows on.
    #[must_use]
    pub const fn with_threshold(threshold: usize) -> Self {
        Self { threshold }
    }

    #[cfg(feature = "parallel")]
    fn run_rows(&self, program: &Program, rows: usize, division: Division) -> EvalResult<Vec<Value>> {
        if rows >= self.threshold {
            trace!(rows, threads = rayon::current_num_threads(), "running rows in parallel");
            return (0..rows).into_par_iter()
                            .map(|row| program.run(Some(row), division))
                            .collect();
        }
        trace!(rows, "running rows sequentially");
        (0..rows).map(|row| program.run(Some(row), division)).collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn run_rows(&self, program: &Program, rows: usize, division: Division) -> EvalResult<Vec<Value>> {
        trace!(rows, threshold = self.threshold, "running rows sequentially");
        (0..rows).map(|row| program.run(Some(row), division)).collect()
    }
}

impl Engine for Accelerated {
    fn name(&self) -> &'static str {
        ACCELERATED
    }

    fn dependency(&self) -> Option<Dependency> {
        Some(Dependency { name:      "rayon",
                          available: cfg!(feature = "parallel"),
                          hint:      "enable the `parallel` feature", })
    }

    fn evaluate(&self, compiled: &CompiledExpr<'_>) -> EvalResult<Value> {
        let mut program = Program::default();
        program.lower(compiled.tree(), compiled)?;
        trace!(instructions = program.instrs.len(),
               operands = program.operands.len(),
               rows = ?program.rows,
               "lowered");

        match program.rows {
            None => program.run(None, compiled.division()),
            Some(rows) => self.run_rows(&program, rows, compiled.division()).map(Value::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        compiler::compile, interpreter::parser::grammar::Grammar, scope::core::ScopeBuilder,
    };

    fn lowered(source: &str) -> EvalResult<Program> {
        let scope = ScopeBuilder::new().build();
        let compiled = compile(source, Grammar::Strict, &scope, ACCELERATED, true).unwrap();
        let mut program = Program::default();
        program.lower(compiled.tree(), &compiled)?;
        Ok(program)
    }

    #[test]
    fn postfix_order_puts_operators_after_operands() {
        let program = lowered("1 + 2 * 3").unwrap();
        assert_eq!(program.instrs,
                   vec![Instr::Push(0),
                        Instr::Push(1),
                        Instr::Push(2),
                        Instr::Binary(BinaryOperator::Mul, 6),
                        Instr::Binary(BinaryOperator::Add, 2)]);
        assert_eq!(program.run(None, Division::True), Ok(Value::Integer(7)));
    }

    #[test]
    fn columns_must_share_a_length() {
        let err = lowered("[1, 2] + [1, 2, 3]").unwrap_err();
        assert_eq!(err,
                   RuntimeError::ShapeMismatch { left:  2,
                                                 right: 3,
                                                 pos:   9, });
    }

    #[test]
    fn nested_columns_are_rejected() {
        let err = lowered("[[1], [2]] + 1").unwrap_err();
        assert!(matches!(err, RuntimeError::TypeError { pos: 0, .. }));
    }

    #[test]
    fn strict_logic_and_floor_division_are_unsupported() {
        for source in ["1 and 2", "not 1", "7 // 2"] {
            assert!(matches!(lowered(source),
                             Err(RuntimeError::UnsupportedOperator { .. })),
                    "{source}");
        }
    }

    #[test]
    fn rows_run_independently() {
        let program = lowered("[1, 2, 3] * 2 - 1").unwrap();
        let rows = (0..3).map(|row| program.run(Some(row), Division::True))
                         .collect::<EvalResult<Vec<_>>>()
                         .unwrap();
        assert_eq!(rows, vec![Value::Integer(1), Value::Integer(3), Value::Integer(5)]);
    }

    #[test]
    fn parallel_and_sequential_rows_agree() {
        let scope = ScopeBuilder::new().build();
        let source = "[1, 2, 3, 4, 5, 6, 7, 8] ** 2 % 5";
        let compiled = compile(source, Grammar::Extended, &scope, ACCELERATED, true).unwrap();

        let eager = Accelerated::with_threshold(1).evaluate(&compiled);
        let lazy = Accelerated::with_threshold(usize::MAX).evaluate(&compiled);
        assert_eq!(eager, lazy);
    }
}
