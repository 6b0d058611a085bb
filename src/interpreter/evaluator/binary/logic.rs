use crate::{
    ast::{BinaryOperator, Expr},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
};

impl Evaluator<'_> {
    /// Evaluates `&` or `|`.
    ///
    /// Logical on two booleans, bitwise when at least one side is an integer
    /// (booleans then count as `0` and `1`). Reals and text are rejected.
    ///
    /// # Example
    /// ```
    /// use scopeval::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Evaluator, value::core::Value},
    /// };
    ///
    /// let both = Evaluator::eval_bitwise(BinaryOperator::BitAnd, &Value::Bool(true), &Value::Bool(false), 0);
    /// assert_eq!(both.unwrap(), Value::Bool(false));
    ///
    /// let bits = Evaluator::eval_bitwise(BinaryOperator::BitOr, &Value::Integer(12), &Value::Integer(3), 0);
    /// assert_eq!(bits.unwrap(), Value::Integer(15));
    /// ```
    pub fn eval_bitwise(op: BinaryOperator,
                        left: &Value,
                        right: &Value,
                        pos: usize)
                        -> EvalResult<Value> {
        let is_and = op == BinaryOperator::BitAnd;

        match (left, right) {
            (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(if is_and { *a && *b } else { *a || *b })),
            (Value::Integer(_) | Value::Bool(_), Value::Integer(_) | Value::Bool(_)) => {
                let a = integral(left);
                let b = integral(right);
                Ok(Value::Integer(if is_and { a & b } else { a | b }))
            },
            _ => Err(RuntimeError::TypeError { details: format!("unsupported operand types for {op}: '{}' and '{}'",
                                                                left.type_name(),
                                                                right.type_name()),
                                               pos }),
        }
    }

    /// Evaluates the value-level `and`/`or` on two already computed operands.
    ///
    /// Returns the operand that decides the result, like the short-circuit
    /// form does.
    pub fn eval_logic(op: BinaryOperator,
                      left: &Value,
                      right: &Value,
                      pos: usize)
                      -> EvalResult<Value> {
        let decided_by_left = match op {
            BinaryOperator::And => !left.truthy(pos)?,
            _ => left.truthy(pos)?,
        };
        Ok(if decided_by_left { left.clone() } else { right.clone() })
    }

    /// Evaluates strict `and`/`or`, skipping the right operand when the left
    /// one decides the result.
    pub(crate) fn eval_short_circuit(&self,
                                     op: BinaryOperator,
                                     left: &Expr,
                                     right: &Expr,
                                     pos: usize)
                                     -> EvalResult<Value> {
        let left = self.eval(left)?;
        let decided_by_left = match op {
            BinaryOperator::And => !left.truthy(pos)?,
            _ => left.truthy(pos)?,
        };
        if decided_by_left { Ok(left) } else { self.eval(right) }
    }
}

const fn integral(value: &Value) -> i64 {
    match value {
        Value::Integer(n) => *n,
        Value::Bool(true) => 1,
        _ => 0,
    }
}
