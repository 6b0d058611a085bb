use crate::{
    ast::UnaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
};

impl Evaluator<'_> {
    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Negate` and `Plus`: numeric negation and identity; booleans become
    ///   integers.
    /// - `Invert`: logical not on booleans, bitwise not on integers.
    /// - `Not`: the negated truth value, always a boolean.
    ///
    /// Arrays are handled elementwise, except for `Not`, which needs a single
    /// truth value.
    ///
    /// # Example
    /// ```
    /// use scopeval::{
    ///     ast::UnaryOperator,
    ///     interpreter::{evaluator::core::Evaluator, value::core::Value},
    /// };
    ///
    /// let v = Evaluator::eval_unary(UnaryOperator::Negate, &Value::Integer(5), 0).unwrap();
    /// assert_eq!(v, Value::Integer(-5));
    ///
    /// let v = Evaluator::eval_unary(UnaryOperator::Invert, &Value::Integer(5), 0).unwrap();
    /// assert_eq!(v, Value::Integer(-6));
    ///
    /// let flags = Value::from(vec![Value::Bool(true), Value::Bool(false)]);
    /// let v = Evaluator::eval_unary(UnaryOperator::Invert, &flags, 0).unwrap();
    /// assert_eq!(v, Value::from(vec![Value::Bool(false), Value::Bool(true)]));
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: &Value, pos: usize) -> EvalResult<Value> {
        if op == UnaryOperator::Not {
            return Ok(Value::Bool(!value.truthy(pos)?));
        }

        match value {
            Value::Array(items) => {
                let mapped = items.iter()
                                  .map(|item| Self::eval_unary(op, item, pos))
                                  .collect::<EvalResult<Vec<_>>>()?;
                Ok(Value::from(mapped))
            },
            scalar => Self::eval_scalar_unary(op, scalar, pos),
        }
    }

    fn eval_scalar_unary(op: UnaryOperator, value: &Value, pos: usize) -> EvalResult<Value> {
        match (op, value) {
            (UnaryOperator::Negate, Value::Integer(n)) => {
                n.checked_neg()
                 .map(Value::Integer)
                 .ok_or(RuntimeError::Overflow { pos })
            },
            (UnaryOperator::Negate, Value::Real(r)) => Ok(Value::Real(-r)),
            (UnaryOperator::Negate, Value::Bool(b)) => Ok(Value::Integer(-i64::from(*b))),
            (UnaryOperator::Plus, Value::Integer(_) | Value::Real(_)) => Ok(value.clone()),
            (UnaryOperator::Plus, Value::Bool(b)) => Ok(Value::Integer(i64::from(*b))),
            (UnaryOperator::Invert, Value::Bool(b)) => Ok(Value::Bool(!b)),
            (UnaryOperator::Invert, Value::Integer(n)) => Ok(Value::Integer(!n)),
            _ => {
                Err(RuntimeError::TypeError { details: format!("bad operand type for unary {op}: '{}'",
                                                               value.type_name()),
                                              pos })
            },
        }
    }
}
