use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Division, EvalResult, Evaluator},
        value::core::{Number, Value},
    },
    util::num::{floor_div_i64, floor_mod_f64},
};

impl Evaluator<'_> {
    /// Reads both operands as numbers, booleans counting as `0` and `1`.
    pub(crate) fn numeric_operands(op: BinaryOperator,
                                   left: &Value,
                                   right: &Value,
                                   pos: usize)
                                   -> EvalResult<(Number, Number)> {
        match (left.as_number(), right.as_number()) {
            (Some(l), Some(r)) => Ok((l, r)),
            _ => Err(RuntimeError::TypeError { details: format!("unsupported operand types for {op}: '{}' and '{}'",
                                                                left.type_name(),
                                                                right.type_name()),
                                               pos }),
        }
    }

    /// Evaluates `+`, `-` or `*` on two scalars.
    ///
    /// Two integral operands use checked integer arithmetic; a real operand
    /// promotes the other.
    ///
    /// # Example
    /// ```
    /// use scopeval::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Evaluator, value::core::Value},
    /// };
    ///
    /// let sum = Evaluator::eval_arithmetic(BinaryOperator::Add, &Value::Integer(2), &Value::Real(0.5), 0);
    /// assert_eq!(sum.unwrap(), Value::Real(2.5));
    ///
    /// let overflow = Evaluator::eval_arithmetic(BinaryOperator::Mul, &Value::Integer(i64::MAX), &Value::Integer(2), 0);
    /// assert!(overflow.is_err());
    /// ```
    pub fn eval_arithmetic(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           pos: usize)
                           -> EvalResult<Value> {
        let (l, r) = Self::numeric_operands(op, left, right, pos)?;

        if let (Number::Int(a), Number::Int(b)) = (l, r) {
            let result = match op {
                BinaryOperator::Add => a.checked_add(b),
                BinaryOperator::Sub => a.checked_sub(b),
                BinaryOperator::Mul => a.checked_mul(b),
                _ => {
                    return Err(RuntimeError::UnsupportedOperator { op: op.to_string(),
                                                                   pos });
                },
            };
            return result.map(Value::Integer).ok_or(RuntimeError::Overflow { pos });
        }

        let (a, b) = (l.to_f64(), r.to_f64());
        match op {
            BinaryOperator::Add => Ok(Value::Real(a + b)),
            BinaryOperator::Sub => Ok(Value::Real(a - b)),
            BinaryOperator::Mul => Ok(Value::Real(a * b)),
            _ => Err(RuntimeError::UnsupportedOperator { op: op.to_string(),
                                                         pos }),
        }
    }

    /// Evaluates `/`.
    ///
    /// True division always yields a real. Legacy division floors when both
    /// operands are integral and is real division otherwise.
    ///
    /// # Example
    /// ```
    /// use scopeval::interpreter::{
    ///     evaluator::core::{Division, Evaluator},
    ///     value::core::Value,
    /// };
    ///
    /// let (seven, two) = (Value::Integer(7), Value::Integer(2));
    ///
    /// assert_eq!(Evaluator::eval_division(&seven, &two, Division::True, 0).unwrap(),
    ///            Value::Real(3.5));
    /// assert_eq!(Evaluator::eval_division(&seven, &two, Division::Legacy, 0).unwrap(),
    ///            Value::Integer(3));
    /// ```
    pub fn eval_division(left: &Value,
                         right: &Value,
                         division: Division,
                         pos: usize)
                         -> EvalResult<Value> {
        let (l, r) = Self::numeric_operands(BinaryOperator::Div, left, right, pos)?;

        if division == Division::Legacy
           && let (Number::Int(a), Number::Int(b)) = (l, r)
        {
            return floor_div_i64(a, b, pos).map(Value::Integer);
        }

        let (a, b) = (l.to_f64(), r.to_f64());
        if b == 0.0 {
            return Err(RuntimeError::DivisionByZero { pos });
        }
        Ok(Value::Real(a / b))
    }

    /// Evaluates `//`, rounding toward negative infinity.
    pub fn eval_floor_division(left: &Value, right: &Value, pos: usize) -> EvalResult<Value> {
        match Self::numeric_operands(BinaryOperator::FloorDiv, left, right, pos)? {
            (Number::Int(a), Number::Int(b)) => floor_div_i64(a, b, pos).map(Value::Integer),
            (l, r) => {
                let (a, b) = (l.to_f64(), r.to_f64());
                if b == 0.0 {
                    return Err(RuntimeError::DivisionByZero { pos });
                }
                Ok(Value::Real((a / b).floor()))
            },
        }
    }

    /// Evaluates `%`.
    ///
    /// Operands are cast to reals; the result takes the sign of the divisor.
    ///
    /// # Example
    /// ```
    /// use scopeval::interpreter::{evaluator::core::Evaluator, value::core::Value};
    ///
    /// let r = Evaluator::eval_modulo(&Value::Integer(-7), &Value::Integer(3), 0).unwrap();
    /// assert_eq!(r, Value::Real(2.0));
    /// ```
    pub fn eval_modulo(left: &Value, right: &Value, pos: usize) -> EvalResult<Value> {
        let (l, r) = Self::numeric_operands(BinaryOperator::Mod, left, right, pos)?;
        floor_mod_f64(l.to_f64(), r.to_f64(), pos).map(Value::Real)
    }
}
