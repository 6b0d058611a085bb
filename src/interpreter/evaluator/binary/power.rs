use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::{Number, Value},
    },
    util::num::i64_to_u32_checked,
};

impl Evaluator<'_> {
    /// Evaluates `**`.
    ///
    /// An integral base raised to a non-negative integral exponent stays an
    /// integer and fails on overflow. A negative exponent or any real operand
    /// gives a real.
    ///
    /// # Example
    /// ```
    /// use scopeval::interpreter::{evaluator::core::Evaluator, value::core::Value};
    ///
    /// let result = Evaluator::eval_pow(&Value::Integer(2), &Value::Integer(10), 0).unwrap();
    /// assert_eq!(result, Value::Integer(1024));
    ///
    /// let result = Evaluator::eval_pow(&Value::Integer(2), &Value::Integer(-1), 0).unwrap();
    /// assert_eq!(result, Value::Real(0.5));
    /// ```
    pub fn eval_pow(base: &Value, exponent: &Value, pos: usize) -> EvalResult<Value> {
        match Self::numeric_operands(BinaryOperator::Pow, base, exponent, pos)? {
            (Number::Int(b), Number::Int(e)) if e >= 0 => {
                b.checked_pow(i64_to_u32_checked(e, pos)?)
                 .map(Value::Integer)
                 .ok_or(RuntimeError::Overflow { pos })
            },
            (b, e) => Ok(Value::Real(b.to_f64().powf(e.to_f64()))),
        }
    }
}
