use std::cmp::Ordering;

use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::{Number, Value},
    },
};

/// Maps an operator and the ordering of its operands to the boolean result.
///
/// `None` (unordered, a NaN operand) is only equal to nothing.
fn ordering_result(op: BinaryOperator, ordering: Option<Ordering>) -> bool {
    match op {
        BinaryOperator::Equal => ordering == Some(Ordering::Equal),
        BinaryOperator::NotEqual => ordering != Some(Ordering::Equal),
        BinaryOperator::Less => ordering == Some(Ordering::Less),
        BinaryOperator::Greater => ordering == Some(Ordering::Greater),
        BinaryOperator::LessEqual => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
        BinaryOperator::GreaterEqual => {
            matches!(ordering, Some(Ordering::Greater | Ordering::Equal))
        },
        _ => false,
    }
}

/// Orders an integer against a real without rounding the integer.
///
/// `None` when the real is NaN.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn cmp_int_real(int: i64, real: f64) -> Option<Ordering> {
    match (int as f64).partial_cmp(&real)? {
        // Equal after rounding: `real` is integral and within `[-2^63, 2^63]`.
        Ordering::Equal if real >= 9_223_372_036_854_775_808.0 => Some(Ordering::Less),
        Ordering::Equal => Some(int.cmp(&(real as i64))),
        ordering => Some(ordering),
    }
}

impl Evaluator<'_> {
    /// Evaluates a comparison of the form `Value <Operator> Value`.
    ///
    /// Numbers compare by exact value, even integers beyond the range reals
    /// represent exactly. Text compares with text. Text and a number are
    /// never equal, and ordering them is a type error.
    ///
    /// # Example
    /// ```
    /// use scopeval::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Evaluator, value::core::Value},
    /// };
    ///
    /// let less = Evaluator::eval_comparison(BinaryOperator::Less, &Value::Integer(3), &Value::Real(3.5), 0);
    /// assert_eq!(less.unwrap(), Value::Bool(true));
    ///
    /// let eq = Evaluator::eval_comparison(BinaryOperator::Equal, &Value::from("3"), &Value::Integer(3), 0);
    /// assert_eq!(eq.unwrap(), Value::Bool(false));
    /// ```
    pub fn eval_comparison(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           pos: usize)
                           -> EvalResult<Value> {
        let ordering = match (left, right) {
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            (Value::Text(_), _) | (_, Value::Text(_)) => {
                return match op {
                    BinaryOperator::Equal => Ok(Value::Bool(false)),
                    BinaryOperator::NotEqual => Ok(Value::Bool(true)),
                    _ => Err(RuntimeError::TypeError { details: format!("'{op}' not supported between '{}' and '{}'",
                                                                        left.type_name(),
                                                                        right.type_name()),
                                                       pos }),
                };
            },
            _ => match Self::numeric_operands(op, left, right, pos)? {
                (Number::Int(a), Number::Int(b)) => Some(a.cmp(&b)),
                (Number::Int(a), Number::Real(b)) => cmp_int_real(a, b),
                (Number::Real(a), Number::Int(b)) => cmp_int_real(b, a).map(Ordering::reverse),
                (a, b) => a.to_f64().partial_cmp(&b.to_f64()),
            },
        };

        Ok(Value::Bool(ordering_result(op, ordering)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_order_exactly_against_reals() {
        let two_pow_60 = 1_i64 << 60;

        assert_eq!(cmp_int_real(two_pow_60 + 1, 1_152_921_504_606_846_976.0), Some(Ordering::Greater));
        assert_eq!(cmp_int_real(two_pow_60, 1_152_921_504_606_846_976.0), Some(Ordering::Equal));
        assert_eq!(cmp_int_real(i64::MAX, 9_223_372_036_854_775_808.0), Some(Ordering::Less));
        assert_eq!(cmp_int_real(i64::MIN, -9_223_372_036_854_775_808.0), Some(Ordering::Equal));
        assert_eq!(cmp_int_real(3, f64::NAN), None);
    }

    #[test]
    fn reals_on_the_left_reverse_the_ordering() {
        let result = Evaluator::eval_comparison(BinaryOperator::Less,
                                                &Value::Real(0.5),
                                                &Value::Integer(1 << 60),
                                                0);
        assert_eq!(result, Ok(Value::Bool(true)));
    }
}
