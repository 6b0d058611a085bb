use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
};

impl Evaluator<'_> {
    /// Applies an elementwise binary operation to one or two values.
    ///
    /// This function unifies all array binary evaluation paths:
    /// - Array with array
    /// - Array with scalar
    /// - Scalar with array
    /// - Scalar with scalar
    ///
    /// Nested arrays are handled recursively. Shape compatibility is checked
    /// when both sides are arrays at the same level. The specific
    /// elementwise scalar operation is supplied via the function parameter
    /// `f`.
    ///
    /// # Example
    /// ```
    /// use scopeval::{
    ///     ast::BinaryOperator,
    ///     interpreter::{
    ///         evaluator::core::{Division, Evaluator},
    ///         value::core::Value,
    ///     },
    /// };
    ///
    /// let left = Value::from(vec![Value::Integer(1), Value::Integer(2)]);
    /// let right = Value::from(vec![Value::Integer(10), Value::Integer(20)]);
    ///
    /// let r = Evaluator::map_array_binary(&left, &right, 0, &|l, r| {
    ///             Evaluator::eval_scalar_binary(BinaryOperator::Add, l, r, Division::True, 0)
    ///         }).unwrap();
    ///
    /// assert_eq!(r, Value::from(vec![Value::Integer(11), Value::Integer(22)]));
    /// ```
    pub fn map_array_binary<F>(left: &Value,
                               right: &Value,
                               pos: usize,
                               f: &F)
                               -> EvalResult<Value>
        where F: Fn(&Value, &Value) -> EvalResult<Value>
    {
        match (left, right) {
            // Array with array
            (Value::Array(larr), Value::Array(rarr)) => {
                if larr.len() != rarr.len() {
                    return Err(RuntimeError::ShapeMismatch { left: larr.len(),
                                                             right: rarr.len(),
                                                             pos });
                }

                let out = larr.iter()
                              .zip(rarr.iter())
                              .map(|(l, r)| Self::map_array_binary(l, r, pos, f))
                              .collect::<EvalResult<Vec<_>>>()?;
                Ok(Value::from(out))
            },

            // Array with scalar
            (Value::Array(arr), scalar) => {
                let out = arr.iter()
                             .map(|l| Self::map_array_binary(l, scalar, pos, f))
                             .collect::<EvalResult<Vec<_>>>()?;
                Ok(Value::from(out))
            },

            // Scalar with array
            (scalar, Value::Array(arr)) => {
                let out = arr.iter()
                             .map(|r| Self::map_array_binary(scalar, r, pos, f))
                             .collect::<EvalResult<Vec<_>>>()?;
                Ok(Value::from(out))
            },

            // Scalar with scalar
            (l, r) => f(l, r),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ast::BinaryOperator, interpreter::evaluator::core::Division};

    #[test]
    fn mismatched_lengths_are_rejected() {
        let left = Value::from(vec![Value::Integer(1), Value::Integer(2)]);
        let right = Value::from(vec![Value::Integer(1)]);

        let err = Evaluator::eval_binary(BinaryOperator::Add, &left, &right, Division::True, 7);
        assert_eq!(err,
                   Err(RuntimeError::ShapeMismatch { left:  2,
                                                     right: 1,
                                                     pos:   7, }));
    }
}
