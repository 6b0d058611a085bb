use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::core::{Division, EvalResult, Evaluator},
        value::core::Value,
    },
};

impl Evaluator<'_> {
    /// Evaluates a binary operation between two values.
    ///
    /// Arrays broadcast: the scalar kernel is applied elementwise, against a
    /// scalar or against an array of the same length. The value-level `and`
    /// and `or` are the exception, they look at the truth value of each
    /// whole operand.
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
    /// let result =
    ///     Evaluator::eval_binary(BinaryOperator::Mul, &left, &Value::Integer(3), Division::True, 0);
    ///
    /// assert_eq!(result.unwrap(),
    ///            Value::from(vec![Value::Integer(3), Value::Integer(6)]));
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       division: Division,
                       pos: usize)
                       -> EvalResult<Value> {
        match op {
            BinaryOperator::And | BinaryOperator::Or => Self::eval_logic(op, left, right, pos),
            _ => Self::map_array_binary(left, right, pos, &|l, r| {
                     Self::eval_scalar_binary(op, l, r, division, pos)
                 }),
        }
    }

    /// Routes a scalar operation to its kernel.
    pub fn eval_scalar_binary(op: BinaryOperator,
                              left: &Value,
                              right: &Value,
                              division: Division,
                              pos: usize)
                              -> EvalResult<Value> {
        use BinaryOperator::{
            Add, And, BitAnd, BitOr, Div, Equal, FloorDiv, Greater, GreaterEqual, Less,
            LessEqual, Mod, Mul, NotEqual, Or, Pow, Sub,
        };

        match op {
            Add | Sub | Mul => Self::eval_arithmetic(op, left, right, pos),
            Div => Self::eval_division(left, right, division, pos),
            FloorDiv => Self::eval_floor_division(left, right, pos),
            Mod => Self::eval_modulo(left, right, pos),
            Pow => Self::eval_pow(left, right, pos),
            BitAnd | BitOr => Self::eval_bitwise(op, left, right, pos),
            Equal | NotEqual | Less | Greater | LessEqual | GreaterEqual => {
                Self::eval_comparison(op, left, right, pos)
            },
            And | Or => Self::eval_logic(op, left, right, pos),
        }
    }
}
