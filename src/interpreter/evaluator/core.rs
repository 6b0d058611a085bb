use crate::{
    ast::{BinaryOperator, Expr},
    error::RuntimeError,
    interpreter::value::core::Value,
    scope::Bindings,
    util::num::resolve_index,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// How `/` treats two integer operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Division {
    /// `/` always produces a real: `7 / 2 == 3.5`.
    True,
    /// Integer operands divide with flooring: `7 / 2 == 3`, `-7 / 2 == -4`.
    Legacy,
}

impl Division {
    /// Maps the public `true_division` flag onto a mode.
    #[must_use]
    pub const fn from_flag(true_division: bool) -> Self {
        if true_division { Self::True } else { Self::Legacy }
    }
}

/// Walks an expression tree against a fixed set of resolved terms.
///
/// The evaluator never looks names up in a scope itself: every name the tree
/// mentions was resolved when the expression was compiled, and the results
/// are passed in as `terms`.
///
/// # Example
/// ```
/// use std::collections::HashMap;
///
/// use scopeval::interpreter::{
///     evaluator::core::{Division, Evaluator},
///     parser::{core::parse_source, grammar::Grammar},
///     value::core::Value,
/// };
///
/// let tree = parse_source("a * 2 + 1", Grammar::Extended).unwrap();
/// let terms = HashMap::from([("a".to_string(), Value::Integer(4))]);
///
/// let value = Evaluator::new(&terms, Division::True).eval(&tree).unwrap();
/// assert_eq!(value, Value::Integer(9));
/// ```
pub struct Evaluator<'c> {
    terms:    &'c Bindings,
    division: Division,
}

impl<'c> Evaluator<'c> {
    /// Creates an evaluator over `terms`.
    #[must_use]
    pub const fn new(terms: &'c Bindings, division: Division) -> Self {
        Self { terms, division }
    }

    /// The division mode this evaluator applies.
    #[must_use]
    pub const fn division(&self) -> Division {
        self.division
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// Strict `and`/`or` short-circuit: the right operand is only evaluated
    /// when the left one does not decide the result.
    pub fn eval(&self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(value.into()),
            Expr::Name { name, pos } => self.eval_name(name, *pos),
            Expr::UnaryOp { op, expr, pos } => {
                let value = self.eval(expr)?;
                Self::eval_unary(*op, &value, *pos)
            },
            Expr::BinaryOp { left,
                             op: op @ (BinaryOperator::And | BinaryOperator::Or),
                             right,
                             pos, } => self.eval_short_circuit(*op, left, right, *pos),
            Expr::BinaryOp { left,
                             op,
                             right,
                             pos, } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Self::eval_binary(*op, &left, &right, self.division, *pos)
            },
            Expr::ArrayLiteral { elements, .. } => {
                let values = elements.iter()
                                     .map(|element| self.eval(element))
                                     .collect::<EvalResult<Vec<_>>>()?;
                Ok(Value::from(values))
            },
            Expr::Index { array, index, pos } => {
                let array = self.eval(array)?;
                let index = self.eval(index)?;
                Self::eval_index(&array, &index, *pos)
            },
        }
    }

    /// Looks a name up in the resolved terms.
    fn eval_name(&self, name: &str, pos: usize) -> EvalResult<Value> {
        self.terms
            .get(name)
            .cloned()
            .ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string(),
                                                           pos })
    }

    /// Reads one element of an array.
    ///
    /// Negative indices count from the end.
    ///
    /// # Example
    /// ```
    /// use scopeval::interpreter::{evaluator::core::Evaluator, value::core::Value};
    ///
    /// let array = Value::from(vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]);
    ///
    /// assert_eq!(Evaluator::eval_index(&array, &Value::Integer(-1), 0).unwrap(),
    ///            Value::Integer(3));
    /// assert!(Evaluator::eval_index(&array, &Value::Integer(3), 0).is_err());
    /// ```
    pub fn eval_index(array: &Value, index: &Value, pos: usize) -> EvalResult<Value> {
        let Some(items) = array.as_array() else {
            return Err(RuntimeError::TypeError { details: format!("a value of type '{}' cannot be indexed",
                                                                  array.type_name()),
                                                 pos });
        };
        let position = resolve_index(index.to_index(pos)?, items.len(), pos)?;
        Ok(items[position].clone())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::interpreter::parser::{core::parse_source, grammar::Grammar};

    fn eval_with(source: &str, grammar: Grammar, terms: &Bindings) -> EvalResult<Value> {
        let tree = parse_source(source, grammar).unwrap();
        Evaluator::new(terms, Division::True).eval(&tree)
    }

    #[test]
    fn short_circuit_skips_the_right_operand() {
        let terms = HashMap::from([("zero".to_string(), Value::Integer(0))]);

        // The right operand would divide by zero if it were evaluated.
        assert_eq!(eval_with("zero and 1 / zero", Grammar::Strict, &terms),
                   Ok(Value::Integer(0)));
        assert_eq!(eval_with("1 or 1 / zero", Grammar::Strict, &terms),
                   Ok(Value::Integer(1)));
        assert_eq!(eval_with("not zero", Grammar::Strict, &terms),
                   Ok(Value::Bool(true)));
    }

    #[test]
    fn unknown_terms_are_reported_with_position() {
        let terms = Bindings::new();
        assert_eq!(eval_with("1 + y", Grammar::Extended, &terms),
                   Err(RuntimeError::UnknownVariable { name: "y".to_string(),
                                                       pos:  4, }));
    }

    #[test]
    fn nested_arrays_index_and_broadcast() {
        let terms = Bindings::new();
        assert_eq!(eval_with("[[1, 2], [3, 4]][1][0] * 10", Grammar::Extended, &terms),
                   Ok(Value::Integer(30)));
        assert_eq!(eval_with("[[1, 2], [3, 4]] + 1", Grammar::Extended, &terms),
                   Ok(Value::from(vec![Value::from(vec![Value::Integer(2), Value::Integer(3)]),
                                       Value::from(vec![Value::Integer(4), Value::Integer(5)])])));
    }
}
