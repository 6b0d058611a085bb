use std::sync::Arc;

use crate::{
    ast::LiteralValue,
    error::RuntimeError,
    interpreter::evaluator::core::EvalResult,
    util::num::f64_to_i64_checked,
};

/// Represents a value produced or consumed by an evaluation.
///
/// Scalars are integers, reals, booleans and text. Arrays are the structured
/// values: a column of scalars, or nested arrays for the interpreted engine.
/// Arrays and text are reference counted so bindings can be shared between
/// the scope, the compiled expression and engine threads without copying.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 64 bit integer.
    Integer(i64),
    /// A double precision floating-point number.
    Real(f64),
    /// A boolean value (`True` or `False`).
    Bool(bool),
    /// Text. Valid as an operand, never as a scalar result.
    Text(Arc<str>),
    /// An array of values.
    Array(Arc<Vec<Self>>),
}

/// Numeric view of a scalar, with booleans counted as `0` and `1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Integral operand (integers and booleans).
    Int(i64),
    /// Floating-point operand.
    Real(f64),
}

impl Number {
    /// Widens to `f64`. Integers beyond `2^53` round to the nearest real.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn to_f64(self) -> f64 {
        match self {
            Self::Int(n) => n as f64,
            Self::Real(r) => r,
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(Arc::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(Arc::from(v))
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Array(Arc::new(v))
    }
}

impl From<&LiteralValue> for Value {
    fn from(lit: &LiteralValue) -> Self {
        match lit {
            LiteralValue::Integer(i) => (*i).into(),
            LiteralValue::Real(n) => (*n).into(),
            LiteralValue::Bool(b) => (*b).into(),
            LiteralValue::Text(s) => s.as_str().into(),
        }
    }
}

impl Value {
    /// The name of this value's type, as used in error messages.
    ///
    /// # Example
    /// ```
    /// use scopeval::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Integer(1).type_name(), "int");
    /// assert_eq!(Value::from("x").type_name(), "text");
    /// assert_eq!(Value::from(vec![Value::Bool(true)]).type_name(), "array");
    /// ```
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "int",
            Self::Real(_) => "float",
            Self::Bool(_) => "bool",
            Self::Text(_) => "text",
            Self::Array(_) => "array",
        }
    }

    /// Returns `true` for every variant except [`Value::Array`].
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        !matches!(self, Self::Array(_))
    }

    /// Returns `true` for integers, reals and booleans.
    #[must_use]
    pub const fn is_numeric_or_bool(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Real(_) | Self::Bool(_))
    }

    /// The numeric view of a scalar, or `None` for text and arrays.
    #[must_use]
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Self::Integer(n) => Some(Number::Int(*n)),
            Self::Bool(b) => Some(Number::Int(i64::from(*b))),
            Self::Real(r) => Some(Number::Real(*r)),
            Self::Text(_) | Self::Array(_) => None,
        }
    }

    /// Converts the value to an `f64`, or returns an error if not numeric.
    ///
    /// # Example
    /// ```
    /// use scopeval::interpreter::value::core::Value;
    ///
    /// let x = Value::Integer(10);
    /// assert_eq!(x.as_real(0).unwrap(), 10.0);
    /// assert!(Value::from("ten").as_real(0).is_err());
    /// ```
    pub fn as_real(&self, pos: usize) -> EvalResult<f64> {
        self.as_number()
            .map(Number::to_f64)
            .ok_or(RuntimeError::ExpectedNumber { pos })
    }

    /// The elements of an array value.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// The truth value of a scalar.
    ///
    /// Zero, `False` and empty text are false. Arrays have no single truth
    /// value.
    ///
    /// # Example
    /// ```
    /// use scopeval::interpreter::value::core::Value;
    ///
    /// assert!(Value::Integer(3).truthy(0).unwrap());
    /// assert!(!Value::from("").truthy(0).unwrap());
    /// assert!(Value::from(vec![Value::Integer(1)]).truthy(0).is_err());
    /// ```
    pub fn truthy(&self, pos: usize) -> EvalResult<bool> {
        match self {
            Self::Integer(n) => Ok(*n != 0),
            Self::Real(r) => Ok(*r != 0.0),
            Self::Bool(b) => Ok(*b),
            Self::Text(s) => Ok(!s.is_empty()),
            Self::Array(_) => Err(RuntimeError::AmbiguousTruth { pos }),
        }
    }

    /// Converts the value to an array index.
    ///
    /// Integers are used directly; reals must be integral.
    ///
    /// # Example
    /// ```
    /// use scopeval::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Real(2.0).to_index(0).unwrap(), 2);
    /// assert!(Value::Real(1.5).to_index(0).is_err());
    /// assert!(Value::Bool(true).to_index(0).is_err());
    /// ```
    pub fn to_index(&self, pos: usize) -> EvalResult<i64> {
        match self {
            Self::Integer(i) => Ok(*i),
            Self::Real(r) => f64_to_i64_checked(*r, pos),
            other => {
                Err(RuntimeError::TypeError { details: format!("array indices must be integers, not '{}'",
                                                               other.type_name()),
                                              pos })
            },
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) if r.is_finite() && r.fract() == 0.0 => write!(f, "{r:.1}"),
            Self::Real(r) => write!(f, "{r}"),
            Self::Bool(b) => write!(f, "{}", if *b { "True" } else { "False" }),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Array(a) => {
                write!(f, "[")?;

                for (index, value) in a.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    write!(f, "{value}")?;
                }

                write!(f, "]")
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_marks_integral_reals() {
        assert_eq!(Value::Real(3.0).to_string(), "3.0");
        assert_eq!(Value::Real(3.5).to_string(), "3.5");
        assert_eq!(Value::from(vec![Value::Integer(1), Value::Bool(false), Value::from("a")]).to_string(),
                   "[1, False, \"a\"]");
    }

    #[test]
    fn booleans_count_as_integers() {
        assert_eq!(Value::Bool(true).as_number(), Some(Number::Int(1)));
        assert_eq!(Value::from("1").as_number(), None);
    }
}
