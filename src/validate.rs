use std::borrow::Cow;

use crate::{error::EvalError, interpreter::value::core::Value};

/// The expression argument as received, before it is known to be text.
///
/// Callers holding dynamically typed input (a JSON document, a value taken
/// from a namespace) pass it as-is; only text survives [`ensure_text`].
#[derive(Debug, Clone, PartialEq)]
pub enum Source<'a> {
    /// Expression text.
    Text(Cow<'a, str>),
    /// Anything else.
    Value(Value),
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(Cow::Borrowed(text))
    }
}

impl<'a> From<&'a String> for Source<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(Cow::Borrowed(text))
    }
}

impl From<String> for Source<'_> {
    fn from(text: String) -> Self {
        Self::Text(Cow::Owned(text))
    }
}

impl From<Value> for Source<'_> {
    fn from(value: Value) -> Self {
        match value {
            Value::Text(text) => Self::Text(Cow::Owned(text.to_string())),
            other => Self::Value(other),
        }
    }
}

/// Returns the expression text, rejecting every other kind of input.
///
/// # Errors
/// `EvalError::ExpressionNotText` naming the type received.
///
/// # Example
/// ```
/// use scopeval::{
///     ErrorKind,
///     interpreter::value::core::Value,
///     validate::{Source, ensure_text},
/// };
///
/// assert_eq!(ensure_text(&Source::from("a + 1")).unwrap(), "a + 1");
/// assert_eq!(ensure_text(&Source::from(Value::from("b"))).unwrap(), "b");
///
/// let err = ensure_text(&Source::from(Value::Integer(3))).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::InputType);
/// assert!(err.to_string().contains("'int'"));
/// ```
pub fn ensure_text<'s>(source: &'s Source<'_>) -> Result<&'s str, EvalError> {
    match source {
        Source::Text(text) => Ok(text),
        Source::Value(value) => Err(EvalError::ExpressionNotText { type_name: value.type_name() }),
    }
}

/// Passes arrays and numeric or boolean scalars through unchanged.
///
/// # Errors
/// `EvalError::InvalidScalarResult` for any other scalar.
pub fn check_result(value: Value) -> Result<Value, EvalError> {
    if value.is_scalar() && !value.is_numeric_or_bool() {
        return Err(EvalError::InvalidScalarResult { type_name: value.type_name() });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_scalars_are_not_results() {
        let err = check_result(Value::from("abc")).unwrap_err();
        assert!(matches!(err, EvalError::InvalidScalarResult { type_name: "text" }));
    }

    #[test]
    fn numbers_bools_and_arrays_pass() {
        for value in [Value::Integer(1),
                      Value::Real(0.5),
                      Value::Bool(false),
                      Value::from(vec![Value::from("x")])]
        {
            assert_eq!(check_result(value.clone()).unwrap(), value);
        }
    }

    #[test]
    fn arrays_are_not_text() {
        let err = ensure_text(&Source::Value(Value::from(vec![]))).unwrap_err();
        assert!(matches!(err, EvalError::ExpressionNotText { type_name: "array" }));
    }
}
