use serde_json::Value as JsonValue;

use crate::interpreter::value::core::Value;

/// Converts a JSON document into a value.
///
/// Integers that fit in an `i64` stay integral, every other number becomes a
/// real. Arrays convert elementwise.
///
/// # Errors
/// A short reason when the document (or one of its elements) is `null` or
/// an object.
///
/// # Example
/// ```
/// use scopeval::interpreter::value::core::Value;
/// use serde_json::json;
///
/// let value = Value::try_from(&json!([1, 2.5, true, "x"])).unwrap();
/// assert_eq!(value.to_string(), "[1, 2.5, True, \"x\"]");
///
/// assert!(Value::try_from(&json!(null)).is_err());
/// ```
impl TryFrom<&JsonValue> for Value {
    type Error = &'static str;

    fn try_from(json: &JsonValue) -> Result<Self, Self::Error> {
        match json {
            JsonValue::Null => Err("null has no value"),
            JsonValue::Bool(b) => Ok(Self::Bool(*b)),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Self::Integer(i))
                } else {
                    n.as_f64().map(Self::Real).ok_or("number is not representable")
                }
            },
            JsonValue::String(s) => Ok(Self::from(s.as_str())),
            JsonValue::Array(items) => {
                let values = items.iter()
                                  .map(Self::try_from)
                                  .collect::<Result<Vec<_>, _>>()?;
                Ok(Self::from(values))
            },
            JsonValue::Object(_) => Err("objects are namespaces, not values"),
        }
    }
}
