use std::{fmt, sync::Arc};

use serde_json::Value as JsonValue;

use crate::{error::EvalError, interpreter::value::core::Value, scope::Bindings};

/// Keyed lookup of values by name.
///
/// Anything that can answer "what is bound to this name" can extend a scope:
/// a map, a table's column index, a configuration source. Resolvers are only
/// read, and only during the evaluation they were passed to.
pub trait Resolver: Send + Sync {
    /// The value bound to `key`, if any.
    fn resolve(&self, key: &str) -> Option<Value>;

    /// The concrete type name, used in diagnostics.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl fmt::Debug for dyn Resolver + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Resolver").field(&self.type_name()).finish()
    }
}

impl Resolver for Bindings {
    fn resolve(&self, key: &str) -> Option<Value> {
        self.get(key).cloned()
    }

    fn type_name(&self) -> &'static str {
        "Bindings"
    }
}

/// A namespace candidate as supplied by a caller.
///
/// Only `Keyed` candidates can serve as resolvers; a `Plain` value (for
/// example a JSON array where an object was expected) fails the capability
/// check.
#[derive(Clone)]
pub enum Namespace {
    /// A namespace with keyed lookup.
    Keyed(Arc<dyn Resolver>),
    /// A bare value without keyed lookup.
    Plain(Value),
}

impl Namespace {
    /// Wraps a resolver.
    #[must_use]
    pub fn keyed(resolver: impl Resolver + 'static) -> Self {
        Self::Keyed(Arc::new(resolver))
    }

    /// The type name reported by the capability check.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Keyed(resolver) => resolver.type_name(),
            Self::Plain(value) => value.type_name(),
        }
    }

    /// Converts a JSON document into a namespace.
    ///
    /// An object becomes keyed bindings; any other document becomes a plain
    /// value.
    ///
    /// # Errors
    /// `EvalError::InvalidBinding` when the document or one of the object's
    /// members has no value representation (`null`, nested objects).
    ///
    /// # Example
    /// ```
    /// use scopeval::scope::resolver::Namespace;
    /// use serde_json::json;
    ///
    /// let ns = Namespace::from_json(&json!({ "a": 1, "b": [1.5, 2.5] })).unwrap();
    /// assert!(matches!(ns, Namespace::Keyed(_)));
    ///
    /// let ns = Namespace::from_json(&json!([1, 2])).unwrap();
    /// assert_eq!(ns.type_name(), "array");
    ///
    /// assert!(Namespace::from_json(&json!({ "a": null })).is_err());
    /// ```
    pub fn from_json(json: &JsonValue) -> Result<Self, EvalError> {
        let JsonValue::Object(members) = json else {
            return Value::try_from(json).map(Self::Plain)
                                        .map_err(|reason| invalid_binding("<document>", reason));
        };

        let bindings = members.iter()
                              .map(|(name, member)| {
                                  Value::try_from(member).map(|value| (name.clone(), value))
                                                         .map_err(|reason| invalid_binding(name, reason))
                              })
                              .collect::<Result<Bindings, _>>()?;
        Ok(Self::keyed(bindings))
    }
}

fn invalid_binding(name: &str, reason: &str) -> EvalError {
    EvalError::InvalidBinding { name:    name.to_string(),
                                details: reason.to_string(), }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyed(resolver) => f.debug_tuple("Keyed").field(&resolver.type_name()).finish(),
            Self::Plain(value) => f.debug_tuple("Plain").field(value).finish(),
        }
    }
}

impl From<Bindings> for Namespace {
    fn from(bindings: Bindings) -> Self {
        Self::keyed(bindings)
    }
}

impl From<Value> for Namespace {
    fn from(value: Value) -> Self {
        Self::Plain(value)
    }
}

/// Verifies that every candidate supports keyed lookup.
///
/// Returns the resolvers in their original order. Nothing is looked up.
///
/// # Errors
/// `EvalError::Capability` naming the type of the first candidate without
/// keyed lookup.
///
/// # Example
/// ```
/// use scopeval::{
///     ErrorKind,
///     interpreter::value::core::Value,
///     scope::{Bindings, resolver::{Namespace, check_resolvers}},
/// };
///
/// let ok = [Namespace::from(Bindings::new())];
/// assert_eq!(check_resolvers(&ok).unwrap().len(), 1);
///
/// let bad = [Namespace::from(Bindings::new()), Namespace::from(Value::Integer(3))];
/// let err = check_resolvers(&bad).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::Capability);
/// assert!(err.to_string().contains("'int'"));
/// ```
pub fn check_resolvers(candidates: &[Namespace]) -> Result<Vec<Arc<dyn Resolver>>, EvalError> {
    candidates.iter()
              .map(|candidate| match candidate {
                  Namespace::Keyed(resolver) => Ok(Arc::clone(resolver)),
                  Namespace::Plain(value) => {
                      Err(EvalError::Capability { type_name: value.type_name().to_string() })
                  },
              })
              .collect()
}
