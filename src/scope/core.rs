use std::sync::Arc;

use tracing::debug;

use crate::{
    error::EvalError,
    interpreter::value::core::Value,
    scope::{
        Bindings,
        frame::{CallStack, Frame},
        resolver::Resolver,
    },
};

/// Collects the namespace sources of one evaluation.
///
/// Building never fails: a context depth the stack cannot satisfy is only
/// reported once a lookup actually needs the calling context.
///
/// # Example
/// ```
/// use std::collections::HashMap;
///
/// use scopeval::{
///     interpreter::value::core::Value,
///     scope::core::ScopeBuilder,
/// };
///
/// let locals = HashMap::from([("a".to_string(), Value::Integer(1))]);
/// let globals = HashMap::from([("a".to_string(), Value::Integer(2)),
///                              ("b".to_string(), Value::Integer(3))]);
///
/// let scope = ScopeBuilder::new().locals(Some(&locals)).globals(Some(&globals)).build();
///
/// assert_eq!(scope.resolve("a").unwrap(), Some(Value::Integer(1)));
/// assert_eq!(scope.resolve("b").unwrap(), Some(Value::Integer(3)));
/// assert_eq!(scope.resolve("c").unwrap(), None);
/// ```
#[derive(Default)]
pub struct ScopeBuilder<'a> {
    locals:        Option<&'a Bindings>,
    globals:       Option<&'a Bindings>,
    stack:         Option<&'a CallStack>,
    context_depth: usize,
    resolvers:     Vec<Arc<dyn Resolver>>,
}

impl<'a> ScopeBuilder<'a> {
    /// Starts a builder with no sources.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit local bindings, the nearest namespace.
    #[must_use]
    pub const fn locals(mut self, locals: Option<&'a Bindings>) -> Self {
        self.locals = locals;
        self
    }

    /// Explicit global bindings; when absent the context frame's globals are
    /// used instead.
    #[must_use]
    pub const fn globals(mut self, globals: Option<&'a Bindings>) -> Self {
        self.globals = globals;
        self
    }

    /// The calling context and the depth of the frame to capture.
    #[must_use]
    pub const fn context(mut self, stack: Option<&'a CallStack>, depth: usize) -> Self {
        self.stack = stack;
        self.context_depth = depth;
        self
    }

    /// The resolver chain, consulted in order after every other namespace.
    #[must_use]
    pub fn resolvers(mut self, resolvers: Vec<Arc<dyn Resolver>>) -> Self {
        self.resolvers = resolvers;
        self
    }

    /// Freezes the sources into a scope.
    #[must_use]
    pub fn build(self) -> Scope<'a> {
        debug!(locals = self.locals.map_or(0, Bindings::len),
               globals = self.globals.map_or(0, Bindings::len),
               frames = self.stack.map_or(0, CallStack::len),
               context_depth = self.context_depth,
               resolvers = self.resolvers.len(),
               "scope built");

        Scope { locals:        self.locals,
                globals:       self.globals,
                stack:         self.stack,
                context_depth: self.context_depth,
                resolvers:     self.resolvers, }
    }
}

/// The namespace chain of one evaluation. Immutable once built.
pub struct Scope<'a> {
    locals:        Option<&'a Bindings>,
    globals:       Option<&'a Bindings>,
    stack:         Option<&'a CallStack>,
    context_depth: usize,
    resolvers:     Vec<Arc<dyn Resolver>>,
}

impl<'a> Scope<'a> {
    /// Resolves `name` through the namespace chain.
    ///
    /// Returns `Ok(None)` when no namespace binds the name.
    ///
    /// # Errors
    /// `EvalError::ContextDepth` when the lookup reaches the calling context
    /// and the requested frame does not exist.
    pub fn resolve(&self, name: &str) -> Result<Option<Value>, EvalError> {
        if let Some(value) = self.locals.and_then(|locals| locals.get(name)) {
            return Ok(Some(value.clone()));
        }

        let frame = self.context_frame()?;
        if let Some(value) = frame.and_then(|frame| frame.locals.get(name)) {
            return Ok(Some(value.clone()));
        }

        let globals = self.globals.or_else(|| frame.map(|frame| &frame.globals));
        if let Some(value) = globals.and_then(|globals| globals.get(name)) {
            return Ok(Some(value.clone()));
        }

        Ok(self.resolvers.iter().find_map(|resolver| resolver.resolve(name)))
    }

    /// Number of resolvers in the chain.
    #[must_use]
    pub fn resolver_count(&self) -> usize {
        self.resolvers.len()
    }

    /// The captured calling-context frame, if a stack was supplied.
    fn context_frame(&self) -> Result<Option<&'a Frame>, EvalError> {
        match self.stack {
            Some(stack) => stack.frame_at(self.context_depth),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ErrorKind;

    fn bindings(pairs: &[(&str, i64)]) -> Bindings {
        pairs.iter()
             .map(|(name, value)| ((*name).to_string(), Value::Integer(*value)))
             .collect()
    }

    #[test]
    fn frame_locals_sit_between_explicit_locals_and_globals() {
        let locals = bindings(&[("a", 1)]);
        let globals = bindings(&[("a", 30), ("b", 30), ("c", 30)]);
        let stack: CallStack = [Frame::new(bindings(&[("a", 20), ("b", 20)]),
                                           bindings(&[("d", 20)]))].into_iter()
                                                                   .collect();

        let scope = ScopeBuilder::new().locals(Some(&locals))
                                       .globals(Some(&globals))
                                       .context(Some(&stack), 2)
                                       .build();

        assert_eq!(scope.resolve("a").unwrap(), Some(Value::Integer(1)));
        assert_eq!(scope.resolve("b").unwrap(), Some(Value::Integer(20)));
        assert_eq!(scope.resolve("c").unwrap(), Some(Value::Integer(30)));
        // Explicit globals replace the frame's globals.
        assert_eq!(scope.resolve("d").unwrap(), None);
    }

    #[test]
    fn frame_globals_fill_in_without_explicit_globals() {
        let stack: CallStack = [Frame::default().with_global("g", 7_i64)].into_iter().collect();
        let scope = ScopeBuilder::new().context(Some(&stack), 2).build();

        assert_eq!(scope.resolve("g").unwrap(), Some(Value::Integer(7)));
    }

    #[test]
    fn resolvers_are_consulted_last_and_in_order() {
        let first: Arc<dyn Resolver> = Arc::new(bindings(&[("x", 1)]));
        let second: Arc<dyn Resolver> = Arc::new(bindings(&[("x", 2), ("y", 2)]));
        let globals = bindings(&[("y", 3)]);

        let scope = ScopeBuilder::new().globals(Some(&globals))
                                       .resolvers(vec![first, second])
                                       .build();

        assert_eq!(scope.resolve("x").unwrap(), Some(Value::Integer(1)));
        assert_eq!(scope.resolve("y").unwrap(), Some(Value::Integer(3)));
        assert_eq!(scope.resolver_count(), 2);
    }

    #[test]
    fn missing_depth_fails_only_on_lookup() {
        let locals = HashMap::from([("a".to_string(), Value::Integer(1))]);
        let stack = CallStack::new();

        let scope = ScopeBuilder::new().locals(Some(&locals))
                                       .context(Some(&stack), 5)
                                       .build();

        assert_eq!(scope.resolve("a").unwrap(), Some(Value::Integer(1)));
        let err = scope.resolve("b").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Context);
    }
}
