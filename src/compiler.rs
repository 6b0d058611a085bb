use tracing::debug;

use crate::{
    ast::Expr,
    error::EvalError,
    interpreter::{
        evaluator::core::Division,
        parser::{core::parse_source, grammar::Grammar},
    },
    scope::{Bindings, core::Scope},
};

/// An expression ready to run: the parsed tree, every name it mentions
/// already resolved, and the options it was compiled with.
///
/// Borrowing the scope ties the compiled expression to the evaluation it was
/// built for; it cannot be cached past it.
pub struct CompiledExpr<'s> {
    source:   String,
    tree:     Expr,
    grammar:  Grammar,
    engine:   &'static str,
    division: Division,
    scope:    &'s Scope<'s>,
    terms:    Bindings,
    names:    Vec<String>,
}

impl<'s> CompiledExpr<'s> {
    /// The text the expression was compiled from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The parsed tree.
    #[must_use]
    pub const fn tree(&self) -> &Expr {
        &self.tree
    }

    /// The grammar the text was parsed with.
    #[must_use]
    pub const fn grammar(&self) -> Grammar {
        self.grammar
    }

    /// Identifier of the engine the expression is meant for.
    #[must_use]
    pub const fn engine(&self) -> &'static str {
        self.engine
    }

    /// How `/` divides two integers.
    #[must_use]
    pub const fn division(&self) -> Division {
        self.division
    }

    /// The scope the names were resolved against.
    #[must_use]
    pub const fn scope(&self) -> &'s Scope<'s> {
        self.scope
    }

    /// Every free name and the value it resolved to.
    #[must_use]
    pub const fn terms(&self) -> &Bindings {
        &self.terms
    }

    /// The free names in order of first use.
    ///
    /// # Example
    /// ```
    /// use scopeval::{
    ///     compiler::compile,
    ///     interpreter::{parser::grammar::Grammar, value::core::Value},
    ///     scope::core::ScopeBuilder,
    /// };
    /// use std::collections::HashMap;
    ///
    /// let locals = HashMap::from([("a".to_string(), Value::Integer(1)),
    ///                              ("b".to_string(), Value::Integer(2))]);
    /// let scope = ScopeBuilder::new().locals(Some(&locals)).build();
    ///
    /// let compiled = compile("b * a + b", Grammar::Extended, &scope, "interpreted", true).unwrap();
    /// assert_eq!(compiled.names(), ["b", "a"]);
    /// ```
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl std::fmt::Debug for CompiledExpr<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledExpr")
         .field("source", &self.source)
         .field("grammar", &self.grammar)
         .field("engine", &self.engine)
         .field("division", &self.division)
         .field("names", &self.names)
         .finish_non_exhaustive()
    }
}

/// Parses `source` under `grammar` and resolves its free names in `scope`.
///
/// Names are looked up once each, in order of first use, so a missing name
/// is reported at its first position.
///
/// # Errors
/// - `EvalError::Syntax` when the text does not parse.
/// - `EvalError::NameResolution` for a name no namespace binds.
/// - `EvalError::ContextDepth` when resolution reaches a calling-context
///   frame that does not exist.
pub fn compile<'s>(source: &str,
                   grammar: Grammar,
                   scope: &'s Scope<'s>,
                   engine: &'static str,
                   true_division: bool)
                   -> Result<CompiledExpr<'s>, EvalError> {
    let tree = parse_source(source, grammar)?;

    let mut uses = Vec::new();
    tree.for_each_name(&mut |name, pos| {
            if !uses.iter().any(|(seen, _)| *seen == name) {
                uses.push((name, pos));
            }
        });

    let mut terms = Bindings::with_capacity(uses.len());
    for &(name, pos) in &uses {
        let value = scope.resolve(name)?
                         .ok_or_else(|| EvalError::NameResolution { name: name.to_string(),
                                                                    pos })?;
        terms.insert(name.to_string(), value);
    }
    let names = uses.into_iter().map(|(name, _)| name.to_string()).collect::<Vec<_>>();

    debug!(%grammar, engine, expr = %tree, names = ?names, "compiled");

    Ok(CompiledExpr { source: source.to_string(),
                      tree,
                      grammar,
                      engine,
                      division: Division::from_flag(true_division),
                      scope,
                      terms,
                      names })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        ErrorKind,
        error::ParseError,
        interpreter::value::core::Value,
        scope::{
            core::ScopeBuilder,
            frame::{CallStack, Frame},
        },
    };

    #[test]
    fn unknown_names_report_their_first_position() {
        let scope = ScopeBuilder::new().build();
        let err = compile("1 + missing * missing", Grammar::Strict, &scope, "interpreted", true)
            .unwrap_err();

        assert!(matches!(err, EvalError::NameResolution { ref name, pos: 4 } if name == "missing"));
    }

    #[test]
    fn syntax_errors_come_before_name_resolution() {
        let scope = ScopeBuilder::new().build();
        let err = compile("missing +", Grammar::Strict, &scope, "interpreted", true).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert!(matches!(err, EvalError::Syntax(ParseError::UnexpectedEndOfInput { pos: 9 })));
    }

    #[test]
    fn terms_hold_each_resolved_name_once() {
        let locals = HashMap::from([("x".to_string(), Value::Integer(3))]);
        let scope = ScopeBuilder::new().locals(Some(&locals)).build();
        let compiled = compile("x * x", Grammar::Extended, &scope, "interpreted", false).unwrap();

        assert_eq!(compiled.terms().len(), 1);
        assert_eq!(compiled.terms().get("x"), Some(&Value::Integer(3)));
        assert_eq!(compiled.division(), Division::Legacy);
        assert_eq!(compiled.source(), "x * x");
        assert_eq!(compiled.engine(), "interpreted");
        assert_eq!(compiled.grammar(), Grammar::Extended);
        assert_eq!(compiled.scope().resolver_count(), 0);
    }

    #[test]
    fn missing_context_frames_surface_during_resolution() {
        let stack = CallStack::from_iter([Frame::default().with_local("a", 1_i64)]);
        let scope = ScopeBuilder::new().context(Some(&stack), 5).build();

        let err = compile("a", Grammar::Extended, &scope, "interpreted", true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Context);

        // Literal-only text never consults the context.
        assert!(compile("1 + 1", Grammar::Extended, &scope, "interpreted", true).is_ok());
    }
}
