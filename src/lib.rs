//! # scopeval
//!
//! scopeval evaluates textual expressions such as `"a + b * 2"` against a
//! scope of named values. The caller picks the grammar that reads the text
//! and the engine that runs it, independently of each other.
//!
//! One call runs a fixed pipeline: the expression must be text; grammar and
//! engine identifiers are looked up in a [`Registry`]; resolvers are checked
//! for keyed lookup; a scope is assembled from locals, the calling context,
//! globals and resolvers; the text is compiled with every name resolved; the
//! engine executes; and a scalar result must be numeric or boolean.
//!
//! ```
//! use std::collections::HashMap;
//!
//! use scopeval::{EvalOptions, Value, evaluate};
//!
//! let locals = HashMap::from([("a".to_string(), Value::Integer(2)),
//!                             ("b".to_string(), Value::Integer(3))]);
//!
//! let value = evaluate("a + b * 2", &EvalOptions::default().with_locals(&locals)).unwrap();
//! assert_eq!(value, Value::Integer(8));
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use tracing::debug;

use crate::{
    compiler::compile,
    engine::{accelerated::ACCELERATED, execute},
    scope::{core::ScopeBuilder, frame::FIRST_CALLER_DEPTH, resolver::check_resolvers},
    validate::{check_result, ensure_text},
};

/// Defines the structure of parsed expressions.
///
/// This module declares the `Expr` enum and the operator types that represent
/// an expression as a tree. The tree is built by the parser, walked by the
/// interpreted engine and lowered by the accelerated one.
///
/// # Responsibilities
/// - Defines expression, literal and operator types.
/// - Attaches source positions to every node for error reporting.
/// - Renders trees back to fully parenthesised text.
pub mod ast;
/// Turns expression text into a compiled expression.
///
/// Parses under the selected grammar, resolves every free name against the
/// scope and bundles the tree with the options of the call.
pub mod compiler;
/// Execution backends and the executor that dispatches to them.
pub mod engine;
/// Provides unified error types for parsing, execution and the pipeline.
///
/// This module defines every error that can be raised while lexing, parsing,
/// executing or validating an evaluation. Errors carry the position of the
/// offending token where there is one.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (parser, engines, pipeline).
/// - Classifies pipeline errors into coarse kinds.
/// - Supports integration with standard error handling traits and reporting
///   utilities.
pub mod error;
/// Reading and computing expressions.
///
/// This module ties together lexing, parsing, the value model and the
/// evaluator kernels shared by every engine.
///
/// # Responsibilities
/// - Coordinates the lexer, the grammar-aware parser and the evaluator.
/// - Defines the runtime `Value` type.
/// - Implements operator semantics once, for all engines.
pub mod interpreter;
/// Grammar and engine identifier tables.
pub mod registry;
/// Namespaces and their precedence.
///
/// Explicit bindings, calling-context frames and caller-supplied resolvers
/// are assembled here into the scope that names are resolved against.
pub mod scope;
/// General utilities for safe numeric conversion and helpers.
///
/// This module provides reusable helpers and conversion routines that are used
/// throughout the evaluator. These include safe conversions between integer
/// and floating-point types and the flooring rules of `/` and `%`.
///
/// # Responsibilities
/// - Safely convert between `i64`, `u32`, `usize`, and `f64` without silent
///   data loss.
/// - Provide general utility functions used in multiple modules.
pub mod util;
/// Checks on what goes into and comes out of an evaluation.
pub mod validate;

pub use error::{ErrorKind, EvalError};
pub use interpreter::value::core::Value;
pub use registry::Registry;
pub use scope::{
    Bindings,
    frame::{CallStack, Frame},
    resolver::{Namespace, Resolver},
};
pub use validate::Source;

/// Grammar used when none is selected.
pub const DEFAULT_GRAMMAR: &str = "extended";

/// Engine used when none is selected.
pub const DEFAULT_ENGINE: &str = ACCELERATED;

/// Calling-context depth used when none is selected: the innermost frame.
pub const DEFAULT_CONTEXT_DEPTH: usize = FIRST_CALLER_DEPTH;

/// Result type of the evaluation pipeline.
pub type Result<T> = std::result::Result<T, EvalError>;

/// Everything about an evaluation except the expression itself.
///
/// # Example
/// ```
/// use scopeval::{EvalOptions, Value, evaluate};
///
/// let options = EvalOptions::default().with_grammar("strict")
///                                     .with_engine("interpreted")
///                                     .with_true_division(false);
///
/// assert_eq!(evaluate("7 / 2", &options).unwrap(), Value::Integer(3));
/// assert_eq!(evaluate("7 // 2", &options).unwrap(), Value::Integer(3));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EvalOptions<'a> {
    /// Grammar identifier.
    pub grammar:       &'a str,
    /// Engine identifier.
    pub engine:        &'a str,
    /// Whether `/` between integers yields a real.
    pub true_division: bool,
    /// Explicit local bindings.
    pub locals:        Option<&'a Bindings>,
    /// Explicit global bindings.
    pub globals:       Option<&'a Bindings>,
    /// Extra namespaces, consulted in order after every other one.
    pub resolvers:     &'a [Namespace],
    /// The calling context, if the caller tracks one.
    pub stack:         Option<&'a CallStack>,
    /// Which frame of `stack` to capture.
    pub context_depth: usize,
}

impl Default for EvalOptions<'_> {
    fn default() -> Self {
        Self { grammar:       DEFAULT_GRAMMAR,
               engine:        DEFAULT_ENGINE,
               true_division: true,
               locals:        None,
               globals:       None,
               resolvers:     &[],
               stack:         None,
               context_depth: DEFAULT_CONTEXT_DEPTH, }
    }
}

impl<'a> EvalOptions<'a> {
    /// Selects the grammar.
    #[must_use]
    pub const fn with_grammar(mut self, grammar: &'a str) -> Self {
        self.grammar = grammar;
        self
    }

    /// Selects the engine.
    #[must_use]
    pub const fn with_engine(mut self, engine: &'a str) -> Self {
        self.engine = engine;
        self
    }

    /// Sets the division mode.
    #[must_use]
    pub const fn with_true_division(mut self, true_division: bool) -> Self {
        self.true_division = true_division;
        self
    }

    /// Sets the local bindings.
    #[must_use]
    pub const fn with_locals(mut self, locals: &'a Bindings) -> Self {
        self.locals = Some(locals);
        self
    }

    /// Sets the global bindings.
    #[must_use]
    pub const fn with_globals(mut self, globals: &'a Bindings) -> Self {
        self.globals = Some(globals);
        self
    }

    /// Sets the resolver chain.
    #[must_use]
    pub const fn with_resolvers(mut self, resolvers: &'a [Namespace]) -> Self {
        self.resolvers = resolvers;
        self
    }

    /// Supplies the calling context and the depth of the frame to capture.
    #[must_use]
    pub const fn with_context(mut self, stack: &'a CallStack, depth: usize) -> Self {
        self.stack = Some(stack);
        self.context_depth = depth;
        self
    }
}

/// Evaluates an expression against the process-wide [`Registry`].
///
/// # Errors
/// See [`evaluate_in`].
pub fn evaluate<'e>(expr: impl Into<Source<'e>>, options: &EvalOptions<'_>) -> Result<Value> {
    evaluate_in(Registry::global(), expr, options)
}

/// Evaluates an expression against `registry`.
///
/// Every check runs before any work it guards: nothing is compiled for an
/// unknown identifier, and no context is captured for an unusable resolver.
///
/// # Errors
/// In pipeline order:
/// - `ExpressionNotText` when `expr` is not text.
/// - `Configuration` or `DependencyMissing` for the grammar and engine.
/// - `Capability` for a resolver without keyed lookup.
/// - `Syntax`, `NameResolution` or `ContextDepth` while compiling.
/// - `Engine` when execution fails.
/// - `InvalidScalarResult` when the result is a text scalar.
///
/// # Example
/// ```
/// use scopeval::{ErrorKind, EvalOptions, Registry, Value, evaluate_in};
///
/// let registry = Registry::with_defaults();
/// let options = EvalOptions::default();
///
/// assert_eq!(evaluate_in(&registry, "2 + 3", &options).unwrap(), Value::Integer(5));
///
/// let err = evaluate_in(&registry, Value::Integer(1), &options).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::InputType);
/// ```
#[tracing::instrument(level = "debug", skip_all, fields(grammar = options.grammar, engine = options.engine))]
pub fn evaluate_in<'e>(registry: &Registry,
                       expr: impl Into<Source<'e>>,
                       options: &EvalOptions<'_>)
                       -> Result<Value> {
    let source = expr.into();
    let text = ensure_text(&source)?;

    let grammar = registry.grammar(options.grammar)?;
    let engine = registry.engine(options.engine)?;
    let resolvers = check_resolvers(options.resolvers)?;

    let scope = ScopeBuilder::new().locals(options.locals)
                                   .globals(options.globals)
                                   .context(options.stack, options.context_depth)
                                   .resolvers(resolvers)
                                   .build();

    let compiled = compile(text, grammar, &scope, engine.name(), options.true_division)?;
    let value = execute(registry, &compiled)?;

    debug!(result_type = value.type_name(), "evaluated");
    check_result(value)
}
