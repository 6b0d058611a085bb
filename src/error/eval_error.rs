use thiserror::Error;

use crate::error::{ParseError, RuntimeError};

/// The two identifier tables kept by a [`crate::registry::Registry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryKind {
    /// Grammar (parser variant) identifiers.
    Grammar,
    /// Engine (backend) identifiers.
    Engine,
}

impl std::fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Grammar => write!(f, "grammar"),
            Self::Engine => write!(f, "engine"),
        }
    }
}

/// Coarse classification of an [`EvalError`].
///
/// Callers that only care about the failure category (for exit codes, retries
/// or tests) match on this instead of the full error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unknown or duplicate grammar/engine identifier.
    Configuration,
    /// The selected engine's runtime dependency is unavailable.
    DependencyMissing,
    /// A supplied resolver has no keyed lookup.
    Capability,
    /// Non-text expression, or a scalar result that is not numeric or bool.
    InputType,
    /// The text does not parse under the selected grammar.
    Syntax,
    /// An identifier is not bound in any namespace.
    NameResolution,
    /// The requested calling-context frame does not exist.
    Context,
    /// The engine failed while executing.
    Engine,
    /// A binding supplied from outside (CLI, JSON) could not be converted.
    Binding,
}

/// Every failure the evaluation pipeline can report.
#[derive(Debug, Error)]
pub enum EvalError {
    /// The identifier is not registered.
    #[error("Invalid {kind} '{name}' passed, valid {kind}s are: {}.", .valid.join(", "))]
    Configuration {
        /// Which table was searched.
        kind:  RegistryKind,
        /// The rejected identifier.
        name:  String,
        /// All identifiers registered in that table.
        valid: Vec<String>,
    },
    /// A registry was built with the same identifier twice.
    #[error("The {kind} '{name}' is already registered.")]
    DuplicateIdentifier {
        /// Which table was being filled.
        kind: RegistryKind,
        /// The repeated identifier.
        name: String,
    },
    /// The engine cannot run in this build.
    #[error("'{dependency}' not found. Cannot use engine '{engine}' without it ({hint}).")]
    DependencyMissing {
        /// Identifier of the selected engine.
        engine:     String,
        /// Name of the missing dependency.
        dependency: String,
        /// How to make the dependency available.
        hint:       String,
    },
    /// A resolver candidate does not support keyed lookup.
    #[error("Resolver of type '{type_name}' must support keyed lookup.")]
    Capability {
        /// Type of the offending candidate.
        type_name: String,
    },
    /// The expression argument was not text.
    #[error("Only text expressions can be evaluated, got a value of type '{type_name}'.")]
    ExpressionNotText {
        /// Type of the value received.
        type_name: &'static str,
    },
    /// The engine produced a scalar that is neither numeric nor boolean.
    #[error("Scalar result must be numeric or bool, result type is '{type_name}'.")]
    InvalidScalarResult {
        /// Type of the scalar produced.
        type_name: &'static str,
    },
    /// The expression text is malformed.
    #[error(transparent)]
    Syntax(#[from] ParseError),
    /// A free identifier is unbound.
    #[error("Error at position {pos}: Name '{name}' is not defined.")]
    NameResolution {
        /// The unresolved identifier.
        name: String,
        /// Position of its first use.
        pos:  usize,
    },
    /// The calling-context stack is shallower than the requested depth.
    #[error("No calling-context frame at depth {depth}, {available} frame(s) available.")]
    ContextDepth {
        /// The requested depth.
        depth:     usize,
        /// Number of frames on the supplied stack.
        available: usize,
    },
    /// The engine raised while executing.
    #[error("Engine '{engine}' failed: {source}")]
    Engine {
        /// Identifier of the engine that failed.
        engine: String,
        /// The engine's own error.
        #[source]
        source: RuntimeError,
    },
    /// A binding from outside the library could not be converted to a value.
    #[error("Invalid binding '{name}': {details}.")]
    InvalidBinding {
        /// The binding name (or source file).
        name:    String,
        /// What went wrong.
        details: String,
    },
}

impl EvalError {
    /// Returns the category of this error.
    ///
    /// # Example
    /// ```
    /// use scopeval::{ErrorKind, EvalError};
    ///
    /// let err = EvalError::Capability { type_name: "int".to_string() };
    /// assert_eq!(err.kind(), ErrorKind::Capability);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration { .. } | Self::DuplicateIdentifier { .. } => {
                ErrorKind::Configuration
            },
            Self::DependencyMissing { .. } => ErrorKind::DependencyMissing,
            Self::Capability { .. } => ErrorKind::Capability,
            Self::ExpressionNotText { .. } | Self::InvalidScalarResult { .. } => {
                ErrorKind::InputType
            },
            Self::Syntax(_) => ErrorKind::Syntax,
            Self::NameResolution { .. } => ErrorKind::NameResolution,
            Self::ContextDepth { .. } => ErrorKind::Context,
            Self::Engine { .. } => ErrorKind::Engine,
            Self::InvalidBinding { .. } => ErrorKind::Binding,
        }
    }
}
