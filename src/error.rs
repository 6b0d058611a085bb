/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of an
/// expression. Parse errors include malformed text, unexpected tokens,
/// statement forms, and operators the selected grammar does not accept.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that an engine can raise while executing a
/// compiled expression: type mismatches, division by zero, overflow, shape
/// mismatches between arrays and unsupported operators.
pub mod runtime_error;
/// Pipeline errors.
///
/// The error taxonomy surfaced by [`crate::evaluate`]. Wraps the two error
/// types above and adds the configuration, dependency, capability, input type
/// and name resolution failures detected by the pipeline itself.
pub mod eval_error;

pub use eval_error::{ErrorKind, EvalError, RegistryKind};
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
