use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Represents all errors that can occur while an engine executes a compiled
/// expression.
pub enum RuntimeError {
    /// A name was not part of the compiled expression's resolved terms.
    #[error("Error at position {pos}: Unknown variable '{name}'.")]
    UnknownVariable {
        /// The name of the variable.
        name: String,
        /// Position of the name in the expression.
        pos:  usize,
    },
    /// A value had an unexpected or incompatible type.
    #[error("Error at position {pos}: Type error: {details}.")]
    TypeError {
        /// Details about the type mismatch.
        details: String,
        /// Position of the operation.
        pos:     usize,
    },
    /// The engine cannot execute this operator.
    #[error("Error at position {pos}: Operator '{op}' is not supported by this engine.")]
    UnsupportedOperator {
        /// The operator as written.
        op:  String,
        /// Position of the operator.
        pos: usize,
    },
    /// Two arrays combined elementwise had different lengths.
    #[error("Error at position {pos}: Cannot combine arrays of different lengths: {left} vs {right}.")]
    ShapeMismatch {
        /// Length of the left operand.
        left:  usize,
        /// Length of the right operand.
        right: usize,
        /// Position of the operation.
        pos:   usize,
    },
    /// An array was used where a single truth value is needed.
    #[error("Error at position {pos}: The truth value of an array is ambiguous.")]
    AmbiguousTruth {
        /// Position of the logical operation.
        pos: usize,
    },
    /// A numeric value was expected, but not found.
    #[error("Error at position {pos}: Expected number.")]
    ExpectedNumber {
        /// Position of the operation.
        pos: usize,
    },
    /// Arithmetic operation overflowed.
    #[error("Error at position {pos}: Integer overflow while trying to compute result.")]
    Overflow {
        /// Position of the operation.
        pos: usize,
    },
    /// Tried to access an array element outside the allowed bounds.
    #[error("Error at position {pos}: Index {found} out of bounds for array of length {len}.")]
    IndexOutOfBounds {
        /// Length of the indexed array.
        len:   usize,
        /// The index that was actually requested.
        found: i64,
        /// Position of the index expression.
        pos:   usize,
    },
    /// Attempted division by zero.
    #[error("Error at position {pos}: Division by zero.")]
    DivisionByZero {
        /// Position of the division.
        pos: usize,
    },
    /// A value was too large to be represented safely.
    #[error("Error at position {pos}: Value is too large.")]
    LiteralTooLarge {
        /// Position of the operation.
        pos: usize,
    },
    /// A value was too small to be represented safely.
    #[error("Error at position {pos}: Value is too small.")]
    LiteralTooSmall {
        /// Position of the operation.
        pos: usize,
    },
    /// Tried to use a real number where an integer was required.
    #[error("Error at position {pos}: Value is fractional and cannot be safely converted to an integer.")]
    RealIsFractional {
        /// Position of the operation.
        pos: usize,
    },
}
