use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Represents all errors that can occur during lexing or parsing.
///
/// Every position is a byte offset into the expression text.
pub enum ParseError {
    /// The expression text was empty or contained only whitespace.
    #[error("Expression cannot be empty.")]
    EmptyExpression,
    /// Found an unexpected token while parsing.
    #[error("Error at position {pos}: Unexpected token: {token}.")]
    UnexpectedToken {
        /// The token encountered.
        token: String,
        /// Where the token starts.
        pos:   usize,
    },
    /// Reached the end of input unexpectedly.
    #[error("Error at position {pos}: Unexpected end of input.")]
    UnexpectedEndOfInput {
        /// Where the input ended.
        pos: usize,
    },
    /// A closing parenthesis `)` was expected but not found.
    #[error("Error at position {pos}: Expected closing parenthesis ')' but none found.")]
    ExpectedClosingParen {
        /// Position of the opening parenthesis.
        pos: usize,
    },
    /// A closing bracket `]` was expected but not found.
    #[error("Error at position {pos}: Expected closing bracket ']' but none found.")]
    ExpectedClosingBracket {
        /// Position of the opening bracket.
        pos: usize,
    },
    /// Found extra tokens after parsing should have completed.
    #[error("Error at position {pos}: Extra tokens after expression: {token}.")]
    UnexpectedTrailingTokens {
        /// The extra/unexpected token.
        token: String,
        /// Where the token starts.
        pos:   usize,
    },
    /// The text contains an assignment, which is not a value expression.
    #[error("Error at position {pos}: Assignment is not allowed, only expressions can be evaluated.")]
    AssignmentNotAllowed {
        /// Position of the assignment operator.
        pos: usize,
    },
    /// The text contains more than one statement.
    #[error("Error at position {pos}: Statements are not allowed, only a single expression can be evaluated.")]
    StatementNotAllowed {
        /// Position of the statement separator.
        pos: usize,
    },
    /// The operator is valid text but the selected grammar does not accept it.
    #[error("Error at position {pos}: Operator '{op}' is not supported by the '{grammar}' grammar.")]
    UnsupportedOperator {
        /// The operator as written.
        op:      String,
        /// Identifier of the grammar in use.
        grammar: &'static str,
        /// Position of the operator.
        pos:     usize,
    },
    /// A literal value was too large to be represented safely.
    #[error("Error at position {pos}: Literal is too large.")]
    LiteralTooLarge {
        /// Position of the literal.
        pos: usize,
    },
}

impl ParseError {
    /// Byte offset of the offending text, when the error has one.
    #[must_use]
    pub const fn position(&self) -> Option<usize> {
        match self {
            Self::EmptyExpression => None,
            Self::UnexpectedToken { pos, .. }
            | Self::UnexpectedEndOfInput { pos }
            | Self::ExpectedClosingParen { pos }
            | Self::ExpectedClosingBracket { pos }
            | Self::UnexpectedTrailingTokens { pos, .. }
            | Self::AssignmentNotAllowed { pos }
            | Self::StatementNotAllowed { pos }
            | Self::UnsupportedOperator { pos, .. }
            | Self::LiteralTooLarge { pos } => Some(*pos),
        }
    }
}
