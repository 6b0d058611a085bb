use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::{Token, tokenize},
        parser::{binary::parse_logical_or, grammar::Grammar},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a complete expression text under `grammar`.
///
/// The whole text must form exactly one expression. Assignments (`=`, `+=`,
/// ...) and statement separators (`;`) are reported with their own errors;
/// any other leftover token is an `UnexpectedTrailingTokens` error.
///
/// # Errors
/// Returns the first `ParseError` found, positioned as a byte offset into
/// `source`.
///
/// # Example
/// ```
/// use scopeval::{
///     error::ParseError,
///     interpreter::parser::{core::parse_source, grammar::Grammar},
/// };
///
/// assert!(parse_source("a + b * 2", Grammar::Extended).is_ok());
///
/// let err = parse_source("x = 1", Grammar::Strict).unwrap_err();
/// assert_eq!(err, ParseError::AssignmentNotAllowed { pos: 2 });
///
/// let err = parse_source("a // b", Grammar::Extended).unwrap_err();
/// assert!(matches!(err, ParseError::UnsupportedOperator { grammar: "extended", .. }));
/// ```
pub fn parse_source(source: &str, grammar: Grammar) -> ParseResult<Expr> {
    if source.trim().is_empty() {
        return Err(ParseError::EmptyExpression);
    }

    let tokens = tokenize(source)?;
    let mut iter = tokens.iter().peekable();

    // Inner levels report running out of tokens without knowing the text
    // length; anchor those errors at the end of the text.
    let expr = parse_expression(&mut iter, grammar).map_err(|e| match e {
                                                       ParseError::UnexpectedEndOfInput { .. } => {
                                                           ParseError::UnexpectedEndOfInput { pos: source.len() }
                                                       },
                                                       other => other,
                                                   })?;

    match iter.next() {
        None => Ok(expr),
        Some((token, pos)) => Err(leftover_token_error(token, *pos)),
    }
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence level and recursively descends through
/// the precedence hierarchy of `grammar`.
///
/// Grammar: `expression := logical_or`
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>, grammar: Grammar) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_logical_or(tokens, grammar)
}

/// Classifies a token found where an expression should already have ended.
#[must_use]
pub fn leftover_token_error(token: &Token, pos: usize) -> ParseError {
    match token {
        Token::Equals | Token::AugAssign(_) => ParseError::AssignmentNotAllowed { pos },
        Token::Semicolon => ParseError::StatementNotAllowed { pos },
        other => ParseError::UnexpectedTrailingTokens { token: other.to_string(),
                                                        pos },
    }
}
