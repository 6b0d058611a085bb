use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr, LiteralValue, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::parse_comparison,
            core::{ParseResult, leftover_token_error, parse_expression},
            grammar::Grammar,
            utils::parse_comma_separated,
        },
    },
};

/// Parses the low-precedence `not` prefix.
///
/// Under the strict grammar `not` is a logical negation of the operand's
/// truth value; under the extended grammar it is the elementwise `~`.
///
/// Grammar:
/// ```text
///     not := "not" not
///          | comparison
/// ```
pub(crate) fn parse_not<'a, I>(tokens: &mut Peekable<I>, grammar: Grammar) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Not, pos)) = tokens.peek() {
        let pos = *pos;
        tokens.next();
        let expr = parse_not(tokens, grammar)?;
        let op = match grammar {
            Grammar::Strict => UnaryOperator::Not,
            Grammar::Extended => UnaryOperator::Invert,
        };
        return Ok(Expr::UnaryOp { op,
                                  expr: Box::new(expr),
                                  pos });
    }
    parse_comparison(tokens, grammar)
}

/// Parses a unary expression.
///
/// Supports prefix operators:
/// - `-`  (numeric negation)
/// - `+`  (numeric identity)
/// - `~`  (elementwise not)
///
/// Unary operators are right-associative, so an input like `-~x` is parsed as
/// `-(~x)`. They bind looser than `**` on their right: `-2 ** 2` is `-(2 **
/// 2)`.
///
/// Grammar:
/// ```text
///     unary := ("-" | "+" | "~") unary
///            | power
/// ```
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>, grammar: Grammar) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let op = match tokens.peek() {
        Some((Token::Minus, _)) => Some(UnaryOperator::Negate),
        Some((Token::Plus, _)) => Some(UnaryOperator::Plus),
        Some((Token::Tilde, _)) => Some(UnaryOperator::Invert),
        _ => None,
    };

    if let Some(op) = op
       && let Some((_, pos)) = tokens.next()
    {
        let expr = parse_unary(tokens, grammar)?;
        return Ok(Expr::UnaryOp { op,
                                  expr: Box::new(expr),
                                  pos: *pos });
    }
    parse_power(tokens, grammar)
}

/// Parses exponentiation.
///
/// `**` is right-associative and its right operand may carry a unary
/// prefix: `2 ** -1` and `2 ** 3 ** 2` (`2 ** 9`) are both accepted.
///
/// Grammar: `power := postfix ("**" unary)?`
fn parse_power<'a, I>(tokens: &mut Peekable<I>, grammar: Grammar) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let primary = parse_primary(tokens, grammar)?;
    let base = parse_postfix(tokens, grammar, primary)?;

    if let Some((Token::DoubleStar, pos)) = tokens.peek() {
        let pos = *pos;
        tokens.next();
        let exponent = parse_unary(tokens, grammar)?;
        return Ok(Expr::BinaryOp { left: Box::new(base),
                                   op: BinaryOperator::Pow,
                                   right: Box::new(exponent),
                                   pos });
    }
    Ok(base)
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar:
/// - numeric, boolean and text literals
/// - names
/// - parenthesized expressions
/// - array literals (`[ ... ]`)
///
/// Grammar (simplified):
/// ```text
///     primary := literal
///              | identifier
///              | "(" expression ")"
///              | "[" elements "]"
/// ```
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>, grammar: Grammar) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (token, pos) = tokens.next()
                             .ok_or(ParseError::UnexpectedEndOfInput { pos: 0 })?;
    let pos = *pos;

    let literal = |value: LiteralValue| -> ParseResult<Expr> { Ok(Expr::Literal { value, pos }) };

    match token {
        Token::Integer(Some(n)) => literal(LiteralValue::Integer(*n)),
        Token::Integer(None) => Err(ParseError::LiteralTooLarge { pos }),
        Token::Real(r) => literal(LiteralValue::Real(*r)),
        Token::Bool(b) => literal(LiteralValue::Bool(*b)),
        Token::Text(s) => literal(LiteralValue::Text(s.clone())),
        Token::Identifier(name) => Ok(Expr::Name { name: name.clone(),
                                                   pos }),
        Token::LParen => parse_grouping(tokens, grammar, pos),
        Token::LBracket => {
            let elements =
                parse_comma_separated(tokens, |t| parse_expression(t, grammar), &Token::RBracket)?;
            Ok(Expr::ArrayLiteral { elements, pos })
        },
        Token::Equals | Token::AugAssign(_) | Token::Semicolon => Err(leftover_token_error(token, pos)),
        tok => Err(ParseError::UnexpectedToken { token: tok.to_string(),
                                                 pos }),
    }
}

/// Parses the inside of a parenthesized expression; the `(` at `open` has
/// already been consumed.
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>, grammar: Grammar, open: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let expr = parse_expression(tokens, grammar)?;
    match tokens.next() {
        Some((Token::RParen, _)) => Ok(expr),
        Some((tok @ (Token::Equals | Token::AugAssign(_) | Token::Semicolon), pos)) => {
            Err(leftover_token_error(tok, *pos))
        },
        _ => Err(ParseError::ExpectedClosingParen { pos: open }),
    }
}

/// Parses postfix indexing applied to an expression.
///
/// Multiple chained indices are allowed:
/// ```text
///        a[0][1]
/// ```
///
/// Grammar:
/// ```text
///     postfix := primary
///              | postfix "[" expression "]"
/// ```
fn parse_postfix<'a, I>(tokens: &mut Peekable<I>, grammar: Grammar, mut node: Expr) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    while let Some((Token::LBracket, pos)) = tokens.peek() {
        let pos = *pos;
        tokens.next();
        let index = parse_expression(tokens, grammar)?;
        match tokens.next() {
            Some((Token::RBracket, _)) => {
                node = Expr::Index { array: Box::new(node),
                                     index: Box::new(index),
                                     pos };
            },
            _ => return Err(ParseError::ExpectedClosingBracket { pos }),
        }
    }
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::parser::core::parse_source;

    fn render(source: &str, grammar: Grammar) -> String {
        parse_source(source, grammar).unwrap().to_string()
    }

    #[test]
    fn power_binds_tighter_than_unary_minus() {
        assert_eq!(render("-2 ** 2", Grammar::Strict), "(-(2 ** 2))");
        assert_eq!(render("2 ** -1", Grammar::Strict), "(2 ** (-1))");
        assert_eq!(render("2 ** 3 ** 2", Grammar::Extended), "(2 ** (3 ** 2))");
    }

    #[test]
    fn keywords_follow_the_grammar() {
        assert_eq!(render("not a and b", Grammar::Strict), "((not a) and b)");
        assert_eq!(render("not a and b", Grammar::Extended), "((~a) & b)");
        assert_eq!(render("a or b and c", Grammar::Extended), "(a | (b & c))");
    }

    #[test]
    fn bitwise_precedence_depends_on_grammar() {
        assert_eq!(render("a > 1 & b < 2", Grammar::Extended), "((a > 1) & (b < 2))");
        assert_eq!(render("a > 1 & b", Grammar::Strict), "(a > (1 & b))");
    }

    #[test]
    fn chained_comparisons_are_joined() {
        assert_eq!(render("1 < x <= 3", Grammar::Strict), "((1 < x) & (x <= 3))");
    }

    #[test]
    fn indexing_chains() {
        assert_eq!(render("m[0][-1]", Grammar::Strict), "m[0][(-1)]");
        assert_eq!(render("[1, 2.5, 'x']", Grammar::Strict), "[1, 2.5, \"x\"]");
    }

    #[test]
    fn malformed_text_reports_positions() {
        assert_eq!(parse_source("(1 + 2", Grammar::Strict),
                   Err(ParseError::ExpectedClosingParen { pos: 0 }));
        assert_eq!(parse_source("a[1", Grammar::Strict),
                   Err(ParseError::ExpectedClosingBracket { pos: 1 }));
        assert_eq!(parse_source("1 +", Grammar::Strict),
                   Err(ParseError::UnexpectedEndOfInput { pos: 3 }));
        assert_eq!(parse_source("   ", Grammar::Strict),
                   Err(ParseError::EmptyExpression));
        assert_eq!(parse_source("a; b", Grammar::Extended),
                   Err(ParseError::StatementNotAllowed { pos: 1 }));
        assert_eq!(parse_source("x += 1", Grammar::Extended),
                   Err(ParseError::AssignmentNotAllowed { pos: 2 }));
        assert_eq!(parse_source("99999999999999999999", Grammar::Strict),
                   Err(ParseError::LiteralTooLarge { pos: 0 }));
    }
}
