use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::Token,
        parser::{
            core::ParseResult,
            grammar::Grammar,
            unary::{parse_not, parse_unary},
        },
    },
};

/// Maps a token to the binary operator it spells under `grammar`.
///
/// Returns `None` for tokens that are not binary operators. The keywords
/// `and` and `or` are elementwise under the extended grammar and
/// short-circuiting under the strict one.
///
/// # Example
/// ```
/// use scopeval::{
///     ast::BinaryOperator,
///     interpreter::{
///         lexer::Token,
///         parser::{binary::token_to_binary_operator, grammar::Grammar},
///     },
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::Plus, Grammar::Strict),
///            Some(BinaryOperator::Add));
/// assert_eq!(token_to_binary_operator(&Token::And, Grammar::Extended),
///            Some(BinaryOperator::BitAnd));
/// assert_eq!(token_to_binary_operator(&Token::And, Grammar::Strict),
///            Some(BinaryOperator::And));
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token, grammar: Grammar) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::DoubleSlash => Some(BinaryOperator::FloorDiv),
        Token::Percent => Some(BinaryOperator::Mod),
        Token::DoubleStar => Some(BinaryOperator::Pow),
        Token::Ampersand => Some(BinaryOperator::BitAnd),
        Token::Pipe => Some(BinaryOperator::BitOr),
        Token::Less => Some(BinaryOperator::Less),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        Token::EqualEqual => Some(BinaryOperator::Equal),
        Token::BangEqual => Some(BinaryOperator::NotEqual),
        Token::And => match grammar {
            Grammar::Extended => Some(BinaryOperator::BitAnd),
            Grammar::Strict => Some(BinaryOperator::And),
        },
        Token::Or => match grammar {
            Grammar::Extended => Some(BinaryOperator::BitOr),
            Grammar::Strict => Some(BinaryOperator::Or),
        },
        _ => None,
    }
}

/// Determines whether a binary operator is a comparison.
///
/// # Example
/// ```
/// use scopeval::{ast::BinaryOperator, interpreter::parser::binary::is_comparison_op};
///
/// assert!(is_comparison_op(BinaryOperator::Less));
/// assert!(!is_comparison_op(BinaryOperator::Add));
/// ```
#[must_use]
pub const fn is_comparison_op(op: BinaryOperator) -> bool {
    matches!(op,
             BinaryOperator::Less
             | BinaryOperator::Greater
             | BinaryOperator::LessEqual
             | BinaryOperator::GreaterEqual
             | BinaryOperator::Equal
             | BinaryOperator::NotEqual)
}

/// Parses one left-associative precedence level.
///
/// Reads `operand (op operand)*` for every operator accepted by `accepts`,
/// folding the chain to the left.
fn parse_left_associative<'a, I>(tokens: &mut Peekable<I>,
                                 grammar: Grammar,
                                 accepts: impl Fn(BinaryOperator) -> bool,
                                 operand: impl Fn(&mut Peekable<I>, Grammar) -> ParseResult<Expr>)
                                 -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = operand(tokens, grammar)?;

    loop {
        if let Some((token, pos)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token, grammar)
           && accepts(op)
        {
            let pos = *pos;
            grammar.check_operator(op, pos)?;
            tokens.next();

            let right = operand(tokens, grammar)?;

            left = Expr::BinaryOp { left: Box::new(left),
                                    op,
                                    right: Box::new(right),
                                    pos };
            continue;
        }

        break;
    }

    Ok(left)
}

/// Parses logical OR expressions.
///
/// Strict: `logical_or := logical_and ("or" logical_and)*`, short-circuiting.
///
/// Extended: `logical_or := logical_and (("or" | "|") logical_and)*`,
/// elementwise.
pub fn parse_logical_or<'a, I>(tokens: &mut Peekable<I>, grammar: Grammar) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let accepts = |op: BinaryOperator| match grammar {
        Grammar::Strict => op == BinaryOperator::Or,
        Grammar::Extended => op == BinaryOperator::BitOr,
    };
    parse_left_associative(tokens, grammar, accepts, parse_logical_and)
}

/// Parses logical AND expressions.
///
/// Precedence is higher than OR. The `not` level sits directly below it.
pub fn parse_logical_and<'a, I>(tokens: &mut Peekable<I>, grammar: Grammar) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let accepts = |op: BinaryOperator| match grammar {
        Grammar::Strict => op == BinaryOperator::And,
        Grammar::Extended => op == BinaryOperator::BitAnd,
    };
    parse_left_associative(tokens, grammar, accepts, parse_not)
}

/// Parses comparisons, desugaring chains.
///
/// `a < b <= c` becomes `(a < b) & (b <= c)`, so every comparison in the
/// chain must hold.
///
/// Grammar: `comparison := operand (cmp_op operand)*`, where `operand` is the
/// `|` level under the strict grammar and the additive level under the
/// extended one.
pub fn parse_comparison<'a, I>(tokens: &mut Peekable<I>, grammar: Grammar) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let operand: fn(&mut Peekable<I>, Grammar) -> ParseResult<Expr> =
        if grammar.bitwise_above_comparison() { parse_bit_or } else { parse_additive };

    let mut previous = operand(tokens, grammar)?;
    let mut chain: Option<Expr> = None;

    while let Some((token, pos)) = tokens.peek() {
        let op = match token_to_binary_operator(token, grammar) {
            Some(op) if is_comparison_op(op) => op,
            _ => break,
        };

        let pos = *pos;
        tokens.next();

        let right = operand(tokens, grammar)?;
        let comparison = Expr::BinaryOp { left: Box::new(previous),
                                          op,
                                          right: Box::new(right.clone()),
                                          pos };
        previous = right;

        chain = Some(match chain {
                         None => comparison,
                         Some(earlier) => Expr::BinaryOp { left: Box::new(earlier),
                                                           op: BinaryOperator::BitAnd,
                                                           right: Box::new(comparison),
                                                           pos },
                     });
    }

    Ok(chain.unwrap_or(previous))
}

/// Parses `|` chains (strict grammar only).
pub fn parse_bit_or<'a, I>(tokens: &mut Peekable<I>, grammar: Grammar) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_associative(tokens,
                           grammar,
                           |op| op == BinaryOperator::BitOr,
                           parse_bit_and)
}

/// Parses `&` chains (strict grammar only).
pub fn parse_bit_and<'a, I>(tokens: &mut Peekable<I>, grammar: Grammar) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_associative(tokens,
                           grammar,
                           |op| op == BinaryOperator::BitAnd,
                           parse_additive)
}

/// Parses addition and subtraction expressions.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>, grammar: Grammar) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_associative(tokens,
                           grammar,
                           |op| matches!(op, BinaryOperator::Add | BinaryOperator::Sub),
                           parse_multiplicative)
}

/// Parses multiplication-level expressions.
///
/// The rule is: `multiplicative := unary (("*" | "/" | "//" | "%") unary)*`
///
/// `//` is rejected here when the grammar does not support it.
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>, grammar: Grammar) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_associative(tokens,
                           grammar,
                           |op| {
                               matches!(op,
                                        BinaryOperator::Mul
                                        | BinaryOperator::Div
                                        | BinaryOperator::FloorDiv
                                        | BinaryOperator::Mod)
                           },
                           parse_unary)
}
