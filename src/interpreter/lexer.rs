use logos::Logos;

use crate::{error::ParseError, interpreter::parser::core::ParseResult};

/// Represents a lexical token in the expression text.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// Statement tokens (`=`, `+=`, `;`) are recognised only so the parser can
/// reject them with a precise error.
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum Token {
    /// Numeric literal tokens, such as `3.14`, `.5`, `2.0` or `2.1e-10`.
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", parse_float)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_float)]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+", parse_float)]
    Real(f64),
    /// Integer literal tokens, such as `42`. `None` when the literal does
    /// not fit in an `i64`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(Option<i64>),
    /// Boolean literal tokens: `True`, `False`, `true` or `false`.
    #[token("True", |_| Some(true))]
    #[token("true", |_| Some(true))]
    #[token("False", |_| Some(false))]
    #[token("false", |_| Some(false))]
    Bool(bool),
    /// Quoted text, with the quotes removed and escapes applied.
    #[regex(r#""([^"\\]|\\.)*""#, parse_text)]
    #[regex(r"'([^'\\]|\\.)*'", parse_text)]
    Text(String),
    /// `and`
    #[token("and")]
    And,
    /// `or`
    #[token("or")]
    Or,
    /// `not`
    #[token("not")]
    Not,
    /// Identifier tokens; names such as `x` or `total_2`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `+=`, `-=`, `**=` and the other augmented assignments.
    #[regex(r"(\+|-|\*|/|//|\*\*|%|&|\|)=", |lex| lex.slice().to_string())]
    AugAssign(String),
    /// `**`
    #[token("**")]
    DoubleStar,
    /// `//`
    #[token("//")]
    DoubleSlash,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `&`
    #[token("&")]
    Ampersand,
    /// `|`
    #[token("|")]
    Pipe,
    /// `~`
    #[token("~")]
    Tilde,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// `=`
    #[token("=")]
    Equals,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// Spaces, tabs and line breaks.
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Ignored,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Real(r) => write!(f, "{r:?}"),
            Self::Integer(Some(n)) => write!(f, "{n}"),
            Self::Integer(None) => write!(f, "<integer>"),
            Self::Bool(b) => write!(f, "{}", if *b { "True" } else { "False" }),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Identifier(name) => write!(f, "{name}"),
            Self::AugAssign(op) => write!(f, "{op}"),
            other => write!(f, "'{}'", symbol(other)),
        }
    }
}

/// Spelling of the fixed tokens, used in error messages.
const fn symbol(token: &Token) -> &'static str {
    match token {
        Token::And => "and",
        Token::Or => "or",
        Token::Not => "not",
        Token::DoubleStar => "**",
        Token::DoubleSlash => "//",
        Token::Plus => "+",
        Token::Minus => "-",
        Token::Star => "*",
        Token::Slash => "/",
        Token::Percent => "%",
        Token::Ampersand => "&",
        Token::Pipe => "|",
        Token::Tilde => "~",
        Token::LParen => "(",
        Token::RParen => ")",
        Token::LBracket => "[",
        Token::RBracket => "]",
        Token::Comma => ",",
        Token::Equals => "=",
        Token::Semicolon => ";",
        Token::EqualEqual => "==",
        Token::BangEqual => "!=",
        Token::LessEqual => "<=",
        Token::GreaterEqual => ">=",
        Token::Less => "<",
        Token::Greater => ">",
        _ => "",
    }
}

/// Splits expression text into tokens paired with their byte offsets.
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` for the first character sequence
/// that is not part of the language.
///
/// # Example
/// ```
/// use scopeval::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("a + 10").unwrap();
/// assert_eq!(tokens,
///            vec![(Token::Identifier("a".to_string()), 0),
///                 (Token::Plus, 2),
///                 (Token::Integer(Some(10)), 4)]);
///
/// assert!(tokenize("a $ b").is_err());
/// ```
pub fn tokenize(source: &str) -> ParseResult<Vec<(Token, usize)>> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(token) = lexer.next() {
        let pos = lexer.span().start;
        if let Ok(tok) = token {
            tokens.push((tok, pos));
        } else {
            return Err(ParseError::UnexpectedToken { token: lexer.slice().to_string(),
                                                     pos });
        }
    }

    Ok(tokens)
}

/// Parses a floating-point literal from the current token slice.
fn parse_float(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Parses an integer literal. Overflow is kept as `None` and reported by
/// the parser, which knows the literal's position.
#[allow(clippy::unnecessary_wraps)]
fn parse_integer(lex: &logos::Lexer<Token>) -> Result<Option<i64>, ()> {
    Ok(lex.slice().parse().ok())
}

/// Strips the quotes from a text literal and resolves backslash escapes.
fn parse_text(lex: &logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    let inner = &slice[1..slice.len() - 1];
    let mut text = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            text.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => text.push('\n'),
            Some('t') => text.push('\t'),
            Some(other) => text.push(other),
            None => {},
        }
    }
    text
}
