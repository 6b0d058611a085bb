use crate::{ast::BinaryOperator, error::ParseError, interpreter::parser::core::ParseResult};

/// The grammar variants an expression can be parsed under.
///
/// Both read the same tokens; they differ in what the keywords mean and in
/// which operators are accepted.
///
/// - `Extended` treats `and`, `or` and `not` as spellings of the elementwise
///   `&`, `|` and `~`, and places `&`/`|` below comparisons so
///   `a > 1 & b < 2` groups as two comparisons. `//` is not accepted.
/// - `Strict` follows conventional precedence: short-circuit `and`/`or`,
///   logical `not`, and `|`, `&` binding tighter than comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grammar {
    /// The default, array-friendly grammar.
    Extended,
    /// Conventional precedence and keyword semantics.
    Strict,
}

impl Grammar {
    /// Every grammar, in registration order.
    pub const ALL: [Self; 2] = [Self::Extended, Self::Strict];

    /// The registry identifier of this grammar.
    ///
    /// ```
    /// use scopeval::interpreter::parser::grammar::Grammar;
    ///
    /// assert_eq!(Grammar::Extended.name(), "extended");
    /// assert_eq!(Grammar::Strict.name(), "strict");
    /// ```
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Extended => "extended",
            Self::Strict => "strict",
        }
    }

    /// Whether `//` is part of this grammar.
    #[must_use]
    pub const fn supports_floor_division(self) -> bool {
        matches!(self, Self::Strict)
    }

    /// Whether `&` and `|` bind tighter than comparisons.
    #[must_use]
    pub const fn bitwise_above_comparison(self) -> bool {
        matches!(self, Self::Strict)
    }

    /// Rejects operators the grammar does not accept.
    ///
    /// # Errors
    /// `ParseError::UnsupportedOperator` naming this grammar.
    pub fn check_operator(self, op: BinaryOperator, pos: usize) -> ParseResult<()> {
        if op == BinaryOperator::FloorDiv && !self.supports_floor_division() {
            return Err(ParseError::UnsupportedOperator { op: op.to_string(),
                                                         grammar: self.name(),
                                                         pos });
        }
        Ok(())
    }
}

impl std::fmt::Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
