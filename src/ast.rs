/// Represents a literal value in an expression.
///
/// `LiteralValue` covers the raw constants that can appear directly in the
/// text: numbers, booleans and quoted text.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A 64-bit signed integer literal.
    Integer(i64),
    /// A 64-bit floating-point literal.
    Real(f64),
    /// A boolean literal value: `True` or `False`.
    Bool(bool),
    /// A quoted text literal, without its quotes.
    Text(String),
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// An abstract syntax tree (AST) node representing a value expression.
///
/// Only pure expressions exist here: the grammars reject assignments and
/// statements before a tree is built. Each node records the byte offset at
/// which it starts in the source text for error reporting.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value (number, boolean or text).
    Literal {
        /// The constant value.
        value: LiteralValue,
        /// Byte offset in the source text.
        pos:   usize,
    },
    /// Reference to a name resolved through the scope.
    Name {
        /// The identifier.
        name: String,
        /// Byte offset in the source text.
        pos:  usize,
    },
    /// A unary operation (e.g. negation).
    UnaryOp {
        /// The unary operator to apply.
        op:   UnaryOperator,
        /// The operand expression.
        expr: Box<Self>,
        /// Byte offset in the source text.
        pos:  usize,
    },
    /// A binary operation (addition, comparison, etc.).
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Byte offset of the operator.
        pos:   usize,
    },
    /// Array literal expression.
    ArrayLiteral {
        /// Elements of the array.
        elements: Vec<Self>,
        /// Byte offset in the source text.
        pos:      usize,
    },
    /// Array indexing expression (e.g., `arr[2]`).
    Index {
        /// The array to index into.
        array: Box<Self>,
        /// The index to access.
        index: Box<Self>,
        /// Byte offset of the opening bracket.
        pos:   usize,
    },
}

impl Expr {
    /// Gets the source position from `self`.
    /// ## Example
    /// ```
    /// use scopeval::ast::Expr;
    ///
    /// let expr = Expr::Name { name: "x".to_string(),
    ///                         pos:  5, };
    ///
    /// assert_eq!(expr.position(), 5);
    /// ```
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::Literal { pos, .. }
            | Self::Name { pos, .. }
            | Self::UnaryOp { pos, .. }
            | Self::BinaryOp { pos, .. }
            | Self::ArrayLiteral { pos, .. }
            | Self::Index { pos, .. } => *pos,
        }
    }

    /// Visits every name reference in evaluation order, depth first.
    pub fn for_each_name<'a>(&'a self, f: &mut impl FnMut(&'a str, usize)) {
        match self {
            Self::Literal { .. } => {},
            Self::Name { name, pos } => f(name, *pos),
            Self::UnaryOp { expr, .. } => expr.for_each_name(f),
            Self::BinaryOp { left, right, .. } => {
                left.for_each_name(f);
                right.for_each_name(f);
            },
            Self::ArrayLiteral { elements, .. } => {
                for element in elements {
                    element.for_each_name(f);
                }
            },
            Self::Index { array, index, .. } => {
                array.for_each_name(f);
                index.for_each_name(f);
            },
        }
    }
}

/// Represents a binary operator.
///
/// Which spelling produces which operator depends on the grammar; see
/// [`crate::interpreter::parser::grammar::Grammar`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`), true or legacy depending on the compile flag.
    Div,
    /// Floor division (`//`)
    FloorDiv,
    /// Exponentiation (`**`)
    Pow,
    /// Modulo (`%`)
    Mod,
    /// Elementwise and (`&`, or `and` in the extended grammar)
    BitAnd,
    /// Elementwise or (`|`, or `or` in the extended grammar)
    BitOr,
    /// Short-circuit logical and (`and` in the strict grammar)
    And,
    /// Short-circuit logical or (`or` in the strict grammar)
    Or,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (`-x`).
    Negate,
    /// Arithmetic identity (`+x`).
    Plus,
    /// Elementwise not (`~x`, or `not x` in the extended grammar).
    Invert,
    /// Logical not of the truth value (`not x` in the strict grammar).
    Not,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{
            Add, And, BitAnd, BitOr, Div, Equal, FloorDiv, Greater, GreaterEqual, Less,
            LessEqual, Mod, Mul, NotEqual, Or, Pow, Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            FloorDiv => "//",
            Pow => "**",
            Mod => "%",
            BitAnd => "&",
            BitOr => "|",
            And => "and",
            Or => "or",
            Equal => "==",
            NotEqual => "!=",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negate => write!(f, "-"),
            Self::Plus => write!(f, "+"),
            Self::Invert => write!(f, "~"),
            Self::Not => write!(f, "not "),
        }
    }
}

impl std::fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => write!(f, "{r:?}"),
            Self::Bool(b) => write!(f, "{}", if *b { "True" } else { "False" }),
            Self::Text(s) => write!(f, "{s:?}"),
        }
    }
}

/// Renders the tree fully parenthesised, so precedence is explicit.
///
/// ```
/// use scopeval::{interpreter::parser::{core::parse_source, grammar::Grammar}};
///
/// let tree = parse_source("a + b * 2", Grammar::Extended).unwrap();
/// assert_eq!(tree.to_string(), "(a + (b * 2))");
/// ```
impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal { value, .. } => write!(f, "{value}"),
            Self::Name { name, .. } => write!(f, "{name}"),
            Self::UnaryOp { op, expr, .. } => write!(f, "({op}{expr})"),
            Self::BinaryOp { left, op, right, .. } => write!(f, "({left} {op} {right})"),
            Self::ArrayLiteral { elements, .. } => {
                write!(f, "[")?;
                for (index, element) in elements.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{element}")?;
                }
                write!(f, "]")
            },
            Self::Index { array, index, .. } => write!(f, "{array}[{index}]"),
        }
    }
}
