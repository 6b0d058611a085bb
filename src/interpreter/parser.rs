/// Entry points: whole-text parsing and the top expression rule.
///
/// Rejects empty text and anything left over once a complete expression has
/// been read, naming assignments and statements explicitly.
pub mod core;

/// The grammar variants and the operator spellings each one accepts.
pub mod grammar;

/// Binary operator levels, from logical or down to multiplication.
///
/// Also desugars chained comparisons.
pub mod binary;

/// Prefix operators, exponentiation, postfix indexing and atoms.
pub mod unary;

/// Shared helpers for delimited lists.
pub mod utils;
