/// The tree-walking evaluator and its result type.
///
/// Holds the resolved terms of one compiled expression and the division
/// mode, and walks the tree node by node.
pub mod core;

/// Binary operator evaluation.
///
/// Broadcasting over arrays, arithmetic, exponentiation, comparisons and the
/// logical/bitwise operators. Both engines call these kernels, so every
/// backend agrees on the semantics.
pub mod binary;

/// Unary operator evaluation, applied elementwise to arrays.
pub mod unary;
