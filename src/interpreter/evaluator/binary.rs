/// Operator dispatch and array broadcasting.
pub mod core;

/// Elementwise mapping of scalar kernels over arrays.
pub mod array;

/// `+`, `-`, `*`, `/`, `//` and `%` on scalars.
pub mod scalar;

/// Exponentiation.
pub mod power;

/// Equality and ordering.
pub mod comparison;

/// `&`, `|` and the value-level `and`/`or`.
pub mod logic;
