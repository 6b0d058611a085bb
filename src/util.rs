/// Numeric conversion and integer arithmetic helpers.
///
/// This module provides safe functions for converting between integer and
/// floating-point types without risking silent data loss, plus the floor
/// division and modulo rules shared by every engine.
///
/// All fallible functions return a `Result`, which is `Ok` if the operation is
/// lossless and valid, or an error if the value is out of range.
pub mod num;
