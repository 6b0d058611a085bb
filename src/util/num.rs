use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Safely converts an `f64` to `i64` if the value is finite, within range, and
/// not fractional.
///
/// ## Errors
/// Returns an error for non-finite, out-of-range, or fractional values.
///
/// ## Example
/// ```
/// use scopeval::{error::RuntimeError, util::num::f64_to_i64_checked};
///
/// assert_eq!(f64_to_i64_checked(1000.0, 1).unwrap(), 1000);
///
/// let err = f64_to_i64_checked(1.5, 3).unwrap_err();
/// assert!(matches!(err, RuntimeError::RealIsFractional { pos: 3 }));
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
pub fn f64_to_i64_checked(value: f64, pos: usize) -> EvalResult<i64> {
    if !value.is_finite() {
        return Err(RuntimeError::TypeError { details: format!("Cannot convert non-finite value {value} to an integer"),
                                             pos });
    }
    if value < i64::MIN as f64 || value > i64::MAX as f64 {
        return Err(RuntimeError::LiteralTooLarge { pos });
    }
    if value.fract() != 0.0 {
        return Err(RuntimeError::RealIsFractional { pos });
    }
    Ok(value as i64)
}

/// Safely converts an `i64` exponent to `u32`.
///
/// ## Errors
/// `LiteralTooSmall` for negative values, `LiteralTooLarge` above `u32::MAX`.
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
pub const fn i64_to_u32_checked(value: i64, pos: usize) -> EvalResult<u32> {
    if value > u32::MAX as i64 {
        return Err(RuntimeError::LiteralTooLarge { pos });
    }
    if value < 0 {
        return Err(RuntimeError::LiteralTooSmall { pos });
    }
    Ok(value as u32)
}

/// Resolves a possibly negative index against an array length.
///
/// Negative indices count from the end, so `-1` is the last element.
///
/// ## Errors
/// `IndexOutOfBounds` when the index falls outside `0..len`.
///
/// ## Example
/// ```
/// use scopeval::util::num::resolve_index;
///
/// assert_eq!(resolve_index(-1, 3, 0).unwrap(), 2);
/// assert!(resolve_index(3, 3, 0).is_err());
/// ```
pub fn resolve_index(index: i64, len: usize, pos: usize) -> EvalResult<usize> {
    let out_of_bounds = RuntimeError::IndexOutOfBounds { len,
                                                         found: index,
                                                         pos };
    let signed_len = i64::try_from(len).map_err(|_| RuntimeError::LiteralTooLarge { pos })?;
    let resolved = if index < 0 { index + signed_len } else { index };

    if resolved < 0 || resolved >= signed_len {
        return Err(out_of_bounds);
    }
    usize::try_from(resolved).map_err(|_| out_of_bounds)
}

/// Integer division rounding toward negative infinity.
///
/// ## Errors
/// `DivisionByZero` when `right` is zero, `Overflow` for `i64::MIN / -1`.
///
/// ## Example
/// ```
/// use scopeval::util::num::floor_div_i64;
///
/// assert_eq!(floor_div_i64(7, 2, 0).unwrap(), 3);
/// assert_eq!(floor_div_i64(-7, 2, 0).unwrap(), -4);
/// ```
pub fn floor_div_i64(left: i64, right: i64, pos: usize) -> EvalResult<i64> {
    if right == 0 {
        return Err(RuntimeError::DivisionByZero { pos });
    }
    let quotient = left.checked_div(right)
                       .ok_or(RuntimeError::Overflow { pos })?;
    if left % right != 0 && ((left < 0) != (right < 0)) {
        Ok(quotient - 1)
    } else {
        Ok(quotient)
    }
}

/// Floating-point modulo whose result takes the sign of the divisor.
///
/// ## Errors
/// `DivisionByZero` when `right` is zero.
///
/// ## Example
/// ```
/// use scopeval::util::num::floor_mod_f64;
///
/// assert_eq!(floor_mod_f64(7.0, 2.0, 0).unwrap(), 1.0);
/// assert_eq!(floor_mod_f64(-7.0, 2.0, 0).unwrap(), 1.0);
/// assert_eq!(floor_mod_f64(7.0, -2.0, 0).unwrap(), -1.0);
/// ```
pub fn floor_mod_f64(left: f64, right: f64, pos: usize) -> EvalResult<f64> {
    if right == 0.0 {
        return Err(RuntimeError::DivisionByZero { pos });
    }
    let remainder = left % right;
    if remainder != 0.0 && ((remainder < 0.0) != (right < 0.0)) {
        Ok(remainder + right)
    } else {
        Ok(remainder)
    }
}
