use crate::{compiler::evaluator::EvalResult, error::RuntimeError};

/// Largest integer magnitude exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Safely converts an `i64` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `Err(error)` if the value exceeds `MAX_SAFE_U64_INT` in absolute
/// value.
///
/// ## Example
/// ```
/// use ternac::util::num::{MAX_SAFE_U64_INT, i64_to_f64_checked};
///
/// let result = i64_to_f64_checked(42, "too big!");
/// assert_eq!(result.unwrap(), 42.0);
///
/// let big = MAX_SAFE_U64_INT as i64 + 1;
/// assert!(i64_to_f64_checked(big, "too big!").is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn i64_to_f64_checked<E>(value: i64, error: E) -> Result<f64, E> {
    if value.unsigned_abs() > MAX_SAFE_U64_INT {
        return Err(error);
    }
    Ok(value as f64)
}

/// Converts an `f64` register value to `i64`, truncating toward zero.
///
/// This is the `to_int` step applied to an integer-typed result. Fractional
/// parts are dropped; values that are not finite or do not fit in `i64` are
/// rejected.
///
/// ## Errors
/// Returns [`RuntimeError::Overflow`] for non-finite or out-of-range values.
///
/// ## Example
/// ```
/// use ternac::{error::RuntimeError, util::num::f64_to_i64_truncated};
///
/// assert_eq!(f64_to_i64_truncated(14.0).unwrap(), 14);
/// assert_eq!(f64_to_i64_truncated(-3.5).unwrap(), -3);
///
/// let err = f64_to_i64_truncated(1e20).unwrap_err();
/// assert_eq!(err, RuntimeError::Overflow);
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
pub fn f64_to_i64_truncated(value: f64) -> EvalResult<i64> {
    if !value.is_finite() {
        return Err(RuntimeError::Overflow);
    }
    // i64::MAX rounds up to 2^63 as f64, which is already out of range.
    if value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return Err(RuntimeError::Overflow);
    }
    Ok(value.trunc() as i64)
}
