/// Converts an integral `f64` to `i64`.
///
/// The value must be finite, integral and inside the `i64` range.
///
/// ## Errors
/// Returns `Err(error)` for non-finite, out-of-range, or fractional values.
///
/// ## Example
/// ```
/// use safecalc::util::num::f64_to_i64_checked;
///
/// assert_eq!(f64_to_i64_checked(1000.0, ()), Ok(1000));
/// assert_eq!(f64_to_i64_checked(1.5, ()), Err(()));
/// assert_eq!(f64_to_i64_checked(1e20, ()), Err(()));
/// assert_eq!(f64_to_i64_checked(f64::NAN, ()), Err(()));
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
pub fn f64_to_i64_checked<E>(value: f64, error: E) -> Result<i64, E> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(error);
    }
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
    if value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return Err(error);
    }
    Ok(value as i64)
}

/// Converts an `i64` to `u32`, e.g. for use as an integer exponent.
///
/// ## Errors
/// Returns `Err(error)` if the value is negative or larger than `u32::MAX`.
///
/// ## Example
/// ```
/// use safecalc::util::num::i64_to_u32_checked;
///
/// assert_eq!(i64_to_u32_checked(45, ()), Ok(45));
/// assert_eq!(i64_to_u32_checked(-1, ()), Err(()));
/// assert_eq!(i64_to_u32_checked(i64::MAX, ()), Err(()));
/// ```
pub fn i64_to_u32_checked<E>(value: i64, error: E) -> Result<u32, E> {
    u32::try_from(value).map_or(Err(error), Ok)
}
