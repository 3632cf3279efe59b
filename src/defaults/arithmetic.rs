use crate::{
    interpreter::value::{callable::CallResult, core::Number},
    util::num::{f64_to_i64_checked, i64_to_u32_checked},
};

/// Errors raised by the default operators and functions.
///
/// They reach the caller inside [`RuntimeError::Callable`](crate::RuntimeError)
/// and can be recovered with `downcast_ref::<ArithmeticError>()`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArithmeticError {
    /// The result does not fit the value's class.
    #[error("Overflow in '{operation}'.")]
    Overflow {
        /// The operator or function that overflowed.
        operation: &'static str,
    },
    /// Division, remainder or negative power with a zero divisor.
    #[error("Division by zero in '{operation}'.")]
    DivisionByZero {
        /// The operator that divided.
        operation: &'static str,
    },
    /// An argument outside the operation's domain.
    #[error("Math domain error in '{operation}'.")]
    Domain {
        /// The operator or function that rejected its argument.
        operation: &'static str,
    },
}

/// Negation. `-i64::MIN` overflows.
///
/// # Errors
/// `Overflow` for `i64::MIN`.
pub fn neg(x: Number) -> CallResult {
    match x {
        Number::Integer(n) => {
            Ok(Number::Integer(n.checked_neg()
                                .ok_or(ArithmeticError::Overflow { operation: "-" })?))
        },
        Number::Real(r) => Ok(Number::Real(-r)),
    }
}

/// Unary plus; returns its operand.
///
/// # Errors
/// Never fails.
#[allow(clippy::unnecessary_wraps)]
pub fn pos(x: Number) -> CallResult {
    Ok(x)
}

/// Applies `int` when both operands are integers and `real` otherwise.
fn integral_or_real(a: Number,
                    b: Number,
                    operation: &'static str,
                    int: fn(i64, i64) -> Option<i64>,
                    real: fn(f64, f64) -> f64)
                    -> CallResult {
    match (a, b) {
        (Number::Integer(a), Number::Integer(b)) => {
            Ok(Number::Integer(int(a, b).ok_or(ArithmeticError::Overflow { operation })?))
        },
        _ => Ok(Number::Real(real(a.as_real(), b.as_real()))),
    }
}

/// Addition.
///
/// # Errors
/// `Overflow` when the integer sum leaves the `i64` range.
///
/// # Example
/// ```
/// use safecalc::{Number, defaults::arithmetic::add};
///
/// assert_eq!(add(Number::Integer(2), Number::Integer(3)).unwrap(), Number::Integer(5));
/// assert_eq!(add(Number::Integer(2), Number::Real(0.5)).unwrap(), Number::Real(2.5));
/// assert!(add(Number::Integer(i64::MAX), Number::Integer(1)).is_err());
/// ```
pub fn add(a: Number, b: Number) -> CallResult {
    integral_or_real(a, b, "+", i64::checked_add, |a, b| a + b)
}

/// Subtraction.
///
/// # Errors
/// `Overflow` when the integer difference leaves the `i64` range.
pub fn sub(a: Number, b: Number) -> CallResult {
    integral_or_real(a, b, "-", i64::checked_sub, |a, b| a - b)
}

/// Multiplication.
///
/// # Errors
/// `Overflow` when the integer product leaves the `i64` range.
pub fn mul(a: Number, b: Number) -> CallResult {
    integral_or_real(a, b, "*", i64::checked_mul, |a, b| a * b)
}

/// True division; the result is always real.
///
/// # Errors
/// `DivisionByZero` for a zero divisor of either class.
pub fn div(a: Number, b: Number) -> CallResult {
    let divisor = b.as_real();
    if divisor == 0.0 {
        return Err(ArithmeticError::DivisionByZero { operation: "/" }.into());
    }
    Ok(Number::Real(a.as_real() / divisor))
}

/// IEEE 754 remainder: `a - n * b` with `n` the integer nearest to `a / b`,
/// ties going to the even `n`. The result is always real and lies in
/// `[-|b| / 2, |b| / 2]`.
///
/// # Errors
/// - `DivisionByZero` for a zero divisor.
/// - `Domain` for an infinite dividend.
///
/// # Example
/// ```
/// use safecalc::{Number, defaults::arithmetic::rem};
///
/// assert_eq!(rem(Number::Integer(10), Number::Integer(4)).unwrap(), Number::Real(2.0));
/// assert_eq!(rem(Number::Integer(11), Number::Integer(4)).unwrap(), Number::Real(-1.0));
/// ```
pub fn rem(a: Number, b: Number) -> CallResult {
    let (x, y) = (a.as_real(), b.as_real());

    if x.is_nan() || y.is_nan() {
        return Ok(Number::Real(f64::NAN));
    }
    if x.is_infinite() {
        return Err(ArithmeticError::Domain { operation: "%" }.into());
    }
    if y == 0.0 {
        return Err(ArithmeticError::DivisionByZero { operation: "%" }.into());
    }
    if y.is_infinite() {
        return Ok(Number::Real(x));
    }

    let (abs_x, abs_y) = (x.abs(), y.abs());
    let m = abs_x % abs_y;
    let c = abs_y - m;
    let r = if m < c {
        m
    } else if m > c {
        -c
    } else {
        // Halfway: pick the remainder that makes the quotient even.
        m - 2.0 * ((0.5 * (abs_x - m)) % abs_y)
    };

    Ok(Number::Real(r.copysign(x)))
}

/// Exponentiation.
///
/// An integer raised to a non-negative integer stays an integer; every other
/// combination yields a real.
///
/// # Errors
/// - `Overflow` when an integer power leaves the `i64` range, or a real power
///   of finite operands is infinite.
/// - `DivisionByZero` for zero raised to a negative power.
/// - `Domain` for a negative base with a fractional exponent.
///
/// # Example
/// ```
/// use safecalc::{Number, defaults::arithmetic::pow};
///
/// assert_eq!(pow(Number::Integer(2), Number::Integer(10)).unwrap(), Number::Integer(1024));
/// assert_eq!(pow(Number::Integer(2), Number::Integer(-1)).unwrap(), Number::Real(0.5));
/// assert!(pow(Number::Integer(-8), Number::Real(0.5)).is_err());
/// ```
pub fn pow(a: Number, b: Number) -> CallResult {
    if let (Number::Integer(base), Number::Integer(exp)) = (a, b)
       && exp >= 0
    {
        if matches!(base, -1..=1) {
            let odd = exp % 2 == 1;
            return Ok(Number::Integer(match base {
                                          0 if exp == 0 => 1,
                                          0 => 0,
                                          -1 if odd => -1,
                                          _ => 1,
                                      }));
        }
        let exp = i64_to_u32_checked(exp, ArithmeticError::Overflow { operation: "^" })?;
        return Ok(Number::Integer(base.checked_pow(exp)
                                      .ok_or(ArithmeticError::Overflow { operation: "^" })?));
    }

    let (x, y) = (a.as_real(), b.as_real());
    if x == 0.0 && y < 0.0 {
        return Err(ArithmeticError::DivisionByZero { operation: "^" }.into());
    }
    if x < 0.0 && x.is_finite() && y.is_finite() && y.fract() != 0.0 {
        return Err(ArithmeticError::Domain { operation: "^" }.into());
    }

    let result = x.powf(y);
    if result.is_infinite() && x.is_finite() && y.is_finite() {
        return Err(ArithmeticError::Overflow { operation: "^" }.into());
    }
    Ok(Number::Real(result))
}

/// Converts an integral real to an integer, as rounding functions return.
///
/// # Errors
/// `Domain` for NaN, `Overflow` for infinities and values beyond `i64`.
pub(crate) fn to_integer(value: f64, operation: &'static str) -> Result<i64, ArithmeticError> {
    if value.is_nan() {
        return Err(ArithmeticError::Domain { operation });
    }
    f64_to_i64_checked(value, ArithmeticError::Overflow { operation })
}
