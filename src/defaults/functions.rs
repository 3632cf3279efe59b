use crate::{
    defaults::arithmetic::{ArithmeticError, to_integer},
    interpreter::{
        bindings::{Arity, Bindings},
        value::{callable::CallResult, core::Number},
    },
};

/// Signature shared by every default function. Arity is checked by the
/// evaluator before the call, so indexing `args` within the arity is safe.
type DefaultFn = fn(&[Number]) -> CallResult;

/// Defines the default functions by generating a lookup table and a name
/// list.
///
/// Each entry provides a name, an arity specification and the function
/// implementing it. The macro produces `DEFAULT_TABLE` (internal) and
/// `DEFAULT_FUNCTIONS` (public list of names).
macro_rules! default_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct DefaultDef {
            name:  &'static str,
            arity: Arity,
            func:  DefaultFn,
        }
        static DEFAULT_TABLE: &[DefaultDef] = &[
            $(
                DefaultDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// Names bound by [`bindings`].
        pub const DEFAULT_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

default_functions! {
    "min"   => { arity: Arity::AtLeast(1), func: |args| Ok(pick(args, less)) },
    "max"   => { arity: Arity::AtLeast(1), func: |args| Ok(pick(args, |a, b| less(b, a))) },
    "floor" => { arity: Arity::Exact(1), func: |args| round_with(args, "floor", f64::floor) },
    "ceil"  => { arity: Arity::Exact(1), func: |args| round_with(args, "ceil", f64::ceil) },
    "round" => { arity: Arity::OneOf(&[1, 2]), func: round },
    "clamp" => { arity: Arity::Exact(3), func: clamp },
    "sin"   => { arity: Arity::Exact(1), func: |args| real(args, "sin", f64::sin) },
    "cos"   => { arity: Arity::Exact(1), func: |args| real(args, "cos", f64::cos) },
    "tan"   => { arity: Arity::Exact(1), func: |args| real(args, "tan", f64::tan) },
    "asin"  => { arity: Arity::Exact(1), func: |args| real(args, "asin", f64::asin) },
    "acos"  => { arity: Arity::Exact(1), func: |args| real(args, "acos", f64::acos) },
    "atan"  => { arity: Arity::Exact(1), func: |args| real(args, "atan", f64::atan) },
    "atan2" => { arity: Arity::Exact(2), func: |args| Ok(Number::Real(args[0].as_real().atan2(args[1].as_real()))) },
}

/// Builds a fresh set of bindings holding every default function.
#[must_use]
pub fn bindings() -> Bindings {
    let mut bindings = Bindings::new();
    for def in DEFAULT_TABLE {
        bindings.insert_function(def.name, def.arity, def.func);
    }
    bindings
}

/// Ordering used by `min`, `max` and `clamp`. Two integers compare exactly;
/// anything else compares as reals, so NaN is never less than anything.
fn less(a: Number, b: Number) -> bool {
    match (a, b) {
        (Number::Integer(a), Number::Integer(b)) => a < b,
        _ => a.as_real() < b.as_real(),
    }
}

/// Returns the first argument no later argument beats, unchanged.
fn pick(args: &[Number], beats: fn(Number, Number) -> bool) -> Number {
    args.iter()
        .copied()
        .reduce(|best, next| if beats(next, best) { next } else { best })
        .unwrap_or(Number::Integer(0))
}

/// `clamp(value, low, high)` is `min(max(low, value), high)`; it returns
/// one of its arguments unchanged.
fn clamp(args: &[Number]) -> CallResult {
    let (value, low, high) = (args[0], args[1], args[2]);
    let raised = if less(low, value) { value } else { low };
    Ok(if less(high, raised) { high } else { raised })
}

/// Applies a real function and rejects results outside its domain.
///
/// `f` returning NaN for a non-NaN argument means the argument was outside
/// the domain, e.g. `asin(2)` or `sin` of an infinity.
fn real(args: &[Number], operation: &'static str, f: fn(f64) -> f64) -> CallResult {
    let x = args[0].as_real();
    let y = f(x);
    if y.is_nan() && !x.is_nan() {
        return Err(ArithmeticError::Domain { operation }.into());
    }
    Ok(Number::Real(y))
}

/// `floor` and `ceil`: integers pass through, reals become integers.
fn round_with(args: &[Number], operation: &'static str, f: fn(f64) -> f64) -> CallResult {
    match args[0] {
        Number::Integer(n) => Ok(Number::Integer(n)),
        Number::Real(r) => Ok(Number::Integer(to_integer(f(r), operation)?)),
    }
}

/// `round(x)` rounds half to even and returns an integer. `round(x, n)`
/// rounds to `n` decimal digits (negative `n` rounds to tens, hundreds and
/// so on) and keeps the class of `x`.
///
/// # Errors
/// - `Domain` when `n` is not an integer or `x` is NaN.
/// - `Overflow` when `round(x)` does not fit an integer.
fn round(args: &[Number]) -> CallResult {
    let Some(digits) = args.get(1) else {
        return match args[0] {
            Number::Integer(n) => Ok(Number::Integer(n)),
            Number::Real(r) => Ok(Number::Integer(to_integer(r.round_ties_even(), "round")?)),
        };
    };

    let Number::Integer(digits) = *digits else {
        return Err(ArithmeticError::Domain { operation: "round" }.into());
    };

    match args[0] {
        Number::Integer(n) => Ok(Number::Integer(round_integer(n, digits))),
        Number::Real(r) => Ok(Number::Real(round_real(r, digits))),
    }
}

/// Rounds an integer to a multiple of `10^-digits`, half to even.
fn round_integer(n: i64, digits: i64) -> i64 {
    if digits >= 0 {
        return n;
    }
    // Past 10^19 every i64 is less than half a step away from zero.
    let Some(step) = u32::try_from(digits.unsigned_abs()).ok()
                                                         .filter(|exp| *exp <= 19)
                                                         .map(|exp| 10_i128.pow(exp))
    else {
        return 0;
    };

    let n = i128::from(n);
    let remainder = n.rem_euclid(step);
    let base = n - remainder;
    let up = 2 * remainder > step || (2 * remainder == step && (base / step) % 2 != 0);
    let rounded = if up { base + step } else { base };

    // A multiple of a power of ten near an i64 stays in range unless it
    // rounds past i64::MAX; saturate in that case.
    i64::try_from(rounded).unwrap_or(if rounded > 0 { i64::MAX } else { i64::MIN })
}

/// Rounds a real to `digits` decimal places, half to even.
fn round_real(r: f64, digits: i64) -> f64 {
    if !r.is_finite() {
        return r;
    }
    let Ok(digits) = i32::try_from(digits.clamp(-400, 400)) else {
        return r;
    };

    let factor = 10_f64.powi(digits.abs());
    if digits >= 0 {
        let scaled = r * factor;
        if !scaled.is_finite() {
            return r;
        }
        scaled.round_ties_even() / factor
    } else if factor.is_infinite() {
        0.0_f64.copysign(r)
    } else {
        (r / factor).round_ties_even() * factor
    }
}
