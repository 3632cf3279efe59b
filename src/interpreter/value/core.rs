use std::fmt;

/// A numeric value, as produced by literals and callables.
///
/// Literals keep the class they were written in: `9` is an `Integer`, while
/// `9.0`, `.5` and `1e3` are `Real`. The engine never converts between the two
/// on its own; only callables do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// A 64 bit integer value.
    Integer(i64),
    /// A double precision floating point value.
    Real(f64),
}

impl From<i64> for Number {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<i32> for Number {
    fn from(v: i32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl Number {
    /// Converts the value to an `f64`.
    ///
    /// Integers beyond `2^53` lose precision.
    ///
    /// # Example
    /// ```
    /// use safecalc::Number;
    ///
    /// assert_eq!(Number::Integer(10).as_real(), 10.0);
    /// assert_eq!(Number::Real(2.5).as_real(), 2.5);
    /// ```
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_real(self) -> f64 {
        match self {
            Self::Integer(n) => n as f64,
            Self::Real(r) => r,
        }
    }

    /// Returns `true` for the `Integer` class, regardless of the value.
    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(self, Self::Integer(_))
    }
}

/// Integers print plainly; integral reals keep a trailing `.0` so the class
/// stays visible (`9` versus `9.0`).
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) if r.is_finite() && r.fract() == 0.0 && r.abs() < 1e16 => {
                write!(f, "{r:.1}")
            },
            Self::Real(r) => write!(f, "{r}"),
        }
    }
}
