//! Ready-made operators and functions.
//!
//! Nothing here is global: every call returns a fresh value that the caller
//! owns, extends or discards.
//!
//! ```
//! use safecalc::{Bindings, Number, defaults};
//!
//! let grammar = defaults::operators().compile().unwrap();
//! let mut bindings = defaults::identifiers();
//! bindings.insert_value("x", 3);
//!
//! assert_eq!(grammar.evaluate("max(x ^ 2, 5) - 1", &bindings).unwrap(),
//!            Number::Integer(8));
//! ```

/// Arithmetic behind the default operators.
///
/// Integer operands stay integers where the operation allows it; overflow,
/// zero divisors and domain violations are reported as [`ArithmeticError`].
pub mod arithmetic;

/// The default function catalogue.
pub mod functions;

pub use arithmetic::ArithmeticError;

use crate::{
    ast::Associativity,
    interpreter::{bindings::Bindings, grammar::table::OperatorTable},
};

/// The default operator table.
///
/// | token | kind           | precedence | associativity |
/// |-------|----------------|------------|---------------|
/// | `-`   | prefix         |            |               |
/// | `+`   | prefix         |            |               |
/// | `+`   | binary         | 3          | `lr`          |
/// | `-`   | binary         | 3          | `lr`          |
/// | `*`   | binary         | 2          | `lr`          |
/// | `/`   | binary         | 2          | `lr`          |
/// | `%`   | binary         | 2          | `lr`          |
/// | `^`   | binary         | 1          | `rl`          |
#[must_use]
pub fn operators() -> OperatorTable {
    use arithmetic::{add, div, mul, neg, pos, pow, rem, sub};

    OperatorTable::new().prefix("-", neg)
                        .prefix("+", pos)
                        .binary("+", 3, Associativity::LeftToRight, add)
                        .binary("-", 3, Associativity::LeftToRight, sub)
                        .binary("*", 2, Associativity::LeftToRight, mul)
                        .binary("/", 2, Associativity::LeftToRight, div)
                        .binary("%", 2, Associativity::LeftToRight, rem)
                        .binary("^", 1, Associativity::RightToLeft, pow)
}

/// The default function bindings: `min`, `max`, `floor`, `ceil`, `round`,
/// `clamp`, `sin`, `cos`, `tan`, `asin`, `acos`, `atan` and `atan2`.
#[must_use]
pub fn identifiers() -> Bindings {
    functions::bindings()
}
