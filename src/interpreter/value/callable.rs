use std::sync::Arc;

use crate::interpreter::value::core::Number;

/// Error type returned by caller-supplied callables.
///
/// The evaluator never inspects or rewraps it.
pub type CallableError = Box<dyn std::error::Error + Send + Sync>;

/// Result of invoking a caller-supplied callable.
pub type CallResult = Result<Number, CallableError>;

/// A prefix or postfix operator implementation.
pub type UnaryFn = Arc<dyn Fn(Number) -> CallResult + Send + Sync>;

/// A binary operator implementation, called as `f(lhs, rhs)`.
pub type BinaryFn = Arc<dyn Fn(Number, Number) -> CallResult + Send + Sync>;

/// A function implementation receiving its arguments positionally.
pub type VariadicFn = Arc<dyn Fn(&[Number]) -> CallResult + Send + Sync>;
