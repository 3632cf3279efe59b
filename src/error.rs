/// Operator specification errors.
///
/// Raised while compiling an [`OperatorTable`](crate::OperatorTable) into a
/// [`Grammar`](crate::Grammar): malformed tags, unusable tokens and tokens
/// registered at conflicting precedence levels. A failed compilation never
/// yields a grammar.
pub mod config_error;
/// Parsing errors.
///
/// Defines all error types that can occur during tokenizing and parsing of an
/// expression: unexpected characters, missing operands, unbalanced
/// parentheses, malformed call argument lists and trailing input.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while evaluating a parsed
/// expression against a set of bindings, including errors returned by the
/// caller's own operator and function callables.
pub mod runtime_error;

pub use config_error::ConfigError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

use crate::interpreter::value::callable::CallableError;

/// Any error produced by the crate's convenience entry points.
///
/// Each variant forwards its message unchanged, so the umbrella type reads
/// exactly like the underlying error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The operator specification could not be compiled.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The expression text was rejected by the tokenizer or the parser.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Evaluation failed.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// Returns the error raised by a caller-supplied callable, if that is what
    /// stopped evaluation.
    ///
    /// The returned box is the very value the callable produced, so it can be
    /// downcast back to the caller's own error type.
    #[must_use]
    pub fn into_callable_error(self) -> Option<CallableError> {
        match self {
            Self::Runtime(e) => e.into_callable_error(),
            Self::Config(_) | Self::Parse(_) => None,
        }
    }
}
