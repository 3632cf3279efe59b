use crate::interpreter::{bindings::Arity, value::callable::CallableError};

/// Represents all errors that can occur during evaluation.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// A name that is not present in the bindings.
    #[error("Error at position {position}: Unknown identifier '{name}'.")]
    UnknownIdentifier {
        /// The unresolved name.
        name:     String,
        /// Where it occurred.
        position: usize,
    },
    /// A name bound to a plain value was called like a function.
    #[error("Error at position {position}: '{name}' is not callable.")]
    NotCallable {
        /// The called name.
        name:     String,
        /// Where it occurred.
        position: usize,
    },
    /// A name bound to a function was used as a value.
    #[error("Error at position {position}: '{name}' is a function and must be called with arguments.")]
    NotAValue {
        /// The referenced name.
        name:     String,
        /// Where it occurred.
        position: usize,
    },
    /// A function rejected the number of supplied arguments.
    #[error("Error at position {position}: '{name}' takes {expected} argument(s), but {found} were supplied.")]
    ArgumentCountMismatch {
        /// The called name.
        name:     String,
        /// What the function accepts.
        expected: Arity,
        /// How many arguments were passed.
        found:    usize,
        /// Where it occurred.
        position: usize,
    },
    /// The tree references an operator the grammar does not define.
    #[error("Error at position {position}: Operator '{token}' is not defined by this grammar.")]
    UnknownOperator {
        /// The operator token.
        token:    String,
        /// Where it occurred.
        position: usize,
    },
    /// An error returned by a caller-supplied operator or function.
    ///
    /// The payload is the callable's own error, untouched.
    #[error("{0}")]
    Callable(CallableError),
}

impl RuntimeError {
    /// Takes back the error a caller-supplied callable returned, if any.
    #[must_use]
    pub fn into_callable_error(self) -> Option<CallableError> {
        match self {
            Self::Callable(e) => Some(e),
            _ => None,
        }
    }

    /// Returns `true` for the errors raised when a bound name cannot be called
    /// the way the expression calls it.
    #[must_use]
    pub const fn is_call_error(&self) -> bool {
        matches!(self,
                 Self::NotCallable { .. } | Self::ArgumentCountMismatch { .. })
    }
}
