use crate::ast::Associativity;

/// Represents all errors that can occur while compiling an operator table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// An associativity marker other than `lr` or `rl`.
    #[error("Invalid operator specification: unknown associativity '{found}', expected 'lr' or 'rl'.")]
    UnknownAssociativity {
        /// The marker that was supplied.
        found: String,
    },
    /// A unary side marker other than `prefix` or `postfix`.
    #[error("Invalid operator specification: unknown side '{found}', expected 'prefix' or 'postfix'.")]
    UnknownSide {
        /// The marker that was supplied.
        found: String,
    },
    /// A binary precedence that is not an integer.
    #[error("Invalid operator specification: precedence '{found}' of operator '{token}' is not an integer.")]
    InvalidPrecedence {
        /// The operator token.
        token: String,
        /// The text given as precedence.
        found: String,
    },
    /// A textual tag with the wrong number of fields.
    #[error("Invalid operator specification: malformed tag '{tag}'.")]
    MalformedTag {
        /// The whole tag.
        tag: String,
    },
    /// An operator registered with an empty token.
    #[error("Invalid operator specification: operator tokens must not be empty.")]
    EmptyToken,
    /// A token the tokenizer could never produce.
    #[error("Invalid operator specification: '{token}' cannot be used as an operator token.")]
    InvalidToken {
        /// The offending token.
        token: String,
    },
    /// One token registered at two precedence levels of the same group.
    #[error("Invalid operator specification: '{token}' ({associativity}) is registered at precedence {first} and {second}.")]
    ConflictingPrecedence {
        /// The operator token.
        token:         String,
        /// The associativity group.
        associativity: Associativity,
        /// The precedence seen first.
        first:         i64,
        /// The conflicting precedence.
        second:        i64,
    },
    /// One binary token registered as both left- and right-associative.
    #[error("Invalid operator specification: binary operator '{token}' is registered as both 'lr' and 'rl'.")]
    AmbiguousOperator {
        /// The operator token.
        token: String,
    },
}
