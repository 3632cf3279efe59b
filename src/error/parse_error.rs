/// Represents all errors that can occur during tokenizing or parsing.
///
/// Positions are byte offsets into the expression text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// No token rule matches the input at this position.
    #[error("Error at position {position}: Unexpected character '{character}'.")]
    UnexpectedCharacter {
        /// The character that could not be tokenized.
        character: char,
        /// Where it occurred.
        position:  usize,
    },
    /// An operand (number, identifier, call or parenthesis) was expected.
    #[error("Error at position {position}: Expected an operand, found '{found}'.")]
    ExpectedOperand {
        /// The token found instead.
        found:    String,
        /// Where it occurred.
        position: usize,
    },
    /// Reached the end of input while an operand was still required.
    #[error("Error at position {position}: Unexpected end of input.")]
    UnexpectedEndOfInput {
        /// The end of the input.
        position: usize,
    },
    /// A closing parenthesis `)` was expected but not found.
    #[error("Error at position {position}: Expected closing parenthesis ')' but none found.")]
    ExpectedClosingParen {
        /// Where the `)` was expected.
        position: usize,
    },
    /// Inside a call, an argument was followed by neither `,` nor `)`.
    #[error("Error at position {position}: Expected ',' or ')' in argument list, found '{found}'.")]
    ExpectedCommaOrParen {
        /// The token found instead.
        found:    String,
        /// Where it occurred.
        position: usize,
    },
    /// A function call without arguments, such as `f()`.
    #[error("Error at position {position}: Function '{name}' must be called with at least one argument.")]
    EmptyArgumentList {
        /// The called name.
        name:     String,
        /// Position of the name.
        position: usize,
    },
    /// Found extra tokens after a complete expression.
    #[error("Error at position {position}: Extra tokens after expression: '{token}'.")]
    UnexpectedTrailingTokens {
        /// The first extra token.
        token:    String,
        /// Where it occurred.
        position: usize,
    },
    /// An integer literal does not fit into 64 bits.
    #[error("Error at position {position}: Literal '{literal}' is too large.")]
    LiteralTooLarge {
        /// The literal text.
        literal:  String,
        /// Where it occurred.
        position: usize,
    },
    /// A numeric literal could not be converted.
    #[error("Error at position {position}: Invalid numeric literal '{literal}'.")]
    InvalidLiteral {
        /// The literal text.
        literal:  String,
        /// Where it occurred.
        position: usize,
    },
    /// The expression nests deeper than the grammar allows.
    #[error("Error at position {position}: Expression nesting exceeds the limit of {limit}.")]
    NestingTooDeep {
        /// The configured limit.
        limit:    usize,
        /// Where the limit was crossed.
        position: usize,
    },
}

impl ParseError {
    /// Byte offset in the source text where the error was detected.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::UnexpectedCharacter { position, .. }
            | Self::ExpectedOperand { position, .. }
            | Self::UnexpectedEndOfInput { position }
            | Self::ExpectedClosingParen { position }
            | Self::ExpectedCommaOrParen { position, .. }
            | Self::EmptyArgumentList { position, .. }
            | Self::UnexpectedTrailingTokens { position, .. }
            | Self::LiteralTooLarge { position, .. }
            | Self::InvalidLiteral { position, .. }
            | Self::NestingTooDeep { position, .. } => *position,
        }
    }
}
