use logos::Logos;

use crate::{
    error::ParseError,
    interpreter::{grammar::compiled::Grammar, parser::core::ParseResult, value::core::Number},
};

/// The fixed part of the token set, independent of any grammar.
///
/// Operator tokens are caller-defined, so they are not listed here: wherever
/// this lexer has no rule, the compiled grammar's operators are tried.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
#[logos(skip r"[ \t\r\n\f]+")]
enum Lexeme {
    /// Numeric literal tokens, such as `3.14`, `.5`, `8.`, `2.0` or `2.1e-10`.
    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?")]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?")]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+")]
    Real,
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+")]
    Integer,
    /// Identifier tokens, such as `x` or `max_`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
}

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    /// A numeric literal with its value.
    Number(Number),
    /// A name, resolved against the bindings at evaluation time.
    Identifier,
    /// A registered operator token; the token text is the operator.
    Operator,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `,`
    Comma,
    /// End of input. Always the last token.
    End,
}

/// Represents a lexical token in the source input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'src> {
    /// What was recognized.
    pub kind:     TokenKind,
    /// The exact source text of the token.
    pub text:     &'src str,
    /// Byte offset of the token in the source.
    pub position: usize,
}

impl Token<'_> {
    /// Returns `true` if this is the operator `token`.
    #[must_use]
    pub fn is_operator(&self, token: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == token
    }
}

/// Splits `source` into tokens using the operator tokens of `grammar`.
///
/// At every position, in this order: numbers, identifiers, operators, then
/// `(`, `)` and `,`. Identifiers use maximal munch, and a word that is exactly
/// a registered operator token (such as `mod`) becomes an operator. Among
/// operators the longest registered token wins. The returned vector always
/// ends with a [`TokenKind::End`] token.
///
/// # Errors
/// - `UnexpectedCharacter` if no rule matches at some position.
/// - `LiteralTooLarge` for integer literals outside the `i64` range.
///
/// # Example
/// ```
/// use safecalc::{
///     Associativity, Number, OperatorTable,
///     interpreter::lexer::{TokenKind, tokenize},
/// };
///
/// let grammar = OperatorTable::new().binary("**", 1, Associativity::RightToLeft, |a, _| Ok(a))
///                                   .compile()
///                                   .unwrap();
///
/// let tokens = tokenize(&grammar, "x ** 2").unwrap();
/// let kinds = tokens.iter().map(|t| t.kind).collect::<Vec<_>>();
///
/// assert_eq!(kinds,
///            vec![TokenKind::Identifier,
///                 TokenKind::Operator,
///                 TokenKind::Number(Number::Integer(2)),
///                 TokenKind::End]);
/// ```
pub fn tokenize<'src>(grammar: &Grammar, source: &'src str) -> ParseResult<Vec<Token<'src>>> {
    let mut tokens = Vec::new();
    // The fixed lexer restarts after every operator, so its spans are
    // relative to `offset`.
    let mut offset = 0;
    let mut lexer = Lexeme::lexer(source);

    while let Some(lexeme) = lexer.next() {
        let span = lexer.span();
        let position = offset + span.start;
        let text = &source[position..offset + span.end];

        let kind = match lexeme {
            Ok(Lexeme::Integer) => TokenKind::Number(parse_integer(text, position)?),
            Ok(Lexeme::Real) => TokenKind::Number(parse_real(text, position)?),
            Ok(Lexeme::Identifier) if grammar.is_operator(text) => TokenKind::Operator,
            Ok(Lexeme::Identifier) => TokenKind::Identifier,
            Ok(Lexeme::LParen) => TokenKind::LParen,
            Ok(Lexeme::RParen) => TokenKind::RParen,
            Ok(Lexeme::Comma) => TokenKind::Comma,
            Err(()) => {
                let rest = &source[position..];
                let Some(operator) = grammar.match_operator(rest) else {
                    let character = rest.chars().next().unwrap_or_default();
                    return Err(ParseError::UnexpectedCharacter { character, position });
                };

                tokens.push(Token { kind: TokenKind::Operator,
                                    text: &rest[..operator.len()],
                                    position });
                offset = position + operator.len();
                lexer = Lexeme::lexer(&source[offset..]);
                continue;
            },
        };

        tokens.push(Token { kind, text, position });
    }

    tokens.push(Token { kind:     TokenKind::End,
                        text:     "",
                        position: source.len(), });

    Ok(tokens)
}

/// Parses an integer literal.
fn parse_integer(text: &str, position: usize) -> ParseResult<Number> {
    text.parse()
        .map(Number::Integer)
        .map_err(|_| ParseError::LiteralTooLarge { literal: text.to_string(),
                                                   position })
}

/// Parses a floating-point literal. Overflowing exponents become infinite.
fn parse_real(text: &str, position: usize) -> ParseResult<Number> {
    text.parse()
        .map(Number::Real)
        .map_err(|_| ParseError::InvalidLiteral { literal: text.to_string(),
                                                  position })
}
