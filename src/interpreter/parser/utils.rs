use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::TokenKind,
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_, '_, '_> {
    /// Parses a comma-separated argument list up to and including the
    /// closing `)`.
    ///
    /// At least one argument is required; the caller handles `()`.
    ///
    /// Grammar (simplified): `list := expr ("," expr)* ")"`
    ///
    /// # Errors
    /// Returns a `ParseError` if:
    /// - an argument fails to parse,
    /// - an argument is followed by neither `,` nor `)`,
    /// - the input ends before the closing `)`.
    pub(super) fn parse_arguments(&mut self) -> ParseResult<Vec<Expr>> {
        let mut items = Vec::new();

        loop {
            items.push(self.parse_expression()?);

            let token = self.advance();
            match token.kind {
                TokenKind::Comma => {},
                TokenKind::RParen => break,
                TokenKind::End => {
                    return Err(ParseError::ExpectedClosingParen { position: token.position });
                },
                _ => {
                    return Err(ParseError::ExpectedCommaOrParen { found:    token.text.to_string(),
                                                                  position: token.position, });
                },
            }
        }

        Ok(items)
    }
}
