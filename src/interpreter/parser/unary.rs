use crate::{
    ast::{Expr, Side},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_, '_, '_> {
    /// Parses a unary expression.
    ///
    /// Prefix operators apply to everything after them, including postfix
    /// operators, so an input like `P 1 S` is parsed as `P(S(1))`. Chained
    /// prefix operators nest from the inside out: `- - x` is `-(-x)`.
    ///
    /// Grammar:
    /// ```text
    ///     prefix  := PREFIX* postfix
    /// ```
    pub(super) fn parse_prefix(&mut self) -> ParseResult<Expr> {
        let grammar = self.grammar;
        let Some(token) =
            self.next_operator_if(|text| grammar.unary_operator(Side::Prefix, text).is_some())
        else {
            return self.parse_postfix();
        };

        self.enter(1, token.position)?;
        let operand = self.parse_prefix();
        self.leave(1);

        Ok(Expr::UnaryOp { op:       token.text.to_string(),
                           side:     Side::Prefix,
                           operand:  Box::new(operand?),
                           position: token.position, })
    }

    /// Parses an atom followed by any number of postfix operators.
    ///
    /// Grammar:
    /// ```text
    ///     postfix := atom POSTFIX*
    /// ```
    ///
    /// Postfix operators are taken greedily: when a token is registered both
    /// as postfix and as binary operator, the postfix reading wins.
    fn parse_postfix(&mut self) -> ParseResult<Expr> {
        let grammar = self.grammar;
        let mut operand = self.parse_atom()?;
        let mut applied = 0;

        while let Some(token) =
            self.next_operator_if(|text| grammar.unary_operator(Side::Postfix, text).is_some())
        {
            applied += 1;
            self.check_depth(self.depth + applied, token.position)?;

            operand = Expr::UnaryOp { op:       token.text.to_string(),
                                      side:     Side::Postfix,
                                      operand:  Box::new(operand),
                                      position: token.position, };
        }

        Ok(operand)
    }

    /// Parses a primary (atomic) expression.
    ///
    /// Grammar:
    /// ```text
    ///     atom := NUMBER | IDENTIFIER | call | "(" expr ")"
    /// ```
    ///
    /// # Errors
    /// - `UnexpectedEndOfInput` if the input ends where an operand is needed.
    /// - `ExpectedOperand` for any other token in operand position.
    /// - `ExpectedClosingParen` for an unbalanced `(`.
    fn parse_atom(&mut self) -> ParseResult<Expr> {
        let token = self.advance();

        match token.kind {
            TokenKind::Number(value) => Ok(Expr::Literal { value,
                                                           position: token.position }),

            TokenKind::Identifier if self.peek().kind == TokenKind::LParen => {
                self.advance();
                self.parse_call(token)
            },

            TokenKind::Identifier => Ok(Expr::Identifier { name:     token.text.to_string(),
                                                           position: token.position, }),

            TokenKind::LParen => {
                let inner = self.parse_expression()?;
                let close = self.advance();
                if close.kind != TokenKind::RParen {
                    return Err(ParseError::ExpectedClosingParen { position: close.position });
                }
                Ok(inner)
            },

            TokenKind::End => Err(ParseError::UnexpectedEndOfInput { position: token.position }),

            TokenKind::Operator | TokenKind::RParen | TokenKind::Comma => {
                Err(ParseError::ExpectedOperand { found:    token.text.to_string(),
                                                  position: token.position, })
            },
        }
    }

    /// Parses the argument list of a call; `name` is the identifier token and
    /// the opening parenthesis is already consumed.
    ///
    /// Grammar:
    /// ```text
    ///     call := IDENTIFIER "(" expr ("," expr)* ")"
    /// ```
    ///
    /// # Errors
    /// `EmptyArgumentList` for `f()`, plus anything the argument list reports.
    fn parse_call(&mut self, name: &Token<'_>) -> ParseResult<Expr> {
        if self.peek().kind == TokenKind::RParen {
            return Err(ParseError::EmptyArgumentList { name:     name.text.to_string(),
                                                       position: name.position, });
        }

        let arguments = self.parse_arguments()?;

        Ok(Expr::FunctionCall { name: name.text.to_string(),
                                arguments,
                                position: name.position })
    }
}
