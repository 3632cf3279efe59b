use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        grammar::compiled::Grammar,
        lexer::{Token, TokenKind},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Nesting levels charged for a parenthesised group or a call argument.
///
/// Entering a group runs through more parser frames than a prefix operator
/// or a right operand does, so it is charged more.
pub const GROUP_COST: usize = 4;

/// Returned by [`Parser::peek`] when the token list is exhausted.
static END_OF_INPUT: Token<'static> = Token { kind:     TokenKind::End,
                                              text:     "",
                                              position: 0, };

/// Recursive descent parser over the tokens of one expression.
///
/// The parser only knows the grammar's operator structure. It never sees
/// the bindings, so the tree it returns can be evaluated with any of them.
///
/// Grammar, with `B_i` the binary level at index `i` of
/// [`Grammar::binary_level`] (every left-to-right level, then every
/// right-to-left level, loosest first):
///
/// ```text
/// expr    := binary(0)
/// binary(m) := prefix ( OP_i binary(i + 1) | OP_j binary(j) )*
///              with B_i left-to-right, B_j right-to-left, i, j >= m
/// prefix  := PREFIX* postfix
/// postfix := atom POSTFIX*
/// atom    := NUMBER | IDENTIFIER | call | "(" expr ")"
/// call    := IDENTIFIER "(" expr ( "," expr )* ")"
/// ```
///
/// Since every right-to-left level comes after every left-to-right level,
/// the right-to-left group as a whole binds tighter.
pub struct Parser<'g, 't, 'src> {
    pub(super) grammar: &'g Grammar,
    tokens:             &'t [Token<'src>],
    cursor:             usize,
    pub(super) depth:   usize,
}

impl<'g, 't, 'src> Parser<'g, 't, 'src> {
    /// Creates a parser over `tokens`, which should end with an `End` token as
    /// produced by [`tokenize`](crate::interpreter::lexer::tokenize).
    #[must_use]
    pub const fn new(grammar: &'g Grammar, tokens: &'t [Token<'src>]) -> Self {
        Self { grammar,
               tokens,
               cursor: 0,
               depth: 0 }
    }

    /// Parses a complete expression.
    ///
    /// # Errors
    /// Any syntax error, including `UnexpectedTrailingTokens` when input
    /// remains after a complete expression.
    pub fn parse(mut self) -> ParseResult<Expr> {
        let expr = self.parse_expression()?;

        let token = self.peek();
        if token.kind != TokenKind::End {
            return Err(ParseError::UnexpectedTrailingTokens { token:    token.text.to_string(),
                                                              position: token.position, });
        }

        Ok(expr)
    }

    /// Parses a full expression.
    ///
    /// This is the entry point for expression parsing, used at top level, for
    /// parenthesised groups and for call arguments. It starts at the
    /// loosest binary level and costs [`GROUP_COST`] nesting levels.
    pub(super) fn parse_expression(&mut self) -> ParseResult<Expr> {
        let position = self.peek().position;
        self.enter(GROUP_COST, position)?;
        let expr = self.parse_binary(0);
        self.leave(GROUP_COST);
        expr
    }

    /// The next token, without consuming it.
    pub(super) fn peek(&self) -> &'t Token<'src> {
        self.tokens.get(self.cursor).unwrap_or(&END_OF_INPUT)
    }

    /// Consumes and returns the next token. The end token is never consumed,
    /// so it is returned again on every later call.
    pub(super) fn advance(&mut self) -> &'t Token<'src> {
        let token = self.peek();
        if token.kind != TokenKind::End {
            self.cursor += 1;
        }
        token
    }

    /// Consumes the next token if it is an operator accepted by `accepts`.
    pub(super) fn next_operator_if(&mut self,
                                   accepts: impl Fn(&str) -> bool)
                                   -> Option<&'t Token<'src>> {
        let token = self.peek();
        if token.kind == TokenKind::Operator && accepts(token.text) {
            self.cursor += 1;
            return Some(token);
        }
        None
    }

    /// Descends `cost` nesting levels.
    pub(super) fn enter(&mut self, cost: usize, position: usize) -> ParseResult<()> {
        self.depth += cost;
        self.check_depth(self.depth, position)
    }

    /// Returns from nesting levels entered with [`Parser::enter`].
    pub(super) const fn leave(&mut self, cost: usize) {
        self.depth -= cost;
    }

    /// Fails if a tree of `depth` levels would exceed the grammar's limit.
    pub(super) fn check_depth(&self, depth: usize, position: usize) -> ParseResult<()> {
        let limit = self.grammar.max_depth();
        if depth > limit {
            return Err(ParseError::NestingTooDeep { limit, position });
        }
        Ok(())
    }
}
