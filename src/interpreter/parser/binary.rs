use crate::{
    ast::{Associativity, Expr},
    interpreter::{
        grammar::compiled::Level,
        lexer::{Token, TokenKind},
        parser::core::{ParseResult, Parser},
    },
};

impl<'g, 't, 'src> Parser<'g, 't, 'src> {
    /// Parses binary operators of level `min_level` or tighter.
    ///
    /// Levels are indexed as in [`Grammar::binary_level`]: all left-to-right
    /// levels, then all right-to-left levels, loosest first. The loop folds
    /// operators to the left; the right operand of an operator at level `i`
    /// is parsed at `i + 1` for a left-to-right level, so `a - b - c` is
    /// `(a - b) - c`, and at `i` for a right-to-left level, so `a ^ b ^ c`
    /// is `a ^ (b ^ c)`.
    ///
    /// The recursion depth depends on how the input nests, not on how many
    /// levels the grammar has.
    ///
    /// [`Grammar::binary_level`]: crate::Grammar::binary_level
    pub(super) fn parse_binary(&mut self, min_level: usize) -> ParseResult<Expr> {
        let mut left = self.parse_prefix()?;
        let mut folds = 0;

        while let Some((token, index, associativity, level)) = self.next_binary_operator(min_level) {
            // Each fold deepens the left spine of the tree by one.
            folds += 1;
            self.check_depth(self.depth + folds, token.position)?;

            let next = match associativity {
                Associativity::LeftToRight => index + 1,
                Associativity::RightToLeft => index,
            };

            self.enter(1, token.position)?;
            let right = self.parse_binary(next);
            self.leave(1);

            left = Expr::BinaryOp { op: token.text.to_string(),
                                    associativity,
                                    precedence: level.precedence(),
                                    left: Box::new(left),
                                    right: Box::new(right?),
                                    position: token.position };
        }

        Ok(left)
    }

    /// Consumes the next token if it is a binary operator at `min_level` or
    /// tighter, returning it with its level.
    fn next_binary_operator(&mut self,
                            min_level: usize)
                            -> Option<(&'t Token<'src>, usize, Associativity, &'g Level)> {
        let grammar = self.grammar;
        let token = self.peek();
        if token.kind != TokenKind::Operator {
            return None;
        }

        let (index, associativity, level) = grammar.binary_level(token.text)?;
        if index < min_level {
            return None;
        }

        self.advance();
        Some((token, index, associativity, level))
    }
}
