use std::{collections::HashMap, fmt};

use log::{debug, trace};

use crate::{
    ast::{Associativity, Expr, Side},
    error::{ConfigError, Error, ParseError},
    interpreter::{
        bindings::Bindings,
        evaluator::core::{Context, EvalResult},
        grammar::table::OperatorTable,
        lexer::tokenize,
        parser::core::Parser,
        value::{
            callable::{BinaryFn, UnaryFn},
            core::Number,
        },
    },
};

/// Nesting depth allowed when no other limit is configured.
///
/// With the group cost this allows 63 nested parentheses or calls. The
/// parser spends a fixed number of stack frames per level whatever the
/// number of precedence levels, so this fits a 2 MiB thread stack in debug
/// builds.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// One binary precedence level: every operator sharing a precedence number
/// within one associativity group.
#[derive(Clone)]
pub struct Level {
    precedence: i64,
    operators:  HashMap<String, BinaryFn>,
}

impl Level {
    /// The precedence number shared by the level's operators.
    #[must_use]
    pub const fn precedence(&self) -> i64 {
        self.precedence
    }

    /// Returns `true` if `token` is an operator of this level.
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.operators.contains_key(token)
    }

    /// The callable registered for `token` at this level.
    #[must_use]
    pub fn get(&self, token: &str) -> Option<&BinaryFn> {
        self.operators.get(token)
    }

    /// The level's tokens, sorted.
    #[must_use]
    pub fn tokens(&self) -> Vec<&str> {
        let mut tokens = self.operators.keys().map(String::as_str).collect::<Vec<_>>();
        tokens.sort_unstable();
        tokens
    }
}

impl fmt::Debug for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Level")
         .field("precedence", &self.precedence)
         .field("tokens", &self.tokens())
         .finish()
    }
}

/// A compiled operator specification.
///
/// The grammar is immutable once built. It holds two chains of binary
/// precedence levels, one per associativity group, each ordered by numeric
/// precedence from loosest (largest number, outermost rule) to tightest
/// (smallest number, innermost rule), regardless of the order in which the
/// operators were registered.
///
/// The chains are composed serially: the innermost left-to-right level falls
/// through to the outermost right-to-left level, which means every `rl`
/// operator binds tighter than every `lr` operator whatever their numeric
/// precedence. Precedence numbers only order operators within one group.
///
/// Unary operators sit below both chains, and postfix operators bind tighter
/// than prefix operators: `P 1 S` is `P(S(1))`.
///
/// Callables are `Send + Sync`, so one grammar may serve any number of
/// concurrent evaluations.
#[derive(Clone)]
pub struct Grammar {
    prefix:        HashMap<String, UnaryFn>,
    postfix:       HashMap<String, UnaryFn>,
    left_to_right: Vec<Level>,
    right_to_left: Vec<Level>,
    /// Every operator token, longest first.
    tokens:        Vec<String>,
    max_depth:     usize,
}

impl Grammar {
    /// Validates an operator table and builds the grammar.
    ///
    /// # Errors
    /// - `EmptyToken` / `InvalidToken` for tokens the tokenizer cannot produce.
    /// - `ConflictingPrecedence` if one token appears at two precedence levels
    ///   of the same associativity group.
    /// - `AmbiguousOperator` if one binary token appears in both groups.
    pub fn compile(table: &OperatorTable) -> Result<Self, ConfigError> {
        let mut prefix = HashMap::new();
        let mut postfix = HashMap::new();

        for (tag, func) in &table.unary {
            validate_token(&tag.token)?;
            let set = match tag.side {
                Side::Prefix => &mut prefix,
                Side::Postfix => &mut postfix,
            };
            set.insert(tag.token.clone(), func.clone());
        }

        let mut seen: HashMap<(&str, Associativity), i64> = HashMap::new();
        let mut left_to_right: Vec<Level> = Vec::new();
        let mut right_to_left: Vec<Level> = Vec::new();

        for (tag, func) in &table.binary {
            validate_token(&tag.token)?;

            if let Some(&first) = seen.get(&(tag.token.as_str(), tag.associativity))
               && first != tag.precedence
            {
                return Err(ConfigError::ConflictingPrecedence { token: tag.token.clone(),
                                                                associativity: tag.associativity,
                                                                first,
                                                                second: tag.precedence });
            }
            seen.insert((tag.token.as_str(), tag.associativity), tag.precedence);

            let levels = match tag.associativity {
                Associativity::LeftToRight => &mut left_to_right,
                Associativity::RightToLeft => &mut right_to_left,
            };
            match levels.iter_mut().find(|level| level.precedence == tag.precedence) {
                Some(level) => {
                    level.operators.insert(tag.token.clone(), func.clone());
                },
                None => levels.push(Level { precedence: tag.precedence,
                                            operators:  HashMap::from([(tag.token.clone(),
                                                                        func.clone())]), }),
            }
        }

        if let Some(token) = left_to_right.iter()
                                          .flat_map(|level| level.operators.keys())
                                          .find(|token| {
                                              right_to_left.iter().any(|level| level.contains(token))
                                          })
        {
            return Err(ConfigError::AmbiguousOperator { token: token.clone() });
        }

        // Outermost rule first: the loosest level has the largest number.
        left_to_right.sort_by(|a, b| b.precedence.cmp(&a.precedence));
        right_to_left.sort_by(|a, b| b.precedence.cmp(&a.precedence));

        let mut tokens = prefix.keys()
                               .chain(postfix.keys())
                               .chain(left_to_right.iter().flat_map(|level| level.operators.keys()))
                               .chain(right_to_left.iter().flat_map(|level| level.operators.keys()))
                               .cloned()
                               .collect::<Vec<_>>();
        tokens.sort_unstable_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        tokens.dedup();

        let grammar = Self { prefix,
                             postfix,
                             left_to_right,
                             right_to_left,
                             tokens,
                             max_depth: DEFAULT_MAX_DEPTH };

        debug!("compiled grammar: lr levels {:?}, rl levels {:?}, {} prefix, {} postfix",
               grammar.left_to_right,
               grammar.right_to_left,
               grammar.prefix.len(),
               grammar.postfix.len());

        Ok(grammar)
    }

    /// Sets the nesting limit enforced by the parser.
    ///
    /// A parenthesised group or call argument costs
    /// [`GROUP_COST`](crate::interpreter::parser::core::GROUP_COST) levels. A
    /// prefix operator or the right operand of a binary operator costs one.
    /// Binary and postfix chains count their length.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The nesting limit enforced by the parser.
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// The binary levels of one associativity group, outermost (loosest)
    /// first.
    #[must_use]
    pub fn levels(&self, associativity: Associativity) -> &[Level] {
        match associativity {
            Associativity::LeftToRight => &self.left_to_right,
            Associativity::RightToLeft => &self.right_to_left,
        }
    }

    /// Finds the binary level of `token` in the combined order the parser
    /// climbs: every left-to-right level, outermost first, then every
    /// right-to-left level, outermost first.
    ///
    /// A higher index binds tighter. A token belongs to at most one level,
    /// which `compile` guarantees.
    #[must_use]
    pub fn binary_level(&self, token: &str) -> Option<(usize, Associativity, &Level)> {
        let left = self.left_to_right
                       .iter()
                       .map(|level| (Associativity::LeftToRight, level));
        let right = self.right_to_left
                        .iter()
                        .map(|level| (Associativity::RightToLeft, level));

        left.chain(right)
            .enumerate()
            .find(|(_, (_, level))| level.contains(token))
            .map(|(index, (associativity, level))| (index, associativity, level))
    }

    /// The callable of a unary operator.
    #[must_use]
    pub fn unary_operator(&self, side: Side, token: &str) -> Option<&UnaryFn> {
        match side {
            Side::Prefix => self.prefix.get(token),
            Side::Postfix => self.postfix.get(token),
        }
    }

    /// The callable of a binary operator.
    #[must_use]
    pub fn binary_operator(&self, associativity: Associativity, token: &str) -> Option<&BinaryFn> {
        self.levels(associativity)
            .iter()
            .find_map(|level| level.get(token))
    }

    /// Returns `true` if `text` is exactly a registered operator token.
    #[must_use]
    pub fn is_operator(&self, text: &str) -> bool {
        self.tokens.iter().any(|token| token == text)
    }

    /// The longest registered operator token that `rest` starts with.
    #[must_use]
    pub fn match_operator(&self, rest: &str) -> Option<&str> {
        self.tokens
            .iter()
            .find(|token| rest.starts_with(token.as_str()))
            .map(String::as_str)
    }

    /// Tokenizes and parses `source` without evaluating it.
    ///
    /// # Errors
    /// Any [`ParseError`].
    pub fn parse(&self, source: &str) -> Result<Expr, ParseError> {
        let tokens = tokenize(self, source)?;
        let expr = Parser::new(self, &tokens).parse()?;
        trace!("parsed {} tokens into {expr}", tokens.len());
        Ok(expr)
    }

    /// Evaluates a tree produced by [`Grammar::parse`].
    ///
    /// # Errors
    /// Any [`RuntimeError`](crate::RuntimeError), including errors returned by
    /// the callables.
    pub fn evaluate_expr(&self, expr: &Expr, bindings: &Bindings) -> EvalResult<Number> {
        Context::new(self, bindings).eval(expr)
    }

    /// Tokenizes, parses and evaluates `source` against `bindings`.
    ///
    /// The grammar is left untouched, so it stays valid after a failed call.
    ///
    /// # Errors
    /// A parse error, or any runtime error including errors returned by the
    /// callables.
    pub fn evaluate(&self, source: &str, bindings: &Bindings) -> Result<Number, Error> {
        let expr = self.parse(source)?;
        Ok(self.evaluate_expr(&expr, bindings)?)
    }
}

impl fmt::Debug for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut prefix = self.prefix.keys().collect::<Vec<_>>();
        let mut postfix = self.postfix.keys().collect::<Vec<_>>();
        prefix.sort_unstable();
        postfix.sort_unstable();

        f.debug_struct("Grammar")
         .field("prefix", &prefix)
         .field("postfix", &postfix)
         .field("left_to_right", &self.left_to_right)
         .field("right_to_left", &self.right_to_left)
         .field("max_depth", &self.max_depth)
         .finish()
    }
}

/// Rejects tokens the tokenizer could never produce as one operator.
///
/// Structural characters and whitespace are reserved, a leading digit would
/// be read as a number, and a token starting like an identifier must be a
/// whole identifier (`mod`), or it would be split by maximal munch.
fn validate_token(token: &str) -> Result<(), ConfigError> {
    let Some(first) = token.chars().next() else {
        return Err(ConfigError::EmptyToken);
    };

    let reserved = token.chars()
                        .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | ','));
    let identifier_like = first.is_ascii_alphabetic() || first == '_';
    let whole_identifier = token.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');

    if reserved || first.is_ascii_digit() || (identifier_like && !whole_identifier) {
        return Err(ConfigError::InvalidToken { token: token.to_string() });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::value::callable::CallResult;

    fn keep(a: Number, _: Number) -> CallResult {
        Ok(a)
    }

    fn identity(a: Number) -> CallResult {
        Ok(a)
    }

    fn precedences(grammar: &Grammar, associativity: Associativity) -> Vec<i64> {
        grammar.levels(associativity)
               .iter()
               .map(Level::precedence)
               .collect()
    }

    #[test]
    fn levels_are_sorted_by_number_not_insertion() {
        let grammar = OperatorTable::new().binary("*", 2, Associativity::LeftToRight, keep)
                                          .binary("==", 7, Associativity::LeftToRight, keep)
                                          .binary("+", 3, Associativity::LeftToRight, keep)
                                          .binary("-", 3, Associativity::LeftToRight, keep)
                                          .binary("^", 1, Associativity::RightToLeft, keep)
                                          .binary("**", -4, Associativity::RightToLeft, keep)
                                          .compile()
                                          .unwrap();

        assert_eq!(precedences(&grammar, Associativity::LeftToRight), vec![7, 3, 2]);
        assert_eq!(precedences(&grammar, Associativity::RightToLeft), vec![1, -4]);
        assert_eq!(grammar.levels(Associativity::LeftToRight)[1].tokens(),
                   vec!["+", "-"]);
    }

    #[test]
    fn conflicting_precedence_is_rejected() {
        let result = OperatorTable::new().binary("+", 3, Associativity::LeftToRight, keep)
                                         .binary("+", 2, Associativity::LeftToRight, keep)
                                         .compile();

        assert_eq!(result.err(),
                   Some(ConfigError::ConflictingPrecedence { token:         "+".to_string(),
                                                             associativity: Associativity::LeftToRight,
                                                             first:         3,
                                                             second:        2, }));
    }

    #[test]
    fn binary_levels_run_left_to_right_group_first() {
        let grammar = OperatorTable::new().binary("*", 2, Associativity::LeftToRight, keep)
                                          .binary("+", 3, Associativity::LeftToRight, keep)
                                          .binary("=>", 9, Associativity::RightToLeft, keep)
                                          .binary("^", 1, Associativity::RightToLeft, keep)
                                          .compile()
                                          .unwrap();

        let index = |token: &str| grammar.binary_level(token).map(|(index, associativity, _)| {
                                                           (index, associativity)
                                                       });

        assert_eq!(index("+"), Some((0, Associativity::LeftToRight)));
        assert_eq!(index("*"), Some((1, Associativity::LeftToRight)));
        assert_eq!(index("=>"), Some((2, Associativity::RightToLeft)));
        assert_eq!(index("^"), Some((3, Associativity::RightToLeft)));
        assert_eq!(index("-"), None);
    }

    #[test]
    fn token_in_both_groups_is_rejected() {
        let result = OperatorTable::new().binary("^", 3, Associativity::LeftToRight, keep)
                                         .binary("^", 1, Associativity::RightToLeft, keep)
                                         .compile();

        assert_eq!(result.err(),
                   Some(ConfigError::AmbiguousOperator { token: "^".to_string() }));
    }

    #[test]
    fn unary_and_binary_may_share_a_token() {
        let grammar = OperatorTable::new().prefix("-", identity)
                                          .binary("-", 3, Associativity::LeftToRight, keep)
                                          .compile()
                                          .unwrap();

        assert!(grammar.unary_operator(Side::Prefix, "-").is_some());
        assert!(grammar.unary_operator(Side::Postfix, "-").is_none());
        assert!(grammar.binary_operator(Associativity::LeftToRight, "-").is_some());
        assert!(grammar.binary_operator(Associativity::RightToLeft, "-").is_none());
    }

    #[test]
    fn unusable_tokens_are_rejected() {
        for token in ["", "a b", "(", "x,", "2x", "x!"] {
            let result = OperatorTable::new().prefix(token, identity).compile();
            assert!(result.is_err(), "token {token:?} should be rejected");
        }

        for token in ["mod", "_neg", "**", "!", "."] {
            let result = OperatorTable::new().prefix(token, identity).compile();
            assert!(result.is_ok(), "token {token:?} should be accepted");
        }
    }

    #[test]
    fn longest_operator_wins() {
        let grammar = OperatorTable::new().binary("*", 2, Associativity::LeftToRight, keep)
                                          .binary("**", 1, Associativity::RightToLeft, keep)
                                          .compile()
                                          .unwrap();

        assert_eq!(grammar.match_operator("**3"), Some("**"));
        assert_eq!(grammar.match_operator("* 3"), Some("*"));
        assert_eq!(grammar.match_operator("+3"), None);
        assert!(grammar.is_operator("**"));
        assert!(!grammar.is_operator("***"));
    }

    #[test]
    fn empty_table_compiles() {
        let grammar = OperatorTable::new().compile().unwrap();

        assert!(grammar.levels(Associativity::LeftToRight).is_empty());
        assert!(grammar.levels(Associativity::RightToLeft).is_empty());
        assert_eq!(grammar.max_depth(), DEFAULT_MAX_DEPTH);
        assert_eq!(grammar.with_max_depth(8).max_depth(), 8);
    }
}
