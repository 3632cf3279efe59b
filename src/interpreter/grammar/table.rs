use std::{str::FromStr, sync::Arc};

use crate::{
    ast::{Associativity, Side},
    error::ConfigError,
    interpreter::{
        grammar::compiled::Grammar,
        value::{
            callable::{BinaryFn, CallResult, UnaryFn},
            core::Number,
        },
    },
};

/// Key of a unary operator: its token and the side it is written on.
///
/// The textual form is `"<token> <side>"`, e.g. `"! postfix"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnaryTag {
    /// The operator token.
    pub token: String,
    /// Prefix or postfix.
    pub side:  Side,
}

impl FromStr for UnaryTag {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields = s.split_whitespace().collect::<Vec<_>>();
        match fields.as_slice() {
            [token, side] => Ok(Self { token: (*token).to_string(),
                                       side:  side.parse()?, }),
            _ => Err(ConfigError::MalformedTag { tag: s.to_string() }),
        }
    }
}

/// Key of a binary operator: token, precedence and associativity.
///
/// The textual form is `"<token> <precedence> [lr|rl]"`, e.g. `"+ 3"` or
/// `"^ 1 rl"`. A lower precedence number binds tighter; the associativity
/// defaults to `lr`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BinaryTag {
    /// The operator token.
    pub token:         String,
    /// Precedence level; lower binds tighter.
    pub precedence:    i64,
    /// Associativity group.
    pub associativity: Associativity,
}

impl FromStr for BinaryTag {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields = s.split_whitespace().collect::<Vec<_>>();
        let (token, precedence, associativity) = match fields.as_slice() {
            [token, precedence] => (*token, *precedence, Associativity::default()),
            [token, precedence, associativity] => (*token, *precedence, associativity.parse()?),
            _ => return Err(ConfigError::MalformedTag { tag: s.to_string() }),
        };

        let precedence =
            precedence.parse()
                      .map_err(|_| ConfigError::InvalidPrecedence { token: token.to_string(),
                                                                    found: precedence.to_string(), })?;

        Ok(Self { token: token.to_string(),
                  precedence,
                  associativity })
    }
}

/// A caller's operator specification, before compilation.
///
/// ## Usage
///
/// ```
/// use safecalc::{Associativity, Number, OperatorTable};
///
/// let table = OperatorTable::new().prefix("-", |x| match x {
///                                     Number::Integer(n) => Ok(Number::Integer(-n)),
///                                     Number::Real(r) => Ok(Number::Real(-r)),
///                                 })
///                                 .binary("+", 3, Associativity::LeftToRight, |a, b| {
///                                     Ok(Number::Real(a.as_real() + b.as_real()))
///                                 })
///                                 .tagged_binary("^ 1 rl", |a, b| {
///                                     Ok(Number::Real(a.as_real().powf(b.as_real())))
///                                 })
///                                 .unwrap();
///
/// let grammar = table.compile().unwrap();
/// assert_eq!(grammar.levels(Associativity::RightToLeft).len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct OperatorTable {
    pub(crate) unary:  Vec<(UnaryTag, UnaryFn)>,
    pub(crate) binary: Vec<(BinaryTag, BinaryFn)>,
}

impl OperatorTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a prefix operator.
    #[must_use]
    pub fn prefix<F>(mut self, token: impl Into<String>, func: F) -> Self
        where F: Fn(Number) -> CallResult + Send + Sync + 'static
    {
        self.insert_unary(UnaryTag { token: token.into(),
                                     side:  Side::Prefix, },
                          func);
        self
    }

    /// Registers a postfix operator.
    #[must_use]
    pub fn postfix<F>(mut self, token: impl Into<String>, func: F) -> Self
        where F: Fn(Number) -> CallResult + Send + Sync + 'static
    {
        self.insert_unary(UnaryTag { token: token.into(),
                                     side:  Side::Postfix, },
                          func);
        self
    }

    /// Registers a binary operator.
    #[must_use]
    pub fn binary<F>(mut self,
                     token: impl Into<String>,
                     precedence: i64,
                     associativity: Associativity,
                     func: F)
                     -> Self
        where F: Fn(Number, Number) -> CallResult + Send + Sync + 'static
    {
        self.insert_binary(BinaryTag { token: token.into(),
                                       precedence,
                                       associativity },
                           func);
        self
    }

    /// Registers a unary operator from a textual tag such as `"! postfix"`.
    ///
    /// # Errors
    /// Fails if the tag is malformed or names an unknown side.
    pub fn tagged_unary<F>(mut self, tag: &str, func: F) -> Result<Self, ConfigError>
        where F: Fn(Number) -> CallResult + Send + Sync + 'static
    {
        self.insert_unary(tag.parse()?, func);
        Ok(self)
    }

    /// Registers a binary operator from a textual tag such as `"^ 1 rl"`.
    ///
    /// # Errors
    /// Fails if the tag is malformed, the precedence is not an integer, or the
    /// associativity marker is neither `lr` nor `rl`.
    pub fn tagged_binary<F>(mut self, tag: &str, func: F) -> Result<Self, ConfigError>
        where F: Fn(Number, Number) -> CallResult + Send + Sync + 'static
    {
        self.insert_binary(tag.parse()?, func);
        Ok(self)
    }

    /// Registers a unary operator. An existing operator with the same tag is
    /// replaced.
    pub fn insert_unary<F>(&mut self, tag: UnaryTag, func: F)
        where F: Fn(Number) -> CallResult + Send + Sync + 'static
    {
        let func: UnaryFn = Arc::new(func);
        match self.unary.iter_mut().find(|(existing, _)| *existing == tag) {
            Some(entry) => entry.1 = func,
            None => self.unary.push((tag, func)),
        }
    }

    /// Registers a binary operator. An existing operator with the same tag is
    /// replaced.
    pub fn insert_binary<F>(&mut self, tag: BinaryTag, func: F)
        where F: Fn(Number, Number) -> CallResult + Send + Sync + 'static
    {
        let func: BinaryFn = Arc::new(func);
        match self.binary.iter_mut().find(|(existing, _)| *existing == tag) {
            Some(entry) => entry.1 = func,
            None => self.binary.push((tag, func)),
        }
    }

    /// Tags of all registered unary operators, in registration order.
    pub fn unary_tags(&self) -> impl Iterator<Item = &UnaryTag> {
        self.unary.iter().map(|(tag, _)| tag)
    }

    /// Tags of all registered binary operators, in registration order.
    pub fn binary_tags(&self) -> impl Iterator<Item = &BinaryTag> {
        self.binary.iter().map(|(tag, _)| tag)
    }

    /// Compiles the table into a [`Grammar`].
    ///
    /// # Errors
    /// See [`Grammar::compile`].
    pub fn compile(&self) -> Result<Grammar, ConfigError> {
        Grammar::compile(self)
    }
}
