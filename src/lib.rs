//! # safecalc
//!
//! safecalc is a safe expression evaluator with caller-defined operators.
//! A caller describes its prefix, postfix and binary operators once; the
//! description is compiled into an immutable [`Grammar`] that tokenizes,
//! parses and evaluates arithmetic-style text against per-call
//! [`Bindings`]. No host code is ever executed: the only behavior reachable
//! from the text is the callables the caller registered.
//!
//! ```
//! use safecalc::{Arity, Associativity, Bindings, Number, OperatorTable};
//!
//! let grammar = OperatorTable::new().binary("+", 3, Associativity::LeftToRight, |a, b| {
//!                                       Ok(Number::Real(a.as_real() + b.as_real()))
//!                                   })
//!                                   .compile()
//!                                   .unwrap();
//!
//! let bindings = Bindings::new().with_value("x", 2.5)
//!                               .with_function("twice", Arity::Exact(1), |args| {
//!                                   Ok(Number::Real(args[0].as_real() * 2.0))
//!                               });
//!
//! assert_eq!(grammar.evaluate("twice(x) + 1", &bindings).unwrap(),
//!            Number::Real(6.0));
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

/// Defines the structure of parsed expressions.
///
/// This module declares the `Expr` enum and the operator attributes it
/// carries. The AST is built by the parser and traversed by the evaluator;
/// it never refers to the bindings, so one tree can be evaluated many times.
///
/// # Responsibilities
/// - Defines literal, identifier, call, unary and binary nodes.
/// - Attaches source positions to every node for error reporting.
/// - Parses the `lr`/`rl` and `prefix`/`postfix` keywords of operator tags.
pub mod ast;
/// The default operator table and function catalogue.
///
/// Plain values the caller may use, extend or ignore; the core never consults
/// them on its own.
pub mod defaults;
/// Provides unified error types for compilation, parsing and evaluation.
///
/// This module defines all errors that can be raised while compiling an
/// operator table, tokenizing and parsing text, or evaluating a tree. Each
/// error carries the position of the offending input where one exists.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (config, parser, evaluator).
/// - Keeps errors from caller callables intact for downcasting.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates grammar compilation, tokenizing, parsing and evaluation.
///
/// This module ties together the operator table compiler, the lexer, the
/// parser, the evaluator, value representations and bindings.
///
/// # Responsibilities
/// - Coordinates all core components.
/// - Provides entry points for parsing and evaluating expression text.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for safe numeric conversion.
///
/// The default catalogue uses these helpers to move between `i64`, `u32` and
/// `f64` without silent data loss.
pub mod util;

pub use ast::{Associativity, Expr, Side};
pub use error::{ConfigError, Error, ParseError, RuntimeError};
pub use interpreter::{
    bindings::{Arity, Binding, Bindings, Function},
    grammar::{BinaryTag, DEFAULT_MAX_DEPTH, Grammar, Level, OperatorTable, UnaryTag},
    value::{
        callable::{BinaryFn, CallResult, CallableError, UnaryFn, VariadicFn},
        core::Number,
    },
};

/// Compiles an operator table into a reusable grammar.
///
/// Same as [`OperatorTable::compile`].
///
/// # Errors
/// Any [`ConfigError`]: malformed tags, unusable tokens, or one token
/// registered at conflicting levels.
///
/// # Examples
/// ```
/// use safecalc::{ConfigError, defaults};
///
/// let table = defaults::operators().tagged_binary("+ 1", |a, _| Ok(a)).unwrap();
/// assert!(matches!(safecalc::compile(&table),
///                  Err(ConfigError::ConflictingPrecedence { .. })));
///
/// assert!(safecalc::compile(&defaults::operators()).is_ok());
/// ```
pub fn compile(table: &OperatorTable) -> Result<Grammar, ConfigError> {
    Grammar::compile(table)
}

/// Evaluates `source` with a compiled grammar and one set of bindings.
///
/// Same as [`Grammar::evaluate`]. The grammar is only borrowed, so it can be
/// shared by any number of concurrent evaluations.
///
/// # Errors
/// A [`ParseError`] for malformed text, or a [`RuntimeError`] for unknown
/// names, call errors and errors returned by the callables.
///
/// # Examples
/// ```
/// use safecalc::{Bindings, Number, defaults};
///
/// let grammar = safecalc::compile(&defaults::operators()).unwrap();
/// let bindings = Bindings::new().with_value("x", 3);
///
/// assert_eq!(safecalc::evaluate(&grammar, "x * x - 1", &bindings).unwrap(),
///            Number::Integer(8));
/// assert!(safecalc::evaluate(&grammar, "y", &bindings).is_err());
/// ```
pub fn evaluate(grammar: &Grammar, source: &str, bindings: &Bindings) -> Result<Number, Error> {
    grammar.evaluate(source, bindings)
}

/// Evaluates `source` with the default operators.
///
/// Only the caller's bindings are visible; the default functions are not
/// added. Pass [`defaults::identifiers`] (possibly extended) to use them.
///
/// # Errors
/// Same as [`evaluate`]. The default operators always compile.
///
/// # Examples
/// ```
/// use safecalc::{Bindings, Number, calc, defaults};
///
/// assert_eq!(calc("9 - 3 - 2", &Bindings::new()).unwrap(), Number::Integer(4));
/// assert_eq!(calc("2 ^ 3 ^ 2", &Bindings::new()).unwrap(), Number::Integer(512));
/// assert_eq!(calc("max(1, 4)", &defaults::identifiers()).unwrap(), Number::Integer(4));
/// assert!(calc("max(1, 4)", &Bindings::new()).is_err());
/// ```
pub fn calc(source: &str, bindings: &Bindings) -> Result<Number, Error> {
    let grammar = defaults::operators().compile()?;
    grammar.evaluate(source, bindings)
}
