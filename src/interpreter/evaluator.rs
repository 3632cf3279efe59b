/// Core evaluation logic for expressions.
///
/// Contains the evaluation [`core::Context`], the dispatch over expression
/// kinds and identifier resolution.
pub mod core;

/// Unary operator evaluation.
///
/// Applies the grammar's prefix and postfix callables.
pub mod unary;

/// Binary operator evaluation.
///
/// Evaluates both operands left to right and applies the grammar's binary
/// callables.
pub mod binary;

/// Function call evaluation.
///
/// Resolves a called name in the bindings, checks its arity and invokes it.
pub mod function;
