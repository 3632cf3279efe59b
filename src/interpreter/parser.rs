/// Binary operator parsing.
///
/// A single precedence-climbing loop over every level of both associativity
/// groups: left-to-right levels fold in the loop, right-to-left levels
/// recurse on their right operand.
pub mod binary;
/// Core parsing logic and the shared `ParseResult` type.
///
/// Defines the [`core::Parser`] cursor, the expression entry point and the
/// nesting-depth bookkeeping.
pub mod core;
/// Unary and atomic expression parsing.
///
/// Prefix and postfix operator chains, numbers, identifiers, parenthesised
/// groups and function calls.
pub mod unary;
/// Helper functions used by parser components.
pub mod utils;
