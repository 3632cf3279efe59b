/// The compiled, immutable grammar.
///
/// Holds the unary operator sets and the binary precedence levels, sorted
/// by numeric precedence, and is the entry point for parsing and evaluating
/// expression text.
pub mod compiled;
/// Operator tables as supplied by the caller.
///
/// Operators are registered with typed builder methods or with textual tags
/// such as `"^ 1 rl"`; nothing is validated until the table is compiled.
pub mod table;

pub use compiled::{DEFAULT_MAX_DEPTH, Grammar, Level};
pub use table::{BinaryTag, OperatorTable, UnaryTag};
