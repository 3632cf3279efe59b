/// Caller-supplied name bindings.
///
/// A `Bindings` map is handed to every evaluation and maps identifiers to
/// numbers or to functions with a declared arity. Bindings are never stored
/// in a grammar; they live exactly as long as the caller keeps them.
pub mod bindings;
/// The evaluator module reduces a parsed tree to a number.
///
/// The evaluator walks the AST in post-order, resolving identifiers against
/// the bindings and applying the grammar's operator callables.
///
/// # Responsibilities
/// - Evaluates literals, identifiers, calls, unary and binary operations.
/// - Checks call arity before invoking a bound function.
/// - Hands errors from caller callables back unchanged.
pub mod evaluator;
/// The operator specification compiler.
///
/// Turns a caller's operator table into an immutable [`grammar::Grammar`]:
/// validated tokens, unary operator sets and one precedence-sorted chain of
/// binary levels per associativity group.
pub mod grammar;
/// The lexer module tokenizes expression text.
///
/// Numbers, identifiers, parentheses and commas are recognized by a fixed
/// lexer; operator tokens come from the compiled grammar.
///
/// # Responsibilities
/// - Converts the input text into tokens with kind, text and position.
/// - Applies maximal munch to identifiers and operator tokens.
/// - Reports characters that no rule matches.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// Parsing is precedence climbing by recursive descent, with one rule per
/// precedence level of the grammar.
///
/// # Responsibilities
/// - Honors precedence, associativity and prefix/postfix ordering.
/// - Parses function calls and parenthesised sub-expressions.
/// - Bounds nesting depth and rejects trailing input.
pub mod parser;
/// The value module defines numbers and callable signatures.
pub mod value;
