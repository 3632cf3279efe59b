use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        bindings::{Binding, Bindings},
        grammar::compiled::Grammar,
        value::core::Number,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Everything one evaluation can see.
///
/// A context only borrows the grammar and the bindings. It holds no state of
/// its own, so evaluating twice with the same inputs gives the same result,
/// and contexts on different threads never interfere.
pub struct Context<'g, 'b> {
    pub(super) grammar:  &'g Grammar,
    pub(super) bindings: &'b Bindings,
}

impl<'g, 'b> Context<'g, 'b> {
    /// Creates an evaluation context.
    #[must_use]
    pub const fn new(grammar: &'g Grammar, bindings: &'b Bindings) -> Self {
        Self { grammar, bindings }
    }

    /// Evaluates an expression and returns the resulting number.
    ///
    /// This is the main entry point for expression evaluation. Children are
    /// evaluated before their parent, left to right.
    ///
    /// # Errors
    /// Unknown identifiers, call errors, operators missing from the grammar,
    /// and any error returned by a callable.
    ///
    /// # Example
    /// ```
    /// use safecalc::{Bindings, OperatorTable, interpreter::evaluator::core::Context};
    ///
    /// let grammar = OperatorTable::new().compile().unwrap();
    /// let bindings = Bindings::new().with_value("x", 1.5);
    /// let expr = grammar.parse("x").unwrap();
    ///
    /// let value = Context::new(&grammar, &bindings).eval(&expr).unwrap();
    /// assert_eq!(value.as_real(), 1.5);
    /// ```
    pub fn eval(&self, expr: &Expr) -> EvalResult<Number> {
        match expr {
            Expr::Literal { value, .. } => Ok(*value),
            Expr::Identifier { name, position } => self.eval_identifier(name, *position),
            Expr::FunctionCall { name,
                                 arguments,
                                 position, } => self.eval_function_call(name, arguments, *position),
            Expr::UnaryOp { op,
                            side,
                            operand,
                            position, } => self.eval_unary_op(op, *side, operand, *position),
            Expr::BinaryOp { op,
                             associativity,
                             left,
                             right,
                             position,
                             .. } => self.eval_binary_op(op, *associativity, left, right, *position),
        }
    }

    /// Resolves a plain identifier against the bindings.
    fn eval_identifier(&self, name: &str, position: usize) -> EvalResult<Number> {
        match self.bindings.get(name) {
            Some(Binding::Value(value)) => Ok(*value),
            Some(Binding::Function(_)) => Err(RuntimeError::NotAValue { name: name.to_string(),
                                                                        position }),
            None => Err(RuntimeError::UnknownIdentifier { name: name.to_string(),
                                                          position }),
        }
    }
}
