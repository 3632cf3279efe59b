use crate::{
    ast::{Associativity, Expr},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Number,
    },
};

impl Context<'_, '_> {
    /// Evaluates a binary operation.
    ///
    /// The left operand is evaluated before the right one. The callable is
    /// looked up in the level group named by `associativity`, so a token
    /// registered in only one group is always found there.
    ///
    /// # Parameters
    /// - `op`: The operator token.
    /// - `associativity`: The group the parser took the operator from.
    /// - `left`, `right`: The operand expressions.
    /// - `position`: Byte offset of the operator, for error reporting.
    ///
    /// # Returns
    /// Whatever the operator's callable returns for the two operand values.
    pub(super) fn eval_binary_op(&self,
                                 op: &str,
                                 associativity: Associativity,
                                 left: &Expr,
                                 right: &Expr,
                                 position: usize)
                                 -> EvalResult<Number> {
        let left = self.eval(left)?;
        let right = self.eval(right)?;

        let func = self.grammar
                       .binary_operator(associativity, op)
                       .ok_or_else(|| RuntimeError::UnknownOperator { token: op.to_string(),
                                                                      position })?;

        func(left, right).map_err(RuntimeError::Callable)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use pretty_assertions::assert_eq;

    use crate::{
        Associativity, Bindings, Error, Number, OperatorTable,
        interpreter::value::callable::CallResult,
    };

    fn sub(a: Number, b: Number) -> CallResult {
        match (a, b) {
            (Number::Integer(a), Number::Integer(b)) => Ok(Number::Integer(a - b)),
            _ => Ok(Number::Real(a.as_real() - b.as_real())),
        }
    }

    fn pow(a: Number, b: Number) -> CallResult {
        Ok(Number::Real(a.as_real().powf(b.as_real())))
    }

    fn fail(_: Number, _: Number) -> CallResult {
        Err("operator refused".into())
    }

    #[test]
    fn left_to_right_folds_from_the_left() {
        let grammar = OperatorTable::new().binary("-", 3, Associativity::LeftToRight, sub)
                                          .compile()
                                          .unwrap();

        assert_eq!(grammar.evaluate("9 - 3 - 2", &Bindings::new()).unwrap(),
                   Number::Integer(4));
    }

    #[test]
    fn right_to_left_folds_from_the_right() {
        let grammar = OperatorTable::new().binary("^", 1, Associativity::RightToLeft, pow)
                                          .compile()
                                          .unwrap();

        assert_eq!(grammar.evaluate("2 ^ 3 ^ 2", &Bindings::new()).unwrap(),
                   Number::Real(512.0));
    }

    #[test]
    fn operands_are_evaluated_left_first() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&seen);
        let grammar = OperatorTable::new().prefix("#", move |x| {
                                              log.lock().unwrap().push(x);
                                              Ok(x)
                                          })
                                          .binary("-", 3, Associativity::LeftToRight, sub)
                                          .compile()
                                          .unwrap();

        grammar.evaluate("#1 - #2", &Bindings::new()).unwrap();

        assert_eq!(*seen.lock().unwrap(),
                   vec![Number::Integer(1), Number::Integer(2)]);
    }

    #[test]
    fn callable_errors_pass_through() {
        let grammar = OperatorTable::new().binary("?", 2, Associativity::LeftToRight, fail)
                                          .compile()
                                          .unwrap();

        let err = grammar.evaluate("1 ? 2", &Bindings::new()).unwrap_err();
        assert!(matches!(err, Error::Runtime(_)));
        assert_eq!(err.into_callable_error().unwrap().to_string(),
                   "operator refused");
    }
}
