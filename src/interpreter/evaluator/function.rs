use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        bindings::Binding,
        evaluator::core::{Context, EvalResult},
        value::core::Number,
    },
};

impl Context<'_, '_> {
    /// Evaluates a function call.
    ///
    /// Arguments are evaluated left to right before the name is resolved.
    /// The name must be bound to a [`Function`](crate::Function) whose arity
    /// accepts the number of arguments.
    ///
    /// # Parameters
    /// - `name`: The called identifier.
    /// - `arguments`: Argument expressions, in call order.
    /// - `position`: Byte offset of the name, for error reporting.
    ///
    /// # Errors
    /// - `UnknownIdentifier` if the name is unbound.
    /// - `NotCallable` if the name is bound to a plain value.
    /// - `ArgumentCountMismatch` if the arity check fails.
    /// - `Callable` carrying whatever error the function returned.
    pub(super) fn eval_function_call(&self,
                                     name: &str,
                                     arguments: &[Expr],
                                     position: usize)
                                     -> EvalResult<Number> {
        let args = arguments.iter()
                            .map(|arg| self.eval(arg))
                            .collect::<EvalResult<Vec<_>>>()?;

        let func = match self.bindings.get(name) {
            Some(Binding::Function(func)) => func,
            Some(Binding::Value(_)) => {
                return Err(RuntimeError::NotCallable { name: name.to_string(),
                                                       position });
            },
            None => {
                return Err(RuntimeError::UnknownIdentifier { name: name.to_string(),
                                                             position });
            },
        };

        if !func.arity().check(args.len()) {
            return Err(RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                                             expected: func.arity(),
                                                             found: args.len(),
                                                             position });
        }

        func.call(&args).map_err(RuntimeError::Callable)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Arity, Bindings, Grammar, Number, OperatorTable, RuntimeError};

    fn grammar() -> Grammar {
        OperatorTable::new().compile().unwrap()
    }

    fn first(args: &[Number]) -> crate::interpreter::value::callable::CallResult {
        Ok(args[0])
    }

    #[test]
    fn calls_bound_functions() {
        let bindings = Bindings::new().with_function("count", Arity::Any, |args| {
                                          Ok(Number::Integer(i64::try_from(args.len())?))
                                      });

        assert_eq!(grammar().evaluate("count(1, 2, 3)", &bindings).unwrap(),
                   Number::Integer(3));
    }

    #[test]
    fn value_and_function_namespaces_are_shared() {
        let bindings = Bindings::new().with_value("max", 0)
                                      .with_function("max_", Arity::Exact(1), first);

        assert_eq!(grammar().evaluate("max_(1)", &bindings).unwrap(),
                   Number::Integer(1));
        assert!(matches!(grammar().evaluate_expr(&grammar().parse("max(1)").unwrap(), &bindings),
                         Err(RuntimeError::NotCallable { ref name, position: 0 }) if name == "max"));
    }

    #[test]
    fn arity_is_checked_before_the_call() {
        let bindings = Bindings::new().with_function("f", Arity::Exact(2), |_| {
                                          panic!("must not be invoked")
                                      });
        let expr = grammar().parse("f(1)").unwrap();

        let err = grammar().evaluate_expr(&expr, &bindings).unwrap_err();
        assert!(err.is_call_error());
        assert_eq!(err.to_string(),
                   "Error at position 0: 'f' takes exactly 2 argument(s), but 1 were supplied.");
    }

    #[test]
    fn arguments_are_evaluated_before_lookup() {
        let expr = grammar().parse("g(y)").unwrap();

        assert!(matches!(grammar().evaluate_expr(&expr, &Bindings::new()),
                         Err(RuntimeError::UnknownIdentifier { ref name, position: 2 }) if name == "y"));
    }
}
