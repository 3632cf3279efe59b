use crate::{
    ast::{Expr, Side},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Number,
    },
};

impl Context<'_, '_> {
    /// Evaluates a unary operation.
    ///
    /// The operand is evaluated first, then the callable registered for the
    /// token on that side is applied to it. Errors returned by the callable
    /// are passed through as [`RuntimeError::Callable`].
    pub(super) fn eval_unary_op(&self,
                                op: &str,
                                side: Side,
                                operand: &Expr,
                                position: usize)
                                -> EvalResult<Number> {
        let value = self.eval(operand)?;

        let func = self.grammar
                       .unary_operator(side, op)
                       .ok_or_else(|| RuntimeError::UnknownOperator { token: op.to_string(),
                                                                      position })?;

        func(value).map_err(RuntimeError::Callable)
    }
}
