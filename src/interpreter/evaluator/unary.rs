use crate::{
    ast::UnaryOperator,
    interpreter::{evaluator::core::EvalResult, value::Value},
};

/// Applies a unary operator to an evaluated operand.
///
/// Both operators require a number. Logical not truncates its operand to an
/// integer before testing it, so only a value that truncates to zero negates
/// to `1`.
///
/// # Parameters
/// - `op`: The operator to apply.
/// - `value`: The evaluated operand.
/// - `line`: Source code line number for error reporting.
pub(crate) fn apply_unary(op: UnaryOperator, value: &Value, line: usize) -> EvalResult<Value> {
    match op {
        UnaryOperator::Negate => Ok(Value::Number(-value.as_number(line)?)),
        UnaryOperator::Not => Ok(Value::from(value.as_number(line)? as i64 == 0)),
    }
}
