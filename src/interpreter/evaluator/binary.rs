use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::Value},
    util::num::float_equal_rel,
};

/// Applies a binary operator to two evaluated operands.
///
/// Type checks happen here, at application time: arithmetic and ordering
/// need numbers on both sides, `&` stringifies scalars, `~=` accepts a
/// number pair (tolerant) or a string pair (exact). `&&`/`||` never reach
/// this function; the evaluator short-circuits them before the right operand
/// exists.
///
/// # Parameters
/// - `op`: The operator to apply.
/// - `left`: The evaluated left operand.
/// - `right`: The evaluated right operand.
/// - `line`: Source code line number for error reporting.
pub(crate) fn apply_binary(
    op: BinaryOperator,
    left: &Value,
    right: &Value,
    line: usize,
) -> EvalResult<Value> {
    match op {
        BinaryOperator::Concat => {
            let mut text = left.concat_text(line)?;
            text.push_str(&right.concat_text(line)?);
            Ok(Value::Str(text))
        },
        BinaryOperator::Add => {
            Ok(Value::Number(left.as_number(line)? + right.as_number(line)?))
        },
        BinaryOperator::Sub => {
            Ok(Value::Number(left.as_number(line)? - right.as_number(line)?))
        },
        BinaryOperator::Mul => {
            Ok(Value::Number(left.as_number(line)? * right.as_number(line)?))
        },
        BinaryOperator::Div => {
            let divisor = right.as_number(line)?;
            if divisor == 0.0 {
                return Err(RuntimeError::DivisionByZero { line }.into());
            }
            Ok(Value::Number(left.as_number(line)? / divisor))
        },
        BinaryOperator::IntDiv => {
            let dividend = left.as_number(line)? as i64;
            let divisor = right.as_number(line)? as i64;
            if divisor == 0 {
                return Err(RuntimeError::DivisionByZero { line }.into());
            }
            Ok(Value::Number((dividend / divisor) as f64))
        },
        BinaryOperator::Mod => {
            let dividend = left.as_number(line)? as i64;
            let divisor = right.as_number(line)? as i64;
            if divisor == 0 {
                return Err(RuntimeError::DivisionByZero { line }.into());
            }
            Ok(Value::Number((dividend % divisor) as f64))
        },
        BinaryOperator::Pow => Ok(Value::Number(
            left.as_number(line)?.powf(right.as_number(line)?),
        )),
        BinaryOperator::Equal => {
            Ok(Value::from(left.as_number(line)? == right.as_number(line)?))
        },
        BinaryOperator::NotEqual => {
            Ok(Value::from(left.as_number(line)? != right.as_number(line)?))
        },
        BinaryOperator::Greater => {
            Ok(Value::from(left.as_number(line)? > right.as_number(line)?))
        },
        BinaryOperator::Less => {
            Ok(Value::from(left.as_number(line)? < right.as_number(line)?))
        },
        BinaryOperator::GreaterEqual => {
            Ok(Value::from(left.as_number(line)? >= right.as_number(line)?))
        },
        BinaryOperator::LessEqual => {
            Ok(Value::from(left.as_number(line)? <= right.as_number(line)?))
        },
        BinaryOperator::ApproxEqual => match (left, right) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::from(float_equal_rel(*a, *b))),
            (Value::Str(a), Value::Str(b)) => Ok(Value::from(a == b)),
            _ => Err(RuntimeError::TypeMismatch { line }.into()),
        },
        BinaryOperator::And | BinaryOperator::Or => {
            unreachable!("logical operators short-circuit during evaluation")
        },
    }
}
