use std::{cell::RefCell, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::evaluator::core::EvalResult,
    util::num::number_to_string,
};

/// Represents a runtime value in the interpreter.
///
/// Scalars (`Number`, `Str`) are copied on assignment. Arrays are held behind
/// a shared handle: cloning a `Value::Array` clones the handle, not the
/// elements, which is exactly the aliasing required for array-kind function
/// parameters.
#[derive(Debug, Clone)]
pub enum Value {
    /// A numeric value (double precision floating-point).
    Number(f64),
    /// A string value.
    Str(String),
    /// A zero-indexed array of values, fixed length until `redim`.
    Array(Rc<RefCell<Vec<Value>>>),
}

impl Value {
    /// Creates an array of `size` elements, each initialized to number `0`.
    #[must_use]
    pub fn new_array(size: usize) -> Self {
        Self::Array(Rc::new(RefCell::new(vec![Self::Number(0.0); size])))
    }

    /// Converts the value to `f64`, or reports a type mismatch.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    pub fn as_number(&self, line: usize) -> EvalResult<f64> {
        match self {
            Self::Number(n) => Ok(*n),
            _ => Err(RuntimeError::TypeMismatch { line }.into()),
        }
    }

    /// Borrows the value as a string slice, or reports a type mismatch.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    pub fn as_str(&self, line: usize) -> EvalResult<&str> {
        match self {
            Self::Str(s) => Ok(s),
            _ => Err(RuntimeError::TypeMismatch { line }.into()),
        }
    }

    /// Returns the array handle, or reports a kind mismatch.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    pub fn as_array(&self, line: usize) -> EvalResult<Rc<RefCell<Vec<Self>>>> {
        match self {
            Self::Array(elements) => Ok(Rc::clone(elements)),
            _ => Err(RuntimeError::NotArray { line }.into()),
        }
    }

    /// Returns `true` if the value is an array.
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// Evaluates the value as a condition.
    ///
    /// A number is truncated to an integer and is true when nonzero; a
    /// string is always true. Arrays have no boolean meaning and report a
    /// type mismatch.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    pub fn is_truthy(&self, line: usize) -> EvalResult<bool> {
        match self {
            Self::Number(n) => Ok(*n as i64 != 0),
            Self::Str(_) => Ok(true),
            Self::Array(_) => Err(RuntimeError::TypeMismatch { line }.into()),
        }
    }

    /// Stringifies a scalar for concatenation.
    ///
    /// Arrays cannot take part in `&` and report a type mismatch.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    pub fn concat_text(&self, line: usize) -> EvalResult<String> {
        match self {
            Self::Number(n) => Ok(number_to_string(*n)),
            Self::Str(s) => Ok(s.clone()),
            Self::Array(_) => Err(RuntimeError::TypeMismatch { line }.into()),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Number(if v { 1.0 } else { 0.0 })
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", number_to_string(*n)),
            Self::Str(s) => write!(f, "{s}"),
            Self::Array(elements) => {
                write!(f, "[")?;
                for (index, value) in elements.borrow().iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, "]")
            },
        }
    }
}
