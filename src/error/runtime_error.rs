/// Represents all errors the evaluator can raise during execution.
///
/// Runtime checks fire at the point of use: operator application, array
/// sizing and indexing, and argument binding at call boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// An operand or argument had the wrong dynamic type.
    TypeMismatch {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Division, integer division or modulo by zero.
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `dim`/`redim` whose size expression evaluated to a negative number.
    ArrayInvalidSize {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An array subscript outside `[0, length)`.
    ArrayOutOfBounds {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An argument whose kind does not match the declared parameter kind.
    NotArray {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl RuntimeError {
    /// Returns the stable `RUNTIME_*` code for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::TypeMismatch { .. } => "RUNTIME_TYPE_MISMATCH",
            Self::DivisionByZero { .. } => "RUNTIME_DIVISION_BY_ZERO",
            Self::ArrayInvalidSize { .. } => "RUNTIME_ARRAY_INVALID_SIZE",
            Self::ArrayOutOfBounds { .. } => "RUNTIME_ARRAY_OUT_OF_BOUNDS",
            Self::NotArray { .. } => "RUNTIME_NOT_ARRAY",
        }
    }

    /// Returns the 1-based source line the error was detected at.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::TypeMismatch { line }
            | Self::DivisionByZero { line }
            | Self::ArrayInvalidSize { line }
            | Self::ArrayOutOfBounds { line }
            | Self::NotArray { line } => *line,
        }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TypeMismatch { line } => {
                write!(f, "Error on line {line}: Operand type mismatch.")
            },
            Self::DivisionByZero { line } => write!(f, "Error on line {line}: Division by zero."),
            Self::ArrayInvalidSize { line } => {
                write!(f, "Error on line {line}: Invalid array size.")
            },
            Self::ArrayOutOfBounds { line } => {
                write!(f, "Error on line {line}: Array subscript out of bounds.")
            },
            Self::NotArray { line } => write!(
                f,
                "Error on line {line}: Argument kind does not match the declared parameter."
            ),
        }
    }
}

impl std::error::Error for RuntimeError {}
