/// Represents all errors the semantic analyzer can report.
///
/// Analysis runs on a successfully parsed program; the first failing check
/// aborts it. Variants that concern a named symbol carry the name for the
/// human-readable message; the stable contract is the code alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticError {
    /// A variable or parameter name exceeds the 15 character limit.
    VarNameTooLong {
        /// The offending name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A variable declared twice in the same scope.
    VarDuplicated {
        /// The offending name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A reference to a variable that is not declared in scope.
    VarNotFound {
        /// The offending name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An array operation on a variable declared as a scalar.
    VarIsNotArray {
        /// The offending name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A scalar operation on a variable declared as an array.
    VarIsNotPrimitive {
        /// The offending name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A function name exceeds the 15 character limit.
    FuncNameTooLong {
        /// The offending name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A function declared twice.
    FuncDuplicated {
        /// The offending name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A call to a function that is neither user-defined nor built in.
    FuncNotFound {
        /// The offending name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A call whose argument count does not match the declaration.
    FuncArgListMismatch {
        /// The offending function name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A label name exceeds the 15 character limit.
    LabelNameTooLong {
        /// The offending name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A label declared twice.
    LabelDuplicated {
        /// The offending name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `goto` naming a label that does not exist anywhere in the program.
    GotoLabelNotFound {
        /// The offending label name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `goto` naming a label that lives in a different function scope.
    GotoLabelScopeMismatch {
        /// The offending label name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
}

impl SemanticError {
    /// Returns the stable `SEM_*` code for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::VarNameTooLong { .. } => "SEM_VAR_NAME_TOO_LONG",
            Self::VarDuplicated { .. } => "SEM_VAR_DUPLICATED",
            Self::VarNotFound { .. } => "SEM_VAR_NOT_FOUND",
            Self::VarIsNotArray { .. } => "SEM_VAR_IS_NOT_ARRAY",
            Self::VarIsNotPrimitive { .. } => "SEM_VAR_IS_NOT_PRIMITIVE",
            Self::FuncNameTooLong { .. } => "SEM_FUNC_NAME_TOO_LONG",
            Self::FuncDuplicated { .. } => "SEM_FUNC_DUPLICATED",
            Self::FuncNotFound { .. } => "SEM_FUNC_NOT_FOUND",
            Self::FuncArgListMismatch { .. } => "SEM_FUNC_ARG_LIST_MISMATCH",
            Self::LabelNameTooLong { .. } => "SEM_LABEL_NAME_TOO_LONG",
            Self::LabelDuplicated { .. } => "SEM_LABEL_DUPLICATED",
            Self::GotoLabelNotFound { .. } => "SEM_GOTO_LABEL_NOT_FOUND",
            Self::GotoLabelScopeMismatch { .. } => "SEM_GOTO_LABEL_SCOPE_MISMATCH",
        }
    }

    /// Returns the 1-based source line the error was detected at.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::VarNameTooLong { line, .. }
            | Self::VarDuplicated { line, .. }
            | Self::VarNotFound { line, .. }
            | Self::VarIsNotArray { line, .. }
            | Self::VarIsNotPrimitive { line, .. }
            | Self::FuncNameTooLong { line, .. }
            | Self::FuncDuplicated { line, .. }
            | Self::FuncNotFound { line, .. }
            | Self::FuncArgListMismatch { line, .. }
            | Self::LabelNameTooLong { line, .. }
            | Self::LabelDuplicated { line, .. }
            | Self::GotoLabelNotFound { line, .. }
            | Self::GotoLabelScopeMismatch { line, .. } => *line,
        }
    }
}

impl std::fmt::Display for SemanticError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VarNameTooLong { name, line } => {
                write!(f, "Error on line {line}: Variable name '{name}' is too long.")
            },
            Self::VarDuplicated { name, line } => {
                write!(f, "Error on line {line}: Duplicate declaration of variable '{name}'.")
            },
            Self::VarNotFound { name, line } => {
                write!(f, "Error on line {line}: Undefined variable '{name}'.")
            },
            Self::VarIsNotArray { name, line } => {
                write!(f, "Error on line {line}: Variable '{name}' is not an array.")
            },
            Self::VarIsNotPrimitive { name, line } => {
                write!(f, "Error on line {line}: Variable '{name}' is not a primitive.")
            },
            Self::FuncNameTooLong { name, line } => {
                write!(f, "Error on line {line}: Function name '{name}' is too long.")
            },
            Self::FuncDuplicated { name, line } => {
                write!(f, "Error on line {line}: Duplicate definition of function '{name}'.")
            },
            Self::FuncNotFound { name, line } => {
                write!(f, "Error on line {line}: Undefined function '{name}'.")
            },
            Self::FuncArgListMismatch { name, line } => {
                write!(f, "Error on line {line}: Argument count mismatch in call to '{name}'.")
            },
            Self::LabelNameTooLong { name, line } => {
                write!(f, "Error on line {line}: Label name '{name}' is too long.")
            },
            Self::LabelDuplicated { name, line } => {
                write!(f, "Error on line {line}: Duplicate definition of label '{name}'.")
            },
            Self::GotoLabelNotFound { name, line } => {
                write!(f, "Error on line {line}: Undefined label '{name}'.")
            },
            Self::GotoLabelScopeMismatch { name, line } => write!(
                f,
                "Error on line {line}: Cannot jump to label '{name}' across function boundaries."
            ),
        }
    }
}

impl std::error::Error for SemanticError {}
