/// Represents all errors the parser can report.
///
/// Every variant carries the 1-based source line at which the parser stopped.
/// The parser fails fast: the first malformed construct aborts the parse and
/// no recovery is attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// Extra tokens found where the logical line should have ended.
    ExpectLineEnd {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `func` declaration without a function name.
    FuncMissingName {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `func` declaration without `(` after the name.
    FuncMissingLeftParen {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A malformed parameter list in a `func` declaration.
    FuncInvalidParameters {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `func` declaration nested inside a function or control structure.
    FuncNested {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An `if ... goto` statement without a target label.
    IfGotoMissingLabel {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An `elseif` with no open `if` block to attach to.
    ElseifNotMatch {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An `else` with no open `if` block to attach to.
    ElseNotMatch {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `for` statement without a loop variable.
    ForMissingVariable {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `for` statement without `=` after the loop variable.
    ForMissingEqual {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `for` statement without the `to` keyword.
    ForMissingTo {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `next` naming a different variable than the enclosing `for`.
    ForVarMismatch {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `next` with no open `for` block to close.
    NextNotMatch {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `break` outside any loop.
    BreakOutsideLoop {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `continue` outside any loop.
    ContinueOutsideLoop {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An `end if` / `end while` / `end func` that does not match the
    /// innermost open block.
    EndKeywordNotMatch {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An `end` followed by something other than `if`, `while` or `func`.
    EndKeywordInvalid {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `return` outside any function body.
    ReturnOutsideFunc {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `goto` without a target label.
    GotoMissingLabel {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `dim` without a variable name.
    DimMissingVariable {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `dim` whose variable is followed by an unexpected token.
    DimInvalid {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `dim name[size` without the closing bracket.
    DimArrayMissingBracketR {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `redim` without a variable name.
    RedimMissingVariable {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `redim name` without `[`.
    RedimMissingBracketL {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `redim name[size` without the closing bracket.
    RedimMissingBracketR {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A malformed expression.
    ExprInvalid {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The source ended with a function or control structure still open.
    UnterminatedBlock {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl SyntaxError {
    /// Returns the stable `SYN_*` code for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ExpectLineEnd { .. } => "SYN_EXPECT_LINE_END",
            Self::FuncMissingName { .. } => "SYN_FUNC_MISSING_NAME",
            Self::FuncMissingLeftParen { .. } => "SYN_FUNC_MISSING_LEFT_PAREN",
            Self::FuncInvalidParameters { .. } => "SYN_FUNC_INVALID_PARAMETERS",
            Self::FuncNested { .. } => "SYN_FUNC_NESTED",
            Self::IfGotoMissingLabel { .. } => "SYN_IF_GOTO_MISSING_LABEL",
            Self::ElseifNotMatch { .. } => "SYN_ELSEIF_NOT_MATCH",
            Self::ElseNotMatch { .. } => "SYN_ELSE_NOT_MATCH",
            Self::ForMissingVariable { .. } => "SYN_FOR_MISSING_VARIABLE",
            Self::ForMissingEqual { .. } => "SYN_FOR_MISSING_EQUAL",
            Self::ForMissingTo { .. } => "SYN_FOR_MISSING_TO",
            Self::ForVarMismatch { .. } => "SYN_FOR_VAR_MISMATCH",
            Self::NextNotMatch { .. } => "SYN_NEXT_NOT_MATCH",
            Self::BreakOutsideLoop { .. } => "SYN_BREAK_OUTSIDE_LOOP",
            Self::ContinueOutsideLoop { .. } => "SYN_CONTINUE_OUTSIDE_LOOP",
            Self::EndKeywordNotMatch { .. } => "SYN_END_KEYWORD_NOT_MATCH",
            Self::EndKeywordInvalid { .. } => "SYN_END_KEYWORD_INVALID",
            Self::ReturnOutsideFunc { .. } => "SYN_RETURN_OUTSIDE_FUNC",
            Self::GotoMissingLabel { .. } => "SYN_GOTO_MISSING_LABEL",
            Self::DimMissingVariable { .. } => "SYN_DIM_MISSING_VARIABLE",
            Self::DimInvalid { .. } => "SYN_DIM_INVALID",
            Self::DimArrayMissingBracketR { .. } => "SYN_DIM_ARRAY_MISSING_BRACKET_R",
            Self::RedimMissingVariable { .. } => "SYN_REDIM_MISSING_VARIABLE",
            Self::RedimMissingBracketL { .. } => "SYN_REDIM_MISSING_BRACKET_L",
            Self::RedimMissingBracketR { .. } => "SYN_REDIM_MISSING_BRACKET_R",
            Self::ExprInvalid { .. } => "SYN_EXPR_INVALID",
            Self::UnterminatedBlock { .. } => "SYN_UNTERMINATED_FUNC_OR_CTRL",
        }
    }

    /// Returns the 1-based source line the error was detected at.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::ExpectLineEnd { line }
            | Self::FuncMissingName { line }
            | Self::FuncMissingLeftParen { line }
            | Self::FuncInvalidParameters { line }
            | Self::FuncNested { line }
            | Self::IfGotoMissingLabel { line }
            | Self::ElseifNotMatch { line }
            | Self::ElseNotMatch { line }
            | Self::ForMissingVariable { line }
            | Self::ForMissingEqual { line }
            | Self::ForMissingTo { line }
            | Self::ForVarMismatch { line }
            | Self::NextNotMatch { line }
            | Self::BreakOutsideLoop { line }
            | Self::ContinueOutsideLoop { line }
            | Self::EndKeywordNotMatch { line }
            | Self::EndKeywordInvalid { line }
            | Self::ReturnOutsideFunc { line }
            | Self::GotoMissingLabel { line }
            | Self::DimMissingVariable { line }
            | Self::DimInvalid { line }
            | Self::DimArrayMissingBracketR { line }
            | Self::RedimMissingVariable { line }
            | Self::RedimMissingBracketL { line }
            | Self::RedimMissingBracketR { line }
            | Self::ExprInvalid { line }
            | Self::UnterminatedBlock { line } => *line,
        }
    }

    const fn message(&self) -> &'static str {
        match self {
            Self::ExpectLineEnd { .. } => "Expected end of line but found extra tokens.",
            Self::FuncMissingName { .. } => "Function definition missing function name.",
            Self::FuncMissingLeftParen { .. } => "Function definition missing left parenthesis.",
            Self::FuncInvalidParameters { .. } => "Invalid function parameter list.",
            Self::FuncNested { .. } => "Nested function definitions are not allowed.",
            Self::IfGotoMissingLabel { .. } => "'if ... goto' statement missing target label.",
            Self::ElseifNotMatch { .. } => "'elseif' without matching 'if'.",
            Self::ElseNotMatch { .. } => "'else' without matching 'if'.",
            Self::ForMissingVariable { .. } => "'for' statement missing loop variable.",
            Self::ForMissingEqual { .. } => "'for' statement missing '=' after variable.",
            Self::ForMissingTo { .. } => "'for' statement missing 'to' keyword.",
            Self::ForVarMismatch { .. } => "'for' loop variable mismatch.",
            Self::NextNotMatch { .. } => "'next' without matching 'for'.",
            Self::BreakOutsideLoop { .. } => "'break' used outside of loop.",
            Self::ContinueOutsideLoop { .. } => "'continue' used outside of loop.",
            Self::EndKeywordNotMatch { .. } => "'end' does not match the nearest block.",
            Self::EndKeywordInvalid { .. } => "'end' must be followed by 'if', 'while' or 'func'.",
            Self::ReturnOutsideFunc { .. } => "'return' used outside of function.",
            Self::GotoMissingLabel { .. } => "'goto' statement missing target label.",
            Self::DimMissingVariable { .. } => "'dim' statement missing variable name.",
            Self::DimInvalid { .. } => "Invalid 'dim' syntax.",
            Self::DimArrayMissingBracketR { .. } => "'dim' array missing right bracket.",
            Self::RedimMissingVariable { .. } => "'redim' statement missing variable name.",
            Self::RedimMissingBracketL { .. } => "'redim' statement missing left bracket.",
            Self::RedimMissingBracketR { .. } => "'redim' statement missing right bracket.",
            Self::ExprInvalid { .. } => "Invalid expression syntax.",
            Self::UnterminatedBlock { .. } => {
                "Program ended but a function or control structure was not closed."
            },
        }
    }
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error on line {}: {}", self.line(), self.message())
    }
}

impl std::error::Error for SyntaxError {}
