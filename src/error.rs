/// Syntax errors.
///
/// Defines all error types the parser can report while turning tokens into an
/// abstract syntax tree. Each variant maps to a stable `SYN_*` code.
pub mod syntax_error;
/// Semantic errors.
///
/// Defines all error types the analyzer can report while resolving names,
/// kinds and labels over a parsed program. Each variant maps to a stable
/// `SEM_*` code.
pub mod semantic_error;
/// Runtime errors.
///
/// Defines all error types the evaluator can raise while executing a
/// validated program. Each variant maps to a stable `RUNTIME_*` code.
pub mod runtime_error;

pub use runtime_error::RuntimeError;
pub use semantic_error::SemanticError;
pub use syntax_error::SyntaxError;

/// Any error the pipeline can produce, tagged by stage.
///
/// The three tiers are strictly ordered: a syntax error prevents semantic
/// analysis, a semantic error prevents evaluation. External callers assert
/// against [`EngineError::code`], never against the display text.
#[derive(Debug)]
pub enum EngineError {
    /// The parser rejected the source text.
    Syntax(SyntaxError),
    /// The analyzer rejected the parsed program.
    Semantic(SemanticError),
    /// Evaluation of the validated program failed.
    Runtime(RuntimeError),
}

impl EngineError {
    /// Returns the stable error code, e.g. `SYN_EXPR_INVALID`.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Syntax(e) => e.code(),
            Self::Semantic(e) => e.code(),
            Self::Runtime(e) => e.code(),
        }
    }

    /// Returns the 1-based source line the error was detected at.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Syntax(e) => e.line(),
            Self::Semantic(e) => e.line(),
            Self::Runtime(e) => e.line(),
        }
    }
}

impl From<SyntaxError> for EngineError {
    fn from(e: SyntaxError) -> Self {
        Self::Syntax(e)
    }
}

impl From<SemanticError> for EngineError {
    fn from(e: SemanticError) -> Self {
        Self::Semantic(e)
    }
}

impl From<RuntimeError> for EngineError {
    fn from(e: RuntimeError) -> Self {
        Self::Runtime(e)
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Syntax(e) => e.fmt(f),
            Self::Semantic(e) => e.fmt(f),
            Self::Runtime(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for EngineError {}
