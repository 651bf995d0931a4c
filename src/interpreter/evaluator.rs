/// Core evaluation logic.
///
/// The interpreter state, activation frames, statement execution with
/// structured control flow (`break`/`continue`/`return`/`exit`/`goto`), and
/// expression dispatch.
pub mod core;

/// Binary operator evaluation.
///
/// Arithmetic, comparisons, concatenation and tolerant equality, with the
/// dynamic type checks applied at operator application time.
pub mod binary;

/// Unary operator evaluation.
pub mod unary;

/// Built-in functions.
///
/// The builtin table shared with the semantic analyzer, and the runtime
/// implementations.
pub mod builtin;

pub use core::{Evaluation, Interpreter};
