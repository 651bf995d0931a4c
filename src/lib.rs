//! # kbasic
//!
//! kbasic is a language front end and interpreter for KBasic, a small
//! BASIC-like dialect. Source text goes in; a diagnostic/result report or a
//! syntax tree dump comes out.
//!
//! The pipeline runs in strict stages, each consuming the previous stage's
//! output: lexer, recursive-descent parser, semantic analyzer, tree-walking
//! evaluator. Errors short-circuit at the stage that detects them, and every
//! error is a stable code external callers can assert against.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::match_same_arms,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic
)]
#![allow(
    clippy::missing_errors_doc,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

/// Defines the structure of parsed code.
///
/// Declares the `Stmt` and `Expr` sum types representing KBasic programs as
/// trees, with source lines and control ids attached for diagnostics and the
/// dump contract.
pub mod ast;
/// Provides the three-tier error taxonomy.
///
/// Syntax, semantic and runtime errors as separate enums, each variant
/// mapping to a stable code, plus the `EngineError` sum the pipeline
/// surfaces.
pub mod error;
/// Orchestrates lexing, parsing, analysis and evaluation.
pub mod interpreter;
/// JSON views of the pipeline's results.
///
/// The `check` report types and the `ast` dump serializer.
pub mod report;
/// General numeric utilities shared across phases.
pub mod util;

use crate::{
    ast::Program,
    error::EngineError,
    interpreter::{
        analyzer::{analyze, Analysis},
        evaluator::Interpreter,
        lexer::lex_source,
        parser::core::parse_program,
    },
    report::{ast_to_json, CheckReport},
};

/// Lexes, parses and analyzes a program, ready for evaluation.
///
/// # Errors
/// The first syntax or semantic error along the pipeline; a syntax error
/// always masks semantic ones.
pub fn compile(source: &str) -> Result<(Program, Analysis), EngineError> {
    let tokens = lex_source(source);
    let program = parse_program(&tokens)?;
    let analysis = analyze(&program)?;
    Ok((program, analysis))
}

/// Runs the full pipeline and reports the outcome.
///
/// This never fails: any error along the pipeline is folded into the report
/// with its stable code, and a successful evaluation carries the program's
/// result value. Re-running the same source always produces the same report.
///
/// # Examples
/// ```
/// let report = kbasic::check("dim result = 2 + 2");
/// assert!(!report.error);
/// assert_eq!(report.target.unwrap().stringified, "4");
///
/// let report = kbasic::check("1/0");
/// assert_eq!(report.error_id.as_deref(), Some("RUNTIME_DIVISION_BY_ZERO"));
/// ```
#[must_use]
pub fn check(source: &str) -> CheckReport {
    let (program, analysis) = match compile(source) {
        Ok(compiled) => compiled,
        Err(e) => return CheckReport::failure(&e),
    };

    let interpreter = Interpreter::new(&program);
    match interpreter.run(&program, &analysis) {
        Ok(evaluation) => CheckReport::success(&evaluation.result),
        Err(e) => CheckReport::failure(&EngineError::from(e)),
    }
}

/// Parses a program and dumps its syntax tree as JSON.
///
/// Only the parser runs; semantic analysis and evaluation are not involved
/// in the dump.
///
/// # Errors
/// The syntax error aborting the parse, if any.
pub fn dump_ast(source: &str) -> Result<serde_json::Value, EngineError> {
    let tokens = lex_source(source);
    let program = parse_program(&tokens)?;
    Ok(ast_to_json(&program))
}
