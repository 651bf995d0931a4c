use std::iter::Peekable;

use crate::{
    ast::{Expr, Program, Stmt},
    error::SyntaxError,
    interpreter::{
        lexer::Token,
        parser::{expression::parse_expression, statement::parse_statement},
    },
};

/// Result type used by the parser.
pub type ParseResult<T> = Result<T, SyntaxError>;

/// Mutable parser state threaded through every production.
///
/// Tracks the program-wide control-id counter, whether parsing is currently
/// inside a function body (to validate `return` and reject nested `func`),
/// and the loop nesting depth (to validate `break`/`continue`).
pub(crate) struct ParserState {
    /// Next control id is `control_counter + 1`; also the final total.
    pub control_counter: u32,
    /// True while parsing a function body.
    pub in_function: bool,
    /// Number of enclosing loops at the current position.
    pub loop_depth: usize,
}

/// The kind of block a statement list belongs to.
///
/// The list parser uses this to decide which block terminators are legal at
/// the current position; everything else is a mismatch error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BlockKind {
    /// The top level of the program.
    Program,
    /// A function body, closed by `end func`.
    Function,
    /// The statements between `if` and the first arm or `end if`.
    Then,
    /// The statements of an `elseif` arm.
    ElseIf,
    /// The statements of an `else` arm.
    Else,
    /// A `while` body, closed by `end while`.
    While,
    /// A `do` body, closed by `while <condition>`.
    DoWhile,
    /// A `for` body, closed by `next [variable]`.
    For {
        /// The loop variable a closing `next` must match.
        variable: String,
    },
}

/// How a statement list ended.
pub(crate) enum BlockEnd {
    /// The token stream ran out.
    Eof,
    /// An `elseif` arm begins; its condition is still unparsed.
    ElseIf {
        /// Line of the `elseif` keyword.
        line: usize,
    },
    /// An `else` arm begins.
    Else {
        /// Line of the `else` keyword.
        line: usize,
    },
    /// `end if` closed the block.
    EndIf,
    /// `end while` closed the block.
    EndWhile,
    /// `end func` closed the block.
    EndFunc,
    /// `next` closed the block; the variable was already validated.
    Next,
    /// `while <condition>` closed a `do` block.
    DoWhileCond(Expr),
}

/// Parses a whole token stream into a [`Program`].
///
/// # Parameters
/// - `tokens`: The `(token, line)` pairs produced by the lexer.
///
/// # Errors
/// The first syntax error encountered, with no recovery.
pub fn parse_program(tokens: &[(Token, usize)]) -> ParseResult<Program> {
    let mut state = ParserState {
        control_counter: 0,
        in_function: false,
        loop_depth: 0,
    };
    let mut iter = tokens.iter().peekable();

    // The top-level list only ever terminates at end of input; stray block
    // terminators error inside the list parser itself.
    let (statements, _) = parse_statement_list(&mut iter, &mut state, &BlockKind::Program)?;

    Ok(Program {
        statements,
        num_controls: state.control_counter,
    })
}

/// Parses statements until the enclosing block terminates.
///
/// Blank lines are skipped. Terminator keywords (`elseif`, `else`, `end ...`,
/// `next`, and `while` closing a `do`) are validated against `kind`: a
/// terminator that does not fit the current block is the specific mismatch
/// error the contract requires, never a generic failure.
///
/// # Returns
/// The parsed statements together with how the block ended. `BlockEnd::Eof`
/// is returned to the caller, which decides whether that is legal (top level)
/// or an unterminated construct.
pub(crate) fn parse_statement_list<'a, I>(
    tokens: &mut Peekable<I>,
    state: &mut ParserState,
    kind: &BlockKind,
) -> ParseResult<(Vec<Stmt>, BlockEnd)>
where
    I: Iterator<Item = &'a (Token, usize)> + Clone,
{
    let mut statements = Vec::new();

    loop {
        while matches!(tokens.peek(), Some((Token::LineEnd, _))) {
            tokens.next();
        }

        let Some((token, line)) = tokens.peek() else {
            return Ok((statements, BlockEnd::Eof));
        };
        let line = *line;

        match token {
            Token::ElseIf => {
                if !matches!(kind, BlockKind::Then | BlockKind::ElseIf) {
                    return Err(SyntaxError::ElseifNotMatch { line });
                }
                tokens.next();
                return Ok((statements, BlockEnd::ElseIf { line }));
            },
            Token::Else => {
                if !matches!(kind, BlockKind::Then | BlockKind::ElseIf) {
                    return Err(SyntaxError::ElseNotMatch { line });
                }
                tokens.next();
                return Ok((statements, BlockEnd::Else { line }));
            },
            Token::End => {
                tokens.next();
                let end = match tokens.peek() {
                    Some((Token::If, _)) => {
                        if !matches!(kind, BlockKind::Then | BlockKind::ElseIf | BlockKind::Else) {
                            return Err(SyntaxError::EndKeywordNotMatch { line });
                        }
                        BlockEnd::EndIf
                    },
                    Some((Token::While, _)) => {
                        if *kind != BlockKind::While {
                            return Err(SyntaxError::EndKeywordNotMatch { line });
                        }
                        BlockEnd::EndWhile
                    },
                    Some((Token::Func, _)) => {
                        if *kind != BlockKind::Function {
                            return Err(SyntaxError::EndKeywordNotMatch { line });
                        }
                        BlockEnd::EndFunc
                    },
                    _ => return Err(SyntaxError::EndKeywordInvalid { line }),
                };
                tokens.next();
                expect_line_end(tokens)?;
                return Ok((statements, end));
            },
            Token::Next => {
                let BlockKind::For { variable } = kind else {
                    return Err(SyntaxError::NextNotMatch { line });
                };
                tokens.next();
                match tokens.peek() {
                    Some((Token::Identifier(name), name_line)) => {
                        if name != variable {
                            return Err(SyntaxError::ForVarMismatch { line: *name_line });
                        }
                        tokens.next();
                        expect_line_end(tokens)?;
                    },
                    _ => expect_line_end(tokens)?,
                }
                return Ok((statements, BlockEnd::Next));
            },
            Token::While if *kind == BlockKind::DoWhile => {
                tokens.next();
                let condition = parse_expression(tokens)?;
                expect_line_end(tokens)?;
                return Ok((statements, BlockEnd::DoWhileCond(condition)));
            },
            _ => statements.push(parse_statement(tokens, state, kind)?),
        }
    }
}

/// Consumes the logical line terminator at the current position.
///
/// End of input counts as a line end; any other token is
/// `SYN_EXPECT_LINE_END` at that token's line.
pub(crate) fn expect_line_end<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<()>
where
    I: Iterator<Item = &'a (Token, usize)>,
{
    match tokens.peek() {
        None => Ok(()),
        Some((Token::LineEnd, _)) => {
            tokens.next();
            Ok(())
        },
        Some((_, line)) => Err(SyntaxError::ExpectLineEnd { line: *line }),
    }
}

/// Consumes an identifier, or reports the caller's error.
///
/// # Parameters
/// - `err`: Constructs the error for a non-identifier token, from its line.
/// - `fallback_line`: Line to report when the stream is exhausted.
pub(crate) fn expect_identifier<'a, I>(
    tokens: &mut Peekable<I>,
    err: impl FnOnce(usize) -> SyntaxError,
    fallback_line: usize,
) -> ParseResult<String>
where
    I: Iterator<Item = &'a (Token, usize)>,
{
    match tokens.next() {
        Some((Token::Identifier(name), _)) => Ok(name.clone()),
        Some((_, line)) => Err(err(*line)),
        None => Err(err(fallback_line)),
    }
}
