use std::iter::Peekable;

use crate::{
    ast::{ElseArm, ElseIfArm, FunctionDecl, Param, ParamKind, Stmt},
    error::SyntaxError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{
                expect_identifier, expect_line_end, parse_statement_list, BlockEnd, BlockKind,
                ParseResult, ParserState,
            },
            expression::parse_expression,
        },
    },
};

/// Parses a single statement.
///
/// The leading token selects the production. Lines led by an identifier are
/// disambiguated between a label declaration, a scalar assignment, an indexed
/// assignment and a plain expression statement; anything else falls through
/// to the expression-statement production.
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, line)` pairs.
/// - `state`: Parser state for control ids and nesting validation.
/// - `kind`: The block the statement appears in; used to reject nested
///   function declarations.
pub(crate) fn parse_statement<'a, I>(
    tokens: &mut Peekable<I>,
    state: &mut ParserState,
    kind: &BlockKind,
) -> ParseResult<Stmt>
where
    I: Iterator<Item = &'a (Token, usize)> + Clone,
{
    let Some((token, line)) = tokens.peek() else {
        return Err(SyntaxError::ExprInvalid { line: 0 });
    };
    let (token, line) = ((*token).clone(), *line);

    match token {
        Token::Func => parse_function(tokens, state, kind, line),
        Token::If => parse_if(tokens, state, line),
        Token::While => parse_while(tokens, state, line),
        Token::Do => parse_do_while(tokens, state, line),
        Token::For => parse_for(tokens, state, line),
        Token::Break => {
            tokens.next();
            if state.loop_depth == 0 {
                return Err(SyntaxError::BreakOutsideLoop { line });
            }
            expect_line_end(tokens)?;
            Ok(Stmt::Break { line })
        },
        Token::Continue => {
            tokens.next();
            if state.loop_depth == 0 {
                return Err(SyntaxError::ContinueOutsideLoop { line });
            }
            expect_line_end(tokens)?;
            Ok(Stmt::Continue { line })
        },
        Token::Return => {
            tokens.next();
            if !state.in_function {
                return Err(SyntaxError::ReturnOutsideFunc { line });
            }
            let value = parse_optional_value(tokens)?;
            Ok(Stmt::Return { value, line })
        },
        Token::Exit => {
            tokens.next();
            let value = parse_optional_value(tokens)?;
            Ok(Stmt::Exit { value, line })
        },
        Token::Goto => {
            tokens.next();
            let label = expect_identifier(
                tokens,
                |line| SyntaxError::GotoMissingLabel { line },
                line,
            )?;
            expect_line_end(tokens)?;
            Ok(Stmt::Goto { label, line })
        },
        Token::Dim => parse_dim(tokens, line),
        Token::Redim => parse_redim(tokens, line),
        Token::Identifier(_) => parse_identifier_led(tokens, line),
        _ => parse_expression_statement(tokens, line),
    }
}

/// Parses the optional value of `return` / `exit`, up to the line end.
fn parse_optional_value<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<crate::ast::Expr>>
where
    I: Iterator<Item = &'a (Token, usize)> + Clone,
{
    match tokens.peek() {
        None => Ok(None),
        Some((Token::LineEnd, _)) => {
            tokens.next();
            Ok(None)
        },
        Some(_) => {
            let value = parse_expression(tokens)?;
            expect_line_end(tokens)?;
            Ok(Some(value))
        },
    }
}

/// Parses a `func name(params)` declaration and its body.
///
/// Functions are only legal at the top level; anywhere else is
/// `SYN_FUNC_NESTED`. Parameters are plain identifiers, optionally suffixed
/// `[]` for array kind.
fn parse_function<'a, I>(
    tokens: &mut Peekable<I>,
    state: &mut ParserState,
    kind: &BlockKind,
    line: usize,
) -> ParseResult<Stmt>
where
    I: Iterator<Item = &'a (Token, usize)> + Clone,
{
    if *kind != BlockKind::Program {
        return Err(SyntaxError::FuncNested { line });
    }
    tokens.next();

    state.control_counter += 1;
    let control_id = state.control_counter;

    let name = expect_identifier(tokens, |line| SyntaxError::FuncMissingName { line }, line)?;

    match tokens.next() {
        Some((Token::ParenL, _)) => {},
        Some((_, l)) => return Err(SyntaxError::FuncMissingLeftParen { line: *l }),
        None => return Err(SyntaxError::FuncMissingLeftParen { line }),
    }

    let mut params = Vec::new();
    if matches!(tokens.peek(), Some((Token::ParenR, _))) {
        tokens.next();
    } else {
        loop {
            let param_name = expect_identifier(
                tokens,
                |line| SyntaxError::FuncInvalidParameters { line },
                line,
            )?;
            let mut param_kind = ParamKind::Primitive;
            if matches!(tokens.peek(), Some((Token::BracketL, _))) {
                tokens.next();
                match tokens.next() {
                    Some((Token::BracketR, _)) => param_kind = ParamKind::Array,
                    Some((_, l)) => return Err(SyntaxError::FuncInvalidParameters { line: *l }),
                    None => return Err(SyntaxError::FuncInvalidParameters { line }),
                }
            }
            params.push(Param {
                name: param_name,
                kind: param_kind,
            });
            match tokens.next() {
                Some((Token::ParenR, _)) => break,
                Some((Token::Comma, _)) => {},
                Some((_, l)) => return Err(SyntaxError::FuncInvalidParameters { line: *l }),
                None => return Err(SyntaxError::FuncInvalidParameters { line }),
            }
        }
    }

    expect_line_end(tokens)?;

    state.in_function = true;
    let result = parse_statement_list(tokens, state, &BlockKind::Function);
    state.in_function = false;
    let (statements, end) = result?;

    match end {
        BlockEnd::EndFunc => Ok(Stmt::FunctionDeclare(FunctionDecl {
            name,
            params,
            statements,
            line,
            control_id,
        })),
        BlockEnd::Eof => Err(SyntaxError::UnterminatedBlock { line }),
        _ => unreachable!("function body can only close with 'end func'"),
    }
}

/// Parses an `if` statement.
///
/// After the condition the statement forks: `goto label` makes the
/// single-line conditional jump (no control id, no block), a line end opens
/// the block form with `elseif`/`else` arms, and anything else is
/// `SYN_EXPECT_LINE_END`.
fn parse_if<'a, I>(tokens: &mut Peekable<I>, state: &mut ParserState, line: usize) -> ParseResult<Stmt>
where
    I: Iterator<Item = &'a (Token, usize)> + Clone,
{
    tokens.next();
    let condition = parse_expression(tokens)?;

    match tokens.peek() {
        Some((Token::Goto, _)) => {
            tokens.next();
            let label = expect_identifier(
                tokens,
                |line| SyntaxError::IfGotoMissingLabel { line },
                line,
            )?;
            expect_line_end(tokens)?;
            return Ok(Stmt::IfGoto {
                condition,
                label,
                line,
            });
        },
        None | Some((Token::LineEnd, _)) => {
            tokens.next();
        },
        Some((_, l)) => return Err(SyntaxError::ExpectLineEnd { line: *l }),
    }

    state.control_counter += 1;
    let control_id = state.control_counter;

    let (then, mut end) = parse_statement_list(tokens, state, &BlockKind::Then)?;
    let mut elseifs = Vec::new();
    let mut else_arm = None;

    loop {
        match end {
            BlockEnd::ElseIf { line: arm_line } => {
                let arm_condition = parse_expression(tokens)?;
                expect_line_end(tokens)?;
                let (statements, next_end) =
                    parse_statement_list(tokens, state, &BlockKind::ElseIf)?;
                elseifs.push(ElseIfArm {
                    condition: arm_condition,
                    statements,
                    line: arm_line,
                });
                end = next_end;
            },
            BlockEnd::Else { line: arm_line } => {
                expect_line_end(tokens)?;
                let (statements, next_end) = parse_statement_list(tokens, state, &BlockKind::Else)?;
                else_arm = Some(ElseArm {
                    statements,
                    line: arm_line,
                });
                end = next_end;
            },
            BlockEnd::EndIf => break,
            BlockEnd::Eof => return Err(SyntaxError::UnterminatedBlock { line }),
            _ => unreachable!("if blocks close with an arm or 'end if'"),
        }
    }

    Ok(Stmt::If {
        condition,
        then,
        elseifs,
        else_arm,
        line,
        control_id,
    })
}

/// Parses a head-tested `while` loop.
fn parse_while<'a, I>(
    tokens: &mut Peekable<I>,
    state: &mut ParserState,
    line: usize,
) -> ParseResult<Stmt>
where
    I: Iterator<Item = &'a (Token, usize)> + Clone,
{
    tokens.next();
    let condition = parse_expression(tokens)?;
    expect_line_end(tokens)?;

    state.control_counter += 1;
    let control_id = state.control_counter;

    state.loop_depth += 1;
    let result = parse_statement_list(tokens, state, &BlockKind::While);
    state.loop_depth -= 1;
    let (statements, end) = result?;

    match end {
        BlockEnd::EndWhile => Ok(Stmt::While {
            condition,
            statements,
            line,
            control_id,
        }),
        BlockEnd::Eof => Err(SyntaxError::UnterminatedBlock { line }),
        _ => unreachable!("while bodies close with 'end while'"),
    }
}

/// Parses a tail-tested `do ... while cond` loop.
fn parse_do_while<'a, I>(
    tokens: &mut Peekable<I>,
    state: &mut ParserState,
    line: usize,
) -> ParseResult<Stmt>
where
    I: Iterator<Item = &'a (Token, usize)> + Clone,
{
    tokens.next();
    expect_line_end(tokens)?;

    state.control_counter += 1;
    let control_id = state.control_counter;

    state.loop_depth += 1;
    let result = parse_statement_list(tokens, state, &BlockKind::DoWhile);
    state.loop_depth -= 1;
    let (statements, end) = result?;

    match end {
        BlockEnd::DoWhileCond(condition) => Ok(Stmt::DoWhile {
            statements,
            condition,
            line,
            control_id,
        }),
        BlockEnd::Eof => Err(SyntaxError::UnterminatedBlock { line }),
        _ => unreachable!("do bodies close with a tail 'while'"),
    }
}

/// Parses a counted `for` loop header and body.
fn parse_for<'a, I>(tokens: &mut Peekable<I>, state: &mut ParserState, line: usize) -> ParseResult<Stmt>
where
    I: Iterator<Item = &'a (Token, usize)> + Clone,
{
    tokens.next();

    state.control_counter += 1;
    let control_id = state.control_counter;

    let variable = expect_identifier(
        tokens,
        |line| SyntaxError::ForMissingVariable { line },
        line,
    )?;

    match tokens.next() {
        Some((Token::Equals, _)) => {},
        Some((_, l)) => return Err(SyntaxError::ForMissingEqual { line: *l }),
        None => return Err(SyntaxError::ForMissingEqual { line }),
    }

    let range_from = parse_expression(tokens)?;

    match tokens.next() {
        Some((Token::To, _)) => {},
        Some((_, l)) => return Err(SyntaxError::ForMissingTo { line: *l }),
        None => return Err(SyntaxError::ForMissingTo { line }),
    }

    let range_to = parse_expression(tokens)?;

    let step = if matches!(tokens.peek(), Some((Token::Step, _))) {
        tokens.next();
        Some(parse_expression(tokens)?)
    } else {
        None
    };

    expect_line_end(tokens)?;

    state.loop_depth += 1;
    let result = parse_statement_list(
        tokens,
        state,
        &BlockKind::For {
            variable: variable.clone(),
        },
    );
    state.loop_depth -= 1;
    let (statements, end) = result?;

    match end {
        BlockEnd::Next => Ok(Stmt::For {
            variable,
            range_from,
            range_to,
            step,
            statements,
            line,
            control_id,
        }),
        BlockEnd::Eof => Err(SyntaxError::UnterminatedBlock { line }),
        _ => unreachable!("for bodies close with 'next'"),
    }
}

/// Parses a `dim` statement in any of its three shapes.
///
/// `dim x`, `dim x = expr` and `dim x[size]` are distinguished by the token
/// after the variable name; anything else is `SYN_DIM_INVALID`.
fn parse_dim<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Stmt>
where
    I: Iterator<Item = &'a (Token, usize)> + Clone,
{
    tokens.next();
    let variable = expect_identifier(
        tokens,
        |line| SyntaxError::DimMissingVariable { line },
        line,
    )?;

    match tokens.peek() {
        None | Some((Token::LineEnd, _)) => {
            expect_line_end(tokens)?;
            Ok(Stmt::Dim {
                variable,
                initializer: None,
                line,
            })
        },
        Some((Token::Equals, _)) => {
            tokens.next();
            let initializer = parse_expression(tokens)?;
            expect_line_end(tokens)?;
            Ok(Stmt::Dim {
                variable,
                initializer: Some(initializer),
                line,
            })
        },
        Some((Token::BracketL, _)) => {
            tokens.next();
            let dimension = parse_expression(tokens)?;
            match tokens.next() {
                Some((Token::BracketR, _)) => {},
                Some((_, l)) => return Err(SyntaxError::DimArrayMissingBracketR { line: *l }),
                None => return Err(SyntaxError::DimArrayMissingBracketR { line }),
            }
            expect_line_end(tokens)?;
            Ok(Stmt::DimArray {
                variable,
                dimension,
                line,
            })
        },
        Some((_, l)) => Err(SyntaxError::DimInvalid { line: *l }),
    }
}

/// Parses a `redim name[size]` statement.
fn parse_redim<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Stmt>
where
    I: Iterator<Item = &'a (Token, usize)> + Clone,
{
    tokens.next();
    let variable = expect_identifier(
        tokens,
        |line| SyntaxError::RedimMissingVariable { line },
        line,
    )?;

    match tokens.next() {
        Some((Token::BracketL, _)) => {},
        Some((_, l)) => return Err(SyntaxError::RedimMissingBracketL { line: *l }),
        None => return Err(SyntaxError::RedimMissingBracketL { line }),
    }

    let dimension = parse_expression(tokens)?;

    match tokens.next() {
        Some((Token::BracketR, _)) => {},
        Some((_, l)) => return Err(SyntaxError::RedimMissingBracketR { line: *l }),
        None => return Err(SyntaxError::RedimMissingBracketR { line }),
    }

    expect_line_end(tokens)?;
    Ok(Stmt::Redim {
        variable,
        dimension,
        line,
    })
}

/// Disambiguates a statement led by an identifier.
///
/// `name:` declares a label, `name = expr` assigns, and `name[expr] = expr`
/// assigns an element. The indexed form is committed only after a lookahead
/// confirms the `] =` tail; otherwise the whole line re-parses as an
/// expression statement, so `arr[1` still reports `SYN_EXPR_INVALID`.
fn parse_identifier_led<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Stmt>
where
    I: Iterator<Item = &'a (Token, usize)> + Clone,
{
    let mut probe = tokens.clone();
    let Some((Token::Identifier(name), _)) = probe.next() else {
        unreachable!("caller checked the leading identifier")
    };

    match probe.peek() {
        Some((Token::Colon, _)) => {
            tokens.next();
            tokens.next();
            expect_line_end(tokens)?;
            Ok(Stmt::Label {
                name: name.clone(),
                line,
            })
        },
        Some((Token::Equals, _)) => {
            tokens.next();
            tokens.next();
            let value = parse_expression(tokens)?;
            expect_line_end(tokens)?;
            Ok(Stmt::Assign {
                variable: name.clone(),
                value,
                line,
            })
        },
        Some((Token::BracketL, _)) => {
            let mut lookahead = probe.clone();
            lookahead.next();
            let is_element_assignment = parse_expression(&mut lookahead).is_ok()
                && matches!(lookahead.next(), Some((Token::BracketR, _)))
                && matches!(lookahead.next(), Some((Token::Equals, _)));
            if !is_element_assignment {
                return parse_expression_statement(tokens, line);
            }

            tokens.next();
            tokens.next();
            let subscript = parse_expression(tokens)?;
            tokens.next();
            tokens.next();
            let value = parse_expression(tokens)?;
            expect_line_end(tokens)?;
            Ok(Stmt::AssignArray {
                variable: name.clone(),
                subscript,
                value,
                line,
            })
        },
        _ => parse_expression_statement(tokens, line),
    }
}

/// Parses the rest of the line as a bare expression statement.
fn parse_expression_statement<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Stmt>
where
    I: Iterator<Item = &'a (Token, usize)> + Clone,
{
    let expr = parse_expression(tokens)?;
    expect_line_end(tokens)?;
    Ok(Stmt::Expression { expr, line })
}
