use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr, UnaryOperator},
    error::SyntaxError,
    interpreter::{lexer::Token, parser::core::ParseResult},
};

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, logical OR, and descends through the precedence
/// hierarchy:
///
/// ```text
/// ||  <  &&  <  = <> ~= < <= > >=  <  + - &  <  * / \ %  <  ^  <  unary
/// ```
///
/// A trailing `!` after a complete operand can never continue an expression
/// (`!` is unary only), so `1 ! 2` is `SYN_EXPR_INVALID` rather than a
/// trailing-token error.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
where
    I: Iterator<Item = &'a (Token, usize)> + Clone,
{
    let expr = parse_or(tokens)?;
    if let Some((Token::Bang, line)) = tokens.peek() {
        return Err(SyntaxError::ExprInvalid { line: *line });
    }
    Ok(expr)
}

/// Parses left-associative chains of `||`.
fn parse_or<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
where
    I: Iterator<Item = &'a (Token, usize)> + Clone,
{
    let mut left = parse_and(tokens)?;
    while let Some((Token::OrOr, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        let right = parse_and(tokens)?;
        left = Expr::BinaryOp {
            op: BinaryOperator::Or,
            left: Box::new(left),
            right: Box::new(right),
            line,
        };
    }
    Ok(left)
}

/// Parses left-associative chains of `&&`.
fn parse_and<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
where
    I: Iterator<Item = &'a (Token, usize)> + Clone,
{
    let mut left = parse_comparison(tokens)?;
    while let Some((Token::AndAnd, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        let right = parse_comparison(tokens)?;
        left = Expr::BinaryOp {
            op: BinaryOperator::And,
            left: Box::new(left),
            right: Box::new(right),
            line,
        };
    }
    Ok(left)
}

/// Maps a token to a comparison operator, if it is one.
const fn comparison_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Equals => Some(BinaryOperator::Equal),
        Token::ApproxEquals => Some(BinaryOperator::ApproxEqual),
        Token::NotEquals => Some(BinaryOperator::NotEqual),
        Token::Less => Some(BinaryOperator::Less),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        _ => None,
    }
}

/// Parses comparison chains: `=`, `<>`, `~=`, `<`, `<=`, `>`, `>=`.
fn parse_comparison<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
where
    I: Iterator<Item = &'a (Token, usize)> + Clone,
{
    let mut left = parse_additive(tokens)?;
    loop {
        let Some((token, line)) = tokens.peek() else { break };
        let Some(op) = comparison_operator(token) else {
            break;
        };
        let line = *line;
        tokens.next();
        let right = parse_additive(tokens)?;
        left = Expr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
            line,
        };
    }
    Ok(left)
}

/// Maps a token to an additive-tier operator (`+`, `-`, string `&`).
const fn additive_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Ampersand => Some(BinaryOperator::Concat),
        _ => None,
    }
}

/// Parses addition, subtraction and concatenation.
fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
where
    I: Iterator<Item = &'a (Token, usize)> + Clone,
{
    let mut left = parse_multiplicative(tokens)?;
    loop {
        let Some((token, line)) = tokens.peek() else { break };
        let Some(op) = additive_operator(token) else {
            break;
        };
        let line = *line;
        tokens.next();
        let right = parse_multiplicative(tokens)?;
        left = Expr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
            line,
        };
    }
    Ok(left)
}

/// Maps a token to a multiplicative-tier operator (`*`, `/`, `\`, `%`).
const fn multiplicative_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Backslash => Some(BinaryOperator::IntDiv),
        Token::Percent => Some(BinaryOperator::Mod),
        _ => None,
    }
}

/// Parses multiplication, division, integer division and modulo.
fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
where
    I: Iterator<Item = &'a (Token, usize)> + Clone,
{
    let mut left = parse_power(tokens)?;
    loop {
        let Some((token, line)) = tokens.peek() else { break };
        let Some(op) = multiplicative_operator(token) else {
            break;
        };
        let line = *line;
        tokens.next();
        let right = parse_power(tokens)?;
        left = Expr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
            line,
        };
    }
    Ok(left)
}

/// Parses right-associative exponentiation: `a ^ b ^ c` is `a ^ (b ^ c)`.
fn parse_power<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
where
    I: Iterator<Item = &'a (Token, usize)> + Clone,
{
    let left = parse_unary(tokens)?;
    if let Some((Token::Caret, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        let right = parse_power(tokens)?;
        return Ok(Expr::BinaryOp {
            op: BinaryOperator::Pow,
            left: Box::new(left),
            right: Box::new(right),
            line,
        });
    }
    Ok(left)
}

/// Parses unary negation and logical not.
fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
where
    I: Iterator<Item = &'a (Token, usize)> + Clone,
{
    match tokens.peek() {
        Some((Token::Minus, line)) => {
            let line = *line;
            tokens.next();
            let operand = parse_unary(tokens)?;
            Ok(Expr::UnaryOp {
                op: UnaryOperator::Negate,
                operand: Box::new(operand),
                line,
            })
        },
        Some((Token::Bang, line)) => {
            let line = *line;
            tokens.next();
            let operand = parse_unary(tokens)?;
            Ok(Expr::UnaryOp {
                op: UnaryOperator::Not,
                operand: Box::new(operand),
                line,
            })
        },
        _ => parse_primary(tokens),
    }
}

/// Parses a primary: literal, variable, array access, call, or `( expr )`.
///
/// Every token the expression grammar has no rule for, including invalid
/// tokens from the lexer and a premature line end, is `SYN_EXPR_INVALID` at
/// the point of use.
fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
where
    I: Iterator<Item = &'a (Token, usize)> + Clone,
{
    match tokens.next() {
        Some((Token::Numeric(value), line)) => Ok(Expr::LiteralNumeric {
            value: *value,
            line: *line,
        }),
        Some((Token::Str(value), line)) => Ok(Expr::LiteralString {
            value: value.clone(),
            line: *line,
        }),
        Some((Token::Identifier(name), line)) => {
            let line = *line;
            match tokens.peek() {
                Some((Token::ParenL, _)) => {
                    tokens.next();
                    let arguments = parse_arguments(tokens, line)?;
                    Ok(Expr::FunctionCall {
                        name: name.clone(),
                        arguments,
                        line,
                    })
                },
                Some((Token::BracketL, _)) => {
                    tokens.next();
                    let subscript = parse_expression(tokens)?;
                    match tokens.next() {
                        Some((Token::BracketR, _)) => {},
                        Some((_, l)) => return Err(SyntaxError::ExprInvalid { line: *l }),
                        None => return Err(SyntaxError::ExprInvalid { line }),
                    }
                    Ok(Expr::ArrayAccess {
                        name: name.clone(),
                        subscript: Box::new(subscript),
                        line,
                    })
                },
                _ => Ok(Expr::Variable {
                    name: name.clone(),
                    line,
                }),
            }
        },
        Some((Token::ParenL, line)) => {
            let line = *line;
            let inner = parse_expression(tokens)?;
            match tokens.next() {
                Some((Token::ParenR, _)) => Ok(inner),
                Some((_, l)) => Err(SyntaxError::ExprInvalid { line: *l }),
                None => Err(SyntaxError::ExprInvalid { line }),
            }
        },
        Some((_, line)) => Err(SyntaxError::ExprInvalid { line: *line }),
        None => Err(SyntaxError::ExprInvalid { line: 0 }),
    }
}

/// Parses a call argument list after the opening parenthesis.
fn parse_arguments<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Vec<Expr>>
where
    I: Iterator<Item = &'a (Token, usize)> + Clone,
{
    let mut arguments = Vec::new();
    if matches!(tokens.peek(), Some((Token::ParenR, _))) {
        tokens.next();
        return Ok(arguments);
    }
    loop {
        arguments.push(parse_expression(tokens)?);
        match tokens.next() {
            Some((Token::Comma, _)) => {},
            Some((Token::ParenR, _)) => break,
            Some((_, l)) => return Err(SyntaxError::ExprInvalid { line: *l }),
            None => return Err(SyntaxError::ExprInvalid { line }),
        }
    }
    Ok(arguments)
}
