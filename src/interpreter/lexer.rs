use logos::Logos;

/// Represents a lexical token in the source input.
///
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// Keywords are distinct tokens so the parser can dispatch on them directly;
/// `;` and `\n` both lex as [`Token::LineEnd`] since either terminates a
/// logical line. Characters the grammar has no use for become
/// [`Token::Invalid`] rather than failing the lex.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Numeric literal tokens, such as `42` or `3.14`.
    #[regex(r"[0-9]+(\.[0-9]*)?", parse_number)]
    Numeric(f64),
    /// String literal tokens with their escapes resolved.
    #[regex(r#""([^"\\\n]|\\[^\n])*""#, parse_string)]
    Str(String),

    /// `dim`
    #[token("dim")]
    Dim,
    /// `redim`
    #[token("redim")]
    Redim,
    /// `goto`
    #[token("goto")]
    Goto,
    /// `if`
    #[token("if")]
    If,
    /// `elseif`
    #[token("elseif")]
    ElseIf,
    /// `else`
    #[token("else")]
    Else,
    /// `while`
    #[token("while")]
    While,
    /// `do`
    #[token("do")]
    Do,
    /// `for`
    #[token("for")]
    For,
    /// `to`
    #[token("to")]
    To,
    /// `step`
    #[token("step")]
    Step,
    /// `next`
    #[token("next")]
    Next,
    /// `continue`
    #[token("continue")]
    Continue,
    /// `break`
    #[token("break")]
    Break,
    /// `end`
    #[token("end")]
    End,
    /// `return`
    #[token("return")]
    Return,
    /// `func`
    #[token("func")]
    Func,
    /// `exit`
    #[token("exit")]
    Exit,

    /// Identifier tokens; variable, function or label names.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    /// `&&`
    #[token("&&")]
    AndAnd,
    /// `||`
    #[token("||")]
    OrOr,
    /// `&`
    #[token("&")]
    Ampersand,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `\`
    #[token("\\")]
    Backslash,
    /// `%`
    #[token("%")]
    Percent,
    /// `^`
    #[token("^")]
    Caret,
    /// `!`
    #[token("!")]
    Bang,
    /// `=`
    #[token("=")]
    Equals,
    /// `~=`
    #[token("~=")]
    ApproxEquals,
    /// `<>`
    #[token("<>")]
    NotEquals,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `(`
    #[token("(")]
    ParenL,
    /// `)`
    #[token(")")]
    ParenR,
    /// `[`
    #[token("[")]
    BracketL,
    /// `]`
    #[token("]")]
    BracketR,
    /// `,`
    #[token(",")]
    Comma,
    /// `:`
    #[token(":")]
    Colon,

    /// End of a logical line; produced by both `;` and a newline.
    #[token(";")]
    #[token("\n", |lex| {
        lex.extras.line += 1;
    })]
    LineEnd,

    /// `# Comments run to the end of the line.`
    #[regex(r"#[^\n]*", logos::skip)]
    Comment,
    /// Spaces, tabs and carriage returns between tokens.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Whitespace,

    /// A character the grammar has no rule for, such as `?` or a lone `~`.
    ///
    /// The catch-all keeps lexing total: the parser turns the token into a
    /// syntax error at the point of use. Malformed literals (bad escapes,
    /// unterminated strings) also end up here via [`lex_source`].
    #[regex(r".", |lex| lex.slice().to_string(), priority = 0)]
    Invalid(String),
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number so every token can be paired with the
/// 1-based line it starts on.
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line: 1 }
    }
}

/// Parses a numeric literal from the current token slice.
fn parse_number(lex: &mut logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Resolves the escapes of a string literal.
///
/// Supported escapes are `\n`, `\r`, `\t`, `\"` and `\xHH` with one or two
/// hex digits. Any other escape makes the token invalid.
fn parse_string(lex: &mut logos::Lexer<Token>) -> Option<String> {
    let slice = lex.slice();
    let inner = &slice[1..slice.len() - 1];

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            '"' => out.push('"'),
            'x' => {
                let mut value = 0u32;
                let mut digits = 0;
                while digits < 2 {
                    let Some(d) = chars.clone().next().and_then(|h| h.to_digit(16)) else {
                        break;
                    };
                    value = (value << 4) + d;
                    chars.next();
                    digits += 1;
                }
                if digits == 0 {
                    return None;
                }
                out.push(char::from_u32(value)?);
            },
            _ => return None,
        }
    }
    Some(out)
}

/// Tokenizes a whole source text into `(token, line)` pairs.
///
/// This is a total function: lexing never fails. Positions logos cannot match
/// surface as [`Token::Invalid`] carrying the offending slice, and the parser
/// turns those into a syntax error at the point of use.
#[must_use]
pub fn lex_source(source: &str) -> Vec<(Token, usize)> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.extras.line)),
            Err(()) => tokens.push((Token::Invalid(lexer.slice().to_string()), lexer.extras.line)),
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_and_identifiers_are_distinguished() {
        let tokens = lex_source("dim dimension");
        assert_eq!(tokens[0].0, Token::Dim);
        assert_eq!(tokens[1].0, Token::Identifier("dimension".to_string()));
    }

    #[test]
    fn semicolon_and_newline_both_end_lines() {
        let tokens = lex_source("a;b\nc");
        let kinds: Vec<_> = tokens.iter().map(|(t, _)| t.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                Token::Identifier("a".to_string()),
                Token::LineEnd,
                Token::Identifier("b".to_string()),
                Token::LineEnd,
                Token::Identifier("c".to_string()),
            ]
        );
        assert_eq!(tokens[4].1, 2);
    }

    #[test]
    fn string_escapes_are_resolved() {
        let tokens = lex_source(r#""a\tb\"c""#);
        assert_eq!(tokens[0].0, Token::Str("a\tb\"c".to_string()));
    }

    #[test]
    fn unknown_characters_become_invalid_tokens() {
        let tokens = lex_source("1 ? 2");
        assert_eq!(tokens[1].0, Token::Invalid("?".to_string()));
    }

    #[test]
    fn comments_are_skipped() {
        let tokens = lex_source("1 # everything after is ignored");
        assert_eq!(tokens.len(), 1);
    }
}
