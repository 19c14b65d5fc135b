//! S-expression reading: turns source text into the nested form tree the
//! evaluator consumes.
//!
//! Parsing is a three-step pipeline:
//!
//! 1. Comment lines (left-trimmed content starting with `;`) are dropped
//!    and the whole program is wrapped in one implicit `(begin ...)`, so a
//!    file of top-level expressions runs in order as a single form.
//! 2. Every parenthesis is padded with spaces and the text is split on
//!    whitespace, yielding a flat token stream. The wrapper's own opening
//!    paren is the first token and is discarded.
//! 3. A recursive walk turns the tokens into nested lists. Atoms are tried
//!    as integer, then float, then kept as symbols.
//!
//! String literals are reassembled at the token level: a token starting
//! with `"` absorbs following tokens, one space between each, until a token
//! ends with `"`. Two consequences of padding before splitting are kept
//! deliberately: runs of whitespace inside a literal collapse to single
//! spaces, and parentheses inside a literal come back padded (`"a(b"`
//! reads as `a ( b`). There are no escape sequences.
//!
//! Only full lines can be comments; a `;` after code on the same line is
//! an ordinary token and will parse as a symbol.

use crate::Error;
use crate::ast::Value;

/// Parse a complete program: comment stripping, implicit `(begin ...)`
/// wrapping, then the structural parse. Fails with a Syntax error when a
/// list or string literal is still open at the end of input.
pub fn make_program(source: &str) -> Result<Value, Error> {
    let kept: Vec<&str> = source
        .lines()
        .filter(|line| !line.trim_start().starts_with(';'))
        .collect();
    let wrapped = format!("(begin {})", kept.join("\n"));

    let mut tokens = lex(&wrapped).into_iter();
    // The wrapper's opening paren
    tokens.next();
    Ok(Value::List(parse_sequence(&mut tokens)?))
}

/// Pad every paren with spaces, then split on whitespace. The padding is
/// global, string literals included; the parser undoes the damage inside
/// literals as far as single spaces go.
fn lex(text: &str) -> Vec<String> {
    text.replace('(', " ( ")
        .replace(')', " ) ")
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

/// Consume tokens until the matching `)`. Tokens left over after the
/// outermost close are never looked at, so surplus closing parens end the
/// program early instead of erroring.
fn parse_sequence(tokens: &mut std::vec::IntoIter<String>) -> Result<Vec<Value>, Error> {
    let mut result = Vec::new();
    while let Some(token) = tokens.next() {
        if token == "(" {
            result.push(Value::List(parse_sequence(tokens)?));
        } else if token == ")" {
            return Ok(result);
        } else if token.starts_with('"') {
            result.push(parse_string_literal(token, tokens)?);
        } else {
            result.push(atom(&token));
        }
    }
    Err(Error::syntax("unterminated list"))
}

/// Reassemble a string literal from the token stream, then strip the
/// surrounding quotes. A lone `"` token already "ends" with a quote and
/// yields the empty string.
fn parse_string_literal(
    first: String,
    tokens: &mut std::vec::IntoIter<String>,
) -> Result<Value, Error> {
    let mut literal = first;
    while !literal.ends_with('"') {
        match tokens.next() {
            Some(next) => {
                literal.push(' ');
                literal.push_str(&next);
            }
            None => return Err(Error::syntax("unterminated string literal")),
        }
    }
    let content = if literal.len() >= 2 {
        &literal[1..literal.len() - 1]
    } else {
        ""
    };
    Ok(Value::String(content.to_owned()))
}

/// Greedy atom classification: integer, then float, then symbol.
fn atom(token: &str) -> Value {
    if let Ok(n) = token.parse::<i64>() {
        Value::Integer(n)
    } else if let Ok(x) = token.parse::<f64>() {
        Value::Float(x)
    } else {
        Value::Symbol(token.to_owned())
    }
}
