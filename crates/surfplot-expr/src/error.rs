//! Mapping of meval failures onto positioned [`EvalError`]s.
//!
//! meval reports byte offsets for syntax errors and bare names for unknown
//! variables and functions; the UI needs a character offset and the text of
//! the offending token, so both are recovered from the source here.

use meval::{FuncEvalError, ParseError, RPNError};
use surfplot_core::{ErrorCode, EvalError};

pub(crate) fn from_meval(source: &str, err: meval::Error) -> EvalError {
    match err {
        meval::Error::ParseError(ParseError::UnexpectedToken(offset)) => {
            let (position, token) = token_at(source, offset);
            EvalError::new(ErrorCode::UnexpectedToken, "Unexpected token", source, token, position)
        }
        meval::Error::ParseError(ParseError::MissingRParen(_)) => missing_paren(source),
        meval::Error::ParseError(ParseError::MissingArgument) => EvalError::new(
            ErrorCode::UnexpectedEnd,
            "Unexpected end of expression",
            source,
            "",
            end_position(source),
        ),
        meval::Error::RPNError(RPNError::MismatchedLParen(_))
        | meval::Error::RPNError(RPNError::MismatchedRParen(_)) => missing_paren(source),
        meval::Error::UnknownVariable(name) => located(
            source,
            ErrorCode::UnknownVariable,
            format!("Unknown variable '{name}'"),
            &name,
        ),
        meval::Error::Function(name, FuncEvalError::UnknownFunction) => located(
            source,
            ErrorCode::UnknownFunction,
            format!("Unknown function '{name}'"),
            &name,
        ),
        meval::Error::Function(name, _) => located(
            source,
            ErrorCode::ArgumentCount,
            format!("Wrong number of arguments to '{name}'"),
            &name,
        ),
        other => EvalError::new(
            ErrorCode::UnexpectedToken,
            other.to_string(),
            source,
            "",
            end_position(source),
        ),
    }
}

fn located(source: &str, code: ErrorCode, message: String, name: &str) -> EvalError {
    let position = find_identifier(source, name).unwrap_or_else(|| end_position(source));
    EvalError::new(code, message, source, name, position)
}

/// Reports the unbalanced parenthesis: the first unmatched `)`, else the
/// innermost unclosed `(`.
fn missing_paren(source: &str) -> EvalError {
    let mut open = Vec::new();
    for (pos, c) in source.chars().enumerate() {
        match c {
            '(' => open.push(pos),
            ')' if open.pop().is_none() => {
                return EvalError::new(
                    ErrorCode::MissingParen,
                    "Unmatched ')'",
                    source,
                    ")",
                    pos,
                );
            }
            _ => {}
        }
    }
    match open.pop() {
        Some(pos) => EvalError::new(ErrorCode::MissingParen, "Missing ')'", source, "(", pos),
        None => EvalError::new(
            ErrorCode::MissingParen,
            "Unbalanced parentheses",
            source,
            "",
            end_position(source),
        ),
    }
}

fn end_position(source: &str) -> usize {
    source.trim_end().chars().count()
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Character offset of `name` as a whole identifier in `source`.
fn find_identifier(source: &str, name: &str) -> Option<usize> {
    if name.is_empty() {
        return None;
    }
    source
        .match_indices(name)
        .find(|&(byte, _)| {
            let before = source[..byte].chars().next_back();
            let after = source[byte + name.len()..].chars().next();
            !before.is_some_and(is_ident_char) && !after.is_some_and(is_ident_char)
        })
        .map(|(byte, _)| source[..byte].chars().count())
}

/// Character offset and text of the token starting at or after byte `offset`.
fn token_at(source: &str, offset: usize) -> (usize, String) {
    let start = source
        .char_indices()
        .find(|&(byte, c)| byte >= offset && !c.is_whitespace())
        .map(|(byte, _)| byte);
    let Some(start) = start else {
        return (end_position(source), String::new());
    };

    let rest = &source[start..];
    let token: String = match rest.chars().next() {
        Some(c) if is_ident_char(c) => rest.chars().take_while(|&c| is_ident_char(c)).collect(),
        Some(c) => c.to_string(),
        None => String::new(),
    };
    (source[..start].chars().count(), token)
}
