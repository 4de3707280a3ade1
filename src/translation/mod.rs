//! Positional-to-named parameter translation.
//!
//! The backing service only accepts named parameters (`@name`) and rejects
//! ANSI double-quoted identifiers, while query builders emit positional `?`
//! placeholders and quoted identifiers. This module rewrites one shape into
//! the other with a lightweight byte scanner so placeholders and quotes
//! inside string literals or comments are left untouched.

use std::collections::HashMap;

mod scanner;

use scanner::{State, is_block_comment_end, is_block_comment_start, is_line_comment_start};

use crate::error::SpannerAdapterError;
use crate::types::SpannerValue;

/// A query rewritten into the backing service's shape.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslatedQuery {
    /// SQL with `@paramN` placeholders and identifier quotes stripped.
    pub sql: String,
    /// Named parameters, one entry per placeholder.
    pub params: HashMap<String, SpannerValue>,
}

/// Rewrite positional-parameter SQL into named-parameter SQL.
///
/// Each `?` outside string literals and comments becomes `@paramN`, where
/// `N` is the 1-based placeholder position in scan order, so names never
/// collide within one request even when bound values repeat. Double quotes
/// around identifiers are stripped. Bindings are consumed strictly left to
/// right. Pure and deterministic; no shared state.
///
/// # Errors
///
/// Returns `SpannerAdapterError::ArityMismatch` when the placeholder count
/// and binding count disagree in either direction. The check completes
/// before any RPC is issued.
pub fn translate(
    sql: &str,
    bindings: &[SpannerValue],
) -> Result<TranslatedQuery, SpannerAdapterError> {
    let bytes = sql.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(sql.len() + bindings.len() * 8);
    let mut params = HashMap::with_capacity(bindings.len());
    let mut pending = bindings.iter();
    let mut placeholder = 0usize;
    let mut state = State::Normal;
    let mut idx = 0;

    while idx < bytes.len() {
        let b = bytes[idx];
        match state {
            State::Normal => match b {
                b'\'' => {
                    state = State::SingleQuoted;
                    out.push(b);
                }
                // identifier quoting the target dialect does not accept
                b'"' => state = State::DoubleQuoted,
                b'?' => {
                    placeholder += 1;
                    let value = pending.next().ok_or_else(|| {
                        SpannerAdapterError::ArityMismatch(format!(
                            "query has at least {placeholder} placeholders but only {} bindings",
                            bindings.len()
                        ))
                    })?;
                    let name = format!("param{placeholder}");
                    out.push(b'@');
                    out.extend_from_slice(name.as_bytes());
                    params.insert(name, value.clone());
                }
                _ if is_line_comment_start(bytes, idx) => {
                    state = State::LineComment;
                    out.push(b);
                }
                _ if is_block_comment_start(bytes, idx) => {
                    state = State::BlockComment(1);
                    out.push(b);
                }
                _ => out.push(b),
            },
            State::SingleQuoted => {
                out.push(b);
                if b == b'\'' {
                    if bytes.get(idx + 1) == Some(&b'\'') {
                        out.push(b'\'');
                        idx += 1; // escaped quote stays inside the literal
                    } else {
                        state = State::Normal;
                    }
                }
            }
            State::DoubleQuoted => {
                if b == b'"' {
                    if bytes.get(idx + 1) == Some(&b'"') {
                        out.push(b'"');
                        idx += 1;
                    } else {
                        state = State::Normal;
                    }
                } else {
                    out.push(b);
                }
            }
            State::LineComment => {
                out.push(b);
                if b == b'\n' {
                    state = State::Normal;
                }
            }
            State::BlockComment(depth) => {
                out.push(b);
                if is_block_comment_start(bytes, idx) {
                    state = State::BlockComment(depth + 1);
                } else if is_block_comment_end(bytes, idx) {
                    state = if depth == 1 {
                        State::Normal
                    } else {
                        State::BlockComment(depth - 1)
                    };
                }
            }
        }

        idx += 1;
    }

    if pending.next().is_some() {
        return Err(SpannerAdapterError::ArityMismatch(format!(
            "query has {placeholder} placeholders but {} bindings",
            bindings.len()
        )));
    }

    // Only ASCII was removed or inserted, so the output is still valid UTF-8.
    let sql = String::from_utf8(out).map_err(|e| {
        SpannerAdapterError::Other(format!("translated SQL is not valid UTF-8: {e}"))
    })?;

    Ok(TranslatedQuery { sql, params })
}
