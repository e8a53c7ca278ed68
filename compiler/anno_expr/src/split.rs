//! Depth-aware splitting.

use crate::{BracketKind, ParseError};

/// Split `text` at every `separator` that is not nested inside brackets.
///
/// Tokens are trimmed and empty tokens dropped, so `"a, ,b"` yields
/// `["a", "b"]`. Bracket kinds are not validated here: any opener raises
/// the depth and any closer lowers it.
///
/// # Errors
///
/// [`ParseError::InvalidSeparator`] unless `separator` is exactly one
/// character.
pub fn split_top_level<'a>(text: &'a str, separator: &str) -> Result<Vec<&'a str>, ParseError> {
    let mut chars = separator.chars();
    let (Some(sep), None) = (chars.next(), chars.next()) else {
        return Err(ParseError::InvalidSeparator {
            separator: separator.to_owned(),
        });
    };

    let mut tokens = Vec::new();
    let mut depth: i32 = 0;
    let mut start = 0;
    for (idx, c) in text.char_indices() {
        if BracketKind::from_open(c).is_some() {
            depth += 1;
        } else if BracketKind::from_close(c).is_some() {
            depth -= 1;
        } else if c == sep && depth == 0 {
            push_token(&mut tokens, &text[start..idx]);
            start = idx + c.len_utf8();
        }
    }
    push_token(&mut tokens, &text[start..]);
    Ok(tokens)
}

fn push_token<'a>(tokens: &mut Vec<&'a str>, raw: &'a str) {
    let token = raw.trim();
    if !token.is_empty() {
        tokens.push(token);
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
