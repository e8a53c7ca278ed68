//! Bracket kinds and closing-bracket search.

use crate::ParseError;

/// The four bracket pairs of the expression grammar.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BracketKind {
    /// `[T]`: list
    Square,
    /// `(T, U)`: tuple
    Round,
    /// `{K: V}`: dict
    Curly,
    /// `<T>`: set
    Angle,
}

impl BracketKind {
    pub const fn close(self) -> char {
        match self {
            BracketKind::Square => ']',
            BracketKind::Round => ')',
            BracketKind::Curly => '}',
            BracketKind::Angle => '>',
        }
    }

    #[inline]
    pub fn from_open(c: char) -> Option<Self> {
        match c {
            '[' => Some(BracketKind::Square),
            '(' => Some(BracketKind::Round),
            '{' => Some(BracketKind::Curly),
            '<' => Some(BracketKind::Angle),
            _ => None,
        }
    }

    #[inline]
    pub fn from_close(c: char) -> Option<Self> {
        match c {
            ']' => Some(BracketKind::Square),
            ')' => Some(BracketKind::Round),
            '}' => Some(BracketKind::Curly),
            '>' => Some(BracketKind::Angle),
            _ => None,
        }
    }
}

/// Return the byte index of the bracket closing the one at `index`.
///
/// Nesting of all four kinds is honored: every inner opener must be closed
/// by its own closer before the outer one can close.
///
/// # Errors
///
/// - [`ParseError::InvalidIndex`] if `index` is out of range or not on an
///   opening bracket.
/// - [`ParseError::UnmatchedBrackets`] on a mismatched closer or when the
///   text ends first.
pub fn find_closing_bracket(text: &str, index: usize) -> Result<usize, ParseError> {
    let opener = text
        .get(index..)
        .and_then(|rest| rest.chars().next())
        .and_then(BracketKind::from_open);
    let Some(outer) = opener else {
        return Err(ParseError::InvalidIndex {
            text: text.to_owned(),
            index,
        });
    };

    let unmatched = || ParseError::UnmatchedBrackets {
        text: text.to_owned(),
    };

    // Openers are one byte wide, so the scan starts right after `index`.
    let start = index + 1;
    let mut pending: Vec<BracketKind> = Vec::new();
    for (offset, c) in text[start..].char_indices() {
        if let Some(inner) = BracketKind::from_open(c) {
            pending.push(inner);
            continue;
        }
        let Some(closer) = BracketKind::from_close(c) else {
            continue;
        };
        match pending.pop() {
            None if closer == outer => return Ok(start + offset),
            Some(top) if top == closer => {}
            _ => return Err(unmatched()),
        }
    }
    Err(unmatched())
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
