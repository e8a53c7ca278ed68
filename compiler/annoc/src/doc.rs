//! Reading declared types out of doc comments.
//!
//! A doc comment is a summary, a blank line, then a body in which a slot is
//! declared by a line of the form
//!
//! ```text
//! name (EXPR): description
//! ```
//!
//! `EXPR` may contain brackets and colons (`{int: str}`); it ends at the
//! parenthesis that balances the one after the name.

use anno_expr::find_closing_bracket;

/// Doc names tried, in order, for a callable's return slot.
pub const RETURN_NAMES: [&str; 2] = ["return", "returns"];

/// Expression text declared for `name` in `doc`, if any.
///
/// Only the part after the first blank line is searched. When `name` is
/// declared more than once, the last declaration wins.
pub fn extract_expected_type<'d>(doc: &'d str, name: &str) -> Option<&'d str> {
    doc.lines()
        .skip_while(|line| !line.trim().is_empty())
        .skip(1)
        .filter_map(|line| declared_in_line(line.trim_start(), name))
        .last()
}

/// Expression text declared for the return slot.
pub fn extract_return_type(doc: &str) -> Option<&str> {
    RETURN_NAMES
        .iter()
        .find_map(|name| extract_expected_type(doc, name))
}

fn declared_in_line<'d>(line: &'d str, name: &str) -> Option<&'d str> {
    let rest = line.strip_prefix(name)?;
    let paren = rest.strip_prefix(' ')?;
    if !paren.starts_with('(') {
        return None;
    }

    let open = line.len() - paren.len();
    let close = find_closing_bracket(line, open).ok()?;
    line.get(close + 1..)?.strip_prefix(':')?;
    line.get(open + 1..close).map(str::trim)
}

#[cfg(test)]
mod tests;
