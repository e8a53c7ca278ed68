//! `annoc parse`: show how an expression compiles.

use std::fmt::Write as _;

use anno_expr::Matcher;

use super::CommandError;
use crate::Engine;

/// Compile `text` and describe the result: the canonical expression on the
/// first line, then the matcher tree.
pub fn parse_expr(engine: &Engine, text: &str) -> Result<String, CommandError> {
    let matcher = engine.parse(text)?;
    let mut out = format!("canonical: {matcher}\n");
    describe_matcher(&matcher, 0, &mut out);
    Ok(out)
}

/// Append an indented tree view of `matcher` to `out`.
pub fn describe_matcher(matcher: &Matcher, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    match matcher {
        Matcher::Any => {
            let _ = writeln!(out, "{indent}any");
        }
        Matcher::Unresolved(name) => {
            let _ = writeln!(out, "{indent}any (unresolved {name})");
        }
        Matcher::Union(children) => {
            let _ = writeln!(out, "{indent}union");
            for child in children {
                describe_matcher(child, depth + 1, out);
            }
        }
        Matcher::List(element) => {
            let _ = writeln!(out, "{indent}list");
            describe_matcher(element, depth + 1, out);
        }
        Matcher::Tuple(items) => {
            let _ = writeln!(out, "{indent}tuple/{}", items.len());
            for item in items {
                describe_matcher(item, depth + 1, out);
            }
        }
        Matcher::Set(element) => {
            let _ = writeln!(out, "{indent}set");
            describe_matcher(element, depth + 1, out);
        }
        Matcher::DictKeyed { key, value } => {
            let _ = writeln!(out, "{indent}dict");
            describe_matcher(key, depth + 1, out);
            describe_matcher(value, depth + 1, out);
        }
        Matcher::DictFields(fields) => {
            let _ = writeln!(out, "{indent}record");
            for field in fields {
                let _ = writeln!(out, "{indent}  .{}", field.name);
                describe_matcher(&field.matcher, depth + 2, out);
            }
        }
        Matcher::Named { name, types } => {
            let members: Vec<String> = types.iter().map(ToString::to_string).collect();
            let _ = writeln!(out, "{indent}named {name} = {{{}}}", members.join(", "));
        }
    }
}
