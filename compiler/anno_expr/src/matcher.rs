//! Compiled type expressions.

use std::fmt;

use crate::TypeSet;

/// One parsed type-expression rule.
///
/// Immutable once built; evaluating it has no side effects, so a matcher
/// can be shared freely between call sites and threads.
#[derive(Clone, Debug, PartialEq)]
pub enum Matcher {
    /// Accepts every value. Produced by empty text.
    Any,
    /// Identifier that resolved nowhere. Accepts like [`Any`](Self::Any)
    /// but keeps its spelling for display.
    Unresolved(Box<str>),
    /// Accepts if any child accepts. The parser never builds an empty union.
    Union(Vec<Matcher>),
    /// `[T]`
    List(Box<Matcher>),
    /// `(T, U, ...)`: arity is `items.len()`.
    Tuple(Vec<Matcher>),
    /// `<T>`
    Set(Box<Matcher>),
    /// `{K: V}`: homogeneous map.
    DictKeyed { key: Box<Matcher>, value: Box<Matcher> },
    /// `{a: T, b: U}`: record with at least these fields.
    DictFields(Vec<Field>),
    /// Identifier bound to the concrete types it denoted at parse time.
    Named { name: Box<str>, types: TypeSet },
}

/// A named field of a [`Matcher::DictFields`] record.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub name: Box<str>,
    pub matcher: Matcher,
}

impl Matcher {
    /// Accepts every non-null value: [`Any`](Self::Any) or an unresolved
    /// name.
    pub fn is_any(&self) -> bool {
        matches!(self, Matcher::Any | Matcher::Unresolved(_))
    }

    /// Named matcher whose type set contains the null type.
    ///
    /// These are the only matchers that judge a null value themselves
    /// instead of deferring to the null policy.
    pub fn is_none_literal(&self) -> bool {
        matches!(self, Matcher::Named { types, .. } if types.admits_none())
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[Matcher], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// Canonical expression text: whitespace normalized, names as written.
///
/// For a parser-built matcher, re-parsing the text against the same
/// registry yields an equal matcher. Hand-built trees may not round-trip
/// (a single-field record re-parses as a homogeneous map).
impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Any => Ok(()),
            Matcher::Union(children) => write_joined(f, children, "|"),
            Matcher::List(element) => write!(f, "[{element}]"),
            Matcher::Tuple(items) => {
                f.write_str("(")?;
                write_joined(f, items, ", ")?;
                f.write_str(")")
            }
            Matcher::Set(element) => write!(f, "<{element}>"),
            Matcher::DictKeyed { key, value } => write!(f, "{{{key}: {value}}}"),
            Matcher::DictFields(fields) => {
                f.write_str("{")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", field.name, field.matcher)?;
                }
                f.write_str("}")
            }
            Matcher::Named { name, .. } | Matcher::Unresolved(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests;
