//! Recursive-descent expression parser.
//!
//! Each step works on a trimmed substring:
//!
//! 1. Empty text is [`Matcher::Any`].
//! 2. Text with more than one `|` alternative at depth zero is a union.
//! 3. Text starting with an opener must be closed by its last character;
//!    the bracket kind picks list, tuple, set or dict.
//! 4. Anything else is an identifier, looked up in the registry, then the
//!    injected resolver, then the builtin names. A name found nowhere
//!    becomes [`Matcher::Unresolved`] and matches anything.

use anno_value::ConcreteType;

use crate::{
    ensure_sufficient_stack, find_closing_bracket, split_top_level, BracketKind,
    BuiltinResolver, Field, Matcher, ParseError, TypeRegistry, TypeResolver, TypeSet,
    STRUCTURAL_CHARS,
};

/// Parser bound to a registry snapshot and an optional resolver.
///
/// Identifiers that resolve nowhere are collected in
/// [`unresolved`](Self::unresolved) so the caller can report them.
pub struct ExprParser<'a> {
    registry: &'a TypeRegistry,
    resolver: Option<&'a dyn TypeResolver>,
    unresolved: Vec<String>,
}

impl<'a> ExprParser<'a> {
    pub fn new(registry: &'a TypeRegistry) -> Self {
        ExprParser {
            registry,
            resolver: None,
            unresolved: Vec::new(),
        }
    }

    /// Consult `resolver` for names the registry lacks.
    #[must_use]
    pub fn with_resolver(mut self, resolver: &'a dyn TypeResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Compile `text` into a matcher.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn parse(&mut self, text: &str) -> Result<Matcher, ParseError> {
        self.parse_expr(text)
    }

    /// Distinct identifiers that resolved nowhere, in first-seen order.
    pub fn unresolved(&self) -> &[String] {
        &self.unresolved
    }

    pub fn into_unresolved(self) -> Vec<String> {
        self.unresolved
    }

    fn parse_expr(&mut self, text: &str) -> Result<Matcher, ParseError> {
        ensure_sufficient_stack(|| {
            let text = text.trim();
            if text.is_empty() {
                return Ok(Matcher::Any);
            }

            let alternatives = split_top_level(text, "|")?;
            if alternatives.len() > 1 {
                let children = alternatives
                    .into_iter()
                    .map(|alternative| self.parse_expr(alternative))
                    .collect::<Result<Vec<_>, _>>()?;
                return Ok(Matcher::Union(children));
            }

            match text.chars().next().and_then(BracketKind::from_open) {
                Some(kind) => self.parse_bracketed(text, kind),
                None => self.parse_name(text),
            }
        })
    }

    fn parse_bracketed(&mut self, text: &str, kind: BracketKind) -> Result<Matcher, ParseError> {
        let end = find_closing_bracket(text, 0)?;
        // Closers are one byte wide.
        if end + 1 != text.len() {
            return Err(ParseError::TrailingText {
                text: text.to_owned(),
            });
        }
        let inner = &text[1..end];

        match kind {
            BracketKind::Square => Ok(Matcher::List(Box::new(self.parse_expr(inner)?))),
            BracketKind::Angle => Ok(Matcher::Set(Box::new(self.parse_expr(inner)?))),
            BracketKind::Round => {
                let items = split_top_level(inner, ",")?
                    .into_iter()
                    .map(|item| self.parse_expr(item))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Matcher::Tuple(items))
            }
            BracketKind::Curly => self.parse_dict(text, inner),
        }
    }

    /// Dict bodies: one `key: value` pair is a homogeneous map, any other
    /// count is a record of named fields.
    fn parse_dict(&mut self, text: &str, inner: &str) -> Result<Matcher, ParseError> {
        let mut pairs = Vec::new();
        for entry in split_top_level(inner, ",")? {
            match split_top_level(entry, ":")?.as_slice() {
                [left, right] => pairs.push((*left, *right)),
                _ => {
                    return Err(ParseError::MalformedEntry {
                        text: text.to_owned(),
                        entry: entry.to_owned(),
                    })
                }
            }
        }

        if let [(key, value)] = pairs.as_slice() {
            return Ok(Matcher::DictKeyed {
                key: Box::new(self.parse_expr(key)?),
                value: Box::new(self.parse_expr(value)?),
            });
        }

        let fields = pairs
            .into_iter()
            .map(|(name, ty)| {
                Ok(Field {
                    name: name.into(),
                    matcher: self.parse_expr(ty)?,
                })
            })
            .collect::<Result<Vec<_>, ParseError>>()?;
        Ok(Matcher::DictFields(fields))
    }

    fn parse_name(&mut self, name: &str) -> Result<Matcher, ParseError> {
        if let Some(found) = name.chars().find(|c| STRUCTURAL_CHARS.contains(*c)) {
            return Err(ParseError::UnexpectedCharacter {
                text: name.to_owned(),
                found,
            });
        }

        if let Some(types) = self.registry.lookup(name) {
            return Ok(named(name, types.clone()));
        }

        let resolved: Option<ConcreteType> = self
            .resolver
            .and_then(|resolver| resolver.resolve(name))
            .or_else(|| BuiltinResolver.resolve(name));
        if let Some(ty) = resolved {
            tracing::trace!(name, %ty, "resolved type name outside the registry");
            return Ok(named(name, TypeSet::single(ty)));
        }

        tracing::debug!(name, "unresolved type name, matching anything");
        if !self.unresolved.iter().any(|seen| seen == name) {
            self.unresolved.push(name.to_owned());
        }
        Ok(Matcher::Unresolved(name.into()))
    }
}

fn named(name: &str, types: TypeSet) -> Matcher {
    Matcher::Named {
        name: name.into(),
        types,
    }
}

/// Parse `text` against `registry` with builtin-name fallback only.
pub fn parse(text: &str, registry: &TypeRegistry) -> Result<Matcher, ParseError> {
    ExprParser::new(registry).parse(text)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
