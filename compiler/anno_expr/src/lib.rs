//! Anno Expr - the type-expression engine front half.
//!
//! Compiles short annotation strings such as `[int]`, `(int, str)`,
//! `{x: int, y: str}` or `int|None` into immutable [`Matcher`] trees.
//!
//! # Grammar
//!
//! ```text
//! expr   := union
//! union  := atom ('|' atom)*
//! atom   := '' | list | tuple | set | dict | ident
//! list   := '[' expr ']'
//! tuple  := '(' expr (',' expr)* ')'
//! set    := '<' expr '>'
//! dict   := '{' pair (',' pair)* '}'
//! pair   := token ':' expr
//! ident  := any run of characters excluding '|[](){}<>,:'
//! ```
//!
//! A dict body with exactly one pair is a homogeneous map (`{int: str}`);
//! any other number of pairs is a fixed-field record (`{x: int, y: str}`).
//!
//! # Components
//!
//! - [`find_closing_bracket`] and [`split_top_level`]: depth-aware scanning
//! - [`TypeRegistry`]: name to concrete-type-set mapping
//! - [`TypeResolver`]: injected fallback for names the registry lacks
//! - [`ExprParser`]: recursive descent from text to [`Matcher`]
//! - [`MatcherCache`]: concurrent memo of parsed expressions

mod brackets;
mod cache;
mod error;
mod matcher;
mod parser;
mod registry;
mod resolver;
mod split;
mod stack;

pub use brackets::{find_closing_bracket, BracketKind};
pub use cache::{CacheStamp, MatcherCache};
pub use error::ParseError;
pub use matcher::{Field, Matcher};
pub use parser::{parse, ExprParser};
pub use registry::{SharedTypeRegistry, TypeRegistry, TypeSet};
pub use resolver::{BuiltinResolver, TypeResolver};
pub use split::split_top_level;
pub use stack::ensure_sufficient_stack;

/// Characters that may not appear in a bare identifier.
pub const STRUCTURAL_CHARS: &str = "|[](){}<>,:";
