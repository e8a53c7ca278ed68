//! Structural parse errors.

/// Failure to compile an expression string.
///
/// All variants are structural: a malformed expression is never compiled
/// into a matcher. Unknown type names are not errors (they degrade to
/// `Matcher::Any`).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The index handed to the bracket matcher is out of range or does not
    /// point at an opening bracket.
    #[error("invalid index {index}: no opening bracket there in `{text}`")]
    InvalidIndex { text: String, index: usize },

    /// Mismatched closer or unterminated bracket.
    #[error("brackets not matched in `{text}`")]
    UnmatchedBrackets { text: String },

    /// The outer bracket closes before the end of the expression.
    #[error("syntax error in type `{text}`")]
    TrailingText { text: String },

    #[error("separator must be exactly one character, got `{separator}`")]
    InvalidSeparator { separator: String },

    /// A bare identifier contains a structural character.
    #[error("unexpected `{found}` in type name `{text}`")]
    UnexpectedCharacter { text: String, found: char },

    /// A dict entry that is not a single `left: right` pair.
    #[error("malformed dict entry `{entry}` in `{text}`")]
    MalformedEntry { text: String, entry: String },
}
