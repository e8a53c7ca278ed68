//! Mismatch diagnostics.

use std::fmt;

use anno_value::Value;
use serde::Serialize;

/// Slot name used for a callable's return value.
pub const RETURN_SLOT: &str = "__return__";

/// Structured description of a value that failed its matcher.
///
/// Which optional fields are present depends on the verbosity it was built
/// with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Callable (or other entity) the value belongs to.
    pub entity: String,
    /// Argument name, or [`RETURN_SLOT`].
    pub slot: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}

impl Diagnostic {
    /// Describe `value` failing the expression `expected`.
    pub fn mismatch(
        entity: &str,
        slot: &str,
        expected: &str,
        value: &Value,
        verbosity: u8,
    ) -> Self {
        let mut diagnostic = Diagnostic {
            entity: entity.to_owned(),
            slot: slot.to_owned(),
            expected: None,
            value: None,
            type_name: None,
        };
        if verbosity >= 1 {
            diagnostic.expected = Some(expected.to_owned());
        }
        if verbosity >= 2 {
            diagnostic.value = Some(value.to_string());
            diagnostic.type_name = Some(value.type_name().to_owned());
        }
        diagnostic
    }

    pub fn is_return(&self) -> bool {
        self.slot == RETURN_SLOT
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_return() {
            write!(f, "`{}` returned value with wrong type.", self.entity)?;
        } else {
            write!(
                f,
                "`{}` received value with wrong type for argument `{}`.",
                self.entity, self.slot
            )?;
        }
        if let Some(value) = &self.value {
            write!(f, "\nValue passed: `{value}`")?;
            if let Some(type_name) = &self.type_name {
                write!(f, ", of type `{type_name}`")?;
            }
            f.write_str(".")?;
        }
        if let Some(expected) = &self.expected {
            write!(f, "\nExpected type: `{expected}`.")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
