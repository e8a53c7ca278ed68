//! Matcher evaluation.

use anno_expr::{ensure_sufficient_stack, Matcher};
use anno_value::Value;

use crate::{CheckConfig, Diagnostic};

/// Result of checking one value against one matcher.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckOutcome {
    pub valid: bool,
    /// Present only when `valid` is false.
    pub diagnostic: Option<Diagnostic>,
}

impl CheckOutcome {
    pub fn valid() -> Self {
        CheckOutcome {
            valid: true,
            diagnostic: None,
        }
    }

    pub fn invalid(diagnostic: Diagnostic) -> Self {
        CheckOutcome {
            valid: false,
            diagnostic: Some(diagnostic),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

/// Evaluates matchers under a fixed [`CheckConfig`].
#[derive(Copy, Clone, Debug, Default)]
pub struct Checker {
    config: CheckConfig,
}

impl Checker {
    pub fn new(config: CheckConfig) -> Self {
        Checker { config }
    }

    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Check `value` and build a diagnostic on failure.
    ///
    /// Never fails: a mismatch is reported through the outcome. The
    /// diagnostic shows the matcher's canonical text; use
    /// [`check_declared`](Self::check_declared) when the source text is
    /// at hand.
    pub fn check(&self, matcher: &Matcher, value: &Value, slot: &str, entity: &str) -> CheckOutcome {
        if self.accepts(matcher, value) {
            return CheckOutcome::valid();
        }
        self.mismatch(&matcher.to_string(), value, slot, entity)
    }

    /// Like [`check`](Self::check), but the diagnostic quotes `declared`,
    /// the expression text `matcher` was compiled from.
    pub fn check_declared(
        &self,
        declared: &str,
        matcher: &Matcher,
        value: &Value,
        slot: &str,
        entity: &str,
    ) -> CheckOutcome {
        if self.accepts(matcher, value) {
            return CheckOutcome::valid();
        }
        self.mismatch(declared, value, slot, entity)
    }

    /// Whether `matcher` accepts `value`.
    pub fn accepts(&self, matcher: &Matcher, value: &Value) -> bool {
        ensure_sufficient_stack(|| self.accepts_inner(matcher, value))
    }

    fn mismatch(&self, expected: &str, value: &Value, slot: &str, entity: &str) -> CheckOutcome {
        tracing::debug!(entity, slot, expected, "type mismatch");
        CheckOutcome::invalid(Diagnostic::mismatch(
            entity,
            slot,
            expected,
            value,
            self.config.diagnostic_verbosity,
        ))
    }

    fn accepts_inner(&self, matcher: &Matcher, value: &Value) -> bool {
        match (matcher, value) {
            (Matcher::Union(children), _) => {
                children.iter().any(|child| self.accepts(child, value))
            }
            (Matcher::Named { types, .. }, _) if types.admits_none() => types.accepts(value),
            (_, Value::None) => self.config.none_always_valid,

            (Matcher::Any | Matcher::Unresolved(_), _) => true,
            (Matcher::Named { types, .. }, _) => types.accepts(value),
            (Matcher::List(element), Value::List(items))
            | (Matcher::Set(element), Value::Set(items)) => {
                items.iter().all(|item| self.accepts(element, item))
            }
            (Matcher::Tuple(matchers), Value::Tuple(items)) => {
                matchers.len() == items.len()
                    && matchers
                        .iter()
                        .zip(items.iter())
                        .all(|(matcher, item)| self.accepts(matcher, item))
            }
            (
                Matcher::DictKeyed {
                    key,
                    value: value_matcher,
                },
                Value::Dict(entries),
            ) => entries
                .iter()
                .all(|(k, v)| self.accepts(key, k) && self.accepts(value_matcher, v)),
            (Matcher::DictFields(fields), Value::Dict(_)) => fields.iter().all(|field| {
                value
                    .get_field(&field.name)
                    .is_some_and(|item| self.accepts(&field.matcher, item))
            }),
            _ => false,
        }
    }
}

/// Whether `matcher` accepts `value` under `config`.
pub fn accepts(matcher: &Matcher, value: &Value, config: &CheckConfig) -> bool {
    Checker::new(*config).accepts(matcher, value)
}

/// Check `value` under `config`; see [`Checker::check`].
pub fn check(
    matcher: &Matcher,
    value: &Value,
    slot: &str,
    entity: &str,
    config: &CheckConfig,
) -> CheckOutcome {
    Checker::new(*config).check(matcher, value, slot, entity)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
