//! Call guards.
//!
//! A [`Guard`] wraps one callable by composition: it knows the callable's
//! parameter names and the matchers declared for them in its doc comment,
//! checks arguments before the call and the result after it, and hands any
//! problem to a [`Reporter`]. The wrapped callable itself is never changed.
//!
//! ```text
//! GuardBuilder::build ── defaults checked, missing docs reported
//!        │
//!        ▼
//! Guard::call(args, f)
//!    ├─ check args[i] (or the keyword named like param i) against param i
//!    ├─ ret = f(args)
//!    └─ check ret against the return slot, hand ret back
//! ```

use std::fmt;
use std::sync::Arc;

use anno_check::{Diagnostic, RETURN_SLOT};
use anno_expr::{Matcher, ParseError};
use anno_value::Value;
use parking_lot::Mutex;
use serde::Serialize;

use crate::{extract_expected_type, extract_return_type, Engine};

/// Something worth telling the user about a guarded callable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// A value did not match its declared type.
    Mismatch(Diagnostic),
    /// The callable has no doc comment.
    MissingDoc { entity: String },
    /// A parameter has no declared type.
    MissingType { entity: String, param: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::Mismatch(diagnostic) => fmt::Display::fmt(diagnostic, f),
            Warning::MissingDoc { entity } => write!(f, "Missing doc for `{entity}`."),
            Warning::MissingType { entity, param } => write!(
                f,
                "Missing type information for argument `{param}` in `{entity}`."
            ),
        }
    }
}

/// Sink for guard warnings.
pub trait Reporter: Send + Sync {
    fn report(&self, warning: Warning);
}

/// Logs every warning at `WARN` level.
#[derive(Copy, Clone, Debug, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, warning: Warning) {
        tracing::warn!("{warning}");
    }
}

/// Keeps warnings in memory for later inspection.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    warnings: Mutex<Vec<Warning>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.warnings.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.lock().is_empty()
    }

    /// Drain everything collected so far.
    pub fn take(&self) -> Vec<Warning> {
        std::mem::take(&mut *self.warnings.lock())
    }
}

impl Reporter for CollectingReporter {
    fn report(&self, warning: Warning) {
        self.warnings.lock().push(warning);
    }
}

struct Param {
    name: String,
    default: Option<Value>,
}

/// Describes a callable to guard. Finish with [`build`](Self::build).
pub struct GuardBuilder {
    entity: String,
    doc: Option<String>,
    params: Vec<Param>,
}

impl GuardBuilder {
    #[must_use]
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    #[must_use]
    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.params.push(Param {
            name: name.into(),
            default: None,
        });
        self
    }

    /// A parameter with a default value; the default is checked at build
    /// time.
    #[must_use]
    pub fn param_with_default(mut self, name: impl Into<String>, default: Value) -> Self {
        self.params.push(Param {
            name: name.into(),
            default: Some(default),
        });
        self
    }

    /// Compile the declared types and check defaults.
    ///
    /// # Errors
    ///
    /// Returns the first structural error among the declared expressions.
    #[tracing::instrument(level = "debug", skip_all, fields(entity = %self.entity))]
    pub fn build<'e>(
        self,
        engine: &'e Engine,
        reporter: &'e dyn Reporter,
    ) -> Result<Guard<'e>, ParseError> {
        let complain = engine.config().complain_for_missing_doc;
        let entity = self.entity;

        let Some(doc) = self.doc else {
            if complain {
                reporter.report(Warning::MissingDoc {
                    entity: entity.clone(),
                });
            } else {
                tracing::debug!(entity = %entity, "no doc; calls pass through unchecked");
            }
            let slots = self
                .params
                .into_iter()
                .map(|param| Slot {
                    name: param.name,
                    declared: None,
                })
                .collect();
            return Ok(Guard {
                engine,
                reporter,
                entity,
                params: slots,
                returns: None,
            });
        };

        let mut slots = Vec::with_capacity(self.params.len());
        for (i, param) in self.params.into_iter().enumerate() {
            let declared = match extract_expected_type(&doc, &param.name) {
                Some(text) => Some(Declared::parse(engine, text)?),
                None => {
                    let receiver = i == 0 && param.name == "self";
                    if complain && !receiver {
                        reporter.report(Warning::MissingType {
                            entity: entity.clone(),
                            param: param.name.clone(),
                        });
                    } else if !receiver {
                        tracing::debug!(entity = %entity, param = %param.name, "no declared type");
                    }
                    None
                }
            };
            if let (Some(declared), Some(default)) = (&declared, &param.default) {
                check_slot(engine, reporter, declared, default, &param.name, &entity);
            }
            slots.push(Slot {
                name: param.name,
                declared,
            });
        }

        let returns = extract_return_type(&doc)
            .map(|text| Declared::parse(engine, text))
            .transpose()?;

        Ok(Guard {
            engine,
            reporter,
            entity,
            params: slots,
            returns,
        })
    }
}

/// A declared type: the doc comment's text and what it compiled to.
struct Declared {
    text: Box<str>,
    matcher: Arc<Matcher>,
}

impl Declared {
    fn parse(engine: &Engine, text: &str) -> Result<Self, ParseError> {
        Ok(Declared {
            text: text.into(),
            matcher: engine.parse(text)?,
        })
    }
}

struct Slot {
    name: String,
    declared: Option<Declared>,
}

/// Checks calls of one callable against its declared types.
pub struct Guard<'e> {
    engine: &'e Engine,
    reporter: &'e dyn Reporter,
    entity: String,
    params: Vec<Slot>,
    returns: Option<Declared>,
}

impl Guard<'_> {
    /// Start describing the callable `entity`.
    pub fn builder(entity: impl Into<String>) -> GuardBuilder {
        GuardBuilder {
            entity: entity.into(),
            doc: None,
            params: Vec::new(),
        }
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// Check positional arguments. Extra arguments are ignored.
    ///
    /// Returns the number of mismatches reported.
    pub fn check_args(&self, args: &[Value]) -> usize {
        self.check_call(args, &[])
    }

    /// Check a call's arguments.
    ///
    /// Parameter `i` is checked against `args[i]` if present, otherwise
    /// against the keyword argument of the same name. Extra positionals and
    /// unknown keywords are ignored. Returns the number of mismatches
    /// reported.
    pub fn check_call(&self, args: &[Value], kwargs: &[(&str, Value)]) -> usize {
        let mut mismatches = 0;
        for (i, slot) in self.params.iter().enumerate() {
            let Some(declared) = &slot.declared else {
                continue;
            };
            let arg = args.get(i).or_else(|| {
                kwargs
                    .iter()
                    .find(|(name, _)| *name == slot.name)
                    .map(|(_, value)| value)
            });
            let Some(arg) = arg else {
                continue;
            };
            if !check_slot(self.engine, self.reporter, declared, arg, &slot.name, &self.entity) {
                mismatches += 1;
            }
        }
        mismatches
    }

    /// Check a return value. Returns whether it matched.
    pub fn check_return(&self, value: &Value) -> bool {
        match &self.returns {
            Some(declared) => check_slot(
                self.engine,
                self.reporter,
                declared,
                value,
                RETURN_SLOT,
                &self.entity,
            ),
            None => true,
        }
    }

    /// Check `args`, call `f`, check its result and return it unchanged.
    pub fn call<F>(&self, args: &[Value], f: F) -> Value
    where
        F: FnOnce(&[Value]) -> Value,
    {
        self.check_args(args);
        let result = f(args);
        self.check_return(&result);
        result
    }

    /// [`call`](Self::call) with keyword arguments as well.
    pub fn call_with_kwargs<F>(&self, args: &[Value], kwargs: &[(&str, Value)], f: F) -> Value
    where
        F: FnOnce(&[Value], &[(&str, Value)]) -> Value,
    {
        self.check_call(args, kwargs);
        let result = f(args, kwargs);
        self.check_return(&result);
        result
    }
}

fn check_slot(
    engine: &Engine,
    reporter: &dyn Reporter,
    declared: &Declared,
    value: &Value,
    slot: &str,
    entity: &str,
) -> bool {
    let outcome = engine.check_declared(&declared.text, &declared.matcher, value, slot, entity);
    if let Some(diagnostic) = outcome.diagnostic {
        reporter.report(Warning::Mismatch(diagnostic));
    }
    outcome.valid
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
