//! `annoc check`: check a JSON value against an expression.

use anno_check::CheckOutcome;

use super::{value_from_json, CliOptions, CommandError};
use crate::Engine;

/// Entity name used in diagnostics produced by the CLI.
const CLI_ENTITY: &str = "annoc";

/// Check the JSON document `value` against the expression `text`.
#[tracing::instrument(level = "debug", skip(engine, value))]
pub fn check_value(engine: &Engine, text: &str, value: &str) -> Result<CheckOutcome, CommandError> {
    let json: serde_json::Value = serde_json::from_str(value)?;
    let value = value_from_json(&json);
    Ok(engine.check_expr(text, &value, "value", CLI_ENTITY)?)
}

/// Render an outcome for the terminal, or as JSON with `--json`.
pub fn render_outcome(outcome: &CheckOutcome, options: &CliOptions) -> Result<String, CommandError> {
    let Some(diagnostic) = &outcome.diagnostic else {
        return Ok(if options.json {
            serde_json::json!({ "valid": true }).to_string()
        } else {
            "ok".to_string()
        });
    };
    if options.json {
        let diagnostic = serde_json::to_value(diagnostic)?;
        Ok(serde_json::json!({ "valid": false, "diagnostic": diagnostic }).to_string())
    } else {
        Ok(diagnostic.to_string())
    }
}
