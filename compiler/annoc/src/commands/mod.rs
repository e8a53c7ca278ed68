//! Command handlers for the `annoc` CLI.
//!
//! Handlers return what they produced instead of printing, so `main` owns
//! all terminal output and exit codes.

use anno_check::CheckConfig;
use anno_expr::ParseError;

mod check;
mod json;
mod parse;

pub use check::{check_value, render_outcome};
pub use json::value_from_json;
pub use parse::{describe_matcher, parse_expr};

/// Failure of a CLI command.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("invalid JSON value: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid option `{0}`")]
    InvalidOption(String),
}

/// Options shared by all commands.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub config: CheckConfig,
    /// Emit diagnostics as JSON.
    pub json: bool,
}

impl CliOptions {
    /// Split `args` into options and positional arguments.
    ///
    /// Recognized flags: `--none-valid`, `--verbosity=N`, `--json`.
    pub fn parse(args: &[String]) -> Result<(CliOptions, Vec<&str>), CommandError> {
        let mut options = CliOptions::default();
        let mut positional = Vec::new();

        for arg in args {
            if arg == "--none-valid" {
                options.config.none_always_valid = true;
            } else if arg == "--json" {
                options.json = true;
            } else if let Some(level) = arg.strip_prefix("--verbosity=") {
                options.config.diagnostic_verbosity = level
                    .parse()
                    .map_err(|_| CommandError::InvalidOption(arg.clone()))?;
            } else if arg.starts_with("--") {
                return Err(CommandError::InvalidOption(arg.clone()));
            } else {
                positional.push(arg.as_str());
            }
        }
        Ok((options, positional))
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
