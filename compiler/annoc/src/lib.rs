//! Annoc - runtime checking of documented type annotations.
//!
//! The engine crates do the real work:
//!
//! - `anno_value`: the runtime values being checked
//! - `anno_expr`: expression parsing, the type registry, the matcher cache
//! - `anno_check`: evaluating matchers and building diagnostics
//!
//! This crate ties them together behind an [`Engine`], reads declared types
//! out of doc comments, and guards calls with [`Guard`].
//!
//! # Example
//!
//! ```
//! use annoc::{CheckConfig, CollectingReporter, Engine, Guard, Value};
//!
//! let engine = Engine::new(CheckConfig::default());
//! let reporter = CollectingReporter::new();
//! let guard = Guard::builder("first")
//!     .doc("First element.\n\nxs ([int]): values.\n\nreturn (int|None): the head.\n")
//!     .param("xs")
//!     .build(&engine, &reporter)
//!     .unwrap_or_else(|err| panic!("{err}"));
//!
//! let head = guard.call(&[Value::list(vec![Value::int(4)])], |args| match &args[0] {
//!     Value::List(xs) => xs.first().cloned().unwrap_or(Value::None),
//!     _ => Value::None,
//! });
//! assert_eq!(head, Value::int(4));
//! assert!(reporter.is_empty());
//! ```

use std::sync::Once;

pub mod commands;
mod doc;
mod engine;
mod guard;

pub use anno_check::{CheckConfig, CheckOutcome, Diagnostic, RETURN_SLOT};
pub use anno_expr::{Matcher, ParseError, SharedTypeRegistry, TypeRegistry, TypeResolver};
pub use anno_value::{BuiltinType, ConcreteType, DeclaredType, Value};
pub use doc::{extract_expected_type, extract_return_type, RETURN_NAMES};
pub use engine::Engine;
pub use guard::{CollectingReporter, Guard, GuardBuilder, Reporter, TracingReporter, Warning};

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber once per process.
///
/// Does nothing unless `RUST_LOG` is set, so embedding programs keep control
/// of their own logging.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
