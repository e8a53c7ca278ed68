//! Anno Check - evaluates matchers against runtime values.
//!
//! A mismatch is never an error: [`Checker::check`] returns a
//! [`CheckOutcome`] carrying a [`Diagnostic`], and escalating it is the
//! caller's decision.
//!
//! # Null Policy
//!
//! A null value is judged by [`CheckConfig::none_always_valid`] for every
//! matcher except unions (which ask their children) and named matchers
//! whose type set contains the null type (which test membership). So with
//! the flag off, `int|None` accepts null and `int` does not.

mod checker;
mod config;
mod diagnostic;

pub use checker::{accepts, check, CheckOutcome, Checker};
pub use config::CheckConfig;
pub use diagnostic::{Diagnostic, RETURN_SLOT};
