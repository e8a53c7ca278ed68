//! Anno Value - runtime values checked against type expressions.
//!
//! The annotation engine validates values whose shapes are declared as free
//! text, so it needs a dynamically typed value model to check against. This
//! crate provides:
//! - `Value`, the dynamically typed runtime value
//! - `ConcreteType`, the runtime type a value is an instance of
//!
//! # Construction
//!
//! Sets and dicts drop duplicate members when built:
//!
//! ```text
//! let xs = Value::list(vec![Value::int(1), Value::int(2)]);
//! let point = Value::dict(vec![(Value::string("x"), Value::int(1))]);
//! let tags = Value::set(vec![Value::string("a"), Value::string("a")]); // one member
//! ```

mod concrete;
mod value;

pub use concrete::{BuiltinType, ConcreteType, DeclaredType};
pub use value::Value;
