//! Runtime values.

use std::fmt::{self, Write as _};
use std::sync::Arc;

use crate::{BuiltinType, DeclaredType};

/// A dynamically typed runtime value.
///
/// Payloads are shared, so cloning a value never deep-copies its contents.
/// Values are not `Eq + Hash` (floats), so sets and dicts enforce member
/// uniqueness in their constructors instead of in the container type.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// The null sentinel.
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Arc<str>),
    Bytes(Arc<[u8]>),
    /// Ordered, homogeneous-by-convention sequence.
    List(Arc<[Value]>),
    /// Fixed-size ordered sequence.
    Tuple(Arc<[Value]>),
    /// Unordered collection of unique members.
    Set(Arc<[Value]>),
    /// Associative container, in insertion order, with unique keys.
    Dict(Arc<[(Value, Value)]>),
    /// Free function, by name.
    Function(Arc<str>),
    /// Bound method, by qualified name.
    Method(Arc<str>),
    /// Instance of a declared type.
    Object(DeclaredType),
}

// Constructors

impl Value {
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    #[inline]
    pub fn float(x: f64) -> Self {
        Value::Float(x)
    }

    #[inline]
    pub fn bool(b: bool) -> Self {
        Value::Bool(b)
    }

    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        let s: String = s.into();
        Value::Str(s.into())
    }

    #[inline]
    pub fn bytes(b: impl Into<Vec<u8>>) -> Self {
        let b: Vec<u8> = b.into();
        Value::Bytes(b.into())
    }

    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(items.into())
    }

    #[inline]
    pub fn tuple(items: Vec<Value>) -> Self {
        Value::Tuple(items.into())
    }

    /// Create a set value. Duplicate members are dropped, first one wins.
    pub fn set(items: Vec<Value>) -> Self {
        let mut members: Vec<Value> = Vec::with_capacity(items.len());
        for item in items {
            if !members.contains(&item) {
                members.push(item);
            }
        }
        Value::Set(members.into())
    }

    /// Create a dict value.
    ///
    /// Insertion order is kept; a later entry with an equal key overwrites
    /// the earlier value in place.
    pub fn dict(entries: Vec<(Value, Value)>) -> Self {
        let mut unique: Vec<(Value, Value)> = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            match unique.iter_mut().find(|(existing, _)| *existing == key) {
                Some(slot) => slot.1 = value,
                None => unique.push((key, value)),
            }
        }
        Value::Dict(unique.into())
    }

    pub fn function(name: impl Into<String>) -> Self {
        let name: String = name.into();
        Value::Function(name.into())
    }

    pub fn method(qualified_name: impl Into<String>) -> Self {
        let qualified_name: String = qualified_name.into();
        Value::Method(qualified_name.into())
    }

    /// An instance of `class`.
    pub fn object(class: &DeclaredType) -> Self {
        Value::Object(class.clone())
    }
}

// Queries

impl Value {
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Builtin kind of this value, `None` for instances of declared types.
    pub fn builtin_kind(&self) -> Option<BuiltinType> {
        let kind = match self {
            Value::None => BuiltinType::NoneType,
            Value::Bool(_) => BuiltinType::Bool,
            Value::Int(_) => BuiltinType::Int,
            Value::Float(_) => BuiltinType::Float,
            Value::Str(_) => BuiltinType::Str,
            Value::Bytes(_) => BuiltinType::Bytes,
            Value::List(_) => BuiltinType::List,
            Value::Tuple(_) => BuiltinType::Tuple,
            Value::Set(_) => BuiltinType::Set,
            Value::Dict(_) => BuiltinType::Dict,
            Value::Function(_) => BuiltinType::Function,
            Value::Method(_) => BuiltinType::Method,
            Value::Object(_) => return None,
        };
        Some(kind)
    }

    /// Declared type of an object value.
    pub fn declared_type(&self) -> Option<&DeclaredType> {
        match self {
            Value::Object(class) => Some(class),
            _ => None,
        }
    }

    /// Short name of the value's concrete type, as shown in diagnostics.
    pub fn type_name(&self) -> &str {
        match (self.builtin_kind(), self) {
            (Some(kind), _) => kind.name(),
            (None, Value::Object(class)) => class.name(),
            (None, _) => "object",
        }
    }

    /// Value stored under `key`, for dict values.
    pub fn get(&self, key: &Value) -> Option<&Value> {
        match self {
            Value::Dict(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Value stored under the string key `key`, for dict values.
    pub fn get_field(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Dict(entries) => entries
                .iter()
                .find(|(k, _)| matches!(k, Value::Str(s) if &**s == key))
                .map(|(_, v)| v),
            _ => None,
        }
    }
}

// Textual form

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_char('\'')?;
    for c in s.chars() {
        match c {
            '\'' => f.write_str("\\'")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            _ => f.write_char(c)?,
        }
    }
    f.write_char('\'')
}

fn write_seq(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) if x.is_nan() => f.write_str("nan"),
            Value::Float(x) if x.is_infinite() => {
                f.write_str(if *x > 0.0 { "inf" } else { "-inf" })
            }
            Value::Float(x) if x.fract() == 0.0 => write!(f, "{x:.1}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write_quoted(f, s),
            Value::Bytes(b) => {
                f.write_str("b'")?;
                for byte in b.iter() {
                    write!(f, "{}", std::ascii::escape_default(*byte))?;
                }
                f.write_char('\'')
            }
            Value::List(items) => {
                f.write_char('[')?;
                write_seq(f, items)?;
                f.write_char(']')
            }
            Value::Tuple(items) => {
                f.write_char('(')?;
                write_seq(f, items)?;
                if items.len() == 1 {
                    f.write_char(',')?;
                }
                f.write_char(')')
            }
            Value::Set(items) if items.is_empty() => f.write_str("set()"),
            Value::Set(items) => {
                f.write_char('{')?;
                write_seq(f, items)?;
                f.write_char('}')
            }
            Value::Dict(entries) => {
                f.write_char('{')?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_char('}')
            }
            Value::Function(name) => write!(f, "<function {name}>"),
            Value::Method(name) => write!(f, "<method {name}>"),
            Value::Object(class) => write!(f, "<{} object>", class.path()),
        }
    }
}
