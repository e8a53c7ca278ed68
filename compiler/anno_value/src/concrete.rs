//! Concrete runtime types.
//!
//! A `ConcreteType` is what a type-expression identifier ultimately denotes:
//! either one of the runtime's builtin kinds or a type declared by the
//! embedding program. Declared types are compared by qualified path and may
//! name base types, so instance checks follow the base chain.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::Value;

/// Builtin kinds of the runtime.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BuiltinType {
    NoneType,
    Bool,
    Int,
    Float,
    Str,
    Bytes,
    List,
    Tuple,
    Set,
    Dict,
    Function,
    Method,
    /// Top type: every non-null value is an instance.
    Object,
}

impl BuiltinType {
    pub const ALL: [BuiltinType; 13] = [
        BuiltinType::NoneType,
        BuiltinType::Bool,
        BuiltinType::Int,
        BuiltinType::Float,
        BuiltinType::Str,
        BuiltinType::Bytes,
        BuiltinType::List,
        BuiltinType::Tuple,
        BuiltinType::Set,
        BuiltinType::Dict,
        BuiltinType::Function,
        BuiltinType::Method,
        BuiltinType::Object,
    ];

    /// The runtime name of this kind.
    pub fn name(self) -> &'static str {
        match self {
            BuiltinType::NoneType => "NoneType",
            BuiltinType::Bool => "bool",
            BuiltinType::Int => "int",
            BuiltinType::Float => "float",
            BuiltinType::Str => "str",
            BuiltinType::Bytes => "bytes",
            BuiltinType::List => "list",
            BuiltinType::Tuple => "tuple",
            BuiltinType::Set => "set",
            BuiltinType::Dict => "dict",
            BuiltinType::Function => "function",
            BuiltinType::Method => "method",
            BuiltinType::Object => "object",
        }
    }

    /// Look up a builtin kind by its runtime name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for BuiltinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

struct DeclaredInner {
    path: Box<str>,
    bases: Vec<DeclaredType>,
}

/// A type declared by the embedding program, identified by its dotted path.
///
/// Cheap to clone. Two declared types are equal iff their paths are equal.
#[derive(Clone)]
pub struct DeclaredType(Arc<DeclaredInner>);

impl DeclaredType {
    /// A declared type with no bases.
    pub fn new(path: impl Into<String>) -> Self {
        Self::with_bases(path, Vec::new())
    }

    /// A declared type deriving from `bases`.
    pub fn with_bases(path: impl Into<String>, bases: Vec<DeclaredType>) -> Self {
        DeclaredType(Arc::new(DeclaredInner {
            path: path.into().into_boxed_str(),
            bases,
        }))
    }

    /// Fully qualified path, e.g. `pkg.module.Name`.
    pub fn path(&self) -> &str {
        &self.0.path
    }

    /// Bare name: the last path segment.
    pub fn name(&self) -> &str {
        let path = self.path();
        path.rfind('.').map_or(path, |dot| &path[dot + 1..])
    }

    /// Module part of the path, if the type is qualified.
    pub fn bases(&self) -> &[DeclaredType] {
        &self.0.bases
    }

    /// Every dotted suffix of the path, longest first.
    ///
    /// `a.b.C` yields `a.b.C`, `b.C`, `C`.
    pub fn qualified_names(&self) -> impl Iterator<Item = &str> {
        let path = self.path();
        std::iter::once(0)
            .chain(path.match_indices('.').map(|(dot, _)| dot + 1))
            .map(move |start| &path[start..])
    }

    /// Whether `self` is `other` or derives from it, transitively.
    pub fn is_subtype_of(&self, other: &DeclaredType) -> bool {
        self == other || self.bases().iter().any(|base| base.is_subtype_of(other))
    }
}

impl PartialEq for DeclaredType {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.path == other.0.path
    }
}

impl Eq for DeclaredType {}

impl Hash for DeclaredType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.path.hash(state);
    }
}

impl fmt::Debug for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeclaredType({})", self.path())
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// The runtime type a value can be an instance of.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ConcreteType {
    Builtin(BuiltinType),
    Declared(DeclaredType),
}

impl ConcreteType {
    pub const NONE: ConcreteType = ConcreteType::Builtin(BuiltinType::NoneType);

    /// Instance test used by named matchers.
    pub fn is_instance(&self, value: &Value) -> bool {
        match self {
            ConcreteType::Builtin(BuiltinType::Object) => !value.is_none(),
            ConcreteType::Builtin(kind) => value.builtin_kind() == Some(*kind),
            ConcreteType::Declared(declared) => value
                .declared_type()
                .is_some_and(|own| own.is_subtype_of(declared)),
        }
    }

    /// Whether this is the null type.
    pub fn is_none_type(&self) -> bool {
        matches!(self, ConcreteType::Builtin(BuiltinType::NoneType))
    }
}

impl From<BuiltinType> for ConcreteType {
    fn from(kind: BuiltinType) -> Self {
        ConcreteType::Builtin(kind)
    }
}

impl From<DeclaredType> for ConcreteType {
    fn from(declared: DeclaredType) -> Self {
        ConcreteType::Declared(declared)
    }
}

impl fmt::Display for ConcreteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConcreteType::Builtin(kind) => fmt::Display::fmt(kind, f),
            ConcreteType::Declared(declared) => fmt::Display::fmt(declared, f),
        }
    }
}
