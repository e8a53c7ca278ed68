//! Fallback resolution for names the registry does not know.

use anno_value::{BuiltinType, ConcreteType};

/// Injected capability that maps an identifier to a concrete type.
///
/// Consulted by the parser only after a registry miss. Resolution is
/// fallible by nature: returning `None` makes the identifier degrade to a
/// match-anything matcher.
pub trait TypeResolver: Send + Sync {
    fn resolve(&self, name: &str) -> Option<ConcreteType>;
}

impl<F> TypeResolver for F
where
    F: Fn(&str) -> Option<ConcreteType> + Send + Sync,
{
    fn resolve(&self, name: &str) -> Option<ConcreteType> {
        self(name)
    }
}

/// Resolves the runtime's builtin type names (`int`, `str`, `object`, ...).
#[derive(Copy, Clone, Debug, Default)]
pub struct BuiltinResolver;

impl TypeResolver for BuiltinResolver {
    fn resolve(&self, name: &str) -> Option<ConcreteType> {
        BuiltinType::from_name(name).map(ConcreteType::Builtin)
    }
}
