//! Named-type registry.
//!
//! Maps a type name, bare or dotted-qualified, to the set of concrete types
//! it may denote. Registration only ever adds: several concrete types may
//! accumulate under one name and nothing is removed during normal operation.
//!
//! # Sharing
//!
//! The registry is process-wide state. [`SharedTypeRegistry`] wraps it in
//! `Arc<RwLock>` so lookups from many call sites can proceed concurrently
//! while a discovery pass serializes its writes. Every registration that
//! adds something bumps [`TypeRegistry::generation`], which the matcher
//! cache uses to notice stale entries.

use std::fmt;
use std::sync::{Arc, OnceLock};

use anno_value::{BuiltinType, ConcreteType, DeclaredType, Value};
use rustc_hash::FxHashMap;

/// The concrete types one name may denote.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeSet(Vec<ConcreteType>);

impl TypeSet {
    pub fn new() -> Self {
        TypeSet(Vec::new())
    }

    pub fn single(ty: ConcreteType) -> Self {
        TypeSet(vec![ty])
    }

    /// Union-add. Returns `false` if `ty` was already a member.
    pub fn insert(&mut self, ty: ConcreteType) -> bool {
        if self.0.contains(&ty) {
            return false;
        }
        self.0.push(ty);
        true
    }

    pub fn contains(&self, ty: &ConcreteType) -> bool {
        self.0.contains(ty)
    }

    /// Whether `value` is an instance of any member.
    pub fn accepts(&self, value: &Value) -> bool {
        self.0.iter().any(|ty| ty.is_instance(value))
    }

    /// Whether the null type is a member.
    pub fn admits_none(&self) -> bool {
        self.0.iter().any(ConcreteType::is_none_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConcreteType> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<ConcreteType> for TypeSet {
    fn from_iter<I: IntoIterator<Item = ConcreteType>>(iter: I) -> Self {
        let mut set = TypeSet::new();
        for ty in iter {
            set.insert(ty);
        }
        set
    }
}

/// Name to concrete-type-set mapping.
#[derive(Clone, Debug)]
pub struct TypeRegistry {
    entries: FxHashMap<Box<str>, TypeSet>,
    generation: u64,
}

impl TypeRegistry {
    /// A registry with no names at all.
    pub fn empty() -> Self {
        TypeRegistry {
            entries: FxHashMap::default(),
            generation: 0,
        }
    }

    /// A registry seeded with the builtin aliases.
    ///
    /// - `function`: free functions and bound methods
    /// - `string`: text strings
    /// - `None`: the null type
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register("function", BuiltinType::Function.into());
        registry.register("function", BuiltinType::Method.into());
        registry.register("string", BuiltinType::Str.into());
        registry.register("None", ConcreteType::NONE);
        registry
    }

    /// Add `ty` to the set registered under `name`.
    ///
    /// Idempotent: returns `false` and leaves the generation untouched when
    /// the pair is already present.
    pub fn register(&mut self, name: &str, ty: ConcreteType) -> bool {
        let set = self.entries.entry(name.into()).or_default();
        if !set.insert(ty) {
            return false;
        }
        tracing::trace!(name, "registered type name");
        self.generation += 1;
        true
    }

    /// Register a declared type under its bare name and every dotted suffix
    /// of its qualified path.
    ///
    /// Returns how many (name, type) pairs were new.
    pub fn register_declared(&mut self, declared: &DeclaredType) -> usize {
        let ty = ConcreteType::Declared(declared.clone());
        declared
            .qualified_names()
            .filter(|name| self.register(name, ty.clone()))
            .count()
    }

    pub fn lookup(&self, name: &str) -> Option<&TypeSet> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Counter bumped by every registration that changed the registry.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|name| &**name)
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

/// Thread-safe handle to a [`TypeRegistry`].
///
/// Cloning shares the same registry.
pub struct SharedTypeRegistry(Arc<parking_lot::RwLock<TypeRegistry>>);

static GLOBAL: OnceLock<SharedTypeRegistry> = OnceLock::new();

impl SharedTypeRegistry {
    pub fn new(registry: TypeRegistry) -> Self {
        SharedTypeRegistry(Arc::new(parking_lot::RwLock::new(registry)))
    }

    /// The process-wide registry, seeded with the builtin aliases on first
    /// use.
    pub fn global() -> &'static SharedTypeRegistry {
        GLOBAL.get_or_init(|| SharedTypeRegistry::new(TypeRegistry::with_builtins()))
    }

    /// Get read access to the registry.
    pub fn read(&self) -> parking_lot::RwLockReadGuard<'_, TypeRegistry> {
        self.0.read()
    }

    /// Get write access to the registry.
    pub fn write(&self) -> parking_lot::RwLockWriteGuard<'_, TypeRegistry> {
        self.0.write()
    }

    /// See [`TypeRegistry::register`].
    pub fn register(&self, name: &str, ty: ConcreteType) -> bool {
        self.write().register(name, ty)
    }

    /// See [`TypeRegistry::register_declared`].
    pub fn register_declared(&self, declared: &DeclaredType) -> usize {
        let added = self.write().register_declared(declared);
        tracing::debug!(path = declared.path(), added, "registered declared type");
        added
    }

    pub fn generation(&self) -> u64 {
        self.read().generation()
    }
}

impl Clone for SharedTypeRegistry {
    fn clone(&self) -> Self {
        SharedTypeRegistry(Arc::clone(&self.0))
    }
}

impl Default for SharedTypeRegistry {
    fn default() -> Self {
        Self::new(TypeRegistry::with_builtins())
    }
}

impl fmt::Debug for SharedTypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedTypeRegistry({:?})", &*self.0.read())
    }
}
