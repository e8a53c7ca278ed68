//! The checking engine.
//!
//! Ties the registry, the resolver, the matcher cache and the check
//! configuration together. An [`Engine`] is `Sync`; share it by reference
//! (or behind an `Arc`) between call sites.

use std::sync::Arc;

use anno_check::{CheckConfig, CheckOutcome, Checker};
use anno_expr::{
    CacheStamp, ExprParser, Matcher, MatcherCache, ParseError, SharedTypeRegistry, TypeResolver,
};
use anno_value::{ConcreteType, DeclaredType, Value};
use dashmap::DashSet;
use parking_lot::RwLock;

/// The installed resolver and how many times it has been replaced.
#[derive(Default)]
struct ResolverSlot {
    epoch: u64,
    resolver: Option<Arc<dyn TypeResolver>>,
}

pub struct Engine {
    registry: SharedTypeRegistry,
    resolver: RwLock<ResolverSlot>,
    cache: MatcherCache,
    config: CheckConfig,
    /// Unresolved names already warned about in this run.
    reported: DashSet<Box<str>>,
}

impl Engine {
    /// Engine over the process-wide registry.
    pub fn new(config: CheckConfig) -> Self {
        Self::with_registry(SharedTypeRegistry::global().clone(), config)
    }

    pub fn with_registry(registry: SharedTypeRegistry, config: CheckConfig) -> Self {
        Engine {
            registry,
            resolver: RwLock::new(ResolverSlot::default()),
            cache: MatcherCache::new(),
            config,
            reported: DashSet::new(),
        }
    }

    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    pub fn registry(&self) -> &SharedTypeRegistry {
        &self.registry
    }

    /// Compile `text`, reusing the cached matcher when neither the registry
    /// nor the resolver has changed since it was built.
    ///
    /// No lock is held while the resolver runs, so a resolver may register
    /// the types it finds.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn parse(&self, text: &str) -> Result<Arc<Matcher>, ParseError> {
        let (epoch, resolver) = {
            let slot = self.resolver.read();
            (slot.epoch, slot.resolver.clone())
        };
        let stamp = CacheStamp::new(self.registry.generation(), epoch);
        let mut unresolved = Vec::new();

        let matcher = self.cache.get_or_try_insert_with(text, stamp, || {
            let registry = self.registry.read().clone();
            let mut parser = ExprParser::new(&registry);
            if let Some(resolver) = resolver.as_deref() {
                parser = parser.with_resolver(resolver);
            }
            let matcher = parser.parse(text)?;
            unresolved = parser.into_unresolved();
            Ok(matcher)
        })?;

        for name in unresolved {
            self.report_unresolved(&name);
        }
        Ok(matcher)
    }

    /// Check `value` against an already compiled matcher.
    pub fn check(&self, matcher: &Matcher, value: &Value, slot: &str, entity: &str) -> CheckOutcome {
        Checker::new(self.config).check(matcher, value, slot, entity)
    }

    /// Check `value` against `matcher`, quoting `declared` (the text it was
    /// compiled from) in any diagnostic.
    pub fn check_declared(
        &self,
        declared: &str,
        matcher: &Matcher,
        value: &Value,
        slot: &str,
        entity: &str,
    ) -> CheckOutcome {
        Checker::new(self.config).check_declared(declared, matcher, value, slot, entity)
    }

    /// Compile `text` and check `value` against it.
    pub fn check_expr(
        &self,
        text: &str,
        value: &Value,
        slot: &str,
        entity: &str,
    ) -> Result<CheckOutcome, ParseError> {
        let matcher = self.parse(text)?;
        Ok(self.check_declared(text.trim(), &matcher, value, slot, entity))
    }

    /// Add `ty` under `name`. Returns `false` if it was already there.
    pub fn register_type(&self, name: &str, ty: impl Into<ConcreteType>) -> bool {
        self.registry.register(name, ty.into())
    }

    /// Register `declared` under its bare name and every qualified suffix.
    pub fn register_declared(&self, declared: &DeclaredType) -> usize {
        self.registry.register_declared(declared)
    }

    /// Install the fallback resolver for names the registry lacks.
    ///
    /// Matchers built under the previous resolver stop being served, even
    /// those a concurrent [`parse`](Self::parse) stores after this returns.
    pub fn set_resolver(&self, resolver: impl TypeResolver + 'static) {
        let resolver: Arc<dyn TypeResolver> = Arc::new(resolver);
        self.replace_resolver(Some(resolver));
    }

    pub fn clear_resolver(&self) {
        self.replace_resolver(None);
    }

    fn replace_resolver(&self, resolver: Option<Arc<dyn TypeResolver>>) {
        {
            let mut slot = self.resolver.write();
            slot.epoch += 1;
            slot.resolver = resolver;
        }
        self.cache.clear();
    }

    /// Start a new checking run: unresolved names will be reported again.
    pub fn reset_run(&self) {
        self.reported.clear();
        // Cache hits do not re-report, so force a rebuild.
        self.cache.clear();
    }

    /// Names reported as unresolved in the current run, sorted.
    pub fn unresolved_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.reported.iter().map(|name| name.key().to_string()).collect();
        names.sort_unstable();
        names
    }

    fn report_unresolved(&self, name: &str) {
        if self.reported.insert(name.into()) {
            tracing::warn!(name, "type name not found; matching anything");
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(CheckConfig::default())
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
