//! Concurrent cache of parsed expressions.
//!
//! Identical expression text always compiles to behaviorally identical
//! matchers for a fixed registry state, so parse results are memoized by raw
//! text. Each entry is stamped with the registry generation and resolver
//! epoch it was built under; an entry with any other stamp is treated as a
//! miss and rebuilt.

use std::sync::Arc;

use dashmap::DashMap;

use crate::{Matcher, ParseError};

/// What a cached matcher was built against.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStamp {
    /// [`TypeRegistry::generation`](crate::TypeRegistry::generation).
    pub registry: u64,
    /// Bumped by the owner whenever the resolver changes.
    pub resolver: u64,
}

impl CacheStamp {
    pub fn new(registry: u64, resolver: u64) -> Self {
        CacheStamp { registry, resolver }
    }
}

struct Entry {
    stamp: CacheStamp,
    matcher: Arc<Matcher>,
}

/// Thread-safe memo from expression text to compiled matcher.
#[derive(Default)]
pub struct MatcherCache {
    entries: DashMap<Box<str>, Entry>,
}

impl MatcherCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached matcher for `text`, or build and store one.
    ///
    /// Parse failures are returned and not cached.
    pub fn get_or_try_insert_with<F>(
        &self,
        text: &str,
        stamp: CacheStamp,
        build: F,
    ) -> Result<Arc<Matcher>, ParseError>
    where
        F: FnOnce() -> Result<Matcher, ParseError>,
    {
        if let Some(hit) = self.get(text, stamp) {
            tracing::trace!(text, "matcher cache hit");
            return Ok(hit);
        }

        let matcher = Arc::new(build()?);
        self.entries.insert(
            text.into(),
            Entry {
                stamp,
                matcher: Arc::clone(&matcher),
            },
        );
        Ok(matcher)
    }

    /// Cached matcher for `text` if it was built under `stamp`.
    pub fn get(&self, text: &str, stamp: CacheStamp) -> Option<Arc<Matcher>> {
        self.entries
            .get(text)
            .filter(|entry| entry.stamp == stamp)
            .map(|entry| Arc::clone(&entry.matcher))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
