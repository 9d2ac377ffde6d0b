//! Literal-operand cache
//!
//! One cache per execution context. Values are keyed by the literal's
//! `OperandId`, so every copy of a literal operand (copy propagation, block
//! cloning, serialization round trips) observes the same cached value, while
//! two separately built literals with equal contents do not.

use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::trace;

use crate::shared::models::{Literal, OperandId};

/// Hit/miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LiteralCacheStats {
    pub hits: u64,
    pub misses: u64,
}

#[derive(Debug)]
pub struct LiteralCache<V> {
    entries: FxHashMap<OperandId, Arc<V>>,
    stats: LiteralCacheStats,
}

impl<V> Default for LiteralCache<V> {
    fn default() -> Self {
        Self {
            entries: FxHashMap::default(),
            stats: LiteralCacheStats::default(),
        }
    }
}

impl<V> LiteralCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached value for `literal`; `create` runs at most once per operand id
    pub fn get_or_create<F>(&mut self, literal: &Literal, create: F) -> Arc<V>
    where
        F: FnOnce(&Literal) -> V,
    {
        if let Some(value) = self.entries.get(&literal.id()) {
            self.stats.hits += 1;
            return Arc::clone(value);
        }
        self.stats.misses += 1;
        trace!("Creating cache object for literal {}", literal);
        let value = Arc::new(create(literal));
        self.entries.insert(literal.id(), Arc::clone(&value));
        value
    }

    pub fn get(&self, literal: &Literal) -> Option<Arc<V>> {
        self.entries.get(&literal.id()).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> LiteralCacheStats {
        self.stats
    }

    /// Drop every cached value (e.g. when the execution context is torn down)
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
