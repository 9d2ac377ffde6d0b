//! Injective, append-only rename map
//!
//! Entries are created once and never overwritten, and no two sources may
//! share a target. Either violation is a programming error and is reported
//! as `CfgError::RenameConflict`.

use rustc_hash::FxHashMap;
use std::fmt::Display;
use std::hash::Hash;

use crate::errors::{CfgError, Result};

#[derive(Debug, Clone)]
pub struct RenameMap<K, V> {
    forward: FxHashMap<K, V>,
    reverse: FxHashMap<V, K>,
}

impl<K, V> Default for RenameMap<K, V> {
    fn default() -> Self {
        Self {
            forward: FxHashMap::default(),
            reverse: FxHashMap::default(),
        }
    }
}

impl<K, V> RenameMap<K, V>
where
    K: Eq + Hash + Clone + Display,
    V: Eq + Hash + Clone + Display,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, source: &K) -> Option<&V> {
        self.forward.get(source)
    }

    /// Source currently mapped onto `target`, if any
    pub fn source_of(&self, target: &V) -> Option<&K> {
        self.reverse.get(target)
    }

    /// Record `source -> target`
    ///
    /// Re-inserting an identical pair is accepted.
    pub fn insert(&mut self, source: K, target: V) -> Result<()> {
        if let Some(current) = self.forward.get(&source) {
            if *current == target {
                return Ok(());
            }
            return Err(CfgError::rename_conflict(&source, &target, current));
        }
        if let Some(existing) = self.reverse.get(&target) {
            return Err(CfgError::rename_conflict(&source, &target, existing));
        }
        self.reverse.insert(target.clone(), source.clone());
        self.forward.insert(source, target);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.forward.iter()
    }
}
