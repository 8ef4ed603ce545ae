//! Shared memo of per-pattern derivations.
//!
//! Scanning a pattern for placeholders is pure and depends only on the
//! pattern text and the formatter's length bound, so it is done once per
//! distinct pattern and shared by every pass and every thread that holds the
//! registry.

use std::hash::Hash;
use std::sync::Arc;

use holdgen_core::{ArtifactHash, SubstitutionMap};
use holdgen_template::{Coverage, PatternFormatter, Placeholder};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// A concurrent keyed cache: each key's value is derived at most once.
///
/// Two threads racing on the same missing key may both run the derivation;
/// the first insert wins and both callers receive the stored value.
#[derive(Debug)]
pub struct DerivationCache<K, V: ?Sized> {
    entries: RwLock<FxHashMap<K, Arc<V>>>,
}

impl<K, V: ?Sized> Default for DerivationCache<K, V> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(FxHashMap::default()),
        }
    }
}

impl<K: Eq + Hash, V: ?Sized> DerivationCache<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value for `key`, deriving it with `derive` if absent.
    pub fn get_or_derive(&self, key: K, derive: impl FnOnce() -> Arc<V>) -> Arc<V> {
        if let Some(found) = self.entries.read().get(&key) {
            return Arc::clone(found);
        }
        let derived = derive();
        Arc::clone(self.entries.write().entry(key).or_insert(derived))
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

/// Memoised placeholder scans, keyed by pattern hash and length bound.
#[derive(Debug, Default)]
pub struct PatternRegistry {
    scans: DerivationCache<(ArtifactHash, usize), [Placeholder]>,
}

impl PatternRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Placeholders `formatter` would try to resolve in `pattern`.
    pub fn placeholders(&self, pattern: &str, formatter: PatternFormatter) -> Arc<[Placeholder]> {
        let key = (
            ArtifactHash::from_pattern(pattern),
            formatter.max_placeholder_len(),
        );
        self.scans
            .get_or_derive(key, || Arc::from(formatter.scan(pattern)))
    }

    /// Check `values` against the placeholders of `pattern`.
    pub fn coverage(
        &self,
        pattern: &str,
        formatter: PatternFormatter,
        values: &SubstitutionMap,
    ) -> Coverage {
        Coverage::check(&self.placeholders(pattern, formatter), values)
    }

    /// Number of distinct patterns scanned so far.
    pub fn len(&self) -> usize {
        self.scans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scans.is_empty()
    }
}
