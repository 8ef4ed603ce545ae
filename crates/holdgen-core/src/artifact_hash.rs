//! Deterministic hash-based artifact identity.
//!
//! [`ArtifactHash`] is a 64-bit hash computed from the inputs that define a
//! generated artifact: its identity string, its kind, and the contents of its
//! substitution map. Hashes are stable across processes, so they can be used
//! to key caches that outlive a single generation pass.
//!
//! # Hash Computation
//!
//! Uses XXHash64 with domain-specific mixing constants so that an identity,
//! a substitution entry and a pattern text never collide just because they
//! share the same bytes.
//!
//! Substitution entries are combined with [`ArtifactHash::combine_unordered`],
//! which is commutative: two maps holding the same entries hash identically
//! no matter in which order they were built or enumerated.
//!
//! # Examples
//!
//! ```
//! use holdgen_core::ArtifactHash;
//!
//! let a = ArtifactHash::from_entry("Name", Some("Lookup"));
//! let b = ArtifactHash::from_entry("Ok", Some("User"));
//!
//! assert_eq!(
//!     ArtifactHash::combine_unordered([a, b]),
//!     ArtifactHash::combine_unordered([b, a]),
//! );
//! ```

use std::fmt;
use xxhash_rust::xxh64::xxh64;

/// Domain-specific mixing constants for hash computation.
pub mod hash_constants {
    /// Separator constant used when folding ordered components.
    pub const SEP: u64 = 0x4bc94d6bd06053ad;

    /// Domain marker for artifact identities.
    pub const IDENTITY: u64 = 0x2fac10b63a6cc57c;

    /// Domain marker for substitution keys.
    pub const KEY: u64 = 0x5ea77ffbcdf5f302;

    /// Domain marker for present substitution values.
    pub const VALUE: u64 = 0x7d3c8b4a92e15f6d;

    /// Marker for a substitution value that is explicitly absent.
    pub const ABSENT: u64 = 0x3e9f5d2a8c7b1403;

    /// Domain marker for an unordered set of entries.
    pub const ENTRIES: u64 = 0x9a7f3d5e2b8c4601;

    /// Domain marker for pattern texts.
    pub const PATTERN: u64 = 0x1a095090689d4647;
}

/// A deterministic 64-bit hash identifying an artifact or part of one.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ArtifactHash(pub u64);

impl ArtifactHash {
    /// Empty/invalid hash constant.
    pub const EMPTY: ArtifactHash = ArtifactHash(0);

    /// Hash an artifact identity together with the tag of the rule that produced it.
    ///
    /// The same identity produced by two different rules hashes differently.
    #[inline]
    pub fn from_identity(kind_tag: u64, identity: &str) -> Self {
        let hash = hash_constants::IDENTITY ^ xxh64(identity.as_bytes(), 0);
        ArtifactHash(hash.wrapping_mul(hash_constants::SEP).wrapping_add(kind_tag))
    }

    /// Hash a single substitution entry.
    ///
    /// Key and value are folded in order, so swapping them changes the hash.
    /// An absent value hashes differently from an empty one.
    #[inline]
    pub fn from_entry(key: &str, value: Option<&str>) -> Self {
        let key_hash = hash_constants::KEY ^ xxh64(key.as_bytes(), 0);
        let value_hash = match value {
            Some(value) => hash_constants::VALUE ^ xxh64(value.as_bytes(), 0),
            None => hash_constants::ABSENT,
        };
        ArtifactHash(key_hash.wrapping_mul(hash_constants::SEP).wrapping_add(value_hash))
    }

    /// Hash the text of a pattern.
    #[inline]
    pub fn from_pattern(pattern: &str) -> Self {
        ArtifactHash(hash_constants::PATTERN ^ xxh64(pattern.as_bytes(), 0))
    }

    /// Combine hashes without regard to their order.
    ///
    /// Uses a wrapping sum, so the result is the same for any permutation of
    /// the input. The entry count is folded in so that an empty set differs
    /// from [`ArtifactHash::EMPTY`].
    pub fn combine_unordered(hashes: impl IntoIterator<Item = ArtifactHash>) -> Self {
        let (sum, count) = hashes
            .into_iter()
            .fold((0u64, 0u64), |(sum, count), h| (sum.wrapping_add(h.0), count + 1));
        let hash = (hash_constants::ENTRIES ^ count).wrapping_mul(hash_constants::SEP);
        ArtifactHash(hash.wrapping_add(sum))
    }

    /// Fold another hash into this one. Order matters.
    #[inline]
    pub fn mix(self, other: ArtifactHash) -> Self {
        ArtifactHash(self.0.wrapping_mul(hash_constants::SEP).wrapping_add(other.0))
    }

    /// Check if this is an empty/invalid hash.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Get the underlying u64 value.
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ArtifactHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArtifactHash({:#018x})", self.0)
    }
}

impl fmt::Display for ArtifactHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_hash_determinism() {
        assert_eq!(
            ArtifactHash::from_identity(1, "Lookup`2"),
            ArtifactHash::from_identity(1, "Lookup`2")
        );
    }

    #[test]
    fn identity_hash_depends_on_kind() {
        assert_ne!(
            ArtifactHash::from_identity(1, "Lookup"),
            ArtifactHash::from_identity(2, "Lookup")
        );
    }

    #[test]
    fn entry_hash_key_value_order_matters() {
        assert_ne!(
            ArtifactHash::from_entry("a", Some("b")),
            ArtifactHash::from_entry("b", Some("a"))
        );
    }

    #[test]
    fn entry_hash_absent_differs_from_empty() {
        assert_ne!(
            ArtifactHash::from_entry("Name", None),
            ArtifactHash::from_entry("Name", Some(""))
        );
    }

    #[test]
    fn combine_unordered_is_order_independent() {
        let hashes: Vec<_> = (0..10)
            .map(|i| ArtifactHash::from_entry(&format!("Key{i}"), Some("v")))
            .collect();
        let mut reversed = hashes.clone();
        reversed.reverse();

        assert_eq!(
            ArtifactHash::combine_unordered(hashes),
            ArtifactHash::combine_unordered(reversed)
        );
    }

    #[test]
    fn combine_unordered_empty_is_not_empty_hash() {
        assert!(!ArtifactHash::combine_unordered([]).is_empty());
    }

    #[test]
    fn mix_is_ordered() {
        let a = ArtifactHash::from_pattern("a");
        let b = ArtifactHash::from_pattern("b");
        assert_ne!(a.mix(b), b.mix(a));
    }

    #[test]
    fn hash_debug_and_display() {
        let hash = ArtifactHash(0x2a);
        assert_eq!(format!("{hash:?}"), "ArtifactHash(0x000000000000002a)");
        assert_eq!(hash.to_string(), "000000000000002a");
    }
}
