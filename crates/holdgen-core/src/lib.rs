//! Core types for incremental source generation.
//!
//! This crate defines what a generated artifact *is* as far as caching is
//! concerned:
//!
//! - [`ArtifactHash`]: deterministic 64-bit hashing with domain separation
//! - [`SubstitutionMap`]: placeholder name to replacement text
//! - [`Descriptor`]: identity + kind + substitutions, compared structurally
//! - [`Extraction`]: a descriptor, or the reason none was produced
//!
//! # Example
//!
//! ```
//! use holdgen_core::{ArtifactKind, Descriptor, SubstitutionMap};
//!
//! let map = SubstitutionMap::new().with("Name", "Lookup").unwrap();
//! let previous = Descriptor::new("Lookup`2", ArtifactKind::ResultHolder, map.clone());
//! let current = Descriptor::new("Lookup`2", ArtifactKind::ResultHolder, map);
//!
//! // Nothing changed, so the previous output can be reused.
//! assert_eq!(previous, current);
//! ```

mod artifact_hash;
mod descriptor;
mod error;
mod substitution;

pub use artifact_hash::{ArtifactHash, hash_constants};
pub use descriptor::{
    ArtifactKind, Descriptor, Extraction, SkipReason, ValueObjectKind, filter_present,
};
pub use error::SubstitutionError;
pub use substitution::{
    MAX_PLACEHOLDER_LEN, SubstitutionMap, is_placeholder_continue, is_placeholder_start,
    is_valid_placeholder_name,
};
