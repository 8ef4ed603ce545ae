//! Error types for descriptor construction.
//!
//! Formatting and descriptor comparison never fail. The only fallible step in
//! the core is building a [`SubstitutionMap`](crate::SubstitutionMap), where a
//! key that could never be matched by a placeholder is rejected up front.

use thiserror::Error;

/// Errors raised while building a substitution map.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubstitutionError {
    /// The key is not a valid placeholder name.
    #[error("'{key}' is not a valid placeholder name")]
    InvalidKey { key: String },

    /// The key was inserted twice while building a map from pairs.
    #[error("placeholder '{key}' is defined more than once")]
    DuplicateKey { key: String },
}

impl SubstitutionError {
    /// The key that caused the error.
    pub fn key(&self) -> &str {
        match self {
            SubstitutionError::InvalidKey { key } => key,
            SubstitutionError::DuplicateKey { key } => key,
        }
    }
}
