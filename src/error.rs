//! Errors raised by the incremental pipeline.
//!
//! Formatting and descriptor comparison never fail, and candidates a
//! generator cannot handle are skipped rather than reported. What remains are
//! conflicts that make the output of a pass ambiguous.

use thiserror::Error;

/// Errors that abort a generation pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Two candidates produced an artifact with the same identity for the same generator.
    #[error("generator '{generator}' produced '{identity}' more than once")]
    DuplicateArtifact {
        generator: &'static str,
        identity: String,
    },

    /// Two generators were registered under the same name.
    #[error("a generator named '{name}' is already registered")]
    DuplicateGenerator { name: &'static str },
}
