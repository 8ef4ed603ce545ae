//! Incremental source generation from `{Key}` patterns.
//!
//! `holdgen` renders Rust source for holder enums, value objects and sequence
//! tables. Generators turn candidate facts into [`Descriptor`]s, and the
//! [`IncrementalGenerator`] compares each descriptor with the one from the
//! previous pass so unchanged artifacts are never rendered twice.
//!
//! # Example
//!
//! ```
//! use holdgen::{CandidateFacts, GeneratorOptions, IncrementalGenerator, MarkerContract, PipelineConfig};
//!
//! let mut pipeline =
//!     IncrementalGenerator::with_default_generators(GeneratorOptions::new(), PipelineConfig::new());
//! let candidates = [CandidateFacts::new("Maybe")
//!     .with_type_params(["T"])
//!     .with_marker(MarkerContract::OptionHolder { value: "T".into() })];
//!
//! let report = pipeline.run_pass(&candidates).unwrap();
//! assert_eq!(report.stats.generated, 1);
//! assert!(report.outputs[0].text.contains("pub enum Maybe<T>"));
//!
//! let report = pipeline.run_pass(&candidates).unwrap();
//! assert_eq!(report.stats.reused, 1);
//! ```
//!
//! # Crates
//!
//! - `holdgen-core`: substitution maps, descriptors, hashing
//! - `holdgen-template`: the pattern formatter
//! - `holdgen-generators`: the built-in generators

mod error;
mod pipeline;
mod registry;

pub use error::GenerationError;
pub use pipeline::{
    CoverageWarning, GeneratedSource, IncrementalGenerator, PassReport, PassStats, PipelineConfig,
};
pub use registry::{DerivationCache, PatternRegistry};

pub use holdgen_core::{
    ArtifactHash, ArtifactKind, Descriptor, Extraction, SkipReason, SubstitutionError,
    SubstitutionMap, ValueObjectKind, filter_present,
};
pub use holdgen_generators::{
    CandidateFacts, Generator, GeneratorOptions, HolderGenerator, MarkerContract, MarkerFamily,
    SequenceCollectorGenerator, SequenceDecl, SerializationSupport, ValueObjectGenerator,
    Visibility, default_generators, file_name_for, patterns,
};
pub use holdgen_template::{
    Coverage, FormatStyle, PatternFormatter, Placeholder, format_robust, format_simple,
    scan_placeholders,
};
