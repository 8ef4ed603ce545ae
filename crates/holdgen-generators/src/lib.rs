//! Source generators built on the pattern formatter.
//!
//! Each generator looks at [`CandidateFacts`], decides whether it applies,
//! and if so produces a [`Descriptor`](holdgen_core::Descriptor) whose
//! substitution map fully determines the generated text.
//!
//! ## Generators
//!
//! - [`HolderGenerator`]: Result / Option / MultiResult holder enums
//! - [`ValueObjectGenerator`]: newtype value objects, general or validatable
//! - [`SequenceCollectorGenerator`]: static tables of database sequences
//!
//! Pattern texts live in [`patterns`] and are versioned with
//! [`patterns::PATTERN_VERSION`].

mod facts;
mod generator;
mod holder;
mod options;
pub mod patterns;
mod sequence;
mod value_object;

pub use facts::{CandidateFacts, MarkerContract, MarkerFamily, SequenceDecl, Visibility};
pub use generator::{Generator, file_name_for};
pub use holder::{HolderGenerator, MAX_MULTI_RESULT_CASES, MIN_MULTI_RESULT_CASES};
pub use options::{GeneratorOptions, SerializationSupport};
pub use sequence::SequenceCollectorGenerator;
pub use value_object::ValueObjectGenerator;

/// One instance of every built-in generator.
pub fn default_generators() -> Vec<Box<dyn Generator>> {
    vec![
        Box::new(HolderGenerator::new()),
        Box::new(ValueObjectGenerator::new()),
        Box::new(SequenceCollectorGenerator::new()),
    ]
}
