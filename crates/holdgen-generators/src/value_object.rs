//! Value-object generation.
//!
//! A value object is a newtype around a single inner value. The
//! [`ValueObjectKind`] decides how it is constructed: `General` value objects
//! convert infallibly, `Validatable` ones run a user supplied
//! `fn validate(&Inner) -> Result<(), String>` first.
//!
//! `Display` forwarding is only emitted when the candidate opts in with
//! [`CandidateFacts::with_display`], and is bounded on the inner type.

use holdgen_core::{ArtifactKind, Descriptor, Extraction, SkipReason, ValueObjectKind};

use crate::generator::{
    attribute_lines, base_substitutions, check_name, file_name_for, finish, single_marker,
};
use crate::patterns;
use crate::{CandidateFacts, Generator, GeneratorOptions, MarkerContract, MarkerFamily};

#[derive(Debug, Default, Clone, Copy)]
pub struct ValueObjectGenerator;

impl ValueObjectGenerator {
    pub fn new() -> Self {
        Self
    }

    fn build(
        &self,
        facts: &CandidateFacts,
        options: &GeneratorOptions,
    ) -> Result<Descriptor, SkipReason> {
        check_name(facts)?;
        let (kind, inner) = match single_marker(facts, MarkerFamily::ValueObject)? {
            MarkerContract::ValueObject { inner } => (ValueObjectKind::General, inner),
            MarkerContract::ValidatableValueObject { inner } => {
                (ValueObjectKind::Validatable, inner)
            }
            _ => return Err(SkipReason::NotApplicable),
        };
        if inner.trim().is_empty() {
            return Err(SkipReason::InvalidFacts("value object has no inner type".into()));
        }

        let serde_mode = match kind {
            ValueObjectKind::General => "transparent".to_string(),
            ValueObjectKind::Validatable => format!("try_from = \"{inner}\""),
        };

        let mut map = base_substitutions(facts, options)?;
        map.insert("Inner", inner.as_str())?;
        map.insert(
            "Attributes",
            attribute_lines(&facts.name, options.serialization, Some(&serde_mode)),
        )?;

        // Shared impls go through the same formatter so they see the same values.
        let formatter = options.formatter();
        let mut common = formatter.format(patterns::VALUE_OBJECT_COMMON, &map);
        if facts.display {
            common.push_str(&formatter.format(patterns::VALUE_OBJECT_DISPLAY, &map));
        }
        map.insert("CommonImpls", common)?;

        Ok(Descriptor::new(
            facts.identity(),
            ArtifactKind::ValueObject(kind),
            map,
        ))
    }
}

impl Generator for ValueObjectGenerator {
    fn name(&self) -> &'static str {
        "value-object"
    }

    fn extract(&self, facts: &CandidateFacts, options: &GeneratorOptions) -> Extraction {
        finish(self.build(facts, options))
    }

    fn pattern(&self, descriptor: &Descriptor) -> &'static str {
        match descriptor.kind() {
            ArtifactKind::ValueObject(ValueObjectKind::Validatable) => {
                patterns::VALUE_OBJECT_VALIDATABLE
            }
            _ => patterns::VALUE_OBJECT_GENERAL,
        }
    }

    fn file_name(&self, descriptor: &Descriptor) -> String {
        file_name_for(descriptor.identity(), "value")
    }
}
