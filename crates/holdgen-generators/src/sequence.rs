//! Database sequence collector generation.
//!
//! Collects the sequences declared on a `SequenceCollector` candidate into a
//! static `SEQUENCES` table, in declaration order. Each row is a generated
//! `{Name}Sequence` struct emitted alongside the table.

use holdgen_core::{ArtifactKind, Descriptor, Extraction, SkipReason, SubstitutionMap};
use rustc_hash::FxHashSet;

use crate::generator::{base_substitutions, check_name, file_name_for, finish, single_marker};
use crate::patterns;
use crate::{CandidateFacts, Generator, GeneratorOptions, MarkerFamily, SequenceDecl};

#[derive(Debug, Default, Clone, Copy)]
pub struct SequenceCollectorGenerator;

impl SequenceCollectorGenerator {
    pub fn new() -> Self {
        Self
    }

    fn build(
        &self,
        facts: &CandidateFacts,
        options: &GeneratorOptions,
    ) -> Result<Descriptor, SkipReason> {
        check_name(facts)?;
        single_marker(facts, MarkerFamily::Sequence)?;
        validate_sequences(&facts.sequences)?;

        let formatter = options.formatter();
        let mut entries = String::new();
        for sequence in &facts.sequences {
            let schema = match &sequence.schema {
                Some(schema) => format!("Some({schema:?})"),
                None => "None".to_string(),
            };
            let entry = SubstitutionMap::new()
                .with("Name", facts.name.as_str())?
                .with("SequenceName", sequence.name.as_str())?
                .with("Schema", schema)?
                .with("Start", sequence.start.to_string())?
                .with("Increment", sequence.increment.to_string())?;
            entries.push_str(&formatter.format(patterns::SEQUENCE_ENTRY, &entry));
        }

        let mut map = base_substitutions(facts, options)?;
        map.insert("Entries", entries)?;

        Ok(Descriptor::new(
            facts.identity(),
            ArtifactKind::SequenceCollector,
            map,
        ))
    }
}

fn validate_sequences(sequences: &[SequenceDecl]) -> Result<(), SkipReason> {
    if sequences.is_empty() {
        return Err(SkipReason::InvalidFacts("no sequences declared".into()));
    }

    let mut seen = FxHashSet::default();
    for sequence in sequences {
        let valid_name = !sequence.name.is_empty()
            && sequence
                .name
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_');
        if !valid_name {
            return Err(SkipReason::InvalidFacts(format!(
                "'{}' is not a sequence name",
                sequence.name
            )));
        }
        if sequence.increment == 0 {
            return Err(SkipReason::InvalidFacts(format!(
                "sequence '{}' has a zero increment",
                sequence.name
            )));
        }
        if !seen.insert((sequence.schema.as_deref(), sequence.name.as_str())) {
            return Err(SkipReason::InvalidFacts(format!(
                "sequence '{}' is declared more than once",
                sequence.name
            )));
        }
    }
    Ok(())
}

impl Generator for SequenceCollectorGenerator {
    fn name(&self) -> &'static str {
        "sequences"
    }

    fn extract(&self, facts: &CandidateFacts, options: &GeneratorOptions) -> Extraction {
        finish(self.build(facts, options))
    }

    fn pattern(&self, _descriptor: &Descriptor) -> &'static str {
        patterns::SEQUENCE_COLLECTOR
    }

    fn file_name(&self, descriptor: &Descriptor) -> String {
        file_name_for(descriptor.identity(), "sequences")
    }
}
