//! Result, Option and MultiResult holder generation.
//!
//! A candidate carrying exactly one holder marker gets an enum with explicit
//! variants plus conversions to and from the matching std type. Conversions
//! are generated field by field; nothing relies on layout compatibility.

use holdgen_core::{ArtifactKind, Descriptor, Extraction, SkipReason, SubstitutionMap};
use holdgen_template::PatternFormatter;
use rustc_hash::FxHashSet;

use crate::generator::{
    attribute_lines, base_substitutions, check_name, file_name_for, finish, single_marker,
};
use crate::patterns;
use crate::{CandidateFacts, Generator, GeneratorOptions, MarkerContract, MarkerFamily};

/// Fewest cases a multi-result holder may declare.
pub const MIN_MULTI_RESULT_CASES: usize = 2;
/// Most cases a multi-result holder may declare.
pub const MAX_MULTI_RESULT_CASES: usize = 8;

/// Generates Result, Option and MultiResult holders.
#[derive(Debug, Default, Clone, Copy)]
pub struct HolderGenerator;

impl HolderGenerator {
    pub fn new() -> Self {
        Self
    }

    fn build(
        &self,
        facts: &CandidateFacts,
        options: &GeneratorOptions,
    ) -> Result<Descriptor, SkipReason> {
        check_name(facts)?;
        let marker = single_marker(facts, MarkerFamily::Holder)?;

        let mut map = base_substitutions(facts, options)?;
        map.insert(
            "Attributes",
            attribute_lines(&facts.name, options.serialization, None),
        )?;

        let kind = match marker {
            MarkerContract::ResultHolder { ok, err } => {
                map.insert("Ok", ok.as_str())?;
                map.insert("Err", err.as_str())?;
                ArtifactKind::ResultHolder
            }
            MarkerContract::OptionHolder { value } => {
                map.insert("Value", value.as_str())?;
                ArtifactKind::OptionHolder
            }
            MarkerContract::MultiResultHolder { variants } => {
                insert_multi_result_cases(&mut map, facts, variants, options.formatter())?;
                ArtifactKind::MultiResultHolder
            }
            _ => return Err(SkipReason::NotApplicable),
        };

        Ok(Descriptor::new(facts.identity(), kind, map))
    }
}

/// Render the per-case snippets of a multi-result holder into `map`.
fn insert_multi_result_cases(
    map: &mut SubstitutionMap,
    facts: &CandidateFacts,
    variants: &[String],
    formatter: PatternFormatter,
) -> Result<(), SkipReason> {
    if !(MIN_MULTI_RESULT_CASES..=MAX_MULTI_RESULT_CASES).contains(&variants.len()) {
        return Err(SkipReason::InvalidFacts(format!(
            "multi-result holder needs {MIN_MULTI_RESULT_CASES} to {MAX_MULTI_RESULT_CASES} cases, got {}",
            variants.len()
        )));
    }

    let mut seen = FxHashSet::default();
    if let Some(duplicate) = variants.iter().find(|v| !seen.insert(v.as_str())) {
        return Err(SkipReason::InvalidFacts(format!(
            "case type '{duplicate}' appears more than once"
        )));
    }

    let mut cases = String::new();
    let mut index_arms = String::new();
    let mut from_impls = String::new();
    let generics = facts.generics();

    for (index, ty) in variants.iter().enumerate() {
        let case = SubstitutionMap::new()
            .with("Index", index.to_string())?
            .with("Type", ty.as_str())?
            .with("Name", facts.name.as_str())?
            .with("Generics", generics.as_str())?;

        cases.push_str(&formatter.format(patterns::MULTI_RESULT_VARIANT, &case));
        index_arms.push_str(&formatter.format(patterns::MULTI_RESULT_INDEX_ARM, &case));
        from_impls.push_str(&formatter.format(patterns::MULTI_RESULT_FROM, &case));
    }

    map.insert("Count", variants.len().to_string())?;
    map.insert("Variants", cases)?;
    map.insert("IndexArms", index_arms)?;
    map.insert("FromImpls", from_impls)?;
    Ok(())
}

impl Generator for HolderGenerator {
    fn name(&self) -> &'static str {
        "holder"
    }

    fn extract(&self, facts: &CandidateFacts, options: &GeneratorOptions) -> Extraction {
        finish(self.build(facts, options))
    }

    fn pattern(&self, descriptor: &Descriptor) -> &'static str {
        match descriptor.kind() {
            ArtifactKind::OptionHolder => patterns::OPTION_HOLDER,
            ArtifactKind::MultiResultHolder => patterns::MULTI_RESULT_HOLDER,
            _ => patterns::RESULT_HOLDER,
        }
    }

    fn file_name(&self, descriptor: &Descriptor) -> String {
        file_name_for(descriptor.identity(), "holder")
    }
}
