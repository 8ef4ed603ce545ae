//! The generator contract and helpers shared by every generator.

use holdgen_core::{Descriptor, Extraction, SkipReason, SubstitutionError, SubstitutionMap};

use crate::patterns::PATTERN_VERSION;
use crate::{CandidateFacts, GeneratorOptions, MarkerContract, MarkerFamily, SerializationSupport};

/// A source generator: turns candidate facts into descriptors and descriptors into text.
///
/// Extraction must be deterministic: the same facts and options always
/// produce an equal descriptor, otherwise cached output is never reused.
pub trait Generator: Send + Sync {
    /// Stable name, used to key the incremental cache.
    fn name(&self) -> &'static str;

    /// Build the descriptor for `facts`, or say why this generator skips it.
    fn extract(&self, facts: &CandidateFacts, options: &GeneratorOptions) -> Extraction;

    /// Pattern used to render `descriptor`.
    fn pattern(&self, descriptor: &Descriptor) -> &'static str;

    /// Output file name for `descriptor`.
    fn file_name(&self, descriptor: &Descriptor) -> String;
}

/// The one marker of `family` on `facts`.
///
/// Zero markers is [`SkipReason::NoMarker`], several is [`SkipReason::AmbiguousMarkers`].
pub(crate) fn single_marker(
    facts: &CandidateFacts,
    family: MarkerFamily,
) -> Result<&MarkerContract, SkipReason> {
    let mut markers = facts.markers_of(family);
    let first = markers.next().ok_or(SkipReason::NoMarker)?;
    match markers.count() {
        0 => Ok(first),
        rest => Err(SkipReason::AmbiguousMarkers { count: rest + 1 }),
    }
}

/// Substitutions every pattern uses: name, generics, visibility and header.
pub(crate) fn base_substitutions(
    facts: &CandidateFacts,
    options: &GeneratorOptions,
) -> Result<SubstitutionMap, SubstitutionError> {
    let mut map = SubstitutionMap::with_capacity(12);
    map.insert("Name", facts.name.as_str())?;
    map.insert("Generics", facts.generics())?;
    map.insert("Visibility", facts.visibility.prefix())?;
    map.insert("PatternVersion", PATTERN_VERSION)?;
    if options.header {
        map.insert(
            "Header",
            format!(
                "// @generated by {} from `{}`. Do not edit.\n\n",
                options.toolchain,
                facts.qualified_name()
            ),
        )?;
    } else {
        map.insert_absent("Header")?;
    }
    Ok(map)
}

/// Attribute lines placed above a generated type.
pub(crate) fn attribute_lines(
    name: &str,
    serialization: SerializationSupport,
    extra_serde: Option<&str>,
) -> String {
    let mut lines = String::from("#[derive(Debug, Clone, PartialEq)]\n");
    if serialization.needs_serde() {
        lines.push_str("#[derive(serde::Serialize, serde::Deserialize)]\n");
        if let Some(extra) = extra_serde {
            lines.push_str(&format!("#[serde({extra})]\n"));
        }
        if serialization.contains(SerializationSupport::XML) {
            lines.push_str(&format!("#[serde(rename = \"{name}\")]\n"));
        }
    }
    lines
}

/// Reject facts no generator can work with.
pub(crate) fn check_name(facts: &CandidateFacts) -> Result<(), SkipReason> {
    let valid = facts
        .name
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && facts.name.chars().all(|c| c.is_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(SkipReason::InvalidFacts(format!(
            "'{}' is not a type name",
            facts.name
        )))
    }
}

/// `db::Lookup`2` with suffix `holder` becomes `db.Lookup_2.holder.g.rs`.
pub fn file_name_for(identity: &str, suffix: &str) -> String {
    format!("{}.{}.g.rs", identity.replace("::", ".").replace('`', "_"), suffix)
}

/// Turn a build result into an extraction.
pub(crate) fn finish(result: Result<Descriptor, SkipReason>) -> Extraction {
    match result {
        Ok(descriptor) => Extraction::Present(descriptor),
        Err(reason) => Extraction::Absent(reason),
    }
}
