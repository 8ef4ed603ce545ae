//! Descriptors: the incremental cache key of a generated artifact.
//!
//! A [`Descriptor`] bundles the identity of an artifact, the kind of rule that
//! produced it, and the full substitution map used to render it. Two
//! descriptors are equal exactly when their identity, kind and map contents
//! are equal, which is what the incremental pipeline uses to decide whether
//! previously generated output can be reused.
//!
//! Stages that cannot produce a descriptor return [`Extraction::Absent`]
//! instead of a placeholder value, and downstream stages filter on the tag.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::{ArtifactHash, SubstitutionError, SubstitutionMap};

/// Generation strategy for value objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueObjectKind {
    /// Infallible construction from the inner value.
    General,
    /// Construction goes through a user supplied `validate` function.
    Validatable,
}

/// The rule that produced an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArtifactKind {
    ResultHolder,
    OptionHolder,
    MultiResultHolder,
    ValueObject(ValueObjectKind),
    SequenceCollector,
}

impl ArtifactKind {
    /// Stable numeric tag, folded into descriptor fingerprints.
    pub const fn tag(self) -> u64 {
        match self {
            ArtifactKind::ResultHolder => 1,
            ArtifactKind::OptionHolder => 2,
            ArtifactKind::MultiResultHolder => 3,
            ArtifactKind::ValueObject(ValueObjectKind::General) => 4,
            ArtifactKind::ValueObject(ValueObjectKind::Validatable) => 5,
            ArtifactKind::SequenceCollector => 6,
        }
    }

    /// Short human readable name.
    pub const fn name(self) -> &'static str {
        match self {
            ArtifactKind::ResultHolder => "result holder",
            ArtifactKind::OptionHolder => "option holder",
            ArtifactKind::MultiResultHolder => "multi-result holder",
            ArtifactKind::ValueObject(ValueObjectKind::General) => "value object",
            ArtifactKind::ValueObject(ValueObjectKind::Validatable) => "validatable value object",
            ArtifactKind::SequenceCollector => "sequence collector",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable, structurally comparable description of one generated artifact.
#[derive(Clone)]
pub struct Descriptor {
    identity: String,
    kind: ArtifactKind,
    substitutions: SubstitutionMap,
    fingerprint: ArtifactHash,
}

impl Descriptor {
    /// Create a descriptor. The fingerprint is computed once here.
    pub fn new(
        identity: impl Into<String>,
        kind: ArtifactKind,
        substitutions: SubstitutionMap,
    ) -> Self {
        let identity = identity.into();
        let fingerprint = ArtifactHash::from_identity(kind.tag(), &identity)
            .mix(substitutions.content_hash());
        Self {
            identity,
            kind,
            substitutions,
            fingerprint,
        }
    }

    /// The string uniquely naming the generated artifact.
    #[inline]
    pub fn identity(&self) -> &str {
        &self.identity
    }

    #[inline]
    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }

    /// The substitution values used to render this artifact.
    #[inline]
    pub fn substitutions(&self) -> &SubstitutionMap {
        &self.substitutions
    }

    /// Process-independent hash of identity, kind and map contents.
    ///
    /// Equal descriptors always have equal fingerprints.
    #[inline]
    pub fn fingerprint(&self) -> ArtifactHash {
        self.fingerprint
    }
}

impl PartialEq for Descriptor {
    fn eq(&self, other: &Self) -> bool {
        if self.identity != other.identity || self.kind != other.kind {
            return false;
        }
        if self.substitutions.len() != other.substitutions.len() {
            return false;
        }
        if self.fingerprint != other.fingerprint {
            return false;
        }
        self.substitutions
            .iter()
            .all(|(key, value)| other.substitutions.get(key) == Some(value))
    }
}

impl Eq for Descriptor {}

impl Hash for Descriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.fingerprint.as_u64());
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("identity", &self.identity)
            .field("kind", &self.kind)
            .field("entries", &self.substitutions.len())
            .field("fingerprint", &self.fingerprint)
            .finish()
    }
}

/// Why a stage produced no descriptor for a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// The candidate carries no marker this rule recognises.
    NoMarker,
    /// The candidate carries more than one marker of this rule's family.
    AmbiguousMarkers { count: usize },
    /// The rule does not apply to this kind of candidate.
    NotApplicable,
    /// The candidate's facts are unusable for this rule.
    InvalidFacts(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoMarker => write!(f, "no matching marker"),
            SkipReason::AmbiguousMarkers { count } => {
                write!(f, "{count} markers found, expected exactly one")
            }
            SkipReason::NotApplicable => write!(f, "rule does not apply"),
            SkipReason::InvalidFacts(detail) => write!(f, "invalid facts: {detail}"),
        }
    }
}

impl From<SubstitutionError> for SkipReason {
    fn from(error: SubstitutionError) -> Self {
        SkipReason::InvalidFacts(error.to_string())
    }
}

/// Result of trying to build a descriptor for a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Extraction {
    Present(Descriptor),
    Absent(SkipReason),
}

impl Extraction {
    #[inline]
    pub fn is_present(&self) -> bool {
        matches!(self, Extraction::Present(_))
    }

    /// The descriptor, if one was produced.
    pub fn into_present(self) -> Option<Descriptor> {
        match self {
            Extraction::Present(descriptor) => Some(descriptor),
            Extraction::Absent(_) => None,
        }
    }

    pub fn as_present(&self) -> Option<&Descriptor> {
        match self {
            Extraction::Present(descriptor) => Some(descriptor),
            Extraction::Absent(_) => None,
        }
    }

    /// The skip reason, if no descriptor was produced.
    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match self {
            Extraction::Present(_) => None,
            Extraction::Absent(reason) => Some(reason),
        }
    }
}

impl From<Descriptor> for Extraction {
    fn from(descriptor: Descriptor) -> Self {
        Extraction::Present(descriptor)
    }
}

impl From<SkipReason> for Extraction {
    fn from(reason: SkipReason) -> Self {
        Extraction::Absent(reason)
    }
}

/// Drop absent extractions, keeping the descriptors.
pub fn filter_present(
    extractions: impl IntoIterator<Item = Extraction>,
) -> impl Iterator<Item = Descriptor> {
    extractions.into_iter().filter_map(Extraction::into_present)
}
