//! Structural facts about a candidate declaration.
//!
//! Discovering candidates in source code is the caller's job. Generators only
//! see what is recorded here: the declaration's name and location, its type
//! parameters, the marker contracts it carries, and any sequences it declares.

use std::fmt;

/// Visibility of the declaration, reused for the generated items.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Public,
    Crate,
    Private,
}

impl Visibility {
    /// Rust keyword(s) for this visibility, without trailing space.
    pub fn keyword(&self) -> &'static str {
        match self {
            Visibility::Public => "pub",
            Visibility::Crate => "pub(crate)",
            Visibility::Private => "",
        }
    }

    /// Keyword followed by a space, or nothing for private items.
    pub fn prefix(&self) -> &'static str {
        match self {
            Visibility::Public => "pub ",
            Visibility::Crate => "pub(crate) ",
            Visibility::Private => "",
        }
    }
}

/// Which generator family a marker belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerFamily {
    Holder,
    ValueObject,
    Sequence,
}

/// A recognised marker contract and its type arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MarkerContract {
    ResultHolder { ok: String, err: String },
    OptionHolder { value: String },
    MultiResultHolder { variants: Vec<String> },
    ValueObject { inner: String },
    ValidatableValueObject { inner: String },
    SequenceCollector,
}

impl MarkerContract {
    pub fn family(&self) -> MarkerFamily {
        match self {
            MarkerContract::ResultHolder { .. }
            | MarkerContract::OptionHolder { .. }
            | MarkerContract::MultiResultHolder { .. } => MarkerFamily::Holder,
            MarkerContract::ValueObject { .. } | MarkerContract::ValidatableValueObject { .. } => {
                MarkerFamily::ValueObject
            }
            MarkerContract::SequenceCollector => MarkerFamily::Sequence,
        }
    }

    /// Marker name as a user would write it.
    pub fn name(&self) -> &'static str {
        match self {
            MarkerContract::ResultHolder { .. } => "ResultHolder",
            MarkerContract::OptionHolder { .. } => "OptionHolder",
            MarkerContract::MultiResultHolder { .. } => "MultiResultHolder",
            MarkerContract::ValueObject { .. } => "ValueObject",
            MarkerContract::ValidatableValueObject { .. } => "ValidatableValueObject",
            MarkerContract::SequenceCollector => "SequenceCollector",
        }
    }
}

impl fmt::Display for MarkerContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerContract::ResultHolder { ok, err } => write!(f, "ResultHolder<{ok}, {err}>"),
            MarkerContract::OptionHolder { value } => write!(f, "OptionHolder<{value}>"),
            MarkerContract::MultiResultHolder { variants } => {
                write!(f, "MultiResultHolder<{}>", variants.join(", "))
            }
            MarkerContract::ValueObject { inner } => write!(f, "ValueObject<{inner}>"),
            MarkerContract::ValidatableValueObject { inner } => {
                write!(f, "ValidatableValueObject<{inner}>")
            }
            MarkerContract::SequenceCollector => f.write_str("SequenceCollector"),
        }
    }
}

/// A database sequence declared on a collector candidate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SequenceDecl {
    pub name: String,
    pub schema: Option<String>,
    pub start: i64,
    pub increment: i64,
}

impl SequenceDecl {
    /// A sequence starting at 1 with increment 1.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: None,
            start: 1,
            increment: 1,
        }
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn with_start(mut self, start: i64) -> Self {
        self.start = start;
        self
    }

    pub fn with_increment(mut self, increment: i64) -> Self {
        self.increment = increment;
        self
    }
}

/// Everything a generator knows about one candidate declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CandidateFacts {
    /// Unqualified type name.
    pub name: String,
    /// Enclosing modules, outermost first.
    pub module_path: Vec<String>,
    /// Declared generic parameters, in order.
    pub type_params: Vec<String>,
    pub visibility: Visibility,
    pub markers: Vec<MarkerContract>,
    pub sequences: Vec<SequenceDecl>,
    /// The inner type of a value object implements `Display`, so the value
    /// object may forward to it.
    pub display: bool,
}

impl CandidateFacts {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn in_module(mut self, path: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.module_path = path.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_type_params(mut self, params: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.type_params = params.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_marker(mut self, marker: MarkerContract) -> Self {
        self.markers.push(marker);
        self
    }

    pub fn with_sequence(mut self, sequence: SequenceDecl) -> Self {
        self.sequences.push(sequence);
        self
    }

    pub fn with_display(mut self, display: bool) -> Self {
        self.display = display;
        self
    }

    /// `module::path::Name`, or just `Name` at the root.
    pub fn qualified_name(&self) -> String {
        if self.module_path.is_empty() {
            self.name.clone()
        } else {
            format!("{}::{}", self.module_path.join("::"), self.name)
        }
    }

    /// Identity of artifacts generated for this candidate.
    ///
    /// The qualified name, followed by `` `N `` when the declaration has `N`
    /// type parameters, so `Lookup<T>` and `Lookup` stay distinct.
    pub fn identity(&self) -> String {
        match self.type_params.len() {
            0 => self.qualified_name(),
            arity => format!("{}`{}", self.qualified_name(), arity),
        }
    }

    /// `<T, E>` for generic declarations, empty otherwise.
    pub fn generics(&self) -> String {
        if self.type_params.is_empty() {
            String::new()
        } else {
            format!("<{}>", self.type_params.join(", "))
        }
    }

    /// Markers belonging to `family`.
    pub fn markers_of(&self, family: MarkerFamily) -> impl Iterator<Item = &MarkerContract> {
        self.markers.iter().filter(move |m| m.family() == family)
    }
}
