//! Versioned pattern texts.
//!
//! Bump [`PATTERN_VERSION`] whenever a pattern changes. The version is part
//! of every descriptor, so cached output rendered from an older pattern is
//! never reused.

pub const PATTERN_VERSION: &str = "4";

pub const RESULT_HOLDER: &str = r#"{Header}{Attributes}{Visibility}enum {Name}{Generics} {
    Ok({Ok}),
    Err({Err}),
}

impl{Generics} {Name}{Generics} {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    pub fn is_err(&self) -> bool {
        matches!(self, Self::Err(_))
    }

    pub fn ok(self) -> Option<{Ok}> {
        match self {
            Self::Ok(value) => Some(value),
            Self::Err(_) => None,
        }
    }

    pub fn err(self) -> Option<{Err}> {
        match self {
            Self::Ok(_) => None,
            Self::Err(error) => Some(error),
        }
    }

    pub fn into_result(self) -> Result<{Ok}, {Err}> {
        self.into()
    }
}

impl{Generics} From<Result<{Ok}, {Err}>> for {Name}{Generics} {
    fn from(result: Result<{Ok}, {Err}>) -> Self {
        match result {
            Ok(value) => Self::Ok(value),
            Err(error) => Self::Err(error),
        }
    }
}

impl{Generics} From<{Name}{Generics}> for Result<{Ok}, {Err}> {
    fn from(holder: {Name}{Generics}) -> Self {
        match holder {
            {Name}::Ok(value) => Ok(value),
            {Name}::Err(error) => Err(error),
        }
    }
}
"#;

pub const OPTION_HOLDER: &str = r#"{Header}{Attributes}{Visibility}enum {Name}{Generics} {
    Some({Value}),
    None,
}

impl{Generics} Default for {Name}{Generics} {
    fn default() -> Self {
        Self::None
    }
}

impl{Generics} {Name}{Generics} {
    pub fn is_some(&self) -> bool {
        matches!(self, Self::Some(_))
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn value(&self) -> Option<&{Value}> {
        match self {
            Self::Some(value) => Some(value),
            Self::None => None,
        }
    }

    pub fn into_option(self) -> Option<{Value}> {
        self.into()
    }
}

impl{Generics} From<Option<{Value}>> for {Name}{Generics} {
    fn from(option: Option<{Value}>) -> Self {
        match option {
            Some(value) => Self::Some(value),
            None => Self::None,
        }
    }
}

impl{Generics} From<{Name}{Generics}> for Option<{Value}> {
    fn from(holder: {Name}{Generics}) -> Self {
        match holder {
            {Name}::Some(value) => Some(value),
            {Name}::None => None,
        }
    }
}
"#;

pub const MULTI_RESULT_HOLDER: &str = r#"{Header}{Attributes}{Visibility}enum {Name}{Generics} {
{Variants}}

impl{Generics} {Name}{Generics} {
    pub const CASES: usize = {Count};

    pub fn index(&self) -> usize {
        match self {
{IndexArms}        }
    }
}
{FromImpls}"#;

pub const MULTI_RESULT_VARIANT: &str = "    Case{Index}({Type}),\n";

pub const MULTI_RESULT_INDEX_ARM: &str = "            Self::Case{Index}(_) => {Index},\n";

pub const MULTI_RESULT_FROM: &str = r#"
impl{Generics} From<{Type}> for {Name}{Generics} {
    fn from(value: {Type}) -> Self {
        Self::Case{Index}(value)
    }
}
"#;

pub const VALUE_OBJECT_GENERAL: &str = r#"{Header}{Attributes}{Visibility}struct {Name}{Generics}({Inner});

impl{Generics} {Name}{Generics} {
    pub fn new(value: {Inner}) -> Self {
        Self(value)
    }

    pub fn value(&self) -> &{Inner} {
        &self.0
    }

    pub fn into_inner(self) -> {Inner} {
        self.0
    }
}

impl{Generics} From<{Inner}> for {Name}{Generics} {
    fn from(value: {Inner}) -> Self {
        Self(value)
    }
}
{CommonImpls}"#;

pub const VALUE_OBJECT_VALIDATABLE: &str = r#"{Header}{Attributes}{Visibility}struct {Name}{Generics}({Inner});

impl{Generics} {Name}{Generics} {
    /// Validates `value` with `Self::validate` before wrapping it.
    pub fn new(value: {Inner}) -> Result<Self, String> {
        Self::validate(&value)?;
        Ok(Self(value))
    }

    pub fn value(&self) -> &{Inner} {
        &self.0
    }

    pub fn into_inner(self) -> {Inner} {
        self.0
    }
}

impl{Generics} TryFrom<{Inner}> for {Name}{Generics} {
    type Error = String;

    fn try_from(value: {Inner}) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
{CommonImpls}"#;

pub const VALUE_OBJECT_COMMON: &str = r#"
impl{Generics} AsRef<{Inner}> for {Name}{Generics} {
    fn as_ref(&self) -> &{Inner} {
        &self.0
    }
}
"#;

/// Only emitted for candidates that opt in with `CandidateFacts::with_display`.
pub const VALUE_OBJECT_DISPLAY: &str = r#"
impl{Generics} std::fmt::Display for {Name}{Generics}
where
    {Inner}: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
"#;

/// Emits a `{Name}Sequence` row type next to the table, so the output is
/// self-contained.
pub const SEQUENCE_COLLECTOR: &str = r#"{Header}#[derive(Debug, Clone, Copy, PartialEq, Eq)]
{Visibility}struct {Name}Sequence {
    pub name: &'static str,
    pub schema: Option<&'static str>,
    pub start: i64,
    pub increment: i64,
}

impl{Generics} {Name}{Generics} {
    /// Database sequences declared on `{Name}`.
    pub const SEQUENCES: &'static [{Name}Sequence] = &[
{Entries}    ];

    pub fn sequences() -> &'static [{Name}Sequence] {
        Self::SEQUENCES
    }
}
"#;

pub const SEQUENCE_ENTRY: &str = "        {Name}Sequence { name: \"{SequenceName}\", schema: {Schema}, start: {Start}, increment: {Increment} },\n";
