//! Placeholder discovery and coverage checks.
//!
//! The formatter silently leaves unknown placeholders in place. Callers that
//! need every placeholder resolved scan the pattern once and compare the
//! result against their substitution map.

use std::fmt;

use holdgen_core::SubstitutionMap;

use crate::cursor::Cursor;
use crate::formatter::read_placeholder_name;
use crate::{PatternFormatter, Span};

/// A `{Name}` token found in a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Placeholder {
    /// Name between the braces.
    pub name: String,
    /// Byte offset of the opening brace.
    pub offset: usize,
    /// Location of the token, braces included.
    pub span: Span,
}

/// Find every well-formed placeholder in `pattern`, in order of appearance.
///
/// Names follow the robust formatter's rules with the given length bound.
pub fn scan_placeholders(pattern: &str, max_len: usize) -> Vec<Placeholder> {
    let mut found = Vec::new();
    let mut cursor = Cursor::new(pattern);

    loop {
        cursor.eat_until('{');
        if cursor.is_eof() {
            break;
        }

        // The cursor sits on a one-byte `{`.
        match read_placeholder_name(&cursor.rest()[1..], max_len) {
            Some(name) => {
                let token_len = name.len() + 2;
                found.push(Placeholder {
                    name: name.to_string(),
                    offset: cursor.offset(),
                    span: cursor.span(token_len),
                });
                cursor.advance_bytes(token_len);
            }
            None => {
                cursor.eat('{');
            }
        }
    }

    found
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}} at {}", self.name, self.span)
    }
}

impl PatternFormatter {
    /// Placeholders this formatter would try to resolve in `pattern`.
    pub fn scan(&self, pattern: &str) -> Vec<Placeholder> {
        scan_placeholders(pattern, self.max_placeholder_len())
    }
}

/// Result of checking a map against a pattern's placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coverage {
    /// Placeholders in the pattern that have no entry in the map.
    pub missing: Vec<Placeholder>,
    /// Map keys that no placeholder refers to, sorted.
    pub unused: Vec<String>,
}

impl Coverage {
    /// Check `values` against already scanned `placeholders`.
    pub fn check(placeholders: &[Placeholder], values: &SubstitutionMap) -> Self {
        let missing = placeholders
            .iter()
            .filter(|p| !values.contains_key(&p.name))
            .cloned()
            .collect();

        let mut unused: Vec<String> = values
            .keys()
            .filter(|key| !placeholders.iter().any(|p| p.name == *key))
            .map(str::to_string)
            .collect();
        unused.sort_unstable();

        Self { missing, unused }
    }

    /// Whether every placeholder in the pattern resolves.
    ///
    /// Unused keys do not make coverage incomplete.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}
