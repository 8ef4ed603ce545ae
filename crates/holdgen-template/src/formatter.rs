//! Placeholder substitution.
//!
//! Two scanning strategies are provided:
//!
//! - **Simple**: at every `{`, try each key of the map as a prefix of the
//!   remaining text and accept it if a `}` follows immediately. Cheap for the
//!   small maps the holder generators use. Keys longer than 30 characters
//!   never match.
//! - **Robust**: at every `{`, read a complete placeholder name first
//!   (letter-led, at most 50 characters, terminated by `}` before any line
//!   break), then look it up exactly. Blocks of code containing raw `{` pass
//!   through untouched.
//!
//! Both strategies degrade the same way: a `{` that does not start a known
//! placeholder is copied to the output and scanning resumes right after it.
//! Formatting never fails.

use holdgen_core::{
    MAX_PLACEHOLDER_LEN, SubstitutionMap, is_placeholder_continue, is_placeholder_start,
};

use crate::cursor::Cursor;

/// Longest key the simple strategy will match, in characters.
pub const SIMPLE_MAX_PLACEHOLDER_LEN: usize = 30;

/// Placeholder scanning strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FormatStyle {
    Simple,
    #[default]
    Robust,
}

impl FormatStyle {
    /// Placeholder length bound used when none is configured.
    pub const fn default_max_len(self) -> usize {
        match self {
            FormatStyle::Simple => SIMPLE_MAX_PLACEHOLDER_LEN,
            FormatStyle::Robust => MAX_PLACEHOLDER_LEN,
        }
    }
}

/// Substitutes `{Name}` placeholders in patterns.
///
/// # Example
///
/// ```
/// use holdgen_core::SubstitutionMap;
/// use holdgen_template::PatternFormatter;
///
/// let values = SubstitutionMap::new().with("Key", "VAL").unwrap();
/// let out = PatternFormatter::robust().format("pre{Key}post", &values);
/// assert_eq!(out, "preVALpost");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PatternFormatter {
    style: FormatStyle,
    max_placeholder_len: usize,
}

impl Default for PatternFormatter {
    fn default() -> Self {
        Self::new(FormatStyle::default())
    }
}

impl PatternFormatter {
    /// Create a formatter with the style's default length bound.
    pub const fn new(style: FormatStyle) -> Self {
        Self {
            style,
            max_placeholder_len: style.default_max_len(),
        }
    }

    pub const fn simple() -> Self {
        Self::new(FormatStyle::Simple)
    }

    pub const fn robust() -> Self {
        Self::new(FormatStyle::Robust)
    }

    /// Override the placeholder length bound (in characters).
    pub const fn with_max_placeholder_len(mut self, max_placeholder_len: usize) -> Self {
        self.max_placeholder_len = max_placeholder_len;
        self
    }

    #[inline]
    pub fn style(&self) -> FormatStyle {
        self.style
    }

    #[inline]
    pub fn max_placeholder_len(&self) -> usize {
        self.max_placeholder_len
    }

    /// Substitute every recognised placeholder in `pattern`.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn format(&self, pattern: &str, values: &SubstitutionMap) -> String {
        match self.style {
            FormatStyle::Simple => format_prefix_scan(pattern, values, self.max_placeholder_len),
            FormatStyle::Robust => format_exact_scan(pattern, values, self.max_placeholder_len),
        }
    }
}

/// Format with the simple strategy and its default length bound.
pub fn format_simple(pattern: &str, values: &SubstitutionMap) -> String {
    format_prefix_scan(pattern, values, SIMPLE_MAX_PLACEHOLDER_LEN)
}

/// Format with the robust strategy and its default length bound.
pub fn format_robust(pattern: &str, values: &SubstitutionMap) -> String {
    format_exact_scan(pattern, values, MAX_PLACEHOLDER_LEN)
}

fn format_prefix_scan(pattern: &str, values: &SubstitutionMap, max_len: usize) -> String {
    let mut out = String::with_capacity(pattern.len() + values.replacement_len());
    let mut rest = pattern;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        match match_key_prefix(after, values, max_len) {
            Some((consumed, replacement)) => {
                out.push_str(replacement);
                rest = &after[consumed..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Find the key that `text` starts with, immediately followed by `}`.
///
/// Returns the number of bytes to consume (closing brace included) and the replacement.
fn match_key_prefix<'m>(
    text: &str,
    values: &'m SubstitutionMap,
    max_len: usize,
) -> Option<(usize, &'m str)> {
    values.iter().find_map(|(key, value)| {
        let tail = text.strip_prefix(key)?;
        if !tail.starts_with('}') || key.chars().count() > max_len {
            return None;
        }
        Some((key.len() + 1, value.unwrap_or("")))
    })
}

fn format_exact_scan(pattern: &str, values: &SubstitutionMap, max_len: usize) -> String {
    let mut out = String::with_capacity(pattern.len() + values.replacement_len());
    let mut cursor = Cursor::new(pattern);

    loop {
        out.push_str(cursor.eat_until('{'));
        if !cursor.eat('{') {
            break;
        }

        let replacement = read_placeholder_name(cursor.rest(), max_len)
            .and_then(|name| Some((name.len(), values.replacement(name)?)));

        match replacement {
            Some((name_len, text)) => {
                out.push_str(text);
                cursor.advance_bytes(name_len + 1);
            }
            None => out.push('{'),
        }
    }

    out
}

/// Read a placeholder name at the start of `text` (just after a `{`).
///
/// Returns the name without its closing brace, or `None` if the text does not
/// start with a valid name terminated by `}` on the same line.
pub(crate) fn read_placeholder_name(text: &str, max_len: usize) -> Option<&str> {
    let mut chars = text.char_indices();
    match chars.next() {
        Some((_, first)) if is_placeholder_start(first) => {}
        _ => return None,
    }

    let mut len = 1;
    for (index, c) in chars {
        match c {
            '}' => return (len <= max_len).then(|| &text[..index]),
            '\n' | '\r' => return None,
            c if is_placeholder_continue(c) => {
                len += 1;
                if len > max_len {
                    return None;
                }
            }
            _ => return None,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> SubstitutionMap {
        SubstitutionMap::try_from_pairs(pairs.iter().map(|(k, v)| (*k, Some(*v)))).unwrap()
    }

    fn both(pattern: &str, map: &SubstitutionMap) -> (String, String) {
        (format_simple(pattern, map), format_robust(pattern, map))
    }

    #[test]
    fn empty_pattern() {
        let map = values(&[("Key", "VAL")]);
        assert_eq!(both("", &map), (String::new(), String::new()));
    }

    #[test]
    fn substitution_round_trip() {
        let map = values(&[("Key", "VAL")]);
        let (simple, robust) = both("pre{Key}post", &map);
        assert_eq!(simple, "preVALpost");
        assert_eq!(robust, "preVALpost");
    }

    #[test]
    fn repeated_placeholder_is_replaced_everywhere() {
        let map = values(&[("Name", "Lookup")]);
        let (simple, robust) = both("{Name}::{Name}({Name})", &map);
        assert_eq!(simple, "Lookup::Lookup(Lookup)");
        assert_eq!(robust, "Lookup::Lookup(Lookup)");
    }

    #[test]
    fn literal_pattern_is_preserved() {
        let map = values(&[("Key", "VAL")]);
        let pattern = "fn main() { println!(\"no placeholders\"); }";
        let (simple, robust) = both(pattern, &map);
        assert_eq!(simple, pattern);
        assert_eq!(robust, pattern);
    }

    #[test]
    fn missing_placeholder_degrades_to_literal() {
        let empty = SubstitutionMap::new();
        assert_eq!(both("{Missing}", &empty), ("{Missing}".into(), "{Missing}".into()));

        let other = values(&[("Present", "x")]);
        assert_eq!(both("{Missing}", &other), ("{Missing}".into(), "{Missing}".into()));
    }

    #[test]
    fn absent_value_formats_as_empty() {
        let mut map = SubstitutionMap::new();
        map.insert_absent("Attributes").unwrap();
        let (simple, robust) = both("[{Attributes}]", &map);
        assert_eq!(simple, "[]");
        assert_eq!(robust, "[]");
    }

    #[test]
    fn prefix_keys_do_not_collide() {
        let map = values(&[("Name", "short"), ("NameQualified", "long")]);
        let (simple, robust) = both("{Name} {NameQualified}", &map);
        assert_eq!(simple, "short long");
        assert_eq!(robust, "short long");
    }

    #[test]
    fn newline_guard_in_robust_variant() {
        let map = values(&[("Key", "VAL")]);
        let pattern = "{Key\nstilltext}";
        assert_eq!(format_robust(pattern, &map), pattern);
    }

    #[test]
    fn carriage_return_also_guards() {
        let map = values(&[("Key", "VAL")]);
        let pattern = "{Key\r\n}";
        assert_eq!(format_robust(pattern, &map), pattern);
    }

    #[test]
    fn code_blocks_pass_through() {
        let map = values(&[("Name", "Lookup")]);
        let pattern = "impl {Name} {\n    fn f() -> u8 { 0 }\n}\n";
        let expected = "impl Lookup {\n    fn f() -> u8 { 0 }\n}\n";
        assert_eq!(format_robust(pattern, &map), expected);
        assert_eq!(format_simple(pattern, &map), expected);
    }

    #[test]
    fn doubled_brace_keeps_outer_literal() {
        let map = values(&[("Key", "VAL")]);
        assert_eq!(format_robust("{{Key}}", &map), "{VAL}");
        assert_eq!(format_simple("{{Key}}", &map), "{VAL}");
    }

    #[test]
    fn unterminated_placeholder_at_end() {
        let map = values(&[("Key", "VAL")]);
        assert_eq!(both("tail {Key", &map), ("tail {Key".into(), "tail {Key".into()));
        assert_eq!(both("tail {", &map), ("tail {".into(), "tail {".into()));
    }

    #[test]
    fn robust_rejects_disallowed_characters() {
        let map = values(&[("Key", "VAL")]);
        assert_eq!(format_robust("{Ke$y}", &map), "{Ke$y}");
        assert_eq!(format_robust("{1Key}", &map), "{1Key}");
        assert_eq!(format_robust("{ Key}", &map), "{ Key}");
    }

    #[test]
    fn robust_accepts_extended_name_characters() {
        let map = values(&[("Type.Full-Name_2/x y", "ok")]);
        assert_eq!(format_robust("<{Type.Full-Name_2/x y}>", &map), "<ok>");
    }

    #[test]
    fn length_bound_simple() {
        let long_key = "a".repeat(SIMPLE_MAX_PLACEHOLDER_LEN + 1);
        let ok_key = "b".repeat(SIMPLE_MAX_PLACEHOLDER_LEN);
        let map = values(&[(long_key.as_str(), "X"), (ok_key.as_str(), "Y")]);

        let long_pattern = format!("{{{long_key}}}");
        let ok_pattern = format!("{{{ok_key}}}");
        assert_eq!(format_simple(&long_pattern, &map), long_pattern);
        assert_eq!(format_simple(&ok_pattern, &map), "Y");

        // The robust bound is larger, so the same key substitutes there.
        assert_eq!(format_robust(&long_pattern, &map), "X");
    }

    #[test]
    fn length_bound_robust() {
        let key = "k".repeat(MAX_PLACEHOLDER_LEN);
        let map = values(&[(key.as_str(), "X")]);
        let pattern = format!("{{{key}}}");
        assert_eq!(format_robust(&pattern, &map), "X");

        let formatter = PatternFormatter::robust().with_max_placeholder_len(10);
        assert_eq!(formatter.format(&pattern, &map), pattern);
    }

    #[test]
    fn utf8_literals_survive() {
        let map = values(&[("Name", "Größe")]);
        let (simple, robust) = both("« {Name} » {ß}", &map);
        assert_eq!(simple, "« Größe » {ß}");
        assert_eq!(robust, "« Größe » {ß}");
    }

    #[test]
    fn formatter_dispatches_on_style() {
        let map = values(&[("Key", "VAL")]);
        assert_eq!(PatternFormatter::simple().style(), FormatStyle::Simple);
        assert_eq!(PatternFormatter::default().style(), FormatStyle::Robust);
        assert_eq!(PatternFormatter::simple().max_placeholder_len(), 30);
        assert_eq!(PatternFormatter::robust().max_placeholder_len(), 50);
        assert_eq!(PatternFormatter::simple().format("{Key}", &map), "VAL");
        assert_eq!(PatternFormatter::robust().format("{Key}", &map), "VAL");
    }

    #[test]
    fn read_placeholder_name_rules() {
        assert_eq!(read_placeholder_name("Name}rest", 50), Some("Name"));
        assert_eq!(read_placeholder_name("Name", 50), None);
        assert_eq!(read_placeholder_name("}", 50), None);
        assert_eq!(read_placeholder_name("Na\nme}", 50), None);
        assert_eq!(read_placeholder_name("abcd}", 3), None);
        assert_eq!(read_placeholder_name("abc}", 3), Some("abc"));
    }
}
