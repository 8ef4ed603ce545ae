//! Substitution maps consumed by the pattern formatter.
//!
//! A [`SubstitutionMap`] maps placeholder names to replacement text. A value
//! may be explicitly absent, which formats as empty text but is still a
//! distinct value for equality and hashing.

use rustc_hash::FxHashMap;

use crate::{ArtifactHash, SubstitutionError};

/// Longest placeholder name accepted by the robust formatter, in characters.
pub const MAX_PLACEHOLDER_LEN: usize = 50;

/// Check if a character can start a placeholder name.
#[inline]
pub fn is_placeholder_start(c: char) -> bool {
    c.is_alphabetic()
}

/// Check if a character can continue a placeholder name.
#[inline]
pub fn is_placeholder_continue(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '.' | '-' | '_' | ' ' | '/')
}

/// Check if `name` is a well-formed placeholder name.
///
/// Valid names start with a letter, continue with letters, digits or one of
/// `. - _ / space`, and are at most [`MAX_PLACEHOLDER_LEN`] characters long.
/// In particular a valid name never contains a brace.
pub fn is_valid_placeholder_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_placeholder_start(first) => {}
        _ => return false,
    }
    let mut len = 1;
    for c in chars {
        if !is_placeholder_continue(c) {
            return false;
        }
        len += 1;
    }
    len <= MAX_PLACEHOLDER_LEN
}

/// Map from placeholder name to replacement text.
///
/// Keys are validated on insertion with [`is_valid_placeholder_name`]. Since
/// keys can never contain `}`, at most one key can match a `{Key}` token at a
/// given position, so formatting never depends on enumeration order.
#[derive(Debug, Clone, Default)]
pub struct SubstitutionMap {
    entries: FxHashMap<String, Option<String>>,
}

impl SubstitutionMap {
    /// Create a new empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty map with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Build a map from `(key, value)` pairs, rejecting duplicate keys.
    ///
    /// # Errors
    /// Returns [`SubstitutionError::InvalidKey`] for a malformed key and
    /// [`SubstitutionError::DuplicateKey`] if a key appears twice.
    pub fn try_from_pairs<K, V>(
        pairs: impl IntoIterator<Item = (K, Option<V>)>,
    ) -> Result<Self, SubstitutionError>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let pairs = pairs.into_iter();
        let mut map = Self::with_capacity(pairs.size_hint().0);
        for (key, value) in pairs {
            let key = key.into();
            validate_key(&key)?;
            if map.entries.contains_key(&key) {
                return Err(SubstitutionError::DuplicateKey { key });
            }
            map.entries.insert(key, value.map(Into::into));
        }
        Ok(map)
    }

    /// Insert or replace a replacement value.
    ///
    /// # Errors
    /// Returns [`SubstitutionError::InvalidKey`] if `key` is not a valid placeholder name.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), SubstitutionError> {
        let key = key.into();
        validate_key(&key)?;
        self.entries.insert(key, Some(value.into()));
        Ok(())
    }

    /// Insert a key whose value is explicitly absent (formats as empty text).
    ///
    /// # Errors
    /// Returns [`SubstitutionError::InvalidKey`] if `key` is not a valid placeholder name.
    pub fn insert_absent(&mut self, key: impl Into<String>) -> Result<(), SubstitutionError> {
        let key = key.into();
        validate_key(&key)?;
        self.entries.insert(key, None);
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, SubstitutionError> {
        self.insert(key, value)?;
        Ok(self)
    }

    /// Raw lookup. The outer `Option` is key presence, the inner one value presence.
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.entries.get(key).map(|value| value.as_deref())
    }

    /// The text a placeholder named `key` formats to, or `None` if the key is unknown.
    #[inline]
    pub fn replacement(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .map(|value| value.as_deref().unwrap_or(""))
    }

    /// Check if the map has an entry for `key`.
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> + '_ {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_deref()))
    }

    /// Iterate over keys in unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Total length in bytes of all replacement texts.
    pub fn replacement_len(&self) -> usize {
        self.entries
            .values()
            .map(|value| value.as_ref().map_or(0, String::len))
            .sum()
    }

    /// Order-independent hash of the map contents.
    pub fn content_hash(&self) -> ArtifactHash {
        ArtifactHash::combine_unordered(
            self.iter()
                .map(|(key, value)| ArtifactHash::from_entry(key, value)),
        )
    }
}

impl PartialEq for SubstitutionMap {
    fn eq(&self, other: &Self) -> bool {
        if self.entries.len() != other.entries.len() {
            return false;
        }
        self.entries
            .iter()
            .all(|(key, value)| other.entries.get(key) == Some(value))
    }
}

impl Eq for SubstitutionMap {}

fn validate_key(key: &str) -> Result<(), SubstitutionError> {
    if is_valid_placeholder_name(key) {
        Ok(())
    } else {
        Err(SubstitutionError::InvalidKey {
            key: key.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_names() {
        assert!(is_valid_placeholder_name("Name"));
        assert!(is_valid_placeholder_name("Type.Full-Name_2/x y"));
        assert!(!is_valid_placeholder_name(""));
        assert!(!is_valid_placeholder_name("1Name"));
        assert!(!is_valid_placeholder_name("_Name"));
        assert!(!is_valid_placeholder_name("Na}me"));
        assert!(!is_valid_placeholder_name("Na{me"));
        assert!(!is_valid_placeholder_name("Line\nBreak"));
    }

    #[test]
    fn placeholder_name_length_bound() {
        let at_limit = "a".repeat(MAX_PLACEHOLDER_LEN);
        let over_limit = "a".repeat(MAX_PLACEHOLDER_LEN + 1);
        assert!(is_valid_placeholder_name(&at_limit));
        assert!(!is_valid_placeholder_name(&over_limit));
    }

    #[test]
    fn insert_and_lookup() {
        let mut map = SubstitutionMap::new();
        map.insert("Name", "Lookup").unwrap();
        map.insert_absent("Attributes").unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("Name"), Some(Some("Lookup")));
        assert_eq!(map.get("Attributes"), Some(None));
        assert_eq!(map.get("Missing"), None);

        assert_eq!(map.replacement("Name"), Some("Lookup"));
        assert_eq!(map.replacement("Attributes"), Some(""));
        assert_eq!(map.replacement("Missing"), None);
    }

    #[test]
    fn insert_rejects_invalid_key() {
        let mut map = SubstitutionMap::new();
        let err = map.insert("{Name}", "x").unwrap_err();
        assert_eq!(
            err,
            SubstitutionError::InvalidKey {
                key: "{Name}".into()
            }
        );
        assert!(map.is_empty());
    }

    #[test]
    fn insert_replaces_existing_value() {
        let mut map = SubstitutionMap::new();
        map.insert("Name", "A").unwrap();
        map.insert("Name", "B").unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.replacement("Name"), Some("B"));
    }

    #[test]
    fn try_from_pairs_rejects_duplicates() {
        let result =
            SubstitutionMap::try_from_pairs([("Name", Some("A")), ("Name", Some("B"))]);
        assert_eq!(
            result.unwrap_err(),
            SubstitutionError::DuplicateKey { key: "Name".into() }
        );
    }

    #[test]
    fn equality_is_content_based() {
        let a = SubstitutionMap::try_from_pairs([("A", Some("1")), ("B", Some("2"))]).unwrap();
        let b = SubstitutionMap::try_from_pairs([("B", Some("2")), ("A", Some("1"))]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.content_hash(), b.content_hash());
    }

    #[test]
    fn equality_distinguishes_absent_from_empty() {
        let absent = SubstitutionMap::try_from_pairs([("A", None::<&str>)]).unwrap();
        let empty = SubstitutionMap::try_from_pairs([("A", Some(""))]).unwrap();
        assert_ne!(absent, empty);
        assert_ne!(absent.content_hash(), empty.content_hash());
    }

    #[test]
    fn equality_requires_same_keys() {
        let a = SubstitutionMap::try_from_pairs([("A", Some("1"))]).unwrap();
        let b = SubstitutionMap::try_from_pairs([("B", Some("1"))]).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn replacement_len_sums_values() {
        let map = SubstitutionMap::try_from_pairs([
            ("A", Some("abc")),
            ("B", None),
            ("C", Some("de")),
        ])
        .unwrap();
        assert_eq!(map.replacement_len(), 5);
    }
}
