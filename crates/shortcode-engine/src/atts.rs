//! Shortcode attribute parsing.
//!
//! Parses the text between a tag name and its closing bracket:
//! `[gallery 123 ids="1,2" size='large' link=file]`.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Token grammar, tried in priority order at each position.
///
/// Every token must be followed by whitespace or the end of the text, so a
/// quoted value glued to trailing text falls through to a later shape.
/// Whitespace here is ASCII only; other Unicode spaces stay inside tokens.
static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"([A-Za-z0-9_-]+)="([^"]*)"(?:[ \t\n\r\x0B\x0C]|$)"#,
        r#"|([A-Za-z0-9_-]+)='([^']*)'(?:[ \t\n\r\x0B\x0C]|$)"#,
        r"|([A-Za-z0-9_-]+)=([^ \t\n\r\x0B\x0C]+)(?:[ \t\n\r\x0B\x0C]|$)",
        r#"|"([^"]*)"(?:[ \t\n\r\x0B\x0C]|$)"#,
        r"|'([^']*)'(?:[ \t\n\r\x0B\x0C]|$)",
        r"|([^ \t\n\r\x0B\x0C]+)(?:[ \t\n\r\x0B\x0C]|$)",
    ))
    .unwrap()
});

/// Runs of no-break and zero-width spaces, each folded into one space.
static SPECIAL_SPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x{00a0}\x{200b}]+").unwrap());

/// Whitespace trimmed before deciding whether any attributes are present.
fn is_blank(c: char) -> bool {
    matches!(
        c,
        ' ' | '\t' | '\n' | '\r' | '\0' | '\x0B' | '\u{a0}' | '\u{200b}'
    )
}

/// Key of a parsed attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AttrKey {
    /// Positional attribute, numbered from 0 in encounter order.
    Index(usize),
    /// Named attribute (`name=value`), lower-cased.
    Name(String),
}

impl From<usize> for AttrKey {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for AttrKey {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl From<String> for AttrKey {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl fmt::Display for AttrKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// Ordered attribute map with mixed positional and named keys.
///
/// Keys keep the position in which they were first inserted; inserting an
/// existing key replaces its value in place.
///
/// # Example
///
/// ```
/// use shortcode_engine::{AttrKey, Attributes};
///
/// let defaults: Attributes = [("size", "thumbnail"), ("columns", "3")].into_iter().collect();
/// assert_eq!(defaults.get("columns"), Some("3"));
/// assert_eq!(defaults.keys().next(), Some(&AttrKey::Name("size".to_owned())));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(AttrKey, String)>,
    /// Position of each key in `entries`.
    index: HashMap<AttrKey, usize>,
    positional: usize,
}

impl Attributes {
    /// Create an empty attribute map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any existing value for the key in place.
    pub fn insert(&mut self, key: impl Into<AttrKey>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        if let Some(&slot) = self.index.get(&key) {
            self.entries[slot].1 = value;
            return;
        }
        if let AttrKey::Index(index) = key {
            self.positional = self.positional.max(index + 1);
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
    }

    /// Append a positional value under the next free index and return it.
    pub fn push_positional(&mut self, value: impl Into<String>) -> usize {
        let index = self.positional;
        self.insert(AttrKey::Index(index), value);
        index
    }

    /// Get a named attribute.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_key(&AttrKey::Name(name.to_owned()))
    }

    /// Get a positional attribute.
    #[must_use]
    pub fn positional(&self, index: usize) -> Option<&str> {
        self.get_key(&AttrKey::Index(index))
    }

    /// Get an attribute by key.
    #[must_use]
    pub fn get_key(&self, key: &AttrKey) -> Option<&str> {
        self.index
            .get(key)
            .map(|&slot| self.entries[slot].1.as_str())
    }

    /// Whether the key is present.
    #[must_use]
    pub fn contains_key(&self, key: &AttrKey) -> bool {
        self.index.contains_key(key)
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&AttrKey, &str)> {
        self.entries.iter().map(|(k, v)| (k, v.as_str()))
    }

    /// Iterate over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &AttrKey> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<AttrKey>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut atts = Self::new();
        for (key, value) in iter {
            atts.insert(key, value);
        }
        atts
    }
}

/// Parsed attributes of one shortcode occurrence.
///
/// `NoAttributes` is distinct from an empty map: it means the attribute text
/// was blank, while `Parsed` means at least one token was read.
///
/// # Example
///
/// ```
/// use shortcode_engine::Atts;
///
/// let atts = Atts::parse(r#"123 url=https://x foo bar="baz""#);
/// assert_eq!(atts.positional(0), Some("123"));
/// assert_eq!(atts.get("url"), Some("https://x"));
/// assert_eq!(atts.positional(1), Some("foo"));
/// assert_eq!(atts.get("bar"), Some("baz"));
///
/// assert_eq!(Atts::parse("  "), Atts::NoAttributes);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Atts {
    /// The attribute text was blank.
    NoAttributes,
    /// One or more attribute tokens.
    Parsed(Attributes),
}

impl Atts {
    /// Parse an attribute string.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        if text.trim_matches(is_blank).is_empty() {
            return Self::NoAttributes;
        }

        let text = SPECIAL_SPACE_RE.replace_all(text, " ");
        let mut atts = Attributes::new();

        for caps in ATTR_RE.captures_iter(&text) {
            let named = [(1, 2), (3, 4), (5, 6)]
                .into_iter()
                .find_map(|(n, v)| Some((caps.get(n)?, caps.get(v)?)));

            if let Some((name, value)) = named {
                atts.insert(name.as_str().to_ascii_lowercase(), value.as_str());
            } else if let Some(value) = caps.get(7).or_else(|| caps.get(8)).or_else(|| caps.get(9))
            {
                atts.push_positional(value.as_str());
            }
        }

        Self::Parsed(atts)
    }

    /// Get a named attribute.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.as_attributes().and_then(|atts| atts.get(name))
    }

    /// Get a positional attribute.
    #[must_use]
    pub fn positional(&self, index: usize) -> Option<&str> {
        self.as_attributes().and_then(|atts| atts.positional(index))
    }

    /// Get an attribute by key.
    #[must_use]
    pub fn get_key(&self, key: &AttrKey) -> Option<&str> {
        self.as_attributes().and_then(|atts| atts.get_key(key))
    }

    /// The parsed map, if any tokens were read.
    #[must_use]
    pub fn as_attributes(&self) -> Option<&Attributes> {
        match self {
            Self::NoAttributes => None,
            Self::Parsed(atts) => Some(atts),
        }
    }

    /// Whether this is the `NoAttributes` sentinel.
    #[must_use]
    pub fn is_no_attributes(&self) -> bool {
        matches!(self, Self::NoAttributes)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn entries(atts: &Atts) -> Vec<(AttrKey, String)> {
        atts.as_attributes()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.clone(), v.to_owned()))
            .collect()
    }

    fn name(s: &str) -> AttrKey {
        AttrKey::Name(s.to_owned())
    }

    #[test]
    fn test_empty_is_no_attributes() {
        assert_eq!(Atts::parse(""), Atts::NoAttributes);
        assert_eq!(Atts::parse("   "), Atts::NoAttributes);
        assert_eq!(Atts::parse("\t\n "), Atts::NoAttributes);
    }

    #[test]
    fn test_special_whitespace_is_no_attributes() {
        assert_eq!(Atts::parse("\u{a0}"), Atts::NoAttributes);
        assert_eq!(Atts::parse("\u{200b} \u{a0}"), Atts::NoAttributes);
    }

    #[test]
    fn test_double_quoted_pairs_keep_order() {
        let atts = Atts::parse(r#"foo="bar" baz="bing""#);
        assert_eq!(
            entries(&atts),
            vec![
                (name("foo"), "bar".to_owned()),
                (name("baz"), "bing".to_owned()),
            ]
        );
    }

    #[test]
    fn test_single_quoted_and_unquoted() {
        let atts = Atts::parse("foo='bar baz' width=560");
        assert_eq!(atts.get("foo"), Some("bar baz"));
        assert_eq!(atts.get("width"), Some("560"));
    }

    #[test]
    fn test_mixed_positional_and_named() {
        let atts = Atts::parse(r#"123 url=https://x foo bar="baz""#);
        assert_eq!(
            entries(&atts),
            vec![
                (AttrKey::Index(0), "123".to_owned()),
                (name("url"), "https://x".to_owned()),
                (AttrKey::Index(1), "foo".to_owned()),
                (name("bar"), "baz".to_owned()),
            ]
        );
    }

    #[test]
    fn test_quoted_positional() {
        let atts = Atts::parse(r#""first value" 'second value'"#);
        assert_eq!(atts.positional(0), Some("first value"));
        assert_eq!(atts.positional(1), Some("second value"));
    }

    #[test]
    fn test_bare_equals_is_positional() {
        let atts = Atts::parse("=https://example.com/");
        assert_eq!(atts.positional(0), Some("=https://example.com/"));
        assert_eq!(atts.as_attributes().unwrap().len(), 1);
    }

    #[test]
    fn test_space_around_equals_is_not_named() {
        let atts = Atts::parse("foo = bar");
        assert_eq!(atts.positional(0), Some("foo"));
        assert_eq!(atts.positional(1), Some("="));
        assert_eq!(atts.positional(2), Some("bar"));
        assert_eq!(atts.get("foo"), None);
    }

    #[test]
    fn test_hyphenated_names() {
        let atts = Atts::parse(r#"data-id="7" -lead=1 trail-="x""#);
        assert_eq!(atts.get("data-id"), Some("7"));
        assert_eq!(atts.get("-lead"), Some("1"));
        assert_eq!(atts.get("trail-"), Some("x"));
    }

    #[test]
    fn test_names_are_lowercased() {
        let atts = Atts::parse(r#"Foo="bar""#);
        assert_eq!(atts.get("foo"), Some("bar"));
        assert_eq!(atts.get("Foo"), None);
    }

    #[test]
    fn test_repeated_name_overwrites_in_place() {
        let atts = Atts::parse("a=1 b=2 a=3");
        assert_eq!(
            entries(&atts),
            vec![(name("a"), "3".to_owned()), (name("b"), "2".to_owned())]
        );
    }

    #[test]
    fn test_empty_quoted_value() {
        let atts = Atts::parse(r#"alt="""#);
        assert_eq!(atts.get("alt"), Some(""));
    }

    #[test]
    fn test_nbsp_separates_tokens() {
        let atts = Atts::parse("a=1\u{a0}b=2\u{200b}c");
        assert_eq!(atts.get("a"), Some("1"));
        assert_eq!(atts.get("b"), Some("2"));
        assert_eq!(atts.positional(0), Some("c"));
    }

    #[test]
    fn test_special_space_runs_collapse() {
        let atts = Atts::parse("x=\"p\u{a0}\u{a0}q\" y=\"r\u{200b}\u{a0}s\"");
        assert_eq!(atts.get("x"), Some("p q"));
        assert_eq!(atts.get("y"), Some("r s"));
    }

    #[test]
    fn test_unicode_space_is_not_a_separator() {
        let atts = Atts::parse("a\u{2003}b");
        assert_eq!(entries(&atts), vec![(AttrKey::Index(0), "a\u{2003}b".to_owned())]);

        let atts = Atts::parse("size=big\u{3000}wide");
        assert_eq!(atts.get("size"), Some("big\u{3000}wide"));
    }

    #[test]
    fn test_many_tokens_parse_in_linear_time() {
        fn best_of_three(text: &str) -> std::time::Duration {
            (0..3)
                .map(|_| {
                    let start = std::time::Instant::now();
                    let atts = Atts::parse(text);
                    let elapsed = start.elapsed();
                    assert!(atts.as_attributes().is_some_and(|a| !a.is_empty()));
                    elapsed
                })
                .min()
                .unwrap()
        }

        let small = "a ".repeat(2_000) + &"k=v ".repeat(2_000);
        let large = "a ".repeat(16_000) + &"k=v ".repeat(16_000);
        let atts = Atts::parse(&large);
        assert_eq!(atts.positional(15_999), Some("a"));
        assert_eq!(atts.as_attributes().map(Attributes::len), Some(16_001));

        let ratio = best_of_three(&large).as_secs_f64() / best_of_three(&small).as_secs_f64();
        assert!(ratio < 32.0, "8x input took {ratio:.1}x longer");
    }

    #[test]
    fn test_value_glued_to_text_falls_through() {
        let atts = Atts::parse(r#""abc"def"#);
        assert_eq!(atts.positional(0), Some(r#""abc"def"#));
    }

    #[test]
    fn test_positional_keys_ignore_named_tokens() {
        let atts = Atts::parse("a=1 x b=2 y c=3 z");
        assert_eq!(atts.positional(0), Some("x"));
        assert_eq!(atts.positional(1), Some("y"));
        assert_eq!(atts.positional(2), Some("z"));
    }

    #[test]
    fn test_self_closing_slash_is_not_special_here() {
        let atts = Atts::parse("foo /");
        assert_eq!(atts.positional(0), Some("foo"));
        assert_eq!(atts.positional(1), Some("/"));
    }

    #[test]
    fn test_attributes_from_iter() {
        let atts: Attributes = [("foo", "no foo"), ("baz", "default baz")]
            .into_iter()
            .collect();
        assert_eq!(atts.len(), 2);
        assert_eq!(atts.get("baz"), Some("default baz"));
        assert!(atts.contains_key(&name("foo")));
    }

    #[test]
    fn test_push_positional_after_explicit_index() {
        let mut atts = Attributes::new();
        atts.insert(3, "d");
        assert_eq!(atts.push_positional("e"), 4);
        assert_eq!(atts.positional(4), Some("e"));
    }

    #[test]
    fn test_key_display() {
        assert_eq!(AttrKey::Index(2).to_string(), "2");
        assert_eq!(name("size").to_string(), "size");
    }
}
