//! Merging shortcode attributes over defaults.

use crate::{Atts, Attributes};

/// Merge parsed attributes over `defaults`.
///
/// The result has exactly the keys of `defaults`, in their order. Each value
/// comes from `atts` when present there, otherwise from `defaults`; keys that
/// only appear in `atts` (including positional ones) are dropped.
///
/// Per-tag attribute hooks are applied by
/// [`Shortcodes::merge_defaults`](crate::Shortcodes::merge_defaults), not here.
///
/// # Example
///
/// ```
/// use shortcode_engine::{Atts, Attributes, merge_defaults};
///
/// let defaults: Attributes = [("foo", "no foo"), ("baz", "default baz")].into_iter().collect();
/// let merged = merge_defaults(&defaults, &Atts::parse(r#"foo="foo1" 12 extra=1"#));
///
/// assert_eq!(merged.get("foo"), Some("foo1"));
/// assert_eq!(merged.get("baz"), Some("default baz"));
/// assert_eq!(merged.len(), 2);
/// ```
#[must_use]
pub fn merge_defaults(defaults: &Attributes, atts: &Atts) -> Attributes {
    defaults
        .iter()
        .map(|(key, default)| {
            let value = atts.get_key(key).unwrap_or(default);
            (key.clone(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::AttrKey;

    fn defaults() -> Attributes {
        [("foo", "no foo"), ("baz", "default baz")]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_no_attributes_yields_defaults() {
        assert_eq!(merge_defaults(&defaults(), &Atts::NoAttributes), defaults());
    }

    #[test]
    fn test_override_keeps_default_order() {
        let merged = merge_defaults(&defaults(), &Atts::parse("baz=1 foo=2"));
        let keys: Vec<String> = merged.keys().map(ToString::to_string).collect();
        assert_eq!(keys, ["foo", "baz"]);
        assert_eq!(merged.get("foo"), Some("2"));
        assert_eq!(merged.get("baz"), Some("1"));
    }

    #[test]
    fn test_unknown_and_positional_dropped() {
        let merged = merge_defaults(&defaults(), &Atts::parse("positional other=x"));
        assert_eq!(merged, defaults());
        assert!(!merged.contains_key(&AttrKey::Index(0)));
    }

    #[test]
    fn test_empty_value_overrides() {
        let merged = merge_defaults(&defaults(), &Atts::parse(r#"foo="""#));
        assert_eq!(merged.get("foo"), Some(""));
    }

    #[test]
    fn test_positional_default_key() {
        let mut defaults = Attributes::new();
        defaults.insert(0, "fallback");
        let merged = merge_defaults(&defaults, &Atts::parse("given"));
        assert_eq!(merged.positional(0), Some("given"));
    }
}
