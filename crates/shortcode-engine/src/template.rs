//! Shortcodes rendered from a text template.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::{AttrKey, Atts, Attributes, ShortcodeContext, ShortcodeHandler};

/// `{name}`, `{0}` or `{content}`.
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z0-9_-]+)\}").unwrap());

/// Handler that fills a template with the occurrence's attributes.
///
/// Placeholders:
/// - `{content}`: enclosed content (empty for self-closing tags), expanded
///   first when [`with_expand_content`](Self::with_expand_content) is set
/// - `{N}`: positional attribute `N`
/// - `{name}`: attribute merged over the defaults (attribute hooks applied),
///   or the raw attribute when the defaults do not declare it
///
/// Placeholders with no value stay in the output as written.
///
/// # Example
///
/// ```
/// use shortcode_engine::{Attributes, Shortcodes, TemplateShortcode};
///
/// let defaults: Attributes = [("name", "world")].into_iter().collect();
/// let mut shortcodes = Shortcodes::new();
/// shortcodes
///     .register("greet", TemplateShortcode::new("Hello, {name}!").with_defaults(defaults))
///     .unwrap();
///
/// assert_eq!(shortcodes.expand("[greet] [greet name=Ann]"), "Hello, world! Hello, Ann!");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateShortcode {
    template: String,
    defaults: Attributes,
    expand_content: bool,
}

impl TemplateShortcode {
    /// Create a handler for `template` with no defaults.
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            defaults: Attributes::new(),
            expand_content: false,
        }
    }

    /// Set the default attributes.
    #[must_use]
    pub fn with_defaults(mut self, defaults: Attributes) -> Self {
        self.defaults = defaults;
        self
    }

    /// Expand shortcodes in enclosed content before substituting it.
    #[must_use]
    pub fn with_expand_content(mut self, expand_content: bool) -> Self {
        self.expand_content = expand_content;
        self
    }

    /// The template text.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The default attributes.
    #[must_use]
    pub fn defaults(&self) -> &Attributes {
        &self.defaults
    }
}

impl ShortcodeHandler for TemplateShortcode {
    fn render(&self, atts: &Atts, content: Option<&str>, ctx: &ShortcodeContext<'_>) -> String {
        let merged = ctx.merge_defaults(&self.defaults, atts);
        let content = match content {
            Some(inner) if self.expand_content => Cow::Owned(ctx.expand(inner)),
            Some(inner) => Cow::Borrowed(inner),
            None => Cow::Borrowed(""),
        };

        PLACEHOLDER_RE
            .replace_all(&self.template, |caps: &Captures<'_>| {
                let key = &caps[1];
                if key == "content" {
                    return content.to_string();
                }
                let key = key
                    .parse::<usize>()
                    .map_or_else(|_| AttrKey::from(key), AttrKey::Index);
                merged
                    .get_key(&key)
                    .or_else(|| atts.get_key(&key))
                    .unwrap_or(&caps[0])
                    .to_owned()
            })
            .into_owned()
    }
}
