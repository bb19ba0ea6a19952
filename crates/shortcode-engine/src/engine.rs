//! Shortcode expansion, stripping and probing.
//!
//! [`Shortcodes`] owns the tag registry, the hook chains and the runtime
//! options. Every operation is a single left-to-right pass over the scanner's
//! matches; text between matches is copied through unchanged.

use crate::registry::sort_longest_first;
use crate::{
    Atts, Attributes, HookArgs, Hooks, Match, Scanner, ShortcodeContext, ShortcodeError,
    ShortcodeHandler, TagRegistry, defaults,
};

/// Runtime options for [`Shortcodes`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortcodesConfig {
    /// Hide brackets inside HTML tags and comments from the scanner.
    ///
    /// Default: `false`
    pub ignore_html: bool,
}

impl ShortcodesConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether HTML tags and comments are masked while scanning.
    #[must_use]
    pub fn with_ignore_html(mut self, ignore_html: bool) -> Self {
        self.ignore_html = ignore_html;
        self
    }
}

/// Shortcode engine: registry, hooks and the passes that use them.
///
/// # Example
///
/// ```
/// use shortcode_engine::{Atts, ShortcodeContext, Shortcodes};
///
/// let mut shortcodes = Shortcodes::new();
/// shortcodes
///     .register("gallery", |atts: &Atts, _: Option<&str>, _: &ShortcodeContext<'_>| {
///         format!("<div class=\"gallery\">{}</div>", atts.get("ids").unwrap_or_default())
///     })
///     .unwrap();
///
/// let content = r#"Photos: [gallery ids="1,2"] Escaped: [[gallery]]"#;
/// assert_eq!(
///     shortcodes.expand(content),
///     r#"Photos: <div class="gallery">1,2</div> Escaped: [gallery]"#
/// );
/// assert_eq!(shortcodes.strip(content, None), "Photos:  Escaped: [gallery]");
/// assert!(shortcodes.has_tag(content, "gallery"));
/// ```
#[derive(Debug, Default)]
pub struct Shortcodes {
    registry: TagRegistry,
    hooks: Hooks,
    config: ShortcodesConfig,
}

impl Shortcodes {
    /// Create an engine with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ShortcodesConfig::default())
    }

    /// Create an engine with custom configuration.
    #[must_use]
    pub fn with_config(config: ShortcodesConfig) -> Self {
        Self {
            registry: TagRegistry::new(),
            hooks: Hooks::new(),
            config,
        }
    }

    /// Runtime options.
    #[must_use]
    pub fn config(&self) -> &ShortcodesConfig {
        &self.config
    }

    /// The tag registry.
    #[must_use]
    pub fn registry(&self) -> &TagRegistry {
        &self.registry
    }

    /// Mutable access to the tag registry.
    pub fn registry_mut(&mut self) -> &mut TagRegistry {
        &mut self.registry
    }

    /// The hook chains.
    #[must_use]
    pub fn hooks(&self) -> &Hooks {
        &self.hooks
    }

    /// Mutable access to the hook chains.
    pub fn hooks_mut(&mut self) -> &mut Hooks {
        &mut self.hooks
    }

    /// Bind a handler to a tag name.
    ///
    /// # Errors
    ///
    /// Returns [`ShortcodeError::InvalidTagName`] for names the scanner could
    /// not match unambiguously.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        handler: impl ShortcodeHandler + 'static,
    ) -> Result<(), ShortcodeError> {
        self.registry.register(name, handler)
    }

    /// Remove a binding. Does nothing if the name is not registered.
    pub fn unregister(&mut self, name: &str) {
        self.registry.unregister(name);
    }

    /// Whether a handler is registered for the name.
    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        self.registry.exists(name)
    }

    /// Scanner over every registered name.
    #[must_use]
    pub fn scanner(&self) -> Scanner<'_> {
        Scanner::new(self.registry.names_snapshot()).ignore_html(self.config.ignore_html)
    }

    /// Replace registered shortcodes in `content` with their handlers' output.
    ///
    /// One pass, not recursive: enclosed content is handed to the handler
    /// as-is, and a handler that wants nested shortcodes expanded calls
    /// [`ShortcodeContext::expand`] itself. Escaped tags (`[[tag]]`) lose one
    /// bracket on each side and are not rendered. Unregistered tags pass
    /// through unchanged.
    #[must_use]
    pub fn expand(&self, content: &str) -> String {
        if self.registry.is_empty() || !content.contains('[') {
            return content.to_owned();
        }

        let mut output = String::with_capacity(content.len());
        let mut last = 0;

        for found in self.scanner().scan(content) {
            output.push_str(&content[last..found.span.start]);
            last = found.span.end;

            if found.is_escaped() {
                output.push_str(&content[found.tag_span()]);
                continue;
            }

            if found.lead_escape {
                output.push('[');
            }
            output.push_str(&self.render(content, &found));
            if found.trail_escape {
                output.push(']');
            }
        }

        output.push_str(&content[last..]);
        output
    }

    fn render(&self, content: &str, found: &Match<'_>) -> String {
        let atts = Atts::parse(found.attr_text);
        let args = HookArgs {
            tag: found.name,
            atts: &atts,
            matched: found,
        };

        let rendered = if let Some(output) = self.hooks.apply_pre_render(&args) {
            tracing::trace!(tag = %found.name, "Pre-render hook replaced shortcode output");
            output
        } else {
            let Some(handler) = self.registry.get(found.name) else {
                return content[found.tag_span()].to_owned();
            };
            let ctx = ShortcodeContext {
                tag: found.name,
                engine: self,
            };
            handler.render(&atts, found.content, &ctx)
        };

        self.hooks.apply_post_render(rendered, &args)
    }

    /// Remove registered shortcodes from `content`.
    ///
    /// `allowed` limits which tags are removed (default: every registered
    /// tag). The list is passed through the strip-tags hook chain and then
    /// narrowed to registered names. Enclosed content is removed along with
    /// its tags; escaped tags are un-escaped and lone escape brackets kept, as
    /// in [`expand`](Self::expand).
    #[must_use]
    pub fn strip(&self, content: &str, allowed: Option<&[&str]>) -> String {
        if self.registry.is_empty() || !content.contains('[') {
            return content.to_owned();
        }

        let requested = match allowed {
            Some(names) => names.iter().map(|name| (*name).to_owned()).collect(),
            None => self.registry.names_snapshot().to_vec(),
        };
        let mut names: Vec<String> = self
            .hooks
            .apply_strip_tags(requested, content)
            .into_iter()
            .filter(|name| self.registry.exists(name))
            .collect();
        if names.is_empty() {
            return content.to_owned();
        }
        sort_longest_first(&mut names);
        names.dedup();

        let mut output = String::with_capacity(content.len());
        let mut last = 0;

        let scanner = Scanner::new(&names).ignore_html(self.config.ignore_html);
        for found in scanner.scan(content) {
            output.push_str(&content[last..found.span.start]);
            last = found.span.end;

            if found.is_escaped() {
                output.push_str(&content[found.tag_span()]);
                continue;
            }

            if found.lead_escape {
                output.push('[');
            }
            if found.trail_escape {
                output.push(']');
            }
        }

        output.push_str(&content[last..]);
        output
    }

    /// Whether `tag` occurs in `content`, at top level or inside the enclosed
    /// content of another shortcode at any depth.
    ///
    /// Always `false` for unregistered tags.
    #[must_use]
    pub fn has_tag(&self, content: &str, tag: &str) -> bool {
        if !self.registry.exists(tag) || !content.contains('[') {
            return false;
        }

        let scanner = self.scanner();
        let mut pending = vec![content];
        while let Some(text) = pending.pop() {
            for found in scanner.scan(text) {
                if found.name == tag {
                    return true;
                }
                if let Some(inner) = found.content {
                    pending.push(inner);
                }
            }
        }

        false
    }

    /// Registered tag names used in `content`, including inside enclosed
    /// content, deduplicated in order of first appearance.
    #[must_use]
    pub fn tags_in_content(&self, content: &str) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();
        if self.registry.is_empty() || !content.contains('[') {
            return tags;
        }

        let scanner = self.scanner();
        let mut stack = vec![scanner.scan(content)];
        while let Some(matches) = stack.last_mut() {
            let Some(found) = matches.next() else {
                stack.pop();
                continue;
            };
            if !tags.iter().any(|tag| tag == found.name) {
                tags.push(found.name.to_owned());
            }
            if let Some(inner) = found.content {
                stack.push(scanner.scan(inner));
            }
        }

        tags
    }

    /// Merge `atts` over `defaults`, then run the attribute hooks of `tag`.
    ///
    /// See [`merge_defaults`](crate::merge_defaults) for the merge rules.
    #[must_use]
    pub fn merge_defaults(
        &self,
        defaults: &Attributes,
        atts: &Atts,
        tag: Option<&str>,
    ) -> Attributes {
        let merged = defaults::merge_defaults(defaults, atts);
        match tag {
            Some(tag) => self.hooks.apply_atts(tag, merged, defaults, atts),
            None => merged,
        }
    }
}
