//! Priority-ordered filter chains around shortcode rendering.
//!
//! Each chain folds a running value through its callbacks: lower priority
//! runs first, equal priorities run in registration order.
//!
//! | Chain | Value | Runs |
//! |-------|-------|------|
//! | pre-render | `Option<String>` (`None` = no override) | before the handler, may replace it |
//! | post-render | `String` | after the handler or override |
//! | atts (per tag) | [`Attributes`] | at the end of defaults merging |
//! | strip tags | `Vec<String>` | before [`Shortcodes::strip`](crate::Shortcodes::strip) scans |

use std::collections::HashMap;
use std::fmt;

use crate::{Atts, Attributes, Match};

/// Priority used when a caller has no ordering preference.
pub const DEFAULT_PRIORITY: i32 = 10;

/// Pre-render callback: `(current, args) -> new`.
pub type PreRenderHook = dyn Fn(Option<String>, &HookArgs<'_>) -> Option<String> + Send + Sync;

/// Post-render callback: `(output, args) -> new output`.
pub type PostRenderHook = dyn Fn(String, &HookArgs<'_>) -> String + Send + Sync;

/// Attribute callback: `(merged, defaults, raw atts) -> merged`.
pub type AttsHook = dyn Fn(Attributes, &Attributes, &Atts) -> Attributes + Send + Sync;

/// Strip tag-name callback: `(names, content) -> names`.
pub type StripTagsHook = dyn Fn(Vec<String>, &str) -> Vec<String> + Send + Sync;

/// What a render hook sees about the occurrence being rendered.
#[derive(Debug, Clone, Copy)]
pub struct HookArgs<'a> {
    /// Tag name.
    pub tag: &'a str,
    /// Parsed attributes.
    pub atts: &'a Atts,
    /// The scanner match.
    pub matched: &'a Match<'a>,
}

/// Callbacks ordered by priority, ties kept in registration order.
pub struct FilterChain<F: ?Sized> {
    entries: Vec<(i32, Box<F>)>,
}

impl<F: ?Sized> Default for FilterChain<F> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<F: ?Sized> FilterChain<F> {
    /// Create an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a callback after every callback with a lower or equal priority.
    pub fn add(&mut self, priority: i32, callback: Box<F>) {
        let at = self.entries.partition_point(|(p, _)| *p <= priority);
        self.entries.insert(at, (priority, callback));
    }

    /// Callbacks in dispatch order.
    pub fn iter(&self) -> impl Iterator<Item = &F> {
        self.entries.iter().map(|(_, callback)| callback.as_ref())
    }

    /// Number of callbacks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the chain has no callbacks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every callback.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<F: ?Sized> fmt::Debug for FilterChain<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterChain")
            .field("priorities", &self.entries.iter().map(|(p, _)| p).collect::<Vec<_>>())
            .finish()
    }
}

/// The hook points consulted by [`Shortcodes`](crate::Shortcodes).
///
/// # Example
///
/// ```
/// use shortcode_engine::{Atts, ShortcodeContext, Shortcodes, DEFAULT_PRIORITY};
///
/// let mut shortcodes = Shortcodes::new();
/// shortcodes
///     .register("year", |_: &Atts, _: Option<&str>, _: &ShortcodeContext<'_>| "2024".to_owned())
///     .unwrap();
/// shortcodes.hooks_mut().on_post_render(DEFAULT_PRIORITY, |output, args| {
///     format!("<span class=\"{}\">{output}</span>", args.tag)
/// });
///
/// assert_eq!(shortcodes.expand("[year]"), r#"<span class="year">2024</span>"#);
/// ```
#[derive(Debug, Default)]
pub struct Hooks {
    pre_render: FilterChain<PreRenderHook>,
    post_render: FilterChain<PostRenderHook>,
    atts: HashMap<String, FilterChain<AttsHook>>,
    strip_tags: FilterChain<StripTagsHook>,
}

impl Hooks {
    /// Create an empty hook set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to the pre-render chain.
    ///
    /// The chain starts at `None`; if it ends at `Some(output)`, the handler
    /// is skipped and `output` is used instead.
    pub fn on_pre_render<F>(&mut self, priority: i32, callback: F)
    where
        F: Fn(Option<String>, &HookArgs<'_>) -> Option<String> + Send + Sync + 'static,
    {
        self.pre_render.add(priority, Box::new(callback));
    }

    /// Subscribe to the post-render chain.
    pub fn on_post_render<F>(&mut self, priority: i32, callback: F)
    where
        F: Fn(String, &HookArgs<'_>) -> String + Send + Sync + 'static,
    {
        self.post_render.add(priority, Box::new(callback));
    }

    /// Subscribe to the defaults-merge chain of one tag.
    pub fn on_atts<F>(&mut self, tag: impl Into<String>, priority: i32, callback: F)
    where
        F: Fn(Attributes, &Attributes, &Atts) -> Attributes + Send + Sync + 'static,
    {
        self.atts
            .entry(tag.into())
            .or_default()
            .add(priority, Box::new(callback));
    }

    /// Subscribe to the strip tag-name chain.
    pub fn on_strip_tags<F>(&mut self, priority: i32, callback: F)
    where
        F: Fn(Vec<String>, &str) -> Vec<String> + Send + Sync + 'static,
    {
        self.strip_tags.add(priority, Box::new(callback));
    }

    /// Remove every subscriber.
    pub fn clear(&mut self) {
        self.pre_render.clear();
        self.post_render.clear();
        self.atts.clear();
        self.strip_tags.clear();
    }

    pub(crate) fn apply_pre_render(&self, args: &HookArgs<'_>) -> Option<String> {
        self.pre_render
            .iter()
            .fold(None, |current, callback| callback(current, args))
    }

    pub(crate) fn apply_post_render(&self, output: String, args: &HookArgs<'_>) -> String {
        self.post_render
            .iter()
            .fold(output, |current, callback| callback(current, args))
    }

    pub(crate) fn apply_atts(
        &self,
        tag: &str,
        merged: Attributes,
        defaults: &Attributes,
        atts: &Atts,
    ) -> Attributes {
        match self.atts.get(tag) {
            Some(chain) => chain
                .iter()
                .fold(merged, |current, callback| callback(current, defaults, atts)),
            None => merged,
        }
    }

    pub(crate) fn apply_strip_tags(&self, names: Vec<String>, content: &str) -> Vec<String> {
        self.strip_tags
            .iter()
            .fold(names, |current, callback| callback(current, content))
    }
}
