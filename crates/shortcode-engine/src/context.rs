//! Shortcode invocation context.

use crate::{Atts, Attributes, Shortcodes};

/// Context passed to a [`ShortcodeHandler`](crate::ShortcodeHandler) for one occurrence.
///
/// Holds only shared references, so a handler may expand its own content
/// while the outer pass is still running.
///
/// # Example
///
/// ```
/// use shortcode_engine::{Atts, ShortcodeContext, Shortcodes};
///
/// let mut shortcodes = Shortcodes::new();
/// shortcodes
///     .register("upper", |_: &Atts, content: Option<&str>, ctx: &ShortcodeContext<'_>| {
///         ctx.expand(content.unwrap_or_default()).to_uppercase()
///     })
///     .unwrap();
/// shortcodes
///     .register("name", |_: &Atts, _: Option<&str>, ctx: &ShortcodeContext<'_>| {
///         ctx.tag.to_owned()
///     })
///     .unwrap();
///
/// assert_eq!(shortcodes.expand("[upper]hi [name][/upper]"), "HI NAME");
/// ```
#[derive(Clone, Copy)]
pub struct ShortcodeContext<'a> {
    /// Name of the tag being rendered.
    pub tag: &'a str,
    /// The engine running the current pass.
    pub engine: &'a Shortcodes,
}

impl ShortcodeContext<'_> {
    /// Expand shortcodes in `content` with the same engine.
    #[must_use]
    pub fn expand(&self, content: &str) -> String {
        self.engine.expand(content)
    }

    /// Merge `defaults` with `atts`, running this tag's attribute hooks.
    #[must_use]
    pub fn merge_defaults(&self, defaults: &Attributes, atts: &Atts) -> Attributes {
        self.engine.merge_defaults(defaults, atts, Some(self.tag))
    }
}
