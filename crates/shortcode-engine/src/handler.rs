//! Shortcode handler trait.

use crate::{Atts, ShortcodeContext};

/// Produces the replacement text for a shortcode occurrence.
///
/// Handlers receive the parsed attributes, the enclosed content (`None` for
/// self-closing, bare, or unterminated tags) and a [`ShortcodeContext`] that
/// names the tag and gives re-entrant access to the engine.
///
/// Any `Fn(&Atts, Option<&str>, &ShortcodeContext<'_>) -> String` closure that
/// is `Send + Sync` is a handler.
///
/// # Thread Safety
///
/// Handlers are shared (`&self`) and must be `Send + Sync`; a handler that
/// keeps state uses interior mutability.
///
/// # Example
///
/// ```
/// use shortcode_engine::{Atts, ShortcodeContext, ShortcodeHandler};
///
/// struct Caption;
///
/// impl ShortcodeHandler for Caption {
///     fn render(&self, atts: &Atts, content: Option<&str>, ctx: &ShortcodeContext<'_>) -> String {
///         let align = atts.get("align").unwrap_or("none");
///         let inner = ctx.expand(content.unwrap_or_default());
///         format!(r#"<figure class="align{align}">{inner}</figure>"#)
///     }
/// }
/// ```
pub trait ShortcodeHandler: Send + Sync {
    /// Render one occurrence of the tag.
    fn render(&self, atts: &Atts, content: Option<&str>, ctx: &ShortcodeContext<'_>) -> String;
}

impl<F> ShortcodeHandler for F
where
    F: Fn(&Atts, Option<&str>, &ShortcodeContext<'_>) -> String + Send + Sync,
{
    fn render(&self, atts: &Atts, content: Option<&str>, ctx: &ShortcodeContext<'_>) -> String {
        self(atts, content, ctx)
    }
}
