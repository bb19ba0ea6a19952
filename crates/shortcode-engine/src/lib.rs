//! Bracketed shortcode macros for free-form text.
//!
//! Content such as `Look: [gallery ids="1,2"]` or `[note]Careful[/note]` is
//! scanned for registered tag names; each occurrence is replaced by the output
//! of the handler bound to that name.
//!
//! # Architecture
//!
//! - [`TagRegistry`]: validated name to [`ShortcodeHandler`] bindings
//! - [`Scanner`]: linear-time lexer producing [`Match`] records, with escape
//!   brackets (`[[tag]]`), self-closing (`[tag /]`), enclosing
//!   (`[tag]...[/tag]`) and balanced same-name nesting
//! - [`Atts`]: attribute grammar (`name="v"`, `name='v'`, `name=v`, positional)
//! - [`merge_defaults`]: defaults merging, with per-tag hooks via
//!   [`Shortcodes::merge_defaults`]
//! - [`Hooks`]: priority-ordered pre-render, post-render, attribute and
//!   strip-tags filter chains
//! - [`Shortcodes`]: the engine; [`expand`](Shortcodes::expand),
//!   [`strip`](Shortcodes::strip), [`has_tag`](Shortcodes::has_tag) and
//!   [`tags_in_content`](Shortcodes::tags_in_content)
//!
//! Expansion is a single pass. Handlers receive a [`ShortcodeContext`] and
//! call [`ShortcodeContext::expand`] to expand their own enclosed content.
//!
//! # Example
//!
//! ```
//! use shortcode_engine::{Atts, Attributes, ShortcodeContext, Shortcodes};
//!
//! let mut shortcodes = Shortcodes::new();
//! shortcodes
//!     .register("note", |atts: &Atts, content: Option<&str>, ctx: &ShortcodeContext<'_>| {
//!         let defaults: Attributes = [("kind", "info")].into_iter().collect();
//!         let atts = ctx.merge_defaults(&defaults, atts);
//!         format!(
//!             r#"<aside class="{}">{}</aside>"#,
//!             atts.get("kind").unwrap_or_default(),
//!             ctx.expand(content.unwrap_or_default())
//!         )
//!     })
//!     .unwrap();
//!
//! assert_eq!(
//!     shortcodes.expand("[note kind=warn]Careful[/note] Write [[note]] for a literal tag."),
//!     r#"<aside class="warn">Careful</aside> Write [note] for a literal tag."#
//! );
//! ```

mod atts;
mod context;
mod defaults;
mod engine;
mod error;
mod handler;
mod hooks;
mod html;
mod registry;
mod scanner;
mod template;

pub use atts::{AttrKey, Atts, Attributes};
pub use context::ShortcodeContext;
pub use defaults::merge_defaults;
pub use engine::{Shortcodes, ShortcodesConfig};
pub use error::ShortcodeError;
pub use handler::ShortcodeHandler;
pub use hooks::{
    AttsHook, DEFAULT_PRIORITY, FilterChain, HookArgs, Hooks, PostRenderHook, PreRenderHook,
    StripTagsHook,
};
pub use registry::{TagRegistry, validate_tag_name};
pub use scanner::{Match, Matches, Scanner};
pub use template::TemplateShortcode;
