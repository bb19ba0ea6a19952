//! Tag name to handler bindings.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use crate::ShortcodeHandler;
use crate::error::ShortcodeError;

/// Registry mapping shortcode tag names to handlers.
///
/// Registration validates the name; the last registration for a name wins.
/// The sorted name list used by the [`Scanner`](crate::Scanner) is cached and
/// rebuilt after any mutation.
#[derive(Default)]
pub struct TagRegistry {
    handlers: HashMap<String, Box<dyn ShortcodeHandler>>,
    names: OnceLock<Vec<String>>,
}

impl TagRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a handler to a tag name, replacing any previous binding.
    ///
    /// # Errors
    ///
    /// Returns [`ShortcodeError::InvalidTagName`] if the name is empty or
    /// contains `<`, `&`, `/`, `[`, `]` or ASCII whitespace. The registry is
    /// left unchanged in that case.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        handler: impl ShortcodeHandler + 'static,
    ) -> Result<(), ShortcodeError> {
        let name = name.into();
        if let Err(err) = validate_tag_name(&name) {
            tracing::warn!(name = %name, error = %err, "Rejected shortcode registration");
            return Err(err);
        }

        if self.handlers.insert(name.clone(), Box::new(handler)).is_some() {
            tracing::debug!(name = %name, "Replaced existing shortcode handler");
        }
        self.names = OnceLock::new();
        Ok(())
    }

    /// Remove a binding. Does nothing if the name is not registered.
    pub fn unregister(&mut self, name: &str) {
        if self.handlers.remove(name).is_some() {
            self.names = OnceLock::new();
        }
    }

    /// Remove all bindings.
    pub fn clear(&mut self) {
        self.handlers.clear();
        self.names = OnceLock::new();
    }

    /// Whether a handler is registered for the name.
    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Get the handler registered for the name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn ShortcodeHandler> {
        self.handlers.get(name).map(AsRef::as_ref)
    }

    /// Registered names, longest first, ties in byte order.
    ///
    /// Longest-first ordering keeps a name from shadowing a longer name it is
    /// a prefix of (`foo` vs `foo-bar`).
    pub fn names_snapshot(&self) -> &[String] {
        self.names.get_or_init(|| {
            let mut names: Vec<String> = self.handlers.keys().cloned().collect();
            sort_longest_first(&mut names);
            names
        })
    }

    /// Number of registered tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no tags are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for TagRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagRegistry")
            .field("names", &self.names_snapshot())
            .finish_non_exhaustive()
    }
}

/// Order names longest first, ties in byte order.
pub(crate) fn sort_longest_first(names: &mut [String]) {
    names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
}

/// Check that a tag name can be registered.
///
/// # Errors
///
/// Returns [`ShortcodeError::InvalidTagName`] describing the first problem found.
pub fn validate_tag_name(name: &str) -> Result<(), ShortcodeError> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if name
        .chars()
        .any(|c| matches!(c, '<' | '&' | '/' | '[' | ']') || c.is_ascii_whitespace())
    {
        "name contains one of < & / [ ] or whitespace"
    } else {
        return Ok(());
    };

    Err(ShortcodeError::InvalidTagName {
        name: name.to_owned(),
        reason,
    })
}
