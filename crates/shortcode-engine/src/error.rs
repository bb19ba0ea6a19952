//! Error types for shortcode registration.

/// Error raised by the tag registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ShortcodeError {
    /// The tag name is empty or contains a reserved character.
    #[error("invalid shortcode name {name:?}: {reason}")]
    InvalidTagName {
        /// The rejected name.
        name: String,
        /// Why the name was rejected.
        reason: &'static str,
    },
}
