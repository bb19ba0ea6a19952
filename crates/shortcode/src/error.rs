//! CLI error types.

use shortcode_config::ConfigError;
use shortcode_engine::ShortcodeError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Shortcode(#[from] ShortcodeError),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}
