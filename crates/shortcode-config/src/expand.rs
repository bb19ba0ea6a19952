//! `${NAME}` references in tag default values.
//!
//! A default such as `author = "${SITE_AUTHOR:-staff}"` is resolved against
//! the process environment once, when the config file is loaded. Templates
//! are never expanded; their `{name}` placeholders belong to the engine.

use std::borrow::Cow;
use std::env::VarError;

use crate::ConfigError;

/// An environment variable that a default value needs but cannot get.
struct Unresolved {
    name: String,
    reason: VarError,
}

/// Resolve one variable name.
///
/// Names that start with a digit (`$5` in a price) are not variables and
/// stay literal.
fn lookup(name: &str) -> Result<Option<String>, Unresolved> {
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return Ok(None);
    }
    std::env::var(name).map(Some).map_err(|reason| Unresolved {
        name: name.to_owned(),
        reason,
    })
}

/// Resolve environment references in the default value at `field`.
///
/// `${NAME:-fallback}` uses the fallback when `NAME` is unset; a bare
/// `${NAME}` that is unset is an error naming both the variable and the
/// field.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains('$') {
        return Ok(value.to_owned());
    }

    match shellexpand::env_with_context(value, lookup) {
        Ok(expanded) => Ok(Cow::into_owned(expanded)),
        Err(err) => {
            let message = match err.cause.reason {
                VarError::NotPresent => format!("${{{}}} not set", err.cause.name),
                VarError::NotUnicode(_) => format!("${{{}}} is not valid UTF-8", err.cause.name),
            };
            Err(ConfigError::EnvVar {
                field: field.to_owned(),
                message,
            })
        }
    }
}
