//! Configuration management for shortcode expansion.
//!
//! Parses `shortcodes.toml` files with serde and provides auto-discovery of
//! config files in parent directories.
//!
//! ```toml
//! ignore_html = false
//!
//! [strip]
//! tags = ["gallery"]
//!
//! [tags.greet]
//! template = "Hello, {name}!"
//! defaults = { name = "world" }
//! expand_content = true
//! ```
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! Values in `tags.<name>.defaults` support `${VAR}` (errors if unset) and
//! `${VAR:-default}`.

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override HTML masking.
    pub ignore_html: Option<bool>,
}

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "shortcodes.toml";

/// Shortcode configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Hide brackets inside HTML tags and comments while scanning.
    pub ignore_html: bool,
    /// Strip settings.
    pub strip: StripConfig,
    /// Template shortcodes by tag name.
    pub tags: BTreeMap<String, TagConfig>,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// `[strip]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StripConfig {
    /// Tags removed by `strip` when none are given (default: all).
    pub tags: Option<Vec<String>>,
}

/// `[tags.<name>]` section: a template shortcode.
#[derive(Debug, Deserialize)]
pub struct TagConfig {
    /// Output template with `{name}`, `{N}` and `{content}` placeholders.
    pub template: String,
    /// Default attribute values.
    #[serde(default)]
    pub defaults: BTreeMap<String, String>,
    /// Expand shortcodes in enclosed content before substitution.
    #[serde(default)]
    pub expand_content: bool,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`tags.greet.defaults.name`").
        field: String,
        /// Error message (e.g., "${`GREET_NAME`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `shortcodes.toml` in current directory and
    /// parents, falling back to defaults when none is found.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or if reading,
    /// parsing, expansion or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(ignore_html) = settings.ignore_html {
            self.ignore_html = ignore_html;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if a template or strip tag is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, tag) in &self.tags {
            require_non_empty(name, "tags.<name>")?;
            require_non_empty(&tag.template, &format!("tags.{name}.template"))?;
        }

        if let Some(tags) = &self.strip.tags {
            for (index, name) in tags.iter().enumerate() {
                require_non_empty(name, &format!("strip.tags[{index}]"))?;
            }
        }

        Ok(())
    }

    /// Expand environment variable references in tag defaults.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        for (name, tag) in &mut self.tags {
            for (key, value) in &mut tag.defaults {
                *value = expand::expand_env(value, &format!("tags.{name}.defaults.{key}"))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.ignore_html);
        assert!(config.strip.tags.is_none());
        assert!(config.tags.is_empty());
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.tags.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
ignore_html = true

[strip]
tags = ["gallery", "caption"]

[tags.greet]
template = "Hello, {name}!"
defaults = { name = "world" }
expand_content = true

[tags.year]
template = "2024"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert!(config.ignore_html);
        assert_eq!(
            config.strip.tags,
            Some(vec!["gallery".to_owned(), "caption".to_owned()])
        );

        let greet = &config.tags["greet"];
        assert_eq!(greet.template, "Hello, {name}!");
        assert_eq!(greet.defaults["name"], "world");
        assert!(greet.expand_content);

        let year = &config.tags["year"];
        assert!(year.defaults.is_empty());
        assert!(!year.expand_content);
    }

    #[test]
    fn test_tag_requires_template() {
        let result: Result<Config, _> = toml::from_str("[tags.greet]\ndefaults = {}\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings {
            ignore_html: Some(true),
        });
        assert!(config.ignore_html);

        config.apply_cli_settings(&CliSettings::default());
        assert!(config.ignore_html);
    }

    fn assert_validation_error(config: &Config, expected: &str) {
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        assert!(msg.contains(expected), "Expected '{expected}' in: {msg}");
    }

    #[test]
    fn test_validate_empty_template() {
        let config: Config = toml::from_str("[tags.greet]\ntemplate = \"\"\n").unwrap();
        assert_validation_error(&config, "tags.greet.template cannot be empty");
    }

    #[test]
    fn test_validate_empty_strip_tag() {
        let config: Config = toml::from_str("[strip]\ntags = [\"gallery\", \"\"]\n").unwrap();
        assert_validation_error(&config, "strip.tags[1] cannot be empty");
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            "ignore_html = true\n[tags.year]\ntemplate = \"2024\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert!(config.ignore_html);
        assert_eq!(config.tags["year"].template, "2024");
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_applies_cli_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "ignore_html = true\n").unwrap();

        let settings = CliSettings {
            ignore_html: Some(false),
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert!(!config.ignore_html);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
        assert!(err.to_string().contains("missing.toml"));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "ignore_html = \"yes").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[tags.empty]\ntemplate = \"\"\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_expand_env_vars_in_defaults() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("SHORTCODE_TEST_AUTHOR", "Ann");
        }

        let toml = r#"
[tags.byline]
template = "by {author}"
defaults = { author = "${SHORTCODE_TEST_AUTHOR}", role = "${SHORTCODE_TEST_ROLE:-editor}" }
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        let defaults = &config.tags["byline"].defaults;
        assert_eq!(defaults["author"], "Ann");
        assert_eq!(defaults["role"], "editor");

        unsafe {
            std::env::remove_var("SHORTCODE_TEST_AUTHOR");
        }
    }

    #[test]
    fn test_templates_not_env_expanded() {
        let toml = r#"
[tags.price]
template = "${MISSING_SHORTCODE_VAR} {amount}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.tags["price"].template, "${MISSING_SHORTCODE_VAR} {amount}");
    }
}
