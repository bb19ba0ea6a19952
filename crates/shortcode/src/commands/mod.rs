//! CLI command implementations.

pub(crate) mod expand;
pub(crate) mod has;
pub(crate) mod strip;
pub(crate) mod tags;

use std::io;
use std::path::Path;

use shortcode_config::{CliSettings, Config};
use shortcode_engine::{Attributes, Shortcodes, ShortcodesConfig, TemplateShortcode};

use crate::error::CliError;

pub(crate) use expand::ExpandArgs;
pub(crate) use has::HasArgs;
pub(crate) use strip::StripArgs;
pub(crate) use tags::TagsArgs;

/// Loaded configuration and the engine built from it.
pub(crate) struct CommandContext {
    pub config: Config,
    pub shortcodes: Shortcodes,
}

impl CommandContext {
    /// Load configuration and register its template shortcodes.
    pub(crate) fn load(
        config_path: Option<&Path>,
        settings: &CliSettings,
    ) -> Result<Self, CliError> {
        let config = Config::load(config_path, Some(settings))?;
        if let Some(path) = &config.config_path {
            tracing::debug!(path = %path.display(), "Loaded configuration");
        }
        let shortcodes = build_shortcodes(&config)?;
        Ok(Self { config, shortcodes })
    }
}

/// Build an engine with one [`TemplateShortcode`] per `[tags.<name>]` entry.
pub(crate) fn build_shortcodes(config: &Config) -> Result<Shortcodes, CliError> {
    let mut shortcodes =
        Shortcodes::with_config(ShortcodesConfig::new().with_ignore_html(config.ignore_html));

    for (name, tag) in &config.tags {
        // Attribute names are matched lower-cased.
        let defaults: Attributes = tag
            .defaults
            .iter()
            .map(|(key, value)| (key.to_ascii_lowercase(), value.as_str()))
            .collect();
        let handler = TemplateShortcode::new(tag.template.as_str())
            .with_defaults(defaults)
            .with_expand_content(tag.expand_content);
        shortcodes.register(name.as_str(), handler)?;
    }

    tracing::debug!(count = config.tags.len(), "Registered template shortcodes");
    Ok(shortcodes)
}

/// Read the input file, or stdin when none is given.
pub(crate) fn read_input(file: Option<&Path>) -> Result<String, CliError> {
    let content = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => io::read_to_string(io::stdin())?,
    };
    Ok(content)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn config(toml: &str) -> Config {
        toml::from_str(toml).unwrap()
    }

    #[test]
    fn test_build_shortcodes_registers_templates() {
        let config = config(
            r#"
[tags.greet]
template = "Hello, {name}!"
defaults = { Name = "world" }

[tags.box]
template = "<div>{content}</div>"
expand_content = true
"#,
        );
        let shortcodes = build_shortcodes(&config).unwrap();

        assert!(shortcodes.exists("greet"));
        assert_eq!(
            shortcodes.expand("[box][greet][greet name=Ann][/box]"),
            "<div>Hello, world!Hello, Ann!</div>"
        );
    }

    #[test]
    fn test_build_shortcodes_ignore_html() {
        let config = config("ignore_html = true\n[tags.t]\ntemplate = \"T\"\n");
        let shortcodes = build_shortcodes(&config).unwrap();

        assert_eq!(shortcodes.expand(r#"<a title="[t]">[t]</a>"#), r#"<a title="[t]">T</a>"#);
    }

    #[test]
    fn test_build_shortcodes_rejects_invalid_name() {
        let config = config("[tags.\"bad name\"]\ntemplate = \"x\"\n");
        let err = build_shortcodes(&config).unwrap_err();

        assert!(matches!(err, CliError::Shortcode(_)));
        assert!(err.to_string().contains("bad name"));
    }

    #[test]
    fn test_read_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("post.txt");
        std::fs::write(&path, "[gallery]").unwrap();

        assert_eq!(read_input(Some(&path)).unwrap(), "[gallery]");
    }

    #[test]
    fn test_read_input_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_input(Some(&dir.path().join("missing.txt"))).unwrap_err();

        assert!(matches!(err, CliError::Io(_)));
    }
}
