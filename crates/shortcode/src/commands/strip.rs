//! `shortcode strip` command implementation.

use std::path::PathBuf;

use clap::Args;
use shortcode_config::Config;

use super::{CommandContext, read_input};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the strip command.
#[derive(Args)]
pub(crate) struct StripArgs {
    /// Input file (default: stdin).
    file: Option<PathBuf>,

    /// Only strip this tag (repeatable, overrides `strip.tags` in config).
    #[arg(short, long = "tag", value_name = "NAME")]
    tags: Vec<String>,
}

impl StripArgs {
    /// Execute the strip command.
    pub(crate) fn execute(self, ctx: &CommandContext, output: &Output) -> Result<(), CliError> {
        let requested = requested_tags(&self.tags, &ctx.config);
        for name in requested.iter().flatten() {
            if !ctx.shortcodes.exists(name) {
                output.warning(&format!(
                    "Tag '{name}' is not defined in the configuration, ignoring"
                ));
            }
        }

        let content = read_input(self.file.as_deref())?;
        output.write(&ctx.shortcodes.strip(&content, requested.as_deref()))?;
        Ok(())
    }
}

/// Tags to strip: `--tag` values, else `strip.tags`, else `None` (all).
fn requested_tags<'a>(args: &'a [String], config: &'a Config) -> Option<Vec<&'a str>> {
    let names = if args.is_empty() {
        config.strip.tags.as_deref()?
    } else {
        args
    };
    Some(names.iter().map(String::as_str).collect())
}
