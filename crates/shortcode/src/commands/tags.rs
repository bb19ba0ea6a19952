//! `shortcode tags` command implementation.

use std::path::PathBuf;

use clap::Args;

use super::{CommandContext, read_input};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the tags command.
#[derive(Args)]
pub(crate) struct TagsArgs {
    /// Input file (default: stdin).
    file: Option<PathBuf>,
}

impl TagsArgs {
    /// Execute the tags command.
    pub(crate) fn execute(self, ctx: &CommandContext, output: &Output) -> Result<(), CliError> {
        let content = read_input(self.file.as_deref())?;
        for tag in ctx.shortcodes.tags_in_content(&content) {
            output.line(&tag)?;
        }
        Ok(())
    }
}
