//! `shortcode has` command implementation.

use std::path::PathBuf;

use clap::Args;

use super::{CommandContext, read_input};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the has command.
#[derive(Args)]
pub(crate) struct HasArgs {
    /// Tag name to look for.
    tag: String,

    /// Input file (default: stdin).
    file: Option<PathBuf>,
}

impl HasArgs {
    /// Execute the has command.
    ///
    /// Prints `true` or `false`; both are successful outcomes.
    pub(crate) fn execute(self, ctx: &CommandContext, output: &Output) -> Result<(), CliError> {
        if !ctx.shortcodes.exists(&self.tag) {
            output.warning(&format!(
                "Tag '{}' is not defined in the configuration",
                self.tag
            ));
        }
        let content = read_input(self.file.as_deref())?;
        let found = ctx.shortcodes.has_tag(&content, &self.tag);
        output.line(if found { "true" } else { "false" })?;
        Ok(())
    }
}
