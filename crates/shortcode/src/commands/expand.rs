//! `shortcode expand` command implementation.

use std::path::PathBuf;

use clap::Args;

use super::{CommandContext, read_input};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the expand command.
#[derive(Args)]
pub(crate) struct ExpandArgs {
    /// Input file (default: stdin).
    file: Option<PathBuf>,
}

impl ExpandArgs {
    /// Execute the expand command.
    pub(crate) fn execute(self, ctx: &CommandContext, output: &Output) -> Result<(), CliError> {
        let content = read_input(self.file.as_deref())?;
        output.write(&ctx.shortcodes.expand(&content))?;
        Ok(())
    }
}
