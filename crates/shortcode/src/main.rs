//! Shortcode CLI.
//!
//! Provides commands for:
//! - `expand`: Expand shortcodes defined in `shortcodes.toml`
//! - `strip`: Remove shortcodes
//! - `tags`: List shortcodes used in content
//! - `has`: Check whether content uses a shortcode

mod commands;
mod error;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shortcode_config::CliSettings;
use tracing_subscriber::EnvFilter;

use commands::{CommandContext, ExpandArgs, HasArgs, StripArgs, TagsArgs};
use error::CliError;
use output::Output;

/// Shortcode - bracketed macro expansion for text files.
#[derive(Parser)]
#[command(name = "shortcode", version, about)]
struct Cli {
    /// Path to configuration file (default: auto-discover shortcodes.toml).
    #[arg(short, long, global = true, env = "SHORTCODE_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output (debug logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Mask brackets inside HTML tags and comments (overrides config).
    #[arg(long, global = true)]
    ignore_html: Option<bool>,

    /// Do not mask HTML while scanning.
    #[arg(long, global = true, conflicts_with = "ignore_html")]
    no_ignore_html: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand shortcodes and print the result.
    Expand(ExpandArgs),
    /// Remove shortcodes and print the result.
    Strip(StripArgs),
    /// List shortcodes used in the content, one per line.
    Tags(TagsArgs),
    /// Print whether the content uses a shortcode.
    Has(HasArgs),
}

impl Cli {
    /// Resolve `ignore_html` from --ignore-html/--no-ignore-html flags.
    fn resolve_ignore_html(&self) -> Option<bool> {
        self.no_ignore_html.then_some(false).or(self.ignore_html)
    }

    fn execute(self, output: &Output) -> Result<(), CliError> {
        let settings = CliSettings {
            ignore_html: self.resolve_ignore_html(),
        };
        let ctx = CommandContext::load(self.config.as_deref(), &settings)?;

        match self.command {
            Commands::Expand(args) => args.execute(&ctx, output),
            Commands::Strip(args) => args.execute(&ctx, output),
            Commands::Tags(args) => args.execute(&ctx, output),
            Commands::Has(args) => args.execute(&ctx, output),
        }
    }
}

/// `--verbose` means DEBUG; otherwise `RUST_LOG` if set and valid, else WARN.
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose, rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli.execute(&output) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
