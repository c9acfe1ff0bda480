//! CLI commands

mod check;
mod completion;
mod generate;
mod markdown;

pub use check::CheckCommand;
pub use completion::CompletionCommand;
pub use generate::GenerateCommand;
pub use markdown::MarkdownCommand;

use anyhow::Context;
use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::{Parser, Subcommand};
use shellcomp_types::Shell;
use std::path::Path;
use tracing::info;

/// shellcomp - shell completion scripts from a CLI description
#[derive(Parser, Debug)]
#[command(name = "shellcomp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// CLI description file (YAML, or JSON with a `.json` extension)
    ///
    /// This is a *global* option so it can be specified after subcommands,
    /// e.g. `shellcomp generate bash -f cli.yaml`.
    #[arg(
        short = 'f',
        long = "file",
        global = true,
        default_value = "cli.yaml",
        value_hint = clap::ValueHint::FilePath
    )]
    pub file: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a completion script
    Generate(GenerateCommand),

    /// Generate a markdown reference page
    Markdown(MarkdownCommand),

    /// Validate the description file
    Check(CheckCommand),

    /// Completion script for shellcomp itself
    #[command(hide = true)]
    Completion(CompletionCommand),
}

/// Value parser accepting the supported shell names
pub(crate) fn shell_parser() -> impl TypedValueParser<Value = Shell> {
    PossibleValuesParser::new(["bash", "zsh", "fish"]).try_map(|s| s.parse::<Shell>())
}

/// Write `content` to `output`, or to stdout when no path is given
pub(crate) fn write_output(output: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}
