//! Completion script generators for shellcomp
//!
//! This crate resolves completion kinds per shell and renders bash, zsh and
//! fish completion scripts, plus a markdown reference page, from a
//! [`CommandTree`].

pub mod backends;
pub mod completer;
pub mod markdown;
pub mod pattern;
pub mod signals;

pub use backends::{BashGenerator, FishGenerator, ZshGenerator};
pub use completer::{default_substitute, ShellCompleter};
pub use markdown::generate_markdown;
pub use pattern::OptionPattern;

use shellcomp_core::CommandTree;
use shellcomp_types::Shell;
use tracing::info;

/// Renders a complete script for one shell
pub trait Generator {
    fn shell(&self) -> Shell;

    /// Script registering completion for `program_name`
    fn generate(&self, tree: &CommandTree, program_name: &str) -> String;
}

/// Generator for `shell`
pub fn generator_for(shell: Shell) -> Box<dyn Generator> {
    match shell {
        Shell::Bash => Box::new(BashGenerator::new()),
        Shell::Zsh => Box::new(ZshGenerator::new()),
        Shell::Fish => Box::new(FishGenerator::new()),
    }
}

/// Generate the completion script for `shell`.
///
/// `program_name` defaults to the name of the root command.
pub fn generate(shell: Shell, tree: &CommandTree, program_name: Option<&str>) -> String {
    let program_name = program_name.unwrap_or_else(|| tree.get(tree.root()).name());
    info!(%shell, program = %program_name, commands = tree.len(), "Generating completion script");
    generator_for(shell).generate(tree, program_name)
}
