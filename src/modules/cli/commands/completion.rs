//! Hidden command to generate completions for shellcomp itself.

use clap::{Args, CommandFactory};
use shellcomp_generators::generate;
use shellcomp_parser::from_clap;
use shellcomp_types::Shell;

use super::shell_parser;

/// Generate shell completion scripts for `shellcomp`.
///
/// This command is hidden from normal `--help` output because it exists
/// primarily for installers and packaging scripts.
#[derive(Args, Debug)]
pub struct CompletionCommand {
    /// Shell to generate completions for
    #[arg(value_parser = shell_parser())]
    pub shell: Shell,
}

impl CompletionCommand {
    pub fn execute(&self) -> anyhow::Result<()> {
        print!("{}", self.render()?);
        Ok(())
    }

    fn render(&self) -> anyhow::Result<String> {
        let tree = from_clap(&crate::Cli::command())?;
        Ok(generate(self.shell, &tree, Some("shellcomp")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_completion_bash() {
        let script = CompletionCommand { shell: Shell::Bash }.render().unwrap();
        assert!(script.contains("complete -F _shellcomp shellcomp"));
        assert!(script.contains("generate"));
        assert!(script.contains("markdown"));
    }

    #[test]
    fn test_self_completion_fish_lists_shells() {
        let script = CompletionCommand { shell: Shell::Fish }.render().unwrap();
        assert!(script.contains("complete -c shellcomp"));
        assert!(script.contains("bash zsh fish"));
    }
}
