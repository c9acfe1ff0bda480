//! Generate command implementation

use clap::Args;
use shellcomp_generators::generate;
use shellcomp_parser::parse_file;
use shellcomp_types::Shell;
use std::path::PathBuf;
use tracing::info;

use super::{shell_parser, write_output};

/// Generate command arguments
#[derive(Args, Debug)]
pub struct GenerateCommand {
    /// Target shell
    #[arg(value_parser = shell_parser())]
    pub shell: Shell,

    /// Program name to register completion for (defaults to the description's name)
    #[arg(long)]
    pub prog: Option<String>,

    /// Output file (defaults to stdout)
    #[arg(short = 'o', long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

impl GenerateCommand {
    /// Execute the generate command
    pub fn execute(&self, file: &str) -> anyhow::Result<()> {
        info!("Generating {} completion from: {}", self.shell, file);

        let tree = parse_file(file)?;
        let script = generate(self.shell, &tree, self.prog.as_deref());
        write_output(self.output.as_deref(), &script)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn description() -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "name: tool\noptions:\n  - names: --verbose|-v\nsubcommands:\n  - name: build"
        )
        .unwrap();
        file
    }

    #[test]
    fn test_generate_writes_script() {
        let file = description();
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("tool.bash");

        let cmd = GenerateCommand {
            shell: Shell::Bash,
            prog: None,
            output: Some(output.clone()),
        };
        cmd.execute(file.path().to_str().unwrap()).unwrap();

        let script = std::fs::read_to_string(&output).unwrap();
        assert!(script.starts_with("#!/bin/bash"));
        assert!(script.contains("complete -F _tool tool"));
    }

    #[test]
    fn test_generate_with_program_override() {
        let file = description();
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("_tool");

        let cmd = GenerateCommand {
            shell: Shell::Zsh,
            prog: Some("tool2".to_string()),
            output: Some(output.clone()),
        };
        cmd.execute(file.path().to_str().unwrap()).unwrap();

        let script = std::fs::read_to_string(&output).unwrap();
        assert!(script.starts_with("#compdef tool2"));
    }

    #[test]
    fn test_generate_missing_description() {
        let cmd = GenerateCommand {
            shell: Shell::Fish,
            prog: None,
            output: None,
        };
        let err = cmd.execute("/nonexistent/cli.yaml").unwrap_err();
        let err = err.downcast_ref::<shellcomp_core::CompletionError>().unwrap();
        assert_eq!(err.exit_code(), 66);
    }
}
