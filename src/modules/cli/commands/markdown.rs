//! Markdown command implementation

use clap::Args;
use shellcomp_generators::generate_markdown;
use shellcomp_parser::parse_file;
use std::path::PathBuf;
use tracing::info;

use super::write_output;

/// Markdown command arguments
#[derive(Args, Debug)]
pub struct MarkdownCommand {
    /// Program name shown in the page (defaults to the description's name)
    #[arg(long)]
    pub prog: Option<String>,

    /// Output file (defaults to stdout)
    #[arg(short = 'o', long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

impl MarkdownCommand {
    /// Execute the markdown command
    pub fn execute(&self, file: &str) -> anyhow::Result<()> {
        info!("Generating markdown from: {}", file);

        let tree = parse_file(file)?;
        let page = generate_markdown(&tree, self.prog.as_deref());
        write_output(self.output.as_deref(), &page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_markdown_writes_page() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "name: tool\nhelp: A tool\noptions:\n  - names: --out|-o\n    metavar: FILE").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("tool.md");

        let cmd = MarkdownCommand {
            prog: None,
            output: Some(output.clone()),
        };
        cmd.execute(file.path().to_str().unwrap()).unwrap();

        let page = std::fs::read_to_string(&output).unwrap();
        assert!(page.contains("A tool"));
        assert!(page.contains("--out"));
    }
}
