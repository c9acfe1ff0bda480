//! Check command implementation

use clap::Args;
use shellcomp_parser::parse_file;
use shellcomp_types::Shell;
use tracing::{debug, info};

/// Check command arguments
#[derive(Args, Debug)]
pub struct CheckCommand {}

impl CheckCommand {
    /// Parse and validate the description, then render every shell once
    pub fn execute(&self, file: &str) -> anyhow::Result<()> {
        info!("Checking description: {}", file);

        let tree = parse_file(file)?;
        let arguments: usize = tree
            .walk()
            .into_iter()
            .map(|id| tree.get(id).arguments().len())
            .sum();

        for shell in Shell::all() {
            let script = shellcomp_generators::generate(*shell, &tree, None);
            debug!(%shell, bytes = script.len(), "Rendered completion script");
        }

        println!(
            "{}: ok ({} commands, {} arguments)",
            tree.get(tree.root()).name(),
            tree.len(),
            arguments
        );
        Ok(())
    }
}
