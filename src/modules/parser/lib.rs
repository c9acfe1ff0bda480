//! CLI description parsing for shellcomp
//!
//! This crate turns a declarative YAML or JSON description, or a clap
//! `Command`, into the command tree the generators consume.

pub mod clap_adapter;
pub mod description;
pub mod validator;

pub use clap_adapter::from_clap;
pub use description::{spec_to_tree, CommandSpec, DescriptionParser};
pub use validator::DescriptionValidator;

use shellcomp_core::{CommandTree, CompletionError, Result};
use std::path::Path;
use tracing::debug;

/// Parse a description file, JSON for `.json` files and YAML otherwise
pub fn parse_file(path: &str) -> Result<CommandTree> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| CompletionError::Config(format!("Failed to read file '{}': {}", path, e)))?;

    let is_json = Path::new(path)
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
    debug!(path, json = is_json, "Parsing description file");

    if is_json {
        build(DescriptionParser::parse_json(&content)?)
    } else {
        parse_string(&content)
    }
}

/// Parse a YAML description from a string
pub fn parse_string(content: &str) -> Result<CommandTree> {
    build(DescriptionParser::parse(content)?)
}

fn build(spec: CommandSpec) -> Result<CommandTree> {
    DescriptionValidator::new().validate(&spec)?;
    spec_to_tree(&spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_simple_description() {
        let yaml = r#"
name: prog
options:
  - names: --verbose|-v
subcommands:
  - name: build
  - name: test
"#;
        let tree = parse_string(yaml).unwrap();
        let root = tree.get(tree.root());
        assert_eq!(root.name(), "prog");
        assert_eq!(root.arguments().len(), 1);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_parse_string_validates() {
        let yaml = r#"
name: prog
subcommands:
  - name: build
  - name: build
"#;
        let err = parse_string(yaml).unwrap_err();
        assert!(matches!(err, CompletionError::Validation(_)));
    }

    #[test]
    fn test_parse_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "name: prog\noptions:\n  - names: --out\n    complete: directory").unwrap();

        let tree = parse_file(file.path().to_str().unwrap()).unwrap();
        let root = tree.get(tree.root());
        assert_eq!(root.arguments()[0].completion(), &shellcomp_core::Completion::directory());
    }

    #[test]
    fn test_parse_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        writeln!(file, r#"{{"name": "prog", "options": [{{"names": "--flag|-f"}}]}}"#).unwrap();

        let tree = parse_file(file.path().to_str().unwrap()).unwrap();
        let root = tree.get(tree.root());
        assert!(root.find_argument("-f").is_some());
    }

    #[test]
    fn test_parse_missing_file() {
        let err = parse_file("/nonexistent/cli.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
        assert_eq!(err.exit_code(), 66);
    }
}
