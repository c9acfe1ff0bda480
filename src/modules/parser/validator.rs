//! Description validation

use once_cell::sync::Lazy;
use regex::Regex;
use shellcomp_core::{CompletionError, Result};
use std::collections::HashSet;

use crate::description::{ArgumentSpec, CommandSpec};

/// Program and subcommand names usable as shell words and function name parts
static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._+-]*$").unwrap());

/// Description validator
pub struct DescriptionValidator {
    /// Whether to validate names strictly
    strict_names: bool,
}

impl DescriptionValidator {
    /// Create a new validator with default settings
    pub fn new() -> Self {
        Self { strict_names: true }
    }

    /// Create a validator with lenient name checking
    pub fn lenient() -> Self {
        Self { strict_names: false }
    }

    /// Validate the whole description
    pub fn validate(&self, spec: &CommandSpec) -> Result<()> {
        self.validate_name("Program", &spec.name)?;
        self.validate_command(spec)
    }

    fn validate_name(&self, what: &str, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(CompletionError::Validation(format!(
                "{} name cannot be empty",
                what
            )));
        }

        if self.strict_names && !NAME_PATTERN.is_match(name) {
            return Err(CompletionError::Validation(format!(
                "Invalid {} name '{}': must start with a letter or digit and contain no whitespace or shell metacharacters",
                what.to_lowercase(),
                name
            )));
        }

        Ok(())
    }

    fn validate_command(&self, spec: &CommandSpec) -> Result<()> {
        let mut option_strings = HashSet::new();
        for arg in &spec.options {
            self.validate_argument(arg)?;

            for name in arg.names.to_option_strings()?.iter() {
                if !option_strings.insert(name.to_string()) {
                    return Err(CompletionError::Validation(format!(
                        "Duplicate option string '{}' in command '{}'",
                        name, spec.name
                    )));
                }
            }
        }

        let mut subcommand_names = HashSet::new();
        for sub in &spec.subcommands {
            self.validate_name("Subcommand", &sub.name)?;

            if !subcommand_names.insert(sub.name.as_str()) {
                return Err(CompletionError::Validation(format!(
                    "Duplicate subcommand '{}' in command '{}'",
                    sub.name, spec.name
                )));
            }

            self.validate_command(sub)?;
        }

        Ok(())
    }

    fn validate_argument(&self, arg: &ArgumentSpec) -> Result<()> {
        let names = arg.names.display();

        if arg.choices.is_some() && arg.range.is_some() {
            return Err(CompletionError::Validation(format!(
                "Argument '{}' declares both choices and a range",
                names
            )));
        }

        if arg.glob.is_some() && !matches!(arg.complete, Some(k) if k.accepts_glob()) {
            return Err(CompletionError::Validation(format!(
                "Argument '{}' has a glob but does not complete files or directories",
                names
            )));
        }

        if arg.prefix.is_some() && !matches!(arg.complete, Some(k) if k.accepts_prefix()) {
            return Err(CompletionError::Validation(format!(
                "Argument '{}' has a prefix but does not complete signals",
                names
            )));
        }

        if self.strict_names && names.chars().any(char::is_whitespace) {
            return Err(CompletionError::Validation(format!(
                "Invalid option string '{}': contains whitespace",
                names
            )));
        }

        Ok(())
    }
}

impl Default for DescriptionValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::description::DescriptionParser;

    fn validate(yaml: &str) -> Result<()> {
        DescriptionValidator::new().validate(&DescriptionParser::parse(yaml).unwrap())
    }

    #[test]
    fn test_valid_description() {
        let yaml = r#"
name: git-lfs
options:
  - names: --verbose|-v
subcommands:
  - name: push
  - name: pull
"#;
        assert!(validate(yaml).is_ok());
    }

    #[test]
    fn test_empty_program_name() {
        let err = validate("name: ''\n").unwrap_err();
        assert!(err.to_string().contains("Program name cannot be empty"));
    }

    #[test]
    fn test_invalid_program_name() {
        let err = validate("name: 'my prog'\n").unwrap_err();
        assert!(err.to_string().contains("Invalid program name"));

        let spec = DescriptionParser::parse("name: 'my prog'\n").unwrap();
        assert!(DescriptionValidator::lenient().validate(&spec).is_ok());
    }

    #[test]
    fn test_duplicate_subcommand() {
        let yaml = r#"
name: prog
subcommands:
  - name: build
  - name: build
"#;
        let err = validate(yaml).unwrap_err();
        assert!(err.to_string().contains("Duplicate subcommand 'build'"));
    }

    #[test]
    fn test_duplicate_option_string() {
        let yaml = r#"
name: prog
options:
  - names: --out|-o
  - names: [--output, -o]
"#;
        let err = validate(yaml).unwrap_err();
        assert!(err.to_string().contains("Duplicate option string '-o'"));
    }

    #[test]
    fn test_duplicate_option_in_nested_command() {
        let yaml = r#"
name: prog
options:
  - names: --out
subcommands:
  - name: build
    options:
      - names: --out
      - names: --jobs
      - names: --jobs
"#;
        let err = validate(yaml).unwrap_err();
        assert!(err.to_string().contains("'--jobs' in command 'build'"));
    }

    #[test]
    fn test_glob_requires_file_completion() {
        let yaml = r#"
name: prog
options:
  - names: --out
    complete: user
    glob: "*.txt"
"#;
        let err = validate(yaml).unwrap_err();
        assert!(err.to_string().contains("has a glob"));
    }

    #[test]
    fn test_prefix_requires_signal_completion() {
        let yaml = r#"
name: prog
options:
  - names: --sig
    prefix: SIG
"#;
        let err = validate(yaml).unwrap_err();
        assert!(err.to_string().contains("has a prefix"));
    }

    #[test]
    fn test_choices_and_range_together() {
        let yaml = r#"
name: prog
options:
  - names: --n
    choices: [a]
    range: {start: 1, stop: 3}
"#;
        let err = validate(yaml).unwrap_err();
        assert!(err.to_string().contains("both choices and a range"));
    }
}
