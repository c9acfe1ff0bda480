//! Declarative CLI description parser (YAML or JSON)

use serde::Deserialize;
use shellcomp_core::{
    Argument, CommandId, CommandTree, Completion, CompletionError, IntRange, OptionStrings,
    Result, DEFAULT_SUBCOMMANDS_NAME,
};
use shellcomp_types::{CompletionKind, ValueType};
use tracing::debug;

/// Parser for CLI description files
pub struct DescriptionParser;

/// One command of a description: the program itself or a subcommand.
///
/// Field aliases keep descriptions written against argparse-like vocabulary
/// (`description`, `arguments`) working.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandSpec {
    pub name: String,

    #[serde(default, alias = "description")]
    pub help: Option<String>,

    /// Name of the subparsers slot, shown as the subcommand placeholder
    #[serde(default)]
    pub subcommands_title: Option<String>,

    #[serde(default, alias = "arguments")]
    pub options: Vec<ArgumentSpec>,

    /// Mutually exclusive groups, each listed by option string
    #[serde(default)]
    pub exclusive: Vec<Vec<String>>,

    #[serde(default)]
    pub subcommands: Vec<CommandSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArgumentSpec {
    pub names: NamesSpec,

    #[serde(default)]
    pub help: Option<String>,

    #[serde(default)]
    pub metavar: Option<String>,

    #[serde(default, rename = "type")]
    pub value_type: Option<ValueType>,

    /// Overrides the value-taking default derived from the other fields
    #[serde(default)]
    pub takes_value: Option<bool>,

    #[serde(default)]
    pub repeatable: bool,

    #[serde(default)]
    pub complete: Option<CompletionKind>,

    /// Glob filter for `file` and `directory` completion
    #[serde(default)]
    pub glob: Option<String>,

    /// Prefix prepended to signal names
    #[serde(default)]
    pub prefix: Option<String>,

    #[serde(default)]
    pub choices: Option<ChoicesSpec>,

    #[serde(default)]
    pub range: Option<RangeSpec>,
}

/// Either `--flag|-f` or `[--flag, -f]`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NamesSpec {
    Joined(String),
    List(Vec<String>),
}

impl NamesSpec {
    pub fn to_option_strings(&self) -> Result<OptionStrings> {
        match self {
            NamesSpec::Joined(s) => s.parse(),
            NamesSpec::List(list) => OptionStrings::new(list.iter().cloned()),
        }
    }

    /// Names as written, for validation messages
    pub fn display(&self) -> String {
        match self {
            NamesSpec::Joined(s) => s.clone(),
            NamesSpec::List(list) => list.join("|"),
        }
    }
}

/// A plain list of words, or a mapping from word to description
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ChoicesSpec {
    Plain(Vec<serde_yaml::Value>),
    Described(serde_yaml::Mapping),
}

#[derive(Debug, Clone, Deserialize)]
pub struct RangeSpec {
    pub start: i64,
    pub stop: i64,
    #[serde(default = "default_step")]
    pub step: i64,
}

fn default_step() -> i64 {
    1
}

impl DescriptionParser {
    /// Parse a YAML description
    pub fn parse(content: &str) -> Result<CommandSpec> {
        serde_yaml::from_str(content)
            .map_err(|e| CompletionError::Config(format!("YAML parse error: {}", e)))
    }

    /// Parse a JSON description
    pub fn parse_json(content: &str) -> Result<CommandSpec> {
        Ok(serde_json::from_str(content)?)
    }
}

/// Build the command tree described by `spec`
pub fn spec_to_tree(spec: &CommandSpec) -> Result<CommandTree> {
    let mut tree = CommandTree::new(&spec.name, spec.help.clone());
    let root = tree.root();
    add_command(&mut tree, root, spec)?;
    Ok(tree)
}

fn add_command(tree: &mut CommandTree, id: CommandId, spec: &CommandSpec) -> Result<()> {
    debug!(command = %spec.name, options = spec.options.len(), "Adding described command");

    for arg in &spec.options {
        tree.add_argument(id, build_argument(arg)?)?;
    }

    for group in &spec.exclusive {
        tree.add_exclusive(id, group.as_slice())?;
    }

    if spec.subcommands.is_empty() {
        return Ok(());
    }

    let title = spec
        .subcommands_title
        .as_deref()
        .unwrap_or(DEFAULT_SUBCOMMANDS_NAME);
    tree.add_subcommands(id, title, None)?;

    for sub in &spec.subcommands {
        let child = tree.add_subcommand(id, &sub.name, sub.help.clone())?;
        add_command(tree, child, sub)?;
    }

    Ok(())
}

fn build_argument(spec: &ArgumentSpec) -> Result<Argument> {
    let option_strings = spec.names.to_option_strings()?;

    let takes_value = spec.takes_value.unwrap_or_else(|| {
        option_strings.is_positional()
            || spec.value_type.is_some()
            || spec.metavar.is_some()
            || spec.complete.is_some()
            || spec.choices.is_some()
            || spec.range.is_some()
    });

    let mut argument = Argument::new(option_strings, takes_value);
    if let Some(help) = &spec.help {
        argument = argument.with_help(help);
    }
    if let Some(metavar) = &spec.metavar {
        argument = argument.with_metavar(metavar);
    }
    if let Some(value_type) = spec.value_type {
        argument = argument.with_value_type(value_type);
    }
    if spec.repeatable {
        argument = argument.repeatable();
    }

    match &spec.choices {
        Some(ChoicesSpec::Plain(values)) => {
            let words: Vec<String> = values
                .iter()
                .cloned()
                .filter_map(yaml_scalar_to_string)
                .collect();
            argument = argument.with_choices(words);
        }
        Some(ChoicesSpec::Described(mapping)) => {
            let pairs: Vec<(String, String)> = mapping
                .iter()
                .filter_map(|(k, v)| {
                    let value = yaml_scalar_to_string(k.clone())?;
                    let description = yaml_scalar_to_string(v.clone()).unwrap_or_default();
                    Some((value, description))
                })
                .collect();
            argument = argument.with_described_choices(pairs);
        }
        None => {}
    }

    if let Some(range) = &spec.range {
        argument = argument.with_range(IntRange::new(range.start, range.stop, range.step)?);
    }

    if let Some(kind) = spec.complete {
        if let Some(completion) = declared_completion(spec, kind)? {
            argument = argument.with_completion(completion);
        }
    }

    Ok(argument)
}

/// Completion named by `complete:`, with its glob or prefix attached.
///
/// `complete: choices` and `complete: range` only name what `choices:` or
/// `range:` already declare, so they produce no descriptor of their own.
fn declared_completion(spec: &ArgumentSpec, kind: CompletionKind) -> Result<Option<Completion>> {
    if kind.takes_data() {
        if spec.choices.is_none() && spec.range.is_none() {
            return Err(CompletionError::Validation(format!(
                "Argument '{}' completes {} but declares no values",
                spec.names.display(),
                kind
            )));
        }
        return Ok(None);
    }

    let completion = match kind {
        CompletionKind::File => Completion::File {
            glob: spec.glob.clone(),
        },
        CompletionKind::Directory => Completion::Directory {
            glob: spec.glob.clone(),
        },
        CompletionKind::Signal => Completion::Signal {
            prefix: spec.prefix.clone().unwrap_or_default(),
        },
        other => Completion::from_kind(other)?,
    };
    Ok(Some(completion))
}

/// Convert a YAML scalar to its string form, `None` for null
fn yaml_scalar_to_string(value: serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::Null => None,
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::String(s) => Some(s),
        other => serde_yaml::to_string(&other)
            .ok()
            .map(|s| s.trim().to_string()),
    }
}
