//! A single option or positional argument

use shellcomp_types::ValueType;

use super::{Completion, GroupId, IntRange, OptionStrings};
use crate::error::{CompletionError, Result};

/// An option (`--out|-o`) or a positional (`target`) of one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    option_strings: OptionStrings,
    metavar: Option<String>,
    help: Option<String>,
    value_type: Option<ValueType>,
    completion: Completion,
    takes_value: bool,
    repeatable: bool,
    kind_declared: bool,
    choices_declared: bool,
    pub(crate) group: Option<GroupId>,
}

impl Argument {
    /// Build from option strings. Positionals always take a value.
    pub fn new(option_strings: OptionStrings, takes_value: bool) -> Self {
        let takes_value = takes_value || option_strings.is_positional();
        Self {
            option_strings,
            metavar: None,
            help: None,
            value_type: None,
            completion: Completion::None,
            takes_value,
            repeatable: false,
            kind_declared: false,
            choices_declared: false,
            group: None,
        }
    }

    /// Value-less option, e.g. `"--verbose|-v"`
    pub fn flag(names: &str) -> Result<Self> {
        Ok(Self::new(names.parse()?, false))
    }

    /// Value-taking option, e.g. `"--output|-o"`
    pub fn option(names: &str) -> Result<Self> {
        Ok(Self::new(names.parse()?, true))
    }

    /// Positional argument with a single bare name
    pub fn positional(name: &str) -> Result<Self> {
        let option_strings = OptionStrings::new([name])?;
        if option_strings.is_option() {
            return Err(CompletionError::Validation(format!(
                "positional name '{}' cannot start with '-'",
                name
            )));
        }
        Ok(Self::new(option_strings, true))
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn with_metavar(mut self, metavar: impl Into<String>) -> Self {
        self.metavar = Some(metavar.into());
        self
    }

    pub fn with_value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = Some(value_type);
        self
    }

    /// Declare the completion explicitly.
    ///
    /// A `Choices` or `Range` descriptor counts as a choice declaration, any
    /// other descriptor as a completion kind. Declaring both is rejected when
    /// the argument is added to a command.
    pub fn with_completion(mut self, completion: Completion) -> Self {
        match completion {
            Completion::Choices(_) | Completion::Range(_) => self.choices_declared = true,
            _ => self.kind_declared = true,
        }
        self.completion = completion;
        self
    }

    /// Constrain the value to a list of words.
    ///
    /// A list of two or more consecutive ascending integers is stored as a
    /// range so shells can use their native range expansion.
    pub fn with_choices<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        let completion = match contiguous_range(&values) {
            Some(range) => Completion::Range(range),
            None => Completion::choices(values),
        };
        self.with_completion(completion)
    }

    /// Constrain the value to a list of words with descriptions
    pub fn with_described_choices<I, V, D>(self, values: I) -> Self
    where
        I: IntoIterator<Item = (V, D)>,
        V: Into<String>,
        D: Into<String>,
    {
        self.with_completion(Completion::described(values))
    }

    pub fn with_range(self, range: IntRange) -> Self {
        self.with_completion(Completion::Range(range))
    }

    /// The argument may be given more than once
    pub fn repeatable(mut self) -> Self {
        self.repeatable = true;
        self
    }

    /// Check the declarations and resolve the default completion
    pub(crate) fn finalize(&mut self) -> Result<()> {
        if self.kind_declared && self.choices_declared {
            return Err(CompletionError::ConflictingCompletion(
                self.option_strings.to_string(),
            ));
        }

        if !self.takes_value {
            if !self.completion.is_none() {
                return Err(CompletionError::CompletionWithoutValue(
                    self.option_strings.to_string(),
                ));
            }
            return Ok(());
        }

        if !self.kind_declared && !self.choices_declared {
            let fixed = self.value_type.map(|t| t.is_fixed_format()).unwrap_or(false);
            self.completion = if fixed {
                Completion::None
            } else {
                Completion::file()
            };
        }

        Ok(())
    }

    pub fn option_strings(&self) -> &OptionStrings {
        &self.option_strings
    }

    /// Display name: the first option string
    pub fn name(&self) -> &str {
        self.option_strings.primary()
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Display name for the value.
    ///
    /// Falls back to the value type's name, then to the upper-cased argument
    /// name (`--output-dir` becomes `OUTPUT_DIR`).
    pub fn metavar(&self) -> String {
        if let Some(m) = &self.metavar {
            return m.clone();
        }
        if let Some(m) = self.value_type.and_then(|t| t.metavar()) {
            return m.to_string();
        }
        let name = self
            .option_strings
            .long_options()
            .first()
            .copied()
            .unwrap_or_else(|| self.option_strings.primary());
        name.trim_start_matches('-').replace('-', "_").to_uppercase()
    }

    pub fn value_type(&self) -> Option<ValueType> {
        self.value_type
    }

    pub fn completion(&self) -> &Completion {
        &self.completion
    }

    pub fn takes_value(&self) -> bool {
        self.takes_value
    }

    pub fn is_repeatable(&self) -> bool {
        self.repeatable
    }

    pub fn is_positional(&self) -> bool {
        self.option_strings.is_positional()
    }

    pub fn is_option(&self) -> bool {
        self.option_strings.is_option()
    }

    pub fn group(&self) -> Option<GroupId> {
        self.group
    }
}

fn contiguous_range(values: &[String]) -> Option<IntRange> {
    if values.len() < 2 {
        return None;
    }
    let numbers: Vec<i64> = values
        .iter()
        .map(|v| v.parse::<i64>().ok().filter(|n| n.to_string() == *v))
        .collect::<Option<_>>()?;
    let contiguous = numbers.windows(2).all(|w| w[0].checked_add(1) == Some(w[1]));
    if !contiguous {
        return None;
    }
    IntRange::new(numbers[0], numbers[numbers.len() - 1], 1).ok()
}
