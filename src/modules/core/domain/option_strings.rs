//! Option strings identifying one argument

use std::fmt;
use std::str::FromStr;

use crate::error::{CompletionError, Result};

/// Ordered, non-empty set of literal strings naming one argument.
///
/// Either every entry starts with `-` (an option such as `--flag|-f`) or the
/// set holds exactly one bare name (a positional such as `target`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionStrings(Vec<String>);

impl OptionStrings {
    /// Build from a list of strings, rejecting malformed combinations
    pub fn new<I, S>(strings: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for s in strings {
            let s = s.into();
            if !unique.contains(&s) {
                unique.push(s);
            }
        }

        if unique.is_empty() || unique.iter().any(|s| s.is_empty() || s == "-") {
            return Err(CompletionError::EmptyOptionStrings(unique.join("|")));
        }

        let num_options = unique.iter().filter(|s| s.starts_with('-')).count();
        let num_positionals = unique.len() - num_options;

        if num_options > 0 && num_positionals > 0 {
            return Err(CompletionError::MixedOptionStrings(unique.join("|")));
        }

        if num_positionals > 1 {
            return Err(CompletionError::MultiplePositionalNames(unique.join("|")));
        }

        Ok(Self(unique))
    }

    /// Returns true for a bare positional name
    pub fn is_positional(&self) -> bool {
        !self.0[0].starts_with('-')
    }

    /// Returns true for `-x`/`--xyz` style strings
    pub fn is_option(&self) -> bool {
        !self.is_positional()
    }

    /// First string, used as the display name
    pub fn primary(&self) -> &str {
        &self.0[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, s: &str) -> bool {
        self.0.iter().any(|o| o == s)
    }

    /// All strings in lexical order
    pub fn sorted(&self) -> Vec<&str> {
        let mut v: Vec<&str> = self.iter().collect();
        v.sort_unstable();
        v
    }

    /// Single-character options (`-x`), sorted
    pub fn short_options(&self) -> Vec<&str> {
        let mut v: Vec<&str> = self.iter().filter(|s| is_short(s)).collect();
        v.sort_unstable();
        v
    }

    /// Double-dash options (`--xyz`), sorted
    pub fn long_options(&self) -> Vec<&str> {
        let mut v: Vec<&str> = self.iter().filter(|s| s.starts_with("--")).collect();
        v.sort_unstable();
        v
    }

    /// Single-dash multi-character options (`-xyz`), sorted
    pub fn old_style_options(&self) -> Vec<&str> {
        let mut v: Vec<&str> = self
            .iter()
            .filter(|s| s.starts_with('-') && !s.starts_with("--") && !is_short(s))
            .collect();
        v.sort_unstable();
        v
    }
}

fn is_short(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next() == Some('-')
        && matches!(chars.next(), Some(c) if c != '-')
        && chars.next().is_none()
}

impl FromStr for OptionStrings {
    type Err = CompletionError;

    /// Parse the `--flag|-f` shorthand
    fn from_str(s: &str) -> Result<Self> {
        Self::new(s.split('|').map(str::trim))
    }
}

impl fmt::Display for OptionStrings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("|"))
    }
}
