//! Target shell definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shell dialects a completion script can be generated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shell {
    /// GNU Bash with the bash-completion helper library
    Bash,
    /// Z shell with the compsys completion system
    Zsh,
    /// Friendly interactive shell
    Fish,
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shell::Bash => write!(f, "bash"),
            Shell::Zsh => write!(f, "zsh"),
            Shell::Fish => write!(f, "fish"),
        }
    }
}

impl FromStr for Shell {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bash" => Ok(Shell::Bash),
            "zsh" => Ok(Shell::Zsh),
            "fish" => Ok(Shell::Fish),
            _ => Err(format!("Unknown shell: {} (expected bash, zsh or fish)", s)),
        }
    }
}

impl Shell {
    /// Returns all supported shells
    pub fn all() -> &'static [Shell] {
        &[Shell::Bash, Shell::Zsh, Shell::Fish]
    }

    /// Returns true if the shell understands `@(a|b)` style patterns
    pub fn supports_extglob(&self) -> bool {
        matches!(self, Shell::Bash)
    }

    /// Returns true if a choice list can carry one description per value
    pub fn supports_described_choices(&self) -> bool {
        matches!(self, Shell::Zsh)
    }
}
