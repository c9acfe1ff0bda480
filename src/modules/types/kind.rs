//! Completion kind definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Abstract category of value an argument accepts, independent of any shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionKind {
    /// Nothing to propose
    None,
    /// One of a fixed list of words
    Choices,
    /// An executable command name
    Command,
    /// A directory path
    Directory,
    /// A file path
    File,
    /// A group name
    Group,
    /// A host name
    Hostname,
    /// A process id
    Pid,
    /// A process name
    Process,
    /// An integer out of a range
    Range,
    /// A system service
    Service,
    /// A user name
    User,
    /// A shell variable name
    Variable,
    /// A signal name
    Signal,
}

impl fmt::Display for CompletionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CompletionKind::None => "none",
            CompletionKind::Choices => "choices",
            CompletionKind::Command => "command",
            CompletionKind::Directory => "directory",
            CompletionKind::File => "file",
            CompletionKind::Group => "group",
            CompletionKind::Hostname => "hostname",
            CompletionKind::Pid => "pid",
            CompletionKind::Process => "process",
            CompletionKind::Range => "range",
            CompletionKind::Service => "service",
            CompletionKind::User => "user",
            CompletionKind::Variable => "variable",
            CompletionKind::Signal => "signal",
        };
        f.write_str(name)
    }
}

impl FromStr for CompletionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(CompletionKind::None),
            "choices" => Ok(CompletionKind::Choices),
            "command" => Ok(CompletionKind::Command),
            "directory" | "dir" => Ok(CompletionKind::Directory),
            "file" => Ok(CompletionKind::File),
            "group" => Ok(CompletionKind::Group),
            "hostname" | "host" => Ok(CompletionKind::Hostname),
            "pid" => Ok(CompletionKind::Pid),
            "process" => Ok(CompletionKind::Process),
            "range" => Ok(CompletionKind::Range),
            "service" => Ok(CompletionKind::Service),
            "user" => Ok(CompletionKind::User),
            "variable" => Ok(CompletionKind::Variable),
            "signal" => Ok(CompletionKind::Signal),
            _ => Err(format!("Unknown completion kind: {}", s)),
        }
    }
}

impl CompletionKind {
    /// Returns all completion kinds
    pub fn all() -> &'static [CompletionKind] {
        &[
            CompletionKind::None,
            CompletionKind::Choices,
            CompletionKind::Command,
            CompletionKind::Directory,
            CompletionKind::File,
            CompletionKind::Group,
            CompletionKind::Hostname,
            CompletionKind::Pid,
            CompletionKind::Process,
            CompletionKind::Range,
            CompletionKind::Service,
            CompletionKind::User,
            CompletionKind::Variable,
            CompletionKind::Signal,
        ]
    }

    /// Returns true if a descriptor of this kind cannot be built from the name alone
    pub fn takes_data(&self) -> bool {
        matches!(self, CompletionKind::Choices | CompletionKind::Range)
    }

    /// Returns true if the kind can be narrowed with a glob
    pub fn accepts_glob(&self) -> bool {
        matches!(self, CompletionKind::File | CompletionKind::Directory)
    }

    /// Returns true if the kind can carry a word prefix
    pub fn accepts_prefix(&self) -> bool {
        matches!(self, CompletionKind::Signal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_str() {
        assert_eq!(CompletionKind::from_str("file").unwrap(), CompletionKind::File);
        assert_eq!(CompletionKind::from_str("dir").unwrap(), CompletionKind::Directory);
        assert_eq!(CompletionKind::from_str("Host").unwrap(), CompletionKind::Hostname);
        assert_eq!(CompletionKind::from_str("signal").unwrap(), CompletionKind::Signal);
        assert!(CompletionKind::from_str("socket").is_err());
    }

    #[test]
    fn test_kind_display_round_trips() {
        assert_eq!(CompletionKind::all().len(), 14);
        for kind in CompletionKind::all() {
            assert_eq!(CompletionKind::from_str(&kind.to_string()).unwrap(), *kind);
        }
    }

    #[test]
    fn test_kind_takes_data() {
        assert!(CompletionKind::Choices.takes_data());
        assert!(CompletionKind::Range.takes_data());
        assert!(!CompletionKind::File.takes_data());
        assert!(CompletionKind::Directory.accepts_glob());
        assert!(!CompletionKind::Signal.accepts_glob());
        assert!(CompletionKind::Signal.accepts_prefix());
    }

    #[test]
    fn test_kind_serde() {
        let kind: CompletionKind = serde_json::from_str("\"hostname\"").unwrap();
        assert_eq!(kind, CompletionKind::Hostname);
        assert_eq!(serde_json::to_string(&CompletionKind::Pid).unwrap(), "\"pid\"");
    }
}
