//! One parser level of the command tree

use super::Argument;

/// Handle to a command stored in a [`super::CommandTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandId(pub(crate) usize);

/// Handle to a mutually exclusive group within one command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(pub(crate) usize);

/// Options that suppress each other's completion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutuallyExclusiveGroup {
    pub(crate) members: Vec<usize>,
}

impl MutuallyExclusiveGroup {
    /// Indices into the owning command's argument list
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    pub fn contains(&self, arg_idx: usize) -> bool {
        self.members.contains(&arg_idx)
    }
}

/// Ordered subcommands of a command; consumes one positional slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubcommandSlot {
    pub(crate) name: String,
    pub(crate) help: Option<String>,
    pub(crate) entries: Vec<(String, CommandId)>,
}

impl SubcommandSlot {
    /// Display name of the slot, `command` unless overridden
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, CommandId)> {
        self.entries.iter().map(|(name, id)| (name.as_str(), *id))
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<CommandId> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, id)| *id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A command or subcommand with its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub(crate) name: String,
    pub(crate) help: Option<String>,
    pub(crate) parent: Option<CommandId>,
    pub(crate) ancestors: Vec<CommandId>,
    pub(crate) arguments: Vec<Argument>,
    pub(crate) groups: Vec<MutuallyExclusiveGroup>,
    pub(crate) subcommands: Option<SubcommandSlot>,
}

impl Command {
    pub(crate) fn new(
        name: String,
        help: Option<String>,
        parent: Option<CommandId>,
        ancestors: Vec<CommandId>,
    ) -> Self {
        Self {
            name,
            help,
            parent,
            ancestors,
            arguments: Vec::new(),
            groups: Vec::new(),
            subcommands: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    pub fn parent(&self) -> Option<CommandId> {
        self.parent
    }

    /// Strict ancestors, root first
    pub fn ancestors(&self) -> &[CommandId] {
        &self.ancestors
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// All arguments in declaration order
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    pub fn argument(&self, idx: usize) -> Option<&Argument> {
        self.arguments.get(idx)
    }

    /// Options with their argument index
    pub fn options(&self) -> impl Iterator<Item = (usize, &Argument)> {
        self.arguments
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_option())
    }

    /// Positionals with their argument index, in declaration order
    pub fn positionals(&self) -> impl Iterator<Item = (usize, &Argument)> {
        self.arguments
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_positional())
    }

    pub fn num_positionals(&self) -> usize {
        self.positionals().count()
    }

    /// Find the argument owning an option string or positional name
    pub fn find_argument(&self, name: &str) -> Option<usize> {
        self.arguments
            .iter()
            .position(|a| a.option_strings().contains(name))
    }

    pub fn groups(&self) -> &[MutuallyExclusiveGroup] {
        &self.groups
    }

    pub fn subcommands(&self) -> Option<&SubcommandSlot> {
        self.subcommands.as_ref()
    }

    pub fn has_subcommands(&self) -> bool {
        self.subcommands.as_ref().map(|s| !s.is_empty()).unwrap_or(false)
    }
}
