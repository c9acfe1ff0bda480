//! Arena holding the whole command tree

use tracing::debug;

use super::{Argument, Command, CommandId, GroupId, MutuallyExclusiveGroup, SubcommandSlot};
use crate::error::{CompletionError, Result};

/// Default display name of a subcommand slot
pub const DEFAULT_SUBCOMMANDS_NAME: &str = "command";

/// The full argument surface of a program.
///
/// Commands live in an arena and refer to each other by [`CommandId`]. The
/// root is created with the tree; subcommands are added top-down. Each
/// command caches its ancestor chain when it is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTree {
    commands: Vec<Command>,
}

impl CommandTree {
    pub fn new(name: impl Into<String>, help: Option<String>) -> Self {
        Self {
            commands: vec![Command::new(name.into(), help, None, Vec::new())],
        }
    }

    pub fn root(&self) -> CommandId {
        CommandId(0)
    }

    /// Command behind an id handed out by this tree
    pub fn get(&self, id: CommandId) -> &Command {
        &self.commands[id.0]
    }

    fn get_mut(&mut self, id: CommandId) -> &mut Command {
        &mut self.commands[id.0]
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Add an argument to `cmd` and return its index.
    ///
    /// The argument's default completion is resolved here; conflicting
    /// declarations are rejected.
    pub fn add_argument(&mut self, cmd: CommandId, mut argument: Argument) -> Result<usize> {
        argument.finalize()?;
        debug!(
            command = %self.get(cmd).name,
            argument = %argument.option_strings(),
            completion = %argument.completion(),
            "Adding argument"
        );
        let command = self.get_mut(cmd);
        command.arguments.push(argument);
        Ok(command.arguments.len() - 1)
    }

    /// Create an empty mutually exclusive group in `cmd`
    pub fn add_group(&mut self, cmd: CommandId) -> GroupId {
        let command = self.get_mut(cmd);
        command.groups.push(MutuallyExclusiveGroup::default());
        GroupId(command.groups.len() - 1)
    }

    /// Put the argument at `arg_idx` into `group`
    pub fn add_to_group(&mut self, cmd: CommandId, group: GroupId, arg_idx: usize) -> Result<()> {
        let command = self.get_mut(cmd);
        let command_name = command.name.clone();

        if group.0 >= command.groups.len() {
            return Err(CompletionError::Validation(format!(
                "unknown group in command '{}'",
                command_name
            )));
        }

        let argument = command.arguments.get_mut(arg_idx).ok_or_else(|| {
            CompletionError::UnknownGroupMember {
                command: command_name.clone(),
                argument: format!("#{}", arg_idx),
            }
        })?;

        if argument.is_positional() {
            return Err(CompletionError::PositionalInGroup(argument.name().to_string()));
        }
        if argument.group.is_some() {
            return Err(CompletionError::AlreadyGrouped(argument.name().to_string()));
        }

        argument.group = Some(group);
        command.groups[group.0].members.push(arg_idx);
        Ok(())
    }

    /// Group the options named by `names` (any of their option strings)
    pub fn add_exclusive<S: AsRef<str>>(&mut self, cmd: CommandId, names: &[S]) -> Result<GroupId> {
        let mut members = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            let idx = self.get(cmd).find_argument(name).ok_or_else(|| {
                CompletionError::UnknownGroupMember {
                    command: self.get(cmd).name.clone(),
                    argument: name.to_string(),
                }
            })?;
            if members.contains(&idx) {
                continue;
            }

            let argument = &self.get(cmd).arguments[idx];
            if argument.is_positional() {
                return Err(CompletionError::PositionalInGroup(argument.name().to_string()));
            }
            if argument.group.is_some() {
                return Err(CompletionError::AlreadyGrouped(argument.name().to_string()));
            }
            members.push(idx);
        }

        // every member is checked before the group exists
        let group = self.add_group(cmd);
        for idx in members {
            self.add_to_group(cmd, group, idx)?;
        }
        Ok(group)
    }

    /// Open the subcommand slot of `cmd`
    pub fn add_subcommands(
        &mut self,
        cmd: CommandId,
        name: impl Into<String>,
        help: Option<String>,
    ) -> Result<()> {
        let command = self.get_mut(cmd);
        if command.subcommands.is_some() {
            return Err(CompletionError::DuplicateSubcommandSlot(command.name.clone()));
        }
        command.subcommands = Some(SubcommandSlot {
            name: name.into(),
            help,
            entries: Vec::new(),
        });
        Ok(())
    }

    /// Add a child command, opening a default slot if `parent` has none
    pub fn add_subcommand(
        &mut self,
        parent: CommandId,
        name: impl Into<String>,
        help: Option<String>,
    ) -> Result<CommandId> {
        let name = name.into();

        if self.get(parent).subcommands.is_none() {
            self.add_subcommands(parent, DEFAULT_SUBCOMMANDS_NAME, None)?;
        }

        let parent_cmd = self.get(parent);
        if let Some(slot) = &parent_cmd.subcommands {
            if slot.get(&name).is_some() {
                return Err(CompletionError::DuplicateSubcommand {
                    command: parent_cmd.name.clone(),
                    name,
                });
            }
        }

        let mut ancestors = parent_cmd.ancestors.clone();
        ancestors.push(parent);

        let id = CommandId(self.commands.len());
        self.commands
            .push(Command::new(name.clone(), help, Some(parent), ancestors));

        if let Some(slot) = self.get_mut(parent).subcommands.as_mut() {
            slot.entries.push((name, id));
        }
        Ok(id)
    }

    /// Positional words consumed by the ancestors of `cmd`.
    ///
    /// Every ancestor contributes its own positionals plus one word for the
    /// subcommand name that selected the next level.
    pub fn positional_offset(&self, cmd: CommandId) -> usize {
        self.get(cmd)
            .ancestors
            .iter()
            .map(|a| self.get(*a).num_positionals() + 1)
            .sum()
    }

    /// Global 1-based index of the positional at `arg_idx`
    pub fn positional_index(&self, cmd: CommandId, arg_idx: usize) -> Option<usize> {
        let command = self.get(cmd);
        let local = command
            .positionals()
            .position(|(idx, _)| idx == arg_idx)?;
        Some(self.positional_offset(cmd) + local + 1)
    }

    /// Global 1-based index of the subcommand name word
    pub fn subcommand_index(&self, cmd: CommandId) -> Option<usize> {
        let command = self.get(cmd);
        command.subcommands.as_ref()?;
        Some(self.positional_offset(cmd) + command.num_positionals() + 1)
    }

    /// Option strings of the other members of the argument's group
    pub fn conflicting_option_strings(&self, cmd: CommandId, arg_idx: usize) -> Vec<&str> {
        let command = self.get(cmd);
        let group = match command.arguments.get(arg_idx).and_then(|a| a.group) {
            Some(g) => g,
            None => return Vec::new(),
        };

        command.groups[group.0]
            .members
            .iter()
            .filter(|m| **m != arg_idx)
            .flat_map(move |m| command.arguments[*m].option_strings().iter())
            .collect()
    }

    /// Command names from the root down to `cmd`
    pub fn path(&self, cmd: CommandId) -> Vec<&str> {
        let command = self.get(cmd);
        command
            .ancestors
            .iter()
            .map(|a| self.get(*a).name.as_str())
            .chain(std::iter::once(command.name.as_str()))
            .collect()
    }

    /// Subcommand names from below the root down to `cmd`
    pub fn subcommand_path(&self, cmd: CommandId) -> Vec<&str> {
        let mut path = self.path(cmd);
        path.remove(0);
        path
    }

    /// All commands, depth first, children in declaration order
    pub fn walk(&self) -> Vec<CommandId> {
        let mut out = Vec::with_capacity(self.commands.len());
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(slot) = &self.get(id).subcommands {
                stack.extend(slot.entries.iter().rev().map(|(_, child)| *child));
            }
        }
        out
    }

    /// Option strings of every value-taking option anywhere in the tree
    pub fn value_option_strings(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for id in self.walk() {
            for (_, arg) in self.get(id).options() {
                if arg.takes_value() {
                    for s in arg.option_strings().iter() {
                        if !out.contains(&s) {
                            out.push(s);
                        }
                    }
                }
            }
        }
        out.sort_unstable();
        out
    }

    /// True when some command has a positional or subcommands
    pub fn has_positionals(&self) -> bool {
        self.commands
            .iter()
            .any(|c| c.num_positionals() > 0 || c.subcommands.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (CommandTree, CommandId, CommandId) {
        let mut tree = CommandTree::new("prog", Some("A program".into()));
        let root = tree.root();
        tree.add_argument(root, Argument::flag("--flag|-f").unwrap()).unwrap();
        tree.add_argument(root, Argument::positional("first").unwrap()).unwrap();
        tree.add_argument(root, Argument::option("--out").unwrap()).unwrap();
        tree.add_argument(root, Argument::positional("second").unwrap()).unwrap();

        let build = tree.add_subcommand(root, "build", Some("Build it".into())).unwrap();
        tree.add_argument(build, Argument::positional("target").unwrap()).unwrap();

        let deep = tree.add_subcommand(build, "deep", None).unwrap();
        tree.add_argument(deep, Argument::positional("leaf").unwrap()).unwrap();
        (tree, build, deep)
    }

    #[test]
    fn test_positional_indices_continue_across_levels() {
        let (tree, build, deep) = sample();
        let root = tree.root();

        assert_eq!(tree.positional_index(root, 1), Some(1));
        assert_eq!(tree.positional_index(root, 3), Some(2));
        assert_eq!(tree.positional_index(root, 0), None);
        assert_eq!(tree.subcommand_index(root), Some(3));

        assert_eq!(tree.positional_index(build, 0), Some(4));
        assert_eq!(tree.subcommand_index(build), Some(5));
        assert_eq!(tree.positional_index(deep, 0), Some(6));
        assert_eq!(tree.subcommand_index(deep), None);
    }

    #[test]
    fn test_interleaved_options_do_not_shift_indices() {
        let mut tree = CommandTree::new("prog", None);
        let root = tree.root();
        tree.add_argument(root, Argument::positional("a").unwrap()).unwrap();
        for i in 0..5 {
            tree.add_argument(root, Argument::flag(&format!("--opt{}", i)).unwrap())
                .unwrap();
        }
        let b = tree.add_argument(root, Argument::positional("b").unwrap()).unwrap();
        assert_eq!(tree.positional_index(root, b), Some(2));
    }

    #[test]
    fn test_ancestors_are_cached_root_first() {
        let (tree, build, deep) = sample();
        assert_eq!(tree.get(deep).ancestors(), &[tree.root(), build]);
        assert_eq!(tree.path(deep), vec!["prog", "build", "deep"]);
        assert_eq!(tree.subcommand_path(deep), vec!["build", "deep"]);
        assert_eq!(tree.get(deep).parent(), Some(build));
    }

    #[test]
    fn test_walk_is_depth_first_in_declaration_order() {
        let mut tree = CommandTree::new("prog", None);
        let root = tree.root();
        let a = tree.add_subcommand(root, "a", None).unwrap();
        let b = tree.add_subcommand(root, "b", None).unwrap();
        let a1 = tree.add_subcommand(a, "a1", None).unwrap();
        assert_eq!(tree.walk(), vec![root, a, a1, b]);
    }

    #[test]
    fn test_duplicate_subcommands_rejected() {
        let mut tree = CommandTree::new("prog", None);
        let root = tree.root();
        tree.add_subcommand(root, "build", None).unwrap();
        let err = tree.add_subcommand(root, "build", None).unwrap_err();
        assert!(matches!(err, CompletionError::DuplicateSubcommand { .. }));

        let err = tree.add_subcommands(root, "again", None).unwrap_err();
        assert!(matches!(err, CompletionError::DuplicateSubcommandSlot(_)));
    }

    #[test]
    fn test_exclusive_group_conflicts_are_symmetric() {
        let mut tree = CommandTree::new("prog", None);
        let root = tree.root();
        let q = tree.add_argument(root, Argument::flag("--quiet|-q").unwrap()).unwrap();
        let v = tree.add_argument(root, Argument::flag("--verbose|-v").unwrap()).unwrap();
        tree.add_exclusive(root, &["--quiet", "-v"]).unwrap();

        assert_eq!(tree.conflicting_option_strings(root, q), vec!["--verbose", "-v"]);
        assert_eq!(tree.conflicting_option_strings(root, v), vec!["--quiet", "-q"]);
    }

    #[test]
    fn test_group_membership_errors() {
        let mut tree = CommandTree::new("prog", None);
        let root = tree.root();
        tree.add_argument(root, Argument::flag("-a").unwrap()).unwrap();
        tree.add_argument(root, Argument::flag("-b").unwrap()).unwrap();
        tree.add_argument(root, Argument::positional("file").unwrap()).unwrap();

        let err = tree.add_exclusive(root, &["-a", "file"]).unwrap_err();
        assert!(matches!(err, CompletionError::PositionalInGroup(_)));
        assert_eq!(tree.get(root).groups().len(), 0);
        assert!(tree.get(root).arguments()[0].group().is_none());

        tree.add_exclusive(root, &["-a", "-b"]).unwrap();
        let err = tree.add_exclusive(root, &["-a"]).unwrap_err();
        assert!(matches!(err, CompletionError::AlreadyGrouped(_)));

        let err = tree.add_exclusive(root, &["--missing"]).unwrap_err();
        assert!(matches!(err, CompletionError::UnknownGroupMember { .. }));
        assert_eq!(tree.get(root).groups().len(), 1);
    }

    #[test]
    fn test_exclusive_duplicate_names_collapse() {
        let mut tree = CommandTree::new("prog", None);
        let root = tree.root();
        tree.add_argument(root, Argument::flag("--all|-a").unwrap()).unwrap();
        tree.add_argument(root, Argument::flag("-b").unwrap()).unwrap();

        let group = tree.add_exclusive(root, &["--all", "-a", "-b"]).unwrap();
        assert_eq!(tree.get(root).groups()[group.0].members(), &[0, 1]);
    }

    #[test]
    fn test_value_option_strings_span_tree() {
        let mut tree = CommandTree::new("prog", None);
        let root = tree.root();
        tree.add_argument(root, Argument::option("--out|-o").unwrap()).unwrap();
        tree.add_argument(root, Argument::flag("--flag").unwrap()).unwrap();
        let sub = tree.add_subcommand(root, "sub", None).unwrap();
        tree.add_argument(sub, Argument::option("--level").unwrap()).unwrap();
        tree.add_argument(sub, Argument::option("-o").unwrap()).unwrap();

        assert_eq!(tree.value_option_strings(), vec!["--level", "--out", "-o"]);
        assert!(tree.has_positionals());
    }

    #[test]
    fn test_add_argument_rejects_conflicting_completion() {
        let mut tree = CommandTree::new("prog", None);
        let root = tree.root();
        let arg = Argument::option("--mode")
            .unwrap()
            .with_choices(["a", "b"])
            .with_completion(crate::domain::Completion::Directory { glob: None });
        assert!(tree.add_argument(root, arg).is_err());
        assert!(tree.get(root).arguments().is_empty());
    }
}
