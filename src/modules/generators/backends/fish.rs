//! Fish completion scripts made of conditional `complete` rules

use std::fmt::Write;

use shellcomp_core::escape::{escape, escape_words};
use shellcomp_core::{Argument, CommandId, CommandTree, Completion};
use shellcomp_types::Shell;
use tracing::debug;

use super::w;
use crate::completer::{default_substitute, ShellCompleter};
use crate::Generator;

/// Flags and `-a` argument of a fish `complete` rule
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FishAction {
    /// Suppress file completion (`-f`)
    pub no_files: bool,
    /// Force file completion (`-F`)
    pub force_files: bool,
    /// Escaped argument for `-a`
    pub arguments: Option<String>,
}

impl FishAction {
    fn words(arguments: impl Into<String>) -> Self {
        Self {
            no_files: true,
            force_files: false,
            arguments: Some(arguments.into()),
        }
    }
}

/// Maps completion kinds to fish helper functions
#[derive(Debug, Clone, Copy, Default)]
pub struct FishCompleter;

impl ShellCompleter for FishCompleter {
    type Action = FishAction;

    fn shell(&self) -> Shell {
        Shell::Fish
    }

    fn none(&self) -> FishAction {
        FishAction {
            no_files: true,
            ..FishAction::default()
        }
    }

    fn native(&self, completion: &Completion) -> Option<FishAction> {
        let action = match completion {
            Completion::None => self.none(),
            Completion::Choices(choices) => {
                FishAction::words(escape(&escape_words(choices.values())))
            }
            Completion::Command => FishAction::words("'(__fish_complete_command)'"),
            Completion::Directory { glob: None } => {
                FishAction::words("'(__fish_complete_directories)'")
            }
            Completion::File { glob: None } => FishAction {
                force_files: true,
                ..FishAction::default()
            },
            Completion::Group => FishAction::words("'(__fish_complete_groups)'"),
            Completion::Hostname => FishAction::words("'(__fish_print_hostnames)'"),
            Completion::Pid => FishAction::words("'(__fish_complete_pids)'"),
            Completion::Process => FishAction::words("'(__fish_complete_proc)'"),
            Completion::Range(r) if r.step() == 1 => {
                FishAction::words(format!("'(seq {} {})'", r.start(), r.stop()))
            }
            Completion::Range(r) => {
                FishAction::words(format!("'(seq {} {} {})'", r.start(), r.step(), r.stop()))
            }
            Completion::Service => FishAction::words("'(__fish_systemctl_services)'"),
            Completion::User => FishAction::words("'(__fish_complete_users)'"),
            Completion::Variable => FishAction::words("'(set -n)'"),
            Completion::Directory { glob: Some(_) }
            | Completion::File { glob: Some(_) }
            | Completion::Signal { .. } => return None,
        };
        Some(action)
    }

    fn substitute(&self, completion: &Completion) -> Completion {
        match completion {
            Completion::Directory { glob: Some(_) } => Completion::directory(),
            other => default_substitute(other),
        }
    }
}

/// Condition gating a `complete` rule
#[derive(Debug, Clone, PartialEq, Eq)]
enum Condition {
    /// `__fish_seen_subcommand_from name`
    Seen(String),
    /// `not __fish_seen_subcommand_from a b ...`
    NotSeen(Vec<String>),
    /// `not __fish_contains_opt -s x long ...`
    NotContainsOpt { short: Vec<String>, long: Vec<String> },
    /// `test (__fish_number_of_cmd_args_wo_opts) = N`
    Positional(usize),
}

impl Condition {
    fn render(&self) -> String {
        match self {
            Condition::Seen(name) => format!("__fish_seen_subcommand_from {}", escape(name)),
            Condition::NotSeen(names) => {
                format!("not __fish_seen_subcommand_from {}", escape_words(names))
            }
            Condition::NotContainsOpt { short, long } => {
                let mut s = String::from("not __fish_contains_opt");
                for o in short {
                    w!(s, " -s {}", escape(o));
                }
                for o in long {
                    w!(s, " {}", escape(o));
                }
                s
            }
            Condition::Positional(n) => format!("test (__fish_number_of_cmd_args_wo_opts) = {}", n),
        }
    }
}

/// One `complete -c prog ...` line
#[derive(Debug, Clone, Default)]
struct FishRule {
    comment: Option<String>,
    conditions: Vec<Condition>,
    short: Vec<String>,
    long: Vec<String>,
    old_style: Vec<String>,
    description: Option<String>,
    requires_argument: bool,
    action: FishAction,
}

impl FishRule {
    fn render(&self, program_name: &str, buf: &mut String) {
        if let Some(comment) = &self.comment {
            w!(buf, "# {}\n", comment);
        }

        w!(buf, "complete -c {}", escape(program_name));

        let (r, f) = (self.requires_argument, self.action.no_files);
        let flags = match (r, f) {
            (true, true) => " -x",
            (true, false) => " -r",
            (false, true) => " -f",
            (false, false) => "",
        };
        buf.push_str(flags);

        if !self.conditions.is_empty() {
            let joined: Vec<String> = self.conditions.iter().map(Condition::render).collect();
            w!(buf, " -n {}", escape(&joined.join(" && ")));
        }
        for o in &self.short {
            w!(buf, " -s {}", escape(o));
        }
        for o in &self.long {
            w!(buf, " -l {}", escape(o));
        }
        for o in &self.old_style {
            w!(buf, " -o {}", escape(o));
        }
        if let Some(desc) = self.description.as_deref().filter(|d| !d.is_empty()) {
            w!(buf, " -d {}", escape(desc));
        }
        if self.action.force_files {
            buf.push_str(" -F");
        }
        if let Some(arguments) = &self.action.arguments {
            w!(buf, " -a {}", arguments);
        }
        buf.push('\n');
    }
}

/// Generates one flat list of fish rules gated by subcommand predicates
#[derive(Debug, Clone, Copy, Default)]
pub struct FishGenerator {
    completer: FishCompleter,
}

impl FishGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Conditions shared by every rule of `cmd`: its whole path was typed
    fn path_conditions(tree: &CommandTree, cmd: CommandId) -> Vec<Condition> {
        tree.subcommand_path(cmd)
            .into_iter()
            .map(|name| Condition::Seen(name.to_string()))
            .collect()
    }

    fn option_rule(&self, tree: &CommandTree, cmd: CommandId, idx: usize, arg: &Argument) -> FishRule {
        let command = tree.get(cmd);
        let mut conditions = Self::path_conditions(tree, cmd);

        if let Some(slot) = command.subcommands().filter(|s| !s.is_empty()) {
            conditions.push(Condition::NotSeen(
                slot.names().into_iter().map(str::to_string).collect(),
            ));
        }

        let mut short: Vec<String> = Vec::new();
        let mut long: Vec<String> = Vec::new();
        for o in tree.conflicting_option_strings(cmd, idx) {
            if let Some(l) = o.strip_prefix("--") {
                long.push(l.to_string());
            } else if o.chars().count() == 2 {
                short.push(o[1..].to_string());
            }
        }
        short.sort_unstable();
        long.sort_unstable();
        if !short.is_empty() || !long.is_empty() {
            conditions.push(Condition::NotContainsOpt { short, long });
        }

        let strings = arg.option_strings();
        let strip = |v: Vec<&str>, n: usize| -> Vec<String> {
            v.into_iter().map(|o| o[n..].to_string()).collect()
        };

        let action = if arg.takes_value() {
            self.completer.complete(arg.completion())
        } else {
            FishAction::default()
        };

        FishRule {
            comment: None,
            conditions,
            short: strip(strings.short_options(), 1),
            long: strip(strings.long_options(), 2),
            old_style: strip(strings.old_style_options(), 1),
            description: arg.help().map(str::to_string),
            requires_argument: arg.takes_value(),
            action,
        }
    }

    fn positional_rule(&self, tree: &CommandTree, cmd: CommandId, idx: usize, arg: &Argument) -> Option<FishRule> {
        let mut conditions = Self::path_conditions(tree, cmd);
        conditions.push(Condition::Positional(tree.positional_index(cmd, idx)?));

        Some(FishRule {
            conditions,
            description: arg.help().map(str::to_string),
            action: self.completer.complete(arg.completion()),
            ..FishRule::default()
        })
    }

    fn subcommand_rules(&self, tree: &CommandTree, cmd: CommandId, program_name: &str, buf: &mut String) {
        let command = tree.get(cmd);
        let (slot, index) = match (command.subcommands(), tree.subcommand_index(cmd)) {
            (Some(slot), Some(index)) => (slot, index),
            _ => return,
        };
        let siblings: Vec<String> = slot.names().into_iter().map(str::to_string).collect();

        for (name, child) in slot.iter() {
            let mut conditions = Self::path_conditions(tree, cmd);
            conditions.push(Condition::NotSeen(siblings.clone()));
            conditions.push(Condition::Positional(index));

            FishRule {
                comment: Some(format!("command {}", name)),
                conditions,
                description: tree.get(child).help().map(str::to_string),
                action: FishAction::words(escape(name)),
                ..FishRule::default()
            }
            .render(program_name, buf);

            self.command_rules(tree, child, program_name, buf);
        }
    }

    fn command_rules(&self, tree: &CommandTree, cmd: CommandId, program_name: &str, buf: &mut String) {
        let command = tree.get(cmd);
        debug!(command = %tree.path(cmd).join(" "), "Generating fish rules");

        for (idx, arg) in command.options() {
            self.option_rule(tree, cmd, idx, arg).render(program_name, buf);
        }
        for (idx, arg) in command.positionals() {
            if let Some(rule) = self.positional_rule(tree, cmd, idx, arg) {
                rule.render(program_name, buf);
            }
        }
        self.subcommand_rules(tree, cmd, program_name, buf);
    }
}

impl Generator for FishGenerator {
    fn shell(&self) -> Shell {
        Shell::Fish
    }

    fn generate(&self, tree: &CommandTree, program_name: &str) -> String {
        let mut out = String::new();
        // positionals that want files opt back in with -F
        w!(out, "complete -c {} -f\n", escape(program_name));
        self.command_rules(tree, tree.root(), program_name, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shellcomp_core::IntRange;

    fn generate(tree: &CommandTree) -> String {
        FishGenerator::new().generate(tree, "prog")
    }

    #[test]
    fn test_empty_tree_proposes_nothing() {
        let tree = CommandTree::new("prog", None);
        assert_eq!(generate(&tree), "complete -c prog -f\n");
    }

    #[test]
    fn test_native_actions() {
        let c = FishCompleter;
        assert_eq!(
            c.complete(&Completion::choices(["a", "b"])),
            FishAction::words("'a b'")
        );
        assert_eq!(
            c.complete(&Completion::Range(IntRange::new(0, 10, 5).unwrap())),
            FishAction::words("'(seq 0 5 10)'")
        );
        assert!(c.complete(&Completion::file_glob("*.txt")).force_files);
        assert_eq!(
            c.complete(&Completion::Directory { glob: Some("*".into()) }),
            FishAction::words("'(__fish_complete_directories)'")
        );
    }

    #[test]
    fn test_flag_and_value_option_rules() {
        let mut tree = CommandTree::new("prog", None);
        let root = tree.root();
        tree.add_argument(root, Argument::flag("--flag|-f").unwrap().with_help("A flag"))
            .unwrap();
        tree.add_argument(root, Argument::option("--user").unwrap().with_completion(Completion::User))
            .unwrap();
        tree.add_argument(root, Argument::option("-o").unwrap()).unwrap();
        let script = generate(&tree);

        assert!(script.contains("complete -c prog -s f -l flag -d 'A flag'\n"));
        assert!(script.contains("complete -c prog -x -l user -a '(__fish_complete_users)'\n"));
        assert!(script.contains("complete -c prog -r -s o -F\n"));
    }

    #[test]
    fn test_exclusive_options_gate_each_other() {
        let mut tree = CommandTree::new("prog", None);
        let root = tree.root();
        tree.add_argument(root, Argument::flag("--quiet|-q").unwrap()).unwrap();
        tree.add_argument(root, Argument::flag("--verbose|-v").unwrap()).unwrap();
        tree.add_exclusive(root, &["--quiet", "--verbose"]).unwrap();
        let script = generate(&tree);

        assert!(script.contains(
            "complete -c prog -n 'not __fish_contains_opt -s v verbose' -s q -l quiet\n"
        ));
        assert!(script.contains(
            "complete -c prog -n 'not __fish_contains_opt -s q quiet' -s v -l verbose\n"
        ));
    }

    #[test]
    fn test_nested_subcommands_require_whole_path() {
        let mut tree = CommandTree::new("prog", None);
        let root = tree.root();
        let remote = tree.add_subcommand(root, "remote", Some("Manage remotes".into())).unwrap();
        tree.add_subcommand(root, "status", None).unwrap();
        let add = tree.add_subcommand(remote, "add", None).unwrap();
        tree.add_argument(add, Argument::flag("--fetch").unwrap()).unwrap();
        let script = generate(&tree);

        assert!(script.contains(
            "# command remote\ncomplete -c prog -f -n 'not __fish_seen_subcommand_from remote status && test (__fish_number_of_cmd_args_wo_opts) = 1' -d 'Manage remotes' -a remote\n"
        ));
        assert!(script.contains(
            "complete -c prog -f -n '__fish_seen_subcommand_from remote && not __fish_seen_subcommand_from add && test (__fish_number_of_cmd_args_wo_opts) = 2' -a add\n"
        ));
        assert!(script.contains(
            "complete -c prog -n '__fish_seen_subcommand_from remote && __fish_seen_subcommand_from add' -l fetch\n"
        ));
    }
}
