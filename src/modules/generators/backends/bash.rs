//! Bash completion scripts built on bash-completion's helpers

use std::fmt::Write;

use shellcomp_core::escape::{escape, escape_words};
use shellcomp_core::{CommandId, CommandTree, Completion};
use shellcomp_types::Shell;
use tracing::debug;

use super::{w, FunctionNames};
use crate::completer::ShellCompleter;
use crate::pattern::OptionPattern;
use crate::Generator;

/// What a bash case arm runs to fill `COMPREPLY`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BashAction {
    /// Propose nothing
    Nothing,
    /// Arguments for `compgen`, matched against `$cur`
    Compgen(String),
    /// Helper that fills `COMPREPLY` itself
    Command(String),
}

impl BashAction {
    fn compgen(args: impl Into<String>) -> Self {
        BashAction::Compgen(args.into())
    }

    fn render(&self) -> Option<String> {
        match self {
            BashAction::Nothing => None,
            BashAction::Compgen(args) => Some(format!("COMPREPLY=($(compgen {} -- \"$cur\"))", args)),
            BashAction::Command(cmd) => Some(cmd.clone()),
        }
    }
}

/// Maps completion kinds to `compgen` flags and bash-completion helpers
#[derive(Debug, Clone, Copy, Default)]
pub struct BashCompleter;

impl ShellCompleter for BashCompleter {
    type Action = BashAction;

    fn shell(&self) -> Shell {
        Shell::Bash
    }

    fn none(&self) -> BashAction {
        BashAction::Nothing
    }

    fn native(&self, completion: &Completion) -> Option<BashAction> {
        let action = match completion {
            Completion::None => BashAction::Nothing,
            Completion::Choices(choices) => {
                BashAction::compgen(format!("-W {}", escape(&escape_words(choices.values()))))
            }
            Completion::Command => BashAction::compgen("-A command"),
            Completion::Directory { glob: None } => BashAction::compgen("-d"),
            Completion::File { glob: None } => BashAction::compgen("-f"),
            Completion::Directory { glob: Some(g) } | Completion::File { glob: Some(g) } => {
                BashAction::compgen(format!("-G {}", escape(g)))
            }
            Completion::Group => BashAction::compgen("-A group"),
            Completion::Hostname => BashAction::compgen("-A hostname"),
            Completion::Pid => BashAction::Command("_pids".to_string()),
            Completion::Process => BashAction::Command("_pnames".to_string()),
            Completion::Range(r) if r.step() == 1 => {
                BashAction::compgen(format!("-W '{{{}..{}}}'", r.start(), r.stop()))
            }
            Completion::Range(r) => BashAction::compgen(format!(
                "-W '{{{}..{}..{}}}'",
                r.start(),
                r.stop(),
                r.step()
            )),
            Completion::Service => BashAction::compgen("-A service"),
            Completion::User => BashAction::compgen("-A user"),
            Completion::Variable => BashAction::compgen("-A variable"),
            Completion::Signal { .. } => return None,
        };
        Some(action)
    }
}

#[derive(Debug)]
struct CaseArm {
    label: String,
    action: BashAction,
}

impl CaseArm {
    fn render(&self, buf: &mut String) {
        w!(buf, "    {})\n", self.label);
        if let Some(line) = self.action.render() {
            w!(buf, "      {}\n", line);
        }
        w!(buf, "      return 0;;\n");
    }
}

/// One generated shell function, rendered in a single pass
#[derive(Debug)]
struct BashFunction {
    name: String,
    is_root: bool,
    count_args_pattern: Option<String>,
    subcommands: Vec<(String, String)>,
    prev_arms: Vec<CaseArm>,
    option_words: Vec<String>,
    guarded_words: Vec<GuardedWords>,
    positional_arms: Vec<CaseArm>,
}

/// Option strings hidden once a conflicting option is on the command line
#[derive(Debug)]
struct GuardedWords {
    conflicts: Vec<String>,
    words: Vec<String>,
}

impl GuardedWords {
    fn render(&self, buf: &mut String) {
        let tests: Vec<String> = self
            .conflicts
            .iter()
            .map(|c| format!("\" ${{words[*]}} \" = *\" \"{}\" \"*", escape(c)))
            .collect();
        w!(
            buf,
            "    [[ {} ]] || opts+={}\n",
            tests.join(" || "),
            escape(&format!(" {}", escape_words(&self.words)))
        );
    }
}

impl BashFunction {
    fn render(&self, buf: &mut String) {
        let mut sections: Vec<String> = Vec::new();

        if self.is_root {
            sections.push(
                "  local cur prev words cword split args i\n  _init_completion -s || return\n"
                    .to_string(),
            );
            if let Some(pattern) = &self.count_args_pattern {
                sections.push(format!("  _count_args \"\" \"{}\"\n", pattern));
            }
        } else if !self.subcommands.is_empty() {
            sections.push("  local i\n".to_string());
        }

        if !self.subcommands.is_empty() {
            let mut s = String::new();
            w!(s, "  for ((i = 1; i < cword; i++)); do\n");
            w!(s, "    case \"${{words[i]}}\" in\n");
            for (label, function) in &self.subcommands {
                w!(s, "      {}) {}; return 0;;\n", label, function);
            }
            w!(s, "    esac\n");
            w!(s, "  done\n");
            sections.push(s);
        }

        if !self.prev_arms.is_empty() {
            let mut s = String::from("  case \"$prev\" in\n");
            for arm in &self.prev_arms {
                arm.render(&mut s);
            }
            s.push_str("  esac\n");
            sections.push(s);
        }

        if !self.option_words.is_empty() || !self.guarded_words.is_empty() {
            let mut s = String::new();
            let words = escape(&escape_words(&self.option_words));
            w!(s, "  if [[ \"$cur\" = -* ]]; then\n");
            if self.guarded_words.is_empty() {
                w!(s, "    COMPREPLY=($(compgen -W {} -- \"$cur\"))\n", words);
            } else {
                w!(s, "    local opts={}\n", words);
                for guarded in &self.guarded_words {
                    guarded.render(&mut s);
                }
                w!(s, "    COMPREPLY=($(compgen -W \"$opts\" -- \"$cur\"))\n");
            }
            w!(s, "    return 0\n");
            w!(s, "  fi\n");
            sections.push(s);
        }

        if !self.positional_arms.is_empty() {
            let mut s = String::from("  case $args in\n");
            for arm in &self.positional_arms {
                arm.render(&mut s);
            }
            s.push_str("  esac\n");
            sections.push(s);
        }

        sections.push("  return 1\n".to_string());

        w!(buf, "{}() {{\n", self.name);
        buf.push_str(&sections.join("\n"));
        buf.push_str("}\n");
    }
}

/// Generates nested bash functions, one per command
#[derive(Debug, Clone, Copy, Default)]
pub struct BashGenerator {
    completer: BashCompleter,
}

impl BashGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    fn build(&self, tree: &CommandTree, cmd: CommandId, names: &FunctionNames) -> BashFunction {
        let command = tree.get(cmd);
        let name = names.get(cmd).to_string();
        debug!(function = %name, "Generating bash function");
        let extglob = self.shell().supports_extglob();

        let count_args_pattern = if command.is_root() && tree.has_positionals() {
            Some(OptionPattern::new(&tree.value_option_strings(), extglob).glob())
        } else {
            None
        };

        let subcommands: Vec<(String, String)> = command
            .subcommands()
            .map(|slot| {
                slot.iter()
                    .map(|(sub_name, id)| (escape(sub_name), names.get(id).to_string()))
                    .collect()
            })
            .unwrap_or_default();

        let prev_arms: Vec<CaseArm> = command
            .options()
            .filter(|(_, arg)| arg.takes_value())
            .map(|(_, arg)| CaseArm {
                label: OptionPattern::new(arg.option_strings().as_slice(), extglob).case_label(),
                action: self.completer.complete(arg.completion()),
            })
            .collect();

        let mut option_words: Vec<String> = Vec::new();
        let mut guarded_words: Vec<GuardedWords> = Vec::new();
        for (idx, arg) in command.options() {
            let words = arg.option_strings().sorted().into_iter().map(str::to_string);
            let mut conflicts = tree.conflicting_option_strings(cmd, idx);
            if conflicts.is_empty() {
                option_words.extend(words);
            } else {
                conflicts.sort_unstable();
                guarded_words.push(GuardedWords {
                    conflicts: conflicts.into_iter().map(str::to_string).collect(),
                    words: words.collect(),
                });
            }
        }
        option_words.sort_unstable();
        option_words.dedup();

        let mut positional_arms: Vec<CaseArm> = command
            .positionals()
            .filter_map(|(idx, arg)| {
                let index = tree.positional_index(cmd, idx)?;
                Some(CaseArm {
                    label: index.to_string(),
                    action: self.completer.complete(arg.completion()),
                })
            })
            .collect();

        if let (Some(slot), Some(index)) = (command.subcommands(), tree.subcommand_index(cmd)) {
            if !slot.is_empty() {
                positional_arms.push(CaseArm {
                    label: index.to_string(),
                    action: self.completer.complete(&Completion::choices(slot.names())),
                });
            }
        }

        BashFunction {
            name,
            is_root: command.is_root(),
            count_args_pattern,
            subcommands,
            prev_arms,
            option_words,
            guarded_words,
            positional_arms,
        }
    }
}

impl Generator for BashGenerator {
    fn shell(&self) -> Shell {
        Shell::Bash
    }

    fn generate(&self, tree: &CommandTree, program_name: &str) -> String {
        let names = FunctionNames::new(tree, program_name);
        let functions: Vec<String> = tree
            .walk()
            .into_iter()
            .map(|id| {
                let mut buf = String::new();
                self.build(tree, id, &names).render(&mut buf);
                buf
            })
            .collect();

        let mut out = String::from("#!/bin/bash\n\n");
        out.push_str(&functions.join("\n"));
        w!(
            out,
            "\ncomplete -F {} {}\n",
            names.get(tree.root()),
            escape(program_name)
        );
        out
    }
}
