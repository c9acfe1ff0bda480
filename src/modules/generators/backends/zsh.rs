//! Zsh completion scripts built on `_arguments`

use std::fmt::Write;

use shellcomp_core::escape::{escape, escape_with, escape_words};
use shellcomp_core::{Argument, Choices, CommandId, CommandTree, Completion};
use shellcomp_types::Shell;
use tracing::debug;

use super::{w, FunctionNames};
use crate::completer::ShellCompleter;
use crate::Generator;

/// Maps completion kinds to zsh completion functions and value lists
#[derive(Debug, Clone, Copy, Default)]
pub struct ZshCompleter;

impl ShellCompleter for ZshCompleter {
    type Action = String;

    fn shell(&self) -> Shell {
        Shell::Zsh
    }

    fn none(&self) -> String {
        "'()'".to_string()
    }

    fn native(&self, completion: &Completion) -> Option<String> {
        let action = match completion {
            Completion::None => self.none(),
            Completion::Choices(Choices::Plain(values)) => {
                escape(&format!("({})", escape_words(values)))
            }
            Completion::Choices(Choices::Described(values)) => {
                let items: Vec<String> = values
                    .iter()
                    .map(|(value, desc)| {
                        escape(&format!("{}\\:{}", escape_colon(value), desc))
                    })
                    .collect();
                escape(&format!("(({}))", items.join(" ")))
            }
            Completion::Command => "_command_names".to_string(),
            Completion::Directory { glob: None } => "_directories".to_string(),
            Completion::File { glob: None } => "_files".to_string(),
            Completion::File { glob: Some(g) } => escape(&format!("_files -g {}", escape(g))),
            Completion::Group => "_groups".to_string(),
            Completion::Hostname => "_hosts".to_string(),
            Completion::Pid => "_pids".to_string(),
            Completion::Process => "_process_names".to_string(),
            Completion::Range(r) if r.step() == 1 => format!("'({{{}..{}}})'", r.start(), r.stop()),
            Completion::Range(r) => {
                format!("'({{{}..{}..{}}})'", r.start(), r.stop(), r.step())
            }
            Completion::User => "_users".to_string(),
            Completion::Variable => "_vars".to_string(),
            Completion::Directory { glob: Some(_) } | Completion::Service | Completion::Signal { .. } => {
                return None
            }
        };
        Some(action)
    }
}

/// Backslash-escape colons, which separate the fields of an `_arguments` spec
fn escape_colon(s: &str) -> String {
    s.replace(':', "\\:")
}

/// Escape a description for the `[...]` part of an option spec
fn escape_description(s: &str) -> String {
    escape_colon(s).replace('[', "\\[").replace(']', "\\]")
}

#[derive(Debug)]
struct Dispatch {
    line_index: usize,
    arms: Vec<(String, String)>,
}

/// One generated shell function, rendered in a single pass
#[derive(Debug)]
struct ZshFunction {
    name: String,
    is_root: bool,
    specs: Vec<String>,
    dispatch: Option<Dispatch>,
}

impl ZshFunction {
    fn render(&self, buf: &mut String) {
        w!(buf, "{}() {{\n", self.name);

        if self.is_root {
            w!(buf, "  local curcontext=\"$curcontext\" state state_descr line ret=1\n");
            w!(buf, "  typeset -A opt_args\n");
        } else if self.dispatch.is_some() {
            w!(buf, "  local curcontext=\"$curcontext\" state state_descr line ret=1\n");
        } else {
            w!(buf, "  local ret=1\n");
        }

        if !self.specs.is_empty() {
            let flag = if self.dispatch.is_some() { " -C" } else { "" };
            w!(buf, "\n  _arguments{} \\\n", flag);
            let last = self.specs.len() - 1;
            for (i, spec) in self.specs.iter().enumerate() {
                if i == last {
                    w!(buf, "    {} && ret=0\n", spec);
                } else {
                    w!(buf, "    {} \\\n", spec);
                }
            }
        }

        if let Some(dispatch) = &self.dispatch {
            let n = dispatch.line_index;
            w!(buf, "\n  case $state in\n");
            w!(buf, "    (args)\n");
            w!(buf, "      words=($line[{}] \"${{words[@]}}\")\n", n);
            w!(buf, "      (( CURRENT += 1 ))\n");
            w!(buf, "      case $line[{}] in\n", n);
            for (label, function) in &dispatch.arms {
                w!(buf, "        ({}) {} && ret=0;;\n", label, function);
            }
            w!(buf, "      esac\n");
            w!(buf, "      ;;\n");
            w!(buf, "  esac\n");
        }

        w!(buf, "\n  return ret\n");
        w!(buf, "}}\n");
    }
}

/// Generates nested zsh functions, one per command
#[derive(Debug, Clone, Copy, Default)]
pub struct ZshGenerator {
    completer: ZshCompleter,
}

impl ZshGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// `'(excl)'{--opt=,-o+}'[help]':METAVAR:action`
    fn option_spec(&self, tree: &CommandTree, cmd: CommandId, idx: usize, arg: &Argument) -> String {
        let mut exclusions: Vec<&str> = tree.conflicting_option_strings(cmd, idx);
        if !arg.is_repeatable() {
            exclusions.extend(arg.option_strings().iter());
        }
        exclusions.sort_unstable();
        exclusions.dedup();

        let mut prefix = String::new();
        if !exclusions.is_empty() {
            let escaped: Vec<String> = exclusions.iter().map(|s| escape_colon(s)).collect();
            prefix.push_str(&format!("({})", escaped.join(" ")));
        }
        if arg.is_repeatable() {
            prefix.push('*');
        }

        let names: Vec<String> = arg
            .option_strings()
            .sorted()
            .into_iter()
            .map(|o| {
                let suffix = match (arg.takes_value(), o.chars().count()) {
                    (false, _) => "",
                    (true, 2) => "+",
                    (true, _) => "=",
                };
                format!("{}{}", escape(&escape_colon(o)), suffix)
            })
            .collect();
        let names = if names.len() == 1 {
            names[0].clone()
        } else {
            format!("{{{}}}", names.join(","))
        };

        let description = arg
            .help()
            .map(|h| escape(&format!("[{}]", escape_description(h))))
            .unwrap_or_default();

        let mut spec = format!("{}{}{}", escape_with(&prefix, false), names, description);
        if arg.takes_value() {
            w!(
                spec,
                ":{}:{}",
                escape(&escape_colon(&arg.metavar())),
                self.completer.complete(arg.completion())
            );
        }
        spec
    }

    /// `:message:action`, message falling back to the metavar
    fn positional_spec(&self, arg: &Argument) -> String {
        let message = arg
            .help()
            .filter(|h| !h.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| arg.metavar());
        let star = if arg.is_repeatable() { "'*'" } else { "" };
        format!(
            "{}:{}:{}",
            star,
            escape(&escape_colon(&message)),
            self.completer.complete(arg.completion())
        )
    }

    fn build(&self, tree: &CommandTree, cmd: CommandId, names: &FunctionNames) -> ZshFunction {
        let command = tree.get(cmd);
        let name = names.get(cmd).to_string();
        debug!(function = %name, "Generating zsh function");

        let mut specs: Vec<String> = command
            .arguments()
            .iter()
            .enumerate()
            .map(|(idx, arg)| {
                if arg.is_option() {
                    self.option_spec(tree, cmd, idx, arg)
                } else {
                    self.positional_spec(arg)
                }
            })
            .collect();

        let mut dispatch = None;
        if let Some(slot) = command.subcommands().filter(|s| !s.is_empty()) {
            let completion = if slot.iter().any(|(_, id)| tree.get(id).help().is_some()) {
                Completion::described(
                    slot.iter()
                        .map(|(n, id)| (n, tree.get(id).help().unwrap_or_default())),
                )
            } else {
                Completion::choices(slot.names())
            };
            specs.push(format!(
                ":{}:{}",
                escape(&escape_colon(slot.name())),
                self.completer.complete(&completion)
            ));
            specs.push("'*:::arg:->args'".to_string());

            dispatch = Some(Dispatch {
                line_index: command.num_positionals() + 1,
                arms: slot
                    .iter()
                    .map(|(n, id)| (escape(n), names.get(id).to_string()))
                    .collect(),
            });
        }

        ZshFunction {
            name,
            is_root: command.is_root(),
            specs,
            dispatch,
        }
    }
}

impl Generator for ZshGenerator {
    fn shell(&self) -> Shell {
        Shell::Zsh
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

        let mut out = String::new();
        w!(out, "#compdef {}\n\n", program_name);
        out.push_str(&functions.join("\n"));
        w!(
            out,
            "\n{} \"$@\"\n",
            names.get(tree.root())
        );
        out
    }
}
