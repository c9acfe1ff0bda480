//! Markdown reference page for a command tree

use std::fmt::Write;

use shellcomp_core::{Argument, CommandId, CommandTree, Completion};

use crate::backends::w;

/// Render DESCRIPTION, SYNOPSIS, OPTIONS and COMMANDS sections.
///
/// Subcommands are rendered recursively after their parent, each with its
/// full path (`prog remote add`) as program name.
pub fn generate_markdown(tree: &CommandTree, program_name: Option<&str>) -> String {
    let root = tree.root();
    let program_name = program_name.unwrap_or_else(|| tree.get(root).name());
    let mut out = String::new();
    render_command(tree, root, program_name, &mut out);
    out
}

fn render_command(tree: &CommandTree, cmd: CommandId, program_name: &str, out: &mut String) {
    let command = tree.get(cmd);

    if let Some(help) = command.help().filter(|h| !h.is_empty()) {
        w!(out, "DESCRIPTION\n-----------\n\n{}\n\n", help);
    }

    w!(out, "SYNOPSIS\n--------\n\n`{}` [OPTIONS]\n\n", program_name);

    if !command.arguments().is_empty() {
        w!(out, "OPTIONS\n-------\n\n");
        for arg in command.arguments() {
            render_argument(arg, out);
        }
    }

    if let Some(slot) = command.subcommands().filter(|s| !s.is_empty()) {
        w!(out, "COMMANDS\n--------\n\n{}\n", slot.names().join(", "));
        for (name, child) in slot.iter() {
            out.push('\n');
            render_command(tree, child, &format!("{} {}", program_name, name), out);
        }
    }
}

fn render_argument(arg: &Argument, out: &mut String) {
    w!(out, "  `{}", arg.option_strings().iter().collect::<Vec<_>>().join(", "));
    if arg.takes_value() && arg.is_option() {
        w!(out, " {}", arg.metavar());
    }
    match arg.completion() {
        Completion::Choices(choices) => w!(out, " [{}]", choices.values().join(", ")),
        Completion::Range(range) => w!(out, " [{}]", range.materialize().join(", ")),
        _ => {}
    }
    out.push_str("`\n");
    if let Some(help) = arg.help() {
        w!(out, "    {}\n", help);
    }
    out.push('\n');
}
