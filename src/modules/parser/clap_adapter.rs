//! Build a command tree from a clap `Command`

use clap::{Arg, ArgAction, ValueHint};
use shellcomp_core::{
    Argument, CommandId, CommandTree, Completion, CompletionError, OptionStrings, Result,
    DEFAULT_SUBCOMMANDS_NAME,
};
use tracing::debug;

/// Translate a clap command definition, including its subcommands.
///
/// The command is built first so clap's generated `--help`/`--version`
/// arguments and `help` subcommand show up like the user's own. Hidden
/// arguments, possible values and subcommands are left out.
pub fn from_clap(command: &clap::Command) -> Result<CommandTree> {
    let mut command = command.clone();
    command.build();

    let mut tree = CommandTree::new(command.get_name(), about(&command));
    let root = tree.root();
    add_command(&mut tree, root, &command)?;
    Ok(tree)
}

fn about(command: &clap::Command) -> Option<String> {
    command
        .get_about()
        .or_else(|| command.get_long_about())
        .map(|s| s.to_string())
}

fn add_command(tree: &mut CommandTree, id: CommandId, command: &clap::Command) -> Result<()> {
    debug!(command = command.get_name(), "Translating clap command");

    // clap argument id -> index in the command
    let mut indices: Vec<(&str, usize)> = Vec::new();
    for arg in command.get_arguments().filter(|a| !a.is_hide_set()) {
        let idx = tree.add_argument(id, convert_arg(arg)?)?;
        indices.push((arg.get_id().as_str(), idx));
    }

    for group in command.get_groups() {
        if group.clone().is_multiple() {
            continue;
        }

        let members: Vec<usize> = group
            .get_args()
            .filter_map(|member| {
                indices
                    .iter()
                    .find(|(name, _)| *name == member.as_str())
                    .map(|&(_, idx)| idx)
            })
            .filter(|&idx| {
                tree.get(id)
                    .argument(idx)
                    .map_or(false, |a| a.is_option() && a.group().is_none())
            })
            .collect();

        if members.len() < 2 {
            debug!(group = group.get_id().as_str(), "Skipping group with fewer than two options");
            continue;
        }

        let gid = tree.add_group(id);
        for idx in members {
            tree.add_to_group(id, gid, idx)?;
        }
    }

    let subcommands: Vec<&clap::Command> = command
        .get_subcommands()
        .filter(|s| !s.is_hide_set())
        .collect();
    if subcommands.is_empty() {
        return Ok(());
    }

    let title = command
        .get_subcommand_value_name()
        .map(str::to_lowercase)
        .unwrap_or_else(|| DEFAULT_SUBCOMMANDS_NAME.to_string());
    tree.add_subcommands(
        id,
        title,
        command.get_subcommand_help_heading().map(str::to_string),
    )?;

    for sub in subcommands {
        let child = tree.add_subcommand(id, sub.get_name(), about(sub))?;
        add_command(tree, child, sub)?;
    }

    Ok(())
}

fn convert_arg(arg: &Arg) -> Result<Argument> {
    let id = arg.get_id().as_str();

    let option_strings = if arg.is_positional() {
        OptionStrings::new([id])?
    } else {
        let mut names: Vec<String> = Vec::new();
        if let Some(longs) = arg.get_long_and_visible_aliases() {
            names.extend(longs.into_iter().map(|l| format!("--{}", l)));
        }
        if let Some(shorts) = arg.get_short_and_visible_aliases() {
            names.extend(shorts.into_iter().map(|s| format!("-{}", s)));
        }
        if names.is_empty() {
            return Err(CompletionError::EmptyOptionStrings(id.to_string()));
        }
        OptionStrings::new(names)?
    };

    let (takes_value, repeatable) = match arg.get_action() {
        ArgAction::Help
        | ArgAction::HelpShort
        | ArgAction::HelpLong
        | ArgAction::Version
        | ArgAction::SetTrue
        | ArgAction::SetFalse => (false, false),
        ArgAction::Count => (false, true),
        ArgAction::Set => (true, false),
        ArgAction::Append => (true, true),
        other => {
            return Err(CompletionError::UnsupportedNode(format!(
                "{}: {:?}",
                id, other
            )))
        }
    };

    let mut argument = Argument::new(option_strings, takes_value);
    if let Some(help) = arg.get_help() {
        argument = argument.with_help(help.to_string());
    }
    if repeatable {
        argument = argument.repeatable();
    }
    if !takes_value {
        return Ok(argument);
    }

    if let Some(name) = arg.get_value_names().and_then(|names| names.first()) {
        argument = argument.with_metavar(name.to_string());
    }

    let values: Vec<_> = arg
        .get_possible_values()
        .into_iter()
        .filter(|v| !v.is_hide_set())
        .collect();

    if values.iter().any(|v| v.get_help().is_some()) {
        argument = argument.with_described_choices(values.iter().map(|v| {
            (
                v.get_name().to_string(),
                v.get_help().map(|h| h.to_string()).unwrap_or_default(),
            )
        }));
    } else if !values.is_empty() {
        argument = argument.with_choices(values.iter().map(|v| v.get_name().to_string()));
    } else if let Some(completion) = hint_completion(arg.get_value_hint()) {
        argument = argument.with_completion(completion);
    }

    Ok(argument)
}

/// Completion for a clap value hint, `None` to keep the default
fn hint_completion(hint: ValueHint) -> Option<Completion> {
    let completion = match hint {
        ValueHint::AnyPath | ValueHint::FilePath | ValueHint::ExecutablePath => Completion::file(),
        ValueHint::DirPath => Completion::directory(),
        ValueHint::CommandName | ValueHint::CommandString | ValueHint::CommandWithArguments => {
            Completion::Command
        }
        ValueHint::Username => Completion::User,
        ValueHint::Hostname => Completion::Hostname,
        ValueHint::Other | ValueHint::Url | ValueHint::EmailAddress => Completion::None,
        _ => return None,
    };
    Some(completion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{ArgGroup, Command};

    fn sample() -> Command {
        Command::new("prog")
            .about("Test program")
            .arg(
                Arg::new("verbose")
                    .short('v')
                    .long("verbose")
                    .action(ArgAction::Count)
                    .help("More output"),
            )
            .arg(Arg::new("mode").long("mode").value_parser(["fast", "slow"]))
            .arg(
                Arg::new("out")
                    .short('o')
                    .long("out")
                    .value_name("DIR")
                    .value_hint(ValueHint::DirPath),
            )
            .arg(Arg::new("include").short('I').action(ArgAction::Append))
            .arg(Arg::new("quiet").long("quiet").action(ArgAction::SetTrue))
            .arg(Arg::new("loud").long("loud").action(ArgAction::SetTrue))
            .arg(Arg::new("secret").long("secret").hide(true))
            .group(ArgGroup::new("volume").args(["quiet", "loud"]))
            .subcommand(
                Command::new("build")
                    .about("Build it")
                    .arg(Arg::new("target").value_hint(ValueHint::Hostname)),
            )
            .subcommand(Command::new("internal").hide(true))
    }

    #[test]
    fn test_root_and_flags() {
        let tree = from_clap(&sample()).unwrap();
        let root = tree.get(tree.root());
        assert_eq!(root.name(), "prog");
        assert_eq!(root.help(), Some("Test program"));

        let verbose = root.argument(root.find_argument("--verbose").unwrap()).unwrap();
        assert!(verbose.option_strings().contains("-v"));
        assert!(!verbose.takes_value());
        assert!(verbose.is_repeatable());
        assert_eq!(verbose.help(), Some("More output"));

        let help = root.argument(root.find_argument("--help").unwrap()).unwrap();
        assert!(!help.takes_value());
    }

    #[test]
    fn test_value_options() {
        let tree = from_clap(&sample()).unwrap();
        let root = tree.get(tree.root());

        let mode = root.argument(root.find_argument("--mode").unwrap()).unwrap();
        assert_eq!(mode.completion(), &Completion::choices(["fast", "slow"]));

        let out = root.argument(root.find_argument("-o").unwrap()).unwrap();
        assert_eq!(out.completion(), &Completion::directory());
        assert_eq!(out.metavar(), "DIR");

        let include = root.argument(root.find_argument("-I").unwrap()).unwrap();
        assert!(include.takes_value());
        assert!(include.is_repeatable());
    }

    #[test]
    fn test_hidden_items_are_skipped() {
        let tree = from_clap(&sample()).unwrap();
        let root = tree.get(tree.root());
        assert!(root.find_argument("--secret").is_none());

        let slot = root.subcommands().unwrap();
        assert!(slot.get("build").is_some());
        assert!(slot.get("internal").is_none());
    }

    #[test]
    fn test_exclusive_group() {
        let tree = from_clap(&sample()).unwrap();
        let root_id = tree.root();
        let quiet = tree.get(root_id).find_argument("--quiet").unwrap();
        assert_eq!(tree.conflicting_option_strings(root_id, quiet), vec!["--loud"]);
    }

    #[test]
    fn test_subcommand_positional() {
        let tree = from_clap(&sample()).unwrap();
        let build = tree.get(tree.root()).subcommands().unwrap().get("build").unwrap();
        let build = tree.get(build);
        assert_eq!(build.help(), Some("Build it"));

        let target = build.argument(build.find_argument("target").unwrap()).unwrap();
        assert!(target.is_positional());
        assert_eq!(target.completion(), &Completion::Hostname);
    }

    #[test]
    fn test_described_possible_values() {
        use clap::builder::PossibleValue;

        let cmd = Command::new("prog").arg(Arg::new("level").long("level").value_parser([
            PossibleValue::new("low").help("Quiet"),
            PossibleValue::new("high"),
        ]));
        let tree = from_clap(&cmd).unwrap();
        let root = tree.get(tree.root());
        let level = root.argument(root.find_argument("--level").unwrap()).unwrap();
        assert_eq!(
            level.completion(),
            &Completion::described([("low", "Quiet"), ("high", "")])
        );
    }
}
