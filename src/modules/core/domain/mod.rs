//! Shell-agnostic argument model

mod argument;
mod command;
mod completion;
mod option_strings;
mod tree;

pub use argument::Argument;
pub use command::{Command, CommandId, GroupId, MutuallyExclusiveGroup, SubcommandSlot};
pub use completion::{
    Choices, Completion, IntRange, ELLIPSIS, RANGE_DISPLAY_LIMIT, RANGE_HEAD, RANGE_TAIL,
};
pub use option_strings::OptionStrings;
pub use tree::{CommandTree, DEFAULT_SUBCOMMANDS_NAME};
