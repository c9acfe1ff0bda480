//! One completion script generator per shell

mod bash;
mod fish;
mod zsh;

pub use bash::{BashAction, BashCompleter, BashGenerator};
pub use fish::{FishAction, FishCompleter, FishGenerator};
pub use zsh::{ZshCompleter, ZshGenerator};

use std::collections::{BTreeMap, HashSet};

use shellcomp_core::escape::make_identifier;
use shellcomp_core::{CommandId, CommandTree};

macro_rules! w {
    ($($tt:tt)*) => {{
        let _ = write!($($tt)*);
    }};
}
pub(crate) use w;

/// Shell function name for `cmd`, e.g. `_prog_build_release`
fn function_name(tree: &CommandTree, cmd: CommandId, program_name: &str) -> String {
    let mut parts = vec![program_name];
    parts.extend(tree.subcommand_path(cmd));
    make_identifier(&format!("_{}", parts.join("_")))
}

/// Unique function name of every command in a tree.
///
/// `prog a-b` and `prog a b` sanitize to the same identifier; the command
/// visited later in [`CommandTree::walk`] order gets a numeric suffix.
#[derive(Debug)]
pub(crate) struct FunctionNames(BTreeMap<CommandId, String>);

impl FunctionNames {
    pub(crate) fn new(tree: &CommandTree, program_name: &str) -> Self {
        let mut used = HashSet::new();
        let mut names = BTreeMap::new();

        for id in tree.walk() {
            let base = function_name(tree, id, program_name);
            let mut name = base.clone();
            let mut n = 2;
            while !used.insert(name.clone()) {
                name = format!("{}_{}", base, n);
                n += 1;
            }
            names.insert(id, name);
        }
        FunctionNames(names)
    }

    pub(crate) fn get(&self, cmd: CommandId) -> &str {
        self.0.get(&cmd).map_or("", String::as_str)
    }
}
