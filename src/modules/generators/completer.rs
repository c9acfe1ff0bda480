//! Per-shell resolution of completion descriptors

use shellcomp_core::{Choices, Completion};
use shellcomp_types::Shell;
use tracing::warn;

use crate::signals::signal_choices;

/// Upper bound on substitution steps before giving up with `none`
const MAX_FALLBACK_STEPS: usize = 8;

/// Turns a [`Completion`] into shell syntax for one dialect.
///
/// Backends implement [`native`](Self::native) for the kinds their shell
/// supports directly. Described choices only reach `native` when the shell
/// can show descriptions. Anything else walks the [`substitute`](Self::substitute)
/// chain until a native action is found; every step logs a warning.
pub trait ShellCompleter {
    /// Shell-specific completion expression
    type Action;

    fn shell(&self) -> Shell;

    /// Action proposing nothing
    fn none(&self) -> Self::Action;

    /// Native action for `completion`, or `None` if the shell has no primitive for it
    fn native(&self, completion: &Completion) -> Option<Self::Action>;

    /// Next completion to try when `completion` has no native action
    fn substitute(&self, completion: &Completion) -> Completion {
        default_substitute(completion)
    }

    /// Resolve `completion`, falling back as needed
    fn complete(&self, completion: &Completion) -> Self::Action {
        let mut current = match completion {
            Completion::Signal { prefix } => signal_choices(prefix),
            other => other.clone(),
        };

        for _ in 0..MAX_FALLBACK_STEPS {
            let native = match &current {
                Completion::Choices(Choices::Described(_))
                    if !self.shell().supports_described_choices() =>
                {
                    None
                }
                other => self.native(other),
            };
            if let Some(action) = native {
                return action;
            }
            if current.is_none() {
                break;
            }

            let next = self.substitute(&current);
            warn!(
                shell = %self.shell(),
                from = %current,
                to = %next,
                "Falling back to a substitute completion"
            );
            current = next;
        }

        self.none()
    }
}

/// Fallback chain shared by every shell
pub fn default_substitute(completion: &Completion) -> Completion {
    match completion {
        Completion::Directory { glob } => Completion::File { glob: glob.clone() },
        Completion::File { glob: Some(_) } => Completion::file(),
        Completion::Command => Completion::file(),
        Completion::Range(range) => Completion::choices(range.materialize()),
        Completion::Choices(choices @ Choices::Described(_)) => {
            Completion::Choices(choices.to_plain())
        }
        Completion::Signal { prefix } => signal_choices(prefix),
        _ => Completion::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shellcomp_core::IntRange;
    use std::cell::Cell;

    /// Completer that only knows plain choices and files without globs
    struct Minimal {
        calls: Cell<usize>,
    }

    impl ShellCompleter for Minimal {
        type Action = String;

        fn shell(&self) -> Shell {
            Shell::Bash
        }

        fn none(&self) -> String {
            "nothing".to_string()
        }

        fn native(&self, completion: &Completion) -> Option<String> {
            self.calls.set(self.calls.get() + 1);
            match completion {
                Completion::Choices(Choices::Plain(v)) => Some(v.join(",")),
                Completion::File { glob: None } => Some("files".to_string()),
                _ => None,
            }
        }
    }

    fn minimal() -> Minimal {
        Minimal { calls: Cell::new(0) }
    }

    #[test]
    fn test_directory_with_glob_falls_back_to_plain_files() {
        let c = minimal();
        let action = c.complete(&Completion::Directory {
            glob: Some("*.d".into()),
        });
        assert_eq!(action, "files");
        assert_eq!(c.calls.get(), 3);
    }

    #[test]
    fn test_unknown_kind_falls_back_to_none() {
        let c = minimal();
        assert_eq!(c.complete(&Completion::Process), "nothing");
        assert_eq!(c.complete(&Completion::None), "nothing");
    }

    #[test]
    fn test_range_falls_back_to_materialized_choices() {
        let c = minimal();
        let range = IntRange::new(1, 3, 1).unwrap();
        assert_eq!(c.complete(&Completion::Range(range)), "1,2,3");
    }

    #[test]
    fn test_signal_expands_to_described_then_plain() {
        let c = minimal();
        let action = c.complete(&Completion::Signal {
            prefix: "SIG".into(),
        });
        assert!(action.starts_with("SIGABRT,SIGALRM"));
    }

    /// Completer for any shell that renders both kinds of choices
    struct Choosy(Shell);

    impl ShellCompleter for Choosy {
        type Action = &'static str;

        fn shell(&self) -> Shell {
            self.0
        }

        fn none(&self) -> &'static str {
            "nothing"
        }

        fn native(&self, completion: &Completion) -> Option<&'static str> {
            match completion {
                Completion::Choices(Choices::Described(_)) => Some("described"),
                Completion::Choices(Choices::Plain(_)) => Some("plain"),
                _ => None,
            }
        }
    }

    #[test]
    fn test_described_choices_follow_shell_capability() {
        let choices = Completion::described([("a", "First")]);
        assert_eq!(Choosy(Shell::Zsh).complete(&choices), "described");
        assert_eq!(Choosy(Shell::Bash).complete(&choices), "plain");
        assert_eq!(Choosy(Shell::Fish).complete(&choices), "plain");
    }

    #[test]
    fn test_default_substitute_chain() {
        assert_eq!(
            default_substitute(&Completion::Directory { glob: None }),
            Completion::file()
        );
        assert_eq!(default_substitute(&Completion::Command), Completion::file());
        assert_eq!(default_substitute(&Completion::file()), Completion::None);
        assert_eq!(default_substitute(&Completion::User), Completion::None);
    }
}
