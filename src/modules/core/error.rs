//! Error types for shellcomp

use thiserror::Error;

/// Main error type for shellcomp operations
#[derive(Error, Debug)]
pub enum CompletionError {
    /// An argument mixes positional names and option strings
    #[error("Positional arguments and options cannot be mixed: {0}")]
    MixedOptionStrings(String),

    /// A positional argument was given more than one name
    #[error("A positional argument can only have one name: {0}")]
    MultiplePositionalNames(String),

    /// An argument was declared without any usable option string
    #[error("Argument has no usable option strings: '{0}'")]
    EmptyOptionStrings(String),

    /// Both a choice list and an explicit completion kind were declared
    #[error("Argument '{0}' has both choices and a completion kind set")]
    ConflictingCompletion(String),

    /// A completion was declared on an argument that takes no value
    #[error("Argument '{0}' has a completion but takes no value")]
    CompletionWithoutValue(String),

    /// A mutually-exclusive group references a positional argument
    #[error("Positional argument '{0}' cannot be part of a mutually exclusive group")]
    PositionalInGroup(String),

    /// An argument was added to a second mutually-exclusive group
    #[error("Argument '{0}' already belongs to a mutually exclusive group")]
    AlreadyGrouped(String),

    /// A group member does not exist in the command
    #[error("Unknown argument in mutually exclusive group of '{command}': {argument}")]
    UnknownGroupMember { command: String, argument: String },

    /// Two subcommands share a name
    #[error("Duplicate subcommand '{name}' in command '{command}'")]
    DuplicateSubcommand { command: String, name: String },

    /// A command already owns a subparsers slot
    #[error("Command '{0}' already has subcommands")]
    DuplicateSubcommandSlot(String),

    /// Malformed integer range
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// The input adapter produced a node the generators do not understand
    #[error("Unsupported argument definition: {0}")]
    UnsupportedNode(String),

    /// Description file parsing error
    #[error("Description error: {0}")]
    Config(String),

    /// Description validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CompletionError {
    /// Returns true if the error was raised while building the argument model
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self,
            CompletionError::MixedOptionStrings(_)
                | CompletionError::MultiplePositionalNames(_)
                | CompletionError::EmptyOptionStrings(_)
                | CompletionError::ConflictingCompletion(_)
                | CompletionError::CompletionWithoutValue(_)
                | CompletionError::PositionalInGroup(_)
                | CompletionError::AlreadyGrouped(_)
                | CompletionError::UnknownGroupMember { .. }
                | CompletionError::DuplicateSubcommand { .. }
                | CompletionError::DuplicateSubcommandSlot(_)
                | CompletionError::InvalidRange(_)
                | CompletionError::UnsupportedNode(_)
        )
    }

    /// Returns true if the error comes from reading or decoding the input description
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CompletionError::Config(_)
                | CompletionError::Validation(_)
                | CompletionError::Json(_)
        )
    }

    /// Process exit code for the CLI
    pub fn exit_code(&self) -> i32 {
        if self.is_construction_error() {
            65
        } else if self.is_input_error() {
            66
        } else {
            1
        }
    }
}

/// Result type alias using CompletionError
pub type Result<T> = std::result::Result<T, CompletionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(CompletionError::MixedOptionStrings("a|-b".into()).is_construction_error());
        assert!(CompletionError::UnsupportedNode("Append".into()).is_construction_error());
        assert!(!CompletionError::Config("bad".into()).is_construction_error());
        assert!(CompletionError::Config("bad".into()).is_input_error());
    }

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(CompletionError::InvalidRange("step 0".into()).exit_code(), 65);
        assert_eq!(CompletionError::Validation("x".into()).exit_code(), 66);

        let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(CompletionError::from(json).exit_code(), 66);
    }

    #[test]
    fn test_error_messages() {
        let err = CompletionError::DuplicateSubcommand {
            command: "prog".into(),
            name: "build".into(),
        };
        assert_eq!(err.to_string(), "Duplicate subcommand 'build' in command 'prog'");
    }
}
