//! Type definitions for shellcomp
//!
//! This crate contains the closed enumerations shared across the shellcomp
//! codebase: target shells, completion kinds and declared value types.

pub mod kind;
pub mod shell;
pub mod value_type;

pub use kind::CompletionKind;
pub use shell::Shell;
pub use value_type::ValueType;
