//! Core model for shellcomp
//!
//! This crate contains the shell-agnostic argument model, the quoting and
//! identifier helpers shared by every generator, and the error types.

pub mod domain;
pub mod error;
pub mod escape;

pub use domain::*;
pub use error::{CompletionError, Result};
