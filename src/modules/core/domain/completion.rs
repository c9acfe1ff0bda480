//! Completion descriptors attached to arguments

use shellcomp_types::CompletionKind;
use std::fmt;

use crate::error::{CompletionError, Result};

/// Materialized ranges longer than this are truncated
pub const RANGE_DISPLAY_LIMIT: usize = 32;

/// Values kept from the start of a truncated range
pub const RANGE_HEAD: usize = 16;

/// Values kept from the end of a truncated range
pub const RANGE_TAIL: usize = 32;

/// Marker placed between head and tail of a truncated range
pub const ELLIPSIS: &str = "...";

/// What a shell should propose for an argument's value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    None,
    Choices(Choices),
    Command,
    Directory { glob: Option<String> },
    File { glob: Option<String> },
    Group,
    Hostname,
    Pid,
    Process,
    Range(IntRange),
    Service,
    User,
    Variable,
    Signal { prefix: String },
}

impl Completion {
    /// Descriptor for a kind that needs no extra data.
    ///
    /// `choices` and `range` carry values and cannot be built from the kind alone.
    pub fn from_kind(kind: CompletionKind) -> Result<Self> {
        Ok(match kind {
            CompletionKind::None => Completion::None,
            CompletionKind::Command => Completion::Command,
            CompletionKind::Directory => Completion::Directory { glob: None },
            CompletionKind::File => Completion::File { glob: None },
            CompletionKind::Group => Completion::Group,
            CompletionKind::Hostname => Completion::Hostname,
            CompletionKind::Pid => Completion::Pid,
            CompletionKind::Process => Completion::Process,
            CompletionKind::Service => Completion::Service,
            CompletionKind::User => Completion::User,
            CompletionKind::Variable => Completion::Variable,
            CompletionKind::Signal => Completion::Signal {
                prefix: String::new(),
            },
            CompletionKind::Choices | CompletionKind::Range => {
                return Err(CompletionError::Validation(format!(
                    "completion kind '{}' needs values",
                    kind
                )))
            }
        })
    }

    pub fn file() -> Self {
        Completion::File { glob: None }
    }

    pub fn file_glob(glob: impl Into<String>) -> Self {
        Completion::File {
            glob: Some(glob.into()),
        }
    }

    pub fn directory() -> Self {
        Completion::Directory { glob: None }
    }

    /// Plain choice list
    pub fn choices<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Completion::Choices(Choices::Plain(values.into_iter().map(Into::into).collect()))
    }

    /// Choice list with one description per value
    pub fn described<I, V, D>(values: I) -> Self
    where
        I: IntoIterator<Item = (V, D)>,
        V: Into<String>,
        D: Into<String>,
    {
        Completion::Choices(Choices::Described(
            values.into_iter().map(|(v, d)| (v.into(), d.into())).collect(),
        ))
    }

    pub fn kind(&self) -> CompletionKind {
        match self {
            Completion::None => CompletionKind::None,
            Completion::Choices(_) => CompletionKind::Choices,
            Completion::Command => CompletionKind::Command,
            Completion::Directory { .. } => CompletionKind::Directory,
            Completion::File { .. } => CompletionKind::File,
            Completion::Group => CompletionKind::Group,
            Completion::Hostname => CompletionKind::Hostname,
            Completion::Pid => CompletionKind::Pid,
            Completion::Process => CompletionKind::Process,
            Completion::Range(_) => CompletionKind::Range,
            Completion::Service => CompletionKind::Service,
            Completion::User => CompletionKind::User,
            Completion::Variable => CompletionKind::Variable,
            Completion::Signal { .. } => CompletionKind::Signal,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Completion::None)
    }
}

impl fmt::Display for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Completion::Choices(c) => write!(f, "choices[{}]", c.len()),
            Completion::Range(r) => write!(f, "range[{}]", r),
            Completion::File { glob: Some(g) } | Completion::Directory { glob: Some(g) } => {
                write!(f, "{}({})", self.kind(), g)
            }
            _ => write!(f, "{}", self.kind()),
        }
    }
}

/// Fixed set of values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choices {
    Plain(Vec<String>),
    Described(Vec<(String, String)>),
}

impl Choices {
    pub fn values(&self) -> Vec<&str> {
        match self {
            Choices::Plain(v) => v.iter().map(String::as_str).collect(),
            Choices::Described(v) => v.iter().map(|(value, _)| value.as_str()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Choices::Plain(v) => v.len(),
            Choices::Described(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Same values without descriptions
    pub fn to_plain(&self) -> Choices {
        Choices::Plain(self.values().into_iter().map(str::to_string).collect())
    }
}

/// Inclusive integer range `[start, stop]` walked by `step`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntRange {
    start: i64,
    stop: i64,
    step: i64,
}

impl IntRange {
    pub fn new(start: i64, stop: i64, step: i64) -> Result<Self> {
        if step == 0 {
            return Err(CompletionError::InvalidRange(format!(
                "{}..{}: step cannot be zero",
                start, stop
            )));
        }

        if (step > 0 && start > stop) || (step < 0 && start < stop) {
            return Err(CompletionError::InvalidRange(format!(
                "{}..{} cannot be walked with step {}",
                start, stop, step
            )));
        }

        Ok(Self { start, stop, step })
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn stop(&self) -> i64 {
        self.stop
    }

    pub fn step(&self) -> i64 {
        self.step
    }

    /// Number of values in the range
    pub fn len(&self) -> usize {
        let span = (i128::from(self.stop) - i128::from(self.start)) / i128::from(self.step);
        usize::try_from(span + 1).unwrap_or(usize::MAX)
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// The `i`-th value of the range
    pub fn nth(&self, i: usize) -> Option<i64> {
        if i >= self.len() {
            return None;
        }
        let value = i128::from(self.start) + i128::from(self.step) * i as i128;
        i64::try_from(value).ok()
    }

    /// Values as words, truncated for display.
    ///
    /// Ranges longer than [`RANGE_DISPLAY_LIMIT`] keep the first
    /// [`RANGE_HEAD`] values, then [`ELLIPSIS`], then the last [`RANGE_TAIL`]
    /// values. The whole range is never materialized.
    pub fn materialize(&self) -> Vec<String> {
        let len = self.len();
        let word = |i: usize| self.nth(i).map(|v| v.to_string()).unwrap_or_default();

        if len <= RANGE_DISPLAY_LIMIT {
            return (0..len).map(word).collect();
        }

        let mut out: Vec<String> = (0..RANGE_HEAD).map(word).collect();
        out.push(ELLIPSIS.to_string());
        out.extend((len - RANGE_TAIL..len).map(word));
        out
    }
}

impl fmt::Display for IntRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.step == 1 {
            write!(f, "{}..{}", self.start, self.stop)
        } else {
            write!(f, "{}..{}..{}", self.start, self.stop, self.step)
        }
    }
}
