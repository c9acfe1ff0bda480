//! Shell patterns matching a set of option strings

use once_cell::sync::Lazy;
use regex::Regex;
use shellcomp_core::escape::escape;

/// Option strings that can go inside an extglob without quoting
static PLAIN_OPTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(-[A-Za-z0-9]|--[A-Za-z0-9_][A-Za-z0-9_-]*)$").unwrap());

/// Aliases above this count are compacted when the shell has extended globbing
const COMPACT_THRESHOLD: usize = 3;

/// Pattern matching any of an argument's option strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionPattern {
    /// Nothing to match
    Empty,
    /// Explicit list of escaped alternatives
    Alternation(Vec<String>),
    /// Compacted extglob such as `-@([ab]|-@(all|both))`
    Extglob(String),
}

impl OptionPattern {
    /// Smallest pattern for `option_strings`.
    ///
    /// Up to three aliases are listed as-is. Longer lists of `-x`/`--xyz`
    /// forms are folded into `-@([xy])`, `--@(xyz|abc)` or the combined
    /// `-@([xy]|-@(xyz|abc))` when `extglob` is available.
    pub fn new<S: AsRef<str>>(option_strings: &[S], extglob: bool) -> Self {
        let mut sorted: Vec<&str> = option_strings.iter().map(AsRef::as_ref).collect();
        sorted.sort_unstable();
        sorted.dedup();

        if sorted.is_empty() {
            return OptionPattern::Empty;
        }

        let compactable = extglob
            && sorted.len() > COMPACT_THRESHOLD
            && sorted.iter().all(|s| PLAIN_OPTION.is_match(s));

        if !compactable {
            return OptionPattern::Alternation(sorted.into_iter().map(escape).collect());
        }

        let short: String = sorted
            .iter()
            .filter(|s| !s.starts_with("--"))
            .map(|s| &s[1..])
            .collect();
        let long: Vec<&str> = sorted
            .iter()
            .filter_map(|s| s.strip_prefix("--"))
            .collect();

        let pattern = match (short.is_empty(), long.is_empty()) {
            (true, _) => format!("--@({})", long.join("|")),
            (false, true) => format!("-@([{}])", short),
            (false, false) => format!("-@([{}]|-@({}))", short, long.join("|")),
        };
        OptionPattern::Extglob(pattern)
    }

    /// Label for a `case` arm
    pub fn case_label(&self) -> String {
        match self {
            OptionPattern::Empty => "''".to_string(),
            OptionPattern::Alternation(alts) => alts.join("|"),
            OptionPattern::Extglob(p) => p.clone(),
        }
    }

    /// Standalone glob for `[[ $word == pattern ]]` style tests
    pub fn glob(&self) -> String {
        match self {
            OptionPattern::Empty => String::new(),
            OptionPattern::Alternation(alts) if alts.len() == 1 => alts[0].clone(),
            OptionPattern::Alternation(alts) => format!("@({})", alts.join("|")),
            OptionPattern::Extglob(p) => p.clone(),
        }
    }
}
