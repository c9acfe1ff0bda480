//! Shell quoting and identifier sanitizing shared by every backend

use once_cell::sync::Lazy;
use regex::Regex;

/// Words made only of these characters never need quoting
static SAFE_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_,:-]+$").unwrap());

/// Characters that cannot appear in a shell function or variable name
static NON_IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_]").unwrap());

static UNDERSCORE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"_+").unwrap());

/// Quote `s` so the shell reads it back as exactly one word.
///
/// Single quotes are preferred. Strings containing a single quote are
/// double-quoted instead, and strings containing both quote characters use
/// the `'...'"'"'...'` concatenation form. The empty string becomes `''`.
pub fn escape(s: &str) -> String {
    escape_with(s, true)
}

/// Like [`escape`], but the empty string is dropped when `escape_empty` is false
pub fn escape_with(s: &str, escape_empty: bool) -> String {
    if s.is_empty() && !escape_empty {
        return String::new();
    }

    if SAFE_WORD.is_match(s) {
        return s.to_string();
    }

    if !s.contains('\'') {
        return format!("'{}'", s);
    }

    if !s.contains('"') {
        let escaped = s
            .replace('\\', "\\\\")
            .replace('$', "\\$")
            .replace('`', "\\`");
        return format!("\"{}\"", escaped);
    }

    format!("'{}'", s.replace('\'', r#"'"'"'"#))
}

/// Quote every word and join them with spaces
pub fn escape_words<I, S>(words: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    words
        .into_iter()
        .map(|w| escape(w.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Turn `s` into a valid shell function/variable name
pub fn make_identifier(s: &str) -> String {
    let replaced = s.replace('-', "_");
    let stripped = NON_IDENTIFIER.replace_all(&replaced, "");
    let collapsed = UNDERSCORE_RUN.replace_all(&stripped, "_").into_owned();

    match collapsed.chars().next() {
        None => "_".to_string(),
        Some(c) if c.is_ascii_digit() => format!("_{}", collapsed),
        Some(_) => collapsed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_simple_tokens_unchanged() {
        for token in ["--flag", "-f", "build", "a,b", "key:value", "snake_case", "42"] {
            assert_eq!(escape(token), token);
        }
    }

    #[test]
    fn test_escape_prefers_single_quotes() {
        assert_eq!(escape("two words"), "'two words'");
        assert_eq!(escape("*.txt"), "'*.txt'");
        assert_eq!(escape("$HOME"), "'$HOME'");
    }

    #[test]
    fn test_escape_single_quote_uses_double_quotes() {
        assert_eq!(escape("Here is a single quote: '"), "\"Here is a single quote: '\"");
        assert_eq!(escape(r"it's a\b"), r#""it's a\\b""#);
        assert_eq!(escape("it's $HOME"), r#""it's \$HOME""#);
    }

    #[test]
    fn test_escape_both_quotes_uses_concatenation() {
        assert_eq!(escape(r#"a'b"c"#), r#"'a'"'"'b"c'"#);
    }

    #[test]
    fn test_escape_empty_string() {
        assert_eq!(escape(""), "''");
        assert_eq!(escape_with("", false), "");
        assert_eq!(escape_with("x y", false), "'x y'");
    }

    #[test]
    fn test_escape_words() {
        assert_eq!(escape_words(["1", "two and a half", "3"]), "1 'two and a half' 3");
    }

    #[test]
    fn test_make_identifier() {
        assert_eq!(make_identifier("_my-prog"), "_my_prog");
        assert_eq!(make_identifier("__prog__build"), "_prog_build");
        assert_eq!(make_identifier("git.sub cmd"), "gitsubcmd");
        assert_eq!(make_identifier("2to3"), "_2to3");
        assert_eq!(make_identifier("$%"), "_");
    }

    #[test]
    fn test_make_identifier_is_idempotent() {
        for s in ["_my-prog", "9lives", "a--b__c", "x.y-z", "", "--", "_1_"] {
            let once = make_identifier(s);
            assert_eq!(make_identifier(&once), once);
        }
    }
}
