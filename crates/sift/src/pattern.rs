//! LIKE pattern helpers.
//!
//! Pattern fields interpolate user input into `%…%`. The input is escaped
//! first so a user-supplied `%` or `_` is matched literally. Escapes use
//! backslash, and rendered SQL declares `ESCAPE '\'`.

use regex::{Regex, RegexBuilder};

use crate::error::Result;

/// The escape character declared for every rendered pattern match.
pub const ESCAPE: char = '\\';

/// Upper bound on the compiled size of one pattern, in bytes.
pub const PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// Escape LIKE metacharacters (`%`, `_`, `\`) in user input.
///
/// ```
/// use sift::escape_like;
///
/// let pattern = format!("%{}%", escape_like("100% match_test"));
/// assert_eq!(pattern, "%100\\% match\\_test%");
/// ```
pub fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '%' | '_' | ESCAPE) {
            out.push(ESCAPE);
        }
        out.push(c);
    }
    out
}

/// Builds the substring pattern `%escaped%` for `value`.
pub fn contains_pattern(value: &str) -> String {
    format!("%{}%", escape_like(value))
}

/// Compiles a LIKE pattern into an anchored, case-insensitive regex.
///
/// `%` matches any run of characters, `_` exactly one, and a backslash makes
/// the next character literal. A trailing lone backslash matches itself.
///
/// Fails with [`crate::SiftError::InvalidPattern`] when the compiled pattern
/// would exceed [`PATTERN_SIZE_LIMIT`].
pub fn like_regex(pattern: &str) -> Result<Regex> {
    let mut re = String::with_capacity(pattern.len() + 8);
    re.push('^');
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '%' => re.push_str(".*"),
            '_' => re.push('.'),
            ESCAPE => {
                let literal = chars.next().unwrap_or(ESCAPE);
                re.push_str(&regex::escape(literal.encode_utf8(&mut [0; 4])));
            }
            other => re.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
        }
    }
    re.push('$');
    let compiled = RegexBuilder::new(&re)
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .size_limit(PATTERN_SIZE_LIMIT)
        .build()?;
    Ok(compiled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_no_special_chars() {
        assert_eq!(escape_like("hello"), "hello");
        assert_eq!(escape_like(""), "");
    }

    #[test]
    fn escape_metacharacters() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("foo_bar"), "foo\\_bar");
        assert_eq!(escape_like("path\\file"), "path\\\\file");
        assert_eq!(escape_like("100%_\\test"), "100\\%\\_\\\\test");
    }

    #[test]
    fn contains_wraps_in_wildcards() {
        assert_eq!(contains_pattern("bug"), "%bug%");
        assert_eq!(contains_pattern("50%"), "%50\\%%");
    }

    #[test]
    fn like_regex_wildcards() {
        let re = like_regex("%bug%").unwrap();
        assert!(re.is_match("Fix BUG in parser"));
        assert!(re.is_match("bug"));
        assert!(!re.is_match("bu g"));

        let re = like_regex("a_c").unwrap();
        assert!(re.is_match("abc"));
        assert!(!re.is_match("abbc"));
    }

    #[test]
    fn like_regex_escaped_percent_is_literal() {
        let re = like_regex(&contains_pattern("50%")).unwrap();
        assert!(re.is_match("save 50% today"));
        assert!(!re.is_match("save 500 today"));
    }

    #[test]
    fn like_regex_regex_metacharacters_are_literal() {
        let re = like_regex(&contains_pattern("a.b*(c)")).unwrap();
        assert!(re.is_match("xa.b*(c)y"));
        assert!(!re.is_match("aXbbc"));
    }

    #[test]
    fn like_regex_oversized_pattern_fails() {
        let err = like_regex(&"_".repeat(100_000)).unwrap_err();
        assert!(matches!(err, crate::SiftError::InvalidPattern(_)));
    }
}
