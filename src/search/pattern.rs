//! Search pattern compilation.
//!
//! The search string is a regular expression for the exact and substring
//! tests, but the prefix test compares the raw text character by character.
//! A pattern like `a.c` therefore fully matches `abc` yet is only a prefix
//! of candidates that literally start with `a.c`.

use regex::{Regex, RegexBuilder};
use tracing::debug;

/// A search string compiled once per navigate-to call.
pub struct PatternMatcher {
    pattern: String,
    case_sensitive: bool,
    compiled: Option<Compiled>,
}

struct Compiled {
    /// Unanchored, for substring search.
    anywhere: Regex,
    /// Anchored at both ends, for whole-candidate matches.
    whole: Regex,
}

impl PatternMatcher {
    /// Compile `pattern`. An invalid regex yields a matcher whose
    /// predicates are all false; check with [`is_valid`](Self::is_valid).
    pub fn new(pattern: &str, case_sensitive: bool) -> Self {
        let compiled = match compile(pattern, case_sensitive) {
            Ok(c) => Some(c),
            Err(e) => {
                debug!(pattern, error = %e, "search pattern rejected");
                None
            }
        };
        Self {
            pattern: pattern.to_string(),
            case_sensitive,
            compiled,
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.compiled.is_some()
    }

    #[must_use]
    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// The pattern matches the whole candidate.
    #[must_use]
    pub fn matches_exact(&self, candidate: &str) -> bool {
        self.compiled
            .as_ref()
            .is_some_and(|c| c.whole.is_match(candidate))
    }

    /// The candidate starts with the raw pattern text. No regex involved.
    #[must_use]
    pub fn matches_prefix(&self, candidate: &str) -> bool {
        if self.compiled.is_none() {
            return false;
        }
        let mut rest = candidate.chars();
        self.pattern
            .chars()
            .all(|p| rest.next().is_some_and(|c| chars_eq(p, c, self.case_sensitive)))
    }

    /// The pattern matches somewhere inside the candidate.
    #[must_use]
    pub fn matches_substring(&self, candidate: &str) -> bool {
        self.compiled
            .as_ref()
            .is_some_and(|c| c.anywhere.is_match(candidate))
    }
}

fn compile(pattern: &str, case_sensitive: bool) -> Result<Compiled, regex::Error> {
    // Validate the raw pattern first: wrapping can turn an unbalanced
    // pattern like `)(` into a valid one.
    let anywhere = RegexBuilder::new(pattern)
        .case_insensitive(!case_sensitive)
        .build()?;
    let whole = RegexBuilder::new(&format!(r"\A(?:{pattern})\z"))
        .case_insensitive(!case_sensitive)
        .build()?;
    Ok(Compiled { anywhere, whole })
}

fn chars_eq(a: char, b: char, case_sensitive: bool) -> bool {
    a == b || (!case_sensitive && a.to_lowercase().eq(b.to_lowercase()))
}
