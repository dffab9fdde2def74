use crate::search::pattern::PatternMatcher;
use crate::types::MatchKind;

/// Strongest tier the candidate reaches. Checked strongest first, so a
/// candidate that qualifies for several tiers reports the best one.
pub fn determine_match_kind(candidate: &str, matcher: &PatternMatcher) -> MatchKind {
    if matcher.matches_exact(candidate) {
        MatchKind::Exact
    } else if matcher.matches_prefix(candidate) {
        MatchKind::Prefix
    } else if matcher.matches_substring(candidate) {
        MatchKind::Substring
    } else {
        MatchKind::None
    }
}
