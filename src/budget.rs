use std::collections::HashSet;

use crate::types::NavigateToItem;

/// Whether the scan should keep feeding items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Stop,
}

/// Per-call result collector: caps accepted items at the remaining budget
/// and drops repeats of the same `(name, container)` pair.
///
/// Repeats cost nothing. The item that spends the last unit is accepted
/// and answered with `Stop`; nothing after it may be fed.
pub(crate) struct ResultAccumulator {
    remaining: usize,
    seen: HashSet<(String, String)>,
    results: Vec<NavigateToItem>,
}

impl ResultAccumulator {
    pub(crate) fn new(remaining: usize) -> Self {
        Self {
            remaining,
            seen: HashSet::new(),
            results: Vec::new(),
        }
    }

    pub(crate) fn try_emit(&mut self, item: NavigateToItem) -> Flow {
        if self.remaining == 0 {
            return Flow::Stop;
        }

        let key = (item.name.clone(), item.container_name.clone());
        if !self.seen.insert(key) {
            return Flow::Continue;
        }

        self.results.push(item);
        self.remaining -= 1;

        if self.remaining > 0 {
            Flow::Continue
        } else {
            Flow::Stop
        }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.remaining
    }

    pub(crate) fn into_results(self) -> Vec<NavigateToItem> {
        self.results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MatchKind, TextSpan};

    fn item(name: &str, container: &str) -> NavigateToItem {
        NavigateToItem {
            name: name.into(),
            kind: "identifier".into(),
            match_kind: MatchKind::Exact,
            is_case_sensitive: true,
            file_name: "a.ts".into(),
            container_name: container.into(),
            container_kind: "program".into(),
            text_span: TextSpan::new(0, name.len()),
        }
    }

    #[test]
    fn duplicates_do_not_spend_budget() {
        let mut acc = ResultAccumulator::new(2);
        assert_eq!(acc.try_emit(item("foo", "")), Flow::Continue);
        assert_eq!(acc.try_emit(item("foo", "")), Flow::Continue);
        assert_eq!(acc.remaining(), 1);
        assert_eq!(acc.into_results().len(), 1);
    }

    #[test]
    fn same_name_other_container_is_distinct() {
        let mut acc = ResultAccumulator::new(5);
        acc.try_emit(item("foo", ""));
        acc.try_emit(item("foo", "Test"));
        assert_eq!(acc.remaining(), 3);
    }

    #[test]
    fn last_unit_is_accepted_then_stops() {
        let mut acc = ResultAccumulator::new(2);
        assert_eq!(acc.try_emit(item("a", "")), Flow::Continue);
        assert_eq!(acc.try_emit(item("b", "")), Flow::Stop);
        assert_eq!(acc.try_emit(item("c", "")), Flow::Stop);

        let names: Vec<String> = acc.into_results().into_iter().map(|i| i.name).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn zero_budget_rejects_everything() {
        let mut acc = ResultAccumulator::new(0);
        assert_eq!(acc.try_emit(item("a", "")), Flow::Stop);
        assert!(acc.into_results().is_empty());
    }
}
