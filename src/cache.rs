use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

/// Cached parse with insertion timestamp for TTL-based eviction.
/// `None` records a failed parse so it is not retried for the same text.
struct CacheEntry {
    tree: Option<Arc<tree_sitter::Tree>>,
    inserted_at: Instant,
}

/// Parse cache keyed by (file path, hash of source text). If the text
/// changes, the hash changes, the old entry is never hit and gets evicted
/// on the next prune.
pub struct TreeCache {
    entries: DashMap<(String, u64), CacheEntry>,
}

impl Default for TreeCache {
    fn default() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl TreeCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cached tree or parse and cache it.
    /// Uses `entry()` so two threads never parse the same key twice.
    pub fn get_or_parse(
        &self,
        path: &str,
        source: &str,
        parse: impl FnOnce() -> Option<tree_sitter::Tree>,
    ) -> Option<Arc<tree_sitter::Tree>> {
        match self.entries.entry((path.to_string(), content_hash(source))) {
            Entry::Occupied(e) => e.get().tree.clone(),
            Entry::Vacant(e) => {
                let tree = parse().map(Arc::new);
                e.insert(CacheEntry {
                    tree: tree.clone(),
                    inserted_at: Instant::now(),
                });
                tree
            }
        }
    }

    /// Evict entries that were cached more than `max_age` ago.
    pub fn prune(&self, max_age: Duration) {
        let Some(cutoff) = Instant::now().checked_sub(max_age) else {
            return;
        };
        self.entries.retain(|_, entry| entry.inserted_at > cutoff);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn content_hash(source: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    source.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn parse_ts(source: &str) -> Option<tree_sitter::Tree> {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
            .ok()?;
        parser.parse(source, None)
    }

    #[test]
    fn same_text_parses_once() {
        let cache = TreeCache::new();
        let calls = Cell::new(0);
        for _ in 0..3 {
            let tree = cache.get_or_parse("a.ts", "let x = 1;", || {
                calls.set(calls.get() + 1);
                parse_ts("let x = 1;")
            });
            assert!(tree.is_some());
        }
        assert_eq!(calls.get(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn changed_text_is_a_new_entry() {
        let cache = TreeCache::new();
        cache.get_or_parse("a.ts", "let x = 1;", || parse_ts("let x = 1;"));
        cache.get_or_parse("a.ts", "let y = 2;", || parse_ts("let y = 2;"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn failed_parse_is_remembered() {
        let cache = TreeCache::new();
        let calls = Cell::new(0);
        for _ in 0..2 {
            let tree = cache.get_or_parse("bad", "", || {
                calls.set(calls.get() + 1);
                None
            });
            assert!(tree.is_none());
        }
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn prune_drops_old_entries() {
        let cache = TreeCache::new();
        cache.get_or_parse("a.ts", "let x = 1;", || parse_ts("let x = 1;"));
        std::thread::sleep(Duration::from_millis(5));
        cache.prune(Duration::from_millis(1));
        assert!(cache.is_empty());
    }
}
