use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use dashmap::DashMap;

/// Per search string count of results already handed out.
///
/// Each search string owns its own lock. A navigate-to call holds that lock
/// from its budget check until it records the new count, so two calls for
/// the same string serialize while different strings never contend.
/// Entries live until `forget` or `reset`.
#[derive(Default)]
pub struct QuotaLedger {
    entries: DashMap<String, Arc<Mutex<usize>>>,
}

/// Exclusive access to one search string's count.
pub(crate) struct LedgerSlot {
    slot: Arc<Mutex<usize>>,
}

impl LedgerSlot {
    pub(crate) fn lock(&self) -> MutexGuard<'_, usize> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl QuotaLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot for `search_value`, created at zero on first use.
    /// The map shard lock is released before the caller locks the slot.
    pub(crate) fn slot(&self, search_value: &str) -> LedgerSlot {
        let slot = Arc::clone(&self.entries.entry(search_value.to_string()).or_default());
        LedgerSlot { slot }
    }

    /// Results emitted so far for `search_value`.
    #[must_use]
    pub fn emitted(&self, search_value: &str) -> usize {
        let Some(slot) = self.entries.get(search_value).map(|s| Arc::clone(&s)) else {
            return 0;
        };
        *slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Drop the entry for one search string, restoring its full budget.
    pub fn forget(&self, search_value: &str) {
        self.entries.remove(search_value);
    }

    pub fn reset(&self) {
        self.entries.clear();
    }

    /// Number of distinct search strings tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
