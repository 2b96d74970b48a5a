//! In-memory conversion history, newest first, capped at a fixed number of
//! entries. One instance per session; cross-request ordering is the
//! caller's concern.

use std::sync::{Mutex, PoisonError};

use convert_core::job::HistoryEntry;
use convert_core::ports::HistoryStore;

/// Default number of retained conversions.
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

pub struct MemoryHistory {
    entries: Mutex<Vec<HistoryEntry>>,
    limit: usize,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            limit,
        }
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, Vec<HistoryEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryStore for MemoryHistory {
    fn append(&self, entry: HistoryEntry) {
        let mut entries = self.entries();
        entries.insert(0, entry);
        entries.truncate(self.limit);
    }

    fn list(&self) -> Vec<HistoryEntry> {
        self.entries().clone()
    }

    fn remove(&self, key: &str) -> bool {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|e| e.epub_name != key && e.download_url != key);
        entries.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn entry(name: &str) -> HistoryEntry {
        HistoryEntry {
            epub_name: name.to_string(),
            display_name: name.to_string(),
            size: 1,
            created_at: Utc::now(),
            download_url: format!("download/{}", name),
        }
    }

    #[test]
    fn test_newest_first() {
        let history = MemoryHistory::new();
        history.append(entry("first.epub"));
        history.append(entry("second.epub"));

        let listed = history.list();
        assert_eq!(listed[0].epub_name, "second.epub");
        assert_eq!(listed[1].epub_name, "first.epub");
    }

    #[test]
    fn test_limit_drops_oldest() {
        let history = MemoryHistory::with_limit(2);
        history.append(entry("a.epub"));
        history.append(entry("b.epub"));
        history.append(entry("c.epub"));

        let names: Vec<_> = history.list().iter().map(|e| e.epub_name.clone()).collect();
        assert_eq!(names, vec!["c.epub", "b.epub"]);
    }

    #[test]
    fn test_remove_by_name_or_locator() {
        let history = MemoryHistory::new();
        history.append(entry("a.epub"));
        history.append(entry("b.epub"));

        assert!(history.remove("a.epub"));
        assert!(history.remove("download/b.epub"));
        assert!(!history.remove("a.epub"));
        assert!(history.list().is_empty());
    }
}
