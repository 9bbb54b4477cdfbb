//! In-memory location history.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use replydesk_application::Navigator;

/// Entries kept before the oldest is dropped.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Navigator over an in-memory history stack.
///
/// The last entry is the current location. The stack never shrinks below
/// one entry.
#[derive(Debug)]
pub struct HistoryNavigator {
    entries: Mutex<VecDeque<String>>,
    limit: usize,
}

impl HistoryNavigator {
    /// Starts at `path` with the default history limit.
    #[must_use]
    pub fn new(path: &str) -> Self {
        Self::with_limit(path, DEFAULT_HISTORY_LIMIT)
    }

    /// Starts at `path`, keeping at most `limit` entries (minimum 1).
    #[must_use]
    pub fn with_limit(path: &str, limit: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::from([path.to_string()])),
            limit: limit.max(1),
        }
    }

    /// All entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.lock().iter().cloned().collect()
    }

    /// Goes back one entry. Returns the new location, or `None` at the
    /// start of history.
    pub fn back(&self) -> Option<String> {
        let mut entries = self.lock();
        if entries.len() < 2 {
            return None;
        }
        entries.pop_back();
        entries.back().cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Navigator for HistoryNavigator {
    fn location(&self) -> String {
        self.lock().back().cloned().unwrap_or_else(|| "/".to_string())
    }

    fn push(&self, path: &str) {
        let mut entries = self.lock();
        entries.push_back(path.to_string());
        while entries.len() > self.limit {
            entries.pop_front();
        }
        tracing::debug!(path, "navigated");
    }

    fn replace(&self, path: &str) {
        let mut entries = self.lock();
        entries.pop_back();
        entries.push_back(path.to_string());
        tracing::debug!(path, "location replaced");
    }
}
