//! In-memory store.

use crate::models::StoreDocument;
use crate::storage::QuoteStore;
use crate::{Error, Result};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Store that keeps the document in process memory.
///
/// Counts saves so tests can assert that read-only paths stay read-only.
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: Mutex<StoreDocument>,
    saves: AtomicUsize,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with `document`.
    #[must_use]
    pub fn with_document(document: StoreDocument) -> Self {
        Self {
            document: Mutex::new(document),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of completed saves.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl QuoteStore for MemoryStore {
    fn load(&self) -> Result<StoreDocument> {
        let guard = self.document.lock().map_err(|e| Error::OperationFailed {
            operation: "lock_memory_store".to_string(),
            cause: e.to_string(),
        })?;
        Ok(guard.clone())
    }

    fn save(&self, document: &StoreDocument) -> Result<()> {
        let mut guard = self.document.lock().map_err(|e| Error::OperationFailed {
            operation: "lock_memory_store".to_string(),
            cause: e.to_string(),
        })?;
        *guard = document.clone();
        guard.refresh_stats();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Quote;

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        let mut doc = store.load().unwrap();
        doc.quotes.push(Quote::new("Hello"));
        store.save(&doc).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.quotes.len(), 1);
        assert_eq!(loaded.stats.total_quotes, 1);
        assert_eq!(store.save_count(), 1);
    }
}
