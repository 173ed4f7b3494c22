//! JSON file store.
//!
//! Stores the entire collection, the daily history and the user settings in a
//! single pretty-printed `quotes.json`. Writes go to a sibling temporary file
//! that is then renamed over the original, so a crash mid-write leaves the
//! previous document intact.
//!
//! A file that exists but cannot be parsed is reported as
//! [`Error::CorruptStore`] and never overwritten.

use crate::models::{
    DisplayHistory, Quote, Settings, StoreDocument, StoreStats, timestamp,
};
use crate::storage::QuoteStore;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the store inside the data directory.
pub const STORE_FILE_NAME: &str = "quotes.json";

/// Maximum accepted store size (32MB).
const MAX_FILE_SIZE: u64 = 32 * 1024 * 1024;

/// Serialization view of a document with freshly computed stats.
#[derive(Serialize)]
struct StoredDocument<'a> {
    version: &'a str,
    quotes: &'a [Quote],
    display_history: &'a DisplayHistory,
    #[serde(with = "timestamp::option")]
    last_daily_display: Option<DateTime<Utc>>,
    settings: &'a Settings,
    stats: StoreStats,
}

impl<'a> From<&'a StoreDocument> for StoredDocument<'a> {
    fn from(doc: &'a StoreDocument) -> Self {
        Self {
            version: &doc.version,
            quotes: &doc.quotes,
            display_history: &doc.display_history,
            last_daily_display: doc.last_daily_display,
            settings: &doc.settings,
            stats: StoreStats::compute(&doc.quotes),
        }
    }
}

/// Single-file JSON store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    /// Directory holding the store.
    data_dir: PathBuf,
    /// Full path of `quotes.json`.
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store rooted at `data_dir`.
    ///
    /// Nothing is touched on disk until the first save.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let path = data_dir.join(STORE_FILE_NAME);
        Self { data_dir, path }
    }

    /// Returns the store file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the data directory.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }

    fn corrupt(&self, cause: impl ToString) -> Error {
        Error::CorruptStore {
            path: self.path.display().to_string(),
            cause: cause.to_string(),
        }
    }
}

impl QuoteStore for JsonFileStore {
    fn load(&self) -> Result<StoreDocument> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "Store file missing, starting empty");
            return Ok(StoreDocument::default());
        }

        let metadata = fs::metadata(&self.path).map_err(|e| self.corrupt(e))?;
        if metadata.len() > MAX_FILE_SIZE {
            return Err(self.corrupt(format!(
                "file exceeds maximum size of {MAX_FILE_SIZE} bytes"
            )));
        }

        let json = fs::read_to_string(&self.path).map_err(|e| self.corrupt(e))?;
        if json.trim().is_empty() {
            tracing::warn!(path = %self.path.display(), "Store file is empty, starting empty");
            return Ok(StoreDocument::default());
        }

        let mut document: StoreDocument =
            serde_json::from_str(&json).map_err(|e| self.corrupt(e))?;

        let dropped = document.drop_dangling_history();
        if dropped > 0 {
            tracing::debug!(dropped, "Dropped history entries for missing quotes");
        }

        tracing::debug!(
            path = %self.path.display(),
            quotes = document.quotes.len(),
            "Loaded store"
        );
        Ok(document)
    }

    fn save(&self, document: &StoreDocument) -> Result<()> {
        fs::create_dir_all(&self.data_dir).map_err(|e| Error::OperationFailed {
            operation: "create_data_dir".to_string(),
            cause: e.to_string(),
        })?;

        let json = serde_json::to_string_pretty(&StoredDocument::from(document)).map_err(|e| {
            Error::OperationFailed {
                operation: "serialize_store".to_string(),
                cause: e.to_string(),
            }
        })?;

        let temp = self.temp_path();
        fs::write(&temp, json).map_err(|e| Error::OperationFailed {
            operation: "write_store".to_string(),
            cause: e.to_string(),
        })?;

        fs::rename(&temp, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp);
            Error::OperationFailed {
                operation: "replace_store".to_string(),
                cause: e.to_string(),
            }
        })?;

        tracing::debug!(
            path = %self.path.display(),
            quotes = document.quotes.len(),
            "Saved store"
        );
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuoteId;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested"));
        let doc = store.load().unwrap();
        assert!(doc.quotes.is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_save_creates_directory_and_file() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested"));
        store.save(&StoreDocument::default()).unwrap();
        assert!(store.path().exists());
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn test_save_writes_stats() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        let mut doc = StoreDocument::default();
        let mut quote = Quote::new("Shown");
        quote.times_shown = 2;
        let id = quote.id.clone();
        doc.quotes.push(quote);
        doc.quotes.push(Quote::new("Never shown"));

        store.save(&doc).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["stats"]["total_quotes"], 2);
        assert_eq!(raw["stats"]["most_shown_quote_id"], id.as_str());
    }

    #[test]
    fn test_corrupt_file_is_reported_and_kept() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        fs::write(store.path(), "{ not json").unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, Error::CorruptStore { .. }));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "{ not json");
    }

    #[test]
    fn test_empty_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        fs::write(store.path(), "  \n").unwrap();
        assert!(store.load().unwrap().quotes.is_empty());
    }

    #[test]
    fn test_load_drops_dangling_history() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        let mut doc = StoreDocument::default();
        doc.display_history.record(QuoteId::new("ghost"), Utc::now());
        store.save(&doc).unwrap();

        assert!(store.load().unwrap().display_history.is_empty());
    }

    #[test]
    fn test_legacy_document_without_settings() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        let legacy = r#"{
            "quotes": [{
                "id": "q1",
                "text": "Be here now.",
                "author": "Ram Dass",
                "date_added": "2025-10-11T08:00:00.000001"
            }],
            "display_history": [{"quote_id": "q1", "shown_at": "2025-10-12T07:00:00"}]
        }"#;
        fs::write(store.path(), legacy).unwrap();

        let doc = store.load().unwrap();
        assert_eq!(doc.quotes.len(), 1);
        assert_eq!(doc.display_history.len(), 1);
        assert_eq!(doc.settings, Settings::default());
    }
}
