//! Storage integration tests.
//!
//! Exercises the JSON file store through `QuoteService`:
//! - Save/load round trips every quote field and the settings
//! - Missing and empty files start an empty collection
//! - Unreadable files are reported and never overwritten
//! - A failed save leaves the collection as it was

// Integration tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used)]

use chrono::{TimeZone, Utc};
use quotes::Error;
use quotes::models::{NewQuote, StoreDocument, ThemeName};
use quotes::services::{DailyService, QuoteService};
use quotes::storage::{JsonFileStore, MemoryStore, QuoteStore, STORE_FILE_NAME};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs;
use std::sync::atomic::{AtomicBool, Ordering};
use tempfile::TempDir;

fn open(dir: &TempDir) -> QuoteService<JsonFileStore> {
    QuoteService::open(JsonFileStore::new(dir.path())).expect("open store")
}

#[test]
fn test_round_trip_preserves_fields() {
    let dir = TempDir::new().unwrap();
    let mut service = open(&dir);

    let mut request = NewQuote::new("The obstacle is the way.")
        .with_author("Marcus Aurelius")
        .with_source("Meditations")
        .with_note("Reread every winter")
        .with_categories(["Resilience", "wisdom"]);
    request.ai_metadata.author_confidence = 0.92;
    request.ai_metadata.suggested_categories = vec!["resilience".to_string()];
    request.ai_metadata.category_confidence = 0.8;
    let saved = service.add(request).unwrap();

    let reopened = open(&dir);
    let loaded = reopened.get(&saved.id).expect("quote persisted");
    assert_eq!(loaded, &saved);
    assert_eq!(loaded.author, "Marcus Aurelius");
    assert_eq!(loaded.source, "Meditations");
    assert_eq!(loaded.personal_note, "Reread every winter");
    assert_eq!(loaded.categories, vec!["resilience", "wisdom"]);
    assert!((loaded.ai_metadata.author_confidence - 0.92).abs() < f32::EPSILON);
}

#[test]
fn test_history_and_last_display_survive_reload() {
    let dir = TempDir::new().unwrap();
    let mut service = open(&dir);
    service.add(NewQuote::new("First")).unwrap();
    service.add(NewQuote::new("Second")).unwrap();

    let now = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
    let mut rng = StdRng::seed_from_u64(11);
    let shown = DailyService::new(&mut service)
        .select(false, now, &mut rng)
        .unwrap()
        .expect("a quote");

    let reopened = open(&dir);
    let document = reopened.document();
    assert_eq!(document.display_history.len(), 1);
    assert_eq!(document.display_history.last().unwrap().quote_id, shown.id);
    assert_eq!(document.last_daily_display, Some(now));
    assert_eq!(reopened.get(&shown.id).unwrap().times_shown, 1);
}

#[test]
fn test_settings_round_trip() {
    let dir = TempDir::new().unwrap();
    let mut service = open(&dir);
    service
        .update_settings(|settings| {
            settings.preferences.theme = Some(ThemeName::HighContrast);
            settings.add_custom_category("Stoicism");
            settings.ai.duplicate_threshold = 85;
        })
        .unwrap();

    let settings = open(&dir).settings().clone();
    assert_eq!(settings.preferences.theme, Some(ThemeName::HighContrast));
    assert_eq!(settings.custom_categories, vec!["stoicism"]);
    assert_eq!(settings.ai.duplicate_threshold, 85);
}

#[test]
fn test_missing_and_empty_files_start_empty() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path().join("nested"));
    assert_eq!(store.load().unwrap(), StoreDocument::default());

    fs::write(dir.path().join(STORE_FILE_NAME), "  \n").unwrap();
    assert_eq!(open(&dir).count(), 0);
}

#[test]
fn test_corrupt_file_is_reported_and_kept() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(STORE_FILE_NAME);
    fs::write(&path, "{ not json").unwrap();

    let result = QuoteService::open(JsonFileStore::new(dir.path()));
    assert!(matches!(result, Err(Error::CorruptStore { .. })));
    assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
}

#[test]
fn test_delete_removes_history_on_disk() {
    let dir = TempDir::new().unwrap();
    let mut service = open(&dir);
    let quote = service.add(NewQuote::new("Only one")).unwrap();
    let now = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
    DailyService::new(&mut service)
        .select(false, now, &mut StdRng::seed_from_u64(1))
        .unwrap();

    service.delete(&quote.id).unwrap();

    let reopened = open(&dir);
    assert_eq!(reopened.count(), 0);
    assert!(reopened.document().display_history.is_empty());
}

/// Store whose saves fail while `failing` is set.
#[derive(Default)]
struct UnreliableStore {
    inner: MemoryStore,
    failing: AtomicBool,
}

impl UnreliableStore {
    fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl QuoteStore for UnreliableStore {
    fn load(&self) -> quotes::Result<StoreDocument> {
        self.inner.load()
    }

    fn save(&self, document: &StoreDocument) -> quotes::Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::OperationFailed {
                operation: "write_store".to_string(),
                cause: "disk full".to_string(),
            });
        }
        self.inner.save(document)
    }

    fn location(&self) -> String {
        "unreliable".to_string()
    }
}

mod failed_saves {
    use super::*;

    #[test]
    fn test_failed_add_is_not_persisted_later() {
        let mut service = QuoteService::open(UnreliableStore::default()).unwrap();
        service.store().set_failing(true);
        assert!(service.add(NewQuote::new("Failed add")).is_err());
        assert_eq!(service.count(), 0);

        service.store().set_failing(false);
        service.add(NewQuote::new("Second")).unwrap();

        let texts: Vec<String> = service
            .store()
            .load()
            .unwrap()
            .quotes
            .into_iter()
            .map(|q| q.text)
            .collect();
        assert_eq!(texts, vec!["Second"]);
    }

    #[test]
    fn test_failed_update_and_delete_leave_quote_intact() {
        let mut service = QuoteService::open(UnreliableStore::default()).unwrap();
        let quote = service.add(NewQuote::new("Original")).unwrap();

        service.store().set_failing(true);
        let mut edited = quote.clone();
        edited.text = "Edited".to_string();
        assert!(service.update(edited).is_err());
        assert!(service.delete(&quote.id).is_err());
        assert!(
            service
                .update_settings(|settings| settings.ai.duplicate_threshold = 95)
                .is_err()
        );

        assert_eq!(service.get(&quote.id).unwrap().text, "Original");
        assert_eq!(service.settings().ai.duplicate_threshold, 70);

        service.store().set_failing(false);
        service.add(NewQuote::new("Another")).unwrap();
        let stored = service.store().load().unwrap();
        assert_eq!(stored.quotes.len(), 2);
        assert_eq!(stored.quotes[0].text, "Original");
        assert_eq!(stored.settings.ai.duplicate_threshold, 70);
    }

    #[test]
    fn test_failed_daily_pick_records_nothing() {
        let mut service = QuoteService::open(UnreliableStore::default()).unwrap();
        service.add(NewQuote::new("Only")).unwrap();
        service.store().set_failing(true);

        let now = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
        let result = DailyService::new(&mut service).select(false, now, &mut StdRng::seed_from_u64(3));
        assert!(result.is_err());
        assert!(service.document().display_history.is_empty());
        assert_eq!(service.document().last_daily_display, None);
        assert_eq!(service.all()[0].times_shown, 0);
    }
}
