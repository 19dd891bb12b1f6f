//! Interaction log: a bounded, newest-first list of past tool runs.
//!
//! History is best-effort. Reads never fail (absent or corrupt data reads as empty) and a
//! failed write is retried once after dropping the older half of the log.

use crate::storage::{Storage, StorageError};
use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, warn};

/// Storage entry holding the JSON-encoded log
pub const HISTORY_ENTRY: &str = "DEEP_DISSECT_HISTORY";
pub const HISTORY_CAPACITY: usize = 50;
pub const SUMMARY_MAX_CHARS: usize = 50;

/// Object fields probed, in order, for a representative input summary
const SUMMARY_FIELDS: [&str; 4] = ["title", "concept", "question", "termA"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RequestRecord {
    pub id: String,
    /// Milliseconds since the Unix epoch
    pub created_at: i64,
    pub tool_id: String,
    pub input_summary: String,
    pub result: Value,
}

#[derive(Error, Debug)]
#[error("Failed to persist history: {0}")]
pub struct PersistenceError(#[from] pub StorageError);

#[derive(Clone)]
pub struct HistoryStore {
    storage: Arc<dyn Storage>,
}

impl HistoryStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// All records, newest first. Corrupt records are dropped.
    pub fn list(&self) -> Vec<RequestRecord> {
        let stored = match self.storage.get(HISTORY_ENTRY) {
            Ok(Some(stored)) => stored,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!("Failed to load history: {err}");
                return Vec::new();
            }
        };

        let entries: Vec<Value> = match serde_json::from_str(&stored) {
            Ok(entries) => entries,
            Err(err) => {
                warn!("History entry is not a JSON array, ignoring it: {err}");
                return Vec::new();
            }
        };

        let total = entries.len();
        let records: Vec<RequestRecord> = entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect();
        if records.len() < total {
            debug!("Discarded {} corrupt history records", total - records.len());
        }
        records
    }

    /// Prepends a record for a successful run and persists the log.
    pub fn append(
        &self,
        tool_id: &str,
        input: &Value,
        result: Value,
    ) -> Result<RequestRecord, PersistenceError> {
        let record = RequestRecord {
            id: generate_id(),
            created_at: Utc::now().timestamp_millis(),
            tool_id: tool_id.to_string(),
            input_summary: summarize_input(input),
            result,
        };

        let mut records = Vec::with_capacity(HISTORY_CAPACITY);
        records.push(record.clone());
        records.extend(self.list());
        records.truncate(HISTORY_CAPACITY);

        if let Err(err) = self.persist(&records) {
            warn!("Failed to save history ({err}), pruning to half capacity and retrying");
            records.truncate(HISTORY_CAPACITY / 2);
            if let Err(retry_err) = self.persist(&records) {
                error!("Critical storage error, history record dropped: {retry_err}");
                return Err(retry_err.into());
            }
        }

        debug!("Saved history record {} for {}", record.id, tool_id);
        Ok(record)
    }

    pub fn clear(&self) -> Result<(), PersistenceError> {
        self.storage.remove(HISTORY_ENTRY)?;
        Ok(())
    }

    /// Drops the record with the given id and returns the remaining records.
    pub fn remove(&self, id: &str) -> Result<Vec<RequestRecord>, PersistenceError> {
        let mut records = self.list();
        records.retain(|record| record.id != id);
        self.persist(&records)?;
        Ok(records)
    }

    fn persist(&self, records: &[RequestRecord]) -> Result<(), StorageError> {
        let json = serde_json::to_string(records)
            .map_err(|e| StorageError::Io(std::io::Error::other(e)))?;
        self.storage.set(HISTORY_ENTRY, &json)
    }
}

/// Time-ordered id: base-36 milliseconds plus a random base-36 suffix.
/// Unique in practice, not guaranteed.
pub fn generate_id() -> String {
    let millis = Utc::now().timestamp_millis().max(0) as u64;
    let mut rng = rand::thread_rng();
    let suffix: String = (0..10)
        .map(|_| char::from_digit(rng.gen_range(0..36), 36).unwrap_or('0'))
        .collect();
    format!("{}{}", to_base36(millis), suffix)
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(char::from_digit((value % 36) as u32, 36).unwrap_or('0'));
        value /= 36;
    }
    digits.iter().rev().collect()
}

/// Short human-readable digest of a tool input
pub fn summarize_input(input: &Value) -> String {
    match input {
        Value::String(text) => truncate_chars(text, SUMMARY_MAX_CHARS),
        Value::Object(fields) => {
            let representative = SUMMARY_FIELDS
                .iter()
                .filter_map(|name| fields.get(*name).and_then(Value::as_str))
                .find(|text| !text.is_empty());
            match representative {
                Some(text) => truncate_chars(text, SUMMARY_MAX_CHARS),
                None => truncate_chars(&input.to_string(), SUMMARY_MAX_CHARS),
            }
        }
        Value::Null => String::new(),
        other => truncate_chars(&other.to_string(), SUMMARY_MAX_CHARS),
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStorage, MemoryStorage};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;

    /// Storage whose first `failures` writes fail with a quota error
    struct FlakyStorage {
        inner: MemoryStorage,
        failures: AtomicUsize,
        writes: AtomicUsize,
    }

    impl FlakyStorage {
        fn new(failures: usize) -> Self {
            Self {
                inner: MemoryStorage::new(),
                failures: AtomicUsize::new(failures),
                writes: AtomicUsize::new(0),
            }
        }
    }

    impl Storage for FlakyStorage {
        fn get(&self, key: &str) -> crate::storage::Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> crate::storage::Result<()> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            let remaining = self.failures.load(Ordering::SeqCst);
            if remaining > 0 {
                self.failures.store(remaining - 1, Ordering::SeqCst);
                return Err(StorageError::QuotaExceeded {
                    needed: value.len() as u64,
                    quota: 0,
                });
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> crate::storage::Result<()> {
            self.inner.remove(key)
        }
    }

    fn memory_history() -> (Arc<MemoryStorage>, HistoryStore) {
        let storage = Arc::new(MemoryStorage::new());
        let history = HistoryStore::new(storage.clone());
        (storage, history)
    }

    #[test]
    fn list_is_empty_without_storage_entry() {
        let (_, history) = memory_history();
        assert!(history.list().is_empty());
    }

    #[test]
    fn list_ignores_unparseable_entry() {
        let (storage, history) = memory_history();
        storage.set(HISTORY_ENTRY, "{not json").unwrap();
        assert!(history.list().is_empty());

        storage.set(HISTORY_ENTRY, r#"{"id": "x"}"#).unwrap();
        assert!(history.list().is_empty());
    }

    #[test]
    fn list_discards_corrupt_records_only() {
        let (storage, history) = memory_history();
        let stored = json!([
            {"id": "a", "createdAt": 2, "toolId": "JURY", "inputSummary": "x", "result": {}},
            {"id": 42},
            "garbage",
            {"id": "b", "createdAt": 1, "toolId": "JURY", "inputSummary": "y", "result": null}
        ]);
        storage.set(HISTORY_ENTRY, &stored.to_string()).unwrap();

        let ids: Vec<String> = history.list().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn append_prepends_newest_first() {
        let (_, history) = memory_history();
        history.append("JURY", &json!("first"), json!({"n": 1})).unwrap();
        history.append("BIAS_DETECTOR", &json!("second"), json!({"n": 2})).unwrap();

        let records = history.list();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].tool_id, "BIAS_DETECTOR");
        assert_eq!(records[0].input_summary, "second");
        assert_eq!(records[1].result, json!({"n": 1}));
        assert_ne!(records[0].id, records[1].id);
    }

    #[test]
    fn appending_sixty_records_keeps_the_fifty_most_recent() {
        let (_, history) = memory_history();
        for n in 0..60 {
            history
                .append("JURY", &json!(format!("input {n}")), json!({ "n": n }))
                .unwrap();
        }

        let records = history.list();
        assert_eq!(records.len(), HISTORY_CAPACITY);
        let retained: Vec<i64> = records
            .iter()
            .map(|r| r.result["n"].as_i64().unwrap())
            .collect();
        let expected: Vec<i64> = (10..60).rev().collect();
        assert_eq!(retained, expected);
    }

    #[test]
    fn quota_failure_prunes_to_half_capacity_and_retries() {
        let storage = Arc::new(FlakyStorage::new(0));
        let history = HistoryStore::new(storage.clone());
        for n in 0..HISTORY_CAPACITY {
            history.append("JURY", &json!("x"), json!({ "n": n })).unwrap();
        }

        storage.failures.store(1, Ordering::SeqCst);
        let record = history
            .append("JURY", &json!("newest"), json!({"n": "newest"}))
            .unwrap();

        let records = history.list();
        assert_eq!(records.len(), HISTORY_CAPACITY / 2);
        assert_eq!(records[0].id, record.id);
        assert_eq!(records[1].result, json!({ "n": HISTORY_CAPACITY - 1 }));
    }

    #[test]
    fn second_failure_is_reported_and_log_left_untouched() {
        let storage = Arc::new(FlakyStorage::new(0));
        let history = HistoryStore::new(storage.clone());
        history.append("JURY", &json!("kept"), json!({})).unwrap();

        storage.failures.store(2, Ordering::SeqCst);
        let writes_before = storage.writes.load(Ordering::SeqCst);
        let err = history.append("JURY", &json!("lost"), json!({}));

        assert!(err.is_err());
        assert_eq!(storage.writes.load(Ordering::SeqCst) - writes_before, 2);
        let records = history.list();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].input_summary, "kept");
    }

    #[test]
    fn remove_is_idempotent() {
        let (_, history) = memory_history();
        let first = history.append("JURY", &json!("a"), json!({})).unwrap();
        history.append("JURY", &json!("b"), json!({})).unwrap();

        let once = history.remove(&first.id).unwrap();
        let twice = history.remove(&first.id).unwrap();

        assert_eq!(once.len(), 1);
        assert_eq!(once, twice);
        assert_eq!(history.list(), twice);
    }

    #[test]
    fn clear_removes_everything() {
        let (storage, history) = memory_history();
        history.append("JURY", &json!("a"), json!({})).unwrap();
        history.clear().unwrap();

        assert!(history.list().is_empty());
        assert!(storage.get(HISTORY_ENTRY).unwrap().is_none());
    }

    #[test]
    fn file_backed_history_survives_reopen() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let record = {
            let history = HistoryStore::new(Arc::new(FileStorage::new(temp_dir.path().into())));
            history.append("CODE_ARCH", &json!("fn main() {}"), json!({"spaghettiIndex": 3}))
                .unwrap()
        };

        let reopened = HistoryStore::new(Arc::new(FileStorage::new(temp_dir.path().into())));
        assert_eq!(reopened.list(), vec![record]);
    }

    #[test]
    fn records_use_camel_case_layout() {
        let (storage, history) = memory_history();
        history.append("JURY", &json!("x"), json!({})).unwrap();

        let stored: Value =
            serde_json::from_str(&storage.get(HISTORY_ENTRY).unwrap().unwrap()).unwrap();
        let record = &stored[0];
        for key in ["id", "createdAt", "toolId", "inputSummary", "result"] {
            assert!(record.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn summary_truncates_long_strings() {
        let long = "a".repeat(80);
        let summary = summarize_input(&json!(long));
        assert_eq!(summary.chars().count(), SUMMARY_MAX_CHARS);
        assert!(summary.ends_with('…'));

        assert_eq!(summarize_input(&json!("short")), "short");
    }

    #[test]
    fn summary_prefers_representative_fields() {
        assert_eq!(
            summarize_input(&json!({"options": [], "title": "Move abroad?"})),
            "Move abroad?"
        );
        assert_eq!(
            summarize_input(&json!({"termA": "blockchain", "termB": "tofu"})),
            "blockchain"
        );

        let fallback = summarize_input(&json!({"profile": "p".repeat(100), "weakness": "w"}));
        assert!(fallback.starts_with("{\"profile\":"));
        assert!(fallback.chars().count() <= SUMMARY_MAX_CHARS);
    }

    #[test]
    fn ids_are_base36() {
        let id = generate_id();
        assert!(id.len() > 10);
        assert!(id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }
}
